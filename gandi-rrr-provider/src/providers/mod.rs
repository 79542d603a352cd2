//! Zone API implementations

#[cfg(feature = "gandi")]
mod gandi;
mod memory;

#[cfg(feature = "gandi")]
pub use gandi::GandiProvider;
pub use memory::InMemoryZoneApi;
