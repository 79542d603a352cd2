//! HTTP(S) server bootstrap

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, anyhow};
use gandi_rrr_core::{Config, DomainService, TlsConfig};
use rustls::ServerConfig;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};

use crate::handlers;
use crate::state::AppState;

/// Route every request, whatever its path or method, to the dispatcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(handlers::dispatch));
}

/// Accept the `:port` shorthand for all interfaces.
pub fn bind_address(listen: &str) -> String {
    if listen.starts_with(':') {
        format!("0.0.0.0{listen}")
    } else {
        listen.to_string()
    }
}

fn load_tls(tls: &TlsConfig) -> anyhow::Result<ServerConfig> {
    let certs = CertificateDer::pem_file_iter(&tls.cert_file)
        .and_then(|certs| certs.collect::<Result<Vec<_>, _>>())
        .with_context(|| format!("Failed to read certificate {}", tls.cert_file))?;
    if certs.is_empty() {
        return Err(anyhow!("No certificate found in {}", tls.cert_file));
    }

    let key = PrivateKeyDer::from_pem_file(&tls.key_file)
        .with_context(|| format!("Failed to read private key {}", tls.key_file))?;

    ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .context("Unsupported TLS protocol versions")?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("Invalid certificate or private key")
}

/// Serve until SIGINT/SIGTERM, over HTTPS when both TLS paths are set.
pub async fn run(config: Arc<Config>, domains: Arc<DomainService>) -> anyhow::Result<()> {
    let address = bind_address(&config.listen);
    let data = web::Data::new(AppState::new(Arc::clone(&config), domains));

    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(configure));

    let server = if config.tls.enabled() {
        let tls = load_tls(&config.tls)?;
        tracing::info!("Listening for https connections on {address}");
        server
            .bind_rustls_0_23(&address, tls)
            .with_context(|| format!("Failed to bind {address}"))?
    } else {
        tracing::info!("Listening for http connections on {address}");
        server
            .bind(&address)
            .with_context(|| format!("Failed to bind {address}"))?
    };

    server.run().await.context("Server error")?;
    tracing::info!("Shutting down...");
    Ok(())
}
