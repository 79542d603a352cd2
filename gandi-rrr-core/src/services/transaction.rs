//! Record update transaction
//!
//! Mutations land on a cloned working version of the zone, which only becomes
//! visible when [`RecordTransaction::commit`] activates it. There is no
//! rollback: a failed transaction leaves its working version behind, never
//! activated.

use gandi_rrr_provider::NewRecord;

use crate::error::{CoreError, CoreResult};
use crate::services::DomainService;
use crate::types::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Open,
    Committed,
    Failed,
}

/// Pending changes to one working version of a zone.
#[derive(Debug)]
pub struct RecordTransaction<'a> {
    service: &'a DomainService,
    zone_id: u64,
    version: u32,
    state: TransactionState,
}

impl<'a> RecordTransaction<'a> {
    pub(crate) fn new(service: &'a DomainService, zone_id: u64, version: u32) -> Self {
        Self {
            service,
            zone_id,
            version,
            state: TransactionState::Open,
        }
    }

    pub fn zone_id(&self) -> u64 {
        self.zone_id
    }

    /// The working version mutations are applied to.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    fn ensure_open(&self) -> CoreResult<()> {
        if self.state == TransactionState::Open {
            Ok(())
        } else {
            Err(CoreError::TransactionClosed)
        }
    }

    /// Mark the transaction failed on error.
    fn settle<T>(&mut self, result: CoreResult<T>) -> CoreResult<T> {
        if result.is_err() {
            log::debug!(
                "Transaction on zone {} version {} failed",
                self.zone_id,
                self.version
            );
            self.state = TransactionState::Failed;
        }
        result
    }

    /// Delete every record named `name` of type `record_type` from the working
    /// version. Returns how many were deleted.
    ///
    /// Stops at the first failure. Records deleted before it stay deleted.
    pub async fn delete_records(&mut self, name: &str, record_type: &str) -> CoreResult<usize> {
        self.ensure_open()?;

        let found = self
            .service
            .find_records(self.zone_id, self.version, name, record_type)
            .await;
        let ids = self.settle(found)?;

        for id in &ids {
            let deleted = self
                .service
                .api()
                .delete_record(self.zone_id, self.version, *id)
                .await
                .map_err(CoreError::from)
                .and_then(|acknowledged| {
                    if acknowledged {
                        Ok(())
                    } else {
                        Err(CoreError::NotAcknowledged(format!(
                            "Could not delete record {id} on zone {} version {} for unknown reasons",
                            self.zone_id, self.version
                        )))
                    }
                });
            self.settle(deleted)?;
        }

        Ok(ids.len())
    }

    /// Add one record to the working version.
    pub async fn add_record(
        &mut self,
        name: &str,
        record_type: &str,
        value: &str,
        ttl: u32,
    ) -> CoreResult<Record> {
        self.ensure_open()?;

        let record = NewRecord {
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            ttl,
        };
        let added = self
            .service
            .api()
            .add_record(self.zone_id, self.version, &record)
            .await
            .map(Record::from)
            .map_err(CoreError::from);
        self.settle(added)
    }

    /// Activate the working version. Closes the transaction whatever the outcome.
    pub async fn commit(&mut self) -> CoreResult<()> {
        self.ensure_open()?;

        let activated = self
            .service
            .api()
            .set_version(self.zone_id, self.version)
            .await
            .map_err(CoreError::from)
            .and_then(|acknowledged| {
                if acknowledged {
                    Ok(())
                } else {
                    Err(CoreError::NotAcknowledged(format!(
                        "Failed to set version {} active on zone {} for unknown reasons",
                        self.version, self.zone_id
                    )))
                }
            });
        self.settle(activated)?;

        self.state = TransactionState::Committed;
        log::debug!(
            "Committed zone {} version {}",
            self.zone_id,
            self.version
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gandi_rrr_provider::{ProviderError, ACTIVE_VERSION};

    use super::*;
    use crate::test_utils::{record, Call, FaultyZoneApi};

    async fn with_three_www() -> (Arc<FaultyZoneApi>, DomainService) {
        let api = Arc::new(FaultyZoneApi::with_domains(["example.com"]));
        for value in ["1", "2", "3"] {
            api.seed("example.com", record("www", "TXT", value)).await;
        }
        api.seed("example.com", record("other", "TXT", "keep")).await;
        let service = DomainService::new(api.clone());
        (api, service)
    }

    fn count_www(records: &[gandi_rrr_provider::ZoneRecord]) -> usize {
        records.iter().filter(|r| r.matches("www", "TXT")).count()
    }

    #[tokio::test]
    async fn replace_leaves_exactly_one_record() {
        let (api, service) = with_three_www().await;
        let mut txn = service.start_transaction("example.com").await.unwrap();

        assert_eq!(txn.delete_records("www", "TXT").await.unwrap(), 3);
        txn.add_record("www", "TXT", "new", 300).await.unwrap();
        txn.commit().await.unwrap();
        assert_eq!(txn.state(), TransactionState::Committed);

        let active = api.inner().records(txn.zone_id(), ACTIVE_VERSION).await.unwrap();
        assert_eq!(count_www(&active), 1);
        assert!(active.iter().any(|r| r.matches("www", "TXT") && r.value == "new"));
        assert!(active.iter().any(|r| r.name == "other"));
    }

    #[tokio::test]
    async fn pure_delete_leaves_none() {
        let (api, service) = with_three_www().await;
        let mut txn = service.start_transaction("example.com").await.unwrap();

        txn.delete_records("www", "TXT").await.unwrap();
        txn.commit().await.unwrap();

        let active = api.inner().records(txn.zone_id(), ACTIVE_VERSION).await.unwrap();
        assert_eq!(count_www(&active), 0);
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn delete_without_matches_succeeds() {
        let (_, service) = with_three_www().await;
        let mut txn = service.start_transaction("example.com").await.unwrap();
        assert_eq!(txn.delete_records("missing", "TXT").await.unwrap(), 0);
        assert_eq!(txn.delete_records("", "TXT").await.unwrap(), 0);
        assert_eq!(txn.state(), TransactionState::Open);
    }

    #[tokio::test]
    async fn second_delete_failure_stops_the_loop() {
        let (api, service) = with_three_www().await;
        api.fail_delete_at(2).await;
        let mut txn = service.start_transaction("example.com").await.unwrap();
        let (zone_id, version) = (txn.zone_id(), txn.version());

        let err = txn.delete_records("www", "TXT").await.unwrap_err();
        assert!(matches!(err, CoreError::Provider(ProviderError::NetworkError { .. })));
        assert_eq!(txn.state(), TransactionState::Failed);

        // First deleted, second failed, third untouched
        let working = api.inner().records(zone_id, version).await.unwrap();
        assert_eq!(count_www(&working), 2);
        let deletes = api
            .calls()
            .await
            .into_iter()
            .filter(|c| matches!(c, Call::DeleteRecord { .. }))
            .count();
        assert_eq!(deletes, 2);

        // Never committed
        assert_eq!(api.inner().active_version(zone_id).await, Some(1));
        assert!(matches!(txn.commit().await, Err(CoreError::TransactionClosed)));
        assert!(!api.calls().await.iter().any(|c| matches!(c, Call::SetVersion { .. })));
    }

    #[tokio::test]
    async fn unacknowledged_delete_names_record_zone_and_version() {
        let (api, service) = with_three_www().await;
        api.unack_delete_at(1).await;
        let mut txn = service.start_transaction("example.com").await.unwrap();

        let err = txn.delete_records("www", "TXT").await.unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, CoreError::NotAcknowledged(_)));
        assert!(message.starts_with("Could not delete record "), "{message}");
        assert!(
            message.ends_with(&format!(
                "on zone {} version {} for unknown reasons",
                txn.zone_id(),
                txn.version()
            )),
            "{message}"
        );
        assert_eq!(txn.state(), TransactionState::Failed);
    }

    #[tokio::test]
    async fn add_failure_fails_the_transaction() {
        let (api, service) = with_three_www().await;
        api.fail_add().await;
        let mut txn = service.start_transaction("example.com").await.unwrap();

        txn.delete_records("www", "TXT").await.unwrap();
        assert!(txn.add_record("www", "TXT", "x", 300).await.is_err());
        assert_eq!(txn.state(), TransactionState::Failed);
        assert!(matches!(
            txn.delete_records("www", "TXT").await,
            Err(CoreError::TransactionClosed)
        ));
    }

    #[tokio::test]
    async fn unacknowledged_commit() {
        let (api, service) = with_three_www().await;
        api.unack_commit().await;
        let mut txn = service.start_transaction("example.com").await.unwrap();

        let err = txn.commit().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Failed to set version {} active on zone {} for unknown reasons",
                txn.version(),
                txn.zone_id()
            )
        );
        assert_eq!(txn.state(), TransactionState::Failed);
        assert_eq!(api.inner().active_version(txn.zone_id()).await, Some(1));
    }

    #[tokio::test]
    async fn second_commit_never_reaches_provider() {
        let (api, service) = with_three_www().await;
        let mut txn = service.start_transaction("example.com").await.unwrap();

        txn.commit().await.unwrap();
        assert!(matches!(txn.commit().await, Err(CoreError::TransactionClosed)));
        assert!(matches!(
            txn.add_record("www", "TXT", "late", 300).await,
            Err(CoreError::TransactionClosed)
        ));

        let commits = api
            .calls()
            .await
            .into_iter()
            .filter(|c| matches!(c, Call::SetVersion { .. }))
            .count();
        assert_eq!(commits, 1);
        assert!(!api.calls().await.iter().any(|c| matches!(c, Call::AddRecord { .. })));
    }

    #[tokio::test]
    async fn abandoned_transaction_orphans_its_version() {
        let (api, service) = with_three_www().await;
        let zone_id = {
            let mut txn = service.start_transaction("example.com").await.unwrap();
            txn.delete_records("www", "TXT").await.unwrap();
            txn.zone_id()
        };

        assert_eq!(api.inner().active_version(zone_id).await, Some(1));
        assert_eq!(api.inner().version_numbers(zone_id).await, vec![1, 2]);
        let active = api.inner().records(zone_id, ACTIVE_VERSION).await.unwrap();
        assert_eq!(count_www(&active), 3);
    }
}
