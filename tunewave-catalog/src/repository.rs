//! Abstract hierarchy repository
//!
//! This module defines the persistence collaborator the catalog service
//! talks to. Implementations own query execution and transactional
//! guarantees; the service owns permission, scope and state-machine
//! checks, which all complete before any mutating call here begins.
//!
//! Transfer operations are specified as atomic: an implementation must
//! commit the request row and the label status/ownership change
//! together or not at all, and must enforce the one-open-request-per-
//! label invariant inside the same transaction (for SQL backends, a
//! partial unique index on `(label_id) where state = 'pending'` or an
//! equivalent serialized check-and-insert).

use async_trait::async_trait;
use uuid::Uuid;

use crate::artist::Artist;
use crate::enterprise::{Enterprise, EnterpriseStatus, EnterpriseUpdate};
use crate::error::CatalogResult;
use crate::label::{Label, LabelStatus, LabelUpdate};
use crate::release::Release;
use crate::scope::ScopeFilter;
use crate::transfer::{TransferDecision, TransferRequest};

/// Optional filters for the SuperAdmin enterprise listing.
#[derive(Debug, Clone, Default)]
pub struct EnterpriseQuery {
    /// Only enterprises in this status.
    pub status: Option<EnterpriseStatus>,

    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
}

impl EnterpriseQuery {
    /// Check whether an enterprise matches this query.
    pub fn matches(&self, enterprise: &Enterprise) -> bool {
        if let Some(status) = self.status {
            if enterprise.status != status {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            if !enterprise
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Persistence operations for the catalog hierarchy.
///
/// Every listing takes the caller's [`ScopeFilter`] and returns only
/// rows it permits. Lookups by id return `Ok(None)` for missing rows;
/// the service maps both "missing" and "out of scope" to the same
/// `NotFound` so callers cannot enumerate rows they may not see.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ---- Enterprises ----

    /// Persist a new enterprise.
    async fn insert_enterprise(&self, enterprise: Enterprise) -> CatalogResult<Enterprise>;

    /// Look up an enterprise by id.
    async fn find_enterprise(&self, id: Uuid) -> CatalogResult<Option<Enterprise>>;

    /// List enterprises inside `filter`, further narrowed by `query`.
    async fn list_enterprises(
        &self,
        filter: ScopeFilter,
        query: EnterpriseQuery,
    ) -> CatalogResult<Vec<Enterprise>>;

    /// Apply a detail update to an enterprise.
    async fn update_enterprise(
        &self,
        id: Uuid,
        update: EnterpriseUpdate,
    ) -> CatalogResult<Enterprise>;

    /// Apply an enterprise status transition.
    ///
    /// The transition must be re-validated against the current status
    /// under the implementation's transactional guard; the service's
    /// fail-fast check runs on an earlier read and may be stale.
    async fn set_enterprise_status(
        &self,
        id: Uuid,
        status: EnterpriseStatus,
    ) -> CatalogResult<Enterprise>;

    // ---- Labels ----

    /// Persist a new label.
    async fn insert_label(&self, label: Label) -> CatalogResult<Label>;

    /// Look up a label by id.
    async fn find_label(&self, id: Uuid) -> CatalogResult<Option<Label>>;

    /// List labels inside `filter`.
    async fn list_labels(&self, filter: ScopeFilter) -> CatalogResult<Vec<Label>>;

    /// Apply a detail update to a label.
    async fn update_label(&self, id: Uuid, update: LabelUpdate) -> CatalogResult<Label>;

    /// Apply a generic label status transition.
    ///
    /// Re-validated against the current status under the transactional
    /// guard, so a transfer request committed after the service's
    /// fail-fast check cannot be overwritten out of PendingTransfer.
    async fn set_label_status(&self, id: Uuid, status: LabelStatus) -> CatalogResult<Label>;

    /// Atomically reassign a label from `source` to `target`.
    ///
    /// Fails `Conflict` when the label's current enterprise is not
    /// `source` or when the label is in PendingTransfer (the two
    /// transfer paths are mutually exclusive). Status is unchanged.
    async fn direct_transfer(
        &self,
        label_id: Uuid,
        source: Uuid,
        target: Uuid,
    ) -> CatalogResult<Label>;

    // ---- Transfer requests ----

    /// Atomically open a transfer request: insert the Pending row and
    /// move the label Active → PendingTransfer in one transaction.
    ///
    /// Fails `Conflict` when an open request already exists for the
    /// label or the label is not Active; the check and both writes
    /// happen under the same transactional guard so concurrent
    /// requesters cannot both succeed.
    async fn create_transfer_request(
        &self,
        request: TransferRequest,
    ) -> CatalogResult<TransferRequest>;

    /// Look up a transfer request by id.
    async fn find_transfer_request(&self, id: Uuid) -> CatalogResult<Option<TransferRequest>>;

    /// List transfer requests, optionally restricted to one label.
    async fn list_transfer_requests(
        &self,
        label_id: Option<Uuid>,
    ) -> CatalogResult<Vec<TransferRequest>>;

    /// Atomically resolve a Pending request: on approval reassign the
    /// label to the target enterprise, on rejection leave ownership
    /// unchanged; either way return the label to Active and mark the
    /// request resolved, all in one transaction.
    ///
    /// Fails `Conflict` when the request is not Pending.
    async fn resolve_transfer_request(
        &self,
        request_id: Uuid,
        decision: TransferDecision,
        resolved_by: Uuid,
    ) -> CatalogResult<TransferRequest>;

    // ---- Artists ----

    /// Persist a new artist.
    async fn insert_artist(&self, artist: Artist) -> CatalogResult<Artist>;

    /// Look up an artist by id.
    async fn find_artist(&self, id: Uuid) -> CatalogResult<Option<Artist>>;

    /// List artists inside `filter`, resolving the label → enterprise
    /// chain for enterprise-scoped filters.
    async fn list_artists(&self, filter: ScopeFilter) -> CatalogResult<Vec<Artist>>;

    // ---- Releases ----

    /// Persist a new release.
    async fn insert_release(&self, release: Release) -> CatalogResult<Release>;

    /// List releases inside `filter`, resolving the ownership chain for
    /// enterprise-scoped filters.
    async fn list_releases(&self, filter: ScopeFilter) -> CatalogResult<Vec<Release>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_query_matching() {
        let ent = Enterprise::new("Starlight Media", Uuid::now_v7(), Uuid::now_v7(), 70.0, true);

        assert!(EnterpriseQuery::default().matches(&ent));
        assert!(EnterpriseQuery {
            status: Some(EnterpriseStatus::Active),
            search: Some("starlight".to_string()),
        }
        .matches(&ent));
        assert!(!EnterpriseQuery {
            status: Some(EnterpriseStatus::Suspended),
            search: None,
        }
        .matches(&ent));
        assert!(!EnterpriseQuery {
            status: None,
            search: Some("moonbase".to_string()),
        }
        .matches(&ent));
    }
}
