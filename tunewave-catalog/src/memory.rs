//! In-memory catalog repository
//!
//! A [`CatalogRepository`] backed by process memory, used by the test
//! suites and by embedders that do not need durable storage. All state
//! sits behind a single `tokio::sync::RwLock`; every mutating call
//! takes one write guard for its whole body, which makes the multi-row
//! transfer operations atomic and serializes the check-and-insert that
//! guards the one-open-request-per-label invariant.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::artist::Artist;
use crate::enterprise::{Enterprise, EnterpriseStatus, EnterpriseUpdate};
use crate::error::{CatalogError, CatalogResult};
use crate::label::{Label, LabelStatus, LabelUpdate};
use crate::release::Release;
use crate::repository::{CatalogRepository, EnterpriseQuery};
use crate::scope::ScopeFilter;
use crate::transfer::{TransferDecision, TransferRequest, TransferState};

#[derive(Debug, Default)]
struct CatalogState {
    enterprises: HashMap<Uuid, Enterprise>,
    labels: HashMap<Uuid, Label>,
    artists: HashMap<Uuid, Artist>,
    releases: HashMap<Uuid, Release>,
    transfer_requests: HashMap<Uuid, TransferRequest>,
}

impl CatalogState {
    /// Enterprise that transitively owns an artist, via its label.
    fn enterprise_of_artist(&self, artist: &Artist) -> Option<Uuid> {
        self.labels.get(&artist.label_id).map(|l| l.enterprise_id)
    }

    /// Enterprise that transitively owns a release, via its label or
    /// its artist's label.
    fn enterprise_of_release(&self, release: &Release) -> Option<Uuid> {
        if let Some(label_id) = release.label_id {
            return self.labels.get(&label_id).map(|l| l.enterprise_id);
        }
        release
            .artist_id
            .and_then(|id| self.artists.get(&id))
            .and_then(|artist| self.enterprise_of_artist(artist))
    }
}

/// In-memory repository implementation.
///
/// # Examples
///
/// ```rust,no_run
/// use tunewave_catalog::InMemoryCatalog;
///
/// let repo = InMemoryCatalog::new();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn insert_enterprise(&self, enterprise: Enterprise) -> CatalogResult<Enterprise> {
        let mut state = self.state.write().await;
        state.enterprises.insert(enterprise.id, enterprise.clone());
        Ok(enterprise)
    }

    async fn find_enterprise(&self, id: Uuid) -> CatalogResult<Option<Enterprise>> {
        let state = self.state.read().await;
        Ok(state.enterprises.get(&id).cloned())
    }

    async fn list_enterprises(
        &self,
        filter: ScopeFilter,
        query: EnterpriseQuery,
    ) -> CatalogResult<Vec<Enterprise>> {
        let state = self.state.read().await;
        let mut rows: Vec<Enterprise> = state
            .enterprises
            .values()
            .filter(|e| filter.permits_enterprise(e) && query.matches(e))
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.created_at);
        Ok(rows)
    }

    async fn update_enterprise(
        &self,
        id: Uuid,
        update: EnterpriseUpdate,
    ) -> CatalogResult<Enterprise> {
        let mut state = self.state.write().await;
        let enterprise = state
            .enterprises
            .get_mut(&id)
            .ok_or(CatalogError::NotFound("enterprise"))?;
        if let Some(domain) = update.domain {
            enterprise.domain = Some(domain);
        }
        if let Some(share) = update.revenue_share {
            enterprise.revenue_share = share;
        }
        if let Some(qc) = update.qc_required {
            enterprise.qc_required = qc;
        }
        enterprise.updated_at = Some(chrono::Utc::now());
        Ok(enterprise.clone())
    }

    async fn set_enterprise_status(
        &self,
        id: Uuid,
        status: EnterpriseStatus,
    ) -> CatalogResult<Enterprise> {
        let mut state = self.state.write().await;
        let enterprise = state
            .enterprises
            .get_mut(&id)
            .ok_or(CatalogError::NotFound("enterprise"))?;
        // Re-validated under the write guard: the service's pre-check
        // ran on an earlier read and the status may have moved since.
        enterprise.status = enterprise.status.transition_to(status)?;
        enterprise.updated_at = Some(chrono::Utc::now());
        Ok(enterprise.clone())
    }

    async fn insert_label(&self, label: Label) -> CatalogResult<Label> {
        let mut state = self.state.write().await;
        state.labels.insert(label.id, label.clone());
        Ok(label)
    }

    async fn find_label(&self, id: Uuid) -> CatalogResult<Option<Label>> {
        let state = self.state.read().await;
        Ok(state.labels.get(&id).cloned())
    }

    async fn list_labels(&self, filter: ScopeFilter) -> CatalogResult<Vec<Label>> {
        let state = self.state.read().await;
        let mut rows: Vec<Label> = state
            .labels
            .values()
            .filter(|l| filter.permits_label(l))
            .cloned()
            .collect();
        rows.sort_by_key(|l| l.created_at);
        Ok(rows)
    }

    async fn update_label(&self, id: Uuid, update: LabelUpdate) -> CatalogResult<Label> {
        let mut state = self.state.write().await;
        let label = state
            .labels
            .get_mut(&id)
            .ok_or(CatalogError::NotFound("label"))?;
        if let Some(name) = update.name {
            label.name = name;
        }
        if let Some(domain) = update.domain {
            label.domain = Some(domain);
        }
        if let Some(plan) = update.plan_type {
            label.plan_type = Some(plan);
        }
        if let Some(share) = update.revenue_share {
            label.revenue_share = share;
        }
        if let Some(qc) = update.qc_required {
            label.qc_required = qc;
        }
        Ok(label.clone())
    }

    async fn set_label_status(&self, id: Uuid, status: LabelStatus) -> CatalogResult<Label> {
        let mut state = self.state.write().await;
        let label = state
            .labels
            .get_mut(&id)
            .ok_or(CatalogError::NotFound("label"))?;
        // Same compare-and-set as the transfer path: a request opened
        // between the service's read and this write parks the label in
        // PendingTransfer, which only the workflow may leave.
        label.status = label.status.change_to(status)?;
        Ok(label.clone())
    }

    async fn direct_transfer(
        &self,
        label_id: Uuid,
        source: Uuid,
        target: Uuid,
    ) -> CatalogResult<Label> {
        let mut state = self.state.write().await;
        let label = state
            .labels
            .get_mut(&label_id)
            .ok_or(CatalogError::NotFound("label"))?;
        if label.status == LabelStatus::PendingTransfer {
            return Err(CatalogError::Conflict(
                "label has an open transfer request".to_string(),
            ));
        }
        if label.enterprise_id != source {
            return Err(CatalogError::Conflict(
                "label does not belong to the source enterprise".to_string(),
            ));
        }
        label.enterprise_id = target;
        Ok(label.clone())
    }

    async fn create_transfer_request(
        &self,
        request: TransferRequest,
    ) -> CatalogResult<TransferRequest> {
        // One write guard across the uniqueness check, the insert and
        // the status change: concurrent requesters serialize here.
        let mut state = self.state.write().await;

        let open_exists = state
            .transfer_requests
            .values()
            .any(|r| r.label_id == request.label_id && r.state.is_open());
        if open_exists {
            return Err(CatalogError::Conflict(
                "label already has a pending transfer request".to_string(),
            ));
        }

        let label = state
            .labels
            .get_mut(&request.label_id)
            .ok_or(CatalogError::NotFound("label"))?;
        if label.status != LabelStatus::Active {
            return Err(CatalogError::Conflict(format!(
                "label is {}, not active",
                label.status.as_str()
            )));
        }
        label.status = LabelStatus::PendingTransfer;

        state.transfer_requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_transfer_request(&self, id: Uuid) -> CatalogResult<Option<TransferRequest>> {
        let state = self.state.read().await;
        Ok(state.transfer_requests.get(&id).cloned())
    }

    async fn list_transfer_requests(
        &self,
        label_id: Option<Uuid>,
    ) -> CatalogResult<Vec<TransferRequest>> {
        let state = self.state.read().await;
        let mut rows: Vec<TransferRequest> = state
            .transfer_requests
            .values()
            .filter(|r| label_id.map_or(true, |id| r.label_id == id))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.requested_at);
        Ok(rows)
    }

    async fn resolve_transfer_request(
        &self,
        request_id: Uuid,
        decision: TransferDecision,
        resolved_by: Uuid,
    ) -> CatalogResult<TransferRequest> {
        let mut state = self.state.write().await;

        let request = state
            .transfer_requests
            .get(&request_id)
            .cloned()
            .ok_or(CatalogError::NotFound("transfer request"))?;
        if request.state != TransferState::Pending {
            return Err(CatalogError::Conflict(format!(
                "transfer request is already {}",
                request.state.as_str()
            )));
        }

        let label = state
            .labels
            .get_mut(&request.label_id)
            .ok_or(CatalogError::NotFound("label"))?;
        if decision == TransferDecision::Approve {
            label.enterprise_id = request.target_enterprise_id;
        }
        label.status = LabelStatus::Active;

        let stored = state
            .transfer_requests
            .get_mut(&request_id)
            .ok_or(CatalogError::NotFound("transfer request"))?;
        stored.resolve(decision, resolved_by);
        Ok(stored.clone())
    }

    async fn insert_artist(&self, artist: Artist) -> CatalogResult<Artist> {
        let mut state = self.state.write().await;
        state.artists.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn find_artist(&self, id: Uuid) -> CatalogResult<Option<Artist>> {
        let state = self.state.read().await;
        Ok(state.artists.get(&id).cloned())
    }

    async fn list_artists(&self, filter: ScopeFilter) -> CatalogResult<Vec<Artist>> {
        let state = self.state.read().await;
        let mut rows: Vec<Artist> = state
            .artists
            .values()
            .filter(|a| filter.permits_artist(a, state.enterprise_of_artist(a)))
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.created_at);
        Ok(rows)
    }

    async fn insert_release(&self, release: Release) -> CatalogResult<Release> {
        let mut state = self.state.write().await;
        state.releases.insert(release.id, release.clone());
        Ok(release)
    }

    async fn list_releases(&self, filter: ScopeFilter) -> CatalogResult<Vec<Release>> {
        let state = self.state.read().await;
        let mut rows: Vec<Release> = state
            .releases
            .values()
            .filter(|r| filter.permits_release(r, state.enterprise_of_release(r)))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.created_at);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enterprise() -> Enterprise {
        Enterprise::new("E", Uuid::now_v7(), Uuid::now_v7(), 70.0, false)
    }

    #[tokio::test]
    async fn test_insert_and_find_enterprise() {
        let repo = InMemoryCatalog::new();
        let ent = repo.insert_enterprise(enterprise()).await.unwrap();

        let found = repo.find_enterprise(ent.id).await.unwrap().unwrap();
        assert_eq!(found.id, ent.id);
        assert!(repo
            .find_enterprise(Uuid::now_v7())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_labels_is_scope_filtered() {
        let repo = InMemoryCatalog::new();
        let e1 = repo.insert_enterprise(enterprise()).await.unwrap();
        let e2 = repo.insert_enterprise(enterprise()).await.unwrap();
        repo.insert_label(Label::new(e1.id, "L1", Uuid::now_v7(), 50.0, false))
            .await
            .unwrap();
        repo.insert_label(Label::new(e2.id, "L2", Uuid::now_v7(), 50.0, false))
            .await
            .unwrap();

        let scoped = repo
            .list_labels(ScopeFilter::EnterpriseOwned(e1.id))
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].enterprise_id, e1.id);

        let all = repo.list_labels(ScopeFilter::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_artist_listing_follows_enterprise_chain() {
        let repo = InMemoryCatalog::new();
        let ent = repo.insert_enterprise(enterprise()).await.unwrap();
        let label = repo
            .insert_label(Label::new(ent.id, "L", Uuid::now_v7(), 50.0, false))
            .await
            .unwrap();
        repo.insert_artist(Artist::new(label.id, "A", Uuid::now_v7(), 80.0))
            .await
            .unwrap();

        let scoped = repo
            .list_artists(ScopeFilter::EnterpriseOwned(ent.id))
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);

        let foreign = repo
            .list_artists(ScopeFilter::EnterpriseOwned(Uuid::now_v7()))
            .await
            .unwrap();
        assert!(foreign.is_empty());
    }

    #[tokio::test]
    async fn test_second_open_request_conflicts() {
        let repo = InMemoryCatalog::new();
        let source = repo.insert_enterprise(enterprise()).await.unwrap();
        let target = repo.insert_enterprise(enterprise()).await.unwrap();
        let label = repo
            .insert_label(Label::new(source.id, "L", Uuid::now_v7(), 50.0, false))
            .await
            .unwrap();

        let first = TransferRequest::new(label.id, source.id, target.id, "r", Uuid::now_v7());
        repo.create_transfer_request(first).await.unwrap();

        let second = TransferRequest::new(label.id, source.id, target.id, "r", Uuid::now_v7());
        let err = repo.create_transfer_request(second).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[tokio::test]
    async fn test_status_writes_revalidate_under_the_guard() {
        let repo = InMemoryCatalog::new();
        let source = repo.insert_enterprise(enterprise()).await.unwrap();
        let target = repo.insert_enterprise(enterprise()).await.unwrap();
        let label = repo
            .insert_label(Label::new(source.id, "L", Uuid::now_v7(), 50.0, false))
            .await
            .unwrap();

        // A request parks the label in PendingTransfer; a direct
        // status write arriving afterwards (its caller validated
        // against the earlier Active read) must not unpark it.
        repo.create_transfer_request(TransferRequest::new(
            label.id,
            source.id,
            target.id,
            "r",
            Uuid::now_v7(),
        ))
        .await
        .unwrap();

        let err = repo
            .set_label_status(label.id, LabelStatus::Suspended)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE_TRANSITION");
        let label = repo.find_label(label.id).await.unwrap().unwrap();
        assert_eq!(label.status, LabelStatus::PendingTransfer);

        // Same for enterprises: Closed stays terminal at this layer.
        repo.set_enterprise_status(source.id, EnterpriseStatus::Closed)
            .await
            .unwrap();
        let err = repo
            .set_enterprise_status(source.id, EnterpriseStatus::Active)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE_TRANSITION");
    }

    #[tokio::test]
    async fn test_direct_transfer_validates_source() {
        let repo = InMemoryCatalog::new();
        let source = repo.insert_enterprise(enterprise()).await.unwrap();
        let target = repo.insert_enterprise(enterprise()).await.unwrap();
        let label = repo
            .insert_label(Label::new(source.id, "L", Uuid::now_v7(), 50.0, false))
            .await
            .unwrap();

        let err = repo
            .direct_transfer(label.id, target.id, source.id)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFLICT");

        let moved = repo
            .direct_transfer(label.id, source.id, target.id)
            .await
            .unwrap();
        assert_eq!(moved.enterprise_id, target.id);
        assert_eq!(moved.status, LabelStatus::Active);
    }

    #[tokio::test]
    async fn test_resolve_is_atomic_on_label_and_request() {
        let repo = InMemoryCatalog::new();
        let source = repo.insert_enterprise(enterprise()).await.unwrap();
        let target = repo.insert_enterprise(enterprise()).await.unwrap();
        let label = repo
            .insert_label(Label::new(source.id, "L", Uuid::now_v7(), 50.0, false))
            .await
            .unwrap();
        let request = repo
            .create_transfer_request(TransferRequest::new(
                label.id,
                source.id,
                target.id,
                "r",
                Uuid::now_v7(),
            ))
            .await
            .unwrap();

        let admin = Uuid::now_v7();
        let resolved = repo
            .resolve_transfer_request(request.id, TransferDecision::Approve, admin)
            .await
            .unwrap();
        assert_eq!(resolved.state, TransferState::Approved);
        assert_eq!(resolved.resolved_by, Some(admin));

        let label = repo.find_label(label.id).await.unwrap().unwrap();
        assert_eq!(label.enterprise_id, target.id);
        assert_eq!(label.status, LabelStatus::Active);

        // Resolving twice conflicts.
        let err = repo
            .resolve_transfer_request(request.id, TransferDecision::Reject, admin)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFLICT");
    }
}
