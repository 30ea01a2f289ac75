//! Catalog service
//!
//! This module provides [`CatalogService`], the single entry point for
//! every catalog operation. Each operation runs the same sequence:
//! permission check against the role matrix, scope resolution for the
//! caller, state-machine validation where a status is involved, then
//! the repository call. Authorization failures short-circuit before any
//! repository work, and rows outside the caller's scope surface as
//! `NotFound` rather than `Forbidden`.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::artist::Artist;
use crate::enterprise::{Enterprise, EnterpriseStatus, EnterpriseUpdate};
use crate::error::{CatalogError, CatalogResult};
use crate::identity::IdentityContext;
use crate::label::{Label, LabelStatus, LabelUpdate};
use crate::release::Release;
use crate::repository::{CatalogRepository, EnterpriseQuery};
use crate::scope::{resolve_scope, EntityKind, ScopeFilter};
use crate::transfer::{TransferDecision, TransferRequest};

use tunewave_rbac::{Operation, RolePermissionMatrix};

/// Parameters for creating an enterprise.
#[derive(Debug, Clone)]
pub struct NewEnterprise {
    /// Enterprise name.
    pub name: String,
    /// The single owning user.
    pub owner_user_id: Uuid,
    /// Revenue share percentage.
    pub revenue_share: f64,
    /// Whether QC applies to releases under it.
    pub qc_required: bool,
    /// Optional web domain.
    pub domain: Option<String>,
}

/// Parameters for creating a label.
#[derive(Debug, Clone)]
pub struct NewLabel {
    /// Enterprise the label is created under.
    pub enterprise_id: Uuid,
    /// Label name.
    pub name: String,
    /// Revenue share percentage.
    pub revenue_share: f64,
    /// Whether QC applies to releases under it.
    pub qc_required: bool,
    /// Optional web domain.
    pub domain: Option<String>,
    /// Optional subscription plan name.
    pub plan_type: Option<String>,
}

/// Parameters for creating an artist.
#[derive(Debug, Clone)]
pub struct NewArtist {
    /// Label the artist signs under.
    pub label_id: Uuid,
    /// Artist name.
    pub name: String,
    /// Revenue share percentage.
    pub revenue_share: f64,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional country code.
    pub country: Option<String>,
    /// Optional primary genre.
    pub genre: Option<String>,
}

/// Parameters for creating a release.
#[derive(Debug, Clone)]
pub struct NewRelease {
    /// Release title.
    pub title: String,
    /// Planned or actual release date.
    pub release_date: NaiveDate,
    /// Owning label, if released through one.
    pub label_id: Option<Uuid>,
    /// Owning artist, if released by one directly.
    pub artist_id: Option<Uuid>,
    /// Universal Product Code, if already assigned.
    pub upc: Option<String>,
}

/// The catalog's operation surface.
///
/// Generic over the repository so tests and embedders can swap storage.
///
/// # Examples
///
/// ```rust,no_run
/// use tunewave_catalog::{CatalogService, InMemoryCatalog};
///
/// let service = CatalogService::new(InMemoryCatalog::new());
/// ```
pub struct CatalogService<R> {
    repo: R,
    matrix: RolePermissionMatrix,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Creates a service over the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            matrix: RolePermissionMatrix::platform(),
        }
    }

    /// Access the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    // ---- Enterprises ----

    /// Create an enterprise. SuperAdmin only.
    pub async fn create_enterprise(
        &self,
        identity: &IdentityContext,
        params: NewEnterprise,
    ) -> CatalogResult<Enterprise> {
        self.matrix
            .require(identity.role, Operation::CreateEnterprise)?;
        if params.name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "enterprise name is required".to_string(),
            ));
        }

        let mut enterprise = Enterprise::new(
            params.name,
            params.owner_user_id,
            identity.user_id,
            params.revenue_share,
            params.qc_required,
        );
        if let Some(domain) = params.domain {
            enterprise = enterprise.with_domain(domain);
        }

        let enterprise = self.repo.insert_enterprise(enterprise).await?;
        info!(
            enterprise_id = %enterprise.id,
            track_code = %enterprise.track_code,
            "enterprise created"
        );
        Ok(enterprise)
    }

    /// List enterprises visible to the caller, optionally narrowed by
    /// status and name search.
    pub async fn list_enterprises(
        &self,
        identity: &IdentityContext,
        query: EnterpriseQuery,
    ) -> CatalogResult<Vec<Enterprise>> {
        self.matrix.require(identity.role, Operation::ReadOwnScope)?;
        let filter = resolve_scope(identity, EntityKind::Enterprise)?;
        self.repo.list_enterprises(filter, query).await
    }

    /// Fetch a single enterprise inside the caller's scope.
    pub async fn get_enterprise(
        &self,
        identity: &IdentityContext,
        id: Uuid,
    ) -> CatalogResult<Enterprise> {
        self.matrix.require(identity.role, Operation::ReadOwnScope)?;
        let filter = resolve_scope(identity, EntityKind::Enterprise)?;
        self.scoped_enterprise(&filter, id).await
    }

    /// Update enterprise details (domain, revenue share, QC flag).
    pub async fn update_enterprise(
        &self,
        identity: &IdentityContext,
        id: Uuid,
        update: EnterpriseUpdate,
    ) -> CatalogResult<Enterprise> {
        self.matrix
            .require(identity.role, Operation::UpdateEnterprise)?;
        let filter = resolve_scope(identity, EntityKind::Enterprise)?;
        self.scoped_enterprise(&filter, id).await?;
        let enterprise = self.repo.update_enterprise(id, update).await?;
        info!(enterprise_id = %id, "enterprise updated");
        Ok(enterprise)
    }

    /// Move an enterprise through its status state machine. SuperAdmin
    /// only; illegal transitions fail before any write.
    pub async fn update_enterprise_status(
        &self,
        identity: &IdentityContext,
        id: Uuid,
        next: EnterpriseStatus,
    ) -> CatalogResult<Enterprise> {
        self.matrix
            .require(identity.role, Operation::UpdateEnterpriseStatus)?;
        let current = self
            .repo
            .find_enterprise(id)
            .await?
            .ok_or(CatalogError::NotFound("enterprise"))?;
        current.status.transition_to(next)?;

        let enterprise = self.repo.set_enterprise_status(id, next).await?;
        info!(
            enterprise_id = %id,
            from = current.status.as_str(),
            to = next.as_str(),
            "enterprise status changed"
        );
        Ok(enterprise)
    }

    // ---- Labels ----

    /// Create a label under an enterprise the caller can see.
    ///
    /// The enterprise must exist inside the caller's scope (otherwise
    /// `NotFound`) and must not be Closed (otherwise `Conflict`).
    pub async fn create_label(
        &self,
        identity: &IdentityContext,
        params: NewLabel,
    ) -> CatalogResult<Label> {
        self.matrix.require(identity.role, Operation::CreateLabel)?;
        if params.name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "label name is required".to_string(),
            ));
        }

        // EnterpriseAdmins create labels under their own enterprise, so
        // visibility here follows the label scope, not the enterprise-
        // ownership scope.
        let filter = resolve_scope(identity, EntityKind::Label)?;
        let enterprise = self
            .repo
            .find_enterprise(params.enterprise_id)
            .await?
            .filter(|e| match filter {
                ScopeFilter::All => true,
                ScopeFilter::EnterpriseOwned(id) => e.id == id,
                _ => false,
            })
            .ok_or(CatalogError::NotFound("enterprise"))?;
        if !enterprise.accepts_labels() {
            return Err(CatalogError::Conflict(
                "enterprise is closed and accepts no new labels".to_string(),
            ));
        }

        let mut label = Label::new(
            params.enterprise_id,
            params.name,
            identity.user_id,
            params.revenue_share,
            params.qc_required,
        );
        if let Some(domain) = params.domain {
            label = label.with_domain(domain);
        }
        if let Some(plan) = params.plan_type {
            label = label.with_plan_type(plan);
        }

        let label = self.repo.insert_label(label).await?;
        info!(label_id = %label.id, enterprise_id = %label.enterprise_id, "label created");
        Ok(label)
    }

    /// List labels visible to the caller.
    pub async fn list_labels(&self, identity: &IdentityContext) -> CatalogResult<Vec<Label>> {
        self.matrix.require(identity.role, Operation::ReadOwnScope)?;
        let filter = resolve_scope(identity, EntityKind::Label)?;
        self.repo.list_labels(filter).await
    }

    /// Fetch a single label inside the caller's scope.
    pub async fn get_label(&self, identity: &IdentityContext, id: Uuid) -> CatalogResult<Label> {
        self.matrix.require(identity.role, Operation::ReadOwnScope)?;
        let filter = resolve_scope(identity, EntityKind::Label)?;
        self.scoped_label(&filter, id).await
    }

    /// Update label details.
    pub async fn update_label(
        &self,
        identity: &IdentityContext,
        id: Uuid,
        update: LabelUpdate,
    ) -> CatalogResult<Label> {
        self.matrix.require(identity.role, Operation::UpdateLabel)?;
        let filter = resolve_scope(identity, EntityKind::Label)?;
        self.scoped_label(&filter, id).await?;
        let label = self.repo.update_label(id, update).await?;
        info!(label_id = %id, "label updated");
        Ok(label)
    }

    /// Move a label through the generic status state machine.
    ///
    /// PendingTransfer is unreachable and unleavable here; only the
    /// transfer workflow touches it.
    pub async fn change_label_status(
        &self,
        identity: &IdentityContext,
        id: Uuid,
        next: LabelStatus,
    ) -> CatalogResult<Label> {
        self.matrix
            .require(identity.role, Operation::ChangeLabelStatus)?;
        let filter = resolve_scope(identity, EntityKind::Label)?;
        let label = self.scoped_label(&filter, id).await?;
        label.status.change_to(next)?;

        let label = self.repo.set_label_status(id, next).await?;
        info!(label_id = %id, to = next.as_str(), "label status changed");
        Ok(label)
    }

    // ---- Transfers ----

    /// Immediately reassign a label between enterprises. SuperAdmin
    /// only.
    ///
    /// Fails `Conflict` when the label is not currently owned by
    /// `source`, has an open transfer request, or when the target is
    /// Closed; `NotFound` when the target does not exist.
    pub async fn direct_transfer(
        &self,
        identity: &IdentityContext,
        label_id: Uuid,
        source: Uuid,
        target: Uuid,
    ) -> CatalogResult<Label> {
        self.matrix
            .require(identity.role, Operation::TransferLabelDirect)?;
        let target_enterprise = self
            .repo
            .find_enterprise(target)
            .await?
            .ok_or(CatalogError::NotFound("enterprise"))?;
        if !target_enterprise.accepts_labels() {
            return Err(CatalogError::Conflict(
                "target enterprise is closed".to_string(),
            ));
        }

        let label = self.repo.direct_transfer(label_id, source, target).await?;
        info!(
            label_id = %label_id,
            source = %source,
            target = %target,
            "label transferred directly"
        );
        Ok(label)
    }

    /// Open a transfer request for a label the caller administers.
    ///
    /// The label must be Active and inside the caller's scope; the
    /// target enterprise must exist and not be Closed. On success the
    /// label moves to PendingTransfer atomically with the request
    /// insert.
    pub async fn request_transfer(
        &self,
        identity: &IdentityContext,
        label_id: Uuid,
        target: Uuid,
        reason: impl Into<String>,
    ) -> CatalogResult<TransferRequest> {
        self.matrix
            .require(identity.role, Operation::RequestLabelTransfer)?;
        let filter = resolve_scope(identity, EntityKind::Label)?;
        let label = self.scoped_label(&filter, label_id).await?;
        label.transfer_eligibility()?;

        let target_enterprise = self
            .repo
            .find_enterprise(target)
            .await?
            .ok_or(CatalogError::NotFound("enterprise"))?;
        if !target_enterprise.accepts_labels() {
            return Err(CatalogError::Conflict(
                "target enterprise is closed".to_string(),
            ));
        }
        if target == label.enterprise_id {
            return Err(CatalogError::Validation(
                "target enterprise already owns this label".to_string(),
            ));
        }

        let request = TransferRequest::new(
            label_id,
            label.enterprise_id,
            target,
            reason,
            identity.user_id,
        );
        let request = self.repo.create_transfer_request(request).await?;
        info!(
            request_id = %request.id,
            label_id = %label_id,
            target = %target,
            "transfer request opened"
        );
        Ok(request)
    }

    /// Resolve a pending transfer request. SuperAdmin only.
    ///
    /// Approval reassigns the label to the target enterprise; rejection
    /// leaves ownership unchanged. Either way the label returns to
    /// Active.
    pub async fn resolve_transfer(
        &self,
        identity: &IdentityContext,
        request_id: Uuid,
        decision: TransferDecision,
    ) -> CatalogResult<TransferRequest> {
        self.matrix
            .require(identity.role, Operation::ApproveLabelTransfer)?;

        if decision == TransferDecision::Approve {
            let request = self
                .repo
                .find_transfer_request(request_id)
                .await?
                .ok_or(CatalogError::NotFound("transfer request"))?;
            let target = self
                .repo
                .find_enterprise(request.target_enterprise_id)
                .await?
                .ok_or(CatalogError::NotFound("enterprise"))?;
            if !target.accepts_labels() {
                return Err(CatalogError::Conflict(
                    "target enterprise is closed".to_string(),
                ));
            }
        }

        let request = self
            .repo
            .resolve_transfer_request(request_id, decision, identity.user_id)
            .await?;
        info!(
            request_id = %request_id,
            state = request.state.as_str(),
            "transfer request resolved"
        );
        Ok(request)
    }

    /// List transfer requests, optionally for one label. SuperAdmin
    /// only.
    pub async fn list_transfer_requests(
        &self,
        identity: &IdentityContext,
        label_id: Option<Uuid>,
    ) -> CatalogResult<Vec<TransferRequest>> {
        self.matrix.require(identity.role, Operation::ReadAny)?;
        self.repo.list_transfer_requests(label_id).await
    }

    // ---- Artists ----

    /// Sign an artist under a label the caller can see.
    pub async fn create_artist(
        &self,
        identity: &IdentityContext,
        params: NewArtist,
    ) -> CatalogResult<Artist> {
        self.matrix.require(identity.role, Operation::CreateArtist)?;
        if params.name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "artist name is required".to_string(),
            ));
        }

        let filter = resolve_scope(identity, EntityKind::Label)?;
        let label = self.scoped_label(&filter, params.label_id).await?;
        if label.status.is_terminal() {
            return Err(CatalogError::Conflict(
                "label is closed and accepts no new artists".to_string(),
            ));
        }

        let mut artist = Artist::new(
            params.label_id,
            params.name,
            identity.user_id,
            params.revenue_share,
        );
        if let Some(email) = params.email {
            artist = artist.with_email(email);
        }
        if let Some(country) = params.country {
            artist = artist.with_country(country);
        }
        if let Some(genre) = params.genre {
            artist = artist.with_genre(genre);
        }

        let artist = self.repo.insert_artist(artist).await?;
        info!(artist_id = %artist.id, label_id = %artist.label_id, "artist created");
        Ok(artist)
    }

    /// List artists visible to the caller.
    pub async fn list_artists(&self, identity: &IdentityContext) -> CatalogResult<Vec<Artist>> {
        self.matrix.require(identity.role, Operation::ReadOwnScope)?;
        let filter = resolve_scope(identity, EntityKind::Artist)?;
        self.repo.list_artists(filter).await
    }

    // ---- Releases ----

    /// Create a release under a label and/or artist the caller can see.
    pub async fn create_release(
        &self,
        identity: &IdentityContext,
        params: NewRelease,
    ) -> CatalogResult<Release> {
        self.matrix
            .require(identity.role, Operation::CreateRelease)?;

        if let Some(label_id) = params.label_id {
            let filter = resolve_scope(identity, EntityKind::Label)?;
            self.scoped_label(&filter, label_id).await?;
        }
        if let Some(artist_id) = params.artist_id {
            let filter = resolve_scope(identity, EntityKind::Artist)?;
            let artist = self
                .repo
                .find_artist(artist_id)
                .await?
                .ok_or(CatalogError::NotFound("artist"))?;
            let owning_enterprise = self
                .repo
                .find_label(artist.label_id)
                .await?
                .map(|l| l.enterprise_id);
            if !filter.permits_artist(&artist, owning_enterprise) {
                debug!(artist_id = %artist_id, "artist outside caller scope");
                return Err(CatalogError::NotFound("artist"));
            }
        }

        let mut release = Release::new(
            params.title,
            params.release_date,
            params.label_id,
            params.artist_id,
            identity.user_id,
        )?;
        if let Some(upc) = params.upc {
            release = release.with_upc(upc);
        }

        let release = self.repo.insert_release(release).await?;
        info!(release_id = %release.id, "release created");
        Ok(release)
    }

    /// List releases visible to the caller.
    pub async fn list_releases(&self, identity: &IdentityContext) -> CatalogResult<Vec<Release>> {
        self.matrix.require(identity.role, Operation::ReadOwnScope)?;
        let filter = resolve_scope(identity, EntityKind::Release)?;
        self.repo.list_releases(filter).await
    }

    // ---- Internal ----

    /// Fetch an enterprise and hide it when outside `filter`.
    async fn scoped_enterprise(
        &self,
        filter: &ScopeFilter,
        id: Uuid,
    ) -> CatalogResult<Enterprise> {
        let enterprise = self
            .repo
            .find_enterprise(id)
            .await?
            .ok_or(CatalogError::NotFound("enterprise"))?;
        if !filter.permits_enterprise(&enterprise) {
            debug!(enterprise_id = %id, "enterprise outside caller scope");
            return Err(CatalogError::NotFound("enterprise"));
        }
        Ok(enterprise)
    }

    /// Fetch a label and hide it when outside `filter`.
    async fn scoped_label(&self, filter: &ScopeFilter, id: Uuid) -> CatalogResult<Label> {
        let label = self
            .repo
            .find_label(id)
            .await?
            .ok_or(CatalogError::NotFound("label"))?;
        if !filter.permits_label(&label) {
            debug!(label_id = %id, "label outside caller scope");
            return Err(CatalogError::NotFound("label"));
        }
        Ok(label)
    }
}
