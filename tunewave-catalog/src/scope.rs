//! Scope resolution
//!
//! This module computes, for an identity and an entity kind, the filter
//! that bounds which rows the caller may see or mutate. The filter is
//! always a strict narrowing of the role-permission matrix grant and is
//! computed freshly per request from the identity context alone, never
//! cached, so a role or ownership change can never leak stale scope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artist::Artist;
use crate::enterprise::Enterprise;
use crate::error::{CatalogError, CatalogResult};
use crate::identity::IdentityContext;
use crate::label::Label;
use crate::release::Release;

use tunewave_rbac::Role;

/// The entity kinds scope resolution distinguishes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Top-level tenant.
    Enterprise,
    /// Mid-tier entity under an enterprise.
    Label,
    /// Artist under a label.
    Artist,
    /// Release under a label and/or artist.
    Release,
}

/// A visibility/mutation predicate over catalog rows.
///
/// Produced by [`resolve_scope`] and applied by the repository when
/// listing and by the service when checking a single row. Any row a
/// narrowed filter permits is also permitted by `All`, which is the
/// monotonic-narrowing guarantee the tests enumerate.
///
/// LabelAdmin and Artist credentials identify their row directly: a
/// LabelAdmin's user id is their label's row id and an Artist's user id
/// is their artist row id, so `LabelOwned` and `ArtistSelf` carry the
/// caller's user id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScopeFilter {
    /// Every row. SuperAdmin only.
    All,

    /// Enterprises owned by this user.
    OwnedBy(Uuid),

    /// Rows transitively owned by this enterprise.
    EnterpriseOwned(Uuid),

    /// One label and the rows directly under it.
    LabelOwned(Uuid),

    /// The single artist row identified with the caller.
    ArtistSelf(Uuid),

    /// Rows created by this user.
    CreatedBy(Uuid),
}

impl ScopeFilter {
    /// Check if this is the unconstrained filter.
    pub fn is_all(&self) -> bool {
        matches!(self, ScopeFilter::All)
    }

    /// Check whether an enterprise row falls inside this scope.
    pub fn permits_enterprise(&self, enterprise: &Enterprise) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::OwnedBy(user) => enterprise.owner_user_id == *user,
            ScopeFilter::EnterpriseOwned(id) => enterprise.id == *id,
            ScopeFilter::CreatedBy(user) => enterprise.created_by == *user,
            // Label- and artist-level filters never reach enterprises.
            ScopeFilter::LabelOwned(_) | ScopeFilter::ArtistSelf(_) => false,
        }
    }

    /// Check whether a label row falls inside this scope.
    pub fn permits_label(&self, label: &Label) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::EnterpriseOwned(id) => label.enterprise_id == *id,
            ScopeFilter::LabelOwned(id) => label.id == *id,
            ScopeFilter::CreatedBy(user) => label.created_by == *user,
            ScopeFilter::OwnedBy(_) | ScopeFilter::ArtistSelf(_) => false,
        }
    }

    /// Check whether an artist row falls inside this scope.
    ///
    /// `owning_enterprise` is the enterprise of the artist's label,
    /// supplied by whoever can look it up; `None` means the chain could
    /// not be resolved and enterprise-scoped filters reject the row.
    pub fn permits_artist(&self, artist: &Artist, owning_enterprise: Option<Uuid>) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::EnterpriseOwned(id) => owning_enterprise == Some(*id),
            ScopeFilter::LabelOwned(id) => artist.label_id == *id,
            ScopeFilter::ArtistSelf(id) => artist.id == *id,
            ScopeFilter::CreatedBy(user) => artist.created_by == *user,
            ScopeFilter::OwnedBy(_) => false,
        }
    }

    /// Check whether a release row falls inside this scope.
    ///
    /// `owning_enterprise` follows the release's label chain (or its
    /// artist's label chain when no label is referenced).
    pub fn permits_release(&self, release: &Release, owning_enterprise: Option<Uuid>) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::EnterpriseOwned(id) => owning_enterprise == Some(*id),
            ScopeFilter::LabelOwned(id) => release.label_id == Some(*id),
            ScopeFilter::ArtistSelf(id) => release.artist_id == Some(*id),
            ScopeFilter::CreatedBy(user) => release.created_by == *user,
            ScopeFilter::OwnedBy(_) => false,
        }
    }
}

/// Compute the scope filter for `identity` reading or mutating rows of
/// `kind`.
///
/// Fails `Forbidden` when the role has no visibility into the kind at
/// all (the matrix grants the User role scoped reads only where
/// explicitly permitted, which no catalog entity is) or when an
/// EnterpriseAdmin credential carries no enterprise affiliation.
///
/// LabelAdmin credentials identify their label (user id == label row
/// id) and Artist credentials their artist row (user id == artist row
/// id); release visibility for both is creator-scoped.
pub fn resolve_scope(identity: &IdentityContext, kind: EntityKind) -> CatalogResult<ScopeFilter> {
    match identity.role {
        Role::SuperAdmin => Ok(ScopeFilter::All),

        Role::EnterpriseAdmin => match kind {
            EntityKind::Enterprise => Ok(ScopeFilter::OwnedBy(identity.user_id)),
            EntityKind::Label | EntityKind::Artist | EntityKind::Release => identity
                .enterprise()
                .map(ScopeFilter::EnterpriseOwned)
                .ok_or_else(|| {
                    CatalogError::Forbidden(
                        "enterprise admin credential carries no enterprise".to_string(),
                    )
                }),
        },

        Role::LabelAdmin => match kind {
            EntityKind::Enterprise => Err(CatalogError::Forbidden(
                "label admins have no enterprise visibility".to_string(),
            )),
            EntityKind::Label | EntityKind::Artist => {
                Ok(ScopeFilter::LabelOwned(identity.user_id))
            }
            EntityKind::Release => Ok(ScopeFilter::CreatedBy(identity.user_id)),
        },

        Role::Artist => match kind {
            EntityKind::Artist => Ok(ScopeFilter::ArtistSelf(identity.user_id)),
            EntityKind::Release => Ok(ScopeFilter::CreatedBy(identity.user_id)),
            EntityKind::Enterprise | EntityKind::Label => Err(CatalogError::Forbidden(
                "artists have no visibility into this entity".to_string(),
            )),
        },

        Role::User => Err(CatalogError::Forbidden(
            "users have no catalog visibility".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> IdentityContext {
        IdentityContext::new(Uuid::now_v7(), role)
    }

    #[test]
    fn test_super_admin_sees_everything() {
        let id = identity(Role::SuperAdmin);
        for kind in [
            EntityKind::Enterprise,
            EntityKind::Label,
            EntityKind::Artist,
            EntityKind::Release,
        ] {
            assert_eq!(resolve_scope(&id, kind).unwrap(), ScopeFilter::All);
        }
    }

    #[test]
    fn test_enterprise_admin_scopes() {
        let enterprise_id = Uuid::now_v7();
        let id = identity(Role::EnterpriseAdmin).with_enterprise(enterprise_id);

        assert_eq!(
            resolve_scope(&id, EntityKind::Enterprise).unwrap(),
            ScopeFilter::OwnedBy(id.user_id)
        );
        for kind in [EntityKind::Label, EntityKind::Artist, EntityKind::Release] {
            assert_eq!(
                resolve_scope(&id, kind).unwrap(),
                ScopeFilter::EnterpriseOwned(enterprise_id)
            );
        }
    }

    #[test]
    fn test_enterprise_admin_without_affiliation_is_forbidden() {
        let id = identity(Role::EnterpriseAdmin);
        let err = resolve_scope(&id, EntityKind::Label).unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[test]
    fn test_label_admin_scopes_by_own_label_id() {
        let label_admin = identity(Role::LabelAdmin);

        assert_eq!(
            resolve_scope(&label_admin, EntityKind::Label).unwrap(),
            ScopeFilter::LabelOwned(label_admin.user_id)
        );
        assert_eq!(
            resolve_scope(&label_admin, EntityKind::Artist).unwrap(),
            ScopeFilter::LabelOwned(label_admin.user_id)
        );
        assert_eq!(
            resolve_scope(&label_admin, EntityKind::Release).unwrap(),
            ScopeFilter::CreatedBy(label_admin.user_id)
        );
        assert!(resolve_scope(&label_admin, EntityKind::Enterprise).is_err());
    }

    #[test]
    fn test_artist_scopes_to_own_row() {
        let artist = identity(Role::Artist);

        assert_eq!(
            resolve_scope(&artist, EntityKind::Artist).unwrap(),
            ScopeFilter::ArtistSelf(artist.user_id)
        );
        assert_eq!(
            resolve_scope(&artist, EntityKind::Release).unwrap(),
            ScopeFilter::CreatedBy(artist.user_id)
        );
        assert!(resolve_scope(&artist, EntityKind::Label).is_err());
    }

    #[test]
    fn test_label_admin_scope_admits_rows_under_their_label() {
        // The LabelAdmin credential's user id is the label's row id.
        let enterprise_id = Uuid::now_v7();
        let label = Label::new(enterprise_id, "L", Uuid::now_v7(), 50.0, false);
        let admin = IdentityContext::new(label.id, Role::LabelAdmin);

        let label_filter = resolve_scope(&admin, EntityKind::Label).unwrap();
        assert!(label_filter.permits_label(&label));

        let artist = Artist::new(label.id, "A", admin.user_id, 80.0);
        let artist_filter = resolve_scope(&admin, EntityKind::Artist).unwrap();
        assert!(artist_filter.permits_artist(&artist, Some(enterprise_id)));

        let foreign = Artist::new(Uuid::now_v7(), "F", Uuid::now_v7(), 80.0);
        assert!(!artist_filter.permits_artist(&foreign, Some(enterprise_id)));
    }

    #[test]
    fn test_artist_scope_admits_only_their_own_row() {
        // The Artist credential's user id is the artist's row id.
        let label_id = Uuid::now_v7();
        let row = Artist::new(label_id, "Nova", Uuid::now_v7(), 80.0);
        let caller = IdentityContext::new(row.id, Role::Artist);

        let filter = resolve_scope(&caller, EntityKind::Artist).unwrap();
        assert!(filter.permits_artist(&row, None));

        let other = Artist::new(label_id, "Other", Uuid::now_v7(), 80.0);
        assert!(!filter.permits_artist(&other, None));
    }

    #[test]
    fn test_user_has_no_catalog_visibility() {
        let id = identity(Role::User);
        for kind in [
            EntityKind::Enterprise,
            EntityKind::Label,
            EntityKind::Artist,
            EntityKind::Release,
        ] {
            assert!(resolve_scope(&id, kind).is_err());
        }
    }

    #[test]
    fn test_narrowing_is_monotonic() {
        // Any row a narrowed filter permits, All permits too.
        let owner = Uuid::now_v7();
        let ent = Enterprise::new("E", owner, Uuid::now_v7(), 50.0, false);
        let label = Label::new(ent.id, "L", Uuid::now_v7(), 50.0, false);
        let artist = Artist::new(label.id, "A", Uuid::now_v7(), 80.0);

        let filters = [
            ScopeFilter::OwnedBy(owner),
            ScopeFilter::EnterpriseOwned(ent.id),
            ScopeFilter::LabelOwned(label.id),
            ScopeFilter::ArtistSelf(artist.id),
            ScopeFilter::CreatedBy(label.created_by),
        ];
        for filter in filters {
            if filter.permits_enterprise(&ent) {
                assert!(ScopeFilter::All.permits_enterprise(&ent));
            }
            if filter.permits_label(&label) {
                assert!(ScopeFilter::All.permits_label(&label));
            }
            if filter.permits_artist(&artist, Some(ent.id)) {
                assert!(ScopeFilter::All.permits_artist(&artist, Some(ent.id)));
            }
        }
    }

    #[test]
    fn test_enterprise_owned_follows_the_chain() {
        let ent_id = Uuid::now_v7();
        let other = Uuid::now_v7();
        let filter = ScopeFilter::EnterpriseOwned(ent_id);

        let label = Label::new(ent_id, "L", Uuid::now_v7(), 50.0, false);
        assert!(filter.permits_label(&label));

        let foreign = Label::new(other, "F", Uuid::now_v7(), 50.0, false);
        assert!(!filter.permits_label(&foreign));

        let artist = Artist::new(label.id, "A", Uuid::now_v7(), 80.0);
        assert!(filter.permits_artist(&artist, Some(ent_id)));
        assert!(!filter.permits_artist(&artist, Some(other)));
        // Unresolvable chain: reject rather than leak.
        assert!(!filter.permits_artist(&artist, None));
    }
}
