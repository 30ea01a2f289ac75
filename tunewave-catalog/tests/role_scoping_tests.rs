//! End-to-end tests for label-admin and artist operations inside their
//! own rows: a label admin's credential id is their label's id, and an
//! artist's credential id is their artist row id.

use chrono::NaiveDate;
use uuid::Uuid;

use tunewave_catalog::{
    CatalogService, IdentityContext, InMemoryCatalog, NewArtist, NewEnterprise, NewLabel,
    NewRelease,
};
use tunewave_rbac::Role;

fn service() -> CatalogService<InMemoryCatalog> {
    CatalogService::new(InMemoryCatalog::new())
}

fn super_admin() -> IdentityContext {
    IdentityContext::new(Uuid::now_v7(), Role::SuperAdmin)
}

fn new_enterprise(name: &str) -> NewEnterprise {
    NewEnterprise {
        name: name.to_string(),
        owner_user_id: Uuid::now_v7(),
        revenue_share: 70.0,
        qc_required: false,
        domain: None,
    }
}

fn new_label(enterprise_id: Uuid, name: &str) -> NewLabel {
    NewLabel {
        enterprise_id,
        name: name.to_string(),
        revenue_share: 60.0,
        qc_required: false,
        domain: None,
        plan_type: None,
    }
}

fn new_artist(label_id: Uuid, name: &str) -> NewArtist {
    NewArtist {
        label_id,
        name: name.to_string(),
        revenue_share: 50.0,
        email: None,
        country: None,
        genre: None,
    }
}

fn release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 13).unwrap()
}

#[tokio::test]
async fn label_admin_signs_artists_under_their_own_label() {
    let svc = service();
    let operator = super_admin();

    let enterprise = svc
        .create_enterprise(&operator, new_enterprise("Harborline Group"))
        .await
        .unwrap();
    let label = svc
        .create_label(&operator, new_label(enterprise.id, "Harborline Records"))
        .await
        .unwrap();

    // The label admin authenticates with the label's own id.
    let admin = IdentityContext::new(label.id, Role::LabelAdmin);
    let artist = svc
        .create_artist(&admin, new_artist(label.id, "Mara Voss"))
        .await
        .unwrap();
    assert_eq!(artist.label_id, label.id);
    assert_eq!(artist.created_by, label.id);

    // And can put out a release through that label.
    let release = svc
        .create_release(
            &admin,
            NewRelease {
                title: "Harbor Lights".to_string(),
                release_date: release_date(),
                label_id: Some(label.id),
                artist_id: Some(artist.id),
                upc: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(release.label_id, Some(label.id));
}

#[tokio::test]
async fn label_admin_cannot_sign_into_another_label() {
    let svc = service();
    let operator = super_admin();

    let enterprise = svc
        .create_enterprise(&operator, new_enterprise("Harborline Group"))
        .await
        .unwrap();
    let mine = svc
        .create_label(&operator, new_label(enterprise.id, "Harborline Records"))
        .await
        .unwrap();
    let theirs = svc
        .create_label(&operator, new_label(enterprise.id, "Coastal Sounds"))
        .await
        .unwrap();

    // Another label reads as missing, not as forbidden.
    let admin = IdentityContext::new(mine.id, Role::LabelAdmin);
    let err = svc
        .create_artist(&admin, new_artist(theirs.id, "Mara Voss"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn label_admin_lists_only_their_own_roster() {
    let svc = service();
    let operator = super_admin();

    let enterprise = svc
        .create_enterprise(&operator, new_enterprise("Harborline Group"))
        .await
        .unwrap();
    let mine = svc
        .create_label(&operator, new_label(enterprise.id, "Harborline Records"))
        .await
        .unwrap();
    let theirs = svc
        .create_label(&operator, new_label(enterprise.id, "Coastal Sounds"))
        .await
        .unwrap();

    let admin = IdentityContext::new(mine.id, Role::LabelAdmin);
    let signed = svc
        .create_artist(&admin, new_artist(mine.id, "Mara Voss"))
        .await
        .unwrap();
    svc.create_artist(&operator, new_artist(theirs.id, "Jun Park"))
        .await
        .unwrap();

    let roster = svc.list_artists(&admin).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, signed.id);

    let labels = svc.list_labels(&admin).await.unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].id, mine.id);
}

#[tokio::test]
async fn artist_releases_under_their_own_row() {
    let svc = service();
    let operator = super_admin();

    let enterprise = svc
        .create_enterprise(&operator, new_enterprise("Harborline Group"))
        .await
        .unwrap();
    let label = svc
        .create_label(&operator, new_label(enterprise.id, "Harborline Records"))
        .await
        .unwrap();
    let row = svc
        .create_artist(&operator, new_artist(label.id, "Mara Voss"))
        .await
        .unwrap();

    // The artist authenticates with their artist row id.
    let artist = IdentityContext::new(row.id, Role::Artist);
    let release = svc
        .create_release(
            &artist,
            NewRelease {
                title: "Night Ferry".to_string(),
                release_date: release_date(),
                label_id: None,
                artist_id: Some(row.id),
                upc: Some("602577000000".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(release.artist_id, Some(row.id));
    assert_eq!(release.created_by, row.id);

    // Their listing shows what they put out.
    let releases = svc.list_releases(&artist).await.unwrap();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].id, release.id);
}

#[tokio::test]
async fn artist_cannot_release_for_another_artist() {
    let svc = service();
    let operator = super_admin();

    let enterprise = svc
        .create_enterprise(&operator, new_enterprise("Harborline Group"))
        .await
        .unwrap();
    let label = svc
        .create_label(&operator, new_label(enterprise.id, "Harborline Records"))
        .await
        .unwrap();
    let mine = svc
        .create_artist(&operator, new_artist(label.id, "Mara Voss"))
        .await
        .unwrap();
    let theirs = svc
        .create_artist(&operator, new_artist(label.id, "Jun Park"))
        .await
        .unwrap();

    let artist = IdentityContext::new(mine.id, Role::Artist);
    let err = svc
        .create_release(
            &artist,
            NewRelease {
                title: "Not Mine".to_string(),
                release_date: release_date(),
                label_id: None,
                artist_id: Some(theirs.id),
                upc: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}
