//! # Tunewave Catalog
//!
//! Multi-tenant catalog hierarchy for the Tunewave distribution
//! platform: Enterprise → Label → Artist → Release, with lifecycle
//! state machines on enterprises and labels and a two-path label
//! transfer workflow.
//!
//! ## Features
//!
//! - **Scoped visibility**: every read and mutation is bounded by a
//!   [`ScopeFilter`] resolved from the caller's [`IdentityContext`]
//! - **Status state machines**: enterprise and label lifecycle moves
//!   are validated before any write, and the label's PendingTransfer
//!   state belongs exclusively to the transfer workflow
//! - **Transfer workflow**: direct reassignment for platform operators,
//!   request-then-approve for enterprise admins, with at most one open
//!   request per label
//! - **Pluggable storage**: the [`CatalogRepository`] trait separates
//!   semantics from persistence; [`InMemoryCatalog`] ships behind the
//!   default `memory` feature
//!
//! ## Example
//!
//! ```rust,no_run
//! use tunewave_catalog::{CatalogService, IdentityContext, InMemoryCatalog, NewEnterprise};
//! use tunewave_rbac::Role;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), tunewave_catalog::CatalogError> {
//! let service = CatalogService::new(InMemoryCatalog::new());
//! let operator = IdentityContext::new(Uuid::now_v7(), Role::SuperAdmin);
//!
//! let enterprise = service
//!     .create_enterprise(
//!         &operator,
//!         NewEnterprise {
//!             name: "Starlight Media".to_string(),
//!             owner_user_id: Uuid::now_v7(),
//!             revenue_share: 70.0,
//!             qc_required: true,
//!             domain: None,
//!         },
//!     )
//!     .await?;
//! println!("created {} ({})", enterprise.name, enterprise.track_code);
//! # Ok(())
//! # }
//! ```

pub mod artist;
pub mod enterprise;
pub mod error;
pub mod identity;
pub mod label;
#[cfg(feature = "memory")]
pub mod memory;
pub mod release;
pub mod repository;
pub mod scope;
pub mod service;
pub mod transfer;

pub use artist::Artist;
pub use enterprise::{generate_track_code, Enterprise, EnterpriseStatus, EnterpriseUpdate};
pub use error::{CatalogError, CatalogResult};
pub use identity::IdentityContext;
pub use label::{Label, LabelStatus, LabelUpdate};
#[cfg(feature = "memory")]
pub use memory::InMemoryCatalog;
pub use release::{Release, ReleaseStatus};
pub use repository::{CatalogRepository, EnterpriseQuery};
pub use scope::{resolve_scope, EntityKind, ScopeFilter};
pub use service::{CatalogService, NewArtist, NewEnterprise, NewLabel, NewRelease};
pub use transfer::{TransferDecision, TransferRequest, TransferState};
