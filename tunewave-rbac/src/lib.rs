//! # Tunewave RBAC (Role-Based Access Control)
//!
//! This crate provides the role-permission matrix for the Tunewave
//! platform, consumed by the catalog and gateway crates.
//!
//! ## Overview
//!
//! The tunewave-rbac crate handles:
//! - **Roles**: The five caller roles of the catalog hierarchy
//! - **Operations**: Coarse-grained operations on catalog entities
//! - **Matrix**: A single data-driven (role, operation) grant table
//!
//! ## Architecture
//!
//! ```text
//! allowed(Role, Operation) -> bool
//!
//! Examples:
//!   allowed(SuperAdmin, CreateEnterprise)        -> true
//!   allowed(EnterpriseAdmin, RequestLabelTransfer) -> true
//!   allowed(LabelAdmin, UpdateEnterpriseStatus)  -> false
//! ```
//!
//! ## Roles
//!
//! - **SuperAdmin**: every operation, unrestricted scope
//! - **EnterpriseAdmin**: label management within their own enterprise,
//!   including transfer requests
//! - **LabelAdmin**: artist and release creation within their scope
//! - **Artist**: release creation for themselves
//! - **User**: scoped reads only (e.g. own profile)
//!
//! ## Usage
//!
//! ```rust
//! use tunewave_rbac::{Operation, Role, RolePermissionMatrix};
//!
//! let matrix = RolePermissionMatrix::platform();
//!
//! assert!(matrix.allowed(Role::SuperAdmin, Operation::TransferLabelDirect));
//! assert!(!matrix.allowed(Role::Artist, Operation::CreateLabel));
//!
//! // Fail-fast guard for handlers
//! matrix.require(Role::EnterpriseAdmin, Operation::CreateLabel).unwrap();
//! ```
//!
//! ## Design
//!
//! The grant table is plain data so policy changes are auditable in one
//! place rather than scattered across per-handler conditionals. The
//! matrix answers only "may this role ever perform this operation";
//! row-level visibility is the catalog crate's scope resolver.

pub mod matrix;
pub mod operations;
pub mod roles;

// Re-export main types for convenience
pub use matrix::{PermissionDenied, RolePermissionMatrix};
pub use operations::Operation;
pub use roles::Role;
