//! Role domain: discovery of available roles, the generated manifest holding
//! enabled roles, and reconciliation between the two.

pub mod discovery;
pub mod manifest;
pub mod reconcile;

pub use discovery::roles_available;
pub use manifest::{read_enabled, write_manifest};
pub use reconcile::{Plan, RoleChange};
