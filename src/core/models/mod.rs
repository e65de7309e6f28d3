//! Domain records
//!
//! Persisted records for the plaza domain. All records carry sequential ids,
//! an active flag (soft delete) and creation/update timestamps.

pub mod bulletin;
pub mod plaza;
pub mod product;
pub mod rbac;
pub mod store;
pub mod user;

pub use bulletin::Bulletin;
pub use plaza::Plaza;
pub use product::Product;
pub use rbac::{PermissionRecord, RoleRecord};
pub use store::Store;
pub use user::User;
