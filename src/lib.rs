pub mod config;
pub mod error;
pub mod menu;
pub mod service;
pub mod source;

// Re-export the surface most consumers need
pub use error::MenuError;
pub use menu::{MenuNode, PermissionRow, ResolvedMenuNode, Role};
pub use service::{MenuAccessService, MenuStatus, PermissionsUpdated};
pub use source::MenuSource;
