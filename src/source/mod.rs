pub mod http;

use async_trait::async_trait;

use crate::error::MenuError;
use crate::menu::types::{MenuNode, PermissionRow, Role};

pub use http::HttpMenuSource;

/// Data-access boundary for the two inputs resolution needs: the raw menu
/// structure and the permission rows for a role. Implemented over HTTP by
/// [`HttpMenuSource`]; tests supply in-memory implementations.
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch_menu(&self) -> Result<Vec<MenuNode>, MenuError>;

    async fn fetch_permissions(&self, role: &Role) -> Result<Vec<PermissionRow>, MenuError>;
}
