use serde::{Deserialize, Serialize};

use crate::config::MenuConfig;

/// Opaque role label attached to the signed-in user (e.g. "admin", "viewer")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this role belongs to the privileged administrator tier
    pub fn is_admin_equivalent(&self, config: &MenuConfig) -> bool {
        config.is_admin_role(&self.0)
    }
}

impl From<&str> for Role {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in the raw navigation tree as fetched from the menu-configuration
/// collaborator. Groups carry `children`; navigable leaves carry a `path`.
/// A group without children collapses to a leaf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: String,
    /// Foreign key into the permission table, when the item is gated
    #[serde(default, alias = "internalId")]
    pub internal_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub children: Vec<MenuNode>,
    /// Server-computed accessibility; authoritative when present
    #[serde(default, alias = "isAccessible")]
    pub is_accessible: Option<bool>,
}

impl MenuNode {
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// One role's access to one menu item. Legacy wire naming (`role`,
/// `menu_item`) is folded into the canonical field names at deserialization,
/// so the rest of the crate only ever sees one record shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionRow {
    #[serde(default, alias = "role")]
    pub role_name: String,
    #[serde(alias = "menu_item")]
    pub menu_item_id: i64,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub can_export: bool,
    /// Precomputed by upstream for some rows; overrides `can_view` when set
    #[serde(default)]
    pub is_accessible: Option<bool>,
}

impl PermissionRow {
    /// Effective accessibility flag for this row
    pub fn effective_access(&self) -> bool {
        self.is_accessible.unwrap_or(self.can_view)
    }
}

/// A menu node annotated with per-role accessibility. `locked` is the
/// negation of `is_accessible`, carried for UI convenience.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMenuNode {
    pub id: String,
    pub internal_id: Option<i64>,
    pub name: String,
    pub path: Option<String>,
    pub icon: Option<String>,
    pub is_accessible: bool,
    pub locked: bool,
    pub children: Vec<ResolvedMenuNode>,
}

impl ResolvedMenuNode {
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}
