use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// A structural fix-up rule: whenever the `child_id` node is found anywhere in
/// the raw menu tree, it is re-parented underneath the `parent_id` group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationRule {
    pub child_id: String,
    pub parent_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// How long a resolved tree stays fresh per role (seconds)
    pub cache_ttl_secs: u64,
    /// Coalescing window for bursts of invalidation signals (milliseconds)
    pub debounce_ms: u64,
    /// Role labels treated as the privileged administrator tier
    pub admin_roles: Vec<String>,
    /// Group ids removed wholesale for non-administrator roles
    pub admin_only_groups: Vec<String>,
    /// Known-misplaced nodes and where they belong
    pub relocations: Vec<RelocationRule>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 60,
            debounce_ms: 250,
            admin_roles: vec![
                "admin".to_string(),
                "administrator".to_string(),
                "superadmin".to_string(),
            ],
            admin_only_groups: vec!["administrator".to_string()],
            relocations: vec![RelocationRule {
                child_id: "settings".to_string(),
                parent_id: "administrator".to_string(),
            }],
        }
    }
}

impl MenuConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("MENU_CACHE_TTL_SECS") {
            self.cache_ttl_secs = v.parse().unwrap_or(self.cache_ttl_secs);
        }
        if let Ok(v) = env::var("MENU_DEBOUNCE_MS") {
            self.debounce_ms = v.parse().unwrap_or(self.debounce_ms);
        }
        if let Ok(v) = env::var("MENU_ADMIN_ROLES") {
            self.admin_roles = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("MENU_ADMIN_ONLY_GROUPS") {
            self.admin_only_groups = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    /// True when the label belongs to the administrator-equivalent tier
    pub fn is_admin_role(&self, label: &str) -> bool {
        self.admin_roles
            .iter()
            .any(|r| r.eq_ignore_ascii_case(label))
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<MenuConfig> = Lazy::new(MenuConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static MenuConfig {
    &CONFIG
}
