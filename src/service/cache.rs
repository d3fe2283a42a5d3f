// Per-role cache of resolved menu trees
//
// Entries carry a TTL but are never removed on expiry: an expired entry
// counts as a miss for freshness while its tree remains available as a stale
// fallback when a refresh fails.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::menu::types::{ResolvedMenuNode, Role};

#[derive(Debug)]
struct CacheEntry {
    tree: Arc<Vec<ResolvedMenuNode>>,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub(crate) struct RoleCache {
    inner: Arc<RwLock<HashMap<Role, CacheEntry>>>,
    ttl: Duration,
}

impl RoleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Tree for this role if it is still within its TTL
    pub async fn get_fresh(&self, role: &Role) -> Option<Arc<Vec<ResolvedMenuNode>>> {
        let inner = self.inner.read().await;
        inner
            .get(role)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| Arc::clone(&entry.tree))
    }

    /// Tree for this role regardless of freshness (stale fallback)
    pub async fn get_any(&self, role: &Role) -> Option<Arc<Vec<ResolvedMenuNode>>> {
        let inner = self.inner.read().await;
        inner.get(role).map(|entry| Arc::clone(&entry.tree))
    }

    pub async fn insert(&self, role: Role, tree: Arc<Vec<ResolvedMenuNode>>) {
        let mut inner = self.inner.write().await;
        inner.insert(
            role,
            CacheEntry {
                tree,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Mark every entry expired and return the roles that held one
    pub async fn expire_all(&self) -> Vec<Role> {
        let now = Instant::now();
        let mut inner = self.inner.write().await;
        for entry in inner.values_mut() {
            entry.expires_at = now;
        }
        inner.keys().cloned().collect()
    }
}
