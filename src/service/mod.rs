// Menu access service
//
// Owns the fetch-normalize-resolve pipeline, the per-role TTL cache, and the
// debounced invalidation protocol. Per-role lifecycle: EMPTY -> (fetch) ->
// WARM -> (TTL expiry or invalidation signal) -> EMPTY. A failed refresh
// never clears a previously resolved tree.

pub mod cache;

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::config::{self, MenuConfig};
use crate::error::MenuError;
use crate::menu::types::{ResolvedMenuNode, Role};
use crate::menu::{access, normalize, resolver};
use crate::service::cache::RoleCache;
use crate::source::MenuSource;

/// Broadcast signal emitted whenever an administrator edits a role's menu
/// permissions elsewhere in the application. Carries no payload.
#[derive(Debug, Clone, Copy)]
pub struct PermissionsUpdated;

/// Loading/error/syncing flags for rendering spinners and banners
#[derive(Debug, Clone, Default)]
pub struct MenuStatus {
    /// Initial fetch in progress, no prior tree available
    pub loading: bool,
    /// Refresh in progress with a prior tree still being served
    pub syncing: bool,
    pub error: Option<String>,
}

pub struct MenuAccessService {
    source: Arc<dyn MenuSource>,
    config: MenuConfig,
    cache: RoleCache,
    status: RwLock<MenuStatus>,
    updates_tx: broadcast::Sender<PermissionsUpdated>,
    /// Pending debounced recompute; replaced (and aborted) by newer signals
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl MenuAccessService {
    /// Create a service using the global config. Must be called within a
    /// tokio runtime: the invalidation listener is spawned immediately.
    pub fn new(source: Arc<dyn MenuSource>) -> Arc<Self> {
        Self::with_config(source, config::config().clone())
    }

    pub fn with_config(source: Arc<dyn MenuSource>, config: MenuConfig) -> Arc<Self> {
        let (updates_tx, updates_rx) = broadcast::channel(16);
        let ttl = Duration::from_secs(config.cache_ttl_secs);

        let service = Arc::new(Self {
            source,
            config,
            cache: RoleCache::new(ttl),
            status: RwLock::new(MenuStatus::default()),
            updates_tx,
            pending: Mutex::new(None),
        });

        Self::spawn_invalidation_listener(Arc::downgrade(&service), updates_rx);
        service
    }

    /// Sender half of the invalidation channel. The admin-settings side holds
    /// a clone and sends [`PermissionsUpdated`] after each permission edit.
    pub fn invalidation_sender(&self) -> broadcast::Sender<PermissionsUpdated> {
        self.updates_tx.clone()
    }

    /// Convenience for in-process callers
    pub fn notify_permissions_updated(&self) {
        // A send error only means no live receiver, which is fine
        let _ = self.updates_tx.send(PermissionsUpdated);
    }

    pub async fn status(&self) -> MenuStatus {
        self.status.read().await.clone()
    }

    /// The resolved, access-annotated menu tree for a role.
    ///
    /// Cache hit within TTL returns the cached tree without touching the
    /// source. On a failed refresh the previous tree, if any, is served stale.
    pub async fn resolved_menu(
        &self,
        role: &Role,
    ) -> Result<Arc<Vec<ResolvedMenuNode>>, MenuError> {
        if let Some(tree) = self.cache.get_fresh(role).await {
            return Ok(tree);
        }

        match self.refresh(role).await {
            Ok(tree) => Ok(tree),
            Err(err) => match self.cache.get_any(role).await {
                Some(stale) => {
                    tracing::warn!(role = role.as_str(), error = %err, "refresh failed, serving stale tree");
                    Ok(stale)
                }
                None => Err(err),
            },
        }
    }

    /// Is this exact navigable path accessible for the role? Never errors;
    /// any failure to resolve reads as inaccessible.
    pub async fn can_access_path(&self, role: &Role, path: &str) -> bool {
        match self.resolved_menu(role).await {
            Ok(tree) => access::can_access_path(&tree, path),
            Err(_) => false,
        }
    }

    /// Is there an accessible node with this display name or id?
    pub async fn check_menu_access(&self, role: &Role, name_or_id: &str) -> bool {
        match self.resolved_menu(role).await {
            Ok(tree) => access::check_menu_access(&tree, name_or_id),
            Err(_) => false,
        }
    }

    /// Run the full fetch-normalize-resolve pipeline and repopulate the cache
    async fn refresh(&self, role: &Role) -> Result<Arc<Vec<ResolvedMenuNode>>, MenuError> {
        let had_prior = self.cache.get_any(role).await.is_some();
        {
            let mut status = self.status.write().await;
            if had_prior {
                status.syncing = true;
            } else {
                status.loading = true;
            }
        }

        let result = self.fetch_and_resolve(role).await;

        let mut status = self.status.write().await;
        status.loading = false;
        status.syncing = false;
        match &result {
            Ok(_) => status.error = None,
            Err(err) => {
                tracing::warn!(role = role.as_str(), error = %err, "menu resolution failed");
                status.error = Some(err.to_string());
            }
        }

        result
    }

    async fn fetch_and_resolve(
        &self,
        role: &Role,
    ) -> Result<Arc<Vec<ResolvedMenuNode>>, MenuError> {
        let (menu, rows) = futures::try_join!(
            self.source.fetch_menu(),
            self.source.fetch_permissions(role)
        )?;

        let normalized = normalize::normalize(menu, role, &self.config);
        let resolved = Arc::new(resolver::resolve(&normalized, &rows));

        self.cache.insert(role.clone(), resolved.clone()).await;
        tracing::debug!(role = role.as_str(), "resolved menu tree cached");

        Ok(resolved)
    }

    fn spawn_invalidation_listener(
        service: Weak<Self>,
        mut updates_rx: broadcast::Receiver<PermissionsUpdated>,
    ) {
        tokio::spawn(async move {
            loop {
                match updates_rx.recv().await {
                    Ok(PermissionsUpdated) => {
                        let Some(service) = service.upgrade() else { break };
                        service.on_permissions_updated().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Coalescing makes missed signals harmless; one
                        // recompute covers them all
                        tracing::warn!(skipped, "invalidation receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Evict the cached scope and schedule a single recompute after the
    /// debounce window. Rapid successive signals replace the pending task so
    /// a burst of edits triggers exactly one refetch.
    async fn on_permissions_updated(self: Arc<Self>) {
        let roles = self.cache.expire_all().await;
        tracing::debug!(roles = roles.len(), "permissions updated, cache invalidated");

        let debounce = Duration::from_millis(self.config.debounce_ms);
        let weak = Arc::downgrade(&self);
        let task = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let Some(service) = weak.upgrade() else { return };
            for role in roles {
                if let Err(err) = service.refresh(&role).await {
                    tracing::warn!(role = role.as_str(), error = %err, "scheduled recompute failed");
                }
            }
        });

        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }
}
