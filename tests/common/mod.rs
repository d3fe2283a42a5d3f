// Shared test fixtures: an in-memory MenuSource with fetch counters and
// small builders for menu trees and permission rows.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use menu_access::menu::types::{MenuNode, PermissionRow, Role};
use menu_access::{MenuError, MenuSource};

/// Static in-memory source. `fail` flips every fetch into an error so tests
/// can exercise the stale-fallback path.
pub struct StaticSource {
    menu: Mutex<Vec<MenuNode>>,
    rows: Mutex<Vec<PermissionRow>>,
    pub menu_fetches: AtomicUsize,
    pub permission_fetches: AtomicUsize,
    pub fail: AtomicBool,
}

impl StaticSource {
    pub fn new(menu: Vec<MenuNode>, rows: Vec<PermissionRow>) -> Self {
        Self {
            menu: Mutex::new(menu),
            rows: Mutex::new(rows),
            menu_fetches: AtomicUsize::new(0),
            permission_fetches: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_rows(&self, rows: Vec<PermissionRow>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn menu_fetch_count(&self) -> usize {
        self.menu_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MenuSource for StaticSource {
    async fn fetch_menu(&self) -> Result<Vec<MenuNode>, MenuError> {
        self.menu_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MenuError::Fetch("static source offline".to_string()));
        }
        Ok(self.menu.lock().unwrap().clone())
    }

    async fn fetch_permissions(&self, _role: &Role) -> Result<Vec<PermissionRow>, MenuError> {
        self.permission_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MenuError::Fetch("static source offline".to_string()));
        }
        Ok(self.rows.lock().unwrap().clone())
    }
}

pub fn leaf(id: &str, path: &str, internal_id: i64) -> MenuNode {
    MenuNode {
        id: id.to_string(),
        internal_id: Some(internal_id),
        name: id.to_string(),
        path: Some(path.to_string()),
        ..Default::default()
    }
}

pub fn group(id: &str, children: Vec<MenuNode>) -> MenuNode {
    MenuNode {
        id: id.to_string(),
        name: id.to_string(),
        children,
        ..Default::default()
    }
}

pub fn view_row(menu_item_id: i64, can_view: bool) -> PermissionRow {
    PermissionRow {
        role_name: "test".to_string(),
        menu_item_id,
        can_view,
        ..Default::default()
    }
}

/// The raw tree from both resolution scenarios: a dashboard leaf plus an
/// administrator group holding settings.
pub fn scenario_tree() -> Vec<MenuNode> {
    vec![
        leaf("dashboard", "/dashboard", 1),
        group("administrator", vec![leaf("settings", "/settings", 2)]),
    ]
}
