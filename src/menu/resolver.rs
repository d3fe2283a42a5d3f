// Permission resolver
//
// Annotates a normalized menu tree with per-role accessibility. Group
// containers are never individually locked; leaves fail closed when nothing
// proves them grantable.

use std::collections::HashSet;

use crate::menu::types::{MenuNode, PermissionRow, ResolvedMenuNode};

/// Annotate every node in the tree with `is_accessible`/`locked`, given the
/// permission rows already narrowed to the current role.
pub fn resolve(nodes: &[MenuNode], rows: &[PermissionRow]) -> Vec<ResolvedMenuNode> {
    let accessible = accessible_ids(rows);
    nodes.iter().map(|n| resolve_node(n, &accessible)).collect()
}

/// Build the set of menu item ids the rows grant access to, deduplicating
/// malformed upstream data (first row per item wins).
fn accessible_ids(rows: &[PermissionRow]) -> HashSet<i64> {
    let mut seen = HashSet::new();
    let mut accessible = HashSet::new();

    for row in rows {
        if !seen.insert(row.menu_item_id) {
            tracing::debug!(menu_item_id = row.menu_item_id, "duplicate permission row ignored");
            continue;
        }
        if row.effective_access() {
            accessible.insert(row.menu_item_id);
        }
    }

    accessible
}

fn resolve_node(node: &MenuNode, accessible: &HashSet<i64>) -> ResolvedMenuNode {
    let children: Vec<ResolvedMenuNode> = node
        .children
        .iter()
        .map(|c| resolve_node(c, accessible))
        .collect();

    let is_accessible = if !children.is_empty() {
        // Group containers are always visible; their children carry the gate
        true
    } else if let Some(server_flag) = node.is_accessible {
        // Server is authoritative when it supplies the flag
        server_flag
    } else {
        // Fail closed: an un-keyed leaf can never be proven grantable
        node.internal_id
            .map(|id| accessible.contains(&id))
            .unwrap_or(false)
    };

    ResolvedMenuNode {
        id: node.id.clone(),
        internal_id: node.internal_id,
        name: node.name.clone(),
        path: node.path.clone(),
        icon: node.icon.clone(),
        is_accessible,
        locked: !is_accessible,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, internal_id: Option<i64>) -> MenuNode {
        MenuNode {
            id: id.to_string(),
            internal_id,
            name: id.to_string(),
            path: Some(format!("/{}", id)),
            ..Default::default()
        }
    }

    fn row(menu_item_id: i64, can_view: bool) -> PermissionRow {
        PermissionRow {
            role_name: "viewer".to_string(),
            menu_item_id,
            can_view,
            ..Default::default()
        }
    }

    #[test]
    fn test_leaf_accessible_when_row_grants_view() {
        let tree = vec![leaf("dashboard", Some(1)), leaf("reports", Some(2))];
        let resolved = resolve(&tree, &[row(1, true), row(2, false)]);

        assert!(resolved[0].is_accessible);
        assert!(!resolved[0].locked);
        assert!(!resolved[1].is_accessible);
        assert!(resolved[1].locked);
    }

    #[test]
    fn test_leaf_without_internal_id_fails_closed() {
        let tree = vec![leaf("orphan", None)];
        let resolved = resolve(&tree, &[row(1, true)]);
        assert!(!resolved[0].is_accessible);
        assert!(resolved[0].locked);
    }

    #[test]
    fn test_server_supplied_flag_is_authoritative() {
        let mut granted = leaf("a", Some(1));
        granted.is_accessible = Some(false);
        let mut denied = leaf("b", None);
        denied.is_accessible = Some(true);

        let resolved = resolve(&[granted, denied], &[row(1, true)]);
        // Row grants item 1, but the server said no
        assert!(!resolved[0].is_accessible);
        // No row and no id, but the server said yes
        assert!(resolved[1].is_accessible);
    }

    #[test]
    fn test_group_always_accessible() {
        let tree = vec![MenuNode {
            id: "reports".to_string(),
            name: "Reports".to_string(),
            children: vec![leaf("daily", Some(5))],
            ..Default::default()
        }];
        let resolved = resolve(&tree, &[]);

        assert!(resolved[0].is_accessible);
        assert!(!resolved[0].locked);
        // Child still locked: no rows grant it
        assert!(resolved[0].children[0].locked);
    }

    #[test]
    fn test_no_rows_locks_everything_except_server_flagged() {
        let mut open = leaf("help", None);
        open.is_accessible = Some(true);
        let tree = vec![leaf("dashboard", Some(1)), open];
        let resolved = resolve(&tree, &[]);

        assert!(resolved[0].locked);
        assert!(resolved[1].is_accessible);
    }

    #[test]
    fn test_duplicate_rows_resolve_identically() {
        let tree = vec![leaf("dashboard", Some(1))];
        let deduped = resolve(&tree, &[row(1, true)]);
        let duplicated = resolve(&tree, &[row(1, true), row(1, true), row(1, true)]);
        assert_eq!(deduped, duplicated);
    }

    #[test]
    fn test_duplicate_first_row_wins() {
        let tree = vec![leaf("dashboard", Some(1))];
        let resolved = resolve(&tree, &[row(1, false), row(1, true)]);
        assert!(resolved[0].locked);
    }

    #[test]
    fn test_precomputed_row_flag_overrides_can_view() {
        let tree = vec![leaf("dashboard", Some(1))];
        let mut r = row(1, false);
        r.is_accessible = Some(true);
        let resolved = resolve(&tree, &[r]);
        assert!(resolved[0].is_accessible);
    }
}
