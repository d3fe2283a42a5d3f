// Menu hierarchy normalizer
//
// Best-effort structural fix-ups applied before access annotation:
// relocating known-misplaced leaves under their configured group, and
// removing admin-only group subtrees for non-administrator roles. Missing or
// malformed nodes are tolerated silently; this layer never fails.

use crate::config::{MenuConfig, RelocationRule};
use crate::menu::types::{MenuNode, Role};

/// Apply structural fix-ups to a raw menu tree for the given role
pub fn normalize(mut nodes: Vec<MenuNode>, role: &Role, config: &MenuConfig) -> Vec<MenuNode> {
    for rule in &config.relocations {
        apply_relocation(&mut nodes, rule);
    }

    if !role.is_admin_equivalent(config) {
        prune_groups(&mut nodes, &config.admin_only_groups);
    }

    nodes
}

/// Move the rule's child node underneath its target group, if both exist and
/// the child is not already nested there. No-op otherwise.
fn apply_relocation(nodes: &mut Vec<MenuNode>, rule: &RelocationRule) {
    let Some(parent) = find(nodes, &rule.parent_id) else {
        tracing::debug!(parent = %rule.parent_id, "relocation target group not found, skipping");
        return;
    };

    if find(&parent.children, &rule.child_id).is_some() {
        return; // already where it belongs
    }

    let Some(child) = detach(nodes, &rule.child_id) else {
        tracing::debug!(child = %rule.child_id, "relocation child not found, skipping");
        return;
    };

    match find_mut(nodes, &rule.parent_id) {
        Some(parent) => parent.children.push(child),
        // The parent was nested inside the detached child; undo the detach
        None => nodes.push(child),
    }
}

/// Remove every subtree whose root id is in `group_ids`
fn prune_groups(nodes: &mut Vec<MenuNode>, group_ids: &[String]) {
    nodes.retain(|n| !group_ids.iter().any(|g| g.eq_ignore_ascii_case(&n.id)));
    for node in nodes.iter_mut() {
        prune_groups(&mut node.children, group_ids);
    }
}

fn find<'a>(nodes: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(nodes: &'a mut [MenuNode], id: &str) -> Option<&'a mut MenuNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Remove and return the first node with the given id, searching depth-first
fn detach(nodes: &mut Vec<MenuNode>, id: &str) -> Option<MenuNode> {
    if let Some(pos) = nodes.iter().position(|n| n.id == id) {
        return Some(nodes.remove(pos));
    }
    for node in nodes {
        if let Some(found) = detach(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}
