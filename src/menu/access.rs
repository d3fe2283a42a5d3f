// Access query facade
//
// Pure read predicates over a resolved tree. Both return false when no
// matching node exists; neither can fail.

use crate::menu::types::ResolvedMenuNode;

/// Is this exact navigable path currently accessible?
pub fn can_access_path(nodes: &[ResolvedMenuNode], path: &str) -> bool {
    nodes.iter().any(|node| {
        if node.path.as_deref() == Some(path) && node.is_accessible {
            return true;
        }
        can_access_path(&node.children, path)
    })
}

/// Is there an accessible node with this display name or id?
///
/// The name match exists for legacy tab-name-based checks in the UI layer.
pub fn check_menu_access(nodes: &[ResolvedMenuNode], name_or_id: &str) -> bool {
    nodes.iter().any(|node| {
        if (node.name == name_or_id || node.id == name_or_id) && node.is_accessible {
            return true;
        }
        check_menu_access(&node.children, name_or_id)
    })
}
