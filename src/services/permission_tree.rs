// src/services/permission_tree.rs

use std::collections::{HashMap, HashSet};

use crate::models::permission::{Permission, PermissionNode};
use crate::services::tree::{HierarchyIndex, TreeError};

/// Monta a árvore de permissões marcando `enable` para cada id concedido.
pub fn build_permission_tree(
    catalog: &[Permission],
    granted: &HashSet<i32>,
) -> Result<Vec<PermissionNode>, TreeError> {
    build_permission_tree_with_icons(catalog, granted, &HashMap::new())
}

/// Igual a [`build_permission_tree`], mas uma permissão ligada a um menu
/// herda o ícone desse menu (`menu_icons`: menu id → ícone).
pub fn build_permission_tree_with_icons(
    catalog: &[Permission],
    granted: &HashSet<i32>,
    menu_icons: &HashMap<i32, String>,
) -> Result<Vec<PermissionNode>, TreeError> {
    let index = HierarchyIndex::build(catalog, |p| p.id, |p| p.parent_id)?;

    index.assemble(catalog, |permission, children| PermissionNode {
        id: permission.id,
        name: permission.name.clone(),
        enable: granted.contains(&permission.id),
        icon: permission
            .menu_id
            .and_then(|menu_id| menu_icons.get(&menu_id))
            .filter(|icon| !icon.is_empty())
            .cloned(),
        children,
    })
}
