// src/services/route_tree.rs

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::models::menu::{Menu, RouteMeta, RouteNode};
use crate::models::permission::{Permission, PermissionType};
use crate::services::tree::{parent_key, HierarchyIndex, TreeError, ROOT};

/// Ponto de extensão: qual `authority` vai no `meta` de cada rota.
pub trait AuthorityPolicy: Send + Sync {
    fn authority_for(&self, menu: &Menu) -> Option<Vec<i32>>;
}

/// Comportamento histórico: toda rota recebe `[1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Permissive;

impl AuthorityPolicy for Permissive {
    fn authority_for(&self, _menu: &Menu) -> Option<Vec<i32>> {
        Some(vec![1])
    }
}

/// Ids das permissões do tipo menu, vindas dos cargos do usuário, ligadas a
/// cada menu. Menu sem nenhuma fica sem `authority`.
#[derive(Debug, Clone, Default)]
pub struct GrantedMenuPermissions {
    by_menu: HashMap<i32, Vec<i32>>,
}

impl GrantedMenuPermissions {
    pub fn from_permissions(granted: &[Permission]) -> Self {
        let mut by_menu: HashMap<i32, Vec<i32>> = HashMap::new();
        for permission in granted {
            if permission.permission_type != PermissionType::Menu {
                continue;
            }
            if let Some(menu_id) = permission.menu_id {
                by_menu.entry(menu_id).or_default().push(permission.id);
            }
        }
        for ids in by_menu.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }
        Self { by_menu }
    }
}

impl AuthorityPolicy for GrantedMenuPermissions {
    fn authority_for(&self, menu: &Menu) -> Option<Vec<i32>> {
        self.by_menu.get(&menu.id).cloned()
    }
}

/// Qual política usar, vindo da configuração (`ROUTE_AUTHORITY`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorityMode {
    #[default]
    Permissive,
    Granted,
}

impl FromStr for AuthorityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(AuthorityMode::Permissive),
            "granted" => Ok(AuthorityMode::Granted),
            other => Err(format!("modo de autoridade desconhecido: '{other}'")),
        }
    }
}

/// Monta a árvore de navegação.
///
/// Os menus são ordenados por (pai, ordem) antes de percorrer, de modo que
/// irmãos saem na ordem declarada; empates mantêm a ordem do catálogo.
/// Menus invisíveis não são filtrados aqui.
pub fn build_route_tree(
    menus: &[Menu],
    authority: &dyn AuthorityPolicy,
) -> Result<Vec<RouteNode>, TreeError> {
    // Pai inexistente conta como raiz já na ordenação, igual ao índice
    let known: HashSet<i32> = menus.iter().map(|m| m.id).collect();
    let effective_parent = |m: &Menu| match parent_key(m.parent_id) {
        parent if known.contains(&parent) => parent,
        _ => ROOT,
    };

    let mut ordered: Vec<&Menu> = menus.iter().collect();
    ordered.sort_by_key(|m| (effective_parent(*m), m.order));

    let index = HierarchyIndex::build(&ordered, |m| m.id, |m| m.parent_id)?;

    index.assemble(&ordered, |menu, children| RouteNode {
        component: menu.component.clone(),
        name: menu.name.clone(),
        path: menu.path.clone(),
        meta: route_meta(menu, authority),
        children: (!children.is_empty()).then_some(children),
    })
}

fn route_meta(menu: &Menu, authority: &dyn AuthorityPolicy) -> RouteMeta {
    // Sem título no meta, o nome do menu ocupa o lugar (a UI não exibe rótulo vazio)
    let title = if menu.meta.title.is_empty() {
        menu.name.clone()
    } else {
        menu.meta.title.clone()
    };

    let icon = [&menu.icon, &menu.meta.icon]
        .into_iter()
        .find(|icon| !icon.is_empty())
        .cloned();

    RouteMeta {
        title,
        dark_icon: icon.clone(),
        active_icon: icon.clone(),
        icon,
        order: (menu.order != 0).then_some(menu.order),
        authority: authority.authority_for(menu),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::MenuMeta;
    use chrono::Utc;
    use serde_json::json;
    use sqlx::types::Json;

    fn menu(id: i32, parent_id: Option<i32>, order: i32, name: &str) -> Menu {
        Menu {
            id,
            parent_id,
            name: name.to_string(),
            path: format!("/{}", name.to_lowercase()),
            component: format!("@/views/{}", name.to_lowercase()),
            icon: String::new(),
            order,
            meta: Json(MenuMeta {
                title: name.to_string(),
                icon: String::new(),
            }),
            is_visible: true,
            button_association: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn menu_permission(id: i32, menu_id: i32) -> Permission {
        Permission {
            id,
            code: format!("menu:{id}"),
            name: format!("perm {id}"),
            permission_type: PermissionType::Menu,
            menu_id: Some(menu_id),
            button_id: None,
            parent_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn names(nodes: &[RouteNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn siblings_are_sorted_by_order() {
        let menus = vec![
            menu(1, None, 2, "Reports"),
            menu(2, None, 1, "System"),
            menu(3, Some(2), 3, "Buttons"),
            menu(4, Some(2), 1, "Users"),
            menu(5, Some(2), 2, "Roles"),
        ];

        let tree = build_route_tree(&menus, &Permissive).unwrap();

        assert_eq!(names(&tree), vec!["System", "Reports"]);
        let system_children = tree[0].children.as_ref().unwrap();
        assert_eq!(names(system_children), vec!["Users", "Roles", "Buttons"]);
    }

    #[test]
    fn equal_order_keeps_catalog_order() {
        let menus = vec![menu(7, None, 1, "B"), menu(3, None, 1, "A")];
        let tree = build_route_tree(&menus, &Permissive).unwrap();
        assert_eq!(names(&tree), vec!["B", "A"]);
    }

    #[test]
    fn leaf_has_no_children_key() {
        let menus = vec![menu(1, None, 1, "System"), menu(2, Some(1), 1, "Users")];
        let tree = build_route_tree(&menus, &Permissive).unwrap();

        let value = serde_json::to_value(&tree).unwrap();
        let leaf = &value[0]["children"][0];
        assert!(leaf.get("children").is_none());
        assert!(value[0].get("children").is_some());
    }

    #[test]
    fn zero_and_null_parent_are_both_roots() {
        let menus = vec![menu(1, Some(0), 2, "Zero"), menu(2, None, 1, "Null")];
        let tree = build_route_tree(&menus, &Permissive).unwrap();
        assert_eq!(names(&tree), vec!["Null", "Zero"]);
    }

    #[test]
    fn invisible_menus_are_kept() {
        let mut hidden = menu(1, None, 1, "Hidden");
        hidden.is_visible = false;
        let tree = build_route_tree(&[hidden], &Permissive).unwrap();
        assert_eq!(names(&tree), vec!["Hidden"]);
    }

    #[test]
    fn orphan_menu_is_rendered_at_root() {
        let menus = vec![menu(1, None, 1, "System"), menu(9, Some(77), 1, "Lost")];
        let tree = build_route_tree(&menus, &Permissive).unwrap();
        assert_eq!(names(&tree), vec!["System", "Lost"]);
    }

    #[test]
    fn orphan_menu_is_ranked_among_roots_by_order() {
        let menus = vec![
            menu(1, None, 5, "Late"),
            menu(9, Some(77), 1, "Orphan"),
            menu(2, Some(1), 1, "Child"),
        ];
        let tree = build_route_tree(&menus, &Permissive).unwrap();
        assert_eq!(names(&tree), vec!["Orphan", "Late"]);
        assert_eq!(names(tree[1].children.as_ref().unwrap()), vec!["Child"]);
    }

    #[test]
    fn cyclic_menus_fail() {
        let menus = vec![menu(1, Some(2), 1, "A"), menu(2, Some(1), 1, "B")];
        assert!(matches!(
            build_route_tree(&menus, &Permissive),
            Err(TreeError::Cycle(_))
        ));
    }

    #[test]
    fn node_wire_format() {
        let mut system = menu(1, None, 3, "System");
        system.icon = "setting".into();
        system.meta.0.title = "Sistema".into();

        let tree = build_route_tree(&[system], &Permissive).unwrap();

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!([{
                "component": "@/views/system",
                "name": "System",
                "path": "/system",
                "meta": {
                    "title": "Sistema",
                    "icon": "setting",
                    "darkIcon": "setting",
                    "activeIcon": "setting",
                    "order": 3,
                    "authority": [1]
                }
            }])
        );
    }

    #[test]
    fn zero_order_and_empty_icon_are_omitted() {
        let tree = build_route_tree(&[menu(1, None, 0, "Home")], &Permissive).unwrap();
        let meta = serde_json::to_value(&tree[0].meta).unwrap();
        assert!(meta.get("order").is_none());
        assert!(meta.get("icon").is_none());
        assert_eq!(meta["title"], "Home");
    }

    #[test]
    fn granted_policy_uses_menu_permissions_of_the_user() {
        let menus = vec![menu(1, None, 1, "System"), menu(2, Some(1), 1, "Users")];
        let mut button = menu_permission(12, 2);
        button.permission_type = PermissionType::Button;
        let granted = vec![menu_permission(11, 2), menu_permission(10, 2), button];

        let policy = GrantedMenuPermissions::from_permissions(&granted);
        let tree = build_route_tree(&menus, &policy).unwrap();

        assert_eq!(tree[0].meta.authority, None);
        let users = &tree[0].children.as_ref().unwrap()[0];
        assert_eq!(users.meta.authority, Some(vec![10, 11]));
    }

    #[test]
    fn authority_mode_parses_from_config() {
        assert_eq!("granted".parse::<AuthorityMode>(), Ok(AuthorityMode::Granted));
        assert_eq!(" Permissive ".parse::<AuthorityMode>(), Ok(AuthorityMode::Permissive));
        assert!("everything".parse::<AuthorityMode>().is_err());
    }
}
