// src/services/tree.rs

//! Índice pai→filhos sobre um catálogo plano.
//!
//! As hierarquias de menus e de permissões são guardadas como ponteiros para
//! o pai. Aqui o catálogo é carregado numa tabela (posições no slice), o
//! índice de filhos é montado uma única vez e a árvore é percorrida a partir
//! da raiz, sem referências de volta entre os nós.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Chave da raiz. `parent_id` NULL e `parent_id = 0` são equivalentes.
pub const ROOT: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Ciclo detectado na hierarquia envolvendo os ids {0:?}")]
    Cycle(Vec<i32>),

    #[error("O id {0} aparece mais de uma vez no catálogo")]
    DuplicateId(i32),
}

pub fn parent_key(parent_id: Option<i32>) -> i32 {
    match parent_id {
        Some(id) if id != ROOT => id,
        _ => ROOT,
    }
}

pub(crate) struct HierarchyIndex {
    ids: Vec<i32>,
    children: HashMap<i32, Vec<usize>>,
}

impl HierarchyIndex {
    /// Monta o índice. Um pai que não existe no catálogo (leitura concorrente
    /// com remoção, por exemplo) faz o nó ser anexado à raiz.
    pub(crate) fn build<T>(
        items: &[T],
        id_of: impl Fn(&T) -> i32,
        parent_of: impl Fn(&T) -> Option<i32>,
    ) -> Result<Self, TreeError> {
        let ids: Vec<i32> = items.iter().map(&id_of).collect();

        let mut known = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !known.insert(*id) {
                return Err(TreeError::DuplicateId(*id));
            }
        }

        let mut children: HashMap<i32, Vec<usize>> = HashMap::new();
        let mut orphans = Vec::new();
        for (pos, item) in items.iter().enumerate() {
            let mut key = parent_key(parent_of(item));
            if key != ROOT && !known.contains(&key) {
                orphans.push(ids[pos]);
                key = ROOT;
            }
            children.entry(key).or_default().push(pos);
        }

        if !orphans.is_empty() {
            tracing::warn!(?orphans, "Nós com pai inexistente foram anexados à raiz");
        }

        Ok(Self { ids, children })
    }

    fn children_of(&self, key: i32) -> &[usize] {
        self.children.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Percorre a árvore a partir da raiz, na ordem do catálogo, chamando
    /// `make(item, filhos)` de baixo para cima.
    ///
    /// Falha com `Cycle` ao revisitar uma posição ou quando sobram itens
    /// inalcançáveis (membros de um ciclo e seus descendentes).
    pub(crate) fn assemble<T, N, F>(&self, items: &[T], mut make: F) -> Result<Vec<N>, TreeError>
    where
        F: FnMut(&T, Vec<N>) -> N,
    {
        let mut visited = vec![false; items.len()];
        let roots = self.descend(ROOT, items, &mut visited, &mut make)?;

        let unreached: Vec<i32> = visited
            .iter()
            .enumerate()
            .filter(|(_, seen)| !**seen)
            .map(|(pos, _)| self.ids[pos])
            .collect();
        if !unreached.is_empty() {
            return Err(TreeError::Cycle(unreached));
        }

        Ok(roots)
    }

    fn descend<T, N, F>(
        &self,
        key: i32,
        items: &[T],
        visited: &mut [bool],
        make: &mut F,
    ) -> Result<Vec<N>, TreeError>
    where
        F: FnMut(&T, Vec<N>) -> N,
    {
        let mut nodes = Vec::with_capacity(self.children_of(key).len());
        for &pos in self.children_of(key) {
            if visited[pos] {
                return Err(TreeError::Cycle(vec![self.ids[pos]]));
            }
            visited[pos] = true;

            let children = self.descend(self.ids[pos], items, visited, make)?;
            nodes.push(make(&items[pos], children));
        }
        Ok(nodes)
    }
}

/// Verifica, antes de gravar, se pendurar `node` sob `new_parent` fecharia
/// um ciclo. `parents` mapeia id → parent_id para o catálogo inteiro.
pub fn creates_cycle(parents: &HashMap<i32, Option<i32>>, node: i32, new_parent: i32) -> bool {
    let mut current = new_parent;
    let mut steps = 0;
    while current != ROOT {
        if current == node {
            return true;
        }
        // Um ciclo já existente que não passa por `node` também encerra a busca
        steps += 1;
        if steps > parents.len() {
            return true;
        }
        current = match parents.get(&current) {
            Some(parent) => parent_key(*parent),
            None => return false,
        };
    }
    false
}
