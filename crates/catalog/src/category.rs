//! Category forest: flat parent-pointer records to a sorted tree, plus
//! breadcrumbs and subtree membership for category scoping.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ffe_core::{CategoryId, Entity};

use crate::product::Product;

/// Flat category record as supplied by the data-loading layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Sibling sort key (ascending).
    #[serde(default, alias = "sortOrder")]
    pub order_index: i32,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            parent_id: None,
            order_index: 0,
        }
    }

    pub fn child_of(mut self, parent: impl Into<CategoryId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn ordered(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One step of a root-to-leaf navigation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub id: CategoryId,
    pub name: String,
}

/// Nested view of a category with its sorted children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
    /// Products assigned directly to this category.
    pub product_count: usize,
    /// Products in this category and all of its descendants.
    pub total_product_count: usize,
}

impl CategoryNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }
}

// Deep chains would otherwise overflow the stack in the recursive drop glue.
impl Drop for CategoryNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnPath,
    Done,
}

/// Index-based category forest, rebuilt from flat data on every load.
///
/// Categories keep their input order in `categories`; `parents` holds the
/// effective parent of each slot after dangling references and cycles have
/// been resolved, so every category is reachable from exactly one root.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    categories: Vec<Category>,
    index: HashMap<CategoryId, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl CategoryTree {
    /// Build the forest from a flat list.
    ///
    /// - duplicate ids: the first record wins;
    /// - a parent id that does not exist makes the category a root;
    /// - a cyclic parent chain is cut at the member that comes first in input
    ///   order, which becomes a root.
    ///
    /// Siblings are sorted by `order_index`; ties keep input order.
    pub fn build(input: impl IntoIterator<Item = Category>) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        let mut index: HashMap<CategoryId, usize> = HashMap::new();

        for category in input {
            if index.contains_key(&category.id) {
                warn!(category_id = %category.id, "duplicate category id; keeping first occurrence");
                continue;
            }
            index.insert(category.id.clone(), categories.len());
            categories.push(category);
        }

        let mut parents: Vec<Option<usize>> = categories
            .iter()
            .map(|c| {
                let parent_id = c.parent_id.as_ref()?;
                let parent = index.get(parent_id).copied();
                if parent.is_none() {
                    warn!(
                        category_id = %c.id,
                        parent_id = %parent_id,
                        "category references unknown parent; treating as root"
                    );
                }
                parent
            })
            .collect();

        break_cycles(&categories, &mut parents);

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); categories.len()];
        let mut roots: Vec<usize> = Vec::new();
        for (slot, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(slot),
                None => roots.push(slot),
            }
        }

        // `sort_by_key` is stable, so equal order indexes keep input order.
        roots.sort_by_key(|&i| categories[i].order_index);
        for siblings in &mut children {
            siblings.sort_by_key(|&i| categories[i].order_index);
        }

        debug!(categories = categories.len(), roots = roots.len(), "built category tree");

        Self {
            categories,
            index,
            parents,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.index.get(id).map(|&i| &self.categories[i])
    }

    /// Root categories, sorted.
    pub fn roots(&self) -> Vec<&Category> {
        self.roots.iter().map(|&i| &self.categories[i]).collect()
    }

    /// Effective parent (after dangling/cyclic references were resolved).
    pub fn parent_of(&self, id: &CategoryId) -> Option<&Category> {
        let slot = *self.index.get(id)?;
        self.parents[slot].map(|p| &self.categories[p])
    }

    /// Immediate children, sorted. Empty for unknown ids.
    pub fn children_of(&self, id: &CategoryId) -> Vec<&Category> {
        match self.index.get(id) {
            Some(&slot) => self.children[slot].iter().map(|&i| &self.categories[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Distance from the root (roots are at depth 0).
    pub fn depth_of(&self, id: &CategoryId) -> Option<usize> {
        let trail = self.breadcrumbs(Some(id));
        trail.len().checked_sub(1)
    }

    /// Nested forest without product counts.
    pub fn forest(&self) -> Vec<CategoryNode> {
        self.forest_with_counts(&[])
    }

    /// Nested forest with direct and subtree product counts.
    ///
    /// Built bottom-up with an explicit stack, so depth is bounded by memory
    /// rather than by the call stack.
    pub fn forest_with_counts(&self, products: &[Product]) -> Vec<CategoryNode> {
        let mut direct: Vec<usize> = vec![0; self.categories.len()];
        for product in products {
            if let Some(&slot) = self.index.get(&product.category_id) {
                direct[slot] += 1;
            }
        }

        // Pre-order: every parent precedes its children.
        let mut order: Vec<usize> = Vec::with_capacity(self.categories.len());
        let mut stack: Vec<usize> = self.roots.clone();
        while let Some(slot) = stack.pop() {
            order.push(slot);
            stack.extend(&self.children[slot]);
        }

        let mut built: Vec<Option<CategoryNode>> = (0..self.categories.len()).map(|_| None).collect();
        for &slot in order.iter().rev() {
            let children: Vec<CategoryNode> = self.children[slot]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            let total = direct[slot] + children.iter().map(|c| c.total_product_count).sum::<usize>();
            built[slot] = Some(CategoryNode {
                category: self.categories[slot].clone(),
                children,
                product_count: direct[slot],
                total_product_count: total,
            });
        }

        self.roots.iter().filter_map(|&root| built[root].take()).collect()
    }

    /// Root-to-selected trail.
    ///
    /// `None` (selection cleared) and unknown ids both give an empty trail.
    pub fn breadcrumbs(&self, selected: Option<&CategoryId>) -> Vec<Breadcrumb> {
        let Some(&start) = selected.and_then(|id| self.index.get(id)) else {
            return Vec::new();
        };

        let mut seen = vec![false; self.categories.len()];
        let mut trail = Vec::new();
        let mut cursor = Some(start);
        while let Some(slot) = cursor {
            if seen[slot] {
                warn!(category_id = %self.categories[slot].id, "cycle in category ancestry; truncating breadcrumbs");
                break;
            }
            seen[slot] = true;
            let category = &self.categories[slot];
            trail.push(Breadcrumb {
                id: category.id.clone(),
                name: category.name.clone(),
            });
            cursor = self.parents[slot];
        }
        trail.reverse();
        trail
    }

    /// The category itself plus every descendant. Empty for unknown ids.
    pub fn subtree_ids(&self, id: &CategoryId) -> HashSet<CategoryId> {
        let mut ids = HashSet::new();
        let Some(&start) = self.index.get(id) else {
            return ids;
        };

        let mut stack = vec![start];
        while let Some(slot) = stack.pop() {
            if ids.insert(self.categories[slot].id.clone()) {
                stack.extend(self.children[slot].iter().copied());
            }
        }
        ids
    }
}

/// Cut every cycle in the parent graph so that all chains end at a root.
fn break_cycles(categories: &[Category], parents: &mut [Option<usize>]) {
    let mut state = vec![Visit::Unvisited; parents.len()];

    for start in 0..parents.len() {
        if state[start] != Visit::Unvisited {
            continue;
        }

        let mut path: Vec<usize> = Vec::new();
        let mut cursor = Some(start);
        while let Some(slot) = cursor {
            match state[slot] {
                Visit::Done => break,
                Visit::OnPath => {
                    // Each slot has one parent, so a walk can enter at most one cycle.
                    if let Some(pos) = path.iter().position(|&s| s == slot) {
                        if let Some(&cut) = path[pos..].iter().min() {
                            warn!(
                                category_id = %categories[cut].id,
                                cycle_len = path.len() - pos,
                                "cyclic category parents; treating category as root"
                            );
                            parents[cut] = None;
                        }
                    }
                    break;
                }
                Visit::Unvisited => {
                    state[slot] = Visit::OnPath;
                    path.push(slot);
                    cursor = parents[slot];
                }
            }
        }

        for slot in path {
            state[slot] = Visit::Done;
        }
    }
}
