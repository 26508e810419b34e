use uuid::Uuid;

use super::category::Category;

/// A category together with its materialized descendants.
///
/// `total_subcategories` and `depth` stay `None` until the tree is annotated.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
    pub total_subcategories: Option<usize>,
    pub depth: Option<usize>,
}

impl CategoryNode {
    pub fn new(category: Category, children: Vec<CategoryNode>) -> Self {
        Self {
            category,
            children,
            total_subcategories: None,
            depth: None,
        }
    }

    pub fn leaf(category: Category) -> Self {
        Self::new(category, Vec::new())
    }

    pub fn id(&self) -> Uuid {
        self.category.id
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn subtree_size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            size += 1;
            stack.extend(node.children.iter());
        }
        size
    }
}

// Hierarchies can be arbitrarily deep, so children are unlinked onto a
// work list instead of being dropped one nested level at a time.
impl Drop for CategoryNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Result of a traversal that may have skipped subtrees whose children
/// could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeOutcome<T> {
    Complete(T),
    Partial { value: T, failed_ids: Vec<Uuid> },
}

impl<T> TreeOutcome<T> {
    pub fn new(value: T, failed_ids: Vec<Uuid>) -> Self {
        if failed_ids.is_empty() {
            Self::Complete(value)
        } else {
            Self::Partial { value, failed_ids }
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Complete(value) | Self::Partial { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Complete(value) | Self::Partial { value, .. } => value,
        }
    }

    pub fn failed_ids(&self) -> &[Uuid] {
        match self {
            Self::Complete(_) => &[],
            Self::Partial { failed_ids, .. } => failed_ids,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TreeOutcome<U> {
        match self {
            Self::Complete(value) => TreeOutcome::Complete(f(value)),
            Self::Partial { value, failed_ids } => TreeOutcome::Partial {
                value: f(value),
                failed_ids,
            },
        }
    }
}

/// Annotated forest served by the tree projection.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedForest {
    pub categories: Vec<CategoryNode>,
    pub total_categories: usize,
    pub max_depth: usize,
}

impl AnnotatedForest {
    pub fn from_roots(mut roots: Vec<CategoryNode>) -> Self {
        annotate_forest(&mut roots);
        let max_depth = forest_max_depth(&roots);
        Self {
            total_categories: roots.len(),
            max_depth,
            categories: roots,
        }
    }
}

/// Fills `total_subcategories` and `depth` for every node of an already
/// built tree. The root gets depth 1.
pub fn annotate(root: &mut CategoryNode) {
    let counts = descendant_counts(root);

    // Same visiting order as `descendant_counts`, so `counts` lines up.
    let mut visit = 0;
    let mut stack = vec![(root, 1_usize)];
    while let Some((node, depth)) = stack.pop() {
        node.total_subcategories = Some(counts[visit]);
        node.depth = Some(depth);
        visit += 1;
        for child in node.children.iter_mut() {
            stack.push((child, depth + 1));
        }
    }
}

pub fn annotate_forest(roots: &mut [CategoryNode]) {
    for root in roots.iter_mut() {
        annotate(root);
    }
}

/// Descendant counts in pre-order visiting order.
fn descendant_counts(root: &CategoryNode) -> Vec<usize> {
    let mut parents: Vec<Option<usize>> = Vec::new();
    let mut stack = vec![(root, None)];
    while let Some((node, parent)) = stack.pop() {
        let index = parents.len();
        parents.push(parent);
        for child in &node.children {
            stack.push((child, Some(index)));
        }
    }

    // Descendants are always visited after their ancestor, so walking the
    // visiting order backwards finalizes every child before its parent.
    let mut counts = vec![0_usize; parents.len()];
    for index in (0..parents.len()).rev() {
        if let Some(parent) = parents[index] {
            counts[parent] += 1 + counts[index];
        }
    }
    counts
}

/// Number of levels in the tree; a childless node has depth 1.
pub fn max_depth(root: &CategoryNode) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(root, 1_usize)];
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        for child in &node.children {
            stack.push((child, depth + 1));
        }
    }
    deepest
}

pub fn forest_max_depth(roots: &[CategoryNode]) -> usize {
    roots.iter().map(max_depth).max().unwrap_or(0)
}
