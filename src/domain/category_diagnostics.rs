use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::category::Category;

/// Coarse position in the hierarchy, inferred from at most two parent hops.
/// Anything deeper than two levels collapses into `Level2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HierarchyLevel {
    Root,
    Level1,
    Level2,
}

impl HierarchyLevel {
    pub fn as_number(self) -> u8 {
        match self {
            HierarchyLevel::Root => 0,
            HierarchyLevel::Level1 => 1,
            HierarchyLevel::Level2 => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCategoryEntry {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub parent_name: Option<String>,
    pub direct_child_count: usize,
    pub level: HierarchyLevel,
    /// Real depth along the parent chain, root = 1. `None` when the chain
    /// hits a missing parent or loops back on itself.
    pub true_depth: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub root: usize,
    pub level1: usize,
    pub level2: usize,
}

impl LevelCounts {
    fn record(&mut self, level: HierarchyLevel) {
        match level {
            HierarchyLevel::Root => self.root += 1,
            HierarchyLevel::Level1 => self.level1 += 1,
            HierarchyLevel::Level2 => self.level2 += 1,
        }
    }

    pub fn sum(&self) -> usize {
        self.root + self.level1 + self.level2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatDiagnostics {
    pub total: usize,
    pub by_level: LevelCounts,
    pub categories: Vec<FlatCategoryEntry>,
}

pub fn flatten(categories: &[Category]) -> FlatDiagnostics {
    let by_id: HashMap<Uuid, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut child_counts: HashMap<Uuid, usize> = HashMap::new();
    for parent_id in categories.iter().filter_map(|c| c.parent_id) {
        *child_counts.entry(parent_id).or_default() += 1;
    }

    let mut depths = DepthResolver::new(&by_id);
    let mut by_level = LevelCounts::default();
    let mut entries = Vec::with_capacity(categories.len());

    for category in categories {
        let parent = category.parent_id.and_then(|id| by_id.get(&id).copied());
        let level = infer_level(category, parent);
        by_level.record(level);

        entries.push(FlatCategoryEntry {
            id: category.id,
            name: category.name.clone(),
            parent_id: category.parent_id,
            parent_name: parent.map(|p| p.name.clone()),
            direct_child_count: child_counts.get(&category.id).copied().unwrap_or(0),
            level,
            true_depth: depths.depth_of(category.id),
        });
    }

    FlatDiagnostics {
        total: categories.len(),
        by_level,
        categories: entries,
    }
}

fn infer_level(category: &Category, parent: Option<&Category>) -> HierarchyLevel {
    match (category.parent_id, parent.and_then(|p| p.parent_id)) {
        (None, _) => HierarchyLevel::Root,
        (Some(_), None) => HierarchyLevel::Level1,
        (Some(_), Some(_)) => HierarchyLevel::Level2,
    }
}

struct DepthResolver<'a> {
    by_id: &'a HashMap<Uuid, &'a Category>,
    resolved: HashMap<Uuid, Option<usize>>,
}

impl<'a> DepthResolver<'a> {
    fn new(by_id: &'a HashMap<Uuid, &'a Category>) -> Self {
        Self {
            by_id,
            resolved: HashMap::with_capacity(by_id.len()),
        }
    }

    fn depth_of(&mut self, id: Uuid) -> Option<usize> {
        if let Some(depth) = self.resolved.get(&id) {
            return *depth;
        }

        // Climb until a root, an already resolved ancestor, or a broken link.
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        let mut cursor = Some(id);
        let mut base = None;
        while let Some(current) = cursor {
            if let Some(depth) = self.resolved.get(&current) {
                base = *depth;
                break;
            }
            if !on_path.insert(current) {
                break;
            }
            let Some(category) = self.by_id.get(&current) else {
                break;
            };
            path.push(current);
            match category.parent_id {
                Some(parent_id) => cursor = Some(parent_id),
                None => {
                    base = Some(0);
                    break;
                }
            }
        }

        // `path` runs child -> ancestor; assign depths from the top down.
        for (offset, node) in path.iter().rev().enumerate() {
            let depth = base.map(|b| b + offset + 1);
            self.resolved.insert(*node, depth);
        }

        self.resolved.get(&id).copied().flatten()
    }
}
