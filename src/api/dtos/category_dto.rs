use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    AnnotatedForest, CategoryNode, FlatCategoryEntry, FlatDiagnostics, LevelCounts,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNodeDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Direct children, ordered by name then id.
    pub children: Vec<CategoryNodeDto>,
    /// All descendants below this node. Only present on annotated trees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_subcategories: Option<usize>,
    /// 1 for a root of the returned tree. Only present on annotated trees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
}

impl CategoryNodeDto {
    fn detached(node: &CategoryNode) -> Self {
        let category = &node.category;
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            image_url: category.image_url.clone(),
            parent_id: category.parent_id,
            created_at: category.created_at,
            updated_at: category.updated_at,
            children: Vec::new(),
            total_subcategories: node.total_subcategories,
            depth: node.depth,
        }
    }
}

impl From<CategoryNode> for CategoryNodeDto {
    /// Nodes are unlinked onto a work list in pre-order and nested again
    /// with a reverse sweep, so tree depth never becomes stack depth.
    fn from(mut root: CategoryNode) -> Self {
        let mut top = Self::detached(&root);
        let mut detached: Vec<Option<Self>> = Vec::new();
        let mut child_slots: Vec<Vec<usize>> = Vec::new();
        let mut top_slots = Vec::new();
        let mut pending: Vec<(CategoryNode, Option<usize>)> = std::mem::take(&mut root.children)
            .into_iter()
            .rev()
            .map(|child| (child, None))
            .collect();

        while let Some((mut node, parent)) = pending.pop() {
            let index = detached.len();
            detached.push(Some(Self::detached(&node)));
            child_slots.push(Vec::new());
            match parent {
                Some(parent) => child_slots[parent].push(index),
                None => top_slots.push(index),
            }
            let children = std::mem::take(&mut node.children);
            pending.extend(children.into_iter().rev().map(|child| (child, Some(index))));
        }

        // Children always sit at higher indices than their parent.
        for index in (0..detached.len()).rev() {
            let children: Vec<Self> = child_slots[index]
                .iter()
                .filter_map(|&child| detached[child].take())
                .collect();
            if let Some(dto) = detached[index].as_mut() {
                dto.children = children;
            }
        }

        top.children = top_slots
            .iter()
            .filter_map(|&child| detached[child].take())
            .collect();
        top
    }
}

impl Drop for CategoryNodeDto {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut dto) = pending.pop() {
            pending.append(&mut dto.children);
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeResponse {
    pub categories: Vec<CategoryNodeDto>,
    /// Number of root categories.
    pub total_categories: usize,
    pub max_depth: usize,
}

impl From<AnnotatedForest> for CategoryTreeResponse {
    fn from(forest: AnnotatedForest) -> Self {
        Self {
            total_categories: forest.total_categories,
            max_depth: forest.max_depth,
            categories: forest
                .categories
                .into_iter()
                .map(CategoryNodeDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LevelCountsDto {
    pub root: usize,
    pub level1: usize,
    pub level2: usize,
}

impl From<LevelCounts> for LevelCountsDto {
    fn from(counts: LevelCounts) -> Self {
        Self {
            root: counts.root,
            level1: counts.level1,
            level2: counts.level2,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlatCategoryDto {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub parent_name: Option<String>,
    pub direct_child_count: usize,
    /// 0 = root, 1 = parent is a root, 2 = anything deeper.
    pub level: u8,
    pub true_depth: Option<usize>,
}

impl From<FlatCategoryEntry> for FlatCategoryDto {
    fn from(entry: FlatCategoryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            parent_id: entry.parent_id,
            parent_name: entry.parent_name,
            direct_child_count: entry.direct_child_count,
            level: entry.level.as_number(),
            true_depth: entry.true_depth,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDebugResponse {
    pub total: usize,
    pub by_level: LevelCountsDto,
    pub categories: Vec<FlatCategoryDto>,
}

impl From<FlatDiagnostics> for CategoryDebugResponse {
    fn from(diagnostics: FlatDiagnostics) -> Self {
        Self {
            total: diagnostics.total,
            by_level: diagnostics.by_level.into(),
            categories: diagnostics
                .categories
                .into_iter()
                .map(FlatCategoryDto::from)
                .collect(),
        }
    }
}
