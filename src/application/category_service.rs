use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::application::category::{TreeBuilder, TreeOptions};
use crate::domain::{
    flatten, sort_categories, AnnotatedForest, CategoryNode, FlatDiagnostics, TreeOutcome,
};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::CategoryRepository;

/// Read projections over the category hierarchy.
///
/// Every call builds its own tree from fresh store reads; nothing is cached
/// or shared between calls.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepository>,
    tree_options: TreeOptions,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self {
            category_repo,
            tree_options: TreeOptions::default(),
        }
    }

    pub fn with_tree_options(mut self, tree_options: TreeOptions) -> Self {
        self.tree_options = tree_options;
        self
    }

    fn builder(&self) -> TreeBuilder<'_> {
        TreeBuilder::new(self.category_repo.as_ref(), self.tree_options)
    }

    /// The category `id` with its full, unannotated descendant tree.
    pub async fn get_node_with_descendants(
        &self,
        id: Uuid,
    ) -> AppResult<TreeOutcome<CategoryNode>> {
        let category = self
            .category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::category_not_found)?;

        let outcome = self.builder().build_subtree(category).await?;
        log_partial("node", outcome.failed_ids());
        Ok(outcome)
    }

    /// Every root with its full, unannotated descendant tree.
    pub async fn get_full_forest(&self) -> AppResult<TreeOutcome<Vec<CategoryNode>>> {
        let mut roots = self.category_repo.find_roots().await?;
        sort_categories(&mut roots);

        let outcome = self.builder().build_forest(roots).await?;
        log_partial("forest", outcome.failed_ids());
        Ok(outcome)
    }

    pub async fn get_annotated_forest(&self) -> AppResult<TreeOutcome<AnnotatedForest>> {
        let outcome = self.get_full_forest().await?.map(AnnotatedForest::from_roots);

        let forest = outcome.value();
        info!(
            roots = forest.total_categories,
            max_depth = forest.max_depth,
            partial = outcome.is_partial(),
            "annotated category forest built"
        );
        Ok(outcome)
    }

    pub async fn get_flat_diagnostics(&self) -> AppResult<FlatDiagnostics> {
        let categories = self.category_repo.find_all().await?;
        let diagnostics = flatten(&categories);

        info!(
            total = diagnostics.total,
            root = diagnostics.by_level.root,
            level1 = diagnostics.by_level.level1,
            level2 = diagnostics.by_level.level2,
            "category diagnostics computed"
        );
        Ok(diagnostics)
    }
}

fn log_partial(projection: &'static str, failed_ids: &[Uuid]) {
    if !failed_ids.is_empty() {
        warn!(
            projection,
            truncated_nodes = failed_ids.len(),
            "category tree served with truncated subtrees"
        );
    }
}
