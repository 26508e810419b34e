use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{CatalogConfig, TraversalStrategy};
use crate::domain::{sort_categories, Category, CategoryNode, DomainError, TreeOutcome};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::CategoryRepository;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOptions {
    pub strategy: TraversalStrategy,
    pub max_depth: Option<usize>,
}

impl From<&CatalogConfig> for TreeOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            strategy: config.strategy,
            max_depth: config.max_depth,
        }
    }
}

/// Materializes category trees from the store, breadth first.
///
/// Nodes live in an index-addressed arena while the traversal runs and are
/// only nested into `CategoryNode`s once every level has been loaded, so the
/// depth of a tree never turns into call-stack depth.
pub struct TreeBuilder<'a> {
    repo: &'a dyn CategoryRepository,
    options: TreeOptions,
}

struct Slot {
    category: Category,
    children: Vec<usize>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(repo: &'a dyn CategoryRepository, options: TreeOptions) -> Self {
        Self { repo, options }
    }

    pub async fn build_subtree(&self, root: Category) -> AppResult<TreeOutcome<CategoryNode>> {
        let root_id = root.id;
        let (mut nodes, failed_ids) = self.assemble(vec![root]).await?;
        let node = nodes.pop().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "tree builder produced no node for root {root_id}"
            ))
        })?;
        Ok(TreeOutcome::new(node, failed_ids))
    }

    /// One tree per root, in the order the roots were given.
    pub async fn build_forest(
        &self,
        roots: Vec<Category>,
    ) -> AppResult<TreeOutcome<Vec<CategoryNode>>> {
        let (nodes, failed_ids) = self.assemble(roots).await?;
        Ok(TreeOutcome::new(nodes, failed_ids))
    }

    async fn assemble(&self, roots: Vec<Category>) -> AppResult<(Vec<CategoryNode>, Vec<Uuid>)> {
        let mut arena: Vec<Slot> = Vec::with_capacity(roots.len());
        let mut seen: HashSet<Uuid> = HashSet::with_capacity(roots.len());
        let mut failed_ids = Vec::new();

        for root in roots {
            if !seen.insert(root.id) {
                return Err(DomainError::CyclicHierarchy(root.id).into());
            }
            arena.push(Slot {
                category: root,
                children: Vec::new(),
            });
        }

        let root_count = arena.len();
        let mut frontier: Vec<usize> = (0..root_count).collect();
        let mut level = 1_usize;

        while !frontier.is_empty() {
            let loaded = self.load_level(&arena, &frontier, &mut failed_ids).await;
            let mut next = Vec::new();

            for (parent, mut children) in loaded {
                if children.is_empty() {
                    continue;
                }
                if let Some(limit) = self.options.max_depth {
                    if level >= limit {
                        return Err(DomainError::DepthLimitExceeded { limit }.into());
                    }
                }

                sort_categories(&mut children);
                for child in children {
                    if !seen.insert(child.id) {
                        return Err(DomainError::CyclicHierarchy(child.id).into());
                    }
                    let index = arena.len();
                    arena.push(Slot {
                        category: child,
                        children: Vec::new(),
                    });
                    arena[parent].children.push(index);
                    next.push(index);
                }
            }

            debug!(level, nodes = frontier.len(), "category tree level loaded");
            frontier = next;
            level += 1;
        }

        Ok((materialize(arena, root_count), failed_ids))
    }

    /// Children for every slot in `frontier`. A failed fetch leaves that
    /// parent out of the result and records its id in `failed_ids`.
    async fn load_level(
        &self,
        arena: &[Slot],
        frontier: &[usize],
        failed_ids: &mut Vec<Uuid>,
    ) -> Vec<(usize, Vec<Category>)> {
        match self.options.strategy {
            TraversalStrategy::PerNode => {
                let mut loaded = Vec::with_capacity(frontier.len());
                for &index in frontier {
                    let parent_id = arena[index].category.id;
                    match self.repo.find_children(parent_id).await {
                        Ok(children) => loaded.push((index, children)),
                        Err(error) => {
                            warn!(
                                category_id = %parent_id,
                                error = %error,
                                "failed to load child categories, subtree truncated"
                            );
                            failed_ids.push(parent_id);
                        }
                    }
                }
                loaded
            }
            TraversalStrategy::PerLevel => {
                let parent_ids: Vec<Uuid> =
                    frontier.iter().map(|&i| arena[i].category.id).collect();
                match self.repo.find_children_of(&parent_ids).await {
                    Ok(children) => {
                        let mut by_parent: HashMap<Uuid, Vec<Category>> = HashMap::new();
                        for child in children {
                            if let Some(parent_id) = child.parent_id {
                                by_parent.entry(parent_id).or_default().push(child);
                            }
                        }
                        frontier
                            .iter()
                            .map(|&index| {
                                let id = arena[index].category.id;
                                (index, by_parent.remove(&id).unwrap_or_default())
                            })
                            .collect()
                    }
                    Err(error) => {
                        warn!(
                            parents = parent_ids.len(),
                            error = %error,
                            "failed to load child categories for tree level, subtrees truncated"
                        );
                        failed_ids.extend(parent_ids);
                        Vec::new()
                    }
                }
            }
        }
    }
}

/// Nests arena slots into owned nodes. Children always sit at higher
/// indices than their parent, so a reverse sweep sees every child first.
fn materialize(arena: Vec<Slot>, root_count: usize) -> Vec<CategoryNode> {
    let mut built: Vec<Option<CategoryNode>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for (index, slot) in arena.into_iter().enumerate().rev() {
        let children = slot
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(CategoryNode::new(slot.category, children));
    }

    built.into_iter().take(root_count).flatten().collect()
}
