use crate::domain::Category;
use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to the category table.
///
/// Every listing is returned sorted by name, then id.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;
    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Category>>;
    async fn find_roots(&self) -> AppResult<Vec<Category>>;
    async fn find_all(&self) -> AppResult<Vec<Category>>;

    /// Children of several parents in one call. The default issues one
    /// `find_children` per parent and fails if any of them fails.
    async fn find_children_of(&self, parent_ids: &[Uuid]) -> AppResult<Vec<Category>> {
        let mut children = Vec::new();
        for parent_id in parent_ids {
            children.extend(self.find_children(*parent_id).await?);
        }
        Ok(children)
    }
}
