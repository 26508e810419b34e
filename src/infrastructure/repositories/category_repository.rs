use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::Category;
use crate::error::AppResult;

use super::traits::CategoryRepository;

const CATEGORY_COLUMNS: &str =
    "id, name, description, image_url, parent_id, created_at, updated_at";

pub struct CategoryRepositoryImpl {
    pool: PgPool,
}

impl CategoryRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Category>> {
        let children = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id = $1 ORDER BY name ASC, id ASC"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(children)
    }

    async fn find_roots(&self) -> AppResult<Vec<Category>> {
        let roots = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id IS NULL ORDER BY name ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(roots)
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn find_children_of(&self, parent_ids: &[Uuid]) -> AppResult<Vec<Category>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let children = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id = ANY($1) ORDER BY name ASC, id ASC"
        ))
        .bind(parent_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(children)
    }
}
