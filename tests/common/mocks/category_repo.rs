#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use storefront_backend::domain::{sort_categories, Category};
use storefront_backend::error::{AppError, AppResult};
use storefront_backend::infrastructure::repositories::CategoryRepository;
use uuid::Uuid;

/// In-memory category store with switchable failures.
#[derive(Default)]
pub struct MockCategoryRepo {
    pub categories: Mutex<Vec<Category>>,
    /// `find_children` fails for these parents.
    pub failing_parents: Mutex<HashSet<Uuid>>,
    /// Every read fails while set.
    pub unavailable: Mutex<bool>,
    pub children_calls: AtomicUsize,
}

impl MockCategoryRepo {
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
            ..Self::default()
        }
    }

    pub fn fail_children_of(&self, parent_id: Uuid) {
        self.failing_parents
            .lock()
            .expect("failing parents mutex poisoned")
            .insert(parent_id);
    }

    pub fn set_unavailable(&self) {
        *self.unavailable.lock().expect("unavailable mutex poisoned") = true;
    }

    pub fn children_calls(&self) -> usize {
        self.children_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> AppResult<()> {
        if *self.unavailable.lock().expect("unavailable mutex poisoned") {
            return Err(AppError::StoreUnavailable(
                "category store offline".to_string(),
            ));
        }
        Ok(())
    }

    fn sorted(&self, keep: impl Fn(&Category) -> bool) -> Vec<Category> {
        let mut rows: Vec<Category> = self
            .categories
            .lock()
            .expect("categories mutex poisoned")
            .iter()
            .filter(|&c| keep(c))
            .cloned()
            .collect();
        sort_categories(&mut rows);
        rows
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        self.check_available()?;
        Ok(self
            .categories
            .lock()
            .expect("categories mutex poisoned")
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Category>> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self
            .failing_parents
            .lock()
            .expect("failing parents mutex poisoned")
            .contains(&parent_id)
        {
            return Err(AppError::StoreUnavailable(format!(
                "children of {parent_id} unavailable"
            )));
        }
        Ok(self.sorted(|c| c.parent_id == Some(parent_id)))
    }

    async fn find_roots(&self) -> AppResult<Vec<Category>> {
        self.check_available()?;
        Ok(self.sorted(Category::is_root))
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        self.check_available()?;
        Ok(self.sorted(|_| true))
    }
}
