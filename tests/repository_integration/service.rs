use std::sync::Arc;

use crate::common::fixtures::{child, root};
use crate::common::{insert_category, TestDb};
use storefront_backend::application::{CategoryService, TreeOptions};
use storefront_backend::config::TraversalStrategy;
use storefront_backend::infrastructure::repositories::CategoryRepositoryImpl;

#[tokio::test]
async fn projections_over_postgres_agree_across_strategies() {
    let Some(db) = TestDb::new().await else {
        return;
    };

    let clothing = root("Clothing");
    let men = child("Men", &clothing);
    let shirts = child("Shirts", &men);
    let shoes = root("Shoes");
    for category in [&clothing, &men, &shirts, &shoes] {
        insert_category(db.pool(), category).await.unwrap();
    }

    let repo = Arc::new(CategoryRepositoryImpl::new(db.pool().clone()));
    let per_node = CategoryService::new(repo.clone());
    let per_level = CategoryService::new(repo).with_tree_options(TreeOptions {
        strategy: TraversalStrategy::PerLevel,
        max_depth: None,
    });

    let forest = per_node.get_annotated_forest().await.unwrap();
    assert!(!forest.is_partial());
    let forest = forest.into_value();
    assert_eq!(forest.total_categories, 2);
    assert_eq!(forest.max_depth, 3);
    assert_eq!(forest.categories[0].total_subcategories, Some(2));

    let batched = per_level.get_annotated_forest().await.unwrap().into_value();
    assert_eq!(batched, forest);

    let node = per_node
        .get_node_with_descendants(men.id)
        .await
        .unwrap()
        .into_value();
    assert_eq!(node.children[0].category.name, "Shirts");

    let diagnostics = per_node.get_flat_diagnostics().await.unwrap();
    assert_eq!(diagnostics.total, 4);
    assert_eq!(diagnostics.by_level.root, 2);
    assert_eq!(diagnostics.by_level.level1, 1);
    assert_eq!(diagnostics.by_level.level2, 1);
}
