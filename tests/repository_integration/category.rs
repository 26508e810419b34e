use crate::common::fixtures::{child, root};
use crate::common::{insert_category, TestDb};
use storefront_backend::infrastructure::repositories::{
    CategoryRepository, CategoryRepositoryImpl,
};
use uuid::Uuid;

#[tokio::test]
async fn find_by_id_returns_stored_record() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repo = CategoryRepositoryImpl::new(db.pool().clone());

    let mut clothing = root("Clothing");
    clothing.description = Some("Everything to wear".to_string());
    clothing.image_url = Some("https://cdn.example.com/clothing.png".to_string());
    insert_category(db.pool(), &clothing).await.unwrap();

    let found = repo.find_by_id(clothing.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Clothing");
    assert_eq!(found.description.as_deref(), Some("Everything to wear"));
    assert!(found.is_root());

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn find_roots_and_children_are_sorted_by_name() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repo = CategoryRepositoryImpl::new(db.pool().clone());

    let shoes = root("Shoes");
    let bags = root("Bags");
    let women = child("Women Shoes", &shoes);
    let men = child("Men Shoes", &shoes);
    for category in [&shoes, &bags, &women, &men] {
        insert_category(db.pool(), category).await.unwrap();
    }

    let roots = repo.find_roots().await.unwrap();
    let names: Vec<&str> = roots.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bags", "Shoes"]);

    let children = repo.find_children(shoes.id).await.unwrap();
    let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Men Shoes", "Women Shoes"]);

    assert!(repo.find_children(bags.id).await.unwrap().is_empty());
    assert_eq!(repo.find_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn identical_names_are_ordered_by_id() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repo = CategoryRepositoryImpl::new(db.pool().clone());

    let low = Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
    let high = Uuid::parse_str("00000000-0000-0000-0000-000000000002").unwrap();
    let mut first = root("Sale");
    first.id = high;
    let mut second = root("Sale");
    second.id = low;
    insert_category(db.pool(), &first).await.unwrap();
    insert_category(db.pool(), &second).await.unwrap();

    let ids: Vec<Uuid> = repo.find_roots().await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![low, high]);
}

#[tokio::test]
async fn find_children_of_batches_several_parents() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repo = CategoryRepositoryImpl::new(db.pool().clone());

    let clothing = root("Clothing");
    let shoes = root("Shoes");
    let men = child("Men", &clothing);
    let kids = child("Kids Shoes", &shoes);
    for category in [&clothing, &shoes, &men, &kids] {
        insert_category(db.pool(), category).await.unwrap();
    }

    let children = repo.find_children_of(&[clothing.id, shoes.id]).await.unwrap();
    let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Kids Shoes", "Men"]);

    assert!(repo.find_children_of(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_parent_cascades_to_children() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repo = CategoryRepositoryImpl::new(db.pool().clone());

    let clothing = root("Clothing");
    let men = child("Men", &clothing);
    insert_category(db.pool(), &clothing).await.unwrap();
    insert_category(db.pool(), &men).await.unwrap();

    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(clothing.id)
        .execute(db.pool())
        .await
        .unwrap();

    assert!(repo.find_by_id(men.id).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_names_are_rejected_by_the_schema() {
    let Some(db) = TestDb::new().await else {
        return;
    };

    let result = insert_category(db.pool(), &root("")).await;
    assert!(result.is_err());
}
