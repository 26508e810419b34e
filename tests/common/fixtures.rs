#![allow(dead_code)]

use chrono::{Duration, Utc};
use storefront_backend::domain::Category;
use uuid::Uuid;

pub fn root(name: &str) -> Category {
    let created_at = Utc::now() - Duration::days(1);
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        image_url: None,
        parent_id: None,
        created_at,
        updated_at: created_at,
    }
}

pub fn child(name: &str, parent: &Category) -> Category {
    Category {
        parent_id: Some(parent.id),
        ..root(name)
    }
}

/// Clothing -> Men -> Shirts
pub fn clothing_chain() -> Vec<Category> {
    let clothing = root("Clothing");
    let men = child("Men", &clothing);
    let shirts = child("Shirts", &men);
    vec![clothing, men, shirts]
}

/// Shoes with two leaf children.
pub fn shoes_family() -> Vec<Category> {
    let shoes = root("Shoes");
    let men = child("Men Shoes", &shoes);
    let women = child("Women Shoes", &shoes);
    vec![shoes, men, women]
}
