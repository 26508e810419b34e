pub mod category;
mod category_service;

pub use category::{TreeBuilder, TreeOptions};
pub use category_service::CategoryService;
