pub mod category;
pub mod category_diagnostics;
pub mod category_tree;
pub mod errors;

pub use category::{sort_categories, Category};
pub use category_diagnostics::{
    flatten, FlatCategoryEntry, FlatDiagnostics, HierarchyLevel, LevelCounts,
};
pub use category_tree::{
    annotate, annotate_forest, forest_max_depth, max_depth, AnnotatedForest, CategoryNode,
    TreeOutcome,
};
pub use errors::DomainError;
