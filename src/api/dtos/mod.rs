pub mod category_dto;
pub mod common;

pub use category_dto::{
    CategoryDebugResponse, CategoryNodeDto, CategoryTreeResponse, FlatCategoryDto,
    LevelCountsDto,
};
pub use common::ErrorResponse;
