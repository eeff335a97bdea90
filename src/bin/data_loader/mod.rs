pub mod data_loader;
pub mod database_loader;
pub mod error;
pub mod json_loader;
pub mod recipe_book;
