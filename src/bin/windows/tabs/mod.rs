pub mod recipe_tabs;
