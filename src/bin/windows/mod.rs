pub mod main_window;
pub mod tabs;
