pub mod app;
pub mod command;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
