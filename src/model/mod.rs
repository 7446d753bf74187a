pub mod config;
pub mod lane;
pub mod task;

pub use config::*;
pub use lane::*;
pub use task::*;
