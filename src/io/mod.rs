pub mod config_io;
pub mod logging;
pub mod paths;
pub mod schema;
pub mod store;
