pub mod search;
pub mod task_ops;
