use std::cmp::Reverse;

use super::task::{Status, Task};

/// A board column: every task whose status equals `status`, newest first.
///
/// Lanes are derived from the full task list on every reload and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub status: Status,
    pub tasks: Vec<Task>,
}

impl Lane {
    pub fn new(status: Status) -> Self {
        Lane {
            status,
            tasks: Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// The three fixed lanes, in board order, all empty
pub fn empty_lanes() -> [Lane; 3] {
    Status::ALL.map(Lane::new)
}

/// Split the full task list into lanes. Each task lands in exactly the lane
/// bound to its status, ordered by creation time descending (id descending
/// on ties).
pub fn partition(mut tasks: Vec<Task>) -> [Lane; 3] {
    tasks.sort_by_key(|t| Reverse((t.created_at, t.id)));
    let mut lanes = empty_lanes();
    for task in tasks {
        lanes[task.status.lane_index()].tasks.push(task);
    }
    lanes
}
