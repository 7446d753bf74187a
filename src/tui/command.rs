//! Storage commands and the worker thread that runs them.
//!
//! The board never touches the store directly. Confirmed actions become
//! [`Command`]s, a single worker thread owns the [`TaskStore`] and executes
//! them in order, and each result comes back to the event loop as a
//! [`Completion`].

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use chrono::NaiveDate;

use crate::io::store::{StoreError, TaskStore};
use crate::model::task::{Status, Task, TaskId};

/// One unit of storage work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch every task
    Reload,
    Create { title: String, status: Status },
    UpdateTitle { id: TaskId, title: String, status: Status },
    UpdateStatus { id: TaskId, status: Status },
    UpdateDescription { id: TaskId, text: String },
    UpdateTags { id: TaskId, tags: Vec<String> },
    UpdateDue { id: TaskId, due: Option<NaiveDate> },
    Delete { id: TaskId },
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Reload => "reload",
            Command::Create { .. } => "create",
            Command::UpdateTitle { .. } => "update_title",
            Command::UpdateStatus { .. } => "update_status",
            Command::UpdateDescription { .. } => "update_description",
            Command::UpdateTags { .. } => "update_tags",
            Command::UpdateDue { .. } => "update_due",
            Command::Delete { .. } => "delete",
        }
    }
}

/// What happened to a command
#[derive(Debug)]
pub enum Outcome {
    /// Result of [`Command::Reload`]
    Loaded(Vec<Task>),
    /// A mutation succeeded
    Applied,
    Failed(StoreError),
}

/// A finished command, delivered back to the event loop
#[derive(Debug)]
pub struct Completion {
    pub command: Command,
    pub outcome: Outcome,
}

/// Run one command against the store.
pub fn execute(store: &mut dyn TaskStore, command: Command) -> Completion {
    let result = match &command {
        Command::Reload => store.get_all_tasks().map(Outcome::Loaded),
        Command::Create { title, status } => {
            store.create_task(title, *status).map(|_| Outcome::Applied)
        }
        Command::UpdateTitle { id, title, status } => store
            .update_title(*id, title, *status)
            .map(|()| Outcome::Applied),
        Command::UpdateStatus { id, status } => {
            store.update_status(*id, *status).map(|()| Outcome::Applied)
        }
        Command::UpdateDescription { id, text } => store
            .update_description(*id, text)
            .map(|()| Outcome::Applied),
        Command::UpdateTags { id, tags } => {
            store.update_tags(*id, tags).map(|()| Outcome::Applied)
        }
        Command::UpdateDue { id, due } => store.update_due(*id, *due).map(|()| Outcome::Applied),
        Command::Delete { id } => store.delete_task(*id).map(|()| Outcome::Applied),
    };

    let outcome = match result {
        Ok(outcome) => {
            tracing::debug!(command = command.name(), "command finished");
            outcome
        }
        Err(e) => {
            tracing::warn!(command = command.name(), error = %e, "command failed");
            Outcome::Failed(e)
        }
    };
    Completion { command, outcome }
}

/// Background thread that owns the store.
pub struct StorageWorker {
    commands: Option<mpsc::Sender<Command>>,
    completions: mpsc::Receiver<Completion>,
    handle: Option<JoinHandle<()>>,
}

impl StorageWorker {
    /// Move `store` onto a new thread and start accepting commands.
    pub fn spawn(mut store: Box<dyn TaskStore>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (done_tx, done_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("laneboard-storage".into())
            .spawn(move || {
                for command in cmd_rx {
                    let completion = execute(store.as_mut(), command);
                    if done_tx.send(completion).is_err() {
                        break;
                    }
                }
                tracing::debug!("storage worker exiting");
            })?;

        Ok(StorageWorker {
            commands: Some(cmd_tx),
            completions: done_rx,
            handle: Some(handle),
        })
    }

    /// Queue a command. Returns false if the worker has gone away.
    pub fn send(&self, command: Command) -> bool {
        self.commands
            .as_ref()
            .is_some_and(|tx| tx.send(command).is_ok())
    }

    /// Non-blocking poll for finished commands.
    /// Returns all queued completions (may be empty).
    pub fn poll(&self) -> Vec<Completion> {
        let mut done = Vec::new();
        while let Ok(completion) = self.completions.try_recv() {
            done.push(completion);
        }
        done
    }

    /// Stop accepting commands, let in-flight work finish, and join.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.commands.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::warn!("storage worker panicked");
        }
    }
}

impl Drop for StorageWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
