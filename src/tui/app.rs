use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDate};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::store::{SqliteStore, TaskStore};
use crate::model::{Config, Lane, Status, Task, TaskId, empty_lanes, partition};
use crate::ops::search::Query;

use super::command::{Command, Completion, Outcome, StorageWorker};
use super::input;
use super::render;
use super::theme::Theme;

/// Tasks shown per lane at once
pub const SCROLL_WINDOW: usize = 10;

/// Upper bound on how long the loop waits for input
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const TICK_RATE: Duration = Duration::from_secs(1);

/// Current interaction mode. Every mode other than `Board` returns to
/// `Board` on confirm or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Board,
    AddTask,
    EditTask,
    EditDescription,
    EditTags,
    EditDue,
    ConfirmDelete,
    Search,
    Help,
}

impl Mode {
    /// Modes that edit `edit_buffer`
    pub fn is_task_edit(self) -> bool {
        matches!(
            self,
            Mode::AddTask
                | Mode::EditTask
                | Mode::EditDescription
                | Mode::EditTags
                | Mode::EditDue
        )
    }
}

/// The task an edit mode was entered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTarget {
    pub id: TaskId,
    pub status: Status,
}

/// Everything the event loop feeds into the board
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick(DateTime<Local>),
    Completed(Completion),
}

/// Board view model
pub struct App {
    pub lanes: [Lane; 3],
    /// Active lane index
    pub lane_cursor: usize,
    /// Selection within the active lane's filtered view
    pub task_cursor: usize,
    /// First visible row, per lane
    pub scroll_offsets: [usize; 3],
    pub mode: Mode,
    pub edit_buffer: String,
    /// Byte offset into whichever buffer the current mode edits
    pub edit_cursor: usize,
    pub edit_target: Option<EditTarget>,
    pub search_input: String,
    /// Active filter, lower-cased
    pub filter: Option<String>,
    query: Query,
    pub pending_delete: Option<TaskId>,
    /// Re-select this task once a reload shows it in the active lane
    pub follow_id: Option<TaskId>,
    /// Status updates sent but not yet completed
    moves_in_flight: usize,
    pub last_error: Option<String>,
    pub clock: DateTime<Local>,
    pub show_clock: bool,
    pub should_quit: bool,
    pub theme: Theme,
    outbox: Vec<Command>,
}

impl App {
    pub fn new(theme: Theme, clock: DateTime<Local>) -> Self {
        App {
            lanes: empty_lanes(),
            lane_cursor: 0,
            task_cursor: 0,
            scroll_offsets: [0; 3],
            mode: Mode::Board,
            edit_buffer: String::new(),
            edit_cursor: 0,
            edit_target: None,
            search_input: String::new(),
            filter: None,
            query: Query::All,
            pending_delete: None,
            follow_id: None,
            moves_in_flight: 0,
            last_error: None,
            clock,
            show_clock: true,
            should_quit: false,
            theme,
            outbox: Vec::new(),
        }
    }

    pub fn from_config(config: &Config, clock: DateTime<Local>) -> Self {
        let mut app = App::new(Theme::from_config(&config.ui), clock);
        app.show_clock = config.ui.show_clock;
        app
    }

    /// Local calendar date used by `due:` filters
    pub fn today(&self) -> NaiveDate {
        self.clock.date_naive()
    }

    pub fn active_status(&self) -> Status {
        self.lanes[self.lane_cursor].status
    }

    /// Tasks of `lane` that pass the active filter, in display order
    pub fn visible_tasks(&self, lane: usize) -> Vec<&Task> {
        let today = self.today();
        self.lanes[lane]
            .tasks
            .iter()
            .filter(|t| self.query.matches(t, today))
            .collect()
    }

    fn visible_len(&self, lane: usize) -> usize {
        let today = self.today();
        self.lanes[lane]
            .tasks
            .iter()
            .filter(|t| self.query.matches(t, today))
            .count()
    }

    /// The task under the cursor, if the active lane's view is non-empty
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks(self.lane_cursor)
            .get(self.task_cursor)
            .copied()
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.tasks.iter())
            .find(|t| t.id == id)
    }

    /// Case-insensitive regex for highlighting the filter in titles. While
    /// searching, the query being typed is used instead.
    pub fn search_regex(&self) -> Option<Regex> {
        let typed;
        let query = if self.mode == Mode::Search {
            typed = Query::parse(&self.search_input);
            &typed
        } else {
            &self.query
        };
        let needle = query.title_needle()?;
        Regex::new(&format!("(?i){}", regex::escape(needle))).ok()
    }

    // ── Lane organization ────────────────────────────────────────────

    /// Replace the board contents with a fresh task list.
    ///
    /// A pending follow id is looked up in the active lane's filtered view.
    /// It is consumed when found, or when no status update is still in
    /// flight; a snapshot taken before the move cannot contain it. Then the
    /// selection is clamped.
    pub fn organize(&mut self, tasks: Vec<Task>) {
        self.lanes = partition(tasks);

        if let Some(id) = self.follow_id {
            let found = self
                .visible_tasks(self.lane_cursor)
                .iter()
                .position(|t| t.id == id);
            if let Some(pos) = found {
                self.task_cursor = pos;
            }
            if found.is_some() || self.moves_in_flight == 0 {
                self.follow_id = None;
            }
        }
        self.clamp_selection();

        for lane in 0..self.lanes.len() {
            if lane != self.lane_cursor && self.scroll_offsets[lane] >= self.visible_len(lane) {
                self.scroll_offsets[lane] = 0;
            }
        }
    }

    /// Clamp the cursor into the active lane's filtered view and fix the
    /// scroll window around it.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len(self.lane_cursor);
        self.task_cursor = self.task_cursor.min(len.saturating_sub(1));
        self.ensure_visible();
    }

    /// Keep `offset <= selection < offset + SCROLL_WINDOW` for the active lane.
    pub fn ensure_visible(&mut self) {
        let lane = self.lane_cursor;
        if self.visible_len(lane) == 0 {
            self.scroll_offsets[lane] = 0;
            return;
        }
        self.scroll_offsets[lane] =
            scroll_into_view(self.scroll_offsets[lane], self.task_cursor, SCROLL_WINDOW);
    }

    /// Switch to `lane` (clamped), selecting its first task. Other lanes keep
    /// their scroll offsets.
    pub fn select_lane(&mut self, lane: usize) {
        let lane = lane.min(self.lanes.len() - 1);
        if lane == self.lane_cursor {
            return;
        }
        self.lane_cursor = lane;
        self.task_cursor = 0;
        self.ensure_visible();
    }

    /// Move the task cursor by `delta`, clamped to the filtered view.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible_len(self.lane_cursor);
        if len == 0 {
            return;
        }
        self.task_cursor = self.task_cursor.saturating_add_signed(delta).min(len - 1);
        self.ensure_visible();
    }

    /// Set or clear the active filter. Selection restarts at the top of the
    /// active lane and every scroll window resets.
    pub fn set_filter(&mut self, raw: Option<&str>) {
        let filter = raw
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        self.query = filter.as_deref().map_or(Query::All, Query::parse);
        self.filter = filter;
        self.task_cursor = 0;
        self.scroll_offsets = [0; 3];
    }

    // ── Modes ────────────────────────────────────────────────────────

    /// Enter a task edit mode with `seed` in the buffer and the cursor at its end
    pub fn begin_edit(&mut self, mode: Mode, seed: String, target: Option<EditTarget>) {
        self.mode = mode;
        self.edit_cursor = seed.len();
        self.edit_buffer = seed;
        self.edit_target = target;
    }

    /// Drop all transient edit state and go back to the board
    pub fn return_to_board(&mut self) {
        self.mode = Mode::Board;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.edit_target = None;
        self.search_input.clear();
        self.pending_delete = None;
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Queue a storage command for the event loop to hand to the worker
    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!(command = command.name(), "dispatch");
        self.outbox.push(command);
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    /// Send `id` to `status`, switching to the destination lane now and
    /// re-finding the task when a reload after the update arrives.
    pub fn move_task(&mut self, id: TaskId, status: Status) {
        self.lane_cursor = status.lane_index();
        self.task_cursor = 0;
        self.ensure_visible();
        self.follow_id = Some(id);
        self.moves_in_flight += 1;
        self.dispatch(Command::UpdateStatus { id, status });
    }

    /// Fold a finished storage command into the board.
    pub fn apply_completion(&mut self, completion: Completion) {
        if matches!(completion.command, Command::UpdateStatus { .. }) {
            self.moves_in_flight = self.moves_in_flight.saturating_sub(1);
        }
        match completion.outcome {
            Outcome::Loaded(tasks) => self.organize(tasks),
            Outcome::Applied => {
                self.last_error = None;
                self.dispatch(Command::Reload);
            }
            Outcome::Failed(err) => {
                if matches!(completion.command, Command::UpdateStatus { .. }) {
                    self.follow_id = None;
                }
                let reconcile = err.is_not_found();
                self.last_error = Some(err.to_string());
                if reconcile {
                    self.dispatch(Command::Reload);
                }
            }
        }
    }

    /// Advance the clock. A new calendar day can change `due:` filters.
    pub fn tick(&mut self, now: DateTime<Local>) {
        let day_changed = now.date_naive() != self.today();
        self.clock = now;
        if day_changed {
            self.clamp_selection();
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => input::handle_key(self, key),
            AppEvent::Tick(now) => self.tick(now),
            AppEvent::Completed(completion) => self.apply_completion(completion),
        }
    }
}

/// New scroll offset so that `selection` lies inside a window of `window`
/// rows starting at the returned offset.
pub fn scroll_into_view(offset: usize, selection: usize, window: usize) -> usize {
    if selection < offset {
        selection
    } else if selection >= offset + window {
        selection + 1 - window
    } else {
        offset
    }
}

/// Run the TUI application
pub fn run(db_path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(db_path)?;
    let tasks = store.get_all_tasks()?;
    tracing::info!(db = %db_path.display(), tasks = tasks.len(), "board starting");

    let mut app = App::from_config(config, Local::now());
    app.organize(tasks);

    let worker = StorageWorker::spawn(Box::new(store))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    worker.shutdown();
    tracing::info!("board stopped");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &StorageWorker,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let timeout = TICK_RATE
            .saturating_sub(last_tick.elapsed())
            .min(POLL_INTERVAL);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_event(AppEvent::Key(key));
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.handle_event(AppEvent::Tick(Local::now()));
            last_tick = Instant::now();
        }

        for completion in worker.poll() {
            app.handle_event(AppEvent::Completed(completion));
        }
        for command in app.take_commands() {
            if !worker.send(command) {
                return Err("storage worker stopped".into());
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
