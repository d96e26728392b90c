//! Application state management for Rollcall.
//!
//! This module contains the core `App` struct that owns all UI state: the
//! fetched roster, the current layout, the selection store, persisted
//! display options and coordination of the background fetch/submit tasks.

use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use rollcall_core::config::Config;
use rollcall_core::layout::RosterLayout;
use rollcall_core::models::{DisplayOptions, GroupAssignment, RosterEntry, SubmitOutcome};
use rollcall_core::prefs::{self, FileStore, KeyValueStore, MemoryStore};
use rollcall_core::{ApiClient, ApiError, SelectionStore, SubmitRequest};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// At most one load and one submit are in flight at a time.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Number of rows to move on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Roster fetch state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<RosterEntry>),
    /// Message shown in place of the roster.
    Failed(String),
}

/// Status line message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Cursor movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned request tasks.
#[derive(Debug)]
enum TaskResult {
    Roster(Result<Vec<RosterEntry>, ApiError>),
    Submit(Result<SubmitOutcome, ApiError>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    pub config: Config,
    api: Option<ApiClient>,
    prefs: Box<dyn KeyValueStore>,

    // UI State
    pub state: AppState,
    pub options: DisplayOptions,
    pub load_state: LoadState,
    pub selection: SelectionStore,
    pub selected_group: GroupAssignment,
    pub layout: RosterLayout,
    pub last_col_count: Option<usize>,
    pub cursor_col: usize,
    pub cursor_row: usize,
    pub width: u16,
    pending_resize: Option<Instant>,

    // In-flight guards
    load_in_flight: bool,
    pub submitting: bool,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,

    pub status: Option<StatusMessage>,
}

/// Open the on-disk preference store, falling back to memory.
pub fn open_prefs_store() -> Box<dyn KeyValueStore> {
    match Config::prefs_path() {
        Ok(path) => Box::new(FileStore::new(path)),
        Err(e) => {
            warn!(error = %e, "No preferences location, options will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

impl App {
    /// Create a new application instance for a terminal `width` cells wide.
    pub fn new(config: Config, prefs: Box<dyn KeyValueStore>, width: u16) -> Self {
        let options = prefs::load_options(prefs.as_ref());
        debug!(?options, "Display options loaded");

        let (api, load_state) = match config.endpoint() {
            Ok(endpoint) => match ApiClient::new(endpoint, config.request_timeout()) {
                Ok(api) => (Some(api), LoadState::Loading),
                Err(e) => {
                    error!(error = %e, "Failed to create API client");
                    (None, LoadState::Failed(format!("Error loading students: {}", e)))
                }
            },
            Err(e) => {
                warn!(error = %e, "No endpoint configured");
                (None, LoadState::Failed(format!("Configuration error: {}.", e)))
            }
        };

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            api,
            prefs,

            state: AppState::Normal,
            options,
            load_state,
            selection: SelectionStore::new(),
            selected_group: GroupAssignment::Unchanged,
            layout: RosterLayout::default(),
            last_col_count: None,
            cursor_col: 0,
            cursor_row: 0,
            width,
            pending_resize: None,

            load_in_flight: false,
            submitting: false,

            task_rx: rx,
            task_tx: tx,

            status: None,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Spawn the roster fetch. Ignored while a fetch is already running.
    pub fn start_load(&mut self) {
        if self.load_in_flight {
            debug!("Roster fetch already in flight");
            return;
        }
        let Some(api) = self.api.clone() else {
            return;
        };

        info!(endpoint = %api.endpoint(), "Loading roster");
        self.load_in_flight = true;
        self.load_state = LoadState::Loading;

        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_roster().await;
            Self::send_result(&tx, TaskResult::Roster(result)).await;
        });
    }

    /// Explicit user reload; selection is kept.
    pub fn reload(&mut self) {
        if self.api.is_none() {
            self.status = Some(StatusMessage::error("No endpoint configured"));
            return;
        }
        if self.load_in_flight {
            self.status = Some(StatusMessage::info("Already loading…"));
            return;
        }
        self.selection.capture(self.layout.check_states());
        self.status = None;
        self.start_load();
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.load_state, LoadState::Loaded(_))
    }

    // =========================================================================
    // Background Tasks
    // =========================================================================

    /// Helper to send task results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send task result - channel closed");
        }
    }

    /// Drain and apply every finished background task.
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_task_result(result);
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Roster(Ok(rows)) => {
                self.load_in_flight = false;
                self.load_state = LoadState::Loaded(rows);
                self.rerender();
            }
            TaskResult::Roster(Err(e)) => {
                self.load_in_flight = false;
                error!(error = %e, "Failed to load roster");
                self.load_state = LoadState::Failed(format!("Error loading students: {}", e));
                self.layout = RosterLayout::default();
            }
            TaskResult::Submit(Ok(outcome)) => {
                self.submitting = false;
                self.selection.clear();
                self.layout.clear_checks();
                self.status = Some(StatusMessage::info(outcome.status_message()));
            }
            TaskResult::Submit(Err(e)) => {
                self.submitting = false;
                error!(error = %e, network = e.is_network(), "Submit failed");
                let text = if e.is_network() {
                    format!("Error: {}. Checks kept, press Enter to retry.", e)
                } else {
                    format!("Error: {}", e)
                };
                self.status = Some(StatusMessage::error(text));
            }
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Recompute the layout for the current options and width, keeping
    /// checks made since the last render.
    pub fn rerender(&mut self) {
        let LoadState::Loaded(ref rows) = self.load_state else {
            return;
        };

        self.selection.capture(self.layout.check_states());

        let col_count = self.config.column_count_for_width(self.width);
        self.layout = RosterLayout::compute(rows, &self.options, col_count, &self.selection);
        self.last_col_count = Some(col_count);
        self.clamp_cursor();

        debug!(
            columns = col_count,
            rows = self.layout.total_rows(),
            selected = self.selection.len(),
            "Layout recomputed"
        );
    }

    /// Record a terminal resize; the layout is recomputed once resizes settle.
    pub fn note_resize(&mut self, width: u16, now: Instant) {
        self.width = width;
        self.pending_resize = Some(now);
    }

    /// Apply a settled resize. Returns true if the layout was recomputed.
    pub fn apply_pending_resize(&mut self, now: Instant) -> bool {
        let Some(at) = self.pending_resize else {
            return false;
        };
        if now.saturating_duration_since(at) < self.config.resize_debounce() {
            return false;
        }
        self.pending_resize = None;

        let col_count = self.config.column_count_for_width(self.width);
        if self.is_loaded() && self.last_col_count != Some(col_count) {
            self.rerender();
            return true;
        }
        false
    }

    // =========================================================================
    // Options
    // =========================================================================

    fn options_changed(&mut self) {
        prefs::save_options(self.prefs.as_ref(), &self.options);
        self.rerender();
    }

    pub fn toggle_sort_mode(&mut self) {
        self.options.sort_mode = self.options.sort_mode.toggle();
        self.options_changed();
    }

    pub fn toggle_group_by_mode(&mut self) {
        self.options.group_by_mode = self.options.group_by_mode.toggle();
        self.options_changed();
    }

    pub fn toggle_theme(&mut self) {
        self.options.dark_mode = !self.options.dark_mode;
        prefs::save_options(self.prefs.as_ref(), &self.options);
    }

    pub fn select_group(&mut self, group: GroupAssignment) {
        self.selected_group = group;
    }

    // =========================================================================
    // Cursor and Selection
    // =========================================================================

    fn clamp_cursor(&mut self) {
        let columns = self.layout.column_count();
        if columns == 0 {
            self.cursor_col = 0;
            self.cursor_row = 0;
            return;
        }
        self.cursor_col = self.cursor_col.min(columns - 1);
        // Skip to a column that has rows, searching left first.
        if self.layout.column_len(self.cursor_col) == 0 {
            if let Some(col) = (0..columns).rev().find(|&c| self.layout.column_len(c) > 0) {
                self.cursor_col = col;
            }
        }
        let len = self.layout.column_len(self.cursor_col);
        self.cursor_row = self.cursor_row.min(len.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, direction: Move) {
        let len = self.layout.column_len(self.cursor_col);
        match direction {
            Move::Up => self.cursor_row = self.cursor_row.saturating_sub(1),
            Move::Down => {
                if self.cursor_row + 1 < len {
                    self.cursor_row += 1;
                }
            }
            Move::PageUp => self.cursor_row = self.cursor_row.saturating_sub(PAGE_SCROLL_SIZE),
            Move::PageDown => {
                self.cursor_row = (self.cursor_row + PAGE_SCROLL_SIZE).min(len.saturating_sub(1))
            }
            Move::Top => self.cursor_row = 0,
            Move::Bottom => self.cursor_row = len.saturating_sub(1),
            Move::Left => {
                if let Some(col) = (0..self.cursor_col).rev().find(|&c| self.layout.column_len(c) > 0) {
                    self.cursor_col = col;
                }
            }
            Move::Right => {
                let columns = self.layout.column_count();
                if let Some(col) = (self.cursor_col + 1..columns).find(|&c| self.layout.column_len(c) > 0) {
                    self.cursor_col = col;
                }
            }
        }
        self.clamp_cursor();
    }

    /// Flip the checkbox under the cursor.
    pub fn toggle_current(&mut self) {
        // The old layout stays in memory while a reload runs but is not drawn.
        if !self.is_loaded() {
            return;
        }
        let Some(row) = self.layout.row(self.cursor_col, self.cursor_row) else {
            return;
        };
        let name = row.raw_name.clone();
        let checked = !row.checked;

        // Rows sharing a raw name share one selection entry.
        for col in 0..self.layout.column_count() {
            for idx in 0..self.layout.column_len(col) {
                if let Some(r) = self.layout.row_mut(col, idx) {
                    if r.raw_name == name {
                        r.checked = checked;
                    }
                }
            }
        }
        self.selection.toggle(&name, checked);
    }

    pub fn selected_count(&self) -> usize {
        self.layout.check_states().filter(|(_, checked)| *checked).count()
    }

    // =========================================================================
    // Submit
    // =========================================================================

    /// Submit the checked names. Only one submit may be in flight.
    pub fn start_submit(&mut self) {
        if self.submitting {
            self.status = Some(StatusMessage::info("Submitting…"));
            return;
        }
        if !self.is_loaded() {
            self.status = Some(StatusMessage::info("Wait for the roster to finish loading."));
            return;
        }

        self.selection.capture(self.layout.check_states());
        let request = match SubmitRequest::new(self.selection.names(), self.selected_group) {
            Ok(request) => request,
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
                return;
            }
        };

        let Some(api) = self.api.clone() else {
            self.status = Some(StatusMessage::error("Error: no endpoint configured"));
            return;
        };

        info!(count = request.names.len(), group = %request.group.form_value(), "Submitting selection");
        self.submitting = true;
        self.status = Some(StatusMessage::info("Submitting…"));

        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.submit(&request).await;
            Self::send_result(&tx, TaskResult::Submit(result)).await;
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
