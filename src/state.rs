use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::loader::{LoadError, load_file};
use crate::data::model::Dataset;
use crate::data::selection::{ClickKind, Selection};
use crate::data::summary::{GroupColumns, SelectionSummary, SummaryError, summarize};

/// Failures surfaced to the user. None of them end the session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No data loaded!")]
    NoDataLoaded,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

// ---------------------------------------------------------------------------
// Workspace: a dataset together with the selection made on it
// ---------------------------------------------------------------------------

/// A loaded dataset and the row selection that belongs to it.
///
/// The selection lives inside the workspace, so replacing the dataset
/// replaces the selection with it. `generation` identifies the load; UI
/// events tagged with an older generation are discarded.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub generation: u64,
    pub source: Option<PathBuf>,
    dataset: Dataset,
    selection: Selection,
}

impl Workspace {
    pub fn new(generation: u64, dataset: Dataset, source: Option<PathBuf>) -> Self {
        let selection = Selection::new(dataset.row_count());
        Self {
            generation,
            source,
            dataset,
            selection,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// A click on a table row, tagged with the workspace it was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub generation: u64,
    pub row: usize,
    pub kind: ClickKind,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset and its selection (None until user loads a file).
    pub workspace: Option<Workspace>,

    /// Columns averaged over the selection.
    pub groups: GroupColumns,

    /// Last computed summary, kept for the chart tab.
    pub summary: Option<SelectionSummary>,

    /// Contents of the read-only results area.
    pub results_text: String,

    /// Status bar line.
    pub status_text: String,

    /// Error notice waiting to be acknowledged in a modal.
    pub error_message: Option<String>,

    next_generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            workspace: None,
            groups: GroupColumns::default(),
            summary: None,
            results_text: String::new(),
            status_text: String::new(),
            error_message: None,
            next_generation: 1,
        }
    }
}

impl AppState {
    /// Generation of the current workspace, if any.
    pub fn generation(&self) -> Option<u64> {
        self.workspace.as_ref().map(|ws| ws.generation)
    }

    /// Replace the current dataset with the contents of `path`.
    ///
    /// On failure the previous workspace is left untouched.
    pub fn import(&mut self, path: &Path) -> Result<(), AppError> {
        log::info!("Reading {} ...", path.display());
        let dataset = load_file(path)?;
        log::info!(
            "Loaded {} rows with columns {:?}",
            dataset.row_count(),
            dataset.column_names()
        );
        self.set_dataset(dataset, Some(path.to_path_buf()));
        self.status_text = format!("Loaded: '{}'", path.display());
        Ok(())
    }

    /// Install a dataset as a fresh workspace with an empty selection.
    pub fn set_dataset(&mut self, dataset: Dataset, source: Option<PathBuf>) {
        let generation = self.next_generation;
        self.next_generation += 1;

        self.workspace = Some(Workspace::new(generation, dataset, source));
        self.summary = None;
        self.results_text.clear();
        self.status_text.clear();
    }

    /// Apply a row click from the table view and recompute the summary.
    pub fn apply_selection(&mut self, change: SelectionChange) -> Result<(), AppError> {
        let ws = self.workspace.as_mut().ok_or(AppError::NoDataLoaded)?;
        if ws.generation != change.generation {
            log::warn!(
                "Discarding selection change for stale data (generation {} vs {})",
                change.generation,
                ws.generation
            );
            return Ok(());
        }
        if ws.selection.click(change.row, change.kind) {
            log::debug!("Selection changed");
            self.refresh_summary()?;
        }
        Ok(())
    }

    /// Select every row of the current dataset.
    pub fn select_all(&mut self) -> Result<(), AppError> {
        let ws = self.workspace.as_mut().ok_or(AppError::NoDataLoaded)?;
        ws.selection.select_all();
        self.refresh_summary()
    }

    /// Empty the selection and blank the results area.
    pub fn clear_selection(&mut self) {
        if let Some(ws) = self.workspace.as_mut() {
            ws.selection.clear();
        }
        self.summary = None;
        self.results_text.clear();
        self.status_text.clear();
        log::info!("Selection Cleared");
    }

    /// Recompute the summary for the current selection and push it to the
    /// results area and status bar.
    pub fn refresh_summary(&mut self) -> Result<(), AppError> {
        let ws = self.workspace.as_ref().ok_or(AppError::NoDataLoaded)?;
        let indices = ws.selection.indices();

        self.status_text = format!("Selected Rows: {indices:?}");
        log::info!("{}", self.status_text);

        let summary = summarize(&ws.dataset, &ws.selection, &self.groups)?;
        self.results_text = summary.to_string();
        self.summary = Some(summary);
        Ok(())
    }

    /// Raise a user-visible notice for `err`.
    pub fn report(&mut self, err: AppError) {
        log::error!("{err}");
        self.error_message = Some(err.to_string());
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }
}
