//! Error types shared across the viewer.
//!
//! User-input problems are [`ValidationError`]s: the UI checks for them up front
//! to disable the offending action, and the session operations return them so
//! the model invariants hold for programmatic callers too.

use thiserror::Error;

/// A rejected user edit. Never fatal; shown inline next to the control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("the name must not be empty")]
    EmptyName,
    #[error("the experiment name `{0}` is already in use")]
    DuplicateExperiment(String),
    #[error("the plot `{0}` already exists, select another name")]
    DuplicatePlot(String),
    #[error("the label `{0}` is already in use")]
    DuplicateLabel(String),
    #[error("no experiment named `{0}`")]
    UnknownExperiment(String),
    #[error("no plot named `{0}`")]
    UnknownPlot(String),
    #[error("no trace at position {0}")]
    UnknownTrace(usize),
    #[error("cycle {cycle} is out of range ({available} valid cycles)")]
    CycleOutOfRange { cycle: usize, available: usize },
    #[error("cycle {cycle} of `{experiment}` is already in the plot")]
    DuplicateCycle { experiment: String, cycle: usize },
    #[error("the electrode area must be greater than zero (got {0})")]
    InvalidArea(f64),
    #[error("invalid {axis} range: minimum {min} must be below maximum {max}")]
    InvalidRange { axis: &'static str, min: f64, max: f64 },
}

/// Failure to read a `.dta` file.
#[derive(Debug, Error)]
pub enum DtaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no CURVE tables found")]
    NoCurves,
    #[error("curve {curve}: missing column `{column}`")]
    MissingColumn { curve: usize, column: &'static str },
    #[error("curve {curve}, line {line}: cannot parse `{value}` as a number")]
    BadNumber {
        curve: usize,
        line: usize,
        value: String,
    },
}

/// Failure to save or load a session document.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed session file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a session file (format tag `{0}`)")]
    WrongFormat(String),
    #[error("unsupported session version {found} (this build reads version {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("invalid session content: {0}")]
    Invalid(#[from] ValidationError),
    #[error("invalid color `{0}`")]
    BadColor(String),
}

/// Failure to export a figure as an image or data file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("nothing to export: the plot has no traces")]
    EmptyFigure,
    #[error("unsupported export format `{0}`")]
    UnsupportedFormat(String),
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("SVG processing failed: {0}")]
    Svg(#[from] usvg::Error),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

/// Umbrella error for app-level operations.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot read data file: {0}")]
    Dta(#[from] DtaError),
    #[error("session: {0}")]
    Session(#[from] SessionError),
    #[error("export: {0}")]
    Export(#[from] ExportError),
    #[error("config: {0}")]
    Config(String),
}
