//! Interactive viewer for cyclic-voltammetry measurements.
//!
//! Experiments are loaded from Gamry `.DTA` files, their cycles are arranged
//! into named plots with per-trace styling and per-plot unit transforms, and
//! the whole analysis can be saved to and restored from a JSON session file.
//!
//! The state model ([`data`]) and file formats ([`persistence`],
//! [`data::export`]) are independent of the GUI ([`app`], [`panels`]).

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod panels;
pub mod persistence;
pub mod plot;

pub use app::{run_viewer, ViewerApp};
pub use color_scheme::{ColorScheme, Palette};
pub use config::ViewerConfig;
pub use data::experiment::{Experiment, ExperimentRegistry};
pub use data::figure::{render, Figure};
pub use data::plot::{AxisRange, Plot, PlotSettings};
pub use data::session::{Session, SessionCommand, SessionContents};
pub use data::trace::{LineStyle, Trace, TraceEdit, TraceSource};
pub use error::{DtaError, ExportError, SessionError, ValidationError, ViewerError};
