//! Native application shell for the viewer.
//!
//! | Sub-module       | Responsibility |
//! | ---------------- | -------------- |
//! | [`viewer_app`]   | [`ViewerApp`]: layout, menu bar, dropped files and command dispatch |
//! | [`run`]          | Top-level [`run_viewer()`] entry point, fonts and icon loading |

mod run;
mod viewer_app;

pub use run::run_viewer;
pub use viewer_app::{read_dropped_session, ViewerApp, ViewerShared};
