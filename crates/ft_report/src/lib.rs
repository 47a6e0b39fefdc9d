//! ft_report — offline result tables and reports.
//!
//! - `structure`: per-stage sheets (rating, fuzzy_rating, combined, normalized,
//!   result) and the summary `ReportModel`, all numbers pre-formatted at the
//!   configured precision.
//! - Renderers: CSV for sheets, JSON and HTML for the model.
//!
//! No I/O and no recomputation: everything is read from `PipelineOutputs`.

#![deny(unsafe_code)]

use std::fmt;

pub mod render_csv;
#[cfg(feature = "render_html")]
pub mod render_html;
#[cfg(feature = "render_json")]
pub mod render_json;
pub mod structure;

pub use render_csv::sheet_to_csv;
#[cfg(feature = "render_html")]
pub use render_html::render_html;
#[cfg(feature = "render_json")]
pub use render_json::render_json;
pub use structure::{build_model, build_sheets, ReportModel, Sheet, SheetKind};

#[derive(Debug)]
pub enum ReportError {
    Template(&'static str),
    Csv(String),
    Json(String),
    /// A stage table disagrees with the result document.
    Inconsistent(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Template(m) => write!(f, "template error: {m}"),
            ReportError::Csv(m) => write!(f, "csv error: {m}"),
            ReportError::Json(m) => write!(f, "json error: {m}"),
            ReportError::Inconsistent(m) => write!(f, "inconsistent report input: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}
