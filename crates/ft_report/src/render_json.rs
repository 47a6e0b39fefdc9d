//! crates/ft_report/src/render_json.rs
//! Report JSON renderer. Key order follows the struct layout of `ReportModel`.

use crate::{ReportError, ReportModel};

pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(model).map_err(|e| ReportError::Json(e.to_string()))
}
