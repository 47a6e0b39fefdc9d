//! crates/ft_report/src/render_csv.rs
//! Sheet → CSV bytes. Every field is quoted only when needed; `\n` line ends.

use crate::{ReportError, Sheet};

pub fn sheet_to_csv(sheet: &Sheet) -> Result<Vec<u8>, ReportError> {
    let mut w = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    w.write_record(&sheet.header).map_err(|e| ReportError::Csv(e.to_string()))?;
    for row in &sheet.rows {
        w.write_record(row).map_err(|e| ReportError::Csv(e.to_string()))?;
    }
    w.into_inner().map_err(|e| ReportError::Csv(e.to_string()))
}
