//! crates/ft_report/src/structure.rs
//! Report data model + mappers from pipeline outputs.
//! No recomputation: numbers are only formatted, at a fixed precision.

use std::fmt::Display;

use serde::Serialize;

use ft_core::{CriterionId, Table, Tfn};
use ft_pipeline::{AlternativeResult, PipelineOutputs};

use crate::ReportError;

// -------------------- Sheets --------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetKind {
    Rating,
    FuzzyRating,
    Combined,
    Normalized,
    Result,
}

impl SheetKind {
    pub const ALL: [SheetKind; 5] = [
        SheetKind::Rating,
        SheetKind::FuzzyRating,
        SheetKind::Combined,
        SheetKind::Normalized,
        SheetKind::Result,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SheetKind::Rating => "rating.csv",
            SheetKind::FuzzyRating => "fuzzy_rating.csv",
            SheetKind::Combined => "combined.csv",
            SheetKind::Normalized => "normalized.csv",
            SheetKind::Result => "result.csv",
        }
    }
}

/// One stage table as text cells; `rows[i].len() == header.len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub kind: SheetKind,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub const ROW_WEIGHT: &str = "Weight";
pub const ROW_FPIS: &str = "FPIS";
pub const ROW_FNIS: &str = "FNIS";
pub const RESULT_COLUMNS: [&str; 4] = ["D_plus", "D_minus", "CCI", "Rank"];

#[inline]
pub fn fmt_num(x: f64, precision: u8) -> String {
    format!("{x:.p$}", p = usize::from(precision))
}

#[inline]
pub fn fmt_tfn(t: &Tfn, precision: u8) -> String {
    format!("{t:.p$}", p = usize::from(precision))
}

/// Header = leading key columns followed by the criterion columns.
fn keyed_sheet<R, V>(
    kind: SheetKind,
    lead: &[&str],
    table: &Table<R, CriterionId, V>,
    key_cells: impl Fn(&R) -> Vec<String>,
    cell: impl Fn(&V) -> String,
) -> Sheet
where
    R: Ord + Clone + Display,
{
    let mut header: Vec<String> = lead.iter().map(|s| s.to_string()).collect();
    header.extend(table.cols().iter().map(|c| c.to_string()));

    let rows = table
        .rows()
        .iter()
        .enumerate()
        .map(|(ri, r)| {
            let mut row = key_cells(r);
            row.extend(table.row(ri).map(|(_, v)| cell(v)));
            row
        })
        .collect();

    Sheet { kind, header, rows }
}

/// All five sheets, in `SheetKind::ALL` order.
pub fn build_sheets(out: &PipelineOutputs, precision: u8) -> Result<Vec<Sheet>, ReportError> {
    let st = &out.stages;
    let rating_key = |k: &ft_algo::RatingKey| vec![k.expert.to_string(), k.alternative.to_string()];
    let alt_key = |a: &ft_core::AlternativeId| vec![a.to_string()];
    let tfn = |t: &Tfn| fmt_tfn(t, precision);

    Ok(vec![
        keyed_sheet(SheetKind::Rating, &["Expert", "Alternative"], &st.ratings, rating_key, |g| g.to_string()),
        keyed_sheet(SheetKind::FuzzyRating, &["Expert", "Alternative"], &st.fuzzy, rating_key, tfn),
        keyed_sheet(SheetKind::Combined, &["Alternative"], &st.aggregated, alt_key, tfn),
        keyed_sheet(SheetKind::Normalized, &["Alternative"], &st.normalized.table, alt_key, tfn),
        result_sheet(out, precision)?,
    ])
}

/// Result table: one row per alternative (normalized TFNs, D_plus, D_minus,
/// CCI, Rank), then the synthetic `Weight`, `FPIS` and `FNIS` rows.
pub fn result_sheet(out: &PipelineOutputs, precision: u8) -> Result<Sheet, ReportError> {
    let body = &out.result.body;
    let n_crit = body.criteria.len();

    let mut header = vec!["Alternative".to_string()];
    header.extend(body.criteria.iter().map(|c| c.id.to_string()));
    header.extend(RESULT_COLUMNS.iter().map(|s| s.to_string()));

    let mut rows = Vec::with_capacity(body.alternatives.len() + 3);
    for a in &body.alternatives {
        if a.normalized.len() != n_crit {
            return Err(ReportError::Inconsistent(format!(
                "alternative {} has {} normalized cells, expected {n_crit}",
                a.id,
                a.normalized.len()
            )));
        }
        let mut row = vec![a.id.to_string()];
        row.extend(a.normalized.iter().map(|t| fmt_tfn(t, precision)));
        row.push(fmt_num(a.d_plus, precision));
        row.push(fmt_num(a.d_minus, precision));
        row.push(fmt_num(a.cci, precision));
        row.push(a.rank.to_string());
        rows.push(row);
    }

    let blanks = || std::iter::repeat(String::new()).take(RESULT_COLUMNS.len());
    let mut synthetic = |label: &str, cells: Vec<String>| {
        let mut row = vec![label.to_string()];
        row.extend(cells);
        row.extend(blanks());
        rows.push(row);
    };
    synthetic(ROW_WEIGHT, body.criteria.iter().map(|c| fmt_num(c.weight, precision)).collect());
    synthetic(ROW_FPIS, body.criteria.iter().map(|c| fmt_tfn(&c.fpis, precision)).collect());
    synthetic(ROW_FNIS, body.criteria.iter().map(|c| fmt_tfn(&c.fnis, precision)).collect());

    Ok(Sheet { kind: SheetKind::Result, header, rows })
}

// -------------------- Summary model (JSON / HTML) --------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngineLine {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CriterionRow {
    pub name: String,
    pub weight: String,
    pub scale: String,
    pub fpis: String,
    pub fnis: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankRow {
    pub rank: u32,
    pub alternative: String,
    pub d_plus: String,
    pub d_minus: String,
    pub cci: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportModel {
    pub title: String,
    pub engine: EngineLine,
    pub result_id: String,
    pub run_id: String,
    pub timestamp_utc: String,
    pub tie_policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_seed: Option<String>,
    pub tie_groups: u32,
    pub precision: u8,
    pub criteria: Vec<CriterionRow>,
    /// Best first.
    pub ranking: Vec<RankRow>,
}

pub fn build_model(out: &PipelineOutputs, precision: u8) -> Result<ReportModel, ReportError> {
    let body = &out.result.body;
    let run = &out.run_record.body;

    let criteria = body
        .criteria
        .iter()
        .map(|c| CriterionRow {
            name: c.id.to_string(),
            weight: fmt_num(c.weight, precision),
            scale: fmt_num(c.scale, precision),
            fpis: fmt_tfn(&c.fpis, precision),
            fnis: fmt_tfn(&c.fnis, precision),
        })
        .collect();

    let mut ranking = Vec::with_capacity(body.ranking.len());
    for alt in &body.ranking {
        let a: &AlternativeResult = body
            .alternatives
            .iter()
            .find(|a| &a.id == alt)
            .ok_or_else(|| ReportError::Inconsistent(format!("ranked alternative {alt} has no result row")))?;
        ranking.push(RankRow {
            rank: a.rank,
            alternative: a.id.to_string(),
            d_plus: fmt_num(a.d_plus, precision),
            d_minus: fmt_num(a.d_minus, precision),
            cci: fmt_num(a.cci, precision),
        });
    }

    Ok(ReportModel {
        title: "Fuzzy TOPSIS Ranking".to_string(),
        engine: EngineLine {
            vendor: run.engine.vendor.clone(),
            name: run.engine.name.clone(),
            version: run.engine.version.clone(),
            build: run.engine.build.clone(),
        },
        result_id: out.result.id.clone(),
        run_id: out.run_record.id.clone(),
        timestamp_utc: run.timestamp_utc.clone(),
        tie_policy: body.tie_policy.to_string(),
        tie_seed: body.tie_seed.map(|s| s.to_string()),
        tie_groups: body.tie_groups,
        precision,
        criteria,
        ranking,
    })
}
