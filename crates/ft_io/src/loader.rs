//! crates/ft_io/src/loader.rs
//! Read the run inputs into raw, typed records.
//!
//! - Parameter CSV: `Parameter` + `Weight` (the `Wt` header is accepted too).
//! - Ratings CSV: `Expert`, `Alternative`, then one column per criterion.
//! - Optional scale JSON: `{"A": [0.75, 0.9, 1.0], ...}`; default five-grade scale otherwise.
//!
//! Loading checks shape only (headers present, names well-formed, weights
//! numeric). Cross-table integrity (missing weights, duplicates, empty cells)
//! is the pipeline's validation stage. Each file is read once; the same bytes
//! are hashed and parsed.

use std::fs;
use std::path::Path;

use ft_core::{AlternativeId, CriterionId, EngineParams, ExpertId, Grade, LinguisticScale};

use crate::hasher::sha256_hex;
use crate::manifest::{self, InputDigests};
use crate::{IoError, IoResult};

pub const PARAM_NAME_HEADER: &str = "Parameter";
pub const WEIGHT_HEADERS: [&str; 2] = ["Weight", "Wt"];
pub const EXPERT_HEADER: &str = "Expert";
pub const ALTERNATIVE_HEADER: &str = "Alternative";

#[derive(Debug, Clone, PartialEq)]
pub struct ParamRow {
    pub criterion: CriterionId,
    pub weight: f64,
    /// 1-based CSV record number (header = 1).
    pub record: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub expert: ExpertId,
    pub alternative: AlternativeId,
    /// One entry per criterion column, in header order; `None` for an empty cell.
    pub grades: Vec<Option<Grade>>,
    pub record: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingsSheet {
    /// Criterion columns in header order.
    pub criteria: Vec<CriterionId>,
    pub records: Vec<RatingRecord>,
}

/// Everything a run needs, as loaded from disk.
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub params: Vec<ParamRow>,
    pub ratings: RatingsSheet,
    pub scale: LinguisticScale,
    /// Raw-byte SHA-256 of each input actually read.
    pub digests: InputDigests,
    /// Engine parameters from the manifest, if any.
    pub engine: Option<EngineParams>,
}

/* ---------------------------------- CSV ---------------------------------- */

fn csv_err(path: &str, record: u64, msg: impl Into<String>) -> IoError {
    IoError::Csv { path: path.to_string(), record, msg: msg.into() }
}

fn reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(bytes)
}

fn headers(rdr: &mut csv::Reader<&[u8]>, path: &str) -> IoResult<Vec<String>> {
    let h = rdr.headers().map_err(|e| csv_err(path, 1, e.to_string()))?;
    Ok(h.iter().map(|s| s.trim_start_matches('\u{feff}').to_string()).collect())
}

/// Identifying headers match verbatim (after trimming).
fn find_col(headers: &[String], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h.as_str()))
}

/// Parse a parameter table from bytes. `path` is used for messages only.
pub fn parse_params_csv(bytes: &[u8], path: &str) -> IoResult<Vec<ParamRow>> {
    let mut rdr = reader(bytes);
    let hdr = headers(&mut rdr, path)?;
    let name_col = find_col(&hdr, &[PARAM_NAME_HEADER])
        .ok_or_else(|| csv_err(path, 1, format!("missing `{PARAM_NAME_HEADER}` column")))?;
    let weight_col = find_col(&hdr, &WEIGHT_HEADERS)
        .ok_or_else(|| csv_err(path, 1, "missing `Weight` (or `Wt`) column"))?;

    let mut rows = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let record = i as u64 + 2;
        let rec = rec.map_err(|e| csv_err(path, record, e.to_string()))?;
        let name = rec.get(name_col).unwrap_or_default();
        if name.is_empty() && rec.iter().all(str::is_empty) {
            continue;
        }
        let criterion = CriterionId::parse_trimmed(name)
            .map_err(|e| csv_err(path, record, format!("criterion name: {e}")))?;
        let raw = rec.get(weight_col).unwrap_or_default();
        let weight = raw
            .parse::<f64>()
            .map_err(|_| csv_err(path, record, format!("weight for {criterion} is not a number: {raw:?}")))?;
        rows.push(ParamRow { criterion, weight, record });
    }
    Ok(rows)
}

/// Parse a ratings table from bytes. `path` is used for messages only.
pub fn parse_ratings_csv(bytes: &[u8], path: &str) -> IoResult<RatingsSheet> {
    let mut rdr = reader(bytes);
    let hdr = headers(&mut rdr, path)?;
    let expert_col = find_col(&hdr, &[EXPERT_HEADER])
        .ok_or_else(|| csv_err(path, 1, format!("missing `{EXPERT_HEADER}` column")))?;
    let alt_col = find_col(&hdr, &[ALTERNATIVE_HEADER])
        .ok_or_else(|| csv_err(path, 1, format!("missing `{ALTERNATIVE_HEADER}` column")))?;

    let mut criteria = Vec::new();
    let mut crit_cols = Vec::new();
    for (i, h) in hdr.iter().enumerate() {
        if i == expert_col || i == alt_col {
            continue;
        }
        let c = CriterionId::parse_trimmed(h)
            .map_err(|e| csv_err(path, 1, format!("criterion header #{}: {e}", i + 1)))?;
        if criteria.contains(&c) {
            return Err(csv_err(path, 1, format!("duplicate criterion column {c}")));
        }
        criteria.push(c);
        crit_cols.push(i);
    }

    let mut records = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let record = i as u64 + 2;
        let rec = rec.map_err(|e| csv_err(path, record, e.to_string()))?;
        if rec.iter().all(str::is_empty) {
            continue;
        }
        let expert = ExpertId::parse_trimmed(rec.get(expert_col).unwrap_or_default())
            .map_err(|e| csv_err(path, record, format!("expert: {e}")))?;
        let alternative = AlternativeId::parse_trimmed(rec.get(alt_col).unwrap_or_default())
            .map_err(|e| csv_err(path, record, format!("alternative: {e}")))?;
        let mut grades = Vec::with_capacity(crit_cols.len());
        for &ci in &crit_cols {
            let cell = rec.get(ci).unwrap_or_default();
            if cell.is_empty() {
                grades.push(None);
            } else {
                let g = Grade::parse_trimmed(cell)
                    .map_err(|e| csv_err(path, record, format!("grade in column {}: {e}", ci + 1)))?;
                grades.push(Some(g));
            }
        }
        records.push(RatingRecord { expert, alternative, grades, record });
    }
    Ok(RatingsSheet { criteria, records })
}

pub fn parse_scale_json(bytes: &[u8]) -> IoResult<LinguisticScale> {
    Ok(serde_json::from_slice(bytes)?)
}

/* --------------------------------- Paths --------------------------------- */

fn read_file(path: &Path) -> IoResult<Vec<u8>> {
    fs::read(path).map_err(|e| IoError::Path(format!("read {}: {e}", path.display())))
}

/// Load from explicit paths; `scale` falls back to the default five-grade scale.
pub fn load_from_paths(params: &Path, ratings: &Path, scale: Option<&Path>) -> IoResult<LoadedInputs> {
    let params_bytes = read_file(params)?;
    let ratings_bytes = read_file(ratings)?;

    let params_rows = parse_params_csv(&params_bytes, &params.display().to_string())?;
    let sheet = parse_ratings_csv(&ratings_bytes, &ratings.display().to_string())?;

    let (scale_tbl, scale_digest) = match scale {
        Some(p) => {
            let bytes = read_file(p)?;
            (parse_scale_json(&bytes)?, Some(sha256_hex(&bytes)))
        }
        None => (LinguisticScale::default(), None),
    };

    Ok(LoadedInputs {
        params: params_rows,
        ratings: sheet,
        scale: scale_tbl,
        digests: InputDigests {
            params_path: Some(sha256_hex(&params_bytes)),
            ratings_path: Some(sha256_hex(&ratings_bytes)),
            scale_path: scale_digest,
        },
        engine: None,
    })
}

/// Load via a manifest: validate, resolve relative to its directory, read
/// inputs, then verify any expected digests against what was read.
pub fn load_from_manifest_path(path: &Path) -> IoResult<LoadedInputs> {
    let man = manifest::load_manifest(path)?;
    manifest::validate_manifest(&man)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let resolved = manifest::resolve_paths(&man, base)?;

    let mut loaded = load_from_paths(
        &resolved.params_path,
        &resolved.ratings_path,
        resolved.scale_path.as_deref(),
    )?;
    manifest::verify_digests(resolved.digests.as_ref(), &loaded.digests)?;
    loaded.engine = resolved.engine;
    Ok(loaded)
}
