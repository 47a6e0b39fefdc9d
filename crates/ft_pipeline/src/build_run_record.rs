//! crates/ft_pipeline/src/build_run_record.rs
//! Assemble `run_record.json`: provenance of one run.
//!
//! - Engine identity is recorded verbatim (vendor/name/version/build).
//! - Input digests are the raw-byte SHA-256 of the files actually read.
//! - `outputs.result_sha256` covers the canonical bytes of the full result
//!   document (id included), i.e. exactly what lands in `result.json`.
//! - Run ID = `RUN:<timestamp_utc>:<sha256 of the canonical body>`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use ft_core::EngineParams;
use ft_io::hasher::{run_id_from_canonical, sha256_canonical};
use ft_io::manifest::InputDigests;
use ft_io::IoError;

use crate::{EngineMeta, PipelineError, ResultDoc};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutputs {
    pub result_id: String,
    pub result_sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecordBody {
    pub timestamp_utc: String,
    pub engine: EngineMeta,
    pub inputs: InputDigests,
    pub params: EngineParams,
    pub outputs: RunOutputs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecordDoc {
    pub id: String,
    #[serde(flatten)]
    pub body: RunRecordBody,
}

/// Parse an RFC3339 timestamp and render it as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn normalize_utc_seconds(ts: &str) -> Result<String, PipelineError> {
    let dt: DateTime<Utc> = ts
        .parse::<DateTime<Utc>>()
        .map_err(|_| PipelineError::Build(format!("invalid timestamp: {ts}")))?;
    Ok(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub fn build_run_record(
    result: &ResultDoc,
    engine: &EngineMeta,
    inputs: &InputDigests,
    params: &EngineParams,
    timestamp_utc: Option<&str>,
) -> Result<RunRecordDoc, PipelineError> {
    let timestamp_utc = match timestamp_utc {
        Some(ts) => normalize_utc_seconds(ts)?,
        None => Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    let body = RunRecordBody {
        timestamp_utc,
        engine: engine.clone(),
        inputs: inputs.clone(),
        params: params.clone(),
        outputs: RunOutputs {
            result_id: result.id.clone(),
            result_sha256: sha256_canonical(result).map_err(IoError::from)?,
        },
    };
    let id = run_id_from_canonical(&body.timestamp_utc, &body).map_err(IoError::from)?;
    Ok(RunRecordDoc { id, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_offsets_to_z() {
        assert_eq!(normalize_utc_seconds("2025-08-12T12:00:00+02:00").unwrap(), "2025-08-12T10:00:00Z");
        assert_eq!(normalize_utc_seconds("2025-08-12T10:00:00.750Z").unwrap(), "2025-08-12T10:00:00Z");
        assert!(normalize_utc_seconds("yesterday").is_err());
    }
}
