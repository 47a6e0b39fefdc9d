// crates/ft_io/src/manifest.rs
//
// Manifest: one JSON file naming the inputs of a run.
// - Required inputs: params_path, ratings_path. Optional: scale_path.
// - Offline-only: reject any path with a scheme ("://", "http:", "https:").
// - Relative paths resolve against the manifest's directory.
// - Digests (if provided) are lowercase 64-hex over the raw file bytes and
//   may only name inputs that are present.
// - Optional `engine` block carries tie policy / seed / precision.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ft_core::EngineParams;

use crate::{looks_like_url, IoResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub params_path: String,
    pub ratings_path: String,
    #[serde(default)]
    pub scale_path: Option<String>,

    #[serde(default)]
    pub engine: Option<EngineParams>,

    #[serde(default)]
    pub inputs_sha256: Option<InputDigests>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputDigests {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_path: Option<String>,
}

/// Paths resolved against the manifest's directory.
#[derive(Debug, Clone)]
pub struct ResolvedManifest {
    pub params_path: PathBuf,
    pub ratings_path: PathBuf,
    pub scale_path: Option<PathBuf>,
    pub engine: Option<EngineParams>,
    pub digests: Option<InputDigests>,
}

#[derive(Debug)]
pub enum ManifestError {
    Empty(&'static str),
    UrlPath(&'static str, String),
    Io(&'static str, String),
    NotAFile(&'static str, String),
    /// Bad hex format / shape (not a mismatch).
    DigestShape(&'static str, String),
    /// Provided digest doesn't match the file on disk.
    DigestMismatch { field: &'static str, expected: String, actual: String },
    /// Digest provided for an input that is not present in the manifest.
    DigestForMissing(&'static str),
    Engine(String),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ManifestError::*;
        match self {
            Empty(k) => write!(f, "field must not be empty: {k}"),
            UrlPath(k, v) => write!(f, "path must be offline (no scheme) for {k}: {v}"),
            Io(k, v) => write!(f, "cannot access {k}: {v}"),
            NotAFile(k, v) => write!(f, "path is not a file for {k}: {v}"),
            DigestShape(k, v) => write!(f, "invalid sha256 format for {k}: {v}"),
            DigestMismatch { field, expected, actual } => {
                write!(f, "sha256 mismatch for {field}: expected {expected}, got {actual}")
            }
            DigestForMissing(k) => write!(f, "digest supplied for missing input: {k}"),
            Engine(m) => write!(f, "engine parameters: {m}"),
        }
    }
}

impl std::error::Error for ManifestError {}

// ---------- helpers (pure) ----------

#[inline]
fn is_lower_hex_64(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[inline]
fn join_under(base: &Path, rel: &str) -> PathBuf {
    let p = Path::new(rel);
    if p.is_absolute() { p.to_path_buf() } else { base.join(p) }
}

fn path_check(field: &'static str, s: &str) -> Result<(), ManifestError> {
    if s.trim().is_empty() {
        return Err(ManifestError::Empty(field));
    }
    if looks_like_url(s) {
        return Err(ManifestError::UrlPath(field, s.to_string()));
    }
    Ok(())
}

fn digest_check(field: &'static str, digest: Option<&String>, present: bool) -> Result<(), ManifestError> {
    match digest {
        None => Ok(()),
        Some(_) if !present => Err(ManifestError::DigestForMissing(field)),
        Some(h) if !is_lower_hex_64(h) => Err(ManifestError::DigestShape(field, h.clone())),
        Some(_) => Ok(()),
    }
}

// ---------- validation / resolution ----------

/// Read and parse a manifest file (no validation).
pub fn load_manifest(path: &Path) -> IoResult<Manifest> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Validate shape and offline policy. Does not touch the filesystem.
pub fn validate_manifest(man: &Manifest) -> Result<(), ManifestError> {
    path_check("params_path", &man.params_path)?;
    path_check("ratings_path", &man.ratings_path)?;
    if let Some(s) = &man.scale_path {
        path_check("scale_path", s)?;
    }
    if let Some(d) = &man.inputs_sha256 {
        digest_check("params_path", d.params_path.as_ref(), true)?;
        digest_check("ratings_path", d.ratings_path.as_ref(), true)?;
        digest_check("scale_path", d.scale_path.as_ref(), man.scale_path.is_some())?;
    }
    if let Some(e) = &man.engine {
        e.validate().map_err(|err| ManifestError::Engine(err.to_string()))?;
    }
    Ok(())
}

/// Resolve relative paths against `base_dir` and require that each input
/// exists and is a regular file.
pub fn resolve_paths(man: &Manifest, base_dir: &Path) -> Result<ResolvedManifest, ManifestError> {
    let params_path = join_under(base_dir, &man.params_path);
    let ratings_path = join_under(base_dir, &man.ratings_path);
    let scale_path = man.scale_path.as_deref().map(|s| join_under(base_dir, s));

    must_exist_file("params_path", &params_path)?;
    must_exist_file("ratings_path", &ratings_path)?;
    if let Some(p) = &scale_path {
        must_exist_file("scale_path", p)?;
    }

    Ok(ResolvedManifest {
        params_path,
        ratings_path,
        scale_path,
        engine: man.engine.clone(),
        digests: man.inputs_sha256.clone(),
    })
}

fn must_exist_file(field: &'static str, p: &Path) -> Result<(), ManifestError> {
    let meta = fs::metadata(p).map_err(|e| ManifestError::Io(field, format!("{}: {e}", p.display())))?;
    if !meta.is_file() {
        return Err(ManifestError::NotAFile(field, p.display().to_string()));
    }
    Ok(())
}

/// Compare expected digests (if any) with the digests actually computed.
pub fn verify_digests(expected: Option<&InputDigests>, actual: &InputDigests) -> Result<(), ManifestError> {
    let Some(exp) = expected else { return Ok(()) };
    let pairs = [
        ("params_path", &exp.params_path, &actual.params_path),
        ("ratings_path", &exp.ratings_path, &actual.ratings_path),
        ("scale_path", &exp.scale_path, &actual.scale_path),
    ];
    for (field, want, got) in pairs {
        if let Some(want) = want {
            match got {
                Some(got) if got == want => {}
                Some(got) => {
                    return Err(ManifestError::DigestMismatch {
                        field,
                        expected: want.clone(),
                        actual: got.clone(),
                    })
                }
                None => return Err(ManifestError::DigestForMissing(field)),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Manifest {
        Manifest {
            params_path: "params.csv".into(),
            ratings_path: "ratings.csv".into(),
            scale_path: None,
            engine: None,
            inputs_sha256: None,
        }
    }

    #[test]
    fn rejects_urls_and_empty() {
        let mut m = base();
        m.ratings_path = "https://example.org/r.csv".into();
        assert!(matches!(validate_manifest(&m), Err(ManifestError::UrlPath("ratings_path", _))));
        let mut m = base();
        m.params_path = "  ".into();
        assert!(matches!(validate_manifest(&m), Err(ManifestError::Empty("params_path"))));
    }

    #[test]
    fn digest_rules() {
        let mut m = base();
        m.inputs_sha256 = Some(InputDigests { scale_path: Some("a".repeat(64)), ..Default::default() });
        assert!(matches!(validate_manifest(&m), Err(ManifestError::DigestForMissing("scale_path"))));
        m.inputs_sha256 = Some(InputDigests { params_path: Some("XYZ".into()), ..Default::default() });
        assert!(matches!(validate_manifest(&m), Err(ManifestError::DigestShape("params_path", _))));
    }

    #[test]
    fn resolve_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("params.csv"), "Parameter,Weight\n").unwrap();
        fs::write(dir.path().join("ratings.csv"), "Expert,Alternative\n").unwrap();
        let r = resolve_paths(&base(), dir.path()).unwrap();
        assert_eq!(r.params_path, dir.path().join("params.csv"));

        let mut m = base();
        m.scale_path = Some("missing.json".into());
        assert!(matches!(resolve_paths(&m, dir.path()), Err(ManifestError::Io("scale_path", _))));
    }

    #[test]
    fn verify_mismatch() {
        let exp = InputDigests { params_path: Some("0".repeat(64)), ..Default::default() };
        let act = InputDigests { params_path: Some("1".repeat(64)), ratings_path: Some("2".repeat(64)), scale_path: None };
        assert!(matches!(
            verify_digests(Some(&exp), &act),
            Err(ManifestError::DigestMismatch { field: "params_path", .. })
        ));
        assert!(verify_digests(None, &act).is_ok());
    }

    #[test]
    fn parses_engine_block() {
        let m: Manifest = serde_json::from_str(
            r#"{"params_path":"p.csv","ratings_path":"r.csv","engine":{"tie_policy":"seeded","tie_seed":5}}"#,
        )
        .unwrap();
        assert!(validate_manifest(&m).is_ok());
        assert_eq!(m.engine.unwrap().tie_seed, Some(5));
        assert!(serde_json::from_str::<Manifest>(r#"{"params_path":"p","ratings_path":"r","extra":1}"#).is_err());
        // No free-form identifier: inputs are named by path and digest only.
        assert!(serde_json::from_str::<Manifest>(r#"{"id":"x","params_path":"p","ratings_path":"r"}"#).is_err());
    }
}
