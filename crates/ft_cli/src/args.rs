// crates/ft_cli/src/args.rs
//
// Offline CLI argument surface and pre-flight checks.
// - No networked paths (reject any scheme:// like http/https/file)
// - Exactly one of: --manifest  XOR  (--params + --ratings [+ --scale])
// - Output: --out dir, --render [json|html]*, --sheets
// - Seed is a u64 in decimal or 0x-hex (up to 16 nybbles)
// - --validate-only loads and checks inputs without writing artifacts

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use clap::Parser;

use ft_core::TiePolicy;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fzt",
    version,
    disable_help_subcommand = true,
    about = "Offline, deterministic fuzzy TOPSIS ranking"
)]
pub struct Args {
    // --- Mode selection ---
    /// Manifest JSON naming the inputs (mutually exclusive with the explicit file flags).
    #[arg(long, conflicts_with_all = ["params", "ratings", "scale"])]
    pub manifest: Option<PathBuf>,

    // --- Explicit mode ---
    /// Parameter table CSV (`Parameter`, `Weight`).
    #[arg(long)]
    pub params: Option<PathBuf>,
    /// Ratings CSV (`Expert`, `Alternative`, one column per criterion).
    #[arg(long)]
    pub ratings: Option<PathBuf>,
    /// Linguistic scale JSON; the built-in five-grade scale otherwise.
    #[arg(long)]
    pub scale: Option<PathBuf>,

    // --- Output & rendering ---
    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Renderer(s) to emit. Choose up to 2 (json, html). Omit to skip rendering.
    #[arg(long, value_parser = ["json", "html"], num_args = 0..=2)]
    pub render: Vec<String>,
    /// Also write the per-stage sheets (rating, fuzzy_rating, combined, normalized).
    #[arg(long)]
    pub sheets: bool,

    // --- Engine parameters (override the manifest `engine` block) ---
    /// Tie policy: alternative_order | seeded.
    #[arg(long, value_parser = parse_tie_policy)]
    pub tie_policy: Option<TiePolicy>,
    /// Tie RNG seed. Accepts decimal u64 or 0x-hex (≤16 hex digits). Implies `seeded`
    /// unless --tie-policy is given.
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,
    /// Decimal places in sheets and reports (0..=9).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub precision: Option<u8>,

    // --- Control ---
    /// Validate inputs only (load + integrity checks + grade lookup), write nothing.
    #[arg(long)]
    pub validate_only: bool,

    /// Log warnings and errors only.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    Missing(&'static str),
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            Missing(s) => write!(f, "missing required flag: {s}"),
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Seed parser: decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".into())
    }
}

pub fn parse_tie_policy(s: &str) -> Result<TiePolicy, String> {
    s.trim()
        .parse::<TiePolicy>()
        .map_err(|_| format!("unknown tie policy {s:?} (expected alternative_order | seeded)"))
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    ft_io::looks_like_url(s) || s.trim().to_ascii_lowercase().starts_with("file:")
}

/// Ensure a provided path string is local (no scheme); existence is checked later.
#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

/// Iterate over all path-like flags (including `--out`) for quick scheme checks.
fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [
        args.manifest.as_deref(),
        args.params.as_deref(),
        args.ratings.as_deref(),
        args.scale.as_deref(),
        Some(args.out.as_path()),
    ]
    .into_iter()
    .flatten()
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    check(Args::parse())
}

/// Scheme checks, mode checks, existence, then path normalization.
pub fn check(mut args: Args) -> Result<Args, CliError> {
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    if let Some(m) = &args.manifest {
        ensure_local_exists(m, "--manifest")?;
        args.manifest = args.manifest.take().map(|p| normalize_path(&p));
    } else {
        let par = args.params.as_ref().ok_or(CliError::Missing("--params (or --manifest)"))?;
        let rat = args.ratings.as_ref().ok_or(CliError::Missing("--ratings (or --manifest)"))?;
        ensure_local_exists(par, "--params")?;
        ensure_local_exists(rat, "--ratings")?;
        if let Some(s) = &args.scale {
            ensure_local_exists(s, "--scale")?;
        }
        args.params = args.params.take().map(|p| normalize_path(&p));
        args.ratings = args.ratings.take().map(|p| normalize_path(&p));
        args.scale = args.scale.take().map(|p| normalize_path(&p));
    }

    // Output directory may not exist yet.
    args.out = normalize_path(&args.out);
    Ok(args)
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort normalization to an absolute path.
/// If canonicalize fails (e.g., path doesn't exist yet), join onto the CWD.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("fzt").chain(argv.iter().copied()))
    }

    #[test]
    fn seed_parser_decimal_and_hex() {
        assert_eq!(parse_seed("42").unwrap(), 42u64);
        assert_eq!(parse_seed("0x2A").unwrap(), 42u64);
        assert!(parse_seed("0x").is_err());
        assert!(parse_seed("0xFFFFFFFFFFFFFFFFF").is_err()); // 17 nybbles
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn tie_policy_tokens() {
        assert_eq!(parse_tie_policy("seeded").unwrap(), TiePolicy::Seeded);
        assert_eq!(parse_tie_policy("alternative_order").unwrap(), TiePolicy::AlternativeOrder);
        assert!(parse_tie_policy("random").is_err());
    }

    #[test]
    fn manifest_conflicts_with_explicit_inputs() {
        assert!(parse(&["--manifest", "m.json", "--params", "p.csv"]).is_err());
        assert!(parse(&["--precision", "12", "--manifest", "m.json"]).is_err());
        let a = parse(&["--manifest", "m.json", "--render", "json", "html", "--seed", "0x10"]).unwrap();
        assert_eq!(a.render, vec!["json", "html"]);
        assert_eq!(a.seed, Some(16));
    }

    #[test]
    fn explicit_mode_requires_both_tables() {
        let a = parse(&["--params", "p.csv"]).unwrap();
        assert!(matches!(check(a), Err(CliError::Missing(_))));
    }

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("https://x/y.csv")).is_err());
        assert!(ensure_local_path(Path::new("/tmp/ratings.csv")).is_ok());
    }

    #[test]
    fn normalize_path_returns_absolute() {
        let abs = normalize_path(Path::new("does/not/exist.csv"));
        assert!(abs.is_absolute());
    }
}
