// crates/ft_cli/src/main.rs
//
// `fzt`: parse args → logging → load → resolve engine params → pipeline →
// canonical artifacts → optional sheets and reports.
// Exit codes are stable for scripts (see `exitcodes`).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad flags, malformed inputs, data-integrity failures.
    pub const VALIDATION: i32 = 2;
    /// Declared input digests do not match the files read.
    pub const SELF_VERIFY: i32 = 3;
    pub const IO: i32 = 4;
    /// Degenerate or overflowing numeric cases, and result assembly failures.
    pub const ENGINE: i32 = 5;
}

use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};

use ft_core::{EngineParams, TiePolicy};
use ft_io::loader::{self, LoadedInputs};
use ft_io::{canonical_json, IoError, ManifestError};
use ft_pipeline::{run_with_ctx, EngineMeta, PipelineCtx, PipelineError, PipelineOutputs, TopsisError};
use ft_report::{build_sheets, sheet_to_csv, ReportError, SheetKind};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    Validation(String),
    SelfVerify(String),
    Io(String),
    Engine(String),
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::SelfVerify(m) => write!(f, "self-verify: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Engine(m) => write!(f, "engine: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("fzt: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_logging(args.quiet);

    let res = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match res {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("fzt: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// Structured logs on stderr. `RUST_LOG` wins unless `--quiet` is set.
fn init_logging(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::SelfVerify(_) => SELF_VERIFY,
        MainError::Io(_) => IO,
        MainError::Engine(_) => ENGINE,
        MainError::Render(_) => IO,
    }
}

/// Translate ft_io::IoError into MainError buckets.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Csv { .. } | IoError::Json { .. } => MainError::Validation(e.to_string()),
        IoError::Manifest(ManifestError::DigestMismatch { .. }) => MainError::SelfVerify(e.to_string()),
        IoError::Manifest(ManifestError::Io(..) | ManifestError::NotAFile(..)) => MainError::Io(e.to_string()),
        IoError::Manifest(_) => MainError::Validation(e.to_string()),
        IoError::Path(_) | IoError::Hash(_) => MainError::Io(e.to_string()),
    }
}

/// Translate ft_pipeline::PipelineError into MainError buckets.
fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
        PipelineError::Validate(_) => MainError::Validation(e.to_string()),
        PipelineError::Engine(
            TopsisError::DegenerateCriterion { .. }
            | TopsisError::DegenerateCloseness { .. }
            | TopsisError::NonFiniteCloseness { .. },
        ) => MainError::Engine(e.to_string()),
        PipelineError::Engine(_) => MainError::Validation(e.to_string()),
        PipelineError::Build(m) => MainError::Engine(m),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}

fn load(args: &Args) -> Result<LoadedInputs, MainError> {
    let loaded = match (&args.manifest, &args.params, &args.ratings) {
        (Some(m), _, _) => loader::load_from_manifest_path(m),
        (None, Some(p), Some(r)) => loader::load_from_paths(p, r, args.scale.as_deref()),
        _ => return Err(MainError::Validation("no inputs given".into())),
    };
    loaded.map_err(map_io_err)
}

/// Defaults → manifest `engine` block → CLI flags.
fn resolve_params(args: &Args, manifest: Option<&EngineParams>) -> Result<EngineParams, MainError> {
    let mut p = manifest.cloned().unwrap_or_default();
    if let Some(seed) = args.seed {
        p.tie_seed = Some(seed);
        p.tie_policy = TiePolicy::Seeded;
    }
    if let Some(tp) = args.tie_policy {
        p.tie_policy = tp;
    }
    if let Some(prec) = args.precision {
        p.precision = prec;
    }
    p.validate().map_err(|e| MainError::Validation(format!("engine parameters: {e}")))?;
    Ok(p)
}

/// Load and check everything a run would, without writing artifacts.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let loaded = load(args)?;
    resolve_params(args, loaded.engine.as_ref())?;
    let v = ft_pipeline::validate::validate(&loaded).map_err(map_pipeline_err)?;
    ft_pipeline::aggregate::fuzzify_and_aggregate(&v, &loaded.scale).map_err(map_pipeline_err)?;
    tracing::info!(
        criteria = v.criteria.len(),
        alternatives = v.alternatives.len(),
        experts = v.experts.len(),
        "validate-only: inputs OK"
    );
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let loaded = load(args)?;
    let params = resolve_params(args, loaded.engine.as_ref())?;
    let precision = params.precision;

    let ctx = PipelineCtx {
        loaded,
        engine_meta: EngineMeta::from_build_env(),
        params,
        timestamp_utc: None,
    };
    let outs = run_with_ctx(ctx).map_err(map_pipeline_err)?;

    write_artifacts(&args.out, &outs, args.sheets, precision)?;
    maybe_render_reports(args, &outs, precision)?;

    tracing::info!(out = %args.out.display(), result_id = %outs.result.id, "artifacts written");
    Ok(())
}

fn write_artifacts(out_dir: &Path, outs: &PipelineOutputs, all_sheets: bool, precision: u8) -> Result<(), MainError> {
    fs::create_dir_all(out_dir).map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.display())))?;

    canonical_json::write_canonical_file(&outs.result, &out_dir.join("result.json"))
        .map_err(|e| MainError::Io(format!("write result.json: {e}")))?;
    canonical_json::write_canonical_file(&outs.run_record, &out_dir.join("run_record.json"))
        .map_err(|e| MainError::Io(format!("write run_record.json: {e}")))?;

    // result.csv always; the stage sheets on request.
    for sheet in build_sheets(outs, precision).map_err(map_report_err)? {
        if !all_sheets && sheet.kind != SheetKind::Result {
            continue;
        }
        let name = sheet.kind.file_name();
        let bytes = sheet_to_csv(&sheet).map_err(map_report_err)?;
        canonical_json::write_atomic(&out_dir.join(name), &bytes)
            .map_err(|e| MainError::Io(format!("write {name}: {e}")))?;
        tracing::debug!(sheet = name, rows = sheet.rows.len(), "sheet written");
    }
    Ok(())
}

fn maybe_render_reports(args: &Args, outs: &PipelineOutputs, precision: u8) -> Result<(), MainError> {
    if args.render.is_empty() {
        return Ok(());
    }
    let model = ft_report::build_model(outs, precision).map_err(map_report_err)?;
    for fmt in &args.render {
        match fmt.as_str() {
            "json" => render_json_report(&model, &args.out)?,
            "html" => render_html_report(&model, &args.out)?,
            other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
        }
    }
    Ok(())
}

// Always accept the concrete model type; gate the body by feature.
fn render_json_report(model: &ft_report::ReportModel, out_dir: &Path) -> Result<(), MainError> {
    #[cfg(feature = "report-json")]
    {
        let text = ft_report::render_json(model).map_err(map_report_err)?;
        return canonical_json::write_atomic(&out_dir.join("report.json"), text.as_bytes())
            .map_err(|e| MainError::Io(format!("write report.json: {e}")));
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = (model, out_dir);
        Err(MainError::Render("json renderer not enabled (build with feature `report-json`)".into()))
    }
}

fn render_html_report(model: &ft_report::ReportModel, out_dir: &Path) -> Result<(), MainError> {
    #[cfg(feature = "report-html")]
    {
        let html = ft_report::render_html(model).map_err(map_report_err)?;
        return canonical_json::write_atomic(&out_dir.join("report.html"), html.as_bytes())
            .map_err(|e| MainError::Io(format!("write report.html: {e}")));
    }
    #[cfg(not(feature = "report-html"))]
    {
        let _ = (model, out_dir);
        Err(MainError::Render("html renderer not enabled (build with feature `report-html`)".into()))
    }
}
