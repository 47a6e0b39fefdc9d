//! Sheets and reports rendered from the `basic` fixture run.

use std::path::{Path, PathBuf};

use ft_core::EngineParams;
use ft_pipeline::{run_from_paths, PipelineOutputs};
use ft_report::{build_model, build_sheets, render_html, render_json, sheet_to_csv, SheetKind};

fn fixture_run() -> PipelineOutputs {
    let dir: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/basic");
    run_from_paths(&dir.join("params.csv"), &dir.join("ratings.csv"), None, EngineParams::default()).unwrap()
}

#[test]
fn five_sheets_in_stage_order() {
    let out = fixture_run();
    let sheets = build_sheets(&out, 3).unwrap();
    let kinds: Vec<_> = sheets.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, SheetKind::ALL.to_vec());
    for s in &sheets {
        assert!(s.rows.iter().all(|r| r.len() == s.header.len()), "{:?} is ragged", s.kind);
    }

    let rating = &sheets[0];
    assert_eq!(rating.header, vec!["Expert", "Alternative", "Quality", "Cost", "Delivery"]);
    assert_eq!(rating.rows.len(), 6);
    assert_eq!(rating.rows[0], vec!["E1", "S1", "A", "B", "C"]);

    let fuzzy = &sheets[1];
    assert_eq!(fuzzy.rows[0][2], "(0.750, 0.900, 1.000)");

    assert_eq!(sheets[2].rows.len(), 3);
    assert_eq!(sheets[3].header, vec!["Alternative", "Quality", "Cost", "Delivery"]);
}

#[test]
fn result_sheet_has_synthetic_rows() {
    let out = fixture_run();
    let sheets = build_sheets(&out, 3).unwrap();
    let result = &sheets[4];
    assert_eq!(
        result.header,
        vec!["Alternative", "Quality", "Cost", "Delivery", "D_plus", "D_minus", "CCI", "Rank"]
    );
    let labels: Vec<_> = result.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(labels, vec!["S1", "S2", "S3", "Weight", "FPIS", "FNIS"]);

    assert_eq!(result.rows[2][6], "0.000");
    assert_eq!(result.rows[2][7], "3");
    assert_eq!(result.rows[3][1..4], ["0.500", "0.300", "0.200"]);
    assert!(result.rows[3][4..].iter().all(String::is_empty));
}

#[test]
fn precision_controls_formatting() {
    let out = fixture_run();
    let sheets = build_sheets(&out, 1).unwrap();
    assert_eq!(sheets[1].rows[0][2], "(0.8, 0.9, 1.0)");
    let csv = String::from_utf8(sheet_to_csv(&sheets[4]).unwrap()).unwrap();
    assert!(csv.starts_with("Alternative,Quality,Cost,Delivery,D_plus,D_minus,CCI,Rank\n"));
    assert!(csv.contains("\nWeight,0.5,0.3,0.2,,,,\n"));
}

#[test]
fn json_and_html_reports() {
    let out = fixture_run();
    let model = build_model(&out, 3).unwrap();
    assert_eq!(model.ranking.len(), 3);
    assert_eq!(model.ranking[2].alternative, "S3");
    assert_eq!(model.result_id, out.result.id);

    let json: serde_json::Value = serde_json::from_str(&render_json(&model).unwrap()).unwrap();
    assert_eq!(json["tie_policy"], "alternative_order");
    assert_eq!(json["ranking"][0]["rank"], 1);
    assert!(json.get("tie_seed").is_none());

    let html = render_html(&model).unwrap();
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("Fuzzy TOPSIS Ranking"));
    assert!(html.contains(&out.result.id));
    assert!(html.contains("<td>S3</td>"));
}
