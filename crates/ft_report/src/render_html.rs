//! crates/ft_report/src/render_html.rs
//! Single-file HTML report via an embedded minijinja template (no external assets).
//! Auto-escaping is on for the `.html` template name.

use minijinja::{context, Environment};

use crate::{ReportError, ReportModel};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>{{ m.title }} | {{ m.result_id }}</title>
<style>
  body { font-family: sans-serif; margin: 2em; }
  table { border-collapse: collapse; }
  th, td { border: 1px solid #999; padding: 0.3em 0.6em; text-align: right; }
  th:first-child, td:first-child { text-align: left; }
</style>
<h1>{{ m.title }}</h1>

<h2>Ranking</h2>
<table>
  <tr><th>Rank</th><th>Alternative</th><th>D+</th><th>D-</th><th>CCI</th></tr>
  {% for r in m.ranking %}
  <tr><td>{{ r.rank }}</td><td>{{ r.alternative }}</td><td>{{ r.d_plus }}</td><td>{{ r.d_minus }}</td><td>{{ r.cci }}</td></tr>
  {% endfor %}
</table>

<h2>Criteria</h2>
<table>
  <tr><th>Criterion</th><th>Weight</th><th>Scale</th><th>FPIS</th><th>FNIS</th></tr>
  {% for c in m.criteria %}
  <tr><td>{{ c.name }}</td><td>{{ c.weight }}</td><td>{{ c.scale }}</td><td>{{ c.fpis }}</td><td>{{ c.fnis }}</td></tr>
  {% endfor %}
</table>

<h2>Integrity</h2>
<p>Engine: {{ m.engine.vendor }}/{{ m.engine.name }} v{{ m.engine.version }} ({{ m.engine.build }})</p>
<p>Result: {{ m.result_id }}</p>
<p>Run: {{ m.run_id }} at {{ m.timestamp_utc }}</p>
<p>Ties: policy={{ m.tie_policy }}{% if m.tie_seed %}, seed={{ m.tie_seed }}{% endif %}, groups={{ m.tie_groups }}</p>
</html>
"#;

pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("report.html", TEMPLATE)
        .map_err(|_| ReportError::Template("add_template"))?;
    let tmpl = env
        .get_template("report.html")
        .map_err(|_| ReportError::Template("get_template"))?;
    tmpl.render(context! { m => model })
        .map_err(|_| ReportError::Template("render_html"))
}
