//! Spider chart: one filled polar trace per resume, rendered as a standalone
//! HTML page that draws with Plotly.js. Scores are plotted as reported.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{CriteriaList, ReviewRecord};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Page template. Replace `{title}`, `{plotly_src}` and `{traces_json}` before writing.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{plotly_src}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
Plotly.newPlot("chart", {traces_json}, {
  title: {text: "{title}"},
  polar: {radialaxis: {visible: true}},
  showlegend: true
});
</script>
</body>
</html>
"#;

/// One Plotly `scatterpolar` trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub r: Vec<u32>,
    pub theta: Vec<String>,
    pub fill: &'static str,
    pub name: String,
}

/// Radial values are the scores in criteria order, angles are the criteria
/// names, the label is the file name.
pub fn project_traces(records: &[ReviewRecord], criteria: &CriteriaList) -> Vec<PolarTrace> {
    records
        .iter()
        .map(|record| PolarTrace {
            trace_type: "scatterpolar",
            r: criteria
                .iter()
                .map(|c| record.score(c).unwrap_or(0))
                .collect(),
            theta: criteria.as_slice().to_vec(),
            fill: "toself",
            name: record.file_name.clone(),
        })
        .collect()
}

pub fn render_html(traces: &[PolarTrace], title: &str) -> Result<String, AppError> {
    // `</` inside an inline script would close the tag early.
    let traces_json = serde_json::to_string(traces)
        .map_err(|e| AppError::Internal(e.into()))?
        .replace("</", "<\\/");
    let title = escape_html(title);

    Ok(PAGE_TEMPLATE
        .replace("{title}", &title)
        .replace("{plotly_src}", PLOTLY_CDN)
        .replace("{traces_json}", &traces_json))
}

pub fn write_chart(path: &Path, traces: &[PolarTrace], title: &str) -> Result<(), AppError> {
    let html = render_html(traces, title)?;
    std::fs::write(path, html).map_err(|e| AppError::io(path, e))?;
    info!("Wrote spider chart with {} traces to {}", traces.len(), path.display());
    Ok(())
}

/// Hands the chart to the desktop's default browser. Failure is logged, not fatal.
pub fn open_in_browser(path: &Path) {
    if let Err(e) = open::that(path) {
        warn!("Could not open {} in a browser: {e}", path.display());
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
