// Output surfaces for parsed reviews: spider chart page and scores CSV.

pub mod chart;
pub mod csv;

pub use self::chart::{open_in_browser, project_traces, write_chart};
pub use self::csv::{read_criteria_header, write_scores_csv};
