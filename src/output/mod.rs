pub mod export;
pub mod formatter;
pub mod table;

pub use export::{
    read_score_rows, read_score_table, remove_comparison, render_top_markdown, render_validation_markdown,
    write_comparison, write_score_table, write_top_markdown, write_validation_reports,
    ResultsLayout,
};
pub use formatter::{
    format_check_line, format_ranked_table, format_score, format_summary,
    format_validation_report, should_use_colors,
};
pub use table::ScoreRow;
