mod report;
mod summary;

pub use report::{render_markdown, render_text, write_input_report};
pub use summary::{write_summary, SummaryReport};
