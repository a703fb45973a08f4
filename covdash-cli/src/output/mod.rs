//! Output formatting for CLI.

mod json;
mod text;

pub use json::{ChartOutput, JsonFormatter, ListOutput, SearchOutput, SummaryOutput};
pub use text::TextFormatter;
