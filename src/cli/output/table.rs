//! Table output formatting for CLI commands
//!
//! Renders progress lists with comfy-table, color-coding states when the
//! terminal allows it.

use crate::domain::models::{ProgressItem, ProgressState};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format repository progress as a table
    pub fn format_progress(&self, items: &[ProgressItem]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Repository").add_attribute(Attribute::Bold),
            Cell::new("State").add_attribute(Attribute::Bold),
            Cell::new("URL").add_attribute(Attribute::Bold),
        ]);

        for item in items {
            let state_cell = if self.use_colors {
                Cell::new(item.state).fg(state_color(item.state))
            } else {
                Cell::new(format!("{} {}", state_icon(item.state), item.state))
            };

            table.add_row(vec![
                Cell::new(&item.repository),
                state_cell,
                Cell::new(item.repository_url.as_deref().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

const fn state_color(state: ProgressState) -> Color {
    match state {
        ProgressState::Pending => Color::DarkGrey,
        ProgressState::Started => Color::Yellow,
        ProgressState::Finished => Color::Green,
    }
}

const fn state_icon(state: ProgressState) -> &'static str {
    match state {
        ProgressState::Pending => "○",
        ProgressState::Started => "◐",
        ProgressState::Finished => "●",
    }
}

fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
