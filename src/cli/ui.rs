use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::state::{ConversionState, Phase, is_blank};
use crate::core::summary::{Summary, Units};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Summary,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Summary => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn amount_cell(text: &str) -> Cell {
    if is_blank(text) {
        Cell::new("-")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right)
    } else {
        Cell::new(text.trim()).set_alignment(CellAlignment::Right)
    }
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Empty => "empty",
        Phase::FiatDriven => "fiat entered",
        Phase::CryptoDriven => "crypto entered",
        Phase::Converted => "converted",
    }
}

/// Table of both amount fields, one row per unit.
pub fn fields_table(state: &ConversionState, units: &Units) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![header_cell("Unit"), header_cell("Amount")]);
    table.add_row(vec![Cell::new(&units.fiat), amount_cell(&state.fiat_text)]);
    table.add_row(vec![
        Cell::new(&units.crypto),
        amount_cell(&state.crypto_text),
    ]);
    table
}

/// Prints the field table, the summary lines and any recorded error.
pub fn print_state(state: &ConversionState, units: &Units, summary: Option<&Summary>) {
    println!("{}", fields_table(state, units));
    if let Some(summary) = summary {
        for line in summary.lines() {
            println!("{}", style_text(line, StyleType::Summary));
        }
    }
    if let Some(error) = &state.last_error {
        println!("{}", style_text(&error.to_string(), StyleType::Error));
    }
    let status = if state.is_converting() {
        "converting..."
    } else {
        phase_label(state.phase)
    };
    println!("{}", style_text(status, StyleType::Subtle));
}

/// Creates a spinner shown while a quote request is outstanding.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
