//! Terminal tables for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use fmtrules_cli::report::{CheckReport, RuleListing};

pub fn print_rule_table(listings: &[RuleListing]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Case"),
        header_cell("Message"),
        header_cell("Replaced by"),
    ]);
    apply_table_style(&mut table);
    for listing in listings {
        let name = if listing.deprecated_by.is_some() {
            Cell::new(&listing.name).fg(Color::DarkGrey)
        } else {
            Cell::new(&listing.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            name,
            Cell::new(listing.case.label()),
            Cell::new(&listing.message),
            match &listing.deprecated_by {
                Some(replacement) => Cell::new(replacement).fg(Color::Yellow),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

pub fn print_check_report(report: &CheckReport) {
    println!("Attribute: {}", report.attribute);
    println!("Rule: {}", report.rule);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Result")]);
    apply_table_style(&mut table);
    for outcome in &report.outcomes {
        let result = match &outcome.failure {
            None => Cell::new("ok").fg(Color::Green),
            Some(message) => Cell::new(message)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        };
        table.add_row(vec![Cell::new(&outcome.value), result]);
    }
    println!("{table}");
    let failures = report.failure_count();
    if failures > 0 {
        eprintln!("{failures} of {} values failed", report.outcomes.len());
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
