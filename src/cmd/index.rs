//! Index command implementation.

use crate::cmd::OutputFormat;
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::index::{IndexGroup, build_index};
use crate::load::load_symbol_table;
use crate::ui::stdout_supports_color;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

fn use_colors() -> bool {
    stdout_supports_color()
}

/// Create a header cell (bold when colors enabled)
fn header_cell(text: &str) -> Cell {
    if use_colors() {
        Cell::new(text).add_attribute(Attribute::Bold)
    } else {
        Cell::new(text)
    }
}

/// Create a name cell (cyan, bold when colors enabled)
fn name_cell(text: &str) -> Cell {
    if use_colors() {
        Cell::new(text)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(text)
    }
}

/// Print the alphabetical symbol index
pub fn index(config: &Config, output: OutputFormat) -> anyhow::Result<Vec<Diagnostic>> {
    let loaded = match load_symbol_table(config) {
        Ok(idx) => idx,
        Err(diags) => return Ok(diags),
    };

    let groups = build_index(&loaded.table, &config.render.extension);
    match output {
        OutputFormat::Table => print_table(&groups),
        OutputFormat::Plain => print_plain(&groups),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&groups)?),
    }

    Ok(loaded.warnings)
}

fn print_table(groups: &[IndexGroup]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell(""),
            header_cell("Name"),
            header_cell("Kind"),
            header_cell("Link"),
        ]);

    for group in groups {
        for (i, entry) in group.entries.iter().enumerate() {
            let letter = if i == 0 { group.letter.as_str() } else { "" };
            table.add_row(vec![
                Cell::new(letter),
                name_cell(&entry.name),
                Cell::new(entry.kind.label()),
                Cell::new(entry.destination.href()),
            ]);
        }
    }

    println!("{table}");
}

fn print_plain(groups: &[IndexGroup]) {
    for group in groups {
        for entry in &group.entries {
            println!(
                "{}\t{}\t{}\t{}",
                group.letter,
                entry.name,
                entry.kind,
                entry.destination.href()
            );
        }
    }
}
