//! CLI command implementations
//!
//! Each submodule implements a specific CLI command; the shared result
//! rendering lives here.

pub mod bezier;
pub mod check;
pub mod poly;

use std::io::Write;

use serde::Serialize;

use crate::config::{OutputConfig, OutputFormat};
use crate::Result;

/// Result of a solve, as printed by `poly` and `bezier`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Coefficients or weights as given on the command line
    pub input: Vec<f64>,
    /// Roots in ascending order
    pub roots: Vec<f64>,
    /// Critical points, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_points: Option<Vec<f64>>,
}

/// Write `report` in the configured format.
pub fn render<W: Write>(out: &mut W, report: &Report, output: &OutputConfig) -> Result<()> {
    match output.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            write_table(out, "Root", &report.roots, output.precision)?;
            if let Some(cpts) = &report.critical_points {
                write_table(out, "Critical point", cpts, output.precision)?;
            }
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, title: &str, values: &[f64], precision: usize) -> Result<()> {
    let cells: Vec<String> = values.iter().map(|v| format!("{:.*}", precision, v)).collect();
    let width = cells
        .iter()
        .map(|c| c.chars().count())
        .chain([title.chars().count(), "(none)".len()])
        .max()
        .unwrap_or(0);
    let rule = "─".repeat(width + 2);

    writeln!(out, "┌─────┬{}┐", rule)?;
    writeln!(out, "│ #   │ {:<width$} │", title, width = width)?;
    writeln!(out, "├─────┼{}┤", rule)?;
    if cells.is_empty() {
        writeln!(out, "│     │ {:<width$} │", "(none)", width = width)?;
    }
    for (i, cell) in cells.iter().enumerate() {
        writeln!(out, "│ {:<3} │ {:>width$} │", i + 1, cell, width = width)?;
    }
    writeln!(out, "└─────┴{}┘", rule)?;
    Ok(())
}
