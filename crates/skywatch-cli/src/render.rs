use std::io::{self, Write};

use colored::Colorize;
use skywatch_types::Aircraft;

pub const NO_DATA: &str = "No data to display";

/// Write a titled, numbered aircraft list followed by its total.
pub fn print_list<W: Write>(out: &mut W, aircraft: &[Aircraft], title: &str) -> io::Result<()> {
    if !title.is_empty() {
        writeln!(out, "\n--- {} ---", title.bold())?;
    }
    if aircraft.is_empty() {
        writeln!(out, "{}", NO_DATA.dimmed())?;
        return Ok(());
    }
    for (i, a) in aircraft.iter().enumerate() {
        writeln!(out, "{:2}. {}", i + 1, a)?;
    }
    writeln!(out, "\nTotal: {} aircraft", aircraft.len())
}

pub fn print_header<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "\n{rule}")?;
    writeln!(out, " {}", text.bold())?;
    writeln!(out, "{rule}")
}

pub fn print_error<W: Write>(out: &mut W, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{} {}", "Error:".red().bold(), message)
}
