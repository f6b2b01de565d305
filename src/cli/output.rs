use colored::Colorize;
use std::fmt;

/// Plain informational line.
pub fn info(message: impl fmt::Display) {
    println!("[i] {message}");
}

pub fn success(message: impl fmt::Display) {
    println!("{}", format!("[✓] {message}").bright_green());
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", format!("[!] {message}").bright_yellow());
}

pub fn error(message: impl fmt::Display) {
    println!("{}", format!("[x] {message}").bright_red());
}

pub fn hint(message: impl fmt::Display) {
    println!("{}", format!("    {message}").dimmed());
}

pub fn section(title: impl fmt::Display) {
    println!("\n{}", format!("=== {} ===", title).bold());
}

/// Renders rows as left-aligned columns sized to their widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() && cell.chars().count() > widths[idx] {
                widths[idx] = cell.chars().count();
            }
        }
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{header:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.bold());
    println!(
        "{}",
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }
}
