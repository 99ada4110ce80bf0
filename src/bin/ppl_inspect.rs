//! Workbook Inspection Utility
//!
//! Prints a structural overview of a workout workbook for spot-checking
//! before extraction: per-sheet dimensions, phase/week markers found in
//! sheet names, detected day markers, and the exercise names a real
//! extraction would see.
//!
//! Usage: cargo run --bin ppl-inspect [--sample] <workbook>

use anyhow::Result;
use ppl_toolkit::classify;
use ppl_toolkit::extract;
use std::collections::BTreeSet;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let mut show_samples = false;
    let mut path_arg = None;

    for arg in &args[1..] {
        if arg == "--sample" {
            show_samples = true;
        } else if !arg.starts_with('-') {
            path_arg = Some(PathBuf::from(arg));
        }
    }

    let path = match path_arg {
        Some(p) => p,
        None => {
            eprintln!("Usage: {} [--sample] <workbook>", args[0]);
            eprintln!();
            eprintln!("Options:");
            eprintln!("  --sample    Also print the first few rows of each sheet");
            std::process::exit(1);
        }
    };

    if !path.is_file() {
        eprintln!("Error: file {} not found", path.display());
        return Ok(());
    }

    let tables = ppl_toolkit::table::load_tables(&path)?;
    println!("Workbook: {}", path.display());
    println!("Sheets: {}", tables.len());

    for table in &tables {
        println!("\n=== Sheet: {} ===", table.name);
        println!(
            "Dimensions: {} row(s) x {} column(s)",
            table.rows.len(),
            table.width()
        );
        println!(
            "Phase marker: {:?}  Week marker: {:?}",
            classify::phase_marker(&table.name),
            classify::week_marker(&table.name)
        );

        // Day and week markers embedded in the leading column
        let mut day_markers = Vec::new();
        let mut week_markers = Vec::new();
        for (row_idx, row) in table.rows.iter().enumerate() {
            let leading = row.first().map(|s| s.trim()).unwrap_or("");
            if let Some(week) = classify::week_marker(leading) {
                week_markers.push((row_idx, week));
            } else if let Some(marker) = classify::day_marker(leading) {
                day_markers.push((row_idx, marker.key()));
            }
        }
        println!("Week markers: {:?}", week_markers);
        println!("Day markers: {:?}", day_markers);

        // What a real extraction would produce
        let extraction = extract::extract_sheet(table, 1);
        if !extraction.description.is_empty() {
            println!("Description: {}", extraction.description);
        }

        let mut exercise_names: BTreeSet<&str> = BTreeSet::new();
        let mut occurrences = 0usize;
        for days in extraction.weeks.values() {
            for exercises in days.values() {
                for ex in exercises {
                    exercise_names.insert(ex.name.as_str());
                    occurrences += 1;
                }
            }
        }
        println!(
            "Extraction: {} week(s), {} occurrence(s), {} distinct exercise(s)",
            extraction.weeks.len(),
            occurrences,
            exercise_names.len()
        );
        for name in exercise_names.iter().take(15) {
            println!("  - {}", name);
        }
        if exercise_names.len() > 15 {
            println!("  ... and {} more", exercise_names.len() - 15);
        }

        if show_samples {
            println!("Sample rows:");
            for row in table.rows.iter().take(5) {
                println!("  {:?}", row);
            }
        }
    }

    Ok(())
}
