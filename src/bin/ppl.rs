//! PPL CLI - Extract, analyze, and render workout programs
//!
//! Subcommands mirror the pipeline stages: `extract` writes the normalized
//! extraction JSON, `analyze` writes the progression/library analysis JSON,
//! `render` turns either JSON into a self-contained tracker page, and
//! `split-weeks` emits per-week app files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ppl_toolkit::pipeline::{
    self, ExtractConfig, SplitConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ppl")]
#[command(about = "Extract and analyze Push/Pull/Legs workout program spreadsheets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a workbook into normalized workout-data JSON
    Extract {
        /// Input workbook (.xlsx, .xls, or .csv)
        input: PathBuf,

        /// Output JSON path (default: <input>_workout_data.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Program display name (default: input file stem)
        #[arg(long)]
        name: Option<String>,
    },

    /// Extract a workbook and write the progression/library analysis JSON
    Analyze {
        /// Input workbook (.xlsx, .xls, or .csv)
        input: PathBuf,

        /// Output JSON path (default: <input>_analysis.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Program display name (default: input file stem)
        #[arg(long)]
        name: Option<String>,
    },

    /// Render a tracker page from an extraction or analysis JSON
    Render {
        /// Input JSON file
        input: PathBuf,

        /// Output HTML path (default: <input>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split an extraction JSON into per-week app files
    SplitWeeks {
        /// Input extraction JSON file
        input: PathBuf,

        /// Output directory for phaseN-weekN.json files
        #[arg(short, long, default_value = "exercise-data")]
        output_dir: PathBuf,

        /// Replace per-week files that already exist
        #[arg(long)]
        overwrite: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            name,
        } => {
            if missing(&input) {
                return Ok(());
            }
            let program = pipeline::extract_program(&ExtractConfig {
                source: input.clone(),
                program_name: name,
            })?;
            let output = output.unwrap_or_else(|| suffixed(&input, "_workout_data.json"));
            pipeline::write_pretty_json(&output, &program)?;

            let occurrences: usize = program
                .phases
                .values()
                .flat_map(|p| p.weeks.values())
                .flat_map(|w| w.values())
                .map(|d| d.len())
                .sum();
            println!(
                "Extracted {} exercise occurrence(s) across {} phase(s)",
                occurrences, program.program_info.phases
            );
            println!("Workout data saved to {}", output.display());
        }

        Commands::Analyze {
            input,
            output,
            name,
        } => {
            if missing(&input) {
                return Ok(());
            }
            let report = pipeline::analyze_program(&ExtractConfig {
                source: input.clone(),
                program_name: name,
            })?;
            let output = output.unwrap_or_else(|| suffixed(&input, "_analysis.json"));
            pipeline::write_pretty_json(&output, &report)?;

            println!(
                "Analyzed {} exercise(s), {} progression pattern(s)",
                report.exercise_library.len(),
                report.progression_patterns.len()
            );
            println!("Analysis saved to {}", output.display());
        }

        Commands::Render { input, output } => {
            if missing(&input) {
                return Ok(());
            }
            let page = pipeline::render_page(&input)?;
            let output = output.unwrap_or_else(|| input.with_extension("html"));
            fs::write(&output, page)?;
            println!("Page saved to {}", output.display());
        }

        Commands::SplitWeeks {
            input,
            output_dir,
            overwrite,
        } => {
            if missing(&input) {
                return Ok(());
            }
            let written = pipeline::split_weeks(&SplitConfig {
                source: input,
                output_dir: output_dir.clone(),
                overwrite,
            })?;
            println!(
                "Generated {} week file(s) in {}",
                written,
                output_dir.display()
            );
        }
    }

    Ok(())
}

/// Missing input is reported without raising: print and exit cleanly.
fn missing(path: &Path) -> bool {
    if path.is_file() {
        false
    } else {
        eprintln!("Error: file {} not found", path.display());
        true
    }
}

/// "program.xlsx" -> "program_workout_data.json"
fn suffixed(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}{}", stem, suffix))
}
