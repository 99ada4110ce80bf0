//! Pipeline functions for programmatic use by the CLI binaries.
//!
//! Each operation takes an explicit configuration struct; nothing reads
//! process-wide state. The whole pipeline is a single synchronous pass:
//! load tables, extract, normalize, analyze, render. Failure at any stage
//! aborts the run and writes no artifact.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{self, AnalysisReport};
use crate::classify;
use crate::extract;
use crate::model::{day_title, key_number, Program};
use crate::normalize;
use crate::render;
use crate::table;

// ============================================================================
// Extraction
// ============================================================================

/// Configuration for extracting a workbook into a [`Program`].
pub struct ExtractConfig {
    /// Input workbook path (.xlsx, .xls, or a single-sheet .csv export)
    pub source: PathBuf,
    /// Program display name; defaults to the source file stem
    pub program_name: Option<String>,
}

/// Extract every sheet of the source workbook into one program.
///
/// Sheets are assigned to phases by a "Phase N" marker in the sheet name
/// (defaulting to phase 1), and weeks by embedded "Week N" rows, seeded
/// from the sheet name when it carries a week marker instead.
pub fn extract_program(config: &ExtractConfig) -> Result<Program> {
    let tables = table::load_tables(&config.source)?;

    let mut program = Program::default();
    program.program_info.name = config
        .program_name
        .clone()
        .unwrap_or_else(|| source_stem(&config.source));

    for t in &tables {
        let phase_no = classify::phase_marker(&t.name).unwrap_or(1);
        let week_hint = classify::week_marker(&t.name).unwrap_or(1);

        let extraction = extract::extract_sheet(t, week_hint);
        if extraction.weeks.is_empty() {
            log::info!("Sheet '{}': no workout data found, skipping", t.name);
            continue;
        }

        let phase = program.phases.entry(format!("phase{}", phase_no)).or_default();
        if phase.description.is_empty() && !extraction.description.is_empty() {
            phase.description = extraction.description;
        }

        let mut exercise_count = 0usize;
        for (week_no, days) in extraction.weeks {
            let week = phase.weeks.entry(format!("week{}", week_no)).or_default();
            for (day_key, mut exercises) in days {
                for ex in exercises.iter_mut() {
                    normalize::normalize_exercise(ex);
                }
                exercise_count += exercises.len();
                // First sheet to populate a day-key wins, like duplicate
                // headers within a sheet.
                week.entry(day_key).or_insert(exercises);
            }
        }
        log::info!(
            "Sheet '{}': phase {}, {} exercise occurrence(s)",
            t.name,
            phase_no,
            exercise_count
        );
    }

    program.recompute_info();
    Ok(program)
}

/// Extract and immediately analyze.
pub fn analyze_program(config: &ExtractConfig) -> Result<AnalysisReport> {
    let program = extract_program(config)?;
    Ok(analysis::analyze(&program))
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a tracker page from a previously written JSON artifact. Both the
/// extraction shape (`program_info`) and the analysis shape
/// (`program_structure`) are accepted.
pub fn render_page(input: &Path) -> Result<String> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read JSON input: {}", input.display()))?;

    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed JSON input: {}", input.display()))?;

    let program = if value.get("program_info").is_some() {
        serde_json::from_value::<Program>(value).context("Malformed extraction JSON")?
    } else if value.get("program_structure").is_some() {
        let report: AnalysisReport =
            serde_json::from_value(value).context("Malformed analysis JSON")?;
        report.to_program(&source_stem(input))
    } else {
        anyhow::bail!(
            "Unrecognized JSON shape in {} (expected program_info or program_structure)",
            input.display()
        );
    };

    Ok(render::render_program(&program))
}

// ============================================================================
// Per-week app files
// ============================================================================

/// Configuration for splitting an extraction JSON into per-week app files.
pub struct SplitConfig {
    /// Extraction JSON path
    pub source: PathBuf,
    /// Directory receiving `phaseN-weekN.json` files
    pub output_dir: PathBuf,
    /// Rewrite files that already exist
    pub overwrite: bool,
}

/// Exercise record in the app's per-week format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppExercise {
    pub id: String,
    pub name: String,
    pub warmup_sets: String,
    pub working_sets: String,
    pub reps: String,
    pub rpe: String,
    pub rest: String,
    pub link: String,
    pub notes: String,
    pub substitutions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDay {
    pub title: String,
    pub exercises: Vec<AppExercise>,
}

/// One `phaseN-weekN.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekFile {
    pub phase: u32,
    pub week: u32,
    pub description: String,
    pub days: BTreeMap<String, AppDay>,
}

/// Split an extraction JSON into one file per (phase, week). Returns the
/// number of files written; existing files are skipped unless `overwrite`
/// is set.
pub fn split_weeks(config: &SplitConfig) -> Result<usize> {
    let program = load_program(&config.source)?;

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let mut written = 0usize;
    for (phase_key, phase) in &program.phases {
        let phase_no = key_number(phase_key).unwrap_or(0);
        let description = if phase.description.is_empty() {
            render::default_phase_description(phase_no).to_string()
        } else {
            phase.description.clone()
        };

        for (week_key, days) in &phase.weeks {
            let week_no = key_number(week_key).unwrap_or(0);
            let path = config
                .output_dir
                .join(format!("phase{}-week{}.json", phase_no, week_no));

            if path.exists() && !config.overwrite {
                log::info!("{} exists, skipping (use overwrite to replace)", path.display());
                continue;
            }

            let mut file = WeekFile {
                phase: phase_no,
                week: week_no,
                description: description.clone(),
                days: BTreeMap::new(),
            };

            for (day_key, exercises) in days {
                file.days.insert(
                    day_key.clone(),
                    AppDay {
                        title: day_title(day_key),
                        exercises: exercises.iter().map(app_exercise).collect(),
                    },
                );
            }

            write_pretty_json(&path, &file)?;
            log::info!("Generated {}", path.display());
            written += 1;
        }
    }

    Ok(written)
}

fn app_exercise(ex: &crate::model::Exercise) -> AppExercise {
    let substitutions: Vec<String> = [&ex.substitution1, &ex.substitution2]
        .into_iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect();

    AppExercise {
        id: normalize::exercise_id(&ex.name),
        name: ex.name.clone(),
        warmup_sets: ex.warmup_sets.clone(),
        working_sets: ex.effective_sets().to_string(),
        reps: ex.reps.clone(),
        rpe: ex.rpe.clone(),
        rest: compact_rest(&ex.rest),
        link: exercise_link(&ex.name),
        notes: ex.notes.clone(),
        substitutions,
    }
}

/// Shorten a rest prescription for the app's narrow columns: "~2 min" -> "2m".
fn compact_rest(rest: &str) -> String {
    rest.replace('~', "").replace(" min", "m").trim().to_string()
}

/// YouTube form-check search link for an exercise.
fn exercise_link(name: &str) -> String {
    let query = format!("how to do {} exercise form", name);
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(&query)
    )
}

// ============================================================================
// JSON I/O helpers
// ============================================================================

/// Read an extraction JSON back into a [`Program`].
pub fn load_program(path: &Path) -> Result<Program> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON input: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Malformed extraction JSON: {}", path.display()))
}

/// Write any serializable artifact as pretty-printed JSON.
pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn source_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Workout Program")
        .to_string()
}
