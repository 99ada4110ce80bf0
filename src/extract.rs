//! Heuristic sheet extraction.
//!
//! Turns one loosely formatted sheet into `week -> day-key -> exercises`.
//! The sheets have no fixed schema: header rows may lead the sheet, repeat
//! under every day banner, or be missing entirely; week and day markers are
//! embedded in the leading column; a banner row may describe the phase.
//!
//! Column identification is two-phase (a bounded search for a plausible
//! header row, then a single extraction pass) rather than a re-entrant
//! retry, so the walk happens exactly once per sheet.

use std::collections::BTreeMap;

use crate::classify::{self, ColumnRole};
use crate::model::{DayMap, Exercise};
use crate::table::Table;

/// Day-key used when a sheet has exercise rows but no recognizable day
/// markers at all.
pub const FALLBACK_DAY_KEY: &str = "push1";

/// Column indices for the fields of an exercise row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub warmup_sets: Option<usize>,
    pub working_sets: Option<usize>,
    pub sets: Option<usize>,
    pub reps: Option<usize>,
    pub load: Option<usize>,
    pub intensity: Option<usize>,
    pub rest: Option<usize>,
    /// Up to two substitution columns, in sheet order.
    pub substitutions: Vec<usize>,
    pub notes: Option<usize>,
}

impl ColumnMap {
    /// Map built from a classified header row. First column wins per role.
    pub fn from_header_row(row: &[String]) -> ColumnMap {
        let mut map = ColumnMap {
            name: usize::MAX,
            ..Default::default()
        };

        for (idx, cell) in row.iter().enumerate() {
            match classify::classify_header(cell) {
                ColumnRole::ExerciseName => {
                    if map.name == usize::MAX {
                        map.name = idx;
                    }
                }
                ColumnRole::WarmupSets => fill(&mut map.warmup_sets, idx),
                ColumnRole::WorkingSets => fill(&mut map.working_sets, idx),
                ColumnRole::Sets => fill(&mut map.sets, idx),
                ColumnRole::Reps => fill(&mut map.reps, idx),
                ColumnRole::Load => fill(&mut map.load, idx),
                ColumnRole::Intensity => fill(&mut map.intensity, idx),
                ColumnRole::Rest => fill(&mut map.rest, idx),
                ColumnRole::Substitution => {
                    if map.substitutions.len() < 2 {
                        map.substitutions.push(idx);
                    }
                }
                ColumnRole::Notes => fill(&mut map.notes, idx),
                ColumnRole::Unknown => {}
            }
        }

        map
    }

    /// Positional fallback for sheets with no identifiable header row:
    /// name, sets, reps, intensity, rest.
    pub fn positional() -> ColumnMap {
        ColumnMap {
            name: 0,
            sets: Some(1),
            reps: Some(2),
            intensity: Some(3),
            rest: Some(4),
            ..Default::default()
        }
    }

    pub fn has_name_column(&self) -> bool {
        self.name != usize::MAX
    }

    fn read<'a>(&self, row: &'a [String], idx: Option<usize>) -> &'a str {
        idx.and_then(|i| row.get(i)).map(|s| s.as_str()).unwrap_or("")
    }

    fn read_name<'a>(&self, row: &'a [String]) -> &'a str {
        if self.name == usize::MAX {
            return "";
        }
        row.get(self.name).map(|s| s.trim()).unwrap_or("")
    }

    /// Build an exercise record from a data row; missing columns yield
    /// empty strings.
    pub fn exercise_from_row(&self, row: &[String], name: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            warmup_sets: self.read(row, self.warmup_sets).to_string(),
            working_sets: self.read(row, self.working_sets).to_string(),
            sets: self.read(row, self.sets).to_string(),
            reps: self.read(row, self.reps).to_string(),
            load: self.read(row, self.load).to_string(),
            rpe: self.read(row, self.intensity).to_string(),
            rest: self.read(row, self.rest).to_string(),
            substitution1: self.read(row, self.substitutions.first().copied()).to_string(),
            substitution2: self.read(row, self.substitutions.get(1).copied()).to_string(),
            notes: self.read(row, self.notes).to_string(),
        }
    }
}

fn fill(slot: &mut Option<usize>, idx: usize) {
    if slot.is_none() {
        *slot = Some(idx);
    }
}

/// Result of extracting one sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetExtraction {
    /// Free-text phase description from the sheet's banner row, if any.
    pub description: String,
    /// Week number to day map.
    pub weeks: BTreeMap<u32, DayMap>,
}

/// Count of header-classifiable cells in a row.
fn header_matches(row: &[String]) -> usize {
    row.iter()
        .filter(|cell| classify::classify_header(cell) != ColumnRole::Unknown)
        .count()
}

/// A row is header-like when at least two of its cells classify as header
/// terms. Sheets repeat such rows under each day banner; they are never
/// exercise data.
fn is_header_row(row: &[String]) -> bool {
    header_matches(row) >= 2
}

/// Find the column map for a sheet: the first row with at least two
/// classifiable header terms wins; otherwise fall back to the positional
/// layout.
fn detect_columns(rows: &[&Vec<String>]) -> ColumnMap {
    for row in rows {
        if is_header_row(row) {
            let map = ColumnMap::from_header_row(row);
            if map.has_name_column() {
                log::debug!("Header row identified; name column at index {}", map.name);
                return map;
            }
        }
    }
    log::debug!("No header row found; using positional column fallback");
    ColumnMap::positional()
}

/// Extract one sheet into weeks of day-keyed exercise lists.
///
/// `week_hint` seeds the current week for sheets whose week markers are
/// carried in the sheet name rather than embedded rows.
pub fn extract_sheet(table: &Table, week_hint: u32) -> SheetExtraction {
    // Fully-empty rows carry no information in any layout.
    let rows: Vec<&Vec<String>> = table
        .rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    let mut extraction = SheetExtraction::default();
    let mut start = 0;

    // A leading banner row (single populated cell, no marker, not a header)
    // is the phase description.
    if let Some(first) = rows.first() {
        let populated = first.iter().filter(|c| !c.trim().is_empty()).count();
        let leading = first.first().map(|s| s.trim()).unwrap_or("");
        if populated == 1
            && !leading.is_empty()
            && classify::week_marker(leading).is_none()
            && classify::day_marker(leading).is_none()
            && !is_header_row(first)
        {
            extraction.description = leading.to_string();
            start = 1;
        }
    }

    let data = &rows[start..];
    let columns = detect_columns(data);

    let mut current_week = week_hint.max(1);
    let mut current_day: Option<String> = None;
    let mut pending: Vec<Exercise> = Vec::new();
    let mut orphans: Vec<Exercise> = Vec::new();
    let mut saw_day_marker = false;

    for row in data {
        let leading = row.first().map(|s| s.trim()).unwrap_or("");

        if let Some(week) = classify::week_marker(leading) {
            // Close the pending day under the outgoing week before moving on.
            flush_day(&mut extraction.weeks, current_week, &mut current_day, &mut pending);
            current_week = week;
            continue;
        }

        if let Some(marker) = classify::day_marker(leading) {
            flush_day(&mut extraction.weeks, current_week, &mut current_day, &mut pending);
            current_day = Some(marker.key());
            saw_day_marker = true;
            continue;
        }

        if is_header_row(row) {
            continue;
        }

        let name = columns.read_name(row);
        if name.is_empty() || classify::is_header_synonym(name) {
            continue;
        }

        let exercise = columns.exercise_from_row(row, name);
        match current_day {
            Some(_) => pending.push(exercise),
            None => orphans.push(exercise),
        }
    }

    flush_day(&mut extraction.weeks, current_week, &mut current_day, &mut pending);

    // No day markers anywhere but real exercise rows: bucket them under a
    // single default day so the sheet still contributes.
    if !saw_day_marker && !orphans.is_empty() {
        log::warn!(
            "Sheet '{}': no day markers found; defaulting {} exercise(s) to '{}'",
            table.name,
            orphans.len(),
            FALLBACK_DAY_KEY
        );
        extraction
            .weeks
            .entry(current_week)
            .or_default()
            .insert(FALLBACK_DAY_KEY.to_string(), orphans);
    }

    extraction
}

/// Move the pending exercise list under its day-key. The first block seen
/// for a key wins; later duplicate day headers are ignored for that key.
/// Days with no exercises leave no entry.
fn flush_day(
    weeks: &mut BTreeMap<u32, DayMap>,
    week: u32,
    current_day: &mut Option<String>,
    pending: &mut Vec<Exercise>,
) {
    let Some(day) = current_day.take() else {
        return;
    };
    if pending.is_empty() {
        return;
    }
    let exercises = std::mem::take(pending);
    let day_map = weeks.entry(week).or_default();
    if day_map.contains_key(&day) {
        log::debug!(
            "week{}: duplicate day header '{}'; keeping first block, ignoring {} exercise(s)",
            week,
            day,
            exercises.len()
        );
        return;
    }
    day_map.insert(day, exercises);
}
