//! Progression pattern analysis.
//!
//! For every exercise that appears more than once across the program, the
//! analyzer collects its prescriptions in (phase, week) order and classifies
//! the periodization style. Classification is an ordered precedence: the
//! linear checks run first and can absorb a mostly-increasing sequence with
//! one dip; wave and undulating only see what linear rejected.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{day_key_rank, key_number, Program};

/// Periodization style inferred from an exercise's prescription sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionType {
    #[serde(rename = "Linear Sets Progression")]
    LinearSets,
    #[serde(rename = "Linear Reps Progression")]
    LinearReps,
    #[serde(rename = "Linear Intensity Progression")]
    LinearIntensity,
    #[serde(rename = "Double Progression")]
    Double,
    #[serde(rename = "Wave Loading")]
    Wave,
    #[serde(rename = "Undulating Periodization")]
    Undulating,
    #[serde(rename = "Consistent Parameters")]
    Consistent,
}

impl ProgressionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressionType::LinearSets => "Linear Sets Progression",
            ProgressionType::LinearReps => "Linear Reps Progression",
            ProgressionType::LinearIntensity => "Linear Intensity Progression",
            ProgressionType::Double => "Double Progression",
            ProgressionType::Wave => "Wave Loading",
            ProgressionType::Undulating => "Undulating Periodization",
            ProgressionType::Consistent => "Consistent Parameters",
        }
    }
}

impl std::fmt::Display for ProgressionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timeline summary for one exercise name. Built once per run from the
/// completed program; never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    /// Number of occurrences across the whole program.
    pub frequency: usize,
    pub phases_present: Vec<String>,
    pub days_present: Vec<String>,
    /// Raw set-count values in timeline order, empty fields skipped.
    pub sets_progression: Vec<String>,
    pub reps_progression: Vec<String>,
    pub rpe_progression: Vec<String>,
    pub progression_type: ProgressionType,
}

lazy_static! {
    static ref RANGE: Regex = Regex::new(r"(\d+)\s*(?:-|~|to)\s*(\d+)").unwrap();
    static ref FIRST_INT: Regex = Regex::new(r"\d+").unwrap();
}

/// Classify progression for every exercise appearing more than once.
pub fn analyze_program(program: &Program) -> BTreeMap<String, ProgressionRecord> {
    struct Occurrence {
        phase_key: String,
        day_key: String,
        sets: String,
        reps: String,
        rpe: String,
    }

    let mut timelines: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();

    // Phase and week keys sort numerically; a lexicographic sort of the key
    // strings would file "week10" before "week2".
    let mut phase_keys: Vec<&String> = program.phases.keys().collect();
    phase_keys.sort_by_key(|k| key_number(k).unwrap_or(0));

    for phase_key in phase_keys {
        let phase = &program.phases[phase_key.as_str()];
        let mut week_keys: Vec<&String> = phase.weeks.keys().collect();
        week_keys.sort_by_key(|k| key_number(k).unwrap_or(0));

        for week_key in week_keys {
            let days = &phase.weeks[week_key.as_str()];
            let mut day_keys: Vec<&String> = days.keys().collect();
            day_keys.sort_by_key(|k| day_key_rank(k));

            for day_key in day_keys {
                for ex in &days[day_key.as_str()] {
                    let name = ex.name.trim();
                    if name.is_empty() {
                        continue;
                    }
                    timelines.entry(name.to_string()).or_default().push(Occurrence {
                        phase_key: phase_key.clone(),
                        day_key: day_key.clone(),
                        sets: ex.effective_sets().to_string(),
                        reps: ex.reps.clone(),
                        rpe: ex.rpe.clone(),
                    });
                }
            }
        }
    }

    let mut records = BTreeMap::new();
    for (name, occurrences) in timelines {
        if occurrences.len() < 2 {
            continue;
        }

        let sets: Vec<String> = occurrences
            .iter()
            .map(|o| o.sets.clone())
            .filter(|v| !v.is_empty())
            .collect();
        let reps: Vec<String> = occurrences
            .iter()
            .map(|o| o.reps.clone())
            .filter(|v| !v.is_empty())
            .collect();
        let rpe: Vec<String> = occurrences
            .iter()
            .map(|o| o.rpe.clone())
            .filter(|v| !v.is_empty())
            .collect();

        let phases_present: BTreeSet<String> =
            occurrences.iter().map(|o| o.phase_key.clone()).collect();
        let days_present: BTreeSet<String> =
            occurrences.iter().map(|o| o.day_key.clone()).collect();

        records.insert(
            name,
            ProgressionRecord {
                frequency: occurrences.len(),
                phases_present: phases_present.into_iter().collect(),
                days_present: days_present.into_iter().collect(),
                progression_type: classify_progression(&sets, &reps, &rpe),
                sets_progression: sets,
                reps_progression: reps,
                rpe_progression: rpe,
            },
        );
    }

    records
}

/// Ordered-precedence classification over the three raw sequences.
pub fn classify_progression(
    sets: &[String],
    reps: &[String],
    rpe: &[String],
) -> ProgressionType {
    let sets_numeric = parse_all_numeric(sets);
    let rep_mins = extract_range_mins(reps);
    let rpe_mins = extract_range_mins(rpe);

    if sets_numeric.as_deref().is_some_and(is_increasing) {
        ProgressionType::LinearSets
    } else if is_increasing(&rep_mins) {
        ProgressionType::LinearReps
    } else if is_increasing(&rpe_mins) {
        ProgressionType::LinearIntensity
    } else if is_repeating_range(reps) {
        ProgressionType::Double
    } else if sets_numeric.as_deref().is_some_and(is_wave)
        || is_wave(&rep_mins)
        || is_wave(&rpe_mins)
    {
        ProgressionType::Wave
    } else if has_variation(sets) || has_variation(reps) || has_variation(rpe) {
        ProgressionType::Undulating
    } else {
        ProgressionType::Consistent
    }
}

/// All values parsed as numbers, or None if any value is non-numeric.
fn parse_all_numeric(values: &[String]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }
    values.iter().map(|v| v.trim().parse::<f64>().ok()).collect()
}

/// Minimum of each range value: "8-10", "8~10", and "8 to 10" yield 8;
/// otherwise the first integer in the string; entries with no digits at all
/// contribute nothing.
pub fn extract_range_mins(values: &[String]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|v| {
            if let Some(caps) = RANGE.captures(v) {
                caps.get(1)?.as_str().parse().ok()
            } else {
                FIRST_INT.find(v)?.as_str().parse().ok()
            }
        })
        .collect()
}

/// Upward-trend test. Plateaus do not break the trend: the sequence must
/// contain at least one strict increase and its count of non-decreasing
/// adjacent pairs must exceed 60% of the sequence length. [2,2,2,3,3,3]
/// trends upward; [8,9,8,9] does not.
fn is_increasing(values: &[f64]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let non_decreasing = values.windows(2).filter(|w| w[0] <= w[1]).count();
    let any_strict = values.windows(2).any(|w| w[0] < w[1]);
    any_strict && (non_decreasing as f64) > values.len() as f64 * 0.6
}

/// The same range string repeating across most occurrences with at least
/// some variation elsewhere in the sequence: reps climb within a fixed
/// range before load increases. (Load itself is not tracked numerically, so
/// the repeat is the only observable signal.)
fn is_repeating_range(values: &[String]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let distinct: BTreeSet<&str> = values.iter().map(|v| v.as_str()).collect();
    distinct.len() > 1 && (distinct.len() as f64) < values.len() as f64 * 0.5
}

/// Direction-of-change reversal test: at least one adjacent pair of
/// non-zero directions with opposite signs.
fn is_wave(values: &[f64]) -> bool {
    if values.len() < 3 {
        return false;
    }
    let directions: Vec<i8> = values
        .windows(2)
        .map(|w| {
            if w[0] < w[1] {
                1
            } else if w[0] > w[1] {
                -1
            } else {
                0
            }
        })
        .collect();
    directions
        .windows(2)
        .any(|d| d[0] != 0 && d[1] != 0 && d[0] != d[1])
}

/// More than one distinct value, compared numerically when the whole
/// sequence parses and as raw strings otherwise.
fn has_variation(values: &[String]) -> bool {
    if values.len() < 2 {
        return false;
    }
    if let Some(numbers) = parse_all_numeric(values) {
        let mut sorted = numbers;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted.windows(2).any(|w| w[0] != w[1])
    } else {
        let distinct: BTreeSet<&str> = values.iter().map(|v| v.as_str()).collect();
        distinct.len() > 1
    }
}
