//! Program-level analysis report.
//!
//! Builds the second JSON artifact from a completed [`Program`]: overall
//! structure counts, the workout data itself, an exercise library with
//! typical prescriptions and muscle-group tags, detected progression
//! patterns, and an index of distinct set/rep/RPE schemes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{key_number, DayMap, Program};
use crate::muscles;
use crate::progression::{self, ProgressionRecord};

/// Overall shape of the program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramStructure {
    /// Phase numbers in ascending order.
    pub phases: Vec<u32>,
    pub weeks_per_phase: u32,
    pub days_per_week: u32,
    /// Reserved for a whole-program progression label; individual patterns
    /// live in `progression_patterns`.
    pub progression_pattern: Option<String>,
}

/// Library entry per distinct exercise name. "Typical" fields keep the
/// first-seen values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub muscle_groups: Vec<String>,
    pub variations: Vec<String>,
    pub typical_sets: String,
    pub typical_reps: String,
    pub typical_rest: String,
    pub typical_rpe: String,
}

/// One distinct sets/reps/RPE combination and the exercises prescribed
/// with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetRepScheme {
    pub sets: String,
    pub reps: String,
    pub rpe: String,
    pub exercises: Vec<String>,
}

/// The analysis JSON artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub program_structure: ProgramStructure,
    /// Phase-key to week-key to day map, mirroring the extraction shape
    /// without descriptions.
    pub workout_data: BTreeMap<String, BTreeMap<String, DayMap>>,
    pub exercise_library: BTreeMap<String, LibraryEntry>,
    pub progression_patterns: BTreeMap<String, ProgressionRecord>,
    pub set_rep_schemes: BTreeMap<String, SetRepScheme>,
}

impl AnalysisReport {
    /// Reassemble a [`Program`] from the report's workout data, so the
    /// renderer can consume either JSON shape.
    pub fn to_program(&self, name: &str) -> Program {
        let mut program = Program::default();
        program.program_info.name = name.to_string();
        for (phase_key, weeks) in &self.workout_data {
            let phase = program.phases.entry(phase_key.clone()).or_default();
            for (week_key, days) in weeks {
                phase.weeks.insert(week_key.clone(), days.clone());
            }
        }
        program.recompute_info();
        program
    }
}

/// Build the full analysis report from an extracted program.
pub fn analyze(program: &Program) -> AnalysisReport {
    let mut report = AnalysisReport {
        program_structure: ProgramStructure {
            phases: program.phase_numbers(),
            weeks_per_phase: program.program_info.weeks_per_phase,
            days_per_week: program.program_info.days_per_week,
            progression_pattern: None,
        },
        ..Default::default()
    };

    for (phase_key, phase) in &program.phases {
        let weeks = report.workout_data.entry(phase_key.clone()).or_default();
        for (week_key, days) in &phase.weeks {
            weeks.insert(week_key.clone(), days.clone());

            for exercises in days.values() {
                for ex in exercises {
                    let name = ex.name.trim();
                    if name.is_empty() {
                        continue;
                    }

                    report
                        .exercise_library
                        .entry(name.to_string())
                        .or_insert_with(|| LibraryEntry {
                            muscle_groups: muscles::detect_muscle_groups(name),
                            variations: Vec::new(),
                            typical_sets: ex.effective_sets().to_string(),
                            typical_reps: ex.reps.clone(),
                            typical_rest: ex.rest.clone(),
                            typical_rpe: ex.rpe.clone(),
                        });

                    let scheme_key =
                        format!("{}-{}-{}", ex.effective_sets(), ex.reps, ex.rpe);
                    let scheme = report
                        .set_rep_schemes
                        .entry(scheme_key)
                        .or_insert_with(|| SetRepScheme {
                            sets: ex.effective_sets().to_string(),
                            reps: ex.reps.clone(),
                            rpe: ex.rpe.clone(),
                            exercises: Vec::new(),
                        });
                    if !scheme.exercises.iter().any(|n| n == name) {
                        scheme.exercises.push(name.to_string());
                    }
                }
            }
        }
    }

    report.progression_patterns = progression::analyze_program(program);

    // Fall back to deriving the counts when the caller did not populate
    // program_info (e.g. a hand-built structure in tests).
    if report.program_structure.weeks_per_phase == 0 {
        report.program_structure.weeks_per_phase = program
            .phases
            .values()
            .flat_map(|p| p.weeks.keys())
            .filter_map(|k| key_number(k))
            .max()
            .unwrap_or(1);
    }
    if report.program_structure.days_per_week == 0 {
        report.program_structure.days_per_week = program
            .phases
            .values()
            .next()
            .and_then(|p| p.weeks.values().next())
            .map(|d| d.len() as u32)
            .unwrap_or(0);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Exercise, Phase};

    fn exercise(name: &str, sets: &str, reps: &str, rpe: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets: sets.to_string(),
            reps: reps.to_string(),
            rpe: rpe.to_string(),
            rest: "2 min".to_string(),
            ..Default::default()
        }
    }

    fn sample_program() -> Program {
        let mut program = Program::default();
        let mut phase = Phase::default();
        for (week, sets) in [("week1", "3"), ("week2", "4")] {
            let mut days = DayMap::new();
            days.insert(
                "push1".to_string(),
                vec![
                    exercise("Bench Press", sets, "8-10", "8-9"),
                    exercise("Cable Fly", "3", "12-15", "9"),
                ],
            );
            phase.weeks.insert(week.to_string(), days);
        }
        program.phases.insert("phase1".to_string(), phase);
        program.recompute_info();
        program
    }

    #[test]
    fn test_library_first_seen_wins() {
        let report = analyze(&sample_program());
        let entry = report.exercise_library.get("Bench Press").unwrap();
        // week1 prescription sticks even though week2 moved to 4 sets
        assert_eq!(entry.typical_sets, "3");
        assert_eq!(entry.typical_reps, "8-10");
        assert!(entry.muscle_groups.contains(&"chest".to_string()));
    }

    #[test]
    fn test_set_rep_schemes_deduplicate_exercises() {
        let report = analyze(&sample_program());
        let scheme = report.set_rep_schemes.get("3-12-15-9").unwrap();
        assert_eq!(scheme.exercises, vec!["Cable Fly"]);
        assert_eq!(scheme.sets, "3");
        assert_eq!(scheme.reps, "12-15");
    }

    #[test]
    fn test_progression_patterns_present() {
        let report = analyze(&sample_program());
        assert!(report.progression_patterns.contains_key("Bench Press"));
        assert!(report.progression_patterns.contains_key("Cable Fly"));
    }

    #[test]
    fn test_structure_counts() {
        let report = analyze(&sample_program());
        assert_eq!(report.program_structure.phases, vec![1]);
        assert_eq!(report.program_structure.weeks_per_phase, 2);
        assert_eq!(report.program_structure.days_per_week, 1);
        assert!(report.program_structure.progression_pattern.is_none());
    }

    #[test]
    fn test_report_roundtrip() {
        let report = analyze(&sample_program());
        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
