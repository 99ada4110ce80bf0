//! Integration tests for the extraction pipeline.
//!
//! These exercise the same code paths the `ppl` binary uses: CSV input
//! through `pipeline::extract_program`, JSON artifacts through the round
//! trip, and the per-week split output.

use ppl_toolkit::analysis;
use ppl_toolkit::model::Program;
use ppl_toolkit::pipeline::{self, ExtractConfig, SplitConfig};
use ppl_toolkit::progression::ProgressionType;
use std::fs;
use std::io::Write;

fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn extract(lines: &[&str]) -> Program {
    let file = write_csv(lines);
    pipeline::extract_program(&ExtractConfig {
        source: file.path().to_path_buf(),
        program_name: Some("Test".to_string()),
    })
    .unwrap()
}

#[test]
fn test_end_to_end_scenario() {
    // The canonical minimal sheet: week marker, day marker, one exercise row
    let program = extract(&[
        "Week 1,,,,",
        "Push Day #1,,,,",
        "Bench Press,3,8-10,8-9,2 min",
    ]);

    let exercises = &program.phases["phase1"].weeks["week1"]["push1"];
    assert_eq!(exercises.len(), 1);
    let ex = &exercises[0];
    assert_eq!(ex.name, "Bench Press");
    assert_eq!(ex.sets, "3");
    assert_eq!(ex.reps, "8-10");
    assert_eq!(ex.rpe, "8-9");
    assert_eq!(ex.rest, "2 min");

    // and the serialized record carries exactly those fields
    let json = serde_json::to_value(ex).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Bench Press",
            "sets": "3",
            "reps": "8-10",
            "rpe": "8-9",
            "rest": "2 min"
        })
    );
}

#[test]
fn test_every_occurrence_has_a_real_name() {
    let program = extract(&[
        "Week 1,,,,",
        "Push Day #1,,,,",
        "Exercise,Sets,Reps,RPE,Rest",
        "Bench Press,3,8-10,8-9,2 min",
        ",4,10,9,90 sec",
        "exercise,,,,",
        "Cable Fly,3,12-15,9,90 sec",
    ]);

    let exercises = &program.phases["phase1"].weeks["week1"]["push1"];
    assert_eq!(exercises.len(), 2);
    for ex in exercises {
        assert!(!ex.name.is_empty());
        assert_ne!(ex.name.to_lowercase(), "exercise");
    }
}

#[test]
fn test_duplicate_day_blocks_first_wins() {
    let program = extract(&[
        "Week 1,,,,",
        "Push Day #1,,,,",
        "Bench Press,3,8-10,8-9,2 min",
        "Push Day #1,,,,",
        "Machine Fly,3,12-15,9,90 sec",
    ]);

    let week = &program.phases["phase1"].weeks["week1"];
    assert_eq!(week.len(), 1);
    let push1 = &week["push1"];
    assert_eq!(push1.len(), 1);
    assert_eq!(push1[0].name, "Bench Press");
}

#[test]
fn test_extraction_json_roundtrip() {
    let program = extract(&[
        "Week 1,,,,",
        "Push Day #1,,,,",
        "Bench Press,3,8-10,8-9,2 min",
        "Week 2,,,,",
        "Pull Day #1,,,,",
        "Barbell Row,4,6-8,8,2 min",
        "Legs Day #1,,,,",
        "Back Squat,3,5,9,3 min",
    ]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("program.json");
    pipeline::write_pretty_json(&path, &program).unwrap();
    let back = pipeline::load_program(&path).unwrap();
    assert_eq!(program, back);
}

#[test]
fn test_progression_classification_from_sheet() {
    // Bench climbs sets 3 -> 3 -> 4 -> 4; Row alternates RPE 8/9/8/9
    let program = extract(&[
        "Week 1,,,,",
        "Push Day #1,,,,",
        "Bench Press,3,8-10,8,2 min",
        "Pull Day #1,,,,",
        "Barbell Row,3,8,8,2 min",
        "Week 2,,,,",
        "Push Day #1,,,,",
        "Bench Press,3,8-10,8,2 min",
        "Pull Day #1,,,,",
        "Barbell Row,3,8,9,2 min",
        "Week 3,,,,",
        "Push Day #1,,,,",
        "Bench Press,4,8-10,8,2 min",
        "Pull Day #1,,,,",
        "Barbell Row,3,8,8,2 min",
        "Week 4,,,,",
        "Push Day #1,,,,",
        "Bench Press,4,8-10,8,2 min",
        "Pull Day #1,,,,",
        "Barbell Row,3,8,9,2 min",
    ]);

    let report = analysis::analyze(&program);

    let bench = &report.progression_patterns["Bench Press"];
    assert_eq!(bench.frequency, 4);
    assert_eq!(bench.sets_progression, vec!["3", "3", "4", "4"]);
    assert_eq!(bench.progression_type, ProgressionType::LinearSets);

    let row = &report.progression_patterns["Barbell Row"];
    assert_eq!(row.rpe_progression, vec!["8", "9", "8", "9"]);
    assert_eq!(row.progression_type, ProgressionType::Wave);
}

#[test]
fn test_date_corruption_repaired_and_stable() {
    let program = extract(&[
        "Week 1,,,,,,,",
        "Push Day #1,,,,,,,",
        ",Exercise,Warm-up Sets,Working Sets,Reps,RPE,Rest,Notes",
        ",Bench Press,2024-01-02,2024-01-03,8-10,2024-09-08,2 min,",
    ]);

    let ex = &program.phases["phase1"].weeks["week1"]["push1"][0];
    assert_eq!(ex.warmup_sets, "2");
    assert_eq!(ex.working_sets, "3");
    assert_eq!(ex.rpe, "8-9");
    assert_eq!(ex.reps, "8-10");

    // re-running extraction over the already-normalized values is a no-op
    let json = serde_json::to_string(&program).unwrap();
    let mut reparsed: Program = serde_json::from_str(&json).unwrap();
    for phase in reparsed.phases.values_mut() {
        for week in phase.weeks.values_mut() {
            for exercises in week.values_mut() {
                for ex in exercises.iter_mut() {
                    ppl_toolkit::normalize::normalize_exercise(ex);
                }
            }
        }
    }
    assert_eq!(serde_json::to_string(&reparsed).unwrap(), json);
}

#[test]
fn test_sheet_without_day_markers_degrades_to_push1() {
    let program = extract(&[
        "Exercise,Sets,Reps,RPE,Rest",
        "Bench Press,3,8-10,8-9,2 min",
        "Overhead Press,3,6-8,8,2 min",
    ]);

    let week = &program.phases["phase1"].weeks["week1"];
    assert_eq!(week["push1"].len(), 2);
}

#[test]
fn test_muscle_groups_in_exercise_library() {
    let program = extract(&[
        "Week 1,,,,",
        "Push Day #1,,,,",
        "Barbell Bench Press,3,8-10,8-9,2 min",
        "Tricep Pushdown,3,12-15,9,90 sec",
        "Legs Day #1,,,,",
        "Romanian Deadlift,3,8-10,8,2 min",
    ]);
    let report = analysis::analyze(&program);

    let bench = &report.exercise_library["Barbell Bench Press"];
    assert!(bench.muscle_groups.contains(&"chest".to_string()));

    let rdl = &report.exercise_library["Romanian Deadlift"];
    assert!(rdl.muscle_groups.contains(&"back".to_string()));
    assert!(rdl.muscle_groups.contains(&"legs".to_string()));

    let pushdown = &report.exercise_library["Tricep Pushdown"];
    assert!(pushdown.muscle_groups.contains(&"triceps".to_string()));
    assert!(!pushdown.muscle_groups.contains(&"biceps".to_string()));
}

#[test]
fn test_split_weeks_output_shape() {
    let program = extract(&[
        "Week 1,,,,",
        "Push Day #1,,,,",
        "Bench Press,3,8-10,8-9,~2 min",
        "Legs Day #1,,,,",
        "Back Squat,3,5,9,3 min",
    ]);

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("program.json");
    pipeline::write_pretty_json(&json_path, &program).unwrap();

    let written = pipeline::split_weeks(&SplitConfig {
        source: json_path,
        output_dir: dir.path().join("weeks"),
        overwrite: false,
    })
    .unwrap();
    assert_eq!(written, 1);

    let raw = fs::read_to_string(dir.path().join("weeks").join("phase1-week1.json")).unwrap();
    let week: pipeline::WeekFile = serde_json::from_str(&raw).unwrap();
    assert_eq!(week.phase, 1);
    assert_eq!(week.week, 1);
    assert_eq!(week.days["push1"].title, "Push #1");
    assert_eq!(week.days["legs1"].title, "Legs #1");
    let bench = &week.days["push1"].exercises[0];
    assert_eq!(bench.id, "bench-press");
    assert_eq!(bench.rest, "2m");
}

#[test]
fn test_rendered_page_from_extraction_json() {
    let program = extract(&[
        "Week 1,,,,",
        "Push Day #1,,,,",
        "Bench Press,3,8-10,8-9,2 min",
    ]);

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("program.json");
    pipeline::write_pretty_json(&json_path, &program).unwrap();

    let page = pipeline::render_page(&json_path).unwrap();
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains("Bench Press"));
    assert!(page.contains("phase1-week1-push1-0"));
}
