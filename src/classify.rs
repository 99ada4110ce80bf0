//! Cell classification for workout sheet headers and markers.
//!
//! Everything here is a pure function of the input text: column headers map
//! to a [`ColumnRole`], leading row cells map to week or day markers. The
//! synonym lists are curated for the PPL program layout and are matched
//! case-insensitively as substrings, the same way the source spreadsheets
//! spell them ("Reps", "Rep Range", "Rest (min)", ...).

use lazy_static::lazy_static;
use regex::Regex;

/// Semantic role of a sheet column, determined from its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    ExerciseName,
    WarmupSets,
    WorkingSets,
    Sets,
    Reps,
    Load,
    Intensity,
    Rest,
    Substitution,
    Notes,
    Unknown,
}

/// Day type of a workout session within a Push/Pull/Legs split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DayType {
    Push,
    Pull,
    Legs,
}

impl DayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Push => "push",
            DayType::Pull => "pull",
            DayType::Legs => "legs",
        }
    }

    /// Parse the leading day-type of a day-key such as "push1" or "legs2".
    pub fn from_key(key: &str) -> Option<DayType> {
        let lower = key.to_lowercase();
        if lower.starts_with("push") {
            Some(DayType::Push)
        } else if lower.starts_with("pull") {
            Some(DayType::Pull)
        } else if lower.starts_with("leg") {
            Some(DayType::Legs)
        } else {
            None
        }
    }
}

/// A recognized day marker: day type plus session index ("Push Day #2" -> push, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMarker {
    pub day_type: DayType,
    pub session: u32,
}

impl DayMarker {
    /// The day-key used throughout the extracted structure, e.g. "push2".
    pub fn key(&self) -> String {
        format!("{}{}", self.day_type.as_str(), self.session)
    }
}

const EXERCISE_SYNONYMS: &[&str] = &["exercise", "exercises", "movement", "movements"];
const SETS_SYNONYMS: &[&str] = &["sets", "set", "# sets", "set count"];
const REPS_SYNONYMS: &[&str] = &["reps", "rep", "repetitions", "rep range", "rep count"];
const REST_SYNONYMS: &[&str] = &["rest", "rest time", "rest period", "rest (min)"];
const INTENSITY_SYNONYMS: &[&str] = &["rpe", "intensity", "effort", "rir", "reps in reserve"];
const LOAD_SYNONYMS: &[&str] = &["load", "weight"];
const SUBSTITUTION_SYNONYMS: &[&str] = &["substitution", "sub option", "alternative"];
const NOTES_SYNONYMS: &[&str] = &["notes", "note"];

lazy_static! {
    // The day type is captured from the matched input text itself, so
    // "Push Day #1", "push #1", and "Legs 2" all resolve through the same
    // named groups.
    static ref DAY_MARKER: Regex =
        Regex::new(r"(?i)\b(?P<kind>push|pull|legs?)\s*(?:day)?\s*#?\s*(?P<num>\d+)").unwrap();
    static ref WEEK_MARKER: Regex = Regex::new(r"(?i)\bweek\s*(?P<num>\d+)").unwrap();
    static ref PHASE_MARKER: Regex = Regex::new(r"(?i)\bphase\s*(?P<num>\d+)").unwrap();
}

fn matches_any(text: &str, synonyms: &[&str]) -> bool {
    synonyms.iter().any(|syn| text.contains(syn))
}

/// Classify a candidate column-header string into its [`ColumnRole`].
///
/// The warm-up/working checks run before the generic set-count check so that
/// "Warm-up Sets" and "Working Sets" do not collapse into [`ColumnRole::Sets`],
/// and intensity runs before reps so "Reps in Reserve" is not read as a rep
/// column.
pub fn classify_header(text: &str) -> ColumnRole {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return ColumnRole::Unknown;
    }

    if matches_any(&lower, EXERCISE_SYNONYMS) {
        ColumnRole::ExerciseName
    } else if lower.contains("warm") && lower.contains("set") {
        ColumnRole::WarmupSets
    } else if lower.contains("working") && lower.contains("set") {
        ColumnRole::WorkingSets
    } else if matches_any(&lower, INTENSITY_SYNONYMS) {
        ColumnRole::Intensity
    } else if matches_any(&lower, SETS_SYNONYMS) {
        ColumnRole::Sets
    } else if matches_any(&lower, REPS_SYNONYMS) {
        ColumnRole::Reps
    } else if matches_any(&lower, REST_SYNONYMS) {
        ColumnRole::Rest
    } else if matches_any(&lower, LOAD_SYNONYMS) {
        ColumnRole::Load
    } else if matches_any(&lower, SUBSTITUTION_SYNONYMS) {
        ColumnRole::Substitution
    } else if matches_any(&lower, NOTES_SYNONYMS) {
        ColumnRole::Notes
    } else {
        ColumnRole::Unknown
    }
}

/// True when a cell is exactly one of the exercise-column header synonyms.
///
/// Sheets repeat their header rows under each day banner, so an "Exercise"
/// cell in the name column must never become an exercise occurrence.
pub fn is_header_synonym(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    EXERCISE_SYNONYMS.iter().any(|syn| lower == *syn)
}

/// Match a day marker such as "Push Day #1", "Pull #2", or "Leg Day 1".
pub fn day_marker(text: &str) -> Option<DayMarker> {
    let caps = DAY_MARKER.captures(text)?;
    let day_type = match caps
        .name("kind")?
        .as_str()
        .to_lowercase()
        .as_str()
    {
        "push" => DayType::Push,
        "pull" => DayType::Pull,
        // "leg" and "legs" both normalize to the same key
        _ => DayType::Legs,
    };
    let session: u32 = caps.name("num")?.as_str().parse().ok()?;
    Some(DayMarker { day_type, session })
}

/// Match a week marker such as "Week 3".
pub fn week_marker(text: &str) -> Option<u32> {
    WEEK_MARKER
        .captures(text)
        .and_then(|caps| caps.name("num"))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract a phase number from a sheet name such as "Phase 2 - Hypertrophy".
pub fn phase_marker(text: &str) -> Option<u32> {
    PHASE_MARKER
        .captures(text)
        .and_then(|caps| caps.name("num"))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_header_roles() {
        assert_eq!(classify_header("Exercise"), ColumnRole::ExerciseName);
        assert_eq!(classify_header("Movements"), ColumnRole::ExerciseName);
        assert_eq!(classify_header("Warm-up Sets"), ColumnRole::WarmupSets);
        assert_eq!(classify_header("Working Sets"), ColumnRole::WorkingSets);
        assert_eq!(classify_header("# Sets"), ColumnRole::Sets);
        assert_eq!(classify_header("Rep Range"), ColumnRole::Reps);
        assert_eq!(classify_header("Rest (min)"), ColumnRole::Rest);
        assert_eq!(classify_header("RPE"), ColumnRole::Intensity);
        assert_eq!(classify_header("Load"), ColumnRole::Load);
        assert_eq!(
            classify_header("Substitution Option 1"),
            ColumnRole::Substitution
        );
        assert_eq!(classify_header("Notes"), ColumnRole::Notes);
        assert_eq!(classify_header(""), ColumnRole::Unknown);
        assert_eq!(classify_header("Bench Press"), ColumnRole::Unknown);
    }

    #[test]
    fn test_reps_in_reserve_is_intensity() {
        assert_eq!(classify_header("Reps in Reserve"), ColumnRole::Intensity);
        assert_eq!(classify_header("RIR"), ColumnRole::Intensity);
        // but a plain rep column still classifies as reps
        assert_eq!(classify_header("Reps"), ColumnRole::Reps);
    }

    #[test]
    fn test_day_marker_variants() {
        let m = day_marker("Push Day #1").unwrap();
        assert_eq!(m.day_type, DayType::Push);
        assert_eq!(m.key(), "push1");

        assert_eq!(day_marker("pull #2").unwrap().key(), "pull2");
        assert_eq!(day_marker("Legs Day 1").unwrap().key(), "legs1");
        assert_eq!(day_marker("Leg Day #2").unwrap().key(), "legs2");
        assert_eq!(day_marker("PUSH2").unwrap().key(), "push2");

        assert!(day_marker("Push Day").is_none());
        assert!(day_marker("Bench Press").is_none());
        assert!(day_marker("").is_none());
    }

    #[test]
    fn test_week_and_phase_markers() {
        assert_eq!(week_marker("Week 1"), Some(1));
        assert_eq!(week_marker("week3"), Some(3));
        assert_eq!(week_marker("Push Day #1"), None);
        assert_eq!(phase_marker("Phase 2"), Some(2));
        assert_eq!(phase_marker("The Ultimate PPL - phase 3"), Some(3));
        assert_eq!(phase_marker("Sheet1"), None);
    }

    #[test]
    fn test_header_synonym_is_exact_match() {
        assert!(is_header_synonym("Exercise"));
        assert!(is_header_synonym(" exercises "));
        assert!(!is_header_synonym("Exercise Ball Crunch"));
    }
}
