//! Data model for an extracted workout program.
//!
//! The [`Program`] is the single root of an extraction run: phases own weeks,
//! weeks map day-keys ("push1", "legs2", ...) to ordered exercise lists, and
//! nothing outside the program holds onto the records. Serialization follows
//! the extraction-JSON shape:
//!
//! ```text
//! {program_info: {name, phases, weeks_per_phase, days_per_week},
//!  phases: {phaseN: {description, weeks: {weekN: {dayKey: [exercise...]}}}}}
//! ```
//!
//! All numeric-looking fields are stored as display strings because the
//! source data mixes ranges ("8-10"), units ("2 min"), and qualitative text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::DayType;

/// Ordered exercise lists per day-key within one week.
pub type DayMap = BTreeMap<String, Vec<Exercise>>;

/// One occurrence of an exercise as prescribed on a particular day.
///
/// A sheet either carries the full eleven-column layout (warm-up/working
/// sets, load, substitutions, notes) or a generic header-matched one (a
/// single set-count column); empty fields are omitted from JSON so both
/// layouts round-trip through the same record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub warmup_sets: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub working_sets: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sets: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reps: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub load: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rpe: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rest: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub substitution1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub substitution2: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Exercise {
    /// The effort-counted set prescription: the generic set column when the
    /// sheet had one, otherwise the working-set column.
    pub fn effective_sets(&self) -> &str {
        if !self.sets.is_empty() {
            &self.sets
        } else {
            &self.working_sets
        }
    }
}

/// Program-level counts reported in the extraction JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub name: String,
    pub phases: u32,
    pub weeks_per_phase: u32,
    pub days_per_week: u32,
}

/// A multi-week block of the program with its own training emphasis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub description: String,
    /// Week-key ("week1") to day map.
    pub weeks: BTreeMap<String, DayMap>,
}

/// The root container for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub program_info: ProgramInfo,
    /// Phase-key ("phase1") to phase.
    pub phases: BTreeMap<String, Phase>,
}

impl Program {
    /// Phase numbers in ascending numeric order.
    pub fn phase_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.phases.keys().filter_map(|k| key_number(k)).collect();
        numbers.sort_unstable();
        numbers
    }

    /// Derive the `program_info` counts from the extracted structure:
    /// phase count, the largest week number seen in any phase, and the
    /// day count of the first phase's first week.
    pub fn recompute_info(&mut self) {
        self.program_info.phases = self.phases.len() as u32;
        self.program_info.weeks_per_phase = self
            .phases
            .values()
            .flat_map(|p| p.weeks.keys())
            .filter_map(|k| key_number(k))
            .max()
            .unwrap_or(1);
        self.program_info.days_per_week = self
            .phases
            .values()
            .next()
            .and_then(|p| p.weeks.values().next())
            .map(|days| days.len() as u32)
            .unwrap_or(0);
    }
}

/// Parse the numeric suffix of a "phaseN"/"weekN" key.
pub fn key_number(key: &str) -> Option<u32> {
    let digits: String = key.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Sort day-keys in session order: push before pull before legs, then by
/// session index. Unrecognized keys sort last, alphabetically.
pub fn day_key_rank(key: &str) -> (u8, u32, String) {
    let type_rank = match DayType::from_key(key) {
        Some(DayType::Push) => 0,
        Some(DayType::Pull) => 1,
        Some(DayType::Legs) => 2,
        None => 3,
    };
    (type_rank, key_number(key).unwrap_or(0), key.to_string())
}

/// Display title for a day-key: "push2" -> "Push #2".
pub fn day_title(key: &str) -> String {
    match (DayType::from_key(key), key_number(key)) {
        (Some(day_type), Some(session)) => {
            let name = day_type.as_str();
            let mut title = String::with_capacity(name.len() + 3);
            title.push(name.chars().next().unwrap_or('?').to_ascii_uppercase());
            title.push_str(&name[1..]);
            title.push_str(&format!(" #{}", session));
            title
        }
        _ => {
            // capitalize whatever we were given
            let mut chars = key.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench() -> Exercise {
        Exercise {
            name: "Bench Press".to_string(),
            sets: "3".to_string(),
            reps: "8-10".to_string(),
            rpe: "8-9".to_string(),
            rest: "2 min".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let json = serde_json::to_string(&bench()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Bench Press","sets":"3","reps":"8-10","rpe":"8-9","rest":"2 min"}"#
        );
    }

    #[test]
    fn test_exercise_roundtrip() {
        let ex = bench();
        let json = serde_json::to_string(&ex).unwrap();
        let back: Exercise = serde_json::from_str(&json).unwrap();
        assert_eq!(ex, back);
    }

    #[test]
    fn test_effective_sets_prefers_generic_column() {
        let mut ex = bench();
        assert_eq!(ex.effective_sets(), "3");
        ex.sets.clear();
        ex.working_sets = "4".to_string();
        assert_eq!(ex.effective_sets(), "4");
    }

    #[test]
    fn test_key_number_and_titles() {
        assert_eq!(key_number("phase2"), Some(2));
        assert_eq!(key_number("week10"), Some(10));
        assert_eq!(key_number("push"), None);
        assert_eq!(day_title("push2"), "Push #2");
        assert_eq!(day_title("legs1"), "Legs #1");
    }

    #[test]
    fn test_day_key_rank_orders_sessions() {
        let mut keys = vec!["legs1", "pull2", "push1", "pull1", "push2", "legs2"];
        keys.sort_by_key(|k| day_key_rank(k));
        assert_eq!(keys, vec!["push1", "push2", "pull1", "pull2", "legs1", "legs2"]);
    }

    #[test]
    fn test_recompute_info() {
        let mut program = Program::default();
        let mut phase = Phase::default();
        let mut days = DayMap::new();
        days.insert("push1".to_string(), vec![bench()]);
        days.insert("pull1".to_string(), vec![bench()]);
        phase.weeks.insert("week1".to_string(), days);
        phase.weeks.insert("week6".to_string(), DayMap::new());
        program.phases.insert("phase1".to_string(), phase);
        program.recompute_info();

        assert_eq!(program.program_info.phases, 1);
        assert_eq!(program.program_info.weeks_per_phase, 6);
        assert_eq!(program.program_info.days_per_week, 2);
        assert_eq!(program.phase_numbers(), vec![1]);
    }
}
