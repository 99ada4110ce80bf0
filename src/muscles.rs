//! Keyword-based muscle-group tagging.
//!
//! Deterministic classification over the lower-cased exercise name. Every
//! matching category block appends its tag, so compound movements pick up
//! several groups ("Romanian Deadlift" is both back and legs). When nothing
//! matches, a push/pull/unknown guess keeps the entry usable in a PPL
//! split.

const CHEST_TERMS: &[&str] = &[
    "bench press", "chest press", "fly", "flye", "pushup", "push-up", "push up", "dip",
    "decline", "incline", "svend",
];
const BACK_TERMS: &[&str] = &[
    "row", "pulldown", "pull-down", "pull down", "pullup", "pull-up", "pull up", "deadlift",
    "lat", "back", "hyper",
];
const SHOULDER_TERMS: &[&str] = &[
    "shoulder", "overhead", "press", "lateral", "front raise", "rear delt", "face pull",
    "shrug",
];
const LEG_TERMS: &[&str] = &[
    "squat", "leg", "lunge", "deadlift", "calf", "glute", "ham", "quad",
];
const ARM_TERMS: &[&str] = &["curl", "tricep", "extension", "skull", "kickback"];
const TRICEP_TERMS: &[&str] = &["tricep", "extension", "skull", "pushdown"];
const CORE_TERMS: &[&str] = &[
    "ab", "core", "crunch", "situp", "sit-up", "sit up", "plank", "twist",
];

fn matches_any(name: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| name.contains(term))
}

/// Tag an exercise name with the muscle groups it likely targets.
pub fn detect_muscle_groups(exercise_name: &str) -> Vec<String> {
    let name = exercise_name.to_lowercase();
    let mut groups: Vec<String> = Vec::new();

    if matches_any(&name, CHEST_TERMS) {
        groups.push("chest".to_string());
    }
    if matches_any(&name, BACK_TERMS) {
        groups.push("back".to_string());
    }
    if matches_any(&name, SHOULDER_TERMS) {
        groups.push("shoulders".to_string());
    }
    if matches_any(&name, LEG_TERMS) {
        groups.push("legs".to_string());
    }
    if matches_any(&name, ARM_TERMS) {
        if matches_any(&name, TRICEP_TERMS) {
            groups.push("triceps".to_string());
        } else {
            groups.push("biceps".to_string());
        }
    }
    if matches_any(&name, CORE_TERMS) {
        groups.push("core".to_string());
    }

    // PPL-informed guess when no anatomy keyword hits
    if groups.is_empty() {
        if name.contains("press") || name.contains("fly") || name.contains("extension") {
            groups.push("push".to_string());
        } else if name.contains("row") || name.contains("pull") || name.contains("curl") {
            groups.push("pull".to_string());
        } else {
            groups.push("unknown".to_string());
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(name: &str) -> Vec<String> {
        detect_muscle_groups(name)
    }

    #[test]
    fn test_bench_press_is_chest() {
        assert!(tags("Barbell Bench Press").contains(&"chest".to_string()));
    }

    #[test]
    fn test_romanian_deadlift_is_back_and_legs() {
        let groups = tags("Romanian Deadlift");
        assert!(groups.contains(&"back".to_string()));
        assert!(groups.contains(&"legs".to_string()));
    }

    #[test]
    fn test_tricep_pushdown_is_triceps_not_biceps() {
        let groups = tags("Tricep Pushdown");
        assert!(groups.contains(&"triceps".to_string()));
        assert!(!groups.contains(&"biceps".to_string()));
    }

    #[test]
    fn test_hammer_curl_is_biceps() {
        let groups = tags("Hammer Curl");
        assert!(groups.contains(&"biceps".to_string()));
        assert!(!groups.contains(&"triceps".to_string()));
    }

    #[test]
    fn test_compound_press_hits_chest_and_shoulders() {
        let groups = tags("Incline Bench Press");
        assert!(groups.contains(&"chest".to_string()));
        assert!(groups.contains(&"shoulders".to_string()));
    }

    #[test]
    fn test_fallback_guesses() {
        assert_eq!(tags("Pallof Press"), vec!["shoulders"]); // "press" is anatomical here
        assert_eq!(tags("Band Pull-apart"), vec!["pull"]); // no anatomy term, "pull" guess
        assert_eq!(tags("Farmer Walk"), vec!["unknown"]);
    }

    #[test]
    fn test_plank_is_core() {
        assert_eq!(tags("Weighted Plank"), vec!["core"]);
    }
}
