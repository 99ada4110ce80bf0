//! Exercise record repair and canonicalization.
//!
//! Spreadsheets auto-format small numeric entries into dates: a warm-up set
//! count of "2" comes back as "2023-01-02", an RPE of "8-9" as a September
//! date. The repair substitutes a documented default and logs the guess so
//! an operator can audit it; values that are already clean pass through
//! untouched, so repair is idempotent.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::Exercise;

/// Default substituted for a date-corrupted warm-up set count.
pub const WARMUP_SETS_DEFAULT: &str = "2";
/// Default substituted for a date-corrupted working set count.
pub const WORKING_SETS_DEFAULT: &str = "3";
/// Default substituted for a date-corrupted intensity value.
pub const INTENSITY_DEFAULT: &str = "8-9";

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
}

/// Trim every text field and repair date-corrupted numeric fields in place.
pub fn normalize_exercise(ex: &mut Exercise) {
    for field in [
        &mut ex.name,
        &mut ex.warmup_sets,
        &mut ex.working_sets,
        &mut ex.sets,
        &mut ex.reps,
        &mut ex.load,
        &mut ex.rpe,
        &mut ex.rest,
        &mut ex.substitution1,
        &mut ex.substitution2,
        &mut ex.notes,
    ] {
        let trimmed = field.trim();
        if trimmed.len() != field.len() {
            *field = trimmed.to_string();
        }
    }

    let name = ex.name.clone();
    repair_field(&mut ex.warmup_sets, WARMUP_SETS_DEFAULT, "warm-up sets", &name);
    repair_field(&mut ex.working_sets, WORKING_SETS_DEFAULT, "working sets", &name);
    repair_field(&mut ex.sets, WORKING_SETS_DEFAULT, "sets", &name);
    repair_field(&mut ex.rpe, INTENSITY_DEFAULT, "RPE", &name);
}

/// Substitute `default` when `field` carries a spreadsheet-date artifact.
/// The substitution is a best-effort guess, surfaced in the log rather than
/// silently trusted.
fn repair_field(field: &mut String, default: &str, label: &str, exercise: &str) {
    if is_date_corrupted(field) {
        log::warn!(
            "{}: {} value {:?} looks like spreadsheet date auto-formatting; substituting {:?}",
            exercise,
            label,
            field,
            default
        );
        *field = default.to_string();
    }
}

/// True when a value that should be a small integer or range contains an
/// ISO date.
pub fn is_date_corrupted(value: &str) -> bool {
    !value.is_empty() && ISO_DATE.is_match(value)
}

/// Derive a stable identifier from an exercise name: lower-cased, whitespace
/// replaced with hyphens, everything else non-alphanumeric stripped. Used
/// for cross-referencing in rendered output only; lookups always use the
/// trimmed display name.
pub fn exercise_id(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}
