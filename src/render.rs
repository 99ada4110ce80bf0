//! Interactive tracker page rendering.
//!
//! Pure string formatting from a finalized [`Program`] into one
//! self-contained HTML document: phase and week tab navigation, day cards
//! with exercise tables, expandable notes/substitutions, and weight/
//! completion logging persisted to `localStorage`. No templating engine,
//! no external assets.

use crate::model::{day_key_rank, day_title, key_number, Program};
use crate::normalize::exercise_id;

/// Canned phase descriptions used when a sheet carried none.
pub fn default_phase_description(phase: u32) -> &'static str {
    match phase {
        1 => "building a foundation with moderate volume and intensity",
        2 => "progressive overload with increasing weights and controlled volume",
        3 => "peak intensity and specialized techniques for maximum results",
        _ => "progressive overload and consistent training",
    }
}

/// Minimal HTML escaping for text interpolated into markup.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the whole program as a single static page.
pub fn render_program(program: &Program) -> String {
    let mut html = String::with_capacity(64 * 1024);
    let title = if program.program_info.name.is_empty() {
        "Workout Program"
    } else {
        program.program_info.name.as_str()
    };

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str("<style>\n");
    html.push_str(PAGE_CSS);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!("<header><h1>{}</h1></header>\n", escape(title)));

    let mut phase_keys: Vec<&String> = program.phases.keys().collect();
    phase_keys.sort_by_key(|k| key_number(k).unwrap_or(0));

    // Phase selector
    html.push_str("<div class=\"phase-selector\">\n");
    for (i, phase_key) in phase_keys.iter().enumerate() {
        let num = key_number(phase_key).unwrap_or(0);
        html.push_str(&format!(
            "<button class=\"phase-btn{}\" onclick=\"selectPhase('{}')\">Phase {}</button>\n",
            if i == 0 { " active" } else { "" },
            escape(phase_key),
            num
        ));
    }
    html.push_str("</div>\n<div class=\"container\">\n");

    for (i, phase_key) in phase_keys.iter().enumerate() {
        let phase = &program.phases[phase_key.as_str()];
        let num = key_number(phase_key).unwrap_or(0);
        let description = if phase.description.is_empty() {
            default_phase_description(num).to_string()
        } else {
            phase.description.clone()
        };

        html.push_str(&format!(
            "<div class=\"phase-content{}\" id=\"{}\">\n",
            if i == 0 { " active" } else { "" },
            escape(phase_key)
        ));
        html.push_str(&format!(
            "<p class=\"phase-description\">Phase {}: {}</p>\n",
            num,
            escape(&description)
        ));

        let mut week_keys: Vec<&String> = phase.weeks.keys().collect();
        week_keys.sort_by_key(|k| key_number(k).unwrap_or(0));

        html.push_str("<div class=\"week-selector\">\n");
        for (j, week_key) in week_keys.iter().enumerate() {
            html.push_str(&format!(
                "<button class=\"week-btn{}\" onclick=\"selectWeek('{}','{}-{}')\">Week {}</button>\n",
                if j == 0 { " active" } else { "" },
                escape(phase_key),
                escape(phase_key),
                escape(week_key),
                key_number(week_key).unwrap_or(0)
            ));
        }
        html.push_str("</div>\n");

        for (j, week_key) in week_keys.iter().enumerate() {
            let days = &phase.weeks[week_key.as_str()];
            html.push_str(&format!(
                "<div class=\"week-content{}\" id=\"{}-{}\">\n",
                if j == 0 { " active" } else { "" },
                escape(phase_key),
                escape(week_key)
            ));

            let mut day_keys: Vec<&String> = days.keys().collect();
            day_keys.sort_by_key(|k| day_key_rank(k));

            for day_key in day_keys {
                render_day(&mut html, phase_key, week_key, day_key, &days[day_key.as_str()]);
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n<script>\n");
    html.push_str(PAGE_JS);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

fn render_day(
    html: &mut String,
    phase_key: &str,
    week_key: &str,
    day_key: &str,
    exercises: &[crate::model::Exercise],
) {
    html.push_str(&format!(
        "<section class=\"workout-day\">\n<h3>{}</h3>\n",
        escape(&day_title(day_key))
    ));
    html.push_str(
        "<table class=\"exercise-table\">\n<thead><tr>\
         <th>Exercise</th><th>Warm-up</th><th>Sets</th><th>Reps</th>\
         <th>RPE</th><th>Rest</th><th>Weight</th><th>Done</th>\
         </tr></thead>\n<tbody>\n",
    );

    for (index, ex) in exercises.iter().enumerate() {
        // Composite key for client-local persistence of logged state
        let store_key = format!("{}-{}-{}-{}", phase_key, week_key, day_key, index);
        let detail_id = format!("{}-{}", store_key, exercise_id(&ex.name));
        let has_details =
            !ex.notes.is_empty() || !ex.substitution1.is_empty() || !ex.substitution2.is_empty();

        html.push_str("<tr>\n<td class=\"exercise-name\">");
        html.push_str(&escape(&ex.name));
        if has_details {
            html.push_str(&format!(
                " <button class=\"details-toggle\" onclick=\"toggleDetails('{}')\">&#9432;</button>",
                escape(&detail_id)
            ));
        }
        html.push_str("</td>\n");
        html.push_str(&format!("<td>{}</td>\n", escape(&ex.warmup_sets)));
        html.push_str(&format!("<td>{}</td>\n", escape(ex.effective_sets())));
        html.push_str(&format!("<td>{}</td>\n", escape(&ex.reps)));
        html.push_str(&format!("<td>{}</td>\n", escape(&ex.rpe)));
        html.push_str(&format!("<td>{}</td>\n", escape(&ex.rest)));
        html.push_str(&format!(
            "<td><input type=\"text\" class=\"weight-input\" data-key=\"{}\" \
             placeholder=\"lbs/kg\"></td>\n",
            escape(&store_key)
        ));
        html.push_str(&format!(
            "<td><input type=\"checkbox\" class=\"done-input\" data-key=\"{}\"></td>\n",
            escape(&store_key)
        ));
        html.push_str("</tr>\n");

        if has_details {
            html.push_str(&format!(
                "<tr class=\"exercise-details\" id=\"{}\" style=\"display:none\">\n\
                 <td colspan=\"8\">",
                escape(&detail_id)
            ));
            if !ex.notes.is_empty() {
                html.push_str(&format!(
                    "<p><strong>Notes:</strong> {}</p>",
                    escape(&ex.notes)
                ));
            }
            let subs: Vec<&str> = [ex.substitution1.as_str(), ex.substitution2.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect();
            if !subs.is_empty() {
                html.push_str(&format!(
                    "<p><strong>Substitutions:</strong> {}</p>",
                    escape(&subs.join(", "))
                ));
            }
            html.push_str("</td>\n</tr>\n");
        }
    }

    html.push_str("</tbody>\n</table>\n</section>\n");
}

const PAGE_CSS: &str = "\
body{font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;line-height:1.6;color:#333;\
max-width:1200px;margin:0 auto;padding:0 15px;background-color:#f9f9f9}
header{background-color:#C38803;color:white;padding:15px;text-align:center;\
margin-bottom:20px;border-radius:0 0 10px 10px}
h1{margin:0;font-size:28px}
.phase-selector,.week-selector{display:flex;justify-content:center;flex-wrap:wrap;margin-bottom:20px}
.phase-btn,.week-btn{padding:10px 20px;margin:0 5px 5px 0;background-color:#f0f0f0;border:none;\
border-radius:5px;cursor:pointer;transition:all .3s}
.phase-btn.active,.week-btn.active{background-color:#C38803;color:white}
.container{background-color:white;padding:20px;border-radius:10px;\
box-shadow:0 2px 5px rgba(0,0,0,.1);margin-bottom:20px}
.phase-content,.week-content{display:none}
.phase-content.active,.week-content.active{display:block}
.phase-description{font-style:italic;color:#666}
.workout-day{margin-bottom:30px}
.workout-day h3{border-bottom:2px solid #C38803;padding-bottom:5px}
.exercise-table{width:100%;border-collapse:collapse}
.exercise-table th,.exercise-table td{padding:8px;text-align:left;border-bottom:1px solid #ddd}
.exercise-table th{background-color:#f5f5f5}
.details-toggle{background:none;border:none;cursor:pointer;color:#C38803}
.exercise-details td{background-color:#fdf6e3;font-size:14px}
.weight-input{width:70px}
";

const PAGE_JS: &str = "\
const STORE = 'pplWorkoutData';

function loadStore() {
  try { return JSON.parse(localStorage.getItem(STORE)) || {}; }
  catch (e) { return {}; }
}

function saveStore(data) {
  localStorage.setItem(STORE, JSON.stringify(data));
}

function selectPhase(phaseId) {
  document.querySelectorAll('.phase-content').forEach(el => el.classList.remove('active'));
  document.querySelectorAll('.phase-btn').forEach(el => el.classList.remove('active'));
  document.getElementById(phaseId).classList.add('active');
  document.querySelectorAll('.phase-btn').forEach(el => {
    if (el.getAttribute('onclick').includes(\"'\" + phaseId + \"'\")) el.classList.add('active');
  });
}

function selectWeek(phaseId, weekId) {
  document.querySelectorAll('#' + phaseId + ' .week-content').forEach(el => el.classList.remove('active'));
  document.querySelectorAll('#' + phaseId + ' .week-btn').forEach(el => el.classList.remove('active'));
  document.getElementById(weekId).classList.add('active');
  document.querySelectorAll('#' + phaseId + ' .week-btn').forEach(el => {
    if (el.getAttribute('onclick').includes(\"'\" + weekId + \"'\")) el.classList.add('active');
  });
}

function toggleDetails(id) {
  const row = document.getElementById(id);
  row.style.display = row.style.display === 'none' ? 'table-row' : 'none';
}

document.addEventListener('DOMContentLoaded', () => {
  const data = loadStore();
  document.querySelectorAll('.weight-input').forEach(input => {
    const key = input.dataset.key;
    if (data[key] && data[key].weight) input.value = data[key].weight;
    input.addEventListener('change', () => {
      const d = loadStore();
      d[key] = d[key] || {};
      d[key].weight = input.value;
      saveStore(d);
    });
  });
  document.querySelectorAll('.done-input').forEach(input => {
    const key = input.dataset.key;
    if (data[key] && data[key].done) input.checked = true;
    input.addEventListener('change', () => {
      const d = loadStore();
      d[key] = d[key] || {};
      d[key].done = input.checked;
      saveStore(d);
    });
  });
});
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DayMap, Exercise, Phase};

    fn sample_program() -> Program {
        let mut program = Program::default();
        program.program_info.name = "The Ultimate Push Pull Legs System".to_string();
        let mut phase = Phase::default();
        phase.description = "building a base".to_string();
        let mut days = DayMap::new();
        days.insert(
            "push1".to_string(),
            vec![Exercise {
                name: "Bench <Press>".to_string(),
                sets: "3".to_string(),
                reps: "8-10".to_string(),
                rpe: "8-9".to_string(),
                rest: "2 min".to_string(),
                notes: "Pause & squeeze".to_string(),
                substitution1: "DB Press".to_string(),
                ..Default::default()
            }],
        );
        phase.weeks.insert("week1".to_string(), days);
        program.phases.insert("phase1".to_string(), phase);
        program.recompute_info();
        program
    }

    #[test]
    fn test_page_contains_navigation_and_day() {
        let html = render_program(&sample_program());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Phase 1"));
        assert!(html.contains("Week 1"));
        assert!(html.contains("Push #1"));
        assert!(html.contains("localStorage"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let html = render_program(&sample_program());
        assert!(html.contains("Bench &lt;Press&gt;"));
        assert!(html.contains("Pause &amp; squeeze"));
        assert!(!html.contains("Bench <Press>"));
    }

    #[test]
    fn test_storage_keys_are_composites() {
        let html = render_program(&sample_program());
        assert!(html.contains("data-key=\"phase1-week1-push1-0\""));
    }

    #[test]
    fn test_missing_description_uses_default() {
        let mut program = sample_program();
        program.phases.get_mut("phase1").unwrap().description.clear();
        let html = render_program(&program);
        assert!(html.contains(default_phase_description(1)));
    }

    #[test]
    fn test_substitutions_render_in_details() {
        let html = render_program(&sample_program());
        assert!(html.contains("Substitutions:</strong> DB Press"));
    }
}
