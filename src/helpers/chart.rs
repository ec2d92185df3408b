//! Skill chart helpers for the about page

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::Skill;

/// Default width at which chart labels are wrapped
pub const LABEL_WIDTH: usize = 16;

/// Bar colours as (r, g, b), cycled when there are more skills than colours
const PALETTE: [(u8, u8, u8); 8] = [
    (0, 123, 255),
    (40, 167, 69),
    (255, 193, 7),
    (220, 53, 69),
    (108, 117, 125),
    (23, 162, 184),
    (111, 66, 193),
    (253, 126, 20),
];

/// A chart label: Chart.js takes either a string or an array of lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WrappedLabel {
    Single(String),
    Lines(Vec<String>),
}

/// Wrap a label into lines of at most `max_len` characters.
///
/// Labels that already fit are returned unchanged. Otherwise words are
/// added greedily; a new line starts before a word when the current line
/// plus that word would exceed `max_len`. A single word longer than
/// `max_len` gets a line of its own and is never split.
pub fn wrap_label(label: &str, max_len: usize) -> WrappedLabel {
    if label.chars().count() <= max_len {
        return WrappedLabel::Single(label.to_string());
    }

    let mut lines = Vec::new();
    // Each word is followed by one space, which counts toward the length
    let mut current = String::new();
    for word in label.split(' ') {
        let candidate = current.chars().count() + word.chars().count();
        if candidate > max_len && !current.is_empty() {
            lines.push(current.trim().to_string());
            current = format!("{} ", word);
        } else {
            current.push_str(word);
            current.push(' ');
        }
    }
    lines.push(current.trim().to_string());

    WrappedLabel::Lines(lines)
}

fn rgba((r, g, b): (u8, u8, u8), alpha: f32) -> String {
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

/// Build the Chart.js configuration for the skills bar chart.
///
/// The tooltip label callback is a function and is attached by the page
/// script; everything else is plain data.
pub fn skills_chart_config(skills: &[Skill]) -> Value {
    let labels: Vec<WrappedLabel> = skills
        .iter()
        .map(|s| wrap_label(&s.name, LABEL_WIDTH))
        .collect();
    let data: Vec<u8> = skills.iter().map(|s| s.level.min(100)).collect();
    let colors = PALETTE.iter().cycle().take(skills.len());
    let background: Vec<String> = colors.clone().map(|c| rgba(*c, 0.7)).collect();
    let border: Vec<String> = colors.map(|c| rgba(*c, 1.0)).collect();

    json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Skill Proficiency",
                "data": data,
                "backgroundColor": background,
                "borderColor": border,
                "borderWidth": 1
            }]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "display": false },
                "tooltip": {}
            },
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "max": 100,
                    "title": { "display": true, "text": "Proficiency (%)" }
                },
                "x": {
                    "ticks": { "autoSkip": false, "maxRotation": 45, "minRotation": 45 }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> WrappedLabel {
        WrappedLabel::Lines(v.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_short_label_unchanged() {
        assert_eq!(
            wrap_label("Tailwind CSS", LABEL_WIDTH),
            WrappedLabel::Single("Tailwind CSS".to_string())
        );
        // Exactly at the limit still fits
        assert_eq!(
            wrap_label("sixteen chars ok", 16),
            WrappedLabel::Single("sixteen chars ok".to_string())
        );
    }

    #[test]
    fn test_long_label_wrapped() {
        assert_eq!(
            wrap_label("Cloud Infrastructure Engineering", 16),
            lines(&["Cloud", "Infrastructure", "Engineering"])
        );
        assert_eq!(
            wrap_label("Data Visualization and BI", 16),
            lines(&["Data", "Visualization", "and BI"])
        );
    }

    #[test]
    fn test_overlong_word_kept_whole() {
        assert_eq!(
            wrap_label("Supercalifragilistic", 10),
            lines(&["Supercalifragilistic"])
        );
    }

    #[test]
    fn test_label_serialization() {
        let json = serde_json::to_string(&wrap_label("Machine Learning Ops", 16)).unwrap();
        assert_eq!(json, r#"["Machine Learning","Ops"]"#);
        let json = serde_json::to_string(&wrap_label("SQL", 16)).unwrap();
        assert_eq!(json, r#""SQL""#);
    }

    #[test]
    fn test_chart_config() {
        let skills: Vec<Skill> = (0..10)
            .map(|i| Skill {
                name: format!("Skill {}", i),
                level: 50 + i as u8,
            })
            .collect();
        let config = skills_chart_config(&skills);
        let dataset = &config["data"]["datasets"][0];
        assert_eq!(dataset["data"].as_array().unwrap().len(), 10);
        // Colours cycle past the palette
        assert_eq!(dataset["backgroundColor"][8], "rgba(0, 123, 255, 0.7)");
        assert_eq!(dataset["borderColor"][0], "rgba(0, 123, 255, 1)");
        assert_eq!(config["options"]["scales"]["y"]["max"], 100);
        assert_eq!(config["options"]["plugins"]["legend"]["display"], false);
    }
}
