//! Front-matter parsing for Markdown record sources

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Accept both `technologies: Rust` and `technologies: [Rust, Tokio]`
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect())
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a project or post source file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    /// Sort key among file-based records (lower first)
    pub order: Option<i64>,

    // Projects
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub technologies: Vec<String>,
    pub image: Option<String>,

    // Posts
    pub date: Option<String>,
    pub excerpt: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter, terminated by ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            return Self::parse_json(rest);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return Err(anyhow!("Unterminated YAML front-matter"));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?;
        Ok((fm, remaining))
    }

    fn parse_json(rest: &str) -> Result<(Self, &str)> {
        let Some(end_pos) = rest.find(";;;") else {
            return Err(anyhow!("Unterminated JSON front-matter"));
        };
        let json_content = &rest[..end_pos];
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)
            .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

        Ok((fm, remaining))
    }

    /// Display form of the post date.
    ///
    /// ISO dates (`2025-07-03`, `2025/07/03`) become `July 3, 2025`; any
    /// other string is shown as written.
    pub fn display_date(&self) -> Option<String> {
        self.date.as_deref().map(format_display_date)
    }
}

/// Format an ISO-like date as `Month D, YYYY`, passing other strings through
pub fn format_display_date(s: &str) -> String {
    let s = s.trim();
    // Accept a trailing time, e.g. "2025-07-03 10:30:00"
    let date_part = s.split([' ', 'T']).next().unwrap_or(s);
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, fmt) {
            return d.format("%B %-d, %Y").to_string();
        }
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_frontmatter() {
        let content = r#"---
title: Rust Port Scanner
category: Security
description: A fast async scanner.
technologies:
  - Rust
  - Tokio
image: https://placehold.co/600x400
order: 2
---

Body text.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Rust Port Scanner"));
        assert_eq!(fm.technologies, vec!["Rust", "Tokio"]);
        assert_eq!(fm.order, Some(2));
        assert!(fm.slug.is_none());
        assert!(remaining.starts_with("Body text."));
    }

    #[test]
    fn test_technologies_from_single_string() {
        let content = "---\ntitle: X\ntechnologies: Rust, Axum\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.technologies, vec!["Rust", "Axum"]);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#";;;
{"title": "Hello", "date": "2025-07-03", "excerpt": "Hi"}
;;;
Content.
"#;
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.display_date().as_deref(), Some("July 3, 2025"));
        assert!(remaining.contains("Content."));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let content = "---\ntitle: X\ntags: [a, b]\nlayout: post\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("X"));
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("Just text").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, "Just text");
    }

    #[test]
    fn test_unterminated_yaml_is_error() {
        assert!(FrontMatter::parse("---\ntitle: X\nno end").is_err());
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2025-06-20"), "June 20, 2025");
        assert_eq!(format_display_date("2025/06/20 09:00:00"), "June 20, 2025");
        assert_eq!(format_display_date("Spring 2024"), "Spring 2024");
    }
}
