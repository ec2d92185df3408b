//! Project and post records

use serde::{Deserialize, Serialize};

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// URL-safe identifier, unique among projects
    pub slug: String,

    /// Project title
    pub title: String,

    /// Category shown under the title
    pub category: String,

    /// Short summary for the list card
    pub description: String,

    /// Technologies, in display order
    pub technologies: Vec<String>,

    /// Image URI
    pub image: String,

    /// Site-authored HTML body, rendered verbatim
    pub full_content: String,
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// URL-safe identifier, unique among posts
    pub slug: String,

    /// Post title
    pub title: String,

    /// Display date (e.g. "July 3, 2025")
    pub date: String,

    /// Summary for the list card
    pub excerpt: String,

    /// Site-authored HTML body, rendered verbatim
    pub full_content: String,
}

/// The two record types held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Project,
    Post,
}

impl RecordKind {
    /// Human-readable name, as used in not-found messages
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Project => "Project",
            RecordKind::Post => "Post",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Project => f.write_str("project"),
            RecordKind::Post => f.write_str("post"),
        }
    }
}

/// Common access used by store validation
pub(crate) trait Record {
    const KIND: RecordKind;

    fn slug(&self) -> &str;

    /// Name and value of every field that must be non-empty
    fn required_fields(&self) -> Vec<(&'static str, &str)>;
}

impl Record for ProjectRecord {
    const KIND: RecordKind = RecordKind::Project;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("title", self.title.as_str()),
            ("category", self.category.as_str()),
            ("description", self.description.as_str()),
            ("image", self.image.as_str()),
            ("full_content", self.full_content.as_str()),
        ];
        // An empty list has no element to check, so report it as one empty field
        if self.technologies.is_empty() {
            fields.push(("technologies", ""));
        }
        fields.extend(self.technologies.iter().map(|t| ("technologies", t.as_str())));
        fields
    }
}

impl Record for PostRecord {
    const KIND: RecordKind = RecordKind::Post;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("title", self.title.as_str()),
            ("date", self.date.as_str()),
            ("excerpt", self.excerpt.as_str()),
            ("full_content", self.full_content.as_str()),
        ]
    }
}
