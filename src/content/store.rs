//! Immutable in-memory catalog of projects and posts

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use super::record::{PostRecord, ProjectRecord, Record, RecordKind};

const BUILTIN_CATALOG: &str = include_str!("builtin.yml");

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Errors raised while building a store
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("duplicate {kind} slug: {slug}")]
    DuplicateSlug { kind: RecordKind, slug: String },

    #[error("{kind} slug is not URL-safe: {slug:?}")]
    InvalidSlug { kind: RecordKind, slug: String },

    #[error("{kind} {slug:?} has an empty `{field}`")]
    EmptyField {
        kind: RecordKind,
        slug: String,
        field: &'static str,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
    #[serde(default)]
    posts: Vec<PostRecord>,
}

/// Check that a slug is lowercase kebab-case
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// The content catalog.
///
/// Records keep insertion order, which is the display order on list
/// pages. There is no way to modify a store once built.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    projects: Vec<ProjectRecord>,
    posts: Vec<PostRecord>,
}

impl ContentStore {
    /// Build a store, checking slug uniqueness and that every record is
    /// fully populated
    pub fn from_records(
        projects: Vec<ProjectRecord>,
        posts: Vec<PostRecord>,
    ) -> Result<Self, ContentError> {
        validate(&projects)?;
        validate(&posts)?;
        Ok(Self { projects, posts })
    }

    /// The catalog embedded in the binary
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Parse a catalog document with `projects` and `posts` lists
    pub fn from_yaml(yaml: &str) -> Result<Self, ContentError> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;
        let projects = catalog.projects.into_iter().map(trim_project).collect();
        let posts = catalog.posts.into_iter().map(trim_post).collect();
        Self::from_records(projects, posts)
    }

    pub fn list_projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn list_posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn find_project_by_slug(&self, slug: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    pub fn find_post_by_slug(&self, slug: &str) -> Option<&PostRecord> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Project slugs in display order
    pub fn project_slugs(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|p| p.slug.as_str())
    }

    /// Post slugs in display order
    pub fn post_slugs(&self) -> impl Iterator<Item = &str> {
        self.posts.iter().map(|p| p.slug.as_str())
    }

    /// Consume the store, returning its records
    pub fn into_records(self) -> (Vec<ProjectRecord>, Vec<PostRecord>) {
        (self.projects, self.posts)
    }
}

fn validate<R: Record>(records: &[R]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for record in records {
        check_record(record)?;
        let slug = record.slug();
        if !seen.insert(slug) {
            return Err(ContentError::DuplicateSlug {
                kind: R::KIND,
                slug: slug.to_string(),
            });
        }
    }
    Ok(())
}

/// Check a single record: a kebab-case slug and no empty required field
pub(crate) fn check_record<R: Record>(record: &R) -> Result<(), ContentError> {
    let slug = record.slug();
    if !is_valid_slug(slug) {
        return Err(ContentError::InvalidSlug {
            kind: R::KIND,
            slug: slug.to_string(),
        });
    }
    if let Some((field, _)) = record
        .required_fields()
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
    {
        return Err(ContentError::EmptyField {
            kind: R::KIND,
            slug: slug.to_string(),
            field,
        });
    }
    Ok(())
}

// Block scalars in YAML keep a trailing newline
fn trim_project(mut p: ProjectRecord) -> ProjectRecord {
    p.full_content = p.full_content.trim().to_string();
    p
}

fn trim_post(mut p: PostRecord) -> PostRecord {
    p.full_content = p.full_content.trim().to_string();
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(slug: &str, title: &str) -> ProjectRecord {
        ProjectRecord {
            slug: slug.to_string(),
            title: title.to_string(),
            category: "Tools".to_string(),
            description: "A thing".to_string(),
            technologies: vec!["Rust".to_string()],
            image: "https://example.com/a.png".to_string(),
            full_content: "<p>Body</p>".to_string(),
        }
    }

    fn post(slug: &str) -> PostRecord {
        PostRecord {
            slug: slug.to_string(),
            title: "Title".to_string(),
            date: "July 3, 2025".to_string(),
            excerpt: "Excerpt".to_string(),
            full_content: "<p>Body</p>".to_string(),
        }
    }

    #[test]
    fn test_builtin_catalog() {
        let store = ContentStore::builtin().unwrap();
        let slugs: Vec<_> = store.project_slugs().collect();
        assert_eq!(slugs, vec!["project-a", "project-b", "project-c"]);
        let slugs: Vec<_> = store.post_slugs().collect();
        assert_eq!(slugs, vec!["ai-cybersecurity-trends", "web3-future-internet"]);

        let crm = store.find_project_by_slug("project-a").unwrap();
        assert_eq!(crm.title, "Enterprise CRM Solution");
        assert_eq!(crm.technologies, vec!["React", "Node.js", "PostgreSQL", "AWS"]);
        assert!(crm.full_content.starts_with("<p>This project involved"));
        assert!(crm.description.ends_with("intuitive user interfaces."));

        let web3 = store.find_post_by_slug("web3-future-internet").unwrap();
        assert_eq!(web3.title, "Web3: The Decentralized Future of the Internet?");
        assert_eq!(web3.date, "June 20, 2025");
    }

    #[test]
    fn test_find_returns_exact_record() {
        let store = ContentStore::builtin().unwrap();
        for record in store.list_projects() {
            assert_eq!(store.find_project_by_slug(&record.slug), Some(record));
        }
        for record in store.list_posts() {
            assert_eq!(store.find_post_by_slug(&record.slug), Some(record));
        }
    }

    #[test]
    fn test_missing_slug_is_none() {
        let store = ContentStore::builtin().unwrap();
        assert!(store.find_project_by_slug("project-z").is_none());
        assert!(store.find_post_by_slug("").is_none());
        // Slugs are scoped per record type
        assert!(store.find_post_by_slug("project-a").is_none());
    }

    #[test]
    fn test_list_order_is_stable() {
        let store = ContentStore::builtin().unwrap();
        let first: Vec<_> = store.list_projects().to_vec();
        let second: Vec<_> = store.list_projects().to_vec();
        assert_eq!(first, second);
        assert_eq!(store.list_posts(), store.list_posts());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = ContentStore::from_records(
            vec![project("alpha", "A"), project("alpha", "B")],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug { kind: RecordKind::Project, .. }));
    }

    #[test]
    fn test_same_slug_across_types_allowed() {
        let store =
            ContentStore::from_records(vec![project("shared", "A")], vec![post("shared")]).unwrap();
        assert!(store.find_project_by_slug("shared").is_some());
        assert!(store.find_post_by_slug("shared").is_some());
    }

    #[test]
    fn test_invalid_slug_rejected() {
        for bad in ["", "Upper", "two words", "trailing-", "double--dash", "a/b"] {
            let err = ContentStore::from_records(vec![project(bad, "A")], Vec::new()).unwrap_err();
            assert!(matches!(err, ContentError::InvalidSlug { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut p = post("hello");
        p.excerpt = "  ".to_string();
        let err = ContentStore::from_records(Vec::new(), vec![p]).unwrap_err();
        assert!(matches!(
            err,
            ContentError::EmptyField { field: "excerpt", .. }
        ));

        let mut p = project("tools", "Tools");
        p.technologies.clear();
        let err = ContentStore::from_records(vec![p], Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::EmptyField { field: "technologies", .. }
        ));
    }

    #[test]
    fn test_missing_yaml_field_is_parse_error() {
        let yaml = "projects:\n  - slug: x\n    title: X\n";
        assert!(matches!(
            ContentStore::from_yaml(yaml),
            Err(ContentError::Parse(_))
        ));
    }
}
