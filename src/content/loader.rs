//! Content loader - builds the content store from the embedded catalog and
//! Markdown sources under `source/_projects` and `source/_posts`

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::store::check_record;
use super::{
    format_display_date, ContentStore, FrontMatter, MarkdownRenderer, PostRecord, ProjectRecord,
};
use crate::helpers::strip_html;
use crate::Folio;

pub const PROJECTS_DIR: &str = "_projects";
pub const POSTS_DIR: &str = "_posts";

/// Excerpts derived from a post body are cut to this many characters
const DERIVED_EXCERPT_LEN: usize = 280;

/// A record read from a file, with its sort key
struct Sourced<T> {
    order: i64,
    file_name: String,
    record: T,
}

/// Loads content from the built-in catalog and the source directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &folio.config.content.highlight_theme,
            folio.config.content.line_numbers,
        );
        Self { folio, renderer }
    }

    /// Build the store: built-in records first, then file records.
    /// A file record with a built-in slug replaces the built-in one in place.
    pub fn load_store(&self) -> Result<ContentStore> {
        let (mut projects, mut posts) = if self.folio.config.content.builtin {
            ContentStore::builtin()?.into_records()
        } else {
            (Vec::new(), Vec::new())
        };

        for project in self.load_projects()? {
            merge(&mut projects, project, |a, b| a.slug == b.slug);
        }
        for post in self.load_posts()? {
            merge(&mut posts, post, |a, b| a.slug == b.slug);
        }

        let store = ContentStore::from_records(projects, posts)
            .context("Invalid content catalog")?;
        tracing::info!(
            "Loaded {} projects and {} posts",
            store.list_projects().len(),
            store.list_posts().len()
        );
        Ok(store)
    }

    /// Load project records from source/_projects
    pub fn load_projects(&self) -> Result<Vec<ProjectRecord>> {
        self.load_dir(PROJECTS_DIR, |path| self.load_project(path))
    }

    /// Load post records from source/_posts
    pub fn load_posts(&self) -> Result<Vec<PostRecord>> {
        self.load_dir(POSTS_DIR, |path| self.load_post(path))
    }

    fn load_dir<T>(
        &self,
        dir: &str,
        load: impl Fn(&Path) -> Result<Sourced<T>>,
    ) -> Result<Vec<T>> {
        let dir = self.folio.source_dir.join(dir);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match load(path) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        tracing::warn!("Failed to load {:?}: {:#}", path, e);
                    }
                }
            }
        }

        records.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });

        Ok(records.into_iter().map(|r| r.record).collect())
    }

    fn load_project(&self, path: &Path) -> Result<Sourced<ProjectRecord>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let title = required(fm.title.clone(), "title")?;
        let slug = fm.slug.clone().unwrap_or_else(|| slug::slugify(&title));

        let record = ProjectRecord {
            slug,
            title,
            category: required(fm.category.clone(), "category")?,
            description: required(fm.description.clone(), "description")?,
            technologies: fm.technologies.clone(),
            image: required(fm.image.clone(), "image")?,
            full_content: self.renderer.render(body)?.trim().to_string(),
        };
        check_record(&record)?;

        Ok(Sourced {
            order: fm.order.unwrap_or(0),
            file_name: file_name(path),
            record,
        })
    }

    fn load_post(&self, path: &Path) -> Result<Sourced<PostRecord>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let title = required(fm.title.clone(), "title")?;
        let slug = fm.slug.clone().unwrap_or_else(|| slug::slugify(&title));
        let date = fm
            .date
            .as_deref()
            .map(format_display_date)
            .ok_or_else(|| anyhow!("missing `date` in front-matter"))?;

        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let full_content = self.renderer.render(&full_md)?.trim().to_string();

        // Front-matter wins, then the <!-- more --> part, then the body start
        let excerpt = match (fm.excerpt.clone(), excerpt_md) {
            (Some(excerpt), _) => excerpt,
            (None, Some(md)) => strip_html(&self.renderer.render(&md)?).trim().to_string(),
            (None, None) => crate::helpers::truncate(
                strip_html(&full_content).trim(),
                DERIVED_EXCERPT_LEN,
                None,
            ),
        };

        let record = PostRecord {
            slug,
            title,
            date,
            excerpt,
            full_content,
        };
        check_record(&record)?;

        Ok(Sourced {
            order: fm.order.unwrap_or(0),
            file_name: file_name(path),
            record,
        })
    }

    /// Directories the loader reads, for file watching
    pub fn watched_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.folio.source_dir.join(PROJECTS_DIR),
            self.folio.source_dir.join(POSTS_DIR),
        ]
    }
}

fn merge<T>(records: &mut Vec<T>, record: T, same: impl Fn(&T, &T) -> bool) {
    match records.iter().position(|r| same(r, &record)) {
        Some(i) => records[i] = record,
        None => records.push(record),
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| anyhow!("missing `{}` in front-matter", field))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
