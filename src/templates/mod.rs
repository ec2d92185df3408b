//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping is on for every
//! template; record bodies are the only values passed through `safe`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::strip_html;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("project.html", include_str!("site/project.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            ("partials/head.html", include_str!("site/partials/head.html")),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(crate::helpers::truncate(
        s.trim(),
        length,
        Some(&omission),
    )))
}

// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub author: String,
    pub tagline: String,
    pub description: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub name: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Site-relative links used by buttons on several pages
#[derive(Debug, Clone, Serialize)]
pub struct LinksData {
    pub projects: String,
    pub about: String,
    pub blog: String,
}

/// A project as shown on a list card or detail page
#[derive(Debug, Clone, Serialize)]
pub struct ProjectData<'a> {
    pub href: String,
    pub title: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub technologies: &'a [String],
    pub image: &'a str,
    pub full_content: &'a str,
}

/// A post as shown on a list card or detail page
#[derive(Debug, Clone, Serialize)]
pub struct PostData<'a> {
    pub href: String,
    pub title: &'a str,
    pub date: &'a str,
    pub excerpt: &'a str,
    pub full_content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactData {
    pub endpoint: String,
    pub messages: ContactMessages,
}

/// Status texts shown by the contact form script
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessages {
    pub sending: &'static str,
    pub success: &'static str,
    pub failed_prefix: &'static str,
    pub unknown_error: &'static str,
    pub transport_error: &'static str,
}
