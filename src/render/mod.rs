//! Page rendering: turns a resolved route into an HTML document

use anyhow::Result;
use chrono::Datelike;
use tera::Context;

use crate::config::SiteConfig;
use crate::contact::client as form;
use crate::content::{PostRecord, ProjectRecord, RecordKind};
use crate::helpers::{full_url_for, skills_chart_config, url_for};
use crate::router::{Resolved, Route};
use crate::templates::{
    ConfigData, ContactData, ContactMessages, LinksData, NavItem, PostData, ProjectData,
    SocialLink, TemplateRenderer,
};

/// Navigation entries as (label, site-relative path)
const NAV_ITEMS: [(&str, &str); 5] = [
    ("Home", "/"),
    ("About Me", "/about"),
    ("Projects", "/projects"),
    ("Blog", "/blog"),
    ("Contact Me", "/contact"),
];

/// A rendered document
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    /// The page is a not-found placeholder
    pub not_found: bool,
}

/// Renders pages for resolved routes
pub struct PageRenderer {
    config: SiteConfig,
    templates: TemplateRenderer,
}

impl PageRenderer {
    pub fn new(config: SiteConfig) -> Result<Self> {
        Ok(Self {
            config,
            templates: TemplateRenderer::new()?,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render the page for `route` given what it resolved to
    pub fn render(&self, route: &Route, resolved: &Resolved<'_>) -> Result<RenderedPage> {
        let current_path = route.path();
        let mut context = self.base_context(&current_path);

        let template = match resolved {
            Resolved::Home => {
                context.insert("page_title", route.title());
                context.insert("services", &self.config.services);
                "home.html"
            }
            Resolved::About => {
                context.insert("page_title", route.title());
                context.insert("about", &self.config.about);
                // '<' only occurs inside JSON strings, where < is equivalent
                let chart = serde_json::to_string(&skills_chart_config(&self.config.about.skills))?
                    .replace('<', "\\u003c");
                context.insert("chart_config", &chart);
                "about.html"
            }
            Resolved::Contact => {
                context.insert("page_title", route.title());
                context.insert("contact", &self.contact_data());
                "contact.html"
            }
            Resolved::ProjectList(projects) => {
                let cards: Vec<ProjectData> = projects.iter().map(|p| self.project_data(p)).collect();
                context.insert("page_title", route.title());
                context.insert("projects", &cards);
                "projects.html"
            }
            Resolved::Project(project) => {
                context.insert("page_title", &project.title);
                context.insert("meta_description", &project.description);
                context.insert("project", &self.project_data(project));
                "project.html"
            }
            Resolved::PostList(posts) => {
                let cards: Vec<PostData> = posts.iter().map(|p| self.post_data(p)).collect();
                context.insert("page_title", route.title());
                context.insert("posts", &cards);
                context.insert("ad_placeholder", &self.config.blog.ad_placeholder);
                "blog.html"
            }
            Resolved::Post(post) => {
                context.insert("page_title", &post.title);
                context.insert("meta_description", &post.excerpt);
                context.insert("post", &self.post_data(post));
                "post.html"
            }
            Resolved::NotFound(kind) => {
                return self.render_not_found(&current_path, Some(*kind));
            }
        };

        Ok(RenderedPage {
            html: self.templates.render(template, &context)?,
            not_found: false,
        })
    }

    /// Render the not-found placeholder.
    /// `kind` is the record type a detail route asked for, if any.
    pub fn render_not_found(
        &self,
        current_path: &str,
        kind: Option<RecordKind>,
    ) -> Result<RenderedPage> {
        let message = match kind {
            Some(kind) => format!("{} not found.", kind.label()),
            None => "Page not found.".to_string(),
        };

        let mut context = self.base_context(current_path);
        context.insert("page_title", "Not Found");
        context.insert("message", &message);

        Ok(RenderedPage {
            html: self.templates.render("not_found.html", &context)?,
            not_found: true,
        })
    }

    fn base_context(&self, current_path: &str) -> Context {
        let config = &self.config;
        let mut context = Context::new();
        context.insert(
            "config",
            &ConfigData {
                title: config.title.clone(),
                author: config.author.clone(),
                tagline: config.tagline.clone(),
                description: config.description.clone(),
                language: config.language.clone(),
            },
        );
        context.insert("nav", &nav_items(config, current_path));
        context.insert(
            "social",
            &config
                .social
                .iter()
                .map(|(name, url)| SocialLink {
                    name: name.clone(),
                    url: url.clone(),
                })
                .collect::<Vec<_>>(),
        );
        context.insert(
            "links",
            &LinksData {
                projects: url_for(config, "/projects"),
                about: url_for(config, "/about"),
                blog: url_for(config, "/blog"),
            },
        );
        context.insert("home_url", &url_for(config, "/"));
        context.insert("canonical", &full_url_for(config, current_path));
        context.insert(
            "current_year",
            &chrono::Utc::now().with_timezone(&config.tz()).year(),
        );
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context
    }

    fn project_data<'a>(&self, project: &'a ProjectRecord) -> ProjectData<'a> {
        let route = Route::Project {
            slug: project.slug.clone(),
        };
        ProjectData {
            href: url_for(&self.config, &route.path()),
            title: &project.title,
            category: &project.category,
            description: &project.description,
            technologies: &project.technologies,
            image: &project.image,
            full_content: &project.full_content,
        }
    }

    fn post_data<'a>(&self, post: &'a PostRecord) -> PostData<'a> {
        let route = Route::Post {
            slug: post.slug.clone(),
        };
        PostData {
            href: url_for(&self.config, &route.path()),
            title: &post.title,
            date: &post.date,
            excerpt: &post.excerpt,
            full_content: &post.full_content,
        }
    }

    fn contact_data(&self) -> ContactData {
        ContactData {
            endpoint: url_for(&self.config, &self.config.contact.endpoint),
            messages: ContactMessages {
                sending: form::SENDING_MESSAGE,
                success: form::SUCCESS_MESSAGE,
                failed_prefix: form::FAILED_PREFIX,
                unknown_error: form::UNKNOWN_ERROR,
                transport_error: form::TRANSPORT_ERROR_MESSAGE,
            },
        }
    }
}

/// Navigation items with the active one marked.
///
/// An item is active when the current path equals its path or, for
/// items other than home, starts with it.
pub fn nav_items(config: &SiteConfig, current_path: &str) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .map(|(name, path)| NavItem {
            name: name.to_string(),
            href: url_for(config, path),
            active: current_path == *path || (*path != "/" && current_path.starts_with(path)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::router::Resolver;
    use std::sync::Arc;

    fn setup() -> (Resolver, PageRenderer) {
        let resolver = Resolver::new(Arc::new(ContentStore::builtin().unwrap()));
        let renderer = PageRenderer::new(SiteConfig::default()).unwrap();
        (resolver, renderer)
    }

    fn render(path: &str) -> RenderedPage {
        let (resolver, renderer) = setup();
        let route = Route::parse(path).unwrap();
        renderer.render(&route, &resolver.resolve(&route)).unwrap()
    }

    #[test]
    fn test_nav_active_item() {
        let config = SiteConfig::default();
        let active = |path: &str| -> Vec<String> {
            nav_items(&config, path)
                .into_iter()
                .filter(|i| i.active)
                .map(|i| i.name)
                .collect()
        };
        assert_eq!(active("/"), vec!["Home"]);
        assert_eq!(active("/projects/project-a"), vec!["Projects"]);
        assert_eq!(active("/blog"), vec!["Blog"]);
    }

    #[test]
    fn test_project_list_in_store_order() {
        let page = render("/projects");
        assert!(!page.not_found);
        let a = page.html.find("Enterprise CRM Solution").unwrap();
        let b = page.html.find("E-commerce Analytics Dashboard").unwrap();
        let c = page.html.find("Mobile App for Event Management").unwrap();
        assert!(a < b && b < c);
        // Tera escapes '/' in attribute values
        assert!(page.html.contains(r#"href="&#x2F;projects&#x2F;project-a""#));
        assert!(page.html.contains("PostgreSQL"));
    }

    #[test]
    fn test_project_detail_embeds_body_verbatim() {
        let (resolver, renderer) = setup();
        let route = Route::parse("/projects/project-a").unwrap();
        let page = renderer.render(&route, &resolver.resolve(&route)).unwrap();
        let project = resolver.store().find_project_by_slug("project-a").unwrap();
        assert!(page.html.contains(&project.full_content));
        assert!(page.html.contains("Technologies Used:"));
        assert!(page.html.contains("Back to Projects"));
    }

    #[test]
    fn test_post_detail() {
        let page = render("/blog/ai-cybersecurity-trends");
        assert!(page.html.contains("Published on July 3, 2025"));
        assert!(page.html.contains("<h3>Key Trends:</h3>"));
    }

    #[test]
    fn test_blog_list_has_ad_placeholder() {
        let page = render("/blog");
        assert!(page.html.contains("Advertisement Placeholder"));
        assert!(page.html.contains("June 20, 2025"));
    }

    #[test]
    fn test_not_found_placeholder() {
        let page = render("/projects/does-not-exist");
        assert!(page.not_found);
        assert!(page.html.contains("Project not found."));

        let page = render("/blog/does-not-exist");
        assert!(page.html.contains("Post not found."));

        let (_, renderer) = setup();
        let page = renderer.render_not_found("/nowhere", None).unwrap();
        assert!(page.html.contains("Page not found."));
    }

    #[test]
    fn test_untrusted_fields_are_escaped() {
        let project = ProjectRecord {
            slug: "xss".to_string(),
            title: "<script>alert(1)</script>".to_string(),
            category: "Tools & Things".to_string(),
            description: "d".to_string(),
            technologies: vec!["<b>Rust</b>".to_string()],
            image: "https://example.com/x.png".to_string(),
            full_content: "<p><em>trusted</em></p>".to_string(),
        };
        let store = ContentStore::from_records(vec![project], Vec::new()).unwrap();
        let resolver = Resolver::new(Arc::new(store));
        let renderer = PageRenderer::new(SiteConfig::default()).unwrap();

        for path in ["/projects", "/projects/xss"] {
            let route = Route::parse(path).unwrap();
            let html = renderer.render(&route, &resolver.resolve(&route)).unwrap().html;
            assert!(!html.contains("<script>alert(1)</script>"), "{}", path);
            assert!(html.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"), "{}", path);
            assert!(html.contains("Tools &amp; Things"), "{}", path);
            assert!(!html.contains("<b>Rust</b>"), "{}", path);
        }

        let route = Route::parse("/projects/xss").unwrap();
        let html = renderer.render(&route, &resolver.resolve(&route)).unwrap().html;
        assert!(html.contains("<p><em>trusted</em></p>"));
    }

    #[test]
    fn test_about_page_chart() {
        let page = render("/about");
        assert!(page.html.contains(r#"id="skills-chart-config""#));
        assert!(page.html.contains("\"Proficiency (%)\""));
        assert!(page.html.contains("Senior Frontend Developer"));
    }

    #[test]
    fn test_home_and_contact() {
        let page = render("/");
        assert!(page.html.contains("What I Do"));
        assert!(page.html.contains("Information Architecture"));

        let page = render("/contact");
        assert!(page.html.contains(r#"data-endpoint="&#x2F;api&#x2F;contact""#));
        assert!(page.html.contains("Send Message"));
    }

    #[test]
    fn test_footer_year_and_author() {
        let page = render("/about");
        let year = chrono::Utc::now().year();
        // Allow for a timezone boundary around new year
        assert!(
            page.html.contains(&format!("{} Your Name. All rights reserved.", year))
                || page.html.contains(&format!("{} Your Name. All rights reserved.", year + 1))
                || page.html.contains(&format!("{} Your Name. All rights reserved.", year - 1))
        );
    }
}
