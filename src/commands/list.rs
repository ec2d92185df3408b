//! List site content

use anyhow::Result;
use std::sync::Arc;

use crate::content::ContentStore;
use crate::router::Resolver;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let store = folio.load_store()?;
    for line in listing(store, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Lines printed for `content_type`
pub fn listing(store: ContentStore, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "project" | "projects" => {
            let projects = store.list_projects();
            lines.push(format!("Projects ({}):", projects.len()));
            for project in projects {
                lines.push(format!(
                    "  {} - {} [{}]",
                    project.slug, project.title, project.category
                ));
            }
        }
        "post" | "posts" => {
            let posts = store.list_posts();
            lines.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                lines.push(format!("  {} - {} [{}]", post.slug, post.title, post.date));
            }
        }
        "route" | "routes" => {
            let routes = Resolver::new(Arc::new(store)).static_routes();
            lines.push(format!("Routes ({}):", routes.len()));
            for route in routes {
                lines.push(format!("  {}", route));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: projects, posts, routes",
                content_type
            );
        }
    }

    Ok(lines)
}
