//! Generator module - writes every page of the site as static HTML

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::content::ContentStore;
use crate::render::PageRenderer;
use crate::router::{Resolver, Route};
use crate::Folio;

/// File written for paths that match nothing
pub const NOT_FOUND_FILE: &str = "404.html";

/// Static site generator
pub struct Generator {
    public_dir: PathBuf,
    renderer: PageRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            public_dir: folio.public_dir.clone(),
            renderer: PageRenderer::new(folio.config.clone())?,
        })
    }

    /// Generate the entire site from `store`.
    /// Returns the number of files written.
    pub fn generate(&self, store: ContentStore) -> Result<usize> {
        fs::create_dir_all(&self.public_dir)?;

        let resolver = Resolver::new(Arc::new(store));
        let routes = resolver.static_routes();

        for route in &routes {
            let page = self
                .renderer
                .render(route, &resolver.resolve(route))
                .with_context(|| format!("Failed to render {}", route))?;
            self.write(self.output_path(route), &page.html)?;
        }

        let not_found = self.renderer.render_not_found("/404", None)?;
        self.write(self.public_dir.join(NOT_FOUND_FILE), &not_found.html)?;

        Ok(routes.len() + 1)
    }

    /// `public/<route path>/index.html`
    pub fn output_path(&self, route: &Route) -> PathBuf {
        let path = route.path();
        let mut output = self.public_dir.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            output.push(segment);
        }
        output.join("index.html")
    }

    fn write(&self, path: PathBuf, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Generated: {:?}", path);
        Ok(())
    }
}
