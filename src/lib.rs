//! folio-rs: a personal portfolio site
//!
//! Projects and blog posts live in an immutable in-memory catalog built
//! from the embedded records and optional Markdown sources. Pages are
//! rendered with Tera templates, either on request by the server or ahead
//! of time by the generator. The server also accepts contact form
//! submissions.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod router;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        }
    }

    /// Build the content store
    pub fn load_store(&self) -> Result<content::ContentStore> {
        content::loader::ContentLoader::new(self).load_store()
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::init_site(&self.base_dir)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
