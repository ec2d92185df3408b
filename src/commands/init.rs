//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::loader::{POSTS_DIR, PROJECTS_DIR};

const CONFIG_SCAFFOLD: &str = r#"# Site
title: YourName.dev
author: Your Name
tagline: An ICT Professional passionate about building innovative solutions and exploring the latest in technology.
description: Portfolio, projects and writing of an ICT professional.
language: en
timezone: ''

# URL
url: http://localhost:4000
root: /

# Directory
source_dir: source
public_dir: public

# Server
server:
  ip: localhost
  port: 4000

# Contact form
contact:
  endpoint: /api/contact
  delay_ms: 1000

# Content
content:
  builtin: true
  highlight_theme: base16-ocean.dark
  line_numbers: false

blog:
  ad_placeholder: true

social:
  LinkedIn: '#'
  GitHub: '#'
"#;

const PROJECT_SCAFFOLD: &str = r#"---
title: My First Project
category: Software Development
description: A short summary shown on the projects page.
technologies: [Rust, Axum]
image: https://placehold.co/600x400/3B82F6/FFFFFF?text=My+Project
order: 10
---

## Overview

Describe the problem, your approach and the outcome.
"#;

/// Initialize a new site in the given directory.
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("source").join(PROJECTS_DIR))?;
    fs::create_dir_all(target_dir.join("source").join(POSTS_DIR))?;

    let now = chrono::Local::now();
    let post_scaffold = format!(
        r#"---
title: Hello World
date: {}
---

Welcome to your new portfolio. This paragraph becomes the excerpt on the blog page.

<!-- more -->

Write posts in Markdown under `source/_posts`, then run `folio generate` or `folio server`.
"#,
        now.format("%Y-%m-%d")
    );

    write_new(&target_dir.join("_config.yml"), CONFIG_SCAFFOLD)?;
    write_new(
        &target_dir
            .join("source")
            .join(PROJECTS_DIR)
            .join("my-first-project.md"),
        PROJECT_SCAFFOLD,
    )?;
    write_new(
        &target_dir.join("source").join(POSTS_DIR).join("hello-world.md"),
        &post_scaffold,
    )?;

    Ok(())
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("Skipping existing file {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created: {:?}", path);
    Ok(())
}
