//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

/// Generate the static site from a freshly loaded store
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let store = folio.load_store()?;
    let written = Generator::new(folio)?.generate(store)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} files in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Watch the config file and content directories, regenerating on change.
/// Each regeneration reloads the config and builds a new store.
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in ContentLoader::new(folio).watched_dirs() {
        if dir.exists() {
            watcher.watch(&dir, notify::RecursiveMode::Recursive)?;
        } else {
            tracing::debug!("Not watching missing directory {:?}", dir);
        }
    }

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(Path::new(&config_path), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    let result = Folio::new(&folio.base_dir).and_then(|fresh| run(&fresh));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                tokio::task::yield_now().await;
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    #[test]
    fn test_run_includes_source_files() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("source/_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("rust.md"),
            "---\ntitle: Learning Rust\ndate: 2025-09-01\n---\nOwnership first.",
        )
        .unwrap();

        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        run(&folio).unwrap();

        let html =
            fs::read_to_string(folio.public_dir.join("blog/learning-rust/index.html")).unwrap();
        assert!(html.contains("Published on September 1, 2025"));
        assert!(html.contains("<p>Ownership first.</p>"));

        let list = fs::read_to_string(folio.public_dir.join("blog/index.html")).unwrap();
        assert!(list.contains("Learning Rust"));
    }
}
