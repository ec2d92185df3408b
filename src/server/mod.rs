//! HTTP server: renders pages on request and serves the contact endpoint

use anyhow::Result;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::contact::{contact_handler, ContactService, ContactSink, LogSink};
use crate::content::ContentStore;
use crate::helpers::{strip_root, url_for};
use crate::render::{PageRenderer, RenderedPage};
use crate::router::{Resolver, Route};
use crate::Folio;

/// State shared by page requests
struct PageState {
    resolver: Resolver,
    renderer: PageRenderer,
}

/// Build the application router over a loaded store
pub fn router(folio: &Folio, store: ContentStore, sink: Arc<dyn ContactSink>) -> Result<Router> {
    let config = &folio.config;
    let state = Arc::new(PageState {
        resolver: Resolver::new(Arc::new(store)),
        renderer: PageRenderer::new(config.clone())?,
    });

    let endpoint = url_for(config, &config.contact.endpoint);
    let contact: Router = Router::new()
        .route(&endpoint, any(contact_handler))
        .with_state(ContactService::new(&config.contact, sink));

    Ok(Router::new()
        .fallback(page_handler)
        .with_state(state)
        .merge(contact)
        .layer(TraceLayer::new_for_http()))
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let store = folio.load_store()?;
    let app = router(folio, store, Arc::new(LogSink))?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, url_for(&folio.config, "/"));
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Render the page for any path that is not the contact endpoint
async fn page_handler(State(state): State<Arc<PageState>>, uri: Uri) -> Response {
    let path = uri.path();
    let stripped = strip_root(state.renderer.config(), path);
    let route = stripped.and_then(Route::parse);

    let page = match &route {
        Some(route) => state
            .renderer
            .render(route, &state.resolver.resolve(route)),
        None => state
            .renderer
            .render_not_found(stripped.unwrap_or(path), None),
    };

    match page {
        Ok(RenderedPage { html, not_found }) => {
            let status = if not_found {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::OK
            };
            (status, Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to render {}: {:#}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
