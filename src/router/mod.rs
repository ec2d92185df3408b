//! Route resolution: request paths to content records
//!
//! Resolution is a pure function of (route, optional slug) over the
//! immutable [`ContentStore`]. A slug that matches nothing resolves to
//! [`Resolved::NotFound`], which the renderer shows as a page.

use std::fmt;
use std::sync::Arc;

use crate::content::{ContentStore, PostRecord, ProjectRecord, RecordKind};
use crate::helpers::{decode_segment, encode_segment};

/// A page route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Projects,
    Project { slug: String },
    Blog,
    Post { slug: String },
    Contact,
}

impl Route {
    /// Parse a request path (without the site root).
    ///
    /// Trailing slashes and a trailing `index.html` are ignored and the
    /// slug segment is percent-decoded. Unknown paths give `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.last() == Some(&"index.html") {
            segments.pop();
        }

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["about"] => Some(Route::About),
            ["projects"] => Some(Route::Projects),
            ["projects", slug] => Some(Route::Project {
                slug: decode_segment(slug)?,
            }),
            ["blog"] => Some(Route::Blog),
            ["blog", slug] => Some(Route::Post {
                slug: decode_segment(slug)?,
            }),
            ["contact"] => Some(Route::Contact),
            _ => None,
        }
    }

    /// Canonical path of the route, without a trailing slash (except `/`)
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::Project { slug } => format!("/projects/{}", encode_segment(slug)),
            Route::Blog => "/blog".to_string(),
            Route::Post { slug } => format!("/blog/{}", encode_segment(slug)),
            Route::Contact => "/contact".to_string(),
        }
    }

    /// Page title used in the document head
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About Me",
            Route::Projects | Route::Project { .. } => "Projects",
            Route::Blog | Route::Post { .. } => "Blog",
            Route::Contact => "Contact Me",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// The outcome of resolving a route
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    Home,
    About,
    Contact,
    ProjectList(&'a [ProjectRecord]),
    Project(&'a ProjectRecord),
    PostList(&'a [PostRecord]),
    Post(&'a PostRecord),
    /// A detail route whose slug is not in the store
    NotFound(RecordKind),
}

impl Resolved<'_> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolved::NotFound(_))
    }
}

/// Resolves routes against an injected content store
#[derive(Debug, Clone)]
pub struct Resolver {
    store: Arc<ContentStore>,
}

impl Resolver {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Resolve a route to its record(s)
    pub fn resolve(&self, route: &Route) -> Resolved<'_> {
        match route {
            Route::Home => Resolved::Home,
            Route::About => Resolved::About,
            Route::Contact => Resolved::Contact,
            Route::Projects => Resolved::ProjectList(self.store.list_projects()),
            Route::Blog => Resolved::PostList(self.store.list_posts()),
            Route::Project { slug } => match self.store.find_project_by_slug(slug) {
                Some(project) => Resolved::Project(project),
                None => {
                    tracing::debug!("No project with slug {:?}", slug);
                    Resolved::NotFound(RecordKind::Project)
                }
            },
            Route::Post { slug } => match self.store.find_post_by_slug(slug) {
                Some(post) => Resolved::Post(post),
                None => {
                    tracing::debug!("No post with slug {:?}", slug);
                    Resolved::NotFound(RecordKind::Post)
                }
            },
        }
    }

    /// Every reachable route: the static pages, the list pages, and one
    /// detail route per slug in store order
    pub fn static_routes(&self) -> Vec<Route> {
        let mut routes = vec![
            Route::Home,
            Route::About,
            Route::Projects,
            Route::Blog,
            Route::Contact,
        ];
        routes.extend(self.store.project_slugs().map(|slug| Route::Project {
            slug: slug.to_string(),
        }));
        routes.extend(self.store.post_slugs().map(|slug| Route::Post {
            slug: slug.to_string(),
        }));
        routes
    }
}
