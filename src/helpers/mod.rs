//! Helper functions shared by the renderer, the loader and the generator

mod chart;
mod html;
mod url;

pub use chart::*;
pub use html::*;
pub use url::*;
