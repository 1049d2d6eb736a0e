//! HTML template registry for the wiki server.
//!
//! The wiki renders a closed set of named templates ([`TemplateName`]):
//! `view`, `edit`, `docs`, `main`, and `create`. [`Templates`] compiles them
//! once at startup, either from the built-in sources or from a directory of
//! overrides, and renders them with HTML auto-escaping.
//!
//! # Example
//!
//! ```ignore
//! use wiki_storage::Page;
//! use wiki_templates::{TemplateName, Templates};
//!
//! let templates = Templates::builtin()?;
//! let html = templates.render_page(TemplateName::View, &Page::new("Home", "Hi"))?;
//! ```

mod registry;
mod template;

pub use registry::{TemplateError, Templates};
pub use template::TemplateName;
