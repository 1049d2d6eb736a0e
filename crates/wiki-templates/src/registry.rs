//! Template registry.
//!
//! Templates are compiled once at startup and shared read-only for the
//! lifetime of the process, so concurrent renders need no coordination.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use wiki_storage::Page;

use crate::template::TemplateName;

/// Error returned while loading or rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Configured template directory does not exist.
    #[error("Template directory not found: {}", .0.display())]
    MissingDir(PathBuf),

    /// Template file exists but can't be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        /// Path of the template file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Template source doesn't compile.
    #[error("Invalid template {name}: {source}")]
    Syntax {
        /// Template that failed to compile.
        name: TemplateName,
        /// Underlying template engine error.
        #[source]
        source: minijinja::Error,
    },

    /// Template failed while executing.
    #[error("Failed to render template {name}: {source}")]
    Render {
        /// Template that failed to render.
        name: TemplateName,
        /// Underlying template engine error.
        #[source]
        source: minijinja::Error,
    },
}

/// Context passed to page templates.
#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    body: Cow<'a, str>,
}

/// Compiled set of named templates.
///
/// All templates are HTML auto-escaped, so page titles and bodies can't
/// inject markup. Undefined variables are errors rather than empty strings.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Build the registry from the templates compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Syntax`] if a built-in template doesn't compile.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_sources(
            TemplateName::ALL
                .into_iter()
                .map(|name| (name, name.builtin_source().to_owned())),
        )
    }

    /// Build the registry from template files in `dir`.
    ///
    /// Each template is read from `dir/{name}.html`. Files that don't exist
    /// fall back to the built-in template of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is missing, a file can't be read, or a
    /// template doesn't compile.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        if !dir.is_dir() {
            return Err(TemplateError::MissingDir(dir.to_path_buf()));
        }

        let sources = TemplateName::ALL
            .into_iter()
            .map(|name| read_source(dir, name).map(|source| (name, source)))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_sources(sources)
    }

    /// Build the registry from `dir` if given, otherwise from the built-ins.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load) and [`builtin`](Self::builtin).
    pub fn from_dir(dir: Option<&Path>) -> Result<Self, TemplateError> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Self::builtin(),
        }
    }

    fn from_sources(
        sources: impl IntoIterator<Item = (TemplateName, String)>,
    ) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        for (name, source) in sources {
            env.add_template_owned(name.file_name(), source)
                .map_err(|source| TemplateError::Syntax { name, source })?;
        }

        Ok(Self { env })
    }

    /// Render a template with a page as context.
    ///
    /// The template sees `title` and `body`, with the body decoded as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if the template fails to execute.
    pub fn render_page(&self, name: TemplateName, page: &Page) -> Result<String, TemplateError> {
        self.render_main(
            name,
            PageContext {
                title: &page.title,
                body: page.body_text(),
            },
        )
    }

    /// Render a template with arbitrary data as context.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if the template fails to execute.
    pub fn render_main<S: Serialize>(
        &self,
        name: TemplateName,
        data: S,
    ) -> Result<String, TemplateError> {
        self.env
            .get_template(name.file_name())
            .and_then(|template| template.render(data))
            .map_err(|source| TemplateError::Render { name, source })
    }
}

/// Read a template file, falling back to the built-in source if it's absent.
fn read_source(dir: &Path, name: TemplateName) -> Result<String, TemplateError> {
    let path = dir.join(name.file_name());
    match std::fs::read_to_string(&path) {
        Ok(source) => {
            tracing::debug!(template = %name, path = %path.display(), "Loaded template");
            Ok(source)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(template = %name, "Using built-in template");
            Ok(name.builtin_source().to_owned())
        }
        Err(source) => Err(TemplateError::Io { path, source }),
    }
}
