//! HTTP server for the wiki.
//!
//! Serves plain-text pages from a directory, rendered through HTML
//! templates:
//!
//! - `/` lists every page
//! - `/view/{title}` shows a page, or redirects to its edit form
//! - `/edit/{title}` shows the edit form
//! - `/save/{title}` stores the submitted body
//! - `/create/` and `/new/` create a page under a title chosen in the form
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         pages_dir: PathBuf::from("pages"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum fallback (dispatch)
//!                        │
//!                        ├─► Route::parse ──► handler
//!                        │                      │
//!                        │                      ├─► Storage (FsStorage)
//!                        │                      └─► Templates (minijinja)
//!                        │
//!                        └─► 404 for anything outside the route table
//! ```

mod app;
mod error;
mod form;
mod handlers;
mod middleware;
mod route;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use state::AppState;
use wiki_storage::Storage;
use wiki_storage_fs::FsStorage;
use wiki_templates::Templates;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding `{title}.txt` page files.
    pub pages_dir: PathBuf,
    /// Directory with template overrides (`None` uses built-in templates).
    pub templates_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            pages_dir: PathBuf::from("."),
            templates_dir: None,
        }
    }
}

/// Run the server.
///
/// Templates are compiled before the listener is bound, so a broken
/// template directory fails startup instead of the first request.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if templates fail to load or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.pages_dir.clone()));
    let templates = Templates::from_dir(config.templates_dir.as_deref())?;

    let state = Arc::new(AppState { storage, templates });
    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        pages_dir = %config.pages_dir.display(),
        "Starting server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from wiki config.
#[must_use]
pub fn server_config_from_config(config: &wiki_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        pages_dir: config.pages_resolved.dir.clone(),
        templates_dir: config.templates_resolved.dir.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use wiki_config::CliSettings;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.pages_dir, PathBuf::from("."));
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn test_server_config_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("wiki.toml");
        std::fs::write(
            &config_path,
            "[server]\nport = 9000\n\n[pages]\ndir = \"data\"\n\n[templates]\ndir = \"tmpl\"\n",
        )
        .unwrap();
        let config = wiki_config::Config::load(Some(config_path.as_path()), None).unwrap();

        let server_config = server_config_from_config(&config);

        assert_eq!(server_config.port, 9000);
        assert_eq!(server_config.pages_dir, temp_dir.path().join("data"));
        assert_eq!(
            server_config.templates_dir.as_deref(),
            Some(temp_dir.path().join("tmpl").as_path())
        );
    }

    #[test]
    fn test_server_config_from_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("wiki.toml");
        std::fs::write(&config_path, "").unwrap();
        let settings = CliSettings {
            host: Some("127.0.0.1".to_string()),
            port: Some(3000),
            pages_dir: Some(PathBuf::from("/srv/pages")),
            templates_dir: None,
        };
        let config =
            wiki_config::Config::load(Some(config_path.as_path()), Some(&settings)).unwrap();

        let server_config = server_config_from_config(&config);

        assert_eq!(server_config.host, "127.0.0.1");
        assert_eq!(server_config.port, 3000);
        assert_eq!(server_config.pages_dir, Path::new("/srv/pages"));
    }

    #[tokio::test]
    async fn test_run_server_fails_on_missing_templates_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            pages_dir: temp_dir.path().to_path_buf(),
            templates_dir: Some(temp_dir.path().join("missing")),
        };

        let err = run_server(config).await.unwrap_err();

        assert!(err.to_string().contains("Template directory not found"));
    }
}
