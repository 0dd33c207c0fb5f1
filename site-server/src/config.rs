//! Server configuration from command-line flags and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use site_core::HistoryConfig;
use site_export::{ExportConfig, HtmlVariant};

/// Default port for the Sitecraft server.
pub const DEFAULT_PORT: u16 = 9474;

/// Command-line arguments for the Sitecraft server.
#[derive(Debug, Clone, Parser)]
#[command(name = "sitecraft")]
#[command(about = "Local design server for the Sitecraft website builder")]
#[command(version)]
pub struct ServerConfig {
    /// Port to listen on (localhost only)
    #[arg(long, env = "SITECRAFT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory for persisted projects; in-memory only when unset
    #[arg(long, env = "SITECRAFT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Undo steps kept per project (0 = unbounded)
    #[arg(long, env = "SITECRAFT_HISTORY_LIMIT", default_value_t = 100)]
    pub history_limit: usize,

    /// Site title used by HTML exports
    #[arg(long, env = "SITECRAFT_SITE_TITLE", default_value = "My Website")]
    pub site_title: String,

    /// Export HTML as one self-contained file instead of a multi-file package
    #[arg(long, env = "SITECRAFT_SINGLE_FILE")]
    pub single_file: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: None,
            history_limit: 100,
            site_title: "My Website".to_string(),
            single_file: false,
        }
    }
}

impl ServerConfig {
    /// Loopback address to bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], self.port))
    }

    /// Per-project history settings.
    #[must_use]
    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig::with_max_entries(self.history_limit)
    }

    /// Exporter settings.
    #[must_use]
    pub fn export_config(&self) -> ExportConfig {
        let variant = if self.single_file {
            HtmlVariant::SingleFile
        } else {
            HtmlVariant::Package
        };
        ExportConfig::default()
            .with_title(self.site_title.clone())
            .with_html_variant(variant)
    }
}
