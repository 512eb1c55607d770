//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::schema::StaticConfig;

/// Static content server for single page applications.
#[derive(Debug, Parser)]
#[command(name = "staticsrv", version = crate::VERSION, long_about = None)]
pub struct Args {
    /// Network interface to expose for serving the website
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub addr: String,

    /// Network interface to expose for serving prometheus metrics
    #[arg(long, default_value = "0.0.0.0:9090")]
    pub metrics_addr: String,

    /// HTTP path where prometheus metrics are exported
    #[arg(long, default_value = "/metrics")]
    pub metrics_path: String,

    /// Disables the /readyz and /livez endpoints
    #[arg(long)]
    pub disable_health_checks: bool,

    /// Disables the /config.json endpoint
    #[arg(long)]
    pub disable_config_variables: bool,

    /// Enables serving of fallback file (index.html) for any missing file
    #[arg(long)]
    pub enable_fallback_to_index: bool,

    /// Enable scraping application metrics
    #[arg(long)]
    pub enable_metrics: bool,

    /// Enable access log to see all requests to your server on stderr
    #[arg(long)]
    pub enable_access_log: bool,

    /// Comma separated list of environment variables to expose in /config.json
    #[arg(long, default_value = "")]
    pub config_variables: String,

    /// The source directory for the site to host [default: current directory]
    pub dir: Option<PathBuf>,
}

impl Args {
    /// Turn the parsed flags into a settings tree.
    ///
    /// Without a positional directory the current working directory is served.
    pub fn into_config(self) -> std::io::Result<StaticConfig> {
        let mut config = StaticConfig::default();

        config.listener.bind_address = self.addr;
        config.content.dir = match self.dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        config.content.fallback_to_index = self.enable_fallback_to_index;
        config.endpoints.health_checks = !self.disable_health_checks;
        config.endpoints.config_variables = !self.disable_config_variables;
        config.endpoints.config_variable_names = self.config_variables;
        config.observability.access_log = self.enable_access_log;
        config.observability.metrics_enabled = self.enable_metrics;
        config.observability.metrics_address = self.metrics_addr;
        config.observability.metrics_path = self.metrics_path;

        Ok(config)
    }
}
