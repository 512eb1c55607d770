//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with probe, config and content routes
//! - Wire the observability decorators around the content routes
//! - Serve content and metrics on their own listeners
//! - Graceful shutdown of both listeners

use std::sync::Arc;

use axum::{routing::any, Router};
use tokio::net::TcpListener;

use crate::config::schema::{
    CONFIG_PATH, INDEX_FILE, LEGACY_HEALTH_PATH, LIVENESS_PATH, READINESS_PATH,
};
use crate::config::validation::{check_index_document, validate_config};
use crate::config::{ConfigVariables, StaticConfig};
use crate::content::ContentResolver;
use crate::error::ServerError;
use crate::http::handlers::{handle_config, handle_ok};
use crate::lifecycle::Shutdown;
use crate::net;
use crate::observability::{metrics::exposition_router, Observability};

/// Static content server.
pub struct StaticServer {
    router: Router,
    config: StaticConfig,
    observability: Observability,
}

impl StaticServer {
    /// Create a server exposing variables read from the process environment.
    pub fn new(config: StaticConfig) -> Result<Self, ServerError> {
        let variables = ConfigVariables::from_env(&config.endpoints.config_variable_names);
        Self::with_variables(config, variables)
    }

    /// Create a server exposing the given configuration variables.
    pub fn with_variables(
        config: StaticConfig,
        variables: ConfigVariables,
    ) -> Result<Self, ServerError> {
        validate_config(&config).map_err(ServerError::Config)?;

        if let Some(warning) = check_index_document(&config.content.dir) {
            tracing::warn!("{}: required to display the website", warning);
        }

        let observability = Observability::from_config(&config.observability)?;
        let router = build_router(&config, Arc::new(variables), &observability);

        Ok(Self {
            router,
            config,
            observability,
        })
    }

    /// The assembled router, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn observability(&self) -> &Observability {
        &self.observability
    }

    /// Bind the configured listeners and serve until shutdown.
    pub async fn serve(self, shutdown: Shutdown) -> Result<(), ServerError> {
        let listener = net::bind(&self.config.listener.bind_address).await?;
        let metrics_listener = match self.observability.metrics {
            Some(_) => Some(net::bind(&self.config.observability.metrics_address).await?),
            None => None,
        };
        self.run(listener, metrics_listener, shutdown).await
    }

    /// Serve on already bound listeners until shutdown.
    ///
    /// If either server fails the other is abandoned and the error returned.
    pub async fn run(
        self,
        listener: TcpListener,
        metrics_listener: Option<TcpListener>,
        shutdown: Shutdown,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            dir = %self.config.content.dir.display(),
            address = %addr,
            path = "/",
            "Serving site"
        );

        let content = axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown.signalled());

        match (metrics_listener, self.observability.metrics) {
            (Some(metrics_listener), Some(metrics)) => {
                let path = self.config.observability.metrics_path.as_str();
                tracing::info!(
                    address = %metrics_listener.local_addr()?,
                    path = %path,
                    "Serving prometheus metrics"
                );
                let exporter = axum::serve(
                    metrics_listener,
                    exposition_router(metrics, path).into_make_service(),
                )
                .with_graceful_shutdown(shutdown.signalled());

                tokio::try_join!(async move { content.await }, async move { exporter.await })?;
            }
            _ => content.await?,
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router for the given settings.
///
/// Probes and `/config.json` are matched first; every other path goes to the
/// content resolver, wrapped by the enabled observability decorators.
pub fn build_router(
    config: &StaticConfig,
    variables: Arc<ConfigVariables>,
    observability: &Observability,
) -> Router {
    let mut router = Router::new();

    if config.endpoints.health_checks {
        tracing::info!(path = LIVENESS_PATH, "Liveness check available");
        tracing::info!(path = READINESS_PATH, "Readiness check available");
        router = router
            .route(LIVENESS_PATH, any(handle_ok))
            .route(READINESS_PATH, any(handle_ok))
            .route(LEGACY_HEALTH_PATH, any(handle_ok));
    }

    if config.endpoints.config_variables {
        tracing::info!(path = CONFIG_PATH, "Configuration variables available");
        router = router.route(CONFIG_PATH, any(handle_config).with_state(variables));
    }

    if config.content.fallback_to_index {
        tracing::info!(
            file = INDEX_FILE,
            status = 200,
            "Requests on missing content will serve the fallback document"
        );
    }

    let resolver = ContentResolver::new(&config.content.dir, config.content.fallback_to_index);
    let content = observability.apply(resolver.into_router());

    router.fallback_service(content)
}
