//! Fallback-aware static file resolution.
//!
//! # Responsibilities
//! - Serve files below the content root through `ServeDir`
//! - Substitute `index.html` for paths that do not exist (SPA routing)
//!
//! # Design Decisions
//! - No caching, every request re-resolves against the filesystem
//! - Only a genuine "not found" triggers the fallback; permission errors and
//!   the like go through `ServeDir` and surface with its semantics
//! - The fallback document is written as is: no conditional or range
//!   handling, no caching headers

use std::io::ErrorKind;
use std::path::PathBuf;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::config::schema::INDEX_FILE;
use crate::content::path::sanitise_path;

/// Body of the plain text "not found" response.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Resolves request paths against a read-only content root.
#[derive(Clone)]
pub struct ContentResolver {
    root: PathBuf,
    fallback: bool,
    files: ServeDir,
}

impl ContentResolver {
    pub fn new(root: impl Into<PathBuf>, fallback: bool) -> Self {
        let root = root.into();
        let files = ServeDir::new(&root).append_index_html_on_directories(true);
        Self {
            root,
            fallback,
            files,
        }
    }

    /// Map a sanitised request path to a location below the root.
    fn local_path(&self, sanitised: &str) -> PathBuf {
        self.root.join(sanitised.trim_start_matches('/'))
    }

    /// Serve one request.
    pub async fn serve(&self, request: Request) -> Response {
        if self.fallback {
            let path = sanitise_path(request.uri().path());
            if let Err(e) = tokio::fs::File::open(self.local_path(&path)).await {
                if e.kind() == ErrorKind::NotFound {
                    tracing::debug!(path = %path, "Serving fallback document");
                    return self.serve_fallback().await;
                }
            }
        }

        match self.files.clone().oneshot(request).await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => not_found(),
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }

    async fn serve_fallback(&self) -> Response {
        match tokio::fs::read(self.root.join(INDEX_FILE)).await {
            Ok(contents) => (
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                contents,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    file = INDEX_FILE,
                    "request error: cannot open fallback document"
                );
                // Nothing written: the client gets the implicit 200 with an empty body.
                Response::default()
            }
        }
    }

    /// Router sending every path and method to this resolver.
    pub fn into_router(self) -> Router {
        Router::new().fallback(serve_content).with_state(self)
    }
}

async fn serve_content(State(resolver): State<ContentResolver>, request: Request) -> Response {
    resolver.serve(request).await
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        NOT_FOUND_BODY,
    )
        .into_response()
}
