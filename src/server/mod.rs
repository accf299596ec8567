//! # HTTP Server for Label Rendering and Export
//!
//! A JSON API over the rendering pipeline: design previews with guides,
//! production SVG/PDF export, and compliance checks.
//!
//! ## Usage
//!
//! ```bash
//! etiqueta serve --listen 0.0.0.0:8080
//! ```
//!
//! ## Endpoints
//!
//! | Route | Body | Response |
//! |-------|------|----------|
//! | `POST /api/labels/preview` | `{template, options?}` | `image/svg+xml` preview |
//! | `POST /api/labels/export/svg` | `{template, variables?, dpi?}` | finalized SVG |
//! | `POST /api/labels/export/pdf` | `{template, variables?, dpi?}` | `application/pdf` |
//! | `POST /api/labels/compliance` | `{template}` | JSON compliance report |

mod handlers;

use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

use crate::error::EtiquetaError;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:8080".
    pub listen_addr: String,
}

/// Build the API router. Exposed separately from [`serve`] so tests can
/// drive it without binding a socket.
pub fn router() -> Router {
    Router::new()
        .route("/api/labels/preview", post(handlers::preview))
        .route("/api/labels/export/svg", post(handlers::export_svg))
        .route("/api/labels/export/pdf", post(handlers::export_pdf))
        .route("/api/labels/compliance", post(handlers::compliance))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use etiqueta::server::{ServerConfig, serve};
///
/// # async fn example() -> Result<(), etiqueta::error::EtiquetaError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), EtiquetaError> {
    let app = router();

    tracing::info!(listen = %config.listen_addr, "etiqueta HTTP server starting");

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            EtiquetaError::Server(format!("failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| EtiquetaError::Server(e.to_string()))?;

    Ok(())
}
