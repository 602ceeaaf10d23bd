//! Invoice rendering with a primary renderer and a fallback

pub mod html;

pub use html::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::invoice::document::InvoiceDocument;
use crate::traits::DocumentRenderer;

/// Output of a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    /// Suggested file name for download
    pub file_name: String,
    /// MIME type, e.g. `text/html`
    pub media_type: String,
    pub bytes: Vec<u8>,
    /// Name of the renderer that produced it
    pub renderer: String,
}

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Renderer unavailable: {0}")]
    Unavailable(String),
    #[error("Rendering failed: {0}")]
    Failed(String),
}

/// Render with `primary`, switching to `fallback` when it fails.
///
/// Neither renderer is retried; if the fallback fails too, its error is
/// returned.
pub async fn render_with_fallback(
    primary: &dyn DocumentRenderer,
    fallback: &dyn DocumentRenderer,
    invoice: &InvoiceDocument,
) -> Result<RenderedDocument, RenderError> {
    match primary.render(invoice).await {
        Ok(document) => {
            debug!(
                renderer = primary.name(),
                file_name = %document.file_name,
                "Rendered invoice"
            );
            Ok(document)
        }
        Err(e) => {
            warn!(
                renderer = primary.name(),
                fallback = fallback.name(),
                error = %e,
                "Invoice rendering failed, using fallback"
            );
            fallback.render(invoice).await
        }
    }
}
