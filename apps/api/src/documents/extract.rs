//! PDF text extraction.
//!
//! Wraps `pdf-extract`. Corrupt, encrypted and image-only PDFs all yield an
//! empty string; one bad upload must not abort the review.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use tracing::{debug, warn};

/// Extracts the text of every page, or `""` when there is nothing usable.
pub fn extract_text(document: Option<&[u8]>) -> String {
    let Some(bytes) = document else {
        return String::new();
    };
    if bytes.is_empty() {
        return String::new();
    }

    // pdf-extract can panic on malformed content streams.
    let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match extracted {
        Ok(Ok(text)) => normalize(text),
        Ok(Err(e)) => {
            warn!("PDF extraction failed, treating document as empty: {e:?}");
            String::new()
        }
        Err(_) => {
            warn!("PDF extraction panicked, treating document as empty");
            String::new()
        }
    }
}

/// Runs `extract_text` on the blocking pool; PDF parsing is CPU-bound.
pub async fn extract_upload(document: Option<Bytes>) -> String {
    let Some(bytes) = document else {
        return String::new();
    };
    let size = bytes.len();

    match tokio::task::spawn_blocking(move || extract_text(Some(&bytes))).await {
        Ok(text) => {
            debug!("Extracted {} chars from {size}-byte upload", text.len());
            text
        }
        Err(e) => {
            warn!("PDF extraction task failed: {e}");
            String::new()
        }
    }
}

/// Drops form feeds between pages and collapses whitespace-only output to "".
fn normalize(text: String) -> String {
    let text = text.replace('\u{c}', "\n");
    if text.trim().is_empty() {
        String::new()
    } else {
        text
    }
}
