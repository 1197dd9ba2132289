// Document Loader: turns uploaded PDFs into plain text.
// Extraction never fails the review; unreadable input becomes an empty string.

pub mod extract;

pub use extract::extract_upload;
