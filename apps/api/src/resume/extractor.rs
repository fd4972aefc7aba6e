//! Document Text Extractor: raw text out of an uploaded PDF, page by page.
//!
//! All-or-nothing: if the document does not parse or any page fails to decode,
//! no text is returned.

use std::io::Read;

use bytes::Bytes;
use flate2::read::ZlibDecoder;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId, Stream};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Pdf(String),

    #[error("PDF decoder panicked: {0}")]
    Panicked(String),

    #[error("extraction worker failed: {0}")]
    Worker(String),
}

/// Extracts text from an in-memory PDF, joining pages in document order with `\n`.
///
/// Every page's content streams must decode before any text is returned.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    for (page_num, page_id) in doc.get_pages() {
        check_page_decodes(&doc, page_id)
            .map_err(|e| ExtractionError::Pdf(format!("page {page_num}: {e}")))?;
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    debug!("Extracted {} page(s) from PDF", pages.len());
    Ok(pages.join("\n"))
}

fn check_page_decodes(doc: &Document, page_id: ObjectId) -> Result<(), String> {
    for content_id in doc.get_page_contents(page_id) {
        let stream = doc
            .get_object(content_id)
            .and_then(Object::as_stream)
            .map_err(|e| e.to_string())?;
        let data = decode_stream_strict(stream)?;
        Content::decode(&data).map_err(|e| format!("malformed content stream: {e}"))?;
    }
    Ok(())
}

/// lopdf swallows zlib errors and returns partial output; Flate data is inflated
/// here first and any error is reported.
fn decode_stream_strict(stream: &Stream) -> Result<Vec<u8>, String> {
    if !stream.dict.has(b"Filter") {
        return Ok(stream.content.clone());
    }
    let filters = stream.filters().map_err(|e| e.to_string())?;
    if filters.first().map(String::as_str) == Some("FlateDecode") && !stream.content.is_empty() {
        let mut inflated = Vec::new();
        ZlibDecoder::new(stream.content.as_slice())
            .read_to_end(&mut inflated)
            .map_err(|e| format!("corrupt FlateDecode stream: {e}"))?;
    }
    stream.decompressed_content().map_err(|e| e.to_string())
}

/// Runs [`extract_pdf_text`] on the blocking pool.
///
/// The PDF library is known to panic on some malformed inputs; a panic is reported
/// as an extraction failure instead of bubbling up as an internal error.
pub async fn extract_pdf_text_blocking(bytes: Bytes) -> Result<String, ExtractionError> {
    match tokio::task::spawn_blocking(move || extract_pdf_text(&bytes)).await {
        Ok(result) => result,
        Err(join_err) => Err(join_failure(join_err)),
    }
}

fn join_failure(err: tokio::task::JoinError) -> ExtractionError {
    if !err.is_panic() {
        return ExtractionError::Worker(err.to_string());
    }
    let payload = err.into_panic();
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    ExtractionError::Panicked(message)
}
