//! Embedded PDF text layer.

use super::{format_page_blocks, DocumentError, DocumentResult};
use tracing::debug;

/// Number of pages in the document.
pub fn page_count(bytes: &[u8]) -> DocumentResult<u32> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| DocumentError::PdfParsing(e.to_string()))?;
    u32::try_from(document.get_pages().len())
        .map_err(|e| DocumentError::PdfParsing(e.to_string()))
}

/// Text of the selected 1-based pages as `--- Page N ---` blocks.
///
/// Pages past the end of the document are skipped.
pub fn extract_text_layer(bytes: &[u8], pages: &[u32]) -> DocumentResult<String> {
    let page_texts = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| DocumentError::PdfParsing(e.to_string()))?;

    debug!(
        total_pages = page_texts.len(),
        selected = pages.len(),
        "extracted PDF text layer"
    );

    let selected = pages.iter().filter_map(|&page| {
        let index = usize::try_from(page).ok()?.checked_sub(1)?;
        page_texts.get(index).map(|text| (page, text.as_str()))
    });

    Ok(format_page_blocks(selected))
}
