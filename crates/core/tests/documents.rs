//! Integration tests for document extraction and corpus assembly.

mod common;

use common::*;
use rk_core::documents::pdf::{extract_text_layer, page_count};
use rk_core::documents::{
    build_corpus, cleanup_text, extract_pdf, highlight_keywords, parse_page_selection,
    CleanupOptions, DocumentKind, ExtractionStrategy, ProcessedDocument, SourceDocument,
};

const PAGES: [&str; 3] = [
    "Device Description infusion pump",
    "Indications for Use hospital setting",
    "Risk Analysis occlusion alarm",
];

/// RED: selected pages come back as page blocks in page order.
#[tokio::test]
async fn test_text_layer_extraction_of_selected_pages() {
    let bytes = make_test_pdf(&PAGES);
    let total = page_count(&bytes).expect("page count");
    assert_eq!(total, 3);

    let pages = parse_page_selection("3, 1", total);
    assert_eq!(pages, vec![1, 3]);

    let text = extract_pdf(&bytes, &pages, ExtractionStrategy::TextLayer)
        .await
        .expect("extraction");

    let first = text.find("--- Page 1 ---").expect("page 1 block");
    let third = text.find("--- Page 3 ---").expect("page 3 block");
    assert!(first < third);
    assert!(!text.contains("--- Page 2 ---"));
    assert!(text.contains("Device") || text.contains("infusion"));
    assert!(text.contains("Risk") || text.contains("occlusion"));
}

#[test]
fn test_out_of_range_selection_falls_back_to_first_page() {
    let bytes = make_test_pdf(&PAGES);
    let pages = parse_page_selection("9-12", page_count(&bytes).expect("page count"));
    assert_eq!(pages, vec![1]);

    let text = extract_text_layer(&bytes, &pages).expect("extraction");
    assert!(text.starts_with("--- Page 1 ---"));
}

#[tokio::test]
async fn test_source_document_from_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("Summary.PDF");
    std::fs::write(&path, make_test_pdf(&["One page"])).expect("write");

    let doc = SourceDocument::from_path(&path).await.expect("read");
    assert_eq!(doc.filename, "Summary.PDF");
    assert_eq!(doc.kind, DocumentKind::Pdf);
}

/// Text uploads go through cleanup with the text defaults, then into the corpus.
#[tokio::test]
async fn test_text_upload_to_corpus() {
    let (router, stub) = stub_router();
    let mut session = offline_session();

    let upload = SourceDocument::new("observations.txt", b"risk of occlusion".to_vec());
    assert_eq!(upload.kind, DocumentKind::Text);

    let options = CleanupOptions::for_text(&session.settings)
        .with_provider(STUB)
        .with_model("uppercase");
    let markdown = cleanup_text(&router, &mut session, &upload.text(), &options)
        .await
        .expect("cleanup");
    assert_eq!(markdown, "RISK OF OCCLUSION");
    assert_eq!(stub.requests()[0].max_tokens, 2000);

    let highlighted = highlight_keywords("Predicate device review", &["predicate device"], "#FF7F50");

    let corpus = build_corpus(&[
        ProcessedDocument::new(upload.filename.clone(), markdown),
        ProcessedDocument::new("empty.pdf", ""),
        ProcessedDocument::new("notes.md", highlighted),
    ]);

    assert_eq!(
        corpus,
        "## File 1: observations.txt\n\nRISK OF OCCLUSION\n\n---\n\n## File 3: notes.md\n\n<span style='color:#FF7F50'>Predicate device</span> review"
    );
}

#[cfg(feature = "e2e-ocr-tests")]
#[tokio::test]
async fn test_ocr_generated_pdf() {
    use rk_core::documents::OcrLanguage;

    let bytes = make_test_pdf(&["SUBSTANTIAL EQUIVALENCE"]);
    let text = extract_pdf(&bytes, &[1], ExtractionStrategy::Ocr(OcrLanguage::English))
        .await
        .expect("OCR succeeds when poppler and tesseract are installed");

    assert!(text.starts_with("--- Page 1 ---"));
    assert!(text.to_uppercase().contains("EQUIVALENCE"));
}
