use docchat::application::ports::{FileLoader, FileLoaderError};
use docchat::domain::{ContentType, Document};
use docchat::infrastructure::text_processing::{PdfAdapter, assemble_page_text};

#[test]
fn given_fragments_per_page_when_assembling_then_joins_with_spaces_without_page_separator() {
    let pages = vec![
        vec!["Page", "one"],
        vec!["Page", "two"],
        vec![],
        vec!["Page", "four"],
        vec!["end"],
    ];

    let text = assemble_page_text(pages);

    assert_eq!(text, "Page onePage twoPage fourend");
}

#[test]
fn given_no_pages_when_assembling_then_returns_empty_text() {
    let pages: Vec<Vec<String>> = Vec::new();

    assert_eq!(assemble_page_text(pages), "");
}

#[tokio::test]
async fn given_five_page_pdf_when_extracting_then_pages_are_concatenated_in_order() {
    let pdf_bytes = include_bytes!("../fixtures/five_pages.pdf");
    let document = Document::new(
        "five_pages.pdf".to_string(),
        ContentType::Pdf,
        pdf_bytes.len() as u64,
    );

    let text = PdfAdapter::new()
        .extract_text(pdf_bytes, &document)
        .await
        .unwrap();

    assert_eq!(text, "First pageSecond pageThird pageFourth pageFifth page");
}

#[tokio::test]
async fn given_bytes_that_are_not_a_pdf_when_extracting_then_fails_to_parse() {
    let data = b"this is definitely not a pdf";
    let document = Document::new("broken.pdf".to_string(), ContentType::Pdf, data.len() as u64);

    let result = PdfAdapter::new().extract_text(data, &document).await;

    assert!(matches!(result, Err(FileLoaderError::ParseFailed(_))));
}

#[tokio::test]
async fn given_text_document_when_extracting_with_pdf_adapter_then_rejects_content_type() {
    let document = Document::new("notes.txt".to_string(), ContentType::Text, 5);

    let result = PdfAdapter::new().extract_text(b"hello", &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(mime)) if mime == "text/plain"
    ));
}
