//! Combined multi-file corpus.

/// A file whose Markdown has been produced (or not yet).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub filename: String,
    pub markdown: String,
    pub summary: Option<String>,
}

impl ProcessedDocument {
    pub fn new(filename: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            markdown: markdown.into(),
            summary: None,
        }
    }
}

/// Join every document that has Markdown under a `## File N: name` heading.
///
/// Numbering follows each document's position in `documents`, so a skipped
/// file leaves a gap.
pub fn build_corpus(documents: &[ProcessedDocument]) -> String {
    documents
        .iter()
        .enumerate()
        .filter(|(_, doc)| !doc.markdown.is_empty())
        .map(|(i, doc)| format!("## File {}: {}\n\n{}", i + 1, doc.filename, doc.markdown))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_corpus_skips_empty() {
        let docs = vec![
            ProcessedDocument::new("summary.pdf", "# Summary"),
            ProcessedDocument::new("blank.txt", ""),
            ProcessedDocument::new("tests.pdf", "Bench testing"),
        ];
        assert_eq!(
            build_corpus(&docs),
            "## File 1: summary.pdf\n\n# Summary\n\n---\n\n## File 3: tests.pdf\n\nBench testing"
        );
    }

    #[test]
    fn test_empty_corpus() {
        assert_eq!(build_corpus(&[]), "");
    }
}
