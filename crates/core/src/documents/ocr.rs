//! Rasterize-and-OCR extraction through the poppler and tesseract CLIs.

use super::{format_page_blocks, DocumentError, DocumentResult, OcrLanguage};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

pub const PDFTOPPM: &str = "pdftoppm";
pub const TESSERACT: &str = "tesseract";

/// Rendering resolution handed to `pdftoppm`.
pub const RASTER_DPI: u32 = 300;

/// Paths of the external OCR tools.
#[derive(Debug, Clone)]
pub struct OcrTools {
    pub pdftoppm: PathBuf,
    pub tesseract: PathBuf,
}

impl OcrTools {
    /// Locate both tools on PATH.
    pub fn locate() -> DocumentResult<Self> {
        Ok(Self {
            pdftoppm: locate_tool(PDFTOPPM)?,
            tesseract: locate_tool(TESSERACT)?,
        })
    }
}

fn locate_tool(tool: &str) -> DocumentResult<PathBuf> {
    which::which(tool).map_err(|_| DocumentError::ToolUnavailable {
        tool: tool.to_string(),
    })
}

/// OCR the selected pages and return `--- Page N ---` blocks.
///
/// Both tools are located before any page is processed, so a missing tool
/// never yields a partial result.
pub async fn ocr_pages(bytes: &[u8], pages: &[u32], language: OcrLanguage) -> DocumentResult<String> {
    let tools = OcrTools::locate()?;
    let workdir = tempfile::tempdir()?;
    let pdf_path = workdir.path().join("source.pdf");
    tokio::fs::write(&pdf_path, bytes).await?;

    info!(pages = pages.len(), language = %language, "running OCR");

    let mut results = Vec::with_capacity(pages.len());
    for &page in pages {
        let image = rasterize_page(&tools.pdftoppm, &pdf_path, workdir.path(), page).await?;
        let text = recognize(&tools.tesseract, &image, language).await?;
        debug!(page, chars = text.len(), "page recognized");
        results.push((page, text));
    }

    Ok(format_page_blocks(
        results.iter().map(|(page, text)| (*page, text.as_str())),
    ))
}

async fn rasterize_page(
    pdftoppm: &Path,
    pdf_path: &Path,
    workdir: &Path,
    page: u32,
) -> DocumentResult<PathBuf> {
    let prefix = workdir.join(format!("page-{page}"));
    let page_arg = page.to_string();
    let dpi_arg = RASTER_DPI.to_string();

    let mut command = Command::new(pdftoppm);
    command
        .args(["-f", page_arg.as_str(), "-l", page_arg.as_str()])
        .args(["-r", dpi_arg.as_str()])
        .args(["-png", "-singlefile"])
        .arg(pdf_path)
        .arg(&prefix);
    run_tool(PDFTOPPM, &mut command).await?;

    Ok(prefix.with_extension("png"))
}

async fn recognize(tesseract: &Path, image: &Path, language: OcrLanguage) -> DocumentResult<String> {
    let mut command = Command::new(tesseract);
    command
        .arg(image)
        .arg("stdout")
        .args(["-l", language.code()]);
    let stdout = run_tool(TESSERACT, &mut command).await?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

async fn run_tool(tool: &str, command: &mut Command) -> DocumentResult<Vec<u8>> {
    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DocumentError::Ocr(format!(
            "{tool} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_reported_by_name() {
        match locate_tool("review-kit-no-such-binary") {
            Err(DocumentError::ToolUnavailable { tool }) => {
                assert_eq!(tool, "review-kit-no-such-binary");
            }
            other => panic!("Expected ToolUnavailable, got {other:?}"),
        }
    }
}
