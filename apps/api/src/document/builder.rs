//! PDF serialisation of laid-out pages.

use std::path::Path;

use printpdf::{DictItem, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::document::layout::{
    assemble_blocks, default_page_config, layout_blocks, BlockStyle, PageConfig, PageLayout,
};
use crate::document::winansi;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write PDF to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What ended up in the written document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub body_blocks: usize,
    pub pages: usize,
}

/// Renders `text` under `title` and writes the PDF to `output_path`.
///
/// Empty `text` still produces a valid single-page document with the title.
pub fn build(text: &str, title: &str, output_path: &Path) -> Result<BuildReport, RenderError> {
    let (bytes, report) = render(text, title, &default_page_config());

    std::fs::write(output_path, bytes).map_err(|source| RenderError::Io {
        path: output_path.display().to_string(),
        source,
    })?;

    debug!(
        "Wrote PDF to {}: {} body blocks on {} page(s)",
        output_path.display(),
        report.body_blocks,
        report.pages
    );
    Ok(report)
}

/// In-memory rendering. Returns the PDF bytes and a summary of the content.
pub fn render(text: &str, title: &str, config: &PageConfig) -> (Vec<u8>, BuildReport) {
    render_with(text, title, config, &save_options())
}

/// Text is written as raw `Tj` operations (see `page_ops`), which printpdf
/// only serialises when `secure` is off.
fn save_options() -> PdfSaveOptions {
    PdfSaveOptions {
        secure: false,
        ..PdfSaveOptions::default()
    }
}

fn render_with(
    text: &str,
    title: &str,
    config: &PageConfig,
    options: &PdfSaveOptions,
) -> (Vec<u8>, BuildReport) {
    let blocks = assemble_blocks(text, title);
    let body_blocks = blocks
        .iter()
        .filter(|b| b.style == BlockStyle::Body)
        .count();

    let layouts = layout_blocks(&blocks, config);
    let report = BuildReport {
        body_blocks,
        pages: layouts.len(),
    };

    let pages: Vec<PdfPage> = layouts
        .iter()
        .map(|layout| {
            PdfPage::new(
                Mm(config.width_mm),
                Mm(config.height_mm),
                page_ops(layout),
            )
        })
        .collect();

    let mut warnings = Vec::new();
    let mut doc = PdfDocument::new(title);
    let bytes = doc
        .with_pages(pages)
        .save(options, &mut warnings);

    if !warnings.is_empty() {
        debug!("PDF serialisation produced {} warning(s)", warnings.len());
    }

    (bytes, report)
}

/// One text section per placed line.
///
/// printpdf hands built-in font text to lopdf as UTF-8 even though the font
/// dictionary declares WinAnsiEncoding, so the string operand is encoded here
/// and written with a plain `Tj`. The empty `WriteTextBuiltinFont` emits no
/// operator; it only registers the face in the page's font resources.
fn page_ops(layout: &PageLayout) -> Vec<Op> {
    let mut ops = Vec::with_capacity(layout.lines.len() * 6);
    for line in &layout.lines {
        ops.push(Op::StartTextSection);
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(line.size_pt),
            font: line.face.builtin(),
        });
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(line.x_pt),
                y: Pt(line.baseline_pt),
            },
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: Vec::new(),
            font: line.face.builtin(),
        });
        ops.push(Op::Unknown {
            key: "Tj".to_string(),
            value: vec![DictItem::String {
                data: winansi::encode(&line.text),
                literal: false,
            }],
        });
        ops.push(Op::EndTextSection);
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_empty_text_writes_title_only_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");

        let report = build("", "Learning Pathway - Rust", &path).unwrap();

        assert_eq!(report, BuildReport { body_blocks: 0, pages: 1 });
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_build_counts_non_empty_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathway.pdf");
        let text = "1) Intro\n\n2) Week 1: setup\n<p></p>\n* Project: notebook\n\n";

        let report = build(text, "Learning Pathway - Data Science", &path).unwrap();

        assert_eq!(report.body_blocks, 3);
        assert!(path.exists());
    }

    #[test]
    fn test_build_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");

        let err = build("Intro", "T", &path).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
        assert!(err.to_string().contains("out.pdf"));
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn render_uncompressed(text: &str, title: &str) -> Vec<u8> {
        let options = PdfSaveOptions {
            optimize: false,
            ..save_options()
        };
        render_with(text, title, &default_page_config(), &options).0
    }

    #[test]
    fn test_bullet_line_is_drawn_in_winansi() {
        let bytes = render_uncompressed("* Learn pandas", "T");

        // 0x95 is the WinAnsi bullet; no UTF-8 E2 80 A2 sequence may appear.
        assert!(contains(&bytes, b"<95204C6561726E2070616E646173> Tj"));
        assert!(!contains(&bytes, b"E280A2"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
    }

    #[test]
    fn test_accents_and_dashes_are_single_bytes() {
        let bytes = render_uncompressed("caf\u{e9} \u{2014} 5\u{20AC}", "Pathway");

        assert!(contains(&bytes, b"<636166E92097203580> Tj"));
        assert!(contains(&bytes, b"<50617468776179> Tj"));
    }

    #[test]
    fn test_both_faces_are_declared_as_resources() {
        let bytes = render_uncompressed("Intro", "Title");
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/Helvetica"));
        assert!(contains(&bytes, b"/F5 10 Tf"));
    }

    #[test]
    fn test_render_long_text_reports_multiple_pages() {
        let text: String = (1..=150).map(|i| format!("Day {i}: review notes\n")).collect();
        let (bytes, report) = render(&text, "T", &default_page_config());
        assert_eq!(report.body_blocks, 150);
        assert!(report.pages > 1);
        assert!(!bytes.is_empty());
    }
}
