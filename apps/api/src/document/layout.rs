//! Flowable document model and page layout.
//!
//! A document is an ordered list of styled blocks (one title, then body
//! paragraphs). Layout wraps each block into lines and flows the lines down
//! A4 pages, starting a new page whenever the next line would cross the
//! bottom margin. Pure and CPU-bound; no I/O happens here.

use serde::{Deserialize, Serialize};

use crate::document::font_metrics::{get_metrics, FontFace};
use crate::document::sanitize::sanitize;
use crate::document::winansi;

const PT_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Block model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStyle {
    Title,
    Body,
}

/// A discrete styled text unit in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub style: BlockStyle,
    pub text: String,
}

/// Builds the block sequence: the title first, then one body block per line
/// of `text` that is still non-empty after sanitization. Block text is
/// restricted to the WinAnsi code page the built-in fonts are drawn with.
pub fn assemble_blocks(text: &str, title: &str) -> Vec<Block> {
    let mut blocks = vec![Block {
        style: BlockStyle::Title,
        text: winansi::normalize(title.trim()),
    }];

    blocks.extend(
        text.lines()
            .map(|line| winansi::normalize(&sanitize(line)).trim().to_string())
            .filter(|line| !line.is_empty())
            .map(|text| Block {
                style: BlockStyle::Body,
                text,
            }),
    );

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Typography for one block style.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_pt: f32,
    /// Baseline-to-baseline distance.
    pub leading_pt: f32,
    /// Vertical gap after the block.
    pub space_after_pt: f32,
    pub centered: bool,
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_pt: f32,
    pub title: TextStyle,
    pub body: TextStyle,
}

impl PageConfig {
    pub fn width_pt(&self) -> f32 {
        self.width_mm * PT_PER_MM
    }

    pub fn height_pt(&self) -> f32 {
        self.height_mm * PT_PER_MM
    }

    pub fn text_width_pt(&self) -> f32 {
        self.width_pt() - 2.0 * self.margin_pt
    }

    fn style(&self, style: BlockStyle) -> &TextStyle {
        match style {
            BlockStyle::Title => &self.title,
            BlockStyle::Body => &self.body,
        }
    }
}

/// A4 with 1" margins; bold 18pt centred title, 10pt body.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_pt: 72.0,
        title: TextStyle {
            face: FontFace::HelveticaBold,
            size_pt: 18.0,
            leading_pt: 22.0,
            space_after_pt: 12.0,
            centered: true,
        },
        body: TextStyle {
            face: FontFace::Helvetica,
            size_pt: 10.0,
            leading_pt: 12.0,
            space_after_pt: 8.0,
            centered: false,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// One positioned line of text. Coordinates are PDF user space (origin at
/// the bottom-left corner, y grows upwards), in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub face: FontFace,
    pub size_pt: f32,
    pub x_pt: f32,
    pub baseline_pt: f32,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Flows `blocks` onto pages. Always returns at least one page.
pub fn layout_blocks(blocks: &[Block], config: &PageConfig) -> Vec<PageLayout> {
    let top = config.height_pt() - config.margin_pt;
    let bottom = config.margin_pt;
    let text_width = config.text_width_pt();

    let mut pages = Vec::new();
    let mut page = PageLayout::default();
    let mut cursor = top;

    for block in blocks {
        let style = config.style(block.style);
        let metrics = get_metrics(style.face);

        for line in metrics.wrap(&block.text, style.size_pt, text_width) {
            if cursor - style.leading_pt < bottom && !page.lines.is_empty() {
                pages.push(std::mem::take(&mut page));
                cursor = top;
            }

            let x_pt = if style.centered {
                let width = metrics.measure_pt(&line, style.size_pt);
                config.margin_pt + ((text_width - width) / 2.0).max(0.0)
            } else {
                config.margin_pt
            };

            page.lines.push(PlacedLine {
                text: line,
                face: style.face,
                size_pt: style.size_pt,
                x_pt,
                baseline_pt: cursor - style.size_pt,
            });
            cursor -= style.leading_pt;
        }

        cursor -= style.space_after_pt;
    }

    pages.push(page);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_title_only() {
        let blocks = assemble_blocks("", "Learning Pathway - Data Science");
        assert_eq!(
            blocks,
            vec![Block {
                style: BlockStyle::Title,
                text: "Learning Pathway - Data Science".to_string()
            }]
        );
    }

    #[test]
    fn test_one_body_block_per_non_empty_line() {
        let text = "Intro\n\n**Week 1**\n<br>\n* pandas\n   \n```\nTips";
        let blocks = assemble_blocks(text, "T");
        let body: Vec<&str> = blocks[1..].iter().map(|b| b.text.as_str()).collect();
        assert_eq!(body, vec!["Intro", "Week 1", "\u{2022} pandas", "Tips"]);
        assert!(blocks[1..].iter().all(|b| b.style == BlockStyle::Body));
    }

    #[test]
    fn test_block_text_is_limited_to_winansi() {
        let blocks = assemble_blocks("* Caf\u{e9} \u{2192} pandas\n\u{1F680}", "Path \u{2014} Rust");
        assert_eq!(blocks[0].text, "Path \u{2014} Rust");
        assert_eq!(blocks[1].text, "\u{2022} Caf\u{e9} ? pandas");
        assert_eq!(blocks[2].text, "?");
    }

    #[test]
    fn test_layout_of_title_only_is_single_centered_line() {
        let config = default_page_config();
        let pages = layout_blocks(&assemble_blocks("", "Pathway"), &config);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 1);
        let line = &pages[0].lines[0];
        assert_eq!(line.face, FontFace::HelveticaBold);
        assert!(line.x_pt > config.margin_pt);
        assert!(line.baseline_pt < config.height_pt() - config.margin_pt);
    }

    #[test]
    fn test_body_lines_are_left_aligned_and_descend() {
        let config = default_page_config();
        let pages = layout_blocks(&assemble_blocks("one\ntwo\nthree", "T"), &config);
        let body: Vec<&PlacedLine> = pages[0].lines[1..].iter().collect();
        assert_eq!(body.len(), 3);
        assert!(body.iter().all(|l| (l.x_pt - config.margin_pt).abs() < 1e-3));
        assert!(body[0].baseline_pt > body[1].baseline_pt);
        assert!(body[1].baseline_pt > body[2].baseline_pt);
    }

    #[test]
    fn test_long_document_flows_onto_more_pages() {
        let config = default_page_config();
        let text: String = (1..=120).map(|i| format!("Step {i}: practice\n")).collect();
        let pages = layout_blocks(&assemble_blocks(&text, "T"), &config);
        assert!(pages.len() > 1);

        let total: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(total, 121);
        for page in &pages {
            assert!(!page.lines.is_empty());
            for line in &page.lines {
                assert!(line.baseline_pt >= config.margin_pt - line.size_pt);
            }
        }
    }

    #[test]
    fn test_no_blocks_still_produces_a_page() {
        assert_eq!(layout_blocks(&[], &default_page_config()).len(), 1);
    }
}
