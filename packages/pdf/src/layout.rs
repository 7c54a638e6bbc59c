//! Glyph positions to column-aware page text.
//!
//! [`GlyphCollector`] receives every glyph `pdf_extract` draws, with its
//! position on the page. [`render_page`] groups the glyphs of one page into
//! lines by baseline and writes a tab wherever the horizontal gap between two
//! glyphs is wide enough to separate table columns, so the column structure
//! survives into the text seen by [`text_table`](crate::text_table).

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};

/// Baseline distance, in glyph sizes, within which glyphs share a line.
const SAME_LINE: f64 = 0.5;

/// Horizontal gap, in glyph sizes, that separates two words.
const WORD_GAP: f64 = 0.1;

/// Horizontal gap, in glyph sizes, that separates two columns.
const COLUMN_GAP: f64 = 1.0;

/// Baseline distance, in glyph sizes, that starts a new block of lines.
const BLOCK_GAP: f64 = 2.5;

/// One drawn glyph in page space, origin at the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub text: String,
    pub x: f64,
    /// Baseline, measured down from the top of the page.
    pub y: f64,
    pub width: f64,
    /// Rendered font size.
    pub size: f64,
}

impl Glyph {
    fn end(&self) -> f64 {
        self.x + self.width
    }
}

/// Collects the glyphs of every page of a document.
#[derive(Debug, Default)]
pub struct GlyphCollector {
    page_height: f64,
    current: Vec<Glyph>,
    pages: Vec<Vec<Glyph>>,
}

impl GlyphCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Glyphs per page, in page order.
    #[must_use]
    pub fn into_pages(self) -> Vec<Vec<Glyph>> {
        self.pages
    }
}

impl OutputDev for GlyphCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.page_height = media_box.ury - media_box.lly;
        self.current.clear();
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.pages.push(std::mem::take(&mut self.current));
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        text: &str,
    ) -> Result<(), OutputError> {
        let scale = trm.m11.mul_add(trm.m22, -(trm.m12 * trm.m21)).abs().sqrt();
        let size = font_size * scale;

        self.current.push(Glyph {
            text: text.to_owned(),
            x: trm.m31,
            y: self.page_height - trm.m32,
            width: width * size,
            size,
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

fn group_lines(mut glyphs: Vec<Glyph>) -> Vec<Vec<Glyph>> {
    glyphs.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<Glyph>> = Vec::new();
    for glyph in glyphs {
        match lines.last_mut() {
            Some(line) if (glyph.y - line[0].y).abs() <= SAME_LINE * line[0].size.max(1.0) => {
                line.push(glyph);
            }
            _ => lines.push(vec![glyph]),
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    lines
}

fn render_line(line: &[Glyph]) -> String {
    let mut text = String::new();
    let mut previous: Option<&Glyph> = None;

    for glyph in line {
        if let Some(prev) = previous {
            let gap = glyph.x - prev.end();
            let size = prev.size.max(glyph.size);
            if gap > COLUMN_GAP * size {
                text.push('\t');
            } else if gap > WORD_GAP * size {
                text.push(' ');
            }
        }
        text.push_str(&glyph.text);
        previous = Some(glyph);
    }

    text
}

/// Renders one page of glyphs as text, one line per baseline.
///
/// Column gaps become tabs and large vertical gaps become blank lines.
#[must_use]
pub fn render_page(glyphs: Vec<Glyph>) -> String {
    let lines = group_lines(glyphs);
    let mut text = String::new();

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            let prev = &lines[i - 1];
            text.push('\n');
            if line[0].y - prev[0].y > BLOCK_GAP * prev[0].size.max(1.0) {
                text.push('\n');
            }
        }
        text.push_str(&render_line(line));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lays `text` out left to right from `x` with a fixed advance.
    fn word(text: &str, x: f64, y: f64) -> Vec<Glyph> {
        let mut x = x;
        text.chars()
            .map(|c| {
                let glyph = Glyph {
                    text: c.to_string(),
                    x,
                    y,
                    width: 6.0,
                    size: 12.0,
                };
                x += 6.0;
                glyph
            })
            .collect()
    }

    fn page(words: &[(&str, f64, f64)]) -> Vec<Glyph> {
        words.iter().flat_map(|&(t, x, y)| word(t, x, y)).collect()
    }

    #[test]
    fn wide_gaps_become_tabs() {
        let glyphs = page(&[
            ("Course", 72.0, 100.0),
            ("Credit", 300.0, 100.0),
            ("Grade", 450.0, 100.0),
        ]);
        assert_eq!(render_page(glyphs), "Course\tCredit\tGrade");
    }

    #[test]
    fn narrow_gaps_become_spaces() {
        let glyphs = page(&[("Linear", 72.0, 100.0), ("Algebra", 112.0, 100.0)]);
        assert_eq!(render_page(glyphs), "Linear Algebra");
    }

    #[test]
    fn touching_glyphs_join() {
        assert_eq!(render_page(word("日本史", 72.0, 100.0)), "日本史");
    }

    #[test]
    fn groups_lines_by_baseline_in_reading_order() {
        let glyphs = page(&[
            ("B", 300.0, 120.4),
            ("Calculus", 72.0, 120.0),
            ("Grade", 300.0, 100.0),
            ("Course", 72.0, 99.7),
        ]);
        assert_eq!(render_page(glyphs), "Course\tGrade\nCalculus\tB");
    }

    #[test]
    fn large_vertical_gaps_start_a_block() {
        let glyphs = page(&[("Calculus", 72.0, 100.0), ("Total", 72.0, 160.0)]);
        assert_eq!(render_page(glyphs), "Calculus\n\nTotal");
    }

    #[test]
    fn empty_page_renders_empty() {
        assert_eq!(render_page(Vec::new()), "");
    }
}
