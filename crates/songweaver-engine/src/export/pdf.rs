//! Plain-text PDF rendering.
//!
//! Text is set in 10pt Courier on A4 pages, word-wrapped to a fixed column
//! and paginated by line count.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: Mm = Mm(10.0);
const TOP: Mm = Mm(287.0);
const FONT_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 12.0;
/// Courier advances 0.6em per glyph; 90 columns fit the printable width
pub const WRAP_COLUMN: usize = 90;
pub const LINES_PER_PAGE: usize = 64;
const LAYER: &str = "Layer 1";

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF rendering failed: {0}")]
    Render(#[from] printpdf::Error),
}

/// Render `text` as a PDF document and return its bytes
pub fn render_text_pdf(title: &str, text: &str) -> Result<Vec<u8>, PdfError> {
    let unsupported = unencodable_chars(text);
    if !unsupported.is_empty() {
        let sample: String = unsupported.iter().take(10).collect();
        log::warn!(
            "{title}: {} character(s) outside WinAnsi will be missing from the PDF: {sample}",
            unsupported.len()
        );
    }

    let lines = wrap_lines(text, WRAP_COLUMN);
    let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, LAYER);
    let font = doc.add_builtin_font(BuiltinFont::Courier)?;

    let mut pages = lines.chunks(LINES_PER_PAGE);
    let first = pages.next().unwrap_or(&[]);
    write_page(&doc.get_page(page).get_layer(layer), &font, first);

    for chunk in pages {
        let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, LAYER);
        write_page(&doc.get_page(page).get_layer(layer), &font, chunk);
    }

    log::debug!("rendered {} lines into {title}", lines.len());
    Ok(doc.save_to_bytes()?)
}

fn write_page(layer: &PdfLayerReference, font: &IndirectFontRef, lines: &[String]) {
    layer.begin_text_section();
    layer.set_font(font, FONT_SIZE);
    layer.set_line_height(LINE_HEIGHT);
    layer.set_text_cursor(MARGIN, TOP);
    for line in lines {
        layer.write_text(line.as_str(), font);
        layer.add_line_break();
    }
    layer.end_text_section();
}

/// Punctuation and letters WinAnsi places in 0x80..=0x9F
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Whether the builtin fonts can encode `c`
pub fn is_win_ansi(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(c)
}

/// Distinct characters of `text` the builtin fonts cannot encode, in order of appearance
pub fn unencodable_chars(text: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in text.chars().filter(|&c| !is_win_ansi(c)) {
        if !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// Split `text` into lines of at most `width` characters, breaking at
/// spaces where possible. Existing line breaks are kept.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        if line.chars().count() <= width {
            out.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        for word in line.split(' ') {
            let mut word = word.to_string();
            loop {
                let current_len = current.chars().count();
                let word_len = word.chars().count();
                let sep = usize::from(current_len > 0);

                if current_len + sep + word_len <= width {
                    if sep == 1 {
                        current.push(' ');
                    }
                    current.push_str(&word);
                    break;
                }
                if current_len > 0 {
                    out.push(std::mem::take(&mut current));
                    continue;
                }
                // A single word longer than the column is hard-split
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                out.push(head);
            }
        }
        out.push(current);
    }
    out
}
