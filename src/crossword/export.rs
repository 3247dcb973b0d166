use std::fmt;

use super::Layout;

pub const SVG_FILENAME: &str = "crossword-puzzle.svg";

#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Draw the letters as well as the clue numbers
    pub show_answers: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            cell_size: 40,
            show_answers: false,
        }
    }
}

/// Render a printable puzzle: one outlined square per filled cell and the
/// clue number in the corner of every word's first cell.
pub fn render_svg(layout: &Layout, options: &SvgOptions) -> String {
    SvgDocument { layout, options }.to_string()
}

struct SvgDocument<'a> {
    layout: &'a Layout,
    options: &'a SvgOptions,
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_svg(f, self.layout, self.options)
    }
}

fn write_svg(out: &mut impl fmt::Write, layout: &Layout, options: &SvgOptions) -> fmt::Result {
    let cell = options.cell_size as usize;
    let side = layout.grid.size() * cell;

    writeln!(
        out,
        r#"<svg width="{side}" height="{side}" xmlns="http://www.w3.org/2000/svg">"#
    )?;
    writeln!(out, "  <style>")?;
    writeln!(out, "    .cell {{ fill: white; stroke: black; stroke-width: 1; }}")?;
    writeln!(out, "    .number {{ font-size: 12px; }}")?;
    writeln!(
        out,
        "    .letter {{ font-size: 20px; text-anchor: middle; dominant-baseline: central; }}"
    )?;
    writeln!(out, "  </style>")?;

    for (row, cells) in layout.grid.row_cells().enumerate() {
        for (col, letter) in cells.iter().enumerate() {
            let Some(letter) = letter else {
                continue;
            };
            let (x, y) = (col * cell, row * cell);
            writeln!(
                out,
                r#"  <rect x="{x}" y="{y}" width="{cell}" height="{cell}" class="cell"/>"#
            )?;

            // Two words can start on the same cell; the one entered first labels it
            if let Some(placement) = layout
                .placements
                .iter()
                .filter(|p| p.x == col && p.y == row)
                .min_by_key(|p| p.word_index)
            {
                writeln!(
                    out,
                    r#"  <text x="{}" y="{}" class="number">{}</text>"#,
                    x + 5,
                    y + 12,
                    placement.number
                )?;
            }

            if options.show_answers {
                writeln!(
                    out,
                    r#"  <text x="{}" y="{}" class="letter">{}</text>"#,
                    x + cell / 2,
                    y + cell / 2,
                    escape_xml(*letter)
                )?;
            }
        }
    }

    writeln!(out, "</svg>")
}

fn escape_xml(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        '\'' => "&apos;".to_string(),
        other => other.to_string(),
    }
}
