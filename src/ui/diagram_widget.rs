//! Ratatui widget that paints a [`Scene`] onto a braille (or block) canvas.
//!
//! Shapes map one-to-one onto the canvas' own circle and line shapes.  Text
//! needs more care: the canvas only knows where a label *starts*, so
//! alignment and line stacking are resolved here against the cell grid, and
//! labels that would overwrite each other are moved to the nearest free rows.

use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle as CanvasCircle, Context, Line as CanvasLine},
        Block, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::config::MarkerKind;
use crate::core::scene::{
    arrow_head, GroupKind, HAlign, Primitive, Scene, Segment, Text, TextRole, VAlign, X_BOUNDS,
    Y_BOUNDS,
};

use super::theme::Theme;

impl MarkerKind {
    pub fn symbol(self) -> Marker {
        match self {
            MarkerKind::Braille => Marker::Braille,
            MarkerKind::HalfBlock => Marker::HalfBlock,
            MarkerKind::Dot => Marker::Dot,
            MarkerKind::Block => Marker::Block,
        }
    }
}

// ───────────────────────────────────────── text placement ────

/// Size of the canvas drawing area in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn of(area: Rect) -> Self {
        Self {
            cols: area.width,
            rows: area.height,
        }
    }

    fn x_per_col(self) -> f64 {
        (X_BOUNDS[1] - X_BOUNDS[0]) / f64::from(self.cols - 1)
    }

    fn y_per_row(self) -> f64 {
        (Y_BOUNDS[1] - Y_BOUNDS[0]) / f64::from(self.rows - 1)
    }

    /// Data coordinates of the middle of a cell.  Aiming there keeps float
    /// truncation in the canvas on the same cell.
    fn cell_centre(self, col: u16, row: u16) -> (f64, f64) {
        let x = (X_BOUNDS[0] + (f64::from(col) + 0.5) * self.x_per_col()).min(X_BOUNDS[1]);
        let y = (Y_BOUNDS[1] - (f64::from(row) + 0.5) * self.y_per_row()).max(Y_BOUNDS[0]);
        (x, y)
    }
}

/// One line of text pinned to a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub col: u16,
    /// Row counted from the top of the canvas.
    pub row: u16,
    /// Data coordinates that the canvas maps back onto `(col, row)`.
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Resolve alignment of `text` against the cell grid of `vp`.
///
/// Every line occupies one row.  Centred lines are shifted left by half their
/// display width; blocks are centred on, or sit on top of, the anchor row.
/// Lines that would run past the right edge are pulled back inside.
pub fn place_text(text: &Text, vp: Viewport) -> Vec<PlacedLine> {
    if vp.cols < 2 || vp.rows < 2 {
        return Vec::new();
    }
    let max_col = f64::from(vp.cols - 1);
    let max_row = f64::from(vp.rows - 1);

    let anchor_col = (text.x - X_BOUNDS[0]) / vp.x_per_col();
    let anchor_row = (Y_BOUNDS[1] - text.y) / vp.y_per_row();

    let lines: Vec<&str> = text.lines().collect();
    let n = lines.len() as f64;
    let first_row = match text.v_align {
        VAlign::Center => anchor_row - (n - 1.0) / 2.0,
        VAlign::Bottom => anchor_row - (n - 1.0),
    };

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let width = line.width() as f64;
            let start = match text.h_align {
                HAlign::Left => anchor_col,
                HAlign::Center => anchor_col - width / 2.0,
            };
            let fit = (f64::from(vp.cols) - width).max(0.0);
            let col = start.round().min(fit).clamp(0.0, max_col) as u16;
            let row = (first_row + i as f64).round().clamp(0.0, max_row) as u16;
            let (x, y) = vp.cell_centre(col, row);

            PlacedLine {
                col,
                row,
                x,
                y,
                text: line.to_string(),
            }
        })
        .collect()
}

// ───────────────────────────────────────── collisions ────────

/// Lower ranks claim cells first; counts are never displaced.
fn claim_rank(role: TextRole) -> u8 {
    match role {
        TextRole::Count => 0,
        TextRole::Title => 1,
        TextRole::Caption => 2,
        TextRole::Note => 3,
        TextRole::Footer => 4,
    }
}

/// Cells already covered by placed labels.
struct Occupancy {
    cols: usize,
    rows: usize,
    taken: Vec<bool>,
}

impl Occupancy {
    fn new(vp: Viewport) -> Self {
        let (cols, rows) = (usize::from(vp.cols), usize::from(vp.rows));
        Self {
            cols,
            rows,
            taken: vec![false; cols * rows],
        }
    }

    /// Could `line` sit `shift` rows away with a blank cell on either side?
    fn is_free(&self, line: &PlacedLine, shift: i32) -> bool {
        let row = i32::from(line.row) + shift;
        if row < 0 || row as usize >= self.rows {
            return false;
        }
        let col = usize::from(line.col);
        let start = col.saturating_sub(1);
        let end = (col + line.text.width() + 1).min(self.cols);
        let base = row as usize * self.cols;
        !self.taken[base + start..base + end].contains(&true)
    }

    fn claim(&mut self, line: &PlacedLine) {
        let col = usize::from(line.col);
        let end = (col + line.text.width()).min(self.cols);
        let base = usize::from(line.row) * self.cols;
        self.taken[base + col..base + end].fill(true);
    }
}

/// Row offsets to try, nearest first: 0, -1, +1, -2, +2, …
fn shifts(limit: i32) -> impl Iterator<Item = i32> {
    std::iter::once(0).chain((1..limit).flat_map(|d| [-d, d]))
}

/// Place every text on the grid.  A block that would overwrite an earlier
/// label moves as a whole to the nearest rows where it fits; if there are
/// none it stays where [`place_text`] put it.
pub fn layout_labels<'t>(
    texts: impl IntoIterator<Item = &'t Text>,
    vp: Viewport,
) -> Vec<(PlacedLine, TextRole)> {
    let mut texts: Vec<&Text> = texts.into_iter().collect();
    texts.sort_by_key(|t| claim_rank(t.role));

    let mut grid = Occupancy::new(vp);
    let mut placed = Vec::new();
    for text in texts {
        let block = place_text(text, vp);
        let shift = shifts(i32::from(vp.rows))
            .find(|&d| block.iter().all(|line| grid.is_free(line, d)))
            .unwrap_or(0);

        for mut line in block {
            line.row = (i32::from(line.row) + shift) as u16;
            (line.x, line.y) = vp.cell_centre(line.col, line.row);
            grid.claim(&line);
            placed.push((line, text.role));
        }
    }
    placed
}

// ───────────────────────────────────────── widget ────────────

/// The diagram widget — created fresh each frame.
pub struct DiagramWidget<'a> {
    scene: &'a Scene,
    marker: MarkerKind,
    show_footer: bool,
    block: Option<Block<'a>>,
}

impl<'a> DiagramWidget<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            marker: MarkerKind::default(),
            show_footer: true,
            block: None,
        }
    }

    pub fn marker(mut self, marker: MarkerKind) -> Self {
        self.marker = marker;
        self
    }

    pub fn show_footer(mut self, show: bool) -> Self {
        self.show_footer = show;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Indices of primitives that should not be painted.
    fn hidden(&self) -> HashSet<usize> {
        if self.show_footer {
            return HashSet::new();
        }
        self.scene
            .groups
            .iter()
            .filter(|g| g.kind == GroupKind::Footer)
            .flat_map(|g| g.range.clone())
            .collect()
    }
}

fn draw_segment(ctx: &mut Context<'_>, s: &Segment) {
    ctx.draw(&CanvasLine::new(
        s.x1,
        s.y1,
        s.x2,
        s.y2,
        Theme::ink_color(s.ink),
    ));
}

impl Widget for DiagramWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(b) => b.inner(area),
            None => area,
        };
        let vp = Viewport::of(inner);
        let hidden = self.hidden();

        let visible: Vec<&Primitive> = self
            .scene
            .primitives
            .iter()
            .enumerate()
            .filter(|(i, _)| !hidden.contains(i))
            .map(|(_, p)| p)
            .collect();

        let texts = visible.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        });
        let labels: Vec<(PlacedLine, Style)> = layout_labels(texts, vp)
            .into_iter()
            .map(|(line, role)| (line, Theme::text_style(role)))
            .collect();

        let mut canvas = Canvas::default()
            .marker(self.marker.symbol())
            .x_bounds(X_BOUNDS)
            .y_bounds(Y_BOUNDS)
            .paint(|ctx| {
                for p in &visible {
                    match p {
                        Primitive::Circle(c) => ctx.draw(&CanvasCircle {
                            x: c.x,
                            y: c.y,
                            radius: c.radius,
                            color: Theme::ink_color(c.ink),
                        }),
                        Primitive::Segment(s) => draw_segment(ctx, s),
                        Primitive::Arrow(a) => {
                            ctx.draw(&CanvasLine::new(
                                a.x1,
                                a.y1,
                                a.x2,
                                a.y2,
                                Theme::ink_color(a.ink),
                            ));
                            for stroke in arrow_head(a) {
                                draw_segment(ctx, &stroke);
                            }
                        }
                        Primitive::Text(_) => {}
                    }
                }
                for (line, style) in &labels {
                    ctx.print(line.x, line.y, Line::styled(line.text.clone(), *style));
                }
            });
        if let Some(block) = self.block {
            canvas = canvas.block(block);
        }
        canvas.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(x: f64, y: f64, content: &str, h: HAlign, v: VAlign) -> Text {
        Text {
            x,
            y,
            content: content.to_string(),
            h_align: h,
            v_align: v,
            role: TextRole::Note,
        }
    }

    fn with_role(role: TextRole, t: Text) -> Text {
        Text { role, ..t }
    }

    fn rows_of(placed: &[(PlacedLine, TextRole)], role: TextRole) -> Vec<u16> {
        placed
            .iter()
            .filter(|(_, r)| *r == role)
            .map(|(l, _)| l.row)
            .collect()
    }

    // 136 columns → 0.1 data units per column; 35 rows → 0.1 per row.
    const VP: Viewport = Viewport { cols: 136, rows: 35 };

    #[test]
    fn left_aligned_starts_at_anchor() {
        let placed = place_text(&text(2.0, 3.4, "abc", HAlign::Left, VAlign::Center), VP);
        assert_eq!(placed.len(), 1);
        assert_eq!((placed[0].col, placed[0].row), (20, 0));
    }

    #[test]
    fn centered_shifts_by_half_display_width() {
        let placed = place_text(&text(5.0, 1.7, "abcd", HAlign::Center, VAlign::Center), VP);
        assert_eq!(placed[0].col, 48);
        assert_eq!(placed[0].row, 17);

        // Wide glyphs count twice.
        let placed = place_text(&text(5.0, 1.7, "裂变", HAlign::Center, VAlign::Center), VP);
        assert_eq!(placed[0].col, 48);
    }

    #[test]
    fn multi_line_blocks_stack_downwards() {
        let centred = place_text(&text(1.0, 1.7, "a\nb\nc", HAlign::Left, VAlign::Center), VP);
        let rows: Vec<u16> = centred.iter().map(|l| l.row).collect();
        assert_eq!(rows, vec![16, 17, 18]);

        let bottom = place_text(&text(1.0, 0.2, "a\nb\nc", HAlign::Left, VAlign::Bottom), VP);
        let rows: Vec<u16> = bottom.iter().map(|l| l.row).collect();
        assert_eq!(rows, vec![30, 31, 32]);
    }

    #[test]
    fn data_coords_map_back_to_same_cell() {
        for l in place_text(&text(7.3, 2.45, "xyz\nlonger line", HAlign::Center, VAlign::Center), VP) {
            let col = ((l.x - X_BOUNDS[0]) * f64::from(VP.cols - 1) / (X_BOUNDS[1] - X_BOUNDS[0])) as u16;
            let row = ((Y_BOUNDS[1] - l.y) * f64::from(VP.rows - 1) / (Y_BOUNDS[1] - Y_BOUNDS[0])) as u16;
            assert_eq!((col, row), (l.col, l.row));
        }
    }

    #[test]
    fn placement_clamps_to_edges() {
        let placed = place_text(&text(13.5, 0.0, "overflowing", HAlign::Left, VAlign::Bottom), VP);
        // Pulled left so all 11 cells stay on the canvas.
        assert_eq!(placed[0].col, 125);
        assert_eq!(placed[0].row, 34);
        assert!(placed[0].x <= X_BOUNDS[1]);
        assert!(placed[0].y >= Y_BOUNDS[0]);

        let placed = place_text(&text(-1.0, 1.7, "x", HAlign::Center, VAlign::Center), VP);
        assert_eq!(placed[0].col, 0);
    }

    #[test]
    fn overlapping_caption_moves_up_one_row() {
        let count = with_role(TextRole::Count, text(2.0, 1.7, "p = 92", HAlign::Left, VAlign::Center));
        let caption = with_role(TextRole::Caption, text(2.2, 1.7, "(+1 n)", HAlign::Left, VAlign::Center));
        let placed = layout_labels([&caption, &count], VP);

        // Counts keep their row even when listed after the caption.
        assert_eq!(rows_of(&placed, TextRole::Count), vec![17]);
        assert_eq!(rows_of(&placed, TextRole::Caption), vec![16]);
        for (line, _) in &placed {
            let col = ((line.x - X_BOUNDS[0]) / VP.x_per_col()) as u16;
            let row = ((Y_BOUNDS[1] - line.y) / VP.y_per_row()) as u16;
            assert_eq!((col, row), (line.col, line.row));
        }
    }

    #[test]
    fn blocks_move_as_a_whole() {
        let count = with_role(TextRole::Count, text(1.0, 1.6, "p = 92", HAlign::Left, VAlign::Center));
        let note = text(1.0, 1.7, "a\nb\nc", HAlign::Left, VAlign::Center);
        let placed = layout_labels([&count, &note], VP);

        // The last line would land on the count; one row up clears all three.
        assert_eq!(rows_of(&placed, TextRole::Count), vec![18]);
        assert_eq!(rows_of(&placed, TextRole::Note), vec![15, 16, 17]);
    }

    #[test]
    fn touching_labels_are_separated() {
        let left = with_role(TextRole::Title, text(2.0, 1.7, "abc", HAlign::Left, VAlign::Center));
        let right = text(2.3, 1.7, "def", HAlign::Left, VAlign::Center);
        let placed = layout_labels([&left, &right], VP);
        assert_eq!(rows_of(&placed, TextRole::Title), vec![17]);
        assert_eq!(rows_of(&placed, TextRole::Note), vec![16]);

        // One blank cell between them is enough.
        let spaced = text(2.4, 1.7, "def", HAlign::Left, VAlign::Center);
        let placed = layout_labels([&left, &spaced], VP);
        assert_eq!(rows_of(&placed, TextRole::Note), vec![17]);
    }

    #[test]
    fn crowded_grid_falls_back_to_anchor_row() {
        let vp = Viewport { cols: 10, rows: 2 };
        let a = with_role(TextRole::Count, text(0.0, 3.4, "aaaaaaaaaa", HAlign::Left, VAlign::Center));
        let b = with_role(TextRole::Count, text(0.0, 0.0, "bbbbbbbbbb", HAlign::Left, VAlign::Center));
        let c = text(0.0, 3.4, "c", HAlign::Left, VAlign::Center);
        let placed = layout_labels([&a, &b, &c], vp);
        assert_eq!(rows_of(&placed, TextRole::Note), vec![0]);
    }

    #[test]
    fn tiny_viewport_places_nothing() {
        let vp = Viewport { cols: 1, rows: 10 };
        assert!(place_text(&text(1.0, 1.0, "a", HAlign::Left, VAlign::Center), vp).is_empty());
    }
}
