//! The nucleus glyph: outline, proton/neutron counts, a bold label, and an
//! optional ring of "glow" ticks for excited nuclei.

use super::labels::Catalogue;
use super::scene::{HAlign, Ink, Scene, TextRole, VAlign};

/// Radius of the nucleus outline.
pub const NUCLEUS_RADIUS: f64 = 0.6;
/// Outer radius of the excitation ticks.
pub const TICK_OUTER_RADIUS: f64 = 0.9;
/// Number of excitation ticks, evenly spaced starting at 0°.
pub const TICK_COUNT: usize = 10;

/// Parameters of one nucleus glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct NucleusSpec<'a> {
    pub center: (f64, f64),
    pub protons: u32,
    pub neutrons: u32,
    /// May span several lines.
    pub label: &'a str,
    pub excited: bool,
}

/// Angles (radians) of the excitation ticks.
pub fn tick_angles() -> impl Iterator<Item = f64> {
    (0..TICK_COUNT).map(|k| std::f64::consts::TAU * k as f64 / TICK_COUNT as f64)
}

/// Draw one nucleus onto `canvas`.
pub fn draw_nucleus(canvas: &mut Scene, spec: &NucleusSpec<'_>, text: &Catalogue) {
    let (x, y) = spec.center;

    canvas.add_circle(x, y, NUCLEUS_RADIUS, Ink::Nucleus);
    canvas.add_text(
        (x - 0.35, y + 0.15),
        text.proton_line(spec.protons),
        (HAlign::Left, VAlign::Center),
        TextRole::Count,
    );
    canvas.add_text(
        (x - 0.35, y - 0.15),
        text.neutron_line(spec.neutrons),
        (HAlign::Left, VAlign::Center),
        TextRole::Count,
    );
    canvas.add_text(
        (x, y + 0.9),
        spec.label,
        (HAlign::Center, VAlign::Center),
        TextRole::Title,
    );

    if spec.excited {
        for angle in tick_angles() {
            let (sin, cos) = angle.sin_cos();
            canvas.add_segment(
                (x + NUCLEUS_RADIUS * cos, y + NUCLEUS_RADIUS * sin),
                (x + TICK_OUTER_RADIUS * cos, y + TICK_OUTER_RADIUS * sin),
                Ink::Excitation,
            );
        }
    }
}
