//! The drawing surface — an ordered list of primitives in data coordinates.
//!
//! A [`Scene`] is what the rest of the program calls "the canvas".  Drawing
//! routines take it as `&mut Scene` and append to it; nothing else holds
//! drawing state.  The UI layer later walks the primitives and paints them
//! onto whatever widget it likes.

use std::ops::Range;

// ───────────────────────────────────────── bounds ────────────

/// Horizontal extent of the diagram in data units.
pub const X_BOUNDS: [f64; 2] = [0.0, 13.5];
/// Vertical extent of the diagram in data units.
pub const Y_BOUNDS: [f64; 2] = [0.0, 3.4];

/// Is `(x, y)` inside the diagram bounds?
#[cfg(test)]
pub fn in_bounds(x: f64, y: f64) -> bool {
    (X_BOUNDS[0]..=X_BOUNDS[1]).contains(&x) && (Y_BOUNDS[0]..=Y_BOUNDS[1]).contains(&y)
}

// ───────────────────────────────────────── attributes ────────

/// What a primitive depicts.  The theme turns this into a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Nucleus,
    Excitation,
    Fragment,
    Arrow,
    Neutron,
}

/// Typographic role of a text primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Proton / neutron count lines inside a nucleus.
    Count,
    /// Bold isotope or stage title.
    Title,
    /// Caption above a stage arrow.
    Caption,
    /// Small annotation (fragment captions, free neutrons).
    Note,
    /// The explanatory block at the bottom.
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Center,
    Bottom,
}

// ───────────────────────────────────────── primitives ────────

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub ink: Ink,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub ink: Ink,
}

/// An arrow from `(x1, y1)` pointing at `(x2, y2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub ink: Ink,
}

/// A (possibly multi-line) text anchored at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub role: TextRole,
}

impl Text {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle(Circle),
    Segment(Segment),
    Arrow(Arrow),
    Text(Text),
}

// ───────────────────────────────────────── arrow heads ───────

/// Length of each head stroke in data units.
pub const ARROW_HEAD_LEN: f64 = 0.12;
/// Angle between the shaft and each head stroke.
pub const ARROW_HEAD_ANGLE_DEG: f64 = 25.0;

/// The two short strokes forming the head of `arrow`, both ending at its tip.
/// A zero-length arrow has no direction and yields two degenerate strokes.
pub fn arrow_head(arrow: &Arrow) -> [Segment; 2] {
    let dx = arrow.x2 - arrow.x1;
    let dy = arrow.y2 - arrow.y1;
    let back = dy.atan2(dx) + std::f64::consts::PI;
    let spread = ARROW_HEAD_ANGLE_DEG.to_radians();

    let stroke = |angle: f64| Segment {
        x1: arrow.x2 + ARROW_HEAD_LEN * angle.cos(),
        y1: arrow.y2 + ARROW_HEAD_LEN * angle.sin(),
        x2: arrow.x2,
        y2: arrow.y2,
        ink: arrow.ink,
    };
    [stroke(back - spread), stroke(back + spread)]
}

// ───────────────────────────────────────── groups ────────────

/// Logical grouping of primitives, used to inspect the composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// One of the main process stages (0-based, left to right).
    Stage(usize),
    /// The labelled arrow leading out of stage `i`.
    StageArrow(usize),
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub kind: GroupKind,
    /// Indices into [`Scene::primitives`].
    pub range: Range<usize>,
}

// ───────────────────────────────────────── scene ─────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub groups: Vec<Group>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_circle(&mut self, x: f64, y: f64, radius: f64, ink: Ink) {
        self.primitives
            .push(Primitive::Circle(Circle { x, y, radius, ink }));
    }

    pub fn add_segment(&mut self, (x1, y1): (f64, f64), (x2, y2): (f64, f64), ink: Ink) {
        self.primitives
            .push(Primitive::Segment(Segment { x1, y1, x2, y2, ink }));
    }

    /// Arrow from `from` pointing at `to`.
    pub fn add_arrow(&mut self, from: (f64, f64), to: (f64, f64), ink: Ink) {
        self.primitives.push(Primitive::Arrow(Arrow {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            ink,
        }));
    }

    pub fn add_text(
        &mut self,
        (x, y): (f64, f64),
        content: impl Into<String>,
        (h_align, v_align): (HAlign, VAlign),
        role: TextRole,
    ) {
        self.primitives.push(Primitive::Text(Text {
            x,
            y,
            content: content.into(),
            h_align,
            v_align,
            role,
        }));
    }

    /// Run `draw` and record everything it adds as one group.
    pub fn group(&mut self, kind: GroupKind, draw: impl FnOnce(&mut Scene)) {
        let start = self.primitives.len();
        draw(self);
        let end = self.primitives.len();
        self.groups.push(Group {
            kind,
            range: start..end,
        });
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Rewrite every text primitive in place.
    pub fn map_text(&mut self, f: impl Fn(&str) -> String) {
        for p in &mut self.primitives {
            if let Primitive::Text(t) = p {
                t.content = f(&t.content);
            }
        }
    }
}

/// Typed views used to inspect a scene.
#[cfg(test)]
impl Scene {
    /// Primitives belonging to `group`.
    pub fn members(&self, group: &Group) -> &[Primitive] {
        &self.primitives[group.range.clone()]
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Circle(c) => Some(c),
            _ => None,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Segment(s) => Some(s),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Arrow(a) => Some(a),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn group_records_exact_range() {
        let mut scene = Scene::new();
        scene.add_circle(1.0, 1.0, 0.5, Ink::Nucleus);
        scene.group(GroupKind::Footer, |s| {
            s.add_text((0.5, 0.5), "a", (HAlign::Left, VAlign::Bottom), TextRole::Footer);
            s.add_segment((0.0, 0.0), (1.0, 1.0), Ink::Arrow);
        });
        assert_eq!(scene.groups.len(), 1);
        assert_eq!(scene.groups[0].range, 1..3);
        assert_eq!(scene.members(&scene.groups[0]).len(), 2);
    }

    #[test]
    fn arrow_head_strokes_end_at_tip() {
        let arrow = Arrow {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 0.0,
            ink: Ink::Arrow,
        };
        let [a, b] = arrow_head(&arrow);
        for s in [&a, &b] {
            assert!(approx(s.x2, 1.0) && approx(s.y2, 0.0));
            assert!(approx((s.x2 - s.x1).hypot(s.y2 - s.y1), ARROW_HEAD_LEN));
            // Strokes trail behind the tip.
            assert!(s.x1 < 1.0);
        }
        // Mirror images about the shaft.
        assert!(approx(a.y1, -b.y1));
    }

    #[test]
    fn map_text_leaves_shapes_alone() {
        let mut scene = Scene::new();
        scene.add_circle(1.0, 1.0, 0.5, Ink::Nucleus);
        scene.add_text((1.0, 1.0), "β⁻", (HAlign::Center, VAlign::Center), TextRole::Caption);
        scene.map_text(|s| s.replace('⁻', "-"));
        assert_eq!(scene.texts().next().map(|t| t.content.as_str()), Some("β-"));
        assert_eq!(scene.circles().count(), 1);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(in_bounds(0.0, 0.0));
        assert!(in_bounds(13.5, 3.4));
        assert!(!in_bounds(-0.1, 1.0));
        assert!(!in_bounds(1.0, 3.5));
    }
}
