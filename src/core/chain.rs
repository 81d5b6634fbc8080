//! The breeding chain layout: four nucleus stages, a fission stage, the
//! arrows between them, and the footer.

use super::labels::Catalogue;
use super::nucleus::{draw_nucleus, NucleusSpec};
use super::scene::{GroupKind, HAlign, Ink, Scene, TextRole, VAlign};

/// x-centres of the five stages, left to right.
pub const STAGE_XS: [f64; 5] = [0.9, 3.0, 5.1, 7.2, 9.5];
/// Common y of the nucleus centres and stage arrows.
pub const STAGE_Y: f64 = 2.2;
/// Gap left between a stage centre and the arrow end.
const ARROW_INSET: f64 = 0.45;
/// Height of arrow captions above the arrow.
const CAPTION_Y: f64 = 2.45;

/// One nucleus stage, minus its label (which is language dependent).
#[derive(Debug, Clone, Copy)]
pub struct StageDescriptor {
    pub protons: u32,
    pub neutrons: u32,
    pub excited: bool,
}

/// U-238, U-239 (excited after capture), Np-239, Pu-239.
pub const NUCLEUS_STAGES: [StageDescriptor; 4] = [
    StageDescriptor { protons: 92, neutrons: 146, excited: false },
    StageDescriptor { protons: 92, neutrons: 147, excited: true },
    StageDescriptor { protons: 93, neutrons: 146, excited: false },
    StageDescriptor { protons: 94, neutrons: 145, excited: false },
];

/// Labelled arrow between two stage centres.
#[derive(Debug, Clone, PartialEq)]
pub struct StageArrow<'a> {
    pub from_x: f64,
    pub to_x: f64,
    pub label: &'a str,
}

pub fn draw_stage_arrow(canvas: &mut Scene, arrow: &StageArrow<'_>) {
    canvas.add_arrow(
        (arrow.from_x + ARROW_INSET, STAGE_Y),
        (arrow.to_x - ARROW_INSET, STAGE_Y),
        Ink::Arrow,
    );
    canvas.add_text(
        ((arrow.from_x + arrow.to_x) / 2.0, CAPTION_Y),
        arrow.label,
        (HAlign::Center, VAlign::Center),
        TextRole::Caption,
    );
}

/// Two unequal fragments plus three emitted neutrons, centred on `x`.
pub fn draw_fission(canvas: &mut Scene, x: f64, text: &Catalogue) {
    let frag_y = 1.85;

    canvas.add_text(
        (x, 3.05),
        text.fission_title,
        (HAlign::Center, VAlign::Center),
        TextRole::Title,
    );

    for (dx, radius, caption) in [(-0.4, 0.5, text.fragment_a), (0.6, 0.4, text.fragment_b)] {
        canvas.add_circle(x + dx, frag_y, radius, Ink::Fragment);
        canvas.add_text(
            (x + dx, frag_y),
            caption,
            (HAlign::Center, VAlign::Center),
            TextRole::Note,
        );
    }

    for i in 0..3 {
        let i = i as f64;
        canvas.add_arrow(
            (x + 1.0 + 0.15 * i, frag_y + 0.05 * i),
            (x + 1.6 + 0.15 * i, frag_y + 0.1 * i),
            Ink::Neutron,
        );
    }

    canvas.add_text(
        (x + 1.9, 1.95),
        text.free_neutrons,
        (HAlign::Left, VAlign::Center),
        TextRole::Note,
    );
}

/// Draw the complete chain onto `canvas`.
pub fn draw_chain(canvas: &mut Scene, text: &Catalogue) {
    for (i, stage) in NUCLEUS_STAGES.iter().enumerate() {
        let spec = NucleusSpec {
            center: (STAGE_XS[i], STAGE_Y),
            protons: stage.protons,
            neutrons: stage.neutrons,
            label: text.stage_labels[i],
            excited: stage.excited,
        };
        canvas.group(GroupKind::Stage(i), |c| draw_nucleus(c, &spec, text));
    }

    let fission_idx = NUCLEUS_STAGES.len();
    canvas.group(GroupKind::Stage(fission_idx), |c| {
        draw_fission(c, STAGE_XS[fission_idx], text)
    });

    for (i, pair) in STAGE_XS.windows(2).enumerate() {
        let arrow = StageArrow {
            from_x: pair[0],
            to_x: pair[1],
            label: text.arrow_captions[i],
        };
        canvas.group(GroupKind::StageArrow(i), |c| draw_stage_arrow(c, &arrow));
    }

    canvas.group(GroupKind::Footer, |c| {
        c.add_text(
            (0.5, 0.15),
            text.footer,
            (HAlign::Left, VAlign::Bottom),
            TextRole::Footer,
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::labels::Lang;
    use crate::core::scene::{in_bounds, Primitive};

    fn chain(lang: Lang) -> Scene {
        let mut scene = Scene::new();
        draw_chain(&mut scene, lang.catalogue());
        scene
    }

    fn count(scene: &Scene, pred: impl Fn(GroupKind) -> bool) -> usize {
        scene.groups.iter().filter(|g| pred(g.kind)).count()
    }

    #[test]
    fn stage_centres_increase_left_to_right() {
        assert!(STAGE_XS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn chain_has_five_stages_four_arrows_one_footer() {
        let scene = chain(Lang::Zh);
        assert_eq!(count(&scene, |k| matches!(k, GroupKind::Stage(_))), 5);
        assert_eq!(count(&scene, |k| matches!(k, GroupKind::StageArrow(_))), 4);
        assert_eq!(count(&scene, |k| k == GroupKind::Footer), 1);
    }

    #[test]
    fn groups_cover_every_primitive_once() {
        let scene = chain(Lang::En);
        let covered: usize = scene.groups.iter().map(|g| g.range.len()).sum();
        assert_eq!(covered, scene.len());
    }

    #[test]
    fn only_the_captured_stage_is_excited() {
        let scene = chain(Lang::En);
        for group in &scene.groups {
            let ticks = scene
                .members(group)
                .iter()
                .filter(|p| matches!(p, Primitive::Segment(_)))
                .count();
            let expected = if group.kind == GroupKind::Stage(1) { 10 } else { 0 };
            assert_eq!(ticks, expected, "{:?}", group.kind);
        }
    }

    #[test]
    fn fission_stage_has_two_unequal_fragments_and_three_neutrons() {
        let scene = chain(Lang::Zh);
        let fission = scene
            .groups
            .iter()
            .find(|g| g.kind == GroupKind::Stage(4))
            .unwrap();
        let members = scene.members(fission);

        let radii: Vec<f64> = members
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle(c) => Some(c.radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![0.5, 0.4]);

        let neutrons = members
            .iter()
            .filter(|p| matches!(p, Primitive::Arrow(a) if a.ink == Ink::Neutron))
            .count();
        assert_eq!(neutrons, 3);
    }

    #[test]
    fn stage_arrows_point_right_between_neighbours() {
        let scene = chain(Lang::En);
        let arrows: Vec<_> = scene.arrows().filter(|a| a.ink == Ink::Arrow).collect();
        assert_eq!(arrows.len(), 4);
        for (i, a) in arrows.iter().enumerate() {
            assert!((a.x1 - (STAGE_XS[i] + 0.45)).abs() < 1e-9);
            assert!((a.x2 - (STAGE_XS[i + 1] - 0.45)).abs() < 1e-9);
            assert!(a.x2 > a.x1);
            assert_eq!(a.y1, STAGE_Y);
            assert_eq!(a.y2, STAGE_Y);
        }
    }

    #[test]
    fn everything_is_anchored_inside_bounds() {
        let scene = chain(Lang::Zh);
        for p in &scene.primitives {
            let (x, y) = match p {
                Primitive::Circle(c) => (c.x, c.y),
                Primitive::Segment(s) => (s.x2, s.y2),
                Primitive::Arrow(a) => (a.x2, a.y2),
                Primitive::Text(t) => (t.x, t.y),
            };
            assert!(in_bounds(x, y), "{p:?} outside bounds");
        }
    }

    #[test]
    fn nucleus_counts_match_isotopes() {
        let scene = chain(Lang::En);
        let counts: Vec<&str> = scene
            .texts()
            .filter(|t| t.role == TextRole::Count)
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(
            counts,
            [
                "protons p = 92", "neutrons n = 146",
                "protons p = 92", "neutrons n = 147",
                "protons p = 93", "neutrons n = 146",
                "protons p = 94", "neutrons n = 145",
            ]
        );
    }
}
