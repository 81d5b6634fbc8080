//! Diagram model – the drawing surface, the nucleus glyph, and the chain layout.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Everything
//! is expressed in data coordinates on a [`scene::Scene`].

pub mod chain;
pub mod labels;
pub mod nucleus;
pub mod scene;

use labels::Lang;
use scene::Scene;

/// Build the full diagram for `lang`.
pub fn build_scene(lang: Lang, ascii_minus: bool) -> Scene {
    let t0 = std::time::Instant::now();
    let mut scene = Scene::new();
    chain::draw_chain(&mut scene, lang.catalogue());
    if ascii_minus {
        scene.map_text(labels::ascii_minus);
    }
    tracing::debug!(
        "build_scene: {:.2?} lang={lang} primitives={}",
        t0.elapsed(),
        scene.len()
    );
    scene
}
