//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use crate::config::AppConfig;
use crate::core::{self, labels::Lang, scene::Scene};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Diagram,
    SettingsMenu,
    ControlsHelp,
}

/// Top-level application state.
pub struct AppState {
    /// The diagram, rebuilt whenever its text changes.
    pub scene: Scene,
    /// Display settings and keybindings.  Changes last for this session only.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let scene = core::build_scene(config.lang, config.ascii_minus);
        Self {
            scene,
            config,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
        }
    }

    pub fn rebuild_scene(&mut self) {
        self.scene = core::build_scene(self.config.lang, self.config.ascii_minus);
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.config.lang = lang;
        self.rebuild_scene();
        self.status_message = Some(format!("Language: {}", lang.label()));
    }

    pub fn cycle_marker(&mut self) {
        self.config.marker = self.config.marker.next();
        self.status_message = Some(format!("Marker: {}", self.config.marker));
    }

    pub fn toggle_footer(&mut self) {
        self.config.show_footer = !self.config.show_footer;
        let word = if self.config.show_footer { "shown" } else { "hidden" };
        self.status_message = Some(format!("Footer {word}"));
    }
}
