//! Input handling — maps key events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Action;

use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Windows reports releases too.
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Diagram => handle_diagram_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsHelp => handle_controls_key(state, key),
    }
}

// ── Diagram view (configurable bindings) ────────────────────────

fn handle_diagram_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    tracing::debug!("action: {action:?}");

    match action {
        Action::Quit => state.should_quit = true,
        Action::ToggleFooter => state.toggle_footer(),
        Action::CycleMarker => state.cycle_marker(),
        Action::ToggleLanguage => state.set_lang(state.config.lang.next()),
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::ShowControls => state.active_view = ActiveView::ControlsHelp,
    }
}

// ── Settings menu (fixed keys) ──────────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    let count = SETTINGS_ITEMS.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Diagram;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.checked_sub(1).unwrap_or(count - 1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.settings_selected = (state.settings_selected + 1) % count;
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}

// ── Controls help (read-only) ───────────────────────────────────

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        state.active_view = ActiveView::Diagram;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, MarkerKind};
    use crate::core::labels::Lang;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    #[test]
    fn quit_bindings() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('q')));
        assert!(s.should_quit);

        let mut s = state();
        s.active_view = ActiveView::SettingsMenu;
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
    }

    #[test]
    fn diagram_actions_update_state() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('f')));
        assert!(!s.config.show_footer);
        handle_key(&mut s, press(KeyCode::Char('m')));
        assert_eq!(s.config.marker, MarkerKind::HalfBlock);

        let before = s.scene.texts().next().map(|t| t.content.clone());
        handle_key(&mut s, press(KeyCode::Char('l')));
        assert_eq!(s.config.lang, Lang::En);
        let after = s.scene.texts().next().map(|t| t.content.clone());
        assert_ne!(before, after, "scene text follows the language");
    }

    #[test]
    fn settings_menu_navigation_wraps() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('?')));
        assert_eq!(s.active_view, ActiveView::SettingsMenu);

        handle_key(&mut s, press(KeyCode::Up));
        assert_eq!(s.settings_selected, SETTINGS_ITEMS.len() - 1);
        handle_key(&mut s, press(KeyCode::Down));
        assert_eq!(s.settings_selected, 0);

        handle_key(&mut s, press(KeyCode::Esc));
        assert_eq!(s.active_view, ActiveView::Diagram);
    }

    #[test]
    fn settings_items_activate() {
        let mut s = state();
        s.active_view = ActiveView::SettingsMenu;

        // Language
        handle_key(&mut s, press(KeyCode::Enter));
        assert_eq!(s.config.lang, Lang::En);

        // ASCII minus rebuilds the scene.
        s.settings_selected = 3;
        handle_key(&mut s, press(KeyCode::Char(' ')));
        assert!(s.config.ascii_minus);
        assert!(s.scene.texts().all(|t| !t.content.contains('⁻')));

        // Controls submenu, then back out.
        s.settings_selected = SETTINGS_ITEMS.len() - 1;
        handle_key(&mut s, press(KeyCode::Enter));
        assert_eq!(s.active_view, ActiveView::ControlsHelp);
        handle_key(&mut s, press(KeyCode::Esc));
        assert_eq!(s.active_view, ActiveView::Diagram);
    }

    #[test]
    fn session_changes_never_write_the_config_file() {
        let dir = std::env::temp_dir().join(format!("transmute-chart-session-{}", std::process::id()));
        std::env::set_var("XDG_CONFIG_HOME", &dir);
        let path = crate::config::config_path();
        assert!(path.starts_with(&dir));

        // As if started with `--lang en`.
        let mut s = AppState::new(AppConfig {
            lang: Lang::En,
            ..AppConfig::default()
        });
        for c in ['f', 'm', 'l'] {
            handle_key(&mut s, press(KeyCode::Char(c)));
        }
        s.active_view = ActiveView::SettingsMenu;
        for i in 0..SETTINGS_ITEMS.len() - 1 {
            s.settings_selected = i;
            handle_key(&mut s, press(KeyCode::Enter));
        }

        assert_eq!(s.config.lang, Lang::En, "toggled twice");
        assert!(s.config.show_footer, "toggled twice");
        assert!(s.config.ascii_minus);
        assert!(!path.exists(), "{} was written", path.display());
    }

    #[test]
    fn releases_are_ignored() {
        let mut s = state();
        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        handle_key(&mut s, release);
        assert!(!s.should_quit);
    }
}
