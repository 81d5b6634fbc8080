//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::{ActiveView, AppState};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens another view.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }

    /// Perform the item's action.
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Submenu { view, .. } => state.active_view = *view,
            Self::Toggle { get, set, .. } => {
                let current = get(&*state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Cycle {
        label: "Language",
        value: |s| s.config.lang.label().to_string(),
        cycle: |s| s.set_lang(s.config.lang.next()),
    },
    SettingsItem::Cycle {
        label: "Marker",
        value: |s| s.config.marker.to_string(),
        cycle: |s| s.cycle_marker(),
    },
    SettingsItem::Toggle {
        label: "Footer",
        get: |s| s.config.show_footer,
        set: |s, v| s.config.show_footer = v,
    },
    SettingsItem::Toggle {
        label: "ASCII Minus Signs",
        get: |s| s.config.ascii_minus,
        set: |s, v| {
            s.config.ascii_minus = v;
            s.rebuild_scene();
        },
    },
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsHelp,
    },
];
