//! User configuration — display settings and keybindings.
//!
//! Read (never written) from a simple key-value text file at
//! `$XDG_CONFIG_HOME/transmute-chart/config.toml`
//! (default `~/.config/transmute-chart/config.toml`).  `--print-config`
//! prints the effective settings in the same format.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::labels::Lang;
use crate::error::ConfigError;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the diagram view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleFooter,
    CycleMarker,
    ToggleLanguage,
    OpenSettings,
    ShowControls,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls popup).
    pub const ALL: &[Action] = &[
        Action::ToggleFooter,
        Action::CycleMarker,
        Action::ToggleLanguage,
        Action::OpenSettings,
        Action::ShowControls,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ToggleFooter => "Toggle Footer",
            Action::CycleMarker => "Cycle Marker",
            Action::ToggleLanguage => "Switch Language",
            Action::OpenSettings => "Open Settings",
            Action::ShowControls => "Show Controls",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::ToggleFooter => "toggle_footer",
            Action::CycleMarker => "cycle_marker",
            Action::ToggleLanguage => "toggle_language",
            Action::OpenSettings => "open_settings",
            Action::ShowControls => "show_controls",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── marker ────────────

/// Which glyphs the canvas plots with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerKind {
    #[default]
    Braille,
    HalfBlock,
    Dot,
    Block,
}

impl MarkerKind {
    pub const ALL: &[MarkerKind] = &[
        MarkerKind::Braille,
        MarkerKind::HalfBlock,
        MarkerKind::Dot,
        MarkerKind::Block,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MarkerKind::Braille => "braille",
            MarkerKind::HalfBlock => "halfblock",
            MarkerKind::Dot => "dot",
            MarkerKind::Block => "block",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarkerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or(ConfigError::UnknownMarker(s))
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Named keys: (config spelling, display spelling, code).
const NAMED_KEYS: &[(&str, &str, KeyCode)] = &[
    ("Space", "Space", KeyCode::Char(' ')),
    ("Up", "↑", KeyCode::Up),
    ("Down", "↓", KeyCode::Down),
    ("Left", "←", KeyCode::Left),
    ("Right", "→", KeyCode::Right),
    ("Enter", "Enter", KeyCode::Enter),
    ("Esc", "Esc", KeyCode::Esc),
    ("Tab", "Tab", KeyCode::Tab),
    ("Backspace", "Bksp", KeyCode::Backspace),
    ("Delete", "Del", KeyCode::Delete),
    ("Home", "Home", KeyCode::Home),
    ("End", "End", KeyCode::End),
    ("PageUp", "PgUp", KeyCode::PageUp),
    ("PageDown", "PgDn", KeyCode::PageDown),
    // `+` joins modifiers and `,` separates bindings in the file.
    ("Plus", "+", KeyCode::Char('+')),
    ("Comma", ",", KeyCode::Char(',')),
];

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const MOD_MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code
            && (self.modifiers & Self::MOD_MASK) == (event.modifiers & Self::MOD_MASK)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        s
    }

    fn key_name(&self, for_display: bool) -> String {
        if let Some(&(cfg, disp, _)) = NAMED_KEYS.iter().find(|(_, _, c)| *c == self.code) {
            let name = if for_display { disp } else { cfg };
            return name.to_string();
        }
        match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// User-facing form, e.g. `"Ctrl+c"`, `"↑"`, `"q"`.
    pub fn display(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.key_name(true))
    }

    /// Config-file form, e.g. `"Alt+Up"`.
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.key_name(false))
    }
}

impl FromStr for KeyBind {
    type Err = ConfigError;

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`, `"F5"`, `"Ctrl+Plus"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidKey(s.to_string());
        if s.trim() == "+" {
            return Ok(KeyBind::new(KeyCode::Char('+'), KeyModifiers::NONE));
        }
        let mut parts: Vec<&str> = s.trim().split('+').collect();
        let key_part = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            };
        }

        let lower = key_part.to_lowercase();
        let named = NAMED_KEYS
            .iter()
            .find(|(cfg, disp, _)| cfg.to_lowercase() == lower || disp.to_lowercase() == lower)
            .map(|(_, _, code)| *code);

        let code = match named {
            Some(code) => code,
            None if lower == "return" => KeyCode::Enter,
            None if lower == "escape" => KeyCode::Esc,
            None if lower.starts_with('f') && lower.len() > 1 => {
                KeyCode::F(lower[1..].parse().map_err(|_| invalid())?)
            }
            None if key_part.chars().count() == 1 => {
                KeyCode::Char(key_part.chars().next().ok_or_else(invalid)?)
            }
            None => return Err(invalid()),
        };

        Ok(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — display settings and keybindings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Language of the diagram annotations.
    pub lang: Lang,
    /// Canvas marker glyphs.
    pub marker: MarkerKind,
    /// Replace `⁻`/`−` with ASCII `-` in diagram text.
    pub ascii_minus: bool,
    /// Show the explanatory block under the chain.
    pub show_footer: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            lang: Lang::default(),
            marker: MarkerKind::default(),
            ascii_minus: false,
            show_footer: true,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ToggleFooter, vec![KeyBind::new(Char('f'), n)]);
        m.insert(CycleMarker, vec![KeyBind::new(Char('m'), n)]);
        m.insert(ToggleLanguage, vec![KeyBind::new(Char('l'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(ShowControls, vec![KeyBind::new(Char('c'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to a key event.  The binding with the most
    /// modifiers wins when several match.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Format the binding list for a given action (e.g. `"q/Esc"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: footer | {}: marker | {}: language | {}: settings | {}: quit",
            self.short_binding(Action::ToggleFooter),
            self.short_binding(Action::CycleMarker),
            self.short_binding(Action::ToggleLanguage),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    // ── file format ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("cannot read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse the config-file text.  Bad lines are skipped with a warning.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if let Err(e) = config.apply(key.trim(), value.trim()) {
                tracing::warn!("config line {}: {e}", lineno + 1);
            }
        }

        config
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim_matches('"');
        match key {
            "lang" => self.lang = value.parse()?,
            "marker" => self.marker = value.parse()?,
            "ascii_minus" => self.ascii_minus = parse_bool(key, value)?,
            "show_footer" => self.show_footer = parse_bool(key, value)?,
            _ => {
                let Some(action) = Action::from_config_key(key) else {
                    tracing::debug!("ignoring unknown config key `{key}`");
                    return Ok(());
                };
                let parsed = value
                    .split(',')
                    .map(|part| part.trim().trim_matches('"').parse::<KeyBind>())
                    .collect::<Result<Vec<_>, _>>()?;
                if !parsed.is_empty() {
                    self.bindings.insert(action, parsed);
                }
            }
        }
        Ok(())
    }

    /// Render in the config-file format; [`AppConfig::parse`] reads it back.
    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# transmute-chart configuration".to_string(),
            String::new(),
            "# Display".to_string(),
            format!("lang = {}", self.lang),
            format!("marker = {}", self.marker),
            format!("ascii_minus = {}", self.ascii_minus),
            format!("show_footer = {}", self.show_footer),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, Plus, Comma, F1-F12"
                .to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/transmute-chart/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}
