use thiserror::Error;

/// Bad values in the config file or on the command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown language `{0}` (expected `zh` or `en`)")]
    UnknownLanguage(String),

    #[error("unknown marker `{0}` (expected braille, halfblock, dot or block)")]
    UnknownMarker(String),

    #[error("cannot parse key binding `{0}`")]
    InvalidKey(String),

    #[error("expected `true` or `false` for `{key}`, got `{value}`")]
    InvalidBool { key: String, value: String },
}
