//! Application-level configuration constants.

use log::Level;

// Page text
pub const PAGE_TITLE: &str = "Formulário de Tempo";
pub const SUBMIT_LABEL: &str = "Enviar";

// Time inputs
pub const TIME_PLACEHOLDER: &str = "MM:SS";
pub const TIME_INPUT_PATTERN: &str = r"\d*"; // numeric keypad on mobile
pub const TIME_INPUT_MODE: &str = "numeric";

// Logging
pub const LOG_LEVEL: Level = if cfg!(debug_assertions) {
    Level::Debug
} else {
    Level::Info
};
