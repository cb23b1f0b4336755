use std::time::Duration;

/// Quiet window before a search is sent
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub debounce: Duration,
}

impl Settings {
    pub fn with_debounce(debounce: Duration) -> Self {
        Self { debounce }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}
