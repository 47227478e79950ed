//! Write-only system clipboard access.

use tracing::warn;

/// System clipboard handle that degrades gracefully when the platform has
/// none to offer (headless sessions, some terminals over SSH).
pub struct Clipboard {
    backend: Option<arboard::Clipboard>,
}

impl Clipboard {
    /// Connect to the platform clipboard. Unavailability is logged once and
    /// every later copy becomes a no-op reported to the caller.
    pub fn new() -> Self {
        let backend = match arboard::Clipboard::new() {
            Ok(c) => Some(c),
            Err(e) => {
                warn!(error = %e, "System clipboard unavailable");
                None
            }
        };
        Self { backend }
    }

    /// A handle that drops every copy. Used in tests.
    #[cfg(test)]
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Copy `text`, returning whether the write reached the clipboard.
    pub fn copy(&mut self, text: &str) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };
        match backend.set_text(text.to_string()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Clipboard write failed");
                false
            }
        }
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}
