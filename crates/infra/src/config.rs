//! Listener configuration, read from the environment.

/// Environment variable overriding the listener's subscription priority.
pub const PRIORITY_ENV: &str = "PRODUCTOPTS_LISTENER_PRIORITY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Priority of every product update subscription (higher runs first).
    pub priority: i32,
}

impl ListenerConfig {
    pub const DEFAULT_PRIORITY: i32 = 50;

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some(raw) = lookup(PRIORITY_ENV) else {
            return Self::default();
        };

        match raw.trim().parse::<i32>() {
            Ok(priority) => Self { priority },
            Err(err) => {
                tracing::warn!(
                    key = PRIORITY_ENV,
                    value = %raw,
                    error = %err,
                    "invalid listener priority; using default {}",
                    Self::DEFAULT_PRIORITY
                );
                Self::default()
            }
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            priority: Self::DEFAULT_PRIORITY,
        }
    }
}
