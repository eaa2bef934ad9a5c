//! Counter configuration and configuration errors.

use std::fmt;
use std::rc::Rc;

use crate::easing::Easing;

/// Default easing curve name.
pub const DEFAULT_EASING: &str = "easeOutQuad";
/// Default number of animation steps.
pub const DEFAULT_DURATION: u32 = 32;
/// Default frame length in milliseconds (20 fps).
pub const DEFAULT_FRAME_LENGTH_MS: u32 = 50;

/// A per-step callback.
///
/// Wraps an `Rc<dyn Fn()>` so configurations stay cheaply cloneable. The
/// default hook does nothing.
///
/// Hooks run while the counter is taking a step, so a hook must not call
/// back into the counter that invoked it. In particular, a hook holding a
/// shared counter handle (such as one from `AttachHandle::counters()`)
/// would re-borrow mid-step and panic; observe step state through shared
/// cells instead.
#[derive(Clone)]
pub struct Hook(Rc<dyn Fn()>);

impl Hook {
    /// Wrap a callback.
    pub fn new<F: Fn() + 'static>(f: F) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    #[inline]
    pub fn call(&self) {
        (self.0)()
    }
}

impl Default for Hook {
    fn default() -> Self {
        Self(Rc::new(|| {}))
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook")
    }
}

/// Configuration for a single counter.
///
/// Unset fields fall back to the defaults below, so a caller only spells
/// out what differs (with the `serde` feature, deserialization merges
/// partial configurations over the defaults the same way):
///
/// - `target`: `None` (animate the bound element itself)
/// - `easing`: `"easeOutQuad"`
/// - `start`: 0, `end`: 1
/// - `duration`: 32 steps
/// - `auto_run`: true
/// - `frame_length_ms`: 50
/// - `before` / `after`: no-op
///
/// ## Example
///
/// ```rust
/// use countup_view::CounterConfig;
///
/// let config = CounterConfig {
///     end: 100.0,
///     duration: 4,
///     easing: "linearTween".into(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CounterConfig {
    /// CSS selector resolved under the bound element, or `None` to animate
    /// the element itself
    pub target: Option<String>,
    /// Name of the easing curve
    pub easing: String,
    /// Value the counter starts from
    pub start: f64,
    /// Value the counter ends on
    pub end: f64,
    /// Number of animation steps
    pub duration: u32,
    /// Start automatically once the element scrolls fully into view
    pub auto_run: bool,
    /// Milliseconds between steps
    pub frame_length_ms: u32,
    /// Invoked before each step
    #[cfg_attr(feature = "serde", serde(skip))]
    pub before: Hook,
    /// Invoked after each step
    #[cfg_attr(feature = "serde", serde(skip))]
    pub after: Hook,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            target: None,
            easing: DEFAULT_EASING.to_string(),
            start: 0.0,
            end: 1.0,
            duration: DEFAULT_DURATION,
            auto_run: true,
            frame_length_ms: DEFAULT_FRAME_LENGTH_MS,
            before: Hook::default(),
            after: Hook::default(),
        }
    }
}

impl CounterConfig {
    /// Check the configuration and resolve the easing curve.
    ///
    /// Fails when the easing name is unknown, the duration is zero or the
    /// frame length is zero. Called by counter setup before any state is
    /// built, so a bad configuration can never start animating.
    pub fn validate(&self) -> Result<Easing, ConfigError> {
        let easing = Easing::from_name(&self.easing).ok_or_else(|| ConfigError::UnknownEasing {
            name: self.easing.clone(),
        })?;
        if self.duration < 1 {
            return Err(ConfigError::InvalidDuration {
                duration: self.duration,
            });
        }
        if self.frame_length_ms < 1 {
            return Err(ConfigError::InvalidFrameLength {
                frame_length_ms: self.frame_length_ms,
            });
        }
        Ok(easing)
    }
}

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The easing name does not resolve to a registered curve
    UnknownEasing { name: String },
    /// The step count must be at least 1
    InvalidDuration { duration: u32 },
    /// The frame length must be positive
    InvalidFrameLength { frame_length_ms: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownEasing { name } => {
                write!(f, "Unknown easing curve: {:?}", name)
            }
            ConfigError::InvalidDuration { duration } => {
                write!(f, "Duration must be at least 1 step, got {}", duration)
            }
            ConfigError::InvalidFrameLength { frame_length_ms } => {
                write!(
                    f,
                    "Frame length must be positive, got {} ms",
                    frame_length_ms
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_defaults_validate() {
        let config = CounterConfig::default();
        assert_eq!(config.validate(), Ok(Easing::EaseOutQuad));
        assert_eq!(config.duration, 32);
        assert_eq!(config.frame_length_ms, 50);
        assert!(config.auto_run);
        assert!(config.target.is_none());
    }

    #[test]
    fn test_unknown_easing() {
        let config = CounterConfig {
            easing: "nope".into(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownEasing {
                name: "nope".into()
            })
        );
    }

    #[test]
    fn test_invalid_duration() {
        let config = CounterConfig {
            duration: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDuration { duration: 0 })
        );
    }

    #[test]
    fn test_invalid_frame_length() {
        let config = CounterConfig {
            frame_length_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidFrameLength { frame_length_ms: 0 })
        );
    }

    #[test]
    fn test_hook_call() {
        let calls = Rc::new(Cell::new(0u32));
        let counted = calls.clone();
        let hook = Hook::new(move || counted.set(counted.get() + 1));
        hook.call();
        hook.call();
        assert_eq!(calls.get(), 2);

        // Default hook is a no-op
        Hook::default().call();
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnknownEasing {
            name: "bounce".into(),
        };
        assert!(err.to_string().contains("bounce"));
    }
}
