//! The per-element counter state machine.

use std::time::Duration;

use crate::config::{ConfigError, CounterConfig};
use crate::decompose::{decompose, DecomposedText};
use crate::easing::Easing;
use crate::render::RenderOutput;

/// Lifecycle state of a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterState {
    /// Constructed, not yet set up
    Idle,
    /// Text decomposed, step 0, waiting to run
    Ready,
    /// A step chain is advancing the counter
    Running,
    /// The final step was taken; displayed value equals the end value
    Completed,
}

/// Outcome of one animation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// The value now displayed
    pub value: i64,
    /// The step index after this tick (1..=duration)
    pub step: u32,
    /// True when this was the final step
    pub finished: bool,
}

/// Counter state machine for one animated element.
///
/// The counter owns all step/value state but no timing: the driver calls
/// [`tick`](Counter::tick) once per frame (at [`frame_interval`](Counter::frame_interval))
/// while the counter is running, and renders the returned value. Because
/// `tick` is a no-op unless the counter is running, a timer callback left
/// over from before a [`reset`](Counter::reset) dies harmlessly instead of
/// undoing the reset.
///
/// ## Example
///
/// ```rust
/// use countup_view::{Counter, CounterConfig, CounterState};
///
/// let mut counter = Counter::new(CounterConfig {
///     end: 100.0,
///     duration: 4,
///     easing: "linearTween".into(),
///     ..Default::default()
/// });
/// counter.setup("Users: 100").unwrap();
/// assert!(counter.run());
///
/// let mut values = Vec::new();
/// while let Some(result) = counter.tick() {
///     values.push(result.value);
/// }
/// assert_eq!(values, [25, 50, 75, 100]);
/// assert_eq!(counter.state(), CounterState::Completed);
/// ```
#[derive(Clone, Debug)]
pub struct Counter {
    config: CounterConfig,
    easing: Option<Easing>,
    parts: DecomposedText,
    step: u32,
    displayed: i64,
    state: CounterState,
}

impl Counter {
    /// Create a counter in the `Idle` state.
    ///
    /// The configuration is not checked here; [`setup`](Counter::setup)
    /// validates it before any state is built.
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            easing: None,
            parts: DecomposedText::default(),
            step: 0,
            displayed: 0,
            state: CounterState::Idle,
        }
    }

    /// Validate the configuration and decompose the element text.
    ///
    /// `Idle → Ready`. Fails fast on a bad configuration, before any timer
    /// could be armed. Text without digits is not an error: the counter
    /// sets up and renders 0 for every step, which surfaces the mistake
    /// more visibly than silently doing nothing.
    pub fn setup(&mut self, text: &str) -> Result<(), ConfigError> {
        let easing = self.config.validate()?;
        self.easing = Some(easing);
        self.parts = decompose(text);
        if !self.parts.has_number() {
            tracing::warn!(text, "counter text has no digits, will display 0 throughout");
        }
        self.step = 0;
        self.displayed = if self.parts.has_number() {
            self.config.start.round() as i64
        } else {
            0
        };
        self.state = CounterState::Ready;
        Ok(())
    }

    /// Begin a step chain.
    ///
    /// `Ready → Running`, returning true when the caller now owns the step
    /// chain. Re-entrant safe: a counter that is already running (or idle,
    /// or completed) stays where it is and the call returns false, so no
    /// second chain can start.
    pub fn run(&mut self) -> bool {
        if self.state == CounterState::Ready {
            self.state = CounterState::Running;
            true
        } else {
            false
        }
    }

    /// Rewind to step 0 with a displayed value of 0 and stop running.
    ///
    /// The displayed value intentionally resets to literal 0 rather than
    /// the configured start value. Idempotent.
    pub fn reset(&mut self) {
        if self.state == CounterState::Idle {
            return;
        }
        self.step = 0;
        self.displayed = 0;
        self.state = CounterState::Ready;
    }

    /// Advance one step.
    ///
    /// Returns `None` unless the counter is running. Otherwise invokes the
    /// before hook, increments the step, interpolates
    /// `easing(step, start, end - start, duration)`, rounds it into the
    /// displayed value and invokes the after hook. The final step forces
    /// the displayed value to exactly the end value and moves to
    /// `Completed`.
    pub fn tick(&mut self) -> Option<StepResult> {
        if self.state != CounterState::Running {
            return None;
        }
        let easing = self.easing?;

        self.config.before.call();

        self.step += 1;
        let duration = f64::from(self.config.duration);
        let change = self.config.end - self.config.start;
        let finished = self.step >= self.config.duration;

        self.displayed = if !self.parts.has_number() {
            0
        } else if finished {
            self.config.end.round() as i64
        } else {
            let value = easing.apply(f64::from(self.step), self.config.start, change, duration);
            value.round() as i64
        };

        if finished {
            self.state = CounterState::Completed;
        }

        self.config.after.call();

        Some(StepResult {
            value: self.displayed,
            step: self.step,
            finished,
        })
    }

    /// Snapshot of what the counter should display right now.
    pub fn render(&self) -> RenderOutput {
        RenderOutput {
            prefix: self.parts.prefix.clone(),
            value: self.displayed,
            number: self.parts.number.clone(),
            step: self.step,
            suffix: self.parts.suffix.clone(),
        }
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> CounterState {
        self.state
    }

    /// Whether a step chain currently owns this counter.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == CounterState::Running
    }

    /// Current step index (0..=duration).
    #[inline]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// The value currently displayed.
    #[inline]
    pub fn displayed(&self) -> i64 {
        self.displayed
    }

    /// The decomposed element text.
    #[inline]
    pub fn parts(&self) -> &DecomposedText {
        &self.parts
    }

    /// The configuration this counter was built with.
    #[inline]
    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Delay between steps, for configuring the driving timer.
    #[inline]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.config.frame_length_ms))
    }
}
