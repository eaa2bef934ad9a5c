//! Easing curves for shaping the counting animation.
//!
//! Every curve follows the classic Penner signature `f(t, b, c, d)` where
//! `t` is the current step, `b` the start value, `c` the total change and
//! `d` the total number of steps. All curves satisfy `f(0) == b` and
//! `f(d) == b + c`.

use std::f64::consts::PI;

/// A named easing curve.
///
/// Curves are resolved from their conventional camel-case names via
/// [`Easing::from_name`]; an unrecognized name is a configuration error,
/// never a silent fallback.
///
/// ## Example
///
/// ```rust
/// use countup_view::Easing;
///
/// let easing = Easing::from_name("linearTween").unwrap();
/// assert_eq!(easing.apply(2.0, 0.0, 100.0, 4.0), 50.0);
/// assert!(Easing::from_name("nope").is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    LinearTween,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
}

impl Easing {
    /// All registered curves, for enumeration and property tests.
    pub const ALL: [Easing; 22] = [
        Easing::LinearTween,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInExpo,
        Easing::EaseOutExpo,
        Easing::EaseInOutExpo,
        Easing::EaseInCirc,
        Easing::EaseOutCirc,
        Easing::EaseInOutCirc,
    ];

    /// Look up a curve by its conventional name.
    pub fn from_name(name: &str) -> Option<Easing> {
        match name {
            "linearTween" => Some(Easing::LinearTween),
            "easeInQuad" => Some(Easing::EaseInQuad),
            "easeOutQuad" => Some(Easing::EaseOutQuad),
            "easeInOutQuad" => Some(Easing::EaseInOutQuad),
            "easeInCubic" => Some(Easing::EaseInCubic),
            "easeOutCubic" => Some(Easing::EaseOutCubic),
            "easeInOutCubic" => Some(Easing::EaseInOutCubic),
            "easeInQuart" => Some(Easing::EaseInQuart),
            "easeOutQuart" => Some(Easing::EaseOutQuart),
            "easeInOutQuart" => Some(Easing::EaseInOutQuart),
            "easeInQuint" => Some(Easing::EaseInQuint),
            "easeOutQuint" => Some(Easing::EaseOutQuint),
            "easeInOutQuint" => Some(Easing::EaseInOutQuint),
            "easeInSine" => Some(Easing::EaseInSine),
            "easeOutSine" => Some(Easing::EaseOutSine),
            "easeInOutSine" => Some(Easing::EaseInOutSine),
            "easeInExpo" => Some(Easing::EaseInExpo),
            "easeOutExpo" => Some(Easing::EaseOutExpo),
            "easeInOutExpo" => Some(Easing::EaseInOutExpo),
            "easeInCirc" => Some(Easing::EaseInCirc),
            "easeOutCirc" => Some(Easing::EaseOutCirc),
            "easeInOutCirc" => Some(Easing::EaseInOutCirc),
            _ => None,
        }
    }

    /// The conventional name of this curve.
    pub fn name(self) -> &'static str {
        match self {
            Easing::LinearTween => "linearTween",
            Easing::EaseInQuad => "easeInQuad",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::EaseInCubic => "easeInCubic",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutCubic => "easeInOutCubic",
            Easing::EaseInQuart => "easeInQuart",
            Easing::EaseOutQuart => "easeOutQuart",
            Easing::EaseInOutQuart => "easeInOutQuart",
            Easing::EaseInQuint => "easeInQuint",
            Easing::EaseOutQuint => "easeOutQuint",
            Easing::EaseInOutQuint => "easeInOutQuint",
            Easing::EaseInSine => "easeInSine",
            Easing::EaseOutSine => "easeOutSine",
            Easing::EaseInOutSine => "easeInOutSine",
            Easing::EaseInExpo => "easeInExpo",
            Easing::EaseOutExpo => "easeOutExpo",
            Easing::EaseInOutExpo => "easeInOutExpo",
            Easing::EaseInCirc => "easeInCirc",
            Easing::EaseOutCirc => "easeOutCirc",
            Easing::EaseInOutCirc => "easeInOutCirc",
        }
    }

    /// Interpolate a value along this curve.
    ///
    /// ## Arguments
    ///
    /// * `t` - Current step (0 to `d`)
    /// * `b` - Start value
    /// * `c` - Total change (`end - start`)
    /// * `d` - Total number of steps
    pub fn apply(self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        match self {
            Easing::LinearTween => linear_tween(t, b, c, d),
            Easing::EaseInQuad => ease_in_quad(t, b, c, d),
            Easing::EaseOutQuad => ease_out_quad(t, b, c, d),
            Easing::EaseInOutQuad => ease_in_out_quad(t, b, c, d),
            Easing::EaseInCubic => ease_in_cubic(t, b, c, d),
            Easing::EaseOutCubic => ease_out_cubic(t, b, c, d),
            Easing::EaseInOutCubic => ease_in_out_cubic(t, b, c, d),
            Easing::EaseInQuart => ease_in_quart(t, b, c, d),
            Easing::EaseOutQuart => ease_out_quart(t, b, c, d),
            Easing::EaseInOutQuart => ease_in_out_quart(t, b, c, d),
            Easing::EaseInQuint => ease_in_quint(t, b, c, d),
            Easing::EaseOutQuint => ease_out_quint(t, b, c, d),
            Easing::EaseInOutQuint => ease_in_out_quint(t, b, c, d),
            Easing::EaseInSine => ease_in_sine(t, b, c, d),
            Easing::EaseOutSine => ease_out_sine(t, b, c, d),
            Easing::EaseInOutSine => ease_in_out_sine(t, b, c, d),
            Easing::EaseInExpo => ease_in_expo(t, b, c, d),
            Easing::EaseOutExpo => ease_out_expo(t, b, c, d),
            Easing::EaseInOutExpo => ease_in_out_expo(t, b, c, d),
            Easing::EaseInCirc => ease_in_circ(t, b, c, d),
            Easing::EaseOutCirc => ease_out_circ(t, b, c, d),
            Easing::EaseInOutCirc => ease_in_out_circ(t, b, c, d),
        }
    }
}

/// Simple linear tweening, no acceleration.
#[inline]
fn linear_tween(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * t / d + b
}

/// Quadratic easing in, accelerating from zero velocity.
#[inline]
fn ease_in_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t + b
}

/// Quadratic easing out, decelerating to zero velocity.
#[inline]
fn ease_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}

/// Quadratic easing in/out, acceleration until halfway, then deceleration.
#[inline]
fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    t -= 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// Cubic easing in.
#[inline]
fn ease_in_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t + b
}

/// Cubic easing out.
#[inline]
fn ease_out_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * t + 1.0) + b
}

/// Cubic easing in/out.
#[inline]
fn ease_in_out_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t + b;
    }
    t -= 2.0;
    c / 2.0 * (t * t * t + 2.0) + b
}

/// Quartic easing in.
#[inline]
fn ease_in_quart(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t * t + b
}

/// Quartic easing out.
#[inline]
fn ease_out_quart(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    -c * (t * t * t * t - 1.0) + b
}

/// Quartic easing in/out.
#[inline]
fn ease_in_out_quart(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t * t + b;
    }
    t -= 2.0;
    -c / 2.0 * (t * t * t * t - 2.0) + b
}

/// Quintic easing in.
#[inline]
fn ease_in_quint(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t * t * t + b
}

/// Quintic easing out.
#[inline]
fn ease_out_quint(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * t * t * t + 1.0) + b
}

/// Quintic easing in/out.
#[inline]
fn ease_in_out_quint(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t * t * t + b;
    }
    t -= 2.0;
    c / 2.0 * (t * t * t * t * t + 2.0) + b
}

/// Sinusoidal easing in.
#[inline]
fn ease_in_sine(t: f64, b: f64, c: f64, d: f64) -> f64 {
    -c * (t / d * (PI / 2.0)).cos() + c + b
}

/// Sinusoidal easing out.
#[inline]
fn ease_out_sine(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * (t / d * (PI / 2.0)).sin() + b
}

/// Sinusoidal easing in/out.
#[inline]
fn ease_in_out_sine(t: f64, b: f64, c: f64, d: f64) -> f64 {
    -c / 2.0 * ((PI * t / d).cos() - 1.0) + b
}

/// Exponential easing in. The `t == 0` guard keeps `f(0) == b` exact.
#[inline]
fn ease_in_expo(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    c * 2.0_f64.powf(10.0 * (t / d - 1.0)) + b
}

/// Exponential easing out. The `t == d` guard keeps `f(d) == b + c` exact.
#[inline]
fn ease_out_expo(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == d {
        return b + c;
    }
    c * (-(2.0_f64.powf(-10.0 * t / d)) + 1.0) + b
}

/// Exponential easing in/out.
#[inline]
fn ease_in_out_expo(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    if t == d {
        return b + c;
    }
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * 2.0_f64.powf(10.0 * (t - 1.0)) + b;
    }
    t -= 1.0;
    c / 2.0 * (-(2.0_f64.powf(-10.0 * t)) + 2.0) + b
}

/// Circular easing in.
#[inline]
fn ease_in_circ(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * ((1.0 - t * t).sqrt() - 1.0) + b
}

/// Circular easing out.
#[inline]
fn ease_out_circ(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (1.0 - t * t).sqrt() + b
}

/// Circular easing in/out.
#[inline]
fn ease_in_out_circ(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b;
    }
    t -= 2.0;
    c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_boundaries_all_curves() {
        let triples = [(0.0, 100.0, 4.0), (10.0, -60.0, 32.0), (-5.0, 5.0, 7.0)];
        for easing in Easing::ALL {
            for (b, c, d) in triples {
                let at_start = easing.apply(0.0, b, c, d);
                let at_end = easing.apply(d, b, c, d);
                assert!(
                    (at_start - b).abs() < TOLERANCE,
                    "{} at t=0: {} != {}",
                    easing.name(),
                    at_start,
                    b
                );
                assert!(
                    (at_end - (b + c)).abs() < TOLERANCE,
                    "{} at t=d: {} != {}",
                    easing.name(),
                    at_end,
                    b + c
                );
            }
        }
    }

    #[test]
    fn test_linear_midpoints() {
        let easing = Easing::LinearTween;
        assert_eq!(easing.apply(1.0, 0.0, 100.0, 4.0), 25.0);
        assert_eq!(easing.apply(2.0, 0.0, 100.0, 4.0), 50.0);
        assert_eq!(easing.apply(3.0, 0.0, 100.0, 4.0), 75.0);
    }

    #[test]
    fn test_quad_out_decelerates() {
        // Ease-out covers more ground in the first half than the second
        let easing = Easing::EaseOutQuad;
        let first_half = easing.apply(16.0, 0.0, 100.0, 32.0);
        assert!(first_half > 50.0);
    }

    #[test]
    fn test_monotonic_over_steps() {
        for easing in Easing::ALL {
            let mut prev = easing.apply(0.0, 0.0, 100.0, 32.0);
            for t in 1..=32 {
                let v = easing.apply(t as f64, 0.0, 100.0, 32.0);
                assert!(
                    v >= prev - TOLERANCE,
                    "{} not monotonic at t={}",
                    easing.name(),
                    t
                );
                prev = v;
            }
        }
    }

    #[test]
    fn test_name_round_trip() {
        for easing in Easing::ALL {
            assert_eq!(Easing::from_name(easing.name()), Some(easing));
        }
        assert_eq!(Easing::from_name("nope"), None);
        assert_eq!(Easing::from_name(""), None);
        // Lookup is case-sensitive
        assert_eq!(Easing::from_name("easeoutquad"), None);
    }
}
