//! Easing functions for animations

use std::str::FromStr;

use crate::error::AnimationError;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
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
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Easing::EaseInSine => 1.0 - (t * std::f32::consts::FRAC_PI_2).cos(),
            Easing::EaseOutSine => (t * std::f32::consts::FRAC_PI_2).sin(),
            Easing::EaseInOutSine => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            // Expo curves never reach their endpoints analytically; pin them
            Easing::EaseInExpo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * t - 10.0)
                }
            }
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::EaseInOutExpo => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// Parse a named curve: `none`, `linear`, `power1`..`power4`, `sine`, `expo`,
    /// each optionally suffixed with `.in`, `.out` or `.inOut` (default `.out`)
    pub fn from_name(name: &str) -> Result<Self, AnimationError> {
        let unknown = || AnimationError::UnknownEasing(name.to_string());

        let trimmed = name.trim();
        if trimmed == "none" || trimmed == "linear" {
            return Ok(Easing::Linear);
        }

        let (family, variant) = match trimmed.split_once('.') {
            Some((family, variant)) => (family, variant),
            None => (trimmed, "out"),
        };

        let easing = match (family, variant) {
            ("power0", _) => Easing::Linear,
            ("power1" | "quad", "in") => Easing::EaseInQuad,
            ("power1" | "quad", "out") => Easing::EaseOutQuad,
            ("power1" | "quad", "inOut") => Easing::EaseInOutQuad,
            ("power2" | "cubic", "in") => Easing::EaseInCubic,
            ("power2" | "cubic", "out") => Easing::EaseOutCubic,
            ("power2" | "cubic", "inOut") => Easing::EaseInOutCubic,
            ("power3" | "quart", "in") => Easing::EaseInQuart,
            ("power3" | "quart", "out") => Easing::EaseOutQuart,
            ("power3" | "quart", "inOut") => Easing::EaseInOutQuart,
            ("power4" | "quint", "in") => Easing::EaseInQuint,
            ("power4" | "quint", "out") => Easing::EaseOutQuint,
            ("power4" | "quint", "inOut") => Easing::EaseInOutQuint,
            ("sine", "in") => Easing::EaseInSine,
            ("sine", "out") => Easing::EaseOutSine,
            ("sine", "inOut") => Easing::EaseInOutSine,
            ("expo", "in") => Easing::EaseInExpo,
            ("expo", "out") => Easing::EaseOutExpo,
            ("expo", "inOut") => Easing::EaseInOutExpo,
            _ => return Err(unknown()),
        };
        Ok(easing)
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s)
    }
}

/// Cubic bezier easing calculation (same curve as CSS `cubic-bezier()`).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³, in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_NAMED: [&str; 14] = [
        "none",
        "power1.in",
        "power1.out",
        "power1.inOut",
        "power2.out",
        "power2.inOut",
        "power3.out",
        "power4.out",
        "sine.in",
        "sine.out",
        "sine.inOut",
        "expo.in",
        "expo.out",
        "expo.inOut",
    ];

    #[test]
    fn test_named_curves_hit_endpoints() {
        for name in ALL_NAMED {
            let easing = Easing::from_name(name).unwrap();
            assert!(easing.apply(0.0).abs() < 1e-3, "{name} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{name} at 1");
        }
    }

    #[test]
    fn test_out_curves_are_exact_at_one() {
        // Counters rely on the displayed value landing exactly on the target
        assert_eq!(Easing::EaseOutCubic.apply(1.0), 1.0);
        assert_eq!(Easing::EaseOutExpo.apply(1.0), 1.0);
        assert_eq!(Easing::EaseOutCubic.apply(0.0), 0.0);
    }

    #[test]
    fn test_name_mapping() {
        assert_eq!(Easing::from_name("power2.out"), Ok(Easing::EaseOutCubic));
        assert_eq!(Easing::from_name("expo.out"), Ok(Easing::EaseOutExpo));
        assert_eq!(Easing::from_name("power1"), Ok(Easing::EaseOutQuad));
        assert_eq!("none".parse::<Easing>(), Ok(Easing::Linear));
        assert!(Easing::from_name("bounce.out").is_err());
        assert!(Easing::from_name("expo.sideways").is_err());
    }

    #[test]
    fn test_every_curve_has_a_name() {
        let mut parsed = Vec::new();
        for family in ["none", "power1", "power2", "power3", "power4", "sine", "expo"] {
            for variant in ["in", "out", "inOut"] {
                let name = if family == "none" { family.to_string() } else { format!("{family}.{variant}") };
                parsed.push(Easing::from_name(&name).unwrap());
            }
        }
        let curves = [
            Easing::Linear,
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
        ];
        for curve in curves {
            assert!(parsed.contains(&curve), "{curve:?} unreachable by name");
        }
    }

    #[test]
    fn test_out_curves_monotonic() {
        for easing in [Easing::EaseOutExpo, Easing::EaseOutCubic, Easing::EaseOutQuad] {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev);
                prev = v;
            }
        }
    }

    #[test]
    fn test_cubic_bezier_linear_diagonal() {
        let ease = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((ease.apply(t) - t).abs() < 1e-4);
        }
    }
}
