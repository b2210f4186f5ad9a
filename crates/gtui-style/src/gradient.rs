//! Linear and multi-stop color ramps.
//!
//! Channels are interpolated in integer RGB with truncation toward zero.
//! [`Color::Default`] has no RGB value and interpolates as black.

use crate::color::{Color, Rgb};

fn rgb_or_black(color: Color) -> Rgb {
    color.to_rgb().unwrap_or(Rgb::BLACK)
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let v = f64::from(a) + t * (f64::from(b) - f64::from(a));
    v.clamp(0.0, 255.0) as u8
}

fn lerp(start: Color, end: Color, t: f64) -> Color {
    let (a, b) = (rgb_or_black(start), rgb_or_black(end));
    Color::rgb(
        lerp_channel(a.r, b.r, t),
        lerp_channel(a.g, b.g, t),
        lerp_channel(a.b, b.b, t),
    )
}

/// Color at `step` of a `steps`-long ramp from `start` to `end`.
///
/// `steps <= 1` yields `start`; `step >= steps - 1` yields `end`.
#[must_use]
pub fn interpolate(start: Color, end: Color, step: usize, steps: usize) -> Color {
    if steps <= 1 || step == 0 {
        return start;
    }
    if step >= steps - 1 {
        return end;
    }
    lerp(start, end, step as f64 / (steps - 1) as f64)
}

/// `length` colors from `start` to `end` inclusive.
///
/// Empty for length 0, `[start]` for length 1, otherwise the first element
/// is exactly `start` and the last exactly `end`.
#[must_use]
pub fn linear(start: Color, end: Color, length: usize) -> Vec<Color> {
    (0..length)
        .map(|i| interpolate(start, end, i, length))
        .collect()
}

/// `length` colors through `stops`, split into `stops.len() - 1` equal
/// segments.
///
/// No stops yields an empty ramp. A single stop, or `length == 1`, repeats
/// the first stop.
#[must_use]
pub fn multi_stop(length: usize, stops: &[Color]) -> Vec<Color> {
    let Some(&first) = stops.first() else {
        return Vec::new();
    };
    if stops.len() == 1 || length <= 1 {
        return vec![first; length];
    }

    let segments = stops.len() - 1;
    let last_index = length - 1;
    (0..length)
        .map(|i| {
            if i == last_index {
                return stops[segments];
            }
            let pos = (i * segments) as f64 / last_index as f64;
            let seg = (pos.floor() as usize).min(segments - 1);
            let t = pos - seg as f64;
            if t == 0.0 {
                stops[seg]
            } else {
                lerp(stops[seg], stops[seg + 1], t)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn linear_lengths() {
        assert!(linear(RED, BLUE, 0).is_empty());
        assert_eq!(linear(RED, BLUE, 1), vec![RED]);

        let five = linear(RED, BLUE, 5);
        assert_eq!(five.len(), 5);
        assert_eq!(five[0], RED);
        assert_eq!(five[4], BLUE);
    }

    #[test]
    fn linear_midpoint_truncates() {
        let three = linear(RED, BLUE, 3);
        // 255 * 0.5 = 127.5 truncates to 127
        assert_eq!(three[1], Color::rgb(127, 0, 127));
    }

    #[test]
    fn endpoints_keep_their_variant() {
        let ramp = linear(Color::RED, Color::WHITE, 4);
        assert_eq!(ramp[0], Color::RED);
        assert_eq!(ramp[3], Color::WHITE);
        assert!(matches!(ramp[1], Color::Rgb(_)));
    }

    #[test]
    fn interpolate_clamps_step() {
        assert_eq!(interpolate(RED, BLUE, 10, 4), BLUE);
        assert_eq!(interpolate(RED, BLUE, 0, 0), RED);
    }

    #[test]
    fn multi_stop_hits_every_stop() {
        let green = Color::rgb(0, 255, 0);
        let ramp = multi_stop(5, &[RED, green, BLUE]);
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp[0], RED);
        assert_eq!(ramp[2], green);
        assert_eq!(ramp[4], BLUE);
        assert_eq!(ramp[1], Color::rgb(127, 127, 0));
    }

    #[test]
    fn multi_stop_degenerate_inputs() {
        assert!(multi_stop(4, &[]).is_empty());
        assert_eq!(multi_stop(3, &[RED]), vec![RED; 3]);
        assert_eq!(multi_stop(1, &[RED, BLUE]), vec![RED]);
        assert!(multi_stop(0, &[RED, BLUE]).is_empty());
    }

    #[test]
    fn default_color_interpolates_as_black() {
        let ramp = linear(Color::Default, Color::rgb(200, 200, 200), 3);
        assert_eq!(ramp[0], Color::Default);
        assert_eq!(ramp[1], Color::rgb(100, 100, 100));
    }
}
