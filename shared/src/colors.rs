//! Wind speed to cell color mapping.
//!
//! Speeds are placed on a ladder of breakpoints and the cell color is blended
//! between the two surrounding swatches in HSL space, always walking the hue
//! downwards so the ladder reads blue, green, yellow, red, purple.

use derive_more::Display;
use once_cell::sync::Lazy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Blend towards `other` by `t` in `[0, 1]`, moving the hue along the
    /// decreasing arc even when the increasing one is shorter.
    pub fn mix_decreasing(&self, other: &Hsl, t: f64) -> Hsl {
        let arc = (self.h - other.h).rem_euclid(360.0);
        Hsl {
            h: normalize_hue(self.h - arc * t),
            s: self.s + (other.s - self.s) * t,
            l: self.l + (other.l - self.l) * t,
        }
    }
}

fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negative values up to exactly 360
    if h >= 360.0 {
        h - 360.0
    } else {
        h
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = d / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / d + 2.0)
        } else {
            60.0 * ((r - g) / d + 4.0)
        };

        Hsl {
            h: normalize_hue(h),
            s,
            l,
        }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let c = (1.0 - (2.0 * hsl.l - 1.0).abs()) * hsl.s;
        let hp = normalize_hue(hsl.h) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

        let (r1, g1, b1) = match hp as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let m = hsl.l - c / 2.0;
        let channel = |v: f64| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb::new(channel(r1), channel(g1), channel(b1))
    }
}

/// Named palette entries used by the speed ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Swatch {
    Blue700,
    Blue600,
    Blue400,
    Green400,
    Yellow400,
    Red500,
    Purple700,
    /// Neutral color of a cell with no value.
    Gray100,
}

impl Swatch {
    /// Palette token, e.g. `blue.700`.
    pub fn token(&self) -> &'static str {
        match self {
            Swatch::Blue700 => "blue.700",
            Swatch::Blue600 => "blue.600",
            Swatch::Blue400 => "blue.400",
            Swatch::Green400 => "green.400",
            Swatch::Yellow400 => "yellow.400",
            Swatch::Red500 => "red.500",
            Swatch::Purple700 => "purple.700",
            Swatch::Gray100 => "gray.100",
        }
    }

    pub fn css_var(&self) -> String {
        format!("var(--chakra-colors-{})", self.token().replace('.', "-"))
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            Swatch::Blue700 => Rgb::new(0x17, 0x3d, 0xa6),
            Swatch::Blue600 => Rgb::new(0x25, 0x63, 0xeb),
            Swatch::Blue400 => Rgb::new(0x60, 0xa5, 0xfa),
            Swatch::Green400 => Rgb::new(0x4a, 0xde, 0x80),
            Swatch::Yellow400 => Rgb::new(0xfa, 0xcc, 0x15),
            Swatch::Red500 => Rgb::new(0xef, 0x44, 0x44),
            Swatch::Purple700 => Rgb::new(0x6b, 0x21, 0xa8),
            Swatch::Gray100 => Rgb::new(0xf4, 0xf4, 0xf5),
        }
    }

    pub fn hsl(&self) -> Hsl {
        self.rgb().into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedBreakpoint {
    pub threshold_kts: f64,
    pub color: Swatch,
}

impl SpeedBreakpoint {
    pub const fn new(threshold_kts: f64, color: Swatch) -> Self {
        Self {
            threshold_kts,
            color,
        }
    }
}

#[derive(Clone, Debug, Display, PartialEq)]
pub enum ScaleError {
    #[display(fmt = "a speed scale needs at least 2 breakpoints, got {}", _0)]
    TooShort(usize),
    #[display(
        fmt = "breakpoint {} ({} kts) is not above the previous one",
        index,
        threshold_kts
    )]
    NotIncreasing { index: usize, threshold_kts: f64 },
    #[display(fmt = "the last breakpoint must have an infinite threshold")]
    MissingSentinel,
}

impl std::error::Error for ScaleError {}

/// Ordered breakpoint ladder, strictly increasing and closed by an infinite
/// sentinel so every finite speed has an upper breakpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedScale {
    breakpoints: Vec<SpeedBreakpoint>,
}

static DEFAULT_SCALE: Lazy<SpeedScale> = Lazy::new(SpeedScale::knots);

/// The ladder used for every wind cell, built once per process.
pub fn default_scale() -> &'static SpeedScale {
    &DEFAULT_SCALE
}

/// Cell color of a speed in knots on the default ladder.
pub fn speed_to_color(kts: f64) -> CellColor {
    default_scale().color_for(kts)
}

/// Raw cell text to knots. Anything that is not a number is NaN, which
/// renders as an empty cell.
pub fn parse_speed(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

impl SpeedScale {
    pub fn new(breakpoints: Vec<SpeedBreakpoint>) -> Result<Self, ScaleError> {
        if breakpoints.len() < 2 {
            return Err(ScaleError::TooShort(breakpoints.len()));
        }
        for (index, pair) in breakpoints.windows(2).enumerate() {
            // also rejects NaN thresholds
            if !(pair[1].threshold_kts > pair[0].threshold_kts) {
                return Err(ScaleError::NotIncreasing {
                    index: index + 1,
                    threshold_kts: pair[1].threshold_kts,
                });
            }
        }
        match breakpoints.last() {
            Some(last) if last.threshold_kts == f64::INFINITY => Ok(Self { breakpoints }),
            _ => Err(ScaleError::MissingSentinel),
        }
    }

    /// Knots ladder of the session logger.
    fn knots() -> Self {
        Self {
            breakpoints: vec![
                SpeedBreakpoint::new(0.0, Swatch::Blue700),
                SpeedBreakpoint::new(5.8, Swatch::Blue600),
                SpeedBreakpoint::new(9.7, Swatch::Blue400),
                SpeedBreakpoint::new(12.0, Swatch::Green400),
                SpeedBreakpoint::new(19.0, Swatch::Yellow400),
                SpeedBreakpoint::new(29.0, Swatch::Red500),
                SpeedBreakpoint::new(78.0, Swatch::Purple700),
                SpeedBreakpoint::new(f64::INFINITY, Swatch::Purple700),
            ],
        }
    }

    pub fn breakpoints(&self) -> &[SpeedBreakpoint] {
        &self.breakpoints
    }

    pub fn color_for(&self, kts: f64) -> CellColor {
        if !kts.is_finite() {
            return CellColor::Empty;
        }
        let kts = kts.max(0.0);

        let Some(index) = self
            .breakpoints
            .iter()
            .position(|b| kts < b.threshold_kts)
        else {
            return CellColor::Empty;
        };
        let upper = self.breakpoints[index];
        if index == 0 {
            return CellColor::Blend {
                lower: upper.color,
                upper: upper.color,
                percent: 0.0,
            };
        }
        let lower = self.breakpoints[index - 1];

        let ratio = (kts - lower.threshold_kts) / (upper.threshold_kts - lower.threshold_kts);
        CellColor::Blend {
            lower: lower.color,
            upper: upper.color,
            percent: (ratio * 100.0).clamp(0.0, 100.0),
        }
    }
}

/// Background of a wind cell: nothing entered, or `percent` of the way from
/// `lower` to `upper`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellColor {
    Empty,
    Blend {
        lower: Swatch,
        upper: Swatch,
        percent: f64,
    },
}

impl CellColor {
    pub fn percent(&self) -> Option<f64> {
        match self {
            CellColor::Empty => None,
            CellColor::Blend { percent, .. } => Some(*percent),
        }
    }

    pub fn hsl(&self) -> Hsl {
        match self {
            CellColor::Empty => Swatch::Gray100.hsl(),
            CellColor::Blend {
                lower,
                upper,
                percent,
            } => lower.hsl().mix_decreasing(&upper.hsl(), percent / 100.0),
        }
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            CellColor::Empty => Swatch::Gray100.rgb(),
            CellColor::Blend { lower, percent, .. } if *percent <= 0.0 => lower.rgb(),
            CellColor::Blend { upper, percent, .. } if *percent >= 100.0 => upper.rgb(),
            CellColor::Blend { .. } => self.hsl().into(),
        }
    }

    pub fn hex(&self) -> String {
        self.rgb().hex()
    }

    /// CSS background for the web front end.
    pub fn css(&self) -> String {
        match self {
            CellColor::Empty => Swatch::Gray100.css_var(),
            CellColor::Blend {
                lower,
                upper,
                percent,
            } => format!(
                "color-mix(in hsl decreasing hue, {}, {} {}%)",
                lower.css_var(),
                upper.css_var(),
                format_percent(*percent)
            ),
        }
    }
}

fn format_percent(percent: f64) -> String {
    let s = format!("{:.2}", percent);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blend(color: CellColor) -> (Swatch, Swatch, f64) {
        match color {
            CellColor::Blend {
                lower,
                upper,
                percent,
            } => (lower, upper, percent),
            CellColor::Empty => panic!("expected a blend, got an empty cell"),
        }
    }

    #[test]
    fn test_default_scale_is_valid() {
        let rebuilt = SpeedScale::new(default_scale().breakpoints().to_vec());
        assert_eq!(rebuilt.as_ref(), Ok(default_scale()));
    }

    #[test]
    fn test_nan_is_empty() {
        assert_eq!(speed_to_color(f64::NAN), CellColor::Empty);
        assert_eq!(speed_to_color(-f64::NAN), CellColor::Empty);
        assert_eq!(speed_to_color(f64::from_bits(0x7ff8_0000_0000_0001)), CellColor::Empty);
        assert_eq!(speed_to_color(f64::INFINITY), CellColor::Empty);
        assert_eq!(speed_to_color(f64::NEG_INFINITY), CellColor::Empty);
    }

    #[test]
    fn test_empty_renders_neutral() {
        assert_eq!(CellColor::Empty.css(), "var(--chakra-colors-gray-100)");
        assert_eq!(CellColor::Empty.hex(), "#f4f4f5");
        assert_eq!(CellColor::Empty.percent(), None);
    }

    #[test]
    fn test_zero_is_first_color() {
        let color = speed_to_color(0.0);
        let (lower, _, percent) = blend(color);
        assert_eq!(lower, Swatch::Blue700);
        assert_eq!(percent, 0.0);
        assert_eq!(color.hex(), "#173da6");
    }

    #[test]
    fn test_breakpoint_belongs_to_upper_side() {
        let color = speed_to_color(5.8);
        assert_eq!(blend(color), (Swatch::Blue600, Swatch::Blue400, 0.0));
        assert_eq!(color.hex(), Swatch::Blue600.rgb().hex());

        assert_eq!(blend(speed_to_color(12.0)).0, Swatch::Green400);
        assert_eq!(blend(speed_to_color(29.0)).0, Swatch::Red500);
    }

    #[test]
    fn test_halfway_in_first_segment() {
        let (lower, upper, percent) = blend(speed_to_color(2.9));
        assert_eq!((lower, upper), (Swatch::Blue700, Swatch::Blue600));
        assert!((percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_increases_with_speed() {
        let mut previous = -1.0;
        for tenth in 0..58 {
            let (_, _, percent) = blend(speed_to_color(tenth as f64 / 10.0));
            assert!(percent > previous, "{} kts", tenth as f64 / 10.0);
            previous = percent;
        }
    }

    #[test]
    fn test_blend_lies_between_swatches() {
        let mid = speed_to_color(2.9).hsl();
        let from = Swatch::Blue700.hsl();
        let to = Swatch::Blue600.hsl();

        assert!(mid.h < from.h && mid.h > to.h);
        assert!(mid.l > from.l && mid.l < to.l);
        assert_ne!(speed_to_color(2.9).hex(), Swatch::Blue700.rgb().hex());
        assert_ne!(speed_to_color(2.9).hex(), Swatch::Blue600.rgb().hex());
    }

    #[test]
    fn test_beyond_ladder_is_purple() {
        for kts in [78.0, 100.0, 200.0, 1e300] {
            let color = speed_to_color(kts);
            assert_eq!(blend(color), (Swatch::Purple700, Swatch::Purple700, 0.0));
            assert_eq!(color.hex(), "#6b21a8");
        }
        assert_eq!(speed_to_color(100.0), speed_to_color(200.0));
    }

    #[test]
    fn test_negative_is_clamped() {
        assert_eq!(speed_to_color(-5.0), speed_to_color(0.0));
        assert_eq!(speed_to_color(-0.0).hex(), speed_to_color(0.0).hex());
    }

    #[test]
    fn test_hue_walks_down_through_magenta() {
        // red (0°) to purple (~273°) must not pass through green
        let (lower, upper, percent) = blend(speed_to_color(53.5));
        assert_eq!((lower, upper), (Swatch::Red500, Swatch::Purple700));
        assert!((percent - 50.0).abs() < 1e-9);

        let hue = speed_to_color(53.5).hsl().h;
        assert!(hue > Swatch::Purple700.hsl().h && hue < 360.0, "hue {}", hue);
    }

    #[test]
    fn test_hue_decreases_from_green_to_yellow() {
        let green = Swatch::Green400.hsl().h;
        let yellow = Swatch::Yellow400.hsl().h;
        let hue = speed_to_color(15.5).hsl().h;
        assert!(hue < green && hue > yellow);
    }

    #[test]
    fn test_css_expression() {
        assert_eq!(
            speed_to_color(2.9).css(),
            "color-mix(in hsl decreasing hue, var(--chakra-colors-blue-700), var(--chakra-colors-blue-600) 50%)"
        );
        assert_eq!(
            speed_to_color(0.0).css(),
            "color-mix(in hsl decreasing hue, var(--chakra-colors-blue-700), var(--chakra-colors-blue-600) 0%)"
        );
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!(parse_speed(" 12.5 "), 12.5);
        assert_eq!(parse_speed("0"), 0.0);
        assert!(parse_speed("").is_nan());
        assert!(parse_speed("gusty").is_nan());
        assert_eq!(speed_to_color(parse_speed("abc")), CellColor::Empty);
    }

    #[test]
    fn test_scale_validation() {
        let sentinel = SpeedBreakpoint::new(f64::INFINITY, Swatch::Red500);

        assert_eq!(SpeedScale::new(vec![sentinel]), Err(ScaleError::TooShort(1)));
        assert_eq!(
            SpeedScale::new(vec![
                SpeedBreakpoint::new(0.0, Swatch::Blue700),
                SpeedBreakpoint::new(10.0, Swatch::Green400),
            ]),
            Err(ScaleError::MissingSentinel)
        );
        assert_eq!(
            SpeedScale::new(vec![
                SpeedBreakpoint::new(10.0, Swatch::Blue700),
                SpeedBreakpoint::new(10.0, Swatch::Green400),
                sentinel,
            ]),
            Err(ScaleError::NotIncreasing {
                index: 1,
                threshold_kts: 10.0
            })
        );
        assert!(SpeedScale::new(vec![SpeedBreakpoint::new(0.0, Swatch::Blue700), sentinel]).is_ok());
    }

    #[test]
    fn test_custom_scale_below_first_breakpoint() {
        let scale = SpeedScale::new(vec![
            SpeedBreakpoint::new(5.0, Swatch::Green400),
            SpeedBreakpoint::new(10.0, Swatch::Red500),
            SpeedBreakpoint::new(f64::INFINITY, Swatch::Red500),
        ])
        .unwrap();

        assert_eq!(blend(scale.color_for(2.0)), (Swatch::Green400, Swatch::Green400, 0.0));
        assert_eq!(scale.color_for(2.0).hex(), "#4ade80");
        let (_, _, percent) = blend(scale.color_for(7.5));
        assert!((percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_swatch_rgb_hsl_round_trip() {
        for swatch in [
            Swatch::Blue700,
            Swatch::Blue600,
            Swatch::Blue400,
            Swatch::Green400,
            Swatch::Yellow400,
            Swatch::Red500,
            Swatch::Purple700,
            Swatch::Gray100,
        ] {
            assert_eq!(Rgb::from(swatch.hsl()), swatch.rgb(), "{}", swatch.token());
        }
    }

    #[test]
    fn test_swatch_hues() {
        assert!((Swatch::Red500.hsl().h - 0.0).abs() < 1e-9);
        assert!((Swatch::Blue700.hsl().h - 224.06).abs() < 0.01);
        assert!((Swatch::Purple700.hsl().h - 272.89).abs() < 0.01);
    }
}
