use std::{fmt, str::FromStr};

use crate::foundation::error::{TintError, TintResult};

mod named;

pub use named::NAMED_COLORS;

/// An 8-bit-per-channel RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.channels()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Resolve a color specification into an [`Rgb`] triple.
///
/// Accepted forms:
/// - `#RRGGBB` and the `#RGB` shorthand (each digit doubled),
/// - `rgb(r, g, b)` with integer channels in 0..=255,
/// - `rgb(r%, g%, b%)` with percentages in 0..=100, rounded to the nearest channel value,
/// - a CSS named color such as `"steelblue"` (ASCII case-insensitive).
///
/// The percent branch is taken whenever a `%` appears anywhere inside the argument list.
pub fn resolve(spec: &str) -> TintResult<Rgb> {
    let s = spec.trim();

    if s.starts_with('#') && s.is_ascii() {
        match s.len() {
            7 => {
                return Ok(Rgb::new(
                    hex_channel(spec, &s[1..3])?,
                    hex_channel(spec, &s[3..5])?,
                    hex_channel(spec, &s[5..7])?,
                ));
            }
            4 => {
                let mut out = [0u8; 3];
                for (slot, digit) in out.iter_mut().zip(s[1..].chars()) {
                    let pair = format!("{digit}{digit}");
                    *slot = hex_channel(spec, &pair)?;
                }
                let [r, g, b] = out;
                return Ok(Rgb::new(r, g, b));
            }
            _ => {}
        }
    } else if s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rgb")) {
        return parse_rgb_function(spec, &s[3..]);
    } else if let Some(value) = named::lookup(s) {
        return resolve(value);
    }

    Err(TintError::invalid_color(format!(
        "don't know how to handle color \"{spec}\""
    )))
}

fn hex_channel(spec: &str, pair: &str) -> TintResult<u8> {
    if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TintError::invalid_color(format!(
            "invalid hex digits \"{pair}\" in color \"{spec}\""
        )));
    }
    u8::from_str_radix(pair, 16).map_err(|_| {
        TintError::invalid_color(format!("invalid hex digits \"{pair}\" in color \"{spec}\""))
    })
}

fn parse_rgb_function(spec: &str, rest: &str) -> TintResult<Rgb> {
    let args: String = rest.chars().filter(|c| *c != '(' && *c != ')').collect();
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(TintError::invalid_color(format!(
            "rgb() color \"{spec}\" must have exactly 3 components"
        )));
    }

    let percent = args.contains('%');
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = if percent {
            percent_channel(spec, part)?
        } else {
            int_channel(spec, part)?
        };
    }
    let [r, g, b] = out;
    Ok(Rgb::new(r, g, b))
}

fn percent_channel(spec: &str, part: &str) -> TintResult<u8> {
    let raw = part.replace('%', "");
    let pct: f64 = raw.trim().parse().map_err(|_| {
        TintError::invalid_color(format!("invalid percentage \"{part}\" in color \"{spec}\""))
    })?;
    if !(0.0..=100.0).contains(&pct) {
        return Err(TintError::invalid_color(format!(
            "percentage \"{part}\" out of range 0..=100 in color \"{spec}\""
        )));
    }
    Ok((pct * 255.0 / 100.0).round() as u8)
}

fn int_channel(spec: &str, part: &str) -> TintResult<u8> {
    part.parse::<u8>().map_err(|_| {
        TintError::invalid_color(format!(
            "channel \"{part}\" is not an integer in 0..=255 in color \"{spec}\""
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_triplet_and_shorthand() {
        assert_eq!(resolve("#FF0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(resolve("#F00").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(resolve("#1a2B3c").unwrap(), Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(resolve("#abc").unwrap(), Rgb::new(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn hex_of_other_lengths_is_rejected() {
        for bad in ["#", "#FF", "#FF00", "#FF00000", "#FF000080"] {
            let err = resolve(bad).unwrap_err();
            assert!(matches!(err, TintError::InvalidColor(_)), "{bad}");
        }
    }

    #[test]
    fn hex_with_bad_digits_is_rejected() {
        assert!(matches!(
            resolve("#GG0000").unwrap_err(),
            TintError::InvalidColor(_)
        ));
        assert!(matches!(resolve("#0z0").unwrap_err(), TintError::InvalidColor(_)));
        assert!(matches!(resolve("#+1+2+3").unwrap_err(), TintError::InvalidColor(_)));
    }

    #[test]
    fn parses_rgb_integers() {
        assert_eq!(resolve("rgb(0,128,255)").unwrap(), Rgb::new(0, 128, 255));
        assert_eq!(resolve("RGB( 10 , 20 , 30 )").unwrap(), Rgb::new(10, 20, 30));
    }

    #[test]
    fn parses_rgb_percentages_with_rounding() {
        assert_eq!(resolve("rgb(50%,0%,100%)").unwrap(), Rgb::new(128, 0, 255));
        assert_eq!(resolve("rgb(10%, 20%, 30%)").unwrap(), Rgb::new(26, 51, 77));
        assert_eq!(resolve("rgb(12.5%, 0%, 0%)").unwrap(), Rgb::new(32, 0, 0));
    }

    #[test]
    fn a_single_percent_sign_switches_every_component_to_percent() {
        assert_eq!(resolve("rgb(100, 0, 50%)").unwrap(), Rgb::new(255, 0, 128));
    }

    #[test]
    fn rgb_out_of_range_or_malformed_is_rejected() {
        for bad in [
            "rgb(256,0,0)",
            "rgb(-1,0,0)",
            "rgb(1,2)",
            "rgb(1,2,3,4)",
            "rgb(a,b,c)",
            "rgb(101%,0%,0%)",
            "rgba(1,2,3)",
        ] {
            let err = resolve(bad).unwrap_err();
            assert!(matches!(err, TintError::InvalidColor(_)), "{bad}");
        }
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(resolve("red").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(resolve("SteelBlue").unwrap(), Rgb::new(70, 130, 180));
        assert_eq!(resolve("grey").unwrap(), resolve("gray").unwrap());
    }

    #[test]
    fn unknown_color_reports_the_input() {
        let err = resolve("not-a-color").unwrap_err();
        assert!(matches!(err, TintError::InvalidColor(_)));
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn every_named_color_is_a_plain_hex_triplet() {
        for (name, value) in NAMED_COLORS {
            assert!(
                value.len() == 7 && value.starts_with('#'),
                "{name} maps to {value}"
            );
            resolve(value).unwrap();
        }
    }

    #[test]
    fn display_and_from_str_agree() {
        let c: Rgb = "rgb(1, 2, 254)".parse().unwrap();
        assert_eq!(c.to_string(), "#0102fe");
        assert_eq!(c.to_string().parse::<Rgb>().unwrap(), c);
        assert_eq!(<[u8; 3]>::from(c), [1, 2, 254]);
    }
}
