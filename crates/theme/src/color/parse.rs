//! CSS color string parsing.
//!
//! Supports hex notation, `rgb()`/`rgba()`, `hsl()`/`hsla()`, `oklch()`,
//! `oklab()`, named colors and `transparent`, in both the legacy comma syntax
//! and the space-separated syntax with an optional `/ alpha`.

use super::{named, space, ColorError, Rgba};

pub fn parse_color(input: &str) -> Result<Rgba, ColorError> {
    let value = input.trim().to_lowercase();
    if value.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    if value == "transparent" {
        return Ok(Rgba::new(0.0, 0.0, 0.0, 0.0));
    }

    if let Some(open) = value.find('(') {
        if !value.ends_with(')') {
            return Err(ColorError::Unrecognized(input.trim().to_string()));
        }
        let function = value[..open].trim();
        let args = &value[open + 1..value.len() - 1];
        return parse_function(function, args);
    }

    named::lookup(&value)
        .map(Rgba::from_packed)
        .ok_or_else(|| ColorError::Unrecognized(input.trim().to_string()))
}

fn parse_hex(hex: &str) -> Result<Rgba, ColorError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }

    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return Err(ColorError::InvalidHex(hex.to_string())),
    };

    let channel = |i: usize| -> Result<f64, ColorError> {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map(|v| v as f64 / 255.0)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };

    let alpha = if expanded.len() == 8 { channel(6)? } else { 1.0 };
    Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

fn parse_function(function: &str, args: &str) -> Result<Rgba, ColorError> {
    let (components, alpha) = split_arguments(function, args)?;
    let alpha = match alpha {
        Some(a) => parse_alpha(a)?,
        None => 1.0,
    };

    match function {
        "rgb" | "rgba" => {
            let r = parse_rgb_channel(components[0])?;
            let g = parse_rgb_channel(components[1])?;
            let b = parse_rgb_channel(components[2])?;
            Ok(Rgba::new(r, g, b, alpha))
        }
        "hsl" | "hsla" => {
            let h = parse_hue(components[0])?;
            let s = parse_percent_like(components[1])?;
            let l = parse_percent_like(components[2])?;
            let (r, g, b) = space::hsl_to_rgb(h, s, l);
            Ok(Rgba::new(r, g, b, alpha))
        }
        "oklch" => {
            let l = parse_number_or_percent(components[0], 1.0)?;
            let c = parse_number_or_percent(components[1], 0.4)?;
            let h = parse_hue(components[2])?;
            let (r, g, b) = space::oklab_to_rgb(space::lch_to_lab(l, c, h));
            Ok(Rgba::new(r, g, b, alpha))
        }
        "oklab" => {
            let l = parse_number_or_percent(components[0], 1.0)?;
            let a = parse_number_or_percent(components[1], 0.4)?;
            let b = parse_number_or_percent(components[2], 0.4)?;
            let (r, g, bl) = space::oklab_to_rgb((l, a, b));
            Ok(Rgba::new(r, g, bl, alpha))
        }
        other => Err(ColorError::UnknownFunction(other.to_string())),
    }
}

/// Splits function arguments into three components and an optional alpha.
fn split_arguments<'a>(
    function: &str,
    args: &'a str,
) -> Result<(Vec<&'a str>, Option<&'a str>), ColorError> {
    let (main, mut alpha) = match args.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (args, None),
    };

    let mut components: Vec<&str> = main
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if alpha.is_none() && components.len() == 4 {
        alpha = components.pop();
    }

    if components.len() != 3 {
        return Err(ColorError::ArgumentCount {
            function: function.to_string(),
            found: components.len(),
        });
    }

    Ok((components, alpha))
}

fn parse_number(raw: &str) -> Result<f64, ColorError> {
    if raw == "none" {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorError::InvalidComponent(raw.to_string()))
}

/// Parses `n` or `n%`, where `100%` maps to `percent_reference`.
fn parse_number_or_percent(raw: &str, percent_reference: f64) -> Result<f64, ColorError> {
    match raw.strip_suffix('%') {
        Some(p) => Ok(parse_number(p)? / 100.0 * percent_reference),
        None => parse_number(raw),
    }
}

/// Saturation and lightness: `50%` and a bare `50` both mean one half.
fn parse_percent_like(raw: &str) -> Result<f64, ColorError> {
    let value = parse_number(raw.trim_end_matches('%'))?;
    Ok(value / 100.0)
}

fn parse_rgb_channel(raw: &str) -> Result<f64, ColorError> {
    match raw.strip_suffix('%') {
        Some(p) => Ok(parse_number(p)? / 100.0),
        None => Ok(parse_number(raw)? / 255.0),
    }
}

fn parse_alpha(raw: &str) -> Result<f64, ColorError> {
    parse_number_or_percent(raw, 1.0).map(|a| a.clamp(0.0, 1.0))
}

/// Hue in degrees. Accepts `deg`, `grad`, `rad` and `turn` units.
fn parse_hue(raw: &str) -> Result<f64, ColorError> {
    let degrees = if let Some(v) = raw.strip_suffix("deg") {
        parse_number(v)?
    } else if let Some(v) = raw.strip_suffix("grad") {
        parse_number(v)? * 0.9
    } else if let Some(v) = raw.strip_suffix("rad") {
        parse_number(v)?.to_degrees()
    } else if let Some(v) = raw.strip_suffix("turn") {
        parse_number(v)? * 360.0
    } else {
        parse_number(raw)?
    };
    Ok(space::normalize_hue(degrees))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    fn assert_rgb(color: Rgba, r: f64, g: f64, b: f64) {
        assert!(
            approx(color.r, r) && approx(color.g, g) && approx(color.b, b),
            "expected ({}, {}, {}), got {:?}",
            r,
            g,
            b,
            color
        );
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_rgb(parse_color("#ff0000").unwrap(), 1.0, 0.0, 0.0);
        assert_rgb(parse_color("#F00").unwrap(), 1.0, 0.0, 0.0);
        let with_alpha = parse_color("#ff000080").unwrap();
        assert!(approx(with_alpha.a, 128.0 / 255.0));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gggggg").is_err());
    }

    #[test]
    fn test_parse_rgb_syntaxes() {
        assert_rgb(parse_color("rgb(255, 0, 0)").unwrap(), 1.0, 0.0, 0.0);
        assert_rgb(parse_color("rgb(255 0 0)").unwrap(), 1.0, 0.0, 0.0);
        assert_rgb(parse_color("rgb(100% 0% 0%)").unwrap(), 1.0, 0.0, 0.0);
        let rgba = parse_color("rgba(0, 0, 255, 0.5)").unwrap();
        assert!(approx(rgba.a, 0.5));
        let slash = parse_color("rgb(0 0 255 / 25%)").unwrap();
        assert!(approx(slash.a, 0.25));
    }

    #[test]
    fn test_parse_hsl() {
        assert_rgb(parse_color("hsl(0 100% 50%)").unwrap(), 1.0, 0.0, 0.0);
        assert_rgb(parse_color("hsl(120deg, 100%, 25%)").unwrap(), 0.0, 0.5, 0.0);
        assert_rgb(parse_color("hsl(0.5turn 100% 50%)").unwrap(), 0.0, 1.0, 1.0);
    }

    #[test]
    fn test_parse_oklch_white_and_black() {
        assert_rgb(parse_color("oklch(1 0 0)").unwrap(), 1.0, 1.0, 1.0);
        assert_rgb(parse_color("oklch(0% 0 0)").unwrap(), 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_parse_named_and_transparent() {
        assert_rgb(parse_color("Red").unwrap(), 1.0, 0.0, 0.0);
        assert_eq!(parse_color("transparent").unwrap().a, 0.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_color(""), Err(ColorError::Empty)));
        assert!(matches!(
            parse_color("not-a-color"),
            Err(ColorError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_color("lab(50 20 20)"),
            Err(ColorError::UnknownFunction(_))
        ));
        assert!(matches!(
            parse_color("rgb(1, 2)"),
            Err(ColorError::ArgumentCount { found: 2, .. })
        ));
        assert!(matches!(
            parse_color("rgb(a, b, c)"),
            Err(ColorError::InvalidComponent(_))
        ));
    }
}
