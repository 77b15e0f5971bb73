//! Color space math: sRGB, HSL and OKLab/OKLCH.
//!
//! sRGB channels are gamma-encoded in `0.0..=1.0`. Conversions out of OKLab
//! may leave that range; callers clamp when they format.

pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// Returns `(hue, saturation, lightness)`; hue is `None` for achromatic colors.
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (Option<f64>, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = 0.5 * (max + min);

    if delta == 0.0 {
        return (None, 0.0, l);
    }

    let s = delta / (1.0 - (max + min - 1.0).abs());
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (Some(h * 60.0), s, l)
}

pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = normalize_hue(h);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0).floor() as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}

fn to_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.04045 {
        c / 12.92
    } else {
        c.signum() * ((abs + 0.055) / 1.055).powf(2.4)
    }
}

fn from_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.0031308 {
        c * 12.92
    } else {
        c.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
    }
}

pub fn rgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (r, g, b) = (to_linear(r), to_linear(g), to_linear(b));

    let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
    let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
    let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();

    (
        0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
        1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
        0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
    )
}

pub fn oklab_to_rgb((l, a, b): (f64, f64, f64)) -> (f64, f64, f64) {
    let l_ = (l + 0.396_337_777_4 * a + 0.215_803_757_3 * b).powi(3);
    let m_ = (l - 0.105_561_345_8 * a - 0.063_854_172_8 * b).powi(3);
    let s_ = (l - 0.089_484_177_5 * a - 1.291_485_548_0 * b).powi(3);

    let r = 4.076_741_662_1 * l_ - 3.307_711_591_3 * m_ + 0.230_969_929_2 * s_;
    let g = -1.268_438_004_6 * l_ + 2.609_757_401_1 * m_ - 0.341_319_396_5 * s_;
    let b = -0.004_196_086_3 * l_ - 0.703_418_614_7 * m_ + 1.707_614_701_0 * s_;

    (from_linear(r), from_linear(g), from_linear(b))
}

/// OKLab to `(lightness, chroma, hue)`; hue is `None` when chroma is zero.
pub fn lab_to_lch((l, a, b): (f64, f64, f64)) -> (f64, f64, Option<f64>) {
    let c = (a * a + b * b).sqrt();
    if c < 1e-7 {
        return (l, 0.0, None);
    }
    (l, c, Some(normalize_hue(b.atan2(a).to_degrees())))
}

pub fn lch_to_lab(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let rad = h.to_radians();
    (l, c * rad.cos(), c * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_round_trip_red() {
        let (h, s, l) = rgb_to_hsl(1.0, 0.0, 0.0);
        assert_eq!(h, Some(0.0));
        assert_eq!(s, 1.0);
        assert_eq!(l, 0.5);
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_grey_has_no_hue() {
        let (h, s, _) = rgb_to_hsl(0.5, 0.5, 0.5);
        assert_eq!(h, None);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn test_oklab_white_is_achromatic() {
        let (l, c, h) = lab_to_lch(rgb_to_oklab(1.0, 1.0, 1.0));
        assert!((l - 1.0).abs() < 1e-4);
        assert_eq!(c, 0.0);
        assert_eq!(h, None);
    }

    #[test]
    fn test_oklab_round_trip() {
        let (r, g, b) = oklab_to_rgb(rgb_to_oklab(0.2, 0.4, 0.6));
        assert!((r - 0.2).abs() < 1e-4);
        assert!((g - 0.4).abs() < 1e-4);
        assert!((b - 0.6).abs() < 1e-4);
    }
}
