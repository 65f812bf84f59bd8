//! CSS color normalization and WCAG contrast math.
//!
//! Computed styles arrive as whatever the engine reports: `rgb()`/`rgba()`
//! triples, hex values from inline styles, or named colors. Everything is
//! normalized to an 8-bit RGB triple before the luminance calculation.

use regex::Regex;

/// Parse any CSS color value into (r, g, b).
///
/// Fully transparent values return None: a see-through background never
/// participates in a contrast ratio.
pub fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.is_empty() || trimmed == "transparent" {
        return None;
    }
    if trimmed.starts_with('#') {
        parse_hex_color(&trimmed)
    } else if trimmed.starts_with("rgb") {
        parse_rgb_color(&trimmed)
    } else {
        parse_named_color(&trimmed)
    }
}

/// Parse a CSS hex color (#rgb, #rrggbb) into (r, g, b).
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse an rgb() or rgba() value into (r, g, b). An rgba() with zero alpha
/// is treated as no color.
pub fn parse_rgb_color(value: &str) -> Option<(u8, u8, u8)> {
    let re = Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*([0-9.]+)\s*)?\)")
        .expect("valid regex");
    let caps = re.captures(value)?;
    if let Some(alpha) = caps.get(4) {
        let alpha: f64 = alpha.as_str().parse().ok()?;
        if alpha == 0.0 {
            return None;
        }
    }
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some((r, g, b))
}

/// Parse a named CSS color.
pub fn parse_named_color(name: &str) -> Option<(u8, u8, u8)> {
    match name {
        "white" => Some((255, 255, 255)),
        "black" => Some((0, 0, 0)),
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "yellow" => Some((255, 255, 0)),
        "gray" | "grey" => Some((128, 128, 128)),
        "silver" => Some((192, 192, 192)),
        "maroon" => Some((128, 0, 0)),
        "olive" => Some((128, 128, 0)),
        "lime" => Some((0, 255, 0)),
        "aqua" | "cyan" => Some((0, 255, 255)),
        "teal" => Some((0, 128, 128)),
        "navy" => Some((0, 0, 128)),
        "fuchsia" | "magenta" => Some((255, 0, 255)),
        "purple" => Some((128, 0, 128)),
        "orange" => Some((255, 165, 0)),
        _ => None,
    }
}

/// WCAG relative luminance with sRGB linearization.
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let linear = [r, g, b].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * linear[0] + 0.7152 * linear[1] + 0.0722 * linear[2]
}

/// WCAG contrast ratio between two colors, always >= 1.0.
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#000"), Some((0, 0, 0)));
        assert_eq!(parse_hex_color("#777777"), Some((0x77, 0x77, 0x77)));
        assert_eq!(parse_hex_color("#zzz"), None);
    }

    #[test]
    fn test_parse_rgb_color() {
        assert_eq!(parse_rgb_color("rgb(255, 0, 0)"), Some((255, 0, 0)));
        assert_eq!(parse_rgb_color("rgba(0, 128, 0, 0.5)"), Some((0, 128, 0)));
    }

    #[test]
    fn test_transparent_is_no_color() {
        assert_eq!(parse_color("transparent"), None);
        assert_eq!(parse_color("rgba(0, 0, 0, 0)"), None);
    }

    #[test]
    fn test_parse_named_color() {
        assert_eq!(parse_color("white"), Some((255, 255, 255)));
        assert_eq!(parse_color("Navy"), Some((0, 0, 128)));
        assert_eq!(parse_color("hotpinkish"), None);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1, "expected ~21:1, got {:.2}", ratio);
    }

    #[test]
    fn test_contrast_ratio_symmetric() {
        let a = contrast_ratio((0x77, 0x77, 0x77), (0x66, 0x66, 0x66));
        let b = contrast_ratio((0x66, 0x66, 0x66), (0x77, 0x77, 0x77));
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_gray_pair_fails_aa() {
        // #777 on #666 is well below the 4.5:1 AA threshold
        let ratio = contrast_ratio((0x77, 0x77, 0x77), (0x66, 0x66, 0x66));
        assert!(ratio < 4.5, "got {:.2}", ratio);
    }

    #[test]
    fn test_relative_luminance_extremes() {
        assert!((relative_luminance(255, 255, 255) - 1.0).abs() < 0.01);
        assert!(relative_luminance(0, 0, 0).abs() < 0.01);
    }
}
