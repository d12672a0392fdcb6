//! Hero section parallax.

/// Used when `data-parallax` is missing, zero, or not a number.
pub const DEFAULT_SPEED: f64 = 0.5;

/// Vertical offset (px) for an element with the given `data-parallax` value.
#[must_use]
pub fn parallax_offset(scroll_y: f64, speed_attr: Option<&str>) -> f64 {
    let speed = speed_attr
        .and_then(parse_leading_float)
        .filter(|speed| *speed != 0.0)
        .unwrap_or(DEFAULT_SPEED);
    scroll_y * speed
}

#[must_use]
pub fn parallax_transform(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// Parse the longest numeric prefix, so `"0.3x"` reads as `0.3` and
/// `"1e-1"` as `0.1`.
fn parse_leading_float(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let mut prev = None;
    let end = raw
        .char_indices()
        .take_while(|&(i, c)| {
            let signed_here = i == 0 || matches!(prev, Some('e' | 'E'));
            prev = Some(c);
            c.is_ascii_digit()
                || matches!(c, '.' | 'e' | 'E')
                || (signed_here && matches!(c, '+' | '-'))
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    (1..=end)
        .rev()
        .find_map(|len| raw[..len].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
