//! Unicode sparklines for ratios in \[0.0, 1.0\].
//!
//! Each ratio becomes one block glyph whose height is the ratio quantized to
//! eighths. Values outside the range, including [`NO_DATA`](crate::NO_DATA)
//! and NaN, are drawn with [`UNDEFINED`] rather than clamped.
//!
//! # Quantization
//!
//! The level is `round(x * 8)` with ties rounding to even, so the boundaries
//! between levels sit at odd multiples of 1/16 and a ratio exactly on a
//! boundary goes to the even level: `0.0625` is level 0, `0.1875` is level 2.

/// Glyphs for heights 0 through 8.
pub const HEIGHTS: [char; 9] = [
    ' ',
    '\u{2581}', // LOWER ONE EIGHTH BLOCK
    '\u{2582}', // LOWER ONE QUARTER BLOCK
    '\u{2583}', // LOWER THREE EIGHTHS BLOCK
    '\u{2584}', // LOWER HALF BLOCK
    '\u{2585}', // LOWER FIVE EIGHTHS BLOCK
    '\u{2586}', // LOWER THREE QUARTERS BLOCK
    '\u{2587}', // LOWER SEVEN EIGHTHS BLOCK
    '\u{2588}', // FULL BLOCK
];

/// Glyph for values outside \[0.0, 1.0\].
pub const UNDEFINED: char = '\u{2591}'; // LIGHT SHADE

pub const LEFT_SEPARATOR: char = '\u{2595}'; // RIGHT ONE EIGHTH BLOCK
pub const RIGHT_SEPARATOR: char = '\u{258F}'; // LEFT ONE EIGHTH BLOCK

/// Levels per row of glyphs.
const STEPS: usize = HEIGHTS.len() - 1;

fn valid(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

/// Quantizes `x` to `0..=steps`, or `None` when `x` is out of range.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "x is checked to be in [0, 1], so the product is a small non-negative integer"
)]
fn level(x: f64, steps: usize) -> Option<usize> {
    valid(x).then(|| (x * steps as f64).round_ties_even() as usize)
}

/// Glyph for one ratio on a single-row sparkline.
pub fn glyph(x: f64) -> char {
    level(x, STEPS).map_or(UNDEFINED, |h| HEIGHTS[h])
}

/// Renders `start▕<glyphs>▏stop` with one glyph per ratio.
pub fn format_data(start: &str, data: impl IntoIterator<Item = f64>, stop: &str) -> String {
    let mut line = String::from(start);
    line.push(LEFT_SEPARATOR);
    line.extend(data.into_iter().map(glyph));
    line.push(RIGHT_SEPARATOR);
    line.push_str(stop);
    line
}

/// Renders a sparkline `rows` glyphs tall, giving `8 * rows` levels.
///
/// Rows are returned top first, joined by newlines. Only the bottom row
/// carries the labels; the rows above are indented to line up with it.
/// A single row is identical to [`format_data`]; zero rows is treated as one.
pub fn format_rows(
    start: &str,
    data: impl IntoIterator<Item = f64>,
    stop: &str,
    rows: usize,
) -> String {
    let rows = rows.max(1);
    let levels: Vec<Option<usize>> = data.into_iter().map(|x| level(x, STEPS * rows)).collect();
    let indent = " ".repeat(start.chars().count());

    let mut lines = Vec::with_capacity(rows);
    for row in (0..rows).rev() {
        let base = row * STEPS;
        let mut line = if row == 0 {
            String::from(start)
        } else {
            indent.clone()
        };
        line.push(LEFT_SEPARATOR);
        line.extend(levels.iter().map(|level| match level {
            Some(h) => HEIGHTS[h.saturating_sub(base).min(STEPS)],
            None => UNDEFINED,
        }));
        line.push(RIGHT_SEPARATOR);
        if row == 0 {
            line.push_str(stop);
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn one_bar(x: f64) -> String {
        format_data("beg", [x], "end")
    }

    fn expected_bar(height: Option<usize>) -> String {
        let bar = height.map_or(UNDEFINED, |h| HEIGHTS[h]);
        format!("beg{LEFT_SEPARATOR}{bar}{RIGHT_SEPARATOR}end")
    }

    #[test]
    fn test_zero_is_blank() {
        assert_eq!(one_bar(0.0), expected_bar(Some(0)));
    }

    #[test]
    fn test_full_is_full_block() {
        assert_eq!(one_bar(1.0), expected_bar(Some(8)));
    }

    #[test]
    fn test_boundaries_fall_at_odd_sixteenths() {
        // Just below and just above each (2h - 1) / 16 boundary.
        for h in 1..=8 {
            let boundary = (2.0 * f64::from(h) - 1.0) / 16.0;
            let h = usize::try_from(h).unwrap();
            assert_eq!(one_bar(boundary - 0.000_01), expected_bar(Some(h - 1)), "below {boundary}");
            assert_eq!(one_bar(boundary + 0.000_01), expected_bar(Some(h)), "above {boundary}");
        }
    }

    #[test]
    fn test_listed_boundaries() {
        assert_eq!(one_bar(0.062_49), expected_bar(Some(0)));
        assert_eq!(one_bar(0.062_51), expected_bar(Some(1)));
        assert_eq!(one_bar(0.937_49), expected_bar(Some(7)));
        assert_eq!(one_bar(0.937_51), expected_bar(Some(8)));
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        assert_eq!(one_bar(0.0625), expected_bar(Some(0)));
        assert_eq!(one_bar(0.1875), expected_bar(Some(2)));
        assert_eq!(one_bar(0.3125), expected_bar(Some(2)));
        assert_eq!(one_bar(0.4375), expected_bar(Some(4)));
        assert_eq!(one_bar(0.9375), expected_bar(Some(8)));
    }

    #[test]
    fn test_out_of_range_is_undefined() {
        assert_eq!(one_bar(1.000_01), expected_bar(None));
        assert_eq!(one_bar(-0.000_01), expected_bar(None));
        assert_eq!(one_bar(-1.0), expected_bar(None));
        assert_eq!(one_bar(f64::NAN), expected_bar(None));
        assert_eq!(one_bar(crate::NO_DATA), expected_bar(None));
    }

    #[test]
    fn test_sequence() {
        let data = (0..9).map(|x| f64::from(x) / 8.001);
        assert_snapshot!(format_data("->", data, "<-"), @"->▕ ▁▂▃▄▅▆▇█▏<-");
    }

    #[test]
    fn test_empty_sequence() {
        assert_snapshot!(format_data("a", Vec::new(), "b"), @"a▕▏b");
    }

    #[test]
    fn test_single_row_matches_format_data() {
        let data = [0.0, 0.3, -1.0, 0.7, 1.0];
        assert_eq!(format_rows("s", data, "e", 1), format_data("s", data, "e"));
        assert_eq!(format_rows("s", data, "e", 0), format_data("s", data, "e"));
    }

    #[test]
    fn test_two_rows() {
        let data = [1.0 / 7.0, 0.0, 0.5625, 5.0 / 7.0, 1.0, -1.0, 0.875];
        let rendered = format_rows("start", data, "stop", 2);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "     ▕  ▁▃█░▆▏");
        assert_eq!(lines[1], "start▕▂ ███░█▏stop");
    }

    #[test]
    fn test_rows_indent_counts_characters() {
        let rendered = format_rows("é", [1.0], "", 3);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines, [" ▕█▏", " ▕█▏", "é▕█▏"]);
    }
}
