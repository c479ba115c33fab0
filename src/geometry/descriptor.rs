use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::core::Point;

/// Coordinate-pair grammar: digits and dots, one space, digits and dots.
static COORD_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9.]+) ([0-9.]+)").expect("coordinate regex is valid"));

#[derive(Clone, Debug, PartialEq)]
struct CoordToken {
    span: Range<usize>,
    point: Point,
}

/// Immutable base shape parsed from a path description.
///
/// Only `<number> <number>` pairs are recognized; every other byte of the source (commands,
/// commas, signs, other separators) is kept verbatim and re-emitted around the rewritten pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct PathDescriptor {
    source: String,
    tokens: Vec<CoordToken>,
}

impl PathDescriptor {
    /// Parse a path description. Never fails; unmatched text simply yields no points.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let tokens = COORD_PAIR
            .captures_iter(&source)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let x = parse_leading_float(caps.get(1)?.as_str())?;
                let y = parse_leading_float(caps.get(2)?.as_str())?;
                Some(CoordToken {
                    span: whole.range(),
                    point: Point::new(x, y),
                })
            })
            .collect();
        Self { source, tokens }
    }

    /// The original description text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Base points in source order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.tokens.iter().map(|t| t.point)
    }

    /// Number of recognized coordinate pairs.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the description contains no recognized coordinate pair.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Rebuild the description, letting `emit` write the replacement text of each pair.
    ///
    /// `emit` is called once per pair, in source order, with the pair index and base point.
    pub fn render_with(&self, mut emit: impl FnMut(usize, Point, &mut String)) -> String {
        let mut out = String::with_capacity(self.source.len() * 2);
        let mut cursor = 0;
        for (i, token) in self.tokens.iter().enumerate() {
            out.push_str(&self.source[cursor..token.span.start]);
            emit(i, token.point, &mut out);
            cursor = token.span.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

/// Append `" x y"` for a point.
pub fn push_point(out: &mut String, p: Point) {
    use std::fmt::Write as _;
    let _ = write!(out, " {} {}", p.x, p.y);
}

/// Longest leading decimal number of a `[0-9.]+` token (`"1.2.3"` reads as `1.2`).
///
/// Returns `None` when the token has no digit before its second dot.
pub fn parse_leading_float(token: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in token.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    token[..end].parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/descriptor.rs"]
mod tests;
