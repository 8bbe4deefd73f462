//! Viewport rectangles and intersection margins.
//!
//! A [`Margin`] uses the same four-value syntax as a CSS `rootMargin`
//! (`"-30% 0px -60% 0px"`): top, right, bottom, left, each in `px` or `%`.
//! Percentages resolve against the root's height (top/bottom) or width
//! (left/right). Positive values grow the root, negative values shrink it.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;
use std::str::FromStr;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two rectangles, `None` when they do not touch.
    ///
    /// Edge-adjacent rectangles yield a zero-area overlap.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom().min(other.bottom());
        let right = self.right().min(other.right());
        (bottom >= top && right >= left).then(|| Rect::new(top, left, right - left, bottom - top))
    }
}

/// One side of a [`Margin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginValue {
    Px(f64),
    Percent(f64),
}

impl MarginValue {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => extent * p / 100.0,
        }
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Error returned when a margin string does not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid margin `{input}`: {reason}")]
pub struct MarginParseError {
    pub input: String,
    pub reason: &'static str,
}

/// Four-sided adjustment applied to the viewport before intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: MarginValue::Px(0.0),
            right: MarginValue::Px(0.0),
            bottom: MarginValue::Px(0.0),
            left: MarginValue::Px(0.0),
        }
    }
}

impl Margin {
    /// The root rectangle after applying this margin.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        let top = root.top - self.top.resolve(root.height);
        let bottom = root.bottom() + self.bottom.resolve(root.height);
        let left = root.left - self.left.resolve(root.width);
        let right = root.right() + self.right.resolve(root.width);
        Rect::new(top, left, right - left, bottom - top)
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

fn parse_side(token: &str, input: &str) -> Result<MarginValue, MarginParseError> {
    let err = |reason| MarginParseError { input: input.to_owned(), reason };
    if let Some(num) = token.strip_suffix('%') {
        return num.parse().map(MarginValue::Percent).map_err(|_| err("bad percentage"));
    }
    if let Some(num) = token.strip_suffix("px") {
        return num.parse().map(MarginValue::Px).map_err(|_| err("bad pixel value"));
    }
    // CSS allows a bare zero.
    if token == "0" {
        return Ok(MarginValue::Px(0.0));
    }
    Err(err("values must end in `px` or `%`"))
}

impl FromStr for Margin {
    type Err = MarginParseError;

    /// Parses one to four sides with CSS shorthand expansion.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let sides = input
            .split_whitespace()
            .map(|token| parse_side(token, input))
            .collect::<Result<Vec<_>, _>>()?;
        let (top, right, bottom, left) = match sides.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(MarginParseError { input: input.to_owned(), reason: "expected 1 to 4 values" }),
        };
        Ok(Self { top, right, bottom, left })
    }
}

/// Visibility of `target` within `root` shrunk/grown by `margin`.
///
/// Returns `(is_intersecting, ratio)` where `ratio` is the visible fraction
/// of the target's area. A zero-area target that touches the root counts as
/// fully visible.
#[must_use]
pub fn measure(target: Rect, root: Rect, margin: &Margin) -> (bool, f64) {
    let effective = margin.apply(root);
    match target.intersection(&effective) {
        None => (false, 0.0),
        Some(overlap) => {
            let area = target.area();
            let ratio = if area > 0.0 { (overlap.area() / area).min(1.0) } else { 1.0 };
            (true, ratio)
        }
    }
}
