//! Joiner anchor points
//!
//! A joiner names a fractional position within an element's bounding box
//! plus a measured offset. Siblings in a chain are placed so that the
//! next sibling's `prev` anchor lands at the same location as the
//! previous sibling's `next` anchor.

use crate::Measurement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Joining position of sibling elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Joiner {
    /// X-coordinate of the anchor, relative to the element's left edge,
    /// as a fraction of its width. Normally `0.0` to `1.0` inclusive.
    pub x_pos: f64,
    /// Y-coordinate of the anchor, relative to the element's top edge,
    /// as a fraction of its height. Normally `0.0` to `1.0` inclusive.
    pub y_pos: f64,
    /// X offset of the anchor
    pub x_offset: Measurement,
    /// Y offset of the anchor
    pub y_offset: Measurement,
}

impl Joiner {
    /// Anchor at the top-left of the element
    pub const TOP_LEFT: Joiner = Joiner::at(0.0, 0.0);
    /// Anchor at the left of the element, at mid-line
    pub const MIDDLE_LEFT: Joiner = Joiner::at(0.0, 0.5);
    /// Anchor at the bottom-left of the element
    pub const BOTTOM_LEFT: Joiner = Joiner::at(0.0, 1.0);
    /// Anchor at the top of the element, at centre
    pub const TOP_CENTER: Joiner = Joiner::at(0.5, 0.0);
    /// Anchor at the dead centre of the element
    pub const MIDDLE_CENTER: Joiner = Joiner::at(0.5, 0.5);
    /// Anchor at the bottom of the element, at centre
    pub const BOTTOM_CENTER: Joiner = Joiner::at(0.5, 1.0);
    /// Anchor at the top-right of the element
    pub const TOP_RIGHT: Joiner = Joiner::at(1.0, 0.0);
    /// Anchor at the right of the element, at mid-line
    pub const MIDDLE_RIGHT: Joiner = Joiner::at(1.0, 0.5);
    /// Anchor at the bottom-right of the element
    pub const BOTTOM_RIGHT: Joiner = Joiner::at(1.0, 1.0);

    /// Anchor at a fractional position with no offset
    pub const fn at(x_pos: f64, y_pos: f64) -> Self {
        Self {
            x_pos,
            y_pos,
            x_offset: Measurement::ZERO,
            y_offset: Measurement::ZERO,
        }
    }

    /// A copy of this joiner with a different offset
    pub fn offset(&self, dx: Measurement, dy: Measurement) -> Self {
        Self {
            x_pos: self.x_pos,
            y_pos: self.y_pos,
            x_offset: dx,
            y_offset: dy,
        }
    }

    /// Parse a joiner description.
    ///
    /// Either a two-letter preset code followed by up to two offset
    /// measurements (each omittable via `_`), or four raw tokens
    /// `x_pos y_pos x_offset y_offset`:
    ///
    /// ```text
    /// TR
    /// TR 2% 0
    /// 0.75 0.25 5px 5px
    /// ```
    ///
    /// Blank input yields the top-left preset; an unrecognized preset
    /// code anchors at `(0, 0)`.
    pub fn parse(text: &str) -> Self {
        let bits: Vec<&str> = text.split_whitespace().collect();
        if bits.is_empty() {
            return Self::TOP_LEFT;
        }

        // Full description of x_pos, y_pos, x_offset, y_offset
        if bits.len() >= 4 {
            return Self {
                x_pos: bits[0].parse().unwrap_or(0.0),
                y_pos: bits[1].parse().unwrap_or(0.0),
                x_offset: Measurement::parse(bits[2]),
                y_offset: Measurement::parse(bits[3]),
            };
        }

        let preset = match bits[0].to_ascii_uppercase().as_str() {
            "TL" => Self::TOP_LEFT,
            "ML" => Self::MIDDLE_LEFT,
            "BL" => Self::BOTTOM_LEFT,
            "TC" => Self::TOP_CENTER,
            "MC" => Self::MIDDLE_CENTER,
            "BC" => Self::BOTTOM_CENTER,
            "TR" => Self::TOP_RIGHT,
            "MR" => Self::MIDDLE_RIGHT,
            "BR" => Self::BOTTOM_RIGHT,
            _ => Self::at(0.0, 0.0),
        };

        let x_offset = bits
            .get(1)
            .map(|s| Measurement::parse(s))
            .unwrap_or(Measurement::ZERO);
        let y_offset = bits
            .get(2)
            .map(|s| Measurement::parse(s))
            .unwrap_or(Measurement::ZERO);

        preset.offset(x_offset, y_offset)
    }
}

impl fmt::Display for Joiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.x_pos, self.y_pos, self.x_offset, self.y_offset
        )
    }
}
