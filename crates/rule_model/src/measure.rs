//! Measurements: a scalar value tagged with a unit of measure

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Unit of a measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    /// No usable unit. The value must be exactly `0.0`.
    #[default]
    Unset,
    /// Absolute pixels
    Pixel,
    /// Relative to the base font size
    Em,
    /// Percentage of a reference dimension, normally `0.0` to `100.0`
    Percent,
}

/// A scalar value plus its unit of measure
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// Value of the measurement
    pub value: f64,
    /// Unit of the measurement
    pub unit: Unit,
}

impl Measurement {
    /// The zero measurement. This can be an actual zero-sized element,
    /// or mean that the size should be determined by content.
    pub const ZERO: Measurement = Measurement {
        value: 0.0,
        unit: Unit::Unset,
    };

    /// A measurement in absolute pixels
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Pixel,
        }
    }

    /// A measurement relative to the base font size
    pub const fn em(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Em,
        }
    }

    /// A percentage of a reference dimension
    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    /// Whether this measurement carries a usable unit
    pub fn is_set(&self) -> bool {
        self.unit != Unit::Unset
    }

    /// Parse a string as a measurement.
    ///
    /// Accepts surrounding whitespace, a sign-free decimal with either `.`
    /// or `,` as the decimal point (the first occurrence of either wins),
    /// and an optional case-insensitive unit suffix among `px`, `em` and
    /// `%`. Values without a unit are assumed to be pixels. The
    /// placeholder `_` and any unparseable input yield
    /// [`Measurement::ZERO`].
    pub fn parse(text: &str) -> Self {
        let core = text.trim_start();
        let mut digits = String::new();
        let mut suffix = "";
        let mut seen_point = false;
        for (i, c) in core.char_indices() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if (c == '.' || c == ',') && !seen_point {
                seen_point = true;
                digits.push('.');
            } else {
                suffix = &core[i..];
                break;
            }
        }

        if digits.is_empty() || digits == "." {
            return Self::ZERO;
        }
        let Ok(value) = digits.parse::<f64>() else {
            return Self::ZERO;
        };

        let unit = match suffix.trim().to_ascii_lowercase().as_str() {
            "em" => Unit::Em,
            "%" => Unit::Percent,
            _ => Unit::Pixel,
        };

        Self { value, unit }
    }

    /// Resolve this measurement to an absolute pixel value.
    ///
    /// `reference` is the dimension that percentages are relative to;
    /// with no reference a percentage resolves to zero.
    pub fn resolve(&self, base_em: f64, reference: Option<f64>) -> f64 {
        match self.unit {
            Unit::Unset => 0.0,
            Unit::Pixel => self.value,
            Unit::Em => self.value * base_em,
            Unit::Percent => self.value * 0.01 * reference.unwrap_or(0.0),
        }
    }
}

impl PartialEq for Measurement {
    /// Zero is unit-agnostic: two zero-valued measurements are equal
    /// whatever their units.
    fn eq(&self, other: &Self) -> bool {
        if self.value == 0.0 && other.value == 0.0 {
            return true;
        }
        self.value == other.value && self.unit == other.unit
    }
}

impl PartialOrd for Measurement {
    /// Value-major, unit-minor ordering. Used for deterministic test
    /// output, not by the layout algorithm.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.value.partial_cmp(&other.value) {
            Some(Ordering::Equal) => Some(self.unit.cmp(&other.unit)),
            ord => ord,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Unset => write!(f, "_"),
            Unit::Pixel => write!(f, "{}px", self.value),
            Unit::Em => write!(f, "{}em", self.value),
            Unit::Percent => write!(f, "{}%", self.value),
        }
    }
}
