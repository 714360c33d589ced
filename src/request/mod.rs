//! Axis requests.
//!
//! A request names one axis of a field and says which representation of it
//! is wanted. The text grammar accepted by [`AxisRequest::parse`]:
//!
//! ```text
//! time                  full reconstruction
//! time[smallestperiod]  modifier: smallestperiod | oneperiod | antiperiod | pattern
//! angle=[0,pi/4]        coordinates v with lower <= v < upper
//! slice=axis_data       resample onto caller-supplied coordinates
//! ```
//!
//! Parsing happens before any numeric work; the reconstruction engine only
//! ever sees [`AxisRequest`] values.

pub mod expr;

use std::fmt;
use std::str::FromStr;

use crate::util::{Error, Result};

/// Keyword of an `axis=axis_data` request.
pub const AXIS_DATA_KEYWORD: &str = "axis_data";

/// Representation of an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Modifier {
    /// Full declared range (whole support for pattern axes).
    #[default]
    None,
    /// Smallest stored block of a periodic axis.
    SmallestPeriod,
    /// One period; for anti-periodic axes the block and its negation.
    OnePeriod,
    /// The half-period preceding negation.
    AntiPeriod,
    /// Unique values of a pattern axis.
    Pattern,
}

impl Modifier {
    /// Keyword used in request strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SmallestPeriod => "smallestperiod",
            Self::OnePeriod => "oneperiod",
            Self::AntiPeriod => "antiperiod",
            Self::Pattern => "pattern",
        }
    }
}

impl FromStr for Modifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "smallestperiod" => Ok(Self::SmallestPeriod),
            "oneperiod" => Ok(Self::OnePeriod),
            "antiperiod" => Ok(Self::AntiPeriod),
            "pattern" => Ok(Self::Pattern),
            "" | "none" => Ok(Self::None),
            other => Err(Error::parse(s, format!("unknown modifier '{other}'"))),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to produce along one axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// A (possibly reduced) representation of the axis.
    Modifier(Modifier),
    /// Full-range coordinates `v` with `lower <= v < upper`.
    Range { lower: f64, upper: f64 },
    /// Targets supplied out of band, resolved by the field accessor.
    AxisData,
    /// Resample onto these coordinates.
    Targets(Vec<f64>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Modifier(Modifier::None)
    }
}

/// A structured request against one axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRequest {
    pub axis_name: String,
    pub selection: Selection,
}

impl AxisRequest {
    /// Full reconstruction of `axis_name`.
    pub fn full(axis_name: impl Into<String>) -> Self {
        Self { axis_name: axis_name.into(), selection: Selection::default() }
    }

    pub fn with_modifier(axis_name: impl Into<String>, modifier: Modifier) -> Self {
        Self { axis_name: axis_name.into(), selection: Selection::Modifier(modifier) }
    }

    pub fn range(axis_name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self { axis_name: axis_name.into(), selection: Selection::Range { lower, upper } }
    }

    pub fn targets(axis_name: impl Into<String>, targets: Vec<f64>) -> Self {
        Self { axis_name: axis_name.into(), selection: Selection::Targets(targets) }
    }

    /// Parse a request string.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();

        if let Some((name, rhs)) = text.split_once('=') {
            let axis_name = parse_name(input, name)?;
            let rhs = rhs.trim();
            if rhs == AXIS_DATA_KEYWORD {
                return Ok(Self { axis_name, selection: Selection::AxisData });
            }
            let inner = rhs
                .strip_prefix('[')
                .and_then(|r| r.strip_suffix(']'))
                .ok_or_else(|| {
                    Error::parse(input, "expected '[lower,upper]' or 'axis_data' after '='")
                })?;
            let (lo, hi) =
                split_bounds(inner).ok_or_else(|| Error::parse(input, "expected two bounds"))?;
            let lower = expr::eval(lo)?;
            let upper = expr::eval(hi)?;
            if lower > upper {
                let msg = format!("lower bound {lower} exceeds upper bound {upper}");
                return Err(Error::parse(input, msg));
            }
            return Ok(Self::range(axis_name, lower, upper));
        }

        if let Some((name, rest)) = text.split_once('[') {
            let axis_name = parse_name(input, name)?;
            let keyword = rest
                .strip_suffix(']')
                .ok_or_else(|| Error::parse(input, "missing ']'"))?;
            let modifier = keyword.parse::<Modifier>().map_err(|_| {
                Error::parse(input, format!("unknown modifier '{}'", keyword.trim()))
            })?;
            return Ok(Self::with_modifier(axis_name, modifier));
        }

        Ok(Self::full(parse_name(input, text)?))
    }
}

impl FromStr for AxisRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AxisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selection {
            Selection::Modifier(Modifier::None) => write!(f, "{}", self.axis_name),
            Selection::Modifier(m) => write!(f, "{}[{}]", self.axis_name, m),
            Selection::Range { lower, upper } => {
                write!(f, "{}=[{},{}]", self.axis_name, lower, upper)
            }
            Selection::AxisData | Selection::Targets(_) => {
                write!(f, "{}={}", self.axis_name, AXIS_DATA_KEYWORD)
            }
        }
    }
}

fn parse_name(input: &str, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::parse(input, "missing axis name"));
    }
    let allowed = |c: &char| c.is_alphanumeric() || matches!(*c, '_' | '-' | '.');
    if let Some(c) = name.chars().find(|c| !allowed(c)) {
        return Err(Error::parse(input, format!("invalid character '{c}' in axis name")));
    }
    Ok(name.to_string())
}

/// Split `a,b` at the single top-level comma.
fn split_bounds(inner: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    let mut split = None;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                if split.is_some() {
                    return None;
                }
                split = Some(i);
            }
            _ => {}
        }
    }
    split.map(|i| (&inner[..i], &inner[i + 1..]))
}
