//! Reshape descriptors
//!
//! A descriptor is a comma-separated list such as `(-1,3,:,:)`:
//! - `:` keeps the extent of the corresponding current axis
//! - `-1` is inferred from the total element count (at most once)
//! - a non-negative integer is used as-is
//!
//! Enclosing parentheses and spaces are optional. Tokens are matched to the
//! current shape from the right, so the last token corresponds to the last axis.

use crate::errors::{Result, VolProcError};
use std::fmt;
use std::str::FromStr;

/// One entry of a reshape descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeToken {
    /// `:`
    Keep,
    /// `-1`
    Infer,
    /// An explicit extent
    Literal(usize),
}

impl fmt::Display for ShapeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => f.write_str(":"),
            Self::Infer => f.write_str("-1"),
            Self::Literal(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for ShapeToken {
    type Err = VolProcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(VolProcError::shape_spec("empty dimension entry")),
            ":" => Ok(Self::Keep),
            "-1" => Ok(Self::Infer),
            _ => s.parse::<usize>().map(Self::Literal).map_err(|_| {
                VolProcError::shape_spec(format!(
                    "'{s}' is not ':', '-1' or a non-negative integer"
                ))
            }),
        }
    }
}

/// A parsed reshape descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSpec {
    tokens: Vec<ShapeToken>,
}

impl ShapeSpec {
    /// Create a descriptor from already parsed tokens
    pub fn new(tokens: Vec<ShapeToken>) -> Self {
        Self { tokens }
    }

    /// Tokens in axis order
    pub fn tokens(&self) -> &[ShapeToken] {
        &self.tokens
    }

    /// Number of axes of the reshaped volume
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for a parsed descriptor
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// For each reshaped axis, the current axis a `:` keeps, or `None`.
    ///
    /// Uses the same right alignment as [`ShapeSpec::resolve`]; call it only
    /// after `resolve` succeeded for a volume with `ndim` axes.
    pub fn kept_axes(&self, ndim: usize) -> Vec<Option<usize>> {
        let lead = self.tokens.len().saturating_sub(ndim);
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, token)| match token {
                ShapeToken::Keep if i >= lead => Some(i + ndim - self.tokens.len()),
                _ => None,
            })
            .collect()
    }

    /// Resolves the descriptor against the current shape of a volume.
    ///
    /// # Errors
    ///
    /// Returns [`VolProcError::InvalidShapeSpec`] if:
    /// - a `:` has no corresponding current axis
    /// - `-1` appears more than once
    /// - the resolved extents cannot hold exactly the current element count
    pub fn resolve(&self, current: &[usize]) -> Result<Vec<usize>> {
        let total: usize = current.iter().product();
        let lead = self.tokens.len().saturating_sub(current.len());

        let mut resolved = Vec::with_capacity(self.tokens.len());
        let mut infer_at = None;

        for (i, token) in self.tokens.iter().enumerate() {
            match *token {
                ShapeToken::Literal(n) => resolved.push(n),
                ShapeToken::Keep => {
                    if i < lead {
                        return Err(VolProcError::shape_spec(format!(
                            "':' at position {i} has no matching axis in a {}-dimensional volume",
                            current.len()
                        )));
                    }
                    resolved.push(current[i + current.len() - self.tokens.len()]);
                }
                ShapeToken::Infer => {
                    if infer_at.replace(i).is_some() {
                        return Err(VolProcError::shape_spec("only one '-1' entry is allowed"));
                    }
                    resolved.push(1);
                }
            }
        }

        let known: usize = resolved.iter().product();
        match infer_at {
            Some(i) => {
                if known == 0 || total % known != 0 {
                    return Err(VolProcError::shape_spec(format!(
                        "{total} elements cannot be divided into {self} (known extents multiply to {known})"
                    )));
                }
                resolved[i] = total / known;
            }
            None if known != total => {
                return Err(VolProcError::shape_spec(format!(
                    "{self} holds {known} elements but the volume has {total}"
                )));
            }
            None => {}
        }

        Ok(resolved)
    }
}

impl fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.tokens.iter().map(ToString::to_string).collect();
        write!(f, "({})", parts.join(","))
    }
}

impl FromStr for ShapeSpec {
    type Err = VolProcError;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let inner = match (compact.strip_prefix('('), compact.ends_with(')')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => compact.as_str(),
            _ => return Err(VolProcError::shape_spec("unbalanced parentheses")),
        };

        if inner.is_empty() {
            return Err(VolProcError::shape_spec("no dimensions given"));
        }

        let tokens = inner
            .split(',')
            .map(str::parse)
            .collect::<Result<Vec<ShapeToken>>>()?;

        Ok(Self { tokens })
    }
}
