use std::fmt::{self, Display};
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SelectError;

///
/// What gets blocked once a window is accepted: the whole neighbourhood
/// around it, or only the window itself.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkingPolicy {
    #[default]
    FullWindow,
    SingleIndex,
}

///
/// Which neighbours of index `i` a window span `w` covers:
/// `HalfOpen` is `[i - w, i + w)`, `Closed` is `[i - w, i + w]`.
/// Both are clipped to the vector.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowBounds {
    #[default]
    HalfOpen,
    Closed,
}

impl FromStr for MarkingPolicy {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "full-window" => Ok(MarkingPolicy::FullWindow),
            "single" | "single-index" => Ok(MarkingPolicy::SingleIndex),
            _ => Err(SelectError::UnknownVariant {
                kind: "marking policy",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for WindowBounds {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "half-open" | "halfopen" => Ok(WindowBounds::HalfOpen),
            "closed" => Ok(WindowBounds::Closed),
            _ => Err(SelectError::UnknownVariant {
                kind: "window bounds",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for MarkingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkingPolicy::FullWindow => write!(f, "full"),
            MarkingPolicy::SingleIndex => write!(f, "single"),
        }
    }
}

impl Display for WindowBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowBounds::HalfOpen => write!(f, "half-open"),
            WindowBounds::Closed => write!(f, "closed"),
        }
    }
}

///
/// One flag per window, set once the window or a close neighbour has been
/// accepted. Flags are only ever set, never cleared.
///
#[derive(Debug, Clone)]
pub struct OccupancyVector {
    slots: Vec<bool>,
    bounds: WindowBounds,
}

impl OccupancyVector {
    pub fn new(len: usize, bounds: WindowBounds) -> Self {
        OccupancyVector {
            slots: vec![false; len],
            bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    ///
    /// The clipped neighbourhood of `index` for a given span
    ///
    pub fn window(&self, index: usize, span: usize) -> Range<usize> {
        let n = self.slots.len();
        let reach = match self.bounds {
            WindowBounds::HalfOpen => span,
            WindowBounds::Closed => span.saturating_add(1),
        };
        let lo = index.saturating_sub(span).min(n);
        let hi = index.saturating_add(reach).min(n);
        lo..hi.max(lo)
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.slots.get(index).copied().unwrap_or(false)
    }

    /// Is any slot in the neighbourhood of `index` already taken?
    pub fn any_occupied(&self, index: usize, span: usize) -> bool {
        self.slots[self.window(index, span)].iter().any(|&s| s)
    }

    pub fn mark_window(&mut self, index: usize, span: usize) {
        let window = self.window(index, span);
        self.slots[window].fill(true);
    }

    pub fn mark_index(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = true;
        }
    }

    pub fn mark(&mut self, index: usize, span: usize, policy: MarkingPolicy) {
        match policy {
            MarkingPolicy::FullWindow => self.mark_window(index, span),
            MarkingPolicy::SingleIndex => self.mark_index(index),
        }
    }

    pub fn count_occupied(&self) -> usize {
        self.slots.iter().filter(|&&s| s).count()
    }
}
