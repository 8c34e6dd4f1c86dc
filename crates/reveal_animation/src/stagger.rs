//! Staggered reveals
//!
//! When a binding applies to each child of a region, child `i` starts
//! `delay_for_index(i)` milliseconds after the parent fires.

use serde::{Deserialize, Serialize};

/// Order in which children receive their delay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerDirection {
    /// First child starts first
    #[default]
    Forward,
    /// Last child starts first
    Reverse,
    /// Center child starts first, spreading outward
    FromCenter,
}

/// Per-child delay configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaggerConfig {
    /// Delay between consecutive children (ms)
    pub delay_ms: u32,
    #[serde(default)]
    pub direction: StaggerDirection,
    /// Children past this index share the limit's delay
    #[serde(default)]
    pub limit: Option<usize>,
}

impl StaggerConfig {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Delay for child `index` out of `total` children
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let rank = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => index.abs_diff(total / 2),
        };

        let rank = self.limit.map_or(rank, |limit| rank.min(limit));
        self.delay_ms.saturating_mul(rank as u32)
    }
}
