//! Knock-out barrier policy.
//!
//! A row stops at step `i` when
//!
//! * the up barrier is observed at `i` and the value is `>= up(i)`, or
//! * the down barrier is observed at `i` and the value is `< down(i)`.
//!
//! Each side is independently absent, constant or time-varying. An absent
//! side never reads its level or observation data. When both sides fire on
//! the same step the row stops at that step either way; the up side is
//! evaluated first.

use mcp_core::{ensure_arg, errors::Result, Real};
use std::fmt;

/// Threshold of one barrier side.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BarrierLevel {
    /// No barrier on this side.
    #[default]
    Absent,
    /// The same level at every grid point.
    Constant(Real),
    /// One level per grid point.
    TimeVarying(Vec<Real>),
}

impl BarrierLevel {
    #[inline]
    fn at(&self, i: usize) -> Option<Real> {
        match self {
            BarrierLevel::Absent => None,
            BarrierLevel::Constant(level) => Some(*level),
            BarrierLevel::TimeVarying(levels) => Some(levels[i]),
        }
    }
}

/// One side of a knock-out: its level and its observation schedule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarrierSide {
    level: BarrierLevel,
    observed: Vec<bool>,
}

impl BarrierSide {
    /// A side with the given level, checked at the grid points where
    /// `observed` is true.
    pub fn new(level: BarrierLevel, observed: Vec<bool>) -> Self {
        Self { level, observed }
    }

    /// No barrier.
    pub fn absent() -> Self {
        Self::default()
    }

    /// A constant barrier.
    pub fn constant(level: Real, observed: Vec<bool>) -> Self {
        Self::new(BarrierLevel::Constant(level), observed)
    }

    /// A barrier with one level per grid point.
    pub fn time_varying(levels: Vec<Real>, observed: Vec<bool>) -> Self {
        Self::new(BarrierLevel::TimeVarying(levels), observed)
    }

    /// The barrier level.
    pub fn level(&self) -> &BarrierLevel {
        &self.level
    }

    /// The observation schedule.
    pub fn observed(&self) -> &[bool] {
        &self.observed
    }

    /// Whether the side is present.
    pub fn is_active(&self) -> bool {
        !matches!(self.level, BarrierLevel::Absent)
    }

    #[inline]
    fn breached_above(&self, i: usize, value: Real) -> bool {
        match self.level.at(i) {
            Some(level) => self.observed[i] && value >= level,
            None => false,
        }
    }

    #[inline]
    fn breached_below(&self, i: usize, value: Real) -> bool {
        match self.level.at(i) {
            Some(level) => self.observed[i] && value < level,
            None => false,
        }
    }

    fn validate(&self, points: usize, side: &str) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        ensure_arg!(
            self.observed.len() >= points,
            "{side} barrier observation schedule has {} entries, need {points}",
            self.observed.len()
        );
        if let BarrierLevel::TimeVarying(levels) = &self.level {
            ensure_arg!(
                levels.len() >= points,
                "{side} barrier has {} levels, need {points}",
                levels.len()
            );
        }
        Ok(())
    }
}

/// Which sides of a [`KnockOut`] are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStrategy {
    /// No barrier: every row is written in full.
    Plain,
    /// Up-and-out only.
    UpOut,
    /// Down-and-out only.
    DownOut,
    /// Both sides.
    DualOut,
}

impl fmt::Display for WriteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteStrategy::Plain => "plain",
            WriteStrategy::UpOut => "up-out",
            WriteStrategy::DownOut => "down-out",
            WriteStrategy::DualOut => "dual-out",
        };
        f.write_str(name)
    }
}

/// An up-and-out / down-and-out stop rule applied after every step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KnockOut {
    up: BarrierSide,
    down: BarrierSide,
}

impl KnockOut {
    /// A knock-out with both sides given.
    pub fn new(up: BarrierSide, down: BarrierSide) -> Self {
        Self { up, down }
    }

    /// No barrier at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Up-and-out only.
    pub fn up_and_out(up: BarrierSide) -> Self {
        Self::new(up, BarrierSide::absent())
    }

    /// Down-and-out only.
    pub fn down_and_out(down: BarrierSide) -> Self {
        Self::new(BarrierSide::absent(), down)
    }

    /// The up side.
    pub fn up(&self) -> &BarrierSide {
        &self.up
    }

    /// The down side.
    pub fn down(&self) -> &BarrierSide {
        &self.down
    }

    /// The write strategy implied by the active sides.
    pub fn strategy(&self) -> WriteStrategy {
        match (self.up.is_active(), self.down.is_active()) {
            (false, false) => WriteStrategy::Plain,
            (true, false) => WriteStrategy::UpOut,
            (false, true) => WriteStrategy::DownOut,
            (true, true) => WriteStrategy::DualOut,
        }
    }

    /// Check that every active side covers a grid of `points` points.
    pub fn validate(&self, points: usize) -> Result<()> {
        self.up.validate(points, "up")?;
        self.down.validate(points, "down")
    }

    /// Whether a row whose value at grid point `i` is `value` stops there.
    ///
    /// `i` must be below the point count passed to
    /// [`validate`](Self::validate).
    #[inline]
    pub fn breached(&self, i: usize, value: Real) -> bool {
        self.up.breached_above(i, value) || self.down.breached_below(i, value)
    }
}
