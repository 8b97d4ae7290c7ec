//! `FlatForward` — a yield term structure with a constant forward rate.
//!
//! This is the simplest possible yield curve: a constant continuously-compounded
//! rate that applies for all maturities.

use crate::term_structure::{TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use mcp_core::{DiscountFactor, Rate, Time};
use mcp_time::{Date, DayCounter};
use std::sync::Arc;

/// A flat (constant) forward-rate yield term structure.
///
/// Discount factors are `P(t) = exp(-r * t)`.
#[derive(Debug, Clone)]
pub struct FlatForward {
    data: TermStructureData,
    rate: Rate,
}

impl FlatForward {
    /// Create a flat curve with the continuously-compounded rate `rate`.
    pub fn new(reference_date: Date, rate: Rate, day_counter: Arc<dyn DayCounter>) -> Self {
        Self {
            data: TermStructureData::new(reference_date, day_counter),
            rate,
        }
    }

    /// The continuously-compounded flat rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }
}

impl TermStructure for FlatForward {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.data.day_counter
    }
}

impl YieldTermStructure for FlatForward {
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        (-self.rate * t).exp()
    }

    fn zero_rate_impl(&self, _t: Time) -> Rate {
        self.rate
    }

    fn forward_rate(&self, _t1: Time, _t2: Time) -> Rate {
        self.rate
    }
}
