//! `YieldTermStructure` — yield / interest-rate term structures.
//!
//! Any yield curve provides three related quantities, all continuously
//! compounded:
//!
//! * **discount factor** — `P(0,t)`
//! * **zero rate** — `z(t) = -ln P(0,t) / t`
//! * **forward rate** — `f(t1,t2) = ln(P(0,t1) / P(0,t2)) / (t2 - t1)`

use crate::term_structure::TermStructure;
use mcp_core::{DiscountFactor, Rate, Time};
use mcp_time::Date;

/// Small time step used for instantaneous forward rate computations.
const DT: Time = 1.0e-4;

/// A yield (interest-rate) term structure.
///
/// Implementors must provide at least one of
/// [`discount_impl`](YieldTermStructure::discount_impl) and
/// [`zero_rate_impl`](YieldTermStructure::zero_rate_impl); the other is
/// derived from it.
pub trait YieldTermStructure: TermStructure {
    // ── Low-level impl hooks ─────────────────────────────────────────────

    /// Return the discount factor for a given time `t`.
    ///
    /// Default: computed from `zero_rate_impl`.
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t == 0.0 {
            return 1.0;
        }
        (-self.zero_rate_impl(t) * t).exp()
    }

    /// Return the continuously-compounded zero rate for time `t`.
    ///
    /// Default: computed from `discount_impl`, with the instantaneous
    /// forward as the limit at `t = 0`.
    fn zero_rate_impl(&self, t: Time) -> Rate {
        if t == 0.0 {
            return self.forward_rate(0.0, 0.0);
        }
        -self.discount_impl(t).ln() / t
    }

    // ── Public interface ─────────────────────────────────────────────────

    /// Discount factor for a time.
    fn discount(&self, t: Time) -> DiscountFactor {
        self.discount_impl(t)
    }

    /// Discount factor for a date.
    fn discount_date(&self, date: Date) -> DiscountFactor {
        self.discount_impl(self.time_from_reference(date))
    }

    /// Continuously-compounded zero rate for time `t`.
    fn zero_rate(&self, t: Time) -> Rate {
        self.zero_rate_impl(t)
    }

    /// Continuously-compounded forward rate between `t1` and `t2`.
    ///
    /// When `t1 == t2` the instantaneous forward at `t1` is returned.
    fn forward_rate(&self, t1: Time, t2: Time) -> Rate {
        let (t1, t2) = if t2 == t1 {
            ((t1 - 0.5 * DT).max(0.0), t1 + 0.5 * DT)
        } else {
            (t1, t2)
        };
        (self.discount_impl(t1) / self.discount_impl(t2)).ln() / (t2 - t1)
    }
}
