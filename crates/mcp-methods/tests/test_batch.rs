//! Batch driver: burn-in, cancellation and raw sequences.

use approx::assert_abs_diff_eq;
use mcp_core::{Error, Real};
use mcp_math::{low_discrepancy, LowDiscrepancy, VariateSource};
use mcp_methods::{
    BatchDriver, BatchOutcome, CancelWhen, KnockOut, NeverCancel, PathGenerator,
    RandomSequenceGenerator,
};
use mcp_processes::{black_scholes_process, StochasticProcess1D};
use mcp_termstructures::{BlackConstantVol, FlatForward};
use mcp_time::{Actual365Fixed, Date};
use ndarray::{s, Array2};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const STEPS: usize = 8;
const SENTINEL: Real = -1.0;

fn process() -> Arc<dyn StochasticProcess1D> {
    let today = Date::from_ymd(2020, 2, 24).unwrap();
    Arc::new(black_scholes_process(
        1.0,
        Arc::new(FlatForward::new(today, 0.01, Arc::new(Actual365Fixed))),
        Arc::new(BlackConstantVol::new(today, 0.25, Arc::new(Actual365Fixed))),
    ))
}

fn generator() -> PathGenerator<LowDiscrepancy> {
    PathGenerator::new(process(), 0.5, STEPS, low_discrepancy(STEPS, 42).unwrap(), true).unwrap()
}

fn sentinel(rows: usize) -> Array2<Real> {
    Array2::from_elem((rows, STEPS + 1), SENTINEL)
}

#[test]
fn skip_discards_leading_draws() {
    let (paths, skip) = (50, 17);
    let mut skipped = sentinel(paths);
    let none = KnockOut::none();
    BatchDriver::new(skip)
        .generate_batch(&mut generator(), &none, skipped.view_mut(), paths, &NeverCancel)
        .unwrap();

    let mut full = sentinel(paths + skip);
    BatchDriver::default()
        .generate_batch(
            &mut generator(),
            &KnockOut::none(),
            full.view_mut(),
            paths + skip,
            &NeverCancel,
        )
        .unwrap();
    assert_eq!(skipped, full.slice(s![skip.., ..]));
}

#[test]
fn cancellation_returns_the_rows_made() {
    let (paths, stop_at) = (40, 13);
    let polls = Cell::new(0usize);
    let cancel = CancelWhen(|| {
        let n = polls.get();
        polls.set(n + 1);
        n >= stop_at
    });
    let mut partial = sentinel(paths);
    let outcome = BatchDriver::default()
        .with_check_interval(1)
        .generate_batch(&mut generator(), &KnockOut::none(), partial.view_mut(), paths, &cancel)
        .unwrap();
    assert_eq!(
        outcome,
        BatchOutcome {
            rows: stop_at,
            cancelled: true
        }
    );

    let mut full = sentinel(paths);
    BatchDriver::default()
        .generate_batch(&mut generator(), &KnockOut::none(), full.view_mut(), paths, &NeverCancel)
        .unwrap();
    assert_eq!(partial.slice(s![..stop_at, ..]), full.slice(s![..stop_at, ..]));
    assert!(partial.slice(s![stop_at.., ..]).iter().all(|&x| x == SENTINEL));
}

#[test]
fn cancellation_is_polled_at_the_cadence() {
    let polls = Cell::new(0usize);
    let cancel = CancelWhen(|| {
        polls.set(polls.get() + 1);
        false
    });
    let mut out = sentinel(25);
    BatchDriver::default()
        .with_check_interval(10)
        .generate_batch(&mut generator(), &KnockOut::none(), out.view_mut(), 25, &cancel)
        .unwrap();
    // Rows 0, 10 and 20.
    assert_eq!(polls.get(), 3);
}

#[test]
fn preset_flag_stops_before_the_first_row() {
    let flag = Arc::new(AtomicBool::new(true));
    let mut out = sentinel(5);
    let outcome = BatchDriver::default()
        .generate_batch(&mut generator(), &KnockOut::none(), out.view_mut(), 5, &flag)
        .unwrap();
    assert_eq!(outcome.rows, 0);
    assert!(outcome.cancelled);
    assert!(out.iter().all(|&x| x == SENTINEL));

    flag.store(false, Ordering::SeqCst);
    let outcome = BatchDriver::default()
        .generate_batch(&mut generator(), &KnockOut::none(), out.view_mut(), 5, &flag)
        .unwrap();
    assert_eq!(outcome.rows, 5);
}

#[test]
fn rows_beyond_the_path_count_are_untouched() {
    let mut out = sentinel(10);
    BatchDriver::default()
        .generate_batch(&mut generator(), &KnockOut::none(), out.view_mut(), 6, &NeverCancel)
        .unwrap();
    assert!(out.slice(s![..6, ..]).iter().all(|&x| x != SENTINEL));
    assert!(out.slice(s![6.., ..]).iter().all(|&x| x == SENTINEL));
}

#[test]
fn badly_shaped_buffers_are_rejected() {
    let mut narrow = Array2::zeros((10, STEPS));
    let err = BatchDriver::default()
        .generate_batch(&mut generator(), &KnockOut::none(), narrow.view_mut(), 10, &NeverCancel)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let mut short = sentinel(3);
    let err = BatchDriver::default()
        .generate_batch(&mut generator(), &KnockOut::none(), short.view_mut(), 4, &NeverCancel)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn raw_batch_writes_bridged_shocks() {
    let paths = 32;
    let horizon = 2.0;
    let mut gen =
        RandomSequenceGenerator::new(horizon, STEPS, low_discrepancy(STEPS, 42).unwrap(), true)
            .unwrap();
    let mut out = sentinel(paths);
    let outcome = BatchDriver::new(3)
        .generate_raw_batch(&mut gen, out.view_mut(), paths, &NeverCancel)
        .unwrap();
    assert_eq!(outcome.rows, paths);

    let mut reference = low_discrepancy(STEPS, 42).unwrap();
    for _ in 0..3 {
        reference.next_sequence();
    }
    let sqrt_dt = (horizon / STEPS as Real).sqrt();
    for row in out.rows() {
        assert_eq!(row[0], SENTINEL);
        let terminal: Real = row.iter().skip(1).map(|x| x * sqrt_dt).sum();
        let z = reference.next_sequence().value[0];
        assert_abs_diff_eq!(terminal, horizon.sqrt() * z, epsilon = 1e-12);
    }
}

#[test]
fn raw_batch_without_bridge_copies_the_source() {
    let paths = 16;
    let mut gen =
        RandomSequenceGenerator::new(1.0, STEPS, low_discrepancy(STEPS, 7).unwrap(), false)
            .unwrap();
    let mut out = sentinel(paths);
    BatchDriver::default()
        .generate_raw_batch(&mut gen, out.view_mut(), paths, &NeverCancel)
        .unwrap();
    let mut reference = low_discrepancy(STEPS, 7).unwrap();
    for row in out.rows() {
        let expected = &reference.next_sequence().value;
        assert_eq!(row.slice(s![1..]).to_vec(), *expected);
    }
}
