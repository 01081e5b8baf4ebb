//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use num_bigint::BigUint;
use zerocoin::{AccumulatorParams, IntegerGroupParams, Params};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Only logs from this crate are shown. Subsequent calls are safe and will be ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("zerocoin=trace");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Quadratic-residue subgroup of order 509 modulo the safe prime 1019.
pub fn small_group() -> IntegerGroupParams {
    IntegerGroupParams::new(
        BigUint::from(4u32),
        BigUint::from(9u32),
        BigUint::from(1019u32),
        BigUint::from(509u32),
    )
    .expect("small group is well formed")
}

/// Shared params over [`small_group`] with the given bounds and rounds.
pub fn params_with(min: u32, max: u32, zkp_iterations: u32) -> Arc<Params> {
    let bounds = AccumulatorParams::new(BigUint::from(min), BigUint::from(max))
        .expect("bounds are ordered");
    Arc::new(Params::new(small_group(), bounds, zkp_iterations).expect("params are valid"))
}

/// The reference configuration: min 100, max 1000, 20 rounds.
pub fn test_params() -> Arc<Params> {
    params_with(100, 1000, 20)
}
