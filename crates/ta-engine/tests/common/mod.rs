//! Shared test utilities for ta-engine tests.
//!
//! Deterministic data generators, comparison helpers and an opt-in tracing
//! subscriber (`RUST_LOG=ta_engine=debug cargo test`).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[allow(unused_imports)]
pub use ta_engine::{approx_eq, EPSILON};

/// Installs a test-writer subscriber once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Compares two indicator outputs sample by sample, panicking with the index.
#[allow(dead_code)]
pub fn assert_outputs_eq(actual: &[Option<f64>], expected: &[Option<f64>], eps: f64, label: &str) {
    assert_eq!(actual.len(), expected.len(), "{label}: length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            ta_engine::approx_eq_opt(*a, *e, eps),
            "{label}[{i}]: expected {e:?}, got {a:?}"
        );
    }
}

/// Random-walk price series, identical for identical seeds.
#[allow(dead_code)]
pub fn random_walk(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut price = 100.0_f64;
    (0..n)
        .map(|_| {
            price = (price * (1.0 + rng.gen_range(-0.02..0.02))).max(1.0);
            price
        })
        .collect()
}

/// Consistent OHLCV bars: `low <= close <= high`, positive volume.
#[allow(dead_code)]
pub fn random_ohlcv(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    let close = random_walk(n, seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut high = Vec::with_capacity(n);
    let mut low = Vec::with_capacity(n);
    let mut volume = Vec::with_capacity(n);
    for &c in &close {
        high.push(c * (1.0 + rng.gen_range(0.0..0.01)));
        low.push(c * (1.0 - rng.gen_range(0.0..0.01)));
        volume.push(rng.gen_range(1_000.0..100_000.0));
    }
    (high, low, close, volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_walk_is_deterministic() {
        assert_eq!(random_walk(50, 7), random_walk(50, 7));
        assert_ne!(random_walk(50, 7), random_walk(50, 8));
    }

    #[test]
    fn test_random_ohlcv_is_consistent() {
        let (high, low, close, volume) = random_ohlcv(100, 3);
        for i in 0..100 {
            assert!(low[i] <= close[i] && close[i] <= high[i]);
            assert!(volume[i] > 0.0);
        }
    }
}
