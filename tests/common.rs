/// Shared helpers for integration tests.
use sincfir::signal::{sinusoids, symmetric_time};

#[allow(unused)]
/// Mixture of sinusoids at 0.01, 0.1 and 0.4 × Nyquist (amplitudes 1, 0.1,
/// 0.05) on a symmetric 1001-point axis, so the mean is zero.
pub fn three_tone_signal() -> Vec<f64> {
    let t = symmetric_time(1001);
    sinusoids(&[0.01, 0.1, 0.4], &[1.0, 0.1, 0.05], &t).unwrap()
}

#[allow(unused)]
/// Deterministic pseudo-random signal (LCG), values in [-1, 1).
pub fn lcg_signal(n: usize, seed: u64) -> Vec<f64> {
    let mut s = seed;
    (0..n)
        .map(|_| {
            s = s.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (s >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
        })
        .collect()
}

#[allow(unused)]
/// Maximum absolute difference between two sequences.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0_f64, f64::max)
}

#[allow(unused)]
/// Elementwise sum.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
}
