//! Bias-corrected estimators of a conjunction's reward rate.
//!
//! `r` is the followed-count, `n` the satisfied-count. Both estimators converge
//! to `r / n` as `n` grows; merit is pessimistic for small `n`, demerit optimistic.

/// M(r, n) = (r/n)·max(0.2, 1 − 1.175/n), with M(r, 0) = 1.
pub fn merit(r: u64, n: u64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let n = n as f64;
    (r as f64 / n) * (1.0 - 1.175 / n).max(0.2)
}

/// D(r, n) = min(1, r/n + (n − r)/(0.7·n²)), with D(r, 0) = 1.
pub fn demerit(r: u64, n: u64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let (rf, nf) = (r as f64, n as f64);
    (rf / nf + (nf - rf) / (0.7 * nf * nf)).min(1.0)
}
