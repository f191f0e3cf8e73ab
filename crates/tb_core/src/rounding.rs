//! Integer-first quantization helpers (hundredths fixed point, no floats).
//!
//! Whole-percent weights make every ideal share an exact multiple of one
//! hundredth of a currency unit, so `i128` hundredths replace rational
//! arithmetic without losing exactness.

/// Exact ideal share of `pool` at `weight_pct` percent, in hundredths:
/// `pool * weight_pct` (the share itself is `pool * weight_pct / 100`).
#[inline]
pub fn percent_share_hundredths(pool: u64, weight_pct: u32) -> i128 {
    (pool as i128) * (weight_pct as i128)
}

/// Quantize a non-negative hundredths value to the nearest multiple of
/// `step` whole units. Exact halves round up. Returns 0 when `step == 0`
/// (quantization undefined) or the input is not positive.
#[inline]
pub fn round_to_step(ideal_hundredths: i128, step: u64) -> u64 {
    if step == 0 || ideal_hundredths <= 0 {
        return 0;
    }
    let d = 100i128 * step as i128;
    let q = (ideal_hundredths + d / 2) / d;
    let amount = q * step as i128;
    if amount >= u64::MAX as i128 {
        u64::MAX
    } else {
        amount as u64
    }
}

/// Signed rounding difference in hundredths: ideal minus the current
/// quantized amount. Positive means under-allocated.
#[inline]
pub fn diff_hundredths(ideal_hundredths: i128, current: u64) -> i128 {
    ideal_hundredths - 100i128 * current as i128
}
