//! Quantized prize-pool distribution across weighted categories.
//!
//! Contract:
//! - Every registry id appears in the output; disabled or zero-weight
//!   categories map to 0.
//! - Amounts are non-negative multiples of `step` and sum to `total_pool`
//!   exactly whenever `total_pool` is itself a multiple of `step` and at
//!   least one enabled category has positive weight.
//! - Weights are direct percentages of the pool; they are **not**
//!   renormalized over the enabled subset. Shortfall or excess left by
//!   rounding is moved in `step` units by the correction passes below.
//! - Total function: zero pool, zero step, or no funded categories yield
//!   an all-zero mapping. No error path.
//!
//! Three passes:
//! 1. Quantize each ideal share to the nearest multiple of `step`
//!    (exact hundredths arithmetic, halves round up).
//! 2. Move `ceil(|discrepancy| / step)` single-step corrections, re-ranking
//!    the working set before each one (rounding difference, then priority
//!    rank, then display order; inverted keys when reducing, and only
//!    entries holding at least one step are reduced).
//! 3. A residual sweep bounded by twice the working-set size that ignores
//!    rounding differences (priority rank, then display order). An
//!    uncorrectable residual (pool not a multiple of `step`) survives the
//!    sweep and is reported, not hidden.
//!
//! Determinism: no RNG here; ranking ties fall back to the working-set
//! order, which starts at registry order and is preserved by stable sorts.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use tb_core::entities::{PrizeCategory, PrizeRegistry};
use tb_core::rounding::{diff_hundredths, percent_share_hundredths, round_to_step};
use tb_core::tokens::CategoryId;

/// Working entry for one funded category.
struct ShareState<'a> {
    category: &'a PrizeCategory,
    /// Running allocation; always a non-negative multiple of the step.
    current: u64,
    /// Ideal share minus `current`, in hundredths. Positive = under-allocated.
    diff: i128,
}

impl ShareState<'_> {
    #[inline]
    fn rank(&self) -> u8 {
        self.category.priority.sort_rank()
    }

    #[inline]
    fn display_order(&self) -> u32 {
        self.category.display_order
    }
}

/// Distribute `total_pool` across the registry in multiples of `step`.
pub fn distribute_prize_pool(
    total_pool: u64,
    step: u64,
    registry: &PrizeRegistry,
) -> BTreeMap<CategoryId, u64> {
    let mut out: BTreeMap<CategoryId, u64> = registry
        .categories()
        .iter()
        .map(|c| (c.id.clone(), 0u64))
        .collect();

    if total_pool == 0 || step == 0 {
        return out;
    }

    let funded: Vec<&PrizeCategory> = registry
        .categories()
        .iter()
        .filter(|c| c.is_funded())
        .collect();
    if funded.is_empty() {
        return out;
    }

    let mut shares = quantize_shares(total_pool, step, &funded);

    let sum: u128 = shares.iter().map(|s| s.current as u128).sum();
    let mut discrepancy: i128 = total_pool as i128 - sum as i128;
    run_correction_cycles(&mut shares, &mut discrepancy, step);

    // Recompute rather than trusting the running value.
    let final_sum: u128 = shares.iter().map(|s| s.current as u128).sum();
    let residual = total_pool as i128 - final_sum as i128;
    run_residual_sweep(&mut shares, residual, step);

    for s in &shares {
        out.insert(s.category.id.clone(), s.current);
    }

    debug_assert!(
        total_pool % step != 0 || distribution_residual(total_pool, &out) == 0,
        "step-aligned pool must distribute exactly"
    );
    out
}

/// Signed undistributed remainder: `total_pool` minus the payout sum.
/// Nonzero only when the pool is not a multiple of the step (or nothing
/// was fundable).
pub fn distribution_residual(total_pool: u64, payouts: &BTreeMap<CategoryId, u64>) -> i128 {
    let sum: u128 = payouts.values().map(|&v| v as u128).sum();
    total_pool as i128 - sum as i128
}

/// Pass 1: nearest-step quantization of each ideal share.
fn quantize_shares<'a>(
    total_pool: u64,
    step: u64,
    funded: &[&'a PrizeCategory],
) -> Vec<ShareState<'a>> {
    funded
        .iter()
        .map(|&category| {
            let ideal = percent_share_hundredths(total_pool, category.weight_pct);
            let current = round_to_step(ideal, step);
            ShareState {
                category,
                current,
                diff: diff_hundredths(ideal, current),
            }
        })
        .collect()
}

/// Pass 2: counted single-step corrections toward a zero discrepancy.
///
/// The cycle count is fixed up front as `ceil(|discrepancy| / step)`; a
/// pool that is not step-aligned therefore overshoots on its last cycle
/// and leaves a sub-step residual of the opposite sign for pass 3.
fn run_correction_cycles(shares: &mut [ShareState<'_>], discrepancy: &mut i128, step: u64) {
    let cycles = if *discrepancy != 0 {
        discrepancy.unsigned_abs().div_ceil(step as u128)
    } else {
        0
    };
    let step_i = step as i128;
    let grain = 100i128 * step_i;

    for _ in 0..cycles {
        if *discrepancy > 0 {
            // Most under-allocated first; priority then display order break ties.
            shares.sort_by(|a, b| {
                b.diff
                    .cmp(&a.diff)
                    .then_with(|| a.rank().cmp(&b.rank()))
                    .then_with(|| a.display_order().cmp(&b.display_order()))
            });
            let s = &mut shares[0];
            s.current = s.current.saturating_add(step);
            s.diff -= grain;
            *discrepancy -= step_i;
        } else if *discrepancy < 0 {
            // Reducible entries first, then most over-allocated; inverted
            // priority and display order so low-priority, late-listed
            // categories give money back first.
            shares.sort_by(|a, b| {
                let ra = a.current >= step;
                let rb = b.current >= step;
                rb.cmp(&ra)
                    .then_with(|| a.diff.cmp(&b.diff))
                    .then_with(|| b.rank().cmp(&a.rank()))
                    .then_with(|| b.display_order().cmp(&a.display_order()))
            });
            match shares.iter_mut().find(|s| s.current >= step) {
                Some(s) => {
                    s.current -= step;
                    s.diff += grain;
                    *discrepancy += step_i;
                }
                None => break,
            }
        } else {
            break;
        }
    }
}

/// Pass 3: bounded convergence sweep ignoring rounding differences.
fn run_residual_sweep(shares: &mut [ShareState<'_>], mut residual: i128, step: u64) {
    let step_i = step as i128;
    let cap = shares.len().saturating_mul(2);
    let mut sweeps = 0usize;

    while residual != 0 && sweeps < cap {
        sweeps += 1;
        if residual > 0 {
            shares.sort_by(|a, b| {
                a.rank()
                    .cmp(&b.rank())
                    .then_with(|| a.display_order().cmp(&b.display_order()))
            });
            let s = &mut shares[0];
            s.current = s.current.saturating_add(step);
            residual -= step_i;
        } else {
            shares.sort_by(|a, b| {
                b.rank()
                    .cmp(&a.rank())
                    .then_with(|| b.display_order().cmp(&a.display_order()))
            });
            match shares.iter_mut().find(|s| s.current >= step) {
                Some(s) => {
                    s.current -= step;
                    residual += step_i;
                }
                None => break,
            }
        }
    }
}
