//! tb_report — presentation layer over the round summary.
//!
//! The renderers read the artifact only and never recompute: payouts,
//! residual, and digests are echoed exactly as the session recorded them.
//! `build_model` flattens a `RoundSummary` into render-ready lines; the
//! submodules turn the model into a fixed-order JSON document or the
//! plain-text winners message.

use serde::{Deserialize, Serialize};

use tb_session::RoundSummary;

pub mod render_json;
pub mod render_text;

pub use render_json::render_report_json;
pub use render_text::{render_report_text, winners_share_text};

/// One winner row, ledger order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerLine {
    pub id: u64,
    pub prize: String,
    pub name: String,
}

/// One payout row, category-id order (the artifact's map order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutLine {
    pub category: String,
    pub amount: u64,
}

/// Flattened, render-ready view of one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModel {
    /// Human-readable engine line, e.g. `tambola 0.1.0 (local)`.
    pub engine: String,
    pub draw_seed: u64,
    pub numbers_called: usize,
    pub total_numbers: u16,
    pub prize_pool: u64,
    pub adjust_step: u64,
    pub winners: Vec<WinnerLine>,
    pub payouts: Vec<PayoutLine>,
    /// Echoed residual; nonzero only for pools not aligned to the step.
    pub undistributed: i64,
    pub registry_sha256: String,
}

/// Flatten a round summary into the report model. Pure mapping.
pub fn build_model(summary: &RoundSummary) -> ReportModel {
    let winners = summary
        .winners
        .iter()
        .map(|w| WinnerLine {
            id: w.id.value(),
            prize: w.prize.clone(),
            name: w.name.clone(),
        })
        .collect();

    let payouts = summary
        .payouts
        .iter()
        .map(|(id, &amount)| PayoutLine {
            category: id.as_str().to_string(),
            amount,
        })
        .collect();

    ReportModel {
        engine: format!(
            "{} {} ({})",
            summary.engine.name, summary.engine.version, summary.engine.build
        ),
        draw_seed: summary.draw_seed,
        numbers_called: summary.called_numbers.len(),
        total_numbers: summary.setup.total_numbers,
        prize_pool: summary.setup.prize_pool,
        adjust_step: summary.setup.adjust_step,
        winners,
        payouts,
        undistributed: summary.undistributed,
        registry_sha256: summary.registry_sha256.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tb_core::tokens::CategoryId;
    use tb_session::{EngineMeta, SetupEcho};

    fn summary_fixture() -> RoundSummary {
        let mut payouts: BTreeMap<CategoryId, u64> = BTreeMap::new();
        payouts.insert("early-seven".parse().unwrap(), 5);
        payouts.insert("full-house".parse().unwrap(), 60);
        RoundSummary {
            engine: EngineMeta {
                vendor: "test".into(),
                name: "tambola".into(),
                version: "0.1.0".into(),
                build: "local".into(),
            },
            draw_seed: 9,
            setup: SetupEcho {
                players: 4,
                stake_per_player: 50,
                prize_pool: 200,
                adjust_step: 5,
                total_numbers: 90,
            },
            registry_sha256: "ab".repeat(32),
            called_numbers: vec![14, 3, 88],
            winners: vec![tb_core::entities::Winner {
                id: tb_core::tokens::WinnerId::new(1),
                prize: "Full House 1".into(),
                name: "Priya".into(),
            }],
            payouts,
            undistributed: 0,
            rng_words_consumed: 3,
        }
    }

    #[test]
    fn model_flattens_the_summary() {
        let model = build_model(&summary_fixture());
        assert_eq!(model.engine, "tambola 0.1.0 (local)");
        assert_eq!(model.numbers_called, 3);
        assert_eq!(model.prize_pool, 200);
        assert_eq!(model.winners.len(), 1);
        assert_eq!(model.winners[0].prize, "Full House 1");
        // Map order carries over: ids sort lexicographically.
        assert_eq!(model.payouts[0].category, "early-seven");
        assert_eq!(model.payouts[1].category, "full-house");
    }
}
