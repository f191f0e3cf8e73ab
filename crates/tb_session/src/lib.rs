//! tb_session — the mutable single-round game session (draw pool → winner
//! ledger → payouts → round summary).
//!
//! This crate is presentation-free: it owns the state machine and delegates
//! canonical JSON/digests to `tb_io` and payout math to `tb_algo`. One
//! caller-owned `GameSession` holds everything; every mutator takes
//! `&mut self` and runs to completion (no globals, no interior mutability).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tb_algo::{distribute_prize_pool, distribution_residual};
use tb_core::{
    entities::{PrizeCategory, PrizeRegistry, Winner},
    rng::DrawRng,
    tokens::{CategoryId, WinnerId},
};
use tb_io::{setup::GameSetup, IoError};

pub mod draw;
pub mod ledger;

use draw::DrawPool;
use ledger::WinnerLedger;

/// Engine identification echoed into every round summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Read-only view of the draw state for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    /// The most recently drawn number.
    pub current_number: Option<u16>,
    /// Up to the last five draws, newest first.
    pub last_five: Vec<u16>,
    /// All draws so far, oldest first.
    pub called_numbers: Vec<u16>,
    pub available_count: u16,
    pub total_numbers: u16,
}

/// Resolved setup values recorded in the summary (not the wire file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupEcho {
    pub players: u32,
    pub stake_per_player: u64,
    pub prize_pool: u64,
    pub adjust_step: u64,
    pub total_numbers: u16,
}

/// Serializable artifact describing one round end-to-end: enough to replay
/// it (seed, setup echo, registry digest) and to publish it (called
/// numbers, winners, payout table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub engine: EngineMeta,
    pub draw_seed: u64,
    pub setup: SetupEcho,
    /// SHA-256 over the registry's canonical JSON form.
    pub registry_sha256: String,
    pub called_numbers: Vec<u16>,
    pub winners: Vec<Winner>,
    pub payouts: BTreeMap<CategoryId, u64>,
    /// `prize_pool - Σ payouts`; nonzero only when the pool is not a
    /// multiple of the step (or nothing was fundable).
    pub undistributed: i64,
    /// RNG words drawn so far, for replay audits.
    pub rng_words_consumed: u64,
}

/// Single error surface for summary assembly. Game mutations themselves
/// never fail; refusals are `None`/`false` returns.
#[derive(Debug)]
pub enum SessionError {
    Io(String),
    Hash(String),
    Invalid(String),
}

impl From<IoError> for SessionError {
    fn from(e: IoError) -> Self {
        use SessionError::*;
        match e {
            IoError::Path(m) => Io(format!("path: {m}")),
            IoError::Json { pointer, msg } => Invalid(format!("json {pointer}: {msg}")),
            IoError::Hash(m) => Hash(m),
            IoError::Invalid(m) => Invalid(m),
        }
    }
}

/// All mutable state for one Tambola session.
///
/// A single RNG stream serves the whole session: draws after a reset
/// continue the stream rather than restarting it, so a full session replays
/// from (`draw_seed`, command sequence) alone.
#[derive(Debug, Clone)]
pub struct GameSession {
    registry: PrizeRegistry,
    setup: GameSetup,
    draw_seed: u64,
    rng: DrawRng,
    pool: DrawPool,
    ledger: WinnerLedger,
    started: bool,
}

impl GameSession {
    /// A fresh, not-yet-started session. The caller resolves the effective
    /// seed first (setup file, flag, or clock); it is echoed in summaries.
    pub fn new(registry: PrizeRegistry, setup: GameSetup, draw_seed: u64) -> Self {
        let pool = DrawPool::new(setup.total_numbers);
        Self {
            registry,
            setup,
            draw_seed,
            rng: DrawRng::from_seed_u64(draw_seed),
            pool,
            ledger: WinnerLedger::new(),
            started: false,
        }
    }

    /// Begin (or restart) the number draw with a full pool. Recorded
    /// winners are kept; [`GameSession::reset_round`] drops them too.
    pub fn start_round(&mut self) {
        self.pool.reset();
        self.started = true;
    }

    /// Full reset: fresh pool, empty ledger, back to not-started.
    pub fn reset_round(&mut self) {
        self.pool.reset();
        self.ledger.clear();
        self.started = false;
    }

    /// Draw the next number; `None` before [`GameSession::start_round`] or
    /// once the pool is exhausted.
    pub fn draw_next(&mut self) -> Option<u16> {
        if !self.started {
            return None;
        }
        self.pool.draw_next(&mut self.rng)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            current_number: self.pool.current(),
            last_five: self.pool.last_k(5),
            called_numbers: self.pool.history().to_vec(),
            available_count: self.pool.available_count() as u16,
            total_numbers: self.pool.total_numbers(),
        }
    }

    /// Record a winner; `None` when either field is blank after trimming.
    pub fn add_winner(&mut self, prize: &str, name: &str) -> Option<WinnerId> {
        self.ledger.add(prize, name)
    }

    /// Remove a recorded winner; `false` for unknown ids.
    pub fn remove_winner(&mut self, id: WinnerId) -> bool {
        self.ledger.remove(id)
    }

    pub fn winners(&self) -> &[Winner] {
        self.ledger.winners()
    }

    /// Enabled categories sorted by display order.
    pub fn enabled_categories(&self) -> Vec<&PrizeCategory> {
        self.registry.enabled_in_display_order()
    }

    pub fn registry(&self) -> &PrizeRegistry {
        &self.registry
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    #[inline]
    pub fn draw_seed(&self) -> u64 {
        self.draw_seed
    }

    #[inline]
    pub fn started(&self) -> bool {
        self.started
    }

    /// Total pool: `players × stake_per_player` (saturating).
    pub fn prize_pool(&self) -> u64 {
        self.setup.prize_pool()
    }

    /// Quantized payout per category over the configured pool. Pure
    /// recomputation on every call; nothing is cached.
    pub fn payouts(&self) -> BTreeMap<CategoryId, u64> {
        distribute_prize_pool(self.prize_pool(), self.setup.adjust_step, &self.registry)
    }

    /// Assemble the round artifact. Fails only when the registry digest
    /// cannot be produced.
    pub fn round_summary(&self, engine: &EngineMeta) -> Result<RoundSummary, SessionError> {
        let registry_sha256 = tb_io::try_sha256_canonical(&self.registry)?;
        let pool = self.prize_pool();
        let payouts = self.payouts();
        let undistributed =
            distribution_residual(pool, &payouts).clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Ok(RoundSummary {
            engine: engine.clone(),
            draw_seed: self.draw_seed,
            setup: SetupEcho {
                players: self.setup.players,
                stake_per_player: self.setup.stake_per_player,
                prize_pool: pool,
                adjust_step: self.setup.adjust_step,
                total_numbers: self.setup.total_numbers,
            },
            registry_sha256,
            called_numbers: self.pool.history().to_vec(),
            winners: self.ledger.winners().to_vec(),
            payouts,
            undistributed,
            rng_words_consumed: u64::try_from(self.rng.words_consumed()).unwrap_or(u64::MAX),
        })
    }
}
