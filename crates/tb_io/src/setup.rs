//! Game setup: player count, stake, quantization step, pool size, and an
//! optional registry file reference.
//!
//! The setup file is optional JSON; absent fields fall back to defaults.
//! Relative registry paths resolve against the setup file's directory.
//! Offline-only: paths carrying a URL scheme are rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{looks_like_url_strict, IoError, IoResult};

pub const DEFAULT_PLAYERS: u32 = 4;
pub const DEFAULT_STAKE: u64 = 50;
pub const DEFAULT_ADJUST_STEP: u64 = 5;
pub const DEFAULT_TOTAL_NUMBERS: u16 = 90;

/// Effective session configuration after defaulting.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSetup {
    pub players: u32,
    pub stake_per_player: u64,
    /// Quantization step for prize amounts.
    pub adjust_step: u64,
    /// Size of the draw universe (numbers 1..=total_numbers).
    pub total_numbers: u16,
    /// Fixed draw seed; `None` lets the caller derive one and record it.
    pub draw_seed: Option<u64>,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS,
            stake_per_player: DEFAULT_STAKE,
            adjust_step: DEFAULT_ADJUST_STEP,
            total_numbers: DEFAULT_TOTAL_NUMBERS,
            draw_seed: None,
        }
    }
}

impl GameSetup {
    /// Total prize pool: players times stake.
    pub fn prize_pool(&self) -> u64 {
        (self.players as u64).saturating_mul(self.stake_per_player)
    }
}

/// Wire shape of the setup file. Unknown fields are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupFile {
    pub players: Option<u32>,
    pub stake_per_player: Option<u64>,
    pub adjust_step: Option<u64>,
    pub total_numbers: Option<u16>,
    pub registry_path: Option<String>,
    pub draw_seed: Option<u64>,
}

/// Setup with its registry reference resolved against a base directory.
#[derive(Debug, Clone)]
pub struct LoadedSetup {
    pub setup: GameSetup,
    pub registry_path: Option<PathBuf>,
}

/// Read and resolve a setup file.
pub fn load_setup(path: &Path) -> IoResult<LoadedSetup> {
    let text = fs::read_to_string(path)?;
    let wire: SetupFile = serde_json::from_str(&text)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    resolve_setup(&wire, base)
}

/// Apply defaults and resolve the registry path (pure; no filesystem I/O).
pub fn resolve_setup(wire: &SetupFile, base_dir: &Path) -> IoResult<LoadedSetup> {
    let mut setup = GameSetup::default();
    if let Some(v) = wire.players {
        setup.players = v;
    }
    if let Some(v) = wire.stake_per_player {
        setup.stake_per_player = v;
    }
    if let Some(v) = wire.adjust_step {
        setup.adjust_step = v;
    }
    if let Some(v) = wire.total_numbers {
        setup.total_numbers = v;
    }
    setup.draw_seed = wire.draw_seed;

    let registry_path = match wire.registry_path.as_deref() {
        None => None,
        Some("") => {
            return Err(IoError::Invalid("registry_path must not be empty".into()));
        }
        Some(rel) if looks_like_url_strict(rel) => {
            return Err(IoError::Invalid(format!(
                "registry_path must be a local path, got {rel:?}"
            )));
        }
        Some(rel) => Some(join_under(base_dir, rel)),
    };

    Ok(LoadedSetup {
        setup,
        registry_path,
    })
}

#[inline]
fn join_under(base: &Path, rel: &str) -> PathBuf {
    let p = Path::new(rel);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_game() {
        let s = GameSetup::default();
        assert_eq!(s.players, 4);
        assert_eq!(s.stake_per_player, 50);
        assert_eq!(s.adjust_step, 5);
        assert_eq!(s.total_numbers, 90);
        assert_eq!(s.prize_pool(), 200);
        assert_eq!(s.draw_seed, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let wire: SetupFile = serde_json::from_str(r#"{"players": 10, "draw_seed": 7}"#).unwrap();
        let loaded = resolve_setup(&wire, Path::new("/cfg")).unwrap();
        assert_eq!(loaded.setup.players, 10);
        assert_eq!(loaded.setup.stake_per_player, 50);
        assert_eq!(loaded.setup.draw_seed, Some(7));
        assert_eq!(loaded.setup.prize_pool(), 500);
        assert!(loaded.registry_path.is_none());
    }

    #[test]
    fn unknown_fields_rejected() {
        let r = serde_json::from_str::<SetupFile>(r#"{"player_count": 4}"#);
        assert!(r.is_err());
    }

    #[test]
    fn relative_registry_path_resolves_against_base() {
        let wire: SetupFile =
            serde_json::from_str(r#"{"registry_path": "prizes.json"}"#).unwrap();
        let loaded = resolve_setup(&wire, Path::new("/cfg/game")).unwrap();
        assert_eq!(
            loaded.registry_path.as_deref(),
            Some(Path::new("/cfg/game/prizes.json"))
        );
    }

    #[test]
    fn absolute_registry_path_kept_as_is() {
        let wire: SetupFile =
            serde_json::from_str(r#"{"registry_path": "/etc/prizes.json"}"#).unwrap();
        let loaded = resolve_setup(&wire, Path::new("/cfg")).unwrap();
        assert_eq!(
            loaded.registry_path.as_deref(),
            Some(Path::new("/etc/prizes.json"))
        );
    }

    #[test]
    fn url_registry_path_rejected() {
        let wire: SetupFile =
            serde_json::from_str(r#"{"registry_path": "https://x/prizes.json"}"#).unwrap();
        assert!(resolve_setup(&wire, Path::new("/cfg")).is_err());
        let empty: SetupFile = serde_json::from_str(r#"{"registry_path": ""}"#).unwrap();
        assert!(resolve_setup(&empty, Path::new("/cfg")).is_err());
    }
}
