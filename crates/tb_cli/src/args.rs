// Deterministic, offline argument surface for the tambola CLI.
//
// Rules:
// - No networked paths (reject any scheme:// form, including --out)
// - --setup XOR the explicit flags (--registry/--players/--stake/--step/--numbers)
// - Output: --out dir, --render [json|text]*
// - Seed override accepts decimal u64 or 0x-hex up to 16 nybbles
// - --validate-only loads and checks the configuration, then exits

use clap::Parser;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "tambola",
    disable_help_subcommand = true,
    about = "Offline, deterministic Tambola round runner"
)]
pub struct Args {
    /// Path to a setup JSON describing the round (mutually exclusive with the explicit flags).
    #[arg(long, conflicts_with_all = ["registry", "players", "stake", "step", "numbers"])]
    pub setup: Option<PathBuf>,

    // --- Explicit mode (when --setup is not used) ---
    /// Prize-category registry JSON path (omit for the built-in standard registry).
    #[arg(long)]
    pub registry: Option<PathBuf>,
    /// Players paying into the pool.
    #[arg(long)]
    pub players: Option<u32>,
    /// Stake per player in whole currency units.
    #[arg(long)]
    pub stake: Option<u64>,
    /// Rounding step for payouts.
    #[arg(long)]
    pub step: Option<u64>,
    /// Numbers in the draw pool (the board runs 1..=N).
    #[arg(long)]
    pub numbers: Option<u16>,

    // --- Output & rendering ---
    /// Output directory for artifacts (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Renderer(s) the `write` command emits. Choose up to 2 (json, text).
    #[arg(long, value_parser = ["json", "text"], num_args = 0..=2)]
    pub render: Vec<String>,

    // --- Determinism & control ---
    /// Draw RNG seed. Accepts decimal u64 or 0x-hex (≤16 hex digits).
    /// Overrides a seed in the setup file; omit both for a clock-derived one.
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Validate the setup/registry only, do not start the session loop.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress status lines on stderr.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
/// Messages are short and stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be a local file (no scheme): {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let mut args = Args::parse();

    // Reject schemes for all provided paths (including --out); existence is
    // the loader's concern and maps to the I/O exit code there.
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    args.setup = args.setup.take().map(|p| normalize_path(&p));
    args.registry = args.registry.take().map(|p| normalize_path(&p));
    args.out = normalize_path(&args.out);

    Ok(args)
}

/// Seed parser: decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>()
            .map_err(|_| "decimal seed must be a valid u64".into())
    }
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://")
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [
        args.setup.as_deref(),
        args.registry.as_deref(),
        Some(args.out.as_path()),
    ]
    .into_iter()
    .flatten()
}

/// Best-effort normalization to an absolute path. If canonicalize fails
/// (path doesn't exist yet), fall back to CWD-relative absolutization.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parser_decimal_and_hex() {
        assert_eq!(parse_seed("42").unwrap(), 42u64);
        assert_eq!(parse_seed("0x2A").unwrap(), 42u64);
        assert_eq!(parse_seed("0XfF").unwrap(), 255u64);
        assert!(parse_seed("0x").is_err());
        assert!(parse_seed("0xFFFFFFFFFFFFFFFFF").is_err()); // 17 nybbles
        assert!(parse_seed("-1").is_err());
        assert!(parse_seed("").is_err());
    }

    #[test]
    fn local_path_check_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("https://x/y.json")).is_err());
        assert!(ensure_local_path(Path::new("/tmp/file.json")).is_ok());
        assert!(ensure_local_path(Path::new("relative/file.json")).is_ok());
    }

    #[test]
    fn normalize_path_returns_absolute() {
        let p = PathBuf::from("does/not/exist.txt");
        assert!(normalize_path(&p).is_absolute());
    }
}
