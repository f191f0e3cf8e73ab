// tambola — offline, deterministic Tambola session runner.
//
// Flow: parse args → (validate-only short-circuit) → load setup/registry →
// resolve seed → line-oriented command loop on stdin. Command results go to
// stdout; status and error lines go to stderr so scripted callers can pipe
// the results cleanly.

mod args;

mod exitcodes {
    /// 0 success, 2 validation/usage failures, 4 I/O failures.
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
}

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, BufRead};
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};

use tb_core::entities::PrizeRegistry;
use tb_core::tokens::WinnerId;
use tb_io::{canonical_json, registry, setup, setup::GameSetup, IoError};
use tb_report::{build_model, render_report_json, render_report_text};
use tb_session::{BoardSnapshot, EngineMeta, GameSession, SessionError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad JSON shape, bad registry/setup semantics, bad command usage
    Validation(String),
    /// Read/write/path failures
    Io(String),
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("tambola: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let rc = if args.validate_only {
        match validate_only(&args) {
            Ok(()) => exitcodes::OK,
            Err(e) => report(&e),
        }
    } else {
        match run_repl(&args) {
            Ok(()) => exitcodes::OK,
            Err(e) => report(&e),
        }
    };

    ExitCode::from(rc as u8)
}

/// Validate-only path: load the configuration to exercise every check,
/// write nothing, start nothing.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let _ = load_configuration(args)?;
    if !args.quiet {
        eprintln!("validate-only: configuration OK");
    }
    Ok(())
}

fn report(e: &MainError) -> i32 {
    let (label, msg, rc) = match e {
        MainError::Validation(m) => ("validation", m, exitcodes::VALIDATION),
        MainError::Io(m) => ("io", m, exitcodes::IO),
    };
    eprintln!("tambola: {label} error: {msg}");
    rc
}

/// Translate tb_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: IoError) -> MainError {
    use IoError::*;
    match e {
        Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        Invalid(m) => MainError::Validation(m),
        Hash(m) => MainError::Validation(format!("hash: {m}")),
        Path(m) => MainError::Io(format!("path: {m}")),
    }
}

fn map_session_err(e: SessionError) -> MainError {
    use SessionError::*;
    match e {
        Io(m) => MainError::Io(m),
        Hash(m) => MainError::Validation(format!("hash: {m}")),
        Invalid(m) => MainError::Validation(m),
    }
}

/// Resolve the effective setup and registry from either the setup file or
/// the explicit flags. Missing files surface as I/O errors here.
fn load_configuration(args: &Args) -> Result<(GameSetup, PrizeRegistry), MainError> {
    if let Some(path) = &args.setup {
        let loaded = setup::load_setup(path).map_err(map_io_err)?;
        let registry = match &loaded.registry_path {
            Some(reg) => registry::load_registry(reg).map_err(map_io_err)?,
            None => PrizeRegistry::standard(),
        };
        return Ok((loaded.setup, registry));
    }

    let mut setup = GameSetup::default();
    if let Some(v) = args.players {
        setup.players = v;
    }
    if let Some(v) = args.stake {
        setup.stake_per_player = v;
    }
    if let Some(v) = args.step {
        setup.adjust_step = v;
    }
    if let Some(v) = args.numbers {
        setup.total_numbers = v;
    }
    let registry = match &args.registry {
        Some(path) => registry::load_registry(path).map_err(map_io_err)?,
        None => PrizeRegistry::standard(),
    };
    Ok((setup, registry))
}

/// Deterministic engine metadata (compile-time env where available).
fn engine_meta() -> EngineMeta {
    EngineMeta {
        vendor: option_env!("TAMBOLA_ENGINE_VENDOR").unwrap_or("tb").to_string(),
        name: option_env!("TAMBOLA_ENGINE_NAME")
            .unwrap_or(env!("CARGO_PKG_NAME"))
            .to_string(),
        version: option_env!("TAMBOLA_ENGINE_VERSION")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string(),
        build: option_env!("TAMBOLA_ENGINE_BUILD").unwrap_or("dev").to_string(),
    }
}

/// Clock-derived fallback seed; always echoed to stderr (unless --quiet) and
/// recorded in the round summary so the session stays replayable.
fn derive_time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as u64,
        Err(_) => 0,
    }
}

enum LoopFlow {
    Continue,
    Quit,
}

fn run_repl(args: &Args) -> Result<(), MainError> {
    let (setup, registry) = load_configuration(args)?;
    let seed = args
        .seed
        .or(setup.draw_seed)
        .unwrap_or_else(derive_time_seed);
    if !args.quiet {
        eprintln!("session: seed {seed}, numbers 1..={}", setup.total_numbers);
    }

    let engine = engine_meta();
    let mut session = GameSession::new(registry, setup, seed);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| MainError::Io(format!("stdin: {e}")))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match handle_command(trimmed, &mut session, args, &engine)? {
            LoopFlow::Quit => break,
            LoopFlow::Continue => {}
        }
    }
    Ok(())
}

/// One command per line. User mistakes print to stderr and the loop keeps
/// going; only real I/O failures (stdin, artifact writes) abort the run.
fn handle_command(
    line: &str,
    session: &mut GameSession,
    args: &Args,
    engine: &EngineMeta,
) -> Result<LoopFlow, MainError> {
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match cmd {
        "start" => {
            session.start_round();
            if !args.quiet {
                eprintln!("round started");
            }
        }
        "draw" | "d" => match session.draw_next() {
            Some(n) => println!("{n}"),
            None if !session.started() => eprintln!("round not started (try `start`)"),
            None => eprintln!("pool exhausted"),
        },
        "board" => print!("{}", render_board(&session.snapshot())),
        "last" => {
            let snap = session.snapshot();
            if snap.last_five.is_empty() {
                println!("(none)");
            } else {
                let parts: Vec<String> =
                    snap.last_five.iter().map(|n| n.to_string()).collect();
                println!("{}", parts.join(" "));
            }
        }
        "winner" => match rest.split_once(';') {
            Some((prize, name)) => match session.add_winner(prize, name) {
                Some(id) => println!("winner {id} recorded"),
                None => eprintln!("winner needs a prize and a name (both non-blank)"),
            },
            None => eprintln!("usage: winner <prize> ; <name>"),
        },
        "unwin" => match rest.parse::<WinnerId>() {
            Ok(id) => {
                if session.remove_winner(id) {
                    println!("winner {id} removed");
                } else {
                    println!("winner {id} not found");
                }
            }
            Err(e) => eprintln!("unwin: {e} (usage: unwin <id>)"),
        },
        "winners" => {
            let winners = session.winners();
            if winners.is_empty() {
                println!("(none)");
            } else {
                for w in winners {
                    println!("#{} {}: {}", w.id, w.prize, w.name);
                }
            }
        }
        "categories" => print_categories(session),
        "payouts" => print_payouts(session),
        "reset" => {
            session.reset_round();
            if !args.quiet {
                eprintln!("session reset");
            }
        }
        "write" => write_artifacts(args, session, engine)?,
        "help" => print_help(),
        "quit" => return Ok(LoopFlow::Quit),
        other => eprintln!("unknown command: {other} (try `help`)"),
    }
    Ok(LoopFlow::Continue)
}

/// Full board grid, ten numbers per row. The latest call is parenthesized,
/// earlier calls are bracketed, undrawn numbers are bare.
fn render_board(snap: &BoardSnapshot) -> String {
    let called: BTreeSet<u16> = snap.called_numbers.iter().copied().collect();
    let mut out = String::new();
    for n in 1..=snap.total_numbers {
        let cell = if snap.current_number == Some(n) {
            format!("({n:>2})")
        } else if called.contains(&n) {
            format!("[{n:>2}]")
        } else {
            format!(" {n:>2} ")
        };
        out.push_str(&cell);
        if n % 10 == 0 || n == snap.total_numbers {
            out.push('\n');
        } else {
            out.push(' ');
        }
    }
    out
}

fn print_categories(session: &GameSession) {
    let cats = session.enabled_categories();
    if cats.is_empty() {
        println!("(none)");
        return;
    }
    let id_w = cats.iter().map(|c| c.id.as_str().len()).max().unwrap_or(0);
    let name_w = cats.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for c in cats {
        println!(
            "{:<id_w$}  {:<name_w$}  {:<8}  {:>3}%",
            c.id.as_str(),
            c.name,
            c.priority,
            c.weight_pct
        );
    }
}

fn print_payouts(session: &GameSession) {
    let pool = session.prize_pool();
    let step = session.setup().adjust_step;
    println!("pool {pool} step {step}");

    let payouts = session.payouts();
    let cats = session.enabled_categories();
    let width = cats.iter().map(|c| c.id.as_str().len()).max().unwrap_or(0);
    for c in &cats {
        let amount = payouts.get(&c.id).copied().unwrap_or(0);
        println!("  {:<width$}  {:>6}", c.id.as_str(), amount);
    }

    let paid: u128 = payouts.values().map(|&v| u128::from(v)).sum();
    let residual = i128::from(pool) - paid as i128;
    if residual != 0 {
        println!("  undistributed: {residual}");
    }
}

fn write_artifacts(
    args: &Args,
    session: &GameSession,
    engine: &EngineMeta,
) -> Result<(), MainError> {
    let summary = session.round_summary(engine).map_err(map_session_err)?;

    fs::create_dir_all(&args.out)
        .map_err(|e| MainError::Io(format!("mkdir {}: {e}", args.out.to_string_lossy())))?;

    // round_summary.json is the canonical artifact (sorted keys, atomic write).
    let sum_path = args.out.join("round_summary.json");
    canonical_json::write_canonical_file(&sum_path, &summary)
        .map_err(|e| MainError::Io(format!("write round_summary.json: {e}")))?;

    // Renderings are presentational; pretty JSON keeps document order.
    let model = build_model(&summary);
    for fmt in &args.render {
        match fmt.as_str() {
            "json" => {
                let mut bytes = serde_json::to_vec_pretty(&render_report_json(&model))
                    .map_err(|e| MainError::Validation(format!("report to JSON: {e}")))?;
                bytes.push(b'\n');
                let path = args.out.join("report.json");
                fs::write(&path, bytes)
                    .map_err(|e| MainError::Io(format!("write report.json: {e}")))?;
            }
            "text" => {
                let path = args.out.join("winners.txt");
                fs::write(&path, render_report_text(&model))
                    .map_err(|e| MainError::Io(format!("write winners.txt: {e}")))?;
            }
            other => {
                return Err(MainError::Validation(format!("unknown renderer: {other}")));
            }
        }
    }

    if !args.quiet {
        eprintln!("write: artifacts written to {}", args.out.to_string_lossy());
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  start                    begin the round with a full pool");
    println!("  draw | d                 call the next number");
    println!("  board                    show the board grid");
    println!("  last                     up to the last five calls, newest first");
    println!("  winner <prize> ; <name>  record a winner");
    println!("  unwin <id>               remove a recorded winner");
    println!("  winners                  list recorded winners");
    println!("  categories               list enabled prize categories");
    println!("  payouts                  show the payout table");
    println!("  reset                    fresh pool, cleared winners");
    println!("  write                    write artifacts to --out");
    println!("  help                     this list");
    println!("  quit                     leave");
}
