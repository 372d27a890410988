/// cli/src/main.rs
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use core_lib::a51::A51;
use core_lib::a52::A52;
use core_lib::error::AttackOutcome;
use core_lib::gww::{search, try_r4, AttackConfig, AttackInput};
use core_lib::{FrameCounter, Keystream, R4Candidate, SessionKey};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A5 GSM stream ciphers and the GWW known-keystream attack against A5/2.
#[derive(Parser)]
#[command(name = "cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the A5/1 keystream for a given session key and frame counter.
    A51 {
        /// 64-bit session key, decimal or 0x-prefixed hex.
        #[arg(value_parser = parse_u64)]
        key: u64,
        /// 22-bit frame counter, decimal or 0x-prefixed hex.
        #[arg(value_parser = parse_u32)]
        frame: u32,
    },
    /// Print the A5/2 keystream for a given session key and frame counter.
    A52 {
        #[arg(value_parser = parse_u64)]
        key: u64,
        #[arg(value_parser = parse_u32)]
        frame: u32,
    },
    /// Recover a 64-bit session key from two known A5/2 send-direction
    /// keystreams captured under frame counters differing in bit 11.
    Attack {
        /// First 114-bit keystream (0x-prefixed hex), send direction.
        #[arg(long, value_parser = parse_u128)]
        k1: u128,
        /// Second 114-bit keystream (0x-prefixed hex), send direction.
        #[arg(long, value_parser = parse_u128)]
        k2: u128,
        /// Frame counter paired with k1.
        #[arg(long, value_parser = parse_u32)]
        f1: u32,
        /// Frame counter paired with k2.
        #[arg(long, value_parser = parse_u32)]
        f2: u32,
        /// Known R4 initial state: skips the 2^17-candidate search and
        /// verifies this single candidate instead.
        #[arg(long, value_parser = parse_u32)]
        r4: Option<u32>,
        /// Worker thread count for the full search (ignored with --r4).
        #[arg(long, default_value_t = default_workers())]
        workers: usize,
    },
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZero::get)
}

fn parse_u64(s: &str) -> Result<u64, String> {
    parse_radix(s).map_err(|e| e.to_string())
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let v: u64 = parse_radix(s).map_err(|e| e.to_string())?;
    u32::try_from(v).map_err(|_| format!("{s} does not fit in 32 bits"))
}

fn parse_u128(s: &str) -> Result<u128, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u128::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<u128>().map_err(|e| e.to_string())
    }
}

fn parse_radix(s: &str) -> Result<u64, std::num::ParseIntError> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        s.parse::<u64>()
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::A51 { key, frame } => {
            let key = SessionKey::new(u128::from(key)).context("invalid A5/1 arguments")?;
            let frame = FrameCounter::new(frame).context("invalid A5/1 arguments")?;
            let mut session = A51::new(key, frame);
            let (send, recv) = session.keystream();
            println!("send_key    = {send:#030X}");
            println!("receive_key = {recv:#030X}");
        }
        Command::A52 { key, frame } => {
            let key = SessionKey::new(u128::from(key)).context("invalid A5/2 arguments")?;
            let frame = FrameCounter::new(frame).context("invalid A5/2 arguments")?;
            let mut session = A52::new(key, frame);
            let (send, recv) = session.keystream();
            println!("send_key    = {send:#030X}");
            println!("receive_key = {recv:#030X}");
        }
        Command::Attack { k1, k2, f1, f2, r4, workers } => {
            let k1 = Keystream::from_packed(k1).context("invalid attack arguments")?;
            let k2 = Keystream::from_packed(k2).context("invalid attack arguments")?;
            let f1 = FrameCounter::new(f1).context("invalid attack arguments")?;
            let f2 = FrameCounter::new(f2).context("invalid attack arguments")?;
            let input = AttackInput { k1: &k1, k2: &k2, f1, f2 };
            let outcome = match r4 {
                Some(candidate) => {
                    let candidate =
                        R4Candidate::new(candidate).context("invalid attack arguments")?;
                    info!(candidate = candidate.get(), "checking a single known R4 candidate");
                    try_r4(candidate, &input).context("invalid attack arguments")?
                }
                None => {
                    let config = AttackConfig::with_workers(workers);
                    search(&input, config).context("invalid attack arguments")?
                }
            };
            match outcome {
                AttackOutcome::Found(key) => println!("recovered key = {key:#018X}"),
                AttackOutcome::NotFound => {
                    return Err(anyhow!("no session key found"));
                }
            }
        }
    }
    Ok(())
}


fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
