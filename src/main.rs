use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use dx100syx::{render, Bank};

/// Dump the voices of a DX100 32-voice SYSEX bank
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the DX100 sysex bank file
    sysex_file: PathBuf,

    /// Output format
    #[arg(value_enum, default_value_t = Mode::Dump)]
    mode: Mode,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Every raw and derived field, several lines per voice
    Dump,
    /// One ::key=value parameter line per voice
    #[value(name = "dump_sb")]
    DumpSb,
    /// Slot number and name per voice
    List,
    /// The whole bank as JSON
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let bank = Bank::from_file(&args.sysex_file)?;

    match args.mode {
        Mode::Dump => {
            for voice in &bank {
                print!("{}", render::dump_voice(voice)?);
            }
        }
        Mode::DumpSb => {
            for voice in &bank {
                println!("{}", render::param_string(voice)?);
            }
        }
        Mode::List => {
            for (i, voice) in bank.iter().enumerate() {
                println!("{}: {}", i, voice.name);
            }
        }
        Mode::Json => {
            println!("{}", serde_json::to_string_pretty(&bank)?);
        }
    }

    Ok(())
}
