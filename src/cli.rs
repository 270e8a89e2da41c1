// Command-line interface definitions for wavrec
//
// This module is separate from main.rs so the library crate exposes
// the full command surface.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wavrec")]
#[command(author, version, about = "Record microphone audio to timestamped WAV files")]
#[command(long_about = "
Wavrec records audio from an input device into WAV files.
Press Enter to start recording, press Enter again to stop; the
session is saved as recording_<YYYYMMDD_HHMMSS>.wav and its
attributes (duration, bit rate, file size) are printed.

Device selection defaults to \"auto\": the last enumerated input
device whose name contains \"USB\" or \"Microphone\" wins, falling
back to the system default input device.
")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<std::path::PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Override the input device ("auto", "default", or a device name)
    #[arg(long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Override the directory recordings are written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record interactively (default if no command specified)
    Record,

    /// List audio input devices
    Devices,

    /// Show the attributes of an existing WAV file
    Inspect {
        /// Path to a WAV file
        file: std::path::PathBuf,
    },

    /// Show current configuration
    Config {
        /// Write a commented default config file if none exists
        #[arg(long)]
        init: bool,
    },
}
