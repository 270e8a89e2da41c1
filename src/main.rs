//! Wavrec - record microphone audio to timestamped WAV files
//!
//! Run with `wavrec` or `wavrec record` to start the interactive
//! recorder. Use `wavrec devices` to list input devices and
//! `wavrec inspect <file>` to print the attributes of an existing WAV.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wavrec::cli::{Cli, Commands};
use wavrec::recorder::Recorder;
use wavrec::{audio, config, wav};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("wavrec={},warn", log_level))),
        )
        .with_target(false)
        .init();

    // Load configuration
    let mut config = config::load_config(cli.config.as_deref())?;

    // Apply CLI overrides
    if let Some(device) = cli.device {
        config.audio.device = device;
    }
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    // Run the appropriate command
    match cli.command.unwrap_or(Commands::Record) {
        Commands::Record => {
            let mut recorder = Recorder::new(config);
            recorder.run().await?;
        }

        Commands::Devices => {
            list_devices();
        }

        Commands::Inspect { file } => {
            let metrics = wav::inspect(&file)?;
            print!("{}", metrics.report(&file));
        }

        Commands::Config { init } => {
            if init {
                init_config()?;
            }
            show_config(&config);
        }
    }

    Ok(())
}

/// Create the default config file if it doesn't exist
fn init_config() -> anyhow::Result<()> {
    if let Some(path) = config::Config::default_path() {
        if path.exists() {
            println!("Config file exists: {:?}\n", path);
        } else {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, config::DEFAULT_CONFIG)?;
            println!("Created: {:?}\n", path);
        }
    }
    Ok(())
}

/// Print every input-capable device the host exposes
fn list_devices() {
    let host = cpal::default_host();
    let devices = audio::device::enumerate(&host);

    let mut found = 0;
    for (index, info) in devices.iter().enumerate() {
        if info.input_channels > 0 {
            println!(
                "Device {}: {} ({} input channel(s))",
                index, info.name, info.input_channels
            );
            found += 1;
        }
    }

    if found == 0 {
        println!("No audio input devices found.");
    }
}

/// Show current configuration
fn show_config(config: &config::Config) {
    println!("Current Configuration\n");
    println!("=====================\n");

    println!("[audio]");
    println!("  device = {:?}", config.audio.device);
    println!("  sample_rate = {}", config.audio.sample_rate);
    println!("  channels = {}", config.audio.channels);
    println!("  chunk_size = {}", config.audio.chunk_size);

    println!("\n[output]");
    println!("  dir = {:?}", config.output.dir);

    println!("\n---");
    println!(
        "Config file: {:?}",
        config::Config::default_path()
            .unwrap_or_else(|| std::path::PathBuf::from("(not found)"))
    );
}
