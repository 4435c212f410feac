use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use partsys_tools::{
    collect_captures, decode_packet_json, encode_config_json, format_decode_pretty,
    inspect_packet, CaptureOrder, InspectReport,
};
use wire::MAX_PACKET_SIZE;

#[derive(Parser)]
#[command(
    name = "partsys-tools",
    version,
    about = "partsys particle-system packet inspection and decoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect packet structure and sizes.
    Inspect {
        /// Path to the packet bytes, or a directory of captured packets.
        packet_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected packets; by path when omitted.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected packets (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode a packet against the standard defaults.
    Decode {
        /// Path to the packet bytes.
        packet_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Encode a JSON config into packet bytes.
    Encode {
        /// JSON config; missing fields take their default values.
        config_file: PathBuf,
        /// Where to write the packet bytes.
        out_file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    /// Largest files first.
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            packet_path,
            glob,
            sort,
            limit,
        } => {
            if packet_path.is_dir() {
                let order = match sort {
                    Some(InspectSort::Size) => CaptureOrder::Size,
                    None => CaptureOrder::Path,
                };
                let mut captures = collect_captures(&packet_path, glob.as_deref(), order)?;
                if let Some(limit) = limit {
                    captures.truncate(limit);
                }
                for capture in captures {
                    println!("== {} ({} bytes) ==", capture.path.display(), capture.size);
                    if !capture.fits_packet() {
                        log::warn!("skipping {}: larger than a packet", capture.path.display());
                        println!("  invalid: exceeds the {MAX_PACKET_SIZE}-byte packet limit");
                        continue;
                    }
                    let bytes = fs::read(&capture.path)
                        .with_context(|| format!("read packet {}", capture.path.display()))?;
                    match inspect_packet(&bytes) {
                        Ok(report) => print_inspect_report(&report),
                        Err(err) => {
                            log::warn!("skipping {}: {err:#}", capture.path.display());
                            println!("  invalid: {err:#}");
                        }
                    }
                }
            } else {
                let bytes = fs::read(&packet_path)
                    .with_context(|| format!("read packet {}", packet_path.display()))?;
                let report = inspect_packet(&bytes)?;
                print_inspect_report(&report);
            }
        }
        Command::Decode {
            packet_file,
            format,
        } => {
            let bytes = fs::read(&packet_file)
                .with_context(|| format!("read packet {}", packet_file.display()))?;
            let output = decode_packet_json(&bytes)?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    println!("{}", format_decode_pretty(&output));
                }
            }
        }
        Command::Encode {
            config_file,
            out_file,
        } => {
            let json = fs::read_to_string(&config_file)
                .with_context(|| format!("read config {}", config_file.display()))?;
            let bytes = encode_config_json(&json)?;
            fs::write(&out_file, &bytes)
                .with_context(|| format!("write packet {}", out_file.display()))?;
            println!("wrote {} bytes to {}", bytes.len(), out_file.display());
        }
    }
    Ok(())
}

fn print_inspect_report(report: &InspectReport) {
    let header = report.header.to_bytes();
    println!(
        "header: {:02x} {:02x} {:02x} {:02x}{}",
        header[0],
        header[1],
        header[2],
        header[3],
        if report.canonical_header {
            ""
        } else {
            " (non-canonical)"
        }
    );
    println!("groups:");
    if report.groups.is_empty() {
        println!("  none (all defaults)");
    }
    for span in &report.groups {
        println!(
            "  {}: offset {} ({} bytes)",
            span.group.name(),
            span.offset,
            span.len
        );
    }
    println!(
        "particles: max {} initial {}",
        report.max_particles, report.initial_particles
    );
    for flag in &report.flags {
        println!(
            "flag byte {}: 0x{:02x} at offset {}",
            flag.slot, flag.value, flag.offset
        );
    }
    println!("length: {} bytes", report.used_len);
    if report.trailing_len() > 0 {
        println!("trailing: {} bytes ignored", report.trailing_len());
    }
}
