#![deny(unsafe_code)]
//! CLI binary for the ambient-fx effects.
//!
//! Subcommands:
//! - `render <effect>`: render one frame of an effect to PNG
//! - `list`: print available effects and their variants
//! - `schema <effect>`: print an effect's parameter schema

mod error;

use ambient_fx_core::{Srgb, SurfaceConfig, Theme, ThemeMode};
use ambient_fx_engines::pixel::SnapshotOptions;
use ambient_fx_engines::EffectKind;
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ambient-fx", about = "Ambient scroll and pointer effects CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an effect and write a PNG snapshot.
    Render {
        /// Effect name (e.g. "atmos").
        effect: String,

        /// Variant tag (e.g. "hero", "larva", "journey").
        #[arg(short, long)]
        variant: Option<String>,

        /// Surface width in CSS pixels.
        #[arg(short = 'W', long, default_value_t = 512.0)]
        width: f64,

        /// Surface height in CSS pixels.
        #[arg(short = 'H', long, default_value_t = 320.0)]
        height: f64,

        /// Device pixel ratio (capped at 2).
        #[arg(long, default_value_t = 1.0)]
        dpr: f64,

        /// PRNG seed for deterministic layout.
        #[arg(long, default_value_t = 42)]
        seed: u32,

        /// Intensity / density scalar.
        #[arg(short, long, default_value_t = 1.0)]
        intensity: f64,

        /// Frames to advance (60 fps) before capturing.
        #[arg(short, long, default_value_t = 0)]
        frames: u32,

        /// Scroll progress in [0, 1].
        #[arg(short, long, default_value_t = 1.0)]
        progress: f64,

        /// Render as with a reduced-motion preference.
        #[arg(long)]
        reduced_motion: bool,

        /// Normalized pointer position as "x,y".
        #[arg(long, default_value = "0.5,0.5")]
        pointer: String,

        /// Primary accent color (#rrggbb).
        #[arg(long)]
        accent: Option<String>,

        /// Secondary accent color (#rrggbb).
        #[arg(long)]
        accent2: Option<String>,

        /// Use the light page theme.
        #[arg(long)]
        light: bool,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Effect parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available effects and variants.
    List,
    /// Print the parameter schema of an effect.
    Schema {
        effect: String,
    },
}

fn parse_pointer(s: &str) -> Result<(f64, f64), CliError> {
    let bad = || CliError::Input(format!("invalid --pointer '{s}': expected \"x,y\""));
    let (x, y) = s.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    Ok((x, y))
}

fn build_theme(accent: Option<&str>, accent2: Option<&str>, light: bool) -> Result<Theme, CliError> {
    let mut theme = Theme::default();
    if let Some(hex) = accent {
        theme.accent = Srgb::from_hex(hex)?;
    }
    if let Some(hex) = accent2 {
        theme.accent2 = Srgb::from_hex(hex)?;
    }
    if light {
        theme = theme.with_mode(ThemeMode::Light);
    }
    Ok(theme)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let effects: Vec<serde_json::Value> = EffectKind::list_effects()
                .iter()
                .filter_map(|name| EffectKind::from_name(name).ok())
                .map(|kind| {
                    serde_json::json!({
                        "name": kind.name(),
                        "variants": kind.variants(),
                        "gpu": kind.requires_gpu(),
                    })
                })
                .collect();
            if cli.json {
                let info = serde_json::json!({ "effects": effects });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Effects:");
                for name in EffectKind::list_effects() {
                    let kind = EffectKind::from_name(name)?;
                    println!("  {name}: {}", kind.variants().join(", "));
                }
            }
        }
        Command::Schema { effect } => {
            let kind = EffectKind::from_name(&effect)?;
            println!("{}", serde_json::to_string_pretty(&kind.param_schema())?);
        }
        Command::Render {
            effect,
            variant,
            width,
            height,
            dpr,
            seed,
            intensity,
            frames,
            progress,
            reduced_motion,
            pointer,
            accent,
            accent2,
            light,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let pointer = parse_pointer(&pointer)?;
            let theme = build_theme(accent.as_deref(), accent2.as_deref(), light)?;

            let kind = EffectKind::from_name(&effect)?;
            let variant = variant.unwrap_or_else(|| kind.variants()[0].to_string());
            let config = SurfaceConfig::new(&effect, &variant, seed)
                .with_intensity(intensity)
                .with_params(params);
            let opts = SnapshotOptions {
                width,
                height,
                dpr,
                frames,
                progress: progress.clamp(0.0, 1.0),
                reduced_motion,
                pointer,
            };

            tracing::info!(effect = %effect, variant = %variant, seed, "rendering snapshot");
            let frame = ambient_fx_engines::snapshot::snapshot_png(&config, theme, &opts, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "effect": effect,
                    "variant": variant,
                    "width": frame.width,
                    "height": frame.height,
                    "frames": frames,
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {effect}/{variant} ({}x{}, {frames} frames, seed {seed}) -> {}",
                    frame.width,
                    frame.height,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    initialise_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
