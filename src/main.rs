//! Soap Film Widgets
//!
//! Headless driver for the soap bubble widgets: runs the pressure experiment,
//! prints Steiner lengths and film colors, and exports PNGs.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use soap_film_widgets::config::WidgetConfig;
use soap_film_widgets::export::{export_color_strip, export_steiner_diagram};
use soap_film_widgets::physics::steiner::ConnectionMode;
use soap_film_widgets::widgets::{ArticleState, StopReason};

/// Soap bubble physics widgets
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the valve between two bubbles and let the air flow
    Flow {
        /// Radius of bubble A
        #[arg(long)]
        radius_a: Option<f64>,

        /// Radius of bubble B
        #[arg(long)]
        radius_b: Option<f64>,

        /// Maximum number of frames to simulate
        #[arg(long, default_value_t = 10_000)]
        ticks: u64,
    },
    /// Compare diagonals with the soap-film network
    Steiner {
        /// Override square side length
        #[arg(long)]
        side: Option<f64>,

        #[arg(long, value_enum, default_value_t = ModeArg::SoapFilm)]
        mode: ModeArg,
    },
    /// Look up the color of a film thickness
    Film {
        /// Film thickness (nanometers)
        #[arg(long)]
        thickness: f64,
    },
    /// Write the thickness color strip as PNG
    Strip {
        #[arg(short, long)]
        output: String,

        #[arg(long, default_value_t = 512)]
        width: u32,

        #[arg(long, default_value_t = 48)]
        height: u32,
    },
    /// Write the Steiner network diagram as PNG
    Diagram {
        #[arg(short, long)]
        output: String,

        #[arg(long, default_value_t = 400)]
        size: u32,

        #[arg(long, value_enum, default_value_t = ModeArg::SoapFilm)]
        mode: ModeArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Direct,
    SoapFilm,
}

impl From<ModeArg> for ConnectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Direct => ConnectionMode::Direct,
            ModeArg::SoapFilm => ConnectionMode::SoapFilm,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if let Some(ref path) = args.config {
        match WidgetConfig::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                WidgetConfig::default()
            }
        }
    } else {
        WidgetConfig::default()
    };

    if let Command::Steiner { side: Some(side), .. } = args.command {
        config.steiner.side = side;
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &WidgetConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut article = ArticleState::new(config);

    match args.command {
        Command::Flow {
            radius_a,
            radius_b,
            ticks,
        } => {
            if let Some(radius) = radius_a {
                article.pressure.set_radius_a(radius);
            }
            if let Some(radius) = radius_b {
                article.pressure.set_radius_b(radius);
            }

            let initial_volume = article.pressure.pair().total_volume();
            let mut frames = vec![*article.pressure.last_step()];
            article.pressure.open_valve();
            let outcome = article.pressure.run_while_open(ticks, |step| {
                frames.push(*step);
                false
            });
            // The terminating step is not passed to the cancel callback
            if outcome.reason == StopReason::Terminated {
                frames.push(outcome.last_step);
            }

            if args.json {
                print_json(&frames)?;
            } else {
                for (frame, step) in frames.iter().enumerate() {
                    println!(
                        "{:>6}  P_a={:>8.4}  P_b={:>8.4}  r_a={:.4}  r_b={:.4}{}",
                        frame,
                        step.pressure_a,
                        step.pressure_b,
                        step.new_radius_a.get(),
                        step.new_radius_b.get(),
                        if step.terminated { "  collapsed" } else { "" }
                    );
                }
            }

            let drift = (article.pressure.pair().total_volume() - initial_volume).abs();
            log::info!(
                "Stopped after {} ticks ({:?}), volume drift {:.3e}",
                outcome.ticks,
                outcome.reason,
                drift
            );
        }
        Command::Steiner { mode, .. } => {
            article.steiner.set_mode(mode.into());
            let layout = article.steiner.layout();

            if args.json {
                print_json(&layout)?;
            } else {
                println!("direct (diagonals): {:.4}", layout.direct_length);
                println!("soap film:          {:.4}", layout.soap_film_length);
                println!("savings:            {:.2}%", layout.savings() * 100.0);
                for (junction, angles) in layout.junctions.iter().zip(layout.junction_angles()) {
                    println!(
                        "junction ({:.4}, {:.4}) angles {:.1}/{:.1}/{:.1}",
                        junction.x, junction.y, angles[0], angles[1], angles[2]
                    );
                }
            }
        }
        Command::Film { thickness } => {
            article.film.set_thickness(thickness);
            let sample = article.film.sample();

            if args.json {
                print_json(&sample)?;
            } else {
                let (red, green, blue) = sample.color.to_u8_tuple();
                println!(
                    "{} nm: {} rgb({}, {}, {}) {}",
                    sample.thickness_nm,
                    sample.band.label(),
                    red,
                    green,
                    blue,
                    sample.color.to_hex()
                );
            }
        }
        Command::Strip {
            ref output,
            width,
            height,
        } => {
            export_color_strip(
                output,
                &soap_film_widgets::physics::ThinFilmColorModel::new(),
                config.film.min_thickness_nm,
                config.film.max_thickness_nm,
                width,
                height,
            )?;
            log::info!("Color strip written to {}", output);
        }
        Command::Diagram {
            ref output,
            size,
            mode,
        } => {
            article.steiner.set_mode(mode.into());
            export_steiner_diagram(output, &article.steiner.layout(), size)?;
            log::info!("Steiner diagram written to {}", output);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
