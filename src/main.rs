use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rowing_safety::config::{DEFAULT_CONFIG_FILE, OutputFormat, Settings};
use rowing_safety::logging::{self, Component, LogLevel};
use rowing_safety::model::ObservationOption;
use rowing_safety::{Fog, RawObservation, Thunder, WaterTemp, Wave, decision, report, validate};

#[derive(Parser)]
#[command(
    name = "rowing-safety",
    version,
    about = "Decide whether crews may launch, from the club risk chart"
)]
struct Cli {
    /// Settings file (TOML). Defaults to ./rowing_safety.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate current conditions for every crew category
    Check(CheckArgs),
    /// Print the risk chart
    Chart,
    /// List accepted option keys and labels for each field
    Options,
}

#[derive(Args)]
struct CheckArgs {
    /// Observation file (TOML). Flags given on the command line win.
    #[arg(long)]
    observation: Option<PathBuf>,

    /// Wind speed in m/s; decimals are floored
    #[arg(long, allow_hyphen_values = true)]
    wind_speed: Option<String>,

    #[arg(long)]
    water_temp: Option<String>,

    #[arg(long)]
    wave: Option<String>,

    #[arg(long)]
    fog: Option<String>,

    #[arg(long)]
    thunder: Option<String>,
}

impl CheckArgs {
    fn into_raw(self) -> Result<RawObservation, String> {
        let mut raw = match &self.observation {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
                toml::from_str::<RawObservation>(&text)
                    .map_err(|e| format!("Invalid observation file {}: {}", path.display(), e))?
            }
            None => RawObservation::default(),
        };

        if self.wind_speed.is_some() {
            raw.wind_speed = self.wind_speed;
        }
        if self.water_temp.is_some() {
            raw.water_temp = self.water_temp;
        }
        if self.wave.is_some() {
            raw.wave = self.wave;
        }
        if self.fog.is_some() {
            raw.fog = self.fog;
        }
        if self.thunder.is_some() {
            raw.thunder = self.thunder;
        }
        Ok(raw)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            // No settings means no configured logger yet: report on the console.
            logging::init_logger(LogLevel::Error, None, false);
            logging::error(Component::Config, None, &e.to_string());
            return ExitCode::from(1);
        }
    };
    if cli.json {
        settings.output = OutputFormat::Json;
    }

    logging::init_logger(
        settings.logging.level,
        settings.logging.file.as_deref(),
        settings.logging.console_timestamps,
    );
    let source = match &cli.config {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE.to_string(),
        None => "defaults".to_string(),
    };
    logging::debug(
        Component::Config,
        Some(&source),
        &format!("Settings loaded, output {:?}", settings.output),
    );

    match cli.command {
        Command::Check(args) => run_check(args, settings.output),
        Command::Chart => {
            print!("{}", report::render_chart());
            ExitCode::SUCCESS
        }
        Command::Options => {
            print_options();
            ExitCode::SUCCESS
        }
    }
}

fn run_check(args: CheckArgs, output: OutputFormat) -> ExitCode {
    let raw = match args.into_raw() {
        Ok(raw) => raw,
        Err(message) => {
            logging::error(Component::Cli, None, &message);
            eprintln!("{}", message);
            return ExitCode::from(1);
        }
    };

    let validation = validate(&raw);
    if !validation.ok {
        logging::log_validation_failure(&validation.field_errors);
        match output {
            OutputFormat::Json => {
                if !print_json(&validation) {
                    return ExitCode::from(1);
                }
            }
            OutputFormat::Text => {
                eprint!("{}", report::render_field_errors(&validation.field_errors))
            }
        }
        return ExitCode::from(2);
    }

    let observation = match raw.to_observation() {
        Ok(o) => o,
        Err(e) => {
            logging::warn(Component::Cli, None, &e.to_string());
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let result = decision::evaluate(&observation);
    logging::log_evaluation_summary(&observation, &result);
    match output {
        OutputFormat::Json => {
            if !print_json(&result) {
                return ExitCode::from(1);
            }
        }
        OutputFormat::Text => print!("{}", report::render_result(&result)),
    }
    ExitCode::SUCCESS
}

/// Prints `value` as pretty JSON on stdout. Returns false, after logging,
/// if it could not be encoded or written.
fn print_json<T: Serialize>(value: &T) -> bool {
    match write_json(std::io::stdout().lock(), value) {
        Ok(()) => true,
        Err(e) => {
            logging::error(Component::Cli, None, &format!("JSON output failed: {}", e));
            false
        }
    }
}

fn write_json<W: Write, T: Serialize>(mut out: W, value: &T) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out).map_err(serde_json::Error::io)
}

fn print_options() {
    fn section<T: ObservationOption>(title: &str) {
        println!("{}:", title);
        for option in T::ALL {
            println!("  {:<24} {}", option.key(), option.label());
        }
    }

    println!("fields: {}", report::field_list());
    section::<WaterTemp>("water_temp");
    section::<Wave>("wave");
    section::<Fog>("fog");
    section::<Thunder>("thunder");
}
