//! Command line entry point: build a label mapping from a config and save it.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use seglabels::{ColorSpec, LabelError, LabelSource, LogLevel, Rgb, parse_color};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Label source config (JSON object with a "type" key)
    config: PathBuf,

    /// Where to write the label mapping JSON; printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only keep rows with this color ("R,G,B", hex or name); repeatable
    #[arg(long = "keep-color", value_parser = parse_color_arg)]
    keep_colors: Vec<Rgb>,

    /// Logging verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn parse_color_arg(arg: &str) -> Result<Rgb, String> {
    let spec = if arg.contains(',') {
        let channels = arg
            .split(',')
            .map(|part| part.trim().parse::<f32>().map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        let channels: [f32; 3] = channels
            .try_into()
            .map_err(|_| format!("expected three channels in '{}'", arg))?;
        ColorSpec::Channels(channels)
    } else {
        ColorSpec::from(arg)
    };
    parse_color(&spec).map_err(|e| e.to_string())
}

fn run(args: &Args) -> Result<(), LabelError> {
    let source = LabelSource::from_config_file(&args.config)?;
    info!("Building label mapping from '{}' source", source.kind());

    let mut mapping = source.build()?;
    if !args.keep_colors.is_empty() {
        let keep: HashSet<Rgb> = args.keep_colors.iter().copied().collect();
        mapping = mapping.filter_by_colors(&keep)?;
        info!("Kept {} of {} requested colors", mapping.len(), keep.len());
    }

    match &args.output {
        Some(path) => mapping.to_json_file(path)?,
        None => println!("{}", mapping.to_json_string()?),
    }
    info!("{}", mapping);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level.to_level_filter())
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
