use clap::{Parser, Subcommand};
use dial::{Point, ValueDomain};
use regulator::config::{self, Config};
use regulator::events::RegulatorEvent;
use regulator::state::Regulator;
use regulator::trace::{self, Replay};
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "regulator", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the default location
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Run a pointer script and print every notification
    Replay {
        /// Script file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Convert one pointer position to a value
    Value {
        x: f64,
        y: f64,
        /// Rotation center as X,Y
        #[arg(long, value_parser = parse_point, default_value = "0,0")]
        center: Point,
    },
    /// Look up the gradient color for a value
    Color { value: f64 },
    /// Print the lookup stops and the re-phased rendering stops
    Stops,
    /// Write the default config file and print its path
    InitConfig,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or("expected X,Y")?;
    let coord = |c: &str| c.trim().parse::<f64>().map_err(|e| e.to_string());
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let path = cli.config.as_deref();

    match cli.command {
        Commands::InitConfig => {
            let written = config::write_default_config(path)?;
            println!("{}", written.display());
            Ok(())
        }
        Commands::Replay { file } => {
            let mut regulator = load(path)?.build_regulator()?;
            replay(&mut regulator, file)
        }
        Commands::Value { x, y, center } => {
            let regulator = load(path)?.build_regulator()?;
            let value = regulator.geometry().pointer_to_value(
                center,
                Point::new(x, y),
                regulator.domain(),
            )?;
            println!("{}", format_value(&regulator, value));
            Ok(())
        }
        Commands::Color { value } => {
            let config = load(path)?;
            // plain regulators still answer with their configured gradient
            let wheel = config.wheel()?;
            let domain = ValueDomain::new(config.min, config.max, value);
            println!("{}", wheel.color_at(domain.value(), &domain));
            Ok(())
        }
        Commands::Stops => {
            let wheel = load(path)?.wheel()?;
            println!("lookup:");
            for stop in wheel.lookup_stops() {
                println!("  {:.4} {}", stop.offset, stop.color);
            }
            println!("rendering:");
            for stop in wheel.rendering_stops() {
                println!("  {:.4} {}", stop.offset, stop.color);
            }
            Ok(())
        }
    }
}

/// An explicit `--config` must load; the default location falls back to defaults.
fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    Ok(match path {
        Some(p) => config::load_config(Some(p))?,
        None => config::load_or_default(None),
    })
}

fn replay(regulator: &mut Regulator, file: Option<PathBuf>) -> anyhow::Result<()> {
    let steps = match file {
        Some(path) => trace::parse(BufReader::new(fs_err::File::open(path)?))?,
        None => trace::parse(std::io::stdin().lock())?,
    };

    let rx = regulator.subscribe();
    let mut replay = Replay::default();
    for step in steps {
        replay.apply(regulator, step);
        while let Ok(event) = rx.try_recv() {
            print_event(regulator, event);
        }
    }
    Ok(())
}

fn print_event(regulator: &Regulator, event: RegulatorEvent) {
    match event {
        RegulatorEvent::ValueChanged(v) | RegulatorEvent::TargetCommitted(v) => {
            let angle = regulator
                .geometry()
                .value_to_indicator_angle(v, regulator.domain());
            let color = regulator
                .wheel()
                .map(|w| w.color_at(v, regulator.domain()))
                .unwrap_or_else(|| regulator.bar_color());
            println!(
                "{event} {} angle={angle:.2} color={color}",
                format_value(regulator, v)
            );
        }
        RegulatorEvent::Switched(on) => println!("{event} {}", if on { "on" } else { "off" }),
    }
}

fn format_value(regulator: &Regulator, value: f64) -> String {
    format!("{:.*}{}", regulator.decimals().get(), value, regulator.unit())
}
