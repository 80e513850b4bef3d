mod app;
mod command;
mod config;
mod consts;
mod guess;
mod launcher;
mod logging;
mod options;
mod snake;
mod stats;
mod tictactoe;
mod util;
mod warning;
use crate::app::{App, Globals};
use crate::config::{Config, ConfigError};
use crate::stats::SessionStats;
use crate::warning::Warning;
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: gamebox [--config PATH] [--log-file PATH]

Terminal mini-games: Snake, Tic-Tac-Toe, and Number Guessing

Options:
  -c, --config PATH     Read configuration from PATH
  -l, --log-file PATH   Append log messages to PATH
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    fn load_config(&self) -> Result<Config, ConfigError> {
        match self.config {
            Some(ref path) => Config::load(path, false),
            None => Config::load(&Config::default_path()?, true),
        }
    }

    fn run(self) -> anyhow::Result<io::Result<()>> {
        let (config, config_err) = match self.load_config() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        };
        if let Some(path) = self.log_file.or(config.logging.file) {
            logging::init(&path, config.logging.level)
                .with_context(|| format!("failed to set up logging to {}", path.display()))?;
        }
        log::info!(
            "Starting {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        if let Some(ref e) = config_err {
            log::warn!("Using default configuration: {e}");
        }
        let globals = Globals {
            options: config.options,
            stats: SessionStats::default(),
        };
        let terminal = ratatui::init();
        let r = App::new(globals, config_err.map(Warning::from)).run(terminal);
        ratatui::restore();
        Ok(r)
    }
}

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => match args.run() {
            Ok(r) => io_exit(r),
            Err(e) => {
                eprintln!("gamebox: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gamebox: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gamebox: {e}");
            ExitCode::from(2)
        }
    }
}
