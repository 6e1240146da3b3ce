mod app;
mod command;
mod config;
mod consts;
mod engine;
mod highscore;
mod ticker;
mod util;
mod view;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use lexopt::{Arg, Parser};
use log::{info, LevelFilter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: gridsnake [-c|--config <path>]

Play snake on a 20x20 grid in the terminal.

Options:
  -c, --config <path>   Read configuration from the given file
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run { config })
    }
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(Cli::Run { config }) => match play(config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("gridsnake: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Cli::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage");
            ExitCode::from(2)
        }
    }
}

fn play(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => Config::load(&path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => {
            let path = Config::default_path()?;
            Config::load(&path, true)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
    };
    if let Some(logfile) = config.log_file() {
        init_logging(&logfile, config.logging.level)?;
    }
    info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
    let app = App::new(&config);
    match app.high_score_path() {
        Some(p) => info!("High score file: {}", p.display()),
        None => info!("High score will not be saved"),
    }
    let terminal = ratatui::init();
    let r = app.run(terminal);
    ratatui::restore();
    match r {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        r => r.context("terminal I/O failed"),
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = fs_err::File::create(path).context("failed to open log file")?;
    simplelog::WriteLogger::init(level, simplelog::Config::default(), file)
        .context("failed to initialize logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_iter(
            std::iter::once("gridsnake").chain(args.iter().copied()),
        ))
    }

    #[rstest]
    #[case(&[], Cli::Run { config: None })]
    #[case(&["-c", "snake.toml"], Cli::Run { config: Some(PathBuf::from("snake.toml")) })]
    #[case(&["--config=snake.toml"], Cli::Run { config: Some(PathBuf::from("snake.toml")) })]
    #[case(&["--config", "a.toml", "-c", "b.toml"], Cli::Run { config: Some(PathBuf::from("b.toml")) })]
    #[case(&["-h"], Cli::Help)]
    #[case(&["--help"], Cli::Help)]
    #[case(&["-V"], Cli::Version)]
    #[case(&["--version"], Cli::Version)]
    fn test_parse_args(#[case] args: &[&str], #[case] cli: Cli) {
        assert_eq!(parse(args).ok(), Some(cli));
    }

    #[rstest]
    #[case(&["--speed", "3"])]
    #[case(&["extra"])]
    #[case(&["-c"])]
    fn test_bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err(), "{args:?} should be rejected");
    }
}
