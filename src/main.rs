mod app;
mod calendar;
mod help;
mod locale;
mod theme;
use crate::app::App;
use crate::calendar::{build_month_grid, DatePicker};
use crate::locale::{BuiltinLocale, Locale};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use log::info;
use ratatui::DefaultTerminal;
use std::io;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        locale: BuiltinLocale,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut locale = BuiltinLocale::default();
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("locale") => locale = parser.value()?.parse()?,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            locale,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                locale,
                log_file,
            } => {
                let _logger = log_file.map(init_logging).transpose()?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let start = date.unwrap_or(today);
                build_month_grid(start, locale.week_start_day())
                    .with_context(|| format!("cannot display the month of {start}"))?;
                info!("Starting at {start} with locale {locale}");
                let chosen = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let mut chosen = None;
                    let picker = DatePicker::new(today, locale, |day| chosen = Some(day))
                        .start_month(start);
                    App::new(picker)
                        .run(&mut terminal)
                        .context("error running calendar")?;
                    Ok(chosen)
                })?;
                if let Some(day) = chosen {
                    println!("{}", day.format(&YMD_FMT)?);
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: monthpick [-l LOCALE] [--log-file PATH] [YYYY-MM-DD]");
                println!();
                println!("Terminal month-grid date picker with locale-aware labels");
                println!();
                println!("Shows the month containing the given date (default: today).  On exit,");
                println!("the last date selected with the mouse is printed.");
                println!();
                println!("Options:");
                println!("  -l, --locale LOCALE  Label language: en-US (default) or fr");
                println!("  --log-file PATH      Write log messages to the given file");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// Logging to the terminal would clobber the UI, so messages only go to a file.
// The level is taken from `RUST_LOG` if set.
fn init_logging(path: PathBuf) -> anyhow::Result<LoggerHandle> {
    let spec = FileSpec::try_from(path).context("invalid log file path")?;
    Logger::try_with_env_or_str("info")
        .context("invalid log specification")?
        .log_to_file(spec)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    let released = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    let value = r?;
    released.context("failed to disable mouse capture")?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("monthpick").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                date: None,
                locale: BuiltinLocale::EnUs,
                log_file: None,
            }
        );
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            parse(&["--locale", "fr", "--log-file", "picker.log", "2024-03-15"]).unwrap(),
            Command::Run {
                date: Some(date!(2024 - 03 - 15)),
                locale: BuiltinLocale::Fr,
                log_file: Some(PathBuf::from("picker.log")),
            }
        );
        assert_eq!(
            parse(&["-l", "en-US"]).unwrap(),
            Command::Run {
                date: None,
                locale: BuiltinLocale::EnUs,
                log_file: None,
            }
        );
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["--locale", "de"]).is_err());
        assert!(parse(&["2024-13-01"]).is_err());
        assert!(parse(&["2024-03-01", "2024-04-01"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }
}
