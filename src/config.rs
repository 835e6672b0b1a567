use std::borrow::Cow;
use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use encoding_rs::Encoding;
use url::Url;

use crate::error::ScrapeError;
use crate::storefront::Storefront;

pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_ENCODING: &str = "utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Text encoding used for everything written to stdout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputEncoding(&'static Encoding);

impl OutputEncoding {
    pub fn from_label(label: &str) -> Result<Self, String> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|enc| Self(enc.output_encoding()))
            .ok_or_else(|| format!("unknown encoding '{label}'"))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Unmappable characters come out as HTML numeric character references.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        let (bytes, _, _) = self.0.encode(text);
        bytes
    }
}

impl Default for OutputEncoding {
    fn default() -> Self {
        Self(encoding_rs::UTF_8)
    }
}

/// Everything one scrape needs, fixed once the command line is read.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub app_id: String,
    pub format: OutputFormat,
    pub locale: String,
    pub encoding: OutputEncoding,
    pub base_url: Option<Url>,
}

#[derive(Debug)]
pub enum Invocation {
    /// `--help` or `--version`: print the text and stop.
    Help(String),
    Scrape(ScrapeConfig),
}

/// A rejected command line, with what to tell the user in each format.
#[derive(Debug)]
pub struct ArgumentFailure {
    pub format: OutputFormat,
    pub message: String,
    pub error: ScrapeError,
}

#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Required. ID of the app to get info on
    #[arg(short, long, value_name = "ID")]
    id: Option<String>,

    /// Outputs JSON instead of human readable info
    #[arg(short, long)]
    json: bool,

    /// Sets the language to use
    #[arg(short, long, value_name = "LOCALE", default_value = DEFAULT_LOCALE)]
    locale: String,

    /// Sets the output encoding to use
    #[arg(
        short,
        long,
        value_name = "CODING",
        default_value = DEFAULT_ENCODING,
        value_parser = OutputEncoding::from_label
    )]
    encoding: OutputEncoding,

    /// Storefront host override, for mirrors and local testing
    #[arg(long, env = "STOREFRONT_BASE_URL", hide = true)]
    base_url: Option<Url>,
}

fn command(storefront: Storefront) -> clap::Command {
    Args::command()
        .name(storefront.program_name())
        .override_usage(format!("{} -i <ID> [OPTIONS]", storefront.program_name()))
        .about(storefront.about())
        .after_help(storefront.locale_note())
}

/// Reads the full argument list, program name first.
pub fn parse<I, T>(storefront: Storefront, args: I) -> Result<Invocation, ArgumentFailure>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let requested = requested_format(&args);

    let mut command = command(storefront);
    let parsed = command
        .try_get_matches_from_mut(args)
        .and_then(|matches| Args::from_arg_matches(&matches));

    let args = match parsed {
        Ok(args) => args,
        Err(err) => return clap_outcome(err, requested),
    };

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let Some(app_id) = args.id.filter(|id| !id.is_empty()) else {
        let help = command.render_help();
        return Err(ArgumentFailure {
            format,
            message: format!(
                "option -i or --id is required to supply the app id.\n\
                 without it there is nothing to scrape :(\n{help}"
            ),
            error: ScrapeError::Argument("option -i or --id is required".to_string()),
        });
    };

    Ok(Invocation::Scrape(ScrapeConfig {
        app_id,
        format,
        locale: args.locale,
        encoding: args.encoding,
        base_url: args.base_url,
    }))
}

fn clap_outcome(err: clap::Error, format: OutputFormat) -> Result<Invocation, ArgumentFailure> {
    let rendered = err.render().to_string();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Ok(Invocation::Help(rendered)),
        _ => {
            let summary = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            Err(ArgumentFailure {
                format,
                message: rendered,
                error: ScrapeError::Argument(summary),
            })
        }
    }
}

/// Best effort look for `-j`/`--json` in a command line clap refused, so the
/// refusal can still be reported as JSON.
fn requested_format(args: &[OsString]) -> OutputFormat {
    let json = args
        .iter()
        .skip(1)
        .filter_map(|arg| arg.to_str())
        .take_while(|arg| *arg != "--")
        .any(|arg| {
            if arg == "--json" {
                return true;
            }
            let Some(cluster) = arg.strip_prefix('-') else {
                return false;
            };
            if cluster.starts_with('-') {
                return false;
            }
            for flag in cluster.chars() {
                match flag {
                    'j' => return true,
                    'h' | 'V' => continue,
                    // every other short option takes the rest as its value
                    _ => return false,
                }
            }
            false
        });

    if json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    }
}
