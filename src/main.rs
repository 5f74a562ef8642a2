//! Purpose: `plandom` CLI entry point for inspecting JSON documents through typed views.
//! Role: Binary crate root; parses args, builds a document, emits JSON on stdout.
//! Invariants: Commands emit one compact JSON object per invocation on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Documents are only read through `api::NodeView` accessors.
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use plandom::api::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_BYTES, Error, ErrorKind, ParseOptions, ParserBackend,
    to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(clap_error_hint(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let options = ParseOptions::new()
        .with_backend(cli.parser.into())
        .with_max_depth(cli.max_depth)
        .with_max_input_bytes(cli.max_input_bytes);

    command_dispatch::dispatch_command(cli.command, &options)
        .map_err(add_lookup_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "plandom",
    version,
    about = "Inspect JSON plan documents through type-checked views",
    long_about = None,
    after_help = r#"EXAMPLES
  $ plandom check plan.json
  $ plandom get plan.json --pointer /children/0/id --as int64
  $ cat plan.json | plandom get - --pointer /children --as len"#
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
    #[arg(
        long,
        default_value = "simd",
        value_enum,
        help = "JSON parser backend: simd|serde"
    )]
    parser: ParserChoice,
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, help = "Maximum container nesting depth")]
    max_depth: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_BYTES, help = "Maximum input size in bytes")]
    max_input_bytes: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ParserChoice {
    Simd,
    Serde,
}

impl From<ParserChoice> for ParserBackend {
    fn from(choice: ParserChoice) -> Self {
        match choice {
            ParserChoice::Simd => ParserBackend::Simd,
            ParserChoice::Serde => ParserBackend::Serde,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Extract {
    Tag,
    Int32,
    Int64,
    Double,
    Bool,
    String,
    Len,
    Keys,
}

impl Extract {
    fn as_str(self) -> &'static str {
        match self {
            Extract::Tag => "tag",
            Extract::Int32 => "int32",
            Extract::Int64 => "int64",
            Extract::Double => "double",
            Extract::Bool => "bool",
            Extract::String => "string",
            Extract::Len => "len",
            Extract::Keys => "keys",
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Parse a document and report whether it is empty and its root tag")]
    Check {
        #[arg(help = "Input file, or - for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    #[command(about = "Navigate to a node and extract a typed value")]
    Get {
        #[arg(help = "Input file, or - for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(long, default_value = "", help = "RFC 6901 JSON Pointer, e.g. /children/0/id")]
        pointer: String,
        #[arg(
            long = "as",
            default_value = "tag",
            value_enum,
            help = "What to extract: tag|int32|int64|double|bool|string|len|keys"
        )]
        extract: Extract,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(input: &Path) -> Result<Vec<u8>, Error> {
    if input.as_os_str() == "-" {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read stdin")
                .with_source(err)
        })?;
        return Ok(bytes);
    }
    fs::read(input).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message(format!("failed to read {}", input.display()))
            .with_hint("Pass an existing file path, or - to read stdin.")
            .with_source(err)
    })
}

fn add_lookup_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::MissingKey => {
            err.with_hint("List the members of the parent with `--as keys`.")
        }
        ErrorKind::IndexOutOfRange => err.with_hint("Check the array size with `--as len`."),
        _ => err,
    }
}

fn emit_json(value: Value) {
    let json = serde_json::to_string(&value)
        .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Parse => "can't parse JSON".to_string(),
        ErrorKind::TypeMismatch => "type mismatch".to_string(),
        ErrorKind::MissingKey => "key is null or missing".to_string(),
        ErrorKind::NotArray => "value is not an array".to_string(),
        ErrorKind::IndexOutOfRange => "index out of range".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(key) = err.key() {
        inner.insert("key".to_string(), json!(key));
    }
    if let Some(index) = err.index() {
        inner.insert("index".to_string(), json!(index));
    }
    if let Some(found) = err.found() {
        inner.insert("found".to_string(), json!(found.as_str()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(key) = err.key() {
        lines.push(format!(
            "{} {key}",
            colorize_label("key:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(index) = err.index() {
        lines.push(format!(
            "{} {index}",
            colorize_label("index:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let subcommand = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .and_then(|usage| {
            let mut tokens = usage.split_whitespace().skip_while(|t| *t != "plandom");
            tokens.next()?;
            tokens.next().filter(|token| !token.starts_with(['-', '<', '[']))
        });

    match subcommand {
        Some(name) => format!("Try `plandom {name} --help`."),
        None => "Try `plandom --help`.".to_string(),
    }
}
