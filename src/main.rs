mod debug_report;

use std::io::{self, IsTerminal, Read};
use tajweed::{KindSet, Options, annotate_verbose_with, render_marked_with};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tajweed=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
    debug!("tajweed v{} starting", env!("CARGO_PKG_VERSION"));

    let res = annotate_verbose_with(&config.input, &config.options);
    match config.format {
        Format::Report => debug_report::print_run(&res, config.color),
        Format::Html => match render_marked_with(&res.text, &res.spans, &config.options) {
            Ok(marked) => println!("{marked}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
        Format::Json => match serde_json::to_string_pretty(&res) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to encode JSON: {err}");
                std::process::exit(1);
            }
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Report,
    Html,
    Json,
}

impl Format {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "report" => Ok(Format::Report),
            "html" => Ok(Format::Html),
            "json" => Ok(Format::Json),
            other => Err(format!("error: invalid --format '{other}' (expected report, html or json)")),
        }
    }
}

struct CliConfig {
    input: String,
    format: Format,
    options: Options,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut format = Format::Report;
    let mut options = Options::default();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("tajweed {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--no-normalize" => options.normalize = false,
            "--no-waqf-separator" => options.waqf_separator = false,
            "--format" => {
                let value = args.next().ok_or_else(|| "error: --format expects a value".to_string())?;
                format = Format::parse(&value)?;
            }
            "--disable" => {
                let value = args.next().ok_or_else(|| "error: --disable expects a value".to_string())?;
                options.disabled |= parse_kinds(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--format=") => {
                format = Format::parse(arg.trim_start_matches("--format="))?;
            }
            _ if arg.starts_with("--disable=") => {
                options.disabled |= parse_kinds(arg.trim_start_matches("--disable="))?;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, format, options, color })
}

fn parse_kinds(value: &str) -> Result<KindSet, String> {
    value.parse::<KindSet>().map_err(|err| format!("error: invalid --disable '{value}': {err}"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "tajweed {version}

Annotate fully-diacritized Quranic text with Tajweed rule spans.

Usage:
  tajweed [OPTIONS] [--] <input...>
  tajweed [OPTIONS] --input <text>

Options:
  -i, --input <text>         Verse text. If omitted, reads remaining args
                             or stdin when no args are provided.
  --format <fmt>             report (default), html or json.
  --disable <kinds>          Comma-separated rule kinds to hide, e.g.
                             'ghunna,madd-asli'. 'madd' and 'waqf' name
                             whole families.
  --no-normalize             Scan the input as given, without NFC.
  --no-waqf-separator        Do not insert a space before pause signs.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter, e.g. 'tajweed=trace'. Logs go to stderr.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
