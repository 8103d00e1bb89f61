//! Command line front end.
//!
//! ```text
//! jetphotos-extract parse page.html
//! jetphotos-extract url --param airline=Lufthansa
//! ```
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use argh::FromArgs;
use jetphotos_extract::{extract_guarded, ApiResponse, Extractor, SearchParams, SiteConfig};
use tracing_subscriber::EnvFilter;

/// Extract photo records from JetPhotos search result pages.
#[derive(FromArgs)]
struct Cli {
    /// origin that relative links are resolved against
    #[argh(option, default = "String::from(\"https://www.jetphotos.com\")")]
    origin: String,

    /// indent the JSON output
    #[argh(switch)]
    pretty: bool,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Parse(Parse),
    Url(UrlCommand),
    #[cfg(feature = "fetch")]
    Search(Search),
}

/// Extract records from a saved page.
#[derive(FromArgs)]
#[argh(subcommand, name = "parse")]
struct Parse {
    /// HTML file to read, stdin if omitted
    #[argh(positional)]
    file: Option<String>,
}

/// Print the upstream search URL for the given parameters.
#[derive(FromArgs)]
#[argh(subcommand, name = "url")]
struct UrlCommand {
    /// search parameter as key=value, may be repeated
    #[argh(option, from_str_fn(parse_param))]
    param: Vec<(String, String)>,
}

/// Search the live site and print the response body.
#[cfg(feature = "fetch")]
#[derive(FromArgs)]
#[argh(subcommand, name = "search")]
struct Search {
    /// search parameter as key=value, may be repeated
    #[argh(option, from_str_fn(parse_param))]
    param: Vec<(String, String)>,
}

fn parse_param(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, value)) => Ok((key.to_owned(), value.to_owned())),
        None => Err(format!("expected key=value, got {:?}", value)),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli: Cli = argh::from_env();
    let site = match SiteConfig::new(&cli.origin) {
        Ok(site) => site,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let response = match cli.command {
        Command::Parse(parse) => {
            let html = match read_input(parse.file.as_deref()) {
                Ok(html) => html,
                Err(e) => {
                    eprintln!("failed to read input: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            match extract_guarded(&Extractor::new(site), &html) {
                Ok(photos) => ApiResponse::from(photos),
                Err(e) => ApiResponse::from(e),
            }
        }
        Command::Url(url) => {
            let params: SearchParams = url.param.into_iter().collect();
            return match params.upstream_url(&site) {
                Ok(url) => {
                    println!("{}", url);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            };
        }
        #[cfg(feature = "fetch")]
        Command::Search(search) => {
            use jetphotos_extract::{HttpUpstream, Service};

            let params: SearchParams = search.param.into_iter().collect();
            match HttpUpstream::new() {
                Ok(upstream) => Service::new(Extractor::new(site), upstream).handle(&params),
                Err(e) => ApiResponse::from(e),
            }
        }
    };

    if cli.pretty {
        println!("{}", response.to_json_pretty());
    } else {
        println!("{}", response.to_json());
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn read_input(file: Option<&str>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
