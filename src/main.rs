// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! pfp CLI - resolve usernames to profile picture URLs

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use tracing_subscriber::EnvFilter;

use pfp_resolver::profile::DEFAULT_CONCURRENCY;
use pfp_resolver::{
    Backend, FetchConfig, ProfileResolver, Resolution, ResolutionStats, Settings,
};

/// Exit code for usage and setup errors
const EXIT_USAGE: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pfp_resolver=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(EXIT_USAGE);
    }

    let result = match args[1].as_str() {
        "resolve" => resolve(&args[2..]).await,
        "download" => download(&args[2..]).await,
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("pfp {}", pfp_resolver::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn print_usage() {
    println!(
        r#"pfp - Profile picture resolver

USAGE:
    pfp <COMMAND> [OPTIONS]

COMMANDS:
    resolve <username>...   Print the best profile picture URL per username
    download <username>     Save the profile picture to disk
    help                    Show this help message
    version                 Show version information

OPTIONS:
    --json                  Print a JSON report (with image dimensions)
    --backend <NAME>        plain (default) or chrome
    --device <NAME>         Device to emulate (default: iPhone 12 Pro)
    --config <FILE>         JSON settings file
    --no-preview            Do not fall back to the og:image tag
    --concurrency <N>       Usernames resolved at once (default: {})
    --dir <DIR>             Download directory (default: downloads)

EXIT CODES:
    0 found, 2 not found, 3 fetch failed, 4 extraction failed, 1 usage error.
    With several usernames the highest code wins.

ENVIRONMENT:
    RUST_LOG                Log filter (default: pfp_resolver=info)

EXAMPLES:
    pfp resolve someone
    pfp resolve @someone other --json
    pfp download someone --backend chrome --dir ./pictures
"#,
        DEFAULT_CONCURRENCY
    );
}

#[derive(Debug, Default)]
struct Options {
    usernames: Vec<String>,
    json: bool,
    backend: Backend,
    device: Option<String>,
    config: Option<PathBuf>,
    no_preview: bool,
    concurrency: Option<usize>,
    dir: Option<PathBuf>,
}

impl Options {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut opts = Options::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let mut value = || {
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow!("{} requires a value", arg))
            };

            match arg.as_str() {
                "--json" => opts.json = true,
                "--no-preview" => opts.no_preview = true,
                "--backend" => opts.backend = value()?.parse()?,
                "--device" => opts.device = Some(value()?),
                "--config" => opts.config = Some(PathBuf::from(value()?)),
                "--dir" => opts.dir = Some(PathBuf::from(value()?)),
                "--concurrency" => {
                    let n: usize = value()?
                        .parse()
                        .context("--concurrency expects a positive number")?;
                    if n == 0 {
                        bail!("--concurrency expects a positive number");
                    }
                    opts.concurrency = Some(n);
                }
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                name => opts.usernames.push(name.to_string()),
            }
        }

        Ok(opts)
    }

    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match self.config {
            Some(ref path) => Settings::from_json_file(path)
                .with_context(|| format!("could not load settings from {}", path.display()))?,
            None => Settings {
                fetch: match self.backend {
                    Backend::Plain => FetchConfig::for_plain_http(),
                    Backend::Chrome => FetchConfig::for_rendering(),
                },
                ..Default::default()
            },
        };

        if let Some(ref device) = self.device {
            settings.fetch.device = Some(device.clone());
        }
        if self.no_preview {
            settings.resolver.preview_fallback = false;
        }
        Ok(settings)
    }

    fn resolver(&self) -> anyhow::Result<ProfileResolver> {
        let resolver = ProfileResolver::from_settings(&self.settings()?, self.backend)?
            .probe_dimensions(self.json)
            .concurrency(self.concurrency.unwrap_or(DEFAULT_CONCURRENCY));
        Ok(resolver)
    }
}

async fn resolve(args: &[String]) -> anyhow::Result<u8> {
    let opts = Options::parse(args)?;
    if opts.usernames.is_empty() {
        bail!("Usage: pfp resolve <username>... [OPTIONS]");
    }

    let stats = Arc::new(ResolutionStats::new());
    let resolver = opts.resolver()?.with_observer(stats.clone());
    let results = resolver.resolve_all(&opts.usernames).await;

    if opts.json {
        print_json(&results)?;
    } else {
        for resolution in &results {
            match resolution.url() {
                Some(url) => println!("{}", url),
                None => eprintln!("{}: {}", resolution.username, resolution.outcome),
            }
        }
    }

    tracing::debug!(report = ?stats.report(), "run finished");
    Ok(worst_exit_code(&results))
}

async fn download(args: &[String]) -> anyhow::Result<u8> {
    let opts = Options::parse(args)?;
    let username = match opts.usernames.as_slice() {
        [one] => one,
        _ => bail!("Usage: pfp download <username> [--dir DIR] [OPTIONS]"),
    };

    let resolver = opts.resolver()?;
    let resolution = resolver.resolve(username).await;

    if !resolution.outcome.is_found() {
        eprintln!("{}: {}", resolution.username, resolution.outcome);
        return Ok(resolution.outcome.exit_code());
    }

    let dir = opts.dir.clone().unwrap_or_else(|| PathBuf::from("downloads"));
    match resolver.download(&resolution, &dir).await {
        Ok(path) => {
            if opts.json {
                print_json(std::slice::from_ref(&resolution))?;
            }
            println!("{}", path.display());
            Ok(resolution.outcome.exit_code())
        }
        Err(e) => {
            eprintln!("{}: download failed: {}", resolution.username, e);
            Ok(3)
        }
    }
}

fn print_json(results: &[Resolution]) -> anyhow::Result<()> {
    let text = match results {
        [one] => serde_json::to_string_pretty(one)?,
        many => serde_json::to_string_pretty(many)?,
    };
    println!("{}", text);
    Ok(())
}

fn worst_exit_code(results: &[Resolution]) -> u8 {
    results
        .iter()
        .map(|r| r.outcome.exit_code())
        .max()
        .unwrap_or(0)
}
