//! CLI entry point for the fetcher tool.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use fetcher_core::{NamingSchema, Request};
use tracing::{debug, info, warn};

mod cli;

use cli::{Args, HttpMethod};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout is reserved for --info output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    // Read input: from positional args or stdin
    let input_text = if !args.urls.is_empty() {
        args.urls.join("\n")
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        info!("No input provided. Pipe URLs via stdin or pass as arguments.");
        info!("Example: echo 'https://example.com/page.html' | fetcher -s 'page_{{INCREMENT}}.html'");
        return Ok(());
    };

    let urls = parse_url_lines(&input_text);
    if urls.is_empty() {
        info!("No URLs found in input");
        return Ok(());
    }

    tokio::fs::create_dir_all(&args.output_dir)
        .await
        .with_context(|| format!("creating output directory {}", args.output_dir.display()))?;

    let mut schema = build_schema(&args);
    let template = build_request(&args);

    info!(urls = urls.len(), schema = %schema.template(), "Fetching");

    for url in urls {
        let name = schema
            .next()
            .with_context(|| format!("naming output for {url}"))?;
        let path = args.output_dir.join(&name);

        let response = request_for(&template, &args, url, &path)
            .execute()
            .await
            .with_context(|| format!("fetching {url}"))?;

        if !response.is_success() {
            warn!(url = %url, status = response.status_code, "non-success status");
        }
        info!(
            url = %url,
            path = %path.display(),
            status = response.status_code,
            bytes = response.bytes_written,
            "Saved"
        );

        if let Some(transfer) = &response.info {
            println!("{}", serde_json::to_string(transfer)?);
        }
    }

    Ok(())
}

/// One URL per line; blank lines and `#` comments are skipped.
fn parse_url_lines(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn build_schema(args: &Args) -> NamingSchema {
    let mut schema = NamingSchema::new(args.schema.clone(), args.component_map());
    schema.set_increment_start(args.increment_start);
    if let Some(width) = args.increment_width {
        schema.set_increment_width(usize::from(width));
    }
    schema.set_date_time_format(args.datetime_format.clone());
    schema
}

/// Options shared by every URL's request.
fn build_request(args: &Args) -> Request {
    let mut request = Request::new()
        .headers(args.headers.clone())
        .follow_location(args.location)
        .auto_referrer(args.location)
        .fail_on_error(args.fail)
        .collect_info(args.info);

    request = match (args.method, &args.data) {
        (HttpMethod::Delete, _) => request.delete(),
        (_, Some(data)) => request.post_body(data.clone()),
        (HttpMethod::Post, None) => request.post(),
        (HttpMethod::Get, None) => request,
    };
    if let Some(user_agent) = &args.user_agent {
        request = request.user_agent(user_agent);
    }
    if let Some(referrer) = &args.referrer {
        request = request.referrer(referrer);
    }
    if let Some(proxy) = args.resolved_proxy() {
        request = request.proxy(proxy);
    }
    if let Some(timeout) = args.timeout {
        request = request.timeout(timeout);
    }
    if let Some(timeout) = args.connect_timeout {
        request = request.connect_timeout(timeout);
    }
    request
}

/// The per-URL request saving into `path`.
///
/// `file()` turns redirects on, so `-L` is applied after it.
fn request_for(template: &Request, args: &Args, url: &str, path: &Path) -> Request {
    template
        .clone()
        .url(url)
        .file(path)
        .follow_location(args.location)
}
