//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use fetcher_core::schema::DEFAULT_DATE_TIME_FORMAT;
use fetcher_core::{ComponentKind, Proxy};

/// Default naming template for saved responses.
pub const DEFAULT_SCHEMA: &str = "page_{INCREMENT}.html";

/// Fetch URLs and save each response under a sequential name.
///
/// Fetcher runs one request per URL and names the output files with a naming
/// schema such as `page_{INCREMENT}.html` or `{DATETIME}_{INCREMENT}.json`.
#[derive(Parser, Debug)]
#[command(name = "fetcher")]
#[command(author, version, about)]
pub struct Args {
    /// URLs to fetch (read from stdin when omitted)
    pub urls: Vec<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory to save responses in
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Naming template for saved files
    #[arg(short = 's', long, default_value = DEFAULT_SCHEMA)]
    pub schema: String,

    /// Map a placeholder to a component kind, e.g. '{N}=increment_zerofilled' (repeatable)
    #[arg(long = "component", value_name = "TOKEN=KIND", value_parser = parse_component)]
    pub components: Vec<(String, ComponentKind)>,

    /// First increment value
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub increment_start: i64,

    /// Zero-fill width for the increment (1-20)
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u8).range(1..=20))]
    pub increment_width: Option<u8>,

    /// Datetime format (Y m d H i s ... letter tokens)
    #[arg(long, default_value = DEFAULT_DATE_TIME_FORMAT)]
    pub datetime_format: String,

    /// Request method
    #[arg(short = 'X', long, value_enum, default_value_t = HttpMethod::Get)]
    pub method: HttpMethod,

    /// Request body (implies POST)
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Extra request header, 'Name: Value' (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// User-Agent to send instead of the default
    #[arg(short = 'A', long)]
    pub user_agent: Option<String>,

    /// Referer header to send
    #[arg(short = 'e', long)]
    pub referrer: Option<String>,

    /// Follow redirects
    #[arg(short = 'L', long)]
    pub location: bool,

    /// Fail on HTTP status 400 and above
    #[arg(short = 'f', long)]
    pub fail: bool,

    /// Proxy, [http|socks4|socks5]://[user:pass@]host[:port]
    #[arg(long, value_parser = parse_proxy)]
    pub proxy: Option<Proxy>,

    /// Proxy credentials, 'user:password'
    #[arg(long, value_name = "USER:PASSWORD", value_parser = parse_proxy_user)]
    pub proxy_user: Option<(String, String)>,

    /// Maximum time per transfer in seconds (1-3600)
    #[arg(short = 'm', long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    /// Maximum time to connect in seconds (1-300)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: Option<u64>,

    /// Print transfer info as JSON lines on stdout
    #[arg(short = 'i', long)]
    pub info: bool,
}

/// Request methods the CLI can send.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl Args {
    /// The placeholder mapping for the naming schema.
    ///
    /// Without explicit `--component` flags, `{INCREMENT}` is an increment
    /// (zero-filled when a width is given) and `{DATETIME}` a datetime.
    pub fn component_map(&self) -> Vec<(String, ComponentKind)> {
        if !self.components.is_empty() {
            return self.components.clone();
        }
        let increment = if self.increment_width.is_some() {
            ComponentKind::IncrementZeroFilled
        } else {
            ComponentKind::Increment
        };
        vec![
            ("{INCREMENT}".to_string(), increment),
            ("{DATETIME}".to_string(), ComponentKind::DateTime),
        ]
    }

    /// The proxy with `--proxy-user` credentials applied.
    pub fn resolved_proxy(&self) -> Option<Proxy> {
        let proxy = self.proxy.clone()?;
        Some(match &self.proxy_user {
            Some((user, password)) => proxy.auth(user, password),
            None => proxy,
        })
    }
}

fn parse_component(value: &str) -> Result<(String, ComponentKind), String> {
    let (token, kind) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected TOKEN=KIND, got '{value}'"))?;
    if token.is_empty() {
        return Err("placeholder token must not be empty".to_string());
    }
    let kind = kind.parse::<ComponentKind>().map_err(|e| e.to_string())?;
    Ok((token.to_string(), kind))
}

fn parse_header(value: &str) -> Result<(String, String), String> {
    let (name, header_value) = value
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: Value', got '{value}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("header name must not be empty".to_string());
    }
    Ok((name.to_string(), header_value.trim().to_string()))
}

fn parse_proxy_user(value: &str) -> Result<(String, String), String> {
    let (user, password) = value
        .split_once(':')
        .ok_or_else(|| "expected 'user:password'".to_string())?;
    if user.is_empty() {
        return Err("proxy user must not be empty".to_string());
    }
    Ok((user.to_string(), password.to_string()))
}

fn parse_proxy(value: &str) -> Result<Proxy, String> {
    value.parse::<Proxy>().map_err(|e| e.to_string())
}
