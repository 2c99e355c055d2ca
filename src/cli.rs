//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Log in to a cookie-session service and save one authenticated read.
///
/// Posts the credentials to the login endpoint, keeps the session cookie for
/// the target base URL, then fetches --url and writes the body to --output.
#[derive(Parser, Debug)]
#[command(name = "session-client")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Login username
    #[arg(short = 'u', long, env = "SESSION_CLIENT_USERNAME")]
    pub username: String,

    /// Login password
    #[arg(short = 'p', long, env = "SESSION_CLIENT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Login endpoint that receives the JSON credential POST
    #[arg(long)]
    pub login_url: String,

    /// Base URL of the target API; the session cookie is scoped to it
    #[arg(long)]
    pub base_url: String,

    /// Resource to fetch once authenticated
    #[arg(long)]
    pub url: String,

    /// File the fetched body is written to
    #[arg(short = 'o', long, default_value = "data.txt")]
    pub output: PathBuf,

    /// TCP connect timeout in seconds (1-3600; transport default when omitted)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds, applied to the whole request (1-3600; none when omitted)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,
}
