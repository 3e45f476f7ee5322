// CLI module for cachegate
// Author: kelexine (https://github.com/kelexine)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cachegate - Read-through caching gateway for REST API clients
#[derive(Parser, Debug)]
#[command(name = "cachegate", version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to ~/.cachegate/config.toml)
    #[arg(long, short, env = "CACHEGATE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch URIs through the caching gateway
    Fetch(FetchArgs),

    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// URIs to fetch, absolute or relative to the configured base URL
    #[arg(required = true)]
    pub uris: Vec<String>,

    /// Print status and headers along with the body
    #[arg(long)]
    pub entity: bool,

    /// Fetch every URI this many times
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Audit uncached fetches, failing on any that are not allowed
    #[arg(long)]
    pub audit: bool,

    /// URI allowed to reach the upstream API while auditing (repeatable)
    #[arg(long = "allow", value_name = "URI")]
    pub allowed: Vec<String>,

    /// Print Prometheus metrics after fetching
    #[arg(long)]
    pub metrics: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let args = Args::parse_from([
            "cachegate", "fetch", "samples/S1", "samples/S2", "--repeat", "2", "--audit",
            "--allow", "samples/S1",
        ]);
        match args.command {
            Command::Fetch(fetch) => {
                assert_eq!(fetch.uris, vec!["samples/S1", "samples/S2"]);
                assert_eq!(fetch.repeat, 2);
                assert!(fetch.audit);
                assert_eq!(fetch.allowed, vec!["samples/S1"]);
                assert!(!fetch.entity);
            }
            Command::Config => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_repeat_must_be_positive() {
        let result = Args::try_parse_from(["cachegate", "fetch", "x", "--repeat", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_is_required() {
        assert!(Args::try_parse_from(["cachegate"]).is_err());
        assert!(Args::try_parse_from(["cachegate", "--config", "c.toml", "config"]).is_ok());
    }
}
