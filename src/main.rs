// zmapsdk - REST API server for the ZMap network scanner

use colored::*;
use std::env;
use std::process;
use zmapsdk::constants;
use zmapsdk::error::{Result, ZmapError};
use zmapsdk::logging::{init_logging, LogConfig};
use zmapsdk::{api, utils};

/// Application entry point
#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        process::exit(0);
    }

    let options = match ServerOptions::from_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    };

    let log_config = match LogConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    };

    let _guards = match init_logging(&log_config) {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(options).await {
        eprintln!("{} {}", "✗".red().bold(), e);
        process::exit(1);
    }
}

/// Print usage information
fn print_usage() {
    eprintln!(
        "{}",
        "usage: zmapsdk [--host HOST] [--port PORT]".red().bold()
    );
    eprintln!("Options:");
    eprintln!("  --host HOST    Host to bind the API server to (default: 127.0.0.1)");
    eprintln!("  --port PORT    Port to bind the API server to (default: 8000)");
    eprintln!("Environment:");
    eprintln!("  ZMAPSDK_LOG_LEVEL, ZMAPSDK_LOG_CONSOLE, ZMAPSDK_LOG_JSON,");
    eprintln!("  ZMAPSDK_LOG_FILE, ZMAPSDK_LOG_MAX_FILES");
    eprintln!("Examples:");
    eprintln!("  zmapsdk                          # Serve on 127.0.0.1:8000");
    eprintln!("  zmapsdk --host 0.0.0.0 --port 9000");
}

/// Server bind options parsed from the command line
#[derive(Debug)]
struct ServerOptions {
    host: String,
    port: u16,
}

impl ServerOptions {
    fn from_args(args: &[String]) -> Result<Self> {
        let host = Self::parse_value_arg(args, "--host")?
            .unwrap_or_else(|| constants::api::DEFAULT_HOST.to_string());

        let port = match Self::parse_value_arg(args, "--port")? {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ZmapError::config(format!("Invalid port: {}", raw)))?,
            None => constants::api::DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    fn parse_value_arg(args: &[String], flag: &str) -> Result<Option<String>> {
        for (i, arg) in args.iter().enumerate() {
            if arg == flag {
                if i + 1 >= args.len() {
                    return Err(ZmapError::config(format!("Missing value for {}", flag)));
                }
                return Ok(Some(args[i + 1].clone()));
            }
        }
        Ok(None)
    }
}

/// Main application logic
async fn run(options: ServerOptions) -> Result<()> {
    utils::check_dependencies()?;

    println!(
        "{} Serving ZMap SDK API on {}:{}",
        "ZMAPSDK".bright_yellow(),
        options.host,
        options.port
    );

    api::serve(&options.host, options.port).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_usage_doesnt_panic() {
        print_usage();
    }

    #[test]
    fn test_server_options_defaults() {
        let args = vec!["zmapsdk".to_string()];
        let options = ServerOptions::from_args(&args).unwrap();
        assert_eq!(options.host, "127.0.0.1");
        assert_eq!(options.port, 8000);
    }

    #[test]
    fn test_server_options_custom() {
        let args = vec![
            "zmapsdk".to_string(),
            "--host".to_string(),
            "0.0.0.0".to_string(),
            "--port".to_string(),
            "9000".to_string(),
        ];
        let options = ServerOptions::from_args(&args).unwrap();
        assert_eq!(options.host, "0.0.0.0");
        assert_eq!(options.port, 9000);
    }

    #[test]
    fn test_server_options_invalid_port() {
        let args = vec![
            "zmapsdk".to_string(),
            "--port".to_string(),
            "notaport".to_string(),
        ];
        assert!(ServerOptions::from_args(&args).is_err());
    }

    #[test]
    fn test_server_options_missing_value() {
        let args = vec!["zmapsdk".to_string(), "--port".to_string()];
        assert!(ServerOptions::from_args(&args).is_err());
    }
}
