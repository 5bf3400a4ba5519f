//! Paper Insights API server
//!
//! Serves the insights markdown file over HTTP.

use insight_api::{config::ServerConfig, init_tracing, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults");
        eprintln!("Usage: insight-api --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Paper Insights API - serves research insights as JSON");
    println!();
    println!("USAGE:");
    println!("    insight-api --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    GET /api/insights  Parsed insights, in file order");
    println!("    GET /health        Liveness and insights file presence");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 3000)");
    println!("    - insights_path: Markdown file to serve (default 'docs/research-insights.md')");
    println!();
}
