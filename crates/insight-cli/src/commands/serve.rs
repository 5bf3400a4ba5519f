//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the serve command.
pub async fn execute_serve(args: ServeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(port) = args.port {
        server.bind_port = port;
    }

    println!(
        "{}",
        formatter.info(&format!(
            "Serving {} on http://{}/api/insights (Ctrl+C to stop)",
            server.insights_path.display(),
            server.bind_addr()
        ))
    );

    insight_api::start_server(server).await?;

    Ok(())
}
