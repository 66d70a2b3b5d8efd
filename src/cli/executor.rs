//! Command executor for dispatching CLI commands

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Execute the parsed command with already merged and validated settings
///
/// A missing subcommand runs `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match cli.command() {
        Commands::Serve { dry_run, host, port, .. } => {
            warn_privileged_bind(host.as_deref(), port);
            ServeCommandHandler::new(settings).execute(dry_run).await
        }
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await?;
            Ok(())
        }
    }
}

fn warn_privileged_bind(host: Option<&str>, port: Option<u16>) {
    if let (Some("0.0.0.0"), Some(port_num)) = (host, port)
        && port_num < 1024
    {
        tracing::warn!(
            port = port_num,
            "Binding to 0.0.0.0 on a privileged port typically requires root privileges"
        );
    }
}
