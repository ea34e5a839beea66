//! vane — operator CLI for canary and rolling rollouts.
//!
//! # Usage
//!
//! ```text
//! vane rollout get rol-abc123 --watch --timeout-seconds 600
//! vane rollout promote rol-abc123
//! vane --profile staging rollout abort rol-abc123
//! vane workload rollback checkout 19 --cluster-id prod-1 --namespace payments
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vane_core::{ConfigFile, ENV_CONFIG, Overrides, Settings};
use vane_gateway::{RolloutAction, WorkloadAction};

mod commands;
mod signals;

#[derive(Parser)]
#[command(
    name = "vane",
    about = "Vane — inspect and control progressive rollouts",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config profile to use.
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Access token (overrides the profile and VANE_TOKEN).
    #[arg(long, global = true)]
    token: Option<String>,

    /// Control plane base URL.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Config file (default: ~/.vane/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and control rollouts
    Rollout {
        #[command(subcommand)]
        command: RolloutCommand,
    },
    /// Perform changes on a workload level
    Workload {
        #[command(flatten)]
        scope: WorkloadScope,

        #[command(subcommand)]
        command: WorkloadCommand,
    },
}

#[derive(Args)]
struct WorkloadScope {
    /// Cluster the workload runs in.
    #[arg(long, global = true)]
    cluster_id: Option<String>,

    /// Namespace the workload is found in.
    #[arg(long, global = true)]
    namespace: Option<String>,
}

#[derive(Subcommand)]
enum WorkloadCommand {
    /// Restart the currently running pods of the live revision.
    Restart {
        #[arg(value_name = "SPOTDEPLOYMENT_NAME")]
        name: String,
    },
    /// Retry the latest rolled-back deployment. Triggers a new rollout.
    Retry {
        #[arg(value_name = "SPOTDEPLOYMENT_NAME")]
        name: String,
        revision_id: String,
    },
    /// Roll back to one of the last 20 revisions. Triggers a new rollout.
    Rollback {
        #[arg(value_name = "SPOTDEPLOYMENT_NAME")]
        name: String,
        revision_id: String,
    },
}

#[derive(Subcommand)]
enum RolloutCommand {
    /// Show the status of a rollout, once or continuously.
    Get {
        rollout_id: String,

        /// Keep the view open and redraw on every change.
        #[arg(short, long)]
        watch: bool,

        /// Disable colored output.
        #[arg(long)]
        no_color: bool,

        /// Stop watching after this many seconds.
        #[arg(short = 't', long)]
        timeout_seconds: Option<u64>,

        /// Delay between successful watch polls, in milliseconds.
        #[arg(long)]
        poll_interval_ms: Option<u64>,
    },
    /// Pause a rollout. Resuming restarts the phase where it left off.
    Pause { rollout_id: String },
    /// Promote a rollout to its next phase.
    Promote { rollout_id: String },
    /// Promote a rollout to the end, triggering a success.
    PromoteFull { rollout_id: String },
    /// Terminate a rollout and restore the stable version.
    Abort { rollout_id: String },
    /// Retry the last rolled-back rollout.
    Retry { rollout_id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose {
        "warn,vane=debug"
    } else {
        "warn,vane=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = match cli.command {
        Commands::Rollout { command } => command,
        Commands::Workload { scope, command } => {
            let (name, action, revision_id) = match command {
                WorkloadCommand::Restart { name } => (name, WorkloadAction::Restart, None),
                WorkloadCommand::Retry { name, revision_id } => {
                    (name, WorkloadAction::Retry, Some(revision_id))
                }
                WorkloadCommand::Rollback { name, revision_id } => {
                    (name, WorkloadAction::Rollback, Some(revision_id))
                }
            };
            let settings = settings(&cli.global, Some(&scope), None)?;
            return commands::workload::run(&settings, &name, action, revision_id.as_deref()).await;
        }
    };

    let (rollout_id, action) = match command {
        RolloutCommand::Get {
            rollout_id,
            watch,
            no_color,
            timeout_seconds,
            poll_interval_ms,
        } => {
            let settings = settings(&cli.global, None, poll_interval_ms)?;
            let args = commands::get::GetArgs {
                rollout_id,
                watch,
                no_color,
                timeout_seconds,
            };
            return commands::get::run(&settings, args).await;
        }
        RolloutCommand::Pause { rollout_id } => (rollout_id, RolloutAction::Pause),
        RolloutCommand::Promote { rollout_id } => (rollout_id, RolloutAction::Promote),
        RolloutCommand::PromoteFull { rollout_id } => (rollout_id, RolloutAction::PromoteFull),
        RolloutCommand::Abort { rollout_id } => (rollout_id, RolloutAction::Abort),
        RolloutCommand::Retry { rollout_id } => (rollout_id, RolloutAction::Retry),
    };

    let settings = settings(&cli.global, None, None)?;
    commands::action::run(&settings, &rollout_id, action).await
}

/// Resolve settings from the config file, the environment, and flags.
fn settings(
    global: &GlobalArgs,
    scope: Option<&WorkloadScope>,
    poll_interval_ms: Option<u64>,
) -> anyhow::Result<Settings> {
    let explicit = global
        .config
        .clone()
        .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from));

    let file = match (explicit, ConfigFile::default_path()) {
        (Some(path), _) => ConfigFile::from_file(&path)?,
        (None, Some(path)) => ConfigFile::load_or_default(&path)?,
        (None, None) => ConfigFile::default(),
    };

    let overrides = Overrides {
        profile: global.profile.clone(),
        token: global.token.clone(),
        url: global.url.clone(),
        poll_interval_ms,
        cluster_id: scope.and_then(|s| s.cluster_id.clone()),
        namespace: scope.and_then(|s| s.namespace.clone()),
    };

    Settings::resolve(&file, &overrides, |key| std::env::var(key).ok())
        .context("failed to resolve settings")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_watch_flags() {
        let cli = Cli::try_parse_from([
            "vane", "--profile", "staging", "rollout", "get", "rol-abc", "-w", "-t", "30",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.global.profile.as_deref(), Some("staging"));
        let Commands::Rollout { command } = cli.command else {
            panic!("expected rollout");
        };
        match command {
            RolloutCommand::Get {
                rollout_id,
                watch,
                no_color,
                timeout_seconds,
                poll_interval_ms,
            } => {
                assert_eq!(rollout_id, "rol-abc");
                assert!(watch && no_color);
                assert_eq!(timeout_seconds, Some(30));
                assert_eq!(poll_interval_ms, None);
            }
            _ => panic!("expected get"),
        }
    }

    #[test]
    fn parses_promote_full() {
        let cli = Cli::try_parse_from(["vane", "rollout", "promote-full", "rol-abc", "-v"]).unwrap();
        assert!(cli.global.verbose);
        let Commands::Rollout { command } = cli.command else {
            panic!("expected rollout");
        };
        assert!(matches!(command, RolloutCommand::PromoteFull { rollout_id } if rollout_id == "rol-abc"));
    }

    #[test]
    fn parses_workload_rollback() {
        let cli = Cli::try_parse_from([
            "vane", "workload", "rollback", "checkout", "19", "--cluster-id", "prod-1",
            "--namespace", "payments",
        ])
        .unwrap();
        let Commands::Workload { scope, command } = cli.command else {
            panic!("expected workload");
        };
        assert_eq!(scope.cluster_id.as_deref(), Some("prod-1"));
        assert_eq!(scope.namespace.as_deref(), Some("payments"));
        assert!(matches!(
            command,
            WorkloadCommand::Rollback { name, revision_id } if name == "checkout" && revision_id == "19"
        ));
    }

    #[test]
    fn workload_arguments_are_checked() {
        assert!(Cli::try_parse_from(["vane", "workload", "restart"]).is_err());
        assert!(Cli::try_parse_from(["vane", "workload", "retry", "checkout"]).is_err());
        assert!(Cli::try_parse_from(["vane", "workload", "restart", "checkout", "19"]).is_err());

        let cli = Cli::try_parse_from(["vane", "workload", "restart", "checkout"]).unwrap();
        let Commands::Workload { scope, command } = cli.command else {
            panic!("expected workload");
        };
        assert!(scope.cluster_id.is_none());
        assert!(matches!(command, WorkloadCommand::Restart { name } if name == "checkout"));
    }
}
