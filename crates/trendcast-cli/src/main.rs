use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendcast_skills::SkillName;

mod invoke;

#[derive(Debug, Parser)]
#[command(name = "trendcast-cli")]
#[command(about = "Run trendcast content-pipeline skills")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate arguments and run a skill, printing the JSON result
    Invoke {
        /// Skill name, e.g. `fetch_trends` or `fetch-trends`
        skill: SkillName,
        /// Arguments as an inline JSON object
        #[arg(long, conflicts_with = "args_file")]
        args: Option<String>,
        /// Path to a file holding the arguments JSON object
        #[arg(long)]
        args_file: Option<PathBuf>,
    },
    /// Print a skill's parameter schema
    Schema { skill: SkillName },
    /// List the available skills
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(output) = render_offline(cli.command.as_ref())? {
        println!("{output}");
        return Ok(());
    }

    let Some(Commands::Invoke {
        skill,
        args,
        args_file,
    }) = cli.command
    else {
        return Ok(());
    };

    let config = trendcast_core::load_app_config()?;

    // stdout carries JSON results only; logs go to stderr.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = invoke::read_args(args.as_deref(), args_file.as_deref())?;
    let output = invoke::run_skill(&config, skill, &args).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Output for the commands that need no configuration. `None` for `invoke`.
fn render_offline(command: Option<&Commands>) -> anyhow::Result<Option<String>> {
    match command {
        Some(Commands::Invoke { .. }) => Ok(None),
        Some(Commands::Schema { skill }) => Ok(Some(serde_json::to_string_pretty(
            &invoke::schema_json(*skill),
        )?)),
        Some(Commands::List) | None => {
            let lines: Vec<String> = SkillName::ALL
                .into_iter()
                .map(|skill| format!("{:<16} {}", skill.as_str(), skill.description()))
                .collect();
            Ok(Some(lines.join("\n")))
        }
    }
}
