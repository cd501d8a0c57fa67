mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{profile::ProfileSubcommand, skill::SkillSubcommand, stack::StackSubcommand};

#[derive(Parser)]
#[command(
    name = "envoy",
    about = "Skill resolution and stack detection for the envoy plugin",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and resolve skill definitions
    Skill {
        #[command(subcommand)]
        subcommand: SkillSubcommand,
    },

    /// Detect technology stacks in a project
    Stack {
        #[command(subcommand)]
        subcommand: StackSubcommand,
    },

    /// Load stack profile documents
    Profile {
        #[command(subcommand)]
        subcommand: ProfileSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Skill { subcommand } => cmd::skill::run(subcommand, cli.json),
        Commands::Stack { subcommand } => cmd::stack::run(subcommand, cli.json),
        Commands::Profile { subcommand } => cmd::profile::run(subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
