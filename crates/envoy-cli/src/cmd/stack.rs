use crate::output::print_json;
use crate::root::resolve_root;
use clap::Subcommand;
use envoy_core::stack::{detect_stacks, detect_stacks_from_files};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum StackSubcommand {
    /// Scan the project tree and report detected technology stacks
    Detect {
        /// Project root (default: auto-detect from .claude/ or .git/)
        #[arg(long, env = "ENVOY_ROOT")]
        root: Option<PathBuf>,
    },

    /// Classify an explicit list of changed file paths
    Classify {
        /// File paths, e.g. from a diff
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

pub fn run(subcommand: StackSubcommand, json: bool) -> anyhow::Result<()> {
    let stacks = match subcommand {
        StackSubcommand::Detect { root } => detect_stacks(&resolve_root(root.as_deref())),
        StackSubcommand::Classify { paths } => detect_stacks_from_files(&paths),
    };

    if json {
        return print_json(&stacks);
    }

    if stacks.is_empty() {
        println!("No stacks detected.");
    } else {
        for stack in stacks {
            println!("{stack}");
        }
    }
    Ok(())
}
