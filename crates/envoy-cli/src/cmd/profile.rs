use crate::output::print_json;
use anyhow::bail;
use clap::{Subcommand, ValueEnum};
use envoy_core::profile::{extract_common_mistakes, extract_review_checklist, load_stack_profile};
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
pub enum Section {
    /// The `## Common Mistakes` section
    Mistakes,
    /// The `## Review Checklist` section
    Checklist,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Print a stack profile document, or one section of it
    Show {
        /// Stack name, e.g. `react`
        name: String,

        /// Directory holding `<stack>.md` profile documents
        #[arg(long, env = "ENVOY_STACKS_DIR")]
        stacks_dir: PathBuf,

        /// Print only one extracted section
        #[arg(long, value_enum)]
        section: Option<Section>,
    },
}

pub fn run(subcommand: ProfileSubcommand, json: bool) -> anyhow::Result<()> {
    let ProfileSubcommand::Show {
        name,
        stacks_dir,
        section,
    } = subcommand;

    let Some(content) = load_stack_profile(&stacks_dir, &name) else {
        bail!("stack profile not found: {name}");
    };

    let text = match section {
        None => content,
        Some(Section::Mistakes) => match extract_common_mistakes(&content) {
            Some(s) => s,
            None => bail!("profile '{name}' has no Common Mistakes section"),
        },
        Some(Section::Checklist) => match extract_review_checklist(&content) {
            Some(s) => s,
            None => bail!("profile '{name}' has no Review Checklist section"),
        },
    };

    if json {
        #[derive(serde::Serialize)]
        struct ProfileOutput<'a> {
            name: &'a str,
            content: &'a str,
        }
        return print_json(&ProfileOutput {
            name: &name,
            content: &text,
        });
    }
    println!("{text}");
    Ok(())
}
