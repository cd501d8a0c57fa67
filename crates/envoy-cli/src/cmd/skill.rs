use crate::output::{print_json, print_table};
use anyhow::bail;
use clap::{Args, Subcommand};
use envoy_core::paths::{personal_skills_dir, validate_skill_name};
use envoy_core::skill::{list_all_skills, resolve_skill_path, strip_plugin_prefix};
use std::path::PathBuf;

#[derive(Args)]
pub struct SkillDirs {
    /// Plugin skills directory
    #[arg(long, env = "ENVOY_PLUGIN_DIR")]
    plugin_dir: PathBuf,

    /// Personal skills directory (default: ~/.claude/skills)
    #[arg(long, env = "ENVOY_PERSONAL_DIR")]
    personal_dir: Option<PathBuf>,
}

impl SkillDirs {
    fn personal(&self) -> anyhow::Result<PathBuf> {
        match &self.personal_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(personal_skills_dir()?),
        }
    }
}

#[derive(Subcommand)]
pub enum SkillSubcommand {
    /// List all discoverable skills, with shadowing flags
    List {
        #[command(flatten)]
        dirs: SkillDirs,
    },

    /// Resolve a skill reference to its definition file
    Resolve {
        /// Skill name; prefix with `envoy:` to force the plugin copy
        name: String,

        #[command(flatten)]
        dirs: SkillDirs,
    },
}

pub fn run(subcommand: SkillSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        SkillSubcommand::List { dirs } => list(&dirs, json),
        SkillSubcommand::Resolve { name, dirs } => resolve(&name, &dirs, json),
    }
}

fn list(dirs: &SkillDirs, json: bool) -> anyhow::Result<()> {
    let skills = list_all_skills(&dirs.plugin_dir, &dirs.personal()?);

    if json {
        return print_json(&skills);
    }

    if skills.is_empty() {
        println!("No skills found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = skills
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                s.source.to_string(),
                (if s.shadowed { "shadowed" } else { "" }).to_string(),
                s.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["NAME", "SOURCE", "", "DESCRIPTION"], rows);
    Ok(())
}

fn resolve(name: &str, dirs: &SkillDirs, json: bool) -> anyhow::Result<()> {
    let bare = strip_plugin_prefix(name).unwrap_or(name);
    validate_skill_name(bare)?;

    let Some(resolved) = resolve_skill_path(name, &dirs.plugin_dir, &dirs.personal()?) else {
        bail!("skill not found: {name}");
    };

    if json {
        return print_json(&resolved);
    }
    println!("{} ({})", resolved.file_path.display(), resolved.source);
    Ok(())
}
