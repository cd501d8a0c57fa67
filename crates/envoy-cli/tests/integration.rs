use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn envoy() -> Command {
    let mut cmd = Command::cargo_bin("envoy").unwrap();
    cmd.env_remove("ENVOY_PLUGIN_DIR")
        .env_remove("ENVOY_PERSONAL_DIR")
        .env_remove("ENVOY_ROOT")
        .env_remove("ENVOY_STACKS_DIR");
    cmd
}

fn write_skill(root: &Path, name: &str, description: &str) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("SKILL.md"),
        format!("---\nname: {name}\ndescription: {description}\n---\n\nBody.\n"),
    )
    .unwrap();
}

struct Roots {
    plugin: TempDir,
    personal: TempDir,
}

impl Roots {
    fn new() -> Self {
        Self {
            plugin: TempDir::new().unwrap(),
            personal: TempDir::new().unwrap(),
        }
    }

    fn args(&self) -> [String; 4] {
        [
            "--plugin-dir".into(),
            self.plugin.path().display().to_string(),
            "--personal-dir".into(),
            self.personal.path().display().to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// envoy skill list
// ---------------------------------------------------------------------------

#[test]
fn skill_list_shows_both_roots() {
    let roots = Roots::new();
    write_skill(roots.plugin.path(), "brainstorming", "Plugin copy");
    write_skill(roots.personal.path(), "pickup", "Personal skill");

    envoy()
        .args(["skill", "list"])
        .args(roots.args())
        .assert()
        .success()
        .stdout(predicate::str::contains("brainstorming"))
        .stdout(predicate::str::contains("pickup"));
}

#[test]
fn skill_list_marks_shadowed_plugin_copy() {
    let roots = Roots::new();
    write_skill(roots.plugin.path(), "brainstorming", "Plugin copy");
    write_skill(roots.personal.path(), "brainstorming", "Personal override");

    let output = envoy()
        .args(["skill", "list", "--json"])
        .args(roots.args())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let skills: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let skills = skills.as_array().unwrap();
    assert_eq!(skills.len(), 2);

    // personal first, never shadowed
    assert_eq!(skills[0]["source"], "personal");
    assert_eq!(skills[0]["shadowed"], false);
    assert_eq!(skills[1]["source"], "plugin");
    assert_eq!(skills[1]["shadowed"], true);
}

#[test]
fn skill_list_skips_malformed_frontmatter() {
    let roots = Roots::new();
    write_skill(roots.plugin.path(), "valid", "ok");

    let broken = roots.plugin.path().join("broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("SKILL.md"), "---\nname: broken\nno closing\n").unwrap();

    envoy()
        .args(["skill", "list"])
        .args(roots.args())
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"))
        .stdout(predicate::str::contains("broken").not());
}

// ---------------------------------------------------------------------------
// envoy skill resolve
// ---------------------------------------------------------------------------

#[test]
fn skill_resolve_prefers_personal() {
    let roots = Roots::new();
    write_skill(roots.plugin.path(), "brainstorming", "Plugin copy");
    write_skill(roots.personal.path(), "brainstorming", "Personal override");

    envoy()
        .args(["skill", "resolve", "brainstorming"])
        .args(roots.args())
        .assert()
        .success()
        .stdout(predicate::str::contains("(personal)"));
}

#[test]
fn skill_resolve_prefix_forces_plugin() {
    let roots = Roots::new();
    write_skill(roots.plugin.path(), "brainstorming", "Plugin copy");
    write_skill(roots.personal.path(), "brainstorming", "Personal override");

    envoy()
        .args(["skill", "resolve", "envoy:brainstorming"])
        .args(roots.args())
        .assert()
        .success()
        .stdout(predicate::str::contains("(plugin)"));
}

#[test]
fn skill_resolve_missing_fails() {
    let roots = Roots::new();

    envoy()
        .args(["skill", "resolve", "ghost"])
        .args(roots.args())
        .assert()
        .failure()
        .stderr(predicate::str::contains("skill not found"));
}

#[test]
fn skill_resolve_rejects_invalid_name() {
    let roots = Roots::new();

    envoy()
        .args(["skill", "resolve", "Not A Name"])
        .args(roots.args())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid skill name"));
}

// ---------------------------------------------------------------------------
// envoy stack detect / classify
// ---------------------------------------------------------------------------

#[test]
fn stack_detect_finds_dotnet_react_security() {
    let project = TempDir::new().unwrap();
    std::fs::write(project.path().join("App.csproj"), "<Project/>").unwrap();
    std::fs::write(
        project.path().join("package.json"),
        r#"{"dependencies": {"react": "^18.0.0"}}"#,
    )
    .unwrap();

    envoy()
        .args(["stack", "detect", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dotnet"))
        .stdout(predicate::str::contains("react"))
        .stdout(predicate::str::contains("security"));
}

#[test]
fn stack_detect_empty_project() {
    let project = TempDir::new().unwrap();

    envoy()
        .args(["stack", "detect", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No stacks detected."));
}

#[test]
fn stack_classify_changed_files() {
    envoy()
        .args([
            "stack",
            "classify",
            "src/UserService.cs",
            "tests/UserServiceTests.cs",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("dotnet"))
        .stdout(predicate::str::contains("api-patterns"))
        .stdout(predicate::str::contains("testing-dotnet"))
        .stdout(predicate::str::contains("security"));
}

#[test]
fn stack_classify_json_output() {
    let output = envoy()
        .args(["stack", "classify", "--json", "infra/main.bicep"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stacks: Vec<String> = serde_json::from_slice(&output).unwrap();
    assert_eq!(stacks, vec!["bicep"]);
}

// ---------------------------------------------------------------------------
// envoy profile show
// ---------------------------------------------------------------------------

#[test]
fn profile_show_section() {
    let stacks = TempDir::new().unwrap();
    std::fs::write(
        stacks.path().join("react.md"),
        "# React\n\n## Common Mistakes\n\n- Mutating state\n\n## Review Checklist\n\n- [ ] Keys\n",
    )
    .unwrap();

    envoy()
        .args(["profile", "show", "react", "--section", "mistakes", "--stacks-dir"])
        .arg(stacks.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Mutating state"))
        .stdout(predicate::str::contains("Review Checklist").not());
}

#[test]
fn profile_show_missing_fails() {
    let stacks = TempDir::new().unwrap();

    envoy()
        .args(["profile", "show", "ghost", "--stacks-dir"])
        .arg(stacks.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("stack profile not found"));
}
