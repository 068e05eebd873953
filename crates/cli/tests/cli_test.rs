use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LIBERTY_POM: &str = r#"<project>
  <artifactId>inventory</artifactId>
  <build>
    <plugins>
      <plugin>
        <groupId>io.openliberty.tools</groupId>
        <artifactId>liberty-maven-plugin</artifactId>
        <version>3.2.0</version>
      </plugin>
    </plugins>
  </build>
</project>"#;

fn liberty_dev(workspace: &Path) -> Command {
    let mut cmd = Command::cargo_bin("liberty-dev").unwrap();
    cmd.arg("--workspace").arg(workspace);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("inventory");
    fs::create_dir_all(&app).unwrap();
    fs::write(app.join("pom.xml"), LIBERTY_POM).unwrap();
    temp
}

#[test]
fn test_list_shows_discovered_projects() {
    let temp = workspace();
    liberty_dev(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("inventory"))
        .stdout(predicate::str::contains("Maven"));
}

#[test]
fn test_list_json() {
    let temp = workspace();
    let output = liberty_dev(temp.path())
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let projects: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(projects[0]["label"], "inventory");
    assert_eq!(projects[0]["projectType"], "libertyMavenProject");
    assert_eq!(projects[0]["supportsContainer"], false);
}

#[test]
fn test_empty_workspace() {
    let temp = TempDir::new().unwrap();
    liberty_dev(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Liberty dev mode projects found"));
}

#[test]
fn test_command_prints_start_line() {
    let temp = workspace();
    liberty_dev(temp.path())
        .args(["command", "inventory", "start"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "mvn io.openliberty.tools:liberty-maven-plugin:dev -f \"",
        ))
        .stdout(predicate::str::contains("inventory/pom.xml\""));
}

#[test]
fn test_command_custom_start_requires_dash() {
    let temp = workspace();
    liberty_dev(temp.path())
        .args(["command", "inventory", "custom-start", "--params", "-DhotTests=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev -DhotTests=true -f"));

    liberty_dev(temp.path())
        .args(["command", "inventory", "custom-start", "--params", "hotTests"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with '-'"));
}

#[test]
fn test_container_start_refused_for_old_plugin() {
    let temp = workspace();
    liberty_dev(temp.path())
        .args(["command", "inventory", "start-container"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not support dev mode in a container"));
}

#[test]
fn test_unknown_project() {
    let temp = workspace();
    liberty_dev(temp.path())
        .args(["command", "system", "stop"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project matches 'system'"));
}

#[test]
fn test_report_not_found() {
    let temp = workspace();
    liberty_dev(temp.path())
        .args(["report", "inventory", "surefire"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test report not found"))
        .stdout(predicate::str::contains("surefire-report.html"));
}

#[test]
fn test_add_and_remove_project() {
    let temp = workspace();
    let outside = TempDir::new().unwrap();
    let legacy = outside.path().join("legacy");
    fs::create_dir_all(&legacy).unwrap();
    fs::write(
        legacy.join("build.gradle"),
        "apply plugin: 'war'\n",
    )
    .unwrap();
    let build_file = legacy.join("build.gradle");

    liberty_dev(temp.path())
        .arg("add")
        .arg(&build_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added legacy"));

    liberty_dev(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy"));

    liberty_dev(temp.path())
        .arg("remove")
        .arg(&build_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    liberty_dev(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy").not());
}

#[test]
fn test_init_writes_config_once() {
    let temp = TempDir::new().unwrap();
    liberty_dev(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));
    assert!(temp.path().join(".liberty-dev.json").is_file());

    liberty_dev(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
