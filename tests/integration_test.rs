use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn premark() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("premark"))
}

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write file");
}

#[test]
fn test_missing_source_shows_usage() {
    premark()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    premark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_renders_to_stdout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_file(temp_dir.path(), "slides.md", "# Slide 1\n---\n# Slide 2\n");

    premark()
        .arg(temp_dir.path().join("slides.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# Slide 1\n---\n# Slide 2"))
        .stdout(predicate::str::contains("<title>Presentation</title>"))
        .stdout(predicate::str::contains("remark.create("));
}

#[test]
fn test_renders_with_missing_data_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_file(temp_dir.path(), "slides.md", "# Slide 1\n");

    premark()
        .env("PREMARK_DATA_DIR", temp_dir.path().join("not-installed"))
        .arg(temp_dir.path().join("slides.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("<title>Presentation</title>"))
        .stdout(predicate::str::contains("remark.create({\"ratio\":\"16:9\""));
}

#[test]
fn test_full_invocation_writes_outfile() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();
    write_file(temp_path, "slides.md", "# Styled");
    write_file(temp_path, "template.html", "<title>{{ title }}</title>\n{{ stylesheet }}\n{{ markdown }}\n");
    write_file(temp_path, "styles.css", "h1 { color: red; }");
    write_file(temp_path, "config.yaml", "title: From Config\n");

    let output_path = temp_path.join("out").join("slides.html");
    premark()
        .arg("--outfile")
        .arg(&output_path)
        .arg("--html")
        .arg(temp_path.join("template.html"))
        .arg("--stylesheet")
        .arg(temp_path.join("styles.css"))
        .arg("--title")
        .arg("My Prez")
        .arg("--config")
        .arg(temp_path.join("config.yaml"))
        .arg(temp_path.join("slides.md"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert_eq!(
        html,
        "<title>My Prez</title>\n<style>\nh1 { color: red; }\n</style>\n# Styled\n"
    );
}

#[test]
fn test_section_directory_with_discovered_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();
    write_file(temp_path, "01-intro.md", "# Intro");
    write_file(temp_path, "02-body.md", "# Body");
    write_file(
        temp_path,
        "premark.yaml",
        "sections:\n  - {file: 01-intro, title: Intro}\n  - {file: 02-body}\noutput_file: build/index.html\n",
    );

    premark().arg(temp_path).assert().success();

    let html = fs::read_to_string(temp_path.join("build").join("index.html"))
        .expect("Failed to read output file");
    assert!(html.contains("class: center, middle\n## #1\n# Intro\n---\n# Intro\n---\n# Body"));
}

#[test]
fn test_verbose_echoes_inputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_file(temp_dir.path(), "slides.md", "# Hi");

    premark()
        .arg("-v")
        .arg(temp_dir.path().join("slides.md"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Input:"))
        .stderr(predicate::str::contains("source:"));
}

#[test]
fn test_errors_exit_nonzero() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();
    write_file(temp_path, "slides.md", "# Hi");
    write_file(temp_path, "bad.yaml", "colour: red\n");

    premark()
        .arg("--config")
        .arg(temp_path.join("bad.yaml"))
        .arg(temp_path.join("slides.md"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unexpected key 'colour'"));

    // A directory needs a sections list.
    premark()
        .arg(temp_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Conflicting arguments"));

    premark()
        .arg(temp_path.join("missing.md"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Path not found"));
}
