//! End-to-end tests for the `pk` binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_site(dir: &Path, markup_lines: usize) {
    let markup: String = (1..=markup_lines).map(|i| format!("<li>race {}</li>\n", i)).collect();
    fs::write(dir.join("input.ejs.backup"), markup).unwrap();
    fs::write(dir.join("input_bet_logic.js"), "function updateBuyMethod() {}\n").unwrap();
    fs::write(dir.join("pagekit.yml"), "assemble:\n  line-limit: 420\n").unwrap();
}

fn pk(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pk").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_assemble_writes_template_next_to_config() {
    let temp = TempDir::new().unwrap();
    write_site(temp.path(), 430);

    pk(temp.path())
        .args(["assemble", "--config"])
        .arg(temp.path().join("pagekit.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let page = fs::read_to_string(temp.path().join("input.ejs")).unwrap();
    assert!(page.contains("<li>race 420</li>\n</ul>\n</div>\n</div>\n<script>\n"));
    assert!(!page.contains("<li>race 421</li>"));
    assert!(page.contains("function updateBuyMethod() {}\n\n\n\n// 印の保存"));
    assert!(page.ends_with("</script>\n</body>\n</html>\n"));
}

#[test]
fn test_assemble_stdout_leaves_disk_alone() {
    let temp = TempDir::new().unwrap();
    write_site(temp.path(), 3);

    pk(temp.path())
        .args(["assemble", "--stdout", "--config"])
        .arg(temp.path().join("pagekit.yml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<li>race 1</li>\n"))
        .stdout(predicate::str::ends_with("</html>\n"));

    assert!(!temp.path().join("input.ejs").exists());
}

#[test]
fn test_assemble_missing_script_fails() {
    let temp = TempDir::new().unwrap();
    write_site(temp.path(), 3);
    fs::remove_file(temp.path().join("input_bet_logic.js")).unwrap();

    pk(temp.path())
        .args(["assemble", "--config"])
        .arg(temp.path().join("pagekit.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input not found"));

    assert!(!temp.path().join("input.ejs").exists());
}

#[test]
fn test_rewrite_job_from_config() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("pagekit.yml"),
        r#"rewrites:
  - name: column-names
    files: [race-notification-scheduler.js, test-race-notification.js]
    rules:
      - pattern: post_time
        replacement: race_time
"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("race-notification-scheduler.js"),
        "SELECT post_time FROM races ORDER BY post_time",
    )
    .unwrap();

    pk(temp.path())
        .args(["rewrite", "column-names", "--config"])
        .arg(temp.path().join("pagekit.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2 replacements"))
        .stdout(predicate::str::contains("not found"));

    assert_eq!(
        fs::read_to_string(temp.path().join("race-notification-scheduler.js")).unwrap(),
        "SELECT race_time FROM races ORDER BY race_time"
    );
}

#[test]
fn test_rewrite_unknown_job_fails() {
    let temp = TempDir::new().unwrap();
    write_site(temp.path(), 1);

    pk(temp.path())
        .args(["rewrite", "nope", "--config"])
        .arg(temp.path().join("pagekit.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown rewrite job: nope"));
}
