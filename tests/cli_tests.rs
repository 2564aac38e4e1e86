use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod test_helpers;
use test_helpers::{build_dated_tree, touch};

fn datewalk() -> Command {
    Command::cargo_bin("datewalk").unwrap()
}

#[test]
fn test_reports_dated_files_and_skips_the_rest() -> Result<()> {
    let root = TempDir::new()?;
    let dated = touch(root.path(), "main_2018-05-05.log")?;
    touch(root.path(), "main.log")?;

    datewalk()
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(dated.display().to_string()))
        .stdout(predicate::str::contains("main.log\n").not());
    Ok(())
}

#[test]
fn test_compact_date_form_is_reported() -> Result<()> {
    let root = TempDir::new()?;
    let dated = touch(root.path(), "dump-20180505.sql")?;

    datewalk()
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(dated.display().to_string()));
    Ok(())
}

#[test]
fn test_exit_zero_without_matches() -> Result<()> {
    let root = TempDir::new()?;
    touch(root.path(), "undated.txt")?;

    datewalk()
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_walks_a_larger_tree_end_to_end() -> Result<()> {
    let root = TempDir::new()?;
    let files = build_dated_tree(root.path(), 20, 100, 5)?;

    let assert = datewalk().arg(root.path()).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), files.len());
    for file in files {
        assert!(lines.contains(&file.display().to_string().as_str()));
    }
    Ok(())
}

#[test]
fn test_invalid_concurrency_exit_code() -> Result<()> {
    let root = TempDir::new()?;

    datewalk()
        .args(["--concurrency", "0"])
        .arg(root.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid concurrency"));
    Ok(())
}

#[test]
fn test_concurrency_above_cpu_count_exit_code() -> Result<()> {
    let root = TempDir::new()?;

    datewalk()
        .args(["--concurrency", "1000000"])
        .arg(root.path())
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("exceeds available cpu count"));
    Ok(())
}

#[test]
fn test_missing_root_exit_code() {
    datewalk()
        .arg("/no/such/directory/anywhere")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("invalid root"));
}

#[test]
fn test_root_that_is_a_file_exit_code() -> Result<()> {
    let root = TempDir::new()?;
    let file = touch(root.path(), "plain.txt")?;

    datewalk()
        .arg(&file)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("not a directory"));
    Ok(())
}

#[test]
fn test_malformed_template_exit_code() -> Result<()> {
    let root = TempDir::new()?;

    datewalk()
        .args(["--format", "{path}\\q"])
        .arg(root.path())
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("invalid output template"));
    Ok(())
}

#[test]
fn test_template_renders_date_and_path() -> Result<()> {
    let root = TempDir::new()?;
    let dated = touch(root.path(), "main_2018-05-05.log")?;

    datewalk()
        .args(["--format", "{date}\\t{path}"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "2018-05-05\t{}",
            dated.display()
        )));
    Ok(())
}

#[test]
fn test_older_cutoff_boundary_is_exclusive() -> Result<()> {
    let root = TempDir::new()?;
    touch(root.path(), "at_cutoff_2024-06-05.log")?;
    let included = touch(root.path(), "older_2024-06-04.log")?;

    datewalk()
        .args(["--today", "2024-06-15", "--older", "10"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(included.display().to_string()))
        .stdout(predicate::str::contains("at_cutoff").not());
    Ok(())
}

#[test]
fn test_newer_cutoff_boundary_is_exclusive() -> Result<()> {
    let root = TempDir::new()?;
    touch(root.path(), "at_cutoff_2024-06-05.log")?;
    let included = touch(root.path(), "newer_2024-06-06.log")?;

    datewalk()
        .args(["--today", "2024-06-15", "--newer", "10"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(included.display().to_string()))
        .stdout(predicate::str::contains("at_cutoff").not());
    Ok(())
}

#[test]
fn test_future_dates_excluded_unless_requested() -> Result<()> {
    let root = TempDir::new()?;
    let future = touch(root.path(), "scheduled_9999-12-31.job")?;

    datewalk()
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    datewalk()
        .arg("--include-future")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(future.display().to_string()));
    Ok(())
}

#[test]
fn test_multiple_roots_are_all_walked() -> Result<()> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;
    let a = touch(first.path(), "a_2020-01-01.log")?;
    let b = touch(second.path(), "b_2020-02-02.log")?;

    datewalk()
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(a.display().to_string()))
        .stdout(predicate::str::contains(b.display().to_string()));
    Ok(())
}

#[test]
fn test_no_roots_is_a_usage_error() {
    datewalk().assert().failure();
}
