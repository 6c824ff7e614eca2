use assert_fs::TempDir;
use assert_fs::prelude::*;
use common::command::{cairn_stdout, init_repository_dir, repository_dir, run_cairn_command};
use common::file::{FileSpec, delete_path, write_file};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

mod common;

#[fixture]
fn file_a() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();
    for i in 0..1000000000 {
        println!("{}",  s);
    }

    println!("Done");

    let tx = std::thread::spawn(move || {
        for i in 0..10 {
            println!("Thread: {}", i);
        }
    });

    tx.join().unwrap();

    println!("All threads completed");
}"#
    .to_string()
}

#[fixture]
fn file_b() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();

    println!("Done");

    let tx = std::thread::spawn(move || {
        for i in 0..10 {
            println!("Thread: {}", i);
        }
    });

    if let Err(e) = tx.join() {
        eprintln!("Thread error: {}", e);
    }

    println!("All threads completed");
}"#
    .to_string()
}

#[fixture]
fn diff_hunks_output() -> String {
    "@@ -1,9 +1,6 @@\n fn main() {\n     let s = String::new();\n     std::io::stdin().read_line(&mut s).unwrap();\n-    for i in 0..1000000000 {\n-        println!(\"{}\",  s);\n-    }\n \n     println!(\"Done\");\n \n@@ -13,7 +10,9 @@\n         }\n     });\n \n-    tx.join().unwrap();\n+    if let Err(e) = tx.join() {\n+        eprintln!(\"Thread error: {}\", e);\n+    }\n \n     println!(\"All threads completed\");\n }\n\\ No newline at end of file\n"
        .to_string()
}

fn staged_repository(dir: &TempDir, files: &[(&str, &str)]) {
    run_cairn_command(dir.path(), &["init"]).assert().success();
    for (name, content) in files {
        write_file(FileSpec::new(dir.path().join(name), content.to_string()));
    }
    run_cairn_command(dir.path(), &["add", "."]).assert().success();
}

#[rstest]
fn show_single_replaced_line(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    staged_repository(&repository_dir, &[("f.txt", "x\ny\n")]);
    repository_dir.child("f.txt").write_str("x\nz\n")?;

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["diff"]),
        "--- f.txt (index)\n+++ f.txt (working copy)\n@@ -1,2 +1,2 @@\n x\n-y\n+z\n"
    );

    Ok(())
}

#[rstest]
fn show_diff_with_hunks(
    repository_dir: TempDir,
    file_a: String,
    file_b: String,
    diff_hunks_output: String,
) {
    staged_repository(&repository_dir, &[("1.txt", file_a.as_str())]);
    write_file(FileSpec::new(repository_dir.path().join("1.txt"), file_b));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["diff"]),
        format!("--- 1.txt (index)\n+++ 1.txt (working copy)\n{diff_hunks_output}")
    );
}

#[rstest]
fn files_are_separated_by_a_rule(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    write_file(FileSpec::new(dir.join("a/b/3.txt"), "three\nfour\n".to_string()));

    let rule = "-".repeat(70);
    let expected = [
        "--- 1.txt (index)",
        "+++ 1.txt (working copy)",
        "@@ -1 +1 @@",
        "-one",
        "+uno",
        rule.as_str(),
        "--- a/b/3.txt (index)",
        "+++ a/b/3.txt (working copy)",
        "@@ -1 +1,2 @@",
        " three",
        "+four",
        "",
    ]
    .join("\n");

    assert_eq!(cairn_stdout(dir, &["diff"]), expected);
}

#[rstest]
fn line_ending_changes_are_diffed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a/2.txt"), "two\r\n".to_string()));

    assert_eq!(cairn_stdout(dir, &["status"]), "M 1.txt\nM a/2.txt\n");

    let rule = "-".repeat(70);
    let expected = [
        "--- 1.txt (index)",
        "+++ 1.txt (working copy)",
        "@@ -1 +1 @@",
        "-one",
        "+one",
        "\\ No newline at end of file",
        rule.as_str(),
        "--- a/2.txt (index)",
        "+++ a/2.txt (working copy)",
        "@@ -1 +1 @@",
        "-two",
        "+two\r",
        "",
    ]
    .join("\n");

    assert_eq!(cairn_stdout(dir, &["diff"]), expected);
}

#[rstest]
fn diff_output_never_starts_with_a_rule(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a/2.txt"), "deux\n".to_string()));

    let output = cairn_stdout(dir, &["diff"]);

    assert!(output.starts_with("--- 1.txt (index)\n"));
    assert_eq!(output.matches(&"-".repeat(70)).count(), 1);
}

#[rstest]
fn context_width_is_configurable(repository_dir: TempDir) {
    let original = (1..=9).map(|n| format!("{n}\n")).collect::<String>();
    staged_repository(&repository_dir, &[("n.txt", original.as_str())]);
    write_file(FileSpec::new(
        repository_dir.path().join("n.txt"),
        original.replace("5\n", "five\n"),
    ));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["diff", "-U", "1"]),
        "--- n.txt (index)\n+++ n.txt (working copy)\n@@ -4,3 +4,3 @@\n 4\n-5\n+five\n 6\n"
    );
    assert_eq!(
        cairn_stdout(repository_dir.path(), &["diff", "-U", "0"]),
        "--- n.txt (index)\n+++ n.txt (working copy)\n@@ -5 +5 @@\n-5\n+five\n"
    );
}

#[rstest]
fn unchanged_and_deleted_files_are_not_diffed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_eq!(cairn_stdout(dir, &["diff"]), "");

    delete_path(&dir.join("1.txt"));
    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));

    assert_eq!(cairn_stdout(dir, &["diff"]), "");
}
