use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_genexamples")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn generate(args: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-i", &fixture_path("examples.json")])
        .args(["-o", dir.path().to_str().unwrap()])
        .args(args)
        .assert()
        .success();
    dir
}

fn read(dir: &TempDir, path: &str) -> String {
    std::fs::read_to_string(dir.path().join(path)).unwrap()
}

// -- file output --

#[test]
fn writes_source_and_doc_files() {
    let dir = generate(&[]);
    assert!(dir.path().join("src/docs-get_fbcf5078a6a9e09790553804054c36b3_test.go").is_file());
    assert!(dir.path().join("doc/fbcf5078a6a9e09790553804054c36b3.asciidoc").is_file());
}

#[test]
fn source_matches_expected() {
    let dir = generate(&["-f", "src"]);
    let output = read(&dir, "src/getting-started_251ea12c1248385ab409906ac64d9ee9_test.go");
    let expected = std::fs::read_to_string(fixture_path(
        "getting-started_251ea12c1248385ab409906ac64d9ee9_test.go.expected",
    ))
    .unwrap();
    assert_eq!(output, expected);
}

#[test]
fn format_src_skips_doc() {
    let dir = generate(&["-f", "src"]);
    assert!(dir.path().join("src").is_dir());
    assert!(!dir.path().join("doc").exists());
}

#[test]
fn doc_listing() {
    let dir = generate(&["-f", "doc"]);
    let output = read(&dir, "doc/fbcf5078a6a9e09790553804054c36b3.asciidoc");
    assert_eq!(
        output,
        concat!(
            "// Generated from docs/get.asciidoc:10\n",
            "//\n",
            "[source, go]\n",
            "----\n",
            "res, err := es.Get(\"twitter\", \"0\", es.Get.WithPretty())\n",
            "fmt.Println(res, err)\n",
            "----\n"
        )
    );
}

#[test]
fn timeout_rendered_as_duration() {
    let dir = generate(&["-f", "src"]);
    let output = read(&dir, "src/docs-delete_54059961f05904368ced52c894a50e23_test.go");
    assert!(output.contains("es.Delete.WithTimeout(time.Duration(300000000000)),"), "Got: {output}");
    assert!(output.contains("\t\"time\"\n"), "Got: {output}");
}

#[test]
fn numeric_and_string_params() {
    let dir = generate(&["-f", "src"]);
    let output = read(&dir, "src/docs-index__1f336ecc62480c1d56351cc2f82d0d08_test.go");
    assert!(output.contains("\t\tes.Index.WithDocumentID(\"1\"),\n\t\tes.Index.WithVersion(2),\n\t\tes.Index.WithVersionType(\"external\"),\n\t\tes.Index.WithPretty(),\n"), "Got: {output}");
}

#[test]
fn multi_command_example_scoped() {
    let dir = generate(&["-f", "src"]);
    let output = read(&dir, "src/docs-get_89a8ac1509936acc272fc2d72907bc45_test.go");
    assert_eq!(output.matches("// tag:89a8ac1509936acc272fc2d72907bc45[]").count(), 2);
    assert!(output.contains("es.GetSource(\"twitter\", \"1\", es.GetSource.WithPretty())"), "Got: {output}");
    assert!(output.contains("es.ExistsSource(\"twitter\", \"1\", es.ExistsSource.WithPretty())"), "Got: {output}");
    assert!(output.contains("\t}\n\n\t{\n"), "Got: {output}");
    assert!(!output.contains("<1>\n\t"), "callout leaked: {output}");
}

#[test]
fn untranslated_example_gets_placeholder() {
    let dir = generate(&["-f", "src"]);
    let output = read(&dir, "src/getting-started_c2e4a6a1b6b3e3a5f0d1e5b1a2c3d4e5_test.go");
    assert!(output.contains("\tt.Error(\"GET /_cat/nodes?v\")\n"), "Got: {output}");
}

#[test]
fn disabled_files_skipped() {
    let dir = generate(&[]);
    assert!(!dir.path().join("src/docs-bulk_ae9ccfaa146731ab9176df90670db1c2_test.go").exists());
}

#[test]
fn all_flag_includes_disabled_files() {
    let dir = generate(&["--all", "-f", "src"]);
    let output = read(&dir, "src/docs-bulk_ae9ccfaa146731ab9176df90670db1c2_test.go");
    assert!(output.contains("t.Error(\"POST _bulk\")"), "Got: {output}");
}

#[test]
fn enable_pattern_replaces_default_list() {
    let dir = generate(&["-e", "docs/d*.asciidoc", "-f", "doc"]);
    let files: Vec<_> = std::fs::read_dir(dir.path().join("doc")).unwrap().collect();
    assert_eq!(files.len(), 1);
    assert!(dir.path().join("doc/54059961f05904368ced52c894a50e23.asciidoc").is_file());
}

#[test]
fn regeneration_is_byte_identical() {
    let a = generate(&[]);
    let b = generate(&[]);
    for file in [
        "src/docs-get_89a8ac1509936acc272fc2d72907bc45_test.go",
        "doc/251ea12c1248385ab409906ac64d9ee9.asciidoc",
    ] {
        assert_eq!(read(&a, file), read(&b, file));
    }
}

// -- stdout --

#[test]
fn stdout_output() {
    cmd()
        .args(["-i", &fixture_path("examples.json")])
        .args(["-o", "-"])
        .args(["-e", "docs/get.asciidoc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "func Test_docs_get_fbcf5078a6a9e09790553804054c36b3(t *testing.T) {",
        ))
        .stdout(predicate::str::contains("// tag:fbcf5078a6a9e09790553804054c36b3[]"));
}

#[test]
fn progress_logged_to_stderr() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-i", &fixture_path("examples.json")])
        .args(["-o", dir.path().to_str().unwrap()])
        .env("RUST_LOG", "genexamples=info")
        .assert()
        .success()
        .stderr(predicate::str::contains("processing example"))
        .stderr(predicate::str::contains("skipped 1"));
}

// -- failures --

#[test]
fn missing_input() {
    cmd()
        .args(["-i", "/tmp/nonexistent_genexamples_test_xyz.json"])
        .args(["-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input"));
}

#[test]
fn malformed_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    std::fs::write(&input, "{not json").unwrap();
    cmd()
        .args(["-i", input.to_str().unwrap()])
        .args(["-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode input"));
}

#[test]
fn unknown_format() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-i", &fixture_path("examples.json")])
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn translation_failure_counted_and_continues() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-i", &fixture_path("broken.json")])
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "src"])
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to translate example"));

    let broken = read(&dir, "src/docs-index__00000000000000000000000000000001_test.go");
    assert!(broken.contains("panic(\"Error translating example\")"), "Got: {broken}");
    assert!(dir.path().join("src/docs-get_00000000000000000000000000000002_test.go").is_file());
}

#[test]
fn fail_fast_aborts() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-i", &fixture_path("broken.json")])
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("--fail-fast")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error processing example docs/index_.asciidoc:1"))
        .stderr(predicate::str::contains("error formatting body"));
    assert!(!dir.path().join("src/docs-get_00000000000000000000000000000002_test.go").exists());
}
