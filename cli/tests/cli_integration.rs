use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const EXPECTED_REPORT: &str = r#"@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix ex: <http://example.org/> .

[] a sh:ValidationReport ;
  sh:conforms false ;
  sh:result [
    sh:focusNode ex:a ;
    sh:resultPath ex:title ;
    sh:resultSeverity sh:Violation
  ] .
"#;

const ACTUAL_REPORT: &str = r#"@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix ex: <http://example.org/> .

_:report a sh:ValidationReport ;
  sh:conforms false ;
  sh:result _:r .
_:r sh:focusNode ex:a ;
  sh:resultPath ex:title ;
  sh:resultSeverity sh:Violation ;
  sh:resultMessage "Missing title" .
"#;

fn reviewgraph_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_reviewgraph"))
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(reviewgraph_bin())
        .args(args)
        .env_remove("REVIEWGRAPH_LOG")
        .output()
        .expect("run reviewgraph")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn fmt_writes_prefixed_turtle() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "in.nt",
        "<http://example.org/a> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/Paper> .\n",
    );
    let out = run(&["fmt", path_str(&input), "-p", "ex=http://example.org/"]);
    assert!(
        out.status.success(),
        "fmt failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let text = stdout(&out);
    assert!(text.contains("@prefix ex: <http://example.org/> .\n"));
    assert!(text.contains("@prefix fabio: <http://purl.org/spar/fabio/> .\n"));
    assert!(text.ends_with("\nex:a\n  a ex:Paper .\n"), "got:\n{}", text);
}

#[test]
fn fmt_writes_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "in.ttl",
        "<http://example.org/a> <http://example.org/p> \"x\" .\n",
    );
    let output = dir.path().join("out.ttl");
    let out = run(&["fmt", path_str(&input), "--output", path_str(&output)]);
    assert!(
        out.status.success(),
        "fmt failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.ends_with("<http://example.org/a>\n  <http://example.org/p> \"x\" .\n"));
}

#[test]
fn canonicalize_ignores_blank_node_labels() {
    let dir = tempfile::tempdir().unwrap();
    let one = write(
        dir.path(),
        "one.ttl",
        "<http://example.org/a> <http://example.org/p> _:x .\n_:x <http://example.org/q> \"1\" .\n",
    );
    let two = write(
        dir.path(),
        "two.ttl",
        "<http://example.org/a> <http://example.org/p> [ <http://example.org/q> \"1\" ] .\n",
    );
    let first = run(&["canonicalize", path_str(&one)]);
    let second = run(&["canonicalize", path_str(&two)]);
    assert!(first.status.success() && second.status.success());
    assert_eq!(stdout(&first), stdout(&second));
    assert!(stdout(&first).contains("_:c0"));
}

#[test]
fn compare_accepts_equivalent_reports() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write(dir.path(), "expected.ttl", EXPECTED_REPORT);
    let actual = write(dir.path(), "actual.ttl", ACTUAL_REPORT);
    let out = run(&["compare", path_str(&expected), path_str(&actual)]);
    assert!(
        out.status.success(),
        "compare failed: {}{}",
        stdout(&out),
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(stdout(&out).contains("reports match"));
}

#[test]
fn compare_fails_on_differing_reports() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write(dir.path(), "expected.ttl", EXPECTED_REPORT);
    let actual = write(
        dir.path(),
        "actual.ttl",
        &ACTUAL_REPORT.replace("sh:focusNode ex:a", "sh:focusNode ex:b"),
    );
    let out = run(&["compare", path_str(&expected), path_str(&actual)]);
    assert!(!out.status.success(), "expected a mismatch");
    let text = stdout(&out);
    assert!(text.contains("--- expected"));
    assert!(text.contains("-_:"));
    assert!(text.contains("+_:"));
}

#[test]
fn article_builds_frbr_description() {
    let dir = tempfile::tempdir().unwrap();
    let fields = write(
        dir.path(),
        "article.json",
        r#"{
            "doi": "10.1101/2021.05.01.442244",
            "title": "Sleep and memory consolidation",
            "date": "2021-05-01",
            "publisher": "bioRxiv",
            "authors": ["Ann Author"],
            "url": "https://www.biorxiv.org/content/10.1101/2021.05.01.442244v1",
            "pdf_url": "https://www.biorxiv.org/content/10.1101/2021.05.01.442244v1.full.pdf"
        }"#,
    );
    let out = run(&["article", path_str(&fields)]);
    assert!(
        out.status.success(),
        "article failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let text = stdout(&out);
    assert!(text.contains("a fabio:ResearchPaper"));
    assert!(text.contains("a fabio:Article"));
    assert!(text.contains("dcterms:format \"application/pdf\""));
    assert!(text.contains("dcterms:creator ( \"Ann Author\" )"));
}

#[test]
fn article_rejects_missing_doi() {
    let dir = tempfile::tempdir().unwrap();
    let fields = write(
        dir.path(),
        "article.json",
        r#"{"doi": "NA", "title": "T", "date": "2021-05-01", "publisher": "P", "url": "https://example.org/"}"#,
    );
    let out = run(&["article", path_str(&fields)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("doi"));
}

#[test]
fn config_and_version() {
    let out = run(&["config"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("\"base_iri\": \"http://localhost:8080/\""));

    let dir = tempfile::tempdir().unwrap();
    let saved = dir.path().join("config.json");
    let out = run(&["config", "--save", path_str(&saved)]);
    assert!(out.status.success());
    let out = run(&["--config", path_str(&saved), "config"]);
    assert!(out.status.success());

    let out = run(&["version"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out).trim(),
        format!("reviewgraph {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn run_from_args_reports_unreadable_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.ttl");
    let result = reviewgraph_cli::run_from_args(["reviewgraph", "fmt", path_str(&missing)]);
    assert!(result.is_err());
}
