use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::{Cursor, Read};
use std::process::Command;
use tempfile::tempdir;

const SCRIPT: &str = "function f(){ // comment\n  return 1; }\n";

#[test]
fn test_build_writes_both_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let src = dir.path().join("src.js");
    fs::write(&src, SCRIPT)?;
    let out = dir.path().join("assets/webharu-utils.v1.js");

    Command::cargo_bin("wu")?
        .arg("build")
        .arg("--src")
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Built minified"));

    let minified = fs::read_to_string(&out)?;
    assert_eq!(minified, "/*! WebHaru Utils v1 - Refactored | MIT License */function f(){return 1;}");
    let readable = fs::read_to_string(dir.path().join("assets/webharu-utils.v1.readable.js"))?;
    assert_eq!(readable, format!("/*! WebHaru Utils v1 - Refactored | MIT License */\n{SCRIPT}"));
    Ok(())
}

#[test]
fn test_build_release_size_limit_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let src = dir.path().join("src.js");
    fs::write(&src, "var x = 1;\n".repeat(3000))?;
    let out = dir.path().join("out.js");

    Command::cargo_bin("wu")?
        .args(["build", "--mode", "release", "--src"])
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("allowed maximum is 12288 bytes"));

    assert!(!out.exists());
    Ok(())
}

#[test]
fn test_build_dev_size_limit_warns() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let src = dir.path().join("src.js");
    fs::write(&src, "var x = 1;\n".repeat(3000))?;
    let out = dir.path().join("out.js");

    Command::cargo_bin("wu")?
        .args(["build", "--mode", "dev", "--src"])
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("exceeds size warning threshold"));

    assert!(out.exists());
    Ok(())
}

#[test]
fn test_build_config_file_limit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let src = dir.path().join("src.js");
    fs::write(&src, SCRIPT)?;
    let config = dir.path().join("wu.json");
    fs::write(&config, r#"{"build":{"release_limit":10}}"#)?;

    Command::cargo_bin("wu")?
        .arg("--config")
        .arg(&config)
        .arg("build")
        .arg("--src")
        .arg(&src)
        .arg("--out")
        .arg(dir.path().join("out.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("allowed maximum is 10 bytes"));
    Ok(())
}

#[test]
fn test_build_missing_source_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    Command::cargo_bin("wu")?
        .arg("build")
        .arg("--src")
        .arg(dir.path().join("missing.js"))
        .arg("--out")
        .arg(dir.path().join("out.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.js"));
    Ok(())
}

#[test]
fn test_pack_and_list() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "hello")?;
    fs::write(&b, "")?;
    let archive = dir.path().join("out/snippet.zip");

    Command::cargo_bin("wu")?
        .arg("pack")
        .arg(&a)
        .arg(&b)
        .arg("--output")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Packed 2 entries"));

    let bytes = fs::read(&archive)?;
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes))?;
    assert_eq!(zip.len(), 2);
    let mut first = zip.by_index(0)?;
    assert_eq!(first.name(), "your-snippet/a.txt");
    let mut text = String::new();
    first.read_to_string(&mut text)?;
    assert_eq!(text, "hello");
    drop(first);
    assert_eq!(zip.by_index(1)?.name(), "your-snippet/b.txt");

    Command::cargo_bin("wu")?
        .arg("list")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("3610a686  your-snippet/a.txt"))
        .stdout(predicate::str::contains("your-snippet/b.txt"));
    Ok(())
}

#[test]
fn test_pack_custom_prefix() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let a = dir.path().join("a.txt");
    fs::write(&a, "x")?;
    let archive = dir.path().join("p.zip");

    Command::cargo_bin("wu")?
        .args(["pack", "--prefix", "custom/dir"])
        .arg(&a)
        .arg("-o")
        .arg(&archive)
        .assert()
        .success();

    let mut zip = zip::ZipArchive::new(Cursor::new(fs::read(&archive)?))?;
    assert_eq!(zip.by_index(0)?.name(), "custom/dir/a.txt");
    Ok(())
}

#[test]
fn test_bundle_with_readme_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let write = |name: &str, text: &str| -> std::io::Result<std::path::PathBuf> {
        let path = dir.path().join(name);
        fs::write(&path, text)?;
        Ok(path)
    };
    let script = write("wu.js", "/*! x */var a=1;")?;
    let footer = write("footer.html", "<script></script>")?;
    let table = write("table.html", "<table></table>")?;
    let attrs = write("attrs.txt", "a<b")?;
    let llms = write("llms.txt", "llms")?;
    let archive = dir.path().join("wu-snippet.zip");

    Command::cargo_bin("wu")?
        .arg("bundle")
        .arg("--script")
        .arg(&script)
        .arg("--footer")
        .arg(&footer)
        .arg("--attributes-table")
        .arg(&table)
        .arg("--attributes")
        .arg(&attrs)
        .arg("--llms")
        .arg(&llms)
        .arg("--readme")
        .arg(dir.path().join("no-readme.md"))
        .arg("--output")
        .arg(&archive)
        .assert()
        .success();

    let mut zip = zip::ZipArchive::new(Cursor::new(fs::read(&archive)?))?;
    assert_eq!(zip.len(), 5);
    let mut readme = zip.by_name("your-snippet/README-ja.md")?;
    let mut text = String::new();
    readme.read_to_string(&mut text)?;
    assert!(text.starts_with("# WebHaru Utils"));
    drop(readme);
    let mut attributes = zip.by_name("your-snippet/attributes.html")?;
    let mut html = String::new();
    attributes.read_to_string(&mut html)?;
    assert!(html.contains("<pre>a&lt;b</pre>"));
    Ok(())
}

#[test]
fn test_list_rejects_non_archive() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let bogus = dir.path().join("bogus.zip");
    fs::write(&bogus, "not a zip file at all, definitely not")?;
    Command::cargo_bin("wu")?
        .arg("list")
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed archive"));
    Ok(())
}
