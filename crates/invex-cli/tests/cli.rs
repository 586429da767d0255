use std::path::{Path, PathBuf};

use assert_cmd::Command;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;
use tempfile::TempDir;

fn invoice_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![50.into(), 780.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn write_invoice(dir: &Path, name: &str, number: &str) -> PathBuf {
    let number_line = format!("Invoice Number: {}", number);
    let bytes = invoice_pdf(&["Acme Corp.", &number_line, "Total: $1,234.56"]);
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// `invex` with the user config directory pointed into `dir`.
fn invex(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("invex").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config-home"));
    cmd
}

#[test]
fn process_pdf_prints_json() {
    let dir = TempDir::new().unwrap();
    let pdf = write_invoice(dir.path(), "acme.pdf", "INV-2024-001");

    let output = invex(&dir).arg("process").arg(&pdf).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["invoice_number"], "INV-2024-001");
    assert_eq!(json["total_amount"], "1,234.56");
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["source_file"], "acme.pdf");
}

#[test]
fn process_text_format_to_file() {
    let dir = TempDir::new().unwrap();
    let pdf = write_invoice(dir.path(), "acme.pdf", "A-9");
    let out = dir.path().join("acme.txt");

    invex(&dir)
        .args(["process", "--format", "text", "-o"])
        .arg(&out)
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("Invoice Number: A-9\n"));
    assert!(text.contains("Total Amount: 1234.56 USD\n"));
}

#[test]
fn process_rejects_unsupported_and_missing_files() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "Invoice Number: X").unwrap();

    invex(&dir)
        .arg("process")
        .arg(&notes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));

    invex(&dir)
        .arg("process")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_csv() {
    let dir = TempDir::new().unwrap();
    write_invoice(dir.path(), "a.pdf", "INV-1");
    write_invoice(dir.path(), "b.pdf", "INV-2");
    std::fs::write(dir.path().join("c.txt"), "skip me").unwrap();
    let out = dir.path().join("march");

    invex(&dir)
        .args(["batch", "--no-progress", "--output"])
        .arg(format!("{}.csv", out.display()))
        .arg(dir.path().join("*").display().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 extracted, 1 skipped"));

    let mut reader = csv::Reader::from_path(dir.path().join("march.csv")).unwrap();
    let numbers: Vec<String> = reader
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert_eq!(numbers, vec!["INV-1", "INV-2"]);
}

#[test]
fn batch_defaults_to_xlsx_extension() {
    let dir = TempDir::new().unwrap();
    let pdf = write_invoice(dir.path(), "a.pdf", "INV-1");
    let out = dir.path().join("report");

    invex(&dir)
        .args(["batch", "--no-progress", "-o"])
        .arg(&out)
        .arg(&pdf)
        .assert()
        .success();

    let bytes = std::fs::read(dir.path().join("report.xlsx")).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();

    invex(&dir)
        .args(["batch", "--no-progress"])
        .arg(dir.path().join("*.pdf").display().to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("invex.json");

    invex(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    invex(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "ocr.language", "deu"])
        .assert()
        .success();

    invex(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "ocr.language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deu\""));

    invex(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "ocr.nonsense", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    invex(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "export.format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for export.format"));
}

#[test]
fn session_loads_edits_and_exports() {
    let dir = TempDir::new().unwrap();
    let pdf = write_invoice(dir.path(), "a.pdf", "INV-7");
    let out = dir.path().join("reviewed.csv");

    let script = format!(
        "load {}\nlist\nedit 0 vendor_name Acme Corporation\nexport {}\nquit\n",
        pdf.display(),
        out.display()
    );

    invex(&dir)
        .arg("session")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-7"))
        .stdout(predicate::str::contains("Exported 1 records"));

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.contains("Acme Corporation"));
}
