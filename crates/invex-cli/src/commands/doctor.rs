//! Doctor command - check the Tesseract OCR installation.

use std::path::Path;

use console::style;

use invex_core::TesseractEngine;

use super::config::load_config;

pub fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    match &config.ocr.tesseract_cmd {
        Some(cmd) => println!("Configured binary: {}", cmd.display()),
        None => match TesseractEngine::locate_binary() {
            Some(found) => println!("Found binary: {}", found.display()),
            None => println!(
                "{} Could not find tesseract on PATH or in common locations",
                style("⚠").yellow()
            ),
        },
    }

    let engine = TesseractEngine::new(&config.ocr);
    let info = match engine.info() {
        Ok(info) => info,
        Err(e) => {
            println!(
                "{} Tesseract OCR is not installed or not working: {}",
                style("✗").red(),
                e
            );
            println!();
            println!("{}", install_hint());
            anyhow::bail!("tesseract is not available");
        }
    };

    println!(
        "{} Tesseract OCR v{} is installed and working",
        style("✓").green(),
        info.version
    );
    println!("Languages: {}", info.languages.join(", "));

    if info.languages.iter().any(|lang| lang == &config.ocr.language) {
        println!(
            "{} Configured language '{}' is available",
            style("✓").green(),
            config.ocr.language
        );
    } else {
        println!(
            "{} Configured language '{}' is not installed",
            style("⚠").yellow(),
            config.ocr.language
        );
    }

    Ok(())
}

fn install_hint() -> &'static str {
    if cfg!(windows) {
        "Windows:\n  \
         1. Download the installer from https://github.com/UB-Mannheim/tesseract/wiki\n  \
         2. Run it and check \"Add to PATH\"\n  \
         3. Restart the terminal and run `tesseract --version`"
    } else if cfg!(target_os = "macos") {
        "macOS (Homebrew):\n  \
         brew install tesseract\n  \
         tesseract --version"
    } else {
        "Linux:\n  \
         Ubuntu/Debian: sudo apt-get install tesseract-ocr\n  \
         Fedora/RHEL:   sudo dnf install tesseract\n  \
         Then run `tesseract --version`"
    }
}
