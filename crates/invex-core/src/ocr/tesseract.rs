//! Tesseract OCR backend driving the `tesseract` executable.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{GrayImage, ImageFormat};
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::{OcrBackend, Result};
use crate::error::OcrError;
use crate::models::config::OcrConfig;

#[cfg(windows)]
const BINARY_NAME: &str = "tesseract.exe";
#[cfg(not(windows))]
const BINARY_NAME: &str = "tesseract";

#[cfg(windows)]
const KNOWN_LOCATIONS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];
#[cfg(target_os = "macos")]
const KNOWN_LOCATIONS: &[&str] = &["/usr/local/bin/tesseract", "/opt/homebrew/bin/tesseract"];
#[cfg(not(any(windows, target_os = "macos")))]
const KNOWN_LOCATIONS: &[&str] = &["/usr/bin/tesseract", "/usr/local/bin/tesseract"];

/// Installation report used by `invex doctor`.
#[derive(Debug, Clone, Serialize)]
pub struct TesseractInfo {
    pub command: PathBuf,
    pub version: String,
    pub languages: Vec<String>,
}

/// OCR backend running `tesseract <image> stdout -l <lang> --psm <mode>`.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: PathBuf,
    language: String,
    page_segmentation_mode: u8,
}

impl TesseractEngine {
    /// Build an engine from configuration.
    ///
    /// Without an explicit command, the binary is looked up on `PATH` and in
    /// the usual install locations; plain `tesseract` is used if both fail.
    pub fn new(config: &OcrConfig) -> Self {
        let command = config
            .tesseract_cmd
            .clone()
            .or_else(Self::locate_binary)
            .unwrap_or_else(|| PathBuf::from(BINARY_NAME));

        Self {
            command,
            language: config.language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
        }
    }

    /// Path of the executable this engine runs.
    pub fn command(&self) -> &Path {
        &self.command
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Find the tesseract binary on `PATH`, then in well-known locations.
    pub fn locate_binary() -> Option<PathBuf> {
        if let Some(path_var) = env::var_os("PATH") {
            for dir in env::split_paths(&path_var) {
                let candidate = dir.join(BINARY_NAME);
                if candidate.is_file() {
                    debug!("Found tesseract on PATH at {}", candidate.display());
                    return Some(candidate);
                }
            }
        }

        KNOWN_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file())
            .inspect(|path| debug!("Found tesseract at {}", path.display()))
    }

    /// Version reported by `tesseract --version`, e.g. "5.3.0".
    pub fn version(&self) -> Result<String> {
        let output = self.run(&["--version"])?;
        // Tesseract 3.x prints the banner on stderr.
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        parse_version(&banner)
            .ok_or_else(|| OcrError::Launch(format!("unexpected version output: {}", banner.trim())))
    }

    /// Languages reported by `tesseract --list-langs`.
    pub fn languages(&self) -> Result<Vec<String>> {
        let output = self.run(&["--list-langs"])?;
        if !output.status.success() {
            return Err(OcrError::Launch(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(parse_languages(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Version and languages in one report.
    pub fn info(&self) -> Result<TesseractInfo> {
        Ok(TesseractInfo {
            command: self.command.clone(),
            version: self.version()?,
            languages: self.languages()?,
        })
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new(&self.command)
            .args(args)
            .output()
            .map_err(|e| OcrError::Launch(format!("{}: {}", self.command.display(), e)))
    }
}

impl OcrBackend for TesseractEngine {
    fn recognize(&self, image: &GrayImage) -> Result<String> {
        let file = tempfile::Builder::new()
            .prefix("invex-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Preprocessing(format!("temp file: {}", e)))?;

        image
            .save_with_format(file.path(), ImageFormat::Png)
            .map_err(|e| OcrError::Preprocessing(e.to_string()))?;

        trace!("Running {} on {}", self.command.display(), file.path().display());

        let psm = self.page_segmentation_mode.to_string();
        let output = Command::new(&self.command)
            .arg(file.path())
            .arg("stdout")
            .args(["-l", self.language.as_str(), "--psm", psm.as_str()])
            .output()
            .map_err(|e| OcrError::Launch(format!("{}: {}", self.command.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("tesseract exited with {}: {}", output.status, stderr.trim());
            return Err(OcrError::Recognition(stderr.trim().to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("tesseract returned {} chars", text.len());
        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

fn parse_version(banner: &str) -> Option<String> {
    let first = banner.lines().find(|line| !line.trim().is_empty())?;
    let mut words = first.split_whitespace();
    if !words.next()?.eq_ignore_ascii_case("tesseract") {
        return None;
    }
    words
        .next()
        .map(|v| v.trim_start_matches('v').to_string())
}

fn parse_languages(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .map(str::to_string)
        .collect()
}
