//! OCR for scanned invoice images.
//!
//! Images are binarized with Otsu's threshold and handed to an [`OcrBackend`].
//! The shipped backend drives the `tesseract` executable.

mod preprocessing;
mod tesseract;

pub use preprocessing::{binarize, otsu_threshold, ImagePreprocessor};
pub use tesseract::{TesseractEngine, TesseractInfo};

use image::GrayImage;

use crate::error::OcrError;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Text recognition engine working on a prepared grayscale image.
pub trait OcrBackend {
    /// Recognize the text in `image`, lines separated by `\n`.
    fn recognize(&self, image: &GrayImage) -> Result<String>;

    /// Short engine name for logs.
    fn name(&self) -> &str {
        "ocr"
    }
}

impl<T: OcrBackend + ?Sized> OcrBackend for &T {
    fn recognize(&self, image: &GrayImage) -> Result<String> {
        (**self).recognize(image)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image: &GrayImage) -> Result<String> {
        (**self).recognize(image)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
