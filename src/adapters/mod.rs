// Adapters layer: concrete implementations for external systems (files, OCR output, http).

pub mod http;
pub mod ocr;
pub mod source;
