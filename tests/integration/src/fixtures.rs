//! Test fixtures and data generators
//!
//! Demo accounts, request bodies and small binary payloads.

use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

/// Built-in demo accounts
#[derive(Debug, Clone, Copy)]
pub enum Account {
    Admin,
    Editor,
    Viewer,
}

impl Account {
    pub fn email(self) -> &'static str {
        match self {
            Self::Admin => "admin@society.local",
            Self::Editor => "editor@society.local",
            Self::Viewer => "viewer@society.local",
        }
    }

    pub fn password(self) -> &'static str {
        match self {
            Self::Admin => "admin123",
            Self::Editor => "editor123",
            Self::Viewer => "viewer123",
        }
    }

    pub fn credentials(self) -> Value {
        json!({ "email": self.email(), "password": self.password() })
    }
}

/// Notice creation body
pub fn notice_body(title: &str, status: &str) -> Value {
    json!({
        "title": title,
        "category": "general",
        "content": "Water supply will be interrupted on Sunday.",
        "priority": "high",
        "status": status
    })
}

/// Minimal PDF payload of roughly `len` bytes
pub fn pdf_bytes(len: usize) -> Vec<u8> {
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.resize(len.max(bytes.len()), b' ');
    bytes
}

/// A tiny PNG signature; enough for type checks
pub fn png_bytes() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0]
}

/// Document upload form with a PDF `file` part
pub fn document_form(title: &str, pdf: Vec<u8>) -> Form {
    let part = Part::bytes(pdf)
        .file_name("minutes.pdf")
        .mime_str("application/pdf")
        .expect("valid mime type");
    Form::new()
        .text("title", title.to_string())
        .text("category", "minutes")
        .text("date", "2024-03-01")
        .part("file", part)
}

/// Gallery upload form with `count` PNG photos
pub fn photos_form(count: usize) -> Form {
    (0..count).fold(Form::new(), |form, i| {
        let part = Part::bytes(png_bytes()).file_name(format!("photo-{i}.png"));
        form.part("photos", part)
    })
}
