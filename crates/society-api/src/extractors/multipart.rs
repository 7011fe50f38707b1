//! Multipart upload form extractor
//!
//! Buffers a `multipart/form-data` body into its text fields and file parts.
//! Size and type checks are left to the upload policies in the services.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use society_core::IncomingFile;
use tracing::debug;

use crate::response::ApiError;

/// A parsed upload form
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: Vec<(String, IncomingFile)>,
}

impl UploadForm {
    /// Text field value; blank values count as missing
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    }

    /// Text field value or an empty string
    pub fn text_or_default(&self, name: &str) -> String {
        self.text(name).unwrap_or_default()
    }

    /// First file sent under `name`
    pub fn take_file(&mut self, name: &str) -> Option<IncomingFile> {
        let index = self.files.iter().position(|(field, _)| field == name)?;
        Some(self.files.remove(index).1)
    }

    /// Every file sent under `name`, in upload order
    pub fn take_files(&mut self, name: &str) -> Vec<IncomingFile> {
        let (matching, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|(field, _)| field == name);
        self.files = rest;
        matching.into_iter().map(|(_, file)| file).collect()
    }

    fn insert_file(&mut self, field: String, file: IncomingFile) {
        self.files.push((field, file));
    }
}

#[async_trait]
impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::multipart(e.body_text()))?;

        let mut form = UploadForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::multipart(e.body_text()))?
        {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            match field.file_name().map(ToString::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(ToString::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::multipart(e.body_text()))?;

                    // Browsers send an empty part when no file was chosen
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    debug!(field = %name, file = %file_name, size = bytes.len(), "Received file part");
                    form.insert_file(name, IncomingFile::new(file_name, content_type, bytes.to_vec()));
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiError::multipart(e.body_text()))?;
                    form.fields.insert(name, value);
                }
            }
        }
        Ok(form)
    }
}
