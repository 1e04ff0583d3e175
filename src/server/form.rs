// Multipart form extraction

use crate::error::{ProxyError, Result};
use crate::models::{UploadForm, UploadedFile};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

/// Drain a multipart body into an [`UploadForm`].
///
/// Parts with a file name become files; everything else is read as text.
/// Extractor rejections (wrong content type, missing boundary) surface as
/// validation errors so the caller still gets a JSON body.
pub async fn read_form(
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<UploadForm> {
    let mut multipart = multipart.map_err(|rejection| {
        ProxyError::Validation(format!("Expected multipart/form-data: {}", rejection.body_text()))
    })?;

    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let data = field.bytes().await.map_err(multipart_error)?;
                debug!("Received file part '{}' ({}, {} bytes)", name, file_name, data.len());
                form.files.insert(name, UploadedFile { file_name, data });
            }
            None => {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> ProxyError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProxyError::PayloadTooLarge(err.body_text())
    } else {
        ProxyError::Validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}
