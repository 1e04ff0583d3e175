// Inbound request types for the image routes

use crate::error::{ProxyError, Result};
use crate::imaging::{is_allowed_extension, ALLOWED_EXTENSIONS};
use bytes::Bytes;
use std::collections::HashMap;

/// A file part received from the browser
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Raw multipart form: text fields and file parts, keyed by field name.
///
/// When a field name repeats, the last part wins.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl UploadForm {
    /// Trimmed, non-empty text field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Remove a file part. Browsers submit an empty, nameless part for an
    /// untouched `<input type="file">`; that counts as absent.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files
            .remove(name)
            .filter(|f| !f.data.is_empty() && !f.file_name.is_empty())
    }
}

/// `POST /generate`
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub aspect_ratio: Option<String>,
}

/// `POST /inpaint`
#[derive(Debug, Clone)]
pub struct InpaintRequest {
    pub prompt: String,
    pub image: UploadedFile,
    pub mask: UploadedFile,
}

/// `POST /erase_direct_upload`
#[derive(Debug, Clone)]
pub struct EraseRequest {
    pub prompt: Option<String>,
    pub image: UploadedFile,
    pub mask: UploadedFile,
}

impl TryFrom<UploadForm> for GenerateRequest {
    type Error = ProxyError;

    fn try_from(form: UploadForm) -> Result<Self> {
        let prompt = required_prompt(&form)?;
        Ok(Self {
            prompt,
            aspect_ratio: form.text("aspect_ratio").map(str::to_string),
        })
    }
}

impl TryFrom<UploadForm> for InpaintRequest {
    type Error = ProxyError;

    fn try_from(mut form: UploadForm) -> Result<Self> {
        let image = required_file(&mut form, "image")?;
        let mask = required_file(&mut form, "mask")?;
        let prompt = required_prompt(&form)?;
        Ok(Self { prompt, image, mask })
    }
}

impl TryFrom<UploadForm> for EraseRequest {
    type Error = ProxyError;

    fn try_from(mut form: UploadForm) -> Result<Self> {
        let image = required_file(&mut form, "image")?;
        let mask = required_file(&mut form, "mask")?;
        Ok(Self {
            prompt: form.text("prompt").map(str::to_string),
            image,
            mask,
        })
    }
}

fn required_prompt(form: &UploadForm) -> Result<String> {
    form.text("prompt")
        .map(str::to_string)
        .ok_or_else(|| ProxyError::Validation("Missing prompt".to_string()))
}

fn required_file(form: &mut UploadForm, name: &str) -> Result<UploadedFile> {
    let file = form
        .take_file(name)
        .ok_or_else(|| ProxyError::Validation(format!("No {} file provided", name)))?;

    if !is_allowed_extension(&file.file_name) {
        return Err(ProxyError::Validation(format!(
            "Invalid {} file type '{}': allowed extensions are {}",
            name,
            file.file_name,
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            data: Bytes::from_static(b"\x89PNG"),
        }
    }

    fn form(fields: &[(&str, &str)], files: &[(&str, &str)]) -> UploadForm {
        UploadForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: files.iter().map(|(k, n)| (k.to_string(), file(n))).collect(),
        }
    }

    fn validation_message(err: ProxyError) -> String {
        match err {
            ProxyError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_requires_prompt() {
        let err = GenerateRequest::try_from(form(&[("prompt", "   ")], &[])).unwrap_err();
        assert_eq!(validation_message(err), "Missing prompt");

        let req = GenerateRequest::try_from(form(&[("prompt", "a red fox")], &[])).unwrap();
        assert_eq!(req.prompt, "a red fox");
        assert!(req.aspect_ratio.is_none());
    }

    #[test]
    fn test_inpaint_checks_fields_in_order() {
        let err = InpaintRequest::try_from(form(&[], &[])).unwrap_err();
        assert_eq!(validation_message(err), "No image file provided");

        let err = InpaintRequest::try_from(form(&[], &[("image", "a.png")])).unwrap_err();
        assert_eq!(validation_message(err), "No mask file provided");

        let err = InpaintRequest::try_from(form(&[], &[("image", "a.png"), ("mask", "m.png")]))
            .unwrap_err();
        assert_eq!(validation_message(err), "Missing prompt");
    }

    #[test]
    fn test_inpaint_rejects_bad_extension() {
        let err = InpaintRequest::try_from(form(
            &[("prompt", "sky")],
            &[("image", "a.gif"), ("mask", "m.png")],
        ))
        .unwrap_err();
        assert!(validation_message(err).starts_with("Invalid image file type"));
    }

    #[test]
    fn test_erase_rejects_bad_extension() {
        let err = EraseRequest::try_from(form(&[], &[("image", "a.png"), ("mask", "m.bmp")]))
            .unwrap_err();
        assert!(validation_message(err).starts_with("Invalid mask file type 'm.bmp'"));
    }

    #[test]
    fn test_erase_prompt_is_optional() {
        let req = EraseRequest::try_from(form(&[], &[("image", "a.jpg"), ("mask", "m.webp")]))
            .unwrap();
        assert!(req.prompt.is_none());
    }

    #[test]
    fn test_empty_file_part_counts_as_missing() {
        let mut f = form(&[], &[("mask", "m.png")]);
        f.files.insert(
            "image".to_string(),
            UploadedFile {
                file_name: String::new(),
                data: Bytes::new(),
            },
        );
        let err = EraseRequest::try_from(f).unwrap_err();
        assert_eq!(validation_message(err), "No image file provided");
    }
}
