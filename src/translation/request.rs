// Inbound → outbound request translation

use crate::config::AppConfig;
use crate::imaging::NormalizedImage;
use crate::models::{AspectRatio, GenerateRequest};
use crate::stability::{Endpoint, FormField, ProviderRequest};
use bytes::Bytes;

/// Build the text-to-image request.
///
/// The aspect ratio resolves through the static bucket table, so the outbound
/// request always carries a concrete width and height.
pub fn build_generate_request(req: &GenerateRequest, config: &AppConfig) -> ProviderRequest {
    let aspect = AspectRatio::resolve(req.aspect_ratio.as_deref());
    let generation = &config.generation;

    ProviderRequest::new(Endpoint::Generate, config.provider.generate_timeout())
        .field(FormField::text("prompt", req.prompt.clone()))
        .field(FormField::text("output_format", config.images.output_format.as_param()))
        .field(FormField::text("aspect_ratio", aspect.label))
        .field(FormField::text("width", aspect.width.to_string()))
        .field(FormField::text("height", aspect.height.to_string()))
        .field(FormField::text("steps", generation.steps.to_string()))
        .field(FormField::text("cfg_scale", generation.cfg_scale.to_string()))
        .field(FormField::text("samples", "1"))
}

/// Build the inpaint request from already-normalized uploads
pub fn build_inpaint_request(
    prompt: &str,
    image: NormalizedImage,
    mask: NormalizedImage,
    config: &AppConfig,
) -> ProviderRequest {
    ProviderRequest::new(Endpoint::Inpaint, config.provider.inpaint_timeout())
        .field(FormField::text("prompt", prompt))
        .field(image_field("image", image))
        .field(image_field("mask", mask))
        .field(FormField::text("output_format", config.images.output_format.as_param()))
}

/// Build the erase request. An absent prompt is sent as an empty field.
pub fn build_erase_request(
    prompt: Option<&str>,
    image: NormalizedImage,
    mask: NormalizedImage,
    config: &AppConfig,
) -> ProviderRequest {
    ProviderRequest::new(Endpoint::Erase, config.provider.erase_timeout())
        .field(image_field("image", image))
        .field(image_field("mask", mask))
        .field(FormField::text("prompt", prompt.unwrap_or_default()))
        .field(FormField::text("output_format", config.images.output_format.as_param()))
}

fn image_field(name: &'static str, image: NormalizedImage) -> FormField {
    FormField::File {
        name,
        file_name: format!("{}.{}", name, image.format.as_param()),
        content_type: image.format.mime_type(),
        data: Bytes::from(image.bytes),
    }
}
