// Data models for the relay
//
// - aspect: aspect ratio buckets for text-to-image
// - requests: inbound multipart forms and the typed route requests
// - health: liveness report types

pub mod aspect;
pub mod health;
pub mod requests;

pub use aspect::AspectRatio;
pub use requests::{EraseRequest, GenerateRequest, InpaintRequest, UploadForm, UploadedFile};
