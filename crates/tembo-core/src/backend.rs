//! Backend seams used by the write pipeline.
//!
//! The orchestrator only talks to the REST API through these traits, which
//! [`crate::client::ApiClient`] implements. Tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::forms::NewImage;
use crate::models::{Blog, Itinerary, StaffProfile, UploadedImage, WriteAck};
use crate::tracker::PatchPayload;

/// Uploads files and returns the persisted references.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// Upload a batch of itinerary or day images in one request.
    async fn upload_itinerary_images(
        &self,
        files: &[NewImage],
    ) -> Result<Vec<UploadedImage>, ApiError>;

    /// Upload a single blog cover.
    async fn upload_blog_image(&self, file: &NewImage) -> Result<UploadedImage, ApiError>;
}

/// Entity reads and writes needed by the editors and creators.
#[async_trait]
pub trait AdminBackend: AssetUploader {
    async fn fetch_itinerary(&self, id: &str) -> Result<Itinerary, ApiError>;

    async fn create_itinerary(&self, payload: &PatchPayload) -> Result<WriteAck, ApiError>;

    async fn patch_itinerary(&self, id: &str, payload: &PatchPayload)
        -> Result<WriteAck, ApiError>;

    async fn fetch_blog(&self, id: &str) -> Result<Blog, ApiError>;

    async fn create_blog(&self, payload: &PatchPayload) -> Result<WriteAck, ApiError>;

    async fn patch_blog(&self, id: &str, payload: &PatchPayload) -> Result<WriteAck, ApiError>;

    async fn fetch_profile(&self) -> Result<StaffProfile, ApiError>;

    async fn patch_profile(&self, payload: &PatchPayload) -> Result<StaffProfile, ApiError>;
}
