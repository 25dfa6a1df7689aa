//! The REST client as the write pipeline's backend.

use async_trait::async_trait;

use super::ApiClient;
use crate::backend::{AdminBackend, AssetUploader};
use crate::error::ApiError;
use crate::forms::NewImage;
use crate::models::{Blog, Itinerary, StaffProfile, UploadedImage, WriteAck};
use crate::tracker::PatchPayload;

#[async_trait]
impl AssetUploader for ApiClient {
    async fn upload_itinerary_images(
        &self,
        files: &[NewImage],
    ) -> Result<Vec<UploadedImage>, ApiError> {
        self.upload_images(files).await
    }

    async fn upload_blog_image(&self, file: &NewImage) -> Result<UploadedImage, ApiError> {
        self.upload_cover(file).await
    }
}

#[async_trait]
impl AdminBackend for ApiClient {
    async fn fetch_itinerary(&self, id: &str) -> Result<Itinerary, ApiError> {
        self.get_itinerary(id).await
    }

    async fn create_itinerary(&self, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        ApiClient::create_itinerary(self, payload).await
    }

    async fn patch_itinerary(
        &self,
        id: &str,
        payload: &PatchPayload,
    ) -> Result<WriteAck, ApiError> {
        ApiClient::patch_itinerary(self, id, payload).await
    }

    async fn fetch_blog(&self, id: &str) -> Result<Blog, ApiError> {
        self.get_blog(id).await
    }

    async fn create_blog(&self, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        ApiClient::create_blog(self, payload).await
    }

    async fn patch_blog(&self, id: &str, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        ApiClient::patch_blog(self, id, payload).await
    }

    async fn fetch_profile(&self) -> Result<StaffProfile, ApiError> {
        self.me().await
    }

    async fn patch_profile(&self, payload: &PatchPayload) -> Result<StaffProfile, ApiError> {
        self.update_me(payload).await
    }
}
