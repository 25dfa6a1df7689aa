//! Blog endpoints.

use reqwest::StatusCode;

use super::{ApiClient, ApiRequest, FilePart};
use crate::error::ApiError;
use crate::forms::NewImage;
use crate::models::{Blog, UploadedImage, WriteAck};
use crate::tracker::PatchPayload;

const BLOGS_PATH: &str = "/blogs/";
const CREATE_BLOG_PATH: &str = "/blogs/create";
const UPLOAD_IMAGE_PATH: &str = "/blogs/upload-image";
const UPLOAD_FIELD: &str = "file";

impl ApiClient {
    pub async fn list_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        self.execute(&ApiRequest::get(BLOGS_PATH)).await?.json()
    }

    pub async fn get_blog(&self, id: &str) -> Result<Blog, ApiError> {
        self.execute(&ApiRequest::get(format!("/blogs/{id}")))
            .await?
            .json()
    }

    /// Publish a post; only a 201 counts as success.
    pub async fn create_blog(&self, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        let request = ApiRequest::post(CREATE_BLOG_PATH)
            .json(payload)?
            .expect_status(StatusCode::CREATED);
        Ok(WriteAck::from_value(self.execute(&request).await?.value()))
    }

    pub async fn patch_blog(&self, id: &str, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        let request = ApiRequest::patch(format!("/blogs/update/{id}")).json(payload)?;
        Ok(WriteAck::from_value(self.execute(&request).await?.value()))
    }

    pub async fn delete_blog(&self, id: &str) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(format!("/blogs/delete/{id}")))
            .await
            .map(|_| ())
    }

    /// Upload a cover image.
    pub async fn upload_cover(&self, file: &NewImage) -> Result<UploadedImage, ApiError> {
        let part = FilePart::read(UPLOAD_FIELD, file).await?;
        let request = ApiRequest::post(UPLOAD_IMAGE_PATH).files(vec![part]);
        self.execute(&request).await?.json()
    }
}
