//! Itinerary endpoints.

use reqwest::StatusCode;

use super::{ApiClient, ApiRequest, FilePart};
use crate::error::ApiError;
use crate::forms::NewImage;
use crate::models::{Itinerary, UploadedImage, WriteAck};
use crate::tracker::PatchPayload;

const ITINERARIES_PATH: &str = "/itineraries";
const CREATE_ITINERARY_PATH: &str = "/itineraries/create";
const UPLOAD_IMAGES_PATH: &str = "/itineraries/upload-images";
const UPLOAD_FIELD: &str = "files";

fn itinerary_path(id: &str) -> String {
    format!("{ITINERARIES_PATH}/{id}")
}

impl ApiClient {
    pub async fn list_itineraries(&self) -> Result<Vec<Itinerary>, ApiError> {
        self.execute(&ApiRequest::get(ITINERARIES_PATH))
            .await?
            .json()
    }

    pub async fn get_itinerary(&self, id: &str) -> Result<Itinerary, ApiError> {
        self.execute(&ApiRequest::get(itinerary_path(id)))
            .await?
            .json()
    }

    /// Create an itinerary; only a 201 counts as success.
    pub async fn create_itinerary(&self, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        let request = ApiRequest::post(CREATE_ITINERARY_PATH)
            .json(payload)?
            .expect_status(StatusCode::CREATED);
        Ok(WriteAck::from_value(self.execute(&request).await?.value()))
    }

    /// Apply a partial update.
    pub async fn patch_itinerary(
        &self,
        id: &str,
        payload: &PatchPayload,
    ) -> Result<WriteAck, ApiError> {
        let request = ApiRequest::patch(itinerary_path(id)).json(payload)?;
        Ok(WriteAck::from_value(self.execute(&request).await?.value()))
    }

    pub async fn delete_itinerary(&self, id: &str) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(itinerary_path(id)))
            .await
            .map(|_| ())
    }

    /// Upload one batch of images in a single multipart request.
    pub async fn upload_images(&self, files: &[NewImage]) -> Result<Vec<UploadedImage>, ApiError> {
        let mut parts = Vec::with_capacity(files.len());
        for file in files {
            parts.push(FilePart::read(UPLOAD_FIELD, file).await?);
        }
        log::debug!("Uploading {} itinerary image(s)", parts.len());
        let request = ApiRequest::post(UPLOAD_IMAGES_PATH).files(parts);
        self.execute(&request).await?.json()
    }
}
