//! Shared fixtures for integration tests: an in-memory backend and a
//! scripted HTTP server.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tembo_core::forms::NewImage;
use tembo_core::models::{Blog, DayPlan, Image, Itinerary, StaffProfile, UploadedImage};
use tembo_core::{AdminBackend, ApiError, AssetUploader, PatchPayload, WriteAck};
use tiny_http::{Header, Response, Server};

pub fn sample_itinerary() -> Itinerary {
    Itinerary {
        id: "it-1".to_string(),
        title: "Old Safari".to_string(),
        overview: "Three days in Amboseli".to_string(),
        duration: 3,
        price: 1000,
        discount: 0.0,
        arrival_city: "Nairobi".to_string(),
        departure_city: "Nairobi".to_string(),
        accommodation: "Luxury".to_string(),
        location: "Kenya".to_string(),
        tags: "elephants, kilimanjaro".to_string(),
        images: (1..=3)
            .map(|n| Image {
                id: n.to_string(),
                image_url: format!("https://cdn.example/{n}.jpg"),
            })
            .collect(),
        days: vec![
            DayPlan {
                id: "d1".to_string(),
                day_number: 1,
                title: "Arrival".to_string(),
                details: "Transfer to the lodge".to_string(),
                images: Vec::new(),
            },
            DayPlan {
                id: "d2".to_string(),
                day_number: 2,
                title: "Game drive".to_string(),
                details: "Full day in the park".to_string(),
                images: Vec::new(),
            },
        ],
        cost_inclusive: vec!["Park fees".to_string()],
        cost_exclusive: vec!["Flights".to_string()],
    }
}

pub fn sample_profile() -> StaffProfile {
    serde_json::from_value(json!({
        "id": "st-1",
        "first_name": "Amani",
        "last_name": "Mwangi",
        "email": "amani@tembo.co.ke",
        "role": "manager"
    }))
    .expect("valid profile")
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeBackend {
    pub itinerary: Mutex<Option<Itinerary>>,
    pub blog: Mutex<Option<Blog>>,
    pub profile: Mutex<Option<StaffProfile>>,
    /// File counts of each upload request, in order
    pub uploads: Mutex<Vec<usize>>,
    /// Payloads sent to create endpoints
    pub creates: Mutex<Vec<PatchPayload>>,
    /// Payloads sent to update endpoints
    pub patches: Mutex<Vec<PatchPayload>>,
    pub fetches: Mutex<usize>,
    /// Zero-based index of the upload request that fails
    pub fail_upload_at: Option<usize>,
    pub fail_write: Option<ApiError>,
    pub write_delay: Option<Duration>,
}

impl FakeBackend {
    pub fn with_itinerary(itinerary: Itinerary) -> Self {
        Self {
            itinerary: Mutex::new(Some(itinerary)),
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn write_count(&self) -> usize {
        self.creates.lock().unwrap().len() + self.patches.lock().unwrap().len()
    }

    pub fn last_patch(&self) -> Option<PatchPayload> {
        self.patches.lock().unwrap().last().cloned()
    }

    fn record_upload(&self, count: usize) -> Result<usize, ApiError> {
        let mut uploads = self.uploads.lock().unwrap();
        let index = uploads.len();
        uploads.push(count);
        if self.fail_upload_at == Some(index) {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        Ok(index)
    }

    async fn write(&self, log: &Mutex<Vec<PatchPayload>>, payload: &PatchPayload) -> Result<(), ApiError> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        log.lock().unwrap().push(payload.clone());
        match &self.fail_write {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::NotFound {
            detail: "Not found".to_string(),
        }
    }
}

#[async_trait]
impl AssetUploader for FakeBackend {
    async fn upload_itinerary_images(
        &self,
        files: &[NewImage],
    ) -> Result<Vec<UploadedImage>, ApiError> {
        let batch = self.record_upload(files.len())?;
        Ok(files
            .iter()
            .enumerate()
            .map(|(n, file)| UploadedImage {
                image_url: format!("https://cdn.example/up/{}", file.file_name()),
                image_public_id: format!("pub-{batch}-{n}"),
            })
            .collect())
    }

    async fn upload_blog_image(&self, file: &NewImage) -> Result<UploadedImage, ApiError> {
        let batch = self.record_upload(1)?;
        Ok(UploadedImage {
            image_url: format!("https://cdn.example/up/{}", file.file_name()),
            image_public_id: format!("pub-{batch}-0"),
        })
    }
}

#[async_trait]
impl AdminBackend for FakeBackend {
    async fn fetch_itinerary(&self, _id: &str) -> Result<Itinerary, ApiError> {
        *self.fetches.lock().unwrap() += 1;
        self.itinerary.lock().unwrap().clone().ok_or_else(Self::not_found)
    }

    async fn create_itinerary(&self, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        self.write(&self.creates, payload).await?;
        Ok(WriteAck {
            id: Some("it-new".to_string()),
            ..WriteAck::default()
        })
    }

    async fn patch_itinerary(
        &self,
        _id: &str,
        payload: &PatchPayload,
    ) -> Result<WriteAck, ApiError> {
        self.write(&self.patches, payload).await?;
        let updated: serde_json::Map<String, Value> = payload
            .keys()
            .map(|key| (key.to_string(), Value::Bool(true)))
            .collect();
        Ok(WriteAck {
            updated_fields: Value::Object(updated),
            ..WriteAck::default()
        })
    }

    async fn fetch_blog(&self, _id: &str) -> Result<Blog, ApiError> {
        *self.fetches.lock().unwrap() += 1;
        self.blog.lock().unwrap().clone().ok_or_else(Self::not_found)
    }

    async fn create_blog(&self, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        self.write(&self.creates, payload).await?;
        Ok(WriteAck::default())
    }

    async fn patch_blog(&self, _id: &str, payload: &PatchPayload) -> Result<WriteAck, ApiError> {
        self.write(&self.patches, payload).await?;
        Ok(WriteAck::default())
    }

    async fn fetch_profile(&self) -> Result<StaffProfile, ApiError> {
        *self.fetches.lock().unwrap() += 1;
        self.profile.lock().unwrap().clone().ok_or_else(Self::not_found)
    }

    async fn patch_profile(&self, payload: &PatchPayload) -> Result<StaffProfile, ApiError> {
        self.write(&self.patches, payload).await?;
        let mut profile = self.profile.lock().unwrap().clone().ok_or_else(Self::not_found)?;
        if let Some(Value::String(first_name)) = payload.get("first_name") {
            profile.first_name = first_name.clone();
        }
        Ok(profile)
    }
}

/// A scripted reply from [`spawn_server`].
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_cookie(mut self, cookie: &str) -> Self {
        self.headers
            .push(("Set-Cookie".to_string(), cookie.to_string()));
        self
    }
}

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }
}

/// Serve `responses` in order on an ephemeral port, one per request.
pub fn spawn_server(
    responses: Vec<MockResponse>,
) -> (String, Receiver<CapturedRequest>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("mock server");
    let base_url = format!("http://{}", server.server_addr());
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        for spec in responses {
            let mut request = match server.recv_timeout(Duration::from_secs(8)) {
                Ok(Some(request)) => request,
                _ => break,
            };

            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let headers = request
                .headers()
                .iter()
                .map(|h| {
                    (
                        h.field.as_str().as_str().to_ascii_lowercase(),
                        h.value.as_str().to_string(),
                    )
                })
                .collect();
            let _ = tx.send(CapturedRequest {
                method: request.method().as_str().to_string(),
                url: request.url().to_string(),
                headers,
                body,
            });

            let mut response = Response::from_string(spec.body).with_status_code(spec.status);
            for (name, value) in &spec.headers {
                let header =
                    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("header");
                response.add_header(header);
            }
            let _ = request.respond(response);
        }
    });

    (base_url, rx, handle)
}

/// Collect every captured request once the server thread is done.
pub fn drain(rx: &Receiver<CapturedRequest>, handle: thread::JoinHandle<()>) -> Vec<CapturedRequest> {
    handle.join().expect("server thread");
    rx.try_iter().collect()
}
