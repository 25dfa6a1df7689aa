//! Patch payload synthesis.
//!
//! Building a payload happens in two steps. [`PatchPlan`] is computed purely
//! from the dirty set and the form: every changed field that needs no server
//! input is already in its wire shape, and the files that must be uploaded
//! first are listed as [`UploadTask`]s. [`PatchPlan::upload_and_resolve`]
//! then runs those uploads one batch at a time and substitutes the returned
//! references. A failed batch aborts before any payload exists.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::dirty::{Diffable, DirtySet};
use super::fields::{BlogField, ItineraryField, ProfileField, TrackedField};
use crate::backend::AssetUploader;
use crate::error::SubmitError;
use crate::forms::{clean_items, BlogForm, ItineraryForm, NewImage, ProfileForm};
use crate::models::{Accommodation, Image, ImageRef, Location, UploadedImage};
use crate::orchestrator::UploadBatch;

/// Minimal write body: only the keys of changed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PatchPayload(Map<String, Value>);

impl PatchPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Wire shape a payload is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Full body for a create endpoint
    Create,
    /// Changed fields only, for a PATCH endpoint
    Patch,
}

/// Where an upload's results go once it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    ItineraryImages,
    /// Index into the plan's day list
    Day(usize),
    BlogCover,
}

/// One batch of files that must be uploaded before the write.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadTask {
    pub batch: UploadBatch,
    pub target: UploadTarget,
    pub files: Vec<NewImage>,
}

/// Day entry waiting for its uploaded image references.
#[derive(Debug, Clone, PartialEq)]
struct DayDraft {
    day: i64,
    title: String,
    details: String,
    existing: Vec<Image>,
    replace_images: bool,
}

impl DayDraft {
    fn into_value(self, uploaded: Option<Vec<UploadedImage>>) -> Value {
        let images: Vec<ImageRef> = match uploaded {
            Some(uploaded) if self.replace_images => {
                uploaded.into_iter().map(ImageRef::Uploaded).collect()
            }
            _ => self.existing.into_iter().map(ImageRef::Existing).collect(),
        };
        json!({
            "day": self.day,
            "title": self.title,
            "details": self.details,
            "images": images,
        })
    }
}

/// References returned by the upload batches of one plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedRefs {
    pub itinerary_images: Option<Vec<UploadedImage>>,
    pub days: BTreeMap<usize, Vec<UploadedImage>>,
    pub blog_cover: Option<UploadedImage>,
}

/// A payload with its outstanding upload dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchPlan {
    payload: PatchPayload,
    days: Option<Vec<DayDraft>>,
    uploads: Vec<UploadTask>,
    fields: Vec<&'static str>,
}

impl PatchPlan {
    fn new(fields: Vec<&'static str>) -> Self {
        Self {
            payload: PatchPayload::new(),
            days: None,
            uploads: Vec::new(),
            fields,
        }
    }

    /// Nothing changed, so nothing must be sent.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Payload keys this plan will produce.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    pub fn pending_uploads(&self) -> &[UploadTask] {
        &self.uploads
    }

    /// Assemble the final payload from upload results.
    pub fn resolve(self, mut uploaded: UploadedRefs) -> PatchPayload {
        let mut payload = self.payload;

        if let Some(images) = uploaded.itinerary_images.take() {
            payload.insert("images", json!(images));
        }

        if let Some(days) = self.days {
            let days: Vec<Value> = days
                .into_iter()
                .enumerate()
                .map(|(index, draft)| draft.into_value(uploaded.days.remove(&index)))
                .collect();
            payload.insert("days", Value::Array(days));
        }

        if let Some(cover) = uploaded.blog_cover.take() {
            payload.insert("image_url", json!(cover.image_url));
            payload.insert("image_public_id", json!(cover.image_public_id));
        }

        payload
    }

    /// Upload every pending batch in order, then assemble the payload.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Upload` tagged with the failing batch; later
    /// batches are not attempted.
    pub async fn upload_and_resolve(
        self,
        uploader: &dyn AssetUploader,
    ) -> Result<PatchPayload, SubmitError> {
        self.upload_and_resolve_with(uploader, &mut |_| {}).await
    }

    /// Like [`PatchPlan::upload_and_resolve`], reporting each batch to
    /// `on_batch` before it starts.
    pub async fn upload_and_resolve_with(
        self,
        uploader: &dyn AssetUploader,
        on_batch: &mut (dyn FnMut(UploadBatch) + Send),
    ) -> Result<PatchPayload, SubmitError> {
        let mut uploaded = UploadedRefs::default();

        for task in &self.uploads {
            on_batch(task.batch);
            log::debug!("Uploading {} ({} file(s))", task.batch, task.files.len());
            match task.target {
                UploadTarget::ItineraryImages => {
                    let refs = uploader
                        .upload_itinerary_images(&task.files)
                        .await
                        .map_err(|source| SubmitError::Upload {
                            batch: task.batch,
                            source,
                        })?;
                    uploaded.itinerary_images = Some(refs);
                }
                UploadTarget::Day(index) => {
                    let refs = uploader
                        .upload_itinerary_images(&task.files)
                        .await
                        .map_err(|source| SubmitError::Upload {
                            batch: task.batch,
                            source,
                        })?;
                    uploaded.days.insert(index, refs);
                }
                UploadTarget::BlogCover => {
                    // Blog covers are always a single file.
                    let Some(file) = task.files.first() else {
                        continue;
                    };
                    let cover = uploader
                        .upload_blog_image(file)
                        .await
                        .map_err(|source| SubmitError::Upload {
                            batch: task.batch,
                            source,
                        })?;
                    uploaded.blog_cover = Some(cover);
                }
            }
        }

        Ok(self.resolve(uploaded))
    }
}

/// A form that knows how to express its dirty fields on the wire.
pub trait PatchSource: Diffable + Sized {
    fn plan(&self, dirty: &DirtySet<Self::Field>, shape: PayloadShape) -> PatchPlan;

    /// The form as it stands once a write built from it has been applied.
    fn committed(&self) -> Self;
}

/// Plan the minimal update from `baseline` to `current`.
pub fn plan_patch<F: PatchSource>(baseline: &F, current: &F) -> PatchPlan {
    current.plan(&baseline.diff(current), PayloadShape::Patch)
}

/// Plan a full create body from a form.
pub fn plan_create<F: PatchSource>(form: &F) -> PatchPlan {
    form.plan(&DirtySet::all(), PayloadShape::Create)
}

impl PatchSource for ItineraryForm {
    fn plan(&self, dirty: &DirtySet<ItineraryField>, shape: PayloadShape) -> PatchPlan {
        let mut plan = PatchPlan::new(dirty.external_names());

        for field in dirty.iter() {
            let key = field.external_name();
            match field {
                ItineraryField::Title => plan.payload.insert(key, json!(self.title)),
                ItineraryField::Overview => plan.payload.insert(key, json!(self.overview)),
                ItineraryField::Duration => plan.payload.insert(key, json!(self.duration)),
                ItineraryField::Price => plan.payload.insert(key, json!(self.price)),
                ItineraryField::Discount => plan.payload.insert(key, json!(self.discount)),
                ItineraryField::ArrivalCity => {
                    plan.payload.insert(key, json!(self.arrival_city))
                }
                ItineraryField::DepartureCity => {
                    plan.payload.insert(key, json!(self.departure_city))
                }
                ItineraryField::Accommodation => {
                    let value = self.accommodation.as_ref().map(Accommodation::as_str);
                    plan.payload.insert(key, json!(value))
                }
                ItineraryField::Location => {
                    let value = self.location.as_ref().map(Location::as_str);
                    plan.payload.insert(key, json!(value))
                }
                ItineraryField::Tags => {
                    let tags = clean_items(&self.tags);
                    let value = match shape {
                        PayloadShape::Create => Value::Array(
                            tags.iter().map(|name| json!({ "name": name })).collect(),
                        ),
                        PayloadShape::Patch => json!(tags.join(",")),
                    };
                    plan.payload.insert(key, value);
                }
                ItineraryField::CostInclusive => {
                    plan.payload.insert(key, json!(clean_items(&self.cost_inclusive)))
                }
                ItineraryField::CostExclusive => {
                    plan.payload.insert(key, json!(clean_items(&self.cost_exclusive)))
                }
                ItineraryField::Days => {
                    let mut drafts = Vec::with_capacity(self.days.len());
                    for (index, day) in self.days.iter().enumerate() {
                        let replace_images = !day.new_images.is_empty();
                        if replace_images {
                            plan.uploads.push(UploadTask {
                                batch: UploadBatch::DayImages { day: day.day },
                                target: UploadTarget::Day(index),
                                files: day.new_images.clone(),
                            });
                        }
                        drafts.push(DayDraft {
                            day: day.day,
                            title: day.title.clone(),
                            details: day.details.clone(),
                            existing: day.existing_images.clone(),
                            replace_images,
                        });
                    }
                    plan.days = Some(drafts);
                }
                ItineraryField::Images => {
                    if !self.new_images.is_empty() {
                        // Itinerary-level images go first.
                        plan.uploads.insert(
                            0,
                            UploadTask {
                                batch: UploadBatch::ItineraryImages,
                                target: UploadTarget::ItineraryImages,
                                files: self.new_images.clone(),
                            },
                        );
                    }
                }
            }
        }

        plan
    }

    fn committed(&self) -> Self {
        self.without_pending_files()
    }
}

impl PatchSource for BlogForm {
    fn plan(&self, dirty: &DirtySet<BlogField>, _shape: PayloadShape) -> PatchPlan {
        let mut plan = PatchPlan::new(dirty.external_names());

        for field in dirty.iter() {
            match field {
                BlogField::Title => plan.payload.insert("title", json!(self.title)),
                BlogField::Content => plan.payload.insert("content", json!(self.content)),
                BlogField::Image => {
                    if let Some(file) = &self.new_image {
                        plan.uploads.push(UploadTask {
                            batch: UploadBatch::BlogCover,
                            target: UploadTarget::BlogCover,
                            files: vec![file.clone()],
                        });
                    }
                }
            }
        }

        plan
    }

    fn committed(&self) -> Self {
        self.without_pending_files()
    }
}

impl PatchSource for ProfileForm {
    fn plan(&self, dirty: &DirtySet<ProfileField>, _shape: PayloadShape) -> PatchPlan {
        let mut plan = PatchPlan::new(dirty.external_names());

        for field in dirty.iter() {
            let value = match field {
                ProfileField::FirstName => json!(self.first_name.trim()),
                ProfileField::LastName => json!(self.last_name.trim()),
                ProfileField::Email => json!(self.email.trim()),
                ProfileField::Password => json!(self.password),
            };
            plan.payload.insert(field.external_name(), value);
        }

        plan
    }

    fn committed(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::ApiError;
    use crate::forms::DayForm;

    fn baseline() -> ItineraryForm {
        ItineraryForm {
            title: "Old Safari".to_string(),
            overview: "Classic Mara".to_string(),
            duration: 3,
            price: 1000,
            discount: 0.0,
            arrival_city: "Nairobi".to_string(),
            departure_city: "Nairobi".to_string(),
            tags: vec!["wildlife".to_string()],
            days: vec![
                DayForm::new(1, "Arrival", "Transfer to camp"),
                DayForm {
                    existing_images: vec![Image {
                        id: "9".to_string(),
                        image_url: "https://cdn.example/9.jpg".to_string(),
                    }],
                    ..DayForm::new(2, "Game drive", "Full day")
                },
            ],
            existing_images: (1..=3)
                .map(|id| Image {
                    id: id.to_string(),
                    image_url: format!("https://cdn.example/{id}.jpg"),
                })
                .collect(),
            ..ItineraryForm::default()
        }
    }

    struct CountingUploader {
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
    }

    impl CountingUploader {
        fn new(fail_on_call: Option<usize>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on_call,
            }
        }
    }

    #[async_trait]
    impl AssetUploader for CountingUploader {
        async fn upload_itinerary_images(
            &self,
            files: &[NewImage],
        ) -> Result<Vec<UploadedImage>, ApiError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on_call == Some(call) {
                return Err(ApiError::Network("connection reset".to_string()));
            }
            Ok(files
                .iter()
                .map(|file| UploadedImage {
                    image_url: format!("https://cdn.example/up/{}", file.file_name()),
                    image_public_id: file.file_name(),
                })
                .collect())
        }

        async fn upload_blog_image(&self, file: &NewImage) -> Result<UploadedImage, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(UploadedImage {
                image_url: format!("https://cdn.example/blog/{}", file.file_name()),
                image_public_id: file.file_name(),
            })
        }
    }

    #[test]
    fn test_price_change_yields_price_only() {
        let base = baseline();
        let mut current = base.clone();
        current.price = 1200;

        let payload = plan_patch(&base, &current).resolve(UploadedRefs::default());
        assert_eq!(payload.into_value(), json!({ "price": 1200 }));
    }

    #[test]
    fn test_no_new_images_keeps_images_out_of_payload() {
        let base = baseline();
        let mut current = base.clone();
        current.title = "Mara Explorer".to_string();

        let plan = plan_patch(&base, &current);
        assert!(plan.pending_uploads().is_empty());
        let payload = plan.resolve(UploadedRefs::default());
        assert!(!payload.contains_key("images"));
        assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn test_edit_then_revert_is_empty() {
        let base = baseline();
        let mut current = base.clone();
        current.title = "Something else".to_string();
        current.title = base.title.clone();
        assert!(plan_patch(&base, &current).is_empty());
    }

    #[test]
    fn test_planning_is_repeatable() {
        let base = baseline();
        let mut current = base.clone();
        current.tags.push("luxury".to_string());
        current.days[0].title = "Arrival day".to_string();
        assert_eq!(plan_patch(&base, &current), plan_patch(&base, &current));
    }

    fn edit(form: &mut ItineraryForm, field: ItineraryField) {
        match field {
            ItineraryField::Title => form.title.push('!'),
            ItineraryField::Overview => form.overview.push('!'),
            ItineraryField::Duration => form.duration += 1,
            ItineraryField::Price => form.price += 1,
            ItineraryField::Discount => form.discount = 5.0,
            ItineraryField::ArrivalCity => form.arrival_city = "Arusha".to_string(),
            ItineraryField::DepartureCity => form.departure_city = "Arusha".to_string(),
            ItineraryField::Accommodation => form.accommodation = Some(Accommodation::Luxury),
            ItineraryField::Location => form.location = Some(Location::Uganda),
            ItineraryField::Tags => form.tags.push("birding".to_string()),
            ItineraryField::CostInclusive => form.cost_inclusive.push("Meals".to_string()),
            ItineraryField::CostExclusive => form.cost_exclusive.push("Tips".to_string()),
            ItineraryField::Days => form.days[0].details.push('!'),
            ItineraryField::Images => form.new_images.push(NewImage::new("a.jpg")),
        }
    }

    #[test]
    fn test_every_single_field_maps_to_its_external_name() {
        let base = baseline();

        for field in ItineraryField::ALL.iter().copied() {
            let mut current = base.clone();
            edit(&mut current, field);
            let plan = plan_patch(&base, &current);
            assert_eq!(plan.fields(), &[field.external_name()], "{field:?}");

            let mut refs = UploadedRefs::default();
            if field == ItineraryField::Images {
                refs.itinerary_images = Some(Vec::new());
            }
            let payload = plan.resolve(refs);
            assert_eq!(payload.len(), 1, "{field:?}");
            assert!(payload.contains_key(field.external_name()), "{field:?}");
        }
    }

    #[test]
    fn test_city_rename_uses_snake_case_key() {
        let base = baseline();
        let mut current = base.clone();
        current.arrival_city = "Kisumu".to_string();
        let payload = plan_patch(&base, &current).resolve(UploadedRefs::default());
        assert_eq!(payload.into_value(), json!({ "arrival_city": "Kisumu" }));
    }

    #[test]
    fn test_tag_shapes() {
        let mut form = baseline();
        form.tags = vec!["wildlife".to_string(), " family ".to_string()];

        let create = plan_create(&form).resolve(UploadedRefs::default());
        assert_eq!(
            create.get("tags"),
            Some(&json!([{ "name": "wildlife" }, { "name": "family" }]))
        );

        let base = baseline();
        let patch = plan_patch(&base, &form).resolve(UploadedRefs::default());
        assert_eq!(patch.get("tags"), Some(&json!("wildlife,family")));
    }

    #[tokio::test]
    async fn test_day_uploads_replace_only_that_day() {
        let base = baseline();
        let mut current = base.clone();
        current.days[0].new_images.push(NewImage::new("camp.jpg"));

        let uploader = CountingUploader::new(None);
        let payload = plan_patch(&base, &current)
            .upload_and_resolve(&uploader)
            .await
            .unwrap();

        assert_eq!(uploader.calls.load(Ordering::SeqCst), 1);
        let days = payload.get("days").unwrap();
        assert_eq!(
            days[0]["images"],
            json!([{ "image_url": "https://cdn.example/up/camp.jpg", "image_public_id": "camp.jpg" }])
        );
        assert_eq!(
            days[1]["images"],
            json!([{ "id": "9", "image_url": "https://cdn.example/9.jpg" }])
        );
        assert_eq!(days[1]["day"], json!(2));
    }

    #[tokio::test]
    async fn test_failed_day_batch_stops_remaining_uploads() {
        let base = baseline();
        let mut current = base.clone();
        current.new_images.push(NewImage::new("cover.jpg"));
        current.days[0].new_images.push(NewImage::new("camp.jpg"));
        current.days[1].new_images.push(NewImage::new("drive.jpg"));

        let uploader = CountingUploader::new(Some(2));
        let err = plan_patch(&base, &current)
            .upload_and_resolve(&uploader)
            .await
            .unwrap_err();

        assert_eq!(uploader.calls.load(Ordering::SeqCst), 2);
        match err {
            SubmitError::Upload { batch, .. } => {
                assert_eq!(batch, UploadBatch::DayImages { day: 1 })
            }
            other => panic!("Expected upload failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blog_cover_is_substituted() {
        let base = BlogForm {
            title: "Calving".to_string(),
            content: "February".to_string(),
            image_url: "https://cdn.example/old.jpg".to_string(),
            new_image: None,
        };
        let mut current = base.clone();
        current.new_image = Some(NewImage::new("new.png"));

        let uploader = CountingUploader::new(None);
        let payload = plan_patch(&base, &current)
            .upload_and_resolve(&uploader)
            .await
            .unwrap();
        assert_eq!(
            payload.into_value(),
            json!({
                "image_url": "https://cdn.example/blog/new.png",
                "image_public_id": "new.png"
            })
        );
    }

    #[test]
    fn test_profile_payload_is_trimmed() {
        let base = ProfileForm {
            first_name: "Neema".to_string(),
            last_name: "Achieng".to_string(),
            email: "neema@tembo.co.ke".to_string(),
            password: String::new(),
        };
        let mut current = base.clone();
        current.email = "  neema@mara.co.ke ".to_string();
        let payload = plan_patch(&base, &current).resolve(UploadedRefs::default());
        assert_eq!(payload.into_value(), json!({ "email": "neema@mara.co.ke" }));
    }
}
