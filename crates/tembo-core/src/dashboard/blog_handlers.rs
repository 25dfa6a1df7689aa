//! Blog handlers.

use std::sync::Arc;

use super::itinerary_handlers::require_confirmation;
use super::Dashboard;
use crate::cache::QueryKey;
use crate::display::{Blogs, DeleteResult, UpdateResult};
use crate::error::Result;
use crate::forms::BlogForm;
use crate::models::{Blog, WriteAck};
use crate::orchestrator::{BlogCreator, Settled};
use crate::params::{Delete, Id};
use crate::routes::Route;
use crate::views::ViewState;

impl Dashboard {
    /// Handle listing blog posts.
    pub async fn list_blogs(&self) -> Result<Blogs> {
        let blogs = self.load_blogs().await?;
        Ok(Blogs(blogs.as_ref().clone()))
    }

    /// The blog list as a view: failures become a retry hint.
    ///
    /// `refresh` reloads even when the cached list is still fresh.
    pub async fn blogs_view(&self, refresh: bool) -> Result<ViewState<Vec<Blog>>> {
        self.require(&Route::Blogs)?;
        let loader = || self.client.list_blogs();
        let result = if refresh {
            self.cache.refresh(QueryKey::Blogs, loader).await
        } else {
            self.cache.fetch(QueryKey::Blogs, loader).await
        };
        Ok(ViewState::load(result, "blogs"))
    }

    pub(crate) async fn load_blogs(&self) -> Result<Arc<Vec<Blog>>> {
        self.require(&Route::Blogs)?;
        Ok(self
            .cache
            .fetch(QueryKey::Blogs, || self.client.list_blogs())
            .await?)
    }

    pub async fn show_blog(&self, params: &Id) -> Result<Arc<Blog>> {
        self.require(&Route::Blog(params.id.clone()))?;
        Ok(self
            .cache
            .fetch(QueryKey::Blog(params.id.clone()), || {
                self.client.get_blog(&params.id)
            })
            .await?)
    }

    /// Handle publishing a post; the cover is uploaded first.
    pub async fn create_blog(&self, form: BlogForm) -> Result<Settled<WriteAck>> {
        self.require(&Route::Blogs)?;
        let creator = BlogCreator::new(self.client.clone(), self.cache.clone(), form);
        Ok(creator.submit().await?)
    }

    /// Handle a partial update of a post.
    ///
    /// A new cover is uploaded before the PATCH and sent as `image_url`
    /// plus `image_public_id`; without one the current cover is kept.
    pub async fn update_blog<F>(&self, params: &Id, edits: F) -> Result<UpdateResult<Blog>>
    where
        F: FnOnce(&mut BlogForm),
    {
        self.require(&Route::Blog(params.id.clone()))?;
        let (settled, snapshot) = self.run_update::<Blog, _>(&params.id, edits).await?;
        let changes = settled.fields.iter().map(|f| f.to_string()).collect();
        Ok(UpdateResult::with_changes(snapshot.as_ref().clone(), changes))
    }

    pub async fn delete_blog(&self, params: &Delete) -> Result<DeleteResult> {
        require_confirmation(params)?;
        self.require(&Route::Blogs)?;
        self.client.delete_blog(&params.id).await?;
        self.cache.invalidate(&QueryKey::Blogs).await;
        self.cache.invalidate(&QueryKey::Blog(params.id.clone())).await;
        log::info!("Deleted blog {}", params.id);
        Ok(DeleteResult::new("blog", &params.id))
    }
}
