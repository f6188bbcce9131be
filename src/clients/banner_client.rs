use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::banner_actor::{BannerAction, BannerError};
use crate::domain::{Banner, BannerCreate, BannerPatch};

#[derive(Clone)]
pub struct BannerClient {
    inner: ResourceClient<Banner>,
}

impl_basic_client!(BannerClient, Banner, BannerError, banner);

impl BannerClient {
    #[instrument(skip(self), fields(title = %banner.title))]
    pub async fn create_banner(&self, banner: BannerCreate) -> Result<String, BannerError> {
        debug!("Sending request");
        self.inner.create(banner).await.map_err(BannerError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_banner(&self, id: String, patch: BannerPatch) -> Result<Banner, BannerError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(BannerError::from)
    }

    /// Homepage carousel contents, in display order.
    #[instrument(skip(self))]
    pub async fn list_active_banners(&self) -> Result<Vec<Banner>, BannerError> {
        debug!("Sending request");
        let mut banners: Vec<Banner> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|banner| banner.is_active)
            .collect();
        banners.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        Ok(banners)
    }

    #[instrument(skip(self))]
    pub async fn set_banner_active(&self, id: String, active: bool) -> Result<Banner, BannerError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, BannerAction::SetActive(active)).await?)
    }

    #[instrument(skip(self))]
    pub async fn move_banner(&self, id: String, position: u32) -> Result<Banner, BannerError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, BannerAction::MoveTo(position)).await?)
    }
}
