use super::error::BannerError;
use crate::actor_framework::Entity;
use crate::domain::{Banner, BannerCreate, BannerPatch};

#[derive(Debug, Clone)]
pub enum BannerAction {
    SetActive(bool),
    MoveTo(u32),
}

fn validate_url(url: &str) -> Result<(), BannerError> {
    if url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/') {
        Ok(())
    } else {
        Err(BannerError::ValidationError(format!("not a usable image/link url: {}", url)))
    }
}

impl Entity for Banner {
    const KIND: &'static str = "banner";
    type Id = String;
    type CreateParams = BannerCreate;
    type Patch = BannerPatch;
    type Action = BannerAction;
    type ActionResult = Banner;
    type Error = BannerError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: BannerCreate) -> Result<Self, BannerError> {
        validate_url(&params.image_url)?;
        if let Some(link) = &params.link_url {
            validate_url(link)?;
        }
        Ok(Self {
            id,
            title: params.title,
            image_url: params.image_url,
            link_url: params.link_url,
            position: params.position,
            is_active: true,
        })
    }

    fn on_update(&mut self, patch: BannerPatch) -> Result<(), BannerError> {
        if let Some(image_url) = &patch.image_url {
            validate_url(image_url)?;
        }
        if let Some(Some(link)) = &patch.link_url {
            validate_url(link)?;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(link_url) = patch.link_url {
            self.link_url = link_url;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: BannerAction) -> Result<Banner, BannerError> {
        match action {
            BannerAction::SetActive(active) => self.is_active = active,
            BannerAction::MoveTo(position) => self.position = position,
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_relative_garbage_urls() {
        let params = BannerCreate {
            title: "Songkran sale".into(),
            image_url: "banner.png".into(),
            link_url: None,
            position: 0,
        };
        assert!(Banner::from_create_params("banner_1".into(), params).is_err());
    }
}
