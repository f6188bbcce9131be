use serde::{Deserialize, Serialize};

/// Homepage promotional image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BannerCreate {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerPatch {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<Option<String>>,
}
