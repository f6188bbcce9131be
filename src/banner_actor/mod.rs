//! Homepage banners managed from the back-office.

pub mod entity;
pub mod error;

pub use entity::BannerAction;
pub use error::*;
