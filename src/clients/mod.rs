//! Typed handles over the resource actors. Each client maps the actor plumbing
//! errors into its domain error and carries the `#[instrument]` spans.

#[macro_use]
mod macros;

mod banner_client;
mod discount_client;
mod order_client;
mod product_client;
mod user_client;

pub use banner_client::BannerClient;
pub use discount_client::DiscountClient;
pub use order_client::{CheckoutSettings, OrderClient};
pub use product_client::ProductClient;
pub use user_client::UserClient;
