use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::ShopConfig;
use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::checkout::DepositPolicy;
use crate::clients::{BannerClient, CheckoutSettings, DiscountClient, OrderClient, ProductClient, UserClient};
use crate::discount_actor::entity::discount_code_id;
use crate::domain::{default_shipping_options, Banner, DiscountCode, Order, Product, ShippingOption, User};
use crate::notify::{DisabledNotifier, LineMessagingClient, Notifier, NotifyError, ReceiptDispatcher};

/// Starts a counter-keyed resource actor, e.g. ids `order_1`, `order_2`, ...
fn spawn_counted<T>(buffer_size: usize, prefix: &'static str) -> (ResourceClient<T>, JoinHandle<()>)
where
    T: Entity<Id = String>,
{
    let counter = Arc::new(AtomicU64::new(1));
    let next_id = move |_: &T::CreateParams| format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst));
    let (actor, client) = ResourceActor::<T>::new(buffer_size, next_id);
    (client, tokio::spawn(actor.run()))
}

/// The whole shop back-end: every resource actor plus the clients wired over them.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct ShopSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub discount_client: DiscountClient,
    pub banner_client: BannerClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl ShopSystem {
    /// Builds the system with the notifier the config asks for.
    pub fn from_config(config: &ShopConfig) -> Result<Self, NotifyError> {
        let notifier: Arc<dyn Notifier> = match &config.line_channel_token {
            Some(token) => Arc::new(LineMessagingClient::new(token.clone())?),
            None => {
                warn!("LINE_CHANNEL_ACCESS_TOKEN not set, receipts will not be pushed");
                Arc::new(DisabledNotifier)
            }
        };
        Ok(Self::new(config, notifier, default_shipping_options()))
    }

    pub fn new(config: &ShopConfig, notifier: Arc<dyn Notifier>, shipping_options: Vec<ShippingOption>) -> Self {
        let buffer_size = config.actor_buffer_size;

        let (user_inner, user_handle) = spawn_counted::<User>(buffer_size, "user");
        let user_client = UserClient::new(user_inner);

        let (product_inner, product_handle) = spawn_counted::<Product>(buffer_size, "product");
        let product_client = ProductClient::new(product_inner);

        let (banner_inner, banner_handle) = spawn_counted::<Banner>(buffer_size, "banner");
        let banner_client = BannerClient::new(banner_inner);

        // Discount codes are keyed by the code itself.
        let (discount_actor, discount_inner) = ResourceActor::<DiscountCode>::new(buffer_size, discount_code_id);
        let discount_client = DiscountClient::new(discount_inner);
        let discount_handle = tokio::spawn(discount_actor.run());

        let dispatcher = ReceiptDispatcher::new(notifier, config.line_admin_target.clone(), config.shop_name.clone());
        let settings = CheckoutSettings {
            shipping_options,
            deposit_policy: DepositPolicy {
                percent: config.deposit_percent,
            },
        };
        let (order_inner, order_handle) = spawn_counted::<Order>(buffer_size, "order");
        let order_client = OrderClient::new(
            order_inner,
            user_client.clone(),
            product_client.clone(),
            discount_client.clone(),
            dispatcher,
            settings,
        );

        info!(shop = %config.shop_name, "Shop system started");

        Self {
            user_client,
            product_client,
            discount_client,
            banner_client,
            order_client,
            handles: vec![user_handle, product_handle, banner_handle, discount_handle, order_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // Actors stop once every client clone (and thus every sender) is gone.
        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);
        drop(self.discount_client);
        drop(self.banner_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
