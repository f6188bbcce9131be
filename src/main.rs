mod actor_framework;
mod app_system;
mod banner_actor;
mod checkout;
mod clients;
mod discount_actor;
mod domain;
mod notify;
mod order_actor;
mod product_actor;
mod user_actor;

#[cfg(test)]
mod mock_framework;

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use tracing::{debug, error, info, Instrument};

use crate::app_system::{setup_tracing, ShopConfig, ShopSystem};
use crate::domain::{
    BannerCreate, CartItem, CheckoutRequest, CustomerContact, DiscountCodeCreate, DiscountKind, PaymentNotification,
    PetGender, PetProfile, ProductCategory, ProductCreate, UserCreate,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ShopConfig::from_env()?;
    info!(shop = %config.shop_name, deposit_percent = %config.deposit_percent, "Starting pet shop back-end");

    // Create the entire shop system (starts all actors)
    let system = ShopSystem::from_config(&config)?;

    // Seed the catalog
    let span = tracing::info_span!("catalog_seeding");
    let (puppy_id, food_id) = async {
        let puppy = ProductCreate::new("Shiba Inu puppy", ProductCategory::Dog, dec!(18000), 1).with_pet(PetProfile {
            breed: "Shiba Inu".into(),
            gender: PetGender::Male,
            age_months: 3,
            vaccinations: NaiveDate::from_ymd_opt(2026, 9, 20).into_iter().collect(),
        });
        let puppy_id = system.product_client.create_product(puppy).await?;
        let food = ProductCreate::new("Salmon kibble 1.5kg", ProductCategory::Food, dec!(420), 50).with_sale_price(dec!(389));
        let food_id = system.product_client.create_product(food).await?;

        system
            .banner_client
            .create_banner(BannerCreate {
                title: "New litter of Shiba puppies".into(),
                image_url: "/static/banners/shiba.jpg".into(),
                link_url: Some("/products/dogs".into()),
                position: 0,
            })
            .await?;
        system
            .discount_client
            .create_code(DiscountCodeCreate::new("WELCOME10", DiscountKind::Percentage(dec!(10))).with_max_uses(100))
            .await?;
        info!("Catalog seeded");
        anyhow::Ok((puppy_id, food_id))
    }
    .instrument(span)
    .await?;

    for product in system.product_client.list_active_products().await? {
        info!(
            name = %product.name,
            price = %product.effective_price(),
            stock = product.stock,
            vaccinated = ?product.latest_vaccination(),
            "Listed product"
        );
    }

    let user_id = system
        .user_client
        .create_user(UserCreate::new("Alice", "alice@example.com"))
        .await?;
    info!(user_id = %user_id, "User created successfully");

    let contact = CustomerContact::new("Alice", "0812345678", "12 Soi Ari, Bangkok");

    // Supplies only: paid in full, any parcel service
    let supplies = CheckoutRequest {
        user_id: user_id.clone(),
        items: vec![CartItem::new(food_id.clone(), 3)],
        contact: contact.clone(),
        shipping_option_id: Some("parcel".into()),
        discount_code: Some("welcome10".into()),
        expected_total: None,
    };

    // A live animal: deposit up front, pet courier or pickup only
    let pet = CheckoutRequest {
        user_id: user_id.clone(),
        items: vec![CartItem::new(puppy_id, 1), CartItem::new(food_id, 1)],
        contact,
        shipping_option_id: Some("pet_courier".into()),
        discount_code: None,
        expected_total: None,
    };

    for (label, mut request) in [("supplies", supplies), ("pet", pet)] {
        let span = tracing::info_span!("order_processing", kind = label);
        async {
            let preview = system.order_client.preview_checkout(&request).await?;
            info!(
                total = %preview.analysis.total,
                payment_type = ?preview.analysis.payment_type,
                options = preview.shipping_options.len(),
                "Checkout previewed"
            );
            debug!(preview = %serde_json::to_string(&preview)?, "Preview payload");
            request.expected_total = Some(preview.analysis.total);

            let order = system.order_client.place_order(request).await?;
            info!(order_number = %order.order_number, due_now = %order.amount_due_now(), "Order placed");

            let slip = PaymentNotification {
                amount: order.amount_due_now(),
                paid_at: Utc::now(),
                slip_image_url: format!("/uploads/slips/{}.jpg", order.order_number),
                note: None,
            };
            system.order_client.submit_payment(order.id.clone(), slip).await?;
            let order = system.order_client.confirm_payment(order.id).await?;
            info!(status = order.status.label(), "Payment confirmed");
            anyhow::Ok(())
        }
        .instrument(span)
        .await
        .unwrap_or_else(|e| error!(error = %e, "Order processing failed"));
    }

    for order in system.order_client.list_orders().await? {
        info!(
            order_number = %order.order_number,
            status = order.status.label(),
            total = %order.total_amount,
            "Order on file"
        );
    }
    let banners = system.banner_client.list_active_banners().await?;
    info!(count = banners.len(), "Active banners");

    // Shutdown system gracefully
    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Application completed successfully");
    Ok(())
}
