mod actor_framework;
mod actors;
mod app_system;
mod clients;
mod domain;
mod error;
mod fulfillment;
mod order_actor;
mod product_actor;
mod tracking;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use std::time::Duration;

use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, BakerySystem};
use crate::clients::{CheckoutLine, CheckoutRequest};
use crate::domain::{LatLng, ProductCreate};
use crate::fulfillment::FulfillmentDriver;
use crate::tracking::status::OrderStatus;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting bakery storefront with live order tracking");

    let system = BakerySystem::new();

    // Stock the catalog
    let croissant = system
        .product_client
        .create_product(ProductCreate {
            name: "Butter Croissant".into(),
            price: 4.5,
            image_url: Some("/images/croissant.jpg".into()),
        })
        .await
        .map_err(|e| e.to_string())?;
    let sourdough = system
        .product_client
        .create_product(ProductCreate {
            name: "Sourdough Loaf".into(),
            price: 8.0,
            image_url: Some("/images/sourdough.jpg".into()),
        })
        .await
        .map_err(|e| e.to_string())?;

    // Sign up a customer (checkout also works for guests)
    let session = async {
        info!("Creating customer account");
        system
            .auth_client
            .sign_up(
                "Alice".into(),
                "alice@example.com".into(),
                "correct horse".into(),
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(tracing::info_span!("customer_sign_up"))
    .await?;
    info!(account_id = %session.account_id, "Customer signed in");

    // Checkout: cash on delivery to a downtown address
    let destination = LatLng::new(40.7128, -74.0060);
    let order_id = async {
        info!("Placing order");
        system
            .order_client
            .place_order(CheckoutRequest {
                customer_id: Some(session.account_id.clone()),
                customer_name: "Alice".into(),
                customer_email: session.email.clone(),
                customer_phone: "555-0100".into(),
                delivery_address: "1 Main St, New York".into(),
                destination,
                lines: vec![
                    CheckoutLine {
                        product_id: croissant,
                        quantity: 2,
                    },
                    CheckoutLine {
                        product_id: sourdough,
                        quantity: 1,
                    },
                ],
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(tracing::info_span!("checkout"))
    .await?;
    info!(order_id = %order_id, "Order placed");

    // Open the live tracking view
    let tracker = system.tracker();
    let handle = tracker
        .track(order_id.clone())
        .await
        .map_err(|e| e.to_string())?;

    // Kick off fulfillment in the background
    let driver = FulfillmentDriver::new(system.order_client.clone(), Duration::from_millis(600));
    let route = vec![
        LatLng::new(40.700, -74.015),
        LatLng::new(40.705, -74.010),
        LatLng::new(40.710, -74.008),
    ];
    let fulfillment = tokio::spawn(async move { driver.run_to_delivery(order_id, route).await });

    // Watch the order all the way to the door
    let mut updates = handle.watch();
    loop {
        let snapshot = handle.snapshot();
        let card = snapshot.presentation();
        info!(
            step = snapshot.step_index() + 1,
            status = %snapshot.order.status,
            headline = card.headline,
            driver_lat = snapshot.driver.lat,
            driver_lng = snapshot.driver.lng,
            live = snapshot.live,
            "Tracking update"
        );
        if OrderStatus::parse_lenient(&snapshot.order.status).is_terminal() {
            break;
        }
        if updates.changed().await.is_err() {
            break;
        }
    }

    fulfillment
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())?;
    handle.stop().await;

    // Shutdown system gracefully
    drop(tracker);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
