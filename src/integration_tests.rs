#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use crate::app_system::BakerySystem;
    use crate::clients::{
        CheckoutLine, CheckoutRequest, OrderClient, OrderItemClient, ProductClient,
    };
    use crate::actors::OrderItemRequest;
    use crate::domain::{
        reconciles_with_total, LatLng, Order, Product, ProductCreate, ProductPatch,
    };
    use crate::fulfillment::FulfillmentDriver;
    use crate::mock_framework::{create_mock_client, expect_create, expect_get, expect_update};
    use crate::tracking::status::OrderStatus;

    fn sample_order(status: &str, driver: Option<LatLng>) -> Order {
        Order {
            id: "order_1".into(),
            customer_id: None,
            total_amount: 9.0,
            status: status.into(),
            created_at: std::time::SystemTime::now(),
            customer_name: "Alice".into(),
            customer_email: "alice@example.com".into(),
            customer_phone: "555-0100".into(),
            delivery_address: "1 Main St".into(),
            destination: DESTINATION,
            driver,
            estimated_delivery: None,
        }
    }

    const DESTINATION: LatLng = LatLng {
        lat: 40.7128,
        lng: -74.0060,
    };

    fn checkout_request(lines: Vec<CheckoutLine>) -> CheckoutRequest {
        CheckoutRequest {
            customer_id: None,
            customer_name: "Alice".into(),
            customer_email: "alice@example.com".into(),
            customer_phone: "555-0100".into(),
            delivery_address: "1 Main St".into(),
            destination: DESTINATION,
            lines,
        }
    }

    #[tokio::test]
    async fn test_checkout_flow_against_mocks() {
        // 1. Setup Mocks
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (item_tx, mut item_rx) = mpsc::channel(10);

        let product_client = ProductClient::new(product_inner);
        let item_client = OrderItemClient::new(item_tx, product_client.clone());
        let order_client = OrderClient::new(order_inner, product_client, item_client);

        // 2. Execute checkout in background
        let order_task = tokio::spawn(async move {
            order_client
                .place_order(checkout_request(vec![CheckoutLine {
                    product_id: "product_1".to_string(),
                    quantity: 2,
                }]))
                .await
        });

        // 3. Verify Interactions

        // Expect Product Get (price snapshot)
        let (product_id, responder) = expect_get(&mut product_rx)
            .await
            .expect("Expected Product Get");
        assert_eq!(product_id, "product_1");
        let product = Product {
            id: "product_1".into(),
            name: "Butter Croissant".into(),
            price: 4.5,
            image_url: None,
        };
        responder.send(Ok(Some(product))).unwrap();

        // Expect Order Create with the computed total
        let (params, responder) = expect_create(&mut order_rx)
            .await
            .expect("Expected Order Create");
        assert_eq!(params.total_amount, 9.0);
        assert_eq!(params.customer_name, "Alice");
        responder.send(Ok("order_1".to_string())).unwrap();

        // Expect the line item batch with the snapshotted unit price
        match item_rx.recv().await {
            Some(OrderItemRequest::Record {
                order_id,
                drafts,
                respond_to,
            }) => {
                assert_eq!(order_id, "order_1");
                assert_eq!(drafts.len(), 1);
                assert_eq!(drafts[0].quantity, 2);
                assert_eq!(drafts[0].unit_price, 4.5);
                respond_to.send(Ok(vec!["item_1".to_string()])).unwrap();
            }
            other => panic!("Expected Record request, got {:?}", other),
        }

        // 4. Verify Result
        let result = order_task.await.unwrap();
        assert_eq!(result, Ok("order_1".to_string()));
    }

    #[tokio::test]
    async fn test_checkout_totals_reconcile_and_prices_are_decoupled() {
        let system = BakerySystem::new();

        let croissant = system
            .product_client
            .create_product(ProductCreate {
                name: "Butter Croissant".into(),
                price: 4.5,
                image_url: None,
            })
            .await
            .unwrap();
        let sourdough = system
            .product_client
            .create_product(ProductCreate {
                name: "Sourdough Loaf".into(),
                price: 8.0,
                image_url: None,
            })
            .await
            .unwrap();

        let order_id = system
            .order_client
            .place_order(checkout_request(vec![
                CheckoutLine {
                    product_id: croissant.clone(),
                    quantity: 2,
                },
                CheckoutLine {
                    product_id: sourdough,
                    quantity: 1,
                },
            ]))
            .await
            .unwrap();

        let order = system
            .order_client
            .get_order(order_id.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.total_amount, 17.0);
        assert_eq!(order.status, "pending");

        let items = system
            .item_client
            .raw_items_for_order(order_id.clone())
            .await
            .unwrap();
        assert!(reconciles_with_total(&items, order.total_amount));

        // A later catalog price change must not touch the recorded items.
        system
            .product_client
            .update_product(
                croissant,
                ProductPatch {
                    price: Some(99.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let views = system.item_client.list_for_order(order_id).await.unwrap();
        let croissant_line = views
            .iter()
            .find(|view| view.name == "Butter Croissant")
            .unwrap();
        assert_eq!(croissant_line.unit_price, 4.5);
        assert!(reconciles_with_total(&items, order.total_amount));
    }

    #[tokio::test]
    async fn test_checkout_rejects_unknown_product_and_empty_cart() {
        let system = BakerySystem::new();

        let err = system
            .order_client
            .place_order(checkout_request(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::OrderError::ValidationError(_)));

        let err = system
            .order_client
            .place_order(checkout_request(vec![CheckoutLine {
                product_id: "product_404".into(),
                quantity: 1,
            }]))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::OrderError::InvalidProduct(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fulfillment_advances_pipeline_in_order() {
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (product_inner, _product_rx) = create_mock_client::<Product>(10);
        let (item_tx, _item_rx) = mpsc::channel(10);

        let product_client = ProductClient::new(product_inner);
        let item_client = OrderItemClient::new(item_tx, product_client.clone());
        let order_client = OrderClient::new(order_inner, product_client, item_client);

        let driver = FulfillmentDriver::new(order_client, Duration::from_millis(100));
        let waypoint = LatLng::new(40.700, -74.015);
        let task = tokio::spawn(async move {
            driver.run_to_delivery("order_1".into(), vec![waypoint]).await
        });

        // Step 1: preparing, no driver yet
        let (id, patch, responder) = expect_update(&mut order_rx)
            .await
            .expect("Expected Update request");
        assert_eq!(id, "order_1");
        assert_eq!(patch.status.as_deref(), Some("preparing"));
        assert_eq!(patch.driver, None);
        responder.send(Ok(sample_order("preparing", None))).unwrap();

        // Step 2: in_transit, first waypoint and an ETA
        let (_, patch, responder) = expect_update(&mut order_rx)
            .await
            .expect("Expected Update request");
        assert_eq!(patch.status.as_deref(), Some("in_transit"));
        assert_eq!(patch.driver, Some(waypoint));
        assert!(patch.estimated_delivery.is_some());
        responder
            .send(Ok(sample_order("in_transit", Some(waypoint))))
            .unwrap();

        // Step 3: delivered at the destination
        let (_, patch, responder) = expect_update(&mut order_rx)
            .await
            .expect("Expected Update request");
        assert_eq!(patch.status.as_deref(), Some("delivered"));
        assert_eq!(patch.driver, Some(DESTINATION));
        responder
            .send(Ok(sample_order("delivered", Some(DESTINATION))))
            .unwrap();

        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_checkout_track_deliver() {
        let system = BakerySystem::new();

        let product_id = system
            .product_client
            .create_product(ProductCreate {
                name: "Butter Croissant".into(),
                price: 4.5,
                image_url: None,
            })
            .await
            .unwrap();
        let order_id = system
            .order_client
            .place_order(checkout_request(vec![CheckoutLine {
                product_id,
                quantity: 2,
            }]))
            .await
            .unwrap();

        let tracker = system.tracker();
        let handle = tracker.track(order_id.clone()).await.unwrap();
        assert_eq!(handle.snapshot().step_index(), 0);

        let driver = FulfillmentDriver::new(
            system.order_client.clone(),
            Duration::from_millis(500),
        );
        let route = vec![LatLng::new(40.700, -74.015), LatLng::new(40.708, -74.009)];
        let fulfillment =
            tokio::spawn(async move { driver.run_to_delivery(order_id, route).await });

        // Follow the snapshots until the pipeline reaches its terminal step.
        let mut updates = handle.watch();
        let mut seen_steps = vec![handle.snapshot().step_index()];
        while !OrderStatus::parse_lenient(&handle.snapshot().order.status).is_terminal() {
            updates.changed().await.unwrap();
            let step = updates.borrow_and_update().step_index();
            if Some(&step) != seen_steps.last() {
                seen_steps.push(step);
            }
        }

        fulfillment.await.unwrap().unwrap();

        // Steps only ever advanced, ending delivered at the destination.
        assert!(seen_steps.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(*seen_steps.last().unwrap(), 3);
        let final_snapshot = handle.snapshot();
        assert_eq!(final_snapshot.driver, DESTINATION);
        assert!(!final_snapshot.simulation_active());

        handle.stop().await;
        drop(tracker);
        system.shutdown().await.unwrap();
    }
}
