mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{read, spawn_app};

#[tokio::test]
async fn placing_an_order_snapshots_supplier_and_leaves_inventory() -> Result<()> {
    let app = spawn_app().await?;
    let (acme_id, acme) = app.register("Acme", "supplier").await?;
    let (cleo_id, cleo) = app.register("Cleo", "customer").await?;
    let bolt = app.create_product(&acme, "Bolt", 0.25, 100, 10).await?;

    let (status, order) = read(
        app.post("/api/orders", Some(&cleo), &json!({ "productId": bolt["id"], "quantity": 40 }))
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["product"], bolt["id"]);
    assert_eq!(order["supplier"], acme_id.to_string());
    assert_eq!(order["orderedBy"], cleo_id.to_string());
    assert_eq!(order["quantity"], 40);
    assert_eq!(order["status"], "Pending");

    let (_, products) = read(app.get("/api/products", Some(&acme)).await?).await?;
    assert_eq!(products[0]["inventory"], 100);
    Ok(())
}

#[tokio::test]
async fn ordering_a_missing_product_is_not_found() -> Result<()> {
    let app = spawn_app().await?;
    let (_, cleo) = app.register("Cleo", "customer").await?;

    for product_id in [json!(Uuid::new_v4()), json!("not-an-id")] {
        let (status, body) = read(
            app.post("/api/orders", Some(&cleo), &json!({ "productId": product_id, "quantity": 1 }))
                .await?,
        )
        .await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found");
    }
    Ok(())
}

#[tokio::test]
async fn orders_are_listed_per_caller_with_product_names() -> Result<()> {
    let app = spawn_app().await?;
    let (_, acme) = app.register("Acme", "supplier").await?;
    let (_, cleo) = app.register("Cleo", "customer").await?;
    let (_, dan) = app.register("Dan", "customer").await?;
    let bolt = app.create_product(&acme, "Bolt", 0.25, 100, 10).await?;
    let gear = app.create_product(&acme, "Gear", 4.0, 5, 2).await?;

    for (token, product) in [(&cleo, &bolt), (&cleo, &gear), (&dan, &bolt)] {
        let resp = app
            .post("/api/orders", Some(token), &json!({ "productId": product["id"], "quantity": 1 }))
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let (status, body) = read(app.get("/api/orders", Some(&cleo)).await?).await?;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["productName"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, ["Bolt", "Gear"]);

    // Orders survive their product; the name degrades to a placeholder
    let path = format!("/api/products/{}", gear["id"].as_str().unwrap());
    assert_eq!(app.delete(&path, Some(&acme)).await?.status(), StatusCode::OK);

    let (_, body) = read(app.get("/api/orders", Some(&cleo)).await?).await?;
    let gear_order = body
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["product"] == gear["id"])
        .unwrap();
    assert_eq!(gear_order["productName"], "Unknown Product");

    let (_, body) = read(app.get("/api/orders", Some(&dan)).await?).await?;
    assert_eq!(body.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn order_without_product_is_not_found_and_without_quantity_is_rejected() -> Result<()> {
    let app = spawn_app().await?;
    let (_, acme) = app.register("Acme", "supplier").await?;
    let (_, cleo) = app.register("Cleo", "customer").await?;
    let bolt = app.create_product(&acme, "Bolt", 0.25, 100, 10).await?;

    let (status, body) = read(app.post("/api/orders", Some(&cleo), &json!({ "quantity": 1 })).await?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (status, body) = read(
        app.post("/api/orders", Some(&cleo), &json!({ "productId": bolt["id"] }))
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Quantity is required");

    let (_, body) = read(app.get("/api/orders", Some(&cleo)).await?).await?;
    assert!(body.as_array().unwrap().is_empty());
    Ok(())
}
