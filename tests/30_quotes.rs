mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{read, spawn_app};
use supplier_hub::database::QuotationStore;

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn saved_quotation_has_no_status_and_no_existence_checks() -> Result<()> {
    let app = spawn_app().await?;
    let (_, customer) = app.register("Cleo", "customer").await?;
    let ghost_supplier = Uuid::new_v4();

    let resp = app
        .post(
            "/api/quotes/save-quotations",
            Some(&customer),
            &json!({
                "supplierId": ghost_supplier,
                "products": [{ "productId": Uuid::new_v4(), "quantity": 3 }],
                "date": "2024-03-01T10:00:00Z",
            }),
        )
        .await?;
    let (status, body) = read(resp).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Quotation request saved successfully!");
    assert_eq!(body["data"]["supplierId"], ghost_supplier.to_string());
    assert!(body["data"]["status"].is_null());

    let resp = app
        .post("/api/quotes/save-quotations", None, &json!({ "supplierId": ghost_supplier }))
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn history_is_public_and_enriched_with_placeholders() -> Result<()> {
    let app = spawn_app().await?;
    let (acme_id, acme) = app.register("Acme", "supplier").await?;
    let (_, customer) = app.register("Cleo", "customer").await?;
    let bolt = app.create_product(&acme, "Bolt", 0.25, 100, 10).await?;
    let missing_product = Uuid::new_v4();

    app.save_quote(
        &customer,
        acme_id,
        json!([
            { "productId": bolt["id"], "quantity": 5 },
            { "productId": missing_product }
        ]),
    )
    .await?;
    app.save_quote(&customer, Uuid::new_v4(), json!([])).await?;

    let (status, body) = read(app.get("/api/quotes/history", None).await?).await?;
    assert_eq!(status, StatusCode::OK);
    let quotes = body.as_array().unwrap();
    assert_eq!(quotes.len(), 2);

    let known = quotes.iter().find(|q| q["supplierId"] == acme_id.to_string()).unwrap();
    assert_eq!(known["supplierName"], "Acme");
    assert_eq!(known["products"][0]["productName"], "Bolt");
    assert_eq!(known["products"][0]["quantity"], 5);
    assert_eq!(known["products"][1]["productName"], "Unknown Product");
    assert_eq!(known["products"][1]["quantity"], 0);

    let orphan = quotes.iter().find(|q| q["supplierId"] != acme_id.to_string()).unwrap();
    assert_eq!(orphan["supplierName"], "Unknown Supplier");
    Ok(())
}

#[tokio::test]
async fn suppliers_see_only_quotations_addressed_to_them() -> Result<()> {
    let app = spawn_app().await?;
    let (acme_id, acme) = app.register("Acme", "supplier").await?;
    let (globex_id, globex) = app.register("Globex", "supplier").await?;
    let (_, customer) = app.register("Cleo", "customer").await?;

    let for_acme = app.save_quote(&customer, acme_id, json!([])).await?;
    let for_globex = app.save_quote(&customer, globex_id, json!([])).await?;

    let (_, body) = read(app.get("/api/quotes/supplier/quotations", Some(&acme)).await?).await?;
    assert_eq!(ids(&body), [for_acme["id"].as_str().unwrap()]);

    let (_, body) = read(app.get("/api/quotes/supplier/quotations", Some(&globex)).await?).await?;
    assert_eq!(ids(&body), [for_globex["id"].as_str().unwrap()]);
    Ok(())
}

#[tokio::test]
async fn status_update_is_owner_only_and_does_not_move() -> Result<()> {
    let app = spawn_app().await?;
    let (acme_id, acme) = app.register("Acme", "supplier").await?;
    let (_, globex) = app.register("Globex", "supplier").await?;
    let (_, customer) = app.register("Cleo", "customer").await?;
    let quote = app.save_quote(&customer, acme_id, json!([])).await?;
    let quote_id = quote["id"].as_str().unwrap();

    let body = json!({ "quotationId": quote_id, "status": "Accepted" });
    let (status, resp) = read(app.put("/api/quotes/supplier/quotations/status", Some(&globex), &body).await?).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(resp["message"], "You are not authorized to update this quotation");

    let (_, history) = read(app.get("/api/quotes/history", None).await?).await?;
    assert!(history[0]["status"].is_null());

    let (status, resp) = read(app.put("/api/quotes/supplier/quotations/status", Some(&acme), &body).await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Quotation status updated successfully");
    assert_eq!(resp["data"]["status"], "Accepted");

    // Still pending; nothing accepted
    let (_, history) = read(app.get("/api/quotes/history", None).await?).await?;
    assert_eq!(ids(&history), [quote_id]);
    assert_eq!(history[0]["status"], "Accepted");
    assert!(app.store.list_accepted_quotations(None).await?.is_empty());

    let missing = json!({ "quotationId": Uuid::new_v4(), "status": "Rejected" });
    let (status, resp) = read(app.put("/api/quotes/supplier/quotations/status", Some(&acme), &missing).await?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["message"], "Quotation not found");
    Ok(())
}

#[tokio::test]
async fn move_copies_into_accepted_and_removes_pending() -> Result<()> {
    let app = spawn_app().await?;
    let (acme_id, acme) = app.register("Acme", "supplier").await?;
    let (_, customer) = app.register("Cleo", "customer").await?;
    let bolt = app.create_product(&acme, "Bolt", 0.25, 100, 10).await?;

    let quote = app
        .save_quote(&customer, acme_id, json!([{ "productId": bolt["id"], "quantity": 12 }]))
        .await?;
    let path = format!("/api/quotes/move-to-accepted/{}", quote["id"].as_str().unwrap());

    // No ownership check: the customer who asked may move it
    let (status, body) = read(app.post(&path, Some(&customer), &json!({})).await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Quotation moved to accepted");

    let (_, history) = read(app.get("/api/quotes/history", None).await?).await?;
    assert!(history.as_array().unwrap().is_empty());

    let (status, accepted) = read(app.get("/api/quotes/supplier/accepted-quotations", Some(&acme)).await?).await?;
    assert_eq!(status, StatusCode::OK);
    let accepted = accepted.as_array().unwrap();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0]["status"], "Accepted");
    assert_eq!(accepted[0]["supplierId"], quote["supplierId"]);
    assert_eq!(accepted[0]["date"], quote["date"]);
    assert_eq!(accepted[0]["supplierName"], "Acme");
    assert_eq!(accepted[0]["products"][0]["productName"], "Bolt");
    assert_eq!(accepted[0]["products"][0]["quantity"], 12);

    let (status, body) = read(app.post(&path, Some(&customer), &json!({})).await?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Quotation not found");
    Ok(())
}

#[tokio::test]
async fn accepted_listings_filter_by_supplier_and_admin_sees_all() -> Result<()> {
    let app = spawn_app().await?;
    let (acme_id, acme) = app.register("Acme", "supplier").await?;
    let (globex_id, globex) = app.register("Globex", "supplier").await?;
    let (_, admin) = app.register("Admin", "admin").await?;

    for supplier in [acme_id, globex_id] {
        let quote = app.save_quote(&admin, supplier, json!([])).await?;
        let path = format!("/api/quotes/move-to-accepted/{}", quote["id"].as_str().unwrap());
        assert_eq!(app.post(&path, Some(&admin), &json!({})).await?.status(), StatusCode::OK);
    }

    let (_, body) = read(app.get("/api/quotes/supplier/accepted-quotations", Some(&acme)).await?).await?;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["supplierName"], "Acme");

    let (status, body) = read(app.get("/api/quotes/accepted-quotations", Some(&admin)).await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let resp = app.get("/api/quotes/accepted-quotations", Some(&globex)).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn save_requires_a_supplier_id() -> Result<()> {
    let app = spawn_app().await?;
    let (_, customer) = app.register("Cleo", "customer").await?;

    let resp = app
        .post(
            "/api/quotes/save-quotations",
            Some(&customer),
            &json!({ "products": [{ "productId": Uuid::new_v4(), "quantity": 1 }] }),
        )
        .await?;
    let (status, body) = read(resp).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "supplierId is required");
    assert!(app.store.list_quote_requests(None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn status_update_needs_an_id_and_a_status() -> Result<()> {
    let app = spawn_app().await?;
    let (acme_id, acme) = app.register("Acme", "supplier").await?;
    let (_, customer) = app.register("Cleo", "customer").await?;
    let quote = app.save_quote(&customer, acme_id, json!([])).await?;
    let path = "/api/quotes/supplier/quotations/status";

    let (status, body) = read(app.put(path, Some(&acme), &json!({ "status": "Rejected" })).await?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Quotation not found");

    let (status, body) = read(app.put(path, Some(&acme), &json!({ "quotationId": quote["id"] })).await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Status is required");

    let (_, history) = read(app.get("/api/quotes/history", None).await?).await?;
    assert!(history[0]["status"].is_null());
    Ok(())
}

#[tokio::test]
async fn malformed_quote_lines_are_rejected_with_a_message() -> Result<()> {
    let app = spawn_app().await?;
    let (_, customer) = app.register("Cleo", "customer").await?;

    let resp = app
        .post(
            "/api/quotes/save-quotations",
            Some(&customer),
            &json!({
                "supplierId": Uuid::new_v4(),
                "products": [{ "productId": Uuid::new_v4(), "quantity": null }],
            }),
        )
        .await?;
    let (status, body) = read(resp).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    assert!(app.store.list_quote_requests(None).await?.is_empty());
    Ok(())
}
