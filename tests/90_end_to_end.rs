mod common;

use anyhow::Result;
use reqwest::StatusCode;

use common::{spawn_app, PASSWORD};
use supplier_hub::client::{
    ApiClient, ClientError, MemorySessionStore, ProductInput, RegisterInput, SessionStore, UserUpdate, TOKEN_KEY,
};
use supplier_hub::database::models::{QuoteLine, Role};

fn client_for(base_url: &str) -> Result<ApiClient<MemorySessionStore>> {
    Ok(ApiClient::new(base_url, MemorySessionStore::new())?)
}

async fn signed_in(base_url: &str, name: &str, role: Role) -> Result<ApiClient<MemorySessionStore>> {
    let client = client_for(base_url)?;
    let email = format!("{}@example.com", name.to_lowercase());
    client
        .register(&RegisterInput {
            name: name.to_string(),
            email: email.clone(),
            password: PASSWORD.to_string(),
            role: Some(role),
        })
        .await?;
    client.login(&email, PASSWORD).await?;
    Ok(client)
}

#[tokio::test]
async fn quotation_workflow_through_the_client() -> Result<()> {
    let app = spawn_app().await?;
    let supplier = signed_in(&app.base_url, "Acme", Role::Supplier).await?;
    let customer = signed_in(&app.base_url, "Cleo", Role::Customer).await?;
    let admin = signed_in(&app.base_url, "Admin", Role::Admin).await?;

    let bolt = supplier
        .add_product(&ProductInput {
            name: Some("Bolt".into()),
            price: Some(0.25),
            inventory: Some(4),
            minimum_stock_level: Some(10),
        })
        .await?;
    assert_eq!(customer.suggest_products().await?.len(), 1);
    assert_eq!(customer.product_count().await?, 1);

    let supplier_id = customer
        .list_users()
        .await?
        .into_iter()
        .find(|u| u.role == Role::Supplier)
        .map(|u| u.id)
        .expect("supplier listed");

    let saved = customer
        .save_quote_request(supplier_id, &[QuoteLine { product_id: bolt.id, quantity: 50 }], None)
        .await?;
    assert_eq!(saved.message, "Quotation request saved successfully!");

    let pending = supplier.fetch_supplier_quotations().await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].products[0].product_name, "Bolt");

    let updated = supplier.update_quotation_status(saved.data.id, "Reviewed").await?;
    assert_eq!(updated.data.status.as_deref(), Some("Reviewed"));

    supplier.move_to_accepted(saved.data.id).await?;
    assert!(client_for(&app.base_url)?.fetch_quotation_history().await?.is_empty());

    let accepted = supplier.fetch_accepted_quotations_for_supplier().await?;
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].status.as_deref(), Some("Accepted"));
    assert_eq!(admin.fetch_all_accepted_quotations().await?.len(), 1);

    let order = customer.place_order(bolt.id, 2).await?;
    assert_eq!(order.supplier, supplier_id);
    let orders = customer.fetch_orders().await?;
    assert_eq!(orders[0].product_name, "Bolt");
    Ok(())
}

#[tokio::test]
async fn low_stock_widget_is_suggested_and_scoped_to_its_supplier() -> Result<()> {
    let app = spawn_app().await?;
    let admin = signed_in(&app.base_url, "Admin", Role::Admin).await?;
    let supplier = signed_in(&app.base_url, "Acme", Role::Supplier).await?;
    let supplier_two = signed_in(&app.base_url, "Globex", Role::Supplier).await?;

    supplier
        .add_product(&ProductInput {
            name: Some("Widget".into()),
            price: Some(10.0),
            inventory: Some(5),
            minimum_stock_level: Some(10),
        })
        .await?;

    let suggested = supplier.suggest_products().await?;
    assert!(suggested.iter().any(|p| p.name == "Widget"));

    let all = admin.fetch_products().await?;
    assert!(all.iter().any(|p| p.name == "Widget"));

    let theirs = supplier_two.fetch_products().await?;
    assert!(theirs.iter().all(|p| p.name != "Widget"));
    Ok(())
}

#[tokio::test]
async fn server_messages_surface_as_client_errors() -> Result<()> {
    let app = spawn_app().await?;
    let owner = signed_in(&app.base_url, "Acme", Role::Supplier).await?;
    let rival = signed_in(&app.base_url, "Globex", Role::Supplier).await?;

    let bolt = owner
        .add_product(&ProductInput {
            name: Some("Bolt".into()),
            price: Some(1.0),
            inventory: Some(5),
            minimum_stock_level: Some(1),
        })
        .await?;

    let err = rival
        .update_product(bolt.id, &ProductInput { name: Some("Mine".into()), ..Default::default() })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.to_string(), "You can only edit your own products");

    let err = rival.fetch_users().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

    let err = client_for(&app.base_url)?.login("acme@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    Ok(())
}

#[tokio::test]
async fn admin_manages_users_and_logout_drops_the_token() -> Result<()> {
    let app = spawn_app().await?;
    let admin = signed_in(&app.base_url, "Admin", Role::Admin).await?;
    let supplier = signed_in(&app.base_url, "Acme", Role::Supplier).await?;

    let users = admin.fetch_users().await?;
    let acme = users.iter().find(|u| u.name == "Acme").expect("acme listed");

    let renamed = admin
        .update_user(acme.id, &UserUpdate { name: Some("Acme Corp".into()), ..Default::default() })
        .await?;
    assert_eq!(renamed.name, "Acme Corp");
    assert_eq!(renamed.role, Role::Supplier);

    admin.delete_user(acme.id).await?;
    let err = admin.delete_user(acme.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "User not found");

    // The deleted supplier's token no longer resolves
    let err = supplier.fetch_products().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    admin.logout()?;
    assert!(admin.session().get(TOKEN_KEY).is_none());
    assert!(matches!(admin.fetch_users().await, Err(ClientError::MissingToken)));
    Ok(())
}
