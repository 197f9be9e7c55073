#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use common::{TOKEN, can_bind_localhost, client_with, logged_in};
use estate_admin::{
    AdminClient, AppError,
    config::{ApiPaths, AppConfig},
    inquiries::{InquiryStatus, StatusFilter},
    properties::{PropertyForm, image_part},
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn complete_form() -> PropertyForm {
    PropertyForm {
        title: "Loft".to_string(),
        price: "250000".to_string(),
        city: "Lisbon".to_string(),
        listing_type: "For Sale".to_string(),
        address: "Rua A 1".to_string(),
        image: Some(image_part("front.jpg", vec![255, 216, 255])),
        ..PropertyForm::default()
    }
}

#[tokio::test]
async fn list_and_get_properties() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "properties": [
                {"id": 1, "title": "Loft", "price": 250_000, "type": "For Sale"},
                {"id": 2, "title": "Barn", "price": "90000", "type": "For Rent"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/properties/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "property": {"id": 2, "title": "Barn", "city": "Porto"}
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, &logged_in());
    let properties = client.properties.list().await?;
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].price, Some(json!(250_000)));
    assert_eq!(properties[1].listing_type.as_deref(), Some("For Rent"));

    let property = client.properties.get("2").await?;
    assert_eq!(property.city.as_deref(), Some("Porto"));
    Ok(())
}

#[tokio::test]
async fn create_validates_before_sending() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let client = client_with(&server, &logged_in());

    let form = PropertyForm {
        image: None,
        ..complete_form()
    };
    let err = client.properties.create(&form).await.unwrap_err();
    assert!(matches!(err, AppError::Input(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn create_uploads_multipart_form() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/properties/createProperty"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"success": true, "message": "Property added"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, &logged_in());
    let ack = client.properties.create(&complete_form()).await?;
    assert!(ack.success);
    assert_eq!(ack.message.as_deref(), Some("Property added"));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"garage\"\r\n\r\n0"));
    assert!(body.contains("name=\"type\"\r\n\r\nFor Sale"));
    assert!(!body.contains("name=\"description\""));
    assert!(body.contains("Content-Type: image/jpeg"));
    Ok(())
}

#[tokio::test]
async fn update_delete_and_interest_use_legacy_paths() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/properties/updateProperty/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/properties/deleteProperty/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/properties/AddUpdateIntrestedUser/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppConfig::new(&server.uri())?.with_paths(ApiPaths::legacy());
    let client = AdminClient::new(&config, logged_in())?;

    let form = PropertyForm {
        price: "260000".to_string(),
        ..PropertyForm::default()
    };
    assert!(client.properties.update("5", &form).await?.success);
    assert_eq!(
        client.properties.delete("5").await?.message.as_deref(),
        Some("deleted")
    );
    assert!(client.properties.mark_interested("5").await?.success);

    let requests = server.received_requests().await.unwrap();
    let update = String::from_utf8_lossy(&requests[0].body);
    assert!(update.contains("name=\"price\"\r\n\r\n260000"));
    assert!(!update.contains("name=\"garage\""));

    assert!(matches!(
        client.properties.delete("a/b").await,
        Err(AppError::Input(_))
    ));
    Ok(())
}

#[tokio::test]
async fn search_and_reported_failure() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/properties/search"))
        .and(query_param("query", "loft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "p1", "title": "Loft"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/properties/search"))
        .and(query_param("query", "nothing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "No matches"})),
        )
        .mount(&server)
        .await;

    let client = client_with(&server, &logged_in());
    let found = client.properties.search("  loft ").await?;
    assert_eq!(found[0].title, "Loft");

    let err = client.properties.search("nothing").await.unwrap_err();
    assert_eq!(
        err,
        AppError::Backend {
            status: 200,
            message: "No matches".to_string()
        }
    );

    assert!(matches!(
        client.properties.search("   ").await,
        Err(AppError::Input(_))
    ));
    Ok(())
}

#[tokio::test]
async fn inquiries_are_listed_filtered_and_updated() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inquiries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"_id": "a1", "name": "Ana", "email": "ana@example.com", "message": "Hi", "status": "Pending"},
                {"_id": "a2", "name": "Rui", "email": "rui@example.com", "message": "Hello", "status": "Resolved"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/inquiries/a1"))
        .and(body_json(json!({"status": "Archived"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"_id": "a1", "name": "Ana", "email": "ana@example.com", "message": "Hi", "status": "Archived"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, &logged_in());
    let inquiries = client.inquiries.list().await?;
    assert_eq!(inquiries.len(), 2);

    let pending = StatusFilter::Only(InquiryStatus::Pending).apply(inquiries);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].name, "Ana");

    let updated = client
        .inquiries
        .update_status("a1", InquiryStatus::Archived)
        .await?;
    assert_eq!(updated.status(), Some(InquiryStatus::Archived));
    Ok(())
}
