use axum::http::StatusCode;
use uuid::Uuid;

use crate::tests::helper;
use crate::tests::helper::ADMIN;

#[tokio::test]
async fn test_destination_update_single_field() {
    let mut app = helper::setup_test_app().await;

    let destination = helper::create_destination(&mut app, "Paris", "France", "City of lights").await;

    let (status_code, updated_destination, _) = helper::maybe_update_destination(
        &mut app,
        ADMIN,
        &destination.id,
        &[("Description", "City of love")],
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    let updated_destination = updated_destination.unwrap();
    assert_eq!("City of love", updated_destination.description);

    // everything else is untouched
    assert_eq!(destination.id, updated_destination.id);
    assert_eq!(destination.destination_name, updated_destination.destination_name);
    assert_eq!(destination.country, updated_destination.country);
    assert_eq!(destination.link, updated_destination.link);

    // and it is stored
    let (status_code, fetched_destination, _) =
        helper::single_destination(&mut app, &destination.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(updated_destination), fetched_destination);
}

#[tokio::test]
async fn test_destination_update_multiple_fields() {
    let mut app = helper::setup_test_app().await;

    let destination = helper::create_destination(&mut app, "Paris", "France", "City of lights").await;

    let (status_code, updated_destination, _) = helper::maybe_update_destination(
        &mut app,
        ADMIN,
        &destination.id,
        &[
            ("Destination", "Lyon"),
            ("Link", "https://www.example.org/lyon"),
        ],
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    let updated_destination = updated_destination.unwrap();
    assert_eq!("Lyon", updated_destination.destination_name);
    assert_eq!("https://www.example.org/lyon", updated_destination.link);
    assert_eq!(destination.country, updated_destination.country);
    assert_eq!(destination.description, updated_destination.description);

    // nothing to update is fine too
    let (status_code, unchanged_destination, _) =
        helper::maybe_update_destination(&mut app, ADMIN, &destination.id, &[]).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(updated_destination), unchanged_destination);
}

#[tokio::test]
async fn test_destination_update_invalid_values() {
    let mut app = helper::setup_test_app().await;

    let destination = helper::create_destination(&mut app, "Paris", "France", "City of lights").await;

    let (status_code, _, error) = helper::maybe_update_destination(
        &mut app,
        ADMIN,
        &destination.id,
        &[("Country", "")],
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Country can not be empty".to_string()), error);

    let (status_code, _, error) = helper::maybe_update_destination(
        &mut app,
        ADMIN,
        &destination.id,
        &[("Link", "nope")],
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Invalid link".to_string()), error);

    // nothing changed
    let (_, fetched_destination, _) = helper::single_destination(&mut app, &destination.id).await;
    assert_eq!(Some(destination), fetched_destination);
}

#[tokio::test]
async fn test_destination_update_unknown() {
    let mut app = helper::setup_test_app().await;

    let (status_code, _, error) = helper::maybe_update_destination(
        &mut app,
        ADMIN,
        &Uuid::new_v4().to_string(),
        &[("Description", "City of love")],
    )
    .await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Destination not found".to_string()), error);

    let (status_code, _, error) = helper::maybe_update_destination(
        &mut app,
        ADMIN,
        "not-an-id",
        &[("Description", "City of love")],
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Invalid destination ID".to_string()), error);
}
