//! Tests for the flashcard endpoints

mod common;

use actix_web::{http::header, test};
use serde_json::json;
use uuid::Uuid;

use common::*;
use gt_api::create_app;
use gt_core::domain::entities::flashcard::Flashcard;
use gt_core::repositories::FlashcardRepository;

async fn seed_card(ctx: &TestContext, user_id: Uuid, front: &str) -> Flashcard {
    ctx.flashcards
        .create(Flashcard::new(
            user_id,
            front.to_string(),
            format!("{front} answer"),
        ))
        .await
        .expect("seed flashcard")
}

#[actix_web::test]
async fn test_new_card_is_due_immediately() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "amara@example.com").await;

    let request = test::TestRequest::post()
        .uri("/api/v1/flashcards")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"front": "What is compound interest?", "back": "Interest on interest"}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 201);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["front"], "What is compound interest?");
    assert_eq!(body["intervalDays"], 1);
    assert_eq!(body["reviewCount"], 0);

    let due = test::TestRequest::get()
        .uri("/api/v1/flashcards/due")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let due = test::call_service(&app, due).await;
    assert_eq!(due.status(), 200);
    let list: serde_json::Value = test::read_body_json(due).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_create_card_rejects_blank_sides() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "amara@example.com").await;

    for body in [
        json!({"front": "   ", "back": "Interest on interest"}),
        json!({"front": "What is compound interest?", "back": ""}),
    ] {
        let request = test::TestRequest::post()
            .uri("/api/v1/flashcards")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "front and back must not be blank");
    }
}

#[actix_web::test]
async fn test_remembered_review_doubles_the_interval_and_defers_the_card() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (user, token) = signed_in_user(&ctx, "amara@example.com").await;

    let card = seed_card(&ctx, user.id, "What is compound interest?").await;

    let uri = format!("/api/v1/flashcards/{}/review", card.id);
    let request = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"remembered": true}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["intervalDays"], 2);
    assert_eq!(body["reviewCount"], 1);

    // Pushed two days out, so the due queue is empty again
    let due = test::TestRequest::get()
        .uri("/api/v1/flashcards/due")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let due = test::call_service(&app, due).await;
    let list: serde_json::Value = test::read_body_json(due).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_forgotten_review_resets_the_interval() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (user, token) = signed_in_user(&ctx, "amara@example.com").await;

    let mut card = seed_card(&ctx, user.id, "What is compound interest?").await;
    card.review(true);
    card.review(true);
    let card = ctx.flashcards.update(card).await.expect("reschedule card");
    assert_eq!(card.interval_days, 4);

    let uri = format!("/api/v1/flashcards/{}/review", card.id);
    let request = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"remembered": false}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["intervalDays"], 1);
    assert_eq!(body["reviewCount"], 3);
}

#[actix_web::test]
async fn test_due_queue_is_scoped_to_the_caller() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (me, token) = signed_in_user(&ctx, "amara@example.com").await;
    let other = verified_user(&ctx, "kofi@example.com").await;

    seed_card(&ctx, me.id, "Mine").await;
    seed_card(&ctx, other.id, "Theirs").await;

    let request = test::TestRequest::get()
        .uri("/api/v1/flashcards/due")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    let list = body.as_array().unwrap().clone();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["front"], "Mine");
}

#[actix_web::test]
async fn test_reviewing_someone_elses_card_reads_as_missing() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let owner = verified_user(&ctx, "amara@example.com").await;
    let (_, intruder) = signed_in_user(&ctx, "kofi@example.com").await;

    let card = seed_card(&ctx, owner.id, "What is compound interest?").await;

    let uri = format!("/api/v1/flashcards/{}/review", card.id);
    let request = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {intruder}")))
        .set_json(json!({"remembered": true}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Flashcard not found");
}

#[actix_web::test]
async fn test_reviewing_an_unknown_card_is_not_found() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "amara@example.com").await;

    let uri = format!("/api/v1/flashcards/{}/review", Uuid::new_v4());
    let request = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"remembered": true}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 404);
}
