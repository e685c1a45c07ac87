//! Tests for the program catalogue endpoints

mod common;

use actix_web::{http::header, test};
use serde_json::json;
use uuid::Uuid;

use common::*;
use gt_api::create_app;
use gt_core::domain::entities::program::Program;
use gt_core::repositories::ProgramRepository;

async fn seed_program(ctx: &TestContext, title: &str) -> Program {
    ctx.programs
        .create(Program::new(
            title.to_string(),
            format!("{title} description"),
            "entrepreneurship".to_string(),
        ))
        .await
        .expect("seed program")
}

#[actix_web::test]
async fn test_catalogue_listing_is_public_and_paginated() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    seed_program(&ctx, "Agri-tech Foundations").await;
    seed_program(&ctx, "Digital Marketing").await;
    seed_program(&ctx, "Solar Basics").await;

    let request = test::TestRequest::get()
        .uri("/api/v1/programs?limit=2&offset=0")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["offset"], 0);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // Newest first
    assert_eq!(data[0]["title"], "Solar Basics");
}

#[actix_web::test]
async fn test_catalogue_clamps_out_of_range_pagination() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    seed_program(&ctx, "Solar Basics").await;

    let request = test::TestRequest::get()
        .uri("/api/v1/programs?limit=9999&offset=-5")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["limit"], 100);
    assert_eq!(body["offset"], 0);
}

#[actix_web::test]
async fn test_get_program_returns_the_full_record() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let program = seed_program(&ctx, "Solar Basics").await;

    let uri = format!("/api/v1/programs/{}", program.id);
    let response = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["id"], program.id.to_string());
    assert_eq!(body["title"], "Solar Basics");
    assert_eq!(body["category"], "entrepreneurship");
    assert_eq!(body["status"], "DRAFT");
    assert!(body["createdAt"].is_string());
}

#[actix_web::test]
async fn test_get_unknown_program_is_not_found() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let uri = format!("/api/v1/programs/{}", Uuid::new_v4());
    let response = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Program not found");
}

#[actix_web::test]
async fn test_malformed_program_id_is_a_bad_request() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let request = test::TestRequest::get()
        .uri("/api/v1/programs/not-a-uuid")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_create_program_starts_as_a_draft() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "mentor@example.com").await;

    let request = test::TestRequest::post()
        .uri("/api/v1/programs")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"title": "  Solar Basics  "}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 201);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["title"], "Solar Basics");
    assert_eq!(body["status"], "DRAFT");
    assert_eq!(body["description"], "");
    assert_eq!(body["category"], "");
}

#[actix_web::test]
async fn test_create_program_rejects_blank_and_oversized_titles() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "mentor@example.com").await;

    let blank = test::TestRequest::post()
        .uri("/api/v1/programs")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"title": "   "}))
        .to_request();
    let blank = test::call_service(&app, blank).await;
    assert_eq!(blank.status(), 400);
    let body: serde_json::Value = test::read_body_json(blank).await;
    assert_eq!(body["message"], "title must not be blank");

    let oversized = test::TestRequest::post()
        .uri("/api/v1/programs")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"title": "x".repeat(201)}))
        .to_request();
    let oversized = test::call_service(&app, oversized).await;
    assert_eq!(oversized.status(), 400);
    let body: serde_json::Value = test::read_body_json(oversized).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_update_program_applies_partial_fields() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "mentor@example.com").await;

    let program = seed_program(&ctx, "Solar Basics").await;

    let uri = format!("/api/v1/programs/{}", program.id);
    let request = test::TestRequest::put()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"description": "Panels, batteries, inverters"}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["title"], "Solar Basics");
    assert_eq!(body["description"], "Panels, batteries, inverters");
    assert_eq!(body["status"], "DRAFT");
}

#[actix_web::test]
async fn test_update_program_walks_the_status_lifecycle() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "mentor@example.com").await;

    let program = seed_program(&ctx, "Solar Basics").await;
    let uri = format!("/api/v1/programs/{}", program.id);

    let publish = test::TestRequest::put()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"status": "PUBLISHED"}))
        .to_request();
    let publish = test::call_service(&app, publish).await;
    assert_eq!(publish.status(), 200);
    let body: serde_json::Value = test::read_body_json(publish).await;
    assert_eq!(body["status"], "PUBLISHED");

    let archive = test::TestRequest::put()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"status": "ARCHIVED"}))
        .to_request();
    let archive = test::call_service(&app, archive).await;
    assert_eq!(archive.status(), 200);
    let body: serde_json::Value = test::read_body_json(archive).await;
    assert_eq!(body["status"], "ARCHIVED");
}

#[actix_web::test]
async fn test_update_program_rejects_unknown_status() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "mentor@example.com").await;

    let program = seed_program(&ctx, "Solar Basics").await;

    let uri = format!("/api/v1/programs/{}", program.id);
    let request = test::TestRequest::put()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"status": "LIVE"}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "status must be one of DRAFT, PUBLISHED, ARCHIVED");
}

#[actix_web::test]
async fn test_update_unknown_program_is_not_found() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "mentor@example.com").await;

    let uri = format!("/api/v1/programs/{}", Uuid::new_v4());
    let request = test::TestRequest::put()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"title": "Renamed"}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 404);
}

#[actix_web::test]
async fn test_delete_program_is_idempotently_gone() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, token) = signed_in_user(&ctx, "mentor@example.com").await;

    let program = seed_program(&ctx, "Solar Basics").await;
    let uri = format!("/api/v1/programs/{}", program.id);

    let first = test::TestRequest::delete()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), 204);

    let lookup = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(lookup.status(), 404);

    let second = test::TestRequest::delete()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, second).await.status(), 404);
}
