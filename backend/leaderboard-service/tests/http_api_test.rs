use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use leaderboard_service::models::{ProfileRank, RankEntry};
use leaderboard_service::{handlers, MemoryLeaderboardStore, RankService};
use serde_json::{json, Value};
use std::sync::Arc;

fn rank_service() -> web::Data<RankService> {
    web::Data::new(RankService::new(Arc::new(MemoryLeaderboardStore::new())))
}

macro_rules! init_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data($service.clone())
                .configure(handlers::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn record_then_read_windows() {
    let service = rank_service();
    let app = init_app!(service);

    for (member_id, amount) in [("alice", 40), ("bob", 25), ("carol", 10)] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/contributions")
                .set_json(json!({
                    "member_id": member_id,
                    "organization_id": 11,
                    "organization_type": "UNIVERSITY",
                    "amount": amount,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let global: Vec<RankEntry> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/members?start=0&end=1")
            .to_request(),
    )
    .await;
    assert_eq!(
        global.iter().map(|e| e.member_id.as_str()).collect::<Vec<_>>(),
        vec!["alice", "bob"]
    );

    let by_type: Vec<RankEntry> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/organization-types/UNIVERSITY")
            .to_request(),
    )
    .await;
    assert_eq!(by_type.len(), 3);

    let by_org: Vec<RankEntry> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/organizations/11?start=2&end=5")
            .to_request(),
    )
    .await;
    assert_eq!(
        by_org,
        vec![RankEntry {
            member_id: "carol".to_string(),
            score: 10
        }]
    );
}

#[actix_web::test]
async fn member_rank_and_profile() {
    let service = rank_service();
    let app = init_app!(service);

    for (member_id, amount) in [("alice", 40), ("bob", 25)] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/contributions")
                .set_json(json!({
                    "member_id": member_id,
                    "organization_id": 3,
                    "organization_type": "COMPANY",
                    "amount": amount,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let rank: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/members/bob")
            .to_request(),
    )
    .await;
    assert_eq!(rank, json!({ "member_id": "bob", "rank": 2 }));

    let unknown: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/members/nobody")
            .to_request(),
    )
    .await;
    assert_eq!(unknown["rank"], 0);

    let profile: ProfileRank = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/members/bob/profile?organization_id=3&organization_type=COMPANY")
            .to_request(),
    )
    .await;
    assert_eq!(profile.neighbors, vec!["bob", "alice"]);
    assert_eq!(profile.rank, 2);
    assert_eq!(profile.organization_rank, 2);
    assert!(!profile.is_last);

    let leader: ProfileRank = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/members/alice/profile?organization_id=3&organization_type=COMPANY")
            .to_request(),
    )
    .await;
    assert_eq!(leader.organization_rank, 1);
    assert!(leader.is_last);

    let no_org: ProfileRank = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/members/bob/profile")
            .to_request(),
    )
    .await;
    assert_eq!(no_org, ProfileRank::empty());
}

#[actix_web::test]
async fn invalid_requests_return_400() {
    let service = rank_service();
    let app = init_app!(service);

    let cases = [
        test::TestRequest::get()
            .uri("/api/v1/ranks/members?start=5&end=1")
            .to_request(),
        test::TestRequest::get()
            .uri("/api/v1/ranks/organization-types/GUILD")
            .to_request(),
        test::TestRequest::get()
            .uri("/api/v1/ranks/members/bob/profile?organization_id=3")
            .to_request(),
        test::TestRequest::post()
            .uri("/api/v1/contributions")
            .set_json(json!({ "member_id": "bob", "amount": -5 }))
            .to_request(),
        test::TestRequest::post()
            .uri("/api/v1/contributions")
            .set_json(json!({ "member_id": "  ", "amount": 5 }))
            .to_request(),
    ];

    for req in cases {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn wide_window_past_cardinality_is_not_an_error() {
    let service = rank_service();
    let app = init_app!(service);

    let empty = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/members?start=0&end=199")
            .to_request(),
    )
    .await;
    assert_eq!(empty.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/contributions")
            .set_json(json!({ "member_id": "alice", "amount": 3 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let entries: Vec<RankEntry> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ranks/members?start=0&end=500")
            .to_request(),
    )
    .await;
    assert_eq!(entries.len(), 1);
}

#[actix_web::test]
async fn health_endpoints() {
    let service = rank_service();
    let app = init_app!(service);

    let live = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(live.status(), StatusCode::OK);

    let ready: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(ready["ready"], true);
    assert_eq!(ready["store"], "healthy");
}
