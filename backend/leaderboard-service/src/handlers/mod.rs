/// HTTP handlers for the leaderboard API
///
/// - Contributions: record points for a member
/// - Ranks: leaderboard windows, member rank, profile neighborhood
/// - Health: liveness and store readiness
pub mod contributions;
pub mod health;
pub mod ranks;

use actix_web::web;

pub use contributions::record_contribution;
pub use health::{liveness_check, readiness_check};
pub use ranks::{
    get_global_window, get_member_rank, get_organization_type_window, get_organization_window,
    get_profile_rank,
};

/// Register every route. Expects `web::Data<RankService>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(liveness_check))
        .route("/health/ready", web::get().to(readiness_check))
        .service(
            web::scope("/api/v1")
                .route("/contributions", web::post().to(record_contribution))
                .service(
                    web::scope("/ranks")
                        .route("/members", web::get().to(get_global_window))
                        .route("/members/{member_id}", web::get().to(get_member_rank))
                        .route(
                            "/members/{member_id}/profile",
                            web::get().to(get_profile_rank),
                        )
                        .route(
                            "/organization-types/{organization_type}",
                            web::get().to(get_organization_type_window),
                        )
                        .route(
                            "/organizations/{organization_id}",
                            web::get().to(get_organization_window),
                        ),
                ),
        );
}
