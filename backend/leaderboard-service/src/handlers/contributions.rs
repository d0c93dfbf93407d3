use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::{RankError, Result};
use crate::models::ContributionEvent;
use crate::services::RankService;

/// POST /api/v1/contributions
pub async fn record_contribution(
    service: web::Data<RankService>,
    body: web::Json<ContributionEvent>,
) -> Result<HttpResponse> {
    let event = body.into_inner();

    if event.member_id.trim().is_empty() {
        return Err(RankError::BadRequest("member_id must not be empty".to_string()));
    }
    if event.amount < 0 {
        return Err(RankError::BadRequest("amount must not be negative".to_string()));
    }

    info!(
        member_id = %event.member_id,
        organization_id = ?event.organization_id,
        amount = event.amount,
        "RecordContribution request"
    );

    service.record_contribution(&event).await?;

    Ok(HttpResponse::NoContent().finish())
}
