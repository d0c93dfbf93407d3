use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RankError, Result};
use crate::models::{Member, Organization, OrganizationType};
use crate::services::RankService;

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    #[serde(default)]
    pub start: u64,
    #[serde(default = "default_end")]
    pub end: u64,
}

fn default_end() -> u64 {
    9
}

impl WindowQuery {
    pub(crate) fn bounds(&self) -> Result<(u64, u64)> {
        if self.end < self.start {
            return Err(RankError::BadRequest(format!(
                "end ({}) must not be less than start ({})",
                self.end, self.start
            )));
        }
        Ok((self.start, self.end))
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub organization_id: Option<i64>,
    pub organization_type: Option<OrganizationType>,
}

impl ProfileQuery {
    pub(crate) fn organization(&self) -> Result<Option<Organization>> {
        match (self.organization_id, self.organization_type) {
            (Some(id), Some(organization_type)) => Ok(Some(Organization {
                id,
                organization_type,
            })),
            (None, None) => Ok(None),
            _ => Err(RankError::BadRequest(
                "organization_id and organization_type must be given together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberRankResponse {
    pub member_id: String,
    pub rank: u64,
}

/// GET /api/v1/ranks/members?start=&end=
pub async fn get_global_window(
    service: web::Data<RankService>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let (start, end) = query.bounds()?;
    debug!(start, end, "Global window request");

    let entries = service.global_window(start, end).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/v1/ranks/organization-types/{organization_type}?start=&end=
pub async fn get_organization_type_window(
    service: web::Data<RankService>,
    path: web::Path<String>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let organization_type = path
        .into_inner()
        .parse::<OrganizationType>()
        .map_err(RankError::BadRequest)?;
    let (start, end) = query.bounds()?;
    debug!(%organization_type, start, end, "Organization type window request");

    let entries = service
        .organization_type_window(organization_type, start, end)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/v1/ranks/organizations/{organization_id}?start=&end=
pub async fn get_organization_window(
    service: web::Data<RankService>,
    path: web::Path<i64>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let organization_id = path.into_inner();
    let (start, end) = query.bounds()?;
    debug!(organization_id, start, end, "Organization window request");

    let entries = service
        .organization_window(organization_id, start, end)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/v1/ranks/members/{member_id}
pub async fn get_member_rank(
    service: web::Data<RankService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let member_id = path.into_inner();
    let rank = service.global_rank(&member_id).await?;
    Ok(HttpResponse::Ok().json(MemberRankResponse { member_id, rank }))
}

/// GET /api/v1/ranks/members/{member_id}/profile?organization_id=&organization_type=
///
/// The caller supplies the member's organization; membership records are
/// owned by the persistence layer.
pub async fn get_profile_rank(
    service: web::Data<RankService>,
    path: web::Path<String>,
    query: web::Query<ProfileQuery>,
) -> Result<HttpResponse> {
    let member = Member::new(path.into_inner(), query.organization()?);
    let profile = service.profile_rank(&member).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        assert_eq!(WindowQuery { start: 0, end: 9 }.bounds().unwrap(), (0, 9));
        assert!(WindowQuery { start: 5, end: 4 }.bounds().is_err());
        assert!(WindowQuery { start: 0, end: 99 }.bounds().is_ok());
        assert!(WindowQuery { start: 0, end: 100 }.bounds().is_err());
    }

    #[test]
    fn test_profile_query_requires_both_organization_fields() {
        let both = ProfileQuery {
            organization_id: Some(1),
            organization_type: Some(OrganizationType::Etc),
        };
        assert_eq!(both.organization().unwrap().map(|o| o.id), Some(1));

        let neither = ProfileQuery {
            organization_id: None,
            organization_type: None,
        };
        assert!(neither.organization().unwrap().is_none());

        let partial = ProfileQuery {
            organization_id: Some(1),
            organization_type: None,
        };
        assert!(partial.organization().is_err());
    }
}
