//! User profile upsert

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{UserProfile, UserProfileUpsert};
use uuid::Uuid;
use validator::Validate;

use super::ApiResult;
use super::extract::JsonBody;
use crate::state::AppState;

/// POST /api/user/profile
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpsertProfileRequest {
    pub id: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
    #[validate(length(max = 2048))]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl UpsertProfileRequest {
    fn normalized(self) -> Self {
        Self {
            id: non_blank(self.id),
            email: non_blank(self.email),
            full_name: non_blank(self.full_name),
            avatar_url: non_blank(self.avatar_url),
        }
    }
}

pub async fn upsert_profile(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpsertProfileRequest>,
) -> ApiResult<ProfileResponse> {
    let req = req.normalized();

    let raw_id = req
        .id
        .as_deref()
        .ok_or_else(|| AppError::new(ErrorCode::ProfileIdRequired))?;
    let id = Uuid::parse_str(raw_id).map_err(|_| AppError::new(ErrorCode::ProfileIdInvalid))?;

    if let Err(errors) = req.validate() {
        let fields = errors.field_errors();
        let err = if fields.contains_key("email") {
            AppError::new(ErrorCode::ProfileEmailInvalid)
        } else {
            AppError::validation(errors.to_string())
        };
        return Err(err.into());
    }

    let profile = state
        .store
        .upsert_profile(UserProfileUpsert {
            id,
            email: req.email,
            full_name: req.full_name,
            avatar_url: req.avatar_url,
            updated_at: state.now(),
        })
        .await?;

    tracing::info!(profile_id = %profile.id, "Profile upserted");
    Ok(Json(ProfileResponse { profile }))
}
