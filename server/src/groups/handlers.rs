//! Group API Handlers

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use super::types::{GroupAction, GroupRequest};
use crate::api::AppState;
use crate::error::{ApiError, ApiResult};
use crate::phone;

/// POST /api/groups
pub async fn manage_group(
    State(state): State<AppState>,
    Json(req): Json<GroupRequest>,
) -> ApiResult<Json<Value>> {
    let action = GroupAction::parse_str(&req.action).ok_or_else(|| {
        ApiError::UnsupportedType(
            "Invalid action. Must be 'create', 'add_participants', or 'remove_participants'"
                .into(),
        )
    })?;

    if req.participants.is_empty() {
        return Err(ApiError::Validation(
            "At least one participant is required".into(),
        ));
    }

    let country_code = &state.config.default_country_code;
    let participants = req
        .participants
        .iter()
        .map(|p| phone::to_recipient(p, country_code))
        .collect::<Result<Vec<_>, _>>()?;

    let data = match action {
        GroupAction::Create => {
            let name = req
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| ApiError::Validation("Group name is required".into()))?;
            info!(name, participants = participants.len(), "Creating group");
            state.gateway.create_group(name, &participants).await?
        }
        GroupAction::AddParticipants => {
            let group_id = required_group_id(&req)?;
            info!(group_id, participants = participants.len(), "Adding participants");
            state.gateway.add_participants(group_id, &participants).await?
        }
        GroupAction::RemoveParticipants => {
            let group_id = required_group_id(&req)?;
            info!(group_id, participants = participants.len(), "Removing participants");
            state
                .gateway
                .remove_participants(group_id, &participants)
                .await?
        }
    };

    Ok(Json(json!({
        "success": true,
        "data": data,
        "message": action.success_message(),
    })))
}

fn required_group_id(req: &GroupRequest) -> Result<&str, ApiError> {
    req.group_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation("Group ID is required".into()))
}
