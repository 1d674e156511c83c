//! Group membership Handlers

use axum::extract::State;
use http::StatusCode;
use shared::models::{DELIVERY_CREW_GROUP, GroupMember, GroupMemberAdd, GroupRef, MANAGER_GROUP};

use crate::auth::{Action, CurrentUser, Resource};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::security_log;
use crate::utils::extract::{Json, Path};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// URL segment → group name
fn group_name(segment: &str) -> AppResult<&'static str> {
    match segment {
        "manager" => Ok(MANAGER_GROUP),
        "delivery-crew" => Ok(DELIVERY_CREW_GROUP),
        other => Err(AppError::new(ErrorCode::GroupNotFound).with_detail("group", other)),
    }
}

/// GET /api/groups/{group}/users
pub async fn list_members(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(group): Path<String>,
) -> AppResult<Json<Vec<GroupMember>>> {
    state
        .policy()
        .authorize(&user, Resource::GroupMembership, Action::List, None)?;
    let group = group_name(&group)?;

    let users = user_repo::list_group_members(&state.pool, group).await?;
    let mut members = Vec::with_capacity(users.len());
    for member in users {
        let groups = user_repo::group_names(&state.pool, member.id).await?;
        members.push(GroupMember {
            id: member.id,
            username: member.username,
            email: member.email,
            groups: groups.into_iter().map(|name| GroupRef { name }).collect(),
        });
    }
    Ok(Json(members))
}

/// POST /api/groups/{group}/users - `{username}` or `{user_id}`; adding twice is fine
pub async fn add_member(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(group): Path<String>,
    Json(payload): Json<GroupMemberAdd>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    state
        .policy()
        .authorize(&user, Resource::GroupMembership, Action::Create, None)?;
    let group = group_name(&group)?;

    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let target = match (username, payload.user_id) {
        (Some(name), _) => user_repo::find_by_username(&state.pool, name).await?,
        (None, Some(id)) => user_repo::find_by_id(&state.pool, id).await?,
        (None, None) => return Err(AppError::required("username")),
    }
    .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    user_repo::add_to_group(&state.pool, target.id, group).await?;

    security_log!(
        "INFO",
        "group_member_added",
        group = group,
        user_id = target.id,
        by = user.id
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message(format!(
            "User {} added to the {group} group",
            target.username
        ))),
    ))
}

/// DELETE /api/groups/{group}/users/{id}
pub async fn remove_member(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((group, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .policy()
        .authorize(&user, Resource::GroupMembership, Action::Delete, None)?;
    let group = group_name(&group)?;

    let target = user_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("user_id", id))?;
    if !user_repo::remove_from_group(&state.pool, target.id, group).await? {
        return Err(AppError::new(ErrorCode::UserNotInGroup).with_detail("group", group));
    }

    security_log!(
        "INFO",
        "group_member_removed",
        group = group,
        user_id = target.id,
        by = user.id
    );
    Ok(Json(ApiResponse::message(format!(
        "User {} removed from the {group} group",
        target.username
    ))))
}
