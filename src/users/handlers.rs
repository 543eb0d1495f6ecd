use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use mongodb::bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    extract::JsonOrForm,
    state::AppState,
    users::{
        dto::{CreateUserRequest, MessageResponse, UpdateProfilePicRequest, UserResponse},
        password::hash_password,
        repo_types::NewUser,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(get_first_user))
        .route("/users/:id", put(update_profile_pic).delete(delete_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let password_hash = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(ApiError::store("Error creating user"))?;

    let user = state
        .store
        .insert(NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password_hash,
            profile_pic: payload.profile_pic,
        })
        .await
        .map_err(ApiError::store("Error creating user"))?;

    info!(user_id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Returns whichever user the store yields first. There is no filter and no
/// ordering; callers are expected to keep a single user in the collection.
#[instrument(skip(state))]
pub async fn get_first_user(State(state): State<AppState>) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .find_first()
        .await
        .map_err(ApiError::store("Error fetching user"))?
        .ok_or(ApiError::NotFound("No user found"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_profile_pic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonOrForm(payload): JsonOrForm<UpdateProfilePicRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let Some(profile_pic) = payload.profile_pic.filter(|p| !p.is_empty()) else {
        warn!(%id, "profile picture missing");
        return Err(ApiError::BadRequest("Profile picture required"));
    };

    let id = parse_id(&id, "Error updating profile picture")?;
    let user = state
        .store
        .set_profile_pic(id, &profile_pic)
        .await
        .map_err(ApiError::store("Error updating profile picture"))?
        .ok_or(ApiError::NotFound("User not found"))?;

    info!(user_id = %user.id, bytes = profile_pic.len(), "profile picture updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "Error deleting user")?;
    let user = state
        .store
        .delete(id)
        .await
        .map_err(ApiError::store("Error deleting user"))?
        .ok_or(ApiError::NotFound("User not found"))?;

    info!(user_id = %user.id, "user deleted");
    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

fn parse_id(id: &str, message: &'static str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|e| ApiError::store(message)(e.into()))
}
