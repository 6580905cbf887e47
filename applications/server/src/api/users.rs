/// User record API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
    validation::{self, FieldError},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pinpoint_core::{User, UserId};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub message: &'static str,
    pub data: User,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub message: &'static str,
    pub data: Vec<User>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn json_body(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ServerError::Validation(vec![FieldError::body(rejection.body_text())]))
}

fn path_id(raw: &str) -> Result<UserId> {
    validation::user_id(raw).map_err(ServerError::Validation)
}

/// POST /users - Create a user from `{name, zipCode}`
pub async fn create_user(
    State(app_state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let body = json_body(body)?;
    let input = validation::create_user(&body).map_err(ServerError::Validation)?;

    let user = app_state.users.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully",
            data: user,
        }),
    ))
}

/// GET /users - List every user
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<UsersResponse>> {
    let list = app_state.users.list_users().await?;

    Ok(Json(UsersResponse {
        message: "Users retrieved successfully",
        data: list.users,
        count: list.count,
    }))
}

/// GET /users/:id - Fetch one user
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = path_id(&id)?;

    let response = match app_state.users.get_user(&id).await? {
        Some(user) => Json(UserResponse {
            message: "User retrieved successfully",
            data: user,
        })
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "User not found",
            }),
        )
            .into_response(),
    };

    Ok(response)
}

/// PUT /users/:id - Partially update a user
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    // Report id and body problems together
    let id = validation::user_id(&id);
    let changes = json_body(body).and_then(|body| {
        validation::update_user(&body).map_err(ServerError::Validation)
    });

    let (id, changes) = match (id, changes) {
        (Ok(id), Ok(changes)) => (id, changes),
        (Err(mut errors), Err(ServerError::Validation(more))) => {
            errors.extend(more);
            return Err(ServerError::Validation(errors));
        }
        (Err(errors), _) => return Err(ServerError::Validation(errors)),
        (Ok(_), Err(err)) => return Err(err),
    };

    let user = app_state.users.update_user(&id, changes).await?;

    Ok(Json(UserResponse {
        message: "User updated successfully",
        data: user,
    }))
}

/// DELETE /users/:id - Remove a user
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = path_id(&id)?;

    app_state.users.delete_user(&id).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}
