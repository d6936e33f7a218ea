use std::sync::Arc;

use axum::{debug_handler, extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{error::Error, store::UserDirectory, AppResult};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    #[serde(default)]
    phone_number: String,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn register(
    State(users): State<Arc<UserDirectory>>,
    payload: Result<Json<User>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let Json(user) = payload?;

    if user.phone_number.is_empty() {
        return Err(Error::Missing("phoneNumber").into());
    }

    users.register(&user.phone_number)?;

    tracing::info!(handle = %user.phone_number, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}
