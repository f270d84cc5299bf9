//! Update Drip Setting Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    settings::{errors::into_status_error, models::SettingValueResponse},
    state::State,
};

/// Update Setting Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateSettingRequest {
    /// New value; an empty string clears the option
    pub value: String,
}

/// Update Drip Setting Handler
///
/// Stores a value for an option of the `drip` group.
#[endpoint(
    tags("settings"),
    summary = "Update Drip Setting",
    responses(
        (status_code = StatusCode::OK, description = "Setting updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Value is not a whole number"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown setting"),
    ),
)]
pub(crate) async fn handler(
    option: PathParam<String>,
    json: JsonBody<UpdateSettingRequest>,
    depot: &mut Depot,
) -> Result<Json<SettingValueResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let option = option.into_inner();

    let value = state
        .app
        .settings
        .update_option(&option, &json.into_inner().value)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SettingValueResponse {
        option_key: option,
        value,
    }))
}
