//! Get Drip Settings Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, settings::models::SettingsGroupResponse, state::State};

/// Get Drip Settings Handler
///
/// Returns the `drip` settings group with the current value of each option.
#[endpoint(tags("settings"), summary = "Get Drip Settings")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SettingsGroupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(state.app.settings.group().await.into()))
}
