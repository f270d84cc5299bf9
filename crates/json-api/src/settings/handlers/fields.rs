//! Drip Settings Fields Handler

use std::sync::Arc;

use salvo::prelude::*;

use dripcart_app::domain::settings::fields::{SETTINGS_TAB_ID, SettingsTab};

use crate::{extensions::*, settings::models::SettingsFieldsResponse, state::State};

/// Drip Settings Fields Handler
///
/// Returns the admin tab and the fields it renders.
#[endpoint(tags("settings"), summary = "Get Drip Settings Fields")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SettingsFieldsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let registrar = state.app.settings.registrar();

    let tab = registrar
        .add_settings_tab(Vec::new())
        .into_iter()
        .find(|tab| tab.id == SETTINGS_TAB_ID)
        .unwrap_or_else(|| SettingsTab {
            id: SETTINGS_TAB_ID.to_string(),
            label: "Drip".to_string(),
        });

    Ok(Json(SettingsFieldsResponse::new(tab, registrar.admin_fields())))
}
