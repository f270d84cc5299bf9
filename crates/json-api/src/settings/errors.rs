//! Settings Errors

use salvo::http::StatusError;

use dripcart_app::domain::settings::SettingsError;

pub(crate) fn into_status_error(error: SettingsError) -> StatusError {
    match error {
        SettingsError::InvalidNumber { option, value, .. } => StatusError::bad_request()
            .brief(format!("{option} must be a whole number, got {value:?}")),
        SettingsError::UnknownOption(option) => {
            StatusError::not_found().brief(format!("Unknown setting {option}"))
        }
    }
}
