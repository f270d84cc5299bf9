//! Drip settings service.

use std::{fmt, sync::Arc};

use serde::Serialize;
use tracing::info;

use crate::domain::settings::{
    errors::SettingsError,
    fields::{ACCOUNT_ID_KEY, GroupOption, SETTINGS_GROUP_ID, SettingsGroup, SettingsRegistrar},
    options::OptionsStore,
};

/// An option of the `drip` group with its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionValue {
    #[serde(flatten)]
    pub option: GroupOption,

    pub value: String,
}

/// The `drip` settings group with its options and values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DripSettingsGroup {
    #[serde(flatten)]
    pub group: SettingsGroup,

    pub options: Vec<OptionValue>,
}

#[derive(Clone)]
pub struct DripSettings {
    options: Arc<dyn OptionsStore>,
    registrar: SettingsRegistrar,
}

impl fmt::Debug for DripSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DripSettings")
            .field("registrar", &self.registrar)
            .finish_non_exhaustive()
    }
}

impl DripSettings {
    pub fn new(options: Arc<dyn OptionsStore>, registrar: SettingsRegistrar) -> Self {
        Self { options, registrar }
    }

    #[must_use]
    pub fn registrar(&self) -> &SettingsRegistrar {
        &self.registrar
    }

    /// Stored Drip account ID, `None` until the integration has been set up.
    pub async fn account_id(&self) -> Result<Option<u64>, SettingsError> {
        match self.options.get_option(ACCOUNT_ID_KEY).await {
            Some(value) => parse_number(ACCOUNT_ID_KEY, &value),
            None => Ok(None),
        }
    }

    /// Store the Drip account ID. An empty value clears it.
    pub async fn update_account_id(&self, value: &str) -> Result<Option<u64>, SettingsError> {
        self.update_option(ACCOUNT_ID_KEY, value).await
    }

    /// Update any option of the `drip` group.
    pub async fn update_option(&self, key: &str, value: &str) -> Result<Option<u64>, SettingsError> {
        let option = self
            .group_options()
            .into_iter()
            .find(|option| option.option_key == key)
            .ok_or_else(|| SettingsError::UnknownOption(key.to_string()))?;

        let number = parse_number(&option.option_key, value)?;

        match number {
            Some(number) => {
                self.options
                    .update_option(&option.option_key, number.to_string())
                    .await;
            }
            None => {
                self.options.delete_option(&option.option_key).await;
            }
        }

        info!(option = %option.option_key, cleared = number.is_none(), "drip setting updated");

        Ok(number)
    }

    /// The `drip` group with the current value of every option.
    pub async fn group(&self) -> DripSettingsGroup {
        let group = self
            .registrar
            .settings_group(Vec::new())
            .into_iter()
            .find(|group| group.id == SETTINGS_GROUP_ID)
            .unwrap_or_else(|| SettingsGroup {
                id: SETTINGS_GROUP_ID.to_string(),
                label: String::new(),
                description: String::new(),
            });

        let mut options = Vec::new();

        for option in self.group_options() {
            let value = self
                .options
                .get_option(&option.option_key)
                .await
                .unwrap_or_else(|| option.default.clone());

            options.push(OptionValue { option, value });
        }

        DripSettingsGroup { group, options }
    }

    fn group_options(&self) -> Vec<GroupOption> {
        self.registrar.settings_group_options(Vec::new())
    }
}

fn parse_number(option: &str, value: &str) -> Result<Option<u64>, SettingsError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|source| SettingsError::InvalidNumber {
            option: option.to_string(),
            value: value.to_string(),
            source,
        })
}
