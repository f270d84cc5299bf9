//! Drip settings fields.
//!
//! Describes the "Drip" settings tab shown in the store admin and the `drip`
//! settings group exposed through the settings API.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::Serialize;

/// Text domain used for every settings label.
pub const TEXT_DOMAIN: &str = "woocommerce-settings-drip";

/// Option key holding the Drip account ID.
pub const ACCOUNT_ID_KEY: &str = "account_id";

pub const SETTINGS_TAB_ID: &str = "settings_drip";
pub const SETTINGS_GROUP_ID: &str = "drip";
pub const SECTION_TITLE_ID: &str = "wc_settings_drip_section_title";
pub const SECTION_END_ID: &str = "wc_settings_drip_section_end";

/// Name of the filter applied to the admin field list.
pub const ADMIN_FIELDS_FILTER: &str = "wc_settings_drip_settings";

/// Settings tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsTab {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Title,
    Number,
    SectionEnd,
}

/// Admin field rendered on the settings tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminField {
    /// Key of the field within the settings list.
    #[serde(skip)]
    pub key: String,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_attributes: BTreeMap<String, String>,
}

/// Settings group exposed through the settings API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsGroup {
    pub id: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Number,
}

/// Option registered under a settings group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOption {
    pub id: String,
    pub option_key: String,
    pub label: String,
    pub description: String,
    pub default: String,

    #[serde(rename = "type")]
    pub option_type: OptionType,
}

type FieldsFilter = Arc<dyn Fn(Vec<AdminField>) -> Vec<AdminField> + Send + Sync>;

/// Registers the Drip tab, settings group and fields.
#[derive(Clone, Default)]
pub struct SettingsRegistrar {
    filters: Vec<FieldsFilter>,
}

impl fmt::Debug for SettingsRegistrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsRegistrar")
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl SettingsRegistrar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter over the admin field list.
    pub fn add_fields_filter(
        &mut self,
        filter: impl Fn(Vec<AdminField>) -> Vec<AdminField> + Send + Sync + 'static,
    ) {
        self.filters.push(Arc::new(filter));
    }

    /// Append the Drip tab to the existing settings tabs.
    #[must_use]
    pub fn add_settings_tab(&self, mut tabs: Vec<SettingsTab>) -> Vec<SettingsTab> {
        tabs.push(SettingsTab {
            id: SETTINGS_TAB_ID.to_string(),
            label: "Drip".to_string(),
        });

        tabs
    }

    /// Append the `drip` group to the existing settings groups.
    #[must_use]
    pub fn settings_group(&self, mut groups: Vec<SettingsGroup>) -> Vec<SettingsGroup> {
        groups.push(SettingsGroup {
            id: SETTINGS_GROUP_ID.to_string(),
            label: "Drip".to_string(),
            description: "Drip Settings".to_string(),
        });

        groups
    }

    /// Append the Drip options to the existing options of the `drip` group.
    #[must_use]
    pub fn settings_group_options(&self, mut options: Vec<GroupOption>) -> Vec<GroupOption> {
        options.push(GroupOption {
            id: ACCOUNT_ID_KEY.to_string(),
            option_key: ACCOUNT_ID_KEY.to_string(),
            label: "Account ID".to_string(),
            description: "Drip Account ID".to_string(),
            default: String::new(),
            option_type: OptionType::Number,
        });

        options
    }

    /// Admin fields for the Drip tab, after every registered filter has run.
    #[must_use]
    pub fn admin_fields(&self) -> Vec<AdminField> {
        let fields = vec![
            AdminField {
                key: "section_title".to_string(),
                id: SECTION_TITLE_ID.to_string(),
                name: Some("Drip".to_string()),
                field_type: FieldType::Title,
                desc: Some(String::new()),
                custom_attributes: BTreeMap::new(),
            },
            AdminField {
                key: ACCOUNT_ID_KEY.to_string(),
                id: ACCOUNT_ID_KEY.to_string(),
                name: Some("Account ID".to_string()),
                field_type: FieldType::Number,
                desc: Some("Read-only, visible if integration was successful".to_string()),
                custom_attributes: BTreeMap::from([("readonly".to_string(), "readonly".to_string())]),
            },
            AdminField {
                key: "section_end".to_string(),
                id: SECTION_END_ID.to_string(),
                name: None,
                field_type: FieldType::SectionEnd,
                desc: None,
                custom_attributes: BTreeMap::new(),
            },
        ];

        self.filters.iter().fold(fields, |fields, filter| filter(fields))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn drip_tab_is_appended() {
        let existing = vec![SettingsTab {
            id: "general".to_string(),
            label: "General".to_string(),
        }];

        let tabs = SettingsRegistrar::new().add_settings_tab(existing);

        assert_eq!(tabs.len(), 2);
        assert_eq!(
            tabs.last(),
            Some(&SettingsTab {
                id: "settings_drip".to_string(),
                label: "Drip".to_string(),
            })
        );
    }

    #[test]
    fn group_and_option_describe_account_id() -> TestResult {
        let registrar = SettingsRegistrar::new();

        let groups = registrar.settings_group(Vec::new());
        let options = registrar.settings_group_options(Vec::new());

        assert_eq!(
            serde_json::to_value(&groups)?,
            serde_json::json!([{ "id": "drip", "label": "Drip", "description": "Drip Settings" }])
        );
        assert_eq!(
            serde_json::to_value(&options)?,
            serde_json::json!([{
                "id": "account_id",
                "option_key": "account_id",
                "label": "Account ID",
                "description": "Drip Account ID",
                "default": "",
                "type": "number",
            }])
        );

        Ok(())
    }

    #[test]
    fn account_id_field_is_read_only_number() -> TestResult {
        let fields = SettingsRegistrar::new().admin_fields();

        let ids: Vec<_> = fields.iter().map(|field| field.id.as_str()).collect();

        assert_eq!(ids, [SECTION_TITLE_ID, ACCOUNT_ID_KEY, SECTION_END_ID]);

        let account = fields.get(1).ok_or("missing account field")?;

        assert_eq!(account.field_type, FieldType::Number);
        assert_eq!(
            serde_json::to_value(account)?,
            serde_json::json!({
                "id": "account_id",
                "name": "Account ID",
                "type": "number",
                "desc": "Read-only, visible if integration was successful",
                "custom_attributes": { "readonly": "readonly" },
            })
        );

        Ok(())
    }

    #[test]
    fn filters_can_change_fields() {
        let mut registrar = SettingsRegistrar::new();

        registrar.add_fields_filter(|mut fields| {
            fields.retain(|field| field.field_type != FieldType::Title);
            fields
        });

        assert_eq!(registrar.admin_fields().len(), 2);
    }
}
