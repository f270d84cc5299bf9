//! Settings Responses

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use dripcart_app::domain::settings::{
    DripSettingsGroup, OptionValue,
    fields::{AdminField, FieldType, OptionType, SettingsTab},
};

/// Settings Group Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettingsGroupResponse {
    /// Group identifier
    pub id: String,

    /// Group label
    pub label: String,

    /// Group description
    pub description: String,

    /// Options of the group with their current values
    pub options: Vec<SettingResponse>,
}

impl From<DripSettingsGroup> for SettingsGroupResponse {
    fn from(group: DripSettingsGroup) -> Self {
        Self {
            id: group.group.id,
            label: group.group.label,
            description: group.group.description,
            options: group.options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Setting Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettingResponse {
    /// Option identifier
    pub id: String,

    /// Key the value is stored under
    pub option_key: String,

    /// Option label
    pub label: String,

    /// Option description
    pub description: String,

    /// Value used when nothing is stored
    pub default: String,

    /// Value type
    #[serde(rename = "type")]
    pub option_type: String,

    /// Current value
    pub value: String,
}

impl From<OptionValue> for SettingResponse {
    fn from(value: OptionValue) -> Self {
        let option = value.option;

        Self {
            id: option.id,
            option_key: option.option_key,
            label: option.label,
            description: option.description,
            default: option.default,
            option_type: match option.option_type {
                OptionType::Number => "number".to_string(),
            },
            value: value.value,
        }
    }
}

/// Settings Fields Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettingsFieldsResponse {
    /// Admin tab identifier
    pub tab_id: String,

    /// Admin tab label
    pub tab_label: String,

    /// Fields rendered on the tab, in order
    pub fields: Vec<AdminFieldResponse>,
}

impl SettingsFieldsResponse {
    pub(crate) fn new(tab: SettingsTab, fields: Vec<AdminField>) -> Self {
        Self {
            tab_id: tab.id,
            tab_label: tab.label,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Admin Field Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminFieldResponse {
    /// Field identifier
    pub id: String,

    /// Field label
    pub name: Option<String>,

    /// Field type (`title`, `number` or `sectionend`)
    #[serde(rename = "type")]
    pub field_type: String,

    /// Help text
    pub desc: Option<String>,

    /// Extra HTML attributes
    pub custom_attributes: BTreeMap<String, String>,
}

impl From<AdminField> for AdminFieldResponse {
    fn from(field: AdminField) -> Self {
        let field_type = match field.field_type {
            FieldType::Title => "title",
            FieldType::Number => "number",
            FieldType::SectionEnd => "sectionend",
        };

        Self {
            id: field.id,
            name: field.name,
            field_type: field_type.to_string(),
            desc: field.desc,
            custom_attributes: field.custom_attributes,
        }
    }
}

/// Setting Value Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettingValueResponse {
    /// Updated option key
    pub option_key: String,

    /// Stored number, `null` when the value was cleared
    pub value: Option<u64>,
}
