use serde::{Deserialize, Serialize};

use crate::resource::{CodeQuery, Entity};

/// A registered student organization, keyed by its short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UCSBOrganization {
    #[serde(default)]
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUCSBOrganization {
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

impl Entity for UCSBOrganization {
    type Key = String;
    type KeyQuery = CodeQuery;
    type CreateParams = NewUCSBOrganization;

    const KIND: &'static str = "UCSBOrganization";

    fn from_params(params: NewUCSBOrganization) -> Self {
        Self {
            org_code: params.org_code,
            org_translation_short: params.org_translation_short,
            org_translation: params.org_translation,
            inactive: params.inactive,
        }
    }

    fn key(&self) -> Option<String> {
        (!self.org_code.is_empty()).then(|| self.org_code.clone())
    }

    fn set_key(&mut self, key: String) {
        self.org_code = key;
    }

    fn apply_update(&mut self, replacement: Self) {
        self.org_translation_short = replacement.org_translation_short;
        self.org_translation = replacement.org_translation;
        self.inactive = replacement.inactive;
    }
}
