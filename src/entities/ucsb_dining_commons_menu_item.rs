use serde::{Deserialize, Serialize};

use crate::resource::{Entity, IdQuery};

/// One item served at a dining commons station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UCSBDiningCommonsMenuItem {
    #[serde(default)]
    pub id: i64,
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUCSBDiningCommonsMenuItem {
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

impl Entity for UCSBDiningCommonsMenuItem {
    type Key = i64;
    type KeyQuery = IdQuery;
    type CreateParams = NewUCSBDiningCommonsMenuItem;

    const KIND: &'static str = "UCSBDiningCommonsMenuItem";

    fn from_params(params: NewUCSBDiningCommonsMenuItem) -> Self {
        Self {
            id: 0,
            dining_commons_code: params.dining_commons_code,
            name: params.name,
            station: params.station,
        }
    }

    fn key(&self) -> Option<i64> {
        (self.id != 0).then_some(self.id)
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }

    fn apply_update(&mut self, replacement: Self) {
        self.dining_commons_code = replacement.dining_commons_code;
        self.name = replacement.name;
        self.station = replacement.station;
    }
}
