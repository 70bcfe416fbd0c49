use serde::{Deserialize, Serialize};

use crate::resource::{CodeQuery, Entity};

/// A dining commons on campus, keyed by its short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UCSBDiningCommons {
    #[serde(default)]
    pub code: String,
    pub name: String,
    pub has_sack_meal: bool,
    pub has_take_out_meal: bool,
    pub has_dining_cam: bool,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUCSBDiningCommons {
    pub code: String,
    pub name: String,
    pub has_sack_meal: bool,
    pub has_take_out_meal: bool,
    pub has_dining_cam: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl Entity for UCSBDiningCommons {
    type Key = String;
    type KeyQuery = CodeQuery;
    type CreateParams = NewUCSBDiningCommons;

    const KIND: &'static str = "UCSBDiningCommons";

    fn from_params(params: NewUCSBDiningCommons) -> Self {
        Self {
            code: params.code,
            name: params.name,
            has_sack_meal: params.has_sack_meal,
            has_take_out_meal: params.has_take_out_meal,
            has_dining_cam: params.has_dining_cam,
            latitude: params.latitude,
            longitude: params.longitude,
        }
    }

    fn key(&self) -> Option<String> {
        (!self.code.is_empty()).then(|| self.code.clone())
    }

    fn set_key(&mut self, key: String) {
        self.code = key;
    }

    fn apply_update(&mut self, replacement: Self) {
        self.name = replacement.name;
        self.has_sack_meal = replacement.has_sack_meal;
        self.has_take_out_meal = replacement.has_take_out_meal;
        self.has_dining_cam = replacement.has_dining_cam;
        self.latitude = replacement.latitude;
        self.longitude = replacement.longitude;
    }
}
