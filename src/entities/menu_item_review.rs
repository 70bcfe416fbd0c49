use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::resource::{Entity, IdQuery};

/// A diner's star rating and comments on a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReview {
    #[serde(default)]
    pub id: i64,
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItemReview {
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

impl Entity for MenuItemReview {
    type Key = i64;
    type KeyQuery = IdQuery;
    type CreateParams = NewMenuItemReview;

    const KIND: &'static str = "MenuItemReview";

    fn from_params(params: NewMenuItemReview) -> Self {
        Self {
            id: 0,
            item_id: params.item_id,
            reviewer_email: params.reviewer_email,
            stars: params.stars,
            date_reviewed: params.date_reviewed,
            comments: params.comments,
        }
    }

    fn key(&self) -> Option<i64> {
        (self.id != 0).then_some(self.id)
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }

    fn apply_update(&mut self, replacement: Self) {
        self.item_id = replacement.item_id;
        self.reviewer_email = replacement.reviewer_email;
        self.stars = replacement.stars;
        self.date_reviewed = replacement.date_reviewed;
        self.comments = replacement.comments;
    }
}
