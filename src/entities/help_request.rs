use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::resource::{Entity, IdQuery};

/// A request for help from course staff at a table or breakout room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    #[serde(default)]
    pub id: i64,
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHelpRequest {
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

impl Entity for HelpRequest {
    type Key = i64;
    type KeyQuery = IdQuery;
    type CreateParams = NewHelpRequest;

    const KIND: &'static str = "HelpRequest";

    fn from_params(params: NewHelpRequest) -> Self {
        Self {
            id: 0,
            requester_email: params.requester_email,
            team_id: params.team_id,
            table_or_breakout_room: params.table_or_breakout_room,
            request_time: params.request_time,
            explanation: params.explanation,
            solved: params.solved,
        }
    }

    fn key(&self) -> Option<i64> {
        (self.id != 0).then_some(self.id)
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }

    fn apply_update(&mut self, replacement: Self) {
        self.requester_email = replacement.requester_email;
        self.team_id = replacement.team_id;
        self.table_or_breakout_room = replacement.table_or_breakout_room;
        self.request_time = replacement.request_time;
        self.explanation = replacement.explanation;
        self.solved = replacement.solved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_carry_no_key_until_saved() {
        let request = HelpRequest::from_params(NewHelpRequest {
            requester_email: "cgaucho@ucsb.edu".to_string(),
            team_id: "s22-5pm-3".to_string(),
            table_or_breakout_room: "7".to_string(),
            request_time: "2022-04-20T17:35:00".parse().unwrap(),
            explanation: "Dokku deploy failing".to_string(),
            solved: false,
        });

        assert_eq!(request.key(), None);
    }

    #[test]
    fn wire_format_uses_camel_case_names() {
        let request = HelpRequest {
            id: 1,
            requester_email: "cgaucho@ucsb.edu".to_string(),
            team_id: "s22-5pm-3".to_string(),
            table_or_breakout_room: "7".to_string(),
            request_time: "2022-04-20T17:35:00".parse().unwrap(),
            explanation: "Dokku deploy failing".to_string(),
            solved: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["requesterEmail"], "cgaucho@ucsb.edu");
        assert_eq!(value["tableOrBreakoutRoom"], "7");
        assert_eq!(value["requestTime"], "2022-04-20T17:35:00");
    }
}
