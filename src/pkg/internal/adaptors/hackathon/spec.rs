use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::Type, FromRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    Leader,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Leader => "LEADER",
            Role::Member => "MEMBER",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeamEntry {
    pub id: i64,
    pub team_name: String,
    pub total_participants: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ParticipantEntry {
    pub id: i64,
    #[serde(skip_serializing)]
    pub team_id: i64,
    pub role: Role,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub branch: String,
    pub section: String,
    pub year: String,
}

/// A team whose spreadsheet append has not gone through yet.
#[derive(Debug, Clone, FromRow)]
pub struct BacklogEntry {
    pub team_id: i64,
    pub last_error: String,
    pub attempts: i64,
    pub created_at: DateTime<Utc>,
}
