use sqlx::SqliteConnection;

use crate::{
    pkg::internal::adaptors::hackathon::spec::{BacklogEntry, ParticipantEntry, TeamEntry},
    prelude::Result,
};

pub struct TeamSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> TeamSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        TeamSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<TeamEntry>> {
        let row = sqlx::query_as::<_, TeamEntry>(
            "SELECT id, team_name, total_participants, created_at FROM hackathon_teams WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<TeamEntry>> {
        let rows = sqlx::query_as::<_, TeamEntry>(
            "SELECT id, team_name, total_participants, created_at
             FROM hackathon_teams ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    /// Participants of one team in submission order.
    pub async fn participants_of(&mut self, team_id: i64) -> Result<Vec<ParticipantEntry>> {
        let rows = sqlx::query_as::<_, ParticipantEntry>(
            "SELECT id, team_id, role, full_name, email, phone, branch, section, year
             FROM hackathon_participants WHERE team_id = ?1 ORDER BY id",
        )
        .bind(team_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn all_participants(&mut self) -> Result<Vec<ParticipantEntry>> {
        let rows = sqlx::query_as::<_, ParticipantEntry>(
            "SELECT id, team_id, role, full_name, email, phone, branch, section, year
             FROM hackathon_participants ORDER BY team_id, id",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&mut self) -> Result<(i64, i64)> {
        let teams = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hackathon_teams")
            .fetch_one(&mut *self.pool)
            .await?;
        let participants =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hackathon_participants")
                .fetch_one(&mut *self.pool)
                .await?;
        Ok((teams, participants))
    }
}

pub struct BacklogSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> BacklogSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        BacklogSelector { pool }
    }

    pub async fn get_all(&mut self) -> Result<Vec<BacklogEntry>> {
        let rows = sqlx::query_as::<_, BacklogEntry>(
            "SELECT team_id, last_error, attempts, created_at
             FROM sheet_backlog ORDER BY created_at, team_id",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
