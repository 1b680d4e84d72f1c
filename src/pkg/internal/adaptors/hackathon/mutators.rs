use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    pkg::internal::{
        adaptors::hackathon::spec::{ParticipantEntry, Role, TeamEntry},
        hackathon::ParticipantInput,
    },
    prelude::Result,
};

pub struct TeamMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> TeamMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        TeamMutator { pool }
    }

    pub async fn create(&mut self, team_name: &str, total_participants: i64) -> Result<TeamEntry> {
        let row = sqlx::query_as::<_, TeamEntry>(
            r#"
            INSERT INTO hackathon_teams (team_name, total_participants, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, team_name, total_participants, created_at
            "#,
        )
        .bind(team_name)
        .bind(total_participants)
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn add_participant(
        &mut self,
        team_id: i64,
        role: Role,
        p: &ParticipantInput,
    ) -> Result<ParticipantEntry> {
        let row = sqlx::query_as::<_, ParticipantEntry>(
            r#"
            INSERT INTO hackathon_participants (team_id, role, full_name, email, phone,
                                                branch, section, year)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING id, team_id, role, full_name, email, phone, branch, section, year
            "#,
        )
        .bind(team_id)
        .bind(role)
        .bind(&p.full_name)
        .bind(&p.email)
        .bind(&p.phone)
        .bind(&p.branch)
        .bind(&p.section)
        .bind(&p.year)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Participants and any backlog row go with the team.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM hackathon_teams WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct BacklogMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> BacklogMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        BacklogMutator { pool }
    }

    /// Records a failed append, bumping the attempt counter when the team is
    /// already waiting.
    pub async fn record(&mut self, team_id: i64, error: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sheet_backlog (team_id, last_error, attempts, created_at)
            VALUES (?1, ?2, 1, ?3)
            ON CONFLICT (team_id) DO UPDATE
            SET last_error = excluded.last_error, attempts = sheet_backlog.attempts + 1
            "#,
        )
        .bind(team_id)
        .bind(error)
        .bind(Utc::now())
        .execute(&mut *self.pool)
        .await?;
        Ok(())
    }

    pub async fn clear(&mut self, team_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM sheet_backlog WHERE team_id = ?1")
            .bind(team_id)
            .execute(&mut *self.pool)
            .await?;
        Ok(())
    }
}
