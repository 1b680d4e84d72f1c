use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::hackathon::{
                mutators::{BacklogMutator, TeamMutator},
                selectors::{BacklogSelector, TeamSelector},
                spec::{ParticipantEntry, Role, TeamEntry},
            },
            notify::{announce, messages::HackathonNotice},
            sheets::team_rows,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{
        accept, email_address, is_unique_violation, validation_errors, AppError, Lenient, Result,
    },
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ParticipantInput {
    #[serde(default)]
    pub role: Lenient,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "This field may not be blank."))]
    pub full_name: String,
    #[serde(default)]
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 20, message = "This field may not be blank."))]
    pub phone: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegistrationInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "This field may not be blank."))]
    pub team_name: String,
    #[serde(default)]
    pub total_participants: Lenient,
    #[serde(default)]
    #[validate(nested)]
    pub participants: Vec<ParticipantInput>,
}

/// Declared team size and the role of each submitted participant.
struct Roster {
    total: i64,
    roles: Vec<Role>,
}

impl RegistrationInput {
    fn check(&self, max_team_size: i64) -> Result<Roster> {
        let mut errors = validation_errors(self);
        let total = accept(
            &mut errors,
            "total_participants",
            self.total_participants.integer(),
        );
        let roles: Vec<Option<Role>> = self
            .participants
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                accept(
                    &mut errors,
                    &format!("participants[{}].role", idx),
                    p.role.choice(),
                )
            })
            .collect();
        if self.participants.is_empty() {
            errors
                .entry("participants".to_string())
                .or_default()
                .push("At least one participant is required.".to_string());
        }
        let (Some(total), Some(roles)) = (total, roles.into_iter().collect::<Option<Vec<_>>>())
        else {
            return Err(AppError::Validation(errors));
        };
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let leaders = roles.iter().filter(|r| **r == Role::Leader).count();
        if leaders != 1 {
            return Err(AppError::rejected(
                "participants",
                "Exactly one team leader is required.",
            ));
        }
        if !(1..=max_team_size).contains(&total) {
            return Err(AppError::rejected(
                "total_participants",
                format!("A team must have between 1 and {} participants.", max_team_size),
            ));
        }
        if total != roles.len() as i64 {
            return Err(AppError::rejected(
                "total_participants",
                "Total participants must match the number of participants submitted.",
            ));
        }
        Ok(Roster { total, roles })
    }
}

/// A team with its roster, as listed to administrators.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    #[serde(flatten)]
    pub team: TeamEntry,
    pub participants: Vec<ParticipantEntry>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub replayed: usize,
    pub pending: usize,
}

/// Stores the team and its roster in one transaction, then exports the
/// roster to the spreadsheet and announces it. Neither of the latter can
/// fail the registration.
pub async fn register(state: &AppState, input: &RegistrationInput) -> Result<Registration> {
    let roster = input.check(state.settings.hackathon_max_team_size)?;

    let mut tx = state.db_pool.begin_txn().await?;
    let team = TeamMutator::new(&mut tx)
        .create(&input.team_name, roster.total)
        .await?;
    let mut participants = Vec::with_capacity(input.participants.len());
    for (p, role) in input.participants.iter().zip(roster.roles) {
        let entry = TeamMutator::new(&mut tx)
            .add_participant(team.id, role, p)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::rejected(
                        "participants",
                        "Participant emails must be unique within a team.",
                    )
                } else {
                    e
                }
            })?;
        participants.push(entry);
    }
    tx.commit().await?;
    tracing::info!(
        "registered team {} with {} participant(s)",
        team.id,
        participants.len()
    );

    export(state, &team, &participants).await;
    announce(
        &*state.notifier,
        &HackathonNotice {
            team: &team,
            participants: &participants,
        },
    )
    .await;
    Ok(Registration { team, participants })
}

/// Appends the roster to the spreadsheet, recording the team in the backlog
/// when that fails.
async fn export(state: &AppState, team: &TeamEntry, participants: &[ParticipantEntry]) {
    let Err(e) = state.sheets.append_rows(team_rows(team, participants)).await else {
        tracing::debug!("exported team {} to the spreadsheet", team.id);
        return;
    };
    tracing::warn!("spreadsheet export of team {} failed: {}", team.id, e);
    let recorded: Result<()> = async {
        let mut conn = state.db_pool.acquire().await?;
        BacklogMutator::new(&mut conn)
            .record(team.id, &e.to_string())
            .await
    }
    .await;
    if let Err(e) = recorded {
        tracing::error!("could not record team {} in the sheet backlog: {}", team.id, e);
    }
}

pub async fn list(state: &AppState) -> Result<Vec<Registration>> {
    let mut conn = state.db_pool.acquire().await?;
    let mut selector = TeamSelector::new(&mut conn);
    let teams = selector.get_all().await?;
    let mut rosters: HashMap<i64, Vec<ParticipantEntry>> = HashMap::new();
    for p in selector.all_participants().await? {
        rosters.entry(p.team_id).or_default().push(p);
    }
    Ok(teams
        .into_iter()
        .map(|team| Registration {
            participants: rosters.remove(&team.id).unwrap_or_default(),
            team,
        })
        .collect())
}

pub async fn delete(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    if !TeamMutator::new(&mut tx).delete(id).await? {
        return Err(AppError::NotFound("team"));
    }
    tx.commit().await?;
    Ok(())
}

/// Retries the spreadsheet export of every team in the backlog.
pub async fn replay_backlog(state: &AppState) -> Result<ReplayOutcome> {
    let mut conn = state.db_pool.acquire().await?;
    let backlog = BacklogSelector::new(&mut conn).get_all().await?;
    let mut outcome = ReplayOutcome::default();
    for entry in backlog {
        let mut selector = TeamSelector::new(&mut conn);
        let Some(team) = selector.get_by_id(entry.team_id).await? else {
            BacklogMutator::new(&mut conn).clear(entry.team_id).await?;
            continue;
        };
        let participants = selector.participants_of(team.id).await?;
        match state.sheets.append_rows(team_rows(&team, &participants)).await {
            Ok(()) => {
                BacklogMutator::new(&mut conn).clear(team.id).await?;
                outcome.replayed += 1;
            }
            Err(e) => {
                tracing::warn!(
                    "replay of team {} failed after {} attempt(s): {}",
                    team.id,
                    entry.attempts,
                    e
                );
                BacklogMutator::new(&mut conn)
                    .record(team.id, &e.to_string())
                    .await?;
                outcome.pending += 1;
            }
        }
    }
    Ok(outcome)
}
