use crate::{
    pkg::internal::adaptors::hackathon::spec::{ParticipantEntry, Role, TeamEntry},
    prelude::Result,
};

pub mod google;

#[async_trait::async_trait]
pub trait SheetAppender: Send + Sync {
    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<()>;
}

/// One roster row per participant, leader first, members in the order they
/// were submitted.
pub fn team_rows(team: &TeamEntry, participants: &[ParticipantEntry]) -> Vec<Vec<String>> {
    let created = team.created_at.format("%Y-%m-%d %H:%M").to_string();
    let leaders = participants.iter().filter(|p| p.role == Role::Leader);
    let members = participants.iter().filter(|p| p.role == Role::Member);
    leaders
        .chain(members)
        .map(|p| {
            vec![
                team.team_name.clone(),
                p.role.as_str().to_string(),
                p.full_name.clone(),
                p.email.clone(),
                p.phone.clone(),
                p.branch.clone(),
                p.section.clone(),
                p.year.clone(),
                team.total_participants.to_string(),
                created.clone(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_rows_put_leader_first() {
        let team = TeamEntry {
            id: 7,
            team_name: "Segfault".into(),
            total_participants: 2,
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
        };
        let member = ParticipantEntry {
            id: 1,
            team_id: 7,
            role: Role::Member,
            full_name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: "1".into(),
            branch: "ECE".into(),
            section: "B".into(),
            year: "2".into(),
        };
        let leader = ParticipantEntry {
            id: 2,
            role: Role::Leader,
            full_name: "Asha".into(),
            email: "asha@example.com".into(),
            ..member.clone()
        };
        let rows = team_rows(&team, &[member, leader]);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![
                "Segfault",
                "LEADER",
                "Asha",
                "asha@example.com",
                "1",
                "ECE",
                "B",
                "2",
                "2",
                "2025-03-14 09:26"
            ]
        );
        assert_eq!(rows[1][1], "MEMBER");
    }
}
