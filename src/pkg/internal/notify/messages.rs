use std::fmt::{self, Display};

use super::{Announce, Channel};
use crate::pkg::internal::adaptors::{
    applications::spec::ApplicationEntry,
    contacts::spec::ContactEntry,
    hackathon::spec::{ParticipantEntry, Role, TeamEntry},
    inquiries::spec::InquiryEntry,
};

pub struct CareerNotice<'a>(pub &'a ApplicationEntry);

impl Display for CareerNotice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.0;
        write!(
            f,
            "Career Application\n\n\
             Job: {}\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             College: {}\n\
             CGPA: {}\n\
             Year: {}\n\
             Experience: {}\n\
             Skills: {}\n\n\
             Resume:\n{}",
            a.job_title,
            a.full_name,
            a.email,
            a.phone,
            a.college,
            a.cgpa,
            a.year_of_passing,
            a.experience,
            a.skills,
            a.resume_url.as_deref().unwrap_or("")
        )
    }
}

impl Announce for CareerNotice<'_> {
    fn channel(&self) -> Channel {
        Channel::Career
    }
}

pub struct ContactNotice<'a>(pub &'a ContactEntry);

impl Display for ContactNotice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        write!(
            f,
            "Contact Message\n\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Subject: {}\n\
             Message: {}",
            c.name, c.email, c.phone, c.subject, c.message
        )
    }
}

impl Announce for ContactNotice<'_> {
    fn channel(&self) -> Channel {
        Channel::Contact
    }
}

pub struct InquiryNotice<'a>(pub &'a InquiryEntry);

impl Display for InquiryNotice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let i = self.0;
        write!(
            f,
            "CPU Inquiry\n\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             CPU: {}\n\
             Quantity: {}\n\
             RAM: {}\n\
             Storage: {}\n\
             Message: {}",
            i.full_name, i.email, i.phone, i.cpu_model, i.quantity, i.ram, i.storage, i.message
        )
    }
}

impl Announce for InquiryNotice<'_> {
    fn channel(&self) -> Channel {
        Channel::Cpu
    }
}

pub struct HackathonNotice<'a> {
    pub team: &'a TeamEntry,
    pub participants: &'a [ParticipantEntry],
}

fn write_person(f: &mut fmt::Formatter<'_>, p: &ParticipantEntry) -> fmt::Result {
    write!(
        f,
        "Name: {}\nEmail: {}\nPhone: {}\nBranch: {}\nSection: {}\nYear: {}\n",
        p.full_name, p.email, p.phone, p.branch, p.section, p.year
    )
}

impl Display for HackathonNotice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hackathon Registration\n\nTeam Name: {}\nTotal Participants: {}\n\n",
            self.team.team_name, self.team.total_participants
        )?;
        if let Some(leader) = self.participants.iter().find(|p| p.role == Role::Leader) {
            f.write_str("Leader:\n")?;
            write_person(f, leader)?;
        }
        let members = self.participants.iter().filter(|p| p.role == Role::Member);
        for (i, member) in members.enumerate() {
            write!(f, "\nMember {}:\n", i + 1)?;
            write_person(f, member)?;
        }
        Ok(())
    }
}

impl Announce for HackathonNotice<'_> {
    fn channel(&self) -> Channel {
        Channel::Hackathon
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn participant(id: i64, role: Role, name: &str) -> ParticipantEntry {
        ParticipantEntry {
            id,
            team_id: 1,
            role,
            full_name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "9000000000".into(),
            branch: "CSE".into(),
            section: "A".into(),
            year: "3".into(),
        }
    }

    #[test]
    fn test_hackathon_notice_lists_leader_then_numbered_members() {
        let team = TeamEntry {
            id: 1,
            team_name: "Null Pointers".into(),
            total_participants: 3,
            created_at: Utc::now(),
        };
        let participants = vec![
            participant(1, Role::Leader, "Asha"),
            participant(2, Role::Member, "Ravi"),
            participant(3, Role::Member, "Meena"),
        ];
        let text = HackathonNotice {
            team: &team,
            participants: &participants,
        }
        .to_string();
        assert!(text.starts_with("Hackathon Registration\n\nTeam Name: Null Pointers\n"));
        let leader = text.find("Leader:\nName: Asha").expect("leader block");
        let first = text.find("Member 1:\nName: Ravi").expect("first member");
        let second = text.find("Member 2:\nName: Meena").expect("second member");
        assert!(leader < first && first < second);
    }

    #[test]
    fn test_contact_notice_layout() {
        let contact = ContactEntry {
            id: 4,
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "".into(),
            subject: "Workshop".into(),
            message: "When is the next one?".into(),
            created_at: Utc::now(),
        };
        assert_eq!(
            ContactNotice(&contact).to_string(),
            "Contact Message\n\nName: Asha\nEmail: asha@example.com\nPhone: \nSubject: Workshop\nMessage: When is the next one?"
        );
    }
}
