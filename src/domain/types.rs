//! Club vocabularies shared by filters and form choice lists.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Tech,
    Executive,
    Documentation,
    Production,
    Leads,
    General,
}

impl Team {
    pub const NAMES: &'static [&'static str] = &[
        "Tech",
        "Executive",
        "Documentation",
        "Production",
        "Leads",
        "General",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Tech => "Tech",
            Team::Executive => "Executive",
            Team::Documentation => "Documentation",
            Team::Production => "Production",
            Team::Leads => "Leads",
            Team::General => "General",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Team Lead")]
    TeamLead,
    #[serde(rename = "Co-Lead")]
    CoLead,
    Member,
    #[serde(rename = "Senior Member")]
    SeniorMember,
    #[serde(rename = "Junior Member")]
    JuniorMember,
    Coordinator,
}

impl Position {
    pub const NAMES: &'static [&'static str] = &[
        "Team Lead",
        "Co-Lead",
        "Member",
        "Senior Member",
        "Junior Member",
        "Coordinator",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TeamLead => "Team Lead",
            Position::CoLead => "Co-Lead",
            Position::Member => "Member",
            Position::SeniorMember => "Senior Member",
            Position::JuniorMember => "Junior Member",
            Position::Coordinator => "Coordinator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl ExperienceLevel {
    pub const NAMES: &'static [&'static str] =
        &["beginner", "intermediate", "advanced", "professional"];

    pub const fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
            ExperienceLevel::Professional => "professional",
        }
    }
}

/// Activation filter on the member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Unknown roles from the backend never grant admin rights.
    pub fn from_wire(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Member
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_tables_match_wire_names() {
        let teams = [
            Team::Tech,
            Team::Executive,
            Team::Documentation,
            Team::Production,
            Team::Leads,
            Team::General,
        ];
        for (team, name) in teams.iter().zip(Team::NAMES) {
            assert_eq!(team.as_str(), *name);
            assert_eq!(
                serde_json::to_string(team).expect("encode team"),
                format!("\"{name}\"")
            );
        }
        assert_eq!(
            serde_json::to_string(&Position::SeniorMember).expect("encode position"),
            "\"Senior Member\""
        );
        assert_eq!(ExperienceLevel::Professional.as_str(), ExperienceLevel::NAMES[3]);
    }

    #[test]
    fn only_admin_role_is_privileged() {
        assert_eq!(Role::from_wire("Admin"), Role::Admin);
        assert_eq!(Role::from_wire("moderator"), Role::Member);
    }
}
