//! Command-line surface for `lensclub-admin`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lensclub::config::ClientOverrides;
use lensclub::domain::types::{ExperienceLevel, MemberStatus, Position, Team};

#[derive(Parser, Debug)]
#[command(name = "lensclub-admin", version, about = "Photography club admin CLI", long_about = None)]
pub struct Cli {
    /// Settings file layered over `config/default` and `lensclub.*`
    #[arg(long, env = "LENSCLUB_CONFIG_FILE", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ClientOverrides,

    /// Path to file containing the API token (takes precedence over env)
    #[arg(long, env = "LENSCLUB_API_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// API token from env (no CLI flag, keeps tokens out of shell history)
    #[arg(hide = true, env = "LENSCLUB_API_TOKEN")]
    pub api_token_env: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Gallery photos
    Gallery(GalleryArgs),
    /// Member roster, roles and activation
    Members(MembersArgs),
    /// Club events
    Events(EventsArgs),
    /// Submit a membership application (no token needed)
    Apply(ApplyArgs),
}

impl Commands {
    /// Whether the command needs an admin session.
    #[must_use]
    pub fn requires_admin(&self) -> bool {
        !matches!(self, Commands::Apply(_))
    }
}

#[derive(Parser, Debug)]
pub struct GalleryArgs {
    #[command(subcommand)]
    pub action: GalleryCmd,
}

#[derive(Subcommand, Debug)]
pub enum GalleryCmd {
    /// List one page of photos
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a photo
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        description_file: Option<PathBuf>,
        /// Linked event id; leave out for none
        #[arg(long)]
        event_id: Option<String>,
        /// Uploader id; leave out for none
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Edit a photo; omitted flags keep the stored value, "" clears
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        description_file: Option<PathBuf>,
        #[arg(long)]
        event_id: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Delete a photo
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct MembersArgs {
    #[command(subcommand)]
    pub action: MembersCmd,
}

#[derive(Subcommand, Debug)]
pub enum MembersCmd {
    /// List members with optional filters
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Matches name, username or email
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        team: Option<TeamArg>,
        #[arg(long)]
        position: Option<PositionArg>,
        #[arg(long)]
        status: Option<StatusArg>,
    },
    /// Change team, position or experience level
    SetRole {
        #[arg(long)]
        id: String,
        #[arg(long)]
        team: Option<TeamArg>,
        #[arg(long)]
        position: Option<PositionArg>,
        #[arg(long)]
        experience_level: Option<ExperienceArg>,
    },
    /// Activate or deactivate a member
    SetStatus {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: StatusArg,
    },
    /// Flip a member between active and inactive
    ToggleStatus {
        #[arg(long)]
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub action: EventsCmd,
}

#[derive(Subcommand, Debug)]
pub enum EventsCmd {
    /// List one page of events
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Create an event; location defaults to TBA and date to now
    Create {
        #[arg(long)]
        custom_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        subtitle: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        description_file: Option<PathBuf>,
        /// RFC 3339 timestamp
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        register_link: String,
    },
    /// Edit an event; omitted flags keep the stored value
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        custom_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        description_file: Option<PathBuf>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        register_link: Option<String>,
    },
    /// Delete an event
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    /// Programme and year, e.g. "BSc CS 2"
    #[arg(long)]
    pub prog_year: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub description_file: Option<PathBuf>,
    /// Path to file containing the password (takes precedence over env)
    #[arg(long, env = "LENSCLUB_APPLY_PASSWORD_FILE")]
    pub password_file: Option<PathBuf>,
    /// Password from env
    #[arg(hide = true, env = "LENSCLUB_APPLY_PASSWORD")]
    pub password_env: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TeamArg {
    Tech,
    Executive,
    Documentation,
    Production,
    Leads,
    General,
}

impl From<TeamArg> for Team {
    fn from(value: TeamArg) -> Self {
        match value {
            TeamArg::Tech => Team::Tech,
            TeamArg::Executive => Team::Executive,
            TeamArg::Documentation => Team::Documentation,
            TeamArg::Production => Team::Production,
            TeamArg::Leads => Team::Leads,
            TeamArg::General => Team::General,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PositionArg {
    TeamLead,
    CoLead,
    Member,
    SeniorMember,
    JuniorMember,
    Coordinator,
}

impl From<PositionArg> for Position {
    fn from(value: PositionArg) -> Self {
        match value {
            PositionArg::TeamLead => Position::TeamLead,
            PositionArg::CoLead => Position::CoLead,
            PositionArg::Member => Position::Member,
            PositionArg::SeniorMember => Position::SeniorMember,
            PositionArg::JuniorMember => Position::JuniorMember,
            PositionArg::Coordinator => Position::Coordinator,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExperienceArg {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl From<ExperienceArg> for ExperienceLevel {
    fn from(value: ExperienceArg) -> Self {
        match value {
            ExperienceArg::Beginner => ExperienceLevel::Beginner,
            ExperienceArg::Intermediate => ExperienceLevel::Intermediate,
            ExperienceArg::Advanced => ExperienceLevel::Advanced,
            ExperienceArg::Professional => ExperienceLevel::Professional,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for MemberStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Active => MemberStatus::Active,
            StatusArg::Inactive => MemberStatus::Inactive,
        }
    }
}
