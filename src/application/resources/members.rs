//! Member roster. Only role assignments are edited through the form; the
//! active flag is toggled through a separate `status` action.

use lensclub_api_types::{MemberRecord, MemberStatusRequest, RecordId};
use serde_json::Value;

use crate::application::error::ApiError;
use crate::application::fields::{FieldKind, FieldSchema, FieldSpec};
use crate::application::gateway::Resource;
use crate::domain::types::{ExperienceLevel, Position, Team};

pub struct Members;

pub const FILTER_SEARCH: &str = "search";
pub const FILTER_TEAM: &str = "team";
pub const FILTER_POSITION: &str = "position";
pub const FILTER_STATUS: &str = "status";

pub const STATUS_ACTION: &str = "status";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemberRoleField {
    Team,
    Position,
    ExperienceLevel,
}

impl FieldSchema for MemberRoleField {
    const ALL: &'static [Self] = &[
        MemberRoleField::Team,
        MemberRoleField::Position,
        MemberRoleField::ExperienceLevel,
    ];

    fn spec(self) -> FieldSpec {
        match self {
            MemberRoleField::Team => {
                FieldSpec::new("team", "team", FieldKind::Choice(Team::NAMES))
            }
            MemberRoleField::Position => {
                FieldSpec::new("position", "position", FieldKind::Choice(Position::NAMES))
            }
            MemberRoleField::ExperienceLevel => FieldSpec::new(
                "experienceLevel",
                "experience_level",
                FieldKind::Choice(ExperienceLevel::NAMES),
            )
            .load_default(ExperienceLevel::Beginner.as_str()),
        }
    }
}

impl Resource for Members {
    type Item = MemberRecord;
    type Field = MemberRoleField;

    const PATH: &'static str = "admin/members";
    const ITEMS_KEY: &'static str = "members";

    fn id_of(item: &MemberRecord) -> RecordId {
        item.id.clone()
    }

    fn update_path(id: &RecordId) -> String {
        format!("{}/{id}/role", Self::PATH)
    }
}

/// Body flipping a member's active flag.
pub fn status_toggle(member: &MemberRecord) -> Result<Value, ApiError> {
    status_body(!member.is_active)
}

pub fn status_body(is_active: bool) -> Result<Value, ApiError> {
    serde_json::to_value(MemberStatusRequest { is_active }).map_err(ApiError::decode)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::form::CrudFormBinder;

    fn member() -> MemberRecord {
        MemberRecord {
            id: RecordId::Int(5),
            username: "aperture".into(),
            name: Some("Ada".into()),
            email: Some("ada@example.org".into()),
            team: Some("Tech".into()),
            position: None,
            experience_level: Some("advanced".into()),
            profile_photo_url: None,
            is_active: true,
        }
    }

    #[test]
    fn role_updates_go_to_role_endpoint() {
        assert_eq!(
            Members::update_path(&RecordId::Int(5)),
            "admin/members/5/role"
        );
        assert_eq!(Members::item_path(&RecordId::Int(5)), "admin/members/5");
    }

    #[test]
    fn role_form_sends_snake_case_and_null_for_unset() {
        let mut form = CrudFormBinder::<Members>::new();
        form.load(&member()).expect("load");
        assert_eq!(form.value(MemberRoleField::ExperienceLevel), Some("advanced"));

        let request = form.begin_submit().expect("valid").expect("submittable");
        assert_eq!(
            serde_json::Value::Object(request.body),
            json!({"team": "Tech", "position": null, "experience_level": "advanced"})
        );
    }

    #[test]
    fn unknown_team_is_rejected_locally() {
        let mut form = CrudFormBinder::<Members>::new();
        form.load(&member()).expect("load");
        form.set_field(MemberRoleField::Team, "Marketing");
        let err = form.begin_submit().expect_err("invalid team");
        assert!(matches!(err, ApiError::Validation(ref v) if v.has_issue("team")));
    }

    #[test]
    fn unlisted_team_survives_unchanged_submit() {
        let mut form = CrudFormBinder::<Members>::new();
        let stored = MemberRecord {
            team: Some("Marketing".into()),
            ..member()
        };
        form.load(&stored).expect("load");

        let request = form.begin_submit().expect("unchanged form").expect("submittable");
        assert_eq!(request.body.get("team"), Some(&json!("Marketing")));

        form.finish_submit(Err(ApiError::transport("connection reset")));
        form.set_field(MemberRoleField::Position, "Member");
        let request = form.begin_submit().expect("other field edited").expect("submittable");
        assert_eq!(request.body.get("team"), Some(&json!("Marketing")));
        assert_eq!(request.body.get("position"), Some(&json!("Member")));
    }

    #[test]
    fn missing_experience_level_loads_as_beginner() {
        let mut form = CrudFormBinder::<Members>::new();
        let stored = MemberRecord {
            experience_level: None,
            ..member()
        };
        form.load(&stored).expect("load");
        assert_eq!(form.value(MemberRoleField::ExperienceLevel), Some("beginner"));

        let request = form.begin_submit().expect("valid").expect("submittable");
        assert_eq!(request.body.get("experience_level"), Some(&json!("beginner")));
    }

    #[test]
    fn status_toggle_flips_flag() {
        assert_eq!(
            status_toggle(&member()).expect("body"),
            json!({"isActive": false})
        );
    }
}
