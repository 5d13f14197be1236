use crate::model::{LayerId, ScheduleId, UserId};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Date de départ fixe des couches et de leur rotation.
pub const ROTATION_EPOCH: &str = "2015-11-06T20:00:00-05:00";
/// Une rotation dure une semaine.
pub const ROTATION_TURN_LENGTH_SECONDS: u32 = 604_800;
pub const SCHEDULE_TIME_ZONE: &str = "UTC";
pub const SCHEDULE_DESCRIPTION: &str = "Automatically created by PDScheduling";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    WeeklyRestriction,
}

/// Bloc hebdomadaire récurrent pendant lequel la couche est active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    #[serde(rename = "type")]
    pub kind: RestrictionKind,
    /// 1 = lundi … 7 = dimanche
    pub start_day_of_week: u8,
    pub start_time_of_day: NaiveTime,
    pub duration_seconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReference {
    pub id: UserId,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerUser {
    pub user: UserReference,
}

/// Couche de planning : un seul utilisateur, rotation hebdomadaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Absent = la couche sera créée côté PagerDuty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LayerId>,
    pub start: String,
    pub users: Vec<LayerUser>,
    pub rotation_turn_length_seconds: u32,
    pub rotation_virtual_start: String,
    pub restrictions: Vec<Restriction>,
}

impl Layer {
    pub fn for_user(user: UserId, restrictions: Vec<Restriction>) -> Self {
        Self {
            id: None,
            start: ROTATION_EPOCH.to_string(),
            users: vec![LayerUser {
                user: UserReference {
                    id: user,
                    kind: ReferenceKind::User,
                },
            }],
            rotation_turn_length_seconds: ROTATION_TURN_LENGTH_SECONDS,
            rotation_virtual_start: ROTATION_EPOCH.to_string(),
            restrictions,
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.users.first().map(|u| &u.user.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    pub time_zone: String,
    pub description: String,
    pub schedule_layers: Vec<Layer>,
}

/// Charge utile envoyée à PagerDuty : `{"schedule": {...}, "id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub schedule: Schedule,
    /// Présent = mise à jour d'un planning existant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ScheduleId>,
}

impl ScheduleDocument {
    pub fn new(name: &str, schedule_layers: Vec<Layer>, id: Option<ScheduleId>) -> Self {
        Self {
            schedule: Schedule {
                name: name.to_string(),
                kind: ScheduleKind::Schedule,
                time_zone: SCHEDULE_TIME_ZONE.to_string(),
                description: SCHEDULE_DESCRIPTION.to_string(),
                schedule_layers,
            },
            id,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.schedule.schedule_layers
    }
}
