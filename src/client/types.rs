use crate::model::{LayerId, ScheduleId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    #[serde(default, alias = "name")]
    pub summary: Option<String>,
}

/// Utilisateur PagerDuty (avec ses équipes, `include[]=teams`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub teams: Vec<TeamRef>,
}

/// Entrée de la liste `/schedules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub id: ScheduleId,
    #[serde(default, alias = "summary")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLayer {
    pub id: LayerId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Planning tel que renvoyé par PagerDuty (champs utiles seulement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSchedule {
    pub id: ScheduleId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub schedule_layers: Vec<RemoteLayer>,
}

impl RemoteSchedule {
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.schedule_layers.iter().map(|l| l.id.clone()).collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ScheduleEnvelope {
    pub schedule: RemoteSchedule,
}

#[derive(Debug, Deserialize)]
pub(super) struct UsersPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub more: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct SchedulesPage {
    #[serde(default)]
    pub schedules: Vec<ScheduleSummary>,
    #[serde(default)]
    pub more: bool,
}
