//! Orchestration des appels PagerDuty autour de [`compress`].
//!
//! Le transport est abstrait derrière [`Transport`] ; [`HttpTransport`] est
//! l'implémentation reqwest utilisée par défaut.

mod transport;
mod types;

pub use transport::{ClientConfig, HttpTransport, Transport, DEFAULT_BASE_URL, PAGERDUTY_ACCEPT};
pub use types::{RemoteLayer, RemoteSchedule, ScheduleSummary, TeamRef, User};

use crate::compressor::compress;
use crate::error::PdError;
use crate::model::{ScheduleId, UserId};
use serde_json::Value;
use tracing::info;
use types::{ScheduleEnvelope, SchedulesPage, UsersPage};

/// Taille de page demandée à l'API.
pub const PAGE_LIMIT: usize = 100;

/// Client PagerDuty : lecture des utilisateurs/plannings, création et mise à jour.
#[derive(Debug, Clone)]
pub struct PagerDuty<T: Transport = HttpTransport> {
    transport: T,
}

impl PagerDuty<HttpTransport> {
    pub fn connect(config: &ClientConfig) -> Result<Self, PdError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> PagerDuty<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Tous les utilisateurs, équipes incluses (pagination suivie jusqu'au bout).
    pub fn get_users(&self) -> Result<Vec<User>, PdError> {
        let mut out: Vec<User> = Vec::new();
        loop {
            let query = vec![
                ("include[]", "teams".to_string()),
                ("limit", PAGE_LIMIT.to_string()),
                ("offset", out.len().to_string()),
            ];
            let page: UsersPage = serde_json::from_value(self.transport.get("/users", &query)?)?;
            let fetched = page.users.len();
            out.extend(page.users);
            if !page.more || fetched == 0 {
                break;
            }
        }
        Ok(out)
    }

    /// Tous les plannings, ou ceux correspondant à `query` (recherche PagerDuty).
    pub fn schedules(&self, query: &str) -> Result<Vec<ScheduleSummary>, PdError> {
        let mut out: Vec<ScheduleSummary> = Vec::new();
        loop {
            let params = vec![
                ("limit", PAGE_LIMIT.to_string()),
                ("query", query.to_string()),
                ("offset", out.len().to_string()),
            ];
            let page: SchedulesPage =
                serde_json::from_value(self.transport.get("/schedules", &params)?)?;
            let fetched = page.schedules.len();
            out.extend(page.schedules);
            if !page.more || fetched == 0 {
                break;
            }
        }
        Ok(out)
    }

    pub fn get_schedule(&self, schedule_id: &ScheduleId) -> Result<RemoteSchedule, PdError> {
        let path = schedule_path(schedule_id);
        decode_schedule(self.transport.get(&path, &[])?)
    }

    /// Crée un planning à partir d'une grille de 168 créneaux.
    pub fn create_schedule(
        &self,
        name: &str,
        hours: &[Option<UserId>],
    ) -> Result<RemoteSchedule, PdError> {
        let document = compress(name, hours, &[], None)?;
        let body = serde_json::to_value(&document)?;
        let created = decode_schedule(self.transport.post("/schedules", &body)?)?;
        info!(schedule = created.id.as_str(), name, "schedule created");
        Ok(created)
    }

    /// Met à jour un planning en place, en réutilisant ses couches existantes.
    pub fn update_schedule(
        &self,
        schedule_id: &ScheduleId,
        name: &str,
        hours: &[Option<UserId>],
    ) -> Result<RemoteSchedule, PdError> {
        let current = self.get_schedule(schedule_id)?;
        let layer_ids = current.layer_ids();

        let document = compress(name, hours, &layer_ids, Some(schedule_id))?;
        let body = serde_json::to_value(&document)?;
        let updated = decode_schedule(self.transport.put(&schedule_path(schedule_id), &body)?)?;
        info!(
            schedule = updated.id.as_str(),
            name,
            layers = document.layers().len(),
            "schedule updated"
        );
        Ok(updated)
    }

    /// Met à jour le planning nommé `name` s'il existe, sinon le crée.
    ///
    /// La recherche PagerDuty est partielle : seuls les noms identiques comptent.
    pub fn create_or_update_schedule(
        &self,
        name: &str,
        hours: &[Option<UserId>],
    ) -> Result<RemoteSchedule, PdError> {
        let mut found = self.schedules(name)?;
        found.retain(|s| s.name.as_deref() == Some(name));
        match found.as_slice() {
            [] => self.create_schedule(name, hours),
            [existing] => self.update_schedule(&existing.id, name, hours),
            _ => Err(PdError::AmbiguousSchedule {
                query: name.to_string(),
                found: found.len(),
            }),
        }
    }
}

fn decode_schedule(body: Value) -> Result<RemoteSchedule, PdError> {
    let envelope: ScheduleEnvelope = serde_json::from_value(body)?;
    Ok(envelope.schedule)
}

fn schedule_path(schedule_id: &ScheduleId) -> String {
    format!("/schedules/{}", schedule_id.as_str())
}
