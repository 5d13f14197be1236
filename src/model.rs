use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Nombre de jours couverts par une grille.
pub const DAYS_PER_WEEK: usize = 7;
/// Nombre de créneaux horaires par jour.
pub const HOURS_PER_DAY: usize = 24;
/// Taille d'une grille hebdomadaire (7 x 24).
pub const HOURS_PER_WEEK: usize = DAYS_PER_WEEK * HOURS_PER_DAY;

/// Identifiant fort pour un utilisateur PagerDuty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifiant fort pour une couche (layer) de planning
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour un planning
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(String);

impl ScheduleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Grille hebdomadaire : index = jour * 24 + heure, lundi en premier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<UserId>>", into = "Vec<Option<UserId>>")]
pub struct HourGrid(Vec<Option<UserId>>);

impl HourGrid {
    /// Valide que la grille contient exactement 168 créneaux.
    pub fn new(slots: Vec<Option<UserId>>) -> Result<Self, ValidationError> {
        if slots.len() != HOURS_PER_WEEK {
            return Err(ValidationError::GridLength {
                expected: HOURS_PER_WEEK,
                actual: slots.len(),
            });
        }
        Ok(Self(slots))
    }

    /// Grille sans aucune assignation.
    pub fn empty() -> Self {
        Self(vec![None; HOURS_PER_WEEK])
    }

    /// Grille entièrement assignée à une seule personne.
    pub fn filled(user: UserId) -> Self {
        Self(vec![Some(user); HOURS_PER_WEEK])
    }

    pub fn get(&self, day: usize, hour: usize) -> Option<&UserId> {
        self.0.get(slot_index(day, hour)?)?.as_ref()
    }

    /// Assigne (ou libère avec `None`) un créneau. Retourne `false` hors bornes.
    pub fn set(&mut self, day: usize, hour: usize, user: Option<UserId>) -> bool {
        match slot_index(day, hour) {
            Some(idx) => {
                self.0[idx] = user;
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[Option<UserId>] {
        &self.0
    }
}

impl TryFrom<Vec<Option<UserId>>> for HourGrid {
    type Error = ValidationError;

    fn try_from(slots: Vec<Option<UserId>>) -> Result<Self, Self::Error> {
        Self::new(slots)
    }
}

impl From<HourGrid> for Vec<Option<UserId>> {
    fn from(grid: HourGrid) -> Self {
        grid.0
    }
}

fn slot_index(day: usize, hour: usize) -> Option<usize> {
    (day < DAYS_PER_WEEK && hour < HOURS_PER_DAY).then_some(day * HOURS_PER_DAY + hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_rejects_wrong_length() {
        let err = HourGrid::new(vec![None; 167]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::GridLength {
                expected: 168,
                actual: 167
            }
        );
    }

    #[test]
    fn set_and_get_address_day_major() {
        let mut grid = HourGrid::empty();
        assert!(grid.set(1, 5, Some(UserId::new("u"))));
        assert_eq!(grid.as_slice()[29], Some(UserId::new("u")));
        assert_eq!(grid.get(1, 5), Some(&UserId::new("u")));
        assert!(!grid.set(7, 0, None));
        assert!(!grid.set(0, 24, None));
    }
}
