//! Compression d'une grille 7x24 en couches PagerDuty.
//!
//! Chaque utilisateur distinct obtient une couche ; chaque bloc contigu
//! d'heures devient une restriction hebdomadaire d'au plus 24h.

mod layers;
mod runs;

pub use runs::consecutive_hours;

use crate::document::{Layer, ScheduleDocument};
use crate::error::ValidationError;
use crate::model::{LayerId, ScheduleId, UserId, HOURS_PER_WEEK};

/// Durée maximale d'une restriction PagerDuty, en heures.
pub const MAX_BLOCK_HOURS: usize = 24;
/// PagerDuty refuse une couche à partir de ce nombre de restrictions.
pub const MAX_RESTRICTIONS_PER_LAYER: usize = 90;

/// Construit le document de planning pour `hours`.
///
/// `existing_layer_ids` est repris par position dans l'ordre de première
/// apparition des utilisateurs ; `schedule_id` marque une mise à jour.
/// La grille de l'appelant n'est jamais modifiée.
pub fn compress(
    name: &str,
    hours: &[Option<UserId>],
    existing_layer_ids: &[LayerId],
    schedule_id: Option<&ScheduleId>,
) -> Result<ScheduleDocument, ValidationError> {
    if hours.len() != HOURS_PER_WEEK {
        return Err(ValidationError::GridLength {
            expected: HOURS_PER_WEEK,
            actual: hours.len(),
        });
    }

    // un identifiant vide équivaut à un créneau libre
    let mut working: Vec<Option<UserId>> = hours
        .iter()
        .map(|slot| slot.clone().filter(|user| !user.as_str().is_empty()))
        .collect();

    let users = layers::distinct_users(&working);
    if users.is_empty() {
        return Err(ValidationError::NoAssignedUsers);
    }

    let mut built = Vec::with_capacity(users.len().max(existing_layer_ids.len()));
    for user in users {
        let restrictions = runs::user_restrictions(&mut working, &user)?;
        built.push(Layer::for_user(user, restrictions));
    }

    let schedule_layers = layers::attach_layer_ids(built, existing_layer_ids);
    Ok(ScheduleDocument::new(name, schedule_layers, schedule_id.cloned()))
}
