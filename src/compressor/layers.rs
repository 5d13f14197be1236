use crate::document::Layer;
use crate::model::{LayerId, UserId};
use std::collections::HashSet;

/// Utilisateurs distincts dans l'ordre de première apparition (index 0..167).
pub(super) fn distinct_users(hours: &[Option<UserId>]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    hours
        .iter()
        .flatten()
        .filter(|user| seen.insert(*user))
        .cloned()
        .collect()
}

/// Reporte les identifiants de couches existantes par position.
///
/// Les identifiants en surplus reçoivent une copie complète de la première
/// couche : PagerDuty exige que chaque couche existante figure dans la mise à jour.
pub(super) fn attach_layer_ids(mut layers: Vec<Layer>, existing: &[LayerId]) -> Vec<Layer> {
    for (layer, id) in layers.iter_mut().zip(existing) {
        layer.id = Some(id.clone());
    }

    let used = layers.len();
    if existing.len() > used {
        if let Some(first) = layers.first().cloned() {
            layers.extend(existing[used..].iter().map(|id| Layer {
                id: Some(id.clone()),
                ..first.clone()
            }));
        }
    }

    layers
}
