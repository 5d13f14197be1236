use super::{MAX_BLOCK_HOURS, MAX_RESTRICTIONS_PER_LAYER};
use crate::document::{Restriction, RestrictionKind};
use crate::error::ValidationError;
use crate::model::{UserId, HOURS_PER_DAY};
use chrono::NaiveTime;

/// Longueur du bloc de valeurs identiques en tête de `slots`, plafonnée à 24.
pub fn consecutive_hours<T: PartialEq>(slots: &[T]) -> usize {
    let Some(first) = slots.first() else {
        return 0;
    };
    slots
        .iter()
        .take(MAX_BLOCK_HOURS)
        .take_while(|slot| *slot == first)
        .count()
}

/// Parcourt la copie de travail et émet les restrictions de `user`.
///
/// La dernière heure de chaque bloc émis est libérée dans `working` : un bloc
/// plafonné à 24h est ainsi suivi d'un nouveau bloc au lieu d'être prolongé.
pub(super) fn user_restrictions(
    working: &mut [Option<UserId>],
    user: &UserId,
) -> Result<Vec<Restriction>, ValidationError> {
    let mut out = Vec::new();

    for idx in 0..working.len() {
        if working[idx].as_ref() != Some(user) {
            continue;
        }
        if idx > 0 && working[idx - 1].as_ref() == Some(user) {
            continue;
        }

        let run = consecutive_hours(&working[idx..]);
        out.push(restriction_at(idx, run));
        working[idx + run - 1] = None;
    }

    if out.len() >= MAX_RESTRICTIONS_PER_LAYER {
        return Err(ValidationError::TooManyRestrictions {
            user: user.as_str().to_string(),
            count: out.len(),
        });
    }
    Ok(out)
}

fn restriction_at(idx: usize, run: usize) -> Restriction {
    let day = idx / HOURS_PER_DAY;
    let hour = idx % HOURS_PER_DAY;
    Restriction {
        kind: RestrictionKind::WeeklyRestriction,
        start_day_of_week: (day + 1) as u8,
        start_time_of_day: NaiveTime::from_hms_opt(hour as u32, 0, 0).unwrap_or_default(),
        duration_seconds: (run * 3600) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: &[(usize, &str)]) -> Vec<Option<UserId>> {
        let mut g = vec![None; 168];
        for (idx, user) in cells {
            g[*idx] = Some(UserId::new(user));
        }
        g
    }

    #[test]
    fn consecutive_hours_stops_on_change() {
        assert_eq!(consecutive_hours(&["a"]), 1);
        assert_eq!(consecutive_hours(&["a", "b"]), 1);
        assert_eq!(consecutive_hours(&["a", "a", "b", "a"]), 2);
        assert_eq!(consecutive_hours::<&str>(&[]), 0);
    }

    #[test]
    fn consecutive_hours_caps_at_a_day() {
        assert_eq!(consecutive_hours(&["a"; 30]), 24);
    }

    #[test]
    fn run_longer_than_a_day_is_split() {
        let cells: Vec<(usize, &str)> = (10..40).map(|i| (i, "u")).collect();
        let mut working = grid(&cells);
        let out = user_restrictions(&mut working, &UserId::new("u")).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].start_day_of_week, 1);
        assert_eq!(out[0].start_time_of_day, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(out[0].duration_seconds, 86_400);
        assert_eq!(out[1].start_day_of_week, 2);
        assert_eq!(out[1].start_time_of_day, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(out[1].duration_seconds, 6 * 3600);
    }

    #[test]
    fn last_hour_of_each_run_is_cleared() {
        let mut working = grid(&[(0, "u"), (1, "u"), (5, "u")]);
        user_restrictions(&mut working, &UserId::new("u")).unwrap();
        assert_eq!(working[0], Some(UserId::new("u")));
        assert_eq!(working[1], None);
        assert_eq!(working[5], None);
    }

    #[test]
    fn alternating_week_stays_under_the_limit() {
        let cells: Vec<(usize, &str)> = (0..84).map(|i| (i * 2, "u")).collect();
        let mut working = grid(&cells);
        let out = user_restrictions(&mut working, &UserId::new("u")).unwrap();
        assert_eq!(out.len(), 84);
        assert!(out.iter().all(|r| r.duration_seconds == 3600));
    }

    #[test]
    fn ninety_blocks_is_rejected() {
        let mut working: Vec<Option<UserId>> = (0..180)
            .map(|i| (i % 2 == 0).then(|| UserId::new("u")))
            .collect();
        let err = user_restrictions(&mut working, &UserId::new("u")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooManyRestrictions {
                user: "u".into(),
                count: 90
            }
        );
    }
}
