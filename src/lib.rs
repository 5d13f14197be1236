#![forbid(unsafe_code)]
//! PDScheduling : publication d'une grille d'astreinte hebdomadaire sur PagerDuty.
//!
//! - Grille 7x24 (au plus une personne par heure), tout en UTC.
//! - Compression en couches : un utilisateur = une couche, blocs de 24h max.
//! - Création / mise à jour en place des plannings via l'API REST.

pub mod client;
pub mod compressor;
pub mod document;
pub mod error;
pub mod io;
pub mod model;

pub use client::{ClientConfig, HttpTransport, PagerDuty, RemoteSchedule, Transport, User};
pub use compressor::{compress, consecutive_hours};
pub use document::{Layer, Restriction, Schedule, ScheduleDocument};
pub use error::{NetworkError, PdError, ValidationError};
pub use io::{export_document_json, import_hours_csv, import_hours_json, load_hours};
pub use model::{HourGrid, LayerId, ScheduleId, UserId, HOURS_PER_WEEK};
