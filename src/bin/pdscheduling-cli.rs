#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use pdscheduling::{
    client::{ClientConfig, PagerDuty, RemoteSchedule, DEFAULT_BASE_URL},
    compress, io,
    model::{LayerId, ScheduleId},
};
use clap::{Parser, Subcommand};
use std::time::Duration;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de publication de grilles d'astreinte sur PagerDuty
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Jeton d'API PagerDuty
    #[arg(long, global = true, env = "PAGERDUTY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// URL de base de l'API
    #[arg(long, global = true, env = "PAGERDUTY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Délai maximal par requête (secondes)
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer le document PagerDuty sans appel réseau
    Render {
        #[arg(long)]
        name: String,
        /// Grille CSV (day,00..23) ou JSON (168 valeurs)
        #[arg(long)]
        hours: String,
        #[arg(long)]
        schedule_id: Option<String>,
        /// Couches existantes, dans l'ordre (répétable)
        #[arg(long = "layer-id")]
        layer_ids: Vec<String>,
        /// Fichier de sortie JSON (stdout sinon)
        #[arg(long)]
        out: Option<String>,
    },

    /// Lister les utilisateurs
    Users,

    /// Lister les plannings (optionnellement filtrés)
    Schedules {
        #[arg(long, default_value = "")]
        query: String,
    },

    /// Afficher un planning et ses couches
    Show {
        #[arg(long)]
        schedule_id: String,
    },

    /// Créer un planning
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        hours: String,
    },

    /// Mettre à jour un planning existant en place
    Update {
        #[arg(long)]
        schedule_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        hours: String,
    },

    /// Créer ou mettre à jour le planning portant ce nom
    Upsert {
        #[arg(long)]
        name: String,
        #[arg(long)]
        hours: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    match cli.cmd {
        Commands::Render {
            ref name,
            ref hours,
            ref schedule_id,
            ref layer_ids,
            ref out,
        } => {
            let grid = io::load_hours(hours)?;
            let layer_ids: Vec<LayerId> = layer_ids.iter().map(LayerId::new).collect();
            let schedule_id = schedule_id.as_ref().map(ScheduleId::new);
            let document = compress(name, grid.as_slice(), &layer_ids, schedule_id.as_ref())?;
            match out {
                Some(path) => io::export_document_json(path, &document)?,
                None => println!("{}", serde_json::to_string_pretty(&document)?),
            }
        }
        Commands::Users => {
            for user in connect(&cli)?.get_users()? {
                let teams: Vec<&str> = user
                    .teams
                    .iter()
                    .map(|t| t.summary.as_deref().unwrap_or(t.id.as_str()))
                    .collect();
                println!(
                    "{} | {} | {} | {}",
                    user.id.as_str(),
                    user.name.as_deref().unwrap_or("-"),
                    user.email.as_deref().unwrap_or("-"),
                    teams.join(",")
                );
            }
        }
        Commands::Schedules { ref query } => {
            for schedule in connect(&cli)?.schedules(query)? {
                println!(
                    "{} | {}",
                    schedule.id.as_str(),
                    schedule.name.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Show { ref schedule_id } => {
            let schedule = connect(&cli)?.get_schedule(&ScheduleId::new(schedule_id))?;
            print_schedule(&schedule);
            for layer in &schedule.schedule_layers {
                println!(
                    "  layer {} | {}",
                    layer.id.as_str(),
                    layer.name.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Create {
            ref name,
            ref hours,
        } => {
            let grid = io::load_hours(hours)?;
            let created = connect(&cli)?.create_schedule(name, grid.as_slice())?;
            print_schedule(&created);
        }
        Commands::Update {
            ref schedule_id,
            ref name,
            ref hours,
        } => {
            let grid = io::load_hours(hours)?;
            let updated = connect(&cli)?.update_schedule(
                &ScheduleId::new(schedule_id),
                name,
                grid.as_slice(),
            )?;
            print_schedule(&updated);
        }
        Commands::Upsert {
            ref name,
            ref hours,
        } => {
            let grid = io::load_hours(hours)?;
            let schedule = connect(&cli)?.create_or_update_schedule(name, grid.as_slice())?;
            print_schedule(&schedule);
        }
    }

    Ok(())
}

fn connect(cli: &Cli) -> Result<PagerDuty> {
    let token = cli
        .token
        .clone()
        .context("missing PagerDuty token (--token or PAGERDUTY_TOKEN)")?;
    let mut config = ClientConfig::new(token);
    config.base_url = cli.base_url.clone();
    config.timeout = Duration::from_secs(cli.timeout_secs);
    Ok(PagerDuty::connect(&config)?)
}

fn print_schedule(schedule: &RemoteSchedule) {
    println!(
        "{} | {} | {} layer(s)",
        schedule.id.as_str(),
        schedule.name.as_deref().unwrap_or("-"),
        schedule.schedule_layers.len()
    );
}
