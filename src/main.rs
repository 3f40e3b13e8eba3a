use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

use sge_cite::config::Config;
use sge_cite::export::{self, ExportFormat};
use sge_cite::import::spawn_import;
use sge_cite::{generate, report, update, Action, AppState, Effect, Roster, View};

const SCHOOL: &str = "EES N°6 René Favaloro";

#[derive(Parser)]
#[command(name = "sge-cite")]
#[command(about = "Student academic records for SGE-CITE, backed by mock data", long_about = None)]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SessionArgs {
    /// Seed for reproducible rosters
    #[arg(long, global = true, env = "SGE_SEED")]
    seed: Option<u64>,
    /// Number of students in the initial roster
    #[arg(long, global = true, env = "SGE_ROSTER_SIZE", default_value_t = 150)]
    roster_size: usize,
    /// Simulated import processing time
    #[arg(long, global = true, env = "SGE_IMPORT_DELAY_MS", default_value_t = 2000)]
    import_delay_ms: u64,
}

impl From<SessionArgs> for Config {
    fn from(args: SessionArgs) -> Self {
        Config {
            roster_size: args.roster_size,
            import_delay: Duration::from_millis(args.import_delay_ms),
            seed: args.seed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a mock roster
    Generate {
        #[arg(long)]
        count: Option<usize>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print one student's record sheet
    Show { id: Uuid },
    /// Print dashboard indicators
    Summary,
    /// Generate a markdown report
    Report {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export the roster
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Simulate importing a roster file; its contents are never read
    Import {
        file: PathBuf,
        /// Run the import as the database view does, without a notice
        #[arg(long)]
        from_database: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from(cli.session);
    let mut rng = config.random_source();

    match cli.command {
        Commands::Generate { count, format, out } => {
            let students = generate(count.unwrap_or(config.roster_size), &mut rng);
            with_output(out.as_deref(), |writer| {
                export::write_roster(&students, format, writer)
                    .context("failed to write generated roster")
            })?;
        }
        Commands::Show { id } => {
            let roster = Roster::from(generate(config.roster_size, &mut rng));
            let Some(student) = roster.get(id) else {
                bail!("no student with id {id} in this roster (was it generated with the same --seed?)");
            };
            print!("{}", report::format_detail(student));
        }
        Commands::Summary => {
            let roster = Roster::from(generate(config.roster_size, &mut rng));
            let summary = report::summarize(&roster);
            println!("{}: {}", View::Dashboard.title(), View::Dashboard.subtitle());
            println!(
                "{} legajos, asistencia promedio {:.1}%",
                summary.total, summary.avg_attendance
            );
            println!(
                "Riesgo alto {}, medio {}, bajo {}",
                summary.risk.high, summary.risk.medium, summary.risk.low
            );
            let statuses = summary.statuses;
            println!(
                "Materias: {} aprobadas, {} en intensificación, {} recursando, {} pendientes, {} cursando",
                statuses.approved,
                statuses.in_remediation,
                statuses.must_repeat,
                statuses.pending,
                statuses.in_progress
            );
        }
        Commands::Report { limit, out } => {
            let roster = Roster::from(generate(config.roster_size, &mut rng));
            let report = report::build_report(&roster, SCHOOL, limit);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { format, out } => {
            let roster = Roster::from(generate(config.roster_size, &mut rng));
            with_output(out.as_deref(), |writer| {
                export::write_roster(roster.students(), format, writer)
                    .context("failed to export roster")
            })?;
        }
        Commands::Import {
            file,
            from_database,
        } => {
            let roster = Roster::from(generate(config.roster_size, &mut rng));
            let mut state = AppState::new(roster);
            let origin = if from_database {
                View::Database
            } else {
                View::Students
            };
            update(&mut state, Action::Navigate(origin));

            let file_name = display_name(&file);
            let Effect::StartImport(request) =
                update(&mut state, Action::ImportRequested { file_name })
            else {
                bail!("import request was not accepted");
            };

            if state.importing {
                println!("Procesando Base de Datos...");
            }
            let previous = state.roster.len();
            let outcome = spawn_import(request, config.import_delay, rng)
                .wait()
                .await
                .context("simulated import did not finish")?;

            match update(&mut state, Action::ImportCompleted(outcome)) {
                Effect::Notify(message) => println!("{message}"),
                _ => info!(
                    previous,
                    current = state.roster.len(),
                    "roster replaced from database view"
                ),
            }
            println!(
                "{}: {} legajos (antes {}).",
                state.view.title(),
                state.roster.len(),
                previous
            );
        }
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn with_output<F>(out: Option<&Path>, emit: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut dyn Write) -> anyhow::Result<()>,
{
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            emit(&mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            emit(&mut lock)?;
        }
    }
    Ok(())
}
