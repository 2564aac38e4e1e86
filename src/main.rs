use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use datewalk::error::{ConfigError, validate_concurrency};
use datewalk::filter::AgeFilter;
use datewalk::format::Template;
use datewalk::walk::{DatedFile, Walker};
use log::error;
use std::path::{Path, PathBuf};
use std::process;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Find files by calendar dates embedded in their names"
)]
struct Cli {
    /// Directories to search
    #[arg(required = true, value_name = "DIR")]
    dirs: Vec<PathBuf>,

    /// Maximum number of directories listed concurrently (1 up to the number
    /// of available CPU cores)
    #[arg(short, long, default_value_t = default_concurrency())]
    concurrency: usize,

    /// Only report files dated strictly after today minus DAYS days
    #[arg(short, long, value_name = "DAYS")]
    newer: Option<u64>,

    /// Only report files dated strictly before today minus DAYS days
    #[arg(short, long, value_name = "DAYS")]
    older: Option<u64>,

    /// Reference date the cutoffs are derived from, as YYYY-MM-DD
    /// (defaults to the current local date)
    #[arg(short, long, value_name = "DATE")]
    today: Option<NaiveDate>,

    /// Keep files dated after the current date
    #[arg(long)]
    include_future: bool,

    /// Output template with {date} and {path} tokens; \n, \t, \r and \\
    /// escapes are interpreted
    #[arg(short, long, value_name = "TEMPLATE")]
    format: Option<String>,
}

/// Everything validated and assembled from the command line.
struct Settings {
    roots: Vec<PathBuf>,
    concurrency: usize,
    filter: AgeFilter,
    template: Option<Template>,
}

impl Settings {
    fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let concurrency = validate_concurrency(cli.concurrency)?;

        for dir in &cli.dirs {
            validate_root(dir)?;
        }

        let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
        let mut filter = AgeFilter::new(Local::now().date_naive());
        filter.include_future = cli.include_future;
        if let Some(days) = cli.newer {
            filter.newer_than = Some(days_before(today, days));
        }
        if let Some(days) = cli.older {
            filter.older_than = Some(days_before(today, days));
        }

        let template = cli.format.as_deref().map(Template::parse).transpose()?;

        Ok(Settings {
            roots: cli.dirs,
            concurrency,
            filter,
            template,
        })
    }
}

/// Default listing concurrency: 8, lowered to the CPU count on small hosts
/// so the default never fails validation.
fn default_concurrency() -> usize {
    num_cpus::get().min(8)
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

fn validate_root(path: &Path) -> Result<(), ConfigError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::InvalidRoot {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        }),
        Err(err) => Err(ConfigError::InvalidRoot {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}

fn emit(found: &DatedFile, template: Option<&Template>) {
    match template {
        Some(template) => println!("{}", template.render(&found.path, found.date)),
        None => println!("{}", found.path.display()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging
    datewalk::telemetry::init()?;
    let cli = Cli::parse();

    let settings = match Settings::from_cli(cli) {
        Ok(settings) => settings,
        Err(err) => {
            error!("{err}");
            process::exit(err.exit_code());
        }
    };

    let walker = Walker::new(settings.filter, settings.concurrency);
    let (tx, mut rx) = mpsc::channel(1024);
    let walk = tokio::spawn({
        let walker = walker.clone();
        let roots = settings.roots.clone();
        async move { walker.run(roots, tx).await }
    });

    // Drain matches as they arrive; each println is one atomic output line.
    while let Some(found) = rx.recv().await {
        emit(&found, settings.template.as_ref());
    }

    walk.await?;
    Ok(())
}
