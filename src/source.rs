use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::data::loader::{load_file, parse_csv};
use crate::data::model::{Inventory, LoadOrigin};
use crate::error::{LoadError, LoadResult};

// ---------------------------------------------------------------------------
// Where the startup CSV lives
// ---------------------------------------------------------------------------

/// Location of the CSV loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    Path(PathBuf),
    Url(String),
}

impl CsvSource {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CsvSource::Url(trimmed.to_string())
        } else {
            CsvSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Resolve a relative path against `base`; URLs are returned unchanged.
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            CsvSource::Path(p) if p.is_relative() => CsvSource::Path(base.join(p)),
            other => other,
        }
    }
}

impl fmt::Display for CsvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvSource::Path(p) => write!(f, "{}", p.display()),
            CsvSource::Url(u) => f.write_str(u),
        }
    }
}

/// Raw CSV text from a file or URL.
pub fn fetch_text(source: &CsvSource) -> LoadResult<String> {
    match source {
        CsvSource::Path(path) => {
            let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        CsvSource::Url(url) => {
            let resp = reqwest::blocking::get(url)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LoadError::HttpStatus {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }
            Ok(resp.text()?)
        }
    }
}

/// Fetch and parse the startup CSV.
pub fn load_source(source: &CsvSource) -> LoadResult<Inventory> {
    let text = fetch_text(source)?;
    let records = parse_csv(&text);
    log::info!("Parsed {} records from {source}", records.len());
    Ok(Inventory::new(records, LoadOrigin::Startup(source.to_string())))
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// What to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadJob {
    /// The configured source, loaded automatically.
    Startup(CsvSource),
    /// A file the user picked.
    Manual(PathBuf),
}

impl LoadJob {
    pub fn describe(&self) -> String {
        match self {
            LoadJob::Startup(source) => source.to_string(),
            LoadJob::Manual(path) => path.display().to_string(),
        }
    }

    /// Run the job on the current thread.
    pub fn run(&self) -> LoadOutcome {
        let result = match self {
            LoadJob::Startup(source) => load_source(source),
            LoadJob::Manual(path) => load_file(path),
        };
        result.map_err(|err| {
            log::error!("Failed to load {}: {err}", self.describe());
            LoadFailure::new(self, &err)
        })
    }
}

/// A failed load, reduced to what the status line shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub message: String,
}

impl LoadFailure {
    fn new(job: &LoadJob, err: &LoadError) -> Self {
        let message = match job {
            LoadJob::Startup(source) => {
                format!("Could not load the CSV ({err}). Check that '{source}' exists.")
            }
            LoadJob::Manual(path) => {
                format!("Could not load '{}': {err}", path.display())
            }
        };
        LoadFailure { message }
    }
}

pub type LoadOutcome = Result<Inventory, LoadFailure>;

/// Run `job` on a worker thread. The outcome arrives on the returned channel,
/// after which `notify` is called (e.g. to wake the UI).
///
/// Overlapping jobs are not cancelled; whichever finishes last wins.
pub fn spawn_load<F>(job: LoadJob, notify: F) -> Receiver<LoadOutcome>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = job.run();
        // Receiver gone means the app is shutting down.
        let _ = tx.send(outcome);
        notify();
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            CsvSource::parse("https://example.org/inventario.csv"),
            CsvSource::Url("https://example.org/inventario.csv".into())
        );
        assert_eq!(
            CsvSource::parse("HTTP://host/x.csv"),
            CsvSource::Url("HTTP://host/x.csv".into())
        );
        assert_eq!(
            CsvSource::parse(" inventario.csv "),
            CsvSource::Path(PathBuf::from("inventario.csv"))
        );
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let base = Path::new("/opt/dashboard");
        assert_eq!(
            CsvSource::parse("inventario.csv").relative_to(base),
            CsvSource::Path(base.join("inventario.csv"))
        );
        let url = CsvSource::parse("https://h/a.csv");
        assert_eq!(url.clone().relative_to(base), url);
    }

    #[test]
    fn missing_startup_file_reports_status_text() {
        let path = std::env::temp_dir().join("inventory-dashboard-missing-startup.csv");
        let job = LoadJob::Startup(CsvSource::Path(path));
        let failure = job.run().unwrap_err();
        assert!(failure.message.starts_with("Could not load the CSV"));
        assert!(failure.message.contains("inventory-dashboard-missing-startup.csv"));
    }

    #[test]
    fn spawned_job_delivers_outcome_and_notifies() {
        let path = std::env::temp_dir().join("inventory-dashboard-spawn-test.csv");
        std::fs::write(&path, "codigo,inv\nA1,5\nA2,7\n").unwrap();

        let (done_tx, done_rx) = mpsc::channel();
        let rx = spawn_load(LoadJob::Manual(path.clone()), move || {
            done_tx.send(()).unwrap();
        });

        let inventory = rx.recv().unwrap().unwrap();
        done_rx.recv().unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.origin, LoadOrigin::Manual(path.clone()));

        std::fs::remove_file(&path).ok();
    }
}
