use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::careers::error::CareerError;
use crate::careers::models::CareerRecord;
use crate::careers::parser::parse;
use crate::careers::validation::ValuePolicy;

/// Recognized content suffixes, in resolution priority order.
pub const CONTENT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Default content directory, relative to the working directory.
pub const DEFAULT_CONTENT_DIR: &str = "data/careers";

/// An id that was enumerated but did not produce a record.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub id: String,
    pub error: CareerError,
}

/// Outcome of a batch load. `records` keeps `list_ids` order.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<CareerRecord>,
    pub failures: Vec<LoadFailure>,
}

/// Reads career content files from one directory. Holds no state besides its
/// configuration, so clones are cheap and loads never share anything.
#[derive(Debug, Clone)]
pub struct CareerLoader {
    content_dir: PathBuf,
    policy: ValuePolicy,
}

impl CareerLoader {
    pub fn new(content_dir: impl Into<PathBuf>, policy: ValuePolicy) -> Self {
        Self {
            content_dir: content_dir.into(),
            policy,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn policy(&self) -> ValuePolicy {
        self.policy
    }

    /// Ids of every content file in the directory, sorted, each reported once.
    /// A missing or unreadable directory yields an empty list.
    pub async fn list_ids(&self) -> Vec<String> {
        let mut entries = match tokio::fs::read_dir(&self.content_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Cannot read content directory {}: {e}",
                    self.content_dir.display()
                );
                return Vec::new();
            }
        };

        let mut ids = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(
                        "Stopped reading content directory {}: {e}",
                        self.content_dir.display()
                    );
                    break;
                }
            };
            if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name();
            let Some(id) = name.to_str().and_then(strip_content_extension) else {
                continue;
            };
            if !is_plain_id(id) {
                debug!("Ignoring content file with unusable id: {id:?}");
                continue;
            }
            ids.push(id.to_string());
        }

        ids.sort();
        let enumerated = ids.len();
        ids.dedup();
        if ids.len() != enumerated {
            warn!(
                "{} content file(s) share an id with another suffix; '.{}' takes priority",
                enumerated - ids.len(),
                CONTENT_EXTENSIONS[0]
            );
        }
        ids
    }

    /// Loads the record for `id`, trying each suffix in priority order.
    pub async fn load_one(&self, id: &str) -> Result<CareerRecord, CareerError> {
        if !is_plain_id(id) {
            return Err(CareerError::NotFound { id: id.to_string() });
        }

        for ext in CONTENT_EXTENSIONS {
            let path = self.content_dir.join(format!("{id}.{ext}"));
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(CareerError::Io {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    })
                }
            };
            debug!("Loading career '{id}' from {}", path.display());
            let text = String::from_utf8(bytes).map_err(|e| CareerError::Syntax {
                detail: format!("not valid UTF-8: {e}"),
            })?;
            return parse(&text, id, self.policy);
        }

        Err(CareerError::NotFound { id: id.to_string() })
    }

    /// Every record that loads cleanly. Failing ids are logged and skipped.
    pub async fn load_all(&self) -> Vec<CareerRecord> {
        self.load_report().await.records
    }

    /// Loads every listed id concurrently and splits the outcomes into
    /// records and failures, both in `list_ids` order.
    pub async fn load_report(&self) -> LoadReport {
        let ids = self.list_ids().await;

        let mut tasks = JoinSet::new();
        for (index, id) in ids.iter().cloned().enumerate() {
            let loader = self.clone();
            tasks.spawn(async move {
                let result = loader.load_one(&id).await;
                (index, id, result)
            });
        }

        let mut outcomes = Vec::with_capacity(ids.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!("Career load task failed: {e}"),
            }
        }
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut report = LoadReport::default();
        for (_, id, result) in outcomes {
            match result {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    warn!(id = %id, "Skipping career file: {e}");
                    if let CareerError::Syntax { detail } = &e {
                        debug!(id = %id, "Parser detail: {detail}");
                    }
                    report.failures.push(LoadFailure { id, error: e });
                }
            }
        }
        report
    }
}

fn strip_content_extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    (CONTENT_EXTENSIONS.contains(&ext) && !stem.is_empty()).then_some(stem)
}

/// Ids map onto file names inside the content directory and onto a single
/// URL path segment. Path separators, hidden names and characters that would
/// end or escape the segment never resolve.
fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && !id.starts_with('.') && !id.contains(['/', '\\', '\0', '#', '?', '%'])
}
