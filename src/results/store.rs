use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::ai::LearningAgent;
use crate::error::ResultsError;
use crate::results::metadata::{RunMetadata, WinRateReport};
use crate::training::WinRateRecord;

/// Default directory for training artifacts.
pub const DEFAULT_RESULTS_DIR: &str = "data";
/// File name of the win-rate chart inside the results directory.
pub const PLOT_FILE: &str = "win_rate_plot.txt";

const Q_TABLE_PREFIX: &str = "Q_table";
const WIN_RATES_PREFIX: &str = "Win_rates";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Paths written by one `save` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedResults {
    pub timestamp: String,
    pub q_table: PathBuf,
    pub win_rates: PathBuf,
}

/// Writes timestamped training artifacts into one directory.
pub struct ResultsStore {
    dir: PathBuf,
}

impl ResultsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ResultsStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn plot_path(&self) -> PathBuf {
        self.dir.join(PLOT_FILE)
    }

    /// Save the agent's table and the win-rate record, stamped with the local time.
    pub fn save<A>(
        &self,
        agent: &A,
        win_rates: &WinRateRecord,
        metadata: &RunMetadata,
    ) -> Result<SavedResults, ResultsError>
    where
        A: LearningAgent + ?Sized,
    {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.save_stamped(&stamp, agent, win_rates, metadata)
    }

    /// Save under `stamp`. If files with that stamp already exist, a numeric
    /// suffix is appended; earlier artifacts are never overwritten.
    pub fn save_stamped<A>(
        &self,
        stamp: &str,
        agent: &A,
        win_rates: &WinRateRecord,
        metadata: &RunMetadata,
    ) -> Result<SavedResults, ResultsError>
    where
        A: LearningAgent + ?Sized,
    {
        fs::create_dir_all(&self.dir).map_err(|source| ResultsError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let timestamp = self.free_stamp(stamp);
        let q_table = self.q_table_path(&timestamp);
        let win_rates_path = self.win_rates_path(&timestamp);

        let q_tmp = tmp_path(&q_table);
        let w_tmp = tmp_path(&win_rates_path);
        let report = WinRateReport {
            timestamp: timestamp.clone(),
            metadata: metadata.clone(),
            win_rates: win_rates.clone(),
        };

        // Both files land together or not at all.
        let written = write_tmp_files(agent, &report, &q_tmp, &w_tmp)
            .and_then(|()| fs::rename(&q_tmp, &q_table).map_err(ResultsError::from));
        if let Err(e) = written {
            let _ = fs::remove_file(&q_tmp);
            let _ = fs::remove_file(&w_tmp);
            return Err(e);
        }
        if let Err(source) = fs::rename(&w_tmp, &win_rates_path) {
            let _ = fs::remove_file(&q_table);
            let _ = fs::remove_file(&w_tmp);
            return Err(ResultsError::Write {
                path: win_rates_path,
                source,
            });
        }

        Ok(SavedResults {
            timestamp,
            q_table,
            win_rates: win_rates_path,
        })
    }

    /// Read back a win-rate file written by `save`.
    pub fn load_win_rates(path: &Path) -> Result<WinRateReport, ResultsError> {
        let json = fs::read_to_string(path).map_err(|source| ResultsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    fn q_table_path(&self, stamp: &str) -> PathBuf {
        self.dir.join(format!("{Q_TABLE_PREFIX}_{stamp}.json"))
    }

    fn win_rates_path(&self, stamp: &str) -> PathBuf {
        self.dir.join(format!("{WIN_RATES_PREFIX}_{stamp}.json"))
    }

    fn free_stamp(&self, stamp: &str) -> String {
        let taken = |s: &str| self.q_table_path(s).exists() || self.win_rates_path(s).exists();
        if !taken(stamp) {
            return stamp.to_string();
        }
        (1..)
            .map(|n| format!("{stamp}_{n}"))
            .find(|s| !taken(s.as_str()))
            .unwrap_or_else(|| stamp.to_string())
    }
}

fn write_tmp_files<A>(
    agent: &A,
    report: &WinRateReport,
    q_tmp: &Path,
    w_tmp: &Path,
) -> Result<(), ResultsError>
where
    A: LearningAgent + ?Sized,
{
    agent.save_table(q_tmp)?;
    let json = serde_json::to_string_pretty(report)?;
    fs::write(w_tmp, json).map_err(|source| ResultsError::Write {
        path: w_tmp.to_path_buf(),
        source,
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
