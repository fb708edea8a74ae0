use crate::domain::Snapshot;
use crate::error::Result;
use crate::schedule;
use std::fs::{DirBuilder, File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

const DIR_MODE: u32 = 0o2770;
const FILE_MODE: u32 = 0o660;

/// Owns the current day's append-mode handle. Snapshots are written as
/// a bare concatenation of tab-indented JSON values, one file per local
/// calendar day under `<root>/YYYY/MM/YYYY-MM-DD.json`.
pub struct DayFileStore {
    root: PathBuf,
    path: PathBuf,
    file: Option<File>,
}

impl DayFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            path: PathBuf::new(),
            file: None,
        }
    }

    /// Day file path for a scrape begun at epoch second `t`, with the
    /// date fields rendered in the local zone.
    pub fn path_for(&self, t: i64) -> PathBuf {
        let date = schedule::local_datetime(t).format("%Y/%m/%Y-%m-%d");
        self.root.join(format!("{date}.json"))
    }

    /// Points the handle at the day file for `t`, creating the enclosing
    /// directory tree as needed. On failure the handle is left absent so
    /// a later append can retry.
    pub fn open_for(&mut self, t: i64) -> Result<()> {
        self.path = self.path_for(t);
        self.file = None;
        self.file = Some(open_append(&self.path)?);
        Ok(())
    }

    /// Closes the current handle and opens the file for `t`'s day.
    pub fn rollover(&mut self, t: i64) -> Result<()> {
        self.file.take();
        self.open_for(t)
    }

    /// Appends one serialized snapshot, reopening the current path
    /// first if an earlier open failed.
    pub fn append(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.file.is_none() {
            self.file = Some(open_append(&self.path)?);
        }
        let data = snapshot.to_tab_indented_json()?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(&data)?;
        }
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        let mut builder = DirBuilder::new();
        builder.recursive(true).mode(DIR_MODE);
        builder.create(dir)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(FILE_MODE)
        .open(path)?;
    Ok(file)
}
