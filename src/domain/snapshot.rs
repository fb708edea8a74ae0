use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One extracted row of the stats page. HTML entities in `name` are
/// passed through untouched; `url` is the raw href value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameInfo {
    pub name: String,
    pub url: String,
    pub current: u32,
    pub peak: u32,
}

/// One scrape result: the epoch second scraping began plus the rows in
/// page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    pub time: i64,
    pub games: Vec<GameInfo>,
}

impl Snapshot {
    pub fn new(time: i64) -> Self {
        Self {
            time,
            games: Vec::new(),
        }
    }

    /// Renders the snapshot as pretty-printed JSON with one tab per
    /// indentation level. Day files are the bare concatenation of these
    /// buffers, so no trailing separator is included.
    pub fn to_tab_indented_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(buf)
    }
}
