// Recent ROMs list
//
// Tracks the last few ROMs opened so frontends can offer quick access.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the list is persisted
const RECENT_ROMS_FILE: &str = "recent_roms.toml";

/// Maximum number of entries kept
const MAX_RECENT_ROMS: usize = 10;

/// Recently opened ROMs, most recent first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentRomsList {
    roms: Vec<RecentRomEntry>,
}

/// One remembered ROM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentRomEntry {
    /// Path to the ROM file
    pub path: PathBuf,

    /// Last opened, RFC 3339
    pub last_accessed: String,

    /// File name without extension
    pub display_name: String,
}

impl RecentRomsList {
    /// Load the list, or an empty one when the file is absent or invalid
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load the list from disk
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(RECENT_ROMS_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Persist the list
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(RECENT_ROMS_FILE, contents)
    }

    /// Record a ROM as just opened
    ///
    /// Moves an existing entry to the front; trims the list to
    /// `MAX_RECENT_ROMS`.
    pub fn add<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        self.roms.retain(|entry| entry.path != path);

        let display_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();

        self.roms.insert(
            0,
            RecentRomEntry {
                path: path.to_path_buf(),
                last_accessed: chrono::Local::now().to_rfc3339(),
                display_name,
            },
        );
        self.roms.truncate(MAX_RECENT_ROMS);
    }

    /// The remembered entries, most recent first
    pub fn entries(&self) -> &[RecentRomEntry] {
        &self.roms
    }
}
