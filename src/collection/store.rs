//! On-disk collection files
//!
//! Everything lives in one directory: the main collection in
//! `collection.json`, each named list in `<name>.json`, and the name of the
//! list currently in use in `_state.json`. Files that do not exist yet read
//! as empty.

use super::Archive;
use crate::config::CollectionConfig;
use crate::scryfall::Card;
use crate::{CollectionError, CollectionResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File holding the main collection
pub const COLLECTION_FILE: &str = "collection.json";

/// File recording which list is in use
pub const STATE_FILE: &str = "_state.json";

/// Persistent selection state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// List that additions go to instead of the main collection
    #[serde(default)]
    pub current_list: Option<String>,
}

/// Default collection directory, e.g. `~/.config/booster-crack` on Linux
pub fn default_root() -> CollectionResult<PathBuf> {
    let dirs = ProjectDirs::from("", "", "booster-crack").ok_or(CollectionError::NoConfigDir)?;
    Ok(dirs.config_dir().to_path_buf())
}

/// Reads an archive; a missing file is an empty archive
pub fn read_archive(path: &Path) -> CollectionResult<Archive> {
    match read_json(path)? {
        Some(archive) => Ok(archive),
        None => Ok(Archive::new()),
    }
}

/// Writes an archive through a temporary file so readers never see half a file
pub fn write_archive(path: &Path, archive: &Archive) -> CollectionResult<()> {
    let content = archive.to_json().map_err(|source| CollectionError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &content)
}

/// Collection directory with its list and state files
#[derive(Debug, Clone)]
pub struct CollectionStore {
    root: PathBuf,
}

impl CollectionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens the configured directory, or the default one
    pub fn from_config(config: &CollectionConfig) -> CollectionResult<Self> {
        let root = match &config.directory {
            Some(directory) => directory.clone(),
            None => default_root()?,
        };
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self) -> PathBuf {
        self.root.join(COLLECTION_FILE)
    }

    /// Path of a named list
    ///
    /// Names are letters, digits, `-` and `_`, and may not start with `_`,
    /// which would collide with the state file.
    pub fn list_path(&self, name: &str) -> CollectionResult<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('_')
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
        if !valid || name == "collection" {
            return Err(CollectionError::InvalidListName(name.to_string()));
        }
        Ok(self.root.join(format!("{}.json", name)))
    }

    pub fn state(&self) -> CollectionResult<State> {
        Ok(read_json(&self.root.join(STATE_FILE))?.unwrap_or_default())
    }

    pub fn write_state(&self, state: &State) -> CollectionResult<()> {
        let path = self.root.join(STATE_FILE);
        let content = serde_json::to_string_pretty(state).map_err(|source| {
            CollectionError::Json {
                path: path.clone(),
                source,
            }
        })?;
        write_atomic(&path, &content)
    }

    /// File that reads and edits go to
    ///
    /// An explicit path wins, then the list in use, then the main collection.
    pub fn active_path(&self, explicit: Option<&Path>) -> CollectionResult<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        match self.state()?.current_list {
            Some(name) => self.list_path(&name),
            None => Ok(self.collection_path()),
        }
    }

    /// Adds or removes one copy of `card`; returns the resulting count
    pub fn edit(
        &self,
        explicit: Option<&Path>,
        card: Card,
        foil: bool,
        removal: bool,
    ) -> CollectionResult<u32> {
        let path = self.active_path(explicit)?;
        let mut archive = read_archive(&path)?;

        let count = if removal {
            archive.remove(&card, foil)?
        } else {
            archive.add(card, foil)
        };

        write_archive(&path, &archive)?;
        tracing::debug!("Updated {}", path.display());

        Ok(count)
    }

    /// Creates an empty list; fails if one of that name exists
    pub fn create_list(&self, name: &str, make_current: bool) -> CollectionResult<PathBuf> {
        let path = self.list_path(name)?;
        if path.exists() {
            return Err(CollectionError::ListExists(path));
        }

        write_archive(&path, &Archive::new())?;
        if make_current {
            self.use_list(Some(name))?;
        }

        Ok(path)
    }

    /// Switches the list in use; `None` goes back to the main collection
    ///
    /// Returns the list that was in use before.
    pub fn use_list(&self, name: Option<&str>) -> CollectionResult<Option<String>> {
        if let Some(name) = name {
            if !self.list_path(name)?.exists() {
                return Err(CollectionError::ListNotFound(name.to_string()));
            }
        }

        let mut state = self.state()?;
        let previous = state.current_list.take();
        state.current_list = name.map(str::to_string);
        self.write_state(&state)?;

        Ok(previous)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> CollectionResult<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| CollectionError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_atomic(path: &Path, content: &str) -> CollectionResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
