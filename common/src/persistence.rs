use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, InMemoryContentProvider,
    YamlConfigSerializer,
};

#[derive(Debug)]
pub enum PersistenceError {
    Storage(String),
    Format(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Storage(e) => write!(f, "Storage error: {}", e),
            PersistenceError::Format(e) => write!(f, "Format error: {}", e),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Where the best score of a player profile lives between sessions. Callers
/// treat failures as non-fatal.
pub trait BestScoreStore {
    fn load_best_score(&self) -> Result<u32, PersistenceError>;
    fn save_best_score(&self, score: u32) -> Result<(), PersistenceError>;
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct BestScoreRecord {
    pub best_score: u32,
    pub achieved_at: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct BestScoreBook {
    #[serde(default)]
    pub profiles: BTreeMap<String, BestScoreRecord>,
}

/// YAML document holding one record per profile.
pub struct YamlBestScoreStore<TContentProvider: ConfigContentProvider> {
    content_provider: TContentProvider,
    serializer: YamlConfigSerializer,
    profile: String,
}

pub type FileBestScoreStore = YamlBestScoreStore<FileContentConfigProvider>;
pub type MemoryBestScoreStore = YamlBestScoreStore<InMemoryContentProvider>;

impl FileBestScoreStore {
    pub fn from_file(file_path: impl Into<PathBuf>, profile: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), profile)
    }
}

impl MemoryBestScoreStore {
    pub fn in_memory(profile: &str) -> Self {
        Self::new(InMemoryContentProvider::new(), profile)
    }
}

impl<TContentProvider: ConfigContentProvider> YamlBestScoreStore<TContentProvider> {
    pub fn new(content_provider: TContentProvider, profile: &str) -> Self {
        Self {
            content_provider,
            serializer: YamlConfigSerializer::new(),
            profile: profile.to_string(),
        }
    }

    pub fn load_book(&self) -> Result<BestScoreBook, PersistenceError> {
        let content = self
            .content_provider
            .get_config_content()
            .map_err(PersistenceError::Storage)?;

        match content {
            Some(content) => self
                .serializer
                .deserialize(&content)
                .map_err(PersistenceError::Format),
            None => Ok(BestScoreBook::default()),
        }
    }

    fn save_book(&self, book: &BestScoreBook) -> Result<(), PersistenceError> {
        let content = self
            .serializer
            .serialize(book)
            .map_err(PersistenceError::Format)?;
        self.content_provider
            .set_config_content(&content)
            .map_err(PersistenceError::Storage)
    }
}

impl<TContentProvider: ConfigContentProvider> BestScoreStore for YamlBestScoreStore<TContentProvider> {
    fn load_best_score(&self) -> Result<u32, PersistenceError> {
        let book = self.load_book()?;
        Ok(book
            .profiles
            .get(&self.profile)
            .map(|record| record.best_score)
            .unwrap_or(0))
    }

    /// Lower scores than the stored one are ignored.
    fn save_best_score(&self, score: u32) -> Result<(), PersistenceError> {
        let mut book = self.load_book()?;
        let record = book.profiles.entry(self.profile.clone()).or_default();
        if score <= record.best_score && record.achieved_at.is_some() {
            return Ok(());
        }

        record.best_score = record.best_score.max(score);
        record.achieved_at = Some(Local::now().to_rfc3339());
        self.save_book(&book)
    }
}
