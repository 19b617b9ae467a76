//! High score backends
//!
//! Chosen by environment:
//! - Local: JSON file in the user's data directory
//! - Test: in-memory mock

use blindchess_core::{GameMode, ScoreBook, ScoreError, ScoreStore};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Normal play - file-based storage
    Local,
    /// Testing - in-memory mock
    Test,
}

impl Environment {
    /// Detect environment from the BLINDCHESS_ENV variable
    pub fn detect() -> Self {
        match std::env::var("BLINDCHESS_ENV").as_deref() {
            Ok("test") | Ok("testing") => Environment::Test,
            _ => Environment::Local,
        }
    }
}

// ==================== Local File Backend ====================

/// Scores kept in a JSON file
pub struct LocalScores {
    path: PathBuf,
    cache: Mutex<Option<ScoreBook>>,
}

impl LocalScores {
    pub fn new() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blindchess_scores.json");
        Self::with_path(path)
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    fn load(&self) -> ScoreBook {
        let mut cache = self.cache.lock().unwrap();
        if let Some(ref book) = *cache {
            return book.clone();
        }

        let book = match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable score file {}: {}", self.path.display(), e);
                ScoreBook::default()
            }),
            Err(_) => ScoreBook::default(),
        };

        *cache = Some(book.clone());
        book
    }

    fn save(&self, book: &ScoreBook) -> Result<(), ScoreError> {
        let json =
            serde_json::to_string_pretty(book).map_err(|e| ScoreError::Format(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ScoreError::Storage(e.to_string()))?;
        }
        std::fs::write(&self.path, json).map_err(|e| ScoreError::Storage(e.to_string()))?;

        *self.cache.lock().unwrap() = Some(book.clone());
        Ok(())
    }
}

impl Default for LocalScores {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for LocalScores {
    fn high_score(&self, mode: GameMode) -> Result<u32, ScoreError> {
        Ok(self.load().get(mode))
    }

    fn set_high_score_if_greater(&self, mode: GameMode, value: u32) -> Result<bool, ScoreError> {
        let mut book = self.load();
        if !book.record(mode, value) {
            return Ok(false);
        }
        self.save(&book)?;
        log::info!("new {} best: {}", mode, value);
        Ok(true)
    }

    fn book(&self) -> Result<ScoreBook, ScoreError> {
        Ok(self.load())
    }

    fn backend_name(&self) -> &'static str {
        "Local"
    }
}

// ==================== Mock Backend for Testing ====================

/// In-memory scores that can be switched off
pub struct MockScores {
    book: Mutex<ScoreBook>,
    available: Mutex<bool>,
}

impl MockScores {
    pub fn new() -> Self {
        Self {
            book: Mutex::new(ScoreBook::default()),
            available: Mutex::new(true),
        }
    }

    /// Set whether reads and writes should succeed
    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap() = available;
    }

    fn check_available(&self) -> Result<(), ScoreError> {
        if *self.available.lock().unwrap() {
            Ok(())
        } else {
            Err(ScoreError::Unavailable("mock backend switched off".to_string()))
        }
    }
}

impl Default for MockScores {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for MockScores {
    fn high_score(&self, mode: GameMode) -> Result<u32, ScoreError> {
        self.check_available()?;
        Ok(self.book.lock().unwrap().get(mode))
    }

    fn set_high_score_if_greater(&self, mode: GameMode, value: u32) -> Result<bool, ScoreError> {
        self.check_available()?;
        Ok(self.book.lock().unwrap().record(mode, value))
    }

    fn book(&self) -> Result<ScoreBook, ScoreError> {
        self.check_available()?;
        Ok(self.book.lock().unwrap().clone())
    }

    fn backend_name(&self) -> &'static str {
        "Mock"
    }
}

/// Create the backend for `env`
pub fn create_backend(env: Environment) -> Arc<dyn ScoreStore> {
    log::debug!("using {:?} score backend", env);
    match env {
        Environment::Local => Arc::new(LocalScores::new()),
        Environment::Test => Arc::new(MockScores::new()),
    }
}
