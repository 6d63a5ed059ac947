//! In-memory [`ContentStore`] with scripted answers, for tests.
//!
//! Each path holds a queue of responses. The last response repeats once the
//! queue is down to one entry; unscripted paths answer HTTP 404.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ContentStore, FileContent, RemoteEntry};
use crate::error::CatalogError;

type Script<T> = VecDeque<Result<T, CatalogError>>;

#[derive(Default)]
pub(crate) struct ScriptedStore {
    listing: Mutex<Script<Vec<RemoteEntry>>>,
    files: Mutex<HashMap<String, Script<FileContent>>>,
    hits: Mutex<HashMap<String, usize>>,
}

pub(crate) const LISTING: &str = "";

fn next<T: Clone>(script: &mut Script<T>, path: &str) -> Result<T, CatalogError> {
    let answer = if script.len() > 1 {
        script.pop_front()
    } else {
        script.front().cloned()
    };
    answer.unwrap_or_else(|| Err(CatalogError::from_status(404, path)))
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, entries: Vec<RemoteEntry>) -> Self {
        self.listing.lock().unwrap().push_back(Ok(entries));
        self
    }

    pub fn with_listing_error(self, err: CatalogError) -> Self {
        self.listing.lock().unwrap().push_back(Err(err));
        self
    }

    /// Serve `text` base64-encoded at `path`
    pub fn with_text(self, path: &str, text: &str) -> Self {
        self.push(path, Ok(FileContent::encode(text)))
    }

    pub fn push_raw(self, path: &str, file: FileContent) -> Self {
        self.push(path, Ok(file))
    }

    pub fn with_error(self, path: &str, err: CatalogError) -> Self {
        self.push(path, Err(err))
    }

    fn push(self, path: &str, answer: Result<FileContent, CatalogError>) -> Self {
        self.files
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(answer);
        self
    }

    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    fn record(&self, path: &str) {
        *self.hits.lock().unwrap().entry(path.to_string()).or_default() += 1;
    }
}

#[async_trait]
impl ContentStore for ScriptedStore {
    async fn list_root(&self) -> Result<Vec<RemoteEntry>, CatalogError> {
        self.record(LISTING);
        next(&mut self.listing.lock().unwrap(), "contents/")
    }

    async fn read_file(&self, path: &str) -> Result<FileContent, CatalogError> {
        self.record(path);
        let mut files = self.files.lock().unwrap();
        match files.get_mut(path) {
            Some(script) => next(script, path),
            None => Err(CatalogError::from_status(404, path)),
        }
    }
}

pub(crate) fn rate_limited(path: &str) -> CatalogError {
    CatalogError::from_status(429, path)
}
