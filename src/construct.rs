use std::sync::Arc;

// used for timestamps in the database
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// our own stuff that we need
use crate::datatype::ContentHash;
use crate::error::{Result, StringLensError};
use crate::filter::FilterSet;
use crate::interpret::{Interpretation, interpret};
use crate::persist::{Persistor, RecordStore};
use crate::properties::PropertySet;

// ------------- StringRecord -------------
/// An analyzed string. Its identity is the content hash, so `id` always equals
/// `properties.content_hash`. Records are never updated, only created and
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    pub id: ContentHash,
    pub value: String,
    pub properties: PropertySet,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    pub fn analyze(value: &str) -> Self {
        let properties = PropertySet::extract(value);
        Self {
            id: properties.content_hash.clone(),
            value: value.to_string(),
            properties,
            created_at: Utc::now(),
        }
    }
}

// ------------- Database -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

/// Records matched by a search together with the filters that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: FilterSet,
}

/// Records matched by a natural language search.
#[derive(Debug, Clone, Serialize)]
pub struct InterpretedResult {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: Interpretation,
}

pub struct Database {
    store: Arc<dyn RecordStore>,
}

impl Database {
    pub fn new(mode: PersistenceMode) -> Result<Self> {
        let persistor = match mode {
            PersistenceMode::InMemory => Persistor::in_memory()?,
            PersistenceMode::File(path) => Persistor::open(&path)?,
        };
        Ok(Self::with_store(Arc::new(persistor)))
    }
    pub fn with_store(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }
    /// Analyzes and stores `value`, unless a record with the same hash exists.
    pub fn analyze(&self, value: &str) -> Result<StringRecord> {
        let hash = ContentHash::of(value);
        if self.store.exists_by_hash(&hash)? {
            debug!(%hash, "duplicate string rejected");
            return Err(StringLensError::Duplicate);
        }
        let record = StringRecord::analyze(value);
        self.store.insert(&record)?;
        info!(%hash, length = record.properties.length, "string analyzed");
        Ok(record)
    }
    pub fn lookup(&self, value: &str) -> Result<StringRecord> {
        self.store
            .find_by_hash(&ContentHash::of(value))?
            .ok_or(StringLensError::NotFound)
    }
    pub fn search(&self, filters: FilterSet) -> Result<SearchResult> {
        if filters.has_inverted_range() {
            warn!(?filters, "searching with min_length greater than max_length");
        }
        let data = self.store.find_by_filter_set(&filters)?;
        debug!(?filters, count = data.len(), "search complete");
        Ok(SearchResult {
            count: data.len(),
            data,
            filters_applied: filters,
        })
    }
    pub fn search_natural_language(&self, query: &str) -> Result<InterpretedResult> {
        let interpreted_query = interpret(query)?;
        let data = self
            .store
            .find_by_filter_set(&interpreted_query.parsed_filters)?;
        debug!(query, count = data.len(), "natural language search complete");
        Ok(InterpretedResult {
            count: data.len(),
            data,
            interpreted_query,
        })
    }
    pub fn delete(&self, value: &str) -> Result<()> {
        let hash = ContentHash::of(value);
        if self.store.delete_by_hash(&hash)? {
            info!(%hash, "string deleted");
            Ok(())
        } else {
            Err(StringLensError::NotFound)
        }
    }
}
