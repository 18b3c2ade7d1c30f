// used for persistence
use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params, params_from_iter};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::construct::StringRecord;
use crate::datatype::ContentHash;
use crate::error::{Result, StringLensError};
use crate::filter::FilterSet;
use crate::properties::{PropertySet, fold_case};

/// The persistence operations the service relies on.
pub trait RecordStore: Send + Sync {
    fn exists_by_hash(&self, hash: &ContentHash) -> Result<bool>;
    /// Fails with [`StringLensError::Duplicate`] if the hash is already stored.
    fn insert(&self, record: &StringRecord) -> Result<()>;
    fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<StringRecord>>;
    /// Matching records in insertion order.
    fn find_by_filter_set(&self, filters: &FilterSet) -> Result<Vec<StringRecord>>;
    /// Returns whether a record was found (and removed).
    fn delete_by_hash(&self, hash: &ContentHash) -> Result<bool>;
}

// ------------- Filter translation -------------
/// A SQL `where` clause with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub clause: String,
    pub values: Vec<Value>,
}

impl Predicate {
    /// Translates a filter set into conditions on the `StringRecord` table. An
    /// empty filter set gives an empty clause.
    pub fn translate(filters: &FilterSet) -> Self {
        let mut conditions = Vec::new();
        let mut values = Vec::new();
        if let Some(min) = filters.min_length {
            conditions.push("Length >= ?");
            values.push(Value::Integer(min));
        }
        if let Some(max) = filters.max_length {
            conditions.push("Length <= ?");
            values.push(Value::Integer(max));
        }
        if let Some(word_count) = filters.word_count {
            conditions.push("WordCount = ?");
            values.push(Value::Integer(word_count));
        }
        if let Some(is_palindrome) = filters.is_palindrome {
            conditions.push("IsPalindrome = ?");
            values.push(Value::Integer(i64::from(is_palindrome)));
        }
        if let Some(c) = filters.contains_character {
            // FoldedValue holds fold_case of the value
            conditions.push("instr(FoldedValue, ?) > 0");
            values.push(Value::Text(fold_case(c.encode_utf8(&mut [0u8; 4]))));
        }
        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("where {}", conditions.join(" and "))
        };
        Self { clause, values }
    }
}

// ------------- Persistence -------------
const SELECT_RECORD: &str = "
    select StringRecord_Hash,
            Value,
            Length,
            IsPalindrome,
            UniqueCharacters,
            WordCount,
            CharacterFrequency,
            CreatedAt
        from StringRecord
";

pub struct Persistor {
    db: Mutex<Connection>,
}

impl Persistor {
    pub fn in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }
    pub fn open(path: &str) -> Result<Self> {
        Self::new(Connection::open(path)?)
    }
    pub fn new(connection: Connection) -> Result<Self> {
        // The "STRICT" keyword introduced in 3.37.0 breaks JDBC connections, which makes
        // debugging using an external tool like DBeaver impossible
        connection.execute_batch(
            "
            create table if not exists StringRecord (
                StringRecord_Hash text not null,
                Value text not null,
                FoldedValue text not null,
                Length integer not null,
                IsPalindrome integer not null,
                UniqueCharacters integer not null,
                WordCount integer not null,
                CharacterFrequency text not null,
                CreatedAt text not null,
                constraint unique_and_referenceable_StringRecord_Hash primary key (
                    StringRecord_Hash
                )
            );-- STRICT;
            ",
        )?;
        Ok(Self {
            db: Mutex::new(connection),
        })
    }
    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|e| StringLensError::Lock(e.to_string()))
    }
}

fn record_from_row(row: &Row) -> rusqlite::Result<StringRecord> {
    let hash: ContentHash = row.get(0)?;
    Ok(StringRecord {
        id: hash.clone(),
        value: row.get(1)?,
        properties: PropertySet {
            length: row.get(2)?,
            is_palindrome: row.get(3)?,
            unique_characters: row.get(4)?,
            word_count: row.get(5)?,
            content_hash: hash,
            character_frequency_map: row.get(6)?,
        },
        created_at: row.get(7)?,
    })
}

impl RecordStore for Persistor {
    fn exists_by_hash(&self, hash: &ContentHash) -> Result<bool> {
        let db = self.connection()?;
        let mut statement = db.prepare_cached(
            "
            select 1
                from StringRecord
                where StringRecord_Hash = ?
            ",
        )?;
        Ok(statement.exists(params![hash])?)
    }
    fn insert(&self, record: &StringRecord) -> Result<()> {
        let db = self.connection()?;
        let mut statement = db.prepare_cached(
            "
            insert into StringRecord (
                StringRecord_Hash,
                Value,
                FoldedValue,
                Length,
                IsPalindrome,
                UniqueCharacters,
                WordCount,
                CharacterFrequency,
                CreatedAt
            ) values (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )?;
        let properties = &record.properties;
        match statement.execute(params![
            &record.id,
            &record.value,
            &fold_case(&record.value),
            &properties.length,
            &properties.is_palindrome,
            &properties.unique_characters,
            &properties.word_count,
            &properties.character_frequency_map,
            &record.created_at,
        ]) {
            Ok(_) => Ok(()),
            // the primary key catches a concurrent insert of the same string
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(StringLensError::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }
    fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<StringRecord>> {
        let db = self.connection()?;
        let mut statement =
            db.prepare_cached(&format!("{SELECT_RECORD} where StringRecord_Hash = ?"))?;
        Ok(statement
            .query_row(params![hash], record_from_row)
            .optional()?)
    }
    fn find_by_filter_set(&self, filters: &FilterSet) -> Result<Vec<StringRecord>> {
        let predicate = Predicate::translate(filters);
        debug!(clause = %predicate.clause, "translated filters");
        let db = self.connection()?;
        let mut statement =
            db.prepare_cached(&format!("{SELECT_RECORD} {} order by rowid", predicate.clause))?;
        let records = statement
            .query_map(params_from_iter(predicate.values.iter()), record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
    fn delete_by_hash(&self, hash: &ContentHash) -> Result<bool> {
        let db = self.connection()?;
        let deleted = db.execute(
            "delete from StringRecord where StringRecord_Hash = ?",
            params![hash],
        )?;
        Ok(deleted > 0)
    }
}
