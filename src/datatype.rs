// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

// used for the content hash
use sha2::{Digest, Sha256};

// used to (de)serialize the frequency map in first-occurrence order
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// used to print out readable forms of a data type
use std::fmt;
// used as a position index while counting
use std::collections::HashMap;

// ------------- ContentHash -------------
/// Hex encoded SHA-256 digest of the exact bytes of a string.
///
/// The hash is the identity of a stored string. Lookups and deletions by value
/// recompute it from the given value, so no reverse index is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of(value: &str) -> Self {
        Self(hex::encode(Sha256::digest(value.as_bytes())))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl ToSql for ContentHash {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}
impl FromSql for ContentHash {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(|s| Self(s.to_string()))
    }
}

// ------------- CharacterFrequency -------------
/// Occurrence counts per character, kept in the order in which each character
/// was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFrequency {
    counts: Vec<(char, u64)>,
}

impl CharacterFrequency {
    pub fn new() -> Self {
        Self::default()
    }
    /// Counts the characters of `value`, skipping whitespace. Case is preserved.
    pub fn count(value: &str) -> Self {
        let mut counts: Vec<(char, u64)> = Vec::new();
        let mut position: HashMap<char, usize> = HashMap::new();
        for c in value.chars().filter(|c| !c.is_whitespace()) {
            match position.get(&c) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    position.insert(c, counts.len());
                    counts.push((c, 1));
                }
            }
        }
        Self { counts }
    }
    pub fn get(&self, c: char) -> Option<u64> {
        self.counts.iter().find(|(k, _)| *k == c).map(|(_, n)| *n)
    }
    pub fn len(&self) -> usize {
        self.counts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().copied()
    }
    /// Total number of counted (non-whitespace) characters.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }
    fn push(&mut self, c: char, n: u64) {
        match self.counts.iter_mut().find(|(k, _)| *k == c) {
            Some(entry) => entry.1 += n,
            None => self.counts.push((c, n)),
        }
    }
}

impl Serialize for CharacterFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        let mut buffer = [0u8; 4];
        for (c, n) in &self.counts {
            map.serialize_entry(&*c.encode_utf8(&mut buffer), n)?;
        }
        map.end()
    }
}

struct CharacterFrequencyVisitor;

impl<'de> Visitor<'de> for CharacterFrequencyVisitor {
    type Value = CharacterFrequency;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from single characters to counts")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut frequency = CharacterFrequency::new();
        while let Some((key, n)) = access.next_entry::<String, u64>()? {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => frequency.push(c, n),
                _ => {
                    return Err(de::Error::invalid_value(
                        de::Unexpected::Str(&key),
                        &"a single character",
                    ));
                }
            }
        }
        Ok(frequency)
    }
}

impl<'de> Deserialize<'de> for CharacterFrequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CharacterFrequencyVisitor)
    }
}

// stored as a JSON object, which keeps the order of the entries
impl ToSql for CharacterFrequency {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let json = serde_json::to_string(self)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(ToSqlOutput::from(json))
    }
}
impl FromSql for CharacterFrequency {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        serde_json::from_str(value.as_str()?).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
