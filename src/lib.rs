//! Stringlens – a small service that analyzes strings and lets you search them.
//!
//! Every string submitted to the service is analyzed once and stored together
//! with its derived properties:
//! * `length` – number of characters, whitespace included.
//! * `is_palindrome` – whether the string reads the same backwards, ignoring
//!   case and whitespace.
//! * `unique_characters` – distinct characters, ignoring case and whitespace.
//! * `word_count` – whitespace separated words.
//! * `sha256_hash` – the content hash, which is also the identity of the record.
//! * `character_frequency_map` – per character counts, case sensitive, in the
//!   order the characters first appear.
//!
//! ## Modules
//! * [`properties`] – Pure property extraction.
//! * [`datatype`] – The [`datatype::ContentHash`] and
//!   [`datatype::CharacterFrequency`] value types and their SQLite mappings.
//! * [`filter`] – [`filter::FilterSet`] and the builder validating query
//!   parameters into one.
//! * [`interpret`] – Heuristic translation of English phrases such as
//!   "palindromic strings longer than 5" into a filter set.
//! * [`persist`] – The [`persist::RecordStore`] seam and its SQLite
//!   implementation, including the translation of filter sets into SQL.
//! * [`construct`] – [`construct::StringRecord`] and the
//!   [`construct::Database`] orchestrating analysis, search and deletion.
//! * [`server`] – The HTTP routes (axum).
//! * [`settings`] – Configuration.
//!
//! ## Identity
//! A record is identified by the SHA-256 of its exact bytes. Analyzing the same
//! string twice is rejected, and lookups or deletions by value hash the given
//! value rather than consulting a reverse index.
//!
//! ## Quick Start
//! ```
//! use stringlens::construct::{Database, PersistenceMode};
//! use stringlens::interpret::interpret;
//! let db = Database::new(PersistenceMode::InMemory).unwrap();
//! db.analyze("Was it a car or a cat I saw").unwrap();
//! db.analyze("Hello World").unwrap();
//! let query = interpret("palindromic strings longer than 5").unwrap();
//! let found = db.search(query.parsed_filters).unwrap();
//! assert_eq!(found.count, 1);
//! assert!(found.data[0].properties.is_palindrome);
//! ```

pub mod construct;
pub mod datatype;
pub mod error;
pub mod filter;
pub mod interpret;
pub mod persist;
pub mod properties;
pub mod server;
pub mod settings;
