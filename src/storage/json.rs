//! JSON record files.
//!
//! A source file holds either an array of records or an object whose values
//! are records. Records that don't deserialize are logged and skipped; only
//! an unreadable file or a malformed document is an error.

use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::StorageError;

/// Reader for a JSON file of records.
pub struct JsonRecordReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonRecordReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all records from the file.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path)?;
        let document: Value =
            serde_json::from_str(&contents).map_err(|source| StorageError::Json {
                path: self.path.clone(),
                source,
            })?;

        let items = match document {
            Value::Array(items) => items,
            Value::Object(map) => object_values(map),
            _ => {
                return Err(StorageError::UnexpectedShape {
                    path: self.path.clone(),
                })
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping record {} in {:?}: {}", index, self.path, e);
                }
            }
        }

        debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

/// Values of an object of records in reading order: integer keys ascending,
/// then the remaining keys in file order.
fn object_values(map: Map<String, Value>) -> Vec<Value> {
    let mut indexed: Vec<(u32, Value)> = Vec::new();
    let mut named: Vec<Value> = Vec::new();
    for (key, value) in map {
        match key.parse::<u32>() {
            Ok(index) if index.to_string() == key => indexed.push((index, value)),
            _ => named.push(value),
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, v)| v).chain(named).collect()
}
