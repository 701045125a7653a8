//! Core store type and builder.

use crate::error::{Error, Result};
use crate::persist::{atomic_write, load};
use crate::serializer::JsonSerializer;
use crate::Document;
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;
use serde_json::{Number, Value};
use std::path::{Path, PathBuf};

/// Persistent key-value store backed by a single JSON file.
///
/// Use [`open`](Self::open) for a quick start or [`builder`](Self::builder)
/// to control the on-disk formatting.
///
/// The document is re-read from disk on every call, so several stores (or
/// several handles to the same path) always observe the latest persisted
/// state. Mutations take a per-store lock around the read-modify-write
/// cycle; the lock does not extend across processes.
pub struct Store {
    path: PathBuf,
    serializer: JsonSerializer,
    write_lock: Mutex<()>,
}

impl Store {
    /// Open a store at `path`, creating the file with an empty document if
    /// it doesn't exist yet. Existing content is adopted as-is and only
    /// parsed on first use.
    ///
    /// The name must look like a JSON file ("db.json", "state/app.json");
    /// anything else fails with [`Error::InvalidName`].
    pub fn open(path: impl AsRef<Path>) -> Result<Store> {
        Self::builder(path).build()
    }

    /// Start configuring a new store. Call [`.build()`](StoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> StoreBuilder {
        StoreBuilder::new(path)
    }

    // ---- reads ----

    /// Get the value stored at `key`, or `None` if absent.
    ///
    /// Absence is reported as `None`, never conflated with a stored `false`
    /// or `null`.
    pub fn fetch(&self, key: &str) -> Result<Option<Value>> {
        check_key(key)?;
        Ok(self.load_doc()?.get(key).cloned())
    }

    /// `true` if `key` is present.
    pub fn has(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        Ok(self.load_doc()?.contains_key(key))
    }

    /// The full document, unshaped.
    pub fn fetch_all(&self) -> Result<Document> {
        self.load_doc()
    }

    /// Number of entries.
    pub fn count(&self) -> Result<usize> {
        Ok(self.load_doc()?.len())
    }

    /// Values whose entry satisfies `predicate(value, key)`, in document
    /// order.
    pub fn filter<P>(&self, mut predicate: P) -> Result<Vec<Value>>
    where
        P: FnMut(&Value, &str) -> bool,
    {
        let doc = self.load_doc()?;
        let mut matches = Vec::new();
        for (key, value) in &doc {
            if predicate(value, key.as_str()) {
                matches.push(value.clone());
            }
        }
        Ok(matches)
    }

    /// First value satisfying `predicate`, scanning in document order.
    pub fn find<P>(&self, mut predicate: P) -> Result<Option<Value>>
    where
        P: FnMut(&Value, &str) -> bool,
    {
        let doc = self.load_doc()?;
        for (key, value) in &doc {
            if predicate(value, key.as_str()) {
                return Ok(Some(value.clone()));
            }
        }
        Ok(None)
    }

    /// Like [`find`](Self::find), but returns the matching key instead of
    /// its value.
    pub fn find_key<P>(&self, mut predicate: P) -> Result<Option<String>>
    where
        P: FnMut(&Value, &str) -> bool,
    {
        let doc = self.load_doc()?;
        for (key, value) in &doc {
            if predicate(value, key.as_str()) {
                return Ok(Some(key.clone()));
            }
        }
        Ok(None)
    }

    /// One value chosen uniformly at random, or `None` if the document is
    /// empty.
    pub fn random(&self) -> Result<Option<Value>> {
        let doc = self.load_doc()?;
        if doc.is_empty() {
            return Ok(None);
        }
        let idx = rand::thread_rng().gen_range(0..doc.len());
        Ok(doc.values().nth(idx).cloned())
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ---- writes ----

    /// Insert or overwrite the entry at `key`.
    ///
    /// Returns `Ok(true)` on a clean persist. A failed disk write is logged
    /// and reported as `Ok(false)`; the file keeps its previous content.
    pub fn set(&self, key: &str, value: impl Serialize) -> Result<bool> {
        check_key(key)?;
        let value = serde_json::to_value(value).map_err(|e| Error::Serialize(e.to_string()))?;
        let _guard = self.write_lock.lock();
        let mut doc = self.load_doc()?;
        doc.insert(key.to_owned(), value);
        self.persist(&doc)
    }

    /// Remove the entry at `key`. Returns `Ok(false)` without touching the
    /// file when the key is absent.
    pub fn remove(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        let _guard = self.write_lock.lock();
        let mut doc = self.load_doc()?;
        if doc.shift_remove(key).is_none() {
            return Ok(false);
        }
        self.persist(&doc)
    }

    /// Add `amount` to the number stored at `key`.
    ///
    /// Returns `Ok(false)` without writing when the key is absent. Fails
    /// with [`Error::TypeMismatch`] when the stored value is not a number
    /// and with [`Error::InvalidAmount`] when `amount` is NaN or infinite.
    pub fn add(&self, key: &str, amount: f64) -> Result<bool> {
        self.accumulate(key, amount)
    }

    /// Subtract `amount` from the number stored at `key`. Mirror of
    /// [`add`](Self::add).
    pub fn subtract(&self, key: &str, amount: f64) -> Result<bool> {
        self.accumulate(key, -amount)
    }

    // ---- internal ----

    fn accumulate(&self, key: &str, delta: f64) -> Result<bool> {
        check_key(key)?;
        if !delta.is_finite() {
            return Err(Error::InvalidAmount);
        }
        let _guard = self.write_lock.lock();
        let mut doc = self.load_doc()?;
        let current = match doc.get(key) {
            Some(Value::Number(n)) => n.clone(),
            Some(_) => return Err(Error::TypeMismatch(key.to_owned())),
            None => return Ok(false),
        };
        let next = apply_delta(&current, delta).ok_or(Error::InvalidAmount)?;
        doc.insert(key.to_owned(), Value::Number(next));
        self.persist(&doc)
    }

    fn load_doc(&self) -> Result<Document> {
        load(&self.path, &self.serializer)
    }

    fn persist(&self, doc: &Document) -> Result<bool> {
        let bytes = self.serializer.serialize(doc)?;
        match atomic_write(&self.path, &bytes) {
            Ok(()) => Ok(true),
            Err(err) => {
                log::error!("failed to persist {}: {err}", self.path.display());
                Ok(false)
            }
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidKey);
    }
    Ok(())
}

// Integer entries stay integers as long as the delta is integral and the
// sum fits in i64; everything else goes through f64. A result that f64
// can't represent as a finite number is reported as None.
fn apply_delta(current: &Number, delta: f64) -> Option<Number> {
    if delta.fract() == 0.0 && delta.abs() < i64::MAX as f64 {
        if let Some(sum) = current
            .as_i64()
            .and_then(|cur| cur.checked_add(delta as i64))
        {
            return Some(Number::from(sum));
        }
    }
    Number::from_f64(current.as_f64()? + delta)
}

// The file name must contain "json" with a word character two positions
// before it: "db.json" and "my_db.json" pass, ".json" and "data.txt" don't.
fn valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    name.match_indices("json")
        .any(|(i, _)| i >= 2 && is_word_byte(bytes[i - 2]))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`Store`].
///
/// ```rust,no_run
/// use vedudb::Store;
///
/// let db = Store::builder("db.json").pretty(true).build().unwrap();
/// ```
#[derive(Debug)]
pub struct StoreBuilder {
    path: PathBuf,
    pretty: bool,
}

impl StoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: false,
        }
    }

    /// Write human-readable JSON with indentation (default: compact).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Validate the name, create the file if missing, and return the store.
    pub fn build(self) -> Result<Store> {
        let Some(name) = self.path.to_str() else {
            return Err(Error::InvalidName(self.path.display().to_string()));
        };
        if !valid_name(name) {
            return Err(Error::InvalidName(name.to_owned()));
        }

        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };

        let store = Store {
            path: self.path,
            serializer,
            write_lock: Mutex::new(()),
        };
        if !store.path.exists() {
            let bytes = store.serializer.serialize(&Document::new())?;
            atomic_write(&store.path, &bytes)?;
        }
        Ok(store)
    }
}
