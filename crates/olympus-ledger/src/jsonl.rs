// crates/olympus-ledger/src/jsonl.rs
// ============================================================================
// Module: JSONL Ledger Backend
// Description: Generic append-only, hash-chained ledger over a line-delimited
// JSON file.
// Purpose: Give every named ledger in this crate a single durable-storage
// implementation to wrap.
// Dependencies: olympus_core::interfaces, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! One line of the backing file is one JSON-encoded [`LedgerEntry<T>`].
//! `append` assigns the next monotonic index, chains the new entry to the
//! current tip by hash, and fsyncs before returning. `verify` re-walks the
//! file from scratch and never repairs a break it finds. `load` rehydrates
//! `next_index`/tip-hash bookkeeping from whatever is already on disk.
//!
//! Single-writer discipline is enforced by [`LedgerBackend::append`] taking
//! `&mut self`: the borrow checker already guarantees no two callers can
//! interleave appends to the same in-process handle. Callers that need to
//! share a ledger across threads hold it behind `Arc<Mutex<JsonlLedger<T>>>`
//! at the call site; this module does not duplicate that locking internally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;
use std::path::PathBuf;

use olympus_core::fingerprint;
use olympus_core::Fingerprint;
use olympus_core::LedgerBackend;
use olympus_core::LedgerEntry;
use olympus_core::LedgerError;
use olympus_core::LedgerIndex;
use olympus_core::VerifyReport;
use serde::de::DeserializeOwned;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of a single path component accepted by [`JsonlLedger::new`].
const MAX_PATH_COMPONENT_LENGTH: usize = 255;

/// Maximum total path length accepted by [`JsonlLedger::new`].
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

/// Number of times `append` retries a failed durable flush before giving up
/// with [`LedgerError::WriteFailed`] (§7 `LEDGER_WRITE_FAILED`).
const MAX_FLUSH_ATTEMPTS: u32 = 3;

// ============================================================================
// SECTION: Path Validation
// ============================================================================

/// Rejects paths this store will not durably manage.
fn validate_ledger_path(path: &Path) -> Result<(), LedgerError> {
    let rendered = path.to_string_lossy();
    if rendered.is_empty() {
        return Err(LedgerError::Io("ledger path must not be empty".to_string()));
    }
    if rendered.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(LedgerError::Io(format!(
            "ledger path exceeds {MAX_TOTAL_PATH_LENGTH} bytes: {rendered}"
        )));
    }
    for component in path.components() {
        let component = component.as_os_str().to_string_lossy();
        if component.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(LedgerError::Io(format!(
                "ledger path component exceeds {MAX_PATH_COMPONENT_LENGTH} bytes: {component}"
            )));
        }
    }
    Ok(())
}

/// Creates the parent directory of `path` if it does not already exist.
fn ensure_parent_dir(path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| LedgerError::Io(err.to_string()))?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Hashing Preimage
// ============================================================================

/// The exact structure fingerprinted to produce an entry's `entry_hash`.
#[derive(Serialize)]
struct EntryPreimage<'a, T> {
    index: LedgerIndex,
    payload: &'a T,
    previous_entry_hash: Option<&'a Fingerprint>,
}

fn entry_hash_of<T: Serialize>(
    index: LedgerIndex,
    payload: &T,
    previous_entry_hash: Option<&Fingerprint>,
) -> Result<Fingerprint, LedgerError> {
    let preimage = EntryPreimage { index, payload, previous_entry_hash };
    fingerprint(&preimage).map_err(LedgerError::from)
}

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// A [`LedgerBackend`] implementation over a line-delimited JSON file.
///
/// # Invariants
/// - Each line is exactly one JSON-encoded [`LedgerEntry<T>`].
/// - `next_index`/tip-hash bookkeeping always reflects the last line
///   successfully read by `new` or `load`, never a line still in flight.
pub struct JsonlLedger<T> {
    /// Backing file path.
    path: PathBuf,
    /// The index the next `append` will assign.
    next_index: LedgerIndex,
    /// The hash of the most recently appended entry, if any.
    tip_hash: Option<Fingerprint>,
    /// Carries the payload type without storing one.
    _payload: PhantomData<T>,
}

impl<T> JsonlLedger<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens the ledger at `path`, creating an empty file if none exists,
    /// and rehydrates bookkeeping from whatever entries are already there.
    ///
    /// # Errors
    /// Returns [`LedgerError`] if `path` is invalid, the parent directory
    /// cannot be created, or the existing file cannot be read.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        validate_ledger_path(&path)?;
        ensure_parent_dir(&path)?;
        if !path.exists() {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(&path)
                .map_err(|err| LedgerError::Io(err.to_string()))?;
        }
        let mut ledger =
            Self { path, next_index: LedgerIndex::FIRST, tip_hash: None, _payload: PhantomData };
        ledger.load()?;
        Ok(ledger)
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the backing file for reading.
    fn open_reader(&self) -> Result<BufReader<File>, LedgerError> {
        let file = File::open(&self.path).map_err(|err| LedgerError::Io(err.to_string()))?;
        Ok(BufReader::new(file))
    }

    /// Reads every entry currently on disk, in ledger order.
    ///
    /// Gates that reason over history (PCL's precedent scan, RLL's active
    /// singularities, IE's doomed-fingerprint registry) read through this
    /// rather than re-deriving an in-memory index from scratch each run —
    /// the append-only file is always the source of truth (spec §5).
    ///
    /// # Errors
    /// Returns [`LedgerError`] if the file cannot be read or a line fails to
    /// deserialize.
    pub fn entries(&self) -> Result<Vec<LedgerEntry<T>>, LedgerError> {
        let reader = self.open_reader()?;
        let mut out = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|err| LedgerError::Io(err.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let index = u64::try_from(out.len()).unwrap_or(u64::MAX);
            let entry: LedgerEntry<T> = serde_json::from_str(&line)
                .map_err(|err| LedgerError::Malformed { index, reason: err.to_string() })?;
            out.push(entry);
        }
        Ok(out)
    }

    /// Appends one already-serialized line to the backing file and fsyncs,
    /// retrying up to [`MAX_FLUSH_ATTEMPTS`] times.
    fn flush_line(&self, line: &str) -> Result<(), LedgerError> {
        for _ in 0 .. MAX_FLUSH_ATTEMPTS {
            let attempt = (|| -> std::io::Result<()> {
                let mut file = OpenOptions::new().append(true).open(&self.path)?;
                file.write_all(line.as_bytes())?;
                file.write_all(b"\n")?;
                file.sync_all()
            })();
            if attempt.is_ok() {
                return Ok(());
            }
        }
        Err(LedgerError::WriteFailed)
    }
}

impl<T> LedgerBackend<T> for JsonlLedger<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&mut self) -> Result<(), LedgerError> {
        let reader = self.open_reader()?;
        let mut expected_index = LedgerIndex::FIRST;
        let mut tip_hash = None;
        for line in reader.lines() {
            let line = line.map_err(|err| LedgerError::Io(err.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: LedgerEntry<T> = serde_json::from_str(&line).map_err(|err| {
                LedgerError::Malformed { index: expected_index.get(), reason: err.to_string() }
            })?;
            if entry.index != expected_index {
                return Err(LedgerError::Malformed {
                    index: expected_index.get(),
                    reason: format!("expected index {expected_index}, found {}", entry.index),
                });
            }
            tip_hash = Some(entry.entry_hash);
            expected_index = expected_index.next();
        }
        self.next_index = expected_index;
        self.tip_hash = tip_hash;
        Ok(())
    }

    fn append(&mut self, payload: T) -> Result<LedgerEntry<T>, LedgerError> {
        let index = self.next_index;
        let previous_entry_hash = self.tip_hash.clone();
        let entry_hash = entry_hash_of(index, &payload, previous_entry_hash.as_ref())?;
        let entry = LedgerEntry { index, previous_entry_hash, entry_hash: entry_hash.clone(), payload };
        let line = serde_json::to_string(&entry).map_err(|err| LedgerError::Malformed {
            index: index.get(),
            reason: err.to_string(),
        })?;
        self.flush_line(&line)?;
        self.next_index = index.next();
        self.tip_hash = Some(entry_hash);
        Ok(entry)
    }

    fn verify(&self) -> Result<VerifyReport, LedgerError> {
        let reader = self.open_reader()?;
        let mut expected_index = LedgerIndex::FIRST;
        let mut previous_hash: Option<Fingerprint> = None;
        for line in reader.lines() {
            let line = line.map_err(|err| LedgerError::Io(err.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: LedgerEntry<T> = match serde_json::from_str(&line) {
                Ok(entry) => entry,
                Err(_) => {
                    return Ok(VerifyReport { ok: false, first_break_index: Some(expected_index) })
                }
            };
            if entry.index != expected_index || entry.previous_entry_hash != previous_hash {
                return Ok(VerifyReport { ok: false, first_break_index: Some(expected_index) });
            }
            let recomputed =
                entry_hash_of(entry.index, &entry.payload, entry.previous_entry_hash.as_ref())?;
            if recomputed != entry.entry_hash {
                return Ok(VerifyReport { ok: false, first_break_index: Some(expected_index) });
            }
            previous_hash = Some(entry.entry_hash);
            expected_index = expected_index.next();
        }
        Ok(VerifyReport { ok: true, first_break_index: None })
    }

    fn len(&self) -> u64 {
        self.next_index.get()
    }
}
