// log.rs — Append-only JSONL audit trail.
//
// One JSON object per line. Each record carries the SHA-256 hash of the
// previous line, so inserting, deleting, or editing a record breaks the
// chain and `verify_chain` reports the first broken line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::AuditError;
use crate::record::AuditRecord;

/// Hash a JSON line, lowercase hex SHA-256.
fn hash_line(line: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(line.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// An append-only audit trail backed by a JSONL file.
pub struct AuditLog {
    writer: BufWriter<File>,
    path: PathBuf,
    /// Hash of the last line written — becomes the next record's link.
    last_hash: Option<String>,
}

impl AuditLog {
    /// Open (or create) an audit log at the given path.
    ///
    /// If the file already has content, the chain tail is recovered so
    /// new records link correctly across process restarts.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| AuditError::OpenFailed {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        let last_hash = if path.exists() {
            Self::read_last_hash(&path)?
        } else {
            None
        };

        // Append mode — existing data is never overwritten.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditError::OpenFailed {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            last_hash,
        })
    }

    /// Append a record, linking it to the previous one, and flush.
    pub fn append(&mut self, record: &mut AuditRecord) -> Result<(), AuditError> {
        record.previous_hash = self.last_hash.clone();

        let json = serde_json::to_string(record)?;
        self.last_hash = Some(hash_line(&json));

        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;

        tracing::debug!(tool = %record.tool, decision = %record.decision, "audit record appended");
        Ok(())
    }

    /// Read every record from a log file, oldest first. Blank lines are
    /// skipped.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<AuditRecord>, AuditError> {
        let file = File::open(path.as_ref()).map_err(|source| AuditError::OpenFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(AuditError::ReadFailed)?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }

        Ok(records)
    }

    /// Verify the hash chain of a log file.
    ///
    /// Hashes the raw JSON lines rather than re-serialized records, so a
    /// field-order change cannot produce a false violation.
    pub fn verify_chain(path: impl AsRef<Path>) -> Result<(), AuditError> {
        let file = File::open(path.as_ref()).map_err(|source| AuditError::OpenFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut previous_hash: Option<String> = None;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(AuditError::ReadFailed)?;
            if line.trim().is_empty() {
                continue;
            }

            let record: AuditRecord = serde_json::from_str(&line)?;
            if record.previous_hash != previous_hash {
                return Err(AuditError::IntegrityViolation {
                    line: line_num + 1,
                    expected: previous_hash.unwrap_or_else(|| "None".to_string()),
                    actual: record.previous_hash.unwrap_or_else(|| "None".to_string()),
                });
            }

            previous_hash = Some(hash_line(&line));
        }

        Ok(())
    }

    /// The path this log writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_last_hash(path: &Path) -> Result<Option<String>, AuditError> {
        let file = File::open(path).map_err(|source| AuditError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut last_line: Option<String> = None;

        for line in reader.lines() {
            let line = line.map_err(AuditError::ReadFailed)?;
            if !line.trim().is_empty() {
                last_line = Some(line);
            }
        }

        Ok(last_line.map(|line| hash_line(&line)))
    }
}
