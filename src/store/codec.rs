//! Versioned binary layout for the record store.
//!
//! # File layout (v1)
//!
//! ```text
//! version      u32 LE        STORE_VERSION
//! user_count   u64 LE
//!   id | name | role | status          each: len u64 LE + UTF-8 bytes
//! log_count    u64 LE
//!   user_id | user_name | action       each: len u64 LE + UTF-8 bytes
//!   timestamp  i64 LE
//! checksum     [u8; 32]      SHA-256 of every preceding byte
//! ```
//!
//! An empty status string means the user has no status entry; the store
//! reconciles it to `OUT` on load.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::record::{ScanLog, Status, User};
use super::records::RecordStore;

/// Current version of the binary store format.
pub const STORE_VERSION: u32 = 1;

const VERSION_BYTES: usize = 4;
const CHECKSUM_BYTES: usize = 32;

/// Errors that can occur while reading or writing the binary store.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The version tag is not the one this build understands.
    #[error("Unsupported store version: {found}. Current version is {expected}.")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The data ended before a complete record was read.
    #[error("Store data truncated at byte {offset}")]
    Truncated { offset: usize },

    /// A string field is not valid UTF-8.
    #[error("Invalid UTF-8 in string field at byte {offset}")]
    InvalidUtf8 { offset: usize },

    /// An action or status tag is neither `IN` nor `OUT`.
    #[error("Invalid action tag: '{0}'")]
    InvalidAction(String),

    /// The trailing SHA-256 does not match the content.
    #[error("Store integrity check failed: checksum mismatch")]
    ChecksumMismatch,

    /// Bytes remain after the last log record.
    #[error("{0} unexpected trailing bytes after log table")]
    TrailingBytes(usize),
}

/// Serialize a store to bytes.
#[must_use]
pub fn encode(store: &RecordStore) -> Vec<u8> {
    let users: Vec<(User, Option<Status>)> = store
        .users()
        .iter()
        .map(|user| (user.clone(), Some(store.status_of(&user.id))))
        .collect();
    encode_parts(&users, store.logs())
}

/// Serialize users (with optional status) and logs to bytes.
///
/// `None` status is written as an empty string.
#[must_use]
pub fn encode_parts(users: &[(User, Option<Status>)], logs: &[ScanLog]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&STORE_VERSION.to_le_bytes());

    put_len(&mut buf, users.len());
    for (user, status) in users {
        put_str(&mut buf, &user.id);
        put_str(&mut buf, &user.name);
        put_str(&mut buf, &user.role);
        put_str(&mut buf, status.map_or("", Status::as_str));
    }

    put_len(&mut buf, logs.len());
    for log in logs {
        put_str(&mut buf, &log.user_id);
        put_str(&mut buf, &log.user_name);
        put_str(&mut buf, log.action.as_str());
        buf.extend_from_slice(&log.timestamp.to_le_bytes());
    }

    let checksum = Sha256::digest(&buf);
    buf.extend_from_slice(&checksum);
    buf
}

/// Parse bytes produced by [`encode`] into a reconciled store.
///
/// # Errors
///
/// Returns a [`CodecError`] describing the first problem found. The
/// version tag is checked before anything else.
pub fn decode(bytes: &[u8]) -> Result<RecordStore, CodecError> {
    let mut reader = Reader::new(bytes);

    let version = reader.u32()?;
    if version != STORE_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: version,
            expected: STORE_VERSION,
        });
    }

    if bytes.len() < VERSION_BYTES + CHECKSUM_BYTES {
        return Err(CodecError::Truncated {
            offset: bytes.len(),
        });
    }
    let (body, stored) = bytes.split_at(bytes.len() - CHECKSUM_BYTES);
    if Sha256::digest(body).as_slice() != stored {
        return Err(CodecError::ChecksumMismatch);
    }
    let mut reader = Reader::new(body);
    reader.u32()?;

    let user_count = reader.len()?;
    let mut users = Vec::with_capacity(user_count.min(reader.remaining()));
    for _ in 0..user_count {
        let id = reader.string()?;
        let name = reader.string()?;
        let role = reader.string()?;
        let status = match reader.string()?.as_str() {
            "" => None,
            tag => Some(parse_tag(tag)?),
        };
        users.push((User { id, name, role }, status));
    }

    let log_count = reader.len()?;
    let mut logs = Vec::with_capacity(log_count.min(reader.remaining()));
    for _ in 0..log_count {
        let user_id = reader.string()?;
        let user_name = reader.string()?;
        let action = parse_tag(&reader.string()?)?;
        let timestamp = reader.i64()?;
        logs.push(ScanLog {
            user_id,
            user_name,
            action,
            timestamp,
        });
    }

    if reader.remaining() > 0 {
        return Err(CodecError::TrailingBytes(reader.remaining()));
    }

    Ok(RecordStore::from_parts(users, logs))
}

/// Write the whole store to `path`, replacing any previous content.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be created or written.
pub fn save(store: &RecordStore, path: &Path) -> Result<(), CodecError> {
    let bytes = encode(store);
    let io_err = |source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(&bytes).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    log::debug!(
        "Saved {} users and {} logs to {} ({} bytes)",
        store.total_users(),
        store.total_scans(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Read a store from `path`.
///
/// A missing file is not an error and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file exists but cannot be read, or
/// any decoding error from [`decode`].
pub fn load(path: &Path) -> Result<Option<RecordStore>, CodecError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CodecError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let store = decode(&bytes)?;
    log::info!(
        "Loaded {} users and {} logs from {}",
        store.total_users(),
        store.total_scans(),
        path.display()
    );
    Ok(Some(store))
}

fn parse_tag(tag: &str) -> Result<Status, CodecError> {
    tag.parse()
        .map_err(|_| CodecError::InvalidAction(tag.to_string()))
}

fn put_len(buf: &mut Vec<u8>, len: usize) {
    buf.extend_from_slice(&(len as u64).to_le_bytes());
}

fn put_str(buf: &mut Vec<u8>, s: &str) {
    put_len(buf, s.len());
    buf.extend_from_slice(s.as_bytes());
}

/// Bounds-checked cursor over a byte slice.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::Truncated { offset: self.pos });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_le_bytes(self.array()?))
    }

    fn len(&mut self) -> Result<usize, CodecError> {
        let offset = self.pos;
        let len = u64::from_le_bytes(self.array()?);
        usize::try_from(len).map_err(|_| CodecError::Truncated { offset })
    }

    fn string(&mut self) -> Result<String, CodecError> {
        let len = self.len()?;
        let offset = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }
}
