//! Directory-backed store: one file per key.
//!
//! Keys are encoded into file names so that separators like `:` are safe on
//! every platform. Writes go to a temporary file first and are renamed into
//! place, so readers only ever see a complete value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};

use crate::db::backend::{KvBackend, ListResult, StoredValue};

const VALUE_EXT: &str = "json";
const TEMP_EXT: &str = "tmp";

pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create store dir: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", encode_key(key), VALUE_EXT))
    }
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[async_trait]
impl KvBackend for FileBackend {
    async fn list(&self, prefix: &str) -> Result<ListResult> {
        let mut keys = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("failed to read store dir: {}", self.dir.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(VALUE_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match decode_key(stem) {
                Some(key) if key.starts_with(prefix) => keys.push(key),
                Some(_) => {}
                None => warn!("Ignoring undecodable file name {}", path.display()),
            }
        }

        keys.sort();
        Ok(ListResult { keys })
    }

    async fn get(&self, key: &str) -> Result<Option<StoredValue>> {
        let path = self.value_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(StoredValue { value })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key);
        let temp = path.with_extension(TEMP_EXT);

        tokio::fs::write(&temp, value)
            .await
            .with_context(|| format!("failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, &path)
            .await
            .with_context(|| format!("failed to move {} into place", path.display()))?;

        debug!("Wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.value_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to delete {}", path.display())),
        }
    }
}
