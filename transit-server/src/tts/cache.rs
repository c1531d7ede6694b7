//! On-disk cache of synthesized audio.
//!
//! Files are named by the SHA-256 of the spoken text. Each write goes to its
//! own uniquely named temporary file which is then renamed into place, so a
//! reader never sees a half-written clip and concurrent writers of the same
//! phrase never share a file.

use std::io::ErrorKind;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use super::error::TtsError;

/// Directory of cached MP3 clips.
#[derive(Debug, Clone)]
pub struct AudioCache {
    dir: PathBuf,
}

impl AudioCache {
    /// Open the cache, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, TtsError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Cache key for a piece of text: lowercase hex SHA-256.
    pub fn key(text: &str) -> String {
        hex::encode(Sha256::digest(text.as_bytes()))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.mp3"))
    }

    /// Read the clip for `text`, if cached.
    pub async fn get(&self, text: &str) -> Result<Option<Vec<u8>>, TtsError> {
        match tokio::fs::read(self.path_for(&Self::key(text))).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store the clip for `text`.
    pub async fn put(&self, text: &str, audio: &[u8]) -> Result<(), TtsError> {
        let key = Self::key(text);
        let tmp = tempfile::Builder::new()
            .prefix(&key)
            .suffix(".part")
            .tempfile_in(&self.dir)?
            .into_temp_path();

        tokio::fs::write(&tmp, audio).await?;
        tmp.persist(self.path_for(&key)).map_err(|e| e.error)?;

        Ok(())
    }
}
