use std::fmt;
use std::path::{Component, Path};

use anyhow::{Context, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_AUDIO_FILE, FIELD_BACKGROUND_MUSIC};

/// Upload slot a file is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    Audio,
    BackgroundMusic,
}

impl MediaSlot {
    pub fn label(&self) -> &'static str {
        match self {
            MediaSlot::Audio => "Audio file",
            MediaSlot::BackgroundMusic => "Background music",
        }
    }

    /// Multipart field name the file is sent under.
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaSlot::Audio => FIELD_AUDIO_FILE,
            MediaSlot::BackgroundMusic => FIELD_BACKGROUND_MUSIC,
        }
    }
}

impl fmt::Display for MediaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An in-memory media file selected by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    name: String,
    data: Bytes,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a local file into memory, keeping its file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        reject_parent_dir(path)?;

        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        Ok(Self::new(name, data))
    }

    /// Size of a local file from its metadata, without reading it.
    pub fn size_on_disk(path: &Path) -> Result<u64> {
        reject_parent_dir(path)?;

        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(metadata.len())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

fn reject_parent_dir(path: &Path) -> Result<()> {
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(anyhow::anyhow!("Invalid input: {}", path.display()));
    }
    Ok(())
}
