//! Upload size validation applied when a file is selected.

use crate::error::ValidationError;
use crate::models::{MediaFile, MediaSlot};

/// Accept `file` for `slot` unless it is strictly larger than `max_bytes`.
///
/// Pure classification: the caller decides what to do with the slot and the
/// user-visible message.
pub fn validate_file(
    slot: MediaSlot,
    file: MediaFile,
    max_bytes: u64,
) -> Result<MediaFile, ValidationError> {
    check_size(slot, file.size(), max_bytes)?;
    Ok(file)
}

/// Size-only form of [`validate_file`], for checking a file before reading it.
pub fn check_size(slot: MediaSlot, size: u64, max_bytes: u64) -> Result<(), ValidationError> {
    if size > max_bytes {
        return Err(ValidationError::FileTooLarge {
            slot,
            size,
            limit: max_bytes,
        });
    }
    Ok(())
}
