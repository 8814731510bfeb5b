//! Preview handles and the stores that back them.

use crate::FileCandidate;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Opaque, locally resolvable reference to a selected file's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allocates and releases preview resources.
///
/// Every handle returned by `create` is passed back to `revoke` exactly once
/// by the controller.
pub trait PreviewStore {
    fn create(&mut self, file: &FileCandidate) -> PreviewHandle;
    fn revoke(&mut self, handle: PreviewHandle);
}

/// In-memory object URL registry (`blob:ctscan/<n>`).
#[derive(Debug, Default)]
pub struct BlobRegistry {
    next_id: u64,
    blobs: HashMap<PreviewHandle, Blob>,
    revoked: u64,
}

#[derive(Debug)]
struct Blob {
    mime: String,
    bytes: Arc<[u8]>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes and MIME type behind a live handle.
    pub fn resolve(&self, handle: &PreviewHandle) -> Option<(&str, &[u8])> {
        self.blobs
            .get(handle)
            .map(|blob| (blob.mime.as_str(), &blob.bytes[..]))
    }

    /// Number of handles created and not yet revoked.
    pub fn live(&self) -> usize {
        self.blobs.len()
    }

    pub fn revoked(&self) -> u64 {
        self.revoked
    }
}

impl PreviewStore for BlobRegistry {
    fn create(&mut self, file: &FileCandidate) -> PreviewHandle {
        self.next_id += 1;
        let handle = PreviewHandle::new(format!("blob:ctscan/{}", self.next_id));
        self.blobs.insert(
            handle.clone(),
            Blob {
                mime: file.mime.clone(),
                bytes: Arc::clone(&file.bytes),
            },
        );
        handle
    }

    fn revoke(&mut self, handle: PreviewHandle) {
        if self.blobs.remove(&handle).is_some() {
            self.revoked += 1;
        } else {
            tracing::warn!("revoke of unknown preview handle {handle}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_resolve_until_revoked() {
        let mut registry = BlobRegistry::new();
        let file = FileCandidate::new("a.png", "image/png", b"abc".to_vec());
        let first = registry.create(&file);
        let second = registry.create(&file);
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("blob:ctscan/"));
        assert_eq!(registry.resolve(&first), Some(("image/png", &b"abc"[..])));
        assert_eq!(registry.live(), 2);

        registry.revoke(first.clone());
        assert_eq!(registry.resolve(&first), None);
        assert_eq!(registry.live(), 1);
        assert_eq!(registry.revoked(), 1);
    }

    #[test]
    fn revoking_twice_is_counted_once() {
        let mut registry = BlobRegistry::new();
        let file = FileCandidate::new("a.png", "image/png", b"abc".to_vec());
        let handle = registry.create(&file);
        registry.revoke(handle.clone());
        registry.revoke(handle);
        assert_eq!(registry.revoked(), 1);
        assert_eq!(registry.live(), 0);
    }
}
