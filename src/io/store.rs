//! Concurrent in-memory image storage keyed by opaque handles
//!
//! Entries are insert-once and immutable afterwards: storing mints a fresh
//! handle, and no operation ever replaces or mutates stored bytes. Reads
//! from concurrent in-flight generations share the bytes through `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Opaque identifier for a stored image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(String);

impl ImageHandle {
    /// Wrap a raw identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insert-once concurrent byte store feeding the image sampler
#[derive(Debug, Default)]
pub struct ImageStore {
    images: RwLock<HashMap<ImageHandle, Arc<[u8]>>>,
    names: RwLock<HashMap<ImageHandle, String>>,
    next_id: AtomicU64,
}

impl ImageStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store image bytes under a freshly minted handle
    ///
    /// The original filename is retained as metadata for display purposes.
    pub fn store(&self, bytes: Vec<u8>, original_name: &str) -> ImageHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = ImageHandle(format!("img-{id:08x}"));

        self.images
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.clone(), Arc::from(bytes));
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.clone(), original_name.to_string());

        handle
    }

    /// Whether a handle resolves to stored bytes
    pub fn exists(&self, handle: &ImageHandle) -> bool {
        self.images
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(handle)
    }

    /// Fetch the bytes stored under a handle
    pub fn fetch(&self, handle: &ImageHandle) -> Option<Arc<[u8]>> {
        self.images
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(handle)
            .cloned()
    }

    /// Original filename recorded when the image was stored
    pub fn original_name(&self, handle: &ImageHandle) -> Option<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(handle)
            .cloned()
    }

    /// Number of stored images
    pub fn len(&self) -> usize {
        self.images
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no images
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
