//! Image references and local preview handles.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

/// Counts live local handles so leaks and double releases are observable.
#[derive(Clone, Debug, Default)]
pub struct HandleTracker {
    next_id: Arc<AtomicU64>,
    live: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl HandleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `bytes` in a new handle. The owner releases it explicitly with
    /// [`LocalHandle::release`]; dropping the last clone releases it otherwise.
    pub fn acquire(&self, name: &str, bytes: Arc<[u8]>) -> LocalHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.live.fetch_add(1, Ordering::Relaxed);
        let uri = format!("local://{id}/{name}");
        debug!(%uri, len = bytes.len(), "Acquired local preview handle");
        LocalHandle {
            inner: Arc::new(HandleInner {
                id,
                uri,
                bytes: Mutex::new(Some(bytes)),
                released: AtomicBool::new(false),
                tracker: self.clone(),
            }),
        }
    }

    /// Number of handles acquired and not yet released.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Total number of releases performed so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::Relaxed)
    }
}

struct HandleInner {
    id: u64,
    uri: String,
    bytes: Mutex<Option<Arc<[u8]>>>,
    released: AtomicBool,
    tracker: HandleTracker,
}

impl HandleInner {
    fn release(&self) -> bool {
        if self.released.swap(true, Ordering::AcqRel) {
            return false;
        }
        if let Ok(mut bytes) = self.bytes.lock() {
            bytes.take();
        }
        self.tracker.live.fetch_sub(1, Ordering::Relaxed);
        self.tracker.released.fetch_add(1, Ordering::Relaxed);
        debug!(uri = %self.uri, "Released local preview handle");
        true
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        self.release();
    }
}

/// In-process stand-in for a browser object URL: the selected file's bytes
/// under a `local://` URI.
///
/// Clones share one release. Once released, every clone stops resolving to
/// bytes, so holders outside the viewer cannot keep the data alive.
#[derive(Clone)]
pub struct LocalHandle {
    inner: Arc<HandleInner>,
}

impl LocalHandle {
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn uri(&self) -> &str {
        &self.inner.uri
    }

    /// The wrapped bytes, or `None` once the handle has been released.
    pub fn bytes(&self) -> Option<Arc<[u8]>> {
        self.inner.bytes.lock().ok().and_then(|bytes| bytes.clone())
    }

    pub fn is_released(&self) -> bool {
        self.inner.released.load(Ordering::Acquire)
    }

    /// Revoke the handle for every clone. Returns false if it was already released.
    pub fn release(&self) -> bool {
        self.inner.release()
    }
}

impl PartialEq for LocalHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for LocalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalHandle").field(&self.inner.uri).finish()
    }
}

/// Something the viewer can render.
#[derive(Clone, PartialEq)]
pub enum ImageRef {
    Local(LocalHandle),
    /// A `data:` URI or an http(s) URL produced by the inference service.
    Server(String),
}

impl ImageRef {
    pub fn uri(&self) -> &str {
        match self {
            Self::Local(handle) => handle.uri(),
            Self::Server(uri) => uri,
        }
    }

    /// Revoke a local handle; server references have nothing to release.
    pub fn release(&self) -> bool {
        match self {
            Self::Local(handle) => handle.release(),
            Self::Server(_) => false,
        }
    }

    /// Short stable key for texture caches. Data URIs can be megabytes long, so
    /// they are hashed.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Local(handle) => handle.uri().to_string(),
            Self::Server(uri) if uri.starts_with("data:") => {
                let mut hasher = DefaultHasher::new();
                uri.hash(&mut hasher);
                format!("server:{:016x}:{}", hasher.finish(), uri.len())
            }
            Self::Server(uri) => uri.clone(),
        }
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(handle) => write!(f, "Local({})", handle.uri()),
            Self::Server(uri) if uri.len() > 48 => {
                let head: String = uri.chars().take(48).collect();
                write!(f, "Server({head}... {} bytes)", uri.len())
            }
            Self::Server(uri) => write!(f, "Server({uri})"),
        }
    }
}
