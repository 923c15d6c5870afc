//! Process-wide low-memory hooks.
//!
//! The host may signal memory pressure while no surface-bearing
//! container is in the foreground, so the hint is addressed to a
//! process-wide registry rather than to one surface instance.
//!
//! # Architecture
//!
//! ```text
//! container.on_low_memory()
//!        │
//!        ▼
//! LifecycleForwarder ──► LowMemoryRegistry::dispatch()
//!                              │
//!                              ├──► hook A (surface glyph cache)
//!                              └──► hook B (texture pool)
//! ```
//!
//! Dispatch is a best-effort hint: hooks cannot fail and nobody waits
//! for them to finish trimming.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Receives process-wide low-memory hints.
pub trait LowMemoryHook: Send + Sync {
    /// Release whatever can be rebuilt later.
    fn on_low_memory(&self);
}

impl<F> LowMemoryHook for F
where
    F: Fn() + Send + Sync,
{
    fn on_low_memory(&self) {
        self()
    }
}

/// Handle returned by [`LowMemoryRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type Entry = (HookId, Arc<dyn LowMemoryHook>);

/// Registry of [`LowMemoryHook`]s.
///
/// # Example
///
/// ```
/// use gio_surface::LowMemoryRegistry;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let registry = LowMemoryRegistry::new();
/// let trims = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&trims);
///
/// let id = registry.register(Arc::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
/// assert_eq!(registry.dispatch(), 1);
/// assert_eq!(trims.load(Ordering::SeqCst), 1);
///
/// assert!(registry.unregister(id));
/// assert_eq!(registry.dispatch(), 0);
/// ```
pub struct LowMemoryRegistry {
    hooks: RwLock<Vec<Entry>>,
    next_id: AtomicU64,
}

impl LowMemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The registry shared by the whole process.
    #[must_use]
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<LowMemoryRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Adds a hook and returns its handle.
    pub fn register(&self, hook: Arc<dyn LowMemoryHook>) -> HookId {
        let id = HookId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.hooks.write().push((id, hook));
        id
    }

    /// Removes a hook. Returns `false` if it was not registered.
    pub fn unregister(&self, id: HookId) -> bool {
        let mut hooks = self.hooks.write();
        let before = hooks.len();
        hooks.retain(|(existing, _)| *existing != id);
        hooks.len() != before
    }

    /// Delivers the hint to every hook and returns how many were called.
    ///
    /// Hooks run outside the lock, so a hook may register or
    /// unregister others without deadlocking.
    pub fn dispatch(&self) -> usize {
        let snapshot: Vec<Arc<dyn LowMemoryHook>> = self
            .hooks
            .read()
            .iter()
            .map(|(_, hook)| Arc::clone(hook))
            .collect();

        tracing::debug!(hooks = snapshot.len(), "low-memory dispatch");
        for hook in &snapshot {
            hook.on_low_memory();
        }
        snapshot.len()
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    /// Returns `true` if no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }
}

impl Default for LowMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LowMemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LowMemoryRegistry")
            .field("hooks", &self.len())
            .finish()
    }
}
