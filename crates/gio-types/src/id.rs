//! Request identifiers.
//!
//! The host divorces a permission request from its response by an
//! opaque integer code. [`RequestId`] is that code, and
//! [`RequestIdAllocator`] hands out codes that never repeat within one
//! allocator's lifetime.

use serde::{Deserialize, Serialize};

/// Correlation code passed to the host with a permission request and
/// echoed back with the response.
///
/// # Example
///
/// ```
/// use gio_types::RequestId;
///
/// let id = RequestId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "req:7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u32);

impl RequestId {
    /// Wraps a raw request code (as delivered by a host callback).
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw request code.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for RequestId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req:{}", self.0)
    }
}

/// Monotonic [`RequestId`] source.
///
/// Codes start at 1 and strictly increase. Once the space is spent the
/// allocator returns `None` instead of wrapping, so a late response can
/// never be attributed to a newer request.
///
/// Hosts that only echo the low 16 bits of a request code need
/// [`with_max`](Self::with_max)`(`[`HOST_CODE_MAX`](Self::HOST_CODE_MAX)`)`.
///
/// # Example
///
/// ```
/// use gio_types::{RequestId, RequestIdAllocator};
///
/// let mut ids = RequestIdAllocator::new();
/// assert_eq!(ids.allocate(), Some(RequestId::new(1)));
/// assert_eq!(ids.allocate(), Some(RequestId::new(2)));
/// assert_eq!(ids.issued(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RequestIdAllocator {
    first: u32,
    last: u32,
    next: u32,
    exhausted: bool,
}

impl RequestIdAllocator {
    /// Largest request code a 16-bit host callback can carry.
    pub const HOST_CODE_MAX: u32 = 0xFFFF;

    /// Creates an allocator whose first code is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates an allocator whose first code is `first`.
    ///
    /// Hosts that reserve low codes for other callers can start higher.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self {
            first,
            last: u32::MAX,
            next: first,
            exhausted: false,
        }
    }

    /// Caps the codes handed out at `last` (inclusive).
    #[must_use]
    pub fn with_max(mut self, last: u32) -> Self {
        self.last = last;
        self
    }

    /// Highest code this allocator will hand out.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.last
    }

    /// Allocates the next code, or `None` once the space is exhausted.
    pub fn allocate(&mut self) -> Option<RequestId> {
        if self.exhausted || self.next > self.last {
            return None;
        }
        let id = RequestId(self.next);
        if self.next == self.last {
            self.exhausted = true;
        } else {
            self.next += 1;
        }
        Some(id)
    }

    /// Number of codes handed out so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        let spent = u64::from(self.next).saturating_sub(u64::from(self.first));
        if self.exhausted {
            spent + 1
        } else {
            spent
        }
    }
}

impl Default for RequestIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
