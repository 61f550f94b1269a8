//! Scanner input deduplication.

/// Memoized equality gate over externally-scanned addresses.
///
/// A camera scanner resolves the same code many times per second; only the
/// immediately repeated address is rejected. Scanning a different address
/// and then the earlier one again is accepted. Session-scoped: one instance
/// per coordinator lifetime.
#[derive(Debug, Default)]
pub struct ScanDeduplicator {
    last: Option<String>,
}

impl ScanDeduplicator {
    /// Create a deduplicator with no scan history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept or reject a scanned address.
    ///
    /// Returns `false` if `address` equals the last accepted one; otherwise
    /// records it as the new last-accepted value and returns `true`.
    pub fn accept(&mut self, address: &str) -> bool {
        if self.last.as_deref() == Some(address) {
            return false;
        }
        self.last = Some(address.to_owned());
        true
    }
}
