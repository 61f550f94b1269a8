//! Scripted address classifiers.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use filament_core::{AddressClassifier, ClassifyError, PaymentKind};

/// Classifier returning the same outcome for every address.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    outcome: Result<PaymentKind, ClassifyError>,
}

impl FixedClassifier {
    /// Classifier that resolves every address to `kind`.
    pub fn resolving(kind: PaymentKind) -> Self {
        Self { outcome: Ok(kind) }
    }

    /// Classifier that fails every address with `error`.
    pub fn failing(error: ClassifyError) -> Self {
        Self { outcome: Err(error) }
    }
}

#[async_trait]
impl AddressClassifier for FixedClassifier {
    async fn classify(&self, _address: &str) -> Result<PaymentKind, ClassifyError> {
        self.outcome.clone()
    }
}

/// Classifier with a per-address table; unknown addresses are malformed.
#[derive(Debug, Clone, Default)]
pub struct TableClassifier {
    entries: HashMap<String, PaymentKind>,
}

impl TableClassifier {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known address.
    #[must_use]
    pub fn with(mut self, address: impl Into<String>, kind: PaymentKind) -> Self {
        self.entries.insert(address.into(), kind);
        self
    }
}

#[async_trait]
impl AddressClassifier for TableClassifier {
    async fn classify(&self, address: &str) -> Result<PaymentKind, ClassifyError> {
        self.entries
            .get(address)
            .cloned()
            .ok_or_else(|| ClassifyError::Malformed(address.to_owned()))
    }
}

/// Classifier that never resolves. Drives the timeout path.
#[derive(Debug, Clone, Copy, Default)]
pub struct StallingClassifier;

impl StallingClassifier {
    /// Create a stalling classifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AddressClassifier for StallingClassifier {
    async fn classify(&self, _address: &str) -> Result<PaymentKind, ClassifyError> {
        std::future::pending().await
    }
}

/// Wrapper delaying the inner classifier by a fixed duration.
///
/// Combined with a paused clock this makes in-flight classifications
/// observable: tests can stop or supersede the runtime while the delay is
/// pending.
pub struct DelayedClassifier {
    delay: std::time::Duration,
    inner: Arc<dyn AddressClassifier>,
}

impl DelayedClassifier {
    /// Delay `inner` by `delay`.
    pub fn new(delay: std::time::Duration, inner: Arc<dyn AddressClassifier>) -> Self {
        Self { delay, inner }
    }
}

#[async_trait]
impl AddressClassifier for DelayedClassifier {
    async fn classify(&self, address: &str) -> Result<PaymentKind, ClassifyError> {
        tokio::time::sleep(self.delay).await;
        self.inner.classify(address).await
    }
}

/// Wrapper counting how often the inner classifier is consulted.
pub struct CountingClassifier {
    inner: Arc<dyn AddressClassifier>,
    count: AtomicUsize,
}

impl CountingClassifier {
    /// Wrap `inner`.
    pub fn new(inner: Arc<dyn AddressClassifier>) -> Self {
        Self { inner, count: AtomicUsize::new(0) }
    }

    /// Number of classifications started so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressClassifier for CountingClassifier {
    async fn classify(&self, address: &str) -> Result<PaymentKind, ClassifyError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.classify(address).await
    }
}
