//! Address classification collaborator.

use async_trait::async_trait;

use crate::{error::ClassifyError, intent::PaymentKind};

/// Resolves a raw address string into a concrete payment kind.
///
/// Classification may involve backend lookups and is therefore async; the
/// caller bounds it with a timeout and treats timeout like any other
/// resolution failure. Implementations live outside this crate (payment-URI
/// parsing is an external concern).
#[async_trait]
pub trait AddressClassifier: Send + Sync {
    /// Classify `address` into a payment kind.
    async fn classify(&self, address: &str) -> Result<PaymentKind, ClassifyError>;
}
