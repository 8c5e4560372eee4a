//! Hint sink trait — the seam between workflows and the hint channel.

use crate::events::EnrollmentEvent;

/// Fire-and-forget publisher for enrollment hints.
///
/// Workflows publish through this trait so that the service layer never
/// depends on the real-time engine directly. Implementations must absorb
/// every delivery problem: publishing is best-effort by contract and a
/// failed or unheard hint must never fail the durable mutation that
/// preceded it.
pub trait HintSink: Send + Sync + std::fmt::Debug + 'static {
    /// Publish a hint without blocking on subscriber delivery.
    fn publish_hint(&self, event: EnrollmentEvent);
}
