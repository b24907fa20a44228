//! Request staggering for rate-limit avoidance.
//!
//! Fan-out stages pre-compute one deadline per item so that concurrent
//! completion requests leave at a fixed pace instead of bursting. This is
//! preventive pacing, not reactive backoff: there is no retry here.

use std::time::Duration;

use tokio::time::Instant;

/// Default spacing between staggered requests.
pub const DEFAULT_STAGGER: Duration = Duration::from_secs(10);

/// Default spacing for the component stage, which tolerates a tighter pace.
pub const COMPONENT_STAGGER: Duration = Duration::from_secs(1);

/// Computes `count` deadlines spaced `delay` apart, starting one full
/// interval from now: `deadline[i] = now + delay * (i + 1)`.
///
/// The first item is deliberately delayed by a whole interval rather than
/// issued immediately, and the spacing is anchored to the call time, not to
/// how long prior work takes.
pub fn stagger(count: usize, delay: Duration) -> Vec<Instant> {
    let now = Instant::now();
    (0..count as u32).map(|i| now + delay * (i + 1)).collect()
}

/// Suspends until `deadline`. Deadlines already in the past resolve
/// immediately; the wait is never negative. Resolution is subject to the
/// runtime's timer granularity.
pub async fn wait_until(deadline: Instant) {
    tokio::time::sleep_until(deadline).await;
}
