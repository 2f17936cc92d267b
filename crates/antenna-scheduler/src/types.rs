use std::sync::Arc;

use antenna_core::{InvocationId, ServiceConfig};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A delayed run waiting for its timer.
///
/// Created when a service with a non-zero delay is scheduled and removed by
/// the timer task right before the commands start. Nothing else touches it:
/// later schedule requests for the same service see it and back off.
#[derive(Debug)]
pub struct PendingInvocation {
    /// Id shared by every log line of this run.
    pub id: InvocationId,

    /// Descriptor captured at schedule time.
    pub service: Arc<ServiceConfig>,

    /// Payload of the first request in the burst. This is what runs.
    pub payload: String,

    /// When the timer was armed.
    pub armed_at: Instant,

    /// The sleeping timer task.
    pub timer: JoinHandle<()>,
}
