use std::sync::Arc;

use tokio::time::{Duration, sleep};
use tracing::debug;
use twilight_http::Client;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker},
};

/// Delete a message after `delay_secs` on a background task.
///
/// A delay of `0` means the message is kept. Failures (already deleted,
/// missing permissions) are only logged.
pub fn schedule_message_delete(
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    delay_secs: u64,
) {
    let Some(delay) = auto_delete_delay(delay_secs) else {
        return;
    };

    tokio::spawn(async move {
        sleep(delay).await;

        if let Err(source) = http.delete_message(channel_id, message_id).await {
            debug!(
                ?source,
                channel_id = channel_id.get(),
                message_id = message_id.get(),
                "auto-delete failed"
            );
        }
    });
}

/// Delay before a reply is removed; `None` when the guild keeps replies.
pub fn auto_delete_delay(delay_secs: u64) -> Option<Duration> {
    (delay_secs > 0).then(|| Duration::from_secs(delay_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_keeps_replies() {
        assert_eq!(auto_delete_delay(0), None);
        assert_eq!(auto_delete_delay(30), Some(Duration::from_secs(30)));
    }
}
