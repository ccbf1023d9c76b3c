//! # Notification Sink
//!
//! Fire-and-forget notifications about bookings and new properties.
//!
//! The sink is an injected collaborator: production wires whatever
//! delivery channel the deployment uses, tests wire fakes. Dispatch
//! never blocks the request and a failing sink never fails the caller;
//! failures are logged and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

/// A notification about activity on a property.
#[derive(Debug, Clone)]
pub struct NewNotification {
    /// Property the activity happened on.
    pub property_id: String,

    /// Member who caused the activity.
    pub author_id: String,

    /// Human-readable message.
    pub message: String,
}

/// Delivery failure reported by a sink.
#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// A notification sink, injected into the service.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    async fn notify(&self, notification: NewNotification) -> Result<(), NotifyError>;
}

/// Sink that writes notifications to the structured log.
///
/// The default wiring when no delivery channel is configured.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: NewNotification) -> Result<(), NotifyError> {
        info!(
            property_id = %notification.property_id,
            author_id = %notification.author_id,
            message = %notification.message,
            "Notification"
        );
        Ok(())
    }
}

/// Dispatches a notification in the background.
///
/// The spawned task owns the sink handle; the request returns without
/// waiting for delivery.
pub(crate) fn dispatch(notifier: Arc<dyn Notifier>, notification: NewNotification) {
    tokio::spawn(async move {
        let property_id = notification.property_id.clone();
        if let Err(err) = notifier.notify(notification).await {
            warn!(property_id = %property_id, error = %err, "Failed to deliver notification");
        }
    });
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notifier_accepts_notifications() {
        let notifier = LogNotifier;
        let result = notifier
            .notify(NewNotification {
                property_id: "p-1".to_string(),
                author_id: "m-1".to_string(),
                message: "Member 'Alice' booked a stay.".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }
}
