// src/monitor/message.rs
use crate::source::{FetchError, FetchedItem};

const SEPARATOR: &str = "--------------------------------------------------";

/// Render the outbound notification for a newly observed item.
pub fn render_notification(identity: &str, item: &FetchedItem) -> String {
    let timestamp = item.observed_at.format("%Y-%m-%d %H:%M:%S IST");
    let kind = if item.is_retransmission {
        "Retweet"
    } else {
        "Original Tweet"
    };
    let tags = if item.tags.is_empty() {
        "None".to_string()
    } else {
        item.tags.join(", ")
    };
    let link = format!("https://twitter.com/i/web/status/{}", item.id);

    format!(
        "[{timestamp}] New tweet detected!\n\
         Twitter User: {identity}\n\
         Tweet ID: {id}\n\
         Type: {kind}\n\
         Hashtags: {tags}\n\
         Content: {text}\n\
         Link: {link}\n\
         {SEPARATOR}",
        id = item.id,
        text = item.text,
    )
}

/// Diagnostic sent to the requester when a poll's fetch fails, so they know
/// monitoring is degraded rather than silently dead.
pub fn render_fetch_failure(identity: &str, err: &FetchError) -> String {
    format!("Fetch for {identity} failed: {err}. Monitoring continues.")
}

/// Diagnostic for anything unexpected escaping a poll iteration.
pub fn render_worker_fault(identity: &str, err: &anyhow::Error) -> String {
    format!("An error occurred in the monitor for {identity}: {err:#}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_carries_all_fields() {
        let item = FetchedItem::new("42".into(), "RT big news #space".into());
        let msg = render_notification("nasa", &item);
        assert!(msg.contains("New tweet detected!"));
        assert!(msg.contains("Twitter User: nasa"));
        assert!(msg.contains("Tweet ID: 42"));
        assert!(msg.contains("Type: Retweet"));
        assert!(msg.contains("Hashtags: #space"));
        assert!(msg.contains("Content: RT big news #space"));
        assert!(msg.contains("Link: https://twitter.com/i/web/status/42"));
    }

    #[test]
    fn no_hashtags_renders_none() {
        let item = FetchedItem::new("43".into(), "plain text".into());
        let msg = render_notification("nasa", &item);
        assert!(msg.contains("Type: Original Tweet"));
        assert!(msg.contains("Hashtags: None"));
    }

    #[test]
    fn fetch_failure_names_the_identity() {
        let msg = render_fetch_failure("nasa", &FetchError::Status(503));
        assert!(msg.contains("nasa"));
        assert!(msg.contains("503"));
    }
}
