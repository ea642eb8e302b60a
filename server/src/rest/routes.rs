//! Endpoint Paths
//!
//! Paths are relative to the versioned API base.

use std::borrow::Cow;

/// Placeholder logged in place of an interaction token.
pub const REDACTED: &str = "[redacted]";

/// `applications/{app}[/guilds/{guild}]/commands`
pub fn commands(application_id: &str, guild_id: Option<&str>) -> String {
    match guild_id {
        Some(guild_id) => format!("applications/{application_id}/guilds/{guild_id}/commands"),
        None => format!("applications/{application_id}/commands"),
    }
}

/// `applications/{app}[/guilds/{guild}]/commands/{command}`
pub fn command(application_id: &str, guild_id: Option<&str>, command_id: &str) -> String {
    format!("{}/{command_id}", commands(application_id, guild_id))
}

/// `webhooks/{app}/{token}`
pub fn followups(application_id: &str, token: &str) -> String {
    format!("webhooks/{application_id}/{token}")
}

/// `webhooks/{app}/{token}/messages/{message}`
pub fn followup(application_id: &str, token: &str, message_id: &str) -> String {
    format!("{}/messages/{message_id}", followups(application_id, token))
}

/// `webhooks/{app}/{token}/messages/@original`
pub fn original_response(application_id: &str, token: &str) -> String {
    followup(application_id, token, "@original")
}

/// `endpoint` with the interaction token of a webhook path masked.
///
/// Webhook paths carry the token as a credential, so only this form may be
/// logged. Other paths are returned unchanged.
pub fn redacted(endpoint: &str) -> Cow<'_, str> {
    let trimmed = endpoint.trim_start_matches('/');
    let Some(rest) = trimmed.strip_prefix("webhooks/") else {
        return Cow::Borrowed(endpoint);
    };
    let mut segments = rest.splitn(3, '/');
    let (Some(application_id), Some(token)) = (segments.next(), segments.next()) else {
        return Cow::Borrowed(endpoint);
    };
    // the token segment may carry the query string when nothing follows it
    let query = token.find('?').map_or("", |i| &token[i..]);
    match segments.next() {
        Some(tail) => Cow::Owned(format!("webhooks/{application_id}/{REDACTED}/{tail}")),
        None => Cow::Owned(format!("webhooks/{application_id}/{REDACTED}{query}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_paths() {
        assert_eq!(commands("1", None), "applications/1/commands");
        assert_eq!(
            command("1", Some("2"), "3"),
            "applications/1/guilds/2/commands/3"
        );
    }

    #[test]
    fn webhook_paths() {
        assert_eq!(followups("1", "tok"), "webhooks/1/tok");
        assert_eq!(followup("1", "tok", "9"), "webhooks/1/tok/messages/9");
        assert_eq!(
            original_response("1", "tok"),
            "webhooks/1/tok/messages/@original"
        );
    }

    #[test]
    fn webhook_tokens_are_redacted() {
        assert_eq!(
            redacted(&original_response("1", "secret")),
            "webhooks/1/[redacted]/messages/@original"
        );
        assert_eq!(
            redacted(&format!("{}?wait=true", followups("1", "secret"))),
            "webhooks/1/[redacted]?wait=true"
        );
        assert_eq!(redacted("/webhooks/1/secret"), "webhooks/1/[redacted]");
        assert_eq!(
            redacted(&command("1", Some("2"), "3")),
            "applications/1/guilds/2/commands/3"
        );
        assert_eq!(redacted("webhooks/1"), "webhooks/1");
    }
}
