//! Inbound message and call resolution.

use crate::notify::Notifier;
use ride_store::Records;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Spoken fallback for calls that match no ride.
const UNKNOWN_CALLER_ANNOUNCEMENT: &str =
    "Sorry, we cannot identify your transaction. Make sure you call in from the number you registered.";

/// What the voice carrier should do with an inbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallInstruction {
    /// Bridge the call to the counterpart, hiding the caller id behind the
    /// proxy number.
    Transfer { destination: String, mask: bool },
    /// Play an announcement instead of connecting.
    Announce {
        message: String,
        language: String,
        voice: String,
    },
}

impl CallInstruction {
    fn announce_unknown() -> Self {
        CallInstruction::Announce {
            message: UNKNOWN_CALLER_ANNOUNCEMENT.to_string(),
            language: "en-GB".to_string(),
            voice: "female".to_string(),
        }
    }

    /// Render the call-control markup the voice carrier executes.
    pub fn to_xml(&self) -> String {
        match self {
            CallInstruction::Transfer { destination, mask } => format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><Transfer destination="{}" mask="{}" />"#,
                destination, mask
            ),
            CallInstruction::Announce {
                message,
                language,
                voice,
            } => format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><Say language="{}" voice="{}">{}</Say>"#,
                language, voice, message
            ),
        }
    }
}

/// Relay an inbound text to the counterpart of the matching ride.
///
/// Returns the counterpart number when one was found. Several rides can
/// match the same (source, proxy) pair; the first registered wins. Delivery
/// problems are logged and swallowed, and the webhook layer acknowledges
/// the carrier regardless of the outcome.
pub async fn relay_message(
    records: &RwLock<Records>,
    notifier: &dyn Notifier,
    source_number: &str,
    body: &str,
    proxy_number: &str,
) -> Option<String> {
    let contacts = {
        let records = records.read().await;
        records.find_ride_by_proxy_and_party(proxy_number, source_number)
    };

    let Some(contacts) = contacts else {
        warn!(
            source = %source_number,
            proxy = %proxy_number,
            "Could not find a ride for this source/proxy pair"
        );
        return None;
    };

    // The lookup already matched the source against both parties; a miss
    // here means the records changed shape underneath us.
    let Some(counterpart) = contacts.counterpart_of(source_number) else {
        warn!(
            source = %source_number,
            proxy = %proxy_number,
            "Matched ride has no counterpart for this source"
        );
        return None;
    };

    match notifier.send(proxy_number, counterpart, body).await {
        Ok(()) => info!(from = %source_number, to = %counterpart, "Forwarded text"),
        Err(e) => {
            warn!(from = %source_number, to = %counterpart, error = %e, "Failed to forward text")
        }
    }

    Some(counterpart.to_string())
}

/// Decide how the voice carrier should handle an inbound call.
///
/// Same matching as [`relay_message`]: on a match the call is transferred
/// to the counterpart with the caller id masked, otherwise the caller hears
/// an announcement.
pub async fn resolve_call(
    records: &RwLock<Records>,
    source_number: &str,
    proxy_number: &str,
) -> CallInstruction {
    let contacts = {
        let records = records.read().await;
        records.find_ride_by_proxy_and_party(proxy_number, source_number)
    };

    match contacts
        .as_ref()
        .and_then(|c| c.counterpart_of(source_number))
    {
        Some(counterpart) => {
            info!(from = %source_number, to = %counterpart, "Transferring call");
            CallInstruction::Transfer {
                destination: counterpart.to_string(),
                mask: true,
            }
        }
        None => {
            warn!(
                source = %source_number,
                proxy = %proxy_number,
                "Could not find a ride for this caller"
            );
            CallInstruction::announce_unknown()
        }
    }
}
