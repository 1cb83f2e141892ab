use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use serde_derive::{Deserialize, Serialize};

const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

static HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub fn is_expo_push_token(token: &str) -> bool {
    token.starts_with("ExponentPushToken[") || token.starts_with("ExpoPushToken[")
}

#[derive(Serialize)]
struct ExpoPushMessage<'a> {
    to: &'a str,
    sound: &'a str,
    title: &'a str,
    body: &'a str,
    data: serde_json::Value,
    priority: &'a str,
    #[serde(rename = "channelId")]
    channel_id: &'a str,
}

#[derive(Deserialize, Debug)]
struct ExpoPushTicket {
    status: String,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ExpoPushResponse {
    data: Vec<ExpoPushTicket>,
}

pub async fn send_push(
    expo_push_token: &str,
    title: &str,
    body: &str,
    data: serde_json::Value,
) -> Result<()> {
    if !is_expo_push_token(expo_push_token) {
        return Err(anyhow!("Invalid Expo push token format: {}", expo_push_token));
    }
    let message = ExpoPushMessage {
        to: expo_push_token,
        sound: "default",
        title,
        body,
        data,
        priority: "high",
        channel_id: "default",
    };
    let response = HTTP
        .post(EXPO_PUSH_URL)
        .json(&[message])
        .send()
        .await?
        .error_for_status()?;
    let tickets: ExpoPushResponse = response.json().await?;
    if let Some(ticket) = tickets.data.first() {
        if ticket.status == "error" {
            return Err(anyhow!(
                "Expo push rejected: {}",
                ticket.message.clone().unwrap_or_default()
            ));
        }
    }
    Ok(())
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_expo_tokens() {
        assert!(is_expo_push_token("ExponentPushToken[abc123]"));
        assert!(is_expo_push_token("ExpoPushToken[abc123]"));
    }

    #[test]
    fn rejects_fcm_style_tokens() {
        assert!(!is_expo_push_token("fcm-registration-token"));
        assert!(!is_expo_push_token(""));
    }
}
