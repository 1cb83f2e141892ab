use a2::{
    Client, DefaultNotificationBuilder, Endpoint, NotificationBuilder, NotificationOptions,
    client::ClientConfig,
};
use std::fs::File;

pub async fn send_notification(
    sandbox: bool,
    device_token: String,
    title: String,
    message: String,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let key_file: String;
    let team_id = String::from("Q7R2M8WHEE");
    let key_id: String;
    if sandbox {
        key_file = String::from("/app/cert/apple/Sandbox_84KQW2PLZN.p8");
        key_id = String::from("84KQW2PLZN");
    } else {
        key_file = String::from("/app/cert/apple/Production_6TXB4RMJCD.p8");
        key_id = String::from("6TXB4RMJCD");
    }
    let topic: Option<String> = String::from("app.wheelio.wheelio-rider-swift").into();

    // Read the private key from the disk
    let private_key = File::open(key_file)?;

    let endpoint = if sandbox {
        Endpoint::Sandbox
    } else {
        Endpoint::Production
    };

    let client_config = ClientConfig::new(endpoint);
    let client = Client::token(private_key, key_id, team_id, client_config)?;

    let options = NotificationOptions {
        apns_topic: topic.as_deref(),
        ..Default::default()
    };

    let builder = DefaultNotificationBuilder::new()
        .set_title(title.as_ref())
        .set_body(message.as_ref())
        .set_sound("default");

    let payload = builder.build(device_token.as_ref(), options);
    let response = client.send(payload).await?;

    println!("Sent: {:?}", response);

    Ok(())
}
