//! Interactive chat: stdin lines go out as messages, socket events are printed.

use anyhow::{Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};

use trustlink_core::{AuthToken, IncidentId};
use trustlink_infra::{ChatEvent, HttpBackendClient};

/// Lines starting with this prefix toggle the typing indicator instead of being sent.
const TYPING_COMMAND: &str = "/typing";
const QUIT_COMMAND: &str = "/quit";

pub async fn run_chat(
    client: &HttpBackendClient,
    incident_id: IncidentId,
    token: &AuthToken,
) -> Result<()> {
    let mut socket = client.connect_to_chat(incident_id, token)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut typing = false;

    tracing::info!(incident_id, "Chat open; type {} to leave", QUIT_COMMAND);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) if line.trim() == QUIT_COMMAND => break,
                Some(line) if line.trim() == TYPING_COMMAND => {
                    typing = !typing;
                    socket.send_typing(typing)?;
                }
                Some(line) if line.trim().is_empty() => {}
                Some(line) => socket.send_message(line)?,
                None => break,
            },
            event = socket.recv() => match event {
                Some(ChatEvent::Frame(frame)) => println!("{}", serde_json::to_string(&frame)?),
                Some(ChatEvent::Text(text)) => println!("{}", text),
                Some(ChatEvent::Closed { code, reason }) => {
                    tracing::info!(code, reason = %reason, "Chat closed");
                    return Ok(());
                }
                Some(ChatEvent::Error(err)) => bail!(err),
                None => return Ok(()),
            },
        }
    }

    socket.close();
    Ok(())
}
