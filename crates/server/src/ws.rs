use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use control::{handle_command, ControlContext, Effect};
use shared::{
    error::CommandError,
    protocol::{ControlCommand, ControlReply, DisplayEvent, MessageEnvelope},
};

use crate::AppState;

pub(crate) async fn control_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| control_session(state, socket))
}

/// One operator connection. Commands are processed strictly in arrival
/// order; every failure short of a transport error is reported back on the
/// same socket and the loop keeps going.
async fn control_session(state: Arc<AppState>, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        let message = match receiver.next().await {
            Some(Ok(message)) => message,
            Some(Err(error)) => {
                warn!(%error, "control socket read failed");
                return;
            }
            // Peer closed the connection; nothing to do here.
            None => return,
        };
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => return,
            _ => continue,
        };

        let Some(reply) = process_frame(&state.control, &text).await else {
            continue;
        };
        let json = match serde_json::to_string(&reply) {
            Ok(json) => json,
            Err(error) => {
                warn!(%error, "failed to encode control reply");
                continue;
            }
        };
        if let Err(error) = sender.send(Message::Text(json)).await {
            warn!(%error, "control socket write failed");
            return;
        }
    }
}

/// Decodes and runs one control frame, returning the reply to send back,
/// if any. Show and hide stay quiet on success so the operator page does
/// not reload itself mid-show; everything else answers with a reload that
/// makes the page re-fetch the list.
pub(crate) async fn process_frame(ctx: &ControlContext, text: &str) -> Option<ControlReply> {
    let decoded = serde_json::from_str::<MessageEnvelope>(text)
        .map_err(|error| CommandError::Decode(error.to_string()))
        .and_then(ControlCommand::decode);
    let command = match decoded {
        Ok(command) => command,
        Err(error) => return Some(ControlReply::Error(error.to_string())),
    };

    match handle_command(ctx, command).await {
        Ok(Effect::Reload) => Some(ControlReply::Reload(())),
        Ok(Effect::Silent) => None,
        Err(error) => Some(ControlReply::Error(error.to_string())),
    }
}

pub(crate) async fn audience_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| audience_session(state, socket))
}

/// One audience display. Sends the current screen on connect, then
/// forwards every display event until the viewer disconnects.
async fn audience_session(state: Arc<AppState>, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = state.control.display.subscribe();

    let initial = DisplayEvent::ScreenChanged(state.control.display.current_screen());
    if let Ok(text) = serde_json::to_string(&initial) {
        if sender.send(Message::Text(text)).await.is_err() {
            return;
        }
    }

    let send_task = tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                // A slow viewer just misses events; it catches up on the
                // next one.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            };
            let Ok(text) = serde_json::to_string(&event) else {
                continue;
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_)) = receiver.next().await {}

    send_task.abort();
}

#[cfg(test)]
#[path = "tests/ws_tests.rs"]
mod tests;
