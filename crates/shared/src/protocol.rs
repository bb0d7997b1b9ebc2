use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{AudienceScreen, LowerThird, LowerThirdId},
    error::CommandError,
};

/// Raw inbound frame on the control socket. The tag is matched by hand in
/// [`ControlCommand::decode`] so an unrecognized type can be echoed back to
/// the operator by name instead of as a generic deserialization error.
#[derive(Debug, Deserialize)]
pub struct MessageEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReorderParams {
    pub id: LowerThirdId,
    pub move_up: bool,
}

/// Only the id matters for a delete; clients that send the whole record
/// are fine, the extra fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    pub id: LowerThirdId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    Save(LowerThird),
    Delete(DeleteParams),
    Show(LowerThird),
    Hide(LowerThird),
    Reorder(ReorderParams),
}

impl ControlCommand {
    pub fn decode(envelope: MessageEnvelope) -> Result<Self, CommandError> {
        match envelope.kind.as_str() {
            "saveLowerThird" => Ok(Self::Save(payload(envelope.payload)?)),
            "deleteLowerThird" => Ok(Self::Delete(payload(envelope.payload)?)),
            "showLowerThird" => Ok(Self::Show(payload(envelope.payload)?)),
            "hideLowerThird" => Ok(Self::Hide(payload(envelope.payload)?)),
            "reorderLowerThird" => Ok(Self::Reorder(payload(envelope.payload)?)),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

fn payload<T: DeserializeOwned>(value: Value) -> Result<T, CommandError> {
    serde_json::from_value(value).map_err(|error| CommandError::Decode(error.to_string()))
}

/// Replies to the operator on the control socket. The reload payload is
/// always null; the unit keeps serde emitting the field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ControlReply {
    Reload(()),
    Error(String),
}

/// Broadcast to every connected audience display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum DisplayEvent {
    ScreenChanged(AudienceScreen),
    LowerThirdContent(LowerThird),
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
