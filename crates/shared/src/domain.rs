use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LowerThirdId(pub i64);

/// One overlay entry in the rotation. The id is 0 until the store assigns
/// one on first save; display_order positions the entry in the list and is
/// not guaranteed contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowerThird {
    #[serde(default)]
    pub id: LowerThirdId,
    pub top_text: String,
    pub bottom_text: String,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceScreen {
    Blank,
    LowerThird,
}
