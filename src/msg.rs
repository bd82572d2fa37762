use dealing::{Anchor, Card, DealConfig, DealMode, RuleField, TableStyle};
use serde::Serialize;

/// Setup screen actions. Every one of them persists the resulting ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupMsg {
    SetDeckCount { deck_count: u8 },
    ToggleJokers {},
    IncPlayers {},
    DecPlayers {},
    SetDealMode { mode: DealMode },
    IncPerTime {},
    DecPerTime {},
    SetReshuffle { reshuffle: bool },
}

/// Game screen actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMsg {
    Deal {},
    /// Throw the current session away and start over under the live rules
    Reset {},
}

/// Result of opening the game screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Resumed,
    Started,
    /// A saved session exists under different rules. Nothing was changed;
    /// call `Table::open_confirmed` to discard it.
    ConfirmRequired { changes: Vec<RuleField> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Short message for the user, if the action warrants one
    pub notice: Option<String>,
    pub attributes: Vec<(String, String)>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    pub cfg: DealConfig,
    pub remain: usize,
    pub current_index: usize,
    pub players: Vec<PlayerSummary>,
    pub style: TableStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub name: String,
    pub x: u8,
    pub y: u8,
    pub anchor: Anchor,
    pub pile_size: usize,
    /// Most recent first, capped at the preview length
    pub top_cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PileResponse {
    pub name: String,
    pub pile: Vec<Card>,
}
