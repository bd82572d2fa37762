use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest player count a ruleset accepts.
pub const MAX_PLAYERS: u8 = 12;

/// Highest number of cards (or rounds) per deal.
pub const MAX_PER_TIME: u8 = 10;

/// How a single deal distributes cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealMode {
    /// The whole batch goes to one player, then the turn advances
    #[default]
    Round,
    /// One card to every player per sub-round
    Simultaneous,
}

impl DealMode {
    /// Anything other than the exact `simultaneous` label is round-robin.
    pub fn from_label(label: &str) -> Self {
        if label == "simultaneous" {
            DealMode::Simultaneous
        } else {
            DealMode::Round
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DealMode::Round => "round",
            DealMode::Simultaneous => "simultaneous",
        }
    }
}

/// Dealing ruleset. Only sanitized values are ever persisted or dealt with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealConfig {
    /// Number of 52(+2) card units in the deck, 1 or 2
    pub deck_count: u8,

    /// Add a big and a little joker to each unit
    pub include_jokers: bool,

    /// Players at the table, 1..=12
    pub player_count: u8,

    pub deal_mode: DealMode,

    /// Cards (round-robin) or rounds (simultaneous) per deal, 1..=10
    pub per_time: u8,

    /// Rebuild the deck and clear all piles after every deal
    pub reshuffle: bool,
}

impl Default for DealConfig {
    fn default() -> Self {
        Self {
            deck_count: 1,
            include_jokers: true,
            player_count: 4,
            deal_mode: DealMode::Round,
            per_time: 1,
            reshuffle: false,
        }
    }
}

impl DealConfig {
    /// Clamp and coerce every field into range.
    pub fn sanitized(&self) -> Self {
        DealConfigPatch::from(*self).sanitize()
    }

    /// Overlay `patch` on this ruleset and sanitize the result.
    pub fn merge(&self, patch: &DealConfigPatch) -> Self {
        patch.or(&DealConfigPatch::from(*self)).sanitize()
    }

    /// Fields whose values differ between `self` and `other`, in declaration order.
    pub fn changes_from(&self, other: &DealConfig) -> Vec<RuleField> {
        let mut changes = Vec::new();
        if self.deck_count != other.deck_count {
            changes.push(RuleField::DeckCount);
        }
        if self.include_jokers != other.include_jokers {
            changes.push(RuleField::IncludeJokers);
        }
        if self.player_count != other.player_count {
            changes.push(RuleField::PlayerCount);
        }
        if self.deal_mode != other.deal_mode {
            changes.push(RuleField::DealMode);
        }
        if self.per_time != other.per_time {
            changes.push(RuleField::PerTime);
        }
        if self.reshuffle != other.reshuffle {
            changes.push(RuleField::Reshuffle);
        }
        changes
    }
}

/// A partial ruleset. Numeric fields are wide so out-of-range input survives
/// until sanitization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DealConfigPatch {
    pub deck_count: Option<i64>,
    pub include_jokers: Option<bool>,
    pub player_count: Option<i64>,
    pub deal_mode: Option<DealMode>,
    pub per_time: Option<i64>,
    pub reshuffle: Option<bool>,
}

impl DealConfigPatch {
    /// Fill every field missing here from `fallback`.
    pub fn or(&self, fallback: &DealConfigPatch) -> DealConfigPatch {
        DealConfigPatch {
            deck_count: self.deck_count.or(fallback.deck_count),
            include_jokers: self.include_jokers.or(fallback.include_jokers),
            player_count: self.player_count.or(fallback.player_count),
            deal_mode: self.deal_mode.or(fallback.deal_mode),
            per_time: self.per_time.or(fallback.per_time),
            reshuffle: self.reshuffle.or(fallback.reshuffle),
        }
    }

    /// Total: missing fields take defaults, numbers are clamped, a deck count
    /// other than 2 becomes 1.
    pub fn sanitize(&self) -> DealConfig {
        let defaults = DealConfig::default();
        DealConfig {
            deck_count: if self.deck_count == Some(2) { 2 } else { 1 },
            include_jokers: self.include_jokers.unwrap_or(defaults.include_jokers),
            player_count: clamp_field(self.player_count, defaults.player_count, MAX_PLAYERS),
            deal_mode: self.deal_mode.unwrap_or_default(),
            per_time: clamp_field(self.per_time, defaults.per_time, MAX_PER_TIME),
            reshuffle: self.reshuffle.unwrap_or(defaults.reshuffle),
        }
    }
}

impl From<DealConfig> for DealConfigPatch {
    fn from(cfg: DealConfig) -> Self {
        Self {
            deck_count: Some(cfg.deck_count.into()),
            include_jokers: Some(cfg.include_jokers),
            player_count: Some(cfg.player_count.into()),
            deal_mode: Some(cfg.deal_mode),
            per_time: Some(cfg.per_time.into()),
            reshuffle: Some(cfg.reshuffle),
        }
    }
}

fn clamp_field(value: Option<i64>, default: u8, max: u8) -> u8 {
    // the clamp keeps the value inside 1..=max, so the narrowing is lossless
    value.unwrap_or(default.into()).clamp(1, max.into()) as u8
}

/// Ruleset field names, as they appear in the persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleField {
    DeckCount,
    IncludeJokers,
    PlayerCount,
    DealMode,
    PerTime,
    Reshuffle,
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleField::DeckCount => "deckCount",
            RuleField::IncludeJokers => "includeJokers",
            RuleField::PlayerCount => "playerCount",
            RuleField::DealMode => "dealMode",
            RuleField::PerTime => "perTime",
            RuleField::Reshuffle => "reshuffle",
        };
        f.write_str(name)
    }
}
