mod card;
mod rules;
mod deck;
mod layout;
mod game_state;

pub use card::{Card, Rank, Suit};
pub use rules::{DealConfig, DealConfigPatch, DealMode, RuleField, MAX_PER_TIME, MAX_PLAYERS};
pub use deck::{build_deck, deck_size, shuffle_in_place, single_deck};
pub use layout::{layout_for, Anchor, Seat, TableStyle, MAX_SEATED_PLAYERS};
pub use game_state::{DealOutcome, GameState, PlayerState, PILE_PREVIEW_LEN};
