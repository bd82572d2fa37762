use crate::{build_deck, layout_for, Anchor, Card, DealConfig, DealMode, Seat};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Cards shown when a pile is rendered compactly
pub const PILE_PREVIEW_LEN: usize = 10;

/// One seat at the table and everything dealt to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    /// Most recently dealt card first
    #[serde(default)]
    pub pile: VecDeque<Card>,
    #[serde(flatten)]
    pub position: Seat,
    pub anchor: Anchor,
}

impl PlayerState {
    pub fn seated(index: usize, position: Seat) -> Self {
        Self {
            name: format!("Player {}", index + 1),
            pile: VecDeque::new(),
            position,
            anchor: position.anchor(),
        }
    }

    pub fn receive(&mut self, card: Card) {
        self.pile.push_front(card);
    }

    /// The top of the pile, most recent first
    pub fn preview(&self) -> impl Iterator<Item = &Card> {
        self.pile.iter().take(PILE_PREVIEW_LEN)
    }
}

/// What a call to `GameState::deal` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealOutcome {
    Dealt { cards: usize, reshuffled: bool },
    /// Nothing left to deal; state untouched
    EmptyDeck,
    /// The ruleset seats nobody (more players than the seating chart covers)
    NoSeats,
}

/// A dealing session. The last card of `deck` is dealt next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub deck: Vec<Card>,
    pub players: Vec<PlayerState>,
    /// Round-robin turn pointer
    pub current_index: usize,
    /// Ruleset this session was built under
    pub cfg: DealConfig,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(cfg: DealConfig, rng: &mut R) -> Self {
        let players = layout_for(cfg.player_count)
            .into_iter()
            .enumerate()
            .map(|(i, seat)| PlayerState::seated(i, seat))
            .collect();

        Self {
            deck: build_deck(&cfg, rng),
            players,
            current_index: 0,
            cfg,
        }
    }

    pub fn remain(&self) -> usize {
        self.deck.len()
    }

    /// Deal one batch according to the ruleset, then apply the reshuffle policy.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DealOutcome {
        if self.deck.is_empty() {
            return DealOutcome::EmptyDeck;
        }
        if self.players.is_empty() {
            return DealOutcome::NoSeats;
        }

        let per_time = self.cfg.per_time as usize;
        let cards = match self.cfg.deal_mode {
            DealMode::Round => self.deal_round(per_time),
            DealMode::Simultaneous => self.deal_simultaneous(per_time),
        };

        let reshuffled = self.cfg.reshuffle;
        if reshuffled {
            self.reshuffle(rng);
        }

        DealOutcome::Dealt { cards, reshuffled }
    }

    /// Give up to `per_time` cards to the current player and pass the turn.
    /// Returns the number of cards dealt.
    pub fn deal_round(&mut self, per_time: usize) -> usize {
        if self.players.is_empty() {
            return 0;
        }
        let idx = self.current_index % self.players.len();

        let mut dealt = 0;
        for _ in 0..per_time {
            let Some(card) = self.deck.pop() else {
                break;
            };
            self.players[idx].receive(card);
            dealt += 1;
        }

        self.current_index = (idx + 1) % self.players.len();
        dealt
    }

    /// `per_time` rounds of one card to each player in seat order, stopping
    /// as soon as the deck runs out. The turn pointer does not move.
    pub fn deal_simultaneous(&mut self, per_time: usize) -> usize {
        let mut dealt = 0;
        'rounds: for _ in 0..per_time {
            for player in self.players.iter_mut() {
                let Some(card) = self.deck.pop() else {
                    break 'rounds;
                };
                player.receive(card);
                dealt += 1;
            }
        }
        dealt
    }

    /// Fresh shuffled deck, empty piles, turn back to the first seat.
    /// Seats are kept.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck = build_deck(&self.cfg, rng);
        for player in self.players.iter_mut() {
            player.pile.clear();
        }
        self.current_index = 0;
    }

    /// Discard this session and start over under `cfg`.
    pub fn reset<R: Rng + ?Sized>(&mut self, cfg: DealConfig, rng: &mut R) {
        *self = Self::new(cfg, rng);
    }

    pub fn cards_dealt(&self) -> usize {
        self.players.iter().map(|p| p.pile.len()).sum()
    }
}
