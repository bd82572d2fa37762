use serde::{Deserialize, Serialize};

/// Largest table the seating chart covers. Bigger rulesets are valid but
/// get no seats.
pub const MAX_SEATED_PLAYERS: u8 = 8;

/// Seats lower than this (percent from the top) put the label below the pile.
const BOTTOM_ANCHOR_THRESHOLD: u8 = 60;

/// Seat position in percent of the table area. (50, 50) is the dealing spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub x: u8,
    pub y: u8,
}

impl Seat {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::for_y(self.y)
    }
}

/// Which side of the pile the player's label sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Bottom,
}

impl Anchor {
    pub fn for_y(y: u8) -> Self {
        if y > BOTTOM_ANCHOR_THRESHOLD {
            Anchor::Bottom
        } else {
            Anchor::Top
        }
    }
}

const fn s(x: u8, y: u8) -> Seat {
    Seat::new(x, y)
}

const ONE: [Seat; 1] = [s(50, 18)];
const TWO: [Seat; 2] = [s(50, 18), s(50, 82)];
const THREE: [Seat; 3] = [s(50, 18), s(12, 78), s(88, 78)];
const FOUR: [Seat; 4] = [s(50, 15), s(88, 50), s(50, 78), s(12, 50)];
const FIVE: [Seat; 5] = [s(50, 12), s(88, 40), s(70, 78), s(30, 78), s(12, 40)];
const SIX: [Seat; 6] = [s(50, 12), s(88, 28), s(88, 60), s(50, 78), s(12, 60), s(12, 28)];
const SEVEN: [Seat; 7] = [
    s(50, 12),
    s(88, 28),
    s(88, 54),
    s(88, 80),
    s(12, 80),
    s(12, 54),
    s(12, 28),
];
const EIGHT: [Seat; 8] = [
    s(50, 12),
    s(88, 28),
    s(88, 46),
    s(88, 64),
    s(50, 80),
    s(12, 64),
    s(12, 46),
    s(12, 28),
];

/// Seats clockwise from the top for `player_count` players; empty outside 1..=8.
pub fn layout_for(player_count: u8) -> Vec<Seat> {
    let seats: &[Seat] = match player_count {
        1 => &ONE,
        2 => &TWO,
        3 => &THREE,
        4 => &FOUR,
        5 => &FIVE,
        6 => &SIX,
        7 => &SEVEN,
        8 => &EIGHT,
        _ => &[],
    };
    seats.to_vec()
}

/// Rendering hints for crowded tables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStyle {
    /// Visible height of each stacked card in a pile, in rpx
    pub expose: u8,
    pub card_scale: f32,
}

impl TableStyle {
    pub fn for_players(player_count: u8) -> Self {
        if player_count >= 7 {
            Self {
                expose: 6,
                card_scale: 0.8,
            }
        } else {
            Self {
                expose: 8,
                card_scale: 1.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_count_matches_players() {
        for count in 1..=MAX_SEATED_PLAYERS {
            assert_eq!(layout_for(count).len(), count as usize);
        }
    }

    #[test]
    fn test_unseated_counts() {
        assert!(layout_for(0).is_empty());
        for count in 9..=12 {
            assert!(layout_for(count).is_empty());
        }
    }

    #[test]
    fn test_seats_avoid_center() {
        for count in 1..=MAX_SEATED_PLAYERS {
            assert!(layout_for(count).iter().all(|seat| *seat != Seat::new(50, 50)));
        }
    }

    #[test]
    fn test_anchor() {
        assert_eq!(Anchor::for_y(60), Anchor::Top);
        assert_eq!(Anchor::for_y(61), Anchor::Bottom);

        let anchors: Vec<Anchor> = layout_for(3).iter().map(Seat::anchor).collect();
        assert_eq!(anchors, vec![Anchor::Top, Anchor::Bottom, Anchor::Bottom]);
    }

    #[test]
    fn test_table_style() {
        assert_eq!(TableStyle::for_players(6).expose, 8);
        assert_eq!(TableStyle::for_players(7).expose, 6);
        assert_eq!(TableStyle::for_players(8).card_scale, 0.8);
        assert_eq!(TableStyle::for_players(2).card_scale, 1.0);
    }
}
