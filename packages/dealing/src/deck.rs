use crate::{Card, DealConfig, Rank, Suit};
use rand::Rng;

/// One unit of the deck: 52 cards suit by suit, then the jokers if enabled.
pub fn single_deck(include_jokers: bool) -> Vec<Card> {
    let mut cards = Vec::with_capacity(54);
    for suit in Suit::STANDARD {
        for rank in Rank::STANDARD {
            cards.push(Card::new(suit, rank));
        }
    }
    if include_jokers {
        cards.push(Card::BIG_JOKER);
        cards.push(Card::LITTLE_JOKER);
    }
    cards
}

/// Number of cards `build_deck` produces for `cfg`.
pub fn deck_size(cfg: &DealConfig) -> usize {
    let unit = if cfg.include_jokers { 54 } else { 52 };
    unit * cfg.deck_count as usize
}

/// Fisher-Yates: walk from the last index down to 1, swapping each slot
/// with a uniformly chosen slot at or below it.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(cards: &mut [T], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}

/// Build `deck_count` copies of the unit and shuffle them together.
/// The last card of the returned deck is dealt first.
pub fn build_deck<R: Rng + ?Sized>(cfg: &DealConfig, rng: &mut R) -> Vec<Card> {
    let unit = single_deck(cfg.include_jokers);
    let mut deck = Vec::with_capacity(deck_size(cfg));
    for _ in 0..cfg.deck_count {
        deck.extend_from_slice(&unit);
    }
    shuffle_in_place(&mut deck, rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use std::collections::HashMap;

    fn counts(cards: &[Card]) -> HashMap<Card, usize> {
        let mut map = HashMap::new();
        for card in cards {
            *map.entry(*card).or_insert(0) += 1;
        }
        map
    }

    #[test]
    fn test_single_deck_order() {
        let unit = single_deck(false);
        assert_eq!(unit.len(), 52);
        assert_eq!(unit[0], Card::new(Suit::Spade, Rank::Ace));
        assert_eq!(unit[51], Card::new(Suit::Diamond, Rank::King));
        assert_eq!(counts(&unit).len(), 52);
    }

    #[test]
    fn test_jokers_appended_per_unit() {
        let cfg = DealConfig {
            deck_count: 2,
            include_jokers: true,
            ..DealConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let deck = build_deck(&cfg, &mut rng);
        assert_eq!(deck.len(), 108);
        assert_eq!(deck.iter().filter(|c| c.is_joker()).count(), 4);
        assert_eq!(counts(&deck)[&Card::BIG_JOKER], 2);
    }

    #[test]
    fn test_default_deck_has_54_cards() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let deck = build_deck(&DealConfig::default(), &mut rng);
        assert_eq!(deck.len(), 54);
    }

    #[test]
    fn test_seeded_build_is_deterministic() {
        let cfg = DealConfig::default();
        let a = build_deck(&cfg, &mut ChaCha8Rng::seed_from_u64(42));
        let b = build_deck(&cfg, &mut ChaCha8Rng::seed_from_u64(42));
        let c = build_deck(&cfg, &mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_shuffle_short_slices() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut empty: Vec<u8> = Vec::new();
        shuffle_in_place(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![9u8];
        shuffle_in_place(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }

    proptest! {
        #[test]
        fn deck_size_matches_ruleset(
            seed in any::<u64>(),
            two_decks in any::<bool>(),
            include_jokers in any::<bool>(),
        ) {
            let cfg = DealConfig {
                deck_count: if two_decks { 2 } else { 1 },
                include_jokers,
                ..DealConfig::default()
            };
            let deck = build_deck(&cfg, &mut ChaCha8Rng::seed_from_u64(seed));
            let unit = if include_jokers { 54 } else { 52 };
            prop_assert_eq!(deck.len(), unit * cfg.deck_count as usize);
            prop_assert_eq!(deck.len(), deck_size(&cfg));
        }

        #[test]
        fn shuffle_is_a_permutation(seed in any::<u64>(), include_jokers in any::<bool>()) {
            let original = single_deck(include_jokers);
            let mut shuffled = original.clone();
            shuffle_in_place(&mut shuffled, &mut ChaCha8Rng::seed_from_u64(seed));
            prop_assert_eq!(counts(&original), counts(&shuffled));
        }
    }
}
