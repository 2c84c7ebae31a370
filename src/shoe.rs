//! Multi-deck card supply with cut-card tracking.

use crate::card::{Card, DECK_SIZE, SUITS};
use crate::rng::RandomSource;
use crate::shuffle::{self, ShuffleMode};

/// A dealing shoe: the full multi-deck supply used across rounds until the
/// cut card schedules a reshuffle.
///
/// The cut-card position is randomized inside a band on every reset, so the
/// exact reshuffle moment is unpredictable to the player. Passing the cut
/// card only raises a flag; the actual reshuffle happens between rounds,
/// never mid-round.
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
    penetration: f64,
    shuffle_mode: ShuffleMode,
    shuffle_passes: u32,
    burn: usize,
    cut_card_position: usize,
    cut_card_reached: bool,
    rng: RandomSource,
}

impl Shoe {
    /// Builds a shoe and gives it its first shuffle.
    ///
    /// `penetration` is the fraction of the shoe reserved behind the cut
    /// card; the cut card lands uniformly between that many cards remaining
    /// and twice as many.
    #[must_use]
    pub fn new(
        decks: u8,
        penetration: f64,
        shuffle_mode: ShuffleMode,
        shuffle_passes: u32,
        burn: usize,
        rng: RandomSource,
    ) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            decks,
            penetration,
            shuffle_mode,
            shuffle_passes,
            burn,
            cut_card_position: 0,
            cut_card_reached: false,
            rng,
        };
        shoe.reshuffle();
        shoe
    }

    /// Total capacity of the full shoe.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Number of cards currently remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Whether the cut card has been passed and the next round should start
    /// from a fresh shuffle.
    #[must_use]
    pub const fn needs_reshuffle(&self) -> bool {
        self.cut_card_reached
    }

    /// Rebuilds the full ordered supply and places a new cut card.
    fn reset(&mut self) {
        self.cards.clear();
        self.cards.reserve(self.capacity());

        for _ in 0..self.decks {
            for suit in SUITS {
                for rank in 1..=13 {
                    self.cards.push(Card::new(suit, rank));
                }
            }
        }

        self.cut_card_reached = false;

        #[expect(clippy::cast_precision_loss, reason = "shoe sizes are small")]
        let min_cut = (self.capacity() as f64 * self.penetration) as usize;
        let band = min_cut.max(1);
        self.cut_card_position = min_cut + self.rng.next_index(band);
    }

    /// Applies the configured shuffle strategy to the current supply.
    fn shuffle(&mut self) {
        match self.shuffle_mode {
            ShuffleMode::Fair => shuffle::fair(&mut self.rng, &mut self.cards),
            ShuffleMode::Casino => {
                shuffle::casino(&mut self.rng, &mut self.cards, self.shuffle_passes);
            }
        }
    }

    /// Rebuilds, shuffles and burns the configured number of cards.
    pub fn reshuffle(&mut self) {
        self.reset();
        self.shuffle();
        tracing::debug!(decks = self.decks, burn = self.burn, "shoe reshuffled");

        // Never burn the shoe down to nothing.
        let burn = self.burn.min(self.cards.len().saturating_sub(1));
        self.cards.truncate(self.cards.len() - burn);
    }

    /// Draws the next card.
    ///
    /// An exhausted shoe transparently reshuffles (and burns) first, so this
    /// always yields a card. Passing the cut card sets the reshuffle flag for
    /// the start of the next round.
    pub fn draw(&mut self) -> Card {
        if self.cards.is_empty() {
            self.reshuffle();
        }

        // reshuffle() leaves at least one card behind the burn.
        let card = self.cards.pop().expect("shoe refilled above");

        if self.cards.len() <= self.cut_card_position {
            self.cut_card_reached = true;
        }

        card
    }

    /// Replaces the remaining supply with an exact sequence.
    ///
    /// The last card of `cards` is drawn first. Intended for deterministic
    /// replays and tests.
    pub fn load(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }
}

#[cfg(test)]
mod tests {
    use super::Shoe;
    use crate::card::{Card, DECK_SIZE, Suit};
    use crate::rng::RandomSource;
    use crate::shuffle::ShuffleMode;

    fn single_deck(seed: u64) -> Shoe {
        Shoe::new(1, 0.2, ShuffleMode::Fair, 1, 0, RandomSource::seeded(seed))
    }

    #[test]
    fn fresh_shoe_holds_every_card_once() {
        let mut shoe = single_deck(4);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..DECK_SIZE {
            assert!(seen.insert(shoe.draw()));
        }
        assert_eq!(seen.len(), DECK_SIZE);
    }

    #[test]
    fn exhausted_shoe_resets_before_yielding() {
        let mut shoe = single_deck(8);
        for _ in 0..DECK_SIZE {
            shoe.draw();
        }
        assert_eq!(shoe.remaining(), 0);

        // The 53rd draw must come from a fresh supply, never a duplicate run.
        let _ = shoe.draw();
        assert_eq!(shoe.remaining(), DECK_SIZE - 1);
    }

    #[test]
    fn cut_card_sits_inside_the_band() {
        for seed in 0..16 {
            let shoe = single_deck(seed);
            let min = (shoe.capacity() as f64 * 0.2) as usize;
            assert!(shoe.cut_card_position >= min);
            assert!(shoe.cut_card_position < min * 2);
        }
    }

    #[test]
    fn passing_the_cut_card_raises_the_flag_only() {
        let mut shoe = single_deck(2);
        shoe.load(vec![Card::new(Suit::Spades, 5); 3]);
        shoe.cut_card_position = 4;

        assert!(!shoe.needs_reshuffle());
        let _ = shoe.draw();
        assert!(shoe.needs_reshuffle());
        // Drawing continues from the same supply mid-round.
        let _ = shoe.draw();
        assert_eq!(shoe.remaining(), 1);
    }

    #[test]
    fn burn_discards_cards_after_reshuffle() {
        let shoe = Shoe::new(1, 0.2, ShuffleMode::Casino, 2, 3, RandomSource::seeded(6));
        assert_eq!(shoe.remaining(), DECK_SIZE - 3);
    }
}
