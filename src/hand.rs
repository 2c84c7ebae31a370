//! Player and dealer hand representations and scoring.

use crate::card::Card;
use crate::rules::RulesProfile;

/// Scores a card sequence: total value plus whether an ace still counts 11.
///
/// Aces start at 11 and are demoted to 1 one at a time while the total is
/// over 21 and a demotable ace remains.
fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    (value, aces > 0)
}

/// Scores an arbitrary card slice, used for partial (visible-only) views.
pub(crate) fn visible_value(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Hand can still take actions.
    Active,
    /// Player has stood (or reached 21, where no action remains legal).
    Stand,
    /// Hand went over 21.
    Busted,
    /// Player gave up the hand for half the wager.
    Surrendered,
}

/// A player's hand.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    status: HandStatus,
    wager: u64,
    from_split: bool,
    from_aces: bool,
}

impl Hand {
    /// Creates a new empty hand with the given wager.
    #[must_use]
    pub const fn new(wager: u64) -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Active,
            wager,
            from_split: false,
            from_aces: false,
        }
    }

    /// Creates the one-card hand produced by a split.
    #[must_use]
    pub fn from_split(card: Card, wager: u64, from_aces: bool) -> Self {
        Self {
            cards: vec![card],
            status: HandStatus::Active,
            wager,
            from_split: true,
            from_aces,
        }
    }

    /// Adds a card, busting at over 21 and auto-standing at exactly 21.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        let (value, _) = evaluate_cards(&self.cards);
        if value > 21 {
            self.status = HandStatus::Busted;
        } else if value == 21 {
            self.status = HandStatus::Stand;
        }
    }

    /// The cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// The wager riding on this hand.
    #[must_use]
    pub const fn wager(&self) -> u64 {
        self.wager
    }

    /// Doubles the wager (double down).
    pub const fn double_wager(&mut self) {
        self.wager *= 2;
    }

    /// Whether this hand ever resulted from a split.
    ///
    /// Settlement keys natural-blackjack eligibility off this flag, not off
    /// the round's final hand count.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Whether this hand came from splitting a pair of aces.
    #[must_use]
    pub const fn is_from_aces(&self) -> bool {
        self.from_aces
    }

    /// Marks the hand as the surviving half of a split.
    pub(crate) const fn mark_split(&mut self, from_aces: bool) {
        self.from_split = true;
        self.from_aces = from_aces;
    }

    /// The value of the hand, aces demoted from 11 to 1 as needed.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Whether an ace is still counted as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Whether the hand is a natural blackjack: exactly two cards totalling
    /// 21 on a hand that never came from a split.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21 && !self.from_split
    }

    /// Whether the hand is a splittable pair: exactly two cards of equal
    /// rank. Ten and a face card are not a pair under this rule set.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card of a pair for splitting.
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, Default)]
pub struct DealerHand {
    cards: Vec<Card>,
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// All cards, including the hole card.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// Whether the hole card has been turned over.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Turns the hole card over.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// The full value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Whether an ace is still counted as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Whether the dealer holds a natural blackjack.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Whether the dealer busted.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.value() > 21
    }

    /// Whether the dealer must draw another card under the given profile:
    /// below 17 always, on soft 17 only when the profile says to hit it.
    #[must_use]
    pub fn should_hit(&self, profile: &RulesProfile) -> bool {
        let (value, soft) = evaluate_cards(&self.cards);
        value < 17 || (value == 17 && soft && profile.dealer_hits_soft_17)
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{DealerHand, Hand, HandStatus};
    use crate::card::{Card, Suit};
    use crate::rules::RulesProfile;

    const fn card(rank: u8) -> Card {
        Card::new(Suit::Hearts, rank)
    }

    #[test]
    fn aces_demote_one_at_a_time() {
        let mut hand = Hand::new(10);
        hand.add_card(card(1));
        hand.add_card(card(1));
        hand.add_card(card(9));
        // A + A + 9 = 11 + 1 + 9
        assert_eq!(hand.value(), 21);
        assert!(hand.is_soft());

        hand.set_status(HandStatus::Active);
        hand.add_card(card(5));
        // Both aces now count 1; 1 + 1 + 9 + 5 = 16, hard.
        assert_eq!(hand.value(), 16);
        assert!(!hand.is_soft());
    }

    #[test]
    fn natural_requires_two_unsplit_cards() {
        let mut hand = Hand::new(10);
        hand.add_card(card(1));
        hand.add_card(card(13));
        assert!(hand.is_natural());
        assert_eq!(hand.status(), HandStatus::Stand);

        let mut split = Hand::from_split(card(1), 10, true);
        split.add_card(card(13));
        assert_eq!(split.value(), 21);
        assert!(!split.is_natural());
    }

    #[test]
    fn hit_busts_over_21_and_stands_at_21() {
        let mut hand = Hand::new(5);
        hand.add_card(card(10));
        hand.add_card(card(5));
        assert_eq!(hand.status(), HandStatus::Active);

        hand.add_card(card(6));
        assert_eq!(hand.status(), HandStatus::Stand);

        let mut bust = Hand::new(5);
        bust.add_card(card(10));
        bust.add_card(card(10));
        bust.add_card(card(2));
        assert_eq!(bust.status(), HandStatus::Busted);
    }

    #[test]
    fn ten_and_face_are_not_a_pair() {
        let mut hand = Hand::new(10);
        hand.add_card(card(10));
        hand.add_card(card(11));
        assert!(!hand.is_pair());

        let mut pair = Hand::new(10);
        pair.add_card(card(8));
        pair.add_card(card(8));
        assert!(pair.is_pair());
    }

    #[test]
    fn dealer_soft_17_rule_follows_the_profile() {
        let mut dealer = DealerHand::new();
        dealer.add_card(card(1));
        dealer.add_card(card(6));
        assert!(dealer.is_soft());

        let stands = RulesProfile::vegas_strip();
        assert!(!stands.dealer_hits_soft_17);
        assert!(!dealer.should_hit(&stands));

        let hits = RulesProfile::european_no_hole_card();
        assert!(hits.dealer_hits_soft_17);
        assert!(dealer.should_hit(&hits));
    }

    #[test]
    fn dealer_hard_17_never_hits() {
        let mut dealer = DealerHand::new();
        dealer.add_card(card(10));
        dealer.add_card(card(7));
        assert!(!dealer.should_hit(&RulesProfile::european_no_hole_card()));
    }
}
