//! Dealer play and settlement math.

use crate::card::Card;
use crate::hand::HandStatus;
use crate::rules::REGULAR_PAYOUT;

use super::RoundEngine;

/// How a single hand resolved against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player beat the dealer.
    Win,
    /// Dealer beat the player (or the player busted).
    Lose,
    /// Push: equal totals, wager returned.
    Tie,
    /// Player surrendered; half the wager comes back.
    Surrender,
}

/// Settlement result for one hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandResult {
    /// The resolution.
    pub outcome: Outcome,
    /// Total-return multiplier applied to the wager.
    pub multiplier: f64,
    /// Amount returned to the player (wager × multiplier, floored).
    pub payout: u64,
    /// The wager that was riding on the hand.
    pub wager: u64,
    /// Whether the hand was a natural blackjack.
    pub natural: bool,
}

/// Settlement result for the whole round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    /// The dealer's final total.
    pub dealer_value: u8,
    /// Whether the dealer held a natural blackjack.
    pub dealer_natural: bool,
    /// Per-hand results in table order.
    pub results: Vec<HandResult>,
}

impl RoundSummary {
    /// Sum of all hand payouts.
    #[must_use]
    pub fn total_payout(&self) -> u64 {
        self.results.iter().map(|r| r.payout).sum()
    }

    /// Sum of all wagers settled.
    #[must_use]
    pub fn total_wagered(&self) -> u64 {
        self.results.iter().map(|r| r.wager).sum()
    }
}

impl RoundEngine {
    /// Whether the dealer must draw another card under the active profile.
    #[must_use]
    pub fn dealer_should_hit(&self) -> bool {
        self.dealer.should_hit(&self.profile)
    }

    /// Draws one card for the dealer if the rules call for it.
    pub fn dealer_hit(&mut self) -> Option<Card> {
        if self.dealer_should_hit() {
            let card = self.shoe.draw();
            self.dealer.add_card(card);
            Some(card)
        } else {
            None
        }
    }

    /// Reveals the hole card and plays the dealer hand to completion.
    ///
    /// Returns the cards drawn. The controller steps the dealer one card at
    /// a time instead so a host can pace the reveal; this runs the same
    /// rules in one go.
    pub fn play_dealer(&mut self) -> Vec<Card> {
        self.dealer.reveal_hole();
        let mut drawn = Vec::new();
        while let Some(card) = self.dealer_hit() {
            drawn.push(card);
        }
        drawn
    }

    /// Resolves every hand against the dealer.
    ///
    /// Resolution order per hand: surrender, then bust, then a dealer
    /// natural (pushed only by a player natural), then a dealer bust, then
    /// the total comparison. A player natural wins at the profile's
    /// blackjack multiplier even against a multi-card 21.
    #[must_use]
    pub fn evaluate_results(&self) -> RoundSummary {
        let dealer_value = self.dealer.value();
        let dealer_natural = self.dealer.is_natural();
        let dealer_busted = self.dealer.is_busted();
        let blackjack_pays = self.profile.blackjack_payout;

        let results = self
            .hands
            .iter()
            .map(|hand| {
                let natural = hand.is_natural();
                let value = hand.value();

                let (outcome, multiplier) = match hand.status() {
                    HandStatus::Surrendered => (Outcome::Surrender, 0.5),
                    HandStatus::Busted => (Outcome::Lose, 0.0),
                    HandStatus::Active | HandStatus::Stand => {
                        if dealer_natural {
                            if natural {
                                (Outcome::Tie, 1.0)
                            } else {
                                (Outcome::Lose, 0.0)
                            }
                        } else if dealer_busted {
                            let pays = if natural { blackjack_pays } else { REGULAR_PAYOUT };
                            (Outcome::Win, pays)
                        } else if natural {
                            (Outcome::Win, blackjack_pays)
                        } else if value > dealer_value {
                            (Outcome::Win, REGULAR_PAYOUT)
                        } else if value == dealer_value {
                            (Outcome::Tie, 1.0)
                        } else {
                            (Outcome::Lose, 0.0)
                        }
                    }
                };

                #[expect(
                    clippy::cast_precision_loss,
                    reason = "f64 has sufficient precision for wager amounts"
                )]
                let payout = (hand.wager() as f64 * multiplier).floor() as u64;

                HandResult {
                    outcome,
                    multiplier,
                    payout,
                    wager: hand.wager(),
                    natural,
                }
            })
            .collect();

        RoundSummary {
            dealer_value,
            dealer_natural,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Outcome, RoundEngine};
    use crate::card::{Card, Suit};
    use crate::hand::HandStatus;
    use crate::rng::RandomSource;
    use crate::rules::RulesProfile;
    use crate::shoe::Shoe;
    use crate::shuffle::ShuffleMode;

    const fn card(rank: u8) -> Card {
        Card::new(Suit::Diamonds, rank)
    }

    fn engine_with_draws(draws: &[u8]) -> RoundEngine {
        let mut shoe = Shoe::new(1, 0.2, ShuffleMode::Fair, 1, 0, RandomSource::seeded(1));
        let mut cards: Vec<Card> = draws.iter().copied().map(card).collect();
        cards.reverse();
        shoe.load(cards);
        RoundEngine::new(shoe, RulesProfile::vegas_strip(), 3)
    }

    #[test]
    fn dealer_stands_on_hard_seventeen() {
        // Player 9,9; dealer 10,7.
        let mut engine = engine_with_draws(&[9, 9, 10, 7]);
        engine.begin_round(10);
        engine.stand(0).unwrap();

        let drawn = engine.play_dealer();
        assert!(drawn.is_empty());
        assert_eq!(engine.dealer().value(), 17);
    }

    #[test]
    fn natural_pays_the_profile_multiplier() {
        // Player A,K (natural); dealer 9,9 = 18.
        let mut engine = engine_with_draws(&[1, 13, 9, 9]);
        engine.begin_round(100);
        engine.dealer_mut().reveal_hole();

        let summary = engine.evaluate_results();
        assert!(!summary.dealer_natural);
        assert_eq!(summary.results[0].outcome, Outcome::Win);
        assert!(summary.results[0].natural);
        assert_eq!(summary.results[0].payout, 250);
    }

    #[test]
    fn dealer_natural_pushes_only_a_player_natural() {
        // Player 10,10 (stands on 20); dealer A,K.
        let mut engine = engine_with_draws(&[10, 10, 1, 13]);
        engine.begin_round(50);
        engine.stand(0).unwrap();

        let summary = engine.evaluate_results();
        assert!(summary.dealer_natural);
        assert_eq!(summary.results[0].outcome, Outcome::Lose);
        assert_eq!(summary.results[0].payout, 0);
    }

    #[test]
    fn surrendered_hand_gets_half_back_at_settlement() {
        // Player 10,6; dealer 10,8.
        let mut engine = engine_with_draws(&[10, 6, 10, 8]);
        engine.begin_round(100);
        engine.surrender(0).unwrap();
        assert_eq!(engine.hands()[0].status(), HandStatus::Surrendered);

        let summary = engine.evaluate_results();
        assert_eq!(summary.results[0].outcome, Outcome::Surrender);
        assert_eq!(summary.results[0].payout, 50);
    }

    #[test]
    fn split_then_hitting_both_hands_draws_exactly_four_cards() {
        // Player 8,8; dealer 10,9; split draws 2,3; hits draw 5,6.
        let mut engine = engine_with_draws(&[8, 8, 10, 9, 2, 3, 5, 6]);
        engine.begin_round(10);
        let before = engine.shoe().remaining();

        let outcome = engine.split(0).unwrap();
        assert!(!outcome.aces);
        assert_eq!(engine.hands().len(), 2);

        engine.hit(0).unwrap();
        engine.hit(1).unwrap();

        assert_eq!(before - engine.shoe().remaining(), 4);
    }

    #[test]
    fn resplitting_aces_is_always_rejected() {
        // Player A,A; dealer 9,5; split draws A,A again.
        let permissive = {
            let mut shoe = Shoe::new(1, 0.2, ShuffleMode::Fair, 1, 0, RandomSource::seeded(2));
            let mut cards: Vec<Card> = [1, 1, 9, 5, 1, 1].iter().copied().map(card).collect();
            cards.reverse();
            shoe.load(cards);
            RoundEngine::new(shoe, RulesProfile::atlantic_city(), 3)
        };
        let mut engine = permissive;
        assert!(engine.profile().resplit_aces);

        engine.begin_round(10);
        let outcome = engine.split(0).unwrap();
        assert!(outcome.aces);

        // Split aces stand immediately.
        assert_eq!(engine.hands()[0].status(), HandStatus::Stand);

        // Even re-activated, a from-aces pair of fresh aces cannot be split.
        engine.hands[0].set_status(HandStatus::Active);
        assert!(engine.hands()[0].is_pair());
        assert_eq!(
            engine.split(0).unwrap_err(),
            crate::error::ActionError::CannotSplit
        );
    }

    #[test]
    fn resolved_hands_cannot_be_stood_back_to_life() {
        // Player 10,6 hits into a 9 and busts; dealer 10,8.
        let mut engine = engine_with_draws(&[10, 6, 10, 8, 9]);
        engine.begin_round(100);
        engine.hit(0).unwrap();
        assert_eq!(engine.hands()[0].status(), HandStatus::Busted);

        assert_eq!(
            engine.stand(0).unwrap_err(),
            crate::error::ActionError::HandNotActive
        );
        let summary = engine.evaluate_results();
        assert_eq!(summary.results[0].outcome, Outcome::Lose);
        assert_eq!(summary.results[0].payout, 0);
    }

    #[test]
    fn double_draws_one_card_and_stands() {
        // Player 5,6; dealer 10,9; double draws a 9 for 20.
        let mut engine = engine_with_draws(&[5, 6, 10, 9, 9]);
        engine.begin_round(25);
        engine.double(0).unwrap();

        let hand = &engine.hands()[0];
        assert_eq!(hand.wager(), 50);
        assert_eq!(hand.len(), 3);
        assert_eq!(hand.status(), HandStatus::Stand);
        assert_eq!(engine.double(0).unwrap_err(), crate::error::ActionError::HandNotActive);
    }
}
