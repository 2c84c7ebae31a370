//! Player actions against the engine: hit, stand, double, split, surrender.
//!
//! Every operation validates first and only then touches the shoe, so a
//! rejected action leaves the round exactly as it found it. Balance checks
//! live in the controller; a failed action here must never require a refund.

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, HandStatus};

use super::RoundEngine;

/// What a successful split produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Index of the newly inserted hand (right after the split one).
    pub new_index: usize,
    /// Whether a pair of aces was split; both hands were forced to stand.
    pub aces: bool,
    /// Card dealt to the original hand.
    pub first_card: Card,
    /// Card dealt to the new hand.
    pub second_card: Card,
}

impl RoundEngine {
    fn active_hand_mut(&mut self, index: usize) -> Result<&mut Hand, ActionError> {
        let hand = self.hands.get_mut(index).ok_or(ActionError::HandNotFound)?;
        if hand.status() != HandStatus::Active {
            return Err(ActionError::HandNotActive);
        }
        Ok(hand)
    }

    /// Draws a card onto the hand. Busts over 21, auto-stands at exactly 21.
    ///
    /// # Errors
    ///
    /// Returns an error if the hand is missing or no longer active.
    pub fn hit(&mut self, index: usize) -> Result<Card, ActionError> {
        self.active_hand_mut(index)?;

        let card = self.shoe.draw();
        self.hands[index].add_card(card);
        Ok(card)
    }

    /// Sets the hand to stand. A busted or surrendered hand is already
    /// resolved and cannot be stood back to life.
    ///
    /// # Errors
    ///
    /// Returns an error if the hand is missing or no longer active.
    pub fn stand(&mut self, index: usize) -> Result<(), ActionError> {
        let hand = self.active_hand_mut(index)?;
        hand.set_status(HandStatus::Stand);
        Ok(())
    }

    /// Doubles the wager and draws exactly one card; the hand then stands
    /// (or busts).
    ///
    /// The caller owns the balance debit around this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the hand is missing, not active, not an untouched
    /// two-card hand, or a split hand under a no-double-after-split profile.
    pub fn double(&mut self, index: usize) -> Result<Card, ActionError> {
        let double_after_split = self.profile.double_after_split;
        let hand = self.active_hand_mut(index)?;

        if hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }
        if hand.is_from_split() && !double_after_split {
            return Err(ActionError::CannotDouble);
        }

        hand.double_wager();
        let card = self.shoe.draw();
        let hand = &mut self.hands[index];
        hand.add_card(card);
        if hand.status() == HandStatus::Active {
            hand.set_status(HandStatus::Stand);
        }

        Ok(card)
    }

    /// Splits a pair into two adjacent hands and deals one card to each.
    ///
    /// Split aces receive their one card and are forced to stand. A hand
    /// that itself came from splitting aces is never split again, whatever
    /// the profile's re-split setting says. The caller owns the debit of the
    /// second wager.
    ///
    /// # Errors
    ///
    /// Returns an error if the hand is missing or not active, is not an
    /// equal-rank pair, came from split aces, or the split limit is reached.
    pub fn split(&mut self, index: usize) -> Result<SplitOutcome, ActionError> {
        if self.hands.len() > self.max_splits {
            return Err(ActionError::MaxSplitsReached);
        }

        let hand = self.active_hand_mut(index)?;
        if !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }
        if hand.is_from_aces() {
            return Err(ActionError::CannotSplit);
        }

        let aces = hand.cards()[0].is_ace();
        let wager = hand.wager();
        let moved = hand
            .take_split_card()
            .ok_or(ActionError::CannotSplit)?;
        hand.mark_split(aces);

        let first_card = self.shoe.draw();
        let second_card = self.shoe.draw();

        let mut new_hand = Hand::from_split(moved, wager, aces);
        new_hand.add_card(second_card);

        let hand = &mut self.hands[index];
        hand.add_card(first_card);

        if aces {
            // One card each, no further action on split aces.
            hand.set_status(HandStatus::Stand);
            new_hand.set_status(HandStatus::Stand);
        }

        self.hands.insert(index + 1, new_hand);

        Ok(SplitOutcome {
            new_index: index + 1,
            aces,
            first_card,
            second_card,
        })
    }

    /// Surrenders an untouched opening hand for half the wager; the refund
    /// itself is applied at settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile disallows surrender, the round has
    /// been split, or the hand is not an active two-card hand.
    pub fn surrender(&mut self, index: usize) -> Result<(), ActionError> {
        if !self.profile.allows_surrender() {
            return Err(ActionError::CannotSurrender);
        }
        if self.hands.len() > 1 {
            return Err(ActionError::CannotSurrender);
        }

        let hand = self.active_hand_mut(index)?;
        if hand.len() != 2 {
            return Err(ActionError::CannotSurrender);
        }

        hand.set_status(HandStatus::Surrendered);
        Ok(())
    }
}
