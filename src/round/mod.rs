//! Round engine and phase controller.

use crate::hand::{DealerHand, Hand, HandStatus};
use crate::rules::RulesProfile;
use crate::shoe::Shoe;

mod actions;
mod controller;
mod dealer;
mod event;
mod snapshot;

pub use actions::SplitOutcome;
pub use controller::RoundController;
pub use dealer::{HandResult, Outcome, RoundSummary};
pub use event::{GameEvent, Phase, Seat};
pub use snapshot::{DealerSnapshot, HandSnapshot, TableSnapshot};

/// Stateful hand and dealer bookkeeping for one round at a time.
///
/// The engine owns the shoe and the cards; it validates and applies player
/// actions and computes settlement. Pacing, events and the bankroll belong
/// to [`RoundController`].
pub struct RoundEngine {
    shoe: Shoe,
    profile: RulesProfile,
    max_splits: usize,
    hands: Vec<Hand>,
    dealer: DealerHand,
    active: usize,
    game_over: bool,
}

impl RoundEngine {
    /// Creates an engine over a prepared shoe and an immutable rule profile.
    #[must_use]
    pub fn new(shoe: Shoe, profile: RulesProfile, max_splits: usize) -> Self {
        Self {
            shoe,
            profile,
            max_splits,
            hands: Vec::new(),
            dealer: DealerHand::new(),
            active: 0,
            game_over: false,
        }
    }

    /// Discards the previous round and deals a fresh one: two cards to the
    /// player, then two to the dealer, in that fixed order.
    pub fn begin_round(&mut self, wager: u64) {
        self.hands.clear();
        self.dealer.clear();
        self.active = 0;
        self.game_over = false;

        let mut hand = Hand::new(wager);
        hand.add_card(self.shoe.draw());
        hand.add_card(self.shoe.draw());
        self.hands.push(hand);

        self.dealer.add_card(self.shoe.draw());
        self.dealer.add_card(self.shoe.draw());
    }

    /// The active rule profile.
    #[must_use]
    pub const fn profile(&self) -> &RulesProfile {
        &self.profile
    }

    /// The shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Mutable shoe access, for between-round reshuffles and stacked deals.
    pub const fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// The player's hands, in table order.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// One player hand by index.
    #[must_use]
    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    /// The dealer's hand.
    #[must_use]
    pub const fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    /// Mutable dealer access, used by the controller to reveal the hole card.
    pub const fn dealer_mut(&mut self) -> &mut DealerHand {
        &mut self.dealer
    }

    /// Index of the hand currently in play.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Whether the round has been settled.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Marks the round as settled; actions are rejected afterwards.
    pub(crate) const fn set_game_over(&mut self) {
        self.game_over = true;
    }

    /// Moves the active index to the first hand at or after `from` that can
    /// still act. Returns the new index, or `None` when every remaining hand
    /// is finished.
    pub(crate) fn seek_active_hand(&mut self, from: usize) -> Option<usize> {
        for index in from..self.hands.len() {
            if self.hands[index].status() == HandStatus::Active {
                self.active = index;
                return Some(index);
            }
        }
        None
    }

    /// Whether any hand still stands against the dealer (busted and
    /// surrendered hands are already lost; a natural needs no dealer play).
    pub(crate) fn dealer_must_play(&self) -> bool {
        self.hands
            .iter()
            .any(|hand| hand.status() == HandStatus::Stand && !hand.is_natural())
    }
}
