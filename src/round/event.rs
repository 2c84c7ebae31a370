//! Table phases and the notification stream.

use crate::card::Card;

use super::RoundSummary;

/// Where the round currently stands.
///
/// Phases advance through player actions and [`advance`] calls; the
/// controller never moves the table on its own clock.
///
/// [`advance`]: super::RoundController::advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a wager.
    Betting,
    /// Initial cards are on the table; the opening checks have not run yet.
    Dealing,
    /// Dealer shows an ace; the player must take or decline insurance.
    InsuranceOffer,
    /// Dealer shows a ten-value card and is about to check the hole card.
    DealerPeekCheck,
    /// A player hand is acting.
    PlayerTurn {
        /// Index of the hand in play.
        hand: usize,
    },
    /// The dealer is drawing out their hand.
    DealerTurn,
    /// Results are being computed and applied.
    Settlement,
    /// The round is settled; a new wager starts the next one.
    RoundOver,
}

/// Which side of the table a card went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// The player.
    Player,
    /// The dealer.
    Dealer,
}

/// Notifications emitted as a round progresses.
///
/// Subscribers receive every event in order; a subscriber cannot veto or
/// reorder anything.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The table moved to a new phase.
    PhaseChanged(Phase),
    /// The shoe was rebuilt and reshuffled before the deal.
    ShoeReshuffled,
    /// A round began with the given wager.
    RoundStarted {
        /// The opening wager.
        wager: u64,
    },
    /// A card was dealt during the opening deal. The dealer's hole card is
    /// reported as `None` until revealed.
    CardDealt {
        /// Who received the card.
        seat: Seat,
        /// Hand index for player cards; `0` for the dealer.
        hand: usize,
        /// The card, or `None` for the face-down hole card.
        card: Option<Card>,
    },
    /// A player hand went over 21.
    HandBusted {
        /// Index of the busted hand.
        hand: usize,
    },
    /// A pair was split into two hands.
    HandSplit {
        /// Index of the hand that was split.
        hand: usize,
        /// Whether the pair was aces (both halves were forced to stand).
        aces: bool,
    },
    /// A hand was surrendered.
    HandSurrendered {
        /// Index of the surrendered hand.
        hand: usize,
    },
    /// The dealer's hole card was turned over.
    HoleRevealed {
        /// The card that was face down.
        card: Card,
    },
    /// The dealer drew a card.
    DealerDrew {
        /// The drawn card.
        card: Card,
    },
    /// The player took insurance.
    InsurancePlaced {
        /// The side-bet stake.
        stake: u64,
    },
    /// The player declined insurance.
    InsuranceDeclined,
    /// The insurance side bet was resolved.
    InsuranceSettled {
        /// The stake that was riding.
        stake: u64,
        /// Amount returned (zero when the dealer had no natural).
        payout: u64,
    },
    /// The round was settled.
    RoundSettled {
        /// Per-hand results and dealer totals.
        summary: RoundSummary,
    },
}
