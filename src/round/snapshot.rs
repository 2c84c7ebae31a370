//! Read-only views of the table for rendering.

use crate::card::Card;
use crate::hand::HandStatus;

use super::{Phase, RoundEngine};

/// One player hand, as visible to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandSnapshot {
    /// The cards.
    pub cards: Vec<Card>,
    /// Current status.
    pub status: HandStatus,
    /// Current value (aces demoted as needed).
    pub value: u8,
    /// Wager riding on the hand.
    pub wager: u64,
    /// Whether the hand came from a split.
    pub from_split: bool,
}

/// The dealer, with the hole card hidden until revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerSnapshot {
    /// Visible cards. Before the hole card is revealed this holds only the
    /// up card.
    pub cards: Vec<Card>,
    /// Whether the hole card is face up.
    pub hole_revealed: bool,
    /// Value of the visible cards only.
    pub visible_value: u8,
}

/// The whole table at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Player hands in table order.
    pub hands: Vec<HandSnapshot>,
    /// Index of the hand in play.
    pub active_hand: usize,
    /// The dealer's visible state.
    pub dealer: DealerSnapshot,
    /// Current bankroll.
    pub balance: u64,
    /// Cards left in the shoe.
    pub shoe_remaining: usize,
    /// Whether the cut card has been passed (reshuffle before next round).
    pub cut_card_reached: bool,
}

impl RoundEngine {
    pub(crate) fn snapshot_hands(&self) -> Vec<HandSnapshot> {
        self.hands
            .iter()
            .map(|hand| HandSnapshot {
                cards: hand.cards().to_vec(),
                status: hand.status(),
                value: hand.value(),
                wager: hand.wager(),
                from_split: hand.is_from_split(),
            })
            .collect()
    }

    pub(crate) fn snapshot_dealer(&self) -> DealerSnapshot {
        let revealed = self.dealer.is_hole_revealed();
        let cards: Vec<Card> = if revealed {
            self.dealer.cards().to_vec()
        } else {
            self.dealer.up_card().into_iter().collect()
        };
        let visible_value = crate::hand::visible_value(&cards);

        DealerSnapshot {
            cards,
            hole_revealed: revealed,
            visible_value,
        }
    }
}
