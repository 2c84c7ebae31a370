//! A single-player casino blackjack round engine.
//!
//! The crate provides a [`RoundController`] that runs complete rounds over a
//! multi-deck [`Shoe`]: betting, the opening deal, insurance and the dealer
//! peek, player actions (hit, stand, double, split, surrender), dealer play
//! and settlement. The shoe models a physical table: a cut card placed at a
//! randomized penetration depth schedules reshuffles, and an optional casino
//! shuffle (riffle, strip and cut) can replace the fair Fisher-Yates one.
//!
//! The controller is host-driven: it never sleeps or owns a clock. Steps a
//! UI would animate are deferred, and the host calls
//! [`advance`](RoundController::advance) after waiting out the advisory
//! [`pending_delay`](RoundController::pending_delay) (or immediately, for a
//! headless simulation). A basic-strategy advisor is available at every
//! decision point through [`RoundController::advice`].
//!
//! # Example
//!
//! ```no_run
//! use sabot::{GameConfig, Phase, RoundController};
//!
//! let config = GameConfig::default();
//! let mut table = RoundController::new(&config);
//!
//! table.start_round(10).unwrap();
//! while table.advance() {}
//!
//! if let Phase::PlayerTurn { .. } = table.phase() {
//!     table.stand().unwrap();
//!     while table.advance() {}
//! }
//! ```

pub mod card;
pub mod config;
pub mod error;
pub mod hand;
pub mod record;
pub mod rng;
pub mod round;
pub mod rules;
pub mod shoe;
pub mod shuffle;
pub mod strategy;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use config::{GameConfig, PhaseDelays};
pub use error::{ActionError, BetError, InsuranceError};
pub use hand::{DealerHand, Hand, HandStatus};
pub use record::{MemoryStore, PlayerRecord, RecordStore, SessionStats};
pub use rng::RandomSource;
pub use round::{
    DealerSnapshot, GameEvent, HandResult, HandSnapshot, Outcome, Phase, RoundController,
    RoundEngine, RoundSummary, Seat, SplitOutcome, TableSnapshot,
};
pub use rules::{HoleCardPolicy, RulesProfile, SurrenderType};
pub use shoe::Shoe;
pub use shuffle::ShuffleMode;
pub use strategy::{Action, Assessment, HandShape, Recommendation, Verdict};
