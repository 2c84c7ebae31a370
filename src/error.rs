//! Error types for round operations.
//!
//! Illegal player inputs are ordinary `Err` values meant to surface as
//! non-fatal messages, never panics.

use thiserror::Error;

/// Errors that can occur when starting a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bet below the table minimum.
    #[error("bet is below the table minimum")]
    BelowMinimum,
    /// Not enough balance to cover the bet.
    #[error("insufficient balance for this bet")]
    InsufficientBalance,
    /// The previous round has not settled yet.
    #[error("a round is already in progress")]
    RoundInProgress,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action was issued outside the player-turn phase.
    #[error("it is not the player's turn")]
    OutOfTurn,
    /// The round has already ended.
    #[error("the round is over")]
    RoundOver,
    /// Referenced hand does not exist.
    #[error("hand not found")]
    HandNotFound,
    /// The hand already stood, busted or surrendered.
    #[error("hand is not active")]
    HandNotActive,
    /// Double down is not legal on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// The hand is not a splittable pair, or came from split aces.
    #[error("cannot split this hand")]
    CannotSplit,
    /// The configured split limit was reached.
    #[error("maximum splits reached")]
    MaxSplitsReached,
    /// Surrender is not legal here.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Not enough balance to cover the extra wager.
    #[error("insufficient balance for this action")]
    InsufficientBalance,
}

/// Errors that can occur when answering the insurance offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsuranceError {
    /// No insurance offer is open.
    #[error("insurance is not being offered")]
    NotOffered,
}
