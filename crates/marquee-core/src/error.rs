use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Velocity must be a positive finite number, got {0}")]
    InvalidVelocity(f64),

    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    #[error("{0} must not be negative")]
    NegativeLength(&'static str),

    #[error("Start padding ({start_padding}) must not exceed blank space ({blank_space})")]
    StartPaddingExceedsBlankSpace { start_padding: f64, blank_space: f64 },

    #[error("Fade {edge} fraction must be within [0, 0.5], got {value}")]
    FadeFractionOutOfRange { edge: &'static str, value: f64 },

    #[error("Number of rounds must be greater than zero")]
    InvalidRoundCount,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
