//! Match configuration and its validation errors

use thiserror::Error;

use crate::types::{MatchMode, SoftDropStyle, MAX_BOARDS};

/// Everything a match needs to know up front. Passed to the coordinator; there is
/// no global game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub mode: MatchMode,
    pub board_count: usize,
    pub soft_drop: SoftDropStyle,
}

impl MatchConfig {
    /// Config for `mode` with the matching board count and tap soft drop.
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            board_count: mode.board_count(),
            soft_drop: SoftDropStyle::default(),
        }
    }

    pub fn with_soft_drop(mut self, soft_drop: SoftDropStyle) -> Self {
        self.soft_drop = soft_drop;
        self
    }

    pub fn attacks_enabled(&self) -> bool {
        self.mode == MatchMode::Dual
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_count != self.mode.board_count() || self.board_count > MAX_BOARDS {
            return Err(ConfigError::BoardCountMismatch {
                mode: self.mode.as_str(),
                count: self.board_count,
            });
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{mode} mode cannot run with {count} board(s)")]
    BoardCountMismatch { mode: &'static str, count: usize },

    #[error("tick interval must be at least 1 ms (got {0})")]
    InvalidTickRate(u32),

    #[error("unknown {what} '{value}'")]
    UnknownValue { what: &'static str, value: String },
}

/// Check the fixed timestep used by the frontend loop.
pub fn validate_tick_ms(tick_ms: u32) -> Result<u32, ConfigError> {
    if tick_ms == 0 {
        return Err(ConfigError::InvalidTickRate(tick_ms));
    }
    Ok(tick_ms)
}

/// Parse a match mode name, see [`MatchMode::from_str`].
pub fn parse_mode(s: &str) -> Result<MatchMode, ConfigError> {
    MatchMode::from_str(s).ok_or_else(|| ConfigError::UnknownValue {
        what: "mode",
        value: s.to_string(),
    })
}

/// Parse a soft-drop style name ("tap" or "sticky").
pub fn parse_soft_drop(s: &str) -> Result<SoftDropStyle, ConfigError> {
    SoftDropStyle::from_str(s).ok_or_else(|| ConfigError::UnknownValue {
        what: "soft drop style",
        value: s.to_string(),
    })
}
