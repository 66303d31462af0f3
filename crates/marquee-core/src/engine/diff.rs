//! Configuration change classification
//!
//! A new config replaces the old one wholesale; this decides how much of
//! the derived state has to be rebuilt.

use crate::config::MarqueeConfig;

/// What a config replacement invalidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    /// Text or style changed: measure again
    pub needs_remeasure: bool,
    /// Cycle length changed: recompute duration, keep normalized progress
    pub needs_duration_recalc: bool,
    /// Sequencing or mapping changed: rebuild animator and restart
    pub needs_animation_rebuild: bool,
}

impl ConfigDiff {
    pub fn is_empty(&self) -> bool {
        !self.needs_remeasure && !self.needs_duration_recalc && !self.needs_animation_rebuild
    }
}

/// Compare two configs
///
/// Fade settings and start padding are read at draw time and never flag.
pub fn diff(old: &MarqueeConfig, new: &MarqueeConfig) -> ConfigDiff {
    let needs_remeasure = old.text() != new.text() || old.style() != new.style();
    let needs_duration_recalc = needs_remeasure
        || old.velocity() != new.velocity()
        || old.blank_space() != new.blank_space();
    let needs_animation_rebuild = old.reverse() != new.reverse()
        || old.bounce() != new.bounce()
        || old.start_after() != new.start_after()
        || old.pause_after_round() != new.pause_after_round()
        || old.number_of_rounds() != new.number_of_rounds()
        || old.easing() != new.easing();

    ConfigDiff {
        needs_remeasure,
        needs_duration_recalc,
        needs_animation_rebuild,
    }
}
