//! Timer templates
//!
//! Templates are static per-mechanic descriptions of the timers to create
//! when the mechanic fires. Durations and status events depend on the
//! boss-specific settings; both are expressed as data rules rather than
//! closures so a template stays inspectable and referentially transparent:
//! resolving the same template against the same settings always yields the
//! same timer.

use hashbrown::HashMap;

use super::TimerError;
use crate::settings::SettingValue;

/// One stop of a timer's color ramp: the color to use while the remaining
/// tick count is at or below `remaining`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPhase {
    pub remaining: u32,
    pub color: String,
}

/// How a template's duration is computed from the specific-settings map.
#[derive(Debug, Clone)]
pub enum DurationRule {
    /// Always the same tick count.
    Fixed(u32),

    /// Keyed by a select-type setting's text value, with a fallback for
    /// unmatched values.
    BySetting {
        key: String,
        cases: Vec<(String, u32)>,
        default: u32,
    },

    /// `base` minus a numeric setting's value.
    BaseMinusSetting { key: String, base: u32 },
}

impl DurationRule {
    /// Evaluate against the boss-specific settings.
    pub fn evaluate(&self, specific: &HashMap<String, SettingValue>) -> Result<u32, TimerError> {
        match self {
            DurationRule::Fixed(ticks) => Ok(*ticks),

            DurationRule::BySetting { key, cases, default } => {
                let value = specific
                    .get(key)
                    .ok_or_else(|| TimerError::MissingSetting { key: key.clone() })?;
                let text = value
                    .as_str()
                    .ok_or_else(|| TimerError::WrongSettingType { key: key.clone() })?;
                Ok(cases
                    .iter()
                    .find(|(case, _)| case == text)
                    .map(|(_, ticks)| *ticks)
                    .unwrap_or(*default))
            }

            DurationRule::BaseMinusSetting { key, base } => {
                let value = specific
                    .get(key)
                    .ok_or_else(|| TimerError::MissingSetting { key: key.clone() })?;
                let offset = value
                    .as_i64()
                    .ok_or_else(|| TimerError::WrongSettingType { key: key.clone() })?;
                u32::try_from(i64::from(*base) - offset)
                    .map_err(|_| TimerError::WrongSettingType { key: key.clone() })
            }
        }
    }
}

/// When a status event lands, relative to the timer's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickRule {
    /// A fixed tick offset.
    Fixed(u32),

    /// The timer's resolved duration, whatever the settings made it.
    AtExpiry,
}

/// A settings-dependent status event description.
#[derive(Debug, Clone)]
pub struct StatusEventRule {
    pub tick: TickRule,
    pub text: String,
}

/// A resolved status event: at elapsed tick `tick`, publish `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub tick: u32,
    pub text: String,
}

/// Static description of one timer a mechanic can instantiate.
#[derive(Debug, Clone)]
pub struct TimerTemplate {
    /// Identifier, unique across the boss. At most one active timer per id.
    pub id: String,

    /// Label shown on the countdown bar.
    pub label: String,

    /// Color ramp, ordered from the widest `remaining` threshold down.
    pub color_phases: Vec<ColorPhase>,

    pub duration: DurationRule,

    pub status_events: Vec<StatusEventRule>,
}

impl TimerTemplate {
    /// Resolve duration and status events against the current settings.
    ///
    /// A zero or negative duration is a configuration error for this one
    /// template; the caller drops the request and moves on.
    pub fn resolve(
        &self,
        specific: &HashMap<String, SettingValue>,
    ) -> Result<(u32, Vec<StatusEvent>), TimerError> {
        let total_ticks = self.duration.evaluate(specific)?;
        if total_ticks == 0 {
            return Err(TimerError::InvalidDuration { id: self.id.clone() });
        }

        let events = self
            .status_events
            .iter()
            .map(|rule| StatusEvent {
                tick: match rule.tick {
                    TickRule::Fixed(tick) => tick,
                    TickRule::AtExpiry => total_ticks,
                },
                text: rule.text.clone(),
            })
            .collect();

        Ok((total_ticks, events))
    }
}
