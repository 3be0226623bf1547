//! Stimulus parameters and their validation.
//!
//! Every value that ends up in a packet passes through this module first.
//! Raw caller input ([`StimulusParams`]) is checked by [`validate`], which
//! produces a [`StimulusCommand`] made only of range-checked newtypes. The
//! packet builder accepts nothing else, so out-of-range values can never be
//! hex-encoded into a packet the device would misinterpret.
//!
//! | Field         | Accepted range | Applies to     |
//! |---------------|----------------|----------------|
//! | `level`       | `0..=10`       | all stimuli    |
//! | `count`       | `0..=7`        | all stimuli    |
//! | `duration_on` | `0.11..=10` s  | vibrate, beep  |
//! | `gap`         | `0.11..=10` s  | vibrate, beep  |

use core::fmt;

use crate::consts::{
    COUNT_MAX, DEFAULT_COUNT, DEFAULT_INTERVAL_SECONDS, INTERVAL_MAX_SECONDS,
    INTERVAL_MIN_SECONDS, LEVEL_MAX, LEVEL_SCALE,
};
use crate::duration;

/// The three kinds of stimulus the device can deliver.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum StimulusKind {
    /// Vibration motor.
    Vibrate,
    /// Piezo beeper.
    Beep,
    /// Electric stimulus. Carries no duration or gap.
    Shock,
}

impl StimulusKind {
    /// Whether packets for this kind carry on-duration and gap fields.
    pub const fn has_timing(self) -> bool {
        match self {
            StimulusKind::Vibrate | StimulusKind::Beep => true,
            StimulusKind::Shock => false,
        }
    }

    /// The one-byte code written to the button-assignment endpoint.
    pub const fn assignment_code(self) -> u8 {
        match self {
            StimulusKind::Vibrate => 0x01,
            StimulusKind::Beep => 0x02,
            StimulusKind::Shock => 0x03,
        }
    }
}

impl fmt::Display for StimulusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StimulusKind::Vibrate => "vibrate",
            StimulusKind::Beep => "beep",
            StimulusKind::Shock => "shock",
        })
    }
}

/// Reasons a set of stimulus or clock parameters is rejected.
#[derive(PartialEq, Clone, Copy, Debug, thiserror::Error)]
pub enum ParameterError {
    /// Level outside `0..=10`.
    #[error("level {0} is outside 0..=10")]
    Level(i32),
    /// Count outside `0..=7`.
    #[error("count {0} is outside 0..=7")]
    Count(i32),
    /// On-duration outside `0.11..=10` seconds.
    #[error("duration_on {0}s is outside 0.11..=10")]
    DurationOn(f64),
    /// Gap outside `0.11..=10` seconds.
    #[error("gap {0}s is outside 0.11..=10")]
    Gap(f64),
    /// The button cannot be bound to this stimulus under the current configuration.
    #[error("button assignment to {0} is not supported")]
    UnsupportedAssignment(StimulusKind),
    /// A clock field is out of its calendar range.
    #[error("clock field {0} is out of range")]
    Clock(&'static str),
}

/// A validated stimulus level in `0..=10`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Level(u8);

impl Level {
    /// Checks that `level` lies in `0..=10`.
    pub fn new(level: i32) -> Result<Self, ParameterError> {
        if (0..=LEVEL_MAX).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(ParameterError::Level(level))
        }
    }

    /// The level as given by the caller.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The byte written on the wire: `level * 10`, at most `0x64`.
    pub const fn wire(self) -> u8 {
        self.0 * LEVEL_SCALE
    }
}

/// A validated repeat count in `0..=7`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Count(u8);

impl Count {
    /// Checks that `count` lies in `0..=7`.
    pub fn new(count: i32) -> Result<Self, ParameterError> {
        if (0..=COUNT_MAX).contains(&count) {
            Ok(Self(count as u8))
        } else {
            Err(ParameterError::Count(count))
        }
    }

    /// The count, always a single decimal (and hex) digit.
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A validated on-duration or gap in `0.11..=10` seconds.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Interval(f64);

impl Interval {
    fn new(seconds: f64) -> Option<Self> {
        (INTERVAL_MIN_SECONDS..=INTERVAL_MAX_SECONDS)
            .contains(&seconds)
            .then_some(Self(seconds))
    }

    /// Validates an on-duration.
    pub fn duration_on(seconds: f64) -> Result<Self, ParameterError> {
        Self::new(seconds).ok_or(ParameterError::DurationOn(seconds))
    }

    /// Validates a gap.
    pub fn gap(seconds: f64) -> Result<Self, ParameterError> {
        Self::new(seconds).ok_or(ParameterError::Gap(seconds))
    }

    /// The interval in seconds.
    pub const fn seconds(self) -> f64 {
        self.0
    }

    /// The duration code for this interval, in `0x01..=0x3d`.
    pub fn code(self) -> u8 {
        let code = duration::encode(self.0);
        // The accepted range keeps the logarithm positive and the code well inside a byte.
        debug_assert!(code.is_some(), "interval {} has no duration code", self.0);
        code.unwrap_or(0)
    }
}

/// Unvalidated stimulus parameters as supplied by a caller.
///
/// Defaults match the device's usual behaviour: one repetition, 0.65 s on,
/// 0.65 s gap.
///
/// ```rust
/// use pavlok::params::StimulusParams;
///
/// let params = StimulusParams::level(6).count(2).duration_on(0.65);
/// assert_eq!(params.count, 2);
/// ```
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct StimulusParams {
    /// Intensity, `0..=10`.
    pub level: i32,
    /// Number of repetitions, `0..=7`.
    pub count: i32,
    /// Seconds the stimulus is on for each repetition.
    pub duration_on: f64,
    /// Seconds between repetitions.
    pub gap: f64,
}

impl StimulusParams {
    /// Parameters at `level` with default count, duration and gap.
    pub const fn level(level: i32) -> Self {
        Self {
            level,
            count: DEFAULT_COUNT,
            duration_on: DEFAULT_INTERVAL_SECONDS,
            gap: DEFAULT_INTERVAL_SECONDS,
        }
    }

    /// Sets the repeat count.
    pub const fn count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    /// Sets the on-duration in seconds.
    pub const fn duration_on(mut self, seconds: f64) -> Self {
        self.duration_on = seconds;
        self
    }

    /// Sets the gap in seconds.
    pub const fn gap(mut self, seconds: f64) -> Self {
        self.gap = seconds;
        self
    }
}

/// Timing fields of a vibrate or beep command.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Timing {
    /// On-duration of each repetition.
    pub duration_on: Interval,
    /// Gap between repetitions.
    pub gap: Interval,
}

/// A fully validated stimulus command, ready for encoding.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct StimulusCommand {
    kind: StimulusKind,
    level: Level,
    count: Count,
    timing: Option<Timing>,
}

impl StimulusCommand {
    /// The stimulus kind.
    pub const fn kind(&self) -> StimulusKind {
        self.kind
    }

    /// The validated level.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The validated count.
    pub const fn count(&self) -> Count {
        self.count
    }

    /// Duration and gap. `None` for shocks.
    pub const fn timing(&self) -> Option<Timing> {
        self.timing
    }
}

/// Validates `params` for a stimulus of `kind`.
///
/// Level and count are always checked. Duration and gap are only checked (and
/// kept) for kinds that carry them; a shock ignores both.
///
/// Validation has no side effects and never touches the transport.
pub fn validate(kind: StimulusKind, params: &StimulusParams) -> Result<StimulusCommand, ParameterError> {
    let level = Level::new(params.level)?;
    let count = Count::new(params.count)?;
    let timing = if kind.has_timing() {
        Some(Timing {
            duration_on: Interval::duration_on(params.duration_on)?,
            gap: Interval::gap(params.gap)?,
        })
    } else {
        None
    };
    Ok(StimulusCommand {
        kind,
        level,
        count,
        timing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let params = StimulusParams::level(6);
        assert_eq!(params.count, 1);
        assert_eq!(params.duration_on, 0.65);
        assert_eq!(params.gap, 0.65);
    }

    #[test]
    fn test_rejects_negative_level() {
        let params = StimulusParams::level(-1);
        assert_eq!(
            validate(StimulusKind::Vibrate, &params),
            Err(ParameterError::Level(-1))
        );
    }

    #[test]
    fn test_rejects_level_above_ten() {
        assert_eq!(
            validate(StimulusKind::Shock, &StimulusParams::level(11)),
            Err(ParameterError::Level(11))
        );
    }

    #[test]
    fn test_rejects_count_eight() {
        let params = StimulusParams::level(5).count(8);
        assert_eq!(
            validate(StimulusKind::Beep, &params),
            Err(ParameterError::Count(8))
        );
    }

    #[test]
    fn test_rejects_short_duration() {
        let params = StimulusParams::level(5).duration_on(0.10);
        assert_eq!(
            validate(StimulusKind::Vibrate, &params),
            Err(ParameterError::DurationOn(0.10))
        );
    }

    #[test]
    fn test_rejects_long_gap() {
        let params = StimulusParams::level(5).gap(10.01);
        assert_eq!(
            validate(StimulusKind::Vibrate, &params),
            Err(ParameterError::Gap(10.01))
        );
    }

    #[test]
    fn test_rejects_nan_duration() {
        let params = StimulusParams::level(5).duration_on(f64::NAN);
        assert!(matches!(
            validate(StimulusKind::Beep, &params),
            Err(ParameterError::DurationOn(_))
        ));
    }

    #[test]
    fn test_shock_ignores_timing() {
        let params = StimulusParams::level(3).duration_on(0.0).gap(99.0);
        let cmd = validate(StimulusKind::Shock, &params).unwrap();
        assert_eq!(cmd.timing(), None);
        assert_eq!(cmd.level().wire(), 30);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let params = StimulusParams::level(10).count(7).duration_on(0.11).gap(10.0);
        let cmd = validate(StimulusKind::Vibrate, &params).unwrap();
        assert_eq!(cmd.level().wire(), 0x64);
        assert_eq!(cmd.count().get(), 7);
        let timing = cmd.timing().unwrap();
        assert_eq!(timing.duration_on.code(), 0x01);
        assert_eq!(timing.gap.code(), 0x3d);
    }

    #[test]
    fn test_assignment_codes_are_distinct() {
        assert_eq!(StimulusKind::Vibrate.assignment_code(), 0x01);
        assert_eq!(StimulusKind::Beep.assignment_code(), 0x02);
        assert_eq!(StimulusKind::Shock.assignment_code(), 0x03);
    }

    proptest! {
        #[test]
        fn accepted_levels_scale_by_ten(level in 0i32..=10) {
            let cmd = validate(StimulusKind::Vibrate, &StimulusParams::level(level)).unwrap();
            prop_assert_eq!(i32::from(cmd.level().wire()), level * 10);
        }

        #[test]
        fn out_of_range_counts_are_rejected(count in prop_oneof![i32::MIN..0, 8..i32::MAX]) {
            let params = StimulusParams::level(1).count(count);
            prop_assert_eq!(validate(StimulusKind::Shock, &params), Err(ParameterError::Count(count)));
        }

        #[test]
        fn accepted_intervals_have_nonzero_codes(s in INTERVAL_MIN_SECONDS..=INTERVAL_MAX_SECONDS) {
            let interval = Interval::gap(s).unwrap();
            prop_assert!((0x01..=0x3d).contains(&interval.code()));
            prop_assert_eq!(Some(interval.code()), duration::encode(s));
        }
    }
}
