use crate::device::Pavlok;
use crate::error::Error;
use crate::transport::Transport;
use embedded_hal::delay::DelayNs;

use super::{shock_lead_ms, shock_period_ms};

/// Delivers `shocks` single shocks at `level`, leaving `gap_ms` after each delivery.
///
/// This blocks for the whole train. Each write is followed by a delay of the
/// session's [`shock_latency_ms`](crate::config::Config::shock_latency_ms) plus
/// `gap_ms`, so a shock is never written before the previous one has fired.
///
/// # Arguments
/// - `pavlok`: An active session.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `level`: Shock level, `0..=10`.
/// - `shocks`: Number of shocks to deliver.
/// - `gap_ms`: Quiet time after each delivery.
///
/// # Example
/// ```rust,ignore
/// use pavlok::session::shock_train;
/// shock_train(&mut pavlok, &mut delay, 4, 3, 500)?;
/// ```
///
/// # Notes
/// - Stops at the first error. Shocks already written are not undone.
/// - An invalid level fails before anything is written or any time is spent.
pub fn shock_train<T, D>(
    pavlok: &mut Pavlok<T>,
    delay: &mut D,
    level: i32,
    shocks: u8,
    gap_ms: u32,
) -> Result<(), Error<T::Error>>
where
    T: Transport,
    D: DelayNs,
{
    let period = shock_period_ms(pavlok.config().shock_latency_ms, gap_ms);
    for _ in 0..shocks {
        pavlok.shock(level, 1)?;
        delay.delay_ms(period);
    }
    Ok(())
}

/// Writes a shock timed to land `in_ms` from now.
///
/// Waits `in_ms` minus the session's latency, then writes the shock. If
/// `in_ms` is shorter than the latency the shock is written at once and lands late.
pub fn shock_at<T, D>(
    pavlok: &mut Pavlok<T>,
    delay: &mut D,
    level: i32,
    in_ms: u32,
) -> Result<(), Error<T::Error>>
where
    T: Transport,
    D: DelayNs,
{
    let lead = shock_lead_ms(pavlok.config().shock_latency_ms, in_ms);
    if lead > 0 {
        delay.delay_ms(lead);
    }
    pavlok.shock(level, 1)
}
