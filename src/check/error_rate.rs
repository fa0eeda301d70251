//! Error-rate severity tiers.

/// Lowest error rate (percent) that counts as elevated at all.
pub const LOW_RATE_BOUNDARY: f64 = 1.0;

/// Error rate (percent) at which the high tier starts.
pub const HIGH_RATE_BOUNDARY: f64 = 5.0;

/// Error rate (percent) above which the extreme tier starts.
pub const EXTREME_RATE_BOUNDARY: f64 = 10.0;

/// Daily volume at or below which a node counts as low-traffic.
pub const LOW_TRAFFIC_VOLUME: u64 = 100;

/// Factor applied to the high/extreme boundaries for low-traffic nodes.
///
/// A handful of failures on a few dozen records produces a scary-looking
/// percentage without statistical weight, so the upper tiers kick in
/// later. Tunable; the standard-traffic boundaries are the contract.
pub const LOW_TRAFFIC_RELAXATION: f64 = 2.0;

/// Elevated error-rate severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    High,
    Extreme,
}

/// Map a daily error rate (percent) and import volume to a severity tier.
///
/// Returns `None` below the low boundary. Boundaries are closed/open as
/// tested: `1.0` is Low, `5.0` is High, `10.0` is still High, anything
/// above is Extreme. With an absent volume the standard boundaries apply.
pub fn tier(rate: f64, volume: Option<u64>) -> Option<Tier> {
    let relaxation = match volume {
        Some(v) if v <= LOW_TRAFFIC_VOLUME => LOW_TRAFFIC_RELAXATION,
        _ => 1.0,
    };
    let high = HIGH_RATE_BOUNDARY * relaxation;
    let extreme = EXTREME_RATE_BOUNDARY * relaxation;

    if rate < LOW_RATE_BOUNDARY {
        None
    } else if rate < high {
        Some(Tier::Low)
    } else if rate <= extreme {
        Some(Tier::High)
    } else {
        Some(Tier::Extreme)
    }
}
