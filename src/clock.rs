//! Wall-clock access for timestamps and identifier derivation.

use chrono::Utc;

/// Current time as fractional seconds since the Unix epoch.
///
/// This is the timestamp format carried on blocks, transactions and
/// profiles, so externally recomputed hashes line up with ours.
pub fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Current time as nanoseconds since the Unix epoch.
///
/// Used as the time component of derived identifiers, where two
/// back-to-back derivations must see distinct inputs.
pub fn epoch_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_seconds_is_recent() {
        let now = epoch_seconds();
        // Sometime after 2020 and before 2100.
        assert!(now > 1_577_836_800.0);
        assert!(now < 4_102_444_800.0);
    }

    #[test]
    fn test_epoch_nanos_advances() {
        let a = epoch_nanos();
        let b = epoch_nanos();
        assert!(b >= a);
    }
}
