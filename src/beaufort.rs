use std::fmt;

use crate::error::BeaufortError;

/// Speeds strictly above this are hurricane force.
const HURRICANE_ABOVE_KMH: f64 = 117.0;

/// Lower bound (km/h, inclusive) and description for forces 0 through 11.
/// Force 12 is everything above `HURRICANE_ABOVE_KMH`.
const BANDS: [(f64, &str); 12] = [
    (0.0, "Calm"),
    (1.0, "Light air"),
    (6.0, "Light breeze"),
    (12.0, "Gentle breeze"),
    (20.0, "Moderate breeze"),
    (30.0, "Fresh breeze"),
    (40.0, "Strong breeze"),
    (51.0, "Near gale"),
    (62.0, "Gale"),
    (75.0, "Strong gale"),
    (88.0, "Storm"),
    (102.0, "Violent storm"),
];

const HURRICANE: &str = "Hurricane force";

/// A force on the Beaufort scale, always in `0..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Beaufort(u8);

impl Beaufort {
    pub const MAX: Beaufort = Beaufort(12);

    /// Classifies a wind speed in km/h.
    ///
    /// A speed belongs to the highest band whose lower bound it reaches, so
    /// fractional speeds between the named integers fall into the lower band
    /// (5.1 km/h is force 1). Anything above 117 km/h is force 12.
    ///
    /// Negative and NaN speeds are rejected.
    pub fn classify(speed_kmh: f64) -> Result<Self, BeaufortError> {
        if speed_kmh.is_nan() || speed_kmh < 0.0 {
            return Err(BeaufortError::InvalidSpeed(speed_kmh));
        }
        if speed_kmh > HURRICANE_ABOVE_KMH {
            return Ok(Self::MAX);
        }
        let force = BANDS
            .iter()
            .rposition(|(lower, _)| speed_kmh >= *lower)
            .unwrap_or(0);
        Ok(Self(force as u8))
    }

    pub fn force(self) -> u8 {
        self.0
    }

    pub fn description(self) -> &'static str {
        BANDS
            .get(self.0 as usize)
            .map(|(_, desc)| *desc)
            .unwrap_or(HURRICANE)
    }
}

impl fmt::Display for Beaufort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Beaufort> for f64 {
    fn from(b: Beaufort) -> f64 {
        b.0 as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn force(speed: f64) -> u8 {
        Beaufort::classify(speed).unwrap().force()
    }

    #[test]
    fn test_scenario() {
        let speeds = [0.5, 5.0, 6.0, 117.0, 118.0];
        let forces: Vec<u8> = speeds.iter().map(|s| force(*s)).collect();
        assert_eq!(forces, vec![0, 1, 2, 11, 12]);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(force(0.0), 0);
        assert_eq!(force(0.99), 0);
        assert_eq!(force(1.0), 1);
        assert_eq!(force(5.1), 1);
        assert_eq!(force(5.99), 1);
        assert_eq!(force(11.0), 2);
        assert_eq!(force(12.0), 3);
        assert_eq!(force(19.0), 3);
        assert_eq!(force(20.0), 4);
        assert_eq!(force(39.0), 5);
        assert_eq!(force(40.0), 6);
        assert_eq!(force(50.0), 6);
        assert_eq!(force(51.0), 7);
        assert_eq!(force(61.0), 7);
        assert_eq!(force(62.0), 8);
        assert_eq!(force(74.0), 8);
        assert_eq!(force(75.0), 9);
        assert_eq!(force(87.0), 9);
        assert_eq!(force(88.0), 10);
        assert_eq!(force(101.0), 10);
        assert_eq!(force(102.0), 11);
        assert_eq!(force(117.5), 12);
        assert_eq!(force(f64::INFINITY), 12);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let mut prev = 0;
        for step in 0..3000 {
            let f = force(step as f64 * 0.05);
            assert!(f <= 12);
            assert!(f >= prev, "force dropped at {}", step as f64 * 0.05);
            prev = f;
        }
        assert_eq!(prev, 12);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            Beaufort::classify(-0.5),
            Err(BeaufortError::InvalidSpeed(_))
        ));
        assert!(Beaufort::classify(f64::NAN).is_err());
    }

    #[test]
    fn test_description() {
        assert_eq!(Beaufort::classify(0.0).unwrap().description(), "Calm");
        assert_eq!(Beaufort::classify(65.0).unwrap().description(), "Gale");
        assert_eq!(Beaufort::MAX.description(), "Hurricane force");
    }
}
