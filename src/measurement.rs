use serde::Serialize;

/// Unrounded values as the barometer reports them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub temperature_c: f64,
    pub pressure_hpa: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocalReading {
    pub temperature_c: f64,
    pub pressure_hpa: f64,
}

impl From<RawReading> for LocalReading {
    fn from(raw: RawReading) -> Self {
        LocalReading {
            temperature_c: round_to_tenth(raw.temperature_c),
            pressure_hpa: round_to_tenth(raw.pressure_hpa),
        }
    }
}

/// Rounds the exact binary value to one decimal, ties to even.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(21.34), 21.3);
        assert_eq!(round_to_tenth(21.36), 21.4);
        assert_eq!(round_to_tenth(1013.249), 1013.2);
        assert_eq!(round_to_tenth(-3.96), -4.0);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn test_round_to_tenth_ties_and_binary_values() {
        assert_eq!(round_to_tenth(21.25), 21.2);
        assert_eq!(round_to_tenth(21.75), 21.8);
        assert_eq!(round_to_tenth(1013.25), 1013.2);
        assert_eq!(round_to_tenth(0.35), 0.3);
        assert_eq!(round_to_tenth(-0.25), -0.2);
    }

    #[test]
    fn test_local_reading_from_raw() {
        let reading = LocalReading::from(RawReading {
            temperature_c: 21.2871,
            pressure_hpa: 1013.1834,
        });
        assert_eq!(reading.temperature_c, 21.3);
        assert_eq!(reading.pressure_hpa, 1013.2);
    }

    #[test]
    fn test_local_reading_serializes_as_plain_numbers() {
        let reading = LocalReading {
            temperature_c: 21.3,
            pressure_hpa: 1013.2,
        };
        assert_eq!(
            serde_json::to_string(&reading).unwrap(),
            r#"{"temperature_c":21.3,"pressure_hpa":1013.2}"#
        );
    }
}
