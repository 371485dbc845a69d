//! Time and weather advisory spoken on a tilt-right gesture

use alerting::WarningKind;

/// Three independent advisories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub clock: WarningKind,
    pub temperature: WarningKind,
    pub rain: WarningKind,
}

impl Advisory {
    /// Build the advisory from the local hour and barometer.
    ///
    /// The temperature is truncated, clamped to 10-35 C and rounded up to
    /// the next multiple of 5. Pressure at or below `rain_pressure_hpa`
    /// announces rain.
    pub fn new(hour: u32, temperature_c: f32, pressure_hpa: f32, rain_pressure_hpa: f32) -> Self {
        let mut temp = (temperature_c as i32).clamp(10, 35);
        if temp % 5 != 0 {
            temp += 5 - temp % 5;
        }

        let rain = if pressure_hpa > rain_pressure_hpa {
            WarningKind::RainNo
        } else {
            WarningKind::RainYes
        };

        Self {
            clock: WarningKind::clock(hour),
            temperature: WarningKind::temperature(temp),
            rain,
        }
    }

    /// Advisories in announcement order
    pub fn kinds(&self) -> [WarningKind; 3] {
        [self.clock, self.temperature, self.rain]
    }
}
