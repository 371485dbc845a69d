//! Warning kinds and the audio sample library

use serde::{Deserialize, Serialize};

/// Audio samples installed on the device, by library slot
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sample {
    StartupSequence = 0,
    StartupWarning = 1,
    StartSignal = 2,
    WarnPerson = 3,
    WarnBicycle = 4,
    WarnCar = 5,
    WarnMotorcycle = 6,
    WarnBus = 7,
    WarnLightRed = 8,
    WarnLightGreen = 9,
    WarnUphill = 10,
    WarnDownhill = 11,
    SuggestBench = 12,
    SuggestChair = 13,
    SuggestBin = 14,
    ToDay = 15,
    ToNight = 16,
    Falling = 17,
    Clock13 = 18,
    Clock14 = 19,
    Clock15 = 20,
    Clock16 = 21,
    Clock17 = 22,
    Clock18 = 23,
    Temp10 = 24,
    Temp15 = 25,
    Temp20 = 26,
    Temp25 = 27,
    Temp30 = 28,
    Temp35 = 29,
    RainYes = 30,
    RainNo = 31,
    StandbyOn = 32,
    StandbyOff = 33,
    ErrorCamera = 34,
    ErrorMotionSensor = 35,
    ErrorRangefinder = 36,
    ShutdownConfirm = 37,
    Shutdown = 38,
    ShortBeep = 39,
    LongBeep = 40,
}

impl Sample {
    /// Library slot number
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Asset file under the audio directory
    pub fn file_name(self) -> &'static str {
        match self {
            Sample::StartupSequence => "startup_seq.wav",
            Sample::StartupWarning => "startup_warning.wav",
            Sample::StartSignal => "start_signal.wav",
            Sample::WarnPerson => "warning_person.wav",
            Sample::WarnBicycle => "warning_bicycle.wav",
            Sample::WarnCar => "warning_car.wav",
            Sample::WarnMotorcycle => "warning_motorcycle.wav",
            Sample::WarnBus => "warning_bus.wav",
            Sample::WarnLightRed => "warning_trafficlight_red.wav",
            Sample::WarnLightGreen => "warning_trafficlight_green.wav",
            Sample::WarnUphill => "warning_uphill.wav",
            Sample::WarnDownhill => "warning_downhill.wav",
            Sample::SuggestBench => "suggestion_bench.wav",
            Sample::SuggestChair => "suggestion_chair.wav",
            Sample::SuggestBin => "suggestion_bin.wav",
            Sample::ToDay => "to_day.wav",
            Sample::ToNight => "to_night.wav",
            Sample::Falling => "falling.wav",
            Sample::Clock13 => "clock_13.wav",
            Sample::Clock14 => "clock_14.wav",
            Sample::Clock15 => "clock_15.wav",
            Sample::Clock16 => "clock_16.wav",
            Sample::Clock17 => "clock_17.wav",
            Sample::Clock18 => "clock_18.wav",
            Sample::Temp10 => "temp_10.wav",
            Sample::Temp15 => "temp_15.wav",
            Sample::Temp20 => "temp_20.wav",
            Sample::Temp25 => "temp_25.wav",
            Sample::Temp30 => "temp_30.wav",
            Sample::Temp35 => "temp_35.wav",
            Sample::RainYes => "rain_yes.wav",
            Sample::RainNo => "rain_no.wav",
            Sample::StandbyOn => "activate_standby.wav",
            Sample::StandbyOff => "deactivate_standby.wav",
            Sample::ErrorCamera => "error_camera.wav",
            Sample::ErrorMotionSensor => "error_usfs.wav",
            Sample::ErrorRangefinder => "error_lidar.wav",
            Sample::ShutdownConfirm => "confirm_shutdown.wav",
            Sample::Shutdown => "shutdown.wav",
            Sample::ShortBeep => "short_beep.wav",
            Sample::LongBeep => "long_beep.wav",
        }
    }
}

/// Alerts that go through the arbitration queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    Person,
    Bicycle,
    Car,
    Motorcycle,
    Bus,
    TrafficLightRed,
    TrafficLightGreen,
    Uphill,
    Downhill,
    Bench,
    Chair,
    Bin,
    ToDay,
    ToNight,
    Falling,
    Clock13,
    Clock14,
    Clock15,
    Clock16,
    Clock17,
    Clock18,
    Temperature10,
    Temperature15,
    Temperature20,
    Temperature25,
    Temperature30,
    Temperature35,
    RainYes,
    RainNo,
    StandbyOn,
    StandbyOff,
    ShutdownConfirm,
}

impl WarningKind {
    /// Spoken hour, clamped to the recorded range 13-18
    pub fn clock(hour: u32) -> Self {
        match hour.clamp(13, 18) {
            13 => WarningKind::Clock13,
            14 => WarningKind::Clock14,
            15 => WarningKind::Clock15,
            16 => WarningKind::Clock16,
            17 => WarningKind::Clock17,
            _ => WarningKind::Clock18,
        }
    }

    /// Spoken temperature for a bucket in 10..=35 (steps of 5)
    pub fn temperature(celsius: i32) -> Self {
        match celsius {
            i32::MIN..=10 => WarningKind::Temperature10,
            11..=15 => WarningKind::Temperature15,
            16..=20 => WarningKind::Temperature20,
            21..=25 => WarningKind::Temperature25,
            26..=30 => WarningKind::Temperature30,
            _ => WarningKind::Temperature35,
        }
    }

    /// Arbitration priority (higher plays first)
    pub fn priority(self) -> u16 {
        match self {
            WarningKind::ShutdownConfirm => 999,
            WarningKind::StandbyOn => 910,
            WarningKind::StandbyOff => 900,
            WarningKind::Falling => 610,
            WarningKind::TrafficLightRed => 600,
            WarningKind::TrafficLightGreen => 550,
            WarningKind::Car => 500,
            WarningKind::Bicycle => 400,
            WarningKind::Motorcycle => 350,
            WarningKind::Bus => 325,
            WarningKind::Person => 300,
            WarningKind::Downhill => 210,
            WarningKind::Uphill => 200,
            WarningKind::ToNight => 151,
            WarningKind::ToDay => 150,
            WarningKind::Clock13
            | WarningKind::Clock14
            | WarningKind::Clock15
            | WarningKind::Clock16
            | WarningKind::Clock17
            | WarningKind::Clock18 => 112,
            WarningKind::Temperature10
            | WarningKind::Temperature15
            | WarningKind::Temperature20
            | WarningKind::Temperature25
            | WarningKind::Temperature30
            | WarningKind::Temperature35 => 111,
            WarningKind::RainYes | WarningKind::RainNo => 110,
            WarningKind::Bin => 100,
            WarningKind::Bench => 90,
            WarningKind::Chair => 80,
        }
    }

    /// Sample announcing this warning
    pub fn sample(self) -> Sample {
        match self {
            WarningKind::Person => Sample::WarnPerson,
            WarningKind::Bicycle => Sample::WarnBicycle,
            WarningKind::Car => Sample::WarnCar,
            WarningKind::Motorcycle => Sample::WarnMotorcycle,
            WarningKind::Bus => Sample::WarnBus,
            WarningKind::TrafficLightRed => Sample::WarnLightRed,
            WarningKind::TrafficLightGreen => Sample::WarnLightGreen,
            WarningKind::Uphill => Sample::WarnUphill,
            WarningKind::Downhill => Sample::WarnDownhill,
            WarningKind::Bench => Sample::SuggestBench,
            WarningKind::Chair => Sample::SuggestChair,
            WarningKind::Bin => Sample::SuggestBin,
            WarningKind::ToDay => Sample::ToDay,
            WarningKind::ToNight => Sample::ToNight,
            WarningKind::Falling => Sample::Falling,
            WarningKind::Clock13 => Sample::Clock13,
            WarningKind::Clock14 => Sample::Clock14,
            WarningKind::Clock15 => Sample::Clock15,
            WarningKind::Clock16 => Sample::Clock16,
            WarningKind::Clock17 => Sample::Clock17,
            WarningKind::Clock18 => Sample::Clock18,
            WarningKind::Temperature10 => Sample::Temp10,
            WarningKind::Temperature15 => Sample::Temp15,
            WarningKind::Temperature20 => Sample::Temp20,
            WarningKind::Temperature25 => Sample::Temp25,
            WarningKind::Temperature30 => Sample::Temp30,
            WarningKind::Temperature35 => Sample::Temp35,
            WarningKind::RainYes => Sample::RainYes,
            WarningKind::RainNo => Sample::RainNo,
            WarningKind::StandbyOn => Sample::StandbyOn,
            WarningKind::StandbyOff => Sample::StandbyOff,
            WarningKind::ShutdownConfirm => Sample::ShutdownConfirm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_clamps() {
        assert_eq!(WarningKind::clock(3), WarningKind::Clock13);
        assert_eq!(WarningKind::clock(15), WarningKind::Clock15);
        assert_eq!(WarningKind::clock(23), WarningKind::Clock18);
    }

    #[test]
    fn test_temperature_buckets() {
        assert_eq!(WarningKind::temperature(10), WarningKind::Temperature10);
        assert_eq!(WarningKind::temperature(11), WarningKind::Temperature15);
        assert_eq!(WarningKind::temperature(25), WarningKind::Temperature25);
        assert_eq!(WarningKind::temperature(35), WarningKind::Temperature35);
    }

    #[test]
    fn test_sample_slots_match_library() {
        assert_eq!(Sample::StartupSequence.id(), 0);
        assert_eq!(WarningKind::Clock18.sample().id(), 23);
        assert_eq!(WarningKind::Temperature10.sample().id(), 24);
        assert_eq!(Sample::LongBeep.id(), 40);
        assert_eq!(Sample::ErrorRangefinder.file_name(), "error_lidar.wav");
    }
}
