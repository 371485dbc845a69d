//! Motion sensor readings in physical units

/// Sea-level reference pressure (hPa)
const SEA_LEVEL_HPA: f32 = 1013.25;

/// Three-axis reading
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Orientation quaternion from the sensor fusion hub
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    /// Build from roll/pitch/yaw in degrees (ZYX order)
    pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Self {
        let (sr, cr) = (roll.to_radians() / 2.0).sin_cos();
        let (sp, cp) = (pitch.to_radians() / 2.0).sin_cos();
        let (sy, cy) = (yaw.to_radians() / 2.0).sin_cos();

        Self {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        }
    }
}

/// Roll, pitch and yaw in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub roll: f32,
    pub pitch: f32,
    /// Heading in [0, 360)
    pub yaw: f32,
}

impl Orientation {
    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Convert a quaternion, adding the magnetic declination to the heading
    pub fn from_quaternion(q: Quaternion, declination_deg: f32) -> Self {
        let Quaternion { w, x, y, z } = q;

        let roll = (2.0 * (w * x + y * z)).atan2(w * w - x * x - y * y + z * z);
        let pitch = -(2.0 * (x * z - w * y)).clamp(-1.0, 1.0).asin();
        let yaw = (2.0 * (x * y + w * z)).atan2(w * w + x * x - y * y - z * z);

        let mut yaw = yaw.to_degrees() + declination_deg;
        if yaw < 0.0 {
            yaw += 360.0;
        }

        Self {
            roll: roll.to_degrees(),
            pitch: pitch.to_degrees(),
            yaw: yaw % 360.0,
        }
    }
}

/// Barometer reading with derived altitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarometricReading {
    /// Pressure (hPa)
    pub pressure: f32,
    /// Temperature (Celsius)
    pub temperature: f32,
    /// Altitude above sea level (m)
    pub altitude: f32,
}

impl BarometricReading {
    /// Derive altitude from the international barometric formula
    pub fn from_pressure(pressure: f32, temperature: f32) -> Self {
        let altitude = (1.0 - (pressure / SEA_LEVEL_HPA).powf(0.190295)) * 44330.0;
        Self {
            pressure,
            temperature,
            altitude,
        }
    }
}

/// One poll of the motion sensor.
///
/// Each field is `None` when that output was not ready this poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionSample {
    pub quaternion: Option<Quaternion>,
    /// Acceleration (g)
    pub acceleration: Option<Vector3>,
    /// Angular velocity (deg/s)
    pub gyro: Option<Vector3>,
    pub barometer: Option<BarometricReading>,
}

impl MotionSample {
    /// Upright, still, at sea level, 20 C
    pub fn resting() -> Self {
        Self::with_orientation(-90.0, 0.0, 0.0)
    }

    /// Still sample at a given attitude
    pub fn with_orientation(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            quaternion: Some(Quaternion::from_euler(roll, pitch, yaw)),
            acceleration: Some(Vector3::default()),
            gyro: Some(Vector3::default()),
            barometer: Some(BarometricReading::from_pressure(SEA_LEVEL_HPA, 20.0)),
        }
    }
}
