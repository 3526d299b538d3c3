use std::time::SystemTime;

pub trait SystemTimeExt {
    /// Seconds since the Unix epoch, fractional part included. Times before
    /// the epoch come out negative.
    fn to_unix_seconds(&self) -> f64;
}

impl SystemTimeExt for SystemTime {
    fn to_unix_seconds(&self) -> f64 {
        match self.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => after.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        }
    }
}
