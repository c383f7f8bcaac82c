use bytesize::ByteSize;
use core::{fmt, time::Duration};

/// Bytes per second, displayed the way [`ByteSize`] displays sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throughput(pub u64);

impl Throughput {
    pub fn from_bytes_per_sec(bytes_per_sec: u64) -> Self {
        Self(bytes_per_sec)
    }

    /// Throughput of moving `bytes` in `elapsed`; zero for an instant transfer.
    pub fn from_transfer(bytes: u64, elapsed: Duration) -> Self {
        let seconds = elapsed.as_secs_f64();
        if seconds > 0.0 {
            Self::from_bytes_per_sec((bytes as f64 / seconds) as u64)
        } else {
            Self::from_bytes_per_sec(0)
        }
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/s", ByteSize(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_transfer_divides_by_elapsed() {
        let throughput = Throughput::from_transfer(1 << 20, Duration::from_millis(500));
        assert_eq!(throughput, Throughput(2 << 20));
        assert_eq!(Throughput::from_transfer(1 << 20, Duration::ZERO), Throughput(0));
        assert!(throughput.to_string().ends_with("/s"));
    }
}
