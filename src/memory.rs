//! Process memory sampling and the teardown savings report.

use crate::{BenchError, Result};
use serde::Serialize;
use std::fmt;

const UNITS: [&str; 6] = ["b", "kb", "mb", "gb", "tb", "pb"];

/// Before/after memory samples taken around `tear_down`.
///
/// Lives outside the swept stores so a report can still be built after the
/// registry contents are gone.
#[derive(Debug, Default)]
pub(crate) struct MemoryMeter {
    before: Option<u64>,
    after: Option<u64>,
}

impl MemoryMeter {
    fn sample() -> Result<u64> {
        memory_stats::memory_stats()
            .map(|stats| stats.physical_mem as u64)
            .ok_or_else(|| BenchError::MemoryUnavailable.into())
    }

    pub(crate) fn measure_before_tear_down(&mut self) -> Result<u64> {
        let sample = Self::sample()?;
        self.before = Some(sample);
        Ok(sample)
    }

    pub(crate) fn measure_after_tear_down(&mut self) -> Result<u64> {
        let sample = Self::sample()?;
        self.after = Some(sample);
        Ok(sample)
    }

    /// Build the report. The after sample is taken on demand; the before
    /// sample must already exist.
    pub(crate) fn report(&mut self) -> Result<MemoryReport> {
        let before = self.before.ok_or(BenchError::MemoryNotMeasured)?;
        let after = match self.after {
            Some(after) => after,
            None => self.measure_after_tear_down()?,
        };
        Ok(MemoryReport { before, after })
    }
}

/// Process memory usage around teardown, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryReport {
    pub before: u64,
    pub after: u64,
}

impl MemoryReport {
    /// Bytes released by teardown. Negative when usage grew instead.
    pub fn reclaimed(&self) -> i64 {
        self.before as i64 - self.after as i64
    }
}

impl fmt::Display for MemoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Memory used before tear down: {}",
            format_bytes(self.before as i64)
        )?;
        writeln!(
            f,
            "Memory used after tear down: {}",
            format_bytes(self.after as i64)
        )?;
        write!(
            f,
            "Memory saved with tear down: {}",
            format_bytes(self.reclaimed())
        )
    }
}

/// Format a byte count with 1024-step units and two-decimal rounding.
/// Negative counts keep their sign.
pub fn format_bytes(size: i64) -> String {
    if size == 0 {
        return "0 b".to_string();
    }
    let mut scaled = size.unsigned_abs() as f64;
    let mut exponent = 0;
    while scaled >= 1024.0 && exponent < UNITS.len() - 1 {
        scaled /= 1024.0;
        exponent += 1;
    }
    let rounded = (scaled * 100.0).round() / 100.0;
    let sign = if size < 0 { "-" } else { "" };
    format!("{sign}{rounded} {}", UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit_step() {
        assert_eq!(format_bytes(0), "0 b");
        assert_eq!(format_bytes(512), "512 b");
        assert_eq!(format_bytes(1024), "1 kb");
        assert_eq!(format_bytes(1024 * 1024), "1 mb");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1 gb");
        assert_eq!(format_bytes(1024_i64.pow(4)), "1 tb");
        assert_eq!(format_bytes(1024_i64.pow(5)), "1 pb");
    }

    #[test]
    fn rounds_to_two_decimals_and_drops_trailing_zeros() {
        assert_eq!(format_bytes(1536), "1.5 kb");
        assert_eq!(format_bytes(1332), "1.3 kb");
        assert_eq!(format_bytes(1290), "1.26 kb");
    }

    #[test]
    fn negative_sizes_keep_the_sign() {
        assert_eq!(format_bytes(-1536), "-1.5 kb");
        assert_eq!(format_bytes(-1), "-1 b");
    }

    #[test]
    fn report_requires_the_before_sample() {
        let mut meter = MemoryMeter::default();
        assert!(meter.report().is_err());
    }

    #[test]
    fn report_takes_the_after_sample_on_demand() {
        let mut meter = MemoryMeter::default();
        meter.measure_before_tear_down().unwrap();

        let report = meter.report().unwrap();
        assert!(report.before > 0);
        assert!(report.after > 0);
    }

    #[test]
    fn reclaimed_goes_negative_when_usage_grew() {
        let report = MemoryReport {
            before: 1024,
            after: 4096,
        };
        assert_eq!(report.reclaimed(), -3072);
        assert!(report.to_string().contains("-3 kb"));
    }
}
