use std::path::PathBuf;
use std::time::Duration;

/// Capacity of the filesystem holding a watched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskUsage {
    pub path: PathBuf,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl DiskUsage {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn used_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.used_bytes() as f64 / self.total_bytes as f64 * 100.0
    }

    pub fn free_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        100.0 - self.used_percent()
    }
}

/// Host-level readings shown on the System tab.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSnapshot {
    pub memory_total_bytes: u64,
    pub memory_available_bytes: u64,
    /// 1, 5 and 15 minute load averages.
    pub load_average: [f64; 3],
    pub uptime: Duration,
    pub cpu_count: usize,
    /// `None` when the provider could not stat the watched filesystem.
    pub disk: Option<DiskUsage>,
}

impl SystemSnapshot {
    pub fn memory_used_bytes(&self) -> u64 {
        self.memory_total_bytes
            .saturating_sub(self.memory_available_bytes)
    }

    /// Used memory as a percentage of total; `0.0` when the total is unknown.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn memory_used_percent(&self) -> f64 {
        if self.memory_total_bytes == 0 {
            return 0.0;
        }
        self.memory_used_bytes() as f64 / self.memory_total_bytes as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total: u64, available: u64) -> SystemSnapshot {
        SystemSnapshot {
            memory_total_bytes: total,
            memory_available_bytes: available,
            load_average: [0.0; 3],
            uptime: Duration::ZERO,
            cpu_count: 1,
            disk: None,
        }
    }

    #[test]
    fn used_percent() {
        let snap = snapshot(1_000, 250);
        assert_eq!(snap.memory_used_bytes(), 750);
        assert!((snap.memory_used_percent() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_total_is_zero_percent() {
        assert!(snapshot(0, 0).memory_used_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn available_above_total_saturates() {
        assert_eq!(snapshot(100, 400).memory_used_bytes(), 0);
    }

    #[test]
    fn disk_split_into_used_and_free() {
        let disk = DiskUsage {
            path: PathBuf::from("/"),
            total_bytes: 200,
            available_bytes: 50,
        };
        assert_eq!(disk.used_bytes(), 150);
        assert!((disk.used_percent() - 75.0).abs() < 1e-9);
        assert!((disk.free_percent() - 25.0).abs() < 1e-9);

        let empty = DiskUsage {
            total_bytes: 0,
            available_bytes: 0,
            ..disk
        };
        assert!(empty.used_percent().abs() < f64::EPSILON);
        assert!(empty.free_percent().abs() < f64::EPSILON);
    }
}
