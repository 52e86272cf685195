use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;

use super::MetricsProvider;
use crate::error::ProviderError;
use crate::model::{Connection, DiskUsage, Protocol, Sample, SystemSnapshot, TcpState};

const BYTES_PER_MEGABIT: f64 = 1024.0 * 1024.0 / 8.0;

/// Traffic profile of one synthetic interface, in Mbps.
#[derive(Debug, Clone, Copy)]
struct Profile {
    name: &'static str,
    download_mbps: f64,
    upload_mbps: f64,
    phase: f64,
}

const PROFILES: [Profile; 4] = [
    Profile {
        name: "eth0",
        download_mbps: 100.0,
        upload_mbps: 40.0,
        phase: 0.0,
    },
    Profile {
        name: "wlan0",
        download_mbps: 8.0,
        upload_mbps: 3.0,
        phase: 1.3,
    },
    Profile {
        name: "lo",
        download_mbps: 2.0,
        upload_mbps: 2.0,
        phase: 2.1,
    },
    Profile {
        name: "docker0",
        download_mbps: 4.0,
        upload_mbps: 1.5,
        phase: 3.7,
    },
];

/// Deterministic synthetic traffic for demos and screenshots.
///
/// Each fetch advances a per-entity step counter and evaluates a pair of
/// sine waves around the profile's base rates, so the same call sequence
/// always yields the same samples.
#[derive(Debug)]
pub struct SimulatedProvider {
    steps: DashMap<String, u64>,
    disk_path: PathBuf,
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self {
            steps: DashMap::new(),
            disk_path: PathBuf::from("/"),
        }
    }
}

impl SimulatedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label the synthetic filesystem with `path`.
    pub fn with_disk_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.disk_path = path.into();
        self
    }

    fn next_step(&self, entity: &str) -> u64 {
        let mut step = self.steps.entry(entity.to_owned()).or_insert(0);
        let current = *step;
        *step += 1;
        current
    }
}

/// Rates in bytes/sec for `profile` at `step`.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn rates_at(profile: &Profile, step: u64) -> (f64, f64) {
    let t = step as f64;
    // Slow swell plus a faster wobble standing in for jitter.
    let swell = 0.3 + 0.4 * (t / 20.0 + profile.phase).sin();
    let wobble = 0.5 + 0.5 * (t * 0.73 + profile.phase * 2.0).sin();
    let download = profile.download_mbps * (0.5 + wobble) * (0.7 + swell * 0.6);
    let upload = profile.upload_mbps * (0.5 + wobble) * (0.8 + swell * 0.4);
    (download * BYTES_PER_MEGABIT, upload * BYTES_PER_MEGABIT)
}

impl MetricsProvider for SimulatedProvider {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn discover(&self) -> Result<Vec<String>, ProviderError> {
        Ok(PROFILES.iter().map(|p| p.name.to_owned()).collect())
    }

    fn fetch(&self, entity: &str) -> Result<Sample, ProviderError> {
        let profile = PROFILES
            .iter()
            .find(|p| p.name == entity)
            .ok_or_else(|| ProviderError::unavailable(format!("simulated interface {entity}")))?;
        let (download, upload) = rates_at(profile, self.next_step(entity));
        Ok(Sample::new(download, upload, Utc::now()))
    }

    fn connections(&self) -> Result<Vec<Connection>, ProviderError> {
        use Protocol::Tcp;
        Ok(vec![
            Connection::new(Tcp, "127.0.0.1:8080", "127.0.0.1:54321", TcpState::Established),
            Connection::new(Tcp, "0.0.0.0:22", "*:*", TcpState::Listen),
            Connection::new(Tcp, "192.168.1.100:443", "8.8.8.8:53", TcpState::Established),
            Connection::new(Tcp, "0.0.0.0:80", "*:*", TcpState::Listen),
            Connection::new(
                Tcp,
                "192.168.1.100:12345",
                "140.82.112.3:443",
                TcpState::Established,
            ),
            Connection::new(Tcp, "127.0.0.1:5432", "127.0.0.1:54890", TcpState::Established),
            Connection::new(Tcp, "0.0.0.0:3000", "*:*", TcpState::Listen),
            Connection::new(
                Tcp,
                "192.168.1.100:56789",
                "151.101.1.140:443",
                TcpState::TimeWait,
            ),
        ])
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    fn system(&self) -> Result<SystemSnapshot, ProviderError> {
        let step = self.next_step("__system");
        let t = step as f64;
        let total: u64 = 16 * 1024 * 1024 * 1024;
        let used_fraction = 0.55 + 0.3 * (t / 30.0).sin().abs();
        let available = (total as f64 * (1.0 - used_fraction)) as u64;
        let load = 1.0 + (t / 15.0).sin().abs() * 2.5;
        Ok(SystemSnapshot {
            memory_total_bytes: total,
            memory_available_bytes: available,
            load_average: [load, load * 0.8, load * 0.6],
            uptime: Duration::from_secs(86_400 + step / 2),
            cpu_count: 8,
            disk: self.disk().ok(),
        })
    }

    /// A 512 GiB volume slowly filling through all three health bands.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    fn disk(&self) -> Result<DiskUsage, ProviderError> {
        let t = self.next_step("__disk") as f64;
        let total: u64 = 512 * 1024 * 1024 * 1024;
        let used_fraction = 0.6 + 0.35 * (t / 45.0).sin().abs();
        Ok(DiskUsage {
            path: self.disk_path.clone(),
            total_bytes: total,
            available_bytes: (total as f64 * (1.0 - used_fraction)) as u64,
        })
    }
}
