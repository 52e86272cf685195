//! Linux `/proc` reader.
//!
//! Parsing is split from IO so the text formats can be tested directly; the
//! provider itself only adds file access, the previous-reading cache used
//! for rate deltas, and error mapping. Filesystem capacity is not in procfs
//! and comes from `sysinfo` instead.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use dashmap::DashMap;
use sysinfo::Disks;
use tracing::debug;

use super::MetricsProvider;
use crate::error::ProviderError;
use crate::model::{Connection, DiskUsage, Protocol, Sample, SystemSnapshot, TcpState};

/// Byte counters of one interface from `/proc/net/dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InterfaceCounters {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// A mounted filesystem as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mount {
    pub point: PathBuf,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

#[derive(Debug, Clone, Copy)]
struct Reading {
    rx_bytes: u64,
    tx_bytes: u64,
    at: Instant,
}

/// Reads interface counters, sockets and host stats from procfs.
///
/// Rates are counter deltas between two fetches of the same interface, so
/// the first fetch per interface only records a baseline and reports
/// `Unavailable`.
#[derive(Debug)]
pub struct ProcfsProvider {
    root: PathBuf,
    previous: DashMap<String, Reading>,
    disk_path: PathBuf,
}

impl Default for ProcfsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcfsProvider {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Read from a different procfs mount (or a fixture directory).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            previous: DashMap::new(),
            disk_path: PathBuf::from("/"),
        }
    }

    /// Report the filesystem holding `path` instead of `/`.
    pub fn with_disk_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.disk_path = path.into();
        self
    }

    fn read(&self, relative: &str) -> Result<(PathBuf, String), ProviderError> {
        let path = self.root.join(relative);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok((path, text)),
            Err(source) => Err(ProviderError::Io { path, source }),
        }
    }

    fn interface_counters(&self) -> Result<Vec<InterfaceCounters>, ProviderError> {
        let (path, text) = self.read("net/dev")?;
        parse_net_dev(&text).map_err(|reason| ProviderError::Parse { path, reason })
    }

    /// Store `counters` as the new baseline and return bytes/sec since the
    /// previous one. Counters that went backwards (wrap, interface reset)
    /// count as zero traffic.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn rates_since_previous(&self, counters: &InterfaceCounters, now: Instant) -> Option<(f64, f64)> {
        let reading = Reading {
            rx_bytes: counters.rx_bytes,
            tx_bytes: counters.tx_bytes,
            at: now,
        };
        let previous = self.previous.insert(counters.name.clone(), reading)?;
        let elapsed = now.checked_duration_since(previous.at)?.as_secs_f64();
        if elapsed <= 0.0 {
            return None;
        }
        let rx = counters.rx_bytes.saturating_sub(previous.rx_bytes) as f64 / elapsed;
        let tx = counters.tx_bytes.saturating_sub(previous.tx_bytes) as f64 / elapsed;
        Some((rx, tx))
    }

    fn sockets(&self, relative: &str, protocol: Protocol) -> Result<Vec<Connection>, ProviderError> {
        let (path, text) = self.read(relative)?;
        parse_net_tcp(&text, protocol).map_err(|reason| ProviderError::Parse { path, reason })
    }
}

impl MetricsProvider for ProcfsProvider {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn discover(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self
            .interface_counters()?
            .into_iter()
            .map(|counters| counters.name)
            .collect())
    }

    fn fetch(&self, entity: &str) -> Result<Sample, ProviderError> {
        let counters = self
            .interface_counters()?
            .into_iter()
            .find(|counters| counters.name == entity)
            .ok_or_else(|| ProviderError::unavailable(format!("interface {entity}")))?;
        let (download, upload) = self
            .rates_since_previous(&counters, Instant::now())
            .ok_or_else(|| ProviderError::unavailable(format!("rate baseline for {entity}")))?;
        Ok(Sample::new(download, upload, Utc::now()))
    }

    fn connections(&self) -> Result<Vec<Connection>, ProviderError> {
        let mut connections = self.sockets("net/tcp", Protocol::Tcp)?;
        // IPv6 may be disabled; the IPv4 table alone is still a result.
        match self.sockets("net/tcp6", Protocol::Tcp6) {
            Ok(v6) => connections.extend(v6),
            Err(ProviderError::Io { .. }) => {}
            Err(err) => return Err(err),
        }
        Ok(connections)
    }

    fn system(&self) -> Result<SystemSnapshot, ProviderError> {
        let (path, meminfo) = self.read("meminfo")?;
        let (memory_total_bytes, memory_available_bytes) =
            parse_meminfo(&meminfo).map_err(|reason| ProviderError::Parse { path, reason })?;

        let (path, loadavg) = self.read("loadavg")?;
        let load_average =
            parse_loadavg(&loadavg).map_err(|reason| ProviderError::Parse { path, reason })?;

        let (path, uptime) = self.read("uptime")?;
        let uptime = parse_uptime(&uptime).map_err(|reason| ProviderError::Parse { path, reason })?;

        let (_, stat) = self.read("stat")?;

        let disk = self
            .disk()
            .inspect_err(|err| debug!(error = %err, "disk usage not available"))
            .ok();

        Ok(SystemSnapshot {
            memory_total_bytes,
            memory_available_bytes,
            load_average,
            uptime,
            cpu_count: count_cpus(&stat),
            disk,
        })
    }

    fn disk(&self) -> Result<DiskUsage, ProviderError> {
        let disks = Disks::new_with_refreshed_list();
        let mounts: Vec<Mount> = disks
            .list()
            .iter()
            .map(|disk| Mount {
                point: disk.mount_point().to_path_buf(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect();
        usage_for_path(&mounts, &self.disk_path).ok_or_else(|| {
            ProviderError::unavailable(format!("filesystem for {}", self.disk_path.display()))
        })
    }
}

/// Usage of the innermost mount containing `path`, the way `df PATH` picks
/// it. Mounts reporting zero capacity (pseudo filesystems) never match.
pub(crate) fn usage_for_path(mounts: &[Mount], path: &Path) -> Option<DiskUsage> {
    mounts
        .iter()
        .filter(|mount| mount.total_bytes > 0 && path.starts_with(&mount.point))
        .max_by_key(|mount| mount.point.components().count())
        .map(|mount| DiskUsage {
            path: path.to_path_buf(),
            total_bytes: mount.total_bytes,
            available_bytes: mount.available_bytes.min(mount.total_bytes),
        })
}

// ── Parsers ─────────────────────────────────────────────────────────

/// Parse `/proc/net/dev`. The first two lines are headers; each following
/// line is `name:` followed by eight receive counters then eight transmit
/// counters, bytes first in each group.
pub(crate) fn parse_net_dev(text: &str) -> Result<Vec<InterfaceCounters>, String> {
    let mut interfaces = Vec::new();
    for (number, line) in text.lines().enumerate().skip(2) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Large counters can run into the colon ("eth0:123456"), so split on
        // it rather than on whitespace.
        let Some((name, rest)) = line.split_once(':') else {
            return Err(format!("line {}: missing ':' after interface name", number + 1));
        };
        let fields: Vec<u64> = rest
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|e| format!("line {}: {e}", number + 1))?;
        let [rx_bytes, _, _, _, _, _, _, _, tx_bytes, _, ..] = fields[..] else {
            return Err(format!(
                "line {}: expected at least 10 counters, found {}",
                number + 1,
                fields.len()
            ));
        };
        interfaces.push(InterfaceCounters {
            name: name.trim().to_owned(),
            rx_bytes,
            tx_bytes,
        });
    }
    Ok(interfaces)
}

/// Parse `/proc/net/tcp` or `/proc/net/tcp6`.
pub(crate) fn parse_net_tcp(text: &str, protocol: Protocol) -> Result<Vec<Connection>, String> {
    let mut connections = Vec::new();
    for (number, line) in text.lines().enumerate().skip(1) {
        let mut fields = line.split_whitespace();
        // fields: sl local_address rem_address st ...
        let (Some(_), Some(local), Some(remote), Some(state)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let local = decode_socket(local).map_err(|e| format!("line {}: {e}", number + 1))?;
        let remote = decode_socket(remote).map_err(|e| format!("line {}: {e}", number + 1))?;
        let state = u8::from_str_radix(state, 16)
            .map_err(|e| format!("line {}: bad state {state:?}: {e}", number + 1))?;

        connections.push(Connection::new(
            protocol,
            local.to_string(),
            display_remote(remote),
            TcpState::from_kernel_code(state),
        ));
    }
    Ok(connections)
}

/// An unconnected peer shows as `*:*`, like netstat.
fn display_remote(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() && addr.port() == 0 {
        "*:*".to_owned()
    } else {
        addr.to_string()
    }
}

/// Decode `ADDR:PORT` where `ADDR` is the kernel's hex dump of the address
/// as 32-bit words in host byte order and `PORT` is big-endian hex.
fn decode_socket(field: &str) -> Result<SocketAddr, String> {
    let (addr, port) = field
        .split_once(':')
        .ok_or_else(|| format!("bad socket {field:?}"))?;
    let port = u16::from_str_radix(port, 16).map_err(|e| format!("bad port {port:?}: {e}"))?;

    let mut bytes = Vec::with_capacity(16);
    for chunk in addr.as_bytes().chunks(8) {
        let word = std::str::from_utf8(chunk).map_err(|e| e.to_string())?;
        let word = u32::from_str_radix(word, 16).map_err(|e| format!("bad address {addr:?}: {e}"))?;
        bytes.extend_from_slice(&word.to_ne_bytes());
    }

    match bytes.len() {
        4 => {
            let octets: [u8; 4] = bytes.try_into().map_err(|_| "bad IPv4 length".to_owned())?;
            Ok(SocketAddr::from((Ipv4Addr::from(octets), port)))
        }
        16 => {
            let octets: [u8; 16] = bytes.try_into().map_err(|_| "bad IPv6 length".to_owned())?;
            Ok(SocketAddr::from((Ipv6Addr::from(octets), port)))
        }
        n => Err(format!("address {addr:?} decodes to {n} bytes")),
    }
}

/// `(MemTotal, MemAvailable)` in bytes. Falls back to `MemFree` on kernels
/// without `MemAvailable`.
pub(crate) fn parse_meminfo(text: &str) -> Result<(u64, u64), String> {
    let mut total = None;
    let mut available = None;
    let mut free = None;
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let slot = match key.trim() {
            "MemTotal" => &mut total,
            "MemAvailable" => &mut available,
            "MemFree" => &mut free,
            _ => continue,
        };
        let kib: u64 = value
            .split_whitespace()
            .next()
            .ok_or_else(|| format!("{key}: missing value"))?
            .parse()
            .map_err(|e| format!("{key}: {e}"))?;
        *slot = Some(kib.saturating_mul(1024));
    }
    let total = total.ok_or("MemTotal missing")?;
    let available = available.or(free).ok_or("MemAvailable and MemFree missing")?;
    Ok((total, available))
}

pub(crate) fn parse_loadavg(text: &str) -> Result<[f64; 3], String> {
    let mut fields = text.split_whitespace().map(str::parse::<f64>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(one)), Some(Ok(five)), Some(Ok(fifteen))) => Ok([one, five, fifteen]),
        _ => Err(format!("expected three load averages in {text:?}")),
    }
}

pub(crate) fn parse_uptime(text: &str) -> Result<Duration, String> {
    let secs: f64 = text
        .split_whitespace()
        .next()
        .ok_or("empty uptime")?
        .parse()
        .map_err(|e| format!("uptime: {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("uptime: {e}"))
}

/// Count `cpuN` lines in `/proc/stat` (the aggregate `cpu` line excluded).
pub(crate) fn count_cpus(text: &str) -> usize {
    text.lines()
        .filter(|line| {
            line.strip_prefix("cpu")
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        })
        .count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo:  123456     100    0    0    0     0          0         0   123456     100    0    0    0     0       0          0
  eth0:98765432   65000    0    0    0     0          0         0 12345678   43000    0    0    0     0       0          0
";

    #[test]
    fn parses_net_dev() {
        let counters = parse_net_dev(NET_DEV).unwrap();
        assert_eq!(counters.len(), 2);
        assert_eq!(
            counters[1],
            InterfaceCounters {
                name: "eth0".into(),
                rx_bytes: 98_765_432,
                tx_bytes: 12_345_678,
            }
        );
    }

    #[test]
    fn short_net_dev_line_is_an_error() {
        let text = "h1\nh2\n  eth0: 1 2 3\n";
        assert!(parse_net_dev(text).unwrap_err().contains("at least 10"));
    }

    #[test]
    fn parses_ipv4_sockets() {
        let text = "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000:0016 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 1234 1
   1: 0100007F:1F90 0100007F:D431 01 00000000:00000000 00:00000000 00000000  1000        0 5678 1
";
        let connections = parse_net_tcp(text, Protocol::Tcp).unwrap();
        assert_eq!(
            connections,
            vec![
                Connection::new(Protocol::Tcp, "0.0.0.0:22", "*:*", TcpState::Listen),
                Connection::new(
                    Protocol::Tcp,
                    "127.0.0.1:8080",
                    "127.0.0.1:54321",
                    TcpState::Established
                ),
            ]
        );
    }

    #[test]
    fn parses_ipv6_loopback() {
        let text = "\
  sl  local_address                         remote_address                        st
   0: 00000000000000000000000001000000:0277 00000000000000000000000000000000:0000 0A
";
        let connections = parse_net_tcp(text, Protocol::Tcp6).unwrap();
        assert_eq!(connections[0].local, "[::1]:631");
        assert_eq!(connections[0].remote, "*:*");
        assert_eq!(connections[0].protocol, Protocol::Tcp6);
    }

    #[test]
    fn parses_meminfo_and_friends() {
        let meminfo = "MemTotal:       16000 kB\nMemFree:         1000 kB\nMemAvailable:    4000 kB\n";
        assert_eq!(parse_meminfo(meminfo).unwrap(), (16_000 * 1024, 4_000 * 1024));

        let old_kernel = "MemTotal: 100 kB\nMemFree: 40 kB\n";
        assert_eq!(parse_meminfo(old_kernel).unwrap(), (100 * 1024, 40 * 1024));

        assert_eq!(parse_loadavg("0.52 0.58 0.59 1/1234 5678\n").unwrap(), [0.52, 0.58, 0.59]);
        assert!(parse_loadavg("0.52").is_err());

        assert_eq!(parse_uptime("12345.50 54321.00\n").unwrap(), Duration::from_millis(12_345_500));

        let stat = "cpu  1 2 3\ncpu0 1 2 3\ncpu1 1 2 3\nintr 5\n";
        assert_eq!(count_cpus(stat), 2);
    }

    #[test]
    fn rates_need_a_baseline() {
        let provider = ProcfsProvider::with_root("/nonexistent");
        let t0 = Instant::now();
        let mut counters = InterfaceCounters {
            name: "eth0".into(),
            rx_bytes: 1_000,
            tx_bytes: 500,
        };
        assert_eq!(provider.rates_since_previous(&counters, t0), None);

        counters.rx_bytes = 3_000;
        counters.tx_bytes = 1_500;
        let (rx, tx) = provider
            .rates_since_previous(&counters, t0 + Duration::from_secs(2))
            .unwrap();
        assert!((rx - 1_000.0).abs() < 1e-9);
        assert!((tx - 500.0).abs() < 1e-9);

        // Counter reset reads as idle, not negative.
        counters.rx_bytes = 10;
        let (rx, _) = provider
            .rates_since_previous(&counters, t0 + Duration::from_secs(3))
            .unwrap();
        assert!(rx.abs() < f64::EPSILON);
    }

    #[test]
    fn reads_fixture_tree() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("net")).unwrap();
        std::fs::write(dir.path().join("net/dev"), NET_DEV).unwrap();
        std::fs::write(dir.path().join("meminfo"), "MemTotal: 2048 kB\nMemAvailable: 512 kB\n").unwrap();
        std::fs::write(dir.path().join("loadavg"), "1.00 0.50 0.25 1/100 42\n").unwrap();
        std::fs::write(dir.path().join("uptime"), "3600.00 100.00\n").unwrap();
        std::fs::write(dir.path().join("stat"), "cpu 1\ncpu0 1\n").unwrap();
        std::fs::write(
            dir.path().join("net/tcp"),
            "header\n   0: 00000000:0016 00000000:0000 0A\n",
        )
        .unwrap();

        let provider = ProcfsProvider::with_root(dir.path());
        assert_eq!(provider.discover().unwrap(), vec!["lo", "eth0"]);
        assert!(provider.fetch("eth0").unwrap_err().is_unavailable());
        assert!(provider.fetch("ghost").unwrap_err().is_unavailable());

        // tcp6 is missing; the IPv4 table still comes back.
        assert_eq!(provider.connections().unwrap().len(), 1);

        let system = provider.system().unwrap();
        assert_eq!(system.memory_total_bytes, 2048 * 1024);
        assert_eq!(system.cpu_count, 1);
        assert_eq!(system.uptime, Duration::from_secs(3600));
    }

    fn mount(point: &str, total_bytes: u64, available_bytes: u64) -> Mount {
        Mount {
            point: PathBuf::from(point),
            total_bytes,
            available_bytes,
        }
    }

    #[test]
    fn disk_usage_comes_from_the_innermost_mount() {
        let mounts = [
            mount("/", 1_000, 400),
            mount("/home", 5_000, 1_000),
            mount("/home/shared", 0, 0),
            mount("/homework", 9_000, 9_000),
        ];

        let home = usage_for_path(&mounts, Path::new("/home/user/data")).unwrap();
        assert_eq!(home.path, PathBuf::from("/home/user/data"));
        assert_eq!((home.total_bytes, home.used_bytes()), (5_000, 4_000));

        // Zero-capacity mounts are skipped in favour of their parent.
        let shared = usage_for_path(&mounts, Path::new("/home/shared")).unwrap();
        assert_eq!(shared.total_bytes, 5_000);

        let root = usage_for_path(&mounts, Path::new("/var/log")).unwrap();
        assert_eq!(root.used_bytes(), 600);

        assert_eq!(usage_for_path(&mounts[1..2], Path::new("/etc")), None);
    }

    #[test]
    fn available_above_capacity_is_clamped() {
        let usage = usage_for_path(&[mount("/", 100, 250)], Path::new("/")).unwrap();
        assert_eq!(usage.available_bytes, 100);
        assert!(usage.used_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn missing_files_are_io_errors() {
        let provider = ProcfsProvider::with_root("/nonexistent/procfs");
        assert!(matches!(provider.discover(), Err(ProviderError::Io { .. })));
    }
}
