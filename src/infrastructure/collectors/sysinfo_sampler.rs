use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sysinfo::{Disks, Networks, System};

use crate::domain::entities::sample::MetricSample;
use crate::domain::ports::sampler::{Sampler, SamplerError};

/// Returns `(numerator / denominator) * 100.0`, or `None` when `denominator` is zero.
#[allow(clippy::cast_precision_loss)]
fn percent_of(numerator: u64, denominator: u64) -> Option<f64> {
    (denominator > 0).then(|| (numerator as f64 / denominator as f64) * 100.0)
}

/// Reads host metrics with the `sysinfo` crate.
///
/// Each refreshable handle sits behind a `Mutex` since `Sampler` takes `&self`
/// but `sysinfo` refreshes need `&mut self`.
pub struct SysinfoSampler {
    sys: Mutex<System>,
    networks: Mutex<Networks>,
    disks: Mutex<Disks>,
    storage_mount: PathBuf,
}

impl SysinfoSampler {
    /// Sampler reporting storage usage for the filesystem mounted at `storage_mount`.
    #[must_use]
    pub fn new(storage_mount: impl Into<PathBuf>) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        Self {
            sys: Mutex::new(sys),
            networks: Mutex::new(Networks::new_with_refreshed_list()),
            disks: Mutex::new(Disks::new_with_refreshed_list()),
            storage_mount: storage_mount.into(),
        }
    }

    fn read_cpu_and_memory(&self) -> Result<(f64, f64), SamplerError> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|e| SamplerError::Unavailable(format!("system lock poisoned: {e}")))?;

        // CPU usage is a delta between two refreshes; blocks for the minimum interval.
        sys.refresh_cpu_usage();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let cpu = f64::from(sys.global_cpu_usage());
        let memory = percent_of(sys.used_memory(), sys.total_memory())
            .ok_or_else(|| SamplerError::Unsupported("total memory reported as zero".into()))?;
        Ok((cpu, memory))
    }

    fn read_network(&self) -> Result<(u64, u64), SamplerError> {
        let mut networks = self
            .networks
            .lock()
            .map_err(|e| SamplerError::Unavailable(format!("network lock poisoned: {e}")))?;
        networks.refresh();

        Ok(networks
            .list()
            .values()
            .fold((0u64, 0u64), |(sent, received), data| {
                (
                    sent.saturating_add(data.total_transmitted()),
                    received.saturating_add(data.total_received()),
                )
            }))
    }

    fn read_storage(&self) -> Result<f64, SamplerError> {
        let mut disks = self
            .disks
            .lock()
            .map_err(|e| SamplerError::Unavailable(format!("disk lock poisoned: {e}")))?;
        disks.refresh();
        storage_percent(
            disks
                .list()
                .iter()
                .map(|d| (d.mount_point(), d.total_space(), d.available_space())),
            &self.storage_mount,
        )
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Sampler for SysinfoSampler {
    fn sample(&self) -> Result<MetricSample, SamplerError> {
        let (cpu, memory) = self.read_cpu_and_memory()?;
        let (sent, received) = self.read_network()?;
        let storage = self.read_storage()?;

        Ok(MetricSample::new(
            chrono::Utc::now(),
            cpu,
            memory,
            sent,
            received,
            storage,
        ))
    }
}

/// Usage percentage of the disk mounted exactly at `mount`.
fn storage_percent<'a>(
    mut disks: impl Iterator<Item = (&'a Path, u64, u64)>,
    mount: &Path,
) -> Result<f64, SamplerError> {
    let (_, total, available) = disks
        .find(|(mount_point, _, _)| *mount_point == mount)
        .ok_or_else(|| {
            SamplerError::Unsupported(format!("no filesystem mounted at {}", mount.display()))
        })?;

    percent_of(total.saturating_sub(available), total)
        .map(|p| p.clamp(0.0, 100.0))
        .ok_or_else(|| {
            SamplerError::Unavailable(format!("{} reports zero capacity", mount.display()))
        })
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_zero_denominator() {
        assert!(percent_of(10, 0).is_none());
        assert_eq!(percent_of(25, 100), Some(25.0));
    }

    #[test]
    fn storage_percent_finds_exact_mount() {
        let disks = vec![
            (Path::new("/home"), 1_000, 900),
            (Path::new("/"), 1_000, 250),
        ];
        let pct = storage_percent(disks.into_iter(), Path::new("/")).expect("root disk");
        assert!((pct - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn storage_percent_missing_mount_is_unsupported() {
        let disks = vec![(Path::new("/home"), 1_000, 900)];
        let err = storage_percent(disks.into_iter(), Path::new("/")).expect_err("no root");
        assert!(matches!(err, SamplerError::Unsupported(_)));
    }

    #[test]
    fn storage_percent_zero_capacity_is_unavailable() {
        let disks = vec![(Path::new("/"), 0, 0)];
        let err = storage_percent(disks.into_iter(), Path::new("/")).expect_err("empty disk");
        assert!(matches!(err, SamplerError::Unavailable(_)));
    }

    #[test]
    fn sample_on_live_host_is_in_range_or_unsupported() {
        let sampler = SysinfoSampler::default();
        match sampler.sample() {
            Ok(sample) => {
                assert!((0.0..=100.0).contains(&sample.memory_percent()));
                assert!((0.0..=100.0).contains(&sample.storage_percent()));
                assert!(sample.cpu_percent() >= 0.0);
            }
            // Containers may lack a disk entry for "/"
            Err(e) => assert!(matches!(
                e,
                SamplerError::Unsupported(_) | SamplerError::Unavailable(_)
            )),
        }
    }
}
