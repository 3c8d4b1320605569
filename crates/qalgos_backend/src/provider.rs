//! Remote device discovery
//!
//! A [`BackendProvider`] lists the processors reachable through some
//! account and connects to one of them. Cloud clients implement this trait
//! outside the workspace; selection only depends on the trait.

use crate::execution::Backend;
use qalgos_core::QalgosResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status of a remote device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    /// Accepting jobs
    Online,
    /// Not accepting jobs
    Offline,
    /// Down for maintenance
    Maintenance,
    /// Provider-specific status message
    Other(String),
}

impl DeviceStatus {
    /// Map a provider status message ("active" means online)
    pub fn from_status_msg(msg: &str) -> Self {
        match msg.trim().to_lowercase().as_str() {
            "active" | "online" => DeviceStatus::Online,
            "offline" => DeviceStatus::Offline,
            "maintenance" => DeviceStatus::Maintenance,
            _ => DeviceStatus::Other(msg.to_string()),
        }
    }

    /// Check if the device accepts jobs
    pub fn is_online(&self) -> bool {
        matches!(self, DeviceStatus::Online)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceStatus::Online => write!(f, "Online"),
            DeviceStatus::Offline => write!(f, "Offline"),
            DeviceStatus::Maintenance => write!(f, "Maintenance"),
            DeviceStatus::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Remote device as reported by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Device name
    pub name: String,

    /// Number of qubits
    #[serde(alias = "n_qubits")]
    pub num_qubits: usize,

    /// Whether the device is a remote simulator
    #[serde(default)]
    pub simulator: bool,

    /// Operational status
    pub status: DeviceStatus,

    /// Jobs waiting in the device queue
    #[serde(default)]
    pub pending_jobs: u64,
}

impl DeviceDescriptor {
    /// Create an online hardware device descriptor
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            simulator: false,
            status: DeviceStatus::Online,
            pending_jobs: 0,
        }
    }

    /// Set status
    pub fn with_status(mut self, status: DeviceStatus) -> Self {
        self.status = status;
        self
    }

    /// Set queue length
    pub fn with_pending_jobs(mut self, pending_jobs: u64) -> Self {
        self.pending_jobs = pending_jobs;
        self
    }
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} qubits, {} pending)",
            self.name, self.status, self.num_qubits, self.pending_jobs
        )
    }
}

/// Discovery and connection to remote devices
pub trait BackendProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// List devices visible to this account
    fn list_devices(&self) -> QalgosResult<Vec<DeviceDescriptor>>;

    /// Open an execution handle to `device`
    fn connect(&self, device: &DeviceDescriptor) -> QalgosResult<Box<dyn Backend>>;

    /// Online, non-simulator device with the shortest queue
    fn least_busy(&self) -> QalgosResult<Option<DeviceDescriptor>> {
        Ok(least_busy(&self.list_devices()?).cloned())
    }
}

/// Online, non-simulator device with the fewest pending jobs
/// (ties go to the earlier listing)
pub fn least_busy(devices: &[DeviceDescriptor]) -> Option<&DeviceDescriptor> {
    devices
        .iter()
        .filter(|d| d.status.is_online() && !d.simulator)
        .min_by_key(|d| d.pending_jobs)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_msg() {
        assert_eq!(DeviceStatus::from_status_msg("active"), DeviceStatus::Online);
        assert_eq!(DeviceStatus::from_status_msg("Maintenance"), DeviceStatus::Maintenance);
        assert_eq!(
            DeviceStatus::from_status_msg("calibrating"),
            DeviceStatus::Other("calibrating".into())
        );
        assert!(!DeviceStatus::Offline.is_online());
    }

    #[test]
    fn test_least_busy_skips_offline_and_simulators() {
        let mut sim = DeviceDescriptor::new("remote_sim", 32);
        sim.simulator = true;
        let devices = vec![
            DeviceDescriptor::new("alpha", 27).with_pending_jobs(40),
            DeviceDescriptor::new("beta", 127)
                .with_pending_jobs(3)
                .with_status(DeviceStatus::Offline),
            DeviceDescriptor::new("gamma", 127).with_pending_jobs(12),
            sim,
        ];
        assert_eq!(least_busy(&devices).map(|d| d.name.as_str()), Some("gamma"));
    }

    #[test]
    fn test_least_busy_empty() {
        assert!(least_busy(&[]).is_none());
    }

    #[test]
    fn test_descriptor_deserialize_alias() {
        let json = r#"{"name":"dev","n_qubits":5,"status":"Online","pending_jobs":2}"#;
        let d: DeviceDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(d.num_qubits, 5);
        assert!(!d.simulator);
        assert_eq!(d.to_string(), "dev - Online (5 qubits, 2 pending)");
    }
}
