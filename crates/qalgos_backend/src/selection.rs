//! Backend selection with local simulator fallback
//!
//! Resolves a [`BackendChoice`] against an optional [`BackendProvider`].
//! Remote trouble never propagates: discovery errors, unknown devices,
//! offline devices and connection failures all yield the local simulator,
//! with the cause recorded in [`SelectedBackend::fallback_reason`].

use crate::config::ExecutionConfig;
use crate::execution::Backend;
use crate::provider::{least_busy, BackendProvider, DeviceDescriptor};
use crate::simulator::SimulatorBackend;
use qalgos_core::constants::simulator::DEFAULT_MAX_QUBITS;
use qalgos_core::{QalgosError, QalgosResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which execution target to use
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackendChoice {
    /// Local ideal simulator
    #[default]
    LocalSimulator,
    /// Remote device by name
    Device(String),
    /// Remote device by position in the provider's listing (0-based)
    Index(usize),
    /// Online hardware device with the shortest queue
    LeastBusy,
}

impl fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendChoice::LocalSimulator => write!(f, "local-simulator"),
            BackendChoice::Device(name) => write!(f, "device({})", name),
            BackendChoice::Index(i) => write!(f, "index({})", i),
            BackendChoice::LeastBusy => write!(f, "least-busy"),
        }
    }
}

/// Outcome of backend selection
pub struct SelectedBackend {
    /// Backend to execute on
    pub backend: Box<dyn Backend>,

    /// Remote device, when one was selected
    pub device: Option<DeviceDescriptor>,

    /// Why the local simulator was used instead of the requested target
    pub fallback_reason: Option<String>,
}

impl SelectedBackend {
    /// Check if selection fell back to the local simulator
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

impl fmt::Debug for SelectedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedBackend")
            .field("backend", &self.backend.name())
            .field("device", &self.device)
            .field("fallback_reason", &self.fallback_reason)
            .finish()
    }
}

/// Backend selector
pub struct BackendSelector {
    provider: Option<Box<dyn BackendProvider>>,
    max_qubits: usize,
    seed: Option<u64>,
}

impl Default for BackendSelector {
    fn default() -> Self {
        Self::local_only()
    }
}

impl BackendSelector {
    /// Selector with no remote provider; every choice resolves locally
    pub fn local_only() -> Self {
        Self {
            provider: None,
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }

    /// Selector backed by a remote provider
    pub fn with_provider(provider: Box<dyn BackendProvider>) -> Self {
        Self {
            provider: Some(provider),
            ..Self::local_only()
        }
    }

    /// Set local simulator capacity
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set local simulator seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Check if a remote provider is attached
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Local simulator configured for this selector
    pub fn local_simulator(&self) -> SimulatorBackend {
        SimulatorBackend::ideal(self.max_qubits).with_optional_seed(self.seed)
    }

    /// Resolve `choice` to a backend, falling back to the local simulator
    pub fn select_backend(&self, choice: &BackendChoice) -> SelectedBackend {
        self.select(choice, self.local_simulator())
    }

    /// Resolve `config.backend`; the local simulator takes the config's
    /// seed and capacity
    pub fn select_for(&self, config: &ExecutionConfig) -> SelectedBackend {
        let local = SimulatorBackend::ideal(config.max_qubits).with_optional_seed(config.seed);
        self.select(&config.backend, local)
    }

    fn select(&self, choice: &BackendChoice, local: SimulatorBackend) -> SelectedBackend {
        if *choice == BackendChoice::LocalSimulator {
            log::info!("Using local simulator");
            return Self::local(local, None);
        }

        match self.resolve_remote(choice) {
            Ok((device, backend)) => {
                log::info!("Selected device: {}", device);
                SelectedBackend {
                    backend,
                    device: Some(device),
                    fallback_reason: None,
                }
            }
            Err(e) => {
                log::warn!("{}; falling back to local simulator", e);
                Self::local(local, Some(e.to_string()))
            }
        }
    }

    fn local(simulator: SimulatorBackend, fallback_reason: Option<String>) -> SelectedBackend {
        SelectedBackend {
            backend: Box::new(simulator),
            device: None,
            fallback_reason,
        }
    }

    fn resolve_remote(
        &self,
        choice: &BackendChoice,
    ) -> QalgosResult<(DeviceDescriptor, Box<dyn Backend>)> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| QalgosError::BackendNotAvailable("no remote provider".into()))?;

        let devices = provider
            .list_devices()
            .map_err(|e| QalgosError::DiscoveryFailed(format!("{}: {}", provider.name(), e)))?;
        if devices.is_empty() {
            return Err(QalgosError::DiscoveryFailed(format!(
                "{}: no devices available",
                provider.name()
            )));
        }

        log::info!("Available devices from {}:", provider.name());
        for (i, device) in devices.iter().enumerate() {
            log::info!("  {}. {}", i, device);
        }

        let device = match choice {
            BackendChoice::Device(name) => devices
                .iter()
                .find(|d| &d.name == name)
                .ok_or_else(|| QalgosError::BackendNotAvailable(format!("unknown device '{}'", name)))?,
            BackendChoice::Index(i) => devices.get(*i).ok_or_else(|| {
                QalgosError::BackendNotAvailable(format!(
                    "device index {} out of range (0..{})",
                    i,
                    devices.len()
                ))
            })?,
            BackendChoice::LeastBusy => least_busy(&devices).ok_or_else(|| {
                QalgosError::BackendNotAvailable("no online hardware device".into())
            })?,
            BackendChoice::LocalSimulator => {
                return Err(QalgosError::BackendNotAvailable(
                    "local simulator is not a remote device".into(),
                ))
            }
        };

        if !device.status.is_online() {
            return Err(QalgosError::BackendNotAvailable(format!(
                "device '{}' is {}",
                device.name, device.status
            )));
        }

        let backend = provider.connect(device)?;
        Ok((device.clone(), backend))
    }
}

impl fmt::Debug for BackendSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSelector")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("max_qubits", &self.max_qubits)
            .field("seed", &self.seed)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
