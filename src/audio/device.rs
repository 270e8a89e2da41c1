//! Input device enumeration and selection
//!
//! "auto" selection scans the host's devices for a name containing
//! "USB" or "Microphone" (case-sensitive, last match wins) and falls
//! back to the system default input device. Explicit names resolve by
//! exact match first, then case-insensitive substring match.

use crate::error::AudioError;
use cpal::traits::{DeviceTrait, HostTrait};

/// Substrings that mark a device name as the preferred microphone
const PREFERRED_MARKERS: [&str; 2] = ["USB", "Microphone"];

/// Summary of one enumerated device, as reported by the host
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub input_channels: u16,
}

fn describe(device: &cpal::Device) -> DeviceInfo {
    let name = device.name().unwrap_or_else(|_| "unknown".to_string());
    let input_channels = device
        .supported_input_configs()
        .map(|configs| configs.map(|c| c.channels()).max().unwrap_or(0))
        .unwrap_or(0);
    DeviceInfo {
        name,
        input_channels,
    }
}

/// Enumerate every device the host exposes, with input channel counts
pub fn enumerate(host: &cpal::Host) -> Vec<DeviceInfo> {
    match host.devices() {
        Ok(devices) => devices.map(|d| describe(&d)).collect(),
        Err(e) => {
            tracing::warn!("Device enumeration failed: {}", e);
            Vec::new()
        }
    }
}

/// Pick the preferred input device from an enumerated list.
///
/// Only devices with at least one input channel are considered. Among
/// those, a name containing "USB" or "Microphone" wins; the scan
/// overwrites earlier matches, so the last one in enumeration order is
/// kept. `None` means no preference and the system default should be
/// used — a normal outcome, not an error.
pub fn pick_preferred(devices: &[DeviceInfo]) -> Option<usize> {
    let mut picked = None;
    for (index, info) in devices.iter().enumerate() {
        if info.input_channels == 0 {
            continue;
        }
        tracing::info!("Input device {}: {}", index, info.name);
        if PREFERRED_MARKERS
            .iter()
            .any(|marker| info.name.contains(marker))
        {
            picked = Some(index);
        }
    }
    if picked.is_none() {
        tracing::info!("No USB microphone found, using the default input device");
    }
    picked
}

/// Resolve a config device selector to a concrete cpal device
pub fn resolve(host: &cpal::Host, selector: &str) -> Result<cpal::Device, AudioError> {
    match selector {
        "auto" => {
            let mut devices: Vec<cpal::Device> = host
                .devices()
                .map_err(|e| AudioError::DeviceOpen(e.to_string()))?
                .collect();
            let infos: Vec<DeviceInfo> = devices.iter().map(describe).collect();
            match pick_preferred(&infos) {
                Some(index) => Ok(devices.swap_remove(index)),
                None => default_input(host),
            }
        }
        "default" => default_input(host),
        name => find_by_name(host, name),
    }
}

fn default_input(host: &cpal::Host) -> Result<cpal::Device, AudioError> {
    host.default_input_device()
        .ok_or_else(|| AudioError::DeviceNotFound("default".to_string()))
}

/// Find an input device by name: exact match first, then
/// case-insensitive substring match.
fn find_by_name(host: &cpal::Host, name: &str) -> Result<cpal::Device, AudioError> {
    let mut devices: Vec<cpal::Device> = host
        .input_devices()
        .map_err(|e| AudioError::DeviceOpen(e.to_string()))?
        .collect();

    let position = devices
        .iter()
        .position(|d| d.name().map(|n| n == name).unwrap_or(false))
        .or_else(|| {
            let search = name.to_lowercase();
            devices
                .iter()
                .position(|d| d.name().map(|n| n.to_lowercase().contains(&search)).unwrap_or(false))
        });

    match position {
        Some(index) => {
            let device = devices.swap_remove(index);
            tracing::debug!(
                "Resolved device '{}' to {}",
                name,
                device.name().unwrap_or_else(|_| "unknown".to_string())
            );
            Ok(device)
        }
        None => Err(AudioError::DeviceNotFound(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, input_channels: u16) -> DeviceInfo {
        DeviceInfo {
            name: name.to_string(),
            input_channels,
        }
    }

    #[test]
    fn test_prefers_usb_named_device() {
        let devices = [
            info("Built-in", 2),
            info("USB Mic", 1),
            info("Generic", 0),
        ];
        assert_eq!(pick_preferred(&devices), Some(1));
    }

    #[test]
    fn test_no_preferred_name_yields_none() {
        let devices = [info("Built-in", 2), info("Line In", 1)];
        assert_eq!(pick_preferred(&devices), None);
    }

    #[test]
    fn test_last_match_wins() {
        let devices = [
            info("USB Audio A", 1),
            info("Built-in Microphone", 2),
            info("Output Only", 0),
        ];
        assert_eq!(pick_preferred(&devices), Some(1));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let devices = [info("usb mic", 1), info("microphone array", 2)];
        assert_eq!(pick_preferred(&devices), None);
    }

    #[test]
    fn test_output_only_device_never_picked() {
        let devices = [info("USB Speakers", 0)];
        assert_eq!(pick_preferred(&devices), None);
    }

    #[test]
    fn test_empty_list_yields_none() {
        assert_eq!(pick_preferred(&[]), None);
    }
}
