//! System metrics collection and display.

use std::time::Instant;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Resource usage of the dashboard process for display in the info panel.
#[derive(Debug, Clone)]
pub struct SystemMetrics {
    /// CPU usage percentage (0.0 to 100.0).
    pub cpu_percent: f32,
    /// Current process RAM usage in bytes.
    pub ram_bytes: u64,
    /// Total system RAM in bytes.
    pub total_ram_bytes: u64,
    /// Last time CPU was updated for proper refresh timing
    pub last_cpu_update: Option<Instant>,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self {
            cpu_percent: 0.0,
            ram_bytes: 0,
            total_ram_bytes: {
                let mut sys = System::new();
                sys.refresh_memory();
                sys.total_memory()
            },
            last_cpu_update: None,
        }
    }
}

impl SystemMetrics {
    /// Update metrics from system information.
    ///
    /// The dashboard spawns no subprocesses, so only this process is
    /// refreshed. CPU readings respect the minimum refresh interval from the
    /// sysinfo documentation; in between, the previous reading is kept.
    pub fn update(sysinfo: &mut System, previous_metrics: Option<&SystemMetrics>) -> Self {
        let now = Instant::now();
        let current_pid = Pid::from(std::process::id() as usize);

        let should_update_cpu = match previous_metrics.and_then(|m| m.last_cpu_update) {
            Some(last_update) => {
                now.duration_since(last_update) >= sysinfo::MINIMUM_CPU_UPDATE_INTERVAL
            }
            None => true,
        };

        let last_cpu_update = if should_update_cpu {
            sysinfo.refresh_cpu_usage(); // Essential for CPU usage calculation
            sysinfo.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[current_pid]),
                true,
                ProcessRefreshKind::nothing().with_cpu().with_memory(),
            );
            Some(now)
        } else {
            // Memory is cheap to refresh every tick
            sysinfo.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[current_pid]),
                true,
                ProcessRefreshKind::nothing().with_memory(),
            );
            previous_metrics.and_then(|m| m.last_cpu_update)
        };

        let mut cpu_percent = previous_metrics.map(|m| m.cpu_percent).unwrap_or(0.0);
        let mut ram_bytes = 0;
        if let Some(process) = sysinfo.process(current_pid) {
            if should_update_cpu {
                cpu_percent = process.cpu_usage();
            }
            ram_bytes = process.memory();
        }

        Self {
            cpu_percent,
            ram_bytes,
            total_ram_bytes: sysinfo.total_memory(),
            last_cpu_update,
        }
    }

    /// Get RAM usage as a ratio (0.0 to 1.0).
    pub fn ram_ratio(&self) -> f64 {
        if self.total_ram_bytes == 0 {
            0.0
        } else {
            (self.ram_bytes as f64) / (self.total_ram_bytes as f64)
        }
    }

    /// Format RAM usage as human-readable string.
    pub fn format_ram(&self) -> String {
        let mb = self.ram_bytes as f64 / (1024.0 * 1024.0);
        if mb >= 1024.0 {
            format!("{:.1} GB", mb / 1024.0)
        } else {
            format!("{:.1} MB", mb)
        }
    }

    /// Get CPU display color based on usage.
    pub fn cpu_color(&self) -> ratatui::prelude::Color {
        use ratatui::prelude::Color;
        if self.cpu_percent >= 80.0 {
            Color::Red
        } else if self.cpu_percent >= 60.0 {
            Color::Yellow
        } else {
            Color::Green
        }
    }

    /// Get RAM display color based on usage.
    pub fn ram_color(&self) -> ratatui::prelude::Color {
        use ratatui::prelude::Color;
        let ratio = self.ram_ratio();
        if ratio >= 0.8 {
            Color::Red
        } else if ratio >= 0.6 {
            Color::Yellow
        } else {
            Color::Green
        }
    }
}
