#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct StageStats {
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub stage_time: Duration,
    pub elapsed_time: Duration,
}

/// Logs process memory and timing after each pipeline stage.
#[cfg(feature = "cli")]
pub struct StageMonitor {
    system: System,
    pid: Option<Pid>,
    start_time: Instant,
    last_mark: Instant,
    peak_memory_mb: u64,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = if enabled {
            System::new_with_specifics(RefreshKind::everything())
        } else {
            System::new()
        };

        let pid = sysinfo::get_current_pid().ok();
        if enabled {
            system.refresh_all();
        }

        let now = Instant::now();
        Self {
            system,
            pid,
            start_time: now,
            last_mark: now,
            peak_memory_mb: 0,
            enabled,
        }
    }

    pub fn mark(&mut self) -> Option<StageStats> {
        if !self.enabled {
            return None;
        }

        self.system.refresh_all();
        let process = self.system.process(self.pid?)?;
        let memory_mb = process.memory() / 1024 / 1024;
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);

        let now = Instant::now();
        let stage_time = now - self.last_mark;
        self.last_mark = now;

        Some(StageStats {
            memory_usage_mb: memory_mb,
            peak_memory_mb: self.peak_memory_mb,
            stage_time,
            elapsed_time: now - self.start_time,
        })
    }

    pub fn log_stage(&mut self, stage: &str) {
        if let Some(stats) = self.mark() {
            tracing::info!(
                "📊 {} - Memory: {}MB, Peak: {}MB, Stage: {:?}, Total: {:?}",
                stage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.stage_time,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&mut self) {
        if let Some(stats) = self.mark() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// Without the cli feature there is nothing to sample.
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct StageMonitor;

#[cfg(not(feature = "cli"))]
impl StageMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stage(&mut self, _stage: &str) {}

    pub fn log_final_stats(&mut self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
