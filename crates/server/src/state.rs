// crates/server/src/state.rs
//! Application state shared by all handlers.

use std::sync::Arc;
use std::time::Instant;

use drishti_remote::RemoteTransport;

/// Locations of the log files on the data host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePaths {
    pub alcohol: String,
    pub complaints: String,
    pub drowsiness: String,
    pub feedback: String,
    pub history: String,
    pub obd: String,
    pub tickets: String,
    pub visibility: String,
}

impl Default for RemotePaths {
    fn default() -> Self {
        const ROOT: &str = "/home/fast-and-furious/main";
        Self {
            alcohol: format!("{ROOT}/section_4_test_drive/mq3_data.csv"),
            complaints: format!("{ROOT}/drishti/complaints/complaints.csv"),
            drowsiness: format!("{ROOT}/section_2_test_drive/drowsiness_log.csv"),
            feedback: format!("{ROOT}/drishti/feedback/feedback.csv"),
            history: format!("{ROOT}/master_log.csv"),
            obd: format!("{ROOT}/obd_data/trackLog.csv"),
            tickets: format!("{ROOT}/drishti/tickets/tickets.csv"),
            visibility: format!("{ROOT}/section_1_test_drive/visibility_log.csv"),
        }
    }
}

/// Nothing here is mutable: every request re-reads the remote files.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    pub transport: Arc<dyn RemoteTransport>,
    pub paths: RemotePaths,
}

impl AppState {
    pub fn new(transport: Arc<dyn RemoteTransport>, paths: RemotePaths) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            transport,
            paths,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
