#![allow(clippy::unwrap_used)]

use gateway::logger::{
    self,
    config::{Level, Log, LogConsole, LogFormat},
};

// The global subscriber can be installed once per process, so this file
// holds a single test.
#[test]
fn setup_installs_a_subscriber() {
    let log = Log {
        console: LogConsole {
            enabled: true,
            level: Level::default(),
            log_format: LogFormat::Json,
            filtering_directive: None,
        },
    };

    let _guard = logger::setup(&log, gateway::service_name!(), [gateway::service_name!()]);

    logger::info!(flow = "smoke", "logger initialised for tests");
}
