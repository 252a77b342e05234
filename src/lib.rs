//! A charge/discharge balancing daemon for dual-battery ThinkPads using the
//! tp_smapi kernel interface.
//!
//! Every pass captures a fresh snapshot of both batteries, runs the
//! discharge and charge deciders over it, and applies only the writes whose
//! targets differ from what is already on the device. The device flags are
//! the only state carried between passes, so a crash or a failed write is
//! simply repaired on the next pass.

#![warn(rust_2018_idioms)]
#[macro_use]
extern crate log;

pub mod collection;
pub mod options;
pub mod policy;
pub mod utils {
    pub mod logging;
}

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use anyhow::Result;

use collection::smapi::{DryRunWriter, SmapiRead, SmapiWrite, SysfsSmapi};
use options::Settings;

/// Run the poll loop until Ctrl-C, or for a single pass under `--once`.
///
/// Strictly one pass at a time: a pass's writes complete before the next
/// snapshot is taken.
pub fn run(settings: &Settings) -> Result<()> {
    let smapi = match &settings.smapi_dir {
        Some(dir) => SysfsSmapi::with_base(dir),
        None => SysfsSmapi::new(),
    };
    let dry_run_writer = DryRunWriter;
    let writer: &dyn SmapiWrite = if settings.dry_run {
        &dry_run_writer
    } else {
        &smapi
    };

    let is_terminated = Arc::new(AtomicBool::new(false));
    {
        let ist_clone = is_terminated.clone();
        ctrlc::set_handler(move || {
            ist_clone.store(true, Ordering::SeqCst);
        })?;
    }

    loop {
        let state = smapi.snapshot();
        debug!(
            "ac={} bat0=[{}] bat1=[{}]",
            state.ac_connected, state.bat0, state.bat1
        );

        let writes = policy::run_pass(&state, &settings.policy);
        policy::apply_writes(&writes, writer);

        if settings.once || is_terminated.load(Ordering::SeqCst) {
            break;
        }
        thread::sleep(Duration::from_millis(settings.delay_ms));
    }

    Ok(())
}
