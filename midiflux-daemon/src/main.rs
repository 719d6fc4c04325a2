// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! MIDIFlux daemon — the reference host around `midiflux-core`.
//!
//! Parses CLI arguments, loads application settings and an initial
//! profile, wires the concrete effector bundle and `midir`-backed hardware
//! adapters, then runs the dispatch loop until a shutdown signal arrives.
//! Grounded on `conductor-daemon::main`'s shape (clap args, default
//! per-platform config path, tracing-subscriber setup, `tokio::main`
//! runtime) but adapted to MIDIFlux's JSON profiles, hot-reload via a
//! `notify` watcher, and a direct `tokio::select!` event loop rather than
//! the teacher's IPC-driven daemon command channel (CLI/tray control is a
//! spec §6 non-goal here).

mod effectors;
mod hardware;
mod reload;
mod settings;

use anyhow::Context;
use clap::Parser;
use hardware::MidirAdapter;
use midiflux_core::dispatcher::Dispatcher;
use midiflux_core::event::MidiEvent;
use midiflux_core::profile_manager::ProfileManager;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// MIDIFlux — MIDI-to-host-action mapping engine
///
/// Loads a JSON profile and dispatches incoming MIDI events from every
/// device the profile's mappings reference to synthesized keyboard/mouse
/// input, virtual gamepad reports, outbound MIDI, shell commands, audio
/// playback, or short delays.
#[derive(Parser, Debug)]
#[command(name = "midiflux", version, about, long_about = None)]
struct Args {
    /// Profile JSON file to activate. Relative paths resolve against
    /// `ProfilesDir` from the settings file; absolute paths are used
    /// as-is (and must still live under `ProfilesDir`).
    profile: Option<PathBuf>,

    /// Path to the application settings file.
    ///
    /// Defaults to `<config dir>/midiflux/settings.json`.
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Enable verbose (debug-level) logging. Overrides the settings file.
    #[arg(short, long)]
    verbose: bool,

    /// Enable trace-level logging (very verbose). Overrides `--verbose`.
    #[arg(short = 'T', long)]
    trace: bool,
}

fn resolve_profile_path(args_profile: Option<PathBuf>, settings: &settings::AppSettings) -> Result<PathBuf, String> {
    let file = args_profile
        .or_else(|| settings.default_profile.clone().map(PathBuf::from))
        .ok_or_else(|| "no profile given: pass one as an argument or set DefaultProfile in settings".to_string())?;
    Ok(if file.is_absolute() { file } else { settings.profiles_dir.join(file) })
}

/// Connects a named-device adapter and retries with backoff in the
/// background if the device isn't present yet (spec §4.1: "Failure to
/// start returns a boolean" — logged here rather than aborting startup,
/// since a profile may reference a device that's plugged in later).
fn spawn_adapter(device_name: String, event_tx: mpsc::Sender<MidiEvent>) -> Arc<MidirAdapter> {
    let adapter = Arc::new(MidirAdapter::new(device_name.clone(), true));
    if adapter.connect(event_tx.clone()).is_err() {
        warn!(device = %device_name, "MIDI device not available at startup, retrying with backoff");
        let name_for_log = device_name.clone();
        let name_for_fail = device_name;
        adapter.spawn_reconnect(
            event_tx,
            move || info!(device = %name_for_log, "MIDI device reconnected"),
            move || error!(device = %name_for_fail, "MIDI device reconnect attempts exhausted"),
        );
    }
    adapter
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings_path = args.settings.clone().unwrap_or_else(settings::default_settings_path);
    let mut app_settings = settings::load_settings(&settings_path);
    if args.trace {
        app_settings.logging.level = "trace".to_string();
    } else if args.verbose {
        app_settings.logging.level = "debug".to_string();
    }
    let _log_guard = midiflux_core::logging::init(&app_settings.logging);

    info!(version = env!("CARGO_PKG_VERSION"), "MIDIFlux daemon starting");

    let profile_path = resolve_profile_path(args.profile, &app_settings).map_err(|e| anyhow::anyhow!(e))?;
    let validated_path = midiflux_core::profile::validate_profile_path(&profile_path, &app_settings.profiles_dir)
        .context("profile path rejected")?;
    info!(path = %validated_path.display(), "loading initial profile");

    let (profile, diagnostics) =
        midiflux_core::profile::load_profile(&validated_path).context("failed to load initial profile")?;
    if diagnostics.is_empty() {
        info!(profile = %profile.name, "profile decoded cleanly");
    } else {
        warn!(profile = %profile.name, count = diagnostics.len(), "profile has rejected mappings, see diagnostics below");
    }

    let device_names: BTreeSet<String> = profile.devices.iter().map(|d| d.device_name.clone()).collect();

    let effector_set = effectors::build_effector_set().context("failed to build effector set")?;
    let manager = ProfileManager::new(effector_set);
    manager
        .activate_profile(profile, &diagnostics)
        .context("failed to activate initial profile")?;

    let (event_tx, mut event_rx) = mpsc::channel::<MidiEvent>(256);
    let mut adapters: Vec<Arc<MidirAdapter>> = Vec::new();

    for device_name in &device_names {
        if device_name == "*" {
            if !app_settings.auto_connect_wildcard_devices {
                continue;
            }
            match hardware::enumerate_input_names() {
                Ok(names) => {
                    for name in names {
                        if device_names.contains(&name) {
                            continue; // already connected explicitly above/below
                        }
                        adapters.push(spawn_adapter(name, event_tx.clone()));
                    }
                }
                Err(e) => error!(error = %e, "failed to enumerate MIDI input ports for wildcard device block"),
            }
        } else {
            adapters.push(spawn_adapter(device_name.clone(), event_tx.clone()));
        }
    }

    let (reload_tx, mut reload_rx) = mpsc::channel::<PathBuf>(4);
    let _watcher = match reload::watch(validated_path.clone(), reload_tx) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "profile hot-reload disabled");
            None
        }
    };

    let dispatcher = Arc::new(Dispatcher::default());
    let manager = Arc::new(manager);
    info!(devices = adapters.len(), "dispatch loop running");

    loop {
        tokio::select! {
            Some(event) = event_rx.recv() => {
                // Each event dispatches on its own blocking task so a
                // suspension point in one action tree (Delay,
                // CommandExecution with WaitForExit, ...) cannot stall
                // events from other devices or other mappings — the
                // dispatcher is re-entrant per event and must not
                // serialize unrelated events (spec §5).
                let dispatcher = Arc::clone(&dispatcher);
                let manager = Arc::clone(&manager);
                tokio::task::spawn_blocking(move || {
                    let registry = manager.current_registry();
                    let state = manager.current_state();
                    dispatcher.dispatch(&event, &registry, &state, manager.effectors());
                });
            }
            Some(path) = reload_rx.recv() => {
                match midiflux_core::profile::load_profile(&path) {
                    Ok((profile, diagnostics)) => {
                        let name = profile.name.clone();
                        match manager.activate_profile(profile, &diagnostics) {
                            Ok(()) => info!(profile = %name, "hot-reloaded profile"),
                            Err(e) => error!(profile = %name, error = %e, "hot-reload rejected, keeping previous profile active"),
                        }
                    }
                    Err(e) => error!(path = %path.display(), error = %e, "failed to reload profile, keeping previous one active"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received, waiting for in-flight dispatches to drain");
                break;
            }
            else => break,
        }
    }

    for adapter in &adapters {
        adapter.disconnect();
    }
    info!("MIDIFlux daemon stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_profile_path_uses_default_when_no_argument() {
        let mut s = settings::AppSettings::default();
        s.profiles_dir = PathBuf::from("/profiles");
        s.default_profile = Some("studio.json".to_string());
        let resolved = resolve_profile_path(None, &s).unwrap();
        assert_eq!(resolved, PathBuf::from("/profiles/studio.json"));
    }

    #[test]
    fn resolve_profile_path_prefers_cli_argument() {
        let mut s = settings::AppSettings::default();
        s.profiles_dir = PathBuf::from("/profiles");
        s.default_profile = Some("studio.json".to_string());
        let resolved = resolve_profile_path(Some(PathBuf::from("live.json")), &s).unwrap();
        assert_eq!(resolved, PathBuf::from("/profiles/live.json"));
    }

    #[test]
    fn resolve_profile_path_fails_with_no_profile_anywhere() {
        let s = settings::AppSettings::default();
        assert!(resolve_profile_path(None, &s).is_err());
    }
}
