// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Profile file watcher with debouncing ([AMBIENT], SPEC_FULL.md §4.4
//! "Path safety" neighbor), grounded on
//! `conductor-daemon::daemon::config_watcher::ConfigWatcher`: a 500ms
//! debounced `notify` watch on the profile's parent directory, filtered to
//! modify events for the profile file itself, forwarded over an `mpsc`
//! channel to the main event loop.
//!
//! A SHA-256 checksum of the last-loaded bytes (the `sha2` dependency
//! `Cargo.toml` calls out for "hot-reload change detection") suppresses a
//! reload when a debounced batch fires but the file content is unchanged
//! — editors that rewrite-then-touch a file can raise more than one
//! modify event per real edit.

use notify::event::{EventKind, ModifyKind};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

#[cfg(target_os = "macos")]
use notify_debouncer_full::FileIdMap as CacheType;
#[cfg(not(target_os = "macos"))]
use notify_debouncer_full::NoCache as CacheType;

fn should_reload(event: &Event, profile_path: &Path) -> bool {
    let is_relevant = matches!(
        event.kind,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any) | EventKind::Create(_)
    );
    is_relevant && event.paths.iter().any(|p| p == profile_path)
}

fn checksum(path: &Path) -> Option<[u8; 32]> {
    let bytes = std::fs::read(path).ok()?;
    Some(Sha256::digest(&bytes).into())
}

/// Watches `profile_path`'s parent directory and sends the path on
/// `reload_tx` whenever the file's content changes. Runs until the
/// returned `Debouncer` is dropped.
pub fn watch(
    profile_path: PathBuf,
    reload_tx: mpsc::Sender<PathBuf>,
) -> Result<Debouncer<RecommendedWatcher, CacheType>, String> {
    let watch_dir = profile_path.parent().map(Path::to_path_buf).ok_or("profile path has no parent directory")?;

    let mut last_checksum = checksum(&profile_path);
    let watched_path = profile_path.clone();

    let mut debouncer = new_debouncer(Duration::from_millis(500), None, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                for event in &events {
                    if !should_reload(&event.event, &watched_path) {
                        continue;
                    }
                    let current = checksum(&watched_path);
                    if current == last_checksum {
                        debug!(path = %watched_path.display(), "profile file touched but content unchanged, skipping reload");
                        continue;
                    }
                    last_checksum = current;
                    debug!(path = %watched_path.display(), "profile file changed");
                    if let Err(e) = reload_tx.blocking_send(watched_path.clone()) {
                        warn!(error = %e, "failed to queue profile reload");
                    }
                    break;
                }
            }
            Err(errors) => {
                for e in errors {
                    error!(error = %e, "profile watcher error");
                }
            }
        }
    })
    .map_err(|e| format!("failed to create profile watcher: {e}"))?;

    debouncer
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| format!("failed to watch {}: {e}", watch_dir.display()))?;

    info!(dir = %watch_dir.display(), file = %profile_path.display(), "watching profile for hot-reload");
    Ok(debouncer)
}
