// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Profile Manager (C12, spec §3, §4.4, §5).
//!
//! Owns the current registry, the profile-scoped state store, and the
//! effector bundle; swaps profiles atomically via `arc_swap::ArcSwap`,
//! mirroring the teacher's preference for `arc-swap` snapshot reads over a
//! `RwLock` on the hot dispatch path.

use crate::action::walk_actions;
use crate::effectors::EffectorSet;
use crate::error::{EngineError, LoadDiagnostic};
use crate::profile::{self, Profile};
use crate::registry::{Registry, RegistryBuilder};
use crate::state::StateStore;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds a [`Registry`] from a decoded [`Profile`]'s enabled mappings
/// (spec §4.3 "Build").
fn build_registry(profile: &Profile) -> Registry {
    let mut builder = RegistryBuilder::default();
    for (device_name, mapping) in profile.enabled_mappings() {
        let channel_wildcard = mapping.input.channel.is_none();
        builder.insert(
            if mapping.input.device_name == "*" { "*" } else { device_name },
            channel_wildcard,
            mapping.input.channel.unwrap_or(0),
            mapping.input.input_type,
            mapping.input.input_number,
            mapping.id.clone(),
            mapping.action.clone(),
            mapping.input.sysex_pattern.clone(),
        );
    }
    builder.build()
}

/// Preloads every `PlaySound` asset a profile's action trees reference
/// (spec §9 open question resolution: preloading happens once at profile
/// load, and a missing or corrupt asset fails activation outright rather
/// than surfacing as a dispatch-time `ActionError` on first use).
fn preload_sounds(profile: &Profile, effectors: &EffectorSet) -> Result<(), EngineError> {
    for (_, mapping) in profile.enabled_mappings() {
        let mut result = Ok(());
        walk_actions(&mapping.action, &mut |action| {
            if result.is_err() || action.kind != "PlaySound" {
                return;
            }
            let path = action.parameters.get_string("AssetPath", "");
            if let Err(e) = effectors.audio.preload(path) {
                result = Err(EngineError::AssetPreload { path: path.to_string(), cause: e.to_string() });
            }
        });
        result?;
    }
    Ok(())
}

/// Owns the currently-active profile's registry and state, and the
/// effector bundle shared by all actions (spec §3 "Ownership").
pub struct ProfileManager {
    registry: ArcSwap<Registry>,
    state: Mutex<Arc<StateStore>>,
    effectors: EffectorSet,
    active_profile_name: Mutex<Option<String>>,
}

impl ProfileManager {
    pub fn new(effectors: EffectorSet) -> Self {
        ProfileManager {
            registry: ArcSwap::from_pointee(Registry::default()),
            state: Mutex::new(Arc::new(StateStore::new())),
            effectors,
            active_profile_name: Mutex::new(None),
        }
    }

    /// Loads `path`, builds a new registry and state store, and publishes
    /// both atomically. Partial success (spec §4.4) still activates: only
    /// diagnostics are returned alongside, never a hard failure, unless
    /// the file itself can't be read or parsed as JSON.
    pub fn activate_profile_from_path(&self, path: &Path) -> Result<Vec<LoadDiagnostic>, EngineError> {
        let (profile, diagnostics) = profile::load_profile(path)?;
        self.activate_profile(profile, &diagnostics)?;
        Ok(diagnostics)
    }

    /// Activates `profile`, failing outright (and leaving the previously
    /// active profile untouched) if any `PlaySound` action references an
    /// asset that can't be preloaded.
    pub fn activate_profile(&self, profile: Profile, diagnostics: &[LoadDiagnostic]) -> Result<(), EngineError> {
        for d in diagnostics {
            warn!(%d, "profile load diagnostic");
        }

        preload_sounds(&profile, &self.effectors)?;

        let registry = build_registry(&profile);
        let new_state = Arc::new(StateStore::from_initial(&profile.initial_states));

        // Publish atomically: in-flight dispatches holding the old Arc
        // finish against it; it's dropped once the last reader releases it.
        self.registry.store(Arc::new(registry));
        *self.state.lock() = new_state;
        *self.active_profile_name.lock() = Some(profile.name.clone());

        info!(profile = %profile.name, "activated profile");
        Ok(())
    }

    /// A snapshot of the current registry, to be captured once at the
    /// start of a dispatch (spec §5).
    pub fn current_registry(&self) -> Arc<Registry> {
        self.registry.load_full()
    }

    pub fn current_state(&self) -> Arc<StateStore> {
        self.state.lock().clone()
    }

    pub fn effectors(&self) -> &EffectorSet {
        &self.effectors
    }

    pub fn active_profile_name(&self) -> Option<String> {
        self.active_profile_name.lock().clone()
    }
}
