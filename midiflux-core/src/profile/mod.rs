// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Profile data model and JSON codec (C4, spec §3, §4.4, §6).

pub mod loader;
pub mod types;

pub use loader::{decode_profile, encode_profile, load_profile, validate_profile_path};
pub use types::{DeviceBlock, Mapping, MappingInput, Profile};
