// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while loading or saving a profile (§4.4, §7).
///
/// Individual mapping failures are collected as [`LoadDiagnostic`]s rather
/// than surfaced here — `ProfileLoadError` covers the failures that prevent
/// activation outright (the file can't be read or isn't valid JSON at all).
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("IO error reading profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("path is not allowed: {0}")]
    PathNotAllowed(String),

    #[error("duplicate mapping id: {0}")]
    DuplicateMappingId(String),
}

/// One problem found while decoding a single mapping or action node.
///
/// The loader collects these instead of failing the whole profile (§4.4:
/// "partial success is allowed").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// `$type` did not match any registered action kind.
    UnknownActionType { type_tag: String },
    /// A required parameter was absent.
    MissingParameter { kind: String, name: &'static str },
    /// A parameter's JSON value didn't type-check against its declared kind.
    InvalidParameter {
        kind: String,
        name: &'static str,
        reason: String,
    },
    /// An unrecognized parameter name was present (non-fatal, ignored).
    UnknownParameter { kind: String, name: String },
    /// A `SysExPattern` failed structural validation (§4.10).
    InvalidSysExPattern { reason: String },
    /// A mapping id collided with one already installed.
    DuplicateMappingId { id: String },
    /// A `ValueConditionList` entry had `min > max` or an out-of-range bound.
    InvalidValueCondition { reason: String },
    /// An `InitialStates` key is not referenced by any stateful action in
    /// the profile (spec §3: "warn otherwise — not fatal").
    UnreferencedInitialState { key: i64 },
}

impl std::fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadDiagnostic::UnknownActionType { type_tag } => {
                write!(f, "unknown action type '{type_tag}'")
            }
            LoadDiagnostic::MissingParameter { kind, name } => {
                write!(f, "{kind}: missing required parameter '{name}'")
            }
            LoadDiagnostic::InvalidParameter { kind, name, reason } => {
                write!(f, "{kind}: parameter '{name}' invalid: {reason}")
            }
            LoadDiagnostic::UnknownParameter { kind, name } => {
                write!(f, "{kind}: ignoring unknown parameter '{name}'")
            }
            LoadDiagnostic::InvalidSysExPattern { reason } => {
                write!(f, "invalid SysEx pattern: {reason}")
            }
            LoadDiagnostic::DuplicateMappingId { id } => {
                write!(f, "duplicate mapping id '{id}'")
            }
            LoadDiagnostic::InvalidValueCondition { reason } => {
                write!(f, "invalid value condition: {reason}")
            }
            LoadDiagnostic::UnreferencedInitialState { key } => {
                write!(f, "InitialStates key {key} is not referenced by any stateful action")
            }
        }
    }
}

/// Errors raised by an action's `execute` (§4.7).
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{description}: {cause}")]
    Failed { description: String, cause: String },

    #[error("sequence failed at child {index} ({description}): {cause}")]
    SequenceChildFailed {
        index: usize,
        description: String,
        cause: String,
    },

    #[error("effector unavailable: {0}")]
    EffectorUnavailable(String),

    #[error("MIDI output device not started: {0}")]
    MidiOutputNotStarted(String),
}

impl ActionError {
    pub fn new(description: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ActionError::Failed {
            description: description.into(),
            cause: cause.to_string(),
        }
    }
}

/// Errors raised by the registry/dispatcher/profile manager (C3, C11, C12).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("profile load error: {0}")]
    ProfileLoad(#[from] ProfileLoadError),

    #[error("no active profile")]
    NoActiveProfile,

    #[error("hardware adapter initialization failed: {0}")]
    HardwareInit(String),

    #[error("PlaySound asset '{path}' failed to preload: {cause}")]
    AssetPreload { path: String, cause: String },
}
