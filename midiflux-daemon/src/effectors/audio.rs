// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Audio playback backed by `rodio`, grounded on the pack's "decode once,
//! play many times" preloaded sound-effect pattern (closest analogue:
//! `devaloop-labs-devalang`'s use of `rodio` for sample playback).
//!
//! `preload` decodes the file completely into PCM samples once, keyed by
//! the asset path itself (the `play_sound` action parameter never sees a
//! separate generated id — `ProfileManager::activate_profile` calls
//! `preload` with the same `AssetPath` string the action later passes to
//! `play`); `play` never touches a codec, it just clones the already-decoded
//! samples into a fresh `Sink` (spec §9 open question resolution: preload
//! at profile load, fail activation on a missing/corrupt asset — see
//! DESIGN.md).

use midiflux_core::effectors::AudioEffector;
use midiflux_core::error::ActionError;
use parking_lot::Mutex;
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

#[derive(Clone)]
struct DecodedAsset {
    channels: u16,
    sample_rate: u32,
    samples: std::sync::Arc<Vec<f32>>,
}

pub struct RodioAudioEffector {
    // Held for the process lifetime: dropping it tears down the output device.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    assets: Mutex<HashMap<String, DecodedAsset>>,
}

impl RodioAudioEffector {
    pub fn new() -> Result<Self, ActionError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| ActionError::EffectorUnavailable(format!("no audio output device: {e}")))?;
        Ok(RodioAudioEffector { _stream: stream, handle, assets: Mutex::new(HashMap::new()) })
    }
}

impl AudioEffector for RodioAudioEffector {
    fn preload(&self, path: &str) -> Result<String, ActionError> {
        let file = File::open(path).map_err(|e| ActionError::new(format!("preload `{path}`"), e))?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| ActionError::new(format!("decode `{path}`"), e))?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples().collect();

        self.assets.lock().insert(
            path.to_string(),
            DecodedAsset { channels, sample_rate, samples: std::sync::Arc::new(samples) },
        );

        Ok(path.to_string())
    }

    fn play(&self, asset_id: &str) -> Result<(), ActionError> {
        let asset = self
            .assets
            .lock()
            .get(asset_id)
            .cloned()
            .ok_or_else(|| ActionError::new("play", format!("unknown asset id '{asset_id}'")))?;

        let sink = Sink::try_new(&self.handle).map_err(|e| ActionError::new("play", e))?;
        let buffer = SamplesBuffer::new(asset.channels, asset.sample_rate, (*asset.samples).clone());
        sink.append(buffer);
        sink.detach();
        Ok(())
    }
}
