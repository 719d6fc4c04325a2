// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Hardware adapter (C1, SPEC_FULL.md §4.1), grounded on
//! `conductor-daemon::midi_device::MidiDeviceManager`: connection state
//! behind `Arc<Mutex<_>>`, a `midir` callback thread that decodes raw bytes
//! and forwards `midiflux_core::event::MidiEvent`s over an `mpsc` channel,
//! and exponential-backoff reconnection.
//!
//! Byte decoding is hand-rolled rather than routed through `midi-msg`
//! (SPEC_FULL.md §4.1 allows either) because the adapter also needs the raw
//! channel nibble and the full SysEx byte run, which is more direct read
//! straight off the wire bytes than round-tripping through another crate's
//! message type.

use midiflux_core::event::MidiEvent;
use midir::{MidiInput, MidiInputConnection, MidiInputPort};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

/// Exponential backoff schedule in seconds (1s, 2s, 4s, 8s, 16s, 30s).
const RECONNECT_BACKOFF: &[u64] = &[1, 2, 4, 8, 16, 30];
const MAX_RECONNECT_ATTEMPTS: usize = RECONNECT_BACKOFF.len();

fn now_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

/// Decodes one MIDI wire message into a normalized [`MidiEvent`]. Returns
/// `None` for message kinds the engine has no mapping surface for (clock,
/// active sense, and other system real-time bytes) rather than treating
/// them as errors.
pub fn decode(device_id: &str, bytes: &[u8]) -> Option<MidiEvent> {
    let timestamp = now_millis();
    let status = *bytes.first()?;

    if status == 0xF0 {
        return Some(MidiEvent::SysEx { device_id: device_id.to_string(), bytes: bytes.to_vec(), timestamp });
    }
    if status >= 0xF8 {
        return None; // system real-time: clock, active sense, etc.
    }

    let kind = status & 0xF0;
    let channel = (status & 0x0F) + 1;

    match kind {
        0x90 if bytes.len() >= 3 => {
            let (note, velocity) = (bytes[1], bytes[2]);
            if velocity == 0 {
                Some(MidiEvent::NoteOff { device_id: device_id.to_string(), channel, note, velocity: 0, timestamp })
            } else {
                Some(MidiEvent::NoteOn { device_id: device_id.to_string(), channel, note, velocity, timestamp })
            }
        }
        0x80 if bytes.len() >= 3 => Some(MidiEvent::NoteOff {
            device_id: device_id.to_string(),
            channel,
            note: bytes[1],
            velocity: bytes[2],
            timestamp,
        }),
        0xB0 if bytes.len() >= 3 => Some(MidiEvent::ControlChange {
            device_id: device_id.to_string(),
            channel,
            controller: bytes[1],
            value: bytes[2],
            timestamp,
        }),
        0xC0 if bytes.len() >= 2 => {
            Some(MidiEvent::ProgramChange { device_id: device_id.to_string(), channel, program: bytes[1], timestamp })
        }
        0xD0 if bytes.len() >= 2 => Some(MidiEvent::ChannelPressure {
            device_id: device_id.to_string(),
            channel,
            pressure: bytes[1],
            timestamp,
        }),
        0xA0 if bytes.len() >= 3 => Some(MidiEvent::PolyKeyPressure {
            device_id: device_id.to_string(),
            channel,
            note: bytes[1],
            pressure: bytes[2],
            timestamp,
        }),
        0xE0 if bytes.len() >= 3 => {
            let value = (bytes[1] as u16) | ((bytes[2] as u16) << 7);
            Some(MidiEvent::PitchBend { device_id: device_id.to_string(), channel, value, timestamp })
        }
        _ => Some(MidiEvent::Other { device_id: device_id.to_string(), timestamp }),
    }
}

/// Manages one MIDI input connection with automatic reconnection, grounded
/// on `MidiDeviceManager`.
pub struct MidirAdapter {
    device_name: String,
    auto_reconnect: bool,
    connection: Mutex<Option<MidiInputConnection<()>>>,
    connected: Arc<AtomicBool>,
}

impl MidirAdapter {
    pub fn new(device_name: String, auto_reconnect: bool) -> Self {
        MidirAdapter {
            device_name,
            auto_reconnect,
            connection: Mutex::new(None),
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Connects to the configured device (or the first available port if
    /// unnamed) and starts forwarding decoded events on `event_tx`.
    pub fn connect(&self, event_tx: mpsc::Sender<MidiEvent>) -> Result<(usize, String), String> {
        let midi_in = MidiInput::new("MIDIFlux").map_err(|e| format!("failed to create MIDI input: {e}"))?;
        let ports = midi_in.ports();
        if ports.is_empty() {
            return Err("no MIDI input ports available".to_string());
        }

        let (port, index) = find_port(&midi_in, &ports, &self.device_name);
        let port_name = midi_in.port_name(&port).unwrap_or_else(|_| format!("Port {index}"));

        let connected = self.connected.clone();
        let callback_port_name = port_name.clone();
        let callback = move |_timestamp: u64, message: &[u8], _: &mut ()| {
            trace!(bytes = ?message, "raw MIDI input");
            match decode(&callback_port_name, message) {
                Some(event) => {
                    if let Err(e) = event_tx.try_send(event) {
                        warn!(error = %e, "dropping MIDI event, channel full or closed");
                    }
                }
                None => debug!(bytes = ?message, "ignored MIDI message (unsupported or real-time)"),
            }
        };

        let connection = midi_in
            .connect(&port, "midiflux-in", callback, ())
            .map_err(|e| format!("failed to connect to port: {e}"))?;

        *self.connection.lock().unwrap() = Some(connection);
        connected.store(true, Ordering::SeqCst);

        info!(port = index, name = %port_name, "connected to MIDI input device");
        Ok((index, port_name))
    }

    pub fn disconnect(&self) {
        if let Some(conn) = self.connection.lock().unwrap().take() {
            drop(conn);
        }
        self.connected.store(false, Ordering::SeqCst);
    }

    /// Spawns a background thread that retries `connect` with exponential
    /// backoff, invoking `on_reconnected`/`on_failed` from that thread.
    pub fn spawn_reconnect(
        self: &Arc<Self>,
        event_tx: mpsc::Sender<MidiEvent>,
        on_reconnected: impl FnOnce() + Send + 'static,
        on_failed: impl FnOnce() + Send + 'static,
    ) {
        if !self.auto_reconnect {
            return;
        }
        let adapter = self.clone();
        thread::spawn(move || {
            for (attempt, &delay) in RECONNECT_BACKOFF.iter().enumerate() {
                thread::sleep(Duration::from_secs(delay));
                info!(attempt = attempt + 1, max = MAX_RECONNECT_ATTEMPTS, "attempting MIDI reconnect");
                if adapter.connect(event_tx.clone()).is_ok() {
                    on_reconnected();
                    return;
                }
            }
            error!(attempts = MAX_RECONNECT_ATTEMPTS, "MIDI reconnect failed permanently");
            on_failed();
        });
    }
}

fn find_port(midi_in: &MidiInput, ports: &[MidiInputPort], device_name: &str) -> (MidiInputPort, usize) {
    if device_name.is_empty() {
        return (ports[0].clone(), 0);
    }
    for (i, port) in ports.iter().enumerate() {
        if let Ok(name) = midi_in.port_name(port) {
            if name.contains(device_name) {
                return (port.clone(), i);
            }
        }
    }
    warn!(device = %device_name, "named MIDI device not found, falling back to first port");
    (ports[0].clone(), 0)
}
