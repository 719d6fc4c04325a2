// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! MIDI diagnostic tool — connects to a MIDI input port and prints every
//! decoded message, grounded on
//! `midimon-daemon/src/bin/midi_diagnostic.rs`: list available ports,
//! connect to one by index (or by substring match against the first
//! argument), and print each incoming message with `colored` styling and
//! a velocity/value bar. Self-contained like the teacher's diagnostic
//! binaries — it talks to `midir`/`midi-msg` directly rather than
//! depending on `midiflux-daemon`'s internal modules, so it has no
//! internal crate to link against.

use colored::Colorize;
use midi_msg::{ChannelVoiceMsg, MidiMsg};
use midir::MidiInput;
use std::time::Instant;

fn note_to_name(note: u8) -> String {
    const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
    let octave = (note / 12) as i32 - 1; // MIDI note 60 = C4
    format!("{}{}", NOTE_NAMES[(note % 12) as usize], octave)
}

fn bar(value: u8, fill: char) -> String {
    fill.to_string().repeat((value as usize * 20) / 127)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "╔══════════════════════════════════════╗".cyan().bold());
    println!("{}", "║       MIDIFlux Diagnostic Tool        ║".cyan().bold());
    println!("{}", "╚══════════════════════════════════════╝".cyan().bold());
    println!();

    let midi_in = MidiInput::new("MIDIFlux Diagnostic")?;
    let ports = midi_in.ports();

    println!("{}", "Available MIDI input ports:".green().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (i, port) in ports.iter().enumerate() {
        println!("  {} {}", format!("[{i}]").cyan(), midi_in.port_name(port)?);
    }
    println!();

    if ports.is_empty() {
        eprintln!("{}", "No MIDI input ports available.".red());
        return Ok(());
    }

    let selector = std::env::args().nth(1);
    let port_index = match &selector {
        Some(arg) => arg
            .parse::<usize>()
            .ok()
            .filter(|&i| i < ports.len())
            .or_else(|| ports.iter().position(|p| midi_in.port_name(p).unwrap_or_default().contains(arg.as_str()))),
        None => Some(0),
    };

    let Some(port_index) = port_index else {
        eprintln!("{}", "No port matched the given argument.".red());
        eprintln!("Usage: {} [port index or name substring]", std::env::args().next().unwrap());
        return Ok(());
    };

    let port = &ports[port_index];
    let port_name = midi_in.port_name(port)?;
    println!("{} {}", "Connecting to:".green(), port_name.yellow());
    println!("{}", "Every decoded message is shown with the registry lookup fields MIDIFlux mappings key on.".dimmed());
    println!();

    let start = Instant::now();

    let _connection = midi_in.connect(
        port,
        "midiflux-diagnostic",
        move |device_timestamp_us, msg, _| {
            let elapsed = Instant::now().duration_since(start);
            print!("{} ", format!("{:7.3}s", elapsed.as_secs_f32()).dimmed());

            if msg.first() == Some(&0xF0) {
                let hex: Vec<String> = msg.iter().map(|b| format!("{b:02X}")).collect();
                println!("{} {}", "SysEx   ".white().bold(), hex.join(" "));
                return;
            }

            match MidiMsg::from_midi(msg) {
                Ok((MidiMsg::ChannelVoice { channel, msg: voice }, _))
                | Ok((MidiMsg::RunningChannelVoice { channel, msg: voice }, _)) => {
                    let ch = channel as u8 + 1; // 1-based (spec §3 "uniform at the boundary")
                    match voice {
                        ChannelVoiceMsg::NoteOn { note, velocity } if velocity > 0 => {
                            println!(
                                "{} {:>4} ({:3}) vel={:3} ch={:2} {}",
                                "NoteOn  ".green().bold(),
                                note_to_name(note).cyan(),
                                note,
                                velocity,
                                ch,
                                bar(velocity, '█').green()
                            );
                        }
                        ChannelVoiceMsg::NoteOn { note, .. } | ChannelVoiceMsg::NoteOff { note, .. } => {
                            println!("{} {:>4} ({:3})         ch={:2}", "NoteOff ".yellow().bold(), note_to_name(note).cyan(), note, ch);
                        }
                        ChannelVoiceMsg::ControlChange { control } => {
                            use midi_msg::ControlChange;
                            if let ControlChange::CC { control: cc, value } = control {
                                println!(
                                    "{}   cc={:3} val={:3} ch={:2} {}",
                                    "CC      ".blue().bold(),
                                    cc,
                                    value,
                                    ch,
                                    bar(value, '▬').blue()
                                );
                            } else {
                                println!("{} {:02X?}", "CC      ".blue().bold(), msg);
                            }
                        }
                        ChannelVoiceMsg::PolyPressure { note, pressure } => {
                            println!(
                                "{} {:>4} ({:3}) pres={:3} ch={:2} {}",
                                "PolyAT  ".purple().bold(),
                                note_to_name(note).cyan(),
                                note,
                                pressure,
                                ch,
                                bar(pressure, '▓').purple()
                            );
                        }
                        ChannelVoiceMsg::ChannelPressure { pressure } => {
                            println!("{} pres={:3}         ch={:2} {}", "ChanAT  ".purple().bold(), pressure, ch, bar(pressure, '▓').purple());
                        }
                        ChannelVoiceMsg::PitchBend { bend } => {
                            let centered = bend as i32 - 8192;
                            let arrow = if centered > 0 { "↑" } else if centered < 0 { "↓" } else { "◯" };
                            println!("{} value={:5} ({:+6}) ch={:2} {}", "PitchBend".magenta().bold(), bend, centered, ch, arrow);
                        }
                        ChannelVoiceMsg::ProgramChange { program } => {
                            println!("{} prog={:3}         ch={:2}", "ProgChg ".cyan().bold(), program, ch);
                        }
                        _ => println!("{} {:02X?}", "Voice   ".cyan().bold(), msg),
                    }
                }
                Ok((MidiMsg::SystemCommon { .. }, _)) | Ok((MidiMsg::SystemRealTime { .. }, _)) => {
                    println!("{} {:02X?} (raw device timestamp {device_timestamp_us}μs)", "System  ".white().bold(), msg);
                }
                _ => println!("{} {:02X?}", "Unknown ".red().bold(), msg),
            }
        },
        (),
    )?;

    println!();
    println!("{}", "═".repeat(50).dimmed());
    println!("{}", "Listening for MIDI events. Press Ctrl+C to exit.".green());
    println!("{}", "═".repeat(50).dimmed());
    println!();

    loop {
        std::thread::sleep(std::time::Duration::from_millis(200));
    }
}
