//! Placeholder melody output.
//!
//! Writes a fixed eight-note C-major scale as a Standard MIDI File. This is a
//! stand-in used when no music generation service is configured; it does not
//! read the generated lyrics.

use crate::Result;
use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Each scale note sounds for half a beat.
const TICKS_PER_NOTE: u32 = TICKS_PER_QUARTER as u32 / 2;

/// C4 through C5.
const SCALE: [u8; 8] = [60, 62, 64, 65, 67, 69, 71, 72];

const TEMPO_BPM: u32 = 100;

/// Render the placeholder scale to MIDI bytes.
pub fn placeholder_melody() -> Result<Vec<u8>> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let mut track: Track<'static> = Vec::new();

    let tempo_microseconds = 60_000_000 / TEMPO_BPM;
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });

    // Music box sound (program 10)
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::ProgramChange {
                program: u7::new(10),
            },
        },
    });

    for pitch in &SCALE {
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn {
                    key: u7::new(*pitch),
                    vel: u7::new(90),
                },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(TICKS_PER_NOTE),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOff {
                    key: u7::new(*pitch),
                    vel: u7::new(0),
                },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    Ok(buf)
}
