use std::fmt;

const NOTE_NAMES: [&str; 12] = [
    "C",
    "C♯",
    "D",
    "E♭",
    "E",
    "F",
    "F♯",
    "G",
    "G♯",
    "A",
    "B♭",
    "B"
];

/// A detected fundamental frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pitch {
    pub hz: f32
}

impl Pitch {
    pub fn new(hz: f32) -> Pitch {
        Pitch { hz }
    }

    fn is_valid(&self) -> bool {
        self.hz > 0.0 && self.hz.is_finite()
    }

    /// Fractional MIDI note number, A4 = 69.
    pub fn midi_number(&self) -> f32 {
        69.0 + 12.0 * (self.hz / 440.0).log2()
    }

    /// Distance in cents from the nearest equal-tempered note, in (-50, 50].
    pub fn cents_error(&self) -> f32 {
        if !self.is_valid() {
            return f32::NAN;
        }

        let midi_number = self.midi_number();
        let cents = (midi_number - midi_number.floor()) * 100.0;
        if cents > 50.0 {
            cents - 100.0
        }
        else {
            cents
        }
    }

    /// Nearest note name and its octave. `None` below C-1, where MIDI numbering stops.
    pub fn note_name(&self) -> Option<(&'static str, i32)> {
        if !self.is_valid() {
            return None;
        }

        let rounded = self.midi_number().round() as i32;
        if rounded < 0 {
            return None;
        }

        //midi_number of 0 is C-1.
        let name = NOTE_NAMES[rounded as usize % NOTE_NAMES.len()];
        let octave = rounded / NOTE_NAMES.len() as i32 - 1;
        Some((name, octave))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.note_name() {
            Some((name, octave)) => write!(f, "{: <2}{}", name, octave),
            None => Ok(())
        }
    }
}
