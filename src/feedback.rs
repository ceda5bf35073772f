//! Sound and haptic collaborator seam
//!
//! The game loop only emits [`GameEvent`]s; turning those into audio or
//! vibration is the shell's business. This module maps events to named cues
//! and hands them to pluggable sinks, so platforms without either capability
//! plug in the silent defaults.

use crate::game::GameEvent;

/// Named audio cue, keyed the way the sound collaborator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    PowerUp,
    Combo,
    GameOver,
}

/// Vibration pattern for the haptic collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticPulse {
    Tap,
    Double,
    Long,
}

pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

pub trait HapticSink {
    fn pulse(&mut self, pulse: HapticPulse);
}

/// Sink that does nothing; the default on platforms without audio/haptics
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

impl HapticSink for Silent {
    fn pulse(&mut self, _pulse: HapticPulse) {}
}

/// Routes game events to the configured sinks
pub struct Feedback {
    sound: Box<dyn SoundSink>,
    haptics: Box<dyn HapticSink>,
}

impl Feedback {
    pub fn new(sound: Box<dyn SoundSink>, haptics: Box<dyn HapticSink>) -> Self {
        Self { sound, haptics }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(Silent), Box::new(Silent))
    }

    pub fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FoodEaten { .. } => {
                self.sound.play(SoundCue::Eat);
                self.haptics.pulse(HapticPulse::Tap);
            }
            GameEvent::PowerUpCollected(_) => {
                self.sound.play(SoundCue::PowerUp);
                self.haptics.pulse(HapticPulse::Double);
            }
            GameEvent::ComboAdvanced { .. } => {
                self.sound.play(SoundCue::Combo);
                self.haptics.pulse(HapticPulse::Tap);
            }
            GameEvent::GameOver { .. } => {
                self.sound.play(SoundCue::GameOver);
                self.haptics.pulse(HapticPulse::Long);
            }
        }
    }
}
