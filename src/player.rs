//! Contains the interface to the audio output and the scheduler that plays stimuli through it.
//!
//! Producing sound is left to the embedding application, which implements [TonePlayer]. Playing a
//! tone is fire-and-forget: the call returns as soon as the tone is scheduled. Sequences of notes
//! are played by a [PlaybackSchedule], an ordered list of steps consumed one at a time. After each
//! step the schedule suspends for the step's hold time, so tones never overlap. A schedule can be
//! abandoned through an [AbandonHandle], in which case the remaining steps are skipped.

use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tracing::debug;

use crate::data::music::notes::PitchClass;

/// A trait for the audio output that plays tones.
pub trait TonePlayer {
    /// Starts playing a tone of the given frequency for the given duration. Must not block.
    fn play_frequency(&self, frequency: f64, duration: Duration);

    /// Starts playing the pitch class in the reference octave.
    fn play(&self, pitch_class: PitchClass, duration: Duration) {
        self.play_frequency(pitch_class.reference_frequency(), duration);
    }
}

impl<P: TonePlayer + ?Sized> TonePlayer for &P {
    fn play_frequency(&self, frequency: f64, duration: Duration) {
        (**self).play_frequency(frequency, duration);
    }
}

impl<P: TonePlayer + ?Sized> TonePlayer for Arc<P> {
    fn play_frequency(&self, frequency: f64, duration: Duration) {
        (**self).play_frequency(frequency, duration);
    }
}

/// A single note of a schedule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlaybackStep {
    /// The note to play.
    pub pitch_class: PitchClass,

    /// How long the note rings.
    pub duration: Duration,

    /// How long to wait after starting the note before moving to the next step.
    pub hold: Duration,
}

/// The result of running a schedule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackOutcome {
    /// Every step was played.
    Completed,

    /// The schedule was abandoned before the given number of steps could be played.
    Abandoned {
        /// The number of steps that were not played.
        remaining: usize,
    },
}

/// An ordered list of notes to play one after another.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlaybackSchedule {
    steps: Vec<PlaybackStep>,
}

impl PlaybackSchedule {
    /// A schedule with a single note that does not wait for the note to finish.
    #[must_use]
    pub fn single(pitch_class: PitchClass, duration: Duration) -> Self {
        PlaybackSchedule {
            steps: vec![PlaybackStep {
                pitch_class,
                duration,
                hold: Duration::ZERO,
            }],
        }
    }

    /// A schedule that plays the notes in order, starting a new note every `interval`.
    #[must_use]
    pub fn sequence(notes: &[PitchClass], duration: Duration, interval: Duration) -> Self {
        PlaybackSchedule {
            steps: notes
                .iter()
                .map(|pitch_class| PlaybackStep {
                    pitch_class: *pitch_class,
                    duration,
                    hold: interval,
                })
                .collect(),
        }
    }

    /// Returns the steps in the order they are played.
    #[must_use]
    pub fn steps(&self) -> &[PlaybackStep] {
        &self.steps
    }

    /// Plays every step in order, suspending for each step's hold time. Returns early if the
    /// schedule is abandoned through the handle paired with `abandon`. Abandon requests made
    /// before the call are ignored.
    pub async fn run<P: TonePlayer + ?Sized>(
        &self,
        player: &P,
        abandon: &mut AbandonSignal,
    ) -> PlaybackOutcome {
        abandon.receiver.borrow_and_update();

        for (index, step) in self.steps.iter().enumerate() {
            if abandon.receiver.has_changed().unwrap_or(false) {
                return self.abandoned_at(index);
            }

            player.play(step.pitch_class, step.duration);
            if step.hold.is_zero() {
                continue;
            }

            tokio::select! {
                _ = tokio::time::sleep(step.hold) => {}
                Ok(()) = abandon.receiver.changed() => {
                    return self.abandoned_at(index + 1);
                }
            }
        }
        PlaybackOutcome::Completed
    }

    fn abandoned_at(&self, next_step: usize) -> PlaybackOutcome {
        let remaining = self.steps.len() - next_step;
        debug!(remaining, "playback abandoned");
        PlaybackOutcome::Abandoned { remaining }
    }
}

/// A handle that abandons the schedule currently being played. It can be cloned and sent to other
/// tasks.
#[derive(Clone, Debug)]
pub struct AbandonHandle {
    sender: Arc<watch::Sender<u64>>,
}

impl AbandonHandle {
    /// Abandons the schedule that is currently playing, if any.
    pub fn abandon(&self) {
        self.sender.send_modify(|generation| *generation += 1);
    }
}

/// The receiving side of an [AbandonHandle], consumed by [PlaybackSchedule::run].
#[derive(Debug)]
pub struct AbandonSignal {
    receiver: watch::Receiver<u64>,
}

/// Creates a connected abandon handle and signal.
#[must_use]
pub fn abandon_channel() -> (AbandonHandle, AbandonSignal) {
    let (sender, receiver) = watch::channel(0);
    (
        AbandonHandle {
            sender: Arc::new(sender),
        },
        AbandonSignal { receiver },
    )
}
