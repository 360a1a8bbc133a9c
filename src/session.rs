//! Contains the training session, which owns the options, the running score, and the exercise in
//! progress.
//!
//! A session is created by the caller when training starts and dropped when it ends. All exercise
//! operations go through it:
//!
//! 1. [Session::start] generates an exercise from the active scale, plays its stimulus, and returns
//!    the prompt once the exercise is ready for input. Starting an exercise discards the previous
//!    one if it was not finished.
//! 2. [Session::submit] (or [Session::submit_position]) feeds one note of the answer. When the
//!    answer is complete the exercise is validated, the score is updated, and the exercise is
//!    discarded.
//! 3. [Session::abandon] discards the exercise in progress without scoring it. While a stimulus is
//!    still playing, the same can be done from another task through [Session::abandon_handle].

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    data::{
        DegreeReference, TrainerOptions, ViewMode,
        music::{PitchSet, chords::Chord, notes::PitchClass, scales::Scale},
    },
    error::{Error, InvalidStateError, RangeError},
    exercise::{ActiveExercise, Exercise, ExerciseKind, Prompt, SubmitOutcome},
    fretboard::{Fretboard, view::FretboardView},
    player::{
        AbandonHandle, AbandonSignal, PlaybackOutcome, PlaybackSchedule, TonePlayer,
        abandon_channel,
    },
    scorer::SessionScore,
};

/// A training session on a single instrument.
pub struct Session<P: TonePlayer> {
    /// The options the session was configured with.
    options: TrainerOptions,

    /// The neck described by the options.
    fretboard: Fretboard,

    /// The scale of the selected key, from which exercises are generated.
    scale: Scale,

    /// The audio output.
    player: P,

    /// The source of randomness for generating exercises.
    rng: StdRng,

    /// The running score.
    score: SessionScore,

    /// The exercise in progress, if any.
    current: Option<ActiveExercise>,

    /// The handle given out to abandon the stimulus being played.
    abandon_handle: AbandonHandle,

    /// The receiving side of `abandon_handle`.
    abandon_signal: AbandonSignal,
}

impl<P: TonePlayer> Session<P> {
    /// Creates a new session with a randomly seeded generator.
    pub fn new(options: TrainerOptions, player: P) -> Result<Self, RangeError> {
        Self::with_rng(options, player, StdRng::from_os_rng())
    }

    /// Creates a new session that generates exercises with the given generator.
    pub fn with_rng(options: TrainerOptions, player: P, rng: StdRng) -> Result<Self, RangeError> {
        let fretboard = options.fretboard()?;
        let scale = options.scale_context().derive();
        let (abandon_handle, abandon_signal) = abandon_channel();
        Ok(Session {
            options,
            fretboard,
            scale,
            player,
            rng,
            score: SessionScore::default(),
            current: None,
            abandon_handle,
            abandon_signal,
        })
    }

    #[must_use]
    pub fn options(&self) -> &TrainerOptions {
        &self.options
    }

    /// Replaces the options. An exercise in progress keeps the notes it was generated with.
    pub fn set_options(&mut self, options: TrainerOptions) -> Result<(), RangeError> {
        self.fretboard = options.fretboard()?;
        self.scale = options.scale_context().derive();
        self.options = options;
        debug!(scale = %self.scale.context, "options updated");
        Ok(())
    }

    /// Changes a single option from its string form. See [TrainerOptions::set_option].
    pub fn set_option(&mut self, option: &str, value: &str) -> Result<(), Error> {
        let mut options = self.options.clone();
        options.set_option(option, value)?;
        self.set_options(options)?;
        Ok(())
    }

    #[must_use]
    pub fn fretboard(&self) -> &Fretboard {
        &self.fretboard
    }

    /// Returns the scale of the selected key.
    #[must_use]
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Returns the chord selected for the arpeggio view.
    #[must_use]
    pub fn chord(&self) -> Chord {
        self.options.chord.derive()
    }

    /// Returns the current score.
    #[must_use]
    pub fn score(&self) -> SessionScore {
        self.score
    }

    /// Returns the exercise in progress, if any.
    #[must_use]
    pub fn current_exercise(&self) -> Option<&ActiveExercise> {
        self.current.as_ref()
    }

    /// Returns a handle that abandons the stimulus being played from another task.
    #[must_use]
    pub fn abandon_handle(&self) -> AbandonHandle {
        self.abandon_handle.clone()
    }

    /// Builds the fretboard grid for the current view and display options.
    #[must_use]
    pub fn view(&self) -> FretboardView {
        let display_mode = self.options.display_mode;
        match self.options.view_mode {
            ViewMode::Scale => {
                FretboardView::build(&self.fretboard, &self.scale, &self.scale, display_mode)
            }
            ViewMode::Arpeggio => {
                let chord = self.chord();
                let labels: &dyn PitchSet = match self.options.degree_reference {
                    DegreeReference::Key => &self.scale,
                    DegreeReference::Chord => &chord,
                };
                FretboardView::build(&self.fretboard, &chord, labels, display_mode)
            }
        }
    }

    /// Plays the note at the given position at its true pitch and returns its frequency.
    pub fn audition(&self, string_index: usize, fret: i32) -> Result<f64, RangeError> {
        let frequency = self.fretboard.frequency_at(string_index, fret)?;
        self.player
            .play_frequency(frequency, self.options.playback.note_duration());
        Ok(frequency)
    }

    /// Discards the exercise in progress without scoring it. Returns whether there was one.
    pub fn abandon(&mut self) -> bool {
        match self.current.take() {
            Some(active) => {
                let kind = active.exercise().kind();
                info!(%kind, state = %active.state(), "exercise abandoned");
                true
            }
            None => false,
        }
    }

    /// Starts an exercise of the kind selected in the options.
    pub async fn start_exercise(&mut self) -> Result<Option<Prompt>, InvalidStateError> {
        self.start(self.options.exercise_kind).await
    }

    /// Generates an exercise of the given kind, plays its stimulus, and returns the prompt once the
    /// exercise is waiting for input. Returns `None` if the stimulus was abandoned through an
    /// [AbandonHandle], in which case the exercise is discarded.
    pub async fn start(&mut self, kind: ExerciseKind) -> Result<Option<Prompt>, InvalidStateError> {
        self.abandon();

        let exercise = Exercise::generate(kind, &self.scale, &mut self.rng)?;
        debug!(?exercise, scale = %self.scale.context, "exercise created");
        let schedule = self.stimulus(&exercise);
        let mut active = ActiveExercise::new(exercise);

        active.mark_presented()?;
        let outcome = schedule.run(&self.player, &mut self.abandon_signal).await;
        if let PlaybackOutcome::Abandoned { .. } = outcome {
            info!(%kind, "exercise abandoned during playback");
            return Ok(None);
        }

        active.await_input()?;
        let prompt = active.exercise().prompt();
        self.current = Some(active);
        Ok(Some(prompt))
    }

    /// Returns the schedule that plays the stimulus of the exercise.
    fn stimulus(&self, exercise: &Exercise) -> PlaybackSchedule {
        let playback = &self.options.playback;
        match exercise {
            Exercise::FindNote { target } | Exercise::FindDegree { target, .. } => {
                PlaybackSchedule::single(*target, playback.note_duration())
            }
            Exercise::EchoMotif { motif, .. } => PlaybackSchedule::sequence(
                motif,
                playback.note_duration(),
                playback.motif_interval(),
            ),
        }
    }

    /// Submits one note of the answer to the exercise in progress. The note is echoed through the
    /// player. Once the answer is complete, the score is updated and the exercise is discarded.
    pub fn submit(&mut self, pitch_class: PitchClass) -> Result<SubmitOutcome, InvalidStateError> {
        let active = self
            .current
            .as_mut()
            .ok_or(InvalidStateError::NoActiveExercise)?;
        let outcome = active.submit(pitch_class)?;
        self.player
            .play(pitch_class, self.options.playback.answer_tone());
        debug!(note = %pitch_class, "answer submitted");

        if let SubmitOutcome::Validated(verdict) = &outcome {
            self.score.record(verdict);
            self.current = None;
            info!(correct = verdict.correct, score = %self.score, "exercise validated");
        }
        Ok(outcome)
    }

    /// Submits the note at the given position on the neck.
    pub fn submit_position(
        &mut self,
        string_index: usize,
        fret: i32,
    ) -> Result<SubmitOutcome, Error> {
        let pitch_class = self.fretboard.pitch_class_at(string_index, fret)?;
        Ok(self.submit(pitch_class)?)
    }

    /// Submits the note with the given name (e.g. "C#" or "D♭").
    pub fn submit_name(&mut self, name: &str) -> Result<SubmitOutcome, Error> {
        let pitch_class: PitchClass = name.parse()?;
        Ok(self.submit(pitch_class)?)
    }
}
