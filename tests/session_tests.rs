//! End-to-end tests that drive a full training session through the public API.

mod common;

use std::time::Duration;

use anyhow::Result;
use fretwise::{
    data::{
        DisplayMode, TrainerOptions, TrainerOptionsBuilder, ViewMode,
        music::{PitchSet, notes::PitchClass, scales::Mode},
    },
    error::{Error, InvalidStateError, RangeError},
    exercise::{ExerciseKind, SubmitOutcome},
    fretboard::Tuning,
    load_options,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use common::init_session;

/// Verifies that the stimulus of every exercise is played through the player and that answering
/// by fretboard position scores the session.
#[tokio::test(start_paused = true)]
async fn answer_by_position() -> Result<()> {
    let (mut session, player) = init_session(TrainerOptions::default(), 11);

    for _ in 0..10 {
        player.clear();
        session.start(ExerciseKind::FindNote).await?;
        let heard = player.pitch_classes();
        assert_eq!(heard.len(), 1);

        // Answer with the highest position of the note on the neck.
        let positions = session.fretboard().positions_of(heard[0]);
        let (string_index, fret) = *positions.last().unwrap();
        let outcome = session.submit_position(string_index, fret as i32)?;
        assert!(matches!(outcome, SubmitOutcome::Validated(ref verdict) if verdict.correct));
    }
    assert_eq!(session.score().to_string(), "Correct: 10 | Incorrect: 0");
    Ok(())
}

/// Verifies an echo-motif exercise answered from what was heard, in the order it was heard.
#[tokio::test(start_paused = true)]
async fn echo_heard_motif() -> Result<()> {
    let options = TrainerOptionsBuilder::default()
        .key(PitchClass::A)
        .mode(Mode::Minor)
        .exercise_kind(ExerciseKind::EchoMotif)
        .build()?;
    let (mut session, player) = init_session(options, 5);

    let prompt = session.start_exercise().await?.unwrap();
    let heard = player.pitch_classes();
    assert_eq!(prompt.num_notes, heard.len());
    assert_eq!(
        prompt.text,
        format!("Repeat the {} notes you just heard", heard.len())
    );

    // Notes start every 500 ms.
    let tones = player.tones();
    for pair in tones.windows(2) {
        assert_eq!(
            pair[1].started_at - pair[0].started_at,
            Duration::from_millis(500)
        );
    }

    let mut reversed = heard.clone();
    reversed.reverse();
    let mut last = None;
    for note in &reversed {
        last = Some(session.submit(*note)?);
    }
    // A reversed motif is only correct if it reads the same both ways.
    let SubmitOutcome::Validated(verdict) = last.unwrap() else {
        panic!("motif answer not validated");
    };
    assert_eq!(verdict.correct, heard == reversed);
    assert_eq!(verdict.expected, heard);
    assert_eq!(session.score().total(), 1);
    Ok(())
}

/// Verifies the find-degree prompt names the degree of the note that was played.
#[tokio::test(start_paused = true)]
async fn find_degree_prompt() -> Result<()> {
    let options = TrainerOptionsBuilder::default()
        .key(PitchClass::E)
        .build()?;
    let (mut session, player) = init_session(options, 21);
    for _ in 0..10 {
        player.clear();
        let prompt = session.start(ExerciseKind::FindDegree).await?.unwrap();
        let heard = player.pitch_classes()[0];
        let degree = session.scale().position_of(heard);
        assert_eq!(prompt.degree, degree);
        assert_eq!(
            prompt.text,
            format!("Listen and find degree {}", degree.unwrap())
        );
        session.submit(heard)?;
    }
    assert_eq!(session.score().correct(), 10);
    Ok(())
}

/// Verifies errors surfaced to the caller during a session.
#[tokio::test(start_paused = true)]
async fn session_errors() -> Result<()> {
    let (mut session, _) = init_session(TrainerOptions::default(), 0);
    assert!(matches!(
        session.submit(PitchClass::C),
        Err(InvalidStateError::NoActiveExercise)
    ));

    session.start(ExerciseKind::FindNote).await?;
    assert!(matches!(
        session.submit_position(6, 0),
        Err(Error::Range(RangeError::StringIndex { .. }))
    ));
    assert!(matches!(
        session.submit_position(0, -1),
        Err(Error::Range(RangeError::NegativeFret(-1)))
    ));
    // Invalid positions do not consume the exercise.
    assert!(session.current_exercise().is_some());
    assert!(session.set_option("chordType", "sus4").is_err());
    assert!(session.set_option("tempo", "fast").is_err());
    Ok(())
}

/// Verifies the view of a custom tuning.
#[tokio::test]
async fn custom_tuning_view() -> Result<()> {
    let ukulele = Tuning::new(
        vec![PitchClass::A, PitchClass::E, PitchClass::C, PitchClass::G],
        vec![0, 0, 0, 0],
    )?;
    let options = TrainerOptionsBuilder::default()
        .tuning(ukulele)
        .max_fret(12)
        .display_mode(DisplayMode::Degree)
        .view_mode(ViewMode::Scale)
        .build()?;
    let (session, player) = init_session(options, 0);

    let view = session.view();
    assert_eq!(view.strings.len(), 4);
    assert_eq!(view.legend.len(), 13);
    // Third string, open: C is the root of C major.
    assert!(view.cell(2, 0).unwrap().is_root);
    assert_eq!(view.cell(1, 0).unwrap().label, "3");

    let frequency = session.audition(0, 0)?;
    assert_eq!(frequency, 440.0);
    assert_eq!(player.tones()[0].frequency, 440.0);
    Ok(())
}

/// Verifies a session can be started from the options saved in a working directory.
#[tokio::test(start_paused = true)]
async fn session_from_saved_options() -> Result<()> {
    let dir = tempdir()?;
    let options = load_options(dir.path())?;
    let (mut session, _) = init_session(options, 9);
    let prompt = session.start_exercise().await?.unwrap();
    assert_eq!(prompt.kind, ExerciseKind::FindNote);
    assert!(session.abandon());
    assert_eq!(session.score().total(), 0);
    Ok(())
}
