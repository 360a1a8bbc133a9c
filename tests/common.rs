use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use fretwise::{
    data::{TrainerOptions, music::notes::PitchClass},
    player::TonePlayer,
    session::Session,
};
use rand::{SeedableRng, rngs::StdRng};

/// A tone played by the test player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency: f64,
    pub duration: Duration,
    pub started_at: tokio::time::Instant,
}

/// A tone player that stores every tone it plays so tests can inspect them.
#[derive(Clone, Debug, Default)]
pub struct TestPlayer {
    tones: Arc<Mutex<Vec<Tone>>>,
}

impl TestPlayer {
    /// Returns every tone played so far.
    pub fn tones(&self) -> Vec<Tone> {
        self.tones.lock().unwrap().clone()
    }

    /// Removes the tones played so far.
    #[allow(dead_code)]
    pub fn clear(&self) {
        self.tones.lock().unwrap().clear();
    }

    /// Returns the pitch classes of the tones played so far, assuming they were played in the
    /// reference octave.
    #[allow(dead_code)]
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.tones()
            .iter()
            .filter_map(|tone| {
                PitchClass::ALL
                    .into_iter()
                    .find(|pc| (pc.reference_frequency() - tone.frequency).abs() < 1e-9)
            })
            .collect()
    }
}

impl TonePlayer for TestPlayer {
    fn play_frequency(&self, frequency: f64, duration: Duration) {
        self.tones.lock().unwrap().push(Tone {
            frequency,
            duration,
            started_at: tokio::time::Instant::now(),
        });
    }
}

/// Creates a session with a fixed seed and returns it along with a handle to its player.
pub fn init_session(options: TrainerOptions, seed: u64) -> (Session<TestPlayer>, TestPlayer) {
    let player = TestPlayer::default();
    let session = Session::with_rng(options, player.clone(), StdRng::seed_from_u64(seed)).unwrap();
    (session, player)
}
