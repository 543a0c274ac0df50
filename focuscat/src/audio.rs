//! Meow playback.
//!
//! Sounds are picked at random from the assets folder. Files whose name
//! starts with `surprise` are kept apart and only play once in a while.
//! Nothing here ever fails loudly: a missing device or a broken file just
//! means no sound.

use rand::seq::SliceRandom;
use rand::Rng;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const SOUND_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3", "flac"];
pub const SURPRISE_PREFIX: &str = "surprise";
/// Chance that a click plays a surprise sound, when one exists.
pub const SURPRISE_CHANCE: f64 = 1.0 / 50.0;
pub const DEFAULT_VOLUME: f32 = 0.85;

/// The sound files available for a click.
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    regular: Vec<PathBuf>,
    surprise: Vec<PathBuf>,
}

impl SoundBank {
    /// Collect playable files from `dir`. A missing folder gives an empty bank.
    pub fn scan(dir: &Path) -> Self {
        let read_dir = match std::fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                log::info!("no meow sounds in {}: {}", dir.display(), e);
                return Self::default();
            }
        };

        let mut paths: Vec<PathBuf> = read_dir
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_sound_file(path))
            .collect();
        paths.sort();

        let bank = Self::from_paths(paths);
        log::info!(
            "loaded {} meow sounds ({} surprise) from {}",
            bank.len(),
            bank.surprise.len(),
            dir.display()
        );
        bank
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        let (surprise, regular): (Vec<PathBuf>, Vec<PathBuf>) =
            paths.into_iter().partition(|p| is_surprise(p));
        Self { regular, surprise }
    }

    pub fn len(&self) -> usize {
        self.regular.len() + self.surprise.len()
    }

    /// Choose a sound: uniform over the regular pool, with a rare surprise.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&Path> {
        let use_surprise = !self.surprise.is_empty()
            && (self.regular.is_empty() || rng.gen_bool(SURPRISE_CHANCE));
        let pool = if use_surprise { &self.surprise } else { &self.regular };
        pool.choose(rng).map(PathBuf::as_path)
    }
}

fn is_sound_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map_or(false, |ext| SOUND_EXTENSIONS.contains(&ext.as_str()))
}

fn is_surprise(path: &Path) -> bool {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_lowercase().starts_with(SURPRISE_PREFIX))
        .unwrap_or(false)
}

/// What happened on a click, for the status bar.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    Played(PathBuf),
    Muted,
    NoSounds,
    Failed,
}

pub struct MeowPlayer {
    bank: SoundBank,
    volume: f32,
    enabled: bool,
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
}

impl MeowPlayer {
    pub fn new(bank: SoundBank, volume: f32, enabled: bool) -> Self {
        let (stream, handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(handle)),
            Err(e) => {
                log::warn!("no audio output device: {}", e);
                (None, None)
            }
        };
        Self {
            bank,
            volume: volume.clamp(0.0, 1.0),
            enabled,
            _stream: stream,
            stream_handle: handle,
        }
    }

    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Play one random meow without waiting for it to finish.
    pub fn play_random(&self) -> PlayOutcome {
        if !self.enabled {
            return PlayOutcome::Muted;
        }
        let path = match self.bank.pick(&mut rand::thread_rng()) {
            Some(path) => path.to_path_buf(),
            None => return PlayOutcome::NoSounds,
        };
        match self.play_file(&path) {
            Ok(()) => PlayOutcome::Played(path),
            Err(e) => {
                log::debug!("could not play {}: {}", path.display(), e);
                PlayOutcome::Failed
            }
        }
    }

    fn play_file(&self, path: &Path) -> Result<(), String> {
        let handle = self.stream_handle.as_ref().ok_or("no output device")?;
        let file = File::open(path).map_err(|e| format!("file error: {}", e))?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| format!("decode error: {}", e))?;
        let sink = Sink::try_new(handle).map_err(|e| format!("audio error: {}", e))?;
        sink.set_volume(self.volume);
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank(names: &[&str]) -> SoundBank {
        SoundBank::from_paths(names.iter().map(PathBuf::from).collect())
    }

    #[test]
    fn test_empty_bank_picks_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(SoundBank::default().pick(&mut rng).is_none());
    }

    #[test]
    fn test_surprise_files_are_separated() {
        let b = bank(&["meow1.wav", "Surprise_purr.wav", "meow2.ogg"]);
        assert_eq!(b.len(), 3);
        assert_eq!(b.regular.len(), 2);
        assert_eq!(b.surprise, vec![PathBuf::from("Surprise_purr.wav")]);
    }

    #[test]
    fn test_surprise_is_rare() {
        let b = bank(&["meow1.wav", "meow2.wav", "meow3.wav", "surprise.wav"]);
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 5000;
        let surprises = (0..draws)
            .filter(|_| b.pick(&mut rng) == Some(Path::new("surprise.wav")))
            .count();
        assert!(surprises > 0, "surprise never played");
        assert!(surprises < draws / 10, "surprise too common: {}", surprises);
    }

    #[test]
    fn test_regular_pick_is_spread() {
        let b = bank(&["a.wav", "b.wav", "c.wav"]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            match b.pick(&mut rng).and_then(|p| p.to_str()) {
                Some("a.wav") => counts[0] += 1,
                Some("b.wav") => counts[1] += 1,
                Some("c.wav") => counts[2] += 1,
                other => panic!("unexpected pick {:?}", other),
            }
        }
        assert!(counts.iter().all(|&c| c > 800), "counts: {:?}", counts);
    }

    #[test]
    fn test_only_surprise_still_plays() {
        let b = bank(&["surprise.wav"]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(b.pick(&mut rng), Some(Path::new("surprise.wav")));
    }

    #[test]
    fn test_scan_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["meow.wav", "purr.MP3", "notes.txt", "surprise_hiss.ogg"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let b = SoundBank::scan(dir.path());
        assert_eq!(b.len(), 3);
        assert_eq!(b.surprise.len(), 1);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SoundBank::scan(&dir.path().join("nope")).len(), 0);
    }
}
