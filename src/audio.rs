//! Sound cues.
//!
//! The game only ever plays two short clips, fire-and-forget.  Overlapping
//! triggers simply overlap.  Without the `audio` feature (or with `--mute`)
//! every cue goes to [`Silent`].

use std::path::Path;

use log::warn;

use crate::entities::GameEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Fire,
    EnemyDeath,
}

impl Cue {
    pub const ALL: [Cue; 2] = [Cue::Fire, Cue::EnemyDeath];

    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Fire => "gunshot.wav",
            Cue::EnemyDeath => "death.wav",
        }
    }

    /// Relative playback volume.  The gunshot is kept very quiet since it
    /// repeats six times a second.
    pub fn volume(self) -> f32 {
        match self {
            Cue::Fire => 0.015,
            Cue::EnemyDeath => 0.65,
        }
    }
}

/// Sound that goes with a game event, if any.
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::Fired => Some(Cue::Fire),
        GameEvent::EnemyKilled => Some(Cue::EnemyDeath),
        _ => None,
    }
}

pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Best available player: real output when the feature is built in and a
/// device opens, otherwise [`Silent`].
pub fn open_player(assets_dir: &Path, mute: bool) -> Box<dyn CuePlayer> {
    if mute {
        return Box::new(Silent);
    }

    #[cfg(feature = "audio")]
    {
        match rodio_player::RodioCuePlayer::open(assets_dir) {
            Ok(player) => return Box::new(player),
            Err(e) => warn!("Sound disabled: {}", e),
        }
    }
    #[cfg(not(feature = "audio"))]
    {
        warn!(
            "Built without the `audio` feature; cues from {:?} will not play",
            assets_dir
        );
    }

    Box::new(Silent)
}

#[cfg(feature = "audio")]
pub mod rodio_player {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    use log::{debug, warn};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::{Cue, CuePlayer};
    use crate::error::{GameError, Result};

    /// Output through the default device.  Clips are read into memory once
    /// and decoded fresh for every trigger.
    pub struct RodioCuePlayer {
        /// Dropping the stream silences the handle.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        clips: HashMap<Cue, Arc<[u8]>>,
    }

    impl RodioCuePlayer {
        pub fn open(assets_dir: &Path) -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| GameError::Audio(e.to_string()))?;

            let mut clips: HashMap<Cue, Arc<[u8]>> = HashMap::new();
            for cue in Cue::ALL {
                let path = assets_dir.join(cue.file_name());
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        debug!("Loaded {:?} ({} bytes)", path, bytes.len());
                        clips.insert(cue, Arc::from(bytes));
                    }
                    Err(e) => warn!("Missing sound {:?}: {}", path, e),
                }
            }

            Ok(RodioCuePlayer { _stream: stream, handle, clips })
        }
    }

    impl CuePlayer for RodioCuePlayer {
        fn play(&mut self, cue: Cue) {
            let Some(clip) = self.clips.get(&cue) else {
                return;
            };
            let sink = match Sink::try_new(&self.handle) {
                Ok(sink) => sink,
                Err(e) => {
                    warn!("No sink for {:?}: {}", cue, e);
                    return;
                }
            };
            match Decoder::new(Cursor::new(Arc::clone(clip))) {
                Ok(source) => {
                    sink.set_volume(cue.volume());
                    sink.append(source);
                    sink.detach();
                }
                Err(e) => warn!("Cannot decode {:?}: {}", cue.file_name(), e),
            }
        }
    }
}
