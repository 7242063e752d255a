use std::path::Path;

use street_shooter::audio::*;
use street_shooter::entities::GameEvent;

#[test]
fn cues_follow_events() {
    assert_eq!(cue_for(&GameEvent::Fired), Some(Cue::Fire));
    assert_eq!(cue_for(&GameEvent::EnemyKilled), Some(Cue::EnemyDeath));
    assert_eq!(cue_for(&GameEvent::ScoreChanged(1)), None);
    assert_eq!(cue_for(&GameEvent::HighScoreBeaten(1)), None);
    assert_eq!(cue_for(&GameEvent::Breach), None);
}

#[test]
fn cue_volumes_and_files() {
    assert_eq!(Cue::Fire.volume(), 0.015);
    assert_eq!(Cue::EnemyDeath.volume(), 0.65);
    assert_eq!(Cue::Fire.file_name(), "gunshot.wav");
    assert_eq!(Cue::EnemyDeath.file_name(), "death.wav");
}

#[test]
fn every_cue_has_its_own_clip() {
    assert_eq!(Cue::ALL.len(), 2);
    assert_ne!(Cue::ALL[0].file_name(), Cue::ALL[1].file_name());
}

#[test]
fn muted_player_accepts_every_cue() {
    let mut player = open_player(Path::new("no-such-dir"), true);
    for cue in Cue::ALL {
        player.play(cue);
    }
}
