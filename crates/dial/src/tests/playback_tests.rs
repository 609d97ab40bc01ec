use std::sync::Arc;

use super::*;
use crate::solve;

const EXAMPLE: &str = "L68 L30 R48 L5 R60 L55 L1 L99 R14 L82";

fn playback(input: &str, speed: f32) -> Playback {
    Playback::new(Arc::new(solve(input)), SpeedSetting::new(speed))
}

fn run_until_settled(playback: &mut Playback, max_frames: usize) -> usize {
    for frame in 0..max_frames {
        let settled_at = playback.current_entry().position as f32;
        if !playback.is_playing() && playback.display_position() == settled_at {
            return frame;
        }
        playback.tick();
    }
    max_frames
}

#[test]
fn starts_paused_at_initial_entry() {
    let pb = playback(EXAMPLE, 0.3);
    assert_eq!(pb.state(), PlaybackState::Paused);
    assert_eq!(pb.current_step(), 0);
    assert_eq!(pb.display_position(), 50.0);
    assert_eq!(pb.progress_ratio(), 0.0);
    assert!(!pb.is_animating());
}

#[test]
fn paused_tick_does_not_advance() {
    let mut pb = playback(EXAMPLE, 0.5);
    for _ in 0..30 {
        pb.tick();
    }
    assert_eq!(pb.current_step(), 0);
}

#[test]
fn toggle_switches_between_playing_and_paused() {
    let mut pb = playback(EXAMPLE, 0.3);
    pb.toggle_play();
    assert_eq!(pb.state(), PlaybackState::Playing);
    pb.toggle_play();
    assert_eq!(pb.state(), PlaybackState::Paused);
}

#[test]
fn step_advances_one_and_stays_paused() {
    let mut pb = playback(EXAMPLE, 0.3);
    pb.toggle_play();
    pb.step();
    assert_eq!(pb.state(), PlaybackState::Paused);
    assert_eq!(pb.current_step(), 1);
    assert_eq!(pb.current_entry().label(), "L68");

    run_until_settled(&mut pb, 20);
    assert_eq!(pb.display_position(), 82.0);
    assert_eq!(pb.current_step(), 1);
}

#[test]
fn step_at_end_is_a_no_op() {
    let mut pb = playback("R50", 0.3);
    pb.step();
    pb.step();
    assert_eq!(pb.current_step(), 1);
    assert!(pb.is_finished());
}

#[test]
fn playing_auto_pauses_on_last_step() {
    let mut pb = playback(EXAMPLE, 0.0);
    pb.toggle_play();
    let frames = run_until_settled(&mut pb, 500);
    assert!(frames < 500, "playback never settled");
    assert_eq!(pb.state(), PlaybackState::Paused);
    assert_eq!(pb.current_step(), pb.last_step());
    assert_eq!(pb.display_position(), 32.0);
}

#[test]
fn slow_speed_advances_one_step_per_interpolation() {
    let mut pb = playback(EXAMPLE, 0.0);
    pb.toggle_play();
    pb.tick();
    assert_eq!(pb.current_step(), 1);
    // 0.1 per frame: the next step waits for roughly ten frames of interpolation.
    for _ in 0..8 {
        pb.tick();
        assert_eq!(pb.current_step(), 1);
    }
    for _ in 0..3 {
        pb.tick();
    }
    assert_eq!(pb.current_step(), 2);
}

#[test]
fn max_speed_renders_remaining_history_in_one_frame() {
    let mut pb = playback(EXAMPLE, 1.0);
    pb.toggle_play();
    pb.tick();
    assert_eq!(pb.current_step(), pb.last_step());
    assert_eq!(pb.state(), PlaybackState::Paused);
    assert_eq!(pb.display_position(), 32.0);
}

#[test]
fn toggle_at_end_stays_paused() {
    let mut pb = playback(EXAMPLE, 1.0);
    pb.seek(1.0);
    pb.toggle_play();
    assert_eq!(pb.state(), PlaybackState::Paused);
}

#[test]
fn reset_returns_to_start_and_pauses() {
    let mut pb = playback(EXAMPLE, 0.5);
    pb.toggle_play();
    for _ in 0..12 {
        pb.tick();
    }
    assert!(pb.current_step() > 0);
    pb.reset();
    assert_eq!(pb.state(), PlaybackState::Paused);
    assert_eq!(pb.current_step(), 0);
    assert_eq!(pb.display_position(), 50.0);
}

#[test]
fn seek_snaps_without_interpolation() {
    let mut pb = playback(EXAMPLE, 0.3);
    pb.seek(0.5);
    assert_eq!(pb.current_step(), 5);
    assert_eq!(pb.display_position(), 55.0);
    pb.tick();
    assert_eq!(pb.display_position(), 55.0);

    pb.seek(-3.0);
    assert_eq!(pb.current_step(), 0);
    pb.seek(7.0);
    assert_eq!(pb.current_step(), pb.last_step());
    pb.seek(f32::NAN);
    assert_eq!(pb.current_step(), 0);
}

#[test]
fn seek_keeps_play_state() {
    let mut pb = playback(EXAMPLE, 0.3);
    pb.toggle_play();
    pb.seek(0.2);
    assert!(pb.is_playing());
}

#[test]
fn zero_crossing_triggers_decaying_flash() {
    let mut pb = playback(EXAMPLE, 0.3);
    pb.step();
    assert_eq!(pb.flash(), 1.0);

    let mut previous = pb.flash();
    for _ in 0..10 {
        pb.tick();
        assert!(pb.flash() < previous);
        previous = pb.flash();
    }
    for _ in 0..200 {
        pb.tick();
    }
    assert_eq!(pb.flash(), 0.0);
    assert!(!pb.is_animating());
}

#[test]
fn step_without_crossing_does_not_flash() {
    let mut pb = playback("L5", 0.3);
    pb.step();
    assert_eq!(pb.flash(), 0.0);
}

#[test]
fn interpolation_takes_shorter_arc_across_wrap() {
    // 95 -> 5 should pass through 0, never through 50.
    let mut pb = Playback::new(
        Arc::new(crate::simulate_from(95, &crate::parse_rotations("R10"))),
        SpeedSetting::new(0.0),
    );
    pb.step();
    for _ in 0..11 {
        pb.tick();
        let pos = pb.display_position();
        assert!(pos >= 95.0 || pos <= 5.0, "took the long way: {pos}");
    }
    assert_eq!(pb.display_position(), 5.0);
}

#[test]
fn empty_history_is_playable() {
    let mut pb = playback("", 0.3);
    assert_eq!(pb.last_step(), 0);
    assert_eq!(pb.progress_ratio(), 0.0);
    pb.toggle_play();
    pb.tick();
    pb.step();
    pb.seek(1.0);
    assert_eq!(pb.current_step(), 0);
    assert!(!pb.is_playing());
}

#[test]
fn speed_curve_is_logarithmic() {
    assert_eq!(SpeedSetting::new(0.0).steps_per_frame(10), 1);
    assert_eq!(SpeedSetting::new(0.6).steps_per_frame(1000), 15);
    assert_eq!(SpeedSetting::new(0.94).steps_per_frame(1000), 75);
    assert_eq!(SpeedSetting::new(0.95).steps_per_frame(1000), 1000);

    assert_eq!(SpeedSetting::new(0.05).label(), "1x");
    assert_eq!(SpeedSetting::new(0.5).label(), "10x");
    assert_eq!(SpeedSetting::new(0.97).label(), "MAX");
}

#[test]
fn speed_setting_clamps_input() {
    assert_eq!(SpeedSetting::new(-1.0).value(), 0.0);
    assert_eq!(SpeedSetting::new(4.0).value(), 1.0);
    assert_eq!(SpeedSetting::new(f32::NAN), SpeedSetting::DEFAULT);
    assert_eq!(SpeedSetting::new(1.0).interpolation_increment(), 1.0);
}

#[test]
fn shortest_arc_wraps_both_directions() {
    assert_eq!(shortest_arc(95.0, 5.0), 10.0);
    assert_eq!(shortest_arc(5.0, 95.0), -10.0);
    assert_eq!(shortest_arc(10.0, 40.0), 30.0);
    assert_eq!(shortest_arc(0.0, 50.0), 50.0);
}

#[test]
fn ease_out_cubic_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert!(ease_out_cubic(0.5) > 0.5);
}
