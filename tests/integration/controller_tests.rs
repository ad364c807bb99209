//! Integration tests for the ControllerService → ports pipeline.
//!
//! These run on the host (x86_64) and drive the full loop (sample, filter,
//! classify, derive, commands, step, telemetry) against mock adapters.

use dualservo::app::events::AppEvent;
use dualservo::app::service::ControllerService;
use dualservo::config::Profile;
use dualservo::control::{Angle, ControlMode, ServoChannel, WetDryState};

use super::mock_hw::{MockHardware, MockLink};

const S1: ServoChannel = ServoChannel::S1;
const S2: ServoChannel = ServoChannel::S2;

fn deg(d: u8) -> Angle {
    Angle::clamped(d)
}

fn boot(profile: Profile, ldr: u16, water: u16) -> (ControllerService, MockHardware, MockLink) {
    let mut svc = ControllerService::new(profile.config());
    let mut hw = MockHardware::new(ldr, water);
    let mut link = MockLink::new();
    svc.start(0, &mut hw, &mut link);
    (svc, hw, link)
}

fn mode_changes(link: &MockLink) -> Vec<(ServoChannel, ControlMode)> {
    link.events
        .iter()
        .filter_map(|e| match *e {
            AppEvent::ModeChanged { channel, mode } => Some((channel, mode)),
            _ => None,
        })
        .collect()
}

fn wet_dry_changes(link: &MockLink) -> Vec<WetDryState> {
    link.events
        .iter()
        .filter_map(|e| match *e {
            AppEvent::WetDryChanged { to, .. } => Some(to),
            _ => None,
        })
        .collect()
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn angle_command_sets_target_and_latches_override() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 1000);

    link.send("S1:90");
    svc.tick(1, &mut hw, &mut link);

    let s1 = svc.channel(S1);
    assert_eq!(s1.target(), deg(90));
    assert_eq!(s1.mode(), ControlMode::Manual);
    assert!(s1.is_manual_override());
    assert_eq!(mode_changes(&link), vec![(S1, ControlMode::Manual)]);

    // Sensor flips to wet: the latched target holds.
    hw.water = 0;
    for now in 2..=10 {
        svc.tick(now, &mut hw, &mut link);
    }
    assert_eq!(svc.wet_dry(), WetDryState::Wet);
    assert_eq!(svc.channel(S1).target(), deg(90));
}

#[test]
fn out_of_range_command_changes_nothing() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 1000);

    for line in ["S1:200", "S1:-1", "S3:10", "s1:90", "S1:9O"] {
        link.send(line);
    }
    svc.tick(1, &mut hw, &mut link);

    let s1 = svc.channel(S1);
    assert_eq!(s1.target(), deg(0));
    assert_eq!(s1.mode(), ControlMode::Auto);
    assert!(
        !link
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::TargetSet { .. } | AppEvent::ModeChanged { .. }))
    );
}

#[test]
fn auto_keyword_rederives_on_the_next_cycle() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 500);

    svc.tick(1, &mut hw, &mut link);
    assert_eq!(svc.wet_dry(), WetDryState::Wet);
    assert_eq!(svc.channel(S1).target(), deg(45));

    link.send("S1:90");
    svc.tick(2, &mut hw, &mut link);
    svc.tick(3, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).target(), deg(90));

    link.send("S1AUTO");
    svc.tick(4, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).mode(), ControlMode::Auto);
    assert_eq!(svc.channel(S1).target(), deg(90), "takes effect next cycle");

    svc.tick(5, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).target(), deg(45));
    assert_eq!(
        mode_changes(&link),
        vec![(S1, ControlMode::Manual), (S1, ControlMode::Auto)]
    );
}

#[test]
fn auto_keyword_without_override_is_silent() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 1000);
    link.send("S1AUTO");
    link.send("S2AUTO");
    svc.tick(1, &mut hw, &mut link);
    assert!(mode_changes(&link).is_empty());
    assert_eq!(svc.channel(S2).mode(), ControlMode::Manual);
}

#[test]
fn latchless_command_holds_for_one_cycle() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServoLatchless, 0, 1000);
    hw.clear();

    link.send("S1:120");
    svc.tick(15, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).target(), deg(120));
    assert_eq!(svc.channel(S1).mode(), ControlMode::Auto);

    svc.tick(30, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).target(), deg(0));
    assert_eq!(hw.servo_writes(S1), vec![1, 0]);
}

#[test]
fn command_intake_disabled_for_hand_spray() {
    let (mut svc, mut hw, mut link) = boot(Profile::HandSpray, 1000, 1000);

    link.send("S2:90");
    link.send("S1:90");
    svc.tick(1, &mut hw, &mut link);
    assert_eq!(svc.channel(S2).target(), deg(0));
    assert_eq!(svc.channel(S1).target(), deg(0));

    hw.water = 0;
    for now in 2..=5 {
        svc.tick(now, &mut hw, &mut link);
    }
    assert_eq!(svc.channel(S1).target(), deg(45));
    assert!(hw.indicator_writes().is_empty());
}

// ── Stepping ──────────────────────────────────────────────────

#[test]
fn stepping_converges_one_degree_per_interval() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 1000);
    hw.clear();

    link.send("S2:30");
    for k in 1..=40 {
        svc.tick(15 * k, &mut hw, &mut link);
    }

    assert_eq!(hw.servo_writes(S2), (1..=30).collect::<Vec<u8>>());
    assert!(hw.servo_writes(S1).is_empty(), "S1 already on target");
    assert!(svc.channel(S2).at_target());
}

#[test]
fn late_tick_moves_only_one_degree() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 1000);
    hw.clear();

    link.send("S2:30");
    for now in 1..15 {
        svc.tick(now, &mut hw, &mut link);
    }
    assert!(hw.servo_writes(S2).is_empty());

    svc.tick(15, &mut hw, &mut link);
    svc.tick(500, &mut hw, &mut link);
    assert_eq!(hw.servo_writes(S2), vec![1, 2]);
}

#[test]
fn start_commands_rest_angles() {
    let (_svc, hw, link) = boot(Profile::DualServo, 0, 1000);
    assert_eq!(hw.servo_writes(S1), vec![0]);
    assert_eq!(hw.servo_writes(S2), vec![0]);
    assert_eq!(link.events, vec![AppEvent::Started(WetDryState::Dry)]);
}

// ── Filter & hysteresis ───────────────────────────────────────

#[test]
fn filter_lags_a_step_change() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 1000);

    hw.water = 0;
    svc.tick(1, &mut hw, &mut link);
    let f1 = svc.filtered_water().unwrap_or(f32::NAN);
    assert!((f1 - 800.0).abs() < 0.01, "got {f1}");
    assert_eq!(svc.wet_dry(), WetDryState::Dry);

    svc.tick(2, &mut hw, &mut link);
    let f2 = svc.filtered_water().unwrap_or(f32::NAN);
    assert!((f2 - 640.0).abs() < 0.01, "got {f2}");
    assert_eq!(svc.wet_dry(), WetDryState::Wet);
    assert_eq!(wet_dry_changes(&link), vec![WetDryState::Wet]);
}

#[test]
fn dead_band_never_chatters() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 1000);
    let mut now = 0;
    let mut run = |svc: &mut ControllerService, hw: &mut MockHardware, link: &mut MockLink, n| {
        for _ in 0..n {
            now += 15;
            svc.tick(now, hw, link);
        }
    };

    hw.water = 800;
    run(&mut svc, &mut hw, &mut link, 200);
    hw.water = 781;
    run(&mut svc, &mut hw, &mut link, 200);
    assert!(wet_dry_changes(&link).is_empty());

    hw.water = 0;
    run(&mut svc, &mut hw, &mut link, 50);
    hw.water = 819;
    run(&mut svc, &mut hw, &mut link, 200);
    assert_eq!(wet_dry_changes(&link), vec![WetDryState::Wet]);
    assert_eq!(svc.channel(S1).target(), deg(45));
}

#[test]
fn rain_cover_opens_and_closes_immediately() {
    let (mut svc, mut hw, mut link) = boot(Profile::RainCover, 0, 900);
    for k in 1..=100 {
        svc.tick(10 * k, &mut hw, &mut link);
    }
    assert_eq!(svc.channel(S1).current(), deg(90));

    hw.water = 799;
    svc.tick(1001, &mut hw, &mut link);
    assert_eq!(svc.wet_dry(), WetDryState::Wet);
    assert_eq!(svc.channel(S1).target(), deg(0));
}

#[test]
fn rain_cover_reopens_at_exactly_the_threshold() {
    let (mut svc, mut hw, mut link) = boot(Profile::RainCover, 0, 900);

    hw.water = 700;
    svc.tick(1, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).target(), deg(0));

    hw.water = 800;
    svc.tick(2, &mut hw, &mut link);
    assert_eq!(svc.wet_dry(), WetDryState::Dry);
    assert_eq!(svc.channel(S1).target(), deg(90));
    assert_eq!(
        wet_dry_changes(&link),
        vec![WetDryState::Wet, WetDryState::Dry]
    );
}

#[test]
fn light_door_follows_the_ldr() {
    let (mut svc, mut hw, mut link) = boot(Profile::LightDoor, 900, 0);

    // Water reading is irrelevant here; the LDR drives the door.
    svc.tick(1, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).target(), deg(0));
    assert_eq!(hw.indicator_writes(), vec![false]);

    hw.ldr = 500;
    svc.tick(2, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).target(), deg(180));
    assert_eq!(hw.indicator_writes(), vec![false, true]);

    hw.ldr = 501;
    svc.tick(3, &mut hw, &mut link);
    assert_eq!(svc.channel(S1).target(), deg(0));
    assert_eq!(hw.indicator_writes(), vec![false, true, false]);
}

// ── Indicator ─────────────────────────────────────────────────

#[test]
fn indicator_follows_light_threshold() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 501, 1000);
    svc.tick(1, &mut hw, &mut link);
    svc.tick(2, &mut hw, &mut link);
    hw.ldr = 500;
    svc.tick(3, &mut hw, &mut link);
    assert_eq!(hw.indicator_writes(), vec![true, false]);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_reports_raw_readings_and_current_angles() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 600, 750);

    for k in 1..=60 {
        svc.tick(15 * k, &mut hw, &mut link);
    }

    let frames = link.telemetry();
    let s1: Vec<u8> = frames.iter().map(|f| f.s1.degrees()).collect();
    assert_eq!(s1, vec![14, 28, 42, 45]);
    assert_eq!(
        frames.last().map(|f| f.to_line().as_str().to_owned()),
        Some("LDR:600,WATER:750,S1:45,S2:0\n".to_owned())
    );
}

#[test]
fn telemetry_cadence_is_independent_of_stepping() {
    let (mut svc, mut hw, mut link) = boot(Profile::DualServo, 0, 1000);
    for now in 1..=1000 {
        svc.tick(now, &mut hw, &mut link);
    }
    assert_eq!(link.telemetry().len(), 5);
    assert_eq!(svc.tick_count(), 1000);
}
