//! End-to-end tests through the real `SerialLink` adapter: bytes in on an
//! in-memory pipe, telemetry lines out.

use dualservo::adapters::serial::SerialLink;
use dualservo::app::service::ControllerService;
use dualservo::config::Profile;
use dualservo::control::{Angle, ControlMode, ServoChannel};
use dualservo::protocol::TelemetryFrame;

use super::mock_hw::{MockHardware, PipeTransport};

fn boot_with(profile: Profile) -> (ControllerService, MockHardware, SerialLink<PipeTransport>) {
    let config = profile.config();
    let mut link =
        SerialLink::new(PipeTransport::default()).with_bare_angles(config.bare_angle_channel);
    let mut svc = ControllerService::new(config);
    let mut hw = MockHardware::new(0, 1000);
    svc.start(0, &mut hw, &mut link);
    (svc, hw, link)
}

fn boot() -> (ControllerService, MockHardware, SerialLink<PipeTransport>) {
    boot_with(Profile::DualServo)
}

#[test]
fn command_split_across_reads_applies_once_complete() {
    let (mut svc, mut hw, mut link) = boot();

    link.transport_mut().push(b"S1:9");
    svc.tick(1, &mut hw, &mut link);
    assert_eq!(svc.channel(ServoChannel::S1).target(), Angle::clamped(0));

    link.transport_mut().push(b"0\r\n");
    svc.tick(2, &mut hw, &mut link);
    assert_eq!(svc.channel(ServoChannel::S1).target(), Angle::clamped(90));
    assert_eq!(svc.channel(ServoChannel::S1).mode(), ControlMode::Manual);
}

#[test]
fn all_pending_lines_drain_in_one_cycle() {
    let (mut svc, mut hw, mut link) = boot();

    link.transport_mut().push(b"S2:10\nS2:20\nS2:30\n");
    svc.tick(1, &mut hw, &mut link);
    assert_eq!(svc.channel(ServoChannel::S2).target(), Angle::clamped(30));
}

#[test]
fn garbage_and_overlong_lines_are_dropped() {
    let (mut svc, mut hw, mut link) = boot();

    let mut input = b"S1:".to_vec();
    input.extend(std::iter::repeat_n(b'9', 40));
    input.extend_from_slice(b"\nhello\nS2:45\n");
    link.transport_mut().push(&input);
    svc.tick(1, &mut hw, &mut link);

    assert_eq!(svc.channel(ServoChannel::S1).target(), Angle::clamped(0));
    assert_eq!(svc.channel(ServoChannel::S2).target(), Angle::clamped(45));
    assert_eq!(link.dropped_lines(), 1);
    assert_eq!(link.rejected_lines(), 1);
}

#[test]
fn bare_angle_is_ignored_on_the_dual_servo_board() {
    let (mut svc, mut hw, mut link) = boot();
    link.transport_mut().push(b"90\n");
    svc.tick(1, &mut hw, &mut link);
    assert_eq!(svc.channel(ServoChannel::S1).target(), Angle::clamped(0));
    assert_eq!(link.rejected_lines(), 1);
}

#[test]
fn motor_build_steps_to_a_bare_angle_every_ten_ms() {
    let (mut svc, mut hw, mut link) = boot_with(Profile::Motor);

    link.transport_mut().push(b"30\n");
    for now in 1..=300 {
        svc.tick(now, &mut hw, &mut link);
    }
    let s1 = svc.channel(ServoChannel::S1);
    assert_eq!(s1.current(), Angle::clamped(30));
    assert_eq!(s1.mode(), ControlMode::Manual);
    let writes = hw.servo_writes(ServoChannel::S1);
    assert_eq!(writes.len(), 31, "rest write plus 30 steps");
    assert_eq!(&writes[1..4], &[1, 2, 3]);

    // Prefixed commands still work on the same link.
    link.transport_mut().push(b"S2:4\n");
    svc.tick(301, &mut hw, &mut link);
    assert_eq!(svc.channel(ServoChannel::S2).target(), Angle::clamped(4));
}

#[test]
fn wire_carries_only_telemetry_lines() {
    let (mut svc, mut hw, mut link) = boot();
    hw.ldr = 321;

    link.transport_mut().push(b"S2:5\n");
    for now in 1..=400 {
        svc.tick(now, &mut hw, &mut link);
    }

    let lines = link.transport().lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    let frames: Vec<TelemetryFrame> = lines
        .iter()
        .filter_map(|l| TelemetryFrame::parse(l))
        .collect();
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|f| f.ldr == 321 && f.water == 1000));
    assert_eq!(frames[1].s2, Angle::clamped(5));
    assert_eq!(lines[1], "LDR:321,WATER:1000,S1:0,S2:5");
}
