use crate::stats::{AlertEvent, AlertState, TrafficAlert};

#[test]
fn stays_normal_below_threshold() {
    let mut alert = TrafficAlert::new(10);

    assert_eq!(alert.observe(0), None);
    assert_eq!(alert.observe(9), None);
    assert_eq!(alert.state(), AlertState::Normal);
}

#[test]
fn fires_once_on_entering_the_exceeding_condition() {
    let mut alert = TrafficAlert::new(10);

    // The threshold itself counts as exceeding.
    assert_eq!(
        alert.observe(10),
        Some(AlertEvent::ThresholdExceeded {
            recent_mb: 10,
            threshold_mb: 10
        })
    );
    assert_eq!(alert.state(), AlertState::Alerting);
}

#[test]
fn repeats_while_the_condition_persists() {
    let mut alert = TrafficAlert::new(1);

    alert.observe(953);

    assert_eq!(
        alert.observe(953),
        Some(AlertEvent::StillExceeding {
            recent_mb: 953,
            threshold_mb: 1
        })
    );
    assert_eq!(
        alert.observe(2),
        Some(AlertEvent::StillExceeding {
            recent_mb: 2,
            threshold_mb: 1
        })
    );
    assert_eq!(alert.state(), AlertState::Alerting);
}

#[test]
fn recovers_exactly_once() {
    let mut alert = TrafficAlert::new(1);

    alert.observe(953);

    assert_eq!(
        alert.observe(0),
        Some(AlertEvent::BackToNormal {
            recent_mb: 0,
            threshold_mb: 1
        })
    );

    // Quiet afterwards while traffic stays low.
    assert_eq!(alert.observe(0), None);
    assert_eq!(alert.observe(0), None);
    assert_eq!(alert.state(), AlertState::Normal);
}

#[test]
fn can_alert_again_after_recovery() {
    let mut alert = TrafficAlert::new(1);

    alert.observe(5);
    alert.observe(0);

    assert_eq!(
        alert.observe(7),
        Some(AlertEvent::ThresholdExceeded {
            recent_mb: 7,
            threshold_mb: 1
        })
    );
}
