#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlertState {
    Normal,
    Alerting,
}

/// Outcome of one evaluation of the alert state machine.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AlertEvent {
    ThresholdExceeded { recent_mb: u64, threshold_mb: u64 },
    StillExceeding { recent_mb: u64, threshold_mb: u64 },
    BackToNormal { recent_mb: u64, threshold_mb: u64 },
}

/// Two-state recent-traffic alert with hysteresis: entering the exceeding
/// condition fires once, repeats fire on every evaluation while it holds,
/// and recovery fires exactly once.
#[derive(Debug, Clone)]
pub struct TrafficAlert {
    state: AlertState,
    threshold_mb: u64,
}

impl TrafficAlert {
    pub fn new(threshold_mb: u64) -> Self {
        Self {
            state: AlertState::Normal,
            threshold_mb,
        }
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Feeds one recent-traffic measurement through the state machine.
    pub fn observe(&mut self, recent_mb: u64) -> Option<AlertEvent> {
        let threshold_mb = self.threshold_mb;

        if recent_mb >= threshold_mb {
            match self.state {
                AlertState::Normal => {
                    self.state = AlertState::Alerting;
                    Some(AlertEvent::ThresholdExceeded {
                        recent_mb,
                        threshold_mb,
                    })
                }
                AlertState::Alerting => Some(AlertEvent::StillExceeding {
                    recent_mb,
                    threshold_mb,
                }),
            }
        } else {
            match self.state {
                AlertState::Alerting => {
                    self.state = AlertState::Normal;
                    Some(AlertEvent::BackToNormal {
                        recent_mb,
                        threshold_mb,
                    })
                }
                AlertState::Normal => None,
            }
        }
    }
}
