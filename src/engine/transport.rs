/// Transport state machine
///
/// Transitions are idempotent: starting a running transport or stopping a
/// stopped one does nothing and reports `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Default)]
pub struct Transport {
    state: TransportState,
    /// Bumped on every start; identifies the current runtime epoch
    epoch: u64,
}

impl Transport {
    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TransportState::Running
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn begin(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = TransportState::Running;
        self.epoch += 1;
        true
    }

    pub fn end(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = TransportState::Stopped;
        true
    }
}
