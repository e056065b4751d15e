/// Where one detector activation currently stands. Exactly one phase is
/// active at a time; transitions only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    ModelsLoading,
    ModelsFailed,
    Sampling { seconds_remaining: u32 },
    Undetermined,
    Result { final_age: u32 },
}

/// Emitted by the session task; the UI folds these into a `SessionPhase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ModelsFailed,
    SamplingStarted { seconds_remaining: u32 },
    CountdownTick { seconds_remaining: u32 },
    SampleRecorded { age: u32 },
    Finished { final_age: Option<u32> },
}

impl SessionPhase {
    pub fn apply(self, event: SessionEvent) -> Self {
        match (self, event) {
            (SessionPhase::ModelsLoading, SessionEvent::ModelsFailed) => SessionPhase::ModelsFailed,
            (SessionPhase::ModelsLoading, SessionEvent::SamplingStarted { seconds_remaining }) => {
                SessionPhase::Sampling { seconds_remaining }
            }
            (SessionPhase::Sampling { .. }, SessionEvent::CountdownTick { seconds_remaining }) => {
                SessionPhase::Sampling { seconds_remaining }
            }
            (phase @ SessionPhase::Sampling { .. }, SessionEvent::SampleRecorded { .. }) => phase,
            (SessionPhase::Sampling { .. }, SessionEvent::Finished { final_age }) => {
                match final_age {
                    Some(final_age) => SessionPhase::Result { final_age },
                    None => SessionPhase::Undetermined,
                }
            }
            // Terminal phases ignore stragglers.
            (phase, _) => phase,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionPhase::ModelsFailed | SessionPhase::Undetermined | SessionPhase::Result { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_walks_forward_to_result() {
        let mut phase = SessionPhase::ModelsLoading;
        phase = phase.apply(SessionEvent::SamplingStarted {
            seconds_remaining: 5,
        });
        phase = phase.apply(SessionEvent::SampleRecorded { age: 30 });
        phase = phase.apply(SessionEvent::CountdownTick {
            seconds_remaining: 4,
        });
        assert_eq!(
            phase,
            SessionPhase::Sampling {
                seconds_remaining: 4
            }
        );
        phase = phase.apply(SessionEvent::Finished {
            final_age: Some(31),
        });
        assert_eq!(phase, SessionPhase::Result { final_age: 31 });
        assert!(phase.is_terminal());
    }

    #[test]
    fn empty_session_ends_undetermined() {
        let phase = SessionPhase::Sampling {
            seconds_remaining: 0,
        }
        .apply(SessionEvent::Finished { final_age: None });
        assert_eq!(phase, SessionPhase::Undetermined);
    }

    #[test]
    fn load_failure_is_terminal() {
        let phase = SessionPhase::ModelsLoading.apply(SessionEvent::ModelsFailed);
        assert_eq!(phase, SessionPhase::ModelsFailed);
        assert!(phase.is_terminal());
        // Nothing moves a failed session forward.
        let stuck = phase.apply(SessionEvent::SamplingStarted {
            seconds_remaining: 5,
        });
        assert_eq!(stuck, SessionPhase::ModelsFailed);
    }
}
