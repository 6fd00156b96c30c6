use std::fmt;

/// Bootstrap lifecycle.
///
/// Moves forward only. A failure before `PipelineReady` jumps to `Closing`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Lifecycle {
    Uninitialized,
    SubsystemReady,
    WindowCreated,
    ContextLoaded,
    PipelineReady,
    Rendering,
    Closing,
    Terminated,
}

impl Lifecycle {
    /// Whether `self -> next` is a legal transition.
    pub fn can_advance_to(self, next: Lifecycle) -> bool {
        use Lifecycle::*;
        matches!(
            (self, next),
            (Uninitialized, SubsystemReady)
                | (SubsystemReady, WindowCreated)
                | (WindowCreated, ContextLoaded)
                | (ContextLoaded, PipelineReady)
                | (PipelineReady, Rendering)
                | (Closing, Terminated)
        ) || (next == Closing && self < Closing)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::Lifecycle::*;

    #[test]
    fn forward_path_is_legal() {
        let path = [
            Uninitialized,
            SubsystemReady,
            WindowCreated,
            ContextLoaded,
            PipelineReady,
            Rendering,
            Closing,
            Terminated,
        ];
        assert!(path.windows(2).all(|w| w[0].can_advance_to(w[1])));
    }

    #[test]
    fn any_live_state_may_close() {
        for s in [Uninitialized, SubsystemReady, WindowCreated, ContextLoaded, PipelineReady] {
            assert!(s.can_advance_to(Closing));
        }
    }

    #[test]
    fn no_reentry_after_closing() {
        assert!(!Closing.can_advance_to(Rendering));
        assert!(!Terminated.can_advance_to(SubsystemReady));
        assert!(!Terminated.can_advance_to(Closing));
        assert!(!WindowCreated.can_advance_to(PipelineReady));
    }
}
