//! Workflow state machine for an import session.
//!
//! The transition function is pure and total over the table it encodes;
//! everything with a side effect lives in the session, which executes the
//! [`Effect`] a transition names. Guard conditions (parse result, validator
//! verdicts, commit outcome) are evaluated by the session and arrive here
//! already encoded in the event.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Workflow phase of an import session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    #[default]
    Upload,
    Mapping,
    Preview,
    Importing,
    Completed,
    Cancelled,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Upload => "upload",
            WorkflowState::Mapping => "mapping",
            WorkflowState::Preview => "preview",
            WorkflowState::Importing => "importing",
            WorkflowState::Completed => "completed",
            WorkflowState::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled sessions accept no further events.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Completed | WorkflowState::Cancelled)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome-carrying event fed to [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    ParseSucceeded,
    ParseFailed,
    MappingEdited,
    ValidationPassed,
    ValidationFailed,
    BackToMapping,
    CommitStarted,
    CommitSettled,
    CommitFailed,
    CancelRequested,
}

/// Side effect the session must execute alongside a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the auto-mapper over the freshly parsed headers.
    ApplyAutoMap,
    /// Drop data-validation errors on the way back to mapping.
    ClearDataErrors,
    /// Keep the whole-batch failure message for the caller.
    RecordBatchError,
    /// Forget document, mapping and error lists.
    DiscardSession,
}

/// One resolved edge of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: WorkflowState,
    pub effect: Option<Effect>,
}

/// Pure transition table.
///
/// `None` means the event has no edge in the given state and the call must
/// be refused. Cancellation during `Importing` is not a missing edge but an
/// explicit self-loop: the request is acknowledged and refused so that no
/// session disappears while creations are outstanding.
pub fn transition(state: WorkflowState, event: WorkflowEvent) -> Option<Transition> {
    match (state, event) {
        (WorkflowState::Upload, WorkflowEvent::ParseSucceeded) => Some(Transition {
            next: WorkflowState::Mapping,
            effect: Some(Effect::ApplyAutoMap),
        }),
        (WorkflowState::Upload, WorkflowEvent::ParseFailed) => Some(Transition {
            next: WorkflowState::Upload,
            effect: None,
        }),
        (WorkflowState::Mapping, WorkflowEvent::MappingEdited) => Some(Transition {
            next: WorkflowState::Mapping,
            effect: None,
        }),
        (WorkflowState::Mapping, WorkflowEvent::ValidationPassed) => Some(Transition {
            next: WorkflowState::Preview,
            effect: None,
        }),
        (WorkflowState::Mapping, WorkflowEvent::ValidationFailed) => Some(Transition {
            next: WorkflowState::Mapping,
            effect: None,
        }),
        (WorkflowState::Preview, WorkflowEvent::BackToMapping) => Some(Transition {
            next: WorkflowState::Mapping,
            effect: Some(Effect::ClearDataErrors),
        }),
        (WorkflowState::Preview, WorkflowEvent::CommitStarted) => Some(Transition {
            next: WorkflowState::Importing,
            effect: None,
        }),
        (WorkflowState::Importing, WorkflowEvent::CommitSettled) => Some(Transition {
            next: WorkflowState::Completed,
            effect: None,
        }),
        (WorkflowState::Importing, WorkflowEvent::CommitFailed) => Some(Transition {
            next: WorkflowState::Preview,
            effect: Some(Effect::RecordBatchError),
        }),
        (
            WorkflowState::Upload | WorkflowState::Mapping | WorkflowState::Preview,
            WorkflowEvent::CancelRequested,
        ) => Some(Transition {
            next: WorkflowState::Cancelled,
            effect: Some(Effect::DiscardSession),
        }),
        (WorkflowState::Importing, WorkflowEvent::CancelRequested) => Some(Transition {
            next: WorkflowState::Importing,
            effect: None,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_edges() {
        let steps = [
            (WorkflowState::Upload, WorkflowEvent::ParseSucceeded, WorkflowState::Mapping),
            (WorkflowState::Mapping, WorkflowEvent::ValidationPassed, WorkflowState::Preview),
            (WorkflowState::Preview, WorkflowEvent::CommitStarted, WorkflowState::Importing),
            (WorkflowState::Importing, WorkflowEvent::CommitSettled, WorkflowState::Completed),
        ];
        for (state, event, expected) in steps {
            let step = transition(state, event).expect("edge exists");
            assert_eq!(step.next, expected);
        }
    }

    #[test]
    fn failure_edges_stay_or_fall_back() {
        assert_eq!(
            transition(WorkflowState::Upload, WorkflowEvent::ParseFailed)
                .expect("edge")
                .next,
            WorkflowState::Upload
        );
        assert_eq!(
            transition(WorkflowState::Mapping, WorkflowEvent::ValidationFailed)
                .expect("edge")
                .next,
            WorkflowState::Mapping
        );
        let fallback = transition(WorkflowState::Importing, WorkflowEvent::CommitFailed)
            .expect("edge");
        assert_eq!(fallback.next, WorkflowState::Preview);
        assert_eq!(fallback.effect, Some(Effect::RecordBatchError));
    }

    #[test]
    fn back_from_preview_clears_data_errors() {
        let step = transition(WorkflowState::Preview, WorkflowEvent::BackToMapping)
            .expect("edge");
        assert_eq!(step.next, WorkflowState::Mapping);
        assert_eq!(step.effect, Some(Effect::ClearDataErrors));
    }

    #[test]
    fn cancel_is_refused_while_importing() {
        let step = transition(WorkflowState::Importing, WorkflowEvent::CancelRequested)
            .expect("self-loop, not a missing edge");
        assert_eq!(step.next, WorkflowState::Importing);
        assert_eq!(step.effect, None);
    }

    #[test]
    fn cancel_discards_from_the_editable_states() {
        for state in [
            WorkflowState::Upload,
            WorkflowState::Mapping,
            WorkflowState::Preview,
        ] {
            let step = transition(state, WorkflowEvent::CancelRequested).expect("edge");
            assert_eq!(step.next, WorkflowState::Cancelled);
            assert_eq!(step.effect, Some(Effect::DiscardSession));
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        let events = [
            WorkflowEvent::ParseSucceeded,
            WorkflowEvent::MappingEdited,
            WorkflowEvent::ValidationPassed,
            WorkflowEvent::CommitStarted,
            WorkflowEvent::CancelRequested,
        ];
        for state in [WorkflowState::Completed, WorkflowState::Cancelled] {
            assert!(state.is_terminal());
            for event in events {
                assert_eq!(transition(state, event), None);
            }
        }
    }

    #[test]
    fn events_out_of_phase_have_no_edge() {
        assert_eq!(
            transition(WorkflowState::Upload, WorkflowEvent::CommitStarted),
            None
        );
        assert_eq!(
            transition(WorkflowState::Mapping, WorkflowEvent::CommitSettled),
            None
        );
        assert_eq!(
            transition(WorkflowState::Preview, WorkflowEvent::ParseSucceeded),
            None
        );
        assert_eq!(
            transition(WorkflowState::Importing, WorkflowEvent::MappingEdited),
            None
        );
    }
}
