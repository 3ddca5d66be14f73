//! Domain events accepted by the gate and the gate's lifecycle states.

use std::fmt;

use super::message::MessageType;

/// Kind of domain event a host submits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A unit reporting its position
    PositionReport,
}

impl EventKind {
    /// Message type the renderer receives for this event.
    pub fn message_type(&self) -> MessageType {
        match self {
            EventKind::PositionReport => MessageType::PositionReport,
        }
    }
}

/// Lifecycle of a gate. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateState {
    Unbound,
    Bound,
    Closed,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateState::Unbound => "unbound",
            GateState::Bound => "bound",
            GateState::Closed => "closed",
        };
        f.write_str(s)
    }
}
