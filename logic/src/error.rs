use crate::status::WorkflowStatus;
use core::fmt;
use thiserror::Error;

/// Identity class an operation is gated on.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Role {
    Administrator,
    Voter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Administrator => write!(f, "administrator"),
            Role::Voter => write!(f, "registered voter"),
        }
    }
}

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum WorkflowError {
    #[error("Access denied: caller is not the {0}")]
    AccessDenied(Role),

    #[error("Invalid phase: expected {expected}, current status is {actual}")]
    InvalidPhase {
        expected: WorkflowStatus,
        actual: WorkflowStatus,
    },

    #[error("Already registered")]
    AlreadyRegistered,

    #[error("You have already voted")]
    AlreadyVoted,

    #[error("Proposal description must not be empty")]
    EmptyProposal,

    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),

    #[error("Proposal limit of {0} reached")]
    ProposalLimitReached(usize),

    #[error("Proposal description is {len} bytes, limit is {max}")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("Unknown workflow status code: {0}")]
    UnknownStatus(u8),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
