use crate::error::WorkflowError;
use core::{convert::TryFrom, fmt};

/// Phases of the voting process, in the only order they may be visited.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[repr(u8)]
pub enum WorkflowStatus {
    RegisteringVoters = 0,
    ProposalsRegistrationStarted = 1,
    ProposalsRegistrationEnded = 2,
    VotingSessionStarted = 3,
    VotingSessionEnded = 4,
    VotesTallied = 5,
}

impl WorkflowStatus {
    /// The phase that follows this one, `None` once votes are tallied.
    pub fn next(self) -> Option<WorkflowStatus> {
        match self {
            WorkflowStatus::RegisteringVoters => Some(WorkflowStatus::ProposalsRegistrationStarted),
            WorkflowStatus::ProposalsRegistrationStarted => {
                Some(WorkflowStatus::ProposalsRegistrationEnded)
            }
            WorkflowStatus::ProposalsRegistrationEnded => Some(WorkflowStatus::VotingSessionStarted),
            WorkflowStatus::VotingSessionStarted => Some(WorkflowStatus::VotingSessionEnded),
            WorkflowStatus::VotingSessionEnded => Some(WorkflowStatus::VotesTallied),
            WorkflowStatus::VotesTallied => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Default for WorkflowStatus {
    fn default() -> Self {
        WorkflowStatus::RegisteringVoters
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStatus::RegisteringVoters => "RegisteringVoters",
            WorkflowStatus::ProposalsRegistrationStarted => "ProposalsRegistrationStarted",
            WorkflowStatus::ProposalsRegistrationEnded => "ProposalsRegistrationEnded",
            WorkflowStatus::VotingSessionStarted => "VotingSessionStarted",
            WorkflowStatus::VotingSessionEnded => "VotingSessionEnded",
            WorkflowStatus::VotesTallied => "VotesTallied",
        };
        f.write_str(name)
    }
}

impl TryFrom<u8> for WorkflowStatus {
    type Error = WorkflowError;

    fn try_from(orig: u8) -> Result<Self, Self::Error> {
        match orig {
            0 => Ok(WorkflowStatus::RegisteringVoters),
            1 => Ok(WorkflowStatus::ProposalsRegistrationStarted),
            2 => Ok(WorkflowStatus::ProposalsRegistrationEnded),
            3 => Ok(WorkflowStatus::VotingSessionStarted),
            4 => Ok(WorkflowStatus::VotingSessionEnded),
            5 => Ok(WorkflowStatus::VotesTallied),
            other => Err(WorkflowError::UnknownStatus(other)),
        }
    }
}
