use crate::status::WorkflowStatus;
use types::account::AccountHash;

/// Notifications emitted after each successful mutation.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum WorkflowEvent {
    VoterRegistered(AccountHash),
    WorkflowStatusChange {
        previous: WorkflowStatus,
        new: WorkflowStatus,
    },
    ProposalRegistered(u64),
    Voted {
        voter: AccountHash,
        proposal_id: u64,
    },
}
