use crate::{
    config::WorkflowConfig,
    custom_types::{ProposalSerialized, VotersSerialized, VotingSerialized},
    error::{Role, WorkflowError, WorkflowResult},
    event::WorkflowEvent,
    proposal::Proposal,
    status::WorkflowStatus,
    voter::Voter,
};
use core::convert::TryFrom;
use std::collections::BTreeMap;
use types::account::AccountHash;

/// Single-administrator voting process.
///
/// Every mutating call takes the caller identity explicitly and either
/// applies fully or returns an error with the state left untouched.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Voting {
    administrator: AccountHash,
    status: WorkflowStatus,
    winning_proposal_id: u64,
    voters: BTreeMap<AccountHash, Voter>,
    proposals: Vec<Proposal>,
    config: WorkflowConfig,
    events: Vec<WorkflowEvent>,
}

impl Voting {
    pub fn new(administrator: AccountHash) -> Voting {
        let voting = Voting {
            administrator,
            status: WorkflowStatus::RegisteringVoters,
            winning_proposal_id: 0,
            voters: BTreeMap::new(),
            proposals: Vec::new(),
            config: WorkflowConfig::default(),
            events: Vec::new(),
        };
        tracing::info!(administrator = %administrator, "voting workflow created");
        voting
    }

    pub fn with_config(
        administrator: AccountHash,
        config: WorkflowConfig,
    ) -> WorkflowResult<Voting> {
        config.validate()?;
        let mut voting = Voting::new(administrator);
        voting.config = config;
        Ok(voting)
    }

    // ===== Voter registration =====

    pub fn add_voter(&mut self, caller: AccountHash, address: AccountHash) -> WorkflowResult<()> {
        self.ensure_can_add_voter(caller, address)
            .map_err(|e| rejected("add_voter", caller, e))?;
        self.voters.insert(address, Voter::registered());
        tracing::debug!(voter = %address, total = self.voters.len(), "voter registered");
        self.emit(WorkflowEvent::VoterRegistered(address));
        Ok(())
    }

    fn ensure_can_add_voter(&self, caller: AccountHash, address: AccountHash) -> WorkflowResult<()> {
        self.only_administrator(caller)?;
        self.require_status(WorkflowStatus::RegisteringVoters)?;
        if self.voter(address).is_registered {
            return Err(WorkflowError::AlreadyRegistered);
        }
        Ok(())
    }

    // ===== Proposals =====

    /// Registers a proposal and returns its id.
    pub fn add_proposal(&mut self, caller: AccountHash, description: &str) -> WorkflowResult<u64> {
        self.ensure_can_add_proposal(caller, description)
            .map_err(|e| rejected("add_proposal", caller, e))?;
        self.proposals.push(Proposal::new(description.to_owned()));
        let proposal_id = self.proposals.len() as u64;
        tracing::debug!(proposal_id, proposer = %caller, "proposal registered");
        self.emit(WorkflowEvent::ProposalRegistered(proposal_id));
        Ok(proposal_id)
    }

    fn ensure_can_add_proposal(&self, caller: AccountHash, description: &str) -> WorkflowResult<()> {
        self.only_voter(caller)?;
        self.require_status(WorkflowStatus::ProposalsRegistrationStarted)?;
        if description.is_empty() {
            return Err(WorkflowError::EmptyProposal);
        }
        if let Some(max) = self.config.max_description_len {
            if description.len() > max {
                return Err(WorkflowError::DescriptionTooLong {
                    len: description.len(),
                    max,
                });
            }
        }
        if let Some(max) = self.config.max_proposals {
            if self.proposals.len() >= max {
                return Err(WorkflowError::ProposalLimitReached(max));
            }
        }
        Ok(())
    }

    // ===== Votes =====

    pub fn set_vote(&mut self, caller: AccountHash, proposal_id: u64) -> WorkflowResult<()> {
        let index = self
            .ensure_can_vote(caller, proposal_id)
            .map_err(|e| rejected("set_vote", caller, e))?;
        self.proposals[index].vote_count += 1;
        let voter = self.voters.entry(caller).or_default();
        voter.has_voted = true;
        voter.voted_proposal_id = proposal_id;
        tracing::debug!(voter = %caller, proposal_id, "vote cast");
        self.emit(WorkflowEvent::Voted {
            voter: caller,
            proposal_id,
        });
        Ok(())
    }

    // Returns the position of the target proposal in storage.
    fn ensure_can_vote(&self, caller: AccountHash, proposal_id: u64) -> WorkflowResult<usize> {
        self.only_voter(caller)?;
        self.require_status(WorkflowStatus::VotingSessionStarted)?;
        if self.voter(caller).has_voted {
            return Err(WorkflowError::AlreadyVoted);
        }
        self.proposal_index(proposal_id)
    }

    // ===== Phase transitions =====

    pub fn start_proposals_registering(&mut self, caller: AccountHash) -> WorkflowResult<()> {
        self.advance(caller, WorkflowStatus::RegisteringVoters)
    }

    pub fn end_proposals_registering(&mut self, caller: AccountHash) -> WorkflowResult<()> {
        self.advance(caller, WorkflowStatus::ProposalsRegistrationStarted)
    }

    pub fn start_voting_session(&mut self, caller: AccountHash) -> WorkflowResult<()> {
        self.advance(caller, WorkflowStatus::ProposalsRegistrationEnded)
    }

    pub fn end_voting_session(&mut self, caller: AccountHash) -> WorkflowResult<()> {
        self.advance(caller, WorkflowStatus::VotingSessionStarted)
    }

    /// Closes the process and records the winner.
    ///
    /// Proposals are scanned in ascending id order and the leader only changes
    /// on a strictly greater count, so the lowest id wins a tie. When no vote
    /// was cast the winning id stays 0.
    pub fn tally_votes(&mut self, caller: AccountHash) -> WorkflowResult<u64> {
        self.advance(caller, WorkflowStatus::VotingSessionEnded)?;
        self.winning_proposal_id = self.leading_proposal_id();
        tracing::info!(
            winning_proposal_id = self.winning_proposal_id,
            proposals = self.proposals.len(),
            "votes tallied"
        );
        Ok(self.winning_proposal_id)
    }

    fn advance(&mut self, caller: AccountHash, from: WorkflowStatus) -> WorkflowResult<()> {
        let to = self
            .ensure_can_advance(caller, from)
            .map_err(|e| rejected("advance_workflow", caller, e))?;
        self.status = to;
        tracing::info!(previous = %from, new = %to, "workflow status changed");
        self.emit(WorkflowEvent::WorkflowStatusChange {
            previous: from,
            new: to,
        });
        Ok(())
    }

    fn ensure_can_advance(
        &self,
        caller: AccountHash,
        from: WorkflowStatus,
    ) -> WorkflowResult<WorkflowStatus> {
        self.only_administrator(caller)?;
        self.require_status(from)?;
        from.next().ok_or(WorkflowError::InvalidPhase {
            expected: from,
            actual: self.status,
        })
    }

    fn leading_proposal_id(&self) -> u64 {
        let mut winning_id = 0;
        let mut winning_count = 0;
        for (id, proposal) in self.proposals() {
            if proposal.vote_count > winning_count {
                winning_id = id;
                winning_count = proposal.vote_count;
            }
        }
        winning_id
    }

    // ===== Read accessors =====

    pub fn get_voter(&self, caller: AccountHash, address: AccountHash) -> WorkflowResult<Voter> {
        self.only_voter(caller)?;
        Ok(self.voter(address))
    }

    pub fn get_one_proposal(&self, caller: AccountHash, proposal_id: u64) -> WorkflowResult<&Proposal> {
        self.only_voter(caller)?;
        let index = self.proposal_index(proposal_id)?;
        Ok(&self.proposals[index])
    }

    pub fn workflow_status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn winning_proposal_id(&self) -> u64 {
        self.winning_proposal_id
    }

    /// `None` until tallied, or when the tally found no votes.
    pub fn winning_proposal(&self) -> Option<&Proposal> {
        self.proposal_index(self.winning_proposal_id)
            .ok()
            .map(|index| &self.proposals[index])
    }

    pub fn administrator(&self) -> AccountHash {
        self.administrator
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Proposals with their ids, ascending.
    pub fn proposals(&self) -> impl Iterator<Item = (u64, &Proposal)> + '_ {
        self.proposals
            .iter()
            .enumerate()
            .map(|(index, proposal)| (index as u64 + 1, proposal))
    }

    // ===== Events =====

    pub fn events(&self) -> &[WorkflowEvent] {
        &self.events
    }

    /// Drains the notification log, oldest first.
    pub fn take_events(&mut self) -> Vec<WorkflowEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: WorkflowEvent) {
        self.events.push(event);
    }

    // ===== Guards =====

    fn only_administrator(&self, caller: AccountHash) -> WorkflowResult<()> {
        if caller != self.administrator {
            return Err(WorkflowError::AccessDenied(Role::Administrator));
        }
        Ok(())
    }

    fn only_voter(&self, caller: AccountHash) -> WorkflowResult<()> {
        if !self.voter(caller).is_registered {
            return Err(WorkflowError::AccessDenied(Role::Voter));
        }
        Ok(())
    }

    fn require_status(&self, expected: WorkflowStatus) -> WorkflowResult<()> {
        if self.status != expected {
            return Err(WorkflowError::InvalidPhase {
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    fn voter(&self, address: AccountHash) -> Voter {
        self.voters.get(&address).copied().unwrap_or_default()
    }

    fn proposal_index(&self, proposal_id: u64) -> WorkflowResult<usize> {
        if proposal_id == 0 || proposal_id > self.proposals.len() as u64 {
            return Err(WorkflowError::ProposalNotFound(proposal_id));
        }
        Ok((proposal_id - 1) as usize)
    }

    // ===== Snapshot =====

    pub fn serialize(&self) -> VotingSerialized {
        (
            (
                self.administrator.value(),
                self.status.code(),
                self.winning_proposal_id,
            ),
            self.serialize_voters(),
            self.serialize_proposals(),
            (
                self.config.max_proposals.map(|max| max as u64),
                self.config.max_description_len.map(|max| max as u64),
            ),
        )
    }

    fn serialize_voters(&self) -> VotersSerialized {
        let mut voters_output = BTreeMap::new();
        for (key, voter) in self.voters.iter() {
            voters_output.insert(
                key.value(),
                (voter.is_registered, voter.has_voted, voter.voted_proposal_id),
            );
        }
        voters_output
    }

    fn serialize_proposals(&self) -> Vec<ProposalSerialized> {
        self.proposals
            .iter()
            .map(|proposal| (proposal.description.clone(), proposal.vote_count))
            .collect()
    }

    /// Rebuilds a workflow from a snapshot. The event log starts empty.
    ///
    /// The snapshot must describe a state reachable through the public
    /// operations, otherwise `InvalidSnapshot` is returned.
    pub fn deserialize(serialized_voting: VotingSerialized) -> WorkflowResult<Voting> {
        let ((administrator, status_code, winning_proposal_id), voters, proposals, config) =
            serialized_voting;
        let config = WorkflowConfig {
            max_proposals: deserialize_limit(config.0)?,
            max_description_len: deserialize_limit(config.1)?,
        };
        config.validate()?;
        let voting = Voting {
            administrator: AccountHash::new(administrator),
            status: WorkflowStatus::try_from(status_code)?,
            winning_proposal_id,
            voters: Voting::deserialize_voters(voters),
            proposals: proposals
                .into_iter()
                .map(|(description, vote_count)| Proposal {
                    description,
                    vote_count,
                })
                .collect(),
            config,
            events: Vec::new(),
        };
        voting.check_snapshot()?;
        Ok(voting)
    }

    fn check_snapshot(&self) -> WorkflowResult<()> {
        if self.status < WorkflowStatus::ProposalsRegistrationStarted && !self.proposals.is_empty() {
            return Err(invalid_snapshot("proposals registered before registration opened"));
        }
        if let Some(max) = self.config.max_proposals {
            if self.proposals.len() > max {
                return Err(invalid_snapshot(format!(
                    "{} proposals exceed the limit of {}",
                    self.proposals.len(),
                    max
                )));
            }
        }
        for (id, proposal) in self.proposals() {
            if proposal.description.is_empty() {
                return Err(invalid_snapshot(format!("proposal {} has no description", id)));
            }
            if let Some(max) = self.config.max_description_len {
                if proposal.description.len() > max {
                    return Err(invalid_snapshot(format!(
                        "proposal {} description exceeds {} bytes",
                        id, max
                    )));
                }
            }
        }

        let mut ballots = vec![0u64; self.proposals.len()];
        for (address, voter) in self.voters.iter() {
            if !voter.is_registered {
                return Err(invalid_snapshot(format!("voter {} is not registered", address)));
            }
            if !voter.has_voted {
                if voter.voted_proposal_id != 0 {
                    return Err(invalid_snapshot(format!(
                        "voter {} has a proposal id without a vote",
                        address
                    )));
                }
                continue;
            }
            if self.status < WorkflowStatus::VotingSessionStarted {
                return Err(invalid_snapshot(format!(
                    "voter {} voted before the voting session",
                    address
                )));
            }
            let index = self.proposal_index(voter.voted_proposal_id).map_err(|_| {
                invalid_snapshot(format!(
                    "voter {} voted for unknown proposal {}",
                    address, voter.voted_proposal_id
                ))
            })?;
            ballots[index] += 1;
        }
        for ((id, proposal), ballots) in self.proposals().zip(ballots.iter()) {
            if proposal.vote_count != *ballots {
                return Err(invalid_snapshot(format!(
                    "proposal {} counts {} votes but {} voters chose it",
                    id, proposal.vote_count, ballots
                )));
            }
        }

        let expected_winner = if self.status == WorkflowStatus::VotesTallied {
            self.leading_proposal_id()
        } else {
            0
        };
        if self.winning_proposal_id != expected_winner {
            return Err(invalid_snapshot(format!(
                "winning proposal {} does not match the tally ({}) at status {}",
                self.winning_proposal_id, expected_winner, self.status
            )));
        }
        Ok(())
    }

    fn deserialize_voters(voters_serialized: VotersSerialized) -> BTreeMap<AccountHash, Voter> {
        let mut deserialized_voters: BTreeMap<AccountHash, Voter> = BTreeMap::new();
        for (key, voter) in voters_serialized {
            deserialized_voters.insert(
                AccountHash::new(key),
                Voter {
                    is_registered: voter.0,
                    has_voted: voter.1,
                    voted_proposal_id: voter.2,
                },
            );
        }
        deserialized_voters
    }
}

fn deserialize_limit(limit: Option<u64>) -> WorkflowResult<Option<usize>> {
    limit
        .map(|max| {
            usize::try_from(max)
                .map_err(|_| invalid_snapshot(format!("limit {} does not fit in usize", max)))
        })
        .transpose()
}

fn invalid_snapshot(reason: impl Into<String>) -> WorkflowError {
    WorkflowError::InvalidSnapshot(reason.into())
}

fn rejected(operation: &'static str, caller: AccountHash, error: WorkflowError) -> WorkflowError {
    tracing::warn!(operation, caller = %caller, error = %error, "call rejected");
    error
}
