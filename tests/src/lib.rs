#[cfg(test)]
mod tests {
    use casper_types::account::AccountHash;
    use logic::{Role, Voting, WorkflowError, WorkflowEvent, WorkflowStatus};

    const OWNER: AccountHash = AccountHash::new([7u8; 32]);
    const VOTER_1: AccountHash = AccountHash::new([8u8; 32]);
    const VOTER_2: AccountHash = AccountHash::new([9u8; 32]);

    const PROPOSAL: &str = "Move the weekly sync to Thursday";
    const SECOND_PROPOSAL: &str = "Keep the weekly sync on Monday";

    fn deploy() -> Voting {
        Voting::new(OWNER)
    }

    #[test]
    fn should_register_a_voter() {
        let mut voting = deploy();
        voting.add_voter(OWNER, OWNER).unwrap();
        assert!(!voting.get_voter(OWNER, VOTER_1).unwrap().is_registered);

        voting.add_voter(OWNER, VOTER_1).unwrap();
        assert!(voting.get_voter(OWNER, VOTER_1).unwrap().is_registered);
    }

    #[test]
    fn should_change_the_workflow() {
        let mut voting = deploy();
        assert_eq!(voting.workflow_status(), WorkflowStatus::RegisteringVoters);

        voting.start_proposals_registering(OWNER).unwrap();
        assert_eq!(
            voting.workflow_status(),
            WorkflowStatus::ProposalsRegistrationStarted
        );
    }

    #[test]
    fn should_add_a_proposal_and_emit() {
        let mut voting = deploy();
        voting.add_voter(OWNER, OWNER).unwrap();
        voting.start_proposals_registering(OWNER).unwrap();
        voting.take_events();

        let proposal_id = voting.add_proposal(OWNER, PROPOSAL).unwrap();
        assert_eq!(proposal_id, 1);
        assert_eq!(
            voting.get_one_proposal(OWNER, 1).unwrap().description,
            PROPOSAL
        );
        assert_eq!(
            voting.take_events(),
            vec![WorkflowEvent::ProposalRegistered(1)]
        );
    }

    #[test]
    fn should_count_a_vote() {
        let mut voting = deploy();
        voting.add_voter(OWNER, OWNER).unwrap();
        voting.start_proposals_registering(OWNER).unwrap();
        voting.add_proposal(OWNER, PROPOSAL).unwrap();
        assert_eq!(voting.get_one_proposal(OWNER, 1).unwrap().vote_count, 0);

        voting.end_proposals_registering(OWNER).unwrap();
        voting.start_voting_session(OWNER).unwrap();
        voting.set_vote(OWNER, 1).unwrap();

        assert_eq!(voting.get_one_proposal(OWNER, 1).unwrap().vote_count, 1);
    }

    #[test]
    fn should_retrieve_the_winning_proposal() {
        let mut voting = deploy();
        voting.add_voter(OWNER, OWNER).unwrap();

        voting.start_proposals_registering(OWNER).unwrap();
        voting.add_proposal(OWNER, PROPOSAL).unwrap();
        voting.add_proposal(OWNER, SECOND_PROPOSAL).unwrap();
        voting.end_proposals_registering(OWNER).unwrap();

        voting.start_voting_session(OWNER).unwrap();
        voting.set_vote(OWNER, 1).unwrap();
        voting.end_voting_session(OWNER).unwrap();

        assert_eq!(voting.tally_votes(OWNER).unwrap(), 1);
        assert_eq!(voting.winning_proposal_id(), 1);
        assert_eq!(voting.workflow_status(), WorkflowStatus::VotesTallied);
    }

    #[test]
    fn should_not_vote_twice() {
        let mut voting = deploy();
        voting.add_voter(OWNER, OWNER).unwrap();

        voting.start_proposals_registering(OWNER).unwrap();
        voting.add_proposal(OWNER, PROPOSAL).unwrap();
        voting.end_proposals_registering(OWNER).unwrap();

        voting.start_voting_session(OWNER).unwrap();
        voting.set_vote(OWNER, 1).unwrap();

        let error = voting.set_vote(OWNER, 1).unwrap_err();
        assert_eq!(error, WorkflowError::AlreadyVoted);
        assert_eq!(error.to_string(), "You have already voted");
    }

    #[test]
    fn should_run_a_full_session_with_several_voters() {
        let mut voting = deploy();
        for voter in &[VOTER_1, VOTER_2] {
            voting.add_voter(OWNER, *voter).unwrap();
        }
        voting.start_proposals_registering(OWNER).unwrap();
        voting.add_proposal(VOTER_1, PROPOSAL).unwrap();
        voting.add_proposal(VOTER_2, SECOND_PROPOSAL).unwrap();

        // The administrator is not a voter unless registered.
        assert_eq!(
            voting.add_proposal(OWNER, "owner idea").unwrap_err(),
            WorkflowError::AccessDenied(Role::Voter)
        );

        voting.end_proposals_registering(OWNER).unwrap();
        voting.start_voting_session(OWNER).unwrap();
        voting.set_vote(VOTER_1, 2).unwrap();
        voting.set_vote(VOTER_2, 2).unwrap();
        voting.end_voting_session(OWNER).unwrap();
        voting.tally_votes(OWNER).unwrap();

        let winner = voting.winning_proposal().unwrap();
        assert_eq!(winner.description, SECOND_PROPOSAL);
        assert_eq!(winner.vote_count, 2);

        let statuses: Vec<(WorkflowStatus, WorkflowStatus)> = voting
            .events()
            .iter()
            .filter_map(|event| match event {
                WorkflowEvent::WorkflowStatusChange { previous, new } => Some((*previous, *new)),
                _ => None,
            })
            .collect();
        assert_eq!(statuses.len(), 5);
        assert_eq!(
            statuses.last(),
            Some(&(WorkflowStatus::VotingSessionEnded, WorkflowStatus::VotesTallied))
        );
    }

    #[test]
    fn should_resume_from_a_snapshot() {
        let mut voting = deploy();
        voting.add_voter(OWNER, VOTER_1).unwrap();
        voting.start_proposals_registering(OWNER).unwrap();
        voting.add_proposal(VOTER_1, PROPOSAL).unwrap();

        let mut resumed = Voting::deserialize(voting.serialize()).unwrap();
        assert!(resumed.events().is_empty());
        assert_eq!(resumed.proposal_count(), 1);

        resumed.add_proposal(VOTER_1, SECOND_PROPOSAL).unwrap();
        resumed.end_proposals_registering(OWNER).unwrap();
        resumed.start_voting_session(OWNER).unwrap();
        resumed.set_vote(VOTER_1, 2).unwrap();
        resumed.end_voting_session(OWNER).unwrap();
        assert_eq!(resumed.tally_votes(OWNER).unwrap(), 2);
    }
}
