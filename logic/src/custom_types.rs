use std::collections::BTreeMap;

// description, vote count
pub type ProposalSerialized = (String, u64);

// is_registered, has_voted, voted_proposal_id
pub type VoterSerialized = (bool, bool, u64);

pub type VotersSerialized = BTreeMap<[u8; 32], VoterSerialized>;

// max_proposals, max_description_len, None when unlimited
pub type ConfigSerialized = (Option<u64>, Option<u64>);

pub type VotingSerialized = (
    // 0
    // administrator, status code, winning proposal id
    ([u8; 32], u8, u64),
    // 1
    // voters
    VotersSerialized,
    // 2
    // proposals, index 0 holds proposal id 1
    Vec<ProposalSerialized>,
    // 3
    ConfigSerialized,
);
