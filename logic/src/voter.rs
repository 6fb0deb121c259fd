/// Ballot state of one identity. Unknown identities read as `Voter::default()`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    pub voted_proposal_id: u64,
}

impl Voter {
    pub fn registered() -> Voter {
        Voter {
            is_registered: true,
            has_voted: false,
            voted_proposal_id: 0,
        }
    }
}
