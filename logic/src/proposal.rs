/// A registered option. Ids are 1-based; id 0 never refers to a proposal.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(description: String) -> Proposal {
        Proposal {
            description,
            vote_count: 0,
        }
    }
}
