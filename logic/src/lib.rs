mod config;
mod error;
mod event;
mod proposal;
mod status;
mod voter;
pub mod custom_types;
pub mod voting;

pub use config::WorkflowConfig;
pub use error::{Role, WorkflowError, WorkflowResult};
pub use event::WorkflowEvent;
pub use proposal::Proposal;
pub use status::WorkflowStatus;
pub use voter::Voter;
pub use voting::Voting;
