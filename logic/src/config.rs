use crate::error::{WorkflowError, WorkflowResult};
use serde::{Deserialize, Serialize};

/// Optional limits applied while proposals are being registered.
///
/// Both limits are off by default; `Voting::new` enforces no cap.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub max_proposals: Option<usize>,
    #[serde(default)]
    pub max_description_len: Option<usize>, // bytes
}

impl WorkflowConfig {
    /// Parses a JSON document; missing fields leave the limit off.
    pub fn from_json_str(raw: &str) -> WorkflowResult<WorkflowConfig> {
        let config: WorkflowConfig = serde_json::from_str(raw)
            .map_err(|e| WorkflowError::InvalidConfig(format!("{}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WorkflowResult<()> {
        if self.max_proposals == Some(0) {
            return Err(WorkflowError::InvalidConfig(
                "max_proposals must be greater than zero".into(),
            ));
        }
        if self.max_description_len == Some(0) {
            return Err(WorkflowError::InvalidConfig(
                "max_description_len must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
