use serde::{Deserialize, Serialize};

/// Operator session restored from browser storage. The portal shell writes
/// this record at login; this client only reads and clears it.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct OperatorAuth {
    pub token: String,
    pub officer_name: String,
    #[serde(default)]
    pub officer_position: Option<String>,
}
