use crate::models::auth::OperatorAuth;
use crate::utils::{load_from_storage, remove_from_storage};

/// Storage key written by the portal shell at login
const OPERATOR_STORAGE_KEY: &str = "nexus_operator";

/// Restore the signed-in officer from browser storage. Token issuance is
/// the portal's job; this client only consumes what the shell stored.
pub fn load_operator() -> Option<OperatorAuth> {
    let operator = load_from_storage::<OperatorAuth>(OPERATOR_STORAGE_KEY)?;
    if operator.token.trim().is_empty() {
        log::warn!("⚠️ Stored operator session has an empty token, ignoring it");
        return None;
    }
    log::info!("💾 Operator session restored: {}", operator.officer_name);
    Some(operator)
}

/// Drop the stored operator session (e.g. after the backend rejects the
/// token). The portal shell handles the actual re-login.
pub fn clear_operator() -> Result<(), String> {
    remove_from_storage(OPERATOR_STORAGE_KEY)
}
