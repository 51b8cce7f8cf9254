use std::sync::Arc;

use upload_core::TransferControl;
use upload_sync::Credential;

const TOKEN_VAR: &str = "UPLOAD_MONITOR_TOKEN";

/// Per-login capabilities handed to everything that talks to the server or
/// the transfer engine. Created at start-up, dropped at logout/exit.
#[derive(Clone)]
pub struct SessionContext {
    credential: Credential,
    transfers: Arc<dyn TransferControl>,
}

impl SessionContext {
    pub fn new(credential: Credential, transfers: Arc<dyn TransferControl>) -> Self {
        Self {
            credential,
            transfers,
        }
    }

    /// Picks the credential issued by the login flow from the environment.
    pub fn from_env(transfers: Arc<dyn TransferControl>) -> Self {
        let credential = std::env::var(TOKEN_VAR)
            .map(Credential::new)
            .unwrap_or_else(|_| Credential::anonymous());
        Self::new(credential, transfers)
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn transfers(&self) -> &dyn TransferControl {
        self.transfers.as_ref()
    }
}
