//! Per-kind lifecycle wiring for credentials

use super::kind::{get_kind, CredentialKind};
use super::model::Credential;
use crate::resource::{
    self, CallInfo, Callee, CreateResource, Diagnostics, Outcome, Source, Transport,
    UpdateResource, Updater,
};

/// Drives the lifecycle operations for one credential kind
#[derive(Debug, Clone)]
pub struct CredentialResource {
    kind: &'static CredentialKind,
    rci: CallInfo,
}

impl CredentialResource {
    pub fn new(kind: &'static CredentialKind) -> Self {
        Self {
            kind,
            rci: kind.call_info(),
        }
    }

    /// Look up the kind by its type name ("aws", "net", ...)
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        get_kind(type_name).map(Self::new)
    }

    pub fn kind(&self) -> &'static CredentialKind {
        self.kind
    }

    pub fn call_info(&self, source: Source, callee: Callee) -> CallInfo {
        self.rci.with(source, callee)
    }

    /// A fresh, empty credential of this kind
    pub fn new_credential(&self) -> Credential {
        Credential::new(self.kind)
    }

    /// Create the credential. Without an organization the credential is
    /// owned by the authenticated user.
    pub async fn create(
        &self,
        transport: Option<&dyn Transport>,
        credential: &mut Credential,
    ) -> Outcome {
        let rci = self.call_info(Source::Resource, Callee::Create);

        if !credential.organization.is_known() {
            if let Some(transport) = transport {
                match transport.current_user().await {
                    Ok(user) => {
                        tracing::debug!(rci = %rci, user = user.id, "Defaulting owner to current user");
                        credential.set_owner(Some(user.id));
                    }
                    Err(err) => {
                        let mut diags = Diagnostics::new();
                        diags.add_error("failed to retrieve current user", err.to_string());
                        return Outcome::failed(diags, err);
                    }
                }
            }
        }
        credential.set_credential_type_id(self.kind.credential_type_id);

        let data: &mut dyn CreateResource = credential;
        resource::create(transport, &rci, Some(data)).await
    }

    /// Refresh `credential` from the API
    pub async fn read(
        &self,
        transport: Option<&dyn Transport>,
        source: Source,
        id: i64,
        credential: &mut Credential,
    ) -> Outcome {
        let rci = self.call_info(source, Callee::Read);
        let updater: &mut (dyn Updater + Send) = credential;
        resource::read(transport, &rci, id, Some(updater)).await
    }

    pub async fn update(
        &self,
        transport: Option<&dyn Transport>,
        credential: &mut Credential,
    ) -> Outcome {
        let rci = self.call_info(Source::Resource, Callee::Update);
        credential.set_credential_type_id(self.kind.credential_type_id);

        let data: &mut dyn UpdateResource = credential;
        resource::update(transport, &rci, Some(data)).await
    }

    pub async fn delete(&self, transport: Option<&dyn Transport>, credential: &Credential) -> Outcome {
        let rci = self.call_info(Source::Resource, Callee::Delete);
        resource::delete(transport, &rci, credential).await
    }
}
