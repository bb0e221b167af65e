use crate::entities::{AccountRecord, CredentialVerifier};

/// Compares the presented password with the stored one as plain text.
///
/// Matches how existing account snapshots store secrets. A hashing verifier
/// can replace it without changes to the stores.
pub struct PlaintextCredentialVerifier;

impl CredentialVerifier for PlaintextCredentialVerifier {
    fn verify(&self, account: &AccountRecord, presented: &str) -> bool {
        account.secret() == presented
    }
}
