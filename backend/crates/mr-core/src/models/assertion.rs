use crate::ProviderKind;

/// One-time identity claim produced by a successful provider verification.
///
/// Consumed exactly once by the identity resolver and then dropped; never
/// persisted. The email here is asserted by the provider, not re-verified.
#[derive(Debug, Clone)]
pub struct AuthAssertion {
    pub provider: ProviderKind,
    pub provider_user_id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}
