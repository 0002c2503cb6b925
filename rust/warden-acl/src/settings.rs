use serde::{Deserialize, Serialize};

/// Tunables for a [`Gatekeeper`](crate::Gatekeeper).
///
/// ```
/// use warden_acl::GatekeeperSettings;
///
/// let settings: GatekeeperSettings =
///     serde_json::from_str(r#"{ "deduplicate_subjects": true }"#).unwrap();
/// assert!(settings.deduplicate_subjects);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatekeeperSettings {
    /// Drop repeated subjects, keeping the first occurrence, before the
    /// subject set is handed to the engine. Off by default: resolvers'
    /// output is concatenated as is.
    pub deduplicate_subjects: bool,
}
