//! Small fixed values the server layer needs and no port currently supplies.

/// Branch label attached to every refresh run.
///
/// No VCS/branch-negotiation port is wired up to this server, so every
/// refresh is attributed to a single fixed branch rather than the editor's
/// actual checkout.
pub fn default_branch() -> String {
    "main".to_string()
}
