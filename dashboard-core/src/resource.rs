//! Resource descriptors: which route to fetch, how to recognize its success
//! payload, and how writes are reconciled.
//!
//! Every dashboard manager is a [`Resource`] value handed to the generic
//! synchronizer; there is no per-resource code path beyond these constructors.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::discriminate::{is_id_list, is_named_object};
use crate::state::WriteBackMode;
use crate::types::{GuildId, GuildProfile, GuildSummary, OptionCategory};

pub const GUILD_PROFILE_PATH: &str = "/api/guild-data";
pub const GUILD_COLLECTION_PATH: &str = "/api/guilds";
pub const GUILD_OPTIONS_PREFIX: &str = "/api/options/guild/";

/// Describes one remote resource whose payload decodes into `T`.
pub struct Resource<T> {
    label: &'static str,
    path: String,
    mode: WriteBackMode,
    accepts: fn(&Value) -> bool,
    escalate_unauthorized: bool,
    identity: Option<GuildId>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Resource<T> {
    /// A resource fetched with `GET path` and written with `POST path`.
    pub fn new(
        label: &'static str,
        path: impl Into<String>,
        accepts: fn(&Value) -> bool,
        mode: WriteBackMode,
    ) -> Self {
        Self {
            label,
            path: path.into(),
            mode,
            accepts,
            escalate_unauthorized: false,
            identity: None,
            _payload: PhantomData,
        }
    }

    /// Fire the unauthorized hook when the server answers with
    /// [`UNAUTHORIZED_CODE`](crate::state::UNAUTHORIZED_CODE).
    pub fn with_unauthorized_escalation(mut self) -> Self {
        self.escalate_unauthorized = true;
        self
    }

    /// Bind the descriptor to the guild it was built for.
    pub fn with_identity(mut self, identity: GuildId) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> WriteBackMode {
        self.mode
    }

    pub fn predicate(&self) -> fn(&Value) -> bool {
        self.accepts
    }

    pub fn escalates_unauthorized(&self) -> bool {
        self.escalate_unauthorized
    }

    pub fn identity(&self) -> Option<&GuildId> {
        self.identity.as_ref()
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            path: self.path.clone(),
            mode: self.mode,
            accepts: self.accepts,
            escalate_unauthorized: self.escalate_unauthorized,
            identity: self.identity.clone(),
            _payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("label", &self.label)
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("escalate_unauthorized", &self.escalate_unauthorized)
            .field("identity", &self.identity)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Dashboard resources
// ---------------------------------------------------------------------------

impl Resource<GuildProfile> {
    /// Settings of the guild being edited. Writes are optimistic.
    pub fn guild_profile() -> Self {
        Self::new(
            "guild-profile",
            GUILD_PROFILE_PATH,
            is_named_object,
            WriteBackMode::Optimistic,
        )
    }
}

impl Resource<Vec<GuildSummary>> {
    /// Guilds visible to the signed-in user. An expired session escalates
    /// to the unauthorized hook.
    pub fn guild_collection() -> Self {
        Self::new(
            "guild-collection",
            GUILD_COLLECTION_PATH,
            is_id_list,
            WriteBackMode::Confirmed,
        )
        .with_unauthorized_escalation()
    }
}

impl Resource<Vec<OptionCategory>> {
    /// Option categories of one guild. Writes wait for the server.
    pub fn guild_categories(guild: &GuildId) -> Self {
        Self::new(
            "guild-categories",
            format!("{GUILD_OPTIONS_PREFIX}{guild}"),
            is_id_list,
            WriteBackMode::Confirmed,
        )
        .with_identity(guild.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn categories_path_includes_guild_id() {
        let resource = Resource::guild_categories(&GuildId::from("42"));
        assert_eq!(resource.path(), "/api/options/guild/42");
        assert_eq!(resource.identity(), Some(&GuildId::from("42")));
        assert_eq!(resource.mode(), WriteBackMode::Confirmed);
        assert!(!resource.escalates_unauthorized());
    }

    #[test]
    fn only_collection_escalates() {
        assert!(Resource::guild_collection().escalates_unauthorized());
        assert!(!Resource::guild_profile().escalates_unauthorized());
    }

    #[test]
    fn profile_is_optimistic_and_checks_name() {
        let resource = Resource::guild_profile();
        assert_eq!(resource.mode(), WriteBackMode::Optimistic);
        let accepts = resource.predicate();
        assert!(accepts(&json!({"id": "1", "name": "Hub"})));
        assert!(!accepts(&json!({"id": "1"})));
    }
}
