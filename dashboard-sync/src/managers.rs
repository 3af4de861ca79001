//! Dashboard managers: the generic [`Synchronizer`] bound to each backend
//! route.

use std::sync::Arc;

use dashboard_core::{GuildId, GuildProfile, GuildSummary, OptionCategory, Resource};

use crate::synchronizer::Synchronizer;
use crate::transport::Transport;

/// Settings of the guild being edited; optimistic writes plus `merge_field`.
pub type GuildProfileManager<C> = Synchronizer<GuildProfile, C>;

/// Guilds visible to the signed-in user; escalates `UNAUTHORIZED`.
pub type GuildsListManager<C> = Synchronizer<Vec<GuildSummary>, C>;

/// Option categories of one guild; confirmed writes.
pub type GuildCategoriesManager<C> = Synchronizer<Vec<OptionCategory>, C>;

pub fn guild_profile<C: Transport>(transport: Arc<C>) -> GuildProfileManager<C> {
    Synchronizer::new(Resource::guild_profile(), transport)
}

/// `on_unauthorized` runs at most once, e.g. to send the user to the login
/// route.
pub fn guilds_list<C: Transport>(
    transport: Arc<C>,
    on_unauthorized: impl Fn() + Send + Sync + 'static,
) -> GuildsListManager<C> {
    Synchronizer::new(Resource::guild_collection(), transport).with_unauthorized_hook(on_unauthorized)
}

pub fn guild_categories<C: Transport>(
    transport: Arc<C>,
    guild: &GuildId,
) -> GuildCategoriesManager<C> {
    Synchronizer::new(Resource::guild_categories(guild), transport)
}
