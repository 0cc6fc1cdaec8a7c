//! Resolvers turn behavior outputs into world mutations and driver callbacks.
//!
//! Resolution is the write phase of a frame. After each entity's update the
//! frame driver routes that entity's outputs to every resolver whose
//! [`Resolver::handles()`] lists the output's kind, in registration order.
//!
//! # Invariants
//!
//! - Resolvers are deterministic given the same world and output order
//! - Outputs naming entities that no longer exist are ignored
//!
//! # Available Resolvers
//!
//! - [`CommandResolver`]: applies [`Command`](crate::output::Command)s to the world
//! - [`HookResolver`]: forwards [`Event`](crate::output::Event)s to [`GameHooks`]

mod command;
mod hooks;

pub use command::CommandResolver;
pub use hooks::HookResolver;

use crate::output::{GameHooks, Output, OutputKind};
use crate::world::World;

/// Resolver applies routed outputs.
///
/// # Example
///
/// ```
/// use skyhop_core::output::{GameHooks, Output, OutputKind};
/// use skyhop_core::resolver::Resolver;
/// use skyhop_core::world::World;
///
/// struct CountingResolver;
///
/// impl Resolver for CountingResolver {
///     fn handles(&self) -> &[OutputKind] {
///         &[OutputKind::Event]
///     }
///
///     fn resolve(&self, outputs: &[&Output], _world: &mut World, _hooks: &mut dyn GameHooks) {
///         println!("{} events", outputs.len());
///     }
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// Returns the output kinds this resolver handles.
    fn handles(&self) -> &[OutputKind];

    /// Applies outputs to the world and the driver's hooks.
    ///
    /// # Arguments
    ///
    /// * `outputs` - The outputs routed to this resolver (filtered by `handles()`)
    /// * `world` - The world, with every entity present
    /// * `hooks` - The game driver's callbacks
    fn resolve(&self, outputs: &[&Output], world: &mut World, hooks: &mut dyn GameHooks);
}

/// The resolvers every simulation starts with: commands first, then hooks.
#[must_use]
pub fn default_resolvers() -> Vec<Box<dyn Resolver>> {
    vec![Box::new(CommandResolver::new()), Box::new(HookResolver::new())]
}

/// Routes `outputs` to each resolver by kind, in resolver order.
pub fn route(
    resolvers: &[Box<dyn Resolver>],
    outputs: &[Output],
    world: &mut World,
    hooks: &mut dyn GameHooks,
) {
    if outputs.is_empty() {
        return;
    }
    for resolver in resolvers {
        let kinds = resolver.handles();
        let routed: Vec<&Output> = outputs
            .iter()
            .filter(|output| kinds.contains(&output.kind()))
            .collect();
        if !routed.is_empty() {
            resolver.resolve(&routed, world, hooks);
        }
    }
}
