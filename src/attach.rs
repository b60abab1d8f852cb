//! Late attachment of loose entities to a registry.
//!
//! Declaring entities straight into a shared registry couples them to it for
//! good and can clash on table names. [`LooseEntity`] definitions stay
//! unregistered until configuration time, when the application attaches them
//! to the registry of its choice.

use crate::entity::LooseEntity;
use crate::error::{HazelError, Result};
use crate::registry::Registry;

/// Attach one entity to `registry`.
///
/// Re-attaching an entity to the registry it already belongs to is a no-op
/// when `ignore_reattach` is set.
///
/// # Errors
///
/// Returns `HazelError::Configuration` if the entity has no table name, is
/// already attached to a different registry, is re-attached to the same one
/// with `ignore_reattach` unset, or clashes with a registered entity. The
/// registry is left unchanged on error.
pub fn attach_entity(
    entity: &LooseEntity,
    registry: &mut Registry,
    ignore_reattach: bool,
) -> Result<()> {
    let name = entity.descriptor().name().to_string();
    let mut attachment = entity.attachment();

    if let Some(current) = *attachment {
        if current != registry.id() {
            return Err(HazelError::Configuration(format!(
                "Tried to attach entity {name} to {} but it is already attached to {current}",
                registry.id()
            )));
        }
        if ignore_reattach {
            log::debug!("Entity {} already attached to {}", name, current);
            return Ok(());
        }
        return Err(HazelError::Configuration(format!(
            "Entity {name} is already attached to {current}"
        )));
    }

    if entity.descriptor().resolve_table_name().is_none() {
        return Err(HazelError::Configuration(format!(
            "Table definition missing for {name}"
        )));
    }

    registry.register(entity.descriptor().clone())?;
    *attachment = Some(registry.id());
    log::debug!("Attached entity {} to {}", name, registry.id());
    Ok(())
}

/// Attach every candidate that declares a table and is not already declared
/// on `registry`'s base.
///
/// Attachment stops at the first failure, which is returned; entities
/// attached before it stay attached.
pub fn attach_all(candidates: &[LooseEntity], registry: &mut Registry) -> Result<()> {
    for entity in candidates {
        if entity.base() == Some(registry.id()) {
            continue;
        }
        if entity.descriptor().resolve_table_name().is_none() {
            continue;
        }
        if let Err(e) = attach_entity(entity, registry, true) {
            log::debug!(
                "Attaching {} to {} failed: {}",
                entity.descriptor().name(),
                registry.id(),
                e
            );
            return Err(e);
        }
    }
    Ok(())
}
