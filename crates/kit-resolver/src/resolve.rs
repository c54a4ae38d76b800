//! Turning declared dependencies into an ordered activation list.
//!
//! Version selection for each dependency, in precedence order:
//!
//! 1. a lock entry for the name, regardless of anything declared;
//! 2. the declared exact version;
//! 3. the highest version the registry has published.
//!
//! Locks are authoritative because they record a previously resolved and
//! tested combination. Only step 3 touches the registry, and a transient
//! I/O failure there is retried exactly once before counting as fatal.
//!
//! Activations are ordered by load-order rank, lower first. Dependencies
//! without an explicit `order` sit at [`DEFAULT_LOAD_ORDER`], a mid-range
//! rank that leaves room to pull extensions earlier or push them later.
//! Ties keep declaration order.

use semver::Version;

use kit_manifest::{ExtensionDependency, LockTable};

use crate::activation::ExtensionActivation;
use crate::error::{Error, FailureCause, ResolutionFailure, Result};
use crate::registry::{ExtensionRegistry, RegistryResult};

/// Load-order rank assigned to dependencies that do not declare one.
pub const DEFAULT_LOAD_ORDER: i64 = 100;

/// Resolves declared dependencies into load-ordered activations.
///
/// Duplicate names collapse to a single activation: the last declaration's
/// fields win, the first declaration's position is kept. Disabled
/// dependencies are skipped; optional ones are skipped when the registry
/// has nothing for them. Every other failure is collected, and the whole
/// launch fails with one error naming all of them.
pub fn resolve(
    declared: &[ExtensionDependency],
    lock: Option<&LockTable>,
    registry: &dyn ExtensionRegistry,
) -> Result<Vec<ExtensionActivation>> {
    let collapsed = collapse_duplicates(declared);
    let mut activations = Vec::new();
    let mut failures = Vec::new();

    for dep in &collapsed {
        if !dep.enabled {
            tracing::debug!("Skipping disabled extension {}", dep.name);
            continue;
        }

        let locked = lock.and_then(|table| table.get(&dep.name));
        let version = if let Some(version) = locked {
            tracing::debug!("Using locked version {} for {}", version, dep.name);
            version.clone()
        } else if let Some(version) = &dep.version {
            tracing::debug!("Using declared version {} for {}", version, dep.name);
            version.clone()
        } else {
            match query_highest(registry, &dep.name) {
                Ok(Some(version)) => {
                    tracing::debug!("Registry resolved {} to {}", dep.name, version);
                    version
                }
                Ok(None) => {
                    if dep.optional {
                        tracing::debug!(
                            "Skipping optional extension {}: no available version",
                            dep.name
                        );
                        continue;
                    }
                    failures.push(ResolutionFailure {
                        name: dep.name.clone(),
                        cause: FailureCause::NoVersions,
                    });
                    continue;
                }
                Err(err) => {
                    failures.push(ResolutionFailure {
                        name: dep.name.clone(),
                        cause: FailureCause::Registry(err),
                    });
                    continue;
                }
            }
        };

        activations.push(ExtensionActivation {
            name: dep.name.clone(),
            version,
            order: dep.order.unwrap_or(DEFAULT_LOAD_ORDER),
        });
    }

    if !failures.is_empty() {
        return Err(Error::Resolution { failures });
    }

    // stable sort: equal ranks keep declaration order
    activations.sort_by_key(|activation| activation.order);
    Ok(activations)
}

fn collapse_duplicates(declared: &[ExtensionDependency]) -> Vec<ExtensionDependency> {
    let mut collapsed: Vec<ExtensionDependency> = Vec::new();
    for dep in declared {
        match collapsed.iter_mut().find(|existing| existing.name == dep.name) {
            Some(existing) => *existing = dep.clone(),
            None => collapsed.push(dep.clone()),
        }
    }
    collapsed
}

/// Registry lookup with a single retry on transient failure.
fn query_highest(registry: &dyn ExtensionRegistry, name: &str) -> RegistryResult<Option<Version>> {
    match registry.highest(name) {
        Err(err) if err.is_transient() => {
            tracing::warn!("Registry lookup for {} failed ({}), retrying once", name, err);
            registry.highest(name)
        }
        other => other,
    }
}
