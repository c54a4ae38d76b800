//! The composed launch plan.

use kit_manifest::LockTable;
use kit_resolver::ExtensionActivation;
use kit_settings::SettingsNode;

/// Everything the runtime needs to start an app: the fully merged settings
/// tree and the load-ordered activation list. Built once per launch by
/// [`AppComposer`](crate::AppComposer) and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
    title: Option<String>,
    version: Option<String>,
    settings: SettingsNode,
    activations: Vec<ExtensionActivation>,
}

impl LaunchPlan {
    pub(crate) fn new(
        title: Option<String>,
        version: Option<String>,
        settings: SettingsNode,
        activations: Vec<ExtensionActivation>,
    ) -> Self {
        Self {
            title,
            version,
            settings,
            activations,
        }
    }

    /// App title from the primary manifest's package section.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// App version string from the primary manifest's package section.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The merged settings tree, markers consumed.
    pub fn settings(&self) -> &SettingsNode {
        &self.settings
    }

    /// Extensions to load, in load order.
    pub fn activations(&self) -> &[ExtensionActivation] {
        &self.activations
    }

    pub fn activation(&self, name: &str) -> Option<&ExtensionActivation> {
        self.activations.iter().find(|a| a.name == name)
    }

    /// The resolved versions as a lock table, ready to write back into the
    /// manifest's generated part.
    pub fn lock_table(&self) -> LockTable {
        let mut lock = LockTable::new();
        for activation in &self.activations {
            lock.insert(activation.name.clone(), activation.version.clone());
        }
        lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use semver::Version;

    fn activation(name: &str, version: Version, order: i64) -> ExtensionActivation {
        ExtensionActivation {
            name: name.to_string(),
            version,
            order,
        }
    }

    #[test]
    fn activation_lookup_by_name() {
        let plan = LaunchPlan::new(
            Some("Viewer".to_string()),
            None,
            SettingsNode::new(),
            vec![
                activation("omni.a", Version::new(1, 0, 0), 1),
                activation("omni.b", Version::new(2, 0, 0), 100),
            ],
        );
        assert_eq!(plan.activation("omni.b").unwrap().order, 100);
        assert!(plan.activation("omni.c").is_none());
        assert_eq!(plan.title(), Some("Viewer"));
    }

    #[test]
    fn lock_table_mirrors_activations() {
        let plan = LaunchPlan::new(
            None,
            None,
            SettingsNode::new(),
            vec![
                activation("omni.a", Version::new(1, 0, 0), 1),
                activation("omni.b", Version::new(2, 0, 0), 100),
            ],
        );
        let lock = plan.lock_table();
        assert_eq!(lock.to_strings(), ["omni.a-1.0.0", "omni.b-2.0.0"]);
    }
}
