//! Per-event logging toggles
//!
//! Events absent from the table are logged. The built-in entries silence the
//! callbacks the host fires every frame or every shot.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Events suppressed by default
pub const SUPPRESSED_EVENTS: &[&str] = &[
    "HkCbIServerImpl_Update",
    "HkCbIServerImpl_SPObjUpdate",
    "HkCbIServerImpl_SPObjUpdate_AFTER",
    "HkCbIServerImpl_ActivateThrusters",
    "HkCbIServerImpl_ActivateThrusters_AFTER",
    "HkCbIServerImpl_ActivateEquip",
    "HkCbIServerImpl_ActivateEquip_AFTER",
    "HkCbIServerImpl_FireWeapon",
    "HkCbIServerImpl_FireWeapon_AFTER",
    "HkCbIServerImpl_SPMunitionCollision",
    "HkCbIServerImpl_SPMunitionCollision_AFTER",
    "ShipDestroyed",
    "HkTimerCheckKick",
    "HkCb_Elapse_Time",
    "HkCb_Elapse_Time_AFTER",
    "HkCb_Update_Time",
    "HkCb_Update_Time_AFTER",
    "HkCb_AddDmgEntry",
    "HkCb_AddDmgEntry_AFTER",
    "HkCbIServerImpl_SetWeaponGroup",
    "HkCbIServerImpl_SetWeaponGroup_AFTER",
];

/// Event name → should-log table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    toggles: HashMap<String, bool>,
}

impl EventFilter {
    /// Table with only the built-in suppressions
    pub fn builtin() -> Self {
        Self {
            toggles: SUPPRESSED_EVENTS
                .iter()
                .map(|name| (name.to_string(), false))
                .collect(),
        }
    }

    /// Apply entries on top of the table; later entries win
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, bool>) -> Self {
        for (name, enabled) in overrides {
            self.toggles.insert(name.clone(), *enabled);
        }
        self
    }

    /// Whether an event should be logged (absent ⇒ true)
    #[inline]
    pub fn should_log(&self, event: &str) -> bool {
        self.toggles.get(event).copied().unwrap_or(true)
    }

    /// Number of explicit entries
    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::builtin()
    }
}

static FILTER: OnceLock<EventFilter> = OnceLock::new();

/// Install the process-wide filter
///
/// Returns false if one was already installed; the first one stays.
pub fn install_filter(filter: EventFilter) -> bool {
    FILTER.set(filter).is_ok()
}

/// The process-wide filter (built-in table until one is installed)
pub fn filter() -> &'static EventFilter {
    FILTER.get_or_init(EventFilter::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let filter = EventFilter::builtin();
        assert_eq!(filter.len(), 21);
        for name in SUPPRESSED_EVENTS {
            assert!(!filter.should_log(name), "{} should be suppressed", name);
        }
        assert!(filter.should_log("HkCbIServerImpl_PlayerLaunch"));
        assert!(filter.should_log("PlayerLaunch"));
        // Exact names only
        assert!(filter.should_log("HkIServerImpl_Update"));
        assert!(filter.should_log("hkcbiserverimpl_update"));
    }

    #[test]
    fn test_overrides() {
        let overrides = BTreeMap::from([
            ("ShipDestroyed".to_string(), true),
            ("HkCbIServerImpl_SubmitChat".to_string(), false),
        ]);
        let filter = EventFilter::builtin().with_overrides(&overrides);

        assert!(filter.should_log("ShipDestroyed"));
        assert!(!filter.should_log("HkCbIServerImpl_SubmitChat"));
        assert!(!filter.should_log("HkTimerCheckKick"));
        assert_eq!(filter.len(), 22);
    }

    #[test]
    fn test_global_filter_defaults_to_builtin() {
        assert!(!filter().should_log("HkCbIServerImpl_Update"));
    }
}
