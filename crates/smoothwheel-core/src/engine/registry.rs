//! Per-device scroller storage.
//!
//! Scrollers live in a slot arena addressed by generational keys, with a
//! map from device id to key. Removing a device frees its slot for the next
//! registration; stale keys stop resolving because the generation moved on.

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::event::ScrollEvent;
use crate::{Error, Result};

use super::device::{DeviceId, DeviceScroller, TickInput};

/// Handle to a registered device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceKey {
    index: usize,
    generation: u32,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    scroller: Option<DeviceScroller>,
}

#[derive(Debug)]
pub struct DeviceRegistry {
    config: EngineConfig,
    slots: Vec<Slot>,
    free: Vec<usize>,
    index: HashMap<DeviceId, DeviceKey>,
}

impl DeviceRegistry {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register a device, or return the key it already has
    pub fn register(&mut self, id: DeviceId) -> Result<DeviceKey> {
        if let Some(key) = self.index.get(&id) {
            return Ok(*key);
        }

        let scroller = DeviceScroller::new(id.clone(), &self.config)?;
        Ok(self.insert(id, scroller))
    }

    /// Register a pre-built scroller (e.g. one with a custom decay strategy)
    pub fn insert(&mut self, id: DeviceId, scroller: DeviceScroller) -> DeviceKey {
        if let Some(old) = self.remove(&id) {
            tracing::debug!(device = %old.id(), "Replacing registered scroller");
        }

        let key = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = slot.generation.wrapping_add(1);
                slot.scroller = Some(scroller);
                DeviceKey {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    scroller: Some(scroller),
                });
                DeviceKey {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };

        tracing::info!(device = %id, slot = key.index, "Registered scroll device");
        self.index.insert(id, key);
        key
    }

    /// Unregister a device and hand back its scroller
    pub fn remove(&mut self, id: &DeviceId) -> Option<DeviceScroller> {
        let key = self.index.remove(id)?;
        let scroller = self.slots.get_mut(key.index)?.scroller.take();
        self.free.push(key.index);
        tracing::info!(device = %id, slot = key.index, "Removed scroll device");
        scroller
    }

    pub fn key_of(&self, id: &DeviceId) -> Option<DeviceKey> {
        self.index.get(id).copied()
    }

    pub fn get(&self, key: DeviceKey) -> Option<&DeviceScroller> {
        self.slots
            .get(key.index)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.scroller.as_ref())
    }

    pub fn get_mut(&mut self, key: DeviceKey) -> Option<&mut DeviceScroller> {
        self.slots
            .get_mut(key.index)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.scroller.as_mut())
    }

    fn lookup_mut(&mut self, id: &DeviceId) -> Result<&mut DeviceScroller> {
        let key = self
            .key_of(id)
            .ok_or_else(|| Error::UnknownDevice(id.to_string()))?;
        self.get_mut(key)
            .ok_or_else(|| Error::UnknownDevice(id.to_string()))
    }

    /// Feed one tick to a registered device
    pub fn tick(&mut self, id: &DeviceId, input: TickInput) -> Result<Vec<ScrollEvent>> {
        self.lookup_mut(id)?.tick(input)
    }

    /// Reset a device's scroll state (disconnect, sleep, ...)
    pub fn reset(&mut self, id: &DeviceId) -> Result<()> {
        self.lookup_mut(id)?.reset();
        Ok(())
    }

    /// Devices with a gesture in progress
    pub fn active(&self) -> impl Iterator<Item = &DeviceId> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.scroller.as_ref())
            .filter(|scroller| scroller.is_active())
            .map(|scroller| scroller.id())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Point;
    use crate::engine::gate::AppId;
    use crate::event::{LineDelta, ScrollPhase};

    fn input(v: i64) -> TickInput {
        TickInput::new(LineDelta::new(v, 0), Point::new(0.0, 0.0), AppId::new("app"))
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = DeviceRegistry::new(EngineConfig::default()).unwrap();
        let a = registry.register(DeviceId::from("a")).unwrap();
        let again = registry.register(DeviceId::from("a")).unwrap();
        assert_eq!(a, again);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_devices_are_independent() {
        let mut registry = DeviceRegistry::new(EngineConfig::default()).unwrap();
        let a = DeviceId::from("a");
        let b = DeviceId::from("b");
        registry.register(a.clone()).unwrap();
        registry.register(b.clone()).unwrap();

        registry.tick(&a, input(4)).unwrap();
        let events = registry.tick(&b, input(-4)).unwrap();
        assert_eq!(events[0].phase(), ScrollPhase::Start);

        let events = registry.tick(&a, input(4)).unwrap();
        assert_eq!(events[0].phase(), ScrollPhase::Linear);

        let active: Vec<_> = registry.active().cloned().collect();
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn test_unknown_device() {
        let mut registry = DeviceRegistry::new(EngineConfig::default()).unwrap();
        let err = registry.tick(&DeviceId::from("ghost"), input(1)).unwrap_err();
        assert!(matches!(err, Error::UnknownDevice(_)));
        assert!(registry.reset(&DeviceId::from("ghost")).is_err());
    }

    #[test]
    fn test_removed_slot_is_reused_and_old_key_is_stale() {
        let mut registry = DeviceRegistry::new(EngineConfig::default()).unwrap();
        let a = DeviceId::from("a");
        let old = registry.register(a.clone()).unwrap();
        assert!(registry.remove(&a).is_some());
        assert!(registry.is_empty());

        let new = registry.register(DeviceId::from("b")).unwrap();
        assert_eq!(new.index, old.index);
        assert!(registry.get(old).is_none());
        assert!(registry.get(new).is_some());
    }

    #[test]
    fn test_reset_device() {
        let mut registry = DeviceRegistry::new(EngineConfig::default()).unwrap();
        let a = DeviceId::from("a");
        registry.register(a.clone()).unwrap();
        registry.tick(&a, input(2)).unwrap();
        registry.reset(&a).unwrap();
        assert_eq!(registry.active().count(), 0);
    }
}
