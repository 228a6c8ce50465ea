/// Probe registry - registered probes partitioned by update policy.
///
/// Three ordered lists (baked, realtime view-independent, realtime
/// view-dependent) plus the planar bounds index used for culling.
///
/// Register and unregister are O(1): membership lives in a hash map, and
/// every list entry carries the ticket of the registration that created
/// it. Unregistering only drops the membership; list entries whose ticket
/// no longer matches, or whose probe was destroyed, are pruned by the
/// accessors, which preserve the order of the surviving entries.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::probe::{Probe, ProbeKey, ProbeMode, ProbeType};
use crate::{engine_debug, engine_trace, engine_warn};
use super::planar_bounds::PlanarBoundsIndex;

/// Update-policy partition of a registered probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbePartition {
    /// Captured once, offline
    Baked,
    /// Realtime cubemap probes (viewer ignored)
    RealtimeViewIndependent,
    /// Realtime planar probes (recaptured per viewer)
    RealtimeViewDependent,
    /// Custom probes: registered (and culled if planar), never scheduled
    Unlisted,
}

impl ProbePartition {
    /// Partition for a (mode, type) pair
    pub fn of(mode: ProbeMode, probe_type: ProbeType) -> Self {
        match (mode, probe_type) {
            (ProbeMode::Baked, _) => ProbePartition::Baked,
            (ProbeMode::Realtime, ProbeType::ReflectionProbe) => ProbePartition::RealtimeViewIndependent,
            (ProbeMode::Realtime, ProbeType::PlanarProbe) => ProbePartition::RealtimeViewDependent,
            (ProbeMode::Custom, _) => ProbePartition::Unlisted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Membership {
    partition: ProbePartition,
    ticket: u64,
}

/// Ordered key list with per-entry registration tickets (index-aligned)
#[derive(Default)]
struct ProbeList {
    keys: Vec<ProbeKey>,
    tickets: Vec<u64>,
    /// Entries whose ticket is still current
    live: usize,
}

impl ProbeList {
    fn push(&mut self, key: ProbeKey, ticket: u64) {
        self.keys.push(key);
        self.tickets.push(ticket);
        self.live += 1;
    }

    /// Keep entries accepted by `keep`, preserving order. Returns the number dropped.
    fn retain(&mut self, mut keep: impl FnMut(ProbeKey, u64) -> bool) -> usize {
        let before = self.keys.len();
        let mut write = 0;
        for read in 0..before {
            let (key, ticket) = (self.keys[read], self.tickets[read]);
            if keep(key, ticket) {
                self.keys[write] = key;
                self.tickets[write] = ticket;
                write += 1;
            }
        }
        self.keys.truncate(write);
        self.tickets.truncate(write);
        before - write
    }

    fn clear(&mut self) {
        self.keys.clear();
        self.tickets.clear();
        self.live = 0;
    }
}

pub struct ProbeRegistry {
    baked: ProbeList,
    realtime_view_independent: ProbeList,
    realtime_view_dependent: ProbeList,
    planar_bounds: PlanarBoundsIndex,
    members: FxHashMap<ProbeKey, Membership>,
    next_ticket: u64,
}

impl ProbeRegistry {
    /// Create an empty registry whose planar bounds index starts at `planar_capacity`
    pub fn new(planar_capacity: usize) -> Self {
        Self {
            baked: ProbeList::default(),
            realtime_view_independent: ProbeList::default(),
            realtime_view_dependent: ProbeList::default(),
            planar_bounds: PlanarBoundsIndex::with_capacity(planar_capacity),
            members: FxHashMap::default(),
            next_ticket: 0,
        }
    }

    /// Register `probe` under `key`.
    ///
    /// The partition is fixed by the probe's (mode, type) at this point.
    /// Planar probes of every mode are also appended to the planar bounds
    /// index. Registering an already registered key is a no-op and returns
    /// `None`.
    pub fn register(&mut self, key: ProbeKey, probe: &Probe) -> Option<ProbePartition> {
        if self.members.contains_key(&key) {
            engine_warn!("galaxy3d::ProbeRegistry",
                "Probe '{}' is already registered", probe.name());
            return None;
        }

        let partition = ProbePartition::of(probe.mode(), probe.probe_type());
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        self.members.insert(key, Membership { partition, ticket });
        if let Some(list) = list_for(
            &mut self.baked,
            &mut self.realtime_view_independent,
            &mut self.realtime_view_dependent,
            partition,
        ) {
            list.push(key, ticket);
        }
        if probe.probe_type() == ProbeType::PlanarProbe {
            self.planar_bounds.append(key, probe.bounding_sphere());
        }

        engine_debug!("galaxy3d::ProbeRegistry",
            "Registered probe '{}' ({:?}, {:?}) as {:?}",
            probe.name(), probe.mode(), probe.probe_type(), partition);

        Some(partition)
    }

    /// Unregister `key` from whichever partition holds it.
    ///
    /// Swap-removes the key from the planar bounds index if present.
    /// Unregistering an unknown key is a no-op and returns `false`.
    pub fn unregister(&mut self, key: ProbeKey) -> bool {
        let Some(membership) = self.members.remove(&key) else {
            engine_trace!("galaxy3d::ProbeRegistry", "Unregister of unknown probe ignored");
            return false;
        };

        self.planar_bounds.remove_swap(key);

        let members = &self.members;
        if let Some(list) = list_for(
            &mut self.baked,
            &mut self.realtime_view_independent,
            &mut self.realtime_view_dependent,
            membership.partition,
        ) {
            list.live -= 1;
            // Stale entries are normally dropped by the accessors; compact
            // here too so lists that are never read stay bounded.
            if list.keys.len() > 2 * list.live + 32 {
                list.retain(|k, ticket| is_current(members, k, membership.partition, ticket));
            }
        }
        true
    }

    /// Whether `key` is currently registered
    pub fn is_registered(&self, key: ProbeKey) -> bool {
        self.members.contains_key(&key)
    }

    /// Partition of a registered key
    pub fn partition_of(&self, key: ProbeKey) -> Option<ProbePartition> {
        self.members.get(&key).map(|m| m.partition)
    }

    /// Number of registered probes (all partitions)
    ///
    /// Probes destroyed while registered are counted until they are pruned,
    /// either by a list accessor or by `prune_destroyed`. Custom cubemap
    /// probes sit in no list and are only dropped by `prune_destroyed`.
    pub fn registered_count(&self) -> usize {
        self.members.len()
    }

    /// Unregister every key whose probe no longer exists in `probes`.
    ///
    /// Returns the number of registrations dropped.
    pub fn prune_destroyed(&mut self, probes: &SlotMap<ProbeKey, Probe>) -> usize {
        let destroyed: Vec<ProbeKey> = self.members.keys()
            .copied()
            .filter(|key| !probes.contains_key(*key))
            .collect();
        for &key in &destroyed {
            self.unregister(key);
        }
        if !destroyed.is_empty() {
            engine_debug!("galaxy3d::ProbeRegistry",
                "Pruned {} registrations of destroyed probes", destroyed.len());
        }
        destroyed.len()
    }

    /// Baked probes, in registration order
    pub fn baked_probes(&mut self, probes: &SlotMap<ProbeKey, Probe>) -> &[ProbeKey] {
        self.pruned(ProbePartition::Baked, probes)
    }

    /// Realtime cubemap probes, in registration order
    pub fn realtime_view_independent_probes(&mut self, probes: &SlotMap<ProbeKey, Probe>) -> &[ProbeKey] {
        self.pruned(ProbePartition::RealtimeViewIndependent, probes)
    }

    /// Realtime planar probes, in registration order
    pub fn realtime_view_dependent_probes(&mut self, probes: &SlotMap<ProbeKey, Probe>) -> &[ProbeKey] {
        self.pruned(ProbePartition::RealtimeViewDependent, probes)
    }

    fn pruned(&mut self, partition: ProbePartition, probes: &SlotMap<ProbeKey, Probe>) -> &[ProbeKey] {
        let members = &mut self.members;
        let planar_bounds = &mut self.planar_bounds;
        let Some(list) = list_for(
            &mut self.baked,
            &mut self.realtime_view_independent,
            &mut self.realtime_view_dependent,
            partition,
        ) else {
            return &[];
        };

        let mut destroyed = 0;
        let dropped = list.retain(|key, ticket| {
            if !is_current(members, key, partition, ticket) {
                return false;
            }
            if probes.contains_key(key) {
                return true;
            }
            // Destroyed while registered
            members.remove(&key);
            planar_bounds.remove_swap(key);
            destroyed += 1;
            false
        });
        list.live -= destroyed;

        if dropped > 0 {
            engine_trace!("galaxy3d::ProbeRegistry",
                "Pruned {} stale {:?} entries ({} destroyed)", dropped, partition, destroyed);
        }

        &list.keys
    }

    /// Planar bounds index (read-only, for culling)
    pub fn planar_bounds(&self) -> &PlanarBoundsIndex {
        &self.planar_bounds
    }

    pub(crate) fn planar_bounds_mut(&mut self) -> &mut PlanarBoundsIndex {
        &mut self.planar_bounds
    }

    /// Drop every registration, keeping allocated capacity
    pub fn clear(&mut self) {
        self.baked.clear();
        self.realtime_view_independent.clear();
        self.realtime_view_dependent.clear();
        self.planar_bounds.clear();
        self.members.clear();
    }
}

/// Pick the list of `partition` out of the disjoint list fields
fn list_for<'a>(
    baked: &'a mut ProbeList,
    realtime_view_independent: &'a mut ProbeList,
    realtime_view_dependent: &'a mut ProbeList,
    partition: ProbePartition,
) -> Option<&'a mut ProbeList> {
    match partition {
        ProbePartition::Baked => Some(baked),
        ProbePartition::RealtimeViewIndependent => Some(realtime_view_independent),
        ProbePartition::RealtimeViewDependent => Some(realtime_view_dependent),
        ProbePartition::Unlisted => None,
    }
}

fn is_current(
    members: &FxHashMap<ProbeKey, Membership>,
    key: ProbeKey,
    partition: ProbePartition,
    ticket: u64,
) -> bool {
    members.get(&key) == Some(&Membership { partition, ticket })
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
