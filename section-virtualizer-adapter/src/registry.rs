use alloc::vec::Vec;

/// Outcome of delivering an update to every group container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dispatch {
    pub delivered: usize,
    /// Group indexes that had no container mounted. They are skipped, not retried; the next
    /// update reaches them once mounted.
    pub missing: Vec<usize>,
}

impl Dispatch {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Maps group indexes to their (optionally) mounted containers.
///
/// Containers mount asynchronously, so any slot may be empty at a given moment.
#[derive(Clone, Debug)]
pub struct ContainerRegistry<C> {
    slots: Vec<Option<C>>,
}

impl<C> Default for ContainerRegistry<C> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<C> ContainerRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts `container` for `group`, returning the previously mounted one.
    pub fn mount(&mut self, group: usize, container: C) -> Option<C> {
        if group >= self.slots.len() {
            self.slots.resize_with(group + 1, || None);
        }
        self.slots[group].replace(container)
    }

    pub fn unmount(&mut self, group: usize) -> Option<C> {
        self.slots.get_mut(group).and_then(Option::take)
    }

    pub fn get(&self, group: usize) -> Option<&C> {
        self.slots.get(group).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, group: usize) -> Option<&mut C> {
        self.slots.get_mut(group).and_then(Option::as_mut)
    }

    pub fn is_mounted(&self, group: usize) -> bool {
        self.get(group).is_some()
    }

    pub fn mounted_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Calls `f` for every mounted container of groups `0..group_count`.
    ///
    /// Containers mounted at or beyond `group_count` belong to a previous layout and are left
    /// alone.
    pub fn dispatch(&mut self, group_count: usize, mut f: impl FnMut(usize, &mut C)) -> Dispatch {
        let mut out = Dispatch::default();
        for group in 0..group_count {
            match self.slots.get_mut(group).and_then(Option::as_mut) {
                Some(container) => {
                    f(group, container);
                    out.delivered += 1;
                }
                None => out.missing.push(group),
            }
        }
        if !out.missing.is_empty() {
            vdebug!(
                delivered = out.delivered,
                missing = out.missing.len(),
                "skipped unmounted group containers"
            );
        }
        out
    }
}
