//! "At most one open" member groups, used for the FAQ accordion.
//!
//! INVARIANT
//! =========
//! After attach and after every [`ExclusiveGroup::toggle`], at most one
//! member has `open == true`. Opening a member closes every sibling first;
//! toggling the open member leaves the whole group closed.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use crate::config::AccordionConfig;
use crate::dom::PageTree;
use crate::effect::Effect;

/// Index of a member within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(pub usize);

#[derive(Debug, Clone)]
pub struct GroupMember<N> {
    /// Element carrying the open class.
    pub item: N,
    /// Control whose `aria-expanded` mirrors the open flag.
    pub trigger: N,
    /// Expandable region; its content lives in a nested wrapper after attach.
    pub region: N,
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct ExclusiveGroup<N> {
    members: Vec<GroupMember<N>>,
    open_class: String,
}

impl<N: Clone + PartialEq> ExclusiveGroup<N> {
    /// Build a group from already-resolved members without touching a page.
    #[must_use]
    pub fn new(members: Vec<GroupMember<N>>, open_class: &str) -> Self {
        Self { members, open_class: open_class.to_owned() }
    }

    /// Find items in `tree`, wrap each region's content, and build the group.
    ///
    /// Items missing a trigger or region are skipped. Items already marked
    /// open are honoured, except that only the first of them stays open.
    /// Returns the group plus the effects that bring the page in line with it.
    pub fn attach<T: PageTree<Node = N>>(tree: &T, config: &AccordionConfig) -> (Self, Vec<Effect<N>>) {
        let mut members = Vec::new();
        for item in tree.elements_by_class(None, &config.item_class) {
            let trigger = tree.elements_by_class(Some(&item), &config.trigger_class).into_iter().next();
            let region = tree.elements_by_class(Some(&item), &config.region_class).into_iter().next();
            let (Some(trigger), Some(region)) = (trigger, region) else {
                log::debug!("accordion item without trigger or region skipped");
                continue;
            };

            tree.wrap_children(&region, &config.inner_class);
            tree.remove_attribute(&region, "hidden");

            let open = tree.has_class(&item, &config.open_class);
            members.push(GroupMember { item, trigger, region, open });
        }

        let mut group = Self::new(members, &config.open_class);
        let mut seen_open = false;
        for member in &mut group.members {
            member.open = member.open && !seen_open;
            seen_open |= member.open;
        }
        let effects = (0..group.members.len()).flat_map(|i| group.sync(MemberId(i))).collect();
        (group, effects)
    }

    #[must_use]
    pub fn members(&self) -> &[GroupMember<N>] {
        &self.members
    }

    /// The open member, if any.
    #[must_use]
    pub fn open_member(&self) -> Option<MemberId> {
        self.members.iter().position(|m| m.open).map(MemberId)
    }

    #[must_use]
    pub fn is_open(&self, id: MemberId) -> bool {
        self.members.get(id.0).is_some_and(|m| m.open)
    }

    /// The member whose trigger is `node`.
    #[must_use]
    pub fn member_for_trigger(&self, node: &N) -> Option<MemberId> {
        self.members.iter().position(|m| &m.trigger == node).map(MemberId)
    }

    /// Close `id` if open; otherwise close all siblings and open it.
    /// Unknown ids are a no-op.
    pub fn toggle(&mut self, id: MemberId) -> Vec<Effect<N>> {
        let Some(target) = self.members.get(id.0) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if target.open {
            self.members[id.0].open = false;
            effects.extend(self.sync(id));
        } else {
            for i in 0..self.members.len() {
                if i != id.0 && self.members[i].open {
                    self.members[i].open = false;
                    effects.extend(self.sync(MemberId(i)));
                }
            }
            self.members[id.0].open = true;
            effects.extend(self.sync(id));
        }
        log::debug!("accordion member {} toggled, open = {:?}", id.0, self.open_member());
        effects
    }

    fn sync(&self, id: MemberId) -> Vec<Effect<N>> {
        let Some(member) = self.members.get(id.0) else {
            return Vec::new();
        };
        vec![
            Effect::class(member.item.clone(), &self.open_class, member.open),
            Effect::expanded(member.trigger.clone(), member.open),
        ]
    }
}
