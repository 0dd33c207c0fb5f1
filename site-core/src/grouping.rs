//! Grouping engine.
//!
//! Groups are ordinary `container` components that other components point
//! at through `parentId`. Children store their offsets relative to the
//! group's origin, so moving a group moves everything inside it without
//! rewriting the children.
//!
//! All functions operate on a page's component list in place.

use std::collections::HashSet;

use tracing::debug;

use crate::component::{Component, ComponentId, ComponentKind};
use crate::layout::Rect;

/// Display name given to synthetic group containers.
pub const GROUP_NAME: &str = "Group";

/// Whether any component in the list points at `id` as its parent.
#[must_use]
pub fn has_children(components: &[Component], id: &str) -> bool {
    components
        .iter()
        .any(|c| c.parent_id.as_ref().is_some_and(|p| p == id))
}

/// Whether `ancestor` appears anywhere on `component`'s parent chain.
fn descends_from(components: &[Component], component: &Component, ancestor: &ComponentId) -> bool {
    let mut parent = component.parent_id.as_ref();
    let mut hops = 0;
    while let Some(parent_id) = parent {
        if parent_id == ancestor {
            return true;
        }
        if hops >= components.len() {
            return false;
        }
        parent = components
            .iter()
            .find(|c| &c.id == parent_id)
            .and_then(|c| c.parent_id.as_ref());
        hops += 1;
    }
    false
}

/// Wrap the given components in a new group.
///
/// Components whose ancestor is also being grouped travel with that ancestor
/// and are not re-parented. The remaining members must share one parent;
/// the group is created inside that parent. Returns the new group's id, or
/// `None` when fewer than two members remain or their parents differ.
pub fn group(components: &mut Vec<Component>, ids: &[ComponentId], group_id: ComponentId) -> Option<ComponentId> {
    let wanted: Vec<&ComponentId> = ids
        .iter()
        .filter(|id| components.iter().any(|c| &c.id == *id))
        .collect();

    let members: HashSet<ComponentId> = components
        .iter()
        .filter(|c| wanted.contains(&&c.id))
        .filter(|c| !wanted.iter().any(|other| descends_from(components, c, other)))
        .map(|c| c.id.clone())
        .collect();

    if members.len() < 2 {
        debug!(count = members.len(), "group needs at least two components");
        return None;
    }

    let mut parents = components
        .iter()
        .filter(|c| members.contains(&c.id))
        .map(|c| c.parent_id.clone());
    let parent = parents.next().flatten();
    if parents.any(|p| p != parent) {
        debug!("group members have different parents");
        return None;
    }

    let selected = components.iter().filter(|c| members.contains(&c.id));
    let bounds = Rect::bounding(selected.clone().map(Component::rect))?;
    let z_index = selected.map(|c| c.styles.z_offset()).max().unwrap_or(0) + 1;

    for component in components.iter_mut().filter(|c| members.contains(&c.id)) {
        component.styles.x -= bounds.x;
        component.styles.y -= bounds.y;
        component.parent_id = Some(group_id.clone());
    }

    let mut container = Component::new(group_id.clone(), ComponentKind::Container)
        .with_name(GROUP_NAME)
        .with_geometry(bounds.x, bounds.y, bounds.width, bounds.height);
    container.styles.background_color = Some("transparent".to_string());
    container.styles.z_index = Some(z_index);
    container.parent_id = parent;
    components.push(container);

    Some(group_id)
}

/// Dissolve a group: its children move to the group's parent with their
/// offsets composed back, and the group itself is removed.
///
/// Returns `false` when `group_id` does not exist or has no children.
pub fn ungroup(components: &mut Vec<Component>, group_id: &str) -> bool {
    if !has_children(components, group_id) {
        return false;
    }
    let Some(group) = components.iter().find(|c| c.id == group_id).cloned() else {
        return false;
    };
    release_children(components, &group);
    components.retain(|c| c.id != group_id);
    true
}

/// Move every child of `group` up one level, translating it into the
/// coordinate space of the group's parent.
pub fn release_children(components: &mut [Component], group: &Component) {
    for child in components
        .iter_mut()
        .filter(|c| c.parent_id.as_ref() == Some(&group.id))
    {
        child.styles.x += group.styles.x;
        child.styles.y += group.styles.y;
        child.parent_id.clone_from(&group.parent_id);
    }
}
