//! Canvas render tree.
//!
//! Resolves a page into positioned nodes for a given viewport using the
//! rules in [`crate::layout`]. Groups become wrapper nodes whose children
//! are positioned relative to the group's box; moving a group therefore
//! moves its members without touching their stored offsets.

use serde::Serialize;

use crate::component::{Component, ComponentId, ComponentKind};
use crate::layout::{
    absolute_rect, children_paint_order, overflows, root_paint_order, ContentAlignment, Painted,
    Rect, Viewport,
};
use crate::page::Page;

/// Hit-testing policy of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvents {
    /// Receives pointer input.
    Auto,
    /// Transparent to pointer input; used for group wrappers.
    None,
}

impl PointerEvents {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
        }
    }
}

/// A positioned component.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    /// Component id.
    pub id: ComponentId,
    /// Component kind.
    pub kind: ComponentKind,
    /// Stored geometry, relative to the parent group if any.
    pub design: Rect,
    /// Page-absolute geometry in design units.
    pub absolute: Rect,
    /// `design` scaled to the viewport.
    pub scaled: Rect,
    /// Stacking level within the parent's context.
    pub z: i64,
    /// Content placement.
    pub alignment: ContentAlignment,
    /// Font size after responsive clamping.
    pub font_size: Option<f64>,
    /// Hit-testing policy.
    pub pointer_events: PointerEvents,
    /// Right edge passes the responsive viewport.
    pub overflow: bool,
    /// Group members, in paint order.
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// Whether this node wraps other nodes.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Positioned nodes of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    /// Viewport the tree was resolved for.
    pub viewport: Viewport,
    /// Page height after responsive clamping.
    pub height: f64,
    /// Root nodes, bottom to top.
    pub nodes: Vec<RenderNode>,
}

impl RenderTree {
    /// Resolve a page for a viewport. Hidden components and their members are skipped.
    #[must_use]
    pub fn build(page: &Page, viewport: Viewport) -> Self {
        let components = &page.components;
        let nodes = build_level(
            components,
            root_paint_order(components),
            viewport,
            components.len(),
        );
        Self {
            viewport,
            height: viewport.scale_height(page.canvas_height),
            nodes,
        }
    }

    /// Depth-first search for a node.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        fn walk<'a>(nodes: &'a [RenderNode], id: &str) -> Option<&'a RenderNode> {
            nodes
                .iter()
                .find_map(|n| if n.id == id { Some(n) } else { walk(&n.children, id) })
        }
        walk(&self.nodes, id)
    }

    /// Ids of every flagged node.
    #[must_use]
    pub fn overflowing(&self) -> Vec<ComponentId> {
        fn collect(nodes: &[RenderNode], out: &mut Vec<ComponentId>) {
            for node in nodes {
                if node.overflow {
                    out.push(node.id.clone());
                }
                collect(&node.children, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, &mut out);
        out
    }
}

fn build_level(
    components: &[Component],
    painted: Vec<Painted<'_>>,
    viewport: Viewport,
    depth_left: usize,
) -> Vec<RenderNode> {
    let mut painted = painted;
    painted.retain(|p| p.component.visible);
    painted.sort_by_key(|p| (p.z, p.index));

    painted
        .into_iter()
        .map(|p| {
            let component = p.component;
            let children = if depth_left == 0 {
                Vec::new()
            } else {
                build_level(
                    components,
                    children_paint_order(components, component.id.as_str()),
                    viewport,
                    depth_left - 1,
                )
            };
            let absolute = absolute_rect(components, component);
            let pointer_events = if children.is_empty() {
                PointerEvents::Auto
            } else {
                PointerEvents::None
            };
            RenderNode {
                id: component.id.clone(),
                kind: component.kind.clone(),
                design: component.rect(),
                absolute,
                scaled: viewport.scale_rect(component.rect()),
                z: p.z,
                alignment: ContentAlignment::resolve(component),
                font_size: component.styles.font_size.map(|f| viewport.scale_font(f)),
                pointer_events,
                overflow: viewport.responsive && overflows(absolute, viewport.width),
                children,
            }
        })
        .collect()
}
