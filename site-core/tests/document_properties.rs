//! Property tests for the document store.
//!
//! Operations are drawn at random and replayed against a fresh document;
//! after each step the structural invariants of the design must hold.

use std::collections::HashSet;

use proptest::prelude::*;
use site_core::layout::{PreviewMode, Viewport, BASE_CANVAS_WIDTH};
use site_core::{
    templates, Command, Component, ComponentId, ComponentKind, ComponentPatch, Document,
    RenderTree, ReorderDirection,
};

#[derive(Debug, Clone)]
enum Op {
    Add { kind: u8, x: i16, y: i16 },
    Duplicate { pick: usize },
    Remove { pick: usize },
    Rename { pick: usize, name: String },
    Reorder { pick: usize, up: bool },
    Move { pick: usize, x: i16, y: i16 },
    AddPage,
    SwitchPage { pick: usize },
    ApplyTemplate { pick: usize },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..4, any::<i16>(), any::<i16>()).prop_map(|(kind, x, y)| Op::Add { kind, x, y }),
        2 => any::<usize>().prop_map(|pick| Op::Duplicate { pick }),
        1 => any::<usize>().prop_map(|pick| Op::Remove { pick }),
        1 => (any::<usize>(), "[a-z]{1,8}").prop_map(|(pick, name)| Op::Rename { pick, name }),
        1 => (any::<usize>(), any::<bool>()).prop_map(|(pick, up)| Op::Reorder { pick, up }),
        1 => (any::<usize>(), any::<i16>(), any::<i16>()).prop_map(|(pick, x, y)| Op::Move { pick, x, y }),
        1 => Just(Op::AddPage),
        1 => any::<usize>().prop_map(|pick| Op::SwitchPage { pick }),
        1 => any::<usize>().prop_map(|pick| Op::ApplyTemplate { pick }),
    ]
}

fn kind(n: u8) -> ComponentKind {
    match n {
        0 => ComponentKind::Text,
        1 => ComponentKind::Button,
        2 => ComponentKind::Image,
        _ => ComponentKind::Container,
    }
}

fn pick_id(document: &Document, pick: usize) -> Option<String> {
    let components = document.components();
    if components.is_empty() {
        None
    } else {
        Some(components[pick % components.len()].id.to_string())
    }
}

/// Apply one operation; returns `true` for discrete edits that record history.
fn apply(document: &mut Document, op: &Op) -> bool {
    match op {
        Op::Add { kind: k, x, y } => {
            let component = Component::with_generated_id(kind(*k)).with_geometry(
                f64::from(*x),
                f64::from(*y),
                100.0,
                50.0,
            );
            document.add_component(component)
        }
        Op::Duplicate { pick } => pick_id(document, *pick)
            .and_then(|id| document.duplicate_component(&id))
            .is_some(),
        Op::Remove { pick } => {
            pick_id(document, *pick).is_some_and(|id| document.remove_component(&id))
        }
        Op::Rename { pick, name } => pick_id(document, *pick).is_some_and(|id| {
            document.update_component(
                &id,
                ComponentPatch {
                    name: Some(name.clone()),
                    ..ComponentPatch::default()
                },
            )
        }),
        Op::Reorder { pick, up } => pick_id(document, *pick).is_some_and(|id| {
            let direction = if *up {
                ReorderDirection::Up
            } else {
                ReorderDirection::Down
            };
            document.reorder_component(&id, direction)
        }),
        Op::Move { pick, x, y } => {
            if let Some(id) = pick_id(document, *pick) {
                document.move_component(&id, f64::from(*x), f64::from(*y));
                document.save_history_snapshot();
            }
            false
        }
        Op::AddPage => {
            let n = document.pages().len();
            document.add_page(&format!("Page {n}"));
            false
        }
        Op::SwitchPage { pick } => {
            let pages = document.pages();
            let id = pages[pick % pages.len()].id.clone();
            document.switch_page(&id);
            false
        }
        Op::ApplyTemplate { pick } => {
            let available = templates::all();
            let name = available[pick % available.len()].name.to_string();
            Command::ApplyTemplate { name }
                .apply(document)
                .expect("built-in template");
            false
        }
    }
}

fn all_ids(document: &Document) -> Vec<ComponentId> {
    document
        .pages()
        .iter()
        .flat_map(|p| p.components.iter().map(|c| c.id.clone()))
        .collect()
}

proptest! {
    #[test]
    fn prop_component_ids_are_unique(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut document = Document::new();
        for op in &ops {
            apply(&mut document, op);
            let ids = all_ids(&document);
            let unique: HashSet<&ComponentId> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }
    }

    #[test]
    fn prop_components_match_current_page(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut document = Document::new();
        for op in &ops {
            apply(&mut document, op);
            let current = document
                .pages()
                .iter()
                .find(|p| p.id == document.current_page_id())
                .expect("current page exists");
            prop_assert_eq!(&current.components, &document.components().to_vec());
        }
    }

    #[test]
    fn prop_undo_redo_inverse(ops in prop::collection::vec(arb_op(), 1..30)) {
        let mut document = Document::new();
        for op in &ops {
            let before = document.components().to_vec();
            let recorded = apply(&mut document, op);
            let after = document.components().to_vec();
            if !recorded || before == after {
                continue;
            }

            prop_assert!(document.undo());
            prop_assert_eq!(document.components(), before.as_slice());
            prop_assert!(document.redo());
            prop_assert_eq!(document.components(), after.as_slice());
        }
    }

    #[test]
    fn prop_group_ungroup_round_trip(
        boxes in prop::collection::vec((-2000i32..2000, -2000i32..2000, 1i32..800, 1i32..800), 2..8)
    ) {
        let mut document = Document::new();
        for (i, (x, y, w, h)) in boxes.iter().enumerate() {
            let component = Component::new(format!("c{i}"), ComponentKind::Text).with_geometry(
                f64::from(*x),
                f64::from(*y),
                f64::from(*w),
                f64::from(*h),
            );
            document.add_component(component);
        }
        let before = document.components().to_vec();

        document.select_component(Some("c0"), false);
        for i in 1..boxes.len() {
            document.select_component(Some(&format!("c{i}")), true);
        }
        let group = document.group_selected().expect("grouped");
        prop_assert_eq!(document.components().len(), before.len() + 1);

        prop_assert!(document.ungroup_selected());
        prop_assert!(document.component(group.as_str()).is_none());
        for original in &before {
            let restored = document.component(original.id.as_str()).expect("member survives");
            prop_assert_eq!(restored.styles.x.to_bits(), original.styles.x.to_bits());
            prop_assert_eq!(restored.styles.y.to_bits(), original.styles.y.to_bits());
            prop_assert!(restored.parent_id.is_none());
        }
    }

    #[test]
    fn prop_scaled_height_never_below_half(
        height in 1.0f64..5000.0,
        viewport_width in 100.0f64..1440.0,
    ) {
        let viewport = Viewport::custom(viewport_width, BASE_CANVAS_WIDTH);
        prop_assert!(viewport.scale_height(height) >= 0.5 * height);

        let page = site_core::Page::home().with_components(vec![
            Component::new("c", ComponentKind::Text).with_geometry(0.0, 0.0, 200.0, height),
        ]);
        for mode in [PreviewMode::Tablet, PreviewMode::Mobile] {
            let tree = RenderTree::build(&page, Viewport::for_mode(mode, BASE_CANVAS_WIDTH));
            prop_assert!(tree.nodes[0].scaled.height >= 0.5 * height);
        }
    }
}
