//! End-to-end editing flows driven through the editor session.

use folio_core::{
    Editor, Element, ElementKind, ElementStore, Geometry, HandleKind, InteractionState, Key,
    KeyEvent, Modifiers, MouseButton, PointerCapture, PointerEvent, get_handles,
};
use kurbo::Point;
use std::cell::Cell;
use std::rc::Rc;

fn down(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        position: Point::new(x, y),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    }
}

fn moved(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Move {
        position: Point::new(x, y),
    }
}

fn up(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Up {
        position: Point::new(x, y),
        button: MouseButton::Left,
    }
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(Key::Character(c), Modifiers::CTRL)
}

fn assert_invariants(store: &ElementStore) {
    for el in store.iter() {
        let g = el.geometry();
        assert!(g.width >= 20.0 && g.height >= 20.0, "size floor broken: {g:?}");
        assert!(g.x >= 0.0 && g.y >= 0.0, "position floor broken: {g:?}");
        assert!((0.0..=1.0).contains(&el.style.opacity));
    }
}

#[test]
fn test_create_text_element() {
    let mut editor = Editor::new();
    editor.add_element(ElementKind::Text);

    assert_eq!(editor.element_count(), 1);
    let el = &editor.store.elements()[0];
    assert_eq!(el.geometry(), Geometry::new(100.0, 100.0, 200.0, 40.0));
    assert_eq!(el.content, "New Text");
}

#[test]
fn test_drag_at_zoom_one() {
    let mut editor = Editor::new();
    let id = editor.add_element(ElementKind::Text);

    editor.handle_pointer(&down(120.0, 110.0));
    editor.handle_pointer(&moved(170.0, 140.0));
    editor.handle_pointer(&up(170.0, 140.0));

    let g = editor.store.get(id).unwrap().geometry();
    assert!((g.x - 150.0).abs() < f64::EPSILON);
    assert!((g.y - 130.0).abs() < f64::EPSILON);
    assert_invariants(&editor.store);
}

#[test]
fn test_drag_at_zoom_two() {
    let mut editor = Editor::new();
    let id = editor.add_element(ElementKind::Shape);
    editor.transform.set_zoom(2.0);

    // Shape body spans screen (200..400, 200..400) at zoom 2
    editor.handle_pointer(&down(300.0, 300.0));
    editor.handle_pointer(&moved(340.0, 320.0));
    editor.handle_pointer(&up(340.0, 320.0));

    let g = editor.store.get(id).unwrap().geometry();
    assert!((g.x - 120.0).abs() < f64::EPSILON);
    assert!((g.y - 110.0).abs() < f64::EPSILON);
}

#[test]
fn test_resize_respects_floor() {
    let mut editor = Editor::new();
    let id = editor.add_element(ElementKind::Shape);
    editor
        .store
        .update(id, &folio_core::ElementPatch::new().size(15.0, 15.0));
    // Entry clamp already lifted it to the floor
    let g = editor.store.get(id).unwrap().geometry();
    assert_eq!(g, Geometry::new(100.0, 100.0, 20.0, 20.0));

    // SE handle sits at (120,120); shrinking past the floor clamps
    editor.handle_pointer(&down(120.0, 120.0));
    editor.handle_pointer(&moved(110.0, 110.0));
    let g = editor.store.get(id).unwrap().geometry();
    assert_eq!(g, Geometry::new(100.0, 100.0, 20.0, 20.0));

    // Growing by (10,10) from the 20x20 start
    editor.handle_pointer(&moved(130.0, 130.0));
    editor.handle_pointer(&up(130.0, 130.0));
    let g = editor.store.get(id).unwrap().geometry();
    assert_eq!(g, Geometry::new(100.0, 100.0, 30.0, 30.0));
}

#[test]
fn test_nw_resize_keeps_se_corner() {
    let mut editor = Editor::new();
    let id = editor.add_element(ElementKind::Shape);

    editor.handle_pointer(&down(100.0, 100.0));
    assert!(matches!(
        editor.interaction_state(),
        folio_core::InteractionState::Resizing(r) if r.handle == HandleKind::NW
    ));
    editor.handle_pointer(&moved(400.0, 90.0));
    editor.handle_pointer(&up(400.0, 90.0));

    let g = editor.store.get(id).unwrap().geometry();
    assert!((g.x + g.width - 200.0).abs() < f64::EPSILON);
    assert!((g.y + g.height - 200.0).abs() < f64::EPSILON);
    assert!((g.width - 20.0).abs() < f64::EPSILON);
    assert!((g.height - 110.0).abs() < f64::EPSILON);
}

const ZOOMS: [f64; 4] = [0.25, 0.5, 1.0, 3.0];
const SCREEN_MOVES: [(f64, f64); 5] = [
    (30.0, -20.0),
    (-500.0, -500.0),
    (200.0, 200.0),
    (-40.0, 60.0),
    (1.0, 1.0),
];

fn editor_with_box(zoom: f64, rotation: f64) -> (Editor, folio_core::ElementId) {
    let mut editor = Editor::new();
    let mut element =
        Element::create(ElementKind::Shape).with_geometry(Geometry::new(300.0, 300.0, 100.0, 100.0));
    element.style.rotation = rotation;
    let id = editor.insert_element(element);
    editor.transform.set_zoom(zoom);
    (editor, id)
}

fn assert_anchor(g: Geometry, handle: HandleKind) {
    // Edges the handle does not drag stay at 300 (near) or 400 (far)
    let (left, top) = (g.x, g.y);
    let (right, bottom) = (g.x + g.width, g.y + g.height);
    let moves_left = matches!(handle, HandleKind::W | HandleKind::NW | HandleKind::SW);
    let moves_right = matches!(handle, HandleKind::E | HandleKind::NE | HandleKind::SE);
    let moves_top = matches!(handle, HandleKind::N | HandleKind::NE | HandleKind::NW);
    let moves_bottom = matches!(handle, HandleKind::S | HandleKind::SE | HandleKind::SW);
    if !moves_left {
        assert!((left - 300.0).abs() < 1e-9, "{handle:?} moved left edge: {g:?}");
    }
    if !moves_right {
        assert!((right - 400.0).abs() < 1e-9, "{handle:?} moved right edge: {g:?}");
    }
    if !moves_top {
        assert!((top - 300.0).abs() < 1e-9, "{handle:?} moved top edge: {g:?}");
    }
    if !moves_bottom {
        assert!((bottom - 400.0).abs() < 1e-9, "{handle:?} moved bottom edge: {g:?}");
    }
}

#[test]
fn test_resize_every_handle_at_every_zoom() {
    for zoom in ZOOMS {
        for rotation in [0.0, 30.0] {
            for handle in HandleKind::all() {
                let (mut editor, id) = editor_with_box(zoom, rotation);
                let canvas = get_handles(editor.store.get(id).unwrap())
                    .into_iter()
                    .find(|h| h.kind == *handle)
                    .unwrap()
                    .position;
                let start = editor.transform.canvas_to_screen(canvas);

                editor.handle_pointer(&down(start.x, start.y));
                assert!(
                    matches!(editor.interaction_state(), InteractionState::Resizing(r) if r.handle == *handle),
                    "zoom {zoom} rotation {rotation}: {handle:?} not grabbed"
                );
                for (dx, dy) in SCREEN_MOVES {
                    editor.handle_pointer(&moved(start.x + dx, start.y + dy));
                    assert_invariants(&editor.store);
                    assert_anchor(editor.store.get(id).unwrap().geometry(), *handle);
                }
                editor.handle_pointer(&up(start.x, start.y));
                assert!(editor.interaction().is_idle());
            }
        }
    }
}

#[test]
fn test_drag_at_every_zoom() {
    for zoom in ZOOMS {
        for rotation in [0.0, 30.0] {
            let (mut editor, id) = editor_with_box(zoom, rotation);
            let start = editor.transform.canvas_to_screen(Point::new(350.0, 350.0));

            editor.handle_pointer(&down(start.x, start.y));
            assert!(matches!(editor.interaction_state(), InteractionState::Dragging(_)));
            for (dx, dy) in SCREEN_MOVES {
                editor.handle_pointer(&moved(start.x + dx, start.y + dy));
                assert_invariants(&editor.store);
                let g = editor.store.get(id).unwrap().geometry();
                let expected_x = (300.0 + dx / zoom).max(0.0);
                let expected_y = (300.0 + dy / zoom).max(0.0);
                assert!((g.x - expected_x).abs() < 1e-9, "zoom {zoom}: {g:?}");
                assert!((g.y - expected_y).abs() < 1e-9, "zoom {zoom}: {g:?}");
                assert!((g.width - 100.0).abs() < f64::EPSILON);
            }
            editor.handle_pointer(&up(start.x, start.y));
        }
    }
}

#[test]
fn test_duplicate_button() {
    let mut editor = Editor::new();
    let id = editor.add_element(ElementKind::Button);
    editor
        .store
        .update(id, &folio_core::ElementPatch::new().position(80.0, 350.0));

    editor.handle_key(&ctrl('d'));

    assert_eq!(editor.element_count(), 2);
    let copy = editor.store.selected().unwrap();
    assert_ne!(copy.id(), id);
    assert_eq!(copy.content, "Click Me");
    assert_eq!(copy.geometry(), Geometry::new(100.0, 370.0, 120.0, 40.0));
    assert_eq!(copy.style, editor.store.get(id).unwrap().style);
    assert!(editor.clipboard.is_empty());
}

#[test]
fn test_delete_selected() {
    let mut editor = Editor::new();
    let id = editor.add_element(ElementKind::Image);

    editor.handle_key(&KeyEvent::plain(Key::Delete));

    assert!(!editor.store.contains(id));
    assert!(editor.selected_id().is_none());
}

#[test]
fn test_paste_uses_copied_snapshot() {
    let mut editor = Editor::new();
    let a = editor.add_element(ElementKind::Text);
    editor.handle_key(&ctrl('c'));

    let b = editor.add_element(ElementKind::Shape);
    editor
        .store
        .update(b, &folio_core::ElementPatch::new().position(500.0, 500.0));
    assert_eq!(editor.selected_id(), Some(b));

    editor.handle_key(&ctrl('v'));

    assert_eq!(editor.element_count(), 3);
    let pasted = editor.store.selected().unwrap();
    assert_ne!(pasted.id(), a);
    assert_eq!(pasted.kind(), ElementKind::Text);
    assert_eq!(pasted.geometry(), Geometry::new(120.0, 120.0, 200.0, 40.0));
}

#[test]
fn test_paste_without_selection() {
    let mut editor = Editor::new();
    editor.add_element(ElementKind::Icon);
    editor.handle_key(&ctrl('c'));
    editor.handle_key(&KeyEvent::plain(Key::Escape));
    assert!(editor.selected_id().is_none());

    assert!(editor.handle_key(&ctrl('v')));
    assert_eq!(editor.element_count(), 2);
}

#[test]
fn test_nudge_sequence() {
    let mut editor = Editor::new();
    let id = editor.add_element(ElementKind::Shape);
    editor.handle_key(&KeyEvent::new(Key::ArrowLeft, Modifiers::SHIFT));
    editor.handle_key(&KeyEvent::plain(Key::ArrowUp));
    let g = editor.store.get(id).unwrap().geometry();
    assert!((g.x - 90.0).abs() < f64::EPSILON);
    assert!((g.y - 99.0).abs() < f64::EPSILON);

    for _ in 0..20 {
        editor.handle_key(&KeyEvent::new(Key::ArrowUp, Modifiers::SHIFT));
    }
    assert!(editor.store.get(id).unwrap().geometry().y.abs() < f64::EPSILON);
    assert_invariants(&editor.store);
}

#[test]
fn test_text_edit_round_trip_through_json() {
    let mut editor = Editor::new();
    let id = editor.add_element(ElementKind::Text);
    editor.handle_pointer(&PointerEvent::DoubleClick {
        position: Point::new(110.0, 110.0),
    });
    editor.set_edit_text("About me");
    editor.handle_key(&KeyEvent::plain(Key::Enter));
    assert_eq!(editor.store.get(id).unwrap().content, "About me");

    let json = editor.snapshot().to_json().unwrap();
    let restored = folio_core::DesignSnapshot::from_json(&json).unwrap();
    assert_eq!(restored, editor.snapshot());
}

struct CountingCapture {
    held: Rc<Cell<i32>>,
}

impl PointerCapture for CountingCapture {
    fn acquire(&mut self) {
        self.held.set(self.held.get() + 1);
    }

    fn release(&mut self) {
        self.held.set(self.held.get() - 1);
    }
}

#[test]
fn test_listeners_never_leak() {
    let held = Rc::new(Cell::new(0));
    let mut editor = Editor::new().with_capture(Box::new(CountingCapture { held: held.clone() }));
    editor.add_element(ElementKind::Shape);

    editor.handle_pointer(&down(150.0, 150.0));
    assert_eq!(held.get(), 1);
    editor.handle_pointer(&moved(2000.0, 2000.0));
    // Released even though the pointer left the element
    editor.handle_pointer(&up(2000.0, 2000.0));
    assert_eq!(held.get(), 0);

    editor.handle_pointer(&down(1000.0, 1000.0));
    editor.handle_pointer(&PointerEvent::Leave);
    assert_eq!(held.get(), 0);

    // The shape now sits at (1950,1950)
    editor.handle_pointer(&down(2000.0, 2000.0));
    assert_eq!(held.get(), 1);
    editor.handle_pointer(&PointerEvent::Leave);
    editor.handle_pointer(&PointerEvent::Leave);
    assert_eq!(held.get(), 0);
}
