use crate::schedule::overflow::{
    AnchorRect, MENU_MARGIN, MENU_WIDTH, OverflowItem, OverflowMenu, Viewport,
};

fn item(id: &str) -> OverflowItem {
    OverflowItem {
        booking_id: id.to_string(),
        title: format!("booking {id}"),
        start: super::dt(2024, 3, 15, 9, 0),
        end: super::dt(2024, 3, 15, 10, 0),
        number_label: id.to_string(),
    }
}

fn anchor_at(left: i32) -> AnchorRect {
    AnchorRect {
        left,
        top: 200,
        right: left + 120,
        bottom: 280,
    }
}

const VIEWPORT: Viewport = Viewport {
    width: 1000,
    height: 800,
};

#[test]
fn menu_opens_below_the_anchor() {
    let mut menu = OverflowMenu::new();
    menu.open(anchor_at(100), vec![item("b1")], VIEWPORT);

    assert!(menu.is_open());
    let position = menu.position().unwrap();
    assert_eq!(position.left, 100);
    assert_eq!(position.top, 288);
    assert_eq!(menu.items().len(), 1);
}

#[test]
fn menu_clamps_against_the_right_viewport_edge() {
    let mut menu = OverflowMenu::new();
    menu.open(anchor_at(900), vec![item("b1")], VIEWPORT);

    let position = menu.position().unwrap();
    assert_eq!(position.left, VIEWPORT.width - MENU_WIDTH - MENU_MARGIN);
    assert!(position.left + MENU_WIDTH + MENU_MARGIN <= VIEWPORT.width);
}

#[test]
fn outside_click_dismisses() {
    let mut menu = OverflowMenu::new();
    menu.open(anchor_at(100), vec![item("b1")], VIEWPORT);

    menu.outside_click();
    assert!(!menu.is_open());
    assert!(menu.position().is_none());
    assert!(menu.items().is_empty());
}

#[test]
fn selection_returns_the_item_and_closes() {
    let mut menu = OverflowMenu::new();
    menu.open(anchor_at(100), vec![item("b1"), item("b2")], VIEWPORT);

    let picked = menu.select(1).unwrap();
    assert_eq!(picked.booking_id, "b2");
    assert!(!menu.is_open());
}

#[test]
fn out_of_range_selection_leaves_the_menu_open() {
    let mut menu = OverflowMenu::new();
    menu.open(anchor_at(100), vec![item("b1")], VIEWPORT);

    assert!(menu.select(5).is_none());
    assert!(menu.is_open());
    assert!(menu.select(0).is_some());
}

#[test]
fn reopening_replaces_the_previous_menu() {
    let mut menu = OverflowMenu::new();
    menu.open(anchor_at(100), vec![item("b1")], VIEWPORT);
    menu.open(anchor_at(400), vec![item("b2"), item("b3")], VIEWPORT);

    assert_eq!(menu.position().unwrap().left, 400);
    let ids: Vec<&str> = menu.items().iter().map(|i| i.booking_id.as_str()).collect();
    assert_eq!(ids, vec!["b2", "b3"]);
}
