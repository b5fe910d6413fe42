use chrono::NaiveDateTime;

/// Menu box width in pixels, matching the day-events dropdown.
pub const MENU_WIDTH: i32 = 320;
/// Minimum gap kept between the menu and the right viewport edge.
pub const MENU_MARGIN: i32 = 20;
/// Vertical gap between the anchor cell and the menu.
const ANCHOR_GAP: i32 = 8;

/// Screen rectangle of the day cell the menu is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuPosition {
    pub left: i32,
    pub top: i32,
}

/// One hidden event, carried with enough display data that the menu needs
/// no further lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowItem {
    pub booking_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub number_label: String,
}

#[derive(Debug, PartialEq)]
enum MenuState {
    Closed,
    Open {
        position: MenuPosition,
        items: Vec<OverflowItem>,
    },
}

/// The "+X more" dropdown: a positioned, dismiss-on-outside-click list of
/// the events a day cell could not show. At most one exists per grid;
/// reopening simply replaces the previous menu.
#[derive(Debug)]
pub struct OverflowMenu {
    state: MenuState,
}

impl OverflowMenu {
    pub fn new() -> Self {
        Self {
            state: MenuState::Closed,
        }
    }

    /// Open below the anchor, clamped so the menu never overflows the
    /// viewport horizontally.
    pub fn open(&mut self, anchor: AnchorRect, items: Vec<OverflowItem>, viewport: Viewport) {
        let left = anchor.left.min(viewport.width - MENU_WIDTH - MENU_MARGIN);
        let position = MenuPosition {
            left,
            top: anchor.bottom + ANCHOR_GAP,
        };
        self.state = MenuState::Open { position, items };
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    /// A click anywhere outside the menu dismisses it.
    pub fn outside_click(&mut self) {
        self.close();
    }

    /// Pick an entry; the menu closes and the chosen item is handed back so
    /// the grid can open the edit flow.
    pub fn select(&mut self, index: usize) -> Option<OverflowItem> {
        let picked = match &self.state {
            MenuState::Open { items, .. } => items.get(index).cloned(),
            MenuState::Closed => None,
        };
        if picked.is_some() {
            self.close();
        }
        picked
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    pub fn position(&self) -> Option<MenuPosition> {
        match &self.state {
            MenuState::Open { position, .. } => Some(*position),
            MenuState::Closed => None,
        }
    }

    pub fn items(&self) -> &[OverflowItem] {
        match &self.state {
            MenuState::Open { items, .. } => items,
            MenuState::Closed => &[],
        }
    }
}

impl Default for OverflowMenu {
    fn default() -> Self {
        Self::new()
    }
}
