use std::fmt;

use kurbo::Point;

/// Pointer event categories the engine can route to shapes.
///
/// Names follow the DOM event names so hosts wrapping a browser-like surface
/// can map them one to one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum EventKind {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    MouseMove,
    ContextMenu,
}

impl EventKind {
    /// Every routable kind, in handler-table order.
    pub const ALL: [EventKind; 6] = [
        EventKind::Click,
        EventKind::DblClick,
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::MouseMove,
        EventKind::ContextMenu,
    ];

    /// Position of this kind inside [`EventKind::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            EventKind::Click => 0,
            EventKind::DblClick => 1,
            EventKind::MouseDown => 2,
            EventKind::MouseUp => 3,
            EventKind::MouseMove => 4,
            EventKind::ContextMenu => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::DblClick => "dblclick",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseMove => "mousemove",
            EventKind::ContextMenu => "contextmenu",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Modifier keys held while the event fired.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Raw pointer input as delivered by the surface.
///
/// `client` is in the global pointer frame (not surface-local); the probe
/// converts it using the surface offset at dispatch time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub client: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    #[inline]
    pub fn new(kind: EventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            client: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    #[inline]
    pub fn click(x: f64, y: f64) -> Self {
        Self::new(EventKind::Click, x, y)
    }

    #[inline]
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    #[inline]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_name() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EventKind::from_name("keydown"), None);
    }

    #[test]
    fn index_matches_table_position() {
        for (i, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn click_builder_defaults_to_left_button() {
        let ev = PointerEvent::click(3.0, 4.0).with_modifiers(Modifiers { shift: true, ..Default::default() });
        assert_eq!(ev.kind, EventKind::Click);
        assert_eq!(ev.button, MouseButton::Left);
        assert!(ev.modifiers.any());
    }
}
