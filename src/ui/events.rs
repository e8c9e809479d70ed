use std::collections::HashMap;

use super::WidgetId;

/// Discriminant used to subscribe to a class of events on one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Clicked,
    Toggled,
    RowSelected,
    RowUnselected,
    RowDoubleClicked,
    ScrollChanged,
    SplitterMoved,
    ZoomChanged,
    PanelZoomed,
    PanelUnZoomed,
    TabSelected,
    TabRemoved,
    ValueChanged,
}

/// Notification raised by a widget. `source` is always the widget the
/// listener subscribed on (the list box for row events, the tab control for
/// tab events).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Clicked { source: WidgetId },
    Toggled { source: WidgetId, on: bool },
    RowSelected { source: WidgetId, row: WidgetId },
    RowUnselected { source: WidgetId, row: WidgetId },
    RowDoubleClicked { source: WidgetId, row: WidgetId },
    ScrollChanged { source: WidgetId, amount: f32 },
    /// `value` is the splitter fraction, or the label width in pixels for
    /// property grids.
    SplitterMoved { source: WidgetId, value: f32 },
    ZoomChanged { source: WidgetId, zoomed: Option<usize> },
    PanelZoomed { source: WidgetId, section: usize },
    PanelUnZoomed { source: WidgetId },
    TabSelected { source: WidgetId, button: WidgetId },
    TabRemoved { source: WidgetId, button: WidgetId },
    ValueChanged { source: WidgetId, row: WidgetId },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Clicked { .. } => EventKind::Clicked,
            Event::Toggled { .. } => EventKind::Toggled,
            Event::RowSelected { .. } => EventKind::RowSelected,
            Event::RowUnselected { .. } => EventKind::RowUnselected,
            Event::RowDoubleClicked { .. } => EventKind::RowDoubleClicked,
            Event::ScrollChanged { .. } => EventKind::ScrollChanged,
            Event::SplitterMoved { .. } => EventKind::SplitterMoved,
            Event::ZoomChanged { .. } => EventKind::ZoomChanged,
            Event::PanelZoomed { .. } => EventKind::PanelZoomed,
            Event::PanelUnZoomed { .. } => EventKind::PanelUnZoomed,
            Event::TabSelected { .. } => EventKind::TabSelected,
            Event::TabRemoved { .. } => EventKind::TabRemoved,
            Event::ValueChanged { .. } => EventKind::ValueChanged,
        }
    }

    pub fn source(&self) -> WidgetId {
        match *self {
            Event::Clicked { source }
            | Event::Toggled { source, .. }
            | Event::RowSelected { source, .. }
            | Event::RowUnselected { source, .. }
            | Event::RowDoubleClicked { source, .. }
            | Event::ScrollChanged { source, .. }
            | Event::SplitterMoved { source, .. }
            | Event::ZoomChanged { source, .. }
            | Event::PanelZoomed { source, .. }
            | Event::PanelUnZoomed { source }
            | Event::TabSelected { source, .. }
            | Event::TabRemoved { source, .. }
            | Event::ValueChanged { source, .. } => source,
        }
    }
}

pub type Listener = Box<dyn FnMut(&Event)>;

/// Typed listener registry keyed by (widget, event kind).
/// Dispatch is synchronous and in subscription order.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<(WidgetId, EventKind), Vec<Listener>>,
    /// Every event emitted since the last `drain_log`, for callers that
    /// poll instead of subscribing.
    log: Vec<Event>,
    record: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, source: WidgetId, kind: EventKind, listener: Listener) {
        self.listeners.entry((source, kind)).or_default().push(listener);
    }

    pub fn emit(&mut self, event: Event) {
        if self.record {
            self.log.push(event.clone());
        }
        if let Some(listeners) = self.listeners.get_mut(&(event.source(), event.kind())) {
            for listener in listeners.iter_mut() {
                listener(&event);
            }
        }
    }

    /// Drop every listener registered on `source`.
    pub fn forget(&mut self, source: WidgetId) {
        self.listeners.retain(|(id, _), _| *id != source);
    }

    pub fn listener_count(&self, source: WidgetId) -> usize {
        self.listeners
            .iter()
            .filter(|((id, _), _)| *id == source)
            .map(|(_, v)| v.len())
            .sum()
    }

    /// Start or stop keeping a copy of emitted events.
    pub fn set_recording(&mut self, record: bool) {
        self.record = record;
        if !record {
            self.log.clear();
        }
    }

    /// Take all events recorded since the last call.
    pub fn drain_log(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ids() -> (WidgetId, WidgetId) {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    #[test]
    fn emit_reaches_matching_listener_only() {
        let (a, b) = ids();
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let h = hits.clone();
        bus.subscribe(a, EventKind::Clicked, Box::new(move |e| h.borrow_mut().push(e.clone())));
        let h = hits.clone();
        bus.subscribe(b, EventKind::Clicked, Box::new(move |e| h.borrow_mut().push(e.clone())));

        bus.emit(Event::Clicked { source: a });
        bus.emit(Event::Toggled { source: a, on: true });

        assert_eq!(*hits.borrow(), vec![Event::Clicked { source: a }]);
    }

    #[test]
    fn forget_drops_all_kinds_for_widget() {
        let (a, b) = ids();
        let mut bus = EventBus::new();
        bus.subscribe(a, EventKind::Clicked, Box::new(|_| {}));
        bus.subscribe(a, EventKind::Toggled, Box::new(|_| {}));
        bus.subscribe(b, EventKind::Clicked, Box::new(|_| {}));

        bus.forget(a);
        assert_eq!(bus.listener_count(a), 0);
        assert_eq!(bus.listener_count(b), 1);
    }

    #[test]
    fn recording_collects_and_drains() {
        let (a, _) = ids();
        let mut bus = EventBus::new();
        bus.emit(Event::Clicked { source: a });
        assert!(bus.drain_log().is_empty());

        bus.set_recording(true);
        bus.emit(Event::Clicked { source: a });
        bus.emit(Event::PanelUnZoomed { source: a });
        assert_eq!(bus.drain_log().len(), 2);
        assert!(bus.drain_log().is_empty());
    }
}
