use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Move,
    Click,
}

/// Pointer input forwarded by the plotting library, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    #[must_use]
    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Move,
            x,
            y,
        }
    }

    #[must_use]
    pub fn clicked(x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Click,
            x,
            y,
        }
    }
}

/// Chart element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveElement {
    pub dataset_index: usize,
    pub index: usize,
}

impl ActiveElement {
    #[must_use]
    pub fn new(dataset_index: usize, index: usize) -> Self {
        Self {
            dataset_index,
            index,
        }
    }
}

/// Hover/click handler stored in chart options.
///
/// The active list is `None` when the library reports no element list at all.
pub type InteractionHook = Rc<dyn Fn(&PointerEvent, Option<&[ActiveElement]>)>;

/// Outward events emitted by the default interaction hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    Hover {
        event: PointerEvent,
        active: Vec<ActiveElement>,
    },
    Click {
        event: PointerEvent,
        active: Vec<ActiveElement>,
    },
}

/// FIFO of emitted [`ChartEvent`]s shared between an engine and its hooks.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<ChartEvent>>>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: ChartEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    #[must_use]
    pub fn drain(&self) -> Vec<ChartEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// Hover hook that forwards to `queue`. An active list that is present but
/// empty means the pointer left every element and is not reported.
#[must_use]
pub fn default_hover_hook(queue: EventQueue) -> InteractionHook {
    Rc::new(move |event: &PointerEvent, active: Option<&[ActiveElement]>| {
        if active.is_some_and(<[ActiveElement]>::is_empty) {
            return;
        }
        queue.push(ChartEvent::Hover {
            event: *event,
            active: active.map(<[ActiveElement]>::to_vec).unwrap_or_default(),
        });
    })
}

/// Click hook that forwards every click to `queue`.
#[must_use]
pub fn default_click_hook(queue: EventQueue) -> InteractionHook {
    Rc::new(move |event: &PointerEvent, active: Option<&[ActiveElement]>| {
        queue.push(ChartEvent::Click {
            event: *event,
            active: active.map(<[ActiveElement]>::to_vec).unwrap_or_default(),
        });
    })
}
