use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chart_sync::ChartError;
use chart_sync::api::{ChangeSet, ChartEngine};
use chart_sync::core::{ChartKind, ChartOptions, ChartSpec, Viewport};
use chart_sync::extensions::{ChartPlugin, PluginContext, PluginEvent, SharedPlugin};
use chart_sync::interaction::{ActiveElement, ChartEvent, InteractionHook, PointerEvent};
use chart_sync::render::{HeadlessBackend, LiveChart, Surface};

struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn shared(
        id: impl Into<String>,
        events: Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>,
    ) -> SharedPlugin {
        Rc::new(RefCell::new(Self {
            id: id.into(),
            events,
        }))
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: PluginEvent, context: PluginContext) {
        self.events.borrow_mut().push((event, context));
    }
}

fn engine_with(spec: ChartSpec) -> ChartEngine<HeadlessBackend> {
    let surface = Surface::new(Viewport::new(400, 300));
    ChartEngine::new(HeadlessBackend::new(), surface, spec)
}

fn line_spec() -> ChartSpec {
    ChartSpec::new(ChartKind::Line)
        .with_labels(["a", "b"])
        .with_data(vec![vec![1.0, 2.0]])
}

#[test]
fn default_hooks_emit_hover_and_click_events() {
    let mut engine = engine_with(line_spec());
    engine.initialize().expect("initialize");
    let chart = engine.chart().expect("live chart");

    let none: &[ActiveElement] = &[];
    let hovered = [ActiveElement::new(0, 1)];
    chart
        .borrow()
        .dispatch_hover(PointerEvent::moved(10.0, 10.0), Some(none));
    chart
        .borrow()
        .dispatch_hover(PointerEvent::moved(12.0, 10.0), Some(&hovered[..]));
    chart
        .borrow()
        .dispatch_click(PointerEvent::clicked(12.0, 10.0), Some(none));

    assert_eq!(
        engine.drain_events(),
        vec![
            ChartEvent::Hover {
                event: PointerEvent::moved(12.0, 10.0),
                active: vec![ActiveElement::new(0, 1)],
            },
            ChartEvent::Click {
                event: PointerEvent::clicked(12.0, 10.0),
                active: Vec::new(),
            },
        ]
    );
    assert!(engine.drain_events().is_empty());
}

#[test]
fn caller_hooks_are_never_overwritten() {
    let clicks = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&clicks);
    let on_click: InteractionHook = Rc::new(move |_event, _active| {
        counter.set(counter.get() + 1);
    });
    let spec = line_spec().with_options(ChartOptions::new().with_on_click(on_click));

    let mut engine = engine_with(spec);
    engine.initialize().expect("initialize");
    let chart = engine.chart().expect("live chart");
    chart
        .borrow()
        .dispatch_click(PointerEvent::clicked(1.0, 1.0), None);
    chart
        .borrow()
        .dispatch_hover(PointerEvent::moved(1.0, 1.0), None);

    assert_eq!(clicks.get(), 1);
    let events = engine.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ChartEvent::Hover { .. }));
}

#[test]
fn legend_false_is_applied_at_build_time() {
    let mut engine = engine_with(line_spec().with_legend(false));
    engine.initialize().expect("initialize");

    let chart = engine.chart().expect("live chart");
    let display = chart.borrow().options().legend_display();
    assert_eq!(display, Some(false));
}

#[test]
fn plugins_observe_chart_lifecycle() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let spec = line_spec().with_plugin(RecordingPlugin::shared("recorder", events.clone()));
    let mut engine = engine_with(spec);

    engine.initialize().expect("initialize");
    let _ = engine
        .apply(ChangeSet::new().with_labels(["x", "y", "z"]))
        .expect("apply labels");
    engine.teardown();

    let events = events.borrow();
    let kinds: Vec<PluginEvent> = events.iter().map(|(event, _)| *event).collect();
    assert_eq!(
        kinds,
        vec![
            PluginEvent::Installed,
            PluginEvent::Redrawn,
            PluginEvent::Destroyed
        ]
    );
    assert_eq!(events[1].1.labels_len, 3);
    assert_eq!(events[1].1.datasets_len, 1);
    assert_eq!(events[1].1.kind, ChartKind::Line);
}

#[test]
fn duplicate_plugin_ids_fail_the_build() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let spec = line_spec()
        .with_plugin(RecordingPlugin::shared("dup", events.clone()))
        .with_plugin(RecordingPlugin::shared("dup", events.clone()));
    let mut engine = engine_with(spec);

    let err = engine.initialize().expect_err("duplicate ids must fail");
    assert!(matches!(err, ChartError::InvalidPlugin(_)));
    assert!(!engine.has_chart());
    assert!(events.borrow().is_empty());
}

#[test]
fn empty_plugin_id_fails_the_build() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let spec = line_spec().with_plugin(RecordingPlugin::shared("", events));
    let mut engine = engine_with(spec);

    assert!(matches!(
        engine.initialize(),
        Err(ChartError::InvalidPlugin(_))
    ));
}
