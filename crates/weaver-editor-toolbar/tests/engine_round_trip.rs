//! Toolbar wired to a stand-in editing engine over a shared bus.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use weaver_editor_toolbar::{
    Bus, BusError, BusEvent, ColorKind, ControlAction, EventBus, EventName, Feature,
    HistoryStep, InlineStyle, Intent, InteractionQueue, Listener, ListenerHandle, Notification,
    Presenter, Toolbar, ToolbarConfig, ToolbarError, ToolbarLayout, ToolbarMode,
};

/// Keeps a style set and republishes it whenever a style is toggled.
struct FakeEngine {
    _handles: Vec<ListenerHandle>,
}

impl FakeEngine {
    fn attach(bus: &EventBus) -> Self {
        let styles = Arc::new(Mutex::new(BTreeSet::<String>::new()));

        let toggles = {
            let bus = bus.clone();
            let styles = Arc::clone(&styles);
            bus.clone()
                .subscribe(
                    EventName::ToggleStyle,
                    Arc::new(move |event: &BusEvent| {
                        let BusEvent::Intent(Intent::ToggleStyle { style }) = event else {
                            return;
                        };
                        let snapshot: Vec<String> = {
                            let mut styles = styles.lock().unwrap();
                            if !styles.remove(style.as_str()) {
                                styles.insert(style.as_str().to_owned());
                            }
                            styles.iter().cloned().collect()
                        };
                        bus.emit(Notification::active_styles(snapshot).into());
                    }),
                )
                .unwrap()
        };

        let colors = {
            let bus = bus.clone();
            bus.clone()
                .subscribe(
                    EventName::ChangeColorStyle,
                    Arc::new(move |event: &BusEvent| {
                        let BusEvent::Intent(Intent::ChangeColorStyle(change)) = event else {
                            return;
                        };
                        let style = change.kind.style_id(&change.color);
                        bus.emit(Notification::active_styles([style]).into());
                    }),
                )
                .unwrap()
        };

        Self {
            _handles: vec![toggles, colors],
        }
    }
}

#[derive(Default)]
struct RecordingPresenter {
    frames: Vec<ToolbarLayout>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, layout: &ToolbarLayout) {
        self.frames.push(layout.clone());
    }
}

#[test]
fn toggle_round_trip_updates_active_flag() {
    let bus = EventBus::new();
    let _engine = FakeEngine::attach(&bus);
    let mut toolbar = Toolbar::new(bus.clone(), InteractionQueue::new(), &ToolbarConfig::default());
    toolbar.mount().unwrap();

    let bold = toolbar.layout().find(Feature::Bold).cloned().unwrap();
    assert!(!bold.active);

    toolbar.press(&bold).unwrap();
    assert!(toolbar.layout().find(Feature::Bold).unwrap().active);

    toolbar.press(&bold).unwrap();
    assert!(!toolbar.layout().find(Feature::Bold).unwrap().active);
}

#[test]
fn color_picker_round_trip_highlights_swatch() {
    let bus = EventBus::new();
    let queue = InteractionQueue::new();
    let _engine = FakeEngine::attach(&bus);
    let mut toolbar = Toolbar::new(bus.clone(), queue.clone(), &ToolbarConfig::default());
    toolbar.mount().unwrap();

    let fill_toggle = toolbar.layout().find(Feature::Fill).cloned().unwrap();
    toolbar.press(&fill_toggle).unwrap();
    assert_eq!(toolbar.mode(), ToolbarMode::Fill);

    let green = toolbar
        .layout()
        .scroll
        .into_iter()
        .find(|c| c.swatch.as_deref() == Some("green"))
        .unwrap();
    toolbar.press(&green).unwrap();
    assert!(toolbar.state().active_styles().is_empty());

    queue.settle();
    assert!(toolbar.state().has_style("fill-green"));
    let active: Vec<_> = toolbar
        .layout()
        .scroll
        .into_iter()
        .filter(|c| c.active)
        .filter_map(|c| c.swatch)
        .collect();
    assert_eq!(active, vec!["green"]);
    assert_eq!(ColorKind::Fill.style_id("green"), "fill-green");
}

#[test]
fn history_and_picker_controls_emit_expected_intents() {
    let bus = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut handles = Vec::new();
    for name in [EventName::BrowseHistory, EventName::AlignRow, EventName::HideKeyboard] {
        let sink = Arc::clone(&seen);
        handles.push(
            bus.subscribe(
                name,
                Arc::new(move |e: &BusEvent| sink.lock().unwrap().push(e.clone())),
            )
            .unwrap(),
        );
    }

    let config = ToolbarConfig::default().with_features(["redo", "undo", "format-align-center"]);
    let mut toolbar = Toolbar::new(bus.clone(), InteractionQueue::new(), &config);
    toolbar.mount().unwrap();

    let layout = toolbar.layout();
    assert_eq!(layout.features(), vec![Feature::Align, Feature::Undo, Feature::Redo]);
    toolbar.press(layout.find(Feature::Undo).unwrap()).unwrap();
    toolbar.press(layout.find(Feature::Redo).unwrap()).unwrap();
    toolbar.press(layout.find(Feature::Align).unwrap()).unwrap();

    let align = toolbar.layout();
    toolbar.press(&align.scroll[3]).unwrap();
    toolbar.press(align.trailing.last().unwrap()).unwrap();

    let emitted: Vec<Intent> = seen
        .lock()
        .unwrap()
        .iter()
        .map(|e| match e {
            BusEvent::Intent(i) => i.clone(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        emitted,
        vec![
            Intent::BrowseHistory(HistoryStep::Undo),
            Intent::BrowseHistory(HistoryStep::Redo),
            Intent::AlignRow {
                alignment: weaver_editor_toolbar::Alignment::Right
            },
            Intent::HideKeyboard,
        ]
    );

    for handle in handles {
        assert!(bus.unsubscribe(handle));
    }
}

#[test]
fn partial_registration_failure_leaves_no_listeners() {
    let bus = EventBus::with_listener_limit(1);
    let blocker: Listener = Arc::new(|_: &BusEvent| {});
    let blocker = bus.subscribe(EventName::RowTypeChanged, blocker).unwrap();

    let mut toolbar = Toolbar::new(bus.clone(), InteractionQueue::new(), &ToolbarConfig::default());
    let err = toolbar.mount().unwrap_err();
    assert!(matches!(
        err,
        ToolbarError::Bus(BusError::ListenerLimit {
            name: EventName::RowTypeChanged,
            limit: 1
        })
    ));
    assert!(!toolbar.is_synchronized());
    assert_eq!(bus.listener_count(EventName::ActiveStyleChanged), 0);
    assert_eq!(bus.listener_count(EventName::RowTypeChanged), 1);

    // Still renders from its defaults.
    assert_eq!(toolbar.layout().features().len(), 22);
    toolbar.unmount();
    toolbar.unmount();

    // Once the slot frees up a fresh mount succeeds.
    assert!(bus.unsubscribe(blocker));
    toolbar.mount().unwrap();
    assert!(toolbar.is_synchronized());
    bus.emit(Notification::row_type("heading-3").into());
    assert_eq!(toolbar.state().row_type(), "heading-3");
}

#[test]
fn closed_bus_keeps_toolbar_usable() {
    let bus = EventBus::new();
    bus.close();
    let mut toolbar = Toolbar::new(bus.clone(), InteractionQueue::new(), &ToolbarConfig::default());

    assert!(matches!(
        toolbar.mount(),
        Err(ToolbarError::Bus(BusError::Closed))
    ));
    assert_eq!(bus.total_listeners(), 0);

    toolbar.dispatch(&ControlAction::Open(ToolbarMode::Color)).unwrap();
    assert_eq!(toolbar.layout().mode, ToolbarMode::Color);
}

/// Counts how often each handle is handed back.
#[derive(Clone, Default)]
struct CountingBus {
    inner: EventBus,
    released: Arc<AtomicUsize>,
}

impl Bus for CountingBus {
    fn subscribe(&self, name: EventName, listener: Listener) -> Result<ListenerHandle, BusError> {
        self.inner.subscribe(name, listener)
    }

    fn unsubscribe(&self, handle: ListenerHandle) -> bool {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.inner.unsubscribe(handle)
    }

    fn emit(&self, event: BusEvent) {
        self.inner.emit(event)
    }
}

#[test]
fn each_handle_is_released_exactly_once() {
    let bus = CountingBus::default();
    let mut toolbar = Toolbar::new(bus.clone(), InteractionQueue::new(), &ToolbarConfig::default());
    toolbar.mount().unwrap();
    toolbar.mount().unwrap();

    toolbar.unmount();
    toolbar.unmount();
    drop(toolbar);

    assert_eq!(bus.released.load(Ordering::SeqCst), 2);
    assert_eq!(bus.inner.total_listeners(), 0);
}

#[test]
fn remount_takes_fresh_handles() {
    let bus = EventBus::new();
    let mut toolbar = Toolbar::new(bus.clone(), InteractionQueue::new(), &ToolbarConfig::default());
    toolbar.mount().unwrap();
    toolbar.unmount();
    toolbar.mount().unwrap();

    assert_eq!(bus.listener_count(EventName::ActiveStyleChanged), 1);
    assert_eq!(bus.listener_count(EventName::RowTypeChanged), 1);
}

#[test]
fn two_toolbars_do_not_share_listeners() {
    let bus = EventBus::new();
    let mut first = Toolbar::new(bus.clone(), InteractionQueue::new(), &ToolbarConfig::default());
    let mut second = Toolbar::new(bus.clone(), InteractionQueue::new(), &ToolbarConfig::default());
    first.mount().unwrap();
    second.mount().unwrap();
    assert_eq!(bus.total_listeners(), 4);

    first.unmount();
    assert_eq!(bus.total_listeners(), 2);
    bus.emit(Notification::active_styles(["italic"]).into());
    assert!(second.state().is_style_active(InlineStyle::Italic));
    assert!(first.state().active_styles().is_empty());
}

#[test]
fn presenter_receives_current_layout() {
    let bus = EventBus::new();
    let mut toolbar = Toolbar::new(bus.clone(), InteractionQueue::new(), &ToolbarConfig::default());
    toolbar.mount().unwrap();
    let mut presenter = RecordingPresenter::default();

    toolbar.present(&mut presenter);
    toolbar.dispatch(&ControlAction::Open(ToolbarMode::Align)).unwrap();
    toolbar.present(&mut presenter);

    let modes: Vec<_> = presenter.frames.iter().map(|f| f.mode).collect();
    assert_eq!(modes, vec![ToolbarMode::Default, ToolbarMode::Align]);
}
