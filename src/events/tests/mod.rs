//! Unit tests for the event bus

#![allow(clippy::unwrap_used)]

use std::{cell::RefCell, rc::Rc};

use serde_json::json;

use crate::{
    config_store::ConfigChange,
    events::{ClockEvent, EventBus, EventKind},
};

fn theme_changed(name: &str) -> ClockEvent {
    ClockEvent::ThemeChanged {
        name: name.to_string(),
    }
}

#[test]
fn handlers_only_see_their_kind() {
    let mut bus = EventBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    bus.subscribe(EventKind::ThemeChanged, move |event| {
        sink.borrow_mut().push(event.clone());
        Ok(())
    });

    bus.publish(&ClockEvent::CloseRequested);
    bus.publish(&theme_changed("Dark"));

    assert_eq!(*seen.borrow(), vec![theme_changed("Dark")]);
}

#[test]
fn failing_handler_does_not_stop_others() {
    let mut bus = EventBus::new();
    let calls = Rc::new(RefCell::new(0));

    bus.subscribe(EventKind::CloseRequested, |_| Err("boom".into()));
    let counter = Rc::clone(&calls);
    bus.subscribe(EventKind::CloseRequested, move |_| {
        *counter.borrow_mut() += 1;
        Ok(())
    });

    let failures = bus.publish(&ClockEvent::CloseRequested);

    assert_eq!(failures, 1);
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn unsubscribe_stops_delivery() {
    let mut bus = EventBus::new();
    let calls = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&calls);
    let id = bus.subscribe(EventKind::SettingChanged, move |_| {
        *counter.borrow_mut() += 1;
        Ok(())
    });

    let event = ClockEvent::SettingChanged {
        change: ConfigChange::new("radius".to_string(), Some(json!(150)), json!(200)),
    };
    bus.publish(&event);

    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    bus.publish(&event);

    assert_eq!(*calls.borrow(), 1);
    assert!(bus.is_empty());
}

#[test]
fn publish_without_subscribers_reports_no_failures() {
    let mut bus = EventBus::new();

    assert_eq!(bus.publish(&theme_changed("Neon")), 0);
}

#[test]
fn subscription_ids_are_unique() {
    let mut bus = EventBus::new();

    let first = bus.subscribe(EventKind::ThemeChanged, |_| Ok(()));
    let second = bus.subscribe(EventKind::ThemeChanged, |_| Ok(()));

    assert_ne!(first, second);
    assert_eq!(bus.len(), 2);
}
