// Property-based checks of the subscriber list and reverse index invariants
use proptest::prelude::*;

use observer_registry::{EventHistory, Observer, ObserverHandle, Publisher};

const OBSERVERS: usize = 4;
const EVENTS: u8 = 3;

struct Quiet {
    history: EventHistory<u8, ()>,
}

impl Observer<u8, ()> for Quiet {
    fn history(&self) -> &EventHistory<u8, ()> {
        &self.history
    }

    fn history_mut(&mut self) -> &mut EventHistory<u8, ()> {
        &mut self.history
    }
}

#[derive(Debug, Clone)]
enum Op {
    AddEvent(u8),
    RemoveEvent(u8),
    Attach { observer: usize, event: u8, priority: i32 },
    Detach { observer: usize, event: u8 },
    DetachAll(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..EVENTS).prop_map(Op::AddEvent),
        (0..EVENTS).prop_map(Op::RemoveEvent),
        (0..OBSERVERS, 0..EVENTS, -5i32..5).prop_map(|(observer, event, priority)| Op::Attach {
            observer,
            event,
            priority
        }),
        (0..OBSERVERS, 0..EVENTS).prop_map(|(observer, event)| Op::Detach { observer, event }),
        (0..OBSERVERS).prop_map(Op::DetachAll),
    ]
}

/// Straightforward reference model: registered events map to (priority, observer) lists
#[derive(Default)]
struct Model {
    events: Vec<(u8, Vec<(i32, usize)>)>,
}

impl Model {
    fn list_mut(&mut self, event: u8) -> Option<&mut Vec<(i32, usize)>> {
        self.events.iter_mut().find(|(e, _)| *e == event).map(|(_, list)| list)
    }

    fn apply(&mut self, op: &Op) {
        match *op {
            Op::AddEvent(event) => {
                if self.list_mut(event).is_none() {
                    self.events.push((event, Vec::new()));
                }
            }
            Op::RemoveEvent(event) => self.events.retain(|(e, _)| *e != event),
            Op::Attach { observer, event, priority } => {
                if let Some(list) = self.list_mut(event) {
                    if !list.iter().any(|(_, o)| *o == observer) {
                        // Stable: after every entry whose priority is <= the new one
                        let at = list.iter().take_while(|(p, _)| *p <= priority).count();
                        list.insert(at, (priority, observer));
                    }
                }
            }
            Op::Detach { observer, event } => {
                if let Some(list) = self.list_mut(event) {
                    list.retain(|(_, o)| *o != observer);
                }
            }
            Op::DetachAll(observer) => {
                for (_, list) in &mut self.events {
                    list.retain(|(_, o)| *o != observer);
                }
            }
        }
    }

    fn list(&self, event: u8) -> Vec<(i32, usize)> {
        self.events
            .iter()
            .find(|(e, _)| *e == event)
            .map(|(_, list)| list.clone())
            .unwrap_or_default()
    }
}

proptest! {
    #[test]
    fn registry_matches_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let handles: Vec<ObserverHandle<u8, ()>> = (0..OBSERVERS)
            .map(|_| ObserverHandle::new(Quiet { history: EventHistory::new() }))
            .collect();
        let mut publisher = Publisher::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                Op::AddEvent(event) => publisher.add_event(event),
                Op::RemoveEvent(event) => publisher.remove_event(&event),
                Op::Attach { observer, event, priority } => {
                    publisher.attach_one(&handles[observer], priority, &event)
                }
                Op::Detach { observer, event } => publisher.detach_one(&handles[observer], &event),
                Op::DetachAll(observer) => publisher.detach_all(&handles[observer]),
            }
            model.apply(op);
        }

        for event in 0..EVENTS {
            let actual: Vec<(i32, usize)> = publisher
                .get_observers(&event)
                .iter()
                .map(|(priority, handle)| {
                    let index = handles.iter().position(|h| h == handle).unwrap();
                    (*priority, index)
                })
                .collect();

            // Sorted, stable, duplicate free
            prop_assert!(actual.windows(2).all(|pair| pair[0].0 <= pair[1].0));
            prop_assert_eq!(&actual, &model.list(event));

            // Reverse index agrees with the forward lists, and so does observer history
            for (index, handle) in handles.iter().enumerate() {
                let listed = actual.iter().any(|(_, o)| *o == index);
                prop_assert_eq!(publisher.has_subscription(handle, &event), listed);
                prop_assert_eq!(handle.lock().history().contains(&event), listed);
            }
        }
    }
}
