//! Deferred delivery of engine notifications to host callbacks.
//!
//! Engine listeners only enqueue. `WebGame` drains the queue once its
//! engine borrow has ended, so a host callback is free to call back into
//! the handle.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use dash_engine::{EventKind, GameEngine};

/// One notification waiting for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Event(EventKind, Option<u32>),
    Score(u32),
    Mute(bool),
}

#[derive(Clone, Default)]
pub struct Outbox {
    queue: Rc<RefCell<VecDeque<Delivery>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every engine event, score change and mute change into this
    /// outbox.
    pub fn attach(&self, engine: &mut GameEngine) {
        for kind in EventKind::ALL {
            let outbox = self.clone();
            engine.subscribe(kind, move |ev| {
                outbox.push(Delivery::Event(ev.kind(), ev.payload()))
            });
        }
        let outbox = self.clone();
        engine.set_score_change_callback(move |score| outbox.push(Delivery::Score(score)));
        let outbox = self.clone();
        engine
            .audio_mut()
            .on_mute_change(move |muted| outbox.push(Delivery::Mute(muted)));
    }

    fn push(&self, delivery: Delivery) {
        self.queue.borrow_mut().push_back(delivery);
    }

    pub fn pop(&self) -> Option<Delivery> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Event(EventKind),
    Mute,
}

/// Host callbacks keyed by listener id.
pub struct Registry<F> {
    entries: Vec<(u32, Topic, F)>,
    score: Option<F>,
    next_id: u32,
}

impl<F: Clone> Registry<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            score: None,
            next_id: 1,
        }
    }

    pub fn add(&mut self, topic: Topic, callback: F) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, topic, callback));
        id
    }

    /// Remove listener `id`. `mute` selects between mute listeners and
    /// event listeners, which share one id space.
    pub fn remove(&mut self, id: u32, mute: bool) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|(l, t, _)| !(*l == id && (*t == Topic::Mute) == mute));
        self.entries.len() != before
    }

    pub fn set_score_callback(&mut self, callback: Option<F>) {
        self.score = callback;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.score = None;
    }

    /// Callbacks owed `delivery`, cloned so none of them runs while the
    /// registry is borrowed.
    pub fn targets(&self, delivery: &Delivery) -> Vec<F> {
        let topic = match *delivery {
            Delivery::Score(_) => return self.score.iter().cloned().collect(),
            Delivery::Event(kind, _) => Topic::Event(kind),
            Delivery::Mute(_) => Topic::Mute,
        };
        self.entries
            .iter()
            .filter(|(_, t, _)| *t == topic)
            .map(|(_, _, f)| f.clone())
            .collect()
    }
}

impl<F: Clone> Default for Registry<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_engine::GameConfig;

    fn wired() -> (RefCell<GameEngine>, Outbox) {
        let mut engine = GameEngine::new(GameConfig::default(), None, None).unwrap();
        let outbox = Outbox::new();
        outbox.attach(&mut engine);
        (RefCell::new(engine), outbox)
    }

    #[test]
    fn deliveries_wait_until_the_engine_call_returns() {
        let (engine, outbox) = wired();
        engine.borrow_mut().start().unwrap();

        let mut seen = Vec::new();
        while let Some(delivery) = outbox.pop() {
            // A callback that reads game state must find the engine free.
            assert!(engine.try_borrow_mut().is_ok());
            seen.push(delivery);
        }
        assert_eq!(seen, vec![Delivery::Event(EventKind::GameStart, None)]);
    }

    #[test]
    fn callbacks_may_drive_the_engine_while_draining() {
        let (engine, outbox) = wired();
        engine.borrow_mut().start().unwrap();

        let mut seen = Vec::new();
        while let Some(delivery) = outbox.pop() {
            if delivery == Delivery::Event(EventKind::GameStart, None) {
                assert!(engine.borrow_mut().pause());
                assert!(engine.borrow().is_paused());
            }
            seen.push(delivery);
        }
        assert_eq!(
            seen,
            vec![
                Delivery::Event(EventKind::GameStart, None),
                Delivery::Event(EventKind::Pause, None),
            ]
        );
    }

    #[test]
    fn score_and_mute_changes_are_queued_in_order() {
        let (engine, outbox) = wired();
        engine.borrow_mut().set_score(40);
        engine.borrow_mut().audio_mut().mute();

        let seen: Vec<_> = std::iter::from_fn(|| outbox.pop()).collect();
        assert_eq!(
            seen,
            vec![
                Delivery::Score(40),
                Delivery::Event(EventKind::Score, Some(40)),
                Delivery::Mute(true),
            ]
        );
    }

    #[test]
    fn registry_routes_by_topic() {
        let mut reg: Registry<&'static str> = Registry::new();
        let over = reg.add(Topic::Event(EventKind::GameOver), "over");
        let mute = reg.add(Topic::Mute, "mute");
        reg.set_score_callback(Some("score"));

        assert_eq!(reg.targets(&Delivery::Event(EventKind::GameOver, Some(3))), vec!["over"]);
        assert!(reg.targets(&Delivery::Event(EventKind::Pause, None)).is_empty());
        assert_eq!(reg.targets(&Delivery::Mute(true)), vec!["mute"]);
        assert_eq!(reg.targets(&Delivery::Score(3)), vec!["score"]);

        assert!(!reg.remove(over, true));
        assert!(reg.remove(over, false));
        assert!(reg.remove(mute, true));
        reg.clear();
        assert!(reg.targets(&Delivery::Score(3)).is_empty());
    }
}
