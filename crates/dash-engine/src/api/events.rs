//! Typed publish/subscribe channel for engine events.
//!
//! One topic per event kind. Listeners on a topic are called in
//! subscription order, synchronously, inside the call that raised the event.

/// An event raised by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStart,
    Pause,
    Resume,
    GameOver { final_score: u32 },
    Score { score: u32 },
    Collect { points: u32 },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::GameStart => EventKind::GameStart,
            GameEvent::Pause => EventKind::Pause,
            GameEvent::Resume => EventKind::Resume,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::Score { .. } => EventKind::Score,
            GameEvent::Collect { .. } => EventKind::Collect,
        }
    }

    /// Numeric payload, if the event carries one.
    pub fn payload(&self) -> Option<u32> {
        match *self {
            GameEvent::GameOver { final_score } => Some(final_score),
            GameEvent::Score { score } => Some(score),
            GameEvent::Collect { points } => Some(points),
            GameEvent::GameStart | GameEvent::Pause | GameEvent::Resume => None,
        }
    }
}

/// Topic identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    GameStart = 0,
    Pause = 1,
    Resume = 2,
    GameOver = 3,
    Score = 4,
    Collect = 5,
}

impl EventKind {
    pub const COUNT: usize = 6;

    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::GameStart,
        EventKind::Pause,
        EventKind::Resume,
        EventKind::GameOver,
        EventKind::Score,
        EventKind::Collect,
    ];

    /// Host-facing topic name.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::GameStart => "gamestart",
            EventKind::Pause => "pause",
            EventKind::Resume => "resume",
            EventKind::GameOver => "gameover",
            EventKind::Score => "score",
            EventKind::Collect => "collect",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gamestart" => Some(EventKind::GameStart),
            "pause" => Some(EventKind::Pause),
            "resume" => Some(EventKind::Resume),
            "gameover" => Some(EventKind::GameOver),
            "score" => Some(EventKind::Score),
            "collect" => Some(EventKind::Collect),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

pub struct EventBus {
    topics: Vec<Vec<(SubscriptionId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            topics: (0..EventKind::COUNT).map(|_| Vec::new()).collect(),
            next_id: 1,
        }
    }

    pub fn subscribe(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.topics[kind.index()].push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for topic in &mut self.topics {
            if let Some(idx) = topic.iter().position(|(sub, _)| *sub == id) {
                // `remove`, not `swap_remove`: delivery order is subscription order.
                topic.remove(idx);
                return true;
            }
        }
        false
    }

    /// Deliver to every listener of the event's topic, in subscription order.
    pub fn publish(&mut self, event: GameEvent) {
        for (_, listener) in self.topics[event.kind().index()].iter_mut() {
            listener(&event);
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.topics[kind.index()].len()
    }

    pub fn clear(&mut self) {
        for topic in &mut self.topics {
            topic.clear();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
