//! Events published by the engine.
//!
//! Views and other collaborators observe the game through events. Nothing
//! in the core waits for a subscriber or expects an answer.
//!
//! - [`GameEvent`]: what happened
//! - [`EventBus`]: typed observer registration with unregister handles
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use fire_rescue::events::{EventBus, GameEvent, TurnPhase};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut bus = EventBus::new();
//!
//! let sink = Rc::clone(&seen);
//! let id = bus.subscribe(move |e: &GameEvent| sink.borrow_mut().push(e.clone()));
//!
//! bus.emit(&GameEvent::TurnPhaseChanged { phase: TurnPhase::AdvanceFire });
//! assert!(bus.unsubscribe(id));
//! bus.emit(&GameEvent::TurnPhaseChanged { phase: TurnPhase::Move });
//!
//! assert_eq!(seen.borrow().len(), 1);
//! ```

mod bus;
mod event;

pub use bus::{EventBus, SubscriptionId};
pub use event::{GameEvent, PoiEventKind, TokenChange, TurnPhase};
