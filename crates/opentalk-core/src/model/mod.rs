pub mod event;

pub use event::{
    DateTimeTz, DateTimeTzResource, Event, EventInfo, EventResource, RecurringEvent, TimedEvent,
};
