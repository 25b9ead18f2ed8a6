//! Builders and the immutable events they produce.
//!
//! Every command pairs an [`EventBuilder`] with the [`CommandEvent`] it
//! builds. The builder starts from [`Default`] with `help == false` and
//! `valid == true`, is folded over the matched arguments by value, and is
//! dropped once [`EventBuilder::build`] returns.
//!
//! Events leave a [`CommandRepository`](crate::CommandRepository) type-erased
//! as [`BoxedEvent`] and are recovered with `downcast_ref` or `downcast`.

use std::any::Any;
use std::fmt;

// ============================================================================
// Event
// ============================================================================

/// The immutable result of parsing one command line.
pub trait CommandEvent: Any + Send + Sync + fmt::Debug {
    /// Human-readable name of the event type.
    fn event_name(&self) -> &'static str;

    /// `true` when the user asked for the command's help text.
    fn is_help(&self) -> bool;

    /// `false` when a required positional argument was not supplied.
    fn is_valid(&self) -> bool;

    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Converts the box into `Box<dyn Any>` for owned downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

/// A type-erased event as returned by the repository.
pub type BoxedEvent = Box<dyn CommandEvent>;

impl dyn CommandEvent {
    /// Returns `true` if the event is of type `E`.
    pub fn is<E: CommandEvent>(&self) -> bool {
        self.as_any().is::<E>()
    }

    /// Borrows the event as `E` if it is one.
    pub fn downcast_ref<E: CommandEvent>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    /// Takes ownership of the event as `E`, dropping it on mismatch.
    ///
    /// Check with [`is`](Self::is) first when the event must survive a miss.
    pub fn downcast<E: CommandEvent>(self: Box<Self>) -> Option<Box<E>> {
        self.into_any().downcast::<E>().ok()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates argument values for one parse and produces the event.
///
/// Setters consume and return `Self`, so a builder is threaded through the
/// arguments by value and never shared.
pub trait EventBuilder: Default + Send + 'static {
    /// The event this builder produces.
    type Event: CommandEvent;

    /// Sets the help flag.
    fn help(self, help: bool) -> Self;

    /// Sets the validity flag.
    fn valid(self, valid: bool) -> Self;

    /// Finishes the builder.
    fn build(self) -> Self::Event;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Ping {
        help: bool,
    }

    impl CommandEvent for Ping {
        fn event_name(&self) -> &'static str {
            "ping"
        }

        fn is_help(&self) -> bool {
            self.help
        }

        fn is_valid(&self) -> bool {
            true
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
            self
        }
    }

    #[derive(Debug)]
    struct Pong;

    impl CommandEvent for Pong {
        fn event_name(&self) -> &'static str {
            "pong"
        }

        fn is_help(&self) -> bool {
            false
        }

        fn is_valid(&self) -> bool {
            true
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
            self
        }
    }

    #[test]
    fn test_downcast_ref() {
        let event: BoxedEvent = Box::new(Ping { help: true });
        assert!(event.is::<Ping>());
        assert!(!event.is::<Pong>());
        assert!(event.downcast_ref::<Ping>().unwrap().help);
        assert!(event.downcast_ref::<Pong>().is_none());
    }

    #[test]
    fn test_downcast_owned() {
        let event: BoxedEvent = Box::new(Ping::default());
        assert_eq!(event.event_name(), "ping");
        let ping = event.downcast::<Ping>().unwrap();
        assert!(!ping.help);

        let event: BoxedEvent = Box::new(Pong);
        assert!(event.downcast::<Ping>().is_none());
    }
}
