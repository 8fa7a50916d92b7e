use crate::{Emitter, EventKey, Result};

/// Typed event set for an [`Emitter`].
///
/// Implement this for an enum with one variant per event, each carrying its
/// payload, and a companion key type naming the variants. The payload shape
/// of each key is then checked by the compiler at the publish site:
///
/// - a unit variant is an event without a value,
/// - a variant carrying `Option<T>` is an event with an optional value,
/// - any other variant requires its value.
///
/// `#[derive(Event)]` generates the key enum (`<Enum>Key`) and this impl.
///
/// # Examples
///
/// ```rust
/// use emitron::{Event, EventBus, Topic};
///
/// #[derive(Debug, Event)]
/// enum Ui {
///     Click { x: i32, y: i32 },
///     Scroll(Option<f32>),
///     Close,
/// }
///
/// let bus = EventBus::<Ui>::new();
/// bus.on(UiKey::Click, |event, _| {
///     if let Ui::Click { x, y } = event {
///         println!("click at {x},{y}");
///     }
///     Ok(())
/// });
/// bus.on(Topic::Wildcard, |_, key| {
///     println!("saw {key}");
///     Ok(())
/// });
///
/// bus.emit(Ui::Click { x: 1, y: 2 })?;
/// bus.emit(Ui::Scroll(None))?;
/// bus.emit(Ui::Close)?;
/// # Ok::<(), emitron::Error>(())
/// ```
pub trait Event: 'static {
    type Key: EventKey;

    /// Key this event is published under.
    fn key(&self) -> Self::Key;
}

/// Emitter keyed and typed by an [`Event`] enum.
pub type EventBus<E> = Emitter<<E as Event>::Key, E>;

impl<E: Event> Emitter<E::Key, E> {
    /// Publishes `event` under [`Event::key`].
    pub fn emit(&self, event: E) -> Result<()> {
        self.publish(event.key(), event)
    }
}
