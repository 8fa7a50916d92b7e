use emitron::*;

// Define your events
#[derive(Event, Clone, Debug)]
enum MyEvent {
    Hello(String),
    Goodbye(Option<u32>),
    Quit,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let bus = EventBus::<MyEvent>::new();

    // Greet every Hello
    bus.on(MyEventKey::Hello, |event, _| {
        if let MyEvent::Hello(name) = event {
            println!("Hello, {name}!");
        }
        Ok(())
    });

    // Say goodbye once, whichever of the two comes first
    bus.on_many(
        &[MyEventKey::Goodbye, MyEventKey::Quit],
        |event, key| {
            println!("Goodbye ({key}): {event:?}");
            Ok(())
        },
        SubscribeOptions::default().once(),
    )?;

    // Log everything
    bus.on(Topic::Wildcard, |_, key| {
        println!("  [{key}] dispatched");
        Ok(())
    });

    bus.emit(MyEvent::Hello("World".into()))?;
    bus.emit(MyEvent::Goodbye(Some(42)))?;
    bus.emit(MyEvent::Quit)?;
    Ok(())
}
