use emitron::*;

fn main() -> Result<()> {
    let emitter = Emitter::<&str, f64>::new();
    let source = CancelSource::new();

    // Both subscriptions go away when the source is cancelled
    let opts = SubscribeOptions::default().with_cancel(source.token());
    emitter.on_many(
        &["temperature", "humidity"],
        |value, key| {
            println!("{key}: {value}");
            Ok(())
        },
        opts,
    )?;

    emitter.publish("temperature", 21.5)?;
    emitter.publish("humidity", 40.0)?;

    source.cancel();
    println!("cancelled");

    // Nobody listens anymore
    emitter.publish("temperature", 22.0)?;
    assert!(!emitter.has_handlers(&"temperature".into()));
    Ok(())
}
