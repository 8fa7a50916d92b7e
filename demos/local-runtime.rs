use std::time::Duration;

use emitron::*;
use tokio::task::LocalSet;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let local = LocalSet::new();
    local
        .run_until(async {
            let emitter = Emitter::<&str, u64>::new();
            let token = CancellationToken::new();

            emitter.on_with(
                "tick",
                |n, _| {
                    println!("tick {n}");
                    Ok(())
                },
                SubscribeOptions::default().with_cancel(token.clone()),
            );

            let canceller = token.clone();
            tokio::task::spawn_local(async move {
                tokio::time::sleep(Duration::from_millis(35)).await;
                canceller.cancel();
            });

            for n in 0..6 {
                emitter.publish("tick", n)?;
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            Ok::<(), Error>(())
        })
        .await
}
