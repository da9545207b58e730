use pubchan::Channel;
use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc,
};

#[derive(Debug, Clone)]
enum Event {
    Sum(i32, i32),
    Mul(i32, i32),
    Close,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let events = Channel::<Event>::builder().name("events").build();

    let total = Arc::new(AtomicI32::new(0));
    let sum = {
        let total = total.clone();
        events.register(
            move |event: &Event| {
                if let Event::Sum(a, b) = event {
                    println!("{} + {} = {}", a, b, a + b);
                    total.fetch_add(a + b, Ordering::SeqCst);
                }
            },
            false,
        )
    };

    {
        let total = total.clone();
        events.register(
            move |event: &Event| {
                if let Event::Mul(a, b) = event {
                    println!("{} * {} = {}", a, b, a * b);
                    total.fetch_add(a * b, Ordering::SeqCst);
                }
            },
            false,
        );
    }

    events.register_once(|event: &Event| println!("first event: {:?}", event));

    // nested broadcasts are ignored with a warning
    {
        let nested = events.clone();
        events.register_once(move |_: &Event| nested.broadcast(Event::Close));
    }

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    events.register(tx, false);
    let watcher = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Event::Close = event {
                println!("watcher: close");
                return;
            }
        }
    });

    events.broadcast(Event::Sum(5, 10));
    events.broadcast(Event::Mul(5, 10));
    sum.unregister();
    events.broadcast(Event::Sum(1, 1));
    events.broadcast(Event::Close);

    watcher.await.expect("watcher panicked");
    println!("total = {}", total.load(Ordering::SeqCst));
}
