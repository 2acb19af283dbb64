// src/input/mod.rs - terminal event pump
pub mod editor;
pub mod keyboard;

use crossterm::event::{self as crossterm_event, Event as CrosstermEvent, KeyEvent};
use tokio::sync::mpsc::{self, Sender};
use tokio::time::{interval, Duration, Instant};

#[derive(Debug)]
pub enum AppEvent {
    Input(KeyEvent),
    Tick,
    Resize(u16, u16),
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    shutdown_tx: Vec<Sender<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let mut shutdown_tx = Vec::new();

        let (input_shutdown_tx, mut input_shutdown_rx) = mpsc::channel(1);
        shutdown_tx.push(input_shutdown_tx);

        let input_tx = tx.clone();
        tokio::spawn(async move {
            let mut last_resize_time = Instant::now();
            let min_resize_interval = Duration::from_millis(50);

            loop {
                if input_shutdown_rx.try_recv().is_ok() {
                    break;
                }

                // crossterm polling blocks, keep it off the async workers
                let polled = tokio::task::spawn_blocking(|| {
                    match crossterm_event::poll(std::time::Duration::from_millis(50)) {
                        Ok(true) => crossterm_event::read().ok(),
                        _ => None,
                    }
                })
                .await
                .ok()
                .flatten();

                match polled {
                    Some(CrosstermEvent::Key(key)) => {
                        if input_tx.send(AppEvent::Input(key)).await.is_err() {
                            break;
                        }
                    }
                    Some(CrosstermEvent::Resize(width, height)) => {
                        let now = Instant::now();
                        if now.duration_since(last_resize_time) >= min_resize_interval {
                            let _ = input_tx.send(AppEvent::Resize(width, height)).await;
                            last_resize_time = now;
                        } else {
                            log::trace!("Resize event dropped (too fast): {}x{}", width, height);
                        }
                    }
                    _ => {}
                }
            }
        });

        let (tick_shutdown_tx, mut tick_shutdown_rx) = mpsc::channel(1);
        shutdown_tx.push(tick_shutdown_tx);

        let tick_tx = tx;
        tokio::spawn(async move {
            let mut interval = interval(tick_rate);
            loop {
                tokio::select! {
                    _ = tick_shutdown_rx.recv() => break,
                    _ = interval.tick() => {
                        if tick_tx.send(AppEvent::Tick).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        EventHandler { rx, shutdown_tx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub async fn shutdown(&mut self) {
        for tx in self.shutdown_tx.iter() {
            let _ = tx.send(()).await;
        }
    }
}
