use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use lensr_common::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Watches the keyboard for `q` / Ctrl-C while a scan runs.
pub struct InputHandle {
    rx: mpsc::Receiver<()>,
    tx: Option<mpsc::Sender<()>>,
    done: Arc<AtomicBool>,
}

impl InputHandle {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rx,
            tx: Some(tx),
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn start(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        if let Err(e) = enable_raw_mode() {
            warn!("Keyboard input unavailable: {e}");
            return;
        }

        let done = self.done.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                if !matches!(event::poll(POLL_INTERVAL), Ok(true)) {
                    continue;
                }
                if let Ok(Event::Key(key_event)) = event::read() {
                    let is_q = key_event.code == KeyCode::Char('q');
                    let is_ctrl_c = key_event.code == KeyCode::Char('c')
                        && key_event.modifiers.contains(KeyModifiers::CONTROL);

                    if (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press {
                        let _ = tx.send(());
                        break;
                    }
                }
            }
            let _ = disable_raw_mode();
        });
    }

    pub fn should_interrupt(&self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.done.store(true, Ordering::Relaxed);
        let _ = disable_raw_mode();
    }
}
