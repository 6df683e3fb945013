use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TIP_DURATION: Duration = Duration::from_secs(2);
const MESSAGE_READ_TIME: Duration = Duration::from_secs(1);
const MIN_TIP_VISIBILITY: Duration = Duration::from_millis(750);
const TIPS: &[&str] = &[
    "You can press 'q' to stop early",
    "Use --deep for a SYN scan through nmap",
];

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
    tx: Sender<String>,
}

impl SpinnerHandle {
    pub fn send_to_queue(&self, message: String) {
        let _ = self.tx.send(message);
    }

    pub fn println(&self, msg: &str) {
        self.spinner.println(msg);
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }
}

static SPINNER: Mutex<Option<Arc<SpinnerHandle>>> = Mutex::new(None);
static STYLE: OnceLock<ProgressStyle> = OnceLock::new();

fn style() -> ProgressStyle {
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&[
                    "▁▁▁▁▁",
                    "▁▂▂▂▁",
                    "▁▄▂▄▁",
                    "▂▄▆▄▂",
                    "▄▆█▆▄",
                    "▂▄▆▄▂",
                    "▁▄▂▄▁",
                    "▁▂▂▂▁",
                ])
        })
        .clone()
}

fn active() -> Option<Arc<SpinnerHandle>> {
    SPINNER.lock().ok().and_then(|guard| guard.clone())
}

/// Starts the spinner shown while a scan runs. Log lines are routed above it.
pub fn start() -> Arc<SpinnerHandle> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(style());
    pb.enable_steady_tick(Duration::from_millis(100));

    let (tx, rx) = mpsc::channel::<String>();
    let pb_clone = pb.clone();

    thread::spawn(move || {
        let mut tip_index = 0;
        let mut next_action_time = Instant::now() + TIP_DURATION;
        let mut is_showing_tip = false;
        let mut last_tip_time = Instant::now();

        loop {
            if pb_clone.is_finished() {
                break;
            }

            let wait_time = next_action_time.saturating_duration_since(Instant::now());

            match rx.recv_timeout(wait_time) {
                Ok(mut msg) => {
                    if is_showing_tip {
                        let elapsed = last_tip_time.elapsed();
                        if elapsed < MIN_TIP_VISIBILITY {
                            thread::sleep(MIN_TIP_VISIBILITY - elapsed);
                        }
                        is_showing_tip = false;
                    }
                    while let Ok(newer_msg) = rx.try_recv() {
                        msg = newer_msg;
                    }
                    pb_clone.set_message(msg);
                    next_action_time = Instant::now() + MESSAGE_READ_TIME;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let tip = TIPS[tip_index % TIPS.len()];
                    pb_clone.set_message(format!("{}", tip.italic().white()));

                    tip_index += 1;
                    is_showing_tip = true;
                    last_tip_time = Instant::now();
                    next_action_time = Instant::now() + TIP_DURATION;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    });

    let handle = Arc::new(SpinnerHandle { spinner: pb, tx });
    if let Ok(mut guard) = SPINNER.lock() {
        *guard = Some(handle.clone());
    }
    handle
}

/// Clears the spinner; later log lines go straight to stdout again.
pub fn stop() {
    if let Ok(mut guard) = SPINNER.lock() {
        if let Some(handle) = guard.take() {
            handle.finish_and_clear();
        }
    }
}

pub fn report(message: String) {
    if let Some(handle) = active() {
        handle.send_to_queue(message);
    }
}

pub fn report_hosts_found(count: usize) {
    report(format!(
        "{} hosts answered, probing ports...",
        count.to_string().green().bold()
    ));
}

pub fn report_host_done(done: usize, total: usize) {
    report(format!(
        "Probed {}/{} hosts...",
        done.to_string().green().bold(),
        total
    ));
}

pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end();
        match active() {
            Some(handle) => handle.println(msg),
            None => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{msg}")?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
