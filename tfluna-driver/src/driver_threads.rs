use crate::assembler::ScanAssembler;
use crate::error::Result;
use crate::session::{drain_available, SessionConfig};
use crate::source::LineSource;
use crate::time::sleep_ms;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use crossbeam_utils::Backoff;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Instant;
use tfluna_data::ScanSnapshot;

/// Struct that contains the driver thread.
pub struct DriverThreads {
    pub(crate) terminator_tx: Sender<bool>,
    pub(crate) reader_thread: Option<JoinHandle<Result<()>>>,
}

/// Reads lines and assembles them on one thread, publishing a snapshot
/// every render interval.
///
/// The thread is the only writer of the assembler. Snapshots are dropped
/// rather than queued when the consumer falls behind.
pub(crate) fn assemble_scan<S: LineSource>(
    mut source: S,
    mut assembler: ScanAssembler,
    snapshot_tx: mpsc::SyncSender<ScanSnapshot>,
    terminator_rx: Receiver<bool>,
    config: SessionConfig,
) -> Result<()> {
    let backoff = Backoff::new();
    let mut next_publish = Instant::now() + config.render_interval;
    while !do_terminate(&terminator_rx) {
        let n_lines = match drain_available(&mut source, &mut assembler, next_publish) {
            Ok(n) => n,
            Err(e) => {
                log::error!("Transport failed, stopping driver: {e}");
                return Err(e);
            }
        };
        if n_lines == 0 {
            if backoff.is_completed() {
                sleep_ms(1);
            } else {
                backoff.snooze();
            }
        } else {
            backoff.reset();
        }

        if Instant::now() < next_publish {
            continue;
        }
        next_publish = Instant::now() + config.render_interval;
        match snapshot_tx.try_send(assembler.snapshot()) {
            Ok(()) => (),
            Err(mpsc::TrySendError::Full(_)) => log::trace!("Renderer lagging, frame dropped"),
            Err(mpsc::TrySendError::Disconnected(_)) => {
                log::info!("Snapshot receiver dropped, stopping driver");
                return Ok(());
            }
        }
    }
    Ok(())
}

/// `true` once a stop was requested or every terminator sender is gone.
pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    match terminator_rx.try_recv() {
        Ok(stop) => stop,
        Err(TryRecvError::Empty) => false,
        Err(TryRecvError::Disconnected) => true,
    }
}

/// Function to join the driver thread.
/// This function is automatically called when `driver_threads` is dropped.
///
/// Returns the transport error that ended the thread, if any.
pub fn join(driver_threads: &mut DriverThreads) -> Result<()> {
    // the thread may already have exited and dropped its receiver
    let _ = driver_threads.terminator_tx.send(true);

    match driver_threads.reader_thread.take() {
        Some(thread) => match thread.join() {
            Ok(result) => result,
            Err(_) => {
                log::error!("Driver thread panicked");
                Ok(())
            }
        },
        None => Ok(()),
    }
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        // a transport error was already logged by the thread
        let _ = join(self);
    }
}
