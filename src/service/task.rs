// src/service/task.rs
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, error};

use super::ServiceError;

/// Runs `job` on a named worker thread and hands back the receiving end.
///
/// If the thread cannot be started the sender is dropped with the closure, so
/// the receiver reports a disconnect instead of hanging.
pub fn spawn_worker<T, F>(name: &str, job: F) -> Receiver<Result<T, ServiceError>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let worker_name = name.to_string();
    let spawned = thread::Builder::new().name(name.to_string()).spawn(move || {
        let outcome = job();
        if tx.send(outcome).is_err() {
            debug!("{}: receiver gone, discarding late response", worker_name);
        }
    });
    if let Err(e) = spawned {
        error!("Failed to start worker thread {}: {}", name, e);
    }
    rx
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(ServiceError),
}

/// A fire-once background fetch with its own state, polled from the UI loop.
#[derive(Debug)]
pub struct OneShotTask<T> {
    name: &'static str,
    state: TaskState<T>,
    receiver: Option<Receiver<Result<T, ServiceError>>>,
}

impl<T: Send + 'static> OneShotTask<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: TaskState::Idle,
            receiver: None,
        }
    }

    pub fn state(&self) -> &TaskState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, TaskState::Loading)
    }

    /// Starts the fetch unless one is already running.
    pub fn start<F>(&mut self, job: F) -> bool
    where
        F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    {
        if self.is_loading() {
            debug!("{}: already loading, ignoring start", self.name);
            return false;
        }
        self.receiver = Some(spawn_worker(self.name, job));
        self.state = TaskState::Loading;
        true
    }

    /// Picks up a finished fetch. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };
        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(ServiceError::WorkerLost),
        };
        self.receiver = None;
        self.state = match outcome {
            Ok(value) => TaskState::Loaded(value),
            Err(e) => {
                debug!("{}: failed: {}", self.name, e);
                TaskState::Failed(e)
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    fn settle<T: Send + 'static>(task: &mut OneShotTask<T>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !task.poll() {
            assert!(Instant::now() < deadline, "task never finished");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_task_loads_value() {
        let mut task = OneShotTask::new("test-metrics");
        assert_eq!(task.state(), &TaskState::Idle);

        assert!(task.start(|| Ok(42u32)));
        assert!(task.is_loading());
        settle(&mut task);
        assert_eq!(task.state(), &TaskState::Loaded(42));
        assert!(!task.poll());
    }

    #[test]
    fn test_task_reports_failure() {
        let mut task: OneShotTask<u32> = OneShotTask::new("test-metrics");
        task.start(|| Err(ServiceError::Unreachable("connection refused".into())));
        settle(&mut task);
        assert_eq!(
            task.state(),
            &TaskState::Failed(ServiceError::Unreachable("connection refused".into()))
        );
    }

    #[test]
    fn test_task_ignores_start_while_loading() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let mut task = OneShotTask::new("test-metrics");
        assert!(task.start(move || {
            let _ = release_rx.recv();
            Ok("first")
        }));
        assert!(!task.start(|| Ok("second")));

        release_tx.send(()).unwrap();
        settle(&mut task);
        assert_eq!(task.state(), &TaskState::Loaded("first"));
    }

    #[test]
    fn test_panicking_job_becomes_worker_lost() {
        let mut task: OneShotTask<u32> = OneShotTask::new("test-metrics");
        task.start(|| panic!("boom"));
        settle(&mut task);
        assert_eq!(task.state(), &TaskState::Failed(ServiceError::WorkerLost));
    }
}
