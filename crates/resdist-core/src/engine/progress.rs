#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `f` bracketed by `PhaseStart`/`PhaseFinish` events.
    ///
    /// `PhaseFinish` is reported even when `f` fails, so handlers can close
    /// their spinners before the error is printed.
    pub fn phase<T, E>(
        &self,
        name: &'static str,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.report(Progress::PhaseStart { name });
        let result = f();
        self.report(Progress::PhaseFinish);
        result
    }

    pub fn message(&self, text: impl Into<String>) {
        self.report(Progress::Message(text.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_reporter(log: Arc<Mutex<Vec<String>>>) -> ProgressReporter<'static> {
        ProgressReporter::with_callback(Box::new(move |event| {
            log.lock().unwrap().push(format!("{:?}", event));
        }))
    }

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::TaskIncrement);
        let value: Result<u8, ()> = reporter.phase("Noop", || Ok(7));
        assert_eq!(value, Ok(7));
    }

    #[test]
    fn phase_reports_finish_even_on_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let reporter = recording_reporter(log.clone());

        let result: Result<(), &str> = reporter.phase("Loading", || Err("boom"));

        assert_eq!(result, Err("boom"));
        let events = log.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].contains("Loading"));
        assert_eq!(events[1], "PhaseFinish");
    }

    #[test]
    fn message_forwards_text() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let reporter = recording_reporter(log.clone());
        reporter.message("wrote 3 rows");
        assert_eq!(log.lock().unwrap()[0], "Message(\"wrote 3 rows\")");
    }
}
