#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + 'a>;

/// Forwards progress events to an optional callback; the pipeline is
/// single-threaded, so no synchronization is involved.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn silent_reporter_swallows_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PhaseStart { name: "noop" });
        reporter.report(Progress::PhaseFinish);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = RefCell::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.borrow_mut().push(format!("{:?}", event));
        }));

        reporter.report(Progress::TaskStart { total_steps: 2 });
        reporter.report(Progress::TaskIncrement);
        reporter.report(Progress::TaskFinish);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].contains("TaskStart"));
        assert!(seen[2].contains("TaskFinish"));
    }
}
