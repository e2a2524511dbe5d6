use std::fmt;

/// Progress of one generation pipeline, reported through a [`StatusSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Requesting,
    Received { bytes: usize },
    Failed { message: String },
    Materialized { files: usize, fallback: bool },
    DependenciesResolved { count: usize },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Requesting => write!(f, "Generating your web application..."),
            Stage::Received { bytes } => write!(f, "Received {bytes} bytes from the model"),
            Stage::Failed { message } => write!(f, "Failed to generate web application: {message}"),
            Stage::Materialized {
                files,
                fallback: false,
            } => write!(f, "Web application generated with {files} files"),
            Stage::Materialized {
                files,
                fallback: true,
            } => write!(
                f,
                "Could not read the model response, showing a {files}-file fallback project"
            ),
            Stage::DependenciesResolved { count } => write!(f, "Resolved {count} dependencies"),
        }
    }
}

/// Receiver of pipeline status events.
pub trait StatusSink {
    fn on_status(&self, stage: &Stage);
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl StatusSink for NoopSink {
    fn on_status(&self, _stage: &Stage) {}
}

impl<F> StatusSink for F
where
    F: Fn(&Stage),
{
    fn on_status(&self, stage: &Stage) {
        self(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_sink() {
        let seen = RefCell::new(Vec::new());
        let sink = |stage: &Stage| seen.borrow_mut().push(stage.clone());

        sink.on_status(&Stage::Requesting);
        sink.on_status(&Stage::Received { bytes: 3 });

        assert_eq!(
            *seen.borrow(),
            vec![Stage::Requesting, Stage::Received { bytes: 3 }]
        );
    }

    #[test]
    fn test_stage_messages() {
        assert_eq!(
            Stage::Materialized {
                files: 6,
                fallback: true
            }
            .to_string(),
            "Could not read the model response, showing a 6-file fallback project"
        );
        assert!(Stage::Failed {
            message: "boom".to_string()
        }
        .to_string()
        .ends_with("boom"));
    }
}
