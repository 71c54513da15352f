//! Delivery of engine events to outside collaborators.
//!
//! A collaborator (desktop notifications, sound, confetti...) implements
//! [`EffectSink`]. Delivery failures are logged and dropped: the one-shot
//! flag behind an event is already set by the time it is dispatched, so a
//! failed delivery is never retried.

use thiserror::Error;

use crate::events::Event;

#[derive(Error, Debug)]
pub enum EffectError {
    /// The collaborator is not available (e.g. permission denied)
    #[error("{sink} unavailable: {reason}")]
    Unavailable { sink: String, reason: String },

    /// Delivery was attempted and failed
    #[error("{sink} failed: {reason}")]
    Failed { sink: String, reason: String },
}

/// Receives engine events.
pub trait EffectSink {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn deliver(&mut self, event: &Event) -> Result<(), EffectError>;
}

/// Hand every event to every sink. Returns how many deliveries failed.
pub fn dispatch(events: &[Event], sinks: &mut [&mut dyn EffectSink]) -> usize {
    let mut failures = 0;
    for event in events {
        for sink in sinks.iter_mut() {
            if let Err(err) = sink.deliver(event) {
                failures += 1;
                tracing::warn!(
                    sink = sink.name(),
                    kind = event.kind(),
                    error = %err,
                    "effect delivery failed"
                );
            }
        }
    }
    failures
}

/// Collects delivered events in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub delivered: Vec<Event>,
}

impl EffectSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn deliver(&mut self, event: &Event) -> Result<(), EffectError> {
        self.delivered.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Weekday;

    struct DeniedSink {
        attempts: usize,
    }

    impl EffectSink for DeniedSink {
        fn name(&self) -> &str {
            "notifications"
        }

        fn deliver(&mut self, _event: &Event) -> Result<(), EffectError> {
            self.attempts += 1;
            Err(EffectError::Unavailable {
                sink: self.name().to_string(),
                reason: "permission denied".into(),
            })
        }
    }

    #[test]
    fn failures_are_counted_and_other_sinks_still_receive() {
        let events = vec![
            Event::DaySelected {
                index: 0,
                day: Weekday::Monday,
            },
            Event::ScheduleReloaded {
                owner_name: "Ada".into(),
                days: 1,
            },
        ];
        let mut denied = DeniedSink { attempts: 0 };
        let mut recorder = RecordingSink::default();

        let mut sinks: [&mut dyn EffectSink; 2] = [&mut denied, &mut recorder];
        let failures = dispatch(&events, &mut sinks);

        assert_eq!(failures, 2);
        assert_eq!(denied.attempts, 2);
        assert_eq!(recorder.delivered, events);
    }
}
