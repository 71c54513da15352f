//! Terminal stand-in for desktop notifications and celebrations.

use std::io::Write;

use glowboard_core::{DisplayConfig, EffectError, EffectSink, Event};

/// Writes one line per alert-worthy event.
pub struct TerminalAlerts<W: Write> {
    out: W,
    late_start_alerts: bool,
}

impl<W: Write> TerminalAlerts<W> {
    pub fn new(out: W, display: &DisplayConfig) -> Self {
        Self {
            out,
            late_start_alerts: display.late_start_alerts,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&self, event: &Event) -> Option<String> {
        match event {
            Event::TaskStarted { task, late, .. } if !*late || self.late_start_alerts => {
                Some(format!("** Task Started! {task}"))
            }
            Event::TaskEndingSoon { task, end, .. } => {
                Some(format!("** Task Ending Soon: {task} (ends {end})"))
            }
            Event::ActiveTaskChanged {
                current: Some(task),
                ..
            } => Some(format!("** Now: {task}")),
            _ => None,
        }
    }
}

impl<W: Write> EffectSink for TerminalAlerts<W> {
    fn name(&self) -> &str {
        "terminal"
    }

    fn deliver(&mut self, event: &Event) -> Result<(), EffectError> {
        let Some(line) = self.line(event) else {
            return Ok(());
        };
        writeln!(self.out, "{line}")
            .and_then(|_| self.out.flush())
            .map_err(|e| EffectError::Failed {
                sink: "terminal".into(),
                reason: e.to_string(),
            })
    }
}
