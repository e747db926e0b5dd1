//! Simulation runs and their printable reports

use std::fmt;

use serde::Serialize;

use scrollfx_animation::AnimationBinding;
use scrollfx_core::PageEvent;
use scrollfx_page::{PageRuntime, RegistryStats};

/// One binding as seen from outside the scheduler
#[derive(Debug, Clone, Serialize)]
pub struct BindingReport {
    pub label: String,
    pub targets: usize,
    /// Resolved scroll range; `None` for time-driven bindings
    pub range: Option<(f32, f32)>,
    pub phase: Option<String>,
    pub progress: f32,
    /// Written properties of the first target
    pub props: Vec<(String, f32)>,
}

impl fmt::Display for BindingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20} x{:<3}", self.label, self.targets)?;
        match (self.range, &self.phase) {
            (Some((start, end)), Some(phase)) => write!(f, " {start:>7.0}..{end:<7.0} {phase:<8}")?,
            _ => write!(f, " {:<16} {:<8}", "time", "-")?,
        }
        write!(f, " {:>5.1}%", self.progress * 100.0)
    }
}

/// A trigger event fired during the run
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub frame: u32,
    pub scroll: f32,
    pub binding: String,
    pub event: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CounterReport {
    pub target: i64,
    pub text: String,
}

/// Outcome of [`simulate`]
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub frames: u32,
    pub final_scroll: f32,
    pub max_scroll: f32,
    pub stats: RegistryStats,
    pub events: Vec<EventRecord>,
    pub bindings: Vec<BindingReport>,
    pub counters: Vec<CounterReport>,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} frames, scroll {:.0} of {:.0}",
            self.frames, self.final_scroll, self.max_scroll
        )?;
        writeln!(
            f,
            "{} bindings, {} timelines, {} counters, {} dots ({} skipped, {} invalid)",
            self.stats.bindings,
            self.stats.timelines,
            self.stats.counters,
            self.stats.dots,
            self.stats.skipped,
            self.stats.invalid
        )?;

        writeln!(f, "\nevents:")?;
        for event in &self.events {
            writeln!(
                f,
                "  #{:<5} {:>7.0}  {:<20} {}",
                event.frame, event.scroll, event.binding, event.event
            )?;
        }

        writeln!(f, "\nbindings:")?;
        for binding in &self.bindings {
            writeln!(f, "  {binding}")?;
        }

        writeln!(f, "\ncounters:")?;
        for counter in &self.counters {
            writeln!(f, "  {:>10} -> {}", counter.target, counter.text)?;
        }
        Ok(())
    }
}

fn binding_report(page: &PageRuntime, binding: &AnimationBinding) -> BindingReport {
    let doc = page.document();
    let props = binding
        .targets()
        .first()
        .map(|node| {
            doc.props(*node)
                .into_iter()
                .map(|(prop, value)| (prop.name().to_string(), value))
                .collect()
        })
        .unwrap_or_default();

    BindingReport {
        label: binding.label().to_string(),
        targets: binding.targets().len(),
        range: binding.trigger().map(|t| (t.range.start, t.range.end)),
        phase: binding
            .trigger()
            .map(|t| format!("{:?}", t.state.phase).to_lowercase()),
        progress: binding.progress(),
        props,
    }
}

/// Every binding in registration order
pub fn bindings(page: &PageRuntime) -> Vec<BindingReport> {
    page.scheduler()
        .bindings()
        .map(|(_, binding)| binding_report(page, binding))
        .collect()
}

/// Scroll down the page at `speed` px/s for `frames` frames at `fps`
pub fn simulate(page: &mut PageRuntime, frames: u32, speed: f32, fps: u32) -> SimulationReport {
    let dt = 1.0 / fps.max(1) as f32;
    let max_scroll = page.max_scroll();
    let mut events = Vec::new();

    for frame in 0..frames {
        let scroll = (speed * dt * frame as f32).clamp(0.0, max_scroll);
        page.handle_event(PageEvent::Scroll { y: scroll });
        for fired in page.frame(dt) {
            let binding = page
                .scheduler()
                .binding(fired.binding)
                .map(|b| b.label().to_string())
                .unwrap_or_default();
            events.push(EventRecord {
                frame,
                scroll,
                binding,
                event: fired.event.name(),
            });
        }
    }
    tracing::debug!(frames, events = events.len(), "simulation finished");

    let counters = page
        .counters()
        .iter()
        .map(|c| CounterReport {
            target: c.target(),
            text: page.document().text_content(c.element()),
        })
        .collect();

    SimulationReport {
        frames,
        final_scroll: page.context().scroll_y,
        max_scroll,
        stats: page.stats(),
        events,
        bindings: bindings(page),
        counters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfx_page::{demo, PageConfig};

    fn landing() -> PageRuntime {
        let config = PageConfig::default();
        let doc = demo::landing_document(config.viewport.viewport());
        let mut page = PageRuntime::new(doc, config);
        page.init();
        page
    }

    #[test]
    fn test_bindings_listed_in_order() {
        let page = landing();
        let bindings = bindings(&page);
        assert_eq!(bindings.len(), page.stats().bindings);
        assert_eq!(bindings[0].label, "progress bar");
        assert_eq!(bindings[0].range, Some((0.0, page.max_scroll())));
        assert_eq!(bindings[0].phase.as_deref(), Some("idle"));
    }

    #[test]
    fn test_simulate_to_the_bottom() {
        let mut page = landing();
        // The bottom is reached in under a second; counters then need two more
        let report = simulate(&mut page, 240, 12000.0, 60);
        assert_eq!(report.final_scroll, report.max_scroll);
        assert!(report
            .events
            .iter()
            .any(|e| e.frame == 0 && e.binding == "progress bar" && e.event == "enter"));

        let texts: Vec<_> = report.counters.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["340", "98", "12,000", "2,500,000"]);
    }

    #[test]
    fn test_text_report_mentions_counts() {
        let mut page = landing();
        let report = simulate(&mut page, 2, 0.0, 60);
        let text = report.to_string();
        assert!(text.starts_with("2 frames, scroll 0 of 8600"));
        assert!(text.contains("20 bindings, 1 timelines, 4 counters, 40 dots"));
        assert!(text.contains("\nevents:\n") && text.contains("\ncounters:\n"));
        assert!(text.ends_with("2500000 -> 0\n"));
    }

    #[test]
    fn test_report_serializes() {
        let mut page = landing();
        let report = simulate(&mut page, 1, 0.0, 60);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stats"]["bindings"], 20);
        assert_eq!(json["bindings"].as_array().unwrap().len(), 20);
    }
}
