use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use fullpage_core::{
    AppConfig, Deck, Direction, EngineConfig, EngineSnapshot, FixedViewport, IntentOutcome,
    PageConfig, PanelSet, TransitionEngine, Viewport,
};

pub struct Options {
    pub script: String,
    pub width: u16,
    pub height: u16,
    pub pretty: bool,
}

/// One scripted input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Scroll(Direction),
    /// Advance the clock by this much
    Wait(Duration),
    /// Advance the clock to this absolute time
    At(Duration),
    Jump(usize),
    Resize(u16, u16),
}

fn parse_secs(value: &str) -> Result<Duration> {
    let secs: f64 = value
        .trim_end_matches('s')
        .parse()
        .with_context(|| format!("invalid seconds '{}'", value))?;
    fullpage_core::animation::timing::secs_to_duration(secs)
        .ok_or_else(|| anyhow!("seconds must be non-negative, got '{}'", value))
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "+" | "fwd" | "forward" => return Ok(Step::Scroll(Direction::Forward)),
            "-" | "back" | "backward" => return Ok(Step::Scroll(Direction::Backward)),
            _ => {}
        }

        let (name, value) = token
            .split_once(':')
            .ok_or_else(|| anyhow!("unknown step '{}'", token))?;
        match name {
            "wait" => Ok(Step::Wait(parse_secs(value)?)),
            "at" => Ok(Step::At(parse_secs(value)?)),
            "jump" => Ok(Step::Jump(
                value
                    .parse()
                    .with_context(|| format!("invalid jump target '{}'", value))?,
            )),
            "resize" => {
                let (w, h) = value
                    .split_once('x')
                    .ok_or_else(|| anyhow!("resize expects WxH, got '{}'", value))?;
                Ok(Step::Resize(
                    w.parse().with_context(|| format!("invalid width '{}'", w))?,
                    h.parse().with_context(|| format!("invalid height '{}'", h))?,
                ))
            }
            _ => Err(anyhow!("unknown step '{}'", token)),
        }
    }
}

pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<IntentOutcome>,
    pub snapshot: EngineSnapshot,
}

/// Run a script against an engine, recording a snapshot after every step
pub fn simulate(engine: &mut TransitionEngine, steps: &[Step]) -> Vec<StepRecord> {
    let mut now = Duration::ZERO;
    let mut records = Vec::with_capacity(steps.len());

    for step in steps {
        let outcome = match *step {
            Step::Scroll(direction) => Some(engine.handle_scroll_intent(direction, now)),
            Step::Jump(index) => Some(engine.jump_to(index, now)),
            Step::Wait(delta) => {
                now = now.saturating_add(delta);
                engine.advance(now);
                None
            }
            Step::At(at) => {
                now = now.max(at);
                engine.advance(now);
                None
            }
            Step::Resize(width, height) => {
                engine.handle_resize(width, height);
                None
            }
        };
        records.push(StepRecord {
            step: format!("{:?}", step),
            outcome,
            snapshot: engine.snapshot(now),
        });
    }

    records
}

pub async fn run(config: &AppConfig, deck_path: &Path, page: &PageConfig, options: Options) -> Result<()> {
    let steps = parse_script(&options.script)?;
    let deck = Deck::load(deck_path)
        .await
        .with_context(|| format!("Failed to read deck {}", deck_path.display()))?;
    let group = deck.container(&page.container)?;

    let mut engine = TransitionEngine::initialize(
        PanelSet::with_len(group.sections.len()),
        EngineConfig::from_page(page, &config.nav)?,
        &FixedViewport(Viewport::new(options.width, options.height)),
    )?;

    for record in simulate(&mut engine, &steps) {
        let line = if options.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(len: usize) -> TransitionEngine {
        TransitionEngine::initialize(
            PanelSet::with_len(len),
            EngineConfig::default(),
            &FixedViewport(Viewport::new(80, 24)),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_script() {
        let steps = parse_script("+ wait:0.1, - at:1.5s jump:2 resize:100x30 back").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Scroll(Direction::Forward),
                Step::Wait(Duration::from_millis(100)),
                Step::Scroll(Direction::Backward),
                Step::At(Duration::from_millis(1500)),
                Step::Jump(2),
                Step::Resize(100, 30),
                Step::Scroll(Direction::Backward),
            ]
        );
    }

    #[test]
    fn test_parse_script_errors() {
        assert!(parse_script("sideways").is_err());
        assert!(parse_script("wait:-1").is_err());
        assert!(parse_script("resize:100").is_err());
        assert!(parse_script("jump:x").is_err());
    }

    #[test]
    fn test_simulate_three_panel_scenario() {
        let mut engine = engine(3);
        let steps = parse_script("+ wait:0.1 + at:1.0 +").unwrap();
        let records = simulate(&mut engine, &steps);

        assert_eq!(records[0].outcome, Some(IntentOutcome::Accepted { from: 0, to: 1 }));
        assert_eq!(records[2].outcome, Some(IntentOutcome::Locked));
        assert_eq!(records[2].snapshot.index, 1);
        assert!(!records[3].snapshot.locked);
        assert_eq!(records[4].outcome, Some(IntentOutcome::Accepted { from: 1, to: 2 }));
        assert_eq!(records[4].snapshot.time_ms, 1000);
    }

    #[test]
    fn test_at_never_moves_clock_backward() {
        let mut engine = engine(2);
        let steps = parse_script("wait:2 at:1").unwrap();
        let records = simulate(&mut engine, &steps);
        assert_eq!(records[1].snapshot.time_ms, 2000);
    }
}
