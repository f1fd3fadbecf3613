//! Scripted interaction sessions against a fixture store.
//!
//! The simulate command replays a dashboard session: it loads incident and
//! region fixtures, starts a session, then feeds it events from a script
//! file, one per line (`#` comments and blank lines are ignored):
//!
//! ```text
//! # select the region under (50, 50), then filter June, then reset
//! click 50 50
//! month June
//! expand chart
//! collapse chart
//! reset
//! ```

use crate::render::{ConsoleLabels, ConsoleMap, TermGrid};
use crate::stats::read_fixture;
use log::info;
use mim_core::months::month_number;
use mim_db::Database;
use mim_engine::session::{DashboardSession, Panel};

/// One scripted dashboard interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEvent {
    Click { x: f64, y: f64 },
    Month(String),
    Expand(Panel),
    Collapse(Panel),
    Reset,
}

/// Parse a script line. `Ok(None)` means the line carries no event
/// (blank or comment).
pub fn parse_event(line: &str) -> anyhow::Result<Option<ScriptEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let event = match parts.next() {
        Some("click") => {
            let x = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("click needs X and Y"))?
                .parse()?;
            let y = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("click needs X and Y"))?
                .parse()?;
            ScriptEvent::Click { x, y }
        }
        Some("month") => {
            let month = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("month needs a label"))?;
            if month_number(month).is_none() {
                anyhow::bail!("unknown month '{month}'");
            }
            ScriptEvent::Month(month.to_string())
        }
        Some("expand") => ScriptEvent::Expand(parse_panel(parts.next())?),
        Some("collapse") => ScriptEvent::Collapse(parse_panel(parts.next())?),
        Some("reset") => ScriptEvent::Reset,
        Some(other) => anyhow::bail!("unknown event '{other}'"),
        None => return Ok(None),
    };
    Ok(Some(event))
}

fn parse_panel(name: Option<&str>) -> anyhow::Result<Panel> {
    match name {
        Some("chart") => Ok(Panel::Chart),
        Some("months") => Ok(Panel::MonthFilter),
        other => anyhow::bail!("expected panel 'chart' or 'months', got {other:?}"),
    }
}

/// Replay a scripted session, rendering the grid after every event that
/// touches it.
pub async fn run_simulate(
    incidents_csv: &str,
    regions_csv: &str,
    script: &str,
) -> anyhow::Result<()> {
    let incidents = read_fixture(incidents_csv)?;
    let regions = read_fixture(regions_csv)?;
    let script_text = read_fixture(script)?;

    let db = Database::new()?;
    db.load_incidents(&incidents)?;
    db.load_regions(&regions)?;

    let mut session = DashboardSession::new(
        Box::new(db.clone()),
        Box::new(ConsoleMap),
        Box::new(TermGrid),
        Box::new(ConsoleLabels),
    );
    session.start()?;

    for (number, line) in script_text.lines().enumerate() {
        let event = parse_event(line)
            .map_err(|err| anyhow::anyhow!("{script}:{}: {err}", number + 1))?;
        let Some(event) = event else { continue };
        info!("event: {event:?}");
        match event {
            ScriptEvent::Click { x, y } => {
                let hit = db.hit_test(x, y)?;
                if hit.is_none() {
                    info!("click ({x}, {y}) hit no region");
                }
                session.pointer_event(hit)?;
            }
            ScriptEvent::Month(month) => session.select_month(&month),
            ScriptEvent::Expand(panel) => session.set_panel_expanded(panel, true),
            ScriptEvent::Collapse(panel) => session.set_panel_expanded(panel, false),
            ScriptEvent::Reset => session.reset(),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        assert_eq!(
            parse_event("click 50 50").unwrap(),
            Some(ScriptEvent::Click { x: 50.0, y: 50.0 })
        );
        assert!(parse_event("click 50").is_err());
        assert!(parse_event("click fifty 50").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_event("month June").unwrap(),
            Some(ScriptEvent::Month("June".to_string()))
        );
        assert!(parse_event("month Brumaire").is_err());
        assert!(parse_event("month").is_err());
    }

    #[test]
    fn test_parse_panels_and_reset() {
        assert_eq!(
            parse_event("expand chart").unwrap(),
            Some(ScriptEvent::Expand(Panel::Chart))
        );
        assert_eq!(
            parse_event("collapse months").unwrap(),
            Some(ScriptEvent::Collapse(Panel::MonthFilter))
        );
        assert_eq!(parse_event("reset").unwrap(), Some(ScriptEvent::Reset));
        assert!(parse_event("collapse sidebar").is_err());
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_event("").unwrap(), None);
        assert_eq!(parse_event("   ").unwrap(), None);
        assert_eq!(parse_event("# click 1 2").unwrap(), None);
    }

    #[test]
    fn test_unknown_event() {
        assert!(parse_event("drag 1 2").is_err());
    }
}
