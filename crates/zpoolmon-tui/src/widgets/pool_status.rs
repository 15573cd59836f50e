//! Pool status entry — `[name=STATE]` with state-keyed coloring.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use zpoolmon_kstat::PoolHealth;

use crate::board::PoolSlotView;
use crate::theme;

/// Styled spans rendering one pool as `[name=STATE]`.
pub fn pool_spans(view: &PoolSlotView) -> Vec<Span<'static>> {
    let health: PoolHealth = view.style_tag.parse().unwrap_or(PoolHealth::Unknown);
    let state_style = Style::default()
        .fg(theme::health_color(health))
        .add_modifier(Modifier::BOLD);

    vec![
        Span::styled("[", theme::separator_style()),
        Span::styled(view.name.clone(), theme::pool_name_style()),
        Span::styled("=", theme::separator_style()),
        Span::styled(view.label.clone(), state_style),
        Span::styled("]", theme::separator_style()),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn view(name: &str, label: &str, tag: &str) -> PoolSlotView {
        PoolSlotView {
            name: name.to_owned(),
            label: label.to_owned(),
            style_tag: tag.to_owned(),
        }
    }

    #[test]
    fn renders_bracketed_name_and_state() {
        let spans = pool_spans(&view("tank", "ONLINE", "online"));
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[tank=ONLINE]");
    }

    #[test]
    fn state_color_follows_health() {
        let online = pool_spans(&view("tank", "ONLINE", "online"));
        assert_eq!(online[3].style.fg, Some(theme::SUCCESS_GREEN));

        let unavail = pool_spans(&view("tank", "UNAVAIL", "unavail"));
        assert_eq!(unavail[3].style.fg, Some(theme::ERROR_RED));

        let degraded = pool_spans(&view("tank", "DEGRADED", "degraded"));
        assert_eq!(degraded[3].style.fg, Some(theme::ELECTRIC_YELLOW));
    }

    #[test]
    fn unrecognized_state_renders_dimmed() {
        let spans = pool_spans(&view("tank", "SCRUBBING", "scrubbing"));
        assert_eq!(spans[3].style.fg, Some(theme::DIM_WHITE));
    }
}
