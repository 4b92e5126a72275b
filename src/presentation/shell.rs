// Terminal rendering of the dashboard view
use std::fmt::Write;

use crate::presentation::view::DashboardView;

/// Lays the view out the way the dashboard page does: greeting block with
/// clock and date, metric tiles, then the notification list.
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}  [{}]", view.clock, view.date, view.mode.label());
    let _ = writeln!(out, "{} User! Wish you a nice day", view.greeting.phrase());
    let _ = writeln!(
        out,
        "Temperature {}°C | Humidity {}% | Lux {} lx | Soil Moisture {}%",
        view.latest.temperature, view.latest.humidity, view.latest.lux, view.latest.soil_moisture
    );
    if view.notifications.is_empty() {
        let _ = writeln!(out, "Notifications: none");
    } else {
        let _ = writeln!(out, "Notifications:");
        for note in &view.notifications {
            let _ = writeln!(out, "  - {}", note);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_state::TelemetryDashboardState;
    use chrono::{Local, TimeZone};

    #[test]
    fn renders_greeting_and_metrics() {
        let state =
            TelemetryDashboardState::new(Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
        let rendered = render(&DashboardView::from_state(&state));

        assert!(rendered.contains("Good morning User!"));
        assert!(rendered.contains("[day]"));
        assert!(rendered.contains("Temperature 10°C"));
        assert!(rendered.contains("Notifications: none"));
    }
}
