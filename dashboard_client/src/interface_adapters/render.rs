// Plain-text rendering of the dashboard for a terminal.

use crate::domain::{ApplianceStatus, Dashboard, Notification, NotificationLevel};
use std::fmt::Write;

pub fn render(view: &Dashboard) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== Home telemetry [{}] ==", view.connection);
    let _ = writeln!(out, "Total power: {} W", view.total_power);

    for (appliance, appliance_view) in view.appliances() {
        let marker = match appliance_view.status {
            ApplianceStatus::On => '*',
            ApplianceStatus::Off => ' ',
        };
        let pulse = if appliance_view.updating { " ~" } else { "" };
        let _ = writeln!(
            out,
            "  [{marker}] {:<16} {:>6} W  {}{pulse}",
            appliance.label(),
            appliance_view.power,
            appliance_view.status,
        );
    }

    let _ = writeln!(
        out,
        "Water: flow {} L/min, temperature {} C, total {} L",
        view.water_flow, view.water_temperature, view.water_total
    );
    let _ = writeln!(
        out,
        "Environment: {} C, humidity {}%, air quality {}",
        view.temperature, view.humidity, view.air_quality
    );
    let _ = write!(
        out,
        "Thermostat target: {} C | Daily estimate: {} kWh",
        view.thermostat_target, view.daily_estimate
    );

    out
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
        NotificationLevel::Info => "info",
    };
    format!("[{tag}] {}", notification.message)
}
