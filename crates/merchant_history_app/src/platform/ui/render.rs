use merchant_history_core::{HistoryViewModel, Lifecycle, ParcelSnapshot};

pub fn render(view: &HistoryViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if view.lifecycle != Lifecycle::Active {
        return lines;
    }

    lines.push(format!("[ {} ]", view.search_label));

    if let Some(entries) = &view.dropdown {
        if entries.is_empty() {
            lines.push("  (no past parcels)".to_string());
        }
        for (index, identifier) in entries.iter().enumerate() {
            lines.push(format!("  {}. {}", index + 1, identifier));
        }
    }

    if let Some(snapshot) = &view.snapshot {
        lines.extend(render_snapshot(snapshot));
    }
    lines
}

fn render_snapshot(snapshot: &ParcelSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("Recipient:   {}", snapshot.recipient),
        format!("Address:     {}", snapshot.address),
        format!("Location:    {}", snapshot.location),
        format!("Information: {}", snapshot.information),
        format!("Visual cue:  {}", snapshot.visual_cue),
        format!(
            "Delivered:   {}",
            snapshot.time_delivered.as_deref().unwrap_or("not yet")
        ),
    ];
    lines.extend(render_history("Location history", &snapshot.location_history));
    lines.extend(render_history(
        "Information history",
        &snapshot.information_history,
    ));
    lines.extend(render_history("Cue history", &snapshot.cue_history));
    lines
}

fn render_history(title: &str, entries: &[String]) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }
    std::iter::once(format!("{title}:"))
        .chain(entries.iter().map(|entry| format!("  - {entry}")))
        .collect()
}
