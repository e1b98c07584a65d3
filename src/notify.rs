use notify_rust::{Notification, Urgency};

/// Desktop notification for the running→finished edge of a watched job.
pub fn job_finished(exit_code: Option<i32>) {
    let (summary, icon, urgency) = match exit_code {
        Some(code) if code != 0 => ("Skills sync failed", "dialog-error", Urgency::Critical),
        _ => ("Skills sync finished", "dialog-information", Urgency::Normal),
    };

    let body = match exit_code {
        Some(code) => format!("Install job exited with code {code}"),
        None => "Install job finished".to_string(),
    };

    let _ = Notification::new()
        .summary(summary)
        .body(&body)
        .icon(icon)
        .urgency(urgency)
        .show();
}
