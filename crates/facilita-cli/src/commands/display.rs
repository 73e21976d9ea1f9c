//! Plain-text rendering shared by the commands.

use facilita_core::request::Request;

pub fn money(amount: f64) -> String {
    format!("R$ {:.2}", amount)
}

pub fn request_line(request: &Request) -> String {
    format!(
        "[{}] {} - {} {} - {} ({})",
        request.id,
        request.service_name.as_deref().unwrap_or(&request.service_id),
        request.scheduled_date,
        request.scheduled_time,
        money(request.value),
        request.status
    )
}
