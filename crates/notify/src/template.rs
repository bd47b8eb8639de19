//! Rendering of the HTML quote email and the WhatsApp message templates.

use japi_core::quote::QuoteLine;

use crate::pipeline::{CompanyIdentity, QuoteNotification};

/// Fallback WhatsApp message for the customer when no template is
/// configured.
pub const DEFAULT_CLIENT_TEMPLATE: &str =
    "¡Hola {{customer_name}}! Tu cotización está lista. Total estimado: ${{total_estimate}}.";

/// Fallback WhatsApp alert for staff when no template is configured.
pub const DEFAULT_ADMIN_TEMPLATE: &str =
    "Nueva cotización de {{customer_name}} por ${{total_estimate}}.";

/// Substitute `{{key}}` placeholders in a message template.
///
/// Unknown placeholders are left in place.
pub fn render_placeholders(template: &str, vars: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in vars {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

/// Render the HTML quote document sent to the customer.
///
/// Interpolates the company identity, customer and event details, one
/// table row per service line with its subtotal, and the total estimate.
pub fn render_quote_html(
    company: &CompanyIdentity,
    notification: &QuoteNotification,
    quote_number: &str,
    date: &str,
) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str(&format!(
        "<title>Tu Cotización - {}</title></head>",
        company.company_name
    ));
    html.push_str(
        "<body style=\"font-family: Arial, sans-serif; color: #333; \
         max-width: 600px; margin: 0 auto; padding: 20px;\">",
    );

    html.push_str(&format!(
        "<div style=\"text-align: center; margin-bottom: 30px;\">\
         <h1 style=\"color: #ff6b35; margin: 0;\">🎉 {}</h1>\
         <p style=\"color: #666; font-size: 18px;\">¡Tu cotización está lista!</p>\
         <p style=\"color: #999; font-size: 14px;\">Cotización {} · {}</p>\
         </div>",
        company.company_name, quote_number, date
    ));

    let celebrant = notification
        .child_name
        .as_deref()
        .unwrap_or("tu pequeño");
    html.push_str(&format!(
        "<div style=\"background: #f8f9fa; padding: 20px; border-radius: 8px;\">\
         <h2 style=\"margin-top: 0;\">Hola {} 👋</h2>\
         <p>Estamos emocionados de ser parte de la celebración de {}. \
         Aquí tienes los detalles de tu cotización personalizada:</p></div>",
        notification.customer_name, celebrant
    ));

    html.push_str("<h3 style=\"color: #ff6b35;\">📋 Detalles del Evento</h3><ul>");
    push_detail(&mut html, "Niño(a)", notification.child_name.as_deref());
    push_detail(&mut html, "Fecha", notification.event_date.as_deref());
    let count = notification.children_count.map(|c| c.to_string());
    push_detail(&mut html, "Número de niños", count.as_deref());
    push_detail(&mut html, "Edad", notification.age_range.as_deref());
    push_detail(&mut html, "Ubicación", notification.location.as_deref());
    html.push_str("</ul>");

    html.push_str(
        "<h3 style=\"color: #ff6b35;\">🎪 Servicios Seleccionados</h3>\
         <table style=\"width: 100%; border-collapse: collapse;\">\
         <thead><tr style=\"background: #ff6b35; color: white;\">\
         <th style=\"padding: 12px; text-align: left;\">Servicio</th>\
         <th style=\"padding: 12px; text-align: center;\">Cantidad</th>\
         <th style=\"padding: 12px; text-align: right;\">Precio</th>\
         <th style=\"padding: 12px; text-align: right;\">Total</th>\
         </tr></thead><tbody>",
    );
    for line in &notification.lines {
        html.push_str(&render_line_row(line));
    }
    html.push_str(&format!(
        "</tbody><tfoot><tr style=\"font-weight: bold; font-size: 18px;\">\
         <td colspan=\"3\" style=\"padding: 15px; text-align: right;\">Total Estimado:</td>\
         <td style=\"padding: 15px; text-align: right; color: #ff6b35;\">${}</td>\
         </tr></tfoot></table>",
        notification.total_estimate
    ));

    html.push_str(
        "<div style=\"background: #e3f2fd; padding: 20px; border-radius: 8px; \
         margin-top: 20px;\">\
         <h3 style=\"color: #1976d2; margin-top: 0;\">💡 Próximos Pasos</h3><ol>\
         <li>Revisaremos tu solicitud en las próximas 24 horas</li>\
         <li>Te contactaremos para confirmar detalles y disponibilidad</li>\
         <li>Finalizaremos los detalles de tu evento perfecto</li>\
         </ol></div>",
    );

    html.push_str(&format!(
        "<div style=\"text-align: center; margin-top: 30px; color: #666; \
         font-size: 14px;\">\
         <p>{} - Creando sonrisas, un evento a la vez 🎉</p>\
         <p>Este es un mensaje automático, por favor no responder a este email.</p>\
         </div></body></html>",
        company.company_name
    ));

    html
}

/// Render one `<li>` event detail, skipping absent values.
fn push_detail(html: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        html.push_str(&format!(
            "<li style=\"padding: 5px 0;\"><strong>{label}:</strong> {value}</li>"
        ));
    }
}

/// Render one service line table row with its computed subtotal.
fn render_line_row(line: &QuoteLine) -> String {
    format!(
        "<tr style=\"border-bottom: 1px solid #eee;\">\
         <td style=\"padding: 12px; text-align: left;\">{}</td>\
         <td style=\"padding: 12px; text-align: center;\">{}</td>\
         <td style=\"padding: 12px; text-align: right;\">${}</td>\
         <td style=\"padding: 12px; text-align: right; font-weight: bold;\">${}</td>\
         </tr>",
        line.service_name,
        line.quantity,
        line.unit_price,
        line.subtotal()
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_placeholders_substitutes_known_keys() {
        let rendered = render_placeholders(
            DEFAULT_ADMIN_TEMPLATE,
            &[("customer_name", "Ana"), ("total_estimate", "2850")],
        );
        assert_eq!(rendered, "Nueva cotización de Ana por $2850.");
    }

    #[test]
    fn render_placeholders_leaves_unknown_keys() {
        let rendered = render_placeholders("Hola {{nombre}}", &[("customer_name", "Ana")]);
        assert_eq!(rendered, "Hola {{nombre}}");
    }

    #[test]
    fn render_quote_html_includes_lines_and_total() {
        let company = CompanyIdentity::default();
        let notification = QuoteNotification {
            quote_id: 1,
            customer_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            event_date: Some("15/09/2026".to_string()),
            children_count: Some(10),
            age_range: Some("4-12 años".to_string()),
            child_name: Some("Luis".to_string()),
            location: None,
            lines: vec![QuoteLine {
                service_id: "chef".to_string(),
                service_name: "Estación Chef".to_string(),
                unit_price: 800,
                quantity: 2,
            }],
            total_estimate: 1600,
        };

        let html = render_quote_html(&company, &notification, "COT-ABC123", "25/08/2026");
        assert!(html.contains("Hola Ana"));
        assert!(html.contains("Estación Chef"));
        assert!(html.contains("$1600"));
        assert!(html.contains("COT-ABC123"));
        assert!(html.contains("Luis"));
    }

    #[test]
    fn render_quote_html_omits_absent_details() {
        let company = CompanyIdentity::default();
        let notification = QuoteNotification {
            quote_id: 1,
            customer_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            event_date: None,
            children_count: None,
            age_range: None,
            child_name: None,
            location: None,
            lines: Vec::new(),
            total_estimate: 0,
        };

        let html = render_quote_html(&company, &notification, "COT-X", "25/08/2026");
        assert!(!html.contains("Ubicación"));
        assert!(html.contains("tu pequeño"));
    }
}
