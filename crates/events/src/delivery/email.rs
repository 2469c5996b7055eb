//! E-mail delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. If `SMTP_HOST`
//! is not set, [`EmailConfig::from_env`] returns `None` and no mailer should
//! be constructed.

use chrono::SecondsFormat;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use salon_core::types::Price;

use crate::bus::AppointmentBooked;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "bookings@salon.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                 |
    /// |-----------------|----------|-------------------------|
    /// | `SMTP_HOST`     | yes      |                         |
    /// | `SMTP_PORT`     | no       | `587`                   |
    /// | `SMTP_FROM`     | no       | `bookings@salon.local`  |
    /// | `SMTP_USER`     | no       |                         |
    /// | `SMTP_PASSWORD` | no       |                         |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message bodies
// ---------------------------------------------------------------------------

pub const BOOKING_CONFIRMATION_SUBJECT: &str = "Your appointment is booked";

/// Render a minor-unit amount as `units.cents`.
pub fn format_price(price: Price) -> String {
    format!("{}.{:02}", price / 100, price % 100)
}

/// Plain-text body of the booking confirmation sent to a client.
pub fn booking_confirmation_body(client_name: &str, booked: &AppointmentBooked) -> String {
    let with = booked
        .staff_name
        .as_deref()
        .map(|name| format!(" with {name}"))
        .unwrap_or_default();
    format!(
        "Hello {client_name},\n\n\
         Your appointment{with} is booked.\n\
         Start: {}\n\
         End: {}\n\
         Total: {}\n\n\
         See you soon!",
        booked.start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        booked.end_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        format_price(booked.total_price),
    )
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send a plain-text message.
    pub async fn send(
        &self,
        to_email: &str,
        subject: &str,
        body: String,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(to = to_email, subject, "Email sent");
        Ok(())
    }

    /// Confirm a new appointment to the client.
    pub async fn send_booking_confirmation(
        &self,
        to_email: &str,
        client_name: &str,
        booked: &AppointmentBooked,
    ) -> Result<(), EmailError> {
        self.send(
            to_email,
            BOOKING_CONFIRMATION_SUBJECT,
            booking_confirmation_body(client_name, booked),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn booked(staff_name: Option<&str>) -> AppointmentBooked {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        AppointmentBooked {
            appointment_id: 1,
            client_id: 2,
            staff_id: Some(10),
            staff_name: staff_name.map(str::to_string),
            start_time: start,
            end_time: start + chrono::TimeDelta::minutes(75),
            total_price: 8_505,
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn price_renders_two_decimals() {
        assert_eq!(format_price(8_505), "85.05");
        assert_eq!(format_price(0), "0.00");
        assert_eq!(format_price(1_200), "12.00");
    }

    #[test]
    fn confirmation_body_names_staff_and_times() {
        let body = booking_confirmation_body("Ana Silva", &booked(Some("Rita")));
        assert!(body.starts_with("Hello Ana Silva,"));
        assert!(body.contains("Your appointment with Rita is booked."));
        assert!(body.contains("Start: 2026-03-02T09:00:00Z"));
        assert!(body.contains("End: 2026-03-02T10:15:00Z"));
        assert!(body.contains("Total: 85.05"));
    }

    #[test]
    fn confirmation_body_without_staff() {
        let body = booking_confirmation_body("Ana Silva", &booked(None));
        assert!(body.contains("Your appointment is booked."));
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
