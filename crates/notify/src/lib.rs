//! Email notification delivery via SMTP.
//!
//! [`Notifier`] wraps the `lettre` async SMTP transport to send a
//! plain-text summary email to the musician whenever a booking request
//! is submitted. Configuration is loaded from environment variables; if
//! `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns `None` and
//! no mailer should be constructed. Delivery is best-effort: callers log
//! and swallow failures so a mail outage never fails a submission.

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@serenata.local";

/// Configuration for the SMTP notification mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Musician inbox that receives booking notifications.
    pub notify_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` or `NOTIFY_EMAIL` is not set,
    /// signalling that email delivery is not configured and should be
    /// skipped.
    ///
    /// | Variable        | Required | Default                   |
    /// |-----------------|----------|---------------------------|
    /// | `SMTP_HOST`     | yes      | —                         |
    /// | `NOTIFY_EMAIL`  | yes      | —                         |
    /// | `SMTP_PORT`     | no       | `587`                     |
    /// | `SMTP_FROM`     | no       | `noreply@serenata.local`  |
    /// | `SMTP_USER`     | no       | —                         |
    /// | `SMTP_PASSWORD` | no       | —                         |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let notify_address = std::env::var("NOTIFY_EMAIL").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            notify_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// BookingSummary
// ---------------------------------------------------------------------------

/// The facts of a submitted booking request, flattened for the email body.
#[derive(Debug, Clone)]
pub struct BookingSummary {
    pub booking_id: i64,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub wedding_date: NaiveDate,
    pub venue: String,
    pub pack_label: String,
    pub price_cents: i64,
    pub song_count: usize,
}

impl BookingSummary {
    fn body(&self) -> String {
        format!(
            "New booking request #{id}\n\n\
             Couple:   {name}\n\
             Email:    {email}\n\
             Phone:    {phone}\n\
             Date:     {date}\n\
             Venue:    {venue}\n\
             Pack:     {pack}\n\
             Price:    {euros}.{cents:02} EUR\n\
             Songs:    {songs}\n",
            id = self.booking_id,
            name = self.client_name,
            email = self.client_email,
            phone = self.client_phone,
            date = self.wedding_date,
            venue = self.venue,
            pack = self.pack_label,
            euros = self.price_cents / 100,
            cents = self.price_cents % 100,
            songs = self.song_count,
        )
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Sends booking notification emails via SMTP.
#[derive(Clone)]
pub struct Notifier {
    config: EmailConfig,
}

impl Notifier {
    /// Create a new notifier with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the new-booking summary to the configured musician inbox.
    pub async fn send_booking_notification(
        &self,
        summary: &BookingSummary,
    ) -> Result<(), NotifyError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let subject = format!(
            "[Serenata] New booking request for {}",
            summary.wedding_date
        );

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.notify_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(summary.body())
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            booking_id = summary.booking_id,
            to = %self.config.notify_address,
            "Booking notification email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
