use acadewave_auth::{TokenPurpose, ValidityWindows};
use acadewave_config::EmailConfig;
use acadewave_models::Account;
use async_trait::async_trait;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("failed to send email: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("email task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Out-of-band delivery of lifecycle tokens.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_verification_email(&self, to: &Account, token: &str)
    -> Result<(), NotifyError>;

    async fn send_password_reset_email(
        &self,
        to: &Account,
        token: &str,
    ) -> Result<(), NotifyError>;

    async fn send_password_reset_confirmation(&self, to: &Account) -> Result<(), NotifyError>;
}

/// SMTP notifier. With delivery disabled in config, messages are logged and
/// dropped.
pub struct EmailService {
    config: EmailConfig,
    verification_minutes: i64,
    reset_minutes: i64,
}

impl EmailService {
    pub fn new(config: EmailConfig, windows: &ValidityWindows) -> Self {
        Self {
            config,
            verification_minutes: windows
                .window(TokenPurpose::EmailVerification)
                .num_minutes(),
            reset_minutes: windows.window(TokenPurpose::PasswordReset).num_minutes(),
        }
    }

    fn link(&self, path: &str, token: &str) -> String {
        format!(
            "{}/{}?token={}",
            self.config.frontend_url.trim_end_matches('/'),
            path,
            token
        )
    }

    #[instrument(skip(self, text_body, html_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: String,
        html_body: String,
    ) -> Result<(), NotifyError> {
        if !self.config.enabled {
            info!(to = %to_email, subject, "Email delivery disabled; message not sent");
            debug!(body = %text_body, "Undelivered email body");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(from.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email)).await??;

        info!(to = %to_email, subject, "Email sent");
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailService {
    async fn send_verification_email(
        &self,
        to: &Account,
        token: &str,
    ) -> Result<(), NotifyError> {
        let link = self.link("verify-email", token);
        let text_body = format!(
            "Hi {},\n\n\
             Welcome to Acadewave. Confirm your email address by opening the link below:\n\
             {}\n\n\
             This link will expire in {} minutes.\n\n\
             Acadewave Team",
            to.username, link, self.verification_minutes
        );
        let html_body = render_html(
            "Confirm your email",
            &to.username,
            "Welcome to Acadewave. Confirm your email address to activate your account.",
            Some(("Verify email", &link)),
            Some(self.verification_minutes),
        );

        self.send_email(&to.email, "Verify your email address", text_body, html_body)
            .await
    }

    async fn send_password_reset_email(
        &self,
        to: &Account,
        token: &str,
    ) -> Result<(), NotifyError> {
        let link = self.link("reset-password", token);
        let text_body = format!(
            "Hi {},\n\n\
             You requested to reset your password. Open the link below to choose a new one:\n\
             {}\n\n\
             This link will expire in {} minutes.\n\n\
             If you didn't request this, please ignore this email.\n\n\
             Acadewave Team",
            to.username, link, self.reset_minutes
        );
        let html_body = render_html(
            "Password reset request",
            &to.username,
            "We received a request to reset your password.",
            Some(("Reset password", &link)),
            Some(self.reset_minutes),
        );

        self.send_email(&to.email, "Password Reset Request", text_body, html_body)
            .await
    }

    async fn send_password_reset_confirmation(&self, to: &Account) -> Result<(), NotifyError> {
        let text_body = format!(
            "Hi {},\n\n\
             Your password has been reset.\n\n\
             If you didn't make this change, please contact support immediately.\n\n\
             Acadewave Team",
            to.username
        );
        let html_body = render_html(
            "Password reset successful",
            &to.username,
            "Your password has been reset. If you didn't make this change, please contact support immediately.",
            None,
            None,
        );

        self.send_email(&to.email, "Password Reset Successful", text_body, html_body)
            .await
    }
}

fn render_html(
    title: &str,
    name: &str,
    lead: &str,
    action: Option<(&str, &str)>,
    expires_in_minutes: Option<i64>,
) -> String {
    let button = action
        .map(|(label, href)| {
            format!(
                r#"<p style="margin: 30px 0; text-align: center;"><a href="{href}" style="padding: 14px 40px; background-color: #0E7490; color: #ffffff; text-decoration: none; border-radius: 6px; font-weight: bold;">{label}</a></p>
<p style="color: #666666; font-size: 14px;">Or paste this link into your browser:<br><span style="color: #0E7490; word-break: break-all;">{href}</span></p>"#
            )
        })
        .unwrap_or_default();
    let expiry = expires_in_minutes
        .map(|minutes| {
            format!(
                r#"<p style="color: #666666; font-size: 14px;"><strong>This link will expire in {minutes} minutes.</strong></p>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>{title}</title></head>
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
<div style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 8px; overflow: hidden;">
<div style="background-color: #0E7490; padding: 30px; text-align: center;"><h1 style="margin: 0; color: #ffffff;">Acadewave</h1></div>
<div style="padding: 40px 30px;">
<h2 style="margin: 0 0 20px 0; color: #333333;">{title}</h2>
<p style="color: #666666; font-size: 16px;">Hi <strong>{name}</strong>,</p>
<p style="color: #666666; font-size: 16px;">{lead}</p>
{button}
{expiry}
</div>
</div>
</body>
</html>"#
    )
}
