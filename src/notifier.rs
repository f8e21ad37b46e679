// src/notifier.rs
use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::environment::SmtpConfig;
use crate::store::{Job, Subscription};

/// Sends plaintext job alerts through the configured mail relay. Sends are
/// best-effort and independent per recipient; a failure is logged and never
/// reaches the job-creation caller.
pub struct Notifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl Notifier {
    pub fn from_config(config: &SmtpConfig, password: Option<String>) -> Result<Self> {
        let sender: Mailbox = config
            .sender
            .parse()
            .with_context(|| format!("Invalid SMTP sender address: {}", config.sender))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.relay.clone())
                .port(config.port);

        if let Some(password) = password {
            if !config.username.is_empty() {
                builder = builder.credentials(Credentials::new(config.username.clone(), password));
            }
        }

        Ok(Self {
            mailer: builder.build(),
            sender,
        })
    }

    /// A subscription with no keyword matches every job; otherwise the
    /// keyword must be a case-insensitive substring of the job title.
    pub fn keyword_matches(keyword: Option<&str>, title: &str) -> bool {
        match keyword {
            Some(keyword) => title.to_lowercase().contains(&keyword.to_lowercase()),
            None => true,
        }
    }

    pub fn matching_recipients<'a>(
        subscriptions: &'a [Subscription],
        job: &Job,
    ) -> Vec<&'a Subscription> {
        subscriptions
            .iter()
            .filter(|subscription| Self::keyword_matches(subscription.keyword.as_deref(), &job.title))
            .collect()
    }

    /// One send attempt per matching subscriber. Failures are isolated from
    /// sibling deliveries.
    pub async fn notify_subscribers(&self, job: &Job, subscriptions: &[Subscription]) {
        let recipients = Self::matching_recipients(subscriptions, job);
        if recipients.is_empty() {
            return;
        }

        info!(
            "Notifying {} subscriber(s) about job '{}'",
            recipients.len(),
            job.title
        );

        for subscription in recipients {
            if let Err(e) = self.send_alert(subscription, job).await {
                warn!("Failed to notify {}: {:#}", subscription.email, e);
            }
        }
    }

    async fn send_alert(&self, subscription: &Subscription, job: &Job) -> Result<()> {
        let recipient: Mailbox = subscription
            .email
            .parse()
            .with_context(|| format!("Invalid recipient address: {}", subscription.email))?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(format!("New job posting: {}", job.title))
            .body(format!(
                "A new job matching your subscription was just posted:\n\n\
                 {} at {} ({})\n\n{}\n",
                job.title, job.company, job.location, job.description
            ))
            .context("Failed to build notification email")?;

        self.mailer
            .send(message)
            .await
            .context("Mail relay rejected the message")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keyword_matches_any_title() {
        assert!(Notifier::keyword_matches(None, "Backend Developer"));
        assert!(Notifier::keyword_matches(None, ""));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        assert!(Notifier::keyword_matches(Some("python"), "Python Developer"));
        assert!(Notifier::keyword_matches(Some("DEV"), "Backend Developer"));
        assert!(!Notifier::keyword_matches(Some("python"), "Designer"));
    }

    #[test]
    fn test_one_attempt_per_matching_subscriber() {
        let subscriptions = vec![
            Subscription::new("python@example.com", Some("python".to_string())),
            Subscription::new("anything@example.com", None),
            Subscription::new("design@example.com", Some("design".to_string())),
        ];
        let job = Job::new("Python Developer", "TechCorp", "Remote", "desc");

        let recipients = Notifier::matching_recipients(&subscriptions, &job);
        let emails: Vec<&str> = recipients.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(emails, vec!["python@example.com", "anything@example.com"]);
    }
}
