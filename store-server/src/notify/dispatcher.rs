//! Notification Dispatcher
//!
//! Runs after an order commits and never touches the order itself. The SMS
//! and email attempts are independent: both always run, each yields its own
//! `Result`, and every outcome is logged here.

use super::{EmailSender, NotificationError, SmsSender};
use crate::orders::PlacedOrder;
use std::fmt::Write;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Outcome of an attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Nothing to send to (no customer, no phone)
    Skipped(&'static str),
}

/// Result of both attempts for one order
#[derive(Debug)]
pub struct NotificationReport {
    pub sms: Result<Delivery, NotificationError>,
    pub email: Result<Delivery, NotificationError>,
}

#[derive(Clone, Default)]
pub struct Notifier {
    sms: Option<Arc<dyn SmsSender>>,
    email: Option<Arc<dyn EmailSender>>,
    admin_email: Option<String>,
}

impl Notifier {
    pub fn new(
        sms: Option<Arc<dyn SmsSender>>,
        email: Option<Arc<dyn EmailSender>>,
        admin_email: Option<String>,
    ) -> Self {
        Self {
            sms,
            email,
            admin_email,
        }
    }

    /// Notifier with no transports; every attempt reports `NotConfigured`
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Fire-and-forget: run [`Notifier::notify`] on a background task
    pub fn dispatch(&self, placed: PlacedOrder) -> JoinHandle<NotificationReport> {
        let notifier = self.clone();
        tokio::spawn(async move { notifier.notify(&placed).await })
    }

    /// Attempt the SMS and the email once each
    pub async fn notify(&self, placed: &PlacedOrder) -> NotificationReport {
        let (sms, email) = tokio::join!(self.send_sms(placed), self.send_email(placed));

        let order_id = placed.order.id;
        log_outcome(order_id, "sms", &sms);
        log_outcome(order_id, "email", &email);

        NotificationReport { sms, email }
    }

    async fn send_sms(&self, placed: &PlacedOrder) -> Result<Delivery, NotificationError> {
        let Some(customer) = &placed.customer else {
            return Ok(Delivery::Skipped("order has no customer"));
        };
        let phone = customer.phone.trim();
        if phone.is_empty() {
            return Ok(Delivery::Skipped("customer has no phone number"));
        }
        let sender = self.sms.as_ref().ok_or(NotificationError::NotConfigured("sms"))?;

        sender.send(phone, &sms_text(placed)).await?;
        Ok(Delivery::Sent)
    }

    async fn send_email(&self, placed: &PlacedOrder) -> Result<Delivery, NotificationError> {
        let (Some(sender), Some(to)) = (self.email.as_ref(), self.admin_email.as_deref()) else {
            return Err(NotificationError::NotConfigured("email"));
        };

        sender
            .send(to, &email_subject(placed), &email_body(placed))
            .await?;
        Ok(Delivery::Sent)
    }
}

fn log_outcome(order_id: i64, channel: &str, outcome: &Result<Delivery, NotificationError>) {
    match outcome {
        Ok(Delivery::Sent) => tracing::info!(order_id, channel, "Notification sent"),
        Ok(Delivery::Skipped(reason)) => {
            tracing::warn!(order_id, channel, reason, "Notification skipped")
        }
        Err(e @ NotificationError::NotConfigured(_)) => {
            tracing::warn!(order_id, channel, error = %e, "Notification not sent")
        }
        Err(e) => tracing::error!(order_id, channel, error = %e, "Notification failed"),
    }
}

fn customer_name(placed: &PlacedOrder) -> &str {
    placed
        .customer
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("customer")
}

pub(crate) fn sms_text(placed: &PlacedOrder) -> String {
    format!(
        "Hello {}, your order #{} has been placed. Total: {}",
        customer_name(placed),
        placed.order.id,
        placed.order.total
    )
}

pub(crate) fn email_subject(placed: &PlacedOrder) -> String {
    format!(
        "Hello {}, your new order has been placed!",
        customer_name(placed)
    )
}

pub(crate) fn email_body(placed: &PlacedOrder) -> String {
    let order = &placed.order;
    let name = customer_name(placed);

    let mut body = format!(
        "Dear {name},\n\n\
         Thank you for shopping with us! Your order has been successfully placed.\n\n\
         Order Details:\n\
         Order ID: {}\n\
         Customer: {name}\n\
         Total Amount: {}\n\n\
         Items:\n",
        order.id, order.total
    );
    for item in &order.items {
        let _ = writeln!(
            body,
            "- {} x{} @ {}",
            item.product_name, item.quantity, item.price
        );
    }
    body.push_str("\nWe will notify you once your order is out for delivery.\n");
    body
}
