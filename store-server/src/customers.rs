//! Customer create workflow

use crate::db::repository::customer;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PHONE_LEN, validate_email, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Customer, CustomerCreate};
use sqlx::SqlitePool;

/// Register a customer; a phone number may belong to one customer only
pub async fn create_customer(pool: &SqlitePool, data: CustomerCreate) -> AppResult<Customer> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.phone, "phone", MAX_PHONE_LEN)?;
    validate_email(&data.email, "email")?;

    if customer::exists_by_phone(pool, &data.phone).await? {
        tracing::warn!(phone = %data.phone.trim(), "Attempt to create duplicate customer");
        return Err(AppError::new(ErrorCode::CustomerPhoneExists).for_field("phone"));
    }

    let created = customer::create(pool, &data).await?;
    tracing::info!(
        customer_id = created.id,
        name = %created.name,
        phone = %created.phone,
        email = %created.email,
        "New customer created"
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn payload(phone: &str, email: &str) -> CustomerCreate {
        CustomerCreate {
            name: "Wanjiru".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_customer() {
        let pool = test_pool().await;
        let c = create_customer(&pool, payload("+254711000111", "w@example.com"))
            .await
            .unwrap();
        assert_eq!(c.phone, "+254711000111");
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_conflict() {
        let pool = test_pool().await;
        create_customer(&pool, payload("+254711000111", "w@example.com"))
            .await
            .unwrap();
        let err = create_customer(&pool, payload(" +254711000111 ", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerPhoneExists);
        assert_eq!(err.field(), Some("phone"));
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let pool = test_pool().await;
        let err = create_customer(&pool, payload("+254711000111", "nope"))
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("email"));
    }
}
