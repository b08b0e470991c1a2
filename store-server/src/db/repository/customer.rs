//! Customer Repository

use super::RepoResult;
use shared::models::{Customer, CustomerCreate};
use sqlx::{Executor, Sqlite};

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Customer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT id, name, phone, email FROM customer WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(customer)
}

pub async fn exists_by_phone<'e, E>(executor: E, phone: &str) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customer WHERE phone = ?)")
        .bind(phone.trim())
        .fetch_one(executor)
        .await?;
    Ok(exists)
}

pub async fn create<'e, E>(executor: E, data: &CustomerCreate) -> RepoResult<Customer>
where
    E: Executor<'e, Database = Sqlite>,
{
    let customer = sqlx::query_as::<_, Customer>(
        "INSERT INTO customer (name, phone, email) VALUES (?, ?, ?) RETURNING id, name, phone, email",
    )
    .bind(data.name.trim())
    .bind(data.phone.trim())
    .bind(data.email.trim())
    .fetch_one(executor)
    .await?;
    Ok(customer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let created = create(
            &pool,
            &CustomerCreate {
                name: " Amina ".to_string(),
                phone: "+254700000001".to_string(),
                email: "amina@example.com".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(created.name, "Amina");

        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(exists_by_phone(&pool, "+254700000001").await.unwrap());
        assert!(!exists_by_phone(&pool, "+254700000002").await.unwrap());
    }
}
