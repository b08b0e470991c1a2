//! Category Repository

use super::{RepoError, RepoResult, id_list};
use crate::utils::validation::name_key;
use shared::models::{Category, CategoryCreate};
use sqlx::{Executor, Sqlite};

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Category>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id FROM category WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(category)
}

/// Direct children of every category in `parent_ids`
///
/// One query per call, so a breadth-first walk costs one round trip per level.
pub async fn find_children<'e, E>(executor: E, parent_ids: &[i64]) -> RepoResult<Vec<Category>>
where
    E: Executor<'e, Database = Sqlite>,
{
    if parent_ids.is_empty() {
        return Ok(Vec::new());
    }

    let children = sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id FROM category \
         WHERE parent_id IN (SELECT value FROM json_each(?)) ORDER BY id",
    )
    .bind(id_list(parent_ids))
    .fetch_all(executor)
    .await?;
    Ok(children)
}

/// Sibling lookup by case-insensitive name (`parent_id = None` means roots)
pub async fn find_by_name_ci<'e, E>(
    executor: E,
    parent_id: Option<i64>,
    name: &str,
) -> RepoResult<Option<Category>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id FROM category WHERE parent_id IS ? AND name_key = ? LIMIT 1",
    )
    .bind(parent_id)
    .bind(name_key(name))
    .fetch_optional(executor)
    .await?;
    Ok(category)
}

pub async fn create<'e, E>(executor: E, data: &CategoryCreate) -> RepoResult<Category>
where
    E: Executor<'e, Database = Sqlite>,
{
    let name = data.name.trim();
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO category (name, name_key, parent_id) VALUES (?, ?, ?) RETURNING id, name, parent_id",
    )
    .bind(name)
    .bind(name_key(name))
    .bind(data.parent_id)
    .fetch_one(executor)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Category '{}' already exists", name))
        }
        other => other,
    })?;
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn payload(name: &str, parent_id: Option<i64>) -> CategoryCreate {
        CategoryCreate {
            name: name.to_string(),
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let root = create(&pool, &payload(" Drinks ", None)).await.unwrap();
        assert_eq!(root.name, "Drinks");
        assert_eq!(root.parent_id, None);

        let found = find_by_id(&pool, root.id).await.unwrap().unwrap();
        assert_eq!(found, root);
        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_children_of_many_parents() {
        let pool = test_pool().await;
        let a = create(&pool, &payload("A", None)).await.unwrap();
        let b = create(&pool, &payload("B", None)).await.unwrap();
        let a1 = create(&pool, &payload("A1", Some(a.id))).await.unwrap();
        let b1 = create(&pool, &payload("B1", Some(b.id))).await.unwrap();
        create(&pool, &payload("A1x", Some(a1.id))).await.unwrap();

        let children = find_children(&pool, &[a.id, b.id]).await.unwrap();
        let ids: Vec<i64> = children.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a1.id, b1.id]);

        assert!(find_children(&pool, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_children_beyond_parameter_limit() {
        let pool = test_pool().await;
        let root = create(&pool, &payload("Root", None)).await.unwrap();
        let child = create(&pool, &payload("Child", Some(root.id))).await.unwrap();

        let mut parents: Vec<i64> = (100_000..140_000).collect();
        parents.push(root.id);
        let children = find_children(&pool, &parents).await.unwrap();
        assert_eq!(children, vec![child]);
    }

    #[tokio::test]
    async fn test_sibling_names_unique_ignoring_case() {
        let pool = test_pool().await;
        let root = create(&pool, &payload("Food", None)).await.unwrap();

        let err = create(&pool, &payload("FOOD", None)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // Same name under a different parent is fine
        create(&pool, &payload("food", Some(root.id))).await.unwrap();

        let found = find_by_name_ci(&pool, None, "fOOd").await.unwrap().unwrap();
        assert_eq!(found.id, root.id);
        let child = find_by_name_ci(&pool, Some(root.id), "FOOD").await.unwrap();
        assert!(child.is_some());
    }
}
