//! Hierarchy Resolver
//!
//! Walks the category forest level by level through the `parent_id` index.
//! Iterative, so tree depth is unbounded.

use super::CatalogError;
use crate::db::repository::category;
use sqlx::SqlitePool;
use std::collections::HashSet;

/// All categories reachable from `category_id` through child edges
///
/// The start category itself is not included. Ids come back in breadth-first
/// order without duplicates. A node already seen is never expanded again, so a
/// corrupted tree containing a cycle still terminates (with a warning).
pub async fn descendants(pool: &SqlitePool, category_id: i64) -> Result<Vec<i64>, CatalogError> {
    if category::find_by_id(pool, category_id).await?.is_none() {
        return Err(CatalogError::CategoryNotFound(category_id));
    }

    let mut visited = HashSet::from([category_id]);
    let mut found = Vec::new();
    let mut frontier = vec![category_id];

    while !frontier.is_empty() {
        let children = category::find_children(pool, &frontier).await?;
        let mut next = Vec::with_capacity(children.len());
        for child in children {
            if visited.insert(child.id) {
                found.push(child.id);
                next.push(child.id);
            } else {
                tracing::warn!(
                    category_id,
                    revisited_id = child.id,
                    parent_id = ?child.parent_id,
                    "Cycle detected in category tree, node not expanded again"
                );
            }
        }
        frontier = next;
    }

    tracing::debug!(category_id, count = found.len(), "Resolved category descendants");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use shared::models::CategoryCreate;

    async fn add(pool: &SqlitePool, name: &str, parent_id: Option<i64>) -> i64 {
        category::create(
            pool,
            &CategoryCreate {
                name: name.to_string(),
                parent_id,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn sorted(mut ids: Vec<i64>) -> Vec<i64> {
        ids.sort_unstable();
        ids
    }

    #[tokio::test]
    async fn test_root_with_two_levels() {
        let pool = test_pool().await;
        let r = add(&pool, "R", None).await;
        let a = add(&pool, "A", Some(r)).await;
        let b = add(&pool, "B", Some(r)).await;
        let c = add(&pool, "C", Some(a)).await;

        let ids = descendants(&pool, r).await.unwrap();
        assert_eq!(sorted(ids.clone()), sorted(vec![a, b, c]));
        // Breadth-first: direct children come before grandchildren
        assert_eq!(ids.last(), Some(&c));

        assert_eq!(descendants(&pool, a).await.unwrap(), vec![c]);
    }

    #[tokio::test]
    async fn test_leaf_has_no_descendants() {
        let pool = test_pool().await;
        let r = add(&pool, "R", None).await;
        let leaf = add(&pool, "Leaf", Some(r)).await;

        assert!(descendants(&pool, leaf).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let pool = test_pool().await;
        let err = descendants(&pool, 404).await.unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNotFound(404)));
    }

    #[tokio::test]
    async fn test_deep_chain() {
        let pool = test_pool().await;
        let root = add(&pool, "level-0", None).await;
        let mut parent = root;
        for depth in 1..=200 {
            parent = add(&pool, &format!("level-{depth}"), Some(parent)).await;
        }

        let ids = descendants(&pool, root).await.unwrap();
        assert_eq!(ids.len(), 200);
        assert_eq!(ids.last(), Some(&parent));
    }

    #[tokio::test]
    async fn test_cycle_terminates() {
        let pool = test_pool().await;
        let a = add(&pool, "A", None).await;
        let b = add(&pool, "B", Some(a)).await;
        let c = add(&pool, "C", Some(b)).await;
        // Bypass the create workflow to close the loop A -> B -> C -> A
        sqlx::query("UPDATE category SET parent_id = ? WHERE id = ?")
            .bind(c)
            .bind(a)
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(descendants(&pool, a).await.unwrap(), vec![b, c]);
        assert_eq!(descendants(&pool, b).await.unwrap(), vec![c, a]);
    }
}
