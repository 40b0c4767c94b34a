//! Exhausts paginated service queries.
//!
//! The caller supplies the request function; every page it returns is
//! concatenated in arrival order until a page comes back without a
//! continuation token. Errors from the request function are returned as-is.

use crate::types::Page;
use std::future::Future;

pub async fn consume_all<T, E, F, Fut>(mut request: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let first = request(None).await?;
    consume_remaining(first, request).await
}

/// Continues from a page the caller already fetched.
pub async fn consume_remaining<T, E, F, Fut>(first: Page<T>, mut request: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut token = first.continuation().map(str::to_string);
    let mut items = first.items;
    let mut pages = 1_usize;
    while let Some(next) = token.take() {
        let page = request(Some(next)).await?;
        token = page.continuation().map(str::to_string);
        items.extend(page.items);
        pages += 1;
    }
    tracing::debug!(pages, items = items.len(), "paged query exhausted");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    #[tokio::test]
    async fn test_concatenates_pages_in_order() {
        let mut pages = vec![
            Page::new(vec!['a', 'b'], Some("t1".to_string())),
            Page::last(vec!['c']),
        ]
        .into_iter();
        let mut tokens = Vec::new();
        let items = consume_all(|token| {
            tokens.push(token);
            let page = pages.next().expect("no more pages");
            async move { Ok::<_, TransportError>(page) }
        })
        .await
        .unwrap();
        assert_eq!(items, vec!['a', 'b', 'c']);
        assert_eq!(tokens, vec![None, Some("t1".to_string())]);
    }

    #[tokio::test]
    async fn test_single_page_without_token() {
        let mut calls = 0;
        let items = consume_all(|_| {
            calls += 1;
            async { Ok::<_, TransportError>(Page::last(vec![1, 2])) }
        })
        .await
        .unwrap();
        assert_eq!(items, vec![1, 2]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_empty_result() {
        let items: Vec<u8> = consume_all(|_| async { Ok::<_, TransportError>(Page::last(vec![])) })
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_page_failure_propagates_unchanged() {
        let mut calls = 0;
        let result: Result<Vec<u8>, TransportError> = consume_all(|token| {
            calls += 1;
            async move {
                match token {
                    None => Ok(Page::new(vec![1], Some("t1".to_string()))),
                    Some(_) => Err(TransportError::Failure {
                        message: "timed out".to_string(),
                    }),
                }
            }
        })
        .await;
        assert_eq!(
            result,
            Err(TransportError::Failure {
                message: "timed out".to_string()
            })
        );
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_consume_remaining_skips_first_request() {
        let first = Page::new(vec![1], Some("t1".to_string()));
        let mut tokens = Vec::new();
        let items = consume_remaining(first, |token| {
            tokens.push(token);
            async { Ok::<_, TransportError>(Page::last(vec![2, 3])) }
        })
        .await
        .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(tokens, vec![Some("t1".to_string())]);
    }
}
