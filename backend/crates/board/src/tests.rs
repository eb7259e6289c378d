//! Unit tests for board use cases
//!
//! Use cases run against an in-memory repository fake.

use std::sync::{Arc, Mutex};

use crate::application::{ListSecretsUseCase, SubmitSecretInput, SubmitSecretUseCase};
use crate::domain::entities::Secret;
use crate::domain::repository::SecretRepository;
use crate::error::BoardResult;

#[derive(Clone, Default)]
struct InMemoryBoardRepo {
    secrets: Arc<Mutex<Vec<Secret>>>,
}

impl SecretRepository for InMemoryBoardRepo {
    async fn create(&self, secret: &Secret) -> BoardResult<()> {
        self.secrets.lock().unwrap().push(secret.clone());
        Ok(())
    }

    async fn list_all(&self) -> BoardResult<Vec<Secret>> {
        Ok(self.secrets.lock().unwrap().clone())
    }
}

#[tokio::test]
async fn test_submit_stores_secret() {
    let repo = Arc::new(InMemoryBoardRepo::default());

    let use_case = SubmitSecretUseCase::new(repo.clone());
    let secret = use_case
        .execute(SubmitSecretInput {
            text: "hello".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(secret.text, "hello");

    let stored = repo.secrets.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].text, "hello");
}

#[tokio::test]
async fn test_submitted_secret_appears_in_listing() {
    let repo = Arc::new(InMemoryBoardRepo::default());

    SubmitSecretUseCase::new(repo.clone())
        .execute(SubmitSecretInput {
            text: "hello".to_string(),
        })
        .await
        .unwrap();

    let listing = ListSecretsUseCase::new(repo.clone()).execute().await.unwrap();
    assert!(listing.iter().any(|s| s.text == "hello"));
}

#[tokio::test]
async fn test_listing_returns_every_post() {
    let repo = Arc::new(InMemoryBoardRepo::default());
    let submit = SubmitSecretUseCase::new(repo.clone());

    for text in ["one", "two", "three"] {
        submit
            .execute(SubmitSecretInput {
                text: text.to_string(),
            })
            .await
            .unwrap();
    }

    let listing = ListSecretsUseCase::new(repo.clone()).execute().await.unwrap();
    assert_eq!(listing.len(), 3);
}

#[tokio::test]
async fn test_empty_board_lists_nothing() {
    let repo = Arc::new(InMemoryBoardRepo::default());
    let listing = ListSecretsUseCase::new(repo).execute().await.unwrap();
    assert!(listing.is_empty());
}
