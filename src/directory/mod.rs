use async_trait::async_trait;

use crate::models::User;

/// Read-only lookups against whatever holds the registered accounts.
///
/// Both lookups are async so a real user store can be substituted for the
/// in-memory seed list without touching the validation logic. A miss is a
/// normal negative result, not a failure, so the contract is `Option`
/// rather than a fallible return.
#[async_trait]
pub trait UserDirectory: std::fmt::Debug + Send + Sync {
    async fn find_by_email(&self, email: &str) -> Option<User>;

    async fn find_by_username(&self, username: &str) -> Option<User>;
}

/// Directory backed by a fixed list of records.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: Vec<User>,
}

impl InMemoryDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The stock accounts every deployment starts with.
    pub fn seeded() -> Self {
        let seed = |id, email: &str, username: &str| User {
            id,
            email: email.to_owned(),
            username: username.to_owned(),
            password: "simplepass".to_owned(),
        };

        Self::new(vec![
            seed(1, "bob@example.com", "bob"),
            seed(2, "sally@example.com", "sally"),
            seed(3, "foo@example.com", "foo"),
        ])
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    #[tracing::instrument(skip(email), fields(email = "<hidden>"))]
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.iter().find(|user| user.email == email).cloned()
    }

    #[tracing::instrument(skip(username), fields(username = "<hidden>"))]
    async fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }
}
