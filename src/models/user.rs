/// A registered account as the directory hands it out.
///
/// Seed data only; nothing in this service creates, mutates or deletes
/// records. The password is stored as given (hashing is out of scope for
/// this service, the records exist so availability checks have something
/// to collide with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password: String,
}
