//! The client half of the sign-up protocol: per-field shape checks run on
//! every keystroke, availability probes ride behind a debouncer, and the
//! submit button stays locked until every field is known good.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::directory::UserDirectory;
use crate::util::validation;

mod debounce;

pub use debounce::Debouncer;

/// Which of the two directory-checked fields an answer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Username,
}

/// One availability answer, tagged with the input value the probe was
/// issued for. The tag is what lets the form drop answers that raced with
/// a newer keystroke instead of letting the last response win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub field: Field,
    pub value: String,
    pub taken: bool,
}

/// Lifecycle of the email and username fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Nothing typed yet. Blocks submission.
    #[default]
    Untouched,
    /// Shape check failed; no probe was issued.
    Invalid,
    /// Shape check passed, probe scheduled or in flight. Blocks submission
    /// until the answer lands (fail-closed).
    Pending { value: String },
    /// The directory reported the value free.
    Available { value: String },
    /// The directory reported the value already registered.
    Taken { value: String },
}

/// Lifecycle of the password field. Purely synchronous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordState {
    #[default]
    Untouched,
    Invalid,
    Valid,
}

/// State machine for one sign-up form.
///
/// Input events mutate the three field states synchronously; availability
/// answers flow back through [`next_result`]/[`apply`] on the same control
/// flow, so there is exactly one writer and no locking. The probes
/// themselves run on spawned tasks and cannot be cancelled once the
/// debounce window has elapsed, which is why [`apply`] re-checks the value
/// tag before trusting an answer.
///
/// [`next_result`]: SignupForm::next_result
/// [`apply`]: SignupForm::apply
pub struct SignupForm {
    email: FieldState,
    username: FieldState,
    password: PasswordState,
    email_probe: Debouncer<String>,
    username_probe: Debouncer<String>,
    results: mpsc::UnboundedReceiver<Availability>,
}

impl SignupForm {
    /// Default quiet window between the last keystroke and the probe.
    pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

    pub fn new(directory: Arc<dyn UserDirectory>, window: Duration) -> Self {
        let (tx, results) = mpsc::unbounded_channel();

        let email_probe = {
            let directory = Arc::clone(&directory);
            let tx = tx.clone();
            Debouncer::new(window, move |value: String| {
                let directory = Arc::clone(&directory);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let taken = directory.find_by_email(&value).await.is_some();
                    let _ = tx.send(Availability {
                        field: Field::Email,
                        value,
                        taken,
                    });
                });
            })
        };

        let username_probe = Debouncer::new(window, move |value: String| {
            let directory = Arc::clone(&directory);
            let tx = tx.clone();
            tokio::spawn(async move {
                let taken = directory.find_by_username(&value).await.is_some();
                let _ = tx.send(Availability {
                    field: Field::Username,
                    value,
                    taken,
                });
            });
        });

        Self {
            email: FieldState::default(),
            username: FieldState::default(),
            password: PasswordState::default(),
            email_probe,
            username_probe,
            results,
        }
    }

    /// A keystroke settled in the email box.
    pub fn email_input(&mut self, value: &str) {
        if validation::is_valid_email(value) {
            self.email = FieldState::Pending {
                value: value.to_owned(),
            };
            self.email_probe.call(value.to_owned());
        } else {
            // An already-scheduled probe for an older value is left alone;
            // its answer will carry the older value and be dropped.
            self.email = FieldState::Invalid;
        }
    }

    /// A keystroke settled in the username box.
    pub fn username_input(&mut self, value: &str) {
        if validation::is_valid_username(value) {
            self.username = FieldState::Pending {
                value: value.to_owned(),
            };
            self.username_probe.call(value.to_owned());
        } else {
            self.username = FieldState::Invalid;
        }
    }

    /// A keystroke settled in the password box. No async step.
    pub fn password_input(&mut self, value: &str) {
        self.password = if validation::is_valid_password(value) {
            PasswordState::Valid
        } else {
            PasswordState::Invalid
        };
    }

    /// Waits for the next availability answer.
    ///
    /// Resolves `None` only if the form has been torn apart; while the form
    /// is whole the probes keep their sender ends alive.
    pub async fn next_result(&mut self) -> Option<Availability> {
        self.results.recv().await
    }

    /// Folds answers that have already arrived into the field states
    /// without waiting for more.
    pub fn pump(&mut self) {
        while let Ok(result) = self.results.try_recv() {
            self.apply(result);
        }
    }

    /// Applies one availability answer.
    ///
    /// The answer only lands if the field is still waiting on that exact
    /// value; anything else is a stale response for input the user has
    /// since replaced, and is discarded.
    pub fn apply(&mut self, result: Availability) {
        let field = match result.field {
            Field::Email => &mut self.email,
            Field::Username => &mut self.username,
        };

        match field {
            FieldState::Pending { value } if *value == result.value => {
                *field = if result.taken {
                    FieldState::Taken { value: result.value }
                } else {
                    FieldState::Available { value: result.value }
                };
            }
            _ => {}
        }
    }

    pub fn email_state(&self) -> &FieldState {
        &self.email
    }

    pub fn username_state(&self) -> &FieldState {
        &self.username
    }

    pub fn password_state(&self) -> PasswordState {
        self.password
    }

    /// Submission is allowed only when every field is affirmatively good:
    /// both directory-checked fields answered "free" for their current
    /// values and the password cleared its shape check. Unknown states
    /// count as blocking.
    pub fn submit_enabled(&self) -> bool {
        matches!(self.email, FieldState::Available { .. })
            && matches!(self.username, FieldState::Available { .. })
            && self.password == PasswordState::Valid
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &self.password)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::models::User;
    use async_trait::async_trait;
    use tokio::time;

    fn form() -> SignupForm {
        SignupForm::new(
            Arc::new(InMemoryDirectory::seeded()),
            SignupForm::DEBOUNCE_WINDOW,
        )
    }

    async fn resolve(form: &mut SignupForm) {
        let result = form.next_result().await.expect("probe answer");
        form.apply(result);
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_values_become_available() {
        let mut form = form();

        form.email_input("newbob@example.com");
        form.username_input("newbob");
        form.password_input("longenough123");

        assert!(matches!(form.email_state(), FieldState::Pending { .. }));
        // probes unresolved: fail-closed
        assert!(!form.submit_enabled());

        resolve(&mut form).await;
        resolve(&mut form).await;

        assert!(matches!(form.email_state(), FieldState::Available { .. }));
        assert!(matches!(form.username_state(), FieldState::Available { .. }));
        assert!(form.submit_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn seeded_values_come_back_taken() {
        let mut form = form();

        form.email_input("bob@example.com");
        form.username_input("sally");
        form.password_input("longenough123");

        resolve(&mut form).await;
        resolve(&mut form).await;

        assert_eq!(
            *form.email_state(),
            FieldState::Taken {
                value: "bob@example.com".to_owned()
            }
        );
        assert_eq!(
            *form.username_state(),
            FieldState::Taken {
                value: "sally".to_owned()
            }
        );
        assert!(!form.submit_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn shape_failures_never_probe() {
        let mut form = form();

        form.email_input("bad-email");
        form.username_input("ab");
        form.password_input("short");

        assert_eq!(*form.email_state(), FieldState::Invalid);
        assert_eq!(*form.username_state(), FieldState::Invalid);
        assert_eq!(form.password_state(), PasswordState::Invalid);
        assert!(!form.submit_enabled());

        // a full window of quiet produces no answer
        time::advance(Duration::from_millis(600)).await;
        form.pump();
        assert_eq!(*form.email_state(), FieldState::Invalid);
    }

    #[tokio::test(start_paused = true)]
    async fn retyping_before_the_window_probes_once_with_the_last_value() {
        let mut form = form();

        form.email_input("a@example.com");
        time::advance(Duration::from_millis(100)).await;
        form.email_input("b@example.com");
        time::advance(Duration::from_millis(100)).await;
        form.email_input("c@example.com");

        let result = form.next_result().await.expect("probe answer");
        assert_eq!(result.value, "c@example.com");
        form.apply(result);
        assert_eq!(
            *form.email_state(),
            FieldState::Available {
                value: "c@example.com".to_owned()
            }
        );

        // nothing else was probed
        form.pump();
        assert_eq!(
            *form.email_state(),
            FieldState::Available {
                value: "c@example.com".to_owned()
            }
        );
    }

    /// Directory that takes a while to answer, long enough for the user to
    /// keep typing while a probe is in flight.
    #[derive(Debug)]
    struct SlowDirectory {
        inner: InMemoryDirectory,
        latency: Duration,
    }

    #[async_trait]
    impl UserDirectory for SlowDirectory {
        async fn find_by_email(&self, email: &str) -> Option<User> {
            time::sleep(self.latency).await;
            self.inner.find_by_email(email).await
        }

        async fn find_by_username(&self, username: &str) -> Option<User> {
            time::sleep(self.latency).await;
            self.inner.find_by_username(username).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stale_answers_for_replaced_input_are_discarded() {
        let directory = Arc::new(SlowDirectory {
            inner: InMemoryDirectory::seeded(),
            latency: Duration::from_millis(300),
        });
        let mut form = SignupForm::new(directory, SignupForm::DEBOUNCE_WINDOW);

        // bob@example.com is taken; its probe dispatches at t=500 and will
        // not answer before t=800.
        form.email_input("bob@example.com");
        time::advance(Duration::from_millis(500)).await;

        // The user replaces the value while that probe is in flight. The
        // in-flight probe cannot be cancelled.
        form.email_input("newbob@example.com");

        // First answer to arrive is for the old value; it must not clobber
        // the newer pending input.
        let stale = form.next_result().await.expect("stale answer");
        assert_eq!(stale.value, "bob@example.com");
        assert!(stale.taken);
        form.apply(stale);
        assert_eq!(
            *form.email_state(),
            FieldState::Pending {
                value: "newbob@example.com".to_owned()
            }
        );

        // The answer for the current value lands normally.
        resolve(&mut form).await;
        assert_eq!(
            *form.email_state(),
            FieldState::Available {
                value: "newbob@example.com".to_owned()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn breaking_the_value_after_a_probe_leaves_the_field_invalid() {
        let mut form = form();

        form.email_input("newbob@example.com");
        time::advance(Duration::from_millis(500)).await;

        // Shape-invalid input does not cancel the dispatched probe, but the
        // answer no longer has a pending value to land on.
        form.email_input("newbob@");

        let orphaned = form.next_result().await.expect("orphaned answer");
        assert_eq!(orphaned.value, "newbob@example.com");
        form.apply(orphaned);
        assert_eq!(*form.email_state(), FieldState::Invalid);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_is_enabled_on_exactly_one_state_combination() {
        let value = || "x".to_owned();
        let field_states = [
            FieldState::Untouched,
            FieldState::Invalid,
            FieldState::Pending { value: value() },
            FieldState::Available { value: value() },
            FieldState::Taken { value: value() },
        ];
        let password_states = [
            PasswordState::Untouched,
            PasswordState::Invalid,
            PasswordState::Valid,
        ];

        for email in &field_states {
            for username in &field_states {
                for password in password_states {
                    let mut form = form();
                    form.email = email.clone();
                    form.username = username.clone();
                    form.password = password;

                    let expected = matches!(email, FieldState::Available { .. })
                        && matches!(username, FieldState::Available { .. })
                        && password == PasswordState::Valid;
                    assert_eq!(
                        form.submit_enabled(),
                        expected,
                        "email={email:?} username={username:?} password={password:?}"
                    );
                }
            }
        }
    }
}
