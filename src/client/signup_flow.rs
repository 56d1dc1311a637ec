use crate::models::SignUpData;
use crate::validation::{validate_sign_up, FieldErrors};

use super::error::ClientError;

const SIGN_UP_FALLBACK_MESSAGE: &str =
    "There was a problem with your sign-up. Please try again.";

/// Submits a validated sign-up to the backend; resolves to the server's
/// success message.
pub trait SignUpApi {
    async fn register(&self, data: &SignUpData) -> Result<String, ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Verify { username: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "/sign-in".to_string(),
            Route::Verify { username } => format!("/verify/{}", username),
        }
    }
}

pub trait Navigator {
    fn replace(&mut self, route: Route);
}

/// Toast-style user feedback.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// The sign-up submission state machine. Validation runs before any
/// network request; the submitting flag is cleared once the request
/// settles regardless of outcome.
pub struct SignUpFlow<A, N, F> {
    api: A,
    navigator: N,
    notifier: F,
    state: SubmitState,
}

impl<A, N, F> SignUpFlow<A, N, F>
where
    A: SignUpApi,
    N: Navigator,
    F: Notifier,
{
    pub fn new(api: A, navigator: N, notifier: F) -> Self {
        SignUpFlow {
            api,
            navigator,
            notifier,
            state: SubmitState::Idle,
        }
    }

    /// Validates and submits the form. Schema failures come back as
    /// per-field errors without touching the network. Navigation on
    /// success targets the username from the submitted payload.
    pub async fn submit(&mut self, data: SignUpData) -> Result<(), FieldErrors> {
        validate_sign_up(&data)?;

        self.state = SubmitState::Submitting;

        self.state = match self.api.register(&data).await {
            Ok(message) => {
                self.notifier.success(&message);
                self.navigator.replace(Route::Verify {
                    username: data.username.clone(),
                });
                SubmitState::Succeeded
            }
            Err(err) => {
                self.notifier.error(err.message_or(SIGN_UP_FALLBACK_MESSAGE));
                SubmitState::Failed
            }
        };

        Ok(())
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Whether the submit control should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedApi {
        response: Mutex<Option<Result<String, ClientError>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedApi {
        fn new(response: Result<String, ClientError>) -> Self {
            ScriptedApi {
                response: Mutex::new(Some(response)),
                calls: Mutex::new(0),
            }
        }

        fn never_called() -> Self {
            ScriptedApi {
                response: Mutex::new(None),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl SignUpApi for &ScriptedApi {
        async fn register(&self, _data: &SignUpData) -> Result<String, ClientError> {
            *self.calls.lock().unwrap() += 1;
            self.response.lock().unwrap().take().expect("unexpected register call")
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Vec<Route>,
    }

    impl Navigator for &mut RecordingNavigator {
        fn replace(&mut self, route: Route) {
            self.routes.push(route);
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        successes: Vec<String>,
        errors: Vec<String>,
    }

    impl Notifier for &mut RecordingNotifier {
        fn success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }

        fn error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn valid_data() -> SignUpData {
        SignUpData {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Sup3rSecret!".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_sign_up_notifies_and_navigates_to_verify() {
        let api = ScriptedApi::new(Ok("User registered".to_string()));
        let mut navigator = RecordingNavigator::default();
        let mut notifier = RecordingNotifier::default();

        let mut flow = SignUpFlow::new(&api, &mut navigator, &mut notifier);
        assert!(!flow.is_submitting());

        flow.submit(valid_data()).await.unwrap();

        assert_eq!(flow.state(), SubmitState::Succeeded);
        assert!(!flow.is_submitting());
        assert_eq!(notifier.successes, vec!["User registered"]);
        assert_eq!(navigator.routes.len(), 1);
        assert_eq!(navigator.routes[0].path(), "/verify/alice");
    }

    #[tokio::test]
    async fn failed_sign_up_shows_server_message_and_does_not_navigate() {
        let api = ScriptedApi::new(Err(ClientError::server(
            409,
            Some("Username already taken".to_string()),
        )));
        let mut navigator = RecordingNavigator::default();
        let mut notifier = RecordingNotifier::default();

        let mut flow = SignUpFlow::new(&api, &mut navigator, &mut notifier);
        flow.submit(valid_data()).await.unwrap();

        assert_eq!(flow.state(), SubmitState::Failed);
        assert!(!flow.is_submitting());
        assert_eq!(notifier.errors, vec!["Username already taken"]);
        assert!(navigator.routes.is_empty());
    }

    #[tokio::test]
    async fn network_failure_uses_the_generic_fallback() {
        let api = ScriptedApi::new(Err(ClientError::network()));
        let mut navigator = RecordingNavigator::default();
        let mut notifier = RecordingNotifier::default();

        let mut flow = SignUpFlow::new(&api, &mut navigator, &mut notifier);
        flow.submit(valid_data()).await.unwrap();

        assert_eq!(
            notifier.errors,
            vec!["There was a problem with your sign-up. Please try again."]
        );
        assert!(navigator.routes.is_empty());
    }

    #[tokio::test]
    async fn validation_failure_blocks_the_network_request() {
        let api = ScriptedApi::never_called();
        let mut navigator = RecordingNavigator::default();
        let mut notifier = RecordingNotifier::default();

        let mut flow = SignUpFlow::new(&api, &mut navigator, &mut notifier);

        let mut data = valid_data();
        data.password = "short".to_string();
        let errors = flow.submit(data).await.unwrap_err();

        assert!(errors.password.is_some());
        assert_eq!(api.call_count(), 0);
        assert_eq!(flow.state(), SubmitState::Idle);
        assert!(!flow.is_submitting());
        assert!(navigator.routes.is_empty());
    }

    #[test]
    fn route_paths_match_the_app_routes() {
        assert_eq!(Route::SignIn.path(), "/sign-in");
        assert_eq!(
            Route::Verify {
                username: "alice".to_string()
            }
            .path(),
            "/verify/alice"
        );
    }
}
