use std::sync::{Arc, Mutex};
use std::time::Duration;

use secrecy::Secret;
use tokio::task::JoinHandle;

use crate::digest::KeyedDigest;
use crate::domain::{ChangePasswordForm, FormField, SubmissionOutcome};
use crate::errors::Error;
use crate::identity_client::IdentityClient;
use crate::session_store::SessionProvider;
use crate::Result;

/// Quiet period before the new/confirm pair is compared.
pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Window after which busy flag and outcome are cleared, whether or not the
/// update call has resolved. Known loose timeout: it can re-enable the
/// submit affordance while a slow request is still outstanding.
pub const BUSY_FAILSAFE_WINDOW: Duration = Duration::from_secs(5);

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Default)]
struct WorkflowState {
    form: ChangePasswordForm,
    validation_error: Option<String>,
    busy: bool,
    outcome: SubmissionOutcome,
}

/// Orchestrates password-change input, client-side validation, and the
/// single remote update call. All collaborators are injected: the identity
/// client, the session source, and the keyed digest.
pub struct PasswordChangeWorkflow {
    state: Arc<Mutex<WorkflowState>>,
    client: Arc<IdentityClient>,
    sessions: Arc<dyn SessionProvider>,
    digest: Arc<dyn KeyedDigest>,
    debounce: Mutex<Option<JoinHandle<()>>>,
    failsafe: Mutex<Option<JoinHandle<()>>>,
}

impl PasswordChangeWorkflow {
    pub fn new(
        client: IdentityClient,
        sessions: impl SessionProvider + 'static,
        digest: impl KeyedDigest + 'static,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(WorkflowState::default())),
            client: Arc::new(client),
            sessions: Arc::new(sessions),
            digest: Arc::new(digest),
            debounce: Mutex::new(None),
            failsafe: Mutex::new(None),
        }
    }

    /// Records a keystroke. Editing either new-password field restarts the
    /// debounce timer; the match check runs only once input has settled.
    pub fn update_field(&self, field: FormField, value: String) {
        self.state.lock().unwrap().form.set(field, value);
        if matches!(field, FormField::NewPassword | FormField::NewPasswordCheck) {
            self.restart_debounce();
        }
    }

    fn restart_debounce(&self) {
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_QUIET_PERIOD).await;
            let mut state = state.lock().unwrap();
            match state.form.new_passwords_match() {
                Some(false) => state.validation_error = Some(PASSWORD_MISMATCH.to_string()),
                Some(true) => state.validation_error = None,
                // One of the pair is still empty; nothing to report yet.
                None => {}
            }
        });
        if let Some(previous) = self.debounce.lock().unwrap().replace(task) {
            previous.abort();
        }
    }

    pub fn can_submit(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.form.is_complete() && state.validation_error.is_none() && !state.busy
    }

    pub fn busy(&self) -> bool {
        self.state.lock().unwrap().busy
    }

    pub fn outcome(&self) -> SubmissionOutcome {
        self.state.lock().unwrap().outcome.clone()
    }

    pub fn validation_error(&self) -> Option<String> {
        self.state.lock().unwrap().validation_error.clone()
    }

    /// Issues the password update. Fails fast on an incomplete or invalid
    /// form and on a missing session; otherwise digests both passwords and
    /// sends the one outbound request.
    pub async fn submit(&self) -> Result<()> {
        let (current_password, new_password) = {
            let mut state = self.state.lock().unwrap();
            if state.busy {
                return Err(Error::Validation(
                    "A password change is already in progress".to_string(),
                ));
            }
            if !state.form.is_complete() {
                return Err(Error::Validation("All fields are required".to_string()));
            }
            if let Some(message) = &state.validation_error {
                return Err(Error::Validation(message.clone()));
            }
            state.busy = true;
            (
                clone_secret(state.form.current_password.as_ref()),
                clone_secret(state.form.new_password.as_ref()),
            )
        };
        self.restart_failsafe();

        let session = match self.sessions.session() {
            Ok(session) => session,
            Err(e) => return self.fail(e),
        };

        let hashed_current = self.digest.digest(&session.display_name, &current_password);
        let hashed_new = self.digest.digest(&session.display_name, &new_password);

        match self
            .client
            .update_password(&session, &hashed_current, &hashed_new)
            .await
        {
            Ok(()) => {
                tracing::info!(user_id = %session.user_id, "Password updated");
                let mut state = self.state.lock().unwrap();
                state.busy = false;
                state.outcome = SubmissionOutcome::Success;
                state.form.reset();
                drop(state);
                // Let the success indicator clear itself after the window.
                self.restart_failsafe();
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, e: Error) -> Result<()> {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Password update failed"
        );
        {
            let mut state = self.state.lock().unwrap();
            state.busy = false;
            state.outcome = SubmissionOutcome::Failure(e.user_message());
        }
        self.restart_failsafe();
        Err(e)
    }

    /// (Re)arms the timer that clears busy flag and outcome after the fixed
    /// window, independent of the request lifecycle.
    fn restart_failsafe(&self) {
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            tokio::time::sleep(BUSY_FAILSAFE_WINDOW).await;
            let mut state = state.lock().unwrap();
            state.busy = false;
            state.outcome = SubmissionOutcome::Idle;
        });
        if let Some(previous) = self.failsafe.lock().unwrap().replace(task) {
            previous.abort();
        }
    }
}

impl Drop for PasswordChangeWorkflow {
    // No timer may touch the state after the component is torn down.
    fn drop(&mut self) {
        if let Some(task) = self.debounce.lock().unwrap().take() {
            task.abort();
        }
        if let Some(task) = self.failsafe.lock().unwrap().take() {
            task.abort();
        }
    }
}

fn clone_secret(secret: Option<&Secret<String>>) -> Secret<String> {
    // Callers check `is_complete` first; an empty secret only shows up if
    // that check was skipped, and the service rejects it anyway.
    secret.cloned().unwrap_or_else(|| Secret::new(String::new()))
}
