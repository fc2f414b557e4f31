//! A connected session: the executor plus the identities every request needs.

use chrono::NaiveDate;
use rt_core::{Action, Identity, Timesheet, query};

use crate::{ClientError, Response, SessionExecutor, Transport};

/// Resolved client and user for one login.
///
/// Identities are resolved once at connect time and live as long as the
/// session; nothing is shared between sessions.
#[derive(Debug)]
pub struct Replicon<T> {
    executor: SessionExecutor<T>,
    client: Identity,
    user: Identity,
}

impl<T: Transport> Replicon<T> {
    /// Resolves the client and user identities.
    ///
    /// Blank names fail before anything is sent.
    pub fn connect(
        executor: SessionExecutor<T>,
        client_name: &str,
        login: &str,
    ) -> Result<Self, ClientError> {
        if client_name.trim().is_empty() {
            return Err(ClientError::Configuration("client name"));
        }
        if login.trim().is_empty() {
            return Err(ClientError::Configuration("login name"));
        }

        let client = executor.query_for_identity(&query::client_by_name(client_name))?;
        let user = executor.query_for_identity(&query::user_by_login_name(login))?;
        tracing::info!(%client, %user, client_name, login, "connected");

        Ok(Self {
            executor,
            client,
            user,
        })
    }

    pub const fn client(&self) -> &Identity {
        &self.client
    }

    pub const fn user(&self) -> &Identity {
        &self.user
    }

    pub const fn executor(&self) -> &SessionExecutor<T> {
        &self.executor
    }

    pub fn project(&self, code: &str) -> Result<Identity, ClientError> {
        let project = self
            .executor
            .query_for_identity(&query::project_by_code(code))?;
        tracing::debug!(code, %project, "resolved project");
        Ok(project)
    }

    pub fn task(&self, name: &str, project: &Identity) -> Result<Identity, ClientError> {
        let task = self.executor.lookup_task(name, &self.user, project)?;
        tracing::debug!(name, %project, %task, "resolved task");
        Ok(task)
    }

    /// Starts an empty edit of the timesheet covering `date`.
    pub fn timesheet(&self, date: NaiveDate) -> Result<Timesheet, ClientError> {
        let identity = self
            .executor
            .query_for_identity(&query::timesheet_by_user_date(&self.user, date))?;
        tracing::debug!(%date, timesheet = %identity, "resolved timesheet");
        Ok(Timesheet::new(self.client.clone(), identity))
    }

    pub fn submit_action(&self, timesheet: &Identity) -> Action {
        query::submit_timesheet(timesheet)
    }

    pub fn execute(&self, actions: &[Action]) -> Result<Response, ClientError> {
        self.executor.execute(actions)
    }
}
