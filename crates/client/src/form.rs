use std::collections::BTreeMap;

use storage::dto::registration::{
    MAX_TEAM_SIZE, MIN_TEAM_SIZE, RegistrationConfirmation, RegistrationData, RegistrationRequest,
    TeamMember, error_map, validate_registration,
};

use crate::api::CompetitionRegistrar;
use crate::error::ClientError;

/// Lifecycle of one registration dialog. `Succeeded` is terminal: the
/// dialog closes and a fresh form is built for any later registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
}

/// Drives the multi-member registration dialog: field edits, the member
/// list, local validation, and the submission round trip.
///
/// Member 0 always mirrors the leader fields; edits flow leader to member,
/// never back.
pub struct RegistrationForm {
    competition_id: i32,
    competition_title: String,
    data: RegistrationData,
    state: SubmissionState,
    field_errors: BTreeMap<String, String>,
    server_message: Option<String>,
    confirmation: Option<RegistrationConfirmation>,
}

impl RegistrationForm {
    pub fn new(competition_id: i32, competition_title: impl Into<String>) -> Self {
        Self {
            competition_id,
            competition_title: competition_title.into(),
            data: RegistrationData {
                team_name: String::new(),
                team_leader_name: String::new(),
                email: String::new(),
                mobile: String::new(),
                team_members: vec![TeamMember::blank(), TeamMember::blank()],
                college_name: String::new(),
                accept_terms: false,
            },
            state: SubmissionState::Idle,
            field_errors: BTreeMap::new(),
            server_message: None,
            confirmation: None,
        }
    }

    pub fn data(&self) -> &RegistrationData {
        &self.data
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    pub fn confirmation(&self) -> Option<&RegistrationConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn set_team_name(&mut self, value: impl Into<String>) {
        self.data.team_name = value.into();
    }

    pub fn set_team_leader_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.data.team_members[0].name = value.clone();
        self.data.team_leader_name = value;
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.data.team_members[0].email = value.clone();
        self.data.email = value;
    }

    pub fn set_mobile(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.data.team_members[0].mobile = value.clone();
        self.data.mobile = value;
    }

    pub fn set_college_name(&mut self, value: impl Into<String>) {
        self.data.college_name = value.into();
    }

    pub fn set_accept_terms(&mut self, accepted: bool) {
        self.data.accept_terms = accepted;
    }

    pub fn set_member_name(&mut self, index: usize, value: impl Into<String>) {
        if let Some(member) = self.data.team_members.get_mut(index) {
            member.name = value.into();
        }
    }

    pub fn set_member_email(&mut self, index: usize, value: impl Into<String>) {
        if let Some(member) = self.data.team_members.get_mut(index) {
            member.email = value.into();
        }
    }

    pub fn set_member_mobile(&mut self, index: usize, value: impl Into<String>) {
        if let Some(member) = self.data.team_members.get_mut(index) {
            member.mobile = value.into();
        }
    }

    pub fn can_add_member(&self) -> bool {
        self.data.team_members.len() < MAX_TEAM_SIZE
    }

    pub fn add_member(&mut self) {
        if self.can_add_member() {
            self.data.team_members.push(TeamMember::blank());
        }
    }

    /// The leader row and the second row are fixed; only later rows can be
    /// removed, and never below the two-member minimum.
    pub fn can_remove_member(&self, index: usize) -> bool {
        index >= 2
            && index < self.data.team_members.len()
            && self.data.team_members.len() > MIN_TEAM_SIZE
    }

    pub fn remove_member(&mut self, index: usize) {
        if self.can_remove_member(index) {
            self.data.team_members.remove(index);
        }
    }

    /// Validates locally, and only on a clean result sends the registration.
    ///
    /// Returns true when the registration has been accepted. On any
    /// rejection the form returns to `Idle` with the entered data intact:
    /// field errors populated for local failures, `server_message` set for
    /// server-side ones.
    pub async fn submit(&mut self, registrar: &dyn CompetitionRegistrar) -> bool {
        if self.state == SubmissionState::Succeeded {
            return true;
        }

        self.field_errors.clear();
        self.server_message = None;

        if let Err(errors) = validate_registration(&self.data) {
            self.field_errors = error_map(&errors);
            return false;
        }

        self.state = SubmissionState::Submitting;

        let request = RegistrationRequest {
            competition_title: Some(self.competition_title.clone()),
            registration_data: Some(self.data.clone()),
            metadata: None,
        };

        match registrar.register(self.competition_id, &request).await {
            Ok(confirmation) => {
                self.confirmation = Some(confirmation);
                self.state = SubmissionState::Succeeded;
                true
            }
            Err(ClientError::ApiError { message, .. }) => {
                self.server_message = Some(message);
                self.state = SubmissionState::Idle;
                false
            }
            Err(error) => {
                self.server_message = Some(error.to_string());
                self.state = SubmissionState::Idle;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use chrono::Utc;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use uuid::Uuid;

    struct StubRegistrar {
        responses: Mutex<VecDeque<Result<RegistrationConfirmation>>>,
        calls: AtomicU32,
        last_request: Mutex<Option<RegistrationRequest>>,
    }

    impl StubRegistrar {
        fn new(responses: Vec<Result<RegistrationConfirmation>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicU32::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CompetitionRegistrar for StubRegistrar {
        async fn register(
            &self,
            _competition_id: i32,
            request: &RegistrationRequest,
        ) -> Result<RegistrationConfirmation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left")
        }
    }

    fn confirmation() -> RegistrationConfirmation {
        RegistrationConfirmation {
            registration_id: Uuid::new_v4(),
            competition_id: 42,
            competition_title: "Art Fest".to_string(),
            team_name: "Rockets".to_string(),
            team_leader_name: "Asha".to_string(),
            email: "asha@x.com".to_string(),
            registration_timestamp: Utc::now(),
        }
    }

    fn conflict() -> ClientError {
        ClientError::ApiError {
            status: 409,
            message: "A registration with this team name already exists for this competition"
                .to_string(),
            errors: Vec::new(),
        }
    }

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new(42, "Art Fest");
        form.set_team_name("Rockets");
        form.set_team_leader_name("Asha");
        form.set_email("asha@x.com");
        form.set_mobile("9999999999");
        form.set_member_name(1, "Ravi");
        form.set_member_email(1, "ravi@x.com");
        form.set_member_mobile(1, "8888888888");
        form.set_college_name("XYZ College");
        form.set_accept_terms(true);
        form
    }

    #[test]
    fn test_leader_edits_rewrite_first_member() {
        let mut form = RegistrationForm::new(1, "Art Fest");

        form.set_team_leader_name("A");
        form.set_member_name(0, "overwritten directly");
        form.set_team_leader_name("Asha");
        form.set_email("asha@x.com");
        form.set_mobile("9999999999");

        let leader = &form.data().team_members[0];
        assert_eq!(leader.name, "Asha");
        assert_eq!(leader.email, "asha@x.com");
        assert_eq!(leader.mobile, "9999999999");
    }

    #[tokio::test]
    async fn test_first_member_mirrors_leader_in_submitted_request() {
        let registrar = StubRegistrar::new(vec![Ok(confirmation())]);
        let mut form = filled_form();
        form.set_team_leader_name("Asha K");
        form.set_email("asha.k@x.com");

        assert!(form.submit(&registrar).await);

        let request = registrar.last_request.lock().unwrap().take().unwrap();
        let data = request.registration_data.unwrap();
        assert_eq!(data.team_members[0].name, data.team_leader_name);
        assert_eq!(data.team_members[0].email, data.email);
        assert_eq!(data.team_members[0].mobile, data.mobile);
    }

    #[test]
    fn test_add_member_stops_at_six() {
        let mut form = RegistrationForm::new(1, "Art Fest");

        for _ in 0..10 {
            form.add_member();
        }

        assert_eq!(form.data().team_members.len(), 6);
        assert!(!form.can_add_member());
    }

    #[test]
    fn test_remove_member_rules() {
        let mut form = RegistrationForm::new(1, "Art Fest");
        form.add_member();

        assert!(!form.can_remove_member(0));
        assert!(!form.can_remove_member(1));
        assert!(form.can_remove_member(2));

        form.remove_member(0);
        assert_eq!(form.data().team_members.len(), 3);

        form.remove_member(2);
        assert_eq!(form.data().team_members.len(), 2);

        // At the minimum size nothing can be removed.
        form.remove_member(2);
        assert_eq!(form.data().team_members.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_blocks_on_local_validation() {
        let registrar = StubRegistrar::new(Vec::new());
        let mut form = RegistrationForm::new(1, "Art Fest");

        assert!(!form.submit(&registrar).await);

        assert_eq!(registrar.calls(), 0);
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(form.field_errors().contains_key("teamName"));
        assert!(form.server_message().is_none());
    }

    #[tokio::test]
    async fn test_successful_submission_is_terminal() {
        let registrar = StubRegistrar::new(vec![Ok(confirmation())]);
        let mut form = filled_form();

        assert!(form.submit(&registrar).await);
        assert_eq!(form.state(), SubmissionState::Succeeded);
        assert_eq!(form.confirmation().unwrap().team_name, "Rockets");

        // A second submit does not fire another network call.
        assert!(form.submit(&registrar).await);
        assert_eq!(registrar.calls(), 1);
    }

    #[tokio::test]
    async fn test_conflict_keeps_entered_data_and_allows_resubmit() {
        let registrar = StubRegistrar::new(vec![Err(conflict()), Ok(confirmation())]);
        let mut form = filled_form();

        assert!(!form.submit(&registrar).await);
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(
            form.server_message(),
            Some("A registration with this team name already exists for this competition")
        );
        assert_eq!(form.data().team_name, "Rockets");
        assert_eq!(form.data().team_members.len(), 2);

        form.set_team_name("Rockets 2");
        assert!(form.submit(&registrar).await);
        assert_eq!(form.state(), SubmissionState::Succeeded);
        assert_eq!(registrar.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_api_failure_surfaces_message() {
        let registrar = StubRegistrar::new(vec![Err(ClientError::UnexpectedResponse(
            "missing data field".to_string(),
        ))]);
        let mut form = filled_form();

        assert!(!form.submit(&registrar).await);
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(
            form.server_message(),
            Some("Unexpected response shape: missing data field")
        );
    }
}
