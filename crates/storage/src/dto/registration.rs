use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::models::CompetitionRegistration;

pub const MIN_TEAM_SIZE: usize = 2;
pub const MAX_TEAM_SIZE: usize = 6;

/// Body of `POST /api/competitions/{id}/register`. The two top-level fields
/// are optional so the request-shape guard in the service can answer with
/// the contract message instead of a deserializer rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub competition_title: Option<String>,
    pub registration_data: Option<RegistrationData>,
    pub metadata: Option<RegistrationMetadata>,
}

/// The team submission itself. Missing fields decode to their empty values
/// and are reported by validation, collected rather than short-circuited.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    #[serde(default)]
    #[validate(custom(function = "validate_required_text", message = "Team name is required"))]
    #[validate(length(max = 255, message = "Team name must be at most 255 characters"))]
    pub team_name: String,

    #[serde(default)]
    #[validate(custom(
        function = "validate_required_text",
        message = "Team leader name is required"
    ))]
    #[validate(length(max = 255, message = "Team leader name must be at most 255 characters"))]
    pub team_leader_name: String,

    #[serde(default)]
    #[validate(custom(
        function = "validate_email_shape",
        message = "A valid email address is required"
    ))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(
        function = "validate_mobile_number",
        message = "Mobile number must contain exactly 10 digits"
    ))]
    pub mobile: String,

    /// Ordered list; member 0 mirrors the leader. Entries without a name are
    /// placeholders and do not count toward the team.
    #[serde(default)]
    #[validate(custom(function = "validate_team_size"))]
    pub team_members: Vec<TeamMember>,

    #[serde(default)]
    #[validate(custom(function = "validate_required_text", message = "College name is required"))]
    #[validate(length(max = 255, message = "College name must be at most 255 characters"))]
    pub college_name: String,

    #[serde(default)]
    #[validate(custom(
        function = "validate_terms_accepted",
        message = "You must accept the terms and conditions"
    ))]
    pub accept_terms: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default)]
    #[validate(custom(function = "validate_required_text", message = "Member name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(
        function = "validate_email_shape",
        message = "A valid member email address is required"
    ))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(
        function = "validate_mobile_number",
        message = "Member mobile number must contain exactly 10 digits"
    ))]
    pub mobile: String,
}

impl TeamMember {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            mobile: String::new(),
        }
    }

    /// An entry counts toward the team once a name has been entered.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            mobile: normalize_mobile(&self.mobile),
        }
    }
}

/// Submission context recorded alongside a registration. Every field may be
/// supplied by the caller; the service fills in whatever is missing from the
/// request it actually saw.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationMetadata {
    pub registration_timestamp: Option<DateTime<Utc>>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl RegistrationData {
    /// Canonical storage form: trimmed fields, lowercased email, digit-only
    /// mobiles, placeholder members dropped.
    pub fn normalized(&self) -> Self {
        Self {
            team_name: self.team_name.trim().to_string(),
            team_leader_name: self.team_leader_name.trim().to_string(),
            email: normalize_email(&self.email),
            mobile: normalize_mobile(&self.mobile),
            team_members: self
                .team_members
                .iter()
                .filter(|member| member.has_name())
                .map(TeamMember::normalized)
                .collect(),
            college_name: self.college_name.trim().to_string(),
            accept_terms: self.accept_terms,
        }
    }

    pub fn named_member_count(&self) -> usize {
        self.team_members
            .iter()
            .filter(|member| member.has_name())
            .count()
    }
}

/// Validate a submission, collecting every failure instead of stopping at
/// the first. Named members are validated individually and reported under
/// their list index; placeholders are skipped. A team-size violation and
/// per-member details share the `team_members` key, so the size error is
/// reported alone and the details surface once membership is fixed.
pub fn validate_registration(data: &RegistrationData) -> Result<(), ValidationErrors> {
    let parent = data.validate();

    let size_error = parent
        .as_ref()
        .err()
        .is_some_and(|errors| errors.errors().contains_key("team_members"));
    if size_error {
        return parent;
    }

    let member_results = data
        .team_members
        .iter()
        .map(|member| {
            if member.has_name() {
                member.validate()
            } else {
                Ok(())
            }
        })
        .collect();

    ValidationErrors::merge_all(parent, "team_members", member_results)
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn normalize_mobile(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Flatten a validation tree into `field: message` lines, member errors
/// indexed, field paths camelCased to match their JSON names. Ordering is
/// deterministic (sorted by path).
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    error_map(errors)
        .into_iter()
        .map(|(path, message)| format!("{path}: {message}"))
        .collect()
}

/// Same flattening as [`error_messages`], as a path → message map.
pub fn error_map(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    collect_errors(errors, "", &mut map);
    map
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            camel_case(field)
        } else {
            format!("{prefix}.{}", camel_case(field))
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(error) = field_errors.first() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.insert(path, message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut parts = field.split('_');
    let mut result = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.extend(chars);
        }
    }
    result
}

// Validation helpers
fn validate_required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn validate_email_shape(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let domain_has_tld = trimmed
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));

    if trimmed.validate_email() && domain_has_tld {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

fn validate_mobile_number(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digits == 10 {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_mobile"))
    }
}

fn validate_terms_accepted(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(ValidationError::new("terms_not_accepted"))
    }
}

fn validate_team_size(members: &[TeamMember]) -> Result<(), ValidationError> {
    if members.len() > MAX_TEAM_SIZE {
        let mut error = ValidationError::new("team_too_large");
        error.message = Some(format!("A maximum of {MAX_TEAM_SIZE} team members is allowed").into());
        return Err(error);
    }

    let named = members.iter().filter(|m| m.has_name()).count();
    if named < MIN_TEAM_SIZE {
        let mut error = ValidationError::new("team_too_small");
        error.message = Some(format!("At least {MIN_TEAM_SIZE} team members are required").into());
        return Err(error);
    }

    Ok(())
}

/// Payload returned to a team after a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationConfirmation {
    pub registration_id: Uuid,
    pub competition_id: i32,
    pub competition_title: String,
    pub team_name: String,
    pub team_leader_name: String,
    pub email: String,
    pub registration_timestamp: DateTime<Utc>,
}

impl From<&CompetitionRegistration> for RegistrationConfirmation {
    fn from(row: &CompetitionRegistration) -> Self {
        Self {
            registration_id: row.registration_id,
            competition_id: row.competition_id,
            competition_title: row.competition_title.clone(),
            team_name: row.team_name.clone(),
            team_leader_name: row.team_leader_name.clone(),
            email: row.email.clone(),
            registration_timestamp: row.registered_at,
        }
    }
}

/// One row of the admin registrations listing, back in its nested wire
/// shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub registration_id: Uuid,
    pub competition_id: i32,
    pub competition_title: String,
    pub registration_data: RegistrationData,
    pub metadata: RegistrationMetadata,
}

impl From<CompetitionRegistration> for RegistrationResponse {
    fn from(row: CompetitionRegistration) -> Self {
        Self {
            registration_id: row.registration_id,
            competition_id: row.competition_id,
            competition_title: row.competition_title,
            registration_data: RegistrationData {
                team_name: row.team_name,
                team_leader_name: row.team_leader_name,
                email: row.email,
                mobile: row.mobile,
                team_members: row.team_members.0,
                college_name: row.college_name,
                accept_terms: row.accept_terms,
            },
            metadata: RegistrationMetadata {
                registration_timestamp: Some(row.registered_at),
                user_agent: row.user_agent,
                ip_address: row.ip_address,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_registrations: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl RegistrationPagination {
    pub fn new(page: u32, limit: u32, total_registrations: i64) -> Self {
        let total_pages = ((total_registrations as f64) / (limit as f64)).ceil() as u32;
        Self {
            current_page: page,
            total_pages,
            total_registrations,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// Listing envelope with its pagination block, per the registrations
/// listing contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationListResponse {
    pub success: bool,
    pub data: Vec<RegistrationResponse>,
    pub pagination: RegistrationPagination,
}

/// Sort orders accepted by the registrations listing. Unrecognized values
/// fall back to newest-first instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationSort {
    NewestFirst,
    OldestFirst,
    TeamName,
}

impl RegistrationSort {
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => Self::OldestFirst,
            Some("teamName") | Some("team_name") => Self::TeamName,
            _ => Self::NewestFirst,
        }
    }

    pub fn order_clause(self) -> &'static str {
        match self {
            Self::NewestFirst => "registered_at DESC",
            Self::OldestFirst => "registered_at ASC",
            Self::TeamName => "team_name ASC, registered_at DESC",
        }
    }
}
