//! Request payload for creating a student, and the rules it must satisfy.
//!
//! Every field of [`CreateStudentPayload`] is optional at the serde level so
//! that a missing field is reported the same way as any other broken rule: a
//! [`FieldError`] naming the dotted camelCase path. [`validate_student`] is the
//! only way to obtain a [`NewStudent`], so nothing unvalidated reaches a store.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{
    Validate, ValidateEmail, ValidationError, ValidationErrors, ValidationErrorsKind,
};
use varsity_core::FieldError;

use crate::ids::{AcademicDepartmentId, AcademicSemesterId, UserId};
use crate::students::{Guardian, LocalGuardian, NewStudent, StudentProfile, UserName};
use crate::value_types::{AccountStatus, BloodGroup, Gender};

pub const FIRST_NAME_MAX_LEN: usize = 20;
pub const PASSWORD_MAX_LEN: usize = 20;
// `validator`'s `length` rule takes a `u64` bound.
const FIRST_NAME_MAX_LEN_U64: u64 = FIRST_NAME_MAX_LEN as u64;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserNamePayload {
    #[validate(
        required(message = "First name is required"),
        length(
            max = FIRST_NAME_MAX_LEN_U64,
            message = "First name can not be more than 20 characters"
        ),
        custom(function = "validate_capitalized")
    )]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Middle name is not allowed to be empty"))]
    pub middle_name: Option<String>,
    #[validate(
        required(message = "Last name is required"),
        custom(function = "validate_alphabetic")
    )]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuardianPayload {
    #[validate(
        required(message = "Father name is required"),
        length(min = 1, message = "Father name is not allowed to be empty")
    )]
    pub father_name: Option<String>,
    #[validate(
        required(message = "Father occupation is required"),
        length(min = 1, message = "Father occupation is not allowed to be empty")
    )]
    pub father_occupation: Option<String>,
    #[validate(
        required(message = "Father contact number is required"),
        length(min = 1, message = "Father contact number is not allowed to be empty")
    )]
    pub father_contact_no: Option<String>,
    #[validate(
        required(message = "Mother name is required"),
        length(min = 1, message = "Mother name is not allowed to be empty")
    )]
    pub mother_name: Option<String>,
    #[validate(
        required(message = "Mother occupation is required"),
        length(min = 1, message = "Mother occupation is not allowed to be empty")
    )]
    pub mother_occupation: Option<String>,
    #[validate(
        required(message = "Mother contact number is required"),
        length(min = 1, message = "Mother contact number is not allowed to be empty")
    )]
    pub mother_contact_no: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalGuardianPayload {
    #[validate(
        required(message = "Local guardian name is required"),
        length(min = 1, message = "Local guardian name is not allowed to be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Local guardian occupation is required"),
        length(min = 1, message = "Local guardian occupation is not allowed to be empty")
    )]
    pub occupation: Option<String>,
    #[validate(
        required(message = "Local guardian contact number is required"),
        length(min = 1, message = "Local guardian contact number is not allowed to be empty")
    )]
    pub contact_no: Option<String>,
    #[validate(
        required(message = "Local guardian address is required"),
        length(min = 1, message = "Local guardian address is not allowed to be empty")
    )]
    pub address: Option<String>,
}

/// Body of `POST /students`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentPayload {
    #[validate(
        required(message = "Student id is required"),
        length(min = 1, message = "Student id is not allowed to be empty")
    )]
    pub id: Option<String>,
    #[validate(
        required(message = "Password is required"),
        custom(function = "validate_password")
    )]
    pub password: Option<String>,
    pub user: Option<UserId>,
    #[validate(required(message = "Name is required"), nested)]
    pub name: Option<UserNamePayload>,
    #[validate(
        required(message = "Gender is required"),
        custom(function = "validate_gender")
    )]
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "Date of birth is not allowed to be empty"))]
    pub date_of_birth: Option<String>,
    #[validate(
        required(message = "Email is required"),
        custom(function = "validate_email_address")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Contact number is required"),
        length(min = 1, message = "Contact number is not allowed to be empty")
    )]
    pub contact_no: Option<String>,
    #[validate(
        required(message = "Emergency contact number is required"),
        length(min = 1, message = "Emergency contact number is not allowed to be empty")
    )]
    pub emergency_contact_no: Option<String>,
    #[validate(custom(function = "validate_blood_group"))]
    pub blood_group: Option<String>,
    #[validate(
        required(message = "Present address is required"),
        length(min = 1, message = "Present address is not allowed to be empty")
    )]
    pub present_address: Option<String>,
    #[validate(
        required(message = "Permanent address is required"),
        length(min = 1, message = "Permanent address is not allowed to be empty")
    )]
    pub permanent_address: Option<String>,
    #[validate(required(message = "Guardian is required"), nested)]
    pub guardian: Option<GuardianPayload>,
    #[validate(required(message = "Local guardian is required"), nested)]
    pub local_guardian: Option<LocalGuardianPayload>,
    #[validate(length(min = 1, message = "Profile image is not allowed to be empty"))]
    pub profile_img: Option<String>,
    pub admission_semester: Option<AcademicSemesterId>,
    pub academic_department: Option<AcademicDepartmentId>,
    #[validate(custom(function = "validate_account_status"))]
    pub is_active: Option<String>,
}

impl CreateStudentPayload {
    /// Applies input conversions that run before the rules: the first name
    /// is trimmed.
    pub fn normalize(&mut self) {
        if let Some(first_name) = self
            .name
            .as_mut()
            .and_then(|name| name.first_name.as_mut())
        {
            let trimmed = first_name.trim();
            if trimmed.len() != first_name.len() {
                *first_name = trimmed.to_string();
            }
        }
    }
}

/// All rule violations found in one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Sorted by path, then message.
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn from_errors(errors: &ValidationErrors) -> Self {
        let mut collected = Vec::new();
        collect_field_errors(errors, "", &mut collected);
        Self::from_field_errors(collected)
    }

    fn from_field_errors(mut errors: Vec<FieldError>) -> Self {
        errors.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.message.cmp(&b.message)));
        Self { errors }
    }

    fn single(path: &str, message: impl Into<String>) -> Self {
        Self::from_field_errors(vec![FieldError::new(path, message)])
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }

    pub fn messages_for(&self, path: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.path == path)
            .map(|e| e.message.as_str())
            .collect()
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Checks `payload` against every student rule.
///
/// Returns the validated student, or every violated rule at once.
pub fn validate_student(mut payload: CreateStudentPayload) -> Result<NewStudent, ValidationFailure> {
    payload.normalize();
    payload
        .validate()
        .map_err(|errors| ValidationFailure::from_errors(&errors))?;

    let name = required(payload.name, "name")?;
    let guardian = required(payload.guardian, "guardian")?;
    let local_guardian = required(payload.local_guardian, "localGuardian")?;

    let profile = StudentProfile {
        id: required(payload.id, "id")?,
        user: payload.user,
        name: UserName {
            first_name: required(name.first_name, "name.firstName")?,
            middle_name: name.middle_name,
            last_name: required(name.last_name, "name.lastName")?,
        },
        gender: parse(payload.gender, "gender")?,
        date_of_birth: payload.date_of_birth,
        email: required(payload.email, "email")?,
        contact_no: required(payload.contact_no, "contactNo")?,
        emergency_contact_no: required(payload.emergency_contact_no, "emergencyContactNo")?,
        blood_group: payload
            .blood_group
            .map(|raw| parse::<BloodGroup>(Some(raw), "bloodGroup"))
            .transpose()?,
        present_address: required(payload.present_address, "presentAddress")?,
        permanent_address: required(payload.permanent_address, "permanentAddress")?,
        guardian: Guardian {
            father_name: required(guardian.father_name, "guardian.fatherName")?,
            father_occupation: required(guardian.father_occupation, "guardian.fatherOccupation")?,
            father_contact_no: required(guardian.father_contact_no, "guardian.fatherContactNo")?,
            mother_name: required(guardian.mother_name, "guardian.motherName")?,
            mother_occupation: required(guardian.mother_occupation, "guardian.motherOccupation")?,
            mother_contact_no: required(guardian.mother_contact_no, "guardian.motherContactNo")?,
        },
        local_guardian: LocalGuardian {
            name: required(local_guardian.name, "localGuardian.name")?,
            occupation: required(local_guardian.occupation, "localGuardian.occupation")?,
            contact_no: required(local_guardian.contact_no, "localGuardian.contactNo")?,
            address: required(local_guardian.address, "localGuardian.address")?,
        },
        profile_img: payload.profile_img,
        admission_semester: payload.admission_semester,
        academic_department: payload.academic_department,
        is_active: payload
            .is_active
            .map(|raw| parse::<AccountStatus>(Some(raw), "isActive"))
            .transpose()?
            .unwrap_or_default(),
    };

    Ok(NewStudent {
        password: required(payload.password, "password")?,
        profile,
    })
}

fn required<T>(value: Option<T>, path: &str) -> Result<T, ValidationFailure> {
    value.ok_or_else(|| ValidationFailure::single(path, format!("{} is required", path)))
}

fn parse<T>(value: Option<String>, path: &str) -> Result<T, ValidationFailure>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    required(value, path)?
        .parse::<T>()
        .map_err(|err| ValidationFailure::single(path, err.to_string()))
}

fn collect_field_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &to_camel_case(field));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", path));
                    FieldError::new(path.clone(), message)
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// `^[A-Z][a-z]*$`
fn validate_capitalized(value: &str) -> Result<(), ValidationError> {
    let mut chars = value.chars();
    let capitalized = chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_lowercase());

    if capitalized {
        Ok(())
    } else {
        Err(invalid(
            "capitalize",
            "First name should be in capitalize format".to_string(),
        ))
    }
}

fn validate_alphabetic(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(invalid(
            "alphabet",
            format!("'{}' is not valid, last name should contain only alphabetic characters", value),
        ))
    }
}

/// RFC-style address whose domain also carries a top-level label, so
/// `user@localhost` is rejected.
fn validate_email_address(value: &str) -> Result<(), ValidationError> {
    let has_tld = value
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());

    if value.validate_email() && has_tld {
        Ok(())
    } else {
        Err(invalid(
            "email",
            "Email is not a valid email address".to_string(),
        ))
    }
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid(
            "length",
            "Password is not allowed to be empty".to_string(),
        ));
    }
    if value.chars().count() > PASSWORD_MAX_LEN {
        return Err(invalid(
            "length",
            format!("Password can not be more than {} characters", PASSWORD_MAX_LEN),
        ));
    }
    Ok(())
}

fn validate_gender(value: &str) -> Result<(), ValidationError> {
    value.parse::<Gender>().map(|_| ()).map_err(|_| {
        invalid(
            "enum",
            format!(
                "'{}' is not valid. The gender field can only be one of the following: {}",
                value,
                Gender::allowed_values()
            ),
        )
    })
}

fn validate_blood_group(value: &str) -> Result<(), ValidationError> {
    value.parse::<BloodGroup>().map(|_| ()).map_err(|_| {
        invalid(
            "enum",
            format!(
                "'{}' is not a valid blood group, expected one of {}",
                value,
                BloodGroup::allowed_values()
            ),
        )
    })
}

fn validate_account_status(value: &str) -> Result<(), ValidationError> {
    value.parse::<AccountStatus>().map(|_| ()).map_err(|_| {
        invalid(
            "enum",
            format!(
                "'{}' is not a valid status, expected one of {}",
                value,
                AccountStatus::allowed_values()
            ),
        )
    })
}
