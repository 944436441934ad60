//! Student registration data model.
//!
//! A [`StudentSubmission`] carries the raw text fields exactly as they arrived
//! from the form. Converting it into a [`NewStudent`] performs every coercion
//! up front, so persistence only ever sees fully validated values and a bad
//! field can never leave a partially written row behind.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Form field carrying the registrant's name.
pub const NAME_FIELD: &str = "name";
/// Form field carrying the postal address.
pub const ADDRESS_FIELD: &str = "address";
/// Form field carrying the age in whole years.
pub const AGE_FIELD: &str = "age";
/// Form field carrying the highest qualification.
pub const QUALIFICATION_FIELD: &str = "qualification";
/// Form field carrying the qualification percentage.
pub const PERCENTAGE_FIELD: &str = "percentage";
/// Form field carrying the year the qualification was obtained.
pub const YEAR_FIELD: &str = "year";

/// Validation failures raised while coercing a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentValidationError {
    /// A required key was absent from the submission.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },
    /// The name was present but blank.
    #[error("field 'name' must not be empty")]
    EmptyName,
    /// An integer field could not be parsed.
    #[error("field '{field}' must be a whole number, got '{value}'")]
    InvalidInteger { field: &'static str, value: String },
    /// A decimal field could not be parsed or was not finite.
    #[error("field '{field}' must be a decimal number, got '{value}'")]
    InvalidDecimal { field: &'static str, value: String },
}

/// Ordered field name to raw text mapping decoded from a form body.
///
/// Duplicate keys are retained in arrival order; lookups return the first
/// occurrence, matching how HTML forms submit a single value per input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentSubmission {
    fields: Vec<(String, String)>,
}

impl StudentSubmission {
    /// Build a submission from already decoded pairs.
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Decode an `application/x-www-form-urlencoded` body.
    ///
    /// Decoding is lenient: malformed percent escapes are passed through and
    /// a body that is not form-encoded simply yields unexpected keys, which
    /// later surface as missing fields.
    ///
    /// # Examples
    /// ```
    /// use registration::domain::StudentSubmission;
    ///
    /// let submission = StudentSubmission::from_urlencoded(b"name=Asha+Rao&age=21");
    /// assert_eq!(submission.get("name"), Some("Asha Rao"));
    /// assert_eq!(submission.get("year"), None);
    /// ```
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let fields = url::form_urlencoded::parse(body)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { fields }
    }

    /// Return the first value submitted for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }

    /// Return the number of decoded pairs.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Return true when nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn require(&self, field: &'static str) -> Result<&str, StudentValidationError> {
        self.get(field)
            .ok_or(StudentValidationError::MissingField { field })
    }

    fn require_integer(&self, field: &'static str) -> Result<i32, StudentValidationError> {
        let raw = self.require(field)?;
        raw.trim()
            .parse::<i32>()
            .map_err(|_| StudentValidationError::InvalidInteger {
                field,
                value: raw.to_owned(),
            })
    }

    fn require_decimal(&self, field: &'static str) -> Result<f64, StudentValidationError> {
        let raw = self.require(field)?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| StudentValidationError::InvalidDecimal {
                field,
                value: raw.to_owned(),
            })
    }
}

impl<K, V> FromIterator<(K, V)> for StudentSubmission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Fully coerced registration, ready to be inserted.
///
/// ## Invariants
/// - `name` contains at least one non-whitespace character.
/// - `percentage` is finite. Precision is enforced by storage, which rounds to
///   two fractional digits and rejects values beyond five total digits.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    name: String,
    address: String,
    age: i32,
    qualification: String,
    percentage: f64,
    year: i32,
}

impl NewStudent {
    /// Registrant's name as submitted.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Postal address, possibly empty.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Age in whole years.
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Highest qualification.
    pub fn qualification(&self) -> &str {
        self.qualification.as_str()
    }

    /// Qualification percentage.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Year the qualification was obtained.
    pub fn year(&self) -> i32 {
        self.year
    }
}

impl TryFrom<&StudentSubmission> for NewStudent {
    type Error = StudentValidationError;

    /// Coerce every field, stopping at the first failure.
    ///
    /// # Examples
    /// ```
    /// use registration::domain::{NewStudent, StudentSubmission, StudentValidationError};
    ///
    /// let submission: StudentSubmission = [
    ///     ("name", "Asha Rao"),
    ///     ("address", ""),
    ///     ("age", "twenty-one"),
    ///     ("qualification", "B.Sc"),
    ///     ("percentage", "87.5"),
    ///     ("year", "2023"),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let err = NewStudent::try_from(&submission).unwrap_err();
    /// assert!(matches!(err, StudentValidationError::InvalidInteger { field: "age", .. }));
    /// ```
    fn try_from(submission: &StudentSubmission) -> Result<Self, Self::Error> {
        let name = submission.require(NAME_FIELD)?;
        if name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        let address = submission.require(ADDRESS_FIELD)?;
        let age = submission.require_integer(AGE_FIELD)?;
        let qualification = submission.require(QUALIFICATION_FIELD)?;
        let percentage = submission.require_decimal(PERCENTAGE_FIELD)?;
        let year = submission.require_integer(YEAR_FIELD)?;

        Ok(Self {
            name: name.to_owned(),
            address: address.to_owned(),
            age,
            qualification: qualification.to_owned(),
            percentage,
            year,
        })
    }
}

/// Surrogate identifier assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentId(i64);

impl StudentId {
    /// Wrap a storage-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage-assigned attributes of a freshly inserted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredStudent {
    /// Surrogate key.
    pub id: StudentId,
    /// Insertion wall-clock time.
    pub registration_date: DateTime<Utc>,
}
