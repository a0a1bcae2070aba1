//! Feature-string assembly
//!
//! Profiles arrive as loosely shaped JSON documents. Each recommender flattens
//! the fields it cares about into one space-joined string; missing or empty
//! fields fall back to a placeholder so every profile yields some text.

use serde_json::Value;

pub const NO_SKILLS: &str = "No skills";
pub const NO_EXPERIENCE: &str = "No experience";
pub const NO_EDUCATION: &str = "No education";
pub const NO_INDUSTRY: &str = "No industry";
pub const NO_EXPERTISE: &str = "No expertise";

/// Text of a scalar value. Strings as-is, numbers and bools printed, null and missing empty.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Whether a field holds something worth reading: not null, not an empty string or collection
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Number(_)) => true,
    }
}

/// The `_id` of a profile as text, `None` when absent or null
pub fn id_text(profile: &Value) -> Option<String> {
    match profile.get("_id") {
        None | Some(Value::Null) => None,
        some => Some(value_text(some)),
    }
}

/// Join a list of scalars with spaces
fn join_list(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| value_text(Some(item)))
            .collect::<Vec<_>>()
            .join(" "),
        other => value_text(other),
    }
}

/// Join one field of every object in a list
fn join_entries(value: Option<&Value>, key: &str) -> String {
    entries(value)
        .map(|entry| value_text(entry.get(key)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn entries(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .map(|items| items.as_slice())
        .unwrap_or(&[])
        .iter()
}

fn list_or(value: Option<&Value>, default: &str) -> String {
    if is_present(value) {
        join_list(value)
    } else {
        default.to_string()
    }
}

fn entries_or(value: Option<&Value>, key: &str, default: &str) -> String {
    if is_present(value) {
        join_entries(value, key)
    } else {
        default.to_string()
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        some => value_text(some),
    }
}

/// `"{skills} {industry} {education}"` for TF-IDF user matching
pub fn user_features(user: &Value) -> String {
    let skills = list_or(user.get("skills"), NO_SKILLS);
    let industry = text_or(user.get("industry"), NO_INDUSTRY);
    let education = entries_or(user.get("education"), "fieldOfStudy", NO_EDUCATION);
    format!("{} {} {}", skills, industry, education)
}

/// `"{skills} {experience} {education} {industry} {expertise}"`.
/// Skills, experience and education live on the populated `userId` document.
pub fn mentor_features(mentor: &Value) -> String {
    let empty = Value::Null;
    let account = mentor.get("userId").filter(|v| v.is_object()).unwrap_or(&empty);

    let skills = list_or(account.get("skills"), NO_SKILLS);
    let experience = entries_or(account.get("experience"), "title", NO_EXPERIENCE);
    let education = entries_or(account.get("education"), "fieldOfStudy", NO_EDUCATION);
    let industry = text_or(mentor.get("industry"), NO_INDUSTRY);
    let expertise = list_or(mentor.get("expertise"), NO_EXPERTISE);
    format!(
        "{} {} {} {} {}",
        skills, experience, education, industry, expertise
    )
}

/// `"{skills} {experience} {education} {industry}"` for the student side of mentor matching
pub fn student_features(student: &Value) -> String {
    let skills = list_or(student.get("skills"), NO_SKILLS);
    let experience = entries_or(student.get("experience"), "title", NO_EXPERIENCE);
    let education = entries_or(student.get("education"), "fieldOfStudy", NO_EDUCATION);
    let industry = text_or(student.get("industry"), NO_INDUSTRY);
    format!("{} {} {} {}", skills, experience, education, industry)
}

pub fn job_features(job: &Value) -> String {
    let fields = [
        value_text(job.get("title")),
        value_text(job.get("description")),
        join_list(job.get("requirements")),
        value_text(job.get("location")),
        value_text(job.get("jobType")),
        value_text(job.get("experienceLevel")),
        value_text(job.get("position")),
    ];
    fields.join(" ")
}

/// One `"{degree} in {fieldOfStudy} from {school}"` clause per education entry
pub fn education_prose(education: Option<&Value>) -> String {
    entries(education)
        .map(|edu| {
            format!(
                "{} in {} from {}",
                value_text(edu.get("degree")),
                value_text(edu.get("fieldOfStudy")),
                value_text(edu.get("school"))
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One `"{title} at {company}: {description}"` clause per experience entry
pub fn experience_prose(experience: Option<&Value>) -> String {
    entries(experience)
        .map(|exp| {
            format!(
                "{} at {}: {}",
                value_text(exp.get("title")),
                value_text(exp.get("company")),
                value_text(exp.get("description"))
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Job-seeker text with education leading, so it dominates the embedding
pub fn seeker_features(user: &Value) -> String {
    let education = education_prose(user.get("education"));
    let skills = list_or(user.get("skills"), "");
    let experience = experience_prose(user.get("experience"));
    let industry = value_text(user.get("industry"));
    let interests = list_or(user.get("interests"), "");
    format!(
        "{} {} {} {} {}",
        education, skills, experience, industry, interests
    )
}
