//! Profile completion scoring.

use models::user_profile;

use super::domain::ProfileCompletion;

/// Score at which a profile reports itself complete.
pub const COMPLETE_THRESHOLD: i32 = 80;

/// Field weights; they sum to 100.
const WEIGHTS: [(&str, i32); 8] = [
    ("fullName", 20),
    ("bio", 15),
    ("location", 10),
    ("profilePicture", 15),
    ("currentPosition", 10),
    ("currentCompany", 10),
    ("skills", 10),
    ("workExperience", 10),
];

/// What a profile owns beyond its own columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedCounts {
    pub skills: u64,
    pub work_experience: u64,
    pub education: u64,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn field_present(profile: &user_profile::Model, counts: &OwnedCounts, field: &str) -> bool {
    match field {
        "fullName" => !profile.full_name.trim().is_empty(),
        "bio" => present(&profile.bio),
        "location" => present(&profile.location),
        "profilePicture" => present(&profile.profile_picture_url),
        "currentPosition" => present(&profile.current_position),
        "currentCompany" => present(&profile.current_company),
        "skills" => counts.skills > 0,
        "workExperience" => counts.work_experience > 0,
        _ => false,
    }
}

pub fn percentage(profile: &user_profile::Model, counts: &OwnedCounts) -> i32 {
    let score: i32 = WEIGHTS
        .iter()
        .filter(|(field, _)| field_present(profile, counts, field))
        .map(|(_, w)| *w)
        .sum();
    score.min(100)
}

/// Unscored fields still show up as missing; education is listed but carries no weight.
pub fn missing_fields(profile: &user_profile::Model, counts: &OwnedCounts) -> Vec<String> {
    let mut missing: Vec<String> = WEIGHTS
        .iter()
        .filter(|(field, _)| !field_present(profile, counts, field))
        .map(|(field, _)| field.to_string())
        .collect();
    if counts.education == 0 {
        missing.push("education".to_string());
    }
    missing
}

pub fn summarize(profile: &user_profile::Model, counts: &OwnedCounts) -> ProfileCompletion {
    let completion_percentage = profile.profile_completion_percentage;
    ProfileCompletion {
        completion_percentage,
        is_complete: completion_percentage >= COMPLETE_THRESHOLD,
        missing_fields: missing_fields(profile, counts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile() -> user_profile::Model {
        let now = Utc::now().into();
        user_profile::Model {
            id: 1,
            email: None,
            full_name: String::new(),
            bio: None,
            location: None,
            profile_picture_url: None,
            header_image: None,
            profile_completion_percentage: 0,
            phone_number: None,
            website: None,
            linkedin_url: None,
            github_url: None,
            profile_public: true,
            contact_info_public: false,
            work_experience_public: true,
            education_public: true,
            skills_public: true,
            current_position: None,
            current_company: None,
            industry: None,
            headline: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_profile_scores_zero_and_misses_everything() {
        let p = profile();
        let counts = OwnedCounts::default();
        assert_eq!(percentage(&p, &counts), 0);
        let missing = missing_fields(&p, &counts);
        assert_eq!(missing.len(), 9);
        assert_eq!(missing.last().map(String::as_str), Some("education"));
    }

    #[test]
    fn whitespace_does_not_count() {
        let mut p = profile();
        p.full_name = "Ada Lovelace".into();
        p.bio = Some("   ".into());
        p.location = Some("London".into());
        assert_eq!(percentage(&p, &OwnedCounts::default()), 30);
    }

    #[test]
    fn full_profile_caps_at_hundred() {
        let mut p = profile();
        p.full_name = "Ada Lovelace".into();
        p.bio = Some("Mathematician".into());
        p.location = Some("London".into());
        p.profile_picture_url = Some("/uploads/p.jpg".into());
        p.current_position = Some("Analyst".into());
        p.current_company = Some("Engine Co".into());
        let counts = OwnedCounts { skills: 2, work_experience: 1, education: 1 };
        assert_eq!(percentage(&p, &counts), 100);
        assert!(missing_fields(&p, &counts).is_empty());

        p.profile_completion_percentage = 80;
        assert!(summarize(&p, &counts).is_complete);
        p.profile_completion_percentage = 79;
        assert!(!summarize(&p, &counts).is_complete);
    }
}
