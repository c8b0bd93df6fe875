//! Seed tables for [`InMemoryDataSource`](crate::InMemoryDataSource).

use chrono::NaiveDate;
use juahustle_core::roles::Role;
use juahustle_core::types::Date;

use crate::models::application::{ApplicationStatus, HustlerProfile, JobApplication};
use crate::models::job::{Job, JobStatus};
use crate::models::user::User;

fn date(year: i32, month: u32, day: u32) -> Date {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Three open jobs from three different clients.
pub fn seed_jobs() -> Vec<Job> {
    vec![
        Job {
            id: "1".into(),
            title: "House Cleaning Service Needed".into(),
            description: "Looking for a reliable person to clean a 3-bedroom house. Deep cleaning \
                          required including kitchen, bathrooms, and all living areas."
                .into(),
            category: "Cleaning".into(),
            budget: "KSh 3,000".into(),
            location: "Nairobi, Westlands".into(),
            status: JobStatus::Open,
            client_id: "client1".into(),
            client_name: "Sarah Kimani".into(),
            posted_date: date(2024, 1, 15),
            requirements: strings(&[
                "Experience with deep cleaning",
                "Own cleaning supplies",
                "Available weekends",
            ]),
            applicant_count: 5,
            duration: Some("4-6 hours".into()),
        },
        Job {
            id: "2".into(),
            title: "Plumbing Repair - Kitchen Sink".into(),
            description: "Kitchen sink is blocked and needs professional attention. Urgent job \
                          that needs to be completed today."
                .into(),
            category: "Plumbing".into(),
            budget: "KSh 2,500".into(),
            location: "Nairobi, Kilimani".into(),
            status: JobStatus::Open,
            client_id: "client2".into(),
            client_name: "John Mwangi".into(),
            posted_date: date(2024, 1, 16),
            requirements: strings(&["Licensed plumber", "Own tools", "Available immediately"]),
            applicant_count: 3,
            duration: Some("2-3 hours".into()),
        },
        Job {
            id: "3".into(),
            title: "Math Tutoring for High School Student".into(),
            description: "Need experienced math tutor for Form 3 student. 3 sessions per week \
                          focusing on algebra and geometry."
                .into(),
            category: "Tutoring".into(),
            budget: "KSh 5,000/month".into(),
            location: "Nairobi, Karen".into(),
            status: JobStatus::Open,
            client_id: "client3".into(),
            client_name: "Grace Wanjiku".into(),
            posted_date: date(2024, 1, 14),
            requirements: strings(&[
                "Teaching experience",
                "Math degree preferred",
                "Flexible schedule",
            ]),
            applicant_count: 8,
            duration: Some("Ongoing".into()),
        },
    ]
}

/// One pending application to the cleaning job.
pub fn seed_applications() -> Vec<JobApplication> {
    vec![JobApplication {
        id: "app1".into(),
        job_id: "1".into(),
        hustler_id: "hustler1".into(),
        hustler_name: "Alex Mwangi".into(),
        message: "I have 3 years of experience in house cleaning and can provide my own \
                  supplies. Available this weekend."
            .into(),
        proposed_budget: Some("KSh 3,000".into()),
        status: ApplicationStatus::Pending,
        applied_date: date(2024, 1, 15),
        hustler_profile: Some(HustlerProfile {
            rating: 4.8,
            completed_jobs: 23,
            skills: strings(&["Cleaning", "Organization"]),
            bio: "Professional cleaner with attention to detail".into(),
        }),
    }]
}

/// Directory users shown in the admin console.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "1".into(),
            name: "Sarah Kimani".into(),
            email: "sarah@example.com".into(),
            phone: "+254712345678".into(),
            role: Role::Client,
            created_date: date(2024, 1, 10),
            is_active: true,
        },
        User {
            id: "2".into(),
            name: "Alex Mwangi".into(),
            email: "alex@example.com".into(),
            phone: "+254787654321".into(),
            role: Role::Hustler,
            created_date: date(2024, 1, 12),
            is_active: true,
        },
        User {
            id: "3".into(),
            name: "Grace Wanjiku".into(),
            email: "grace@example.com".into(),
            phone: "+254798765432".into(),
            role: Role::Client,
            created_date: date(2024, 1, 8),
            is_active: true,
        },
    ]
}
