//! Job browsing.

use std::cmp::Ordering;

use juahustle_core::currency::parse_currency;
use juahustle_db::models::job::{Job, JobFilter, CATEGORY_ALL};

use super::{settle, ViewOutcome, ViewScope};
use crate::state::AppState;

/// Categories offered by the browse filter, `All` first.
pub const CATEGORIES: &[&str] = &[
    CATEGORY_ALL,
    "Cleaning",
    "Plumbing",
    "Tutoring",
    "Moving",
    "Design",
    "Delivery",
    "Tech",
];

/// Sort order of the browse list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobSort {
    /// Most recent posting date first; backend order breaks ties.
    #[default]
    Newest,
    BudgetHigh,
    BudgetLow,
}

/// Sort `jobs` in place. The sort is stable, so equal keys keep backend
/// order.
pub fn sort_jobs(jobs: &mut [Job], sort: JobSort) {
    match sort {
        JobSort::Newest => jobs.sort_by(|a, b| b.posted_date.cmp(&a.posted_date)),
        JobSort::BudgetHigh => jobs.sort_by(|a, b| compare_budget(b, a)),
        JobSort::BudgetLow => jobs.sort_by(compare_budget),
    }
}

fn compare_budget(a: &Job, b: &Job) -> Ordering {
    parse_currency(&a.budget)
        .partial_cmp(&parse_currency(&b.budget))
        .unwrap_or(Ordering::Equal)
}

/// Load the browse list for `filter`, sorted by `sort`.
pub async fn browse(
    state: &AppState,
    scope: &ViewScope,
    filter: JobFilter,
    sort: JobSort,
) -> ViewOutcome<Vec<Job>> {
    let result = state.data_source.fetch_jobs(&filter).await;
    settle(scope, result.map_err(Into::into), "Failed to load jobs", |mut jobs| {
        sort_jobs(&mut jobs, sort);
        tracing::debug!(count = jobs.len(), ?sort, "Browse list loaded");
        ViewOutcome::done(jobs)
    })
}

#[cfg(test)]
mod tests {
    use juahustle_db::seed::seed_jobs;

    use super::*;

    #[test]
    fn newest_first_by_posted_date() {
        let mut jobs = seed_jobs();
        sort_jobs(&mut jobs, JobSort::Newest);
        let ids: Vec<_> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn budget_sorts_use_parsed_amount() {
        let mut jobs = seed_jobs();
        sort_jobs(&mut jobs, JobSort::BudgetHigh);
        assert_eq!(jobs[0].id, "3");

        sort_jobs(&mut jobs, JobSort::BudgetLow);
        assert_eq!(jobs[0].id, "2");
    }

    #[test]
    fn categories_start_with_all() {
        assert_eq!(CATEGORIES[0], CATEGORY_ALL);
    }
}
