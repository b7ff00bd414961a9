use chrono::NaiveDate;

use jobdeck_core::view::relative_day;

use crate::dashboard::Dashboard;

/// Renders the dashboard as plain text.
///
/// At most one of {list, error} is shown: after a failed load the error
/// view replaces the list entirely until the next successful load.
pub fn render_dashboard(dashboard: &Dashboard, today: NaiveDate) -> String {
    if dashboard.loading() {
        return String::from("Loading...\n");
    }

    if let Some(err) = dashboard.last_error() {
        return format!(
            "Failed to load jobs. Please try again later.\n  cause: {err}\nRun the command again to retry.\n"
        );
    }

    if dashboard.jobs().is_empty() {
        return String::from("No job applications yet. Add one with `jobdeck add`.\n");
    }

    let counts = dashboard.counters();
    let mut out = format!(
        "Applied {} | Interview {} | Offer {} | Rejected {}\n",
        counts.applied, counts.interview, counts.offer, counts.rejected
    );

    let filtered = dashboard.filtered_jobs();
    if filtered.is_empty() {
        out.push_str("No matching job applications found.\n");
        return out;
    }

    for job in &filtered {
        out.push_str(&format!(
            "{}  {} / {}  [{}]  applied {}",
            job.id,
            job.company,
            job.role,
            job.status,
            relative_day(job.applied_date, today)
        ));
        if !job.link.is_empty() {
            out.push_str(&format!("  {}", job.link));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use url::Url;

    use jobdeck_client::{FixedEndpoint, JobStoreClient, JobStoreError};
    use jobdeck_core::types::{FilterCriteria, JobRecord, JobStatus};

    fn dashboard() -> Dashboard {
        let base = Url::parse("http://127.0.0.1:8080/api/jobs").expect("url");
        Dashboard::new(JobStoreClient::new(
            Arc::new(FixedEndpoint(base)),
            reqwest::Client::builder().build().expect("client"),
        ))
    }

    fn record(id: &str, company: &str, status: JobStatus, applied: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            company: company.to_string(),
            role: "Engineer".to_string(),
            status,
            applied_date: applied.parse().expect("date"),
            link: String::new(),
        }
    }

    fn today() -> NaiveDate {
        "2024-03-10".parse().expect("date")
    }

    #[test]
    fn in_flight_load_shows_loading_state() {
        let mut dashboard = dashboard();
        dashboard.seed_loading(true);
        assert_eq!(render_dashboard(&dashboard, today()), "Loading...\n");
    }

    #[test]
    fn error_view_replaces_list() {
        let mut dashboard = dashboard();
        dashboard.seed_jobs(vec![record("job-1", "Acme", JobStatus::Applied, "2024-03-01")]);
        dashboard.seed_error(JobStoreError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "down".to_string(),
        });

        let out = render_dashboard(&dashboard, today());
        assert!(out.contains("Failed to load jobs"));
        assert!(out.contains("retry"));
        assert!(!out.contains("Acme"));
    }

    #[test]
    fn empty_collection_shows_hint() {
        let out = render_dashboard(&dashboard(), today());
        assert_eq!(out, "No job applications yet. Add one with `jobdeck add`.\n");
    }

    #[test]
    fn empty_filter_result_keeps_counters() {
        let mut dashboard = dashboard();
        dashboard.seed_jobs(vec![record("job-1", "Acme", JobStatus::Applied, "2024-03-01")]);
        dashboard.set_criteria(FilterCriteria {
            status: Some(JobStatus::Rejected),
            ..FilterCriteria::default()
        });

        let out = render_dashboard(&dashboard, today());
        assert!(out.contains("Applied 1 | Interview 0 | Offer 0 | Rejected 0"));
        assert!(out.contains("No matching job applications found."));
    }

    #[test]
    fn rows_follow_derived_order() {
        let mut dashboard = dashboard();
        dashboard.seed_jobs(vec![
            record("job-1", "Acme", JobStatus::Applied, "2024-03-01"),
            record("job-2", "Globex", JobStatus::Offer, "2024-03-09"),
        ]);

        let out = render_dashboard(&dashboard, today());
        let globex = out.find("Globex").expect("globex row");
        let acme = out.find("Acme").expect("acme row");
        assert!(globex < acme, "newest first by default");
        assert!(out.contains("applied yesterday"));
        assert!(out.contains("applied 9 days ago"));
    }
}
