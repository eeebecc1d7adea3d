use crate::infra::{load_store, parse_instant_arg, parse_status_arg};
use chrono::{Duration, Local, NaiveDateTime};
use clap::{Args, ValueEnum};
use scholar_track::error::AppError;
use scholar_track::tracker::csv_io;
use scholar_track::tracker::{
    completion_ratio, ApplicationStatus, DashboardSummary, FundingType, RecordFilter,
    ScholarshipDraft, ScholarshipPatchRequest, ScholarshipRecord, ScholarshipService,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// CSV export holding the tracked applications
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Evaluation instant (YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_instant_arg)]
    pub(crate) now: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// CSV export holding the tracked applications
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Case-insensitive match on university or country
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact status label, e.g. "In Progress"
    #[arg(long, value_parser = parse_status_arg)]
    pub(crate) status: Option<ApplicationStatus>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation instant for the sample dashboard. Defaults to now.
    #[arg(long, value_parser = parse_instant_arg)]
    pub(crate) now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Csv,
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs { csv, now } = args;
    let now = now.unwrap_or_else(|| Local::now().naive_local());

    let service = ScholarshipService::new(Arc::new(load_store(Some(&csv))?));
    let summary = service.dashboard(now)?;
    print!("{}", render_dashboard(&summary));
    Ok(())
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let ListArgs {
        csv,
        search,
        status,
        format,
    } = args;

    let service = ScholarshipService::new(Arc::new(load_store(Some(&csv))?));
    let records = service.list(&RecordFilter { search, status })?;

    match format {
        OutputFormat::Text => print!("{}", render_records(&records)),
        OutputFormat::Csv => csv_io::export_writer(std::io::stdout().lock(), &records)?,
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(|| Local::now().naive_local());
    let service = ScholarshipService::new(Arc::new(load_store(None)?));

    println!("Scholarship tracker demo");
    let mut created = Vec::new();
    for draft in sample_drafts(now) {
        match service.create(draft) {
            Ok(record) => {
                println!("- Tracked {} ({})", record.scholarship_name, record.country);
                created.push(record);
            }
            Err(err) => println!("  Draft rejected: {}", err),
        }
    }

    if let Some(first) = created.first() {
        let request = ScholarshipPatchRequest {
            status: Some(ApplicationStatus::Applied.label().to_string()),
            apply_started: Some(true),
            ..ScholarshipPatchRequest::default()
        };
        match service.update(first.id, request) {
            Ok(record) => println!(
                "- Marked {} as {} ({:.0}% complete)",
                record.scholarship_name,
                record.status,
                completion_ratio(&record) * 100.0
            ),
            Err(err) => println!("  Update failed: {}", err),
        }
    }

    match service.dashboard(now) {
        Ok(summary) => print!("\n{}", render_dashboard(&summary)),
        Err(err) => println!("  Dashboard unavailable: {}", err),
    }

    Ok(())
}

/// Sample applications with deadlines placed around `now`.
pub(crate) fn sample_drafts(now: NaiveDateTime) -> Vec<ScholarshipDraft> {
    let today = now.date();
    vec![
        ScholarshipDraft {
            required_documents: Some(vec![
                "CV".to_string(),
                "Transcript".to_string(),
                "Research proposal".to_string(),
            ]),
            documents_done: Some(vec!["CV".to_string(), "Transcript".to_string()]),
            deadline: Some(today + Duration::days(5)),
            portal_signup: Some(true),
            ..ScholarshipDraft::new(
                "Gates Cambridge",
                "University of Cambridge",
                "United Kingdom",
                FundingType::Full,
            )
        },
        ScholarshipDraft {
            deadline: Some(today + Duration::days(21)),
            status: Some(ApplicationStatus::Researching.label().to_string()),
            ..ScholarshipDraft::new("DAAD EPOS", "TU Munich", "Germany", FundingType::Partial)
        },
        ScholarshipDraft {
            required_documents: Some(vec!["Statement of purpose".to_string()]),
            deadline: Some(today + Duration::days(40)),
            status: Some(ApplicationStatus::InProgress.label().to_string()),
            professor_email: Some("sato@u-tokyo.ac.jp".to_string()),
            ..ScholarshipDraft::new("MEXT", "University of Tokyo", "Japan", FundingType::Full)
        },
        ScholarshipDraft {
            deadline: Some(today - Duration::days(10)),
            status: Some(ApplicationStatus::Accepted.label().to_string()),
            ..ScholarshipDraft::new(
                "Chevening",
                "University College London",
                "United Kingdom",
                FundingType::External,
            )
        },
        ScholarshipDraft::new(
            "Knight-Hennessy",
            "Stanford University",
            "United States",
            FundingType::SelfFunded,
        ),
    ]
}

pub(crate) fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Dashboard as of {}",
        summary.evaluated_at.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(
        out,
        "- {} tracked | {} accepted | {} applied | {} pending",
        summary.total, summary.accepted_count, summary.applied_count, summary.pending_count
    );

    if !summary.status_breakdown.is_empty() {
        let _ = writeln!(out, "Status breakdown:");
        for entry in &summary.status_breakdown {
            let _ = writeln!(out, "  - {}: {}", entry.status, entry.count);
        }
    }

    if !summary.country_breakdown.is_empty() {
        let _ = writeln!(out, "Top countries:");
        for entry in &summary.country_breakdown {
            let _ = writeln!(out, "  - {}: {}", entry.country, entry.count);
        }
    }

    if summary.upcoming_deadlines.is_empty() {
        let _ = writeln!(out, "Upcoming deadlines: none");
    } else {
        let _ = writeln!(out, "Upcoming deadlines:");
        for deadline in &summary.upcoming_deadlines {
            let _ = writeln!(
                out,
                "  - {} ({}) on {}: {} days left{}",
                deadline.scholarship_name,
                deadline.university_name,
                deadline.deadline_label,
                deadline.days_left,
                if deadline.urgent { " [urgent]" } else { "" }
            );
        }
    }

    if !summary.record_progress.is_empty() {
        let _ = writeln!(out, "Progress:");
        for progress in &summary.record_progress {
            let _ = writeln!(
                out,
                "  - {}: {}%",
                progress.scholarship_name, progress.completion_percent
            );
        }
    }

    out
}

pub(crate) fn render_records(records: &[ScholarshipRecord]) -> String {
    if records.is_empty() {
        return "No scholarships found\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let deadline = record
            .deadline
            .map(|date| date.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| "no deadline".to_string());
        let _ = writeln!(
            out,
            "#{} {} | {} ({}) | {} | {} | {} | {:.0}%",
            record.id,
            record.scholarship_name,
            record.university_name,
            record.country,
            record.funding_type.label(),
            record.status,
            deadline,
            completion_ratio(record) * 100.0
        );
    }
    out
}
