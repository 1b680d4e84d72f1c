use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::{
                applications::{
                    mutators::ApplicationMutator, selectors::ApplicationSelector,
                    spec::ApplicationEntry,
                },
                jobs::{mutators::JobMutator, selectors::JobSelector, spec::JobEntry},
            },
            assets::{check_upload, release, AttachmentKind, Upload},
            notify::{announce, messages::CareerNotice},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{accept, email_address, validation_errors, AppError, Lenient, Result},
};

const RESUME_FOLDER: &str = "resumes";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JobInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "This field may not be blank."))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub location: String,
    #[serde(default)]
    pub is_active: Lenient,
    #[serde(default)]
    pub application_start_date: Lenient,
    #[serde(default)]
    pub application_end_date: Lenient,
}

/// The typed part of a job payload: whether it is listed and its
/// application window.
#[derive(Debug, Clone, Copy)]
pub struct JobSchedule {
    pub is_active: bool,
    pub application_start_date: NaiveDate,
    pub application_end_date: NaiveDate,
}

impl JobInput {
    fn check(&self) -> Result<JobSchedule> {
        let mut errors = validation_errors(self);
        let is_active = accept(&mut errors, "is_active", self.is_active.boolean(true));
        let start = accept(
            &mut errors,
            "application_start_date",
            self.application_start_date.date(),
        );
        let end = accept(
            &mut errors,
            "application_end_date",
            self.application_end_date.date(),
        );
        let (Some(is_active), Some(start), Some(end)) = (is_active, start, end) else {
            return Err(AppError::Validation(errors));
        };
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        if end < start {
            return Err(AppError::field(
                "application_end_date",
                "End date must not be before the start date.",
            ));
        }
        Ok(JobSchedule {
            is_active,
            application_start_date: start,
            application_end_date: end,
        })
    }
}

/// Text fields of a career application as they arrive in the multipart body.
#[derive(Debug, Default, Clone, Validate)]
pub struct ApplicationForm {
    pub job: Option<String>,
    #[validate(length(min = 1, max = 100, message = "This field may not be blank."))]
    pub full_name: String,
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[validate(length(min = 1, max = 20, message = "This field may not be blank."))]
    pub phone: String,
    pub college: String,
    pub cgpa: String,
    pub year_of_passing: String,
    pub experience: String,
    pub skills: String,
}

fn job_id(raw: Option<&str>) -> Result<i64> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(AppError::rejected("job", "Job selection is required"));
    }
    raw.parse()
        .map_err(|_| AppError::field("job", "A valid integer is required."))
}

fn check_open(job: &JobEntry, today: NaiveDate) -> Result<()> {
    if !job.is_active {
        return Err(AppError::rejected("job", "This job is no longer active"));
    }
    if !job.accepts_applications_on(today) {
        return Err(AppError::rejected(
            "job",
            "Applications for this job are closed",
        ));
    }
    Ok(())
}

/// Stores an application for an open job. The resume, when present, is
/// uploaded only once every check passed and released again if the insert
/// fails.
pub async fn submit(
    state: &AppState,
    form: &ApplicationForm,
    resume: Option<Upload>,
) -> Result<ApplicationEntry> {
    let job_id = job_id(form.job.as_deref())?;
    let job = {
        let mut conn = state.db_pool.acquire().await?;
        JobSelector::new(&mut conn)
            .get_by_id(job_id)
            .await?
            .ok_or(AppError::NotFound("job"))?
    };
    check_open(&job, Utc::now().date_naive())?;
    form.validate()?;
    if let Some(upload) = &resume {
        check_upload(
            upload,
            AttachmentKind::Pdf,
            "resume",
            state.settings.max_upload_bytes,
        )?;
    }

    let stored = match resume {
        Some(upload) => Some(state.assets.upload(RESUME_FOLDER, upload).await?),
        None => None,
    };
    let inserted = async {
        let mut tx = state.db_pool.begin_txn().await?;
        let id = ApplicationMutator::new(&mut tx)
            .create(job.id, form, stored.as_ref())
            .await?;
        let entry = ApplicationSelector::new(&mut tx)
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound("application"))?;
        tx.commit().await?;
        Ok::<_, AppError>(entry)
    }
    .await;
    let application = match inserted {
        Ok(application) => application,
        Err(e) => {
            release(&*state.assets, stored.as_ref().map(|s| s.path.as_str())).await;
            return Err(e);
        }
    };
    tracing::info!(
        "stored application {} for job {}",
        application.id,
        application.job_id
    );
    announce(&*state.notifier, &CareerNotice(&application)).await;
    Ok(application)
}

pub async fn list(state: &AppState) -> Result<Vec<ApplicationEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    ApplicationSelector::new(&mut conn).get_all().await
}

pub async fn delete(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    let resume = ApplicationMutator::new(&mut tx)
        .delete(id)
        .await?
        .ok_or(AppError::NotFound("application"))?;
    tx.commit().await?;
    release(&*state.assets, resume.as_deref()).await;
    Ok(())
}

/// Active jobs currently accepting applications.
pub async fn open_jobs(state: &AppState) -> Result<Vec<JobEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    JobSelector::new(&mut conn)
        .get_open_on(Utc::now().date_naive())
        .await
}

pub async fn list_jobs(state: &AppState) -> Result<Vec<JobEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    JobSelector::new(&mut conn).get_all().await
}

pub async fn create_job(state: &AppState, input: &JobInput) -> Result<JobEntry> {
    let schedule = input.check()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).create(input, &schedule).await?;
    tx.commit().await?;
    tracing::info!("created job {} ({})", job.id, &job.title);
    Ok(job)
}

pub async fn update_job(state: &AppState, id: i64, input: &JobInput) -> Result<JobEntry> {
    let schedule = input.check()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .update(id, input, &schedule)
        .await?
        .ok_or(AppError::NotFound("job"))?;
    tx.commit().await?;
    Ok(job)
}

/// Removes a job with its applications, releasing their resumes.
pub async fn delete_job(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    let resumes = ApplicationSelector::new(&mut tx)
        .resume_paths_for_job(id)
        .await?;
    if !JobMutator::new(&mut tx).delete(id).await? {
        return Err(AppError::NotFound("job"));
    }
    tx.commit().await?;
    for path in &resumes {
        release(&*state.assets, Some(path.as_str())).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::{
        internal::notify::Channel,
        server::state::testing::{test_app, TestApp},
    };

    fn window(start_offset: i64, end_offset: i64, is_active: bool) -> JobInput {
        let today = Utc::now().date_naive();
        JobInput {
            title: "Backend Intern".into(),
            description: "Rust and SQL".into(),
            location: "Hyderabad".into(),
            is_active: Lenient::new(is_active),
            application_start_date: Lenient::new((today + Duration::days(start_offset)).to_string()),
            application_end_date: Lenient::new((today + Duration::days(end_offset)).to_string()),
        }
    }

    fn form(job: i64) -> ApplicationForm {
        ApplicationForm {
            job: Some(job.to_string()),
            full_name: "Meena".into(),
            email: "meena@example.com".into(),
            phone: "9000000002".into(),
            college: "CITS".into(),
            cgpa: "8.9".into(),
            year_of_passing: "2026".into(),
            experience: "none".into(),
            skills: "rust".into(),
        }
    }

    fn resume(name: &str) -> Upload {
        Upload {
            file_name: name.into(),
            content_type: "application/pdf".into(),
            data: b"%PDF-1.4".to_vec(),
        }
    }

    async fn count(app: &TestApp) -> i64 {
        let mut conn = app.state.db_pool.acquire().await.unwrap();
        ApplicationSelector::new(&mut conn).count().await.unwrap()
    }

    #[tokio::test]
    #[traced_test]
    async fn test_submit_to_open_job() {
        let app = test_app().await;
        let job = create_job(&app.state, &window(-1, 1, true)).await.unwrap();
        let application = submit(&app.state, &form(job.id), Some(resume("cv.pdf")))
            .await
            .unwrap();
        assert_eq!(application.job_title, "Backend Intern");
        assert_eq!(count(&app).await, 1);
        assert_eq!(app.assets.uploaded(), vec!["media/resumes/1_cv.pdf".to_string()]);
        let sent = app.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Channel::Career);
        assert!(sent[0].1.ends_with("Resume:\nhttps://assets.test/media/resumes/1_cv.pdf"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_window_bounds_are_inclusive() {
        let app = test_app().await;
        let job = create_job(&app.state, &window(0, 0, true)).await.unwrap();
        assert!(submit(&app.state, &form(job.id), None).await.is_ok());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_closed_and_inactive_jobs_are_rejected() {
        let app = test_app().await;
        let closed = create_job(&app.state, &window(-10, -1, true)).await.unwrap();
        let upcoming = create_job(&app.state, &window(1, 10, true)).await.unwrap();
        let inactive = create_job(&app.state, &window(-1, 1, false)).await.unwrap();
        for (job, message) in [
            (closed.id, "Applications for this job are closed"),
            (upcoming.id, "Applications for this job are closed"),
            (inactive.id, "This job is no longer active"),
        ] {
            match submit(&app.state, &form(job), Some(resume("cv.pdf"))).await {
                Err(AppError::Rejected { field, message: m }) => {
                    assert_eq!(field, "job");
                    assert_eq!(m, message);
                }
                other => panic!("expected rejection, got {:?}", other),
            }
        }
        assert_eq!(count(&app).await, 0);
        assert!(app.assets.uploaded().is_empty());
        assert!(app.notifier.sent().is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_missing_and_unknown_job() {
        let app = test_app().await;
        let mut missing = form(1);
        missing.job = Some("  ".into());
        assert!(matches!(
            submit(&app.state, &missing, None).await,
            Err(AppError::Rejected { field: "job", .. })
        ));
        assert!(matches!(
            submit(&app.state, &form(404), None).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_non_pdf_resume_is_not_uploaded() {
        let app = test_app().await;
        let job = create_job(&app.state, &window(-1, 1, true)).await.unwrap();
        assert!(matches!(
            submit(&app.state, &form(job.id), Some(resume("cv.docx"))).await,
            Err(AppError::Validation(_))
        ));
        assert!(app.assets.uploaded().is_empty());
        assert_eq!(count(&app).await, 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_delete_releases_resume() {
        let app = test_app().await;
        let job = create_job(&app.state, &window(-1, 1, true)).await.unwrap();
        let application = submit(&app.state, &form(job.id), Some(resume("cv.v2.pdf")))
            .await
            .unwrap();
        delete(&app.state, application.id).await.unwrap();
        assert_eq!(app.assets.destroyed(), vec!["media/resumes/1_cv.v2".to_string()]);
        assert!(matches!(
            delete(&app.state, application.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(app.assets.destroyed().len(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_open_jobs_filters_and_orders() {
        let app = test_app().await;
        let older = create_job(&app.state, &window(-5, 5, true)).await.unwrap();
        create_job(&app.state, &window(-5, 5, false)).await.unwrap();
        create_job(&app.state, &window(-5, -1, true)).await.unwrap();
        let newer = create_job(&app.state, &window(-1, 1, true)).await.unwrap();
        let ids: Vec<i64> = open_jobs(&app.state).await.unwrap().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(list_jobs(&app.state).await.unwrap().len(), 4);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_job_window_must_be_ordered() {
        let app = test_app().await;
        assert!(matches!(
            create_job(&app.state, &window(2, 1, true)).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_job_fields_are_parsed_leniently() {
        let app = test_app().await;
        let mut input = window(-1, 1, true);
        input.is_active = Lenient::default();
        input.application_start_date = Lenient::new("yesterday");
        input.application_end_date = Lenient::default();
        match create_job(&app.state, &input).await {
            Err(AppError::Validation(fields)) => {
                assert!(fields["application_start_date"][0].starts_with("Date has wrong format."));
                assert_eq!(fields["application_end_date"], vec!["This field is required."]);
                assert!(!fields.contains_key("is_active"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let mut flagged = window(-1, 1, true);
        flagged.is_active = Lenient::new("false");
        assert!(!create_job(&app.state, &flagged).await.unwrap().is_active);
        flagged.is_active = Lenient::new("maybe");
        match create_job(&app.state, &flagged).await {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields["is_active"], vec!["Must be a valid boolean."])
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let mut defaulted = window(-1, 1, true);
        defaulted.is_active = Lenient::default();
        assert!(create_job(&app.state, &defaulted).await.unwrap().is_active);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failed_insert_releases_uploaded_resume() {
        let app = test_app().await;
        let job = create_job(&app.state, &window(-1, 1, true)).await.unwrap();
        sqlx::query(
            "CREATE TRIGGER refuse_applications BEFORE INSERT ON career_applications
             BEGIN SELECT RAISE(ABORT, 'applications are frozen'); END",
        )
        .execute(&*app.state.db_pool)
        .await
        .unwrap();

        assert!(matches!(
            submit(&app.state, &form(job.id), Some(resume("cv.pdf"))).await,
            Err(AppError::Database(_))
        ));
        assert_eq!(app.assets.uploaded(), vec!["media/resumes/1_cv.pdf".to_string()]);
        assert_eq!(app.assets.destroyed(), vec!["media/resumes/1_cv".to_string()]);
        assert_eq!(count(&app).await, 0);
        assert!(app.notifier.sent().is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_delete_job_cascades_and_releases_resumes() {
        let app = test_app().await;
        let job = create_job(&app.state, &window(-1, 1, true)).await.unwrap();
        submit(&app.state, &form(job.id), Some(resume("a.pdf"))).await.unwrap();
        submit(&app.state, &form(job.id), None).await.unwrap();
        delete_job(&app.state, job.id).await.unwrap();
        assert_eq!(count(&app).await, 0);
        assert_eq!(app.assets.destroyed(), vec!["media/resumes/1_a".to_string()]);
    }
}
