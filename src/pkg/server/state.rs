use std::{str::FromStr, sync::Arc, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};

use crate::{
    conf::Settings,
    pkg::internal::{
        assets::{cloudinary::Cloudinary, AssetStore},
        notify::{telegram::TelegramNotifier, ChatNotifier},
        sheets::{google::GoogleSheets, SheetAppender},
    },
    prelude::Result,
};

pub async fn db_pool(settings: &Settings) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub fn http_client(settings: &Settings) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.notify_timeout_secs))
        .build()?)
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<SqlitePool>,
    pub settings: Arc<Settings>,
    pub notifier: Arc<dyn ChatNotifier>,
    pub sheets: Arc<dyn SheetAppender>,
    pub assets: Arc<dyn AssetStore>,
}

impl AppState {
    pub async fn new(settings: Arc<Settings>) -> Result<AppState> {
        let client = http_client(&settings)?;
        Ok(AppState {
            db_pool: Arc::new(db_pool(&settings).await?),
            notifier: Arc::new(TelegramNotifier::new(client.clone(), &settings)),
            sheets: Arc::new(GoogleSheets::new(client.clone(), &settings)),
            assets: Arc::new(Cloudinary::new(client, &settings)),
            settings,
        })
    }
}

#[async_trait::async_trait]
pub trait GetTxn {
    async fn begin_txn(&self) -> Result<Transaction<'static, Sqlite>>;
}

#[async_trait::async_trait]
impl GetTxn for SqlitePool {
    async fn begin_txn(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.begin().await?)
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::{
        cmd::migrate::MIGRATOR,
        pkg::internal::testing::{RecordingAssets, RecordingNotifier, RecordingSheet},
    };

    /// A migrated throwaway database wired to recording collaborators.
    pub struct TestApp {
        pub state: AppState,
        pub notifier: Arc<RecordingNotifier>,
        pub sheets: Arc<RecordingSheet>,
        pub assets: Arc<RecordingAssets>,
        _dir: TempDir,
    }

    pub async fn test_app() -> TestApp {
        test_app_with(Settings::default()).await
    }

    pub async fn test_app_with(mut settings: Settings) -> TestApp {
        let dir = tempfile::tempdir().expect("tempdir");
        settings.database_url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("formdesk.db").display()
        );
        let pool = db_pool(&settings).await.expect("pool");
        MIGRATOR.run(&pool).await.expect("migrations");
        let notifier = Arc::new(RecordingNotifier::default());
        let sheets = Arc::new(RecordingSheet::default());
        let assets = Arc::new(RecordingAssets::default());
        let state = AppState {
            db_pool: Arc::new(pool),
            settings: Arc::new(settings),
            notifier: notifier.clone(),
            sheets: sheets.clone(),
            assets: assets.clone(),
        };
        TestApp {
            state,
            notifier,
            sheets,
            assets,
            _dir: dir,
        }
    }
}
