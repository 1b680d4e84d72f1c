use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{AssetStore, StoredAsset, Upload};
use crate::{
    conf::Settings,
    prelude::{AppError, Result},
};

#[derive(Debug, Clone)]
struct Credentials {
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    public_id: String,
    #[serde(default)]
    format: String,
    secure_url: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct Cloudinary {
    client: reqwest::Client,
    api_base: String,
    root_folder: String,
    credentials: Option<Credentials>,
}

/// Signs request parameters: sorted `k=v` pairs joined with `&`, followed by
/// the api secret, hashed with SHA-256.
fn sign(params: &mut [(&str, String)], api_secret: &str) -> String {
    params.sort_by(|a, b| a.0.cmp(b.0));
    let joined = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    hex::encode(Sha256::digest(format!("{}{}", joined, api_secret).as_bytes()))
}

impl Cloudinary {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        let credentials = match (
            &settings.cloudinary_cloud_name,
            &settings.cloudinary_api_key,
            &settings.cloudinary_api_secret,
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(Credentials {
                cloud_name: cloud_name.clone(),
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
            }),
            _ => {
                tracing::warn!("cloudinary credentials missing, uploads will be refused");
                None
            }
        };
        Cloudinary {
            client,
            api_base: settings.cloudinary_api_base.trim_end_matches('/').to_string(),
            root_folder: settings.cloudinary_folder.trim_matches('/').to_string(),
            credentials,
        }
    }

    fn credentials(&self) -> Result<&Credentials> {
        self.credentials
            .as_ref()
            .ok_or_else(|| AppError::Upstream("remote asset host is not configured".into()))
    }

    fn endpoint(&self, creds: &Credentials, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            &self.api_base, &creds.cloud_name, action
        )
    }
}

#[async_trait::async_trait]
impl AssetStore for Cloudinary {
    async fn upload(&self, folder: &str, upload: Upload) -> Result<StoredAsset> {
        let creds = self.credentials()?;
        let folder = if self.root_folder.is_empty() {
            folder.to_string()
        } else {
            format!("{}/{}", &self.root_folder, folder)
        };
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &mut [("folder", folder.clone()), ("timestamp", timestamp.clone())],
            &creds.api_secret,
        );
        let part = Part::bytes(upload.data)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("api_key", creds.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);
        let resp = self
            .client
            .post(self.endpoint(creds, "upload"))
            .multipart(form)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "asset upload failed ({}): {}",
                status, body
            )));
        }
        let stored: UploadResponse = resp.json().await?;
        let path = if stored.format.is_empty() {
            stored.public_id
        } else {
            format!("{}.{}", stored.public_id, stored.format)
        };
        tracing::debug!("uploaded asset {}", &path);
        Ok(StoredAsset {
            path,
            url: stored.secure_url,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<()> {
        let creds = self.credentials()?;
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &mut [
                ("public_id", public_id.to_string()),
                ("timestamp", timestamp.clone()),
            ],
            &creds.api_secret,
        );
        let resp = self
            .client
            .post(self.endpoint(creds, "destroy"))
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", creds.api_key.as_str()),
                ("signature_algorithm", "sha256"),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AppError::Upstream(format!(
                "asset destroy failed with {}",
                resp.status()
            )));
        }
        let outcome: DestroyResponse = resp.json().await?;
        match outcome.result.as_str() {
            "ok" => Ok(()),
            "not found" => {
                tracing::warn!("remote asset {} was already gone", public_id);
                Ok(())
            }
            other => Err(AppError::Upstream(format!(
                "asset destroy returned {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn settings_for(server: &MockServer) -> Settings {
        Settings {
            cloudinary_api_base: server.uri(),
            cloudinary_cloud_name: Some("demo".into()),
            cloudinary_api_key: Some("key".into()),
            cloudinary_api_secret: Some("secret".into()),
            ..Settings::default()
        }
    }

    #[test]
    fn test_signature_sorts_parameters() {
        let a = sign(
            &mut [("timestamp", "1".into()), ("public_id", "x".into())],
            "s",
        );
        let b = sign(
            &mut [("public_id", "x".into()), ("timestamp", "1".into())],
            "s",
        );
        assert_eq!(a, b);
        assert_eq!(a, hex::encode(Sha256::digest(b"public_id=x&timestamp=1s")));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_upload_returns_path_with_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "public_id": "media/gallery/team_x1y2",
                "format": "jpg",
                "secure_url": "https://res.example.com/media/gallery/team_x1y2.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;
        let store = Cloudinary::new(reqwest::Client::new(), &settings_for(&server));
        let stored = store
            .upload(
                "gallery",
                Upload {
                    file_name: "team.jpg".into(),
                    content_type: "image/jpeg".into(),
                    data: vec![0xff, 0xd8, 0xff],
                },
            )
            .await
            .expect("upload succeeds");
        assert_eq!(stored.path, "media/gallery/team_x1y2.jpg");
        assert_eq!(stored.url, "https://res.example.com/media/gallery/team_x1y2.jpg");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_destroy_posts_public_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/destroy"))
            .and(body_string_contains("public_id=media%2Fgallery%2Fteam_x1y2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "ok"})))
            .expect(1)
            .mount(&server)
            .await;
        let store = Cloudinary::new(reqwest::Client::new(), &settings_for(&server));
        store
            .destroy("media/gallery/team_x1y2")
            .await
            .expect("destroy succeeds");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_missing_credentials_refuse_upload() {
        let store = Cloudinary::new(reqwest::Client::new(), &Settings::default());
        let err = store
            .upload(
                "gallery",
                Upload {
                    file_name: "a.png".into(),
                    content_type: "image/png".into(),
                    data: vec![1],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
