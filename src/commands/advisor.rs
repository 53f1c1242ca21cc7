//! Style advisor commands: body shape, skin tone and visual search.

use crate::advisor::{validate_measurements, SkinTone};
use crate::catalog::models::{Measurements, QuizAnswers};
use crate::catalog::{ImageUpload, StorefrontApi, StorefrontClient};
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Runs the advisor endpoints and formats their answers.
pub struct AdvisorCommand {
    config: Config,
}

fn read_image(path: &Path) -> Result<ImageUpload> {
    ImageUpload::from_path(path)
        .with_context(|| format!("Failed to read image: {}", path.display()))
}

impl AdvisorCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<StorefrontClient> {
        StorefrontClient::new(&self.config).context("Failed to create HTTP client")
    }

    fn formatter(&self) -> Formatter {
        Formatter::new(self.config.format)
    }

    pub async fn measure(&self, measurements: &Measurements) -> Result<String> {
        self.measure_with_client(&self.client()?, measurements).await
    }

    /// Classifies body shape from measurements, validated locally first.
    pub async fn measure_with_client(
        &self,
        client: &impl StorefrontApi,
        measurements: &Measurements,
    ) -> Result<String> {
        validate_measurements(measurements)?;
        info!("Classifying body shape from measurements");

        let result = client
            .classify_measurements(measurements)
            .await
            .context("Failed to classify body shape")?;

        Ok(self.formatter().format_body_shape(
            &result.body_shape,
            Some(result.waist_hip_ratio),
            &result.data,
        ))
    }

    pub async fn quiz(&self, answers: &QuizAnswers) -> Result<String> {
        self.quiz_with_client(&self.client()?, answers).await
    }

    /// Classifies body shape from quiz answers.
    pub async fn quiz_with_client(
        &self,
        client: &impl StorefrontApi,
        answers: &QuizAnswers,
    ) -> Result<String> {
        info!("Classifying body shape from quiz answers");
        let result =
            client.classify_quiz(answers).await.context("Failed to classify body shape")?;
        Ok(self.formatter().format_body_shape(&result.body_shape, None, &result.details))
    }

    pub async fn image_recommend(&self, image: &Path) -> Result<String> {
        self.image_recommend_with_client(&self.client()?, read_image(image)?).await
    }

    /// Products that look like the uploaded image, best match first.
    pub async fn image_recommend_with_client(
        &self,
        client: &impl StorefrontApi,
        image: ImageUpload,
    ) -> Result<String> {
        let results = client
            .image_recommendations(image)
            .await
            .context("Failed to fetch recommendations")?;
        info!("Found {} visually similar products", results.len());
        Ok(self.formatter().format_scored(&results))
    }

    pub async fn skin_tone(&self, image: &Path) -> Result<String> {
        self.skin_tone_with_client(&self.client()?, read_image(image)?).await
    }

    /// Predicts the skin tone of a photo and prints its colour guide.
    pub async fn skin_tone_with_client(
        &self,
        client: &impl StorefrontApi,
        image: ImageUpload,
    ) -> Result<String> {
        let prediction =
            client.predict_skin_tone(image).await.context("Failed to predict skin tone")?;
        debug!("Predicted bucket: {}", prediction.skin_tone);

        let Some(tone) = SkinTone::from_bucket(&prediction.skin_tone) else {
            anyhow::bail!("Unrecognised skin tone from backend: '{}'", prediction.skin_tone);
        };
        Ok(self.formatter().format_skin_tone(tone))
    }

    /// The colour guide for one tone, or all of them. No backend call.
    pub fn skin_guide(&self, tone: Option<SkinTone>) -> String {
        let formatter = self.formatter();
        match tone {
            Some(tone) => formatter.format_skin_tone(tone),
            None if self.config.format == OutputFormat::Json => {
                let guides: Vec<String> =
                    SkinTone::ALL.iter().map(|t| formatter.format_skin_tone(*t)).collect();
                format!("[{}]", guides.join(","))
            }
            None => SkinTone::ALL
                .iter()
                .map(|t| formatter.format_skin_tone(*t))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}
